//! Compile service responses.
//!
//! The service answers with a JSON object whose `success` boolean selects
//! between a success body (`message`, `pdfUrl`, optional `pdfBase64`) and a
//! failure body (`error`, optional `details`).

use serde::Deserialize;

/// The wire shape before the `success` flag is interpreted.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawResponse {
  success:    bool,
  #[serde(default)]
  message:    Option<String>,
  #[serde(default)]
  pdf_url:    Option<String>,
  #[serde(default)]
  pdf_base64: Option<String>,
  #[serde(default)]
  error:      Option<String>,
  #[serde(default)]
  details:    Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawResponse")]
pub enum CompileResponse {
  Success(CompileSuccess),
  Failure(CompileFailure),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileSuccess {
  pub message:    String,
  /// Server-side download path; informational only.
  pub pdf_url:    String,
  /// The rendered PDF, base64-encoded.
  pub pdf_base64: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileFailure {
  pub error:   String,
  pub details: Vec<String>,
}

impl CompileFailure {
  /// One user-facing line: `error`, or `error: detail, detail` when details
  /// are present.
  pub fn message(&self) -> String {
    if self.details.is_empty() {
      self.error.clone()
    } else {
      format!("{}: {}", self.error, self.details.join(", "))
    }
  }
}

impl TryFrom<RawResponse> for CompileResponse {
  type Error = String;

  fn try_from(raw: RawResponse) -> Result<Self, Self::Error> {
    if raw.success {
      return Ok(Self::Success(CompileSuccess {
        message:    raw.message.unwrap_or_default(),
        pdf_url:    raw.pdf_url.unwrap_or_default(),
        pdf_base64: raw.pdf_base64.filter(|b| !b.is_empty()),
      }));
    }
    let error = raw
      .error
      .ok_or_else(|| "failure response without an error field".to_string())?;
    Ok(Self::Failure(CompileFailure {
      error,
      details: raw.details.unwrap_or_default(),
    }))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn parse(json: &str) -> CompileResponse { serde_json::from_str(json).unwrap() }

  #[test]
  fn failure_with_details_joins_them() {
    let resp = parse(
      r#"{"success": false, "error": "Invalid input", "details": ["email is required"]}"#,
    );
    let CompileResponse::Failure(failure) = resp else {
      panic!("expected failure");
    };
    assert_eq!(failure.message(), "Invalid input: email is required");
  }

  #[test]
  fn failure_with_several_details() {
    let failure = CompileFailure {
      error:   "Validation failed".into(),
      details: vec!["First name is required".into(), "City is required".into()],
    };
    assert_eq!(
      failure.message(),
      "Validation failed: First name is required, City is required"
    );
  }

  #[test]
  fn failure_without_details_is_just_the_error() {
    let resp = parse(r#"{"success": false, "error": "LaTeX compilation failed"}"#);
    let CompileResponse::Failure(failure) = resp else {
      panic!("expected failure");
    };
    assert_eq!(failure.message(), "LaTeX compilation failed");
  }

  #[test]
  fn success_carries_payload() {
    let resp = parse(
      r#"{"success": true, "message": "ok", "pdfUrl": "/api/download/x.pdf", "pdfBase64": "JVBERg=="}"#,
    );
    assert_eq!(
      resp,
      CompileResponse::Success(CompileSuccess {
        message:    "ok".into(),
        pdf_url:    "/api/download/x.pdf".into(),
        pdf_base64: Some("JVBERg==".into()),
      })
    );
  }

  #[test]
  fn failure_without_error_is_malformed() {
    assert!(serde_json::from_str::<CompileResponse>(r#"{"success": false}"#).is_err());
    assert!(serde_json::from_str::<CompileResponse>(r#"{"error": "x"}"#).is_err());
  }
}

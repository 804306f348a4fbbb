//! Single-flight submission of a document to the compile service.
//!
//! At most one compile request is outstanding per [`Submitter`]. The in-flight
//! flag is raised when a [`Submission`] is prepared and lowered when it is
//! dropped, so every exit path (success, rejection, transport failure, or a
//! cancelled future) releases it.

use std::sync::{
  Arc,
  atomic::{AtomicBool, Ordering},
};

use thiserror::Error;
use tracing::{error, info, warn};
use vitae_core::Document;

use crate::{
  artifact::Artifact,
  client::CompileClient,
  payload::CompileRequest,
  response::{CompileFailure, CompileResponse},
};

/// Shown for any failure the service did not describe itself.
pub const GENERIC_FAILURE: &str = "Failed to compile resume. Please try again.";

/// Why a submission did not produce a compiled document. The `Display` form
/// is the message shown to the user.
#[derive(Debug, Error)]
pub enum SubmitError {
  #[error("a compile request is already in progress")]
  Busy,

  #[error("missing required fields: {}", .0.join(", "))]
  Incomplete(Vec<&'static str>),

  /// The service rejected the document.
  #[error("{}", .0.message())]
  Rejected(CompileFailure),

  /// Network, protocol, or decoding failure.
  #[error("{}", GENERIC_FAILURE)]
  Transport(#[source] crate::Error),
}

/// A successful compile.
#[derive(Debug, Clone)]
pub struct Compiled {
  pub message:  String,
  pub pdf_url:  String,
  /// Absent when the service did not inline the PDF.
  pub artifact: Option<Artifact>,
}

// ─── In-flight flag ──────────────────────────────────────────────────────────

/// Holds the in-flight flag raised; lowers it on drop.
#[derive(Debug)]
struct InFlight(Arc<AtomicBool>);

impl InFlight {
  fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
    flag
      .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
      .ok()
      .map(|_| Self(Arc::clone(flag)))
  }
}

impl Drop for InFlight {
  fn drop(&mut self) { self.0.store(false, Ordering::Release); }
}

// ─── Submitter ───────────────────────────────────────────────────────────────

/// Gates compile requests: refuses incomplete documents and overlapping
/// submissions.
///
/// Cheap to clone; clones share the in-flight flag.
#[derive(Debug, Clone)]
pub struct Submitter {
  client:    CompileClient,
  in_flight: Arc<AtomicBool>,
}

impl Submitter {
  pub fn new(client: CompileClient) -> Self {
    Self {
      client,
      in_flight: Arc::new(AtomicBool::new(false)),
    }
  }

  pub fn client(&self) -> &CompileClient { &self.client }

  pub fn in_flight(&self) -> bool { self.in_flight.load(Ordering::Acquire) }

  /// Whether the submit action should currently be enabled for `doc`.
  pub fn can_submit(&self, doc: &Document) -> bool {
    doc.is_valid() && !self.in_flight()
  }

  /// Validate `doc`, raise the in-flight flag and capture the request body.
  /// The document is only read; later edits do not affect the prepared
  /// submission.
  pub fn prepare(&self, doc: &Document) -> Result<Submission, SubmitError> {
    let missing = doc.missing_fields();
    if !missing.is_empty() {
      return Err(SubmitError::Incomplete(missing));
    }
    let guard = InFlight::acquire(&self.in_flight).ok_or(SubmitError::Busy)?;
    Ok(Submission {
      client:  self.client.clone(),
      request: CompileRequest::from(doc),
      _guard:  guard,
    })
  }

  /// Prepare and send in one step.
  pub async fn submit(&self, doc: &Document) -> Result<Compiled, SubmitError> {
    self.prepare(doc)?.send().await
  }
}

// ─── Submission ──────────────────────────────────────────────────────────────

/// A compile request that owns the in-flight flag until it completes.
#[derive(Debug)]
pub struct Submission {
  client:  CompileClient,
  request: CompileRequest,
  _guard:  InFlight,
}

impl Submission {
  pub fn request(&self) -> &CompileRequest { &self.request }

  pub async fn send(self) -> Result<Compiled, SubmitError> {
    let sections = self.request.sections.len();
    info!(sections, "compiling resume");

    match self.client.compile(&self.request).await {
      Ok(CompileResponse::Success(success)) => {
        let artifact = success
          .pdf_base64
          .as_deref()
          .map(|encoded| {
            Artifact::from_base64(encoded, &self.request.basic_details)
          })
          .transpose()
          .map_err(transport)?;
        info!(
          bytes = artifact.as_ref().map_or(0, Artifact::len),
          "resume compiled"
        );
        Ok(Compiled {
          message: success.message,
          pdf_url: success.pdf_url,
          artifact,
        })
      }
      Ok(CompileResponse::Failure(failure)) => {
        warn!(message = %failure.message(), "compile rejected");
        Err(SubmitError::Rejected(failure))
      }
      Err(e) => Err(transport(e)),
    }
  }
}

fn transport(e: crate::Error) -> SubmitError {
  error!(error = %e, "compile request failed");
  SubmitError::Transport(e)
}

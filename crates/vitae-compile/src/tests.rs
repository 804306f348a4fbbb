//! HTTP-level tests for the compile client and submitter against a mock
//! compile service.

use serde_json::json;
use vitae_core::{Document, SectionType, edit::BasicDetailsPatch};
use wiremock::{
  Mock, MockServer, ResponseTemplate,
  matchers::{header, method, path},
};

use crate::{
  ClientConfig, CompileClient, CompileRequest, CompileResponse, SubmitError,
  Submitter, submit::GENERIC_FAILURE,
};

async fn server() -> MockServer { MockServer::start().await }

fn submitter(server: &MockServer) -> Submitter {
  let client = CompileClient::new(ClientConfig {
    base_url: format!("{}/api/", server.uri()),
  })
  .expect("client");
  Submitter::new(client)
}

fn success_body() -> serde_json::Value {
  json!({
    "success": true,
    "message": "Resume compiled successfully",
    "pdfUrl": "/api/download/resume.pdf",
    "pdfBase64": "JVBERi0xLjQK",
  })
}

// ─── Client ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn posts_json_to_compile_endpoint() {
  let server = server().await;
  Mock::given(method("POST"))
    .and(path("/api/compile-resume"))
    .and(header("content-type", "application/json"))
    .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
    .expect(1)
    .mount(&server)
    .await;

  let client = CompileClient::new(ClientConfig {
    base_url: format!("{}/api", server.uri()),
  })
  .unwrap();
  let resp = client
    .compile(&CompileRequest::from(&Document::demo()))
    .await
    .unwrap();
  assert!(matches!(resp, CompileResponse::Success(_)));
}

#[tokio::test]
async fn request_body_omits_hidden_sections_and_editor_fields() {
  let server = server().await;
  Mock::given(method("POST"))
    .and(path("/api/compile-resume"))
    .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
    .mount(&server)
    .await;

  let mut doc = Document::demo();
  doc.toggle_visibility("education").unwrap();
  submitter(&server).submit(&doc).await.unwrap();

  let requests = server.received_requests().await.unwrap();
  assert_eq!(requests.len(), 1);
  let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();

  let sections = body["sections"].as_array().unwrap();
  assert_eq!(sections.len(), 5);
  assert!(sections.iter().all(|s| s["type"] != "education"));
  assert!(sections.iter().all(|s| s.get("id").is_none()));
  assert!(sections.iter().all(|s| s.get("visible").is_none()));
  assert_eq!(body["basicDetails"]["email"], "priya.sharma@email.com");

  // The document itself still holds the hidden section.
  assert_eq!(doc.sections.len(), 6);
  assert_eq!(
    doc.sections.last().map(|s| s.kind()),
    Some(SectionType::Education)
  );
}

// ─── Submitter ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn success_decodes_artifact() {
  let server = server().await;
  Mock::given(method("POST"))
    .and(path("/api/compile-resume"))
    .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
    .mount(&server)
    .await;

  let submitter = submitter(&server);
  let compiled = submitter.submit(&Document::demo()).await.unwrap();
  let artifact = compiled.artifact.expect("artifact");
  assert_eq!(artifact.bytes().as_ref(), b"%PDF-1.4\n");
  assert_eq!(artifact.file_name(), "Priya_Sharma_Resume.pdf");
  assert_eq!(compiled.pdf_url, "/api/download/resume.pdf");
  assert!(!submitter.in_flight());
}

#[tokio::test]
async fn rejection_surfaces_combined_message() {
  let server = server().await;
  Mock::given(method("POST"))
    .and(path("/api/compile-resume"))
    .respond_with(ResponseTemplate::new(400).set_body_json(json!({
      "success": false,
      "error": "Invalid input",
      "details": ["email is required"],
    })))
    .mount(&server)
    .await;

  let submitter = submitter(&server);
  let doc = Document::demo();
  let err = submitter.submit(&doc).await.unwrap_err();
  assert!(matches!(err, SubmitError::Rejected(_)));
  assert_eq!(err.to_string(), "Invalid input: email is required");
  assert!(!submitter.in_flight());
  assert_eq!(doc, Document::demo());
}

#[tokio::test]
async fn non_json_response_is_a_generic_failure() {
  let server = server().await;
  Mock::given(method("POST"))
    .and(path("/api/compile-resume"))
    .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
    .mount(&server)
    .await;

  let submitter = submitter(&server);
  let err = submitter.submit(&Document::demo()).await.unwrap_err();
  assert!(matches!(err, SubmitError::Transport(crate::Error::Malformed { .. })));
  assert_eq!(err.to_string(), GENERIC_FAILURE);
  assert!(!submitter.in_flight());
}

#[tokio::test]
async fn undecodable_pdf_is_a_generic_failure() {
  let server = server().await;
  Mock::given(method("POST"))
    .and(path("/api/compile-resume"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({
      "success": true,
      "message": "ok",
      "pdfUrl": "/api/download/x.pdf",
      "pdfBase64": "%%% not base64 %%%",
    })))
    .mount(&server)
    .await;

  let err = submitter(&server)
    .submit(&Document::demo())
    .await
    .unwrap_err();
  assert!(matches!(err, SubmitError::Transport(crate::Error::Base64(_))));
}

#[tokio::test]
async fn unreachable_service_is_a_generic_failure() {
  let client = CompileClient::new(ClientConfig {
    base_url: "http://127.0.0.1:1/api".into(),
  })
  .unwrap();
  let submitter = Submitter::new(client);

  let err = submitter.submit(&Document::demo()).await.unwrap_err();
  assert!(matches!(err, SubmitError::Transport(crate::Error::Transport { .. })));
  assert_eq!(err.to_string(), GENERIC_FAILURE);
  assert!(!submitter.in_flight());
}

#[tokio::test]
async fn success_without_inline_pdf_has_no_artifact() {
  let server = server().await;
  Mock::given(method("POST"))
    .and(path("/api/compile-resume"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({
      "success": true,
      "message": "ok",
      "pdfUrl": "/api/download/x.pdf",
    })))
    .mount(&server)
    .await;

  let compiled = submitter(&server).submit(&Document::demo()).await.unwrap();
  assert!(compiled.artifact.is_none());
  assert_eq!(compiled.message, "ok");
}

#[tokio::test]
async fn incomplete_document_is_never_sent() {
  let server = server().await;
  Mock::given(method("POST"))
    .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
    .expect(0)
    .mount(&server)
    .await;

  let submitter = submitter(&server);
  let mut doc = Document::skeleton();
  assert!(!submitter.can_submit(&doc));

  let err = submitter.submit(&doc).await.unwrap_err();
  let SubmitError::Incomplete(missing) = err else {
    panic!("expected Incomplete");
  };
  assert_eq!(missing.len(), 5);

  doc.patch_basic_details(BasicDetailsPatch {
    first_name: Some("Ada".into()),
    last_name: Some("Lovelace".into()),
    email: Some("ada@example.com".into()),
    city: Some("London".into()),
    province: Some("ENG".into()),
    ..Default::default()
  });
  assert!(submitter.can_submit(&doc));
}

#[tokio::test]
async fn overlapping_submissions_are_refused() {
  let server = server().await;
  Mock::given(method("POST"))
    .and(path("/api/compile-resume"))
    .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
    .expect(1)
    .mount(&server)
    .await;

  let submitter = submitter(&server);
  let doc = Document::demo();

  let first = submitter.prepare(&doc).unwrap();
  assert!(submitter.in_flight());
  assert!(!submitter.can_submit(&doc));
  assert!(matches!(submitter.prepare(&doc), Err(SubmitError::Busy)));

  first.send().await.unwrap();
  assert!(!submitter.in_flight());
  assert!(submitter.can_submit(&doc));
}

#[tokio::test]
async fn dropping_a_prepared_submission_releases_the_flag() {
  let server = server().await;
  let submitter = submitter(&server);

  let pending = submitter.prepare(&Document::demo()).unwrap();
  assert!(submitter.in_flight());
  drop(pending);
  assert!(!submitter.in_flight());
}

//! Submission adapter between a [`vitae_core::Document`] and the external
//! compile service.
//!
//! Builds the compile request (visible sections only, editor-only fields
//! stripped), sends it, and turns the response into either a decoded PDF or a
//! single user-facing error message. The document is never modified here.
//!
//! # Quick start
//!
//! ```no_run
//! # async fn run() -> anyhow::Result<()> {
//! use vitae_compile::{ClientConfig, CompileClient, Submitter};
//! use vitae_core::Document;
//!
//! let submitter = Submitter::new(CompileClient::new(ClientConfig::default())?);
//! let compiled = submitter.submit(&Document::demo()).await?;
//! if let Some(pdf) = compiled.artifact {
//!   pdf.save_in(std::path::Path::new("."))?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod artifact;
pub mod client;
pub mod error;
pub mod payload;
pub mod response;
pub mod submit;

pub use artifact::{Artifact, Preview};
pub use client::{ClientConfig, CompileClient};
pub use error::{Error, Result};
pub use payload::CompileRequest;
pub use response::{CompileFailure, CompileResponse, CompileSuccess};
pub use submit::{Compiled, SubmitError, Submitter};

#[cfg(test)]
mod tests;

//! Error types for `vitae-core`.

use thiserror::Error;

use crate::document::SectionType;

#[derive(Debug, Error)]
pub enum Error {
  #[error("section not found: {0}")]
  SectionNotFound(String),

  #[error("section {id} holds {expected} content, not {found}")]
  ContentMismatch {
    id:       String,
    expected: SectionType,
    found:    SectionType,
  },

  #[error("section {id} is {kind}, which has no {list}")]
  NoSuchList {
    id:   String,
    kind: SectionType,
    list: &'static str,
  },

  #[error("index {index} out of range for list of length {len}")]
  IndexOutOfRange { index: usize, len: usize },

  #[error("cannot remove the last remaining item")]
  LastItem,

  #[error("entry patch for {patch} does not apply to a {kind} section")]
  PatchMismatch {
    kind:  SectionType,
    patch: SectionType,
  },

  #[error("section id {0} appears more than once")]
  DuplicateSectionId(String),

  #[error("section order is not a permutation of the current sections")]
  NotAPermutation,

  #[error("invalid {kind} content: {source}")]
  InvalidContent {
    kind:   SectionType,
    #[source]
    source: serde_json::Error,
  },

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

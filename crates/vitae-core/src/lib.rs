//! Core document model for the vitae résumé editor.
//!
//! Holds the résumé being edited and every operation that changes it. This
//! crate is free of HTTP and terminal dependencies; the compile client and
//! the editor front end both depend on it.

pub mod defaults;
pub mod document;
pub mod edit;
pub mod error;
pub mod reorder;
pub mod store;
pub mod validate;

pub use document::{Document, Section, SectionContent, SectionType};
pub use error::{Error, Result};
pub use store::DocumentStore;

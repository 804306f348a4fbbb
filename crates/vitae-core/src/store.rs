//! The `DocumentStore`, sole owner of the document being edited.
//!
//! Front ends hold one store and route every change through it. The store
//! has no knowledge of rendering or the network; it can be driven directly in
//! tests.

use tracing::{debug, info};

use crate::{
  Result,
  document::Document,
  edit::BasicDetailsPatch,
  reorder::DragSession,
};

/// Holds exactly one [`Document`] for the duration of an editing session.
#[derive(Debug, Clone)]
pub struct DocumentStore {
  doc: Document,
}

impl Default for DocumentStore {
  fn default() -> Self { Self::new() }
}

impl DocumentStore {
  /// A store seeded with [`Document::skeleton`].
  pub fn new() -> Self {
    Self {
      doc: Document::skeleton(),
    }
  }

  pub fn with_document(doc: Document) -> Self { Self { doc } }

  /// Read access for rendering and submission.
  pub fn document(&self) -> &Document { &self.doc }

  /// An owned copy of the current document.
  pub fn snapshot(&self) -> Document { self.doc.clone() }

  /// Replace the whole document (e.g. swapping in a different dataset). A
  /// document with repeated section ids is refused and the current one kept.
  pub fn load(&mut self, doc: Document) -> Result<()> {
    doc.check_ids()?;
    info!(sections = doc.sections.len(), "loading dataset");
    self.doc = doc;
    Ok(())
  }

  /// Return to the empty skeleton.
  pub fn reset(&mut self) {
    info!("resetting to default skeleton");
    self.doc = Document::skeleton();
  }

  /// Apply one mutation. Rejected edits leave the document unchanged and are
  /// logged at debug level.
  pub fn edit<T>(&mut self, f: impl FnOnce(&mut Document) -> Result<T>) -> Result<T> {
    let mut next = self.doc.clone();
    match f(&mut next) {
      Ok(out) => {
        self.doc = next;
        Ok(out)
      }
      Err(e) => {
        debug!("edit rejected: {e}");
        Err(e)
      }
    }
  }

  pub fn patch_basic_details(&mut self, patch: BasicDetailsPatch) {
    self.doc.patch_basic_details(patch);
  }

  pub fn toggle_visibility(&mut self, id: &str) -> Result<bool> {
    self.edit(|doc| doc.toggle_visibility(id))
  }

  /// Finish a drag by dropping it over `target`.
  pub fn drop_section(&mut self, drag: DragSession, target: &str) -> Result<bool> {
    self.edit(|doc| drag.commit(doc, target))
  }

  pub fn is_valid(&self) -> bool { self.doc.is_valid() }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::Error;

  #[test]
  fn new_store_holds_skeleton() {
    let store = DocumentStore::new();
    assert_eq!(store.document(), &Document::skeleton());
    assert!(!store.is_valid());
  }

  #[test]
  fn load_then_snapshot_round_trips() {
    let mut store = DocumentStore::new();
    store.load(Document::demo()).unwrap();
    assert_eq!(store.snapshot(), Document::demo());
    store.reset();
    assert_eq!(store.snapshot(), Document::skeleton());
  }

  #[test]
  fn load_refuses_repeated_section_ids() {
    let mut store = DocumentStore::new();
    let mut doc = Document::demo();
    doc.sections[1].id = doc.sections[0].id.clone();

    let err = store.load(doc).unwrap_err();
    assert!(matches!(err, Error::DuplicateSectionId(_)));
    assert_eq!(store.document(), &Document::skeleton());

    let drag = DragSession::begin(store.document(), "education").unwrap();
    assert!(store.drop_section(drag, "experience").unwrap());
  }

  #[test]
  fn rejected_edit_leaves_document() {
    let mut store = DocumentStore::with_document(Document::demo());
    let result = store.edit(|doc| {
      doc.toggle_visibility("education")?;
      doc.remove_entry("tech_skills", 0)
    });
    assert!(matches!(result, Err(Error::NoSuchList { .. })));
    assert!(store.document().section("education").unwrap().visible);
  }

  #[test]
  fn drag_and_drop_through_store() {
    let mut store = DocumentStore::new();
    let drag = DragSession::begin(store.document(), "education").unwrap();
    assert!(store.drop_section(drag, "profile_summary").unwrap());
    assert_eq!(store.document().sections[0].id, "education");
    assert_eq!(store.document().sections.len(), 6);
  }
}

//! Drag-to-reorder bridge.
//!
//! Translates a pick-up / drop gesture into a single [`Document::reorder`]
//! call. Nothing is committed while the drag is in progress; the session only
//! remembers which section was picked up.

use crate::{Result, document::Document};

/// An in-progress drag of one section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
  source: String,
}

impl DragSession {
  /// Pick up section `id`. Returns `None` if the document has no such
  /// section.
  pub fn begin(doc: &Document, id: &str) -> Option<Self> {
    doc.section(id).map(|_| Self {
      source: id.to_string(),
    })
  }

  pub fn source(&self) -> &str { &self.source }

  /// The full section order that results from dropping over `target`.
  ///
  /// `None` when the drop is a no-op: the target is the source itself, or
  /// either id is no longer present.
  pub fn drop_over(&self, doc: &Document, target: &str) -> Option<Vec<String>> {
    if target == self.source {
      return None;
    }
    let from = doc.position(&self.source)?;
    let to = doc.position(target)?;

    let mut order = doc.section_ids();
    let moved = order.remove(from);
    order.insert(to, moved);
    Some(order)
  }

  /// Drop over `target` and commit the resulting order. Returns whether the
  /// document changed.
  pub fn commit(self, doc: &mut Document, target: &str) -> Result<bool> {
    match self.drop_over(doc, target) {
      Some(order) => {
        doc.reorder(&order)?;
        Ok(true)
      }
      None => Ok(false),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn dropping_down_moves_source_after_target() {
    let doc = Document::skeleton();
    let drag = DragSession::begin(&doc, "profile_summary").unwrap();
    let order = drag.drop_over(&doc, "projects").unwrap();
    assert_eq!(order, vec![
      "tech_skills",
      "experience",
      "projects",
      "profile_summary",
      "volunteer",
      "education",
    ]);
  }

  #[test]
  fn dropping_up_moves_source_before_target() {
    let doc = Document::skeleton();
    let drag = DragSession::begin(&doc, "education").unwrap();
    let order = drag.drop_over(&doc, "tech_skills").unwrap();
    assert_eq!(order, vec![
      "profile_summary",
      "education",
      "tech_skills",
      "experience",
      "projects",
      "volunteer",
    ]);
  }

  #[test]
  fn dropping_on_self_or_unknown_target_is_a_no_op() {
    let mut doc = Document::skeleton();
    let drag = DragSession::begin(&doc, "experience").unwrap();
    assert_eq!(drag.drop_over(&doc, "experience"), None);
    assert_eq!(drag.drop_over(&doc, "hobbies"), None);
    assert!(!drag.commit(&mut doc, "experience").unwrap());
    assert_eq!(doc, Document::skeleton());
  }

  #[test]
  fn commit_changes_only_one_position() {
    let mut doc = Document::skeleton();
    let before = doc.section_ids();
    let drag = DragSession::begin(&doc, "volunteer").unwrap();
    assert!(drag.commit(&mut doc, "experience").unwrap());

    let after = doc.section_ids();
    assert_eq!(after[2], "volunteer");
    let without = |ids: &[String]| -> Vec<String> {
      ids.iter().filter(|id| *id != "volunteer").cloned().collect()
    };
    assert_eq!(without(&before), without(&after));
  }

  #[test]
  fn cannot_pick_up_missing_section() {
    assert!(DragSession::begin(&Document::skeleton(), "hobbies").is_none());
  }
}

//! Submission gate.
//!
//! The only validation performed anywhere in the editor: the five required
//! basic details must be non-empty. Formats (email shape, URL shape) are not
//! checked.

use crate::document::{BasicDetails, Document};

impl BasicDetails {
  /// Labels of the required fields that are still empty, in form order.
  pub fn missing_fields(&self) -> Vec<&'static str> {
    [
      ("First name", &self.first_name),
      ("Last name", &self.last_name),
      ("Email", &self.email),
      ("City", &self.city),
      ("Province", &self.province),
    ]
    .into_iter()
    .filter(|(_, value)| value.is_empty())
    .map(|(label, _)| label)
    .collect()
  }
}

impl Document {
  /// Whether the document may be submitted for compilation.
  pub fn is_valid(&self) -> bool { self.missing_fields().is_empty() }

  pub fn missing_fields(&self) -> Vec<&'static str> {
    self.basic_details.missing_fields()
  }
}

#[cfg(test)]
mod tests {
  use crate::{document::Document, edit::BasicDetailsPatch};

  #[test]
  fn skeleton_is_invalid_and_demo_is_valid() {
    assert!(!Document::skeleton().is_valid());
    assert!(Document::demo().is_valid());
  }

  #[test]
  fn filling_required_fields_enables_submission() {
    let mut doc = Document::skeleton();
    assert_eq!(doc.missing_fields(), vec![
      "First name",
      "Last name",
      "Email",
      "City",
      "Province"
    ]);

    doc.patch_basic_details(BasicDetailsPatch {
      first_name: Some("Ada".into()),
      last_name: Some("Lovelace".into()),
      email: Some("ada@example.com".into()),
      city: Some("London".into()),
      ..Default::default()
    });
    assert!(!doc.is_valid());
    assert_eq!(doc.missing_fields(), vec!["Province"]);

    doc.patch_basic_details(BasicDetailsPatch {
      province: Some("LDN".into()),
      ..Default::default()
    });
    assert!(doc.is_valid());
  }

  #[test]
  fn optional_fields_do_not_affect_validity() {
    let mut doc = Document::demo();
    doc.basic_details.github = None;
    doc.basic_details.portfolio = Some(String::new());
    assert!(doc.is_valid());

    doc.basic_details.email.clear();
    assert!(!doc.is_valid());
  }
}

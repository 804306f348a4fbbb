//! Request body for the compile service.

use serde::{Deserialize, Serialize};
use vitae_core::{Document, SectionContent, document::BasicDetails};

/// `POST /compile-resume` body.
///
/// Only visible sections are included, in document order, each reduced to
/// `{type, content}`. Section ids and visibility are editor state and never
/// cross the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileRequest {
  pub basic_details: BasicDetails,
  pub sections:      Vec<SectionContent>,
}

impl From<&Document> for CompileRequest {
  fn from(doc: &Document) -> Self {
    Self {
      basic_details: doc.basic_details.clone(),
      sections:      doc
        .visible_sections()
        .map(|s| s.content.for_submission())
        .collect(),
    }
  }
}

#[cfg(test)]
mod tests {
  use vitae_core::{
    SectionType,
    document::{ProfileSummaryContent, SummaryFormat},
  };

  use super::*;

  #[test]
  fn hidden_sections_are_dropped_in_order() {
    let mut doc = Document::demo();
    doc.toggle_visibility("education").unwrap();
    doc.toggle_visibility("tech_skills").unwrap();
    doc.move_section(4, 0).unwrap();

    let request = CompileRequest::from(&doc);
    let kinds: Vec<_> = request.sections.iter().map(|s| s.kind()).collect();
    assert_eq!(kinds, vec![
      SectionType::Volunteer,
      SectionType::ProfileSummary,
      SectionType::Experience,
      SectionType::Projects,
    ]);
    assert_eq!(doc.sections.len(), 6);
  }

  #[test]
  fn sections_carry_only_type_and_content() {
    let request = CompileRequest::from(&Document::demo());
    let json = serde_json::to_value(&request).unwrap();

    assert_eq!(json["basicDetails"]["firstName"], "Priya");
    let sections = json["sections"].as_array().unwrap();
    assert_eq!(sections.len(), 6);
    for section in sections {
      let keys: Vec<_> = section.as_object().unwrap().keys().collect();
      assert_eq!(keys.len(), 2, "unexpected keys: {keys:?}");
      assert!(section.get("type").is_some());
      assert!(section.get("content").is_some());
    }
  }

  #[test]
  fn inactive_summary_field_is_not_submitted() {
    let mut doc = Document::skeleton();
    doc
      .replace_section_content(
        "profile_summary",
        SectionContent::ProfileSummary(ProfileSummaryContent {
          format:  SummaryFormat::Paragraph,
          text:    Some("Builds things.".into()),
          bullets: Some(vec!["stale".into()]),
        }),
      )
      .unwrap();

    let json = serde_json::to_value(CompileRequest::from(&doc)).unwrap();
    let summary = &json["sections"][0]["content"];
    assert_eq!(summary["format"], "paragraph");
    assert_eq!(summary["text"], "Builds things.");
    assert!(summary.get("bullets").is_none());

    let stored = serde_json::to_value(&doc).unwrap();
    assert_eq!(stored["sections"][0]["content"]["bullets"][0], "stale");
  }

  #[test]
  fn all_hidden_yields_empty_section_list() {
    let mut doc = Document::demo();
    for id in doc.section_ids() {
      doc.toggle_visibility(&id).unwrap();
    }
    assert!(CompileRequest::from(&doc).sections.is_empty());
  }
}

//! Document types for the in-memory résumé.
//!
//! A [`Document`] is a fixed [`BasicDetails`] record plus an ordered list of
//! typed [`Section`]s. Section order is significant: it is the order the
//! compile request and the rendered output use. Hiding a section never removes
//! it from the order.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

use crate::{Error, Result};

// ─── Basic details ───────────────────────────────────────────────────────────

/// Personal details shown in the résumé header. Not part of the reorderable
/// section list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicDetails {
  pub first_name: String,
  pub last_name:  String,
  pub email:      String,
  pub city:       String,
  /// State, province, or region.
  pub province:   String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub github:     Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub linkedin:   Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub portfolio:  Option<String>,
}

// ─── Section type ────────────────────────────────────────────────────────────

/// The fixed catalog of section kinds. The snake_case name doubles as the
/// `type` tag on the wire.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  AsRefStr,
  EnumString,
  EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SectionType {
  ProfileSummary,
  TechSkills,
  Experience,
  Projects,
  Volunteer,
  Education,
}

impl SectionType {
  /// Every section type, in default document order.
  pub fn all() -> impl Iterator<Item = SectionType> { Self::iter() }

  /// Human-readable heading.
  pub fn title(self) -> &'static str {
    match self {
      Self::ProfileSummary => "Profile Summary",
      Self::TechSkills => "Technical Skills",
      Self::Experience => "Experience",
      Self::Projects => "Projects",
      Self::Volunteer => "Volunteer Experience",
      Self::Education => "Education",
    }
  }
}

// ─── Content variants ────────────────────────────────────────────────────────

/// Whether the profile summary renders as prose or as a bullet list.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SummaryFormat {
  #[default]
  Paragraph,
  Bullets,
}

/// Profile summary. Only the field selected by `format` is active; the other
/// may hold stale text from a previous format and is never submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSummaryContent {
  pub format:  SummaryFormat,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub text:    Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub bullets: Option<Vec<String>>,
}

impl ProfileSummaryContent {
  /// A copy carrying only the field selected by `format`.
  pub fn for_submission(&self) -> Self {
    match self.format {
      SummaryFormat::Paragraph => Self {
        format:  self.format,
        text:    Some(self.text.clone().unwrap_or_default()),
        bullets: None,
      },
      SummaryFormat::Bullets => Self {
        format:  self.format,
        text:    None,
        bullets: Some(self.bullets.clone().unwrap_or_default()),
      },
    }
  }
}

/// One named group of skills. `skills` is comma-separated free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCategory {
  pub name:   String,
  pub skills: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechSkillsContent {
  pub categories: Vec<SkillCategory>,
}

/// A job. Dates are free text and never parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
  pub company:    String,
  pub title:      String,
  pub location:   String,
  pub start_date: String,
  pub end_date:   String,
  pub bullets:    Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceContent {
  pub entries: Vec<ExperienceEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectEntry {
  pub name:         String,
  /// Description bullets.
  pub description:  Vec<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub technologies: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub link:         Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub date:         Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectsContent {
  pub entries: Vec<ProjectEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolunteerEntry {
  pub organization: String,
  pub title:        String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub location:     Option<String>,
  pub start_date:   String,
  pub end_date:     String,
  pub bullets:      Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolunteerContent {
  pub entries: Vec<VolunteerEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
  pub institution: String,
  pub degree:      String,
  pub start_date:  String,
  pub end_date:    String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationContent {
  pub entries: Vec<EducationEntry>,
}

// ─── SectionContent ──────────────────────────────────────────────────────────

/// The typed payload of a section. The variant is the section's type, so a
/// section can never carry content of the wrong shape.
///
/// Serialises as `{"type": "<snake_case>", "content": <payload>}`, which is
/// exactly the element shape of the compile request's `sections` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum SectionContent {
  ProfileSummary(ProfileSummaryContent),
  TechSkills(TechSkillsContent),
  Experience(ExperienceContent),
  Projects(ProjectsContent),
  Volunteer(VolunteerContent),
  Education(EducationContent),
}

impl SectionContent {
  pub fn kind(&self) -> SectionType {
    match self {
      Self::ProfileSummary(_) => SectionType::ProfileSummary,
      Self::TechSkills(_) => SectionType::TechSkills,
      Self::Experience(_) => SectionType::Experience,
      Self::Projects(_) => SectionType::Projects,
      Self::Volunteer(_) => SectionType::Volunteer,
      Self::Education(_) => SectionType::Education,
    }
  }

  /// Rebuild content from a type tag and its untagged JSON payload.
  pub fn from_parts(kind: SectionType, content: serde_json::Value) -> Result<Self> {
    let wrapped = serde_json::json!({ "type": kind, "content": content });
    serde_json::from_value(wrapped).map_err(|source| Error::InvalidContent {
      kind,
      source,
    })
  }

  /// The content as it crosses the compile boundary: inactive profile summary
  /// fields are dropped, everything else is unchanged.
  pub fn for_submission(&self) -> Self {
    match self {
      Self::ProfileSummary(summary) => {
        Self::ProfileSummary(summary.for_submission())
      }
      other => other.clone(),
    }
  }
}

// ─── Section ─────────────────────────────────────────────────────────────────

/// The on-disk / in-memory shape of a section, used to deserialise the
/// content against its declared `type`.
#[derive(Deserialize)]
struct RawSection {
  id:      String,
  #[serde(rename = "type")]
  kind:    SectionType,
  content: serde_json::Value,
  visible: bool,
}

/// One reorderable, independently hideable block of the résumé.
///
/// `id` is unique within a document and stable across reorders. The type is
/// carried by `content` and cannot change after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSection")]
pub struct Section {
  pub id:      String,
  #[serde(flatten)]
  pub content: SectionContent,
  pub visible: bool,
}

impl TryFrom<RawSection> for Section {
  type Error = Error;

  fn try_from(raw: RawSection) -> Result<Self> {
    Ok(Self {
      id:      raw.id,
      content: SectionContent::from_parts(raw.kind, raw.content)?,
      visible: raw.visible,
    })
  }
}

impl Section {
  /// A visible section whose id is its type tag.
  pub fn new(content: SectionContent) -> Self {
    Self {
      id: content.kind().to_string(),
      content,
      visible: true,
    }
  }

  pub fn kind(&self) -> SectionType { self.content.kind() }
}

// ─── Document ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDocument {
  basic_details: BasicDetails,
  sections:      Vec<Section>,
}

/// The complete résumé being edited. Section ids are unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawDocument")]
pub struct Document {
  pub basic_details: BasicDetails,
  pub sections:      Vec<Section>,
}

impl TryFrom<RawDocument> for Document {
  type Error = Error;

  fn try_from(raw: RawDocument) -> Result<Self> {
    let doc = Self {
      basic_details: raw.basic_details,
      sections:      raw.sections,
    };
    doc.check_ids()?;
    Ok(doc)
  }
}

impl Document {
  pub fn section(&self, id: &str) -> Option<&Section> {
    self.sections.iter().find(|s| s.id == id)
  }

  pub fn section_mut(&mut self, id: &str) -> Option<&mut Section> {
    self.sections.iter_mut().find(|s| s.id == id)
  }

  pub fn position(&self, id: &str) -> Option<usize> {
    self.sections.iter().position(|s| s.id == id)
  }

  /// Section ids in document order.
  pub fn section_ids(&self) -> Vec<String> {
    self.sections.iter().map(|s| s.id.clone()).collect()
  }

  /// Sections that will be rendered, in document order.
  pub fn visible_sections(&self) -> impl Iterator<Item = &Section> {
    self.sections.iter().filter(|s| s.visible)
  }

  /// Fails on the first section id that appears more than once.
  pub fn check_ids(&self) -> Result<()> {
    let mut seen = HashSet::with_capacity(self.sections.len());
    match self.sections.iter().find(|s| !seen.insert(s.id.as_str())) {
      Some(dup) => Err(Error::DuplicateSectionId(dup.id.clone())),
      None => Ok(()),
    }
  }

  /// Parse a dataset from its JSON form.
  pub fn from_json(input: &str) -> Result<Self> {
    let raw: RawDocument = serde_json::from_str(input)?;
    Self::try_from(raw)
  }

  pub fn to_json_pretty(&self) -> Result<String> {
    Ok(serde_json::to_string_pretty(self)?)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn section_serialises_with_type_tag_and_camel_case_fields() {
    let section = Section::new(SectionContent::Education(EducationContent {
      entries: vec![EducationEntry {
        institution: "University of Toronto".into(),
        degree:      "BSc".into(),
        start_date:  "2015".into(),
        end_date:    "2019".into(),
      }],
    }));

    let json = serde_json::to_value(&section).unwrap();
    assert_eq!(json["id"], "education");
    assert_eq!(json["type"], "education");
    assert_eq!(json["visible"], true);
    assert_eq!(json["content"]["entries"][0]["startDate"], "2015");
  }

  #[test]
  fn section_deserialises_content_by_declared_type() {
    let json = r#"{
      "id": "skills",
      "type": "tech_skills",
      "content": { "categories": [{ "name": "Languages", "skills": "Rust, Go" }] },
      "visible": false
    }"#;
    let section: Section = serde_json::from_str(json).unwrap();
    assert_eq!(section.id, "skills");
    assert_eq!(section.kind(), SectionType::TechSkills);
    assert!(!section.visible);
  }

  #[test]
  fn section_with_mismatched_content_is_rejected() {
    let json = r#"{
      "id": "experience",
      "type": "experience",
      "content": { "categories": [] },
      "visible": true
    }"#;
    assert!(serde_json::from_str::<Section>(json).is_err());
  }

  #[test]
  fn dataset_with_repeated_section_id_is_rejected() {
    let mut doc = Document::skeleton();
    doc.sections[1].id = "profile_summary".into();
    let json = doc.to_json_pretty().unwrap();

    let err = Document::from_json(&json).unwrap_err();
    assert!(matches!(err, Error::DuplicateSectionId(ref id) if id == "profile_summary"));
    assert!(serde_json::from_str::<Document>(&json).is_err());
  }

  #[test]
  fn optional_basic_details_are_omitted_when_absent() {
    let details = BasicDetails {
      first_name: "Ada".into(),
      ..Default::default()
    };
    let json = serde_json::to_value(&details).unwrap();
    assert_eq!(json["firstName"], "Ada");
    assert!(json.get("github").is_none());
  }

  #[test]
  fn summary_for_submission_keeps_only_active_field() {
    let summary = ProfileSummaryContent {
      format:  SummaryFormat::Bullets,
      text:    Some("stale paragraph".into()),
      bullets: Some(vec!["one".into()]),
    };
    let submitted = summary.for_submission();
    assert_eq!(submitted.text, None);
    assert_eq!(submitted.bullets, Some(vec!["one".to_string()]));

    let paragraph = ProfileSummaryContent {
      format: SummaryFormat::Paragraph,
      ..summary
    }
    .for_submission();
    assert_eq!(paragraph.text.as_deref(), Some("stale paragraph"));
    assert_eq!(paragraph.bullets, None);
  }

  #[test]
  fn section_type_tags_and_titles() {
    assert_eq!(SectionType::TechSkills.to_string(), "tech_skills");
    assert_eq!(
      "profile_summary".parse::<SectionType>().unwrap(),
      SectionType::ProfileSummary
    );
    assert_eq!(SectionType::Volunteer.title(), "Volunteer Experience");
    assert_eq!(SectionType::all().count(), 6);
  }
}

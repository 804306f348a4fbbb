//! Mutation API over [`Document`].
//!
//! A method returning `Err` leaves the document exactly as it was: most
//! operations check everything before their first write, and the bullet
//! operations run against a copy that is only committed on success. List
//! containers (entries, categories, bullets) never drop below one element.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  document::{
    Document, EducationEntry, ExperienceEntry, ProjectEntry, SectionContent,
    SectionType, SkillCategory, SummaryFormat, VolunteerEntry,
  },
};

// ─── Patches ─────────────────────────────────────────────────────────────────

/// A partial [`BasicDetails`](crate::document::BasicDetails). Present fields
/// overwrite, absent fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BasicDetailsPatch {
  pub first_name: Option<String>,
  pub last_name:  Option<String>,
  pub email:      Option<String>,
  pub city:       Option<String>,
  pub province:   Option<String>,
  pub github:     Option<String>,
  pub linkedin:   Option<String>,
  pub portfolio:  Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryPatch {
  pub name:   Option<String>,
  pub skills: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExperiencePatch {
  pub company:    Option<String>,
  pub title:      Option<String>,
  pub location:   Option<String>,
  pub start_date: Option<String>,
  pub end_date:   Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPatch {
  pub name:         Option<String>,
  pub technologies: Option<String>,
  pub link:         Option<String>,
  pub date:         Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VolunteerPatch {
  pub organization: Option<String>,
  pub title:        Option<String>,
  pub location:     Option<String>,
  pub start_date:   Option<String>,
  pub end_date:     Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EducationPatch {
  pub institution: Option<String>,
  pub degree:      Option<String>,
  pub start_date:  Option<String>,
  pub end_date:    Option<String>,
}

/// A partial entry for one of the entry-list sections. Bullet lists are not
/// patched here; use the bullet operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryPatch {
  Experience(ExperiencePatch),
  Projects(ProjectPatch),
  Volunteer(VolunteerPatch),
  Education(EducationPatch),
}

impl EntryPatch {
  pub fn kind(&self) -> SectionType {
    match self {
      Self::Experience(_) => SectionType::Experience,
      Self::Projects(_) => SectionType::Projects,
      Self::Volunteer(_) => SectionType::Volunteer,
      Self::Education(_) => SectionType::Education,
    }
  }
}

fn merge(field: &mut String, value: Option<String>) {
  if let Some(v) = value {
    *field = v;
  }
}

fn merge_opt(field: &mut Option<String>, value: Option<String>) {
  if let Some(v) = value {
    *field = Some(v);
  }
}

impl ExperiencePatch {
  fn apply(self, entry: &mut ExperienceEntry) {
    merge(&mut entry.company, self.company);
    merge(&mut entry.title, self.title);
    merge(&mut entry.location, self.location);
    merge(&mut entry.start_date, self.start_date);
    merge(&mut entry.end_date, self.end_date);
  }
}

impl ProjectPatch {
  fn apply(self, entry: &mut ProjectEntry) {
    merge(&mut entry.name, self.name);
    merge_opt(&mut entry.technologies, self.technologies);
    merge_opt(&mut entry.link, self.link);
    merge_opt(&mut entry.date, self.date);
  }
}

impl VolunteerPatch {
  fn apply(self, entry: &mut VolunteerEntry) {
    merge(&mut entry.organization, self.organization);
    merge(&mut entry.title, self.title);
    merge_opt(&mut entry.location, self.location);
    merge(&mut entry.start_date, self.start_date);
    merge(&mut entry.end_date, self.end_date);
  }
}

impl EducationPatch {
  fn apply(self, entry: &mut EducationEntry) {
    merge(&mut entry.institution, self.institution);
    merge(&mut entry.degree, self.degree);
    merge(&mut entry.start_date, self.start_date);
    merge(&mut entry.end_date, self.end_date);
  }
}

// ─── List helpers ────────────────────────────────────────────────────────────

fn item_mut<T>(list: &mut [T], index: usize) -> Result<&mut T> {
  let len = list.len();
  list.get_mut(index).ok_or(Error::IndexOutOfRange { index, len })
}

fn remove_at<T>(list: &mut Vec<T>, index: usize) -> Result<()> {
  if index >= list.len() {
    return Err(Error::IndexOutOfRange {
      index,
      len: list.len(),
    });
  }
  if list.len() == 1 {
    return Err(Error::LastItem);
  }
  list.remove(index);
  Ok(())
}

// ─── Document operations ─────────────────────────────────────────────────────

impl Document {
  /// Run `f` against a copy and commit only if it succeeds.
  fn transact<T>(&mut self, f: impl FnOnce(&mut Document) -> Result<T>) -> Result<T> {
    let mut next = self.clone();
    let out = f(&mut next)?;
    *self = next;
    Ok(out)
  }

  fn content_mut(&mut self, id: &str) -> Result<&mut SectionContent> {
    self
      .section_mut(id)
      .map(|s| &mut s.content)
      .ok_or_else(|| Error::SectionNotFound(id.to_string()))
  }

  // ── Basic details ─────────────────────────────────────────────────────────

  /// Shallow-merge `patch` into the basic details.
  pub fn patch_basic_details(&mut self, patch: BasicDetailsPatch) {
    let d = &mut self.basic_details;
    merge(&mut d.first_name, patch.first_name);
    merge(&mut d.last_name, patch.last_name);
    merge(&mut d.email, patch.email);
    merge(&mut d.city, patch.city);
    merge(&mut d.province, patch.province);
    merge_opt(&mut d.github, patch.github);
    merge_opt(&mut d.linkedin, patch.linkedin);
    merge_opt(&mut d.portfolio, patch.portfolio);
  }

  // ── Whole sections ────────────────────────────────────────────────────────

  /// Replace the content of section `id`. The new content must be of the
  /// section's type.
  pub fn replace_section_content(
    &mut self,
    id: &str,
    content: SectionContent,
  ) -> Result<()> {
    let current = self.content_mut(id)?;
    if current.kind() != content.kind() {
      return Err(Error::ContentMismatch {
        id:       id.to_string(),
        expected: current.kind(),
        found:    content.kind(),
      });
    }
    *current = content;
    Ok(())
  }

  /// Flip the visibility of section `id`, returning the new value.
  pub fn toggle_visibility(&mut self, id: &str) -> Result<bool> {
    let section = self
      .section_mut(id)
      .ok_or_else(|| Error::SectionNotFound(id.to_string()))?;
    section.visible = !section.visible;
    Ok(section.visible)
  }

  /// Rearrange sections to match `order`, which must name every current
  /// section exactly once.
  pub fn reorder<S: AsRef<str>>(&mut self, order: &[S]) -> Result<()> {
    if order.len() != self.sections.len() {
      return Err(Error::NotAPermutation);
    }
    let mut seen = HashSet::with_capacity(order.len());
    let mut positions = Vec::with_capacity(order.len());
    for id in order {
      let id = id.as_ref();
      if !seen.insert(id) {
        return Err(Error::NotAPermutation);
      }
      positions.push(self.position(id).ok_or(Error::NotAPermutation)?);
    }

    let mut slots: Vec<_> = self.sections.drain(..).map(Some).collect();
    self.sections = positions
      .into_iter()
      .filter_map(|i| slots[i].take())
      .collect();
    Ok(())
  }

  /// Relocate the section at `from` to `to`, shifting the ones in between.
  pub fn move_section(&mut self, from: usize, to: usize) -> Result<()> {
    let len = self.sections.len();
    if from >= len {
      return Err(Error::IndexOutOfRange { index: from, len });
    }
    if to >= len {
      return Err(Error::IndexOutOfRange { index: to, len });
    }
    let section = self.sections.remove(from);
    self.sections.insert(to, section);
    Ok(())
  }

  // ── Profile summary ───────────────────────────────────────────────────────

  /// Switch the profile summary between paragraph and bullets. Text held by
  /// the inactive format is kept so switching back restores it.
  pub fn set_summary_format(&mut self, id: &str, format: SummaryFormat) -> Result<()> {
    match self.content_mut(id)? {
      SectionContent::ProfileSummary(summary) => {
        summary.format = format;
        match format {
          SummaryFormat::Bullets if summary.bullets.is_none() => {
            summary.bullets = Some(vec![String::new()]);
          }
          SummaryFormat::Paragraph if summary.text.is_none() => {
            summary.text = Some(String::new());
          }
          _ => {}
        }
        Ok(())
      }
      other => Err(Error::NoSuchList {
        id:   id.to_string(),
        kind: other.kind(),
        list: "summary format",
      }),
    }
  }

  // ── Entries ───────────────────────────────────────────────────────────────

  /// Append an empty entry to an entry-list section.
  pub fn add_entry(&mut self, id: &str) -> Result<usize> {
    match self.content_mut(id)? {
      SectionContent::Experience(c) => {
        c.entries.push(ExperienceEntry::blank());
        Ok(c.entries.len() - 1)
      }
      SectionContent::Projects(c) => {
        c.entries.push(ProjectEntry::blank());
        Ok(c.entries.len() - 1)
      }
      SectionContent::Volunteer(c) => {
        c.entries.push(VolunteerEntry::blank());
        Ok(c.entries.len() - 1)
      }
      SectionContent::Education(c) => {
        c.entries.push(EducationEntry::default());
        Ok(c.entries.len() - 1)
      }
      other => Err(no_entries(id, other.kind())),
    }
  }

  pub fn remove_entry(&mut self, id: &str, index: usize) -> Result<()> {
    match self.content_mut(id)? {
      SectionContent::Experience(c) => remove_at(&mut c.entries, index),
      SectionContent::Projects(c) => remove_at(&mut c.entries, index),
      SectionContent::Volunteer(c) => remove_at(&mut c.entries, index),
      SectionContent::Education(c) => remove_at(&mut c.entries, index),
      other => Err(no_entries(id, other.kind())),
    }
  }

  /// Merge `patch` into the entry at `index`.
  pub fn update_entry(&mut self, id: &str, index: usize, patch: EntryPatch) -> Result<()> {
    let content = self.content_mut(id)?;
    let kind = content.kind();
    match (content, patch) {
      (SectionContent::Experience(c), EntryPatch::Experience(p)) => {
        p.apply(item_mut(&mut c.entries, index)?);
        Ok(())
      }
      (SectionContent::Projects(c), EntryPatch::Projects(p)) => {
        p.apply(item_mut(&mut c.entries, index)?);
        Ok(())
      }
      (SectionContent::Volunteer(c), EntryPatch::Volunteer(p)) => {
        p.apply(item_mut(&mut c.entries, index)?);
        Ok(())
      }
      (SectionContent::Education(c), EntryPatch::Education(p)) => {
        p.apply(item_mut(&mut c.entries, index)?);
        Ok(())
      }
      (SectionContent::ProfileSummary(_) | SectionContent::TechSkills(_), _) => {
        Err(no_entries(id, kind))
      }
      (_, patch) => Err(Error::PatchMismatch {
        kind,
        patch: patch.kind(),
      }),
    }
  }

  // ── Skill categories ──────────────────────────────────────────────────────

  fn categories_mut(&mut self, id: &str) -> Result<&mut Vec<SkillCategory>> {
    match self.content_mut(id)? {
      SectionContent::TechSkills(c) => Ok(&mut c.categories),
      other => Err(Error::NoSuchList {
        id:   id.to_string(),
        kind: other.kind(),
        list: "skill categories",
      }),
    }
  }

  pub fn add_category(&mut self, id: &str) -> Result<usize> {
    let categories = self.categories_mut(id)?;
    categories.push(SkillCategory::default());
    Ok(categories.len() - 1)
  }

  pub fn remove_category(&mut self, id: &str, index: usize) -> Result<()> {
    remove_at(self.categories_mut(id)?, index)
  }

  pub fn update_category(&mut self, id: &str, index: usize, patch: CategoryPatch) -> Result<()> {
    let category = item_mut(self.categories_mut(id)?, index)?;
    merge(&mut category.name, patch.name);
    merge(&mut category.skills, patch.skills);
    Ok(())
  }

  // ── Bullets ───────────────────────────────────────────────────────────────

  /// The bullet list addressed by `(id, entry)`: the profile summary's
  /// bullets when `entry` is `None`, otherwise the bullets (or project
  /// description) of that entry.
  fn bullets_mut(&mut self, id: &str, entry: Option<usize>) -> Result<&mut Vec<String>> {
    let no_bullets = |kind| Error::NoSuchList {
      id: id.to_string(),
      kind,
      list: "bullets",
    };
    match (self.content_mut(id)?, entry) {
      (SectionContent::ProfileSummary(c), None) => {
        Ok(c.bullets.get_or_insert_with(|| vec![String::new()]))
      }
      (SectionContent::Experience(c), Some(i)) => {
        Ok(&mut item_mut(&mut c.entries, i)?.bullets)
      }
      (SectionContent::Projects(c), Some(i)) => {
        Ok(&mut item_mut(&mut c.entries, i)?.description)
      }
      (SectionContent::Volunteer(c), Some(i)) => {
        Ok(&mut item_mut(&mut c.entries, i)?.bullets)
      }
      (other, _) => Err(no_bullets(other.kind())),
    }
  }

  pub fn add_bullet(&mut self, id: &str, entry: Option<usize>) -> Result<usize> {
    self.transact(|doc| {
      let bullets = doc.bullets_mut(id, entry)?;
      bullets.push(String::new());
      Ok(bullets.len() - 1)
    })
  }

  pub fn remove_bullet(&mut self, id: &str, entry: Option<usize>, index: usize) -> Result<()> {
    self.transact(|doc| remove_at(doc.bullets_mut(id, entry)?, index))
  }

  pub fn update_bullet(
    &mut self,
    id: &str,
    entry: Option<usize>,
    index: usize,
    value: impl Into<String>,
  ) -> Result<()> {
    self.transact(|doc| {
      *item_mut(doc.bullets_mut(id, entry)?, index)? = value.into();
      Ok(())
    })
  }
}

fn no_entries(id: &str, kind: SectionType) -> Error {
  Error::NoSuchList {
    id: id.to_string(),
    kind,
    list: "entries",
  }
}

//! Flattening of documents into editable rows.
//!
//! The content pane shows a section as a list of [`Row`]s, one per editable
//! value. Each row carries the [`Field`] it addresses so that committing an
//! edit can be routed to the matching document operation.

use vitae_core::{
  Document, SectionContent, SectionType,
  document::{BasicDetails, SummaryFormat},
  edit::{
    BasicDetailsPatch, CategoryPatch, EducationPatch, EntryPatch,
    ExperiencePatch, ProjectPatch, VolunteerPatch,
  },
};

// ─── Basic details ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailField {
  FirstName,
  LastName,
  Email,
  City,
  Province,
  Github,
  Linkedin,
  Portfolio,
}

impl DetailField {
  pub const ALL: [DetailField; 8] = [
    Self::FirstName,
    Self::LastName,
    Self::Email,
    Self::City,
    Self::Province,
    Self::Github,
    Self::Linkedin,
    Self::Portfolio,
  ];

  pub fn label(self) -> &'static str {
    match self {
      Self::FirstName => "First name",
      Self::LastName => "Last name",
      Self::Email => "Email",
      Self::City => "City",
      Self::Province => "Province",
      Self::Github => "GitHub",
      Self::Linkedin => "LinkedIn",
      Self::Portfolio => "Portfolio",
    }
  }

  pub fn required(self) -> bool {
    !matches!(self, Self::Github | Self::Linkedin | Self::Portfolio)
  }

  pub fn value(self, d: &BasicDetails) -> &str {
    match self {
      Self::FirstName => &d.first_name,
      Self::LastName => &d.last_name,
      Self::Email => &d.email,
      Self::City => &d.city,
      Self::Province => &d.province,
      Self::Github => d.github.as_deref().unwrap_or_default(),
      Self::Linkedin => d.linkedin.as_deref().unwrap_or_default(),
      Self::Portfolio => d.portfolio.as_deref().unwrap_or_default(),
    }
  }

  /// A patch that sets only this field.
  pub fn patch(self, value: String) -> BasicDetailsPatch {
    let mut patch = BasicDetailsPatch::default();
    let slot = match self {
      Self::FirstName => &mut patch.first_name,
      Self::LastName => &mut patch.last_name,
      Self::Email => &mut patch.email,
      Self::City => &mut patch.city,
      Self::Province => &mut patch.province,
      Self::Github => &mut patch.github,
      Self::Linkedin => &mut patch.linkedin,
      Self::Portfolio => &mut patch.portfolio,
    };
    *slot = Some(value);
    patch
  }
}

// ─── Section content ──────────────────────────────────────────────────────────

/// A scalar field of a list entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryField {
  Company,
  Organization,
  Institution,
  Name,
  Title,
  Degree,
  Location,
  StartDate,
  EndDate,
  Technologies,
  Link,
  Date,
}

impl EntryField {
  fn label(self) -> &'static str {
    match self {
      Self::Company => "Company",
      Self::Organization => "Organization",
      Self::Institution => "Institution",
      Self::Name => "Name",
      Self::Title => "Title",
      Self::Degree => "Degree",
      Self::Location => "Location",
      Self::StartDate => "Start",
      Self::EndDate => "End",
      Self::Technologies => "Technologies",
      Self::Link => "Link",
      Self::Date => "Date",
    }
  }

  /// A patch for a `kind` entry that sets only this field.
  fn patch(self, kind: SectionType, value: String) -> EntryPatch {
    let set = |field: EntryField| (self == field).then(|| value.clone());
    match kind {
      SectionType::Experience => EntryPatch::Experience(ExperiencePatch {
        company:    set(Self::Company),
        title:      set(Self::Title),
        location:   set(Self::Location),
        start_date: set(Self::StartDate),
        end_date:   set(Self::EndDate),
      }),
      SectionType::Projects => EntryPatch::Projects(ProjectPatch {
        name:         set(Self::Name),
        technologies: set(Self::Technologies),
        link:         set(Self::Link),
        date:         set(Self::Date),
      }),
      SectionType::Volunteer => EntryPatch::Volunteer(VolunteerPatch {
        organization: set(Self::Organization),
        title:        set(Self::Title),
        location:     set(Self::Location),
        start_date:   set(Self::StartDate),
        end_date:     set(Self::EndDate),
      }),
      _ => EntryPatch::Education(EducationPatch {
        institution: set(Self::Institution),
        degree:      set(Self::Degree),
        start_date:  set(Self::StartDate),
        end_date:    set(Self::EndDate),
      }),
    }
  }
}

/// One editable value within a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
  /// The profile summary's paragraph/bullets switch.
  Format,
  SummaryText,
  /// A bullet; `entry` is `None` for the profile summary's own list.
  Bullet { entry: Option<usize>, index: usize },
  CategoryName(usize),
  CategorySkills(usize),
  Entry { index: usize, field: EntryField },
  /// Stands in for a list that currently has no items.
  Empty(EmptyList),
}

/// A list shown as a single placeholder row because it has no items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyList {
  /// Bullets of an entry, or of the profile summary when `None`.
  Bullets(Option<usize>),
  Categories,
  Entries,
}

impl Field {
  /// The list item this row belongs to, for grouping in the view.
  pub fn group(self) -> Option<usize> {
    match self {
      Self::Format | Self::SummaryText => None,
      Self::Bullet { entry, .. } => entry,
      Self::CategoryName(i) | Self::CategorySkills(i) => Some(i),
      Self::Entry { index, .. } => Some(index),
      Self::Empty(EmptyList::Bullets(entry)) => entry,
      Self::Empty(_) => None,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
  pub field: Field,
  pub label: &'static str,
  pub value: String,
}

impl Row {
  fn new(field: Field, label: &'static str, value: impl Into<String>) -> Self {
    Self {
      field,
      label,
      value: value.into(),
    }
  }
}

fn empty_row(list: EmptyList) -> Row {
  Row::new(Field::Empty(list), "(empty)", "press a to add")
}

fn bullet_rows(rows: &mut Vec<Row>, entry: Option<usize>, bullets: &[String]) {
  if bullets.is_empty() {
    rows.push(empty_row(EmptyList::Bullets(entry)));
    return;
  }
  rows.extend(bullets.iter().enumerate().map(|(index, b)| {
    Row::new(Field::Bullet { entry, index }, "•", b.as_str())
  }));
}

fn entry_row(index: usize, field: EntryField, value: &str) -> Row {
  Row::new(Field::Entry { index, field }, field.label(), value)
}

/// The editable rows of `content`, in display order.
pub fn rows(content: &SectionContent) -> Vec<Row> {
  let mut rows = Vec::new();
  match content {
    SectionContent::ProfileSummary(c) => {
      let format = match c.format {
        SummaryFormat::Paragraph => "paragraph",
        SummaryFormat::Bullets => "bullets",
      };
      rows.push(Row::new(Field::Format, "Format", format));
      match c.format {
        SummaryFormat::Paragraph => rows.push(Row::new(
          Field::SummaryText,
          "Summary",
          c.text.as_deref().unwrap_or_default(),
        )),
        SummaryFormat::Bullets => {
          bullet_rows(&mut rows, None, c.bullets.as_deref().unwrap_or_default())
        }
      }
    }
    SectionContent::TechSkills(c) => {
      if c.categories.is_empty() {
        rows.push(empty_row(EmptyList::Categories));
      }
      for (i, cat) in c.categories.iter().enumerate() {
        rows.push(Row::new(Field::CategoryName(i), "Category", cat.name.as_str()));
        rows.push(Row::new(Field::CategorySkills(i), "Skills", cat.skills.as_str()));
      }
    }
    SectionContent::Experience(c) => {
      if c.entries.is_empty() {
        rows.push(empty_row(EmptyList::Entries));
      }
      for (i, e) in c.entries.iter().enumerate() {
        rows.push(entry_row(i, EntryField::Company, &e.company));
        rows.push(entry_row(i, EntryField::Title, &e.title));
        rows.push(entry_row(i, EntryField::Location, &e.location));
        rows.push(entry_row(i, EntryField::StartDate, &e.start_date));
        rows.push(entry_row(i, EntryField::EndDate, &e.end_date));
        bullet_rows(&mut rows, Some(i), &e.bullets);
      }
    }
    SectionContent::Projects(c) => {
      if c.entries.is_empty() {
        rows.push(empty_row(EmptyList::Entries));
      }
      for (i, e) in c.entries.iter().enumerate() {
        let opt = |v: &Option<String>| v.clone().unwrap_or_default();
        rows.push(entry_row(i, EntryField::Name, &e.name));
        rows.push(entry_row(i, EntryField::Technologies, &opt(&e.technologies)));
        rows.push(entry_row(i, EntryField::Link, &opt(&e.link)));
        rows.push(entry_row(i, EntryField::Date, &opt(&e.date)));
        bullet_rows(&mut rows, Some(i), &e.description);
      }
    }
    SectionContent::Volunteer(c) => {
      if c.entries.is_empty() {
        rows.push(empty_row(EmptyList::Entries));
      }
      for (i, e) in c.entries.iter().enumerate() {
        rows.push(entry_row(i, EntryField::Organization, &e.organization));
        rows.push(entry_row(i, EntryField::Title, &e.title));
        rows.push(entry_row(
          i,
          EntryField::Location,
          e.location.as_deref().unwrap_or_default(),
        ));
        rows.push(entry_row(i, EntryField::StartDate, &e.start_date));
        rows.push(entry_row(i, EntryField::EndDate, &e.end_date));
        bullet_rows(&mut rows, Some(i), &e.bullets);
      }
    }
    SectionContent::Education(c) => {
      if c.entries.is_empty() {
        rows.push(empty_row(EmptyList::Entries));
      }
      for (i, e) in c.entries.iter().enumerate() {
        rows.push(entry_row(i, EntryField::Institution, &e.institution));
        rows.push(entry_row(i, EntryField::Degree, &e.degree));
        rows.push(entry_row(i, EntryField::StartDate, &e.start_date));
        rows.push(entry_row(i, EntryField::EndDate, &e.end_date));
      }
    }
  }
  rows
}

// ─── Edits ────────────────────────────────────────────────────────────────────

/// Write `value` into `field` of section `id`.
pub fn apply(
  doc: &mut Document,
  id: &str,
  field: Field,
  value: String,
) -> vitae_core::Result<()> {
  match field {
    Field::Format | Field::Empty(_) => Ok(()),
    Field::SummaryText => {
      let mut content = doc
        .section(id)
        .map(|s| s.content.clone())
        .ok_or_else(|| vitae_core::Error::SectionNotFound(id.to_string()))?;
      if let SectionContent::ProfileSummary(summary) = &mut content {
        summary.text = Some(value);
      }
      doc.replace_section_content(id, content)
    }
    Field::Bullet { entry, index } => doc.update_bullet(id, entry, index, value),
    Field::CategoryName(i) => doc.update_category(id, i, CategoryPatch {
      name: Some(value),
      ..Default::default()
    }),
    Field::CategorySkills(i) => doc.update_category(id, i, CategoryPatch {
      skills: Some(value),
      ..Default::default()
    }),
    Field::Entry { index, field } => {
      let kind = doc
        .section(id)
        .map(|s| s.kind())
        .ok_or_else(|| vitae_core::Error::SectionNotFound(id.to_string()))?;
      doc.update_entry(id, index, field.patch(kind, value))
    }
  }
}

/// Append an item to the list `field` belongs to: a bullet for bullet rows,
/// a category or entry otherwise. A placeholder row adds the first item of
/// the list it stands in for. Returns the field of the new item's first
/// row, if any.
pub fn add_item(
  doc: &mut Document,
  id: &str,
  field: Field,
) -> vitae_core::Result<Option<Field>> {
  match field {
    Field::Format | Field::SummaryText => Ok(None),
    Field::Bullet { entry, .. } => {
      let index = doc.add_bullet(id, entry)?;
      Ok(Some(Field::Bullet { entry, index }))
    }
    Field::CategoryName(_) | Field::CategorySkills(_) => {
      Ok(Some(Field::CategoryName(doc.add_category(id)?)))
    }
    Field::Entry { .. } | Field::Empty(EmptyList::Entries) => {
      let index = doc.add_entry(id)?;
      Ok(first_row(doc, id, Some(index)))
    }
    Field::Empty(EmptyList::Bullets(entry)) => {
      let index = doc.add_bullet(id, entry)?;
      Ok(Some(Field::Bullet { entry, index }))
    }
    Field::Empty(EmptyList::Categories) => {
      Ok(Some(Field::CategoryName(doc.add_category(id)?)))
    }
  }
}

/// Remove the list item `field` belongs to.
pub fn remove_item(doc: &mut Document, id: &str, field: Field) -> vitae_core::Result<()> {
  match field {
    Field::Format | Field::SummaryText | Field::Empty(_) => Ok(()),
    Field::Bullet { entry, index } => doc.remove_bullet(id, entry, index),
    Field::CategoryName(i) | Field::CategorySkills(i) => doc.remove_category(id, i),
    Field::Entry { index, .. } => doc.remove_entry(id, index),
  }
}

fn first_row(doc: &Document, id: &str, group: Option<usize>) -> Option<Field> {
  let section = doc.section(id)?;
  rows(&section.content)
    .into_iter()
    .map(|r| r.field)
    .find(|f| f.group() == group)
}

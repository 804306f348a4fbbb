//! Application state machine and event dispatcher.

use std::path::PathBuf;

use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use vitae_compile::{
  Artifact, Compiled, Preview, SubmitError, Submitter, submit::GENERIC_FAILURE,
};
use vitae_core::{
  Document, DocumentStore, Section, SectionContent, document::SummaryFormat,
  reorder::DragSession,
};

use crate::fields::{self, DetailField, Field, Row};

// ─── Focus ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
  /// The basic details form.
  Details,
  /// The ordered section list.
  Sections,
  /// The rows of the selected section.
  Content,
}

impl Focus {
  fn next(self) -> Self {
    match self {
      Self::Details => Self::Sections,
      Self::Sections => Self::Content,
      Self::Content => Self::Details,
    }
  }
}

type PendingCompile = JoinHandle<Result<Compiled, SubmitError>>;

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  pub focus: Focus,

  /// The document being edited.
  pub store: DocumentStore,

  pub detail_cursor:  usize,
  pub section_cursor: usize,
  pub row_cursor:     usize,

  /// Input buffer while a field is being edited.
  pub editing: Option<String>,

  /// Section being dragged, if any. The document is untouched until drop.
  pub drag: Option<DragSession>,

  /// Whether the demo dataset is loaded.
  pub demo: bool,

  pub submitter: Submitter,
  pending:       Option<PendingCompile>,

  /// Last successfully compiled PDF and its preview file.
  pub artifact:   Option<Artifact>,
  pub preview:    Option<Preview>,
  pub output_dir: PathBuf,

  /// One-line status message shown in the status bar.
  pub status_msg: String,
  /// Last user-facing compile error.
  pub error_msg:  Option<String>,
}

impl App {
  pub fn new(store: DocumentStore, submitter: Submitter, output_dir: PathBuf) -> Self {
    Self {
      focus: Focus::Details,
      store,
      detail_cursor: 0,
      section_cursor: 0,
      row_cursor: 0,
      editing: None,
      drag: None,
      demo: false,
      submitter,
      pending: None,
      artifact: None,
      preview: None,
      output_dir,
      status_msg: String::new(),
      error_msg: None,
    }
  }

  pub fn document(&self) -> &Document { self.store.document() }

  // ── Selection ─────────────────────────────────────────────────────────────

  pub fn selected_section(&self) -> Option<&Section> {
    self.document().sections.get(self.section_cursor)
  }

  fn selected_id(&self) -> Option<String> {
    self.selected_section().map(|s| s.id.clone())
  }

  pub fn detail_field(&self) -> DetailField {
    DetailField::ALL[self.detail_cursor.min(DetailField::ALL.len() - 1)]
  }

  /// Editable rows of the selected section.
  pub fn rows(&self) -> Vec<Row> {
    self
      .selected_section()
      .map(|s| fields::rows(&s.content))
      .unwrap_or_default()
  }

  fn current_field(&self) -> Option<Field> {
    self.rows().get(self.row_cursor).map(|r| r.field)
  }

  /// Section order as it would be after dropping the dragged section on the
  /// one under the cursor.
  pub fn drag_preview(&self) -> Option<Vec<String>> {
    let drag = self.drag.as_ref()?;
    let target = self.selected_section()?;
    drag.drop_over(self.document(), &target.id)
  }

  pub fn is_compiling(&self) -> bool { self.pending.is_some() }

  pub fn can_compile(&self) -> bool {
    !self.is_compiling() && self.submitter.can_submit(self.document())
  }

  fn clamp_cursors(&mut self) {
    let sections = self.document().sections.len();
    self.section_cursor = self.section_cursor.min(sections.saturating_sub(1));
    let rows = self.rows().len();
    self.row_cursor = self.row_cursor.min(rows.saturating_sub(1));
  }

  fn report<T>(&mut self, result: vitae_core::Result<T>) -> Option<T> {
    match result {
      Ok(value) => Some(value),
      Err(e) => {
        self.status_msg = match e {
          vitae_core::Error::LastItem => "At least one item is required".into(),
          other => format!("Error: {other}"),
        };
        None
      }
    }
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub fn handle_key(&mut self, key: KeyEvent) -> bool {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return false;
    }

    // Field input mode: all printable keys go into the buffer.
    if self.editing.is_some() {
      self.handle_edit_key(key);
      return true;
    }

    match key.code {
      KeyCode::Char('q') => return false,
      KeyCode::Tab => {
        self.drag = None;
        self.focus = self.focus.next();
        return true;
      }
      KeyCode::Char('c') => {
        self.start_compile();
        return true;
      }
      KeyCode::Char('s') => {
        self.save_artifact();
        return true;
      }
      KeyCode::Char('t') => {
        self.toggle_demo();
        return true;
      }
      _ => {}
    }

    match self.focus {
      Focus::Details => self.handle_details_key(key),
      Focus::Sections => self.handle_sections_key(key),
      Focus::Content => self.handle_content_key(key),
    }
    true
  }

  fn handle_edit_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => self.editing = None,
      KeyCode::Enter => self.commit_edit(),
      KeyCode::Backspace => {
        if let Some(buffer) = self.editing.as_mut() {
          buffer.pop();
        }
      }
      KeyCode::Char(c) => {
        if let Some(buffer) = self.editing.as_mut() {
          buffer.push(c);
        }
      }
      _ => {}
    }
  }

  fn handle_details_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Down | KeyCode::Char('j') => {
        if self.detail_cursor + 1 < DetailField::ALL.len() {
          self.detail_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.detail_cursor = self.detail_cursor.saturating_sub(1);
      }
      KeyCode::Enter => {
        let value = self.detail_field().value(&self.document().basic_details);
        self.editing = Some(value.to_string());
      }
      _ => {}
    }
  }

  fn handle_sections_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Down | KeyCode::Char('j') => {
        if self.section_cursor + 1 < self.document().sections.len() {
          self.section_cursor += 1;
          self.row_cursor = 0;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        if self.section_cursor > 0 {
          self.section_cursor -= 1;
          self.row_cursor = 0;
        }
      }
      KeyCode::Char(' ') => {
        if let Some(id) = self.selected_id() {
          let result = self.store.toggle_visibility(&id);
          self.report(result);
        }
      }
      KeyCode::Char('m') => match self.drag.take() {
        Some(drag) => self.drop_section(drag),
        None => {
          if let Some(id) = self.selected_id() {
            self.drag = DragSession::begin(self.document(), &id);
          }
        }
      },
      KeyCode::Enter => match self.drag.take() {
        Some(drag) => self.drop_section(drag),
        None => self.focus = Focus::Content,
      },
      KeyCode::Right | KeyCode::Char('l') if self.drag.is_none() => {
        self.focus = Focus::Content;
      }
      KeyCode::Esc => self.drag = None,
      KeyCode::Char('f') => self.toggle_summary_format(),
      _ => {}
    }
  }

  fn handle_content_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Down | KeyCode::Char('j') => {
        if self.row_cursor + 1 < self.rows().len() {
          self.row_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.row_cursor = self.row_cursor.saturating_sub(1);
      }
      KeyCode::Esc | KeyCode::Left | KeyCode::Char('h') => {
        self.focus = Focus::Sections;
      }
      KeyCode::Enter => match self.rows().get(self.row_cursor) {
        Some(row) if row.field == Field::Format => self.toggle_summary_format(),
        Some(row) if matches!(row.field, Field::Empty(_)) => self.add_item(),
        Some(row) => self.editing = Some(row.value.clone()),
        None => {}
      },
      KeyCode::Char('f') => self.toggle_summary_format(),
      KeyCode::Char('a') => self.add_item(),
      KeyCode::Char('x') => self.remove_item(),
      _ => {}
    }
  }

  // ── Edits ─────────────────────────────────────────────────────────────────

  fn commit_edit(&mut self) {
    let Some(value) = self.editing.take() else {
      return;
    };
    match self.focus {
      Focus::Details => {
        let patch = self.detail_field().patch(value);
        self.store.patch_basic_details(patch);
      }
      Focus::Content | Focus::Sections => {
        let (Some(id), Some(field)) = (self.selected_id(), self.current_field()) else {
          return;
        };
        let result = self.store.edit(|doc| fields::apply(doc, &id, field, value));
        self.report(result);
      }
    }
  }

  fn drop_section(&mut self, drag: DragSession) {
    let Some(target) = self.selected_id() else {
      return;
    };
    let result = self.store.drop_section(drag, &target);
    if self.report(result) == Some(true) {
      self.status_msg = format!("Moved {target}");
    }
  }

  fn toggle_summary_format(&mut self) {
    let Some(section) = self.selected_section() else {
      return;
    };
    let SectionContent::ProfileSummary(summary) = &section.content else {
      return;
    };
    let format = match summary.format {
      SummaryFormat::Paragraph => SummaryFormat::Bullets,
      SummaryFormat::Bullets => SummaryFormat::Paragraph,
    };
    let id = section.id.clone();
    let result = self.store.edit(|doc| doc.set_summary_format(&id, format));
    self.report(result);
    self.clamp_cursors();
  }

  fn add_item(&mut self) {
    let (Some(id), Some(field)) = (self.selected_id(), self.current_field()) else {
      return;
    };
    let result = self.store.edit(|doc| fields::add_item(doc, &id, field));
    if let Some(Some(added)) = self.report(result)
      && let Some(pos) = self.rows().iter().position(|r| r.field == added)
    {
      self.row_cursor = pos;
    }
  }

  fn remove_item(&mut self) {
    let (Some(id), Some(field)) = (self.selected_id(), self.current_field()) else {
      return;
    };
    let result = self.store.edit(|doc| fields::remove_item(doc, &id, field));
    self.report(result);
    self.clamp_cursors();
  }

  /// Swap between the demo dataset and the empty skeleton. A compile still
  /// running for the old dataset is abandoned.
  fn toggle_demo(&mut self) {
    if self.demo {
      self.store.reset();
    } else {
      let result = self.store.load(Document::demo());
      if self.report(result).is_none() {
        return;
      }
    }
    self.demo = !self.demo;
    if let Some(handle) = self.pending.take() {
      info!("abandoning compile for the previous dataset");
      handle.abort();
    }
    self.drag = None;
    self.artifact = None;
    self.error_msg = None;
    self.revoke_preview();
    self.clamp_cursors();
    self.status_msg = if self.demo {
      "Loaded demo résumé".into()
    } else {
      "Reset to empty résumé".into()
    };
  }

  // ── Compile ───────────────────────────────────────────────────────────────

  /// Validate and spawn a compile request. The UI stays responsive while it
  /// runs; [`App::poll_submission`] collects the outcome.
  pub fn start_compile(&mut self) {
    if self.is_compiling() {
      self.status_msg = "Already compiling…".into();
      return;
    }
    match self.submitter.prepare(self.document()) {
      Ok(submission) => {
        self.error_msg = None;
        self.status_msg = "Compiling…".into();
        self.pending = Some(tokio::spawn(submission.send()));
      }
      Err(SubmitError::Incomplete(missing)) => {
        self.status_msg = format!("Required: {}", missing.join(", "));
      }
      Err(e) => self.status_msg = e.to_string(),
    }
  }

  /// Collect a finished compile task, if there is one.
  pub async fn poll_submission(&mut self) {
    if !self.pending.as_ref().is_some_and(JoinHandle::is_finished) {
      return;
    }
    let Some(handle) = self.pending.take() else {
      return;
    };
    match handle.await {
      Ok(Ok(compiled)) => self.on_compiled(compiled),
      Ok(Err(e)) => {
        self.status_msg.clear();
        self.error_msg = Some(e.to_string());
      }
      Err(e) => {
        error!(error = %e, "compile task failed");
        self.status_msg.clear();
        self.error_msg = Some(GENERIC_FAILURE.into());
      }
    }
  }

  fn on_compiled(&mut self, compiled: Compiled) {
    let stamp = Local::now().format("%H:%M:%S");
    self.error_msg = None;
    self.revoke_preview();
    self.artifact = None;

    let Some(artifact) = compiled.artifact else {
      self.status_msg = format!("{} at {stamp} ({})", compiled.message, compiled.pdf_url);
      return;
    };
    match artifact.preview() {
      Ok(preview) => {
        self.status_msg = format!(
          "{} at {stamp}. Preview: {}",
          compiled.message,
          preview.path().display()
        );
        self.preview = Some(preview);
      }
      Err(e) => {
        warn!(error = %e, "could not write preview file");
        self.status_msg = format!("{} at {stamp}", compiled.message);
      }
    }
    self.artifact = Some(artifact);
  }

  fn revoke_preview(&mut self) {
    if let Some(preview) = self.preview.take()
      && let Err(e) = preview.revoke()
    {
      warn!(error = %e, "could not remove preview file");
    }
  }

  fn save_artifact(&mut self) {
    let Some(artifact) = &self.artifact else {
      self.status_msg = "Nothing compiled yet".into();
      return;
    };
    match artifact.save_in(&self.output_dir) {
      Ok(path) => {
        info!(path = %path.display(), "saved PDF");
        self.status_msg = format!("Saved {}", path.display());
      }
      Err(e) => self.error_msg = Some(format!("Could not save PDF: {e}")),
    }
  }
}

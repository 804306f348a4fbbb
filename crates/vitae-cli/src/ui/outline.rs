//! Left pane: the basic details form above the ordered section list.

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState},
};

use crate::{
  app::{App, Focus},
  fields::DetailField,
};

fn cursor_style() -> Style {
  Style::default()
    .bg(Color::Blue)
    .fg(Color::White)
    .add_modifier(Modifier::BOLD)
}

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(DetailField::ALL.len() as u16 + 2),
      Constraint::Min(0),
    ])
    .split(area);

  draw_details(f, rows[0], app);
  draw_sections(f, rows[1], app);
}

// ─── Basic details ────────────────────────────────────────────────────────────

fn draw_details(f: &mut Frame, area: Rect, app: &App) {
  let block = Block::default()
    .title(" Basic Details ")
    .borders(Borders::ALL)
    .border_style(super::border_style(app, Focus::Details));

  let focused = app.focus == Focus::Details;
  let details = &app.document().basic_details;

  let items: Vec<ListItem> = DetailField::ALL
    .iter()
    .enumerate()
    .map(|(i, &field)| {
      let is_cursor = focused && i == app.detail_cursor;
      let value = match &app.editing {
        Some(buffer) if is_cursor => format!("{buffer}_"),
        _ => field.value(details).to_string(),
      };
      let marker = if field.required() { "*" } else { " " };
      let label_style = if field.required() && value.is_empty() {
        Style::default().fg(Color::Red)
      } else {
        Style::default().fg(Color::Cyan)
      };
      ListItem::new(Line::from(vec![
        Span::styled(format!("{:<11}{marker} ", field.label()), label_style),
        Span::raw(value),
      ]))
    })
    .collect();

  let mut state = ListState::default();
  state.select(focused.then_some(app.detail_cursor));

  f.render_stateful_widget(
    List::new(items).block(block).highlight_style(cursor_style()),
    area,
    &mut state,
  );
}

// ─── Sections ─────────────────────────────────────────────────────────────────

fn draw_sections(f: &mut Frame, area: Rect, app: &App) {
  let doc = app.document();
  let hidden = doc.sections.iter().filter(|s| !s.visible).count();
  let title = if hidden > 0 {
    format!(" Sections ({} hidden) ", hidden)
  } else {
    " Sections ".to_string()
  };
  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(super::border_style(app, Focus::Sections));

  // While dragging, show the order the drop would produce.
  let order: Vec<String> = app.drag_preview().unwrap_or_else(|| doc.section_ids());
  let dragged = app.drag.as_ref().map(|d| d.source());

  let items: Vec<ListItem> = order
    .iter()
    .filter_map(|id| doc.section(id))
    .map(|section| {
      let badge = if section.visible { "●" } else { "○" };
      let grip = if Some(section.id.as_str()) == dragged {
        "≡ "
      } else {
        "  "
      };
      let style = if section.visible {
        Style::default()
      } else {
        Style::default().fg(Color::DarkGray)
      };
      ListItem::new(Line::from(vec![
        Span::styled(grip, Style::default().fg(Color::Yellow)),
        Span::styled(format!("{badge} "), style),
        Span::styled(section.kind().title(), style),
      ]))
    })
    .collect();

  let mut state = ListState::default();
  state.select((app.focus != Focus::Details).then_some(app.section_cursor));

  f.render_stateful_widget(
    List::new(items).block(block).highlight_style(cursor_style()),
    area,
    &mut state,
  );
}

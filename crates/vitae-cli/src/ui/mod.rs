//! Frame layout plus the header and status bars.

pub mod outline;
pub mod section_view;

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Paragraph},
};

use crate::app::{App, Focus};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let area = f.area();

  // Vertical stack: header, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0], app);
  draw_body(f, rows[1], app);
  draw_status(f, rows[2], app);
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
  let left = Span::styled(
    " vitae  [Tab] focus  [c] compile  [s] save  [t] demo  [q] quit",
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );

  let (state, colour) = if app.is_compiling() {
    ("compiling… ", Color::Yellow)
  } else if app.can_compile() {
    ("ready ", Color::Green)
  } else {
    ("incomplete ", Color::Red)
  };
  let dataset = if app.demo { "demo  " } else { "" };
  let right = Span::styled(format!("{dataset}{state}"), Style::default().fg(colour));

  // Simple left-right header: pad the middle.
  let left_width = left.width() as u16;
  let right_width = right.width() as u16;
  let pad = area
    .width
    .saturating_sub(left_width)
    .saturating_sub(right_width);

  let line = Line::from(vec![
    left,
    Span::raw(" ".repeat(pad as usize)),
    right,
  ]);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(line), inner);
}

// ─── Body ─────────────────────────────────────────────────────────────────────

fn draw_body(f: &mut Frame, area: Rect, app: &App) {
  // Split into the outline (40%) and the content pane (60%).
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
    .split(area);

  outline::draw(f, cols[0], app);
  section_view::draw(f, cols[1], app);
}

/// Border colour for a pane, highlighted when it holds focus.
pub(crate) fn border_style(app: &App, pane: Focus) -> Style {
  if app.focus == pane {
    Style::default().fg(Color::Cyan)
  } else {
    Style::default().fg(Color::DarkGray)
  }
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let (mode_label, hints) = match app.focus {
    _ if app.editing.is_some() => ("EDIT", "Type to edit  Enter commit  Esc cancel"),
    Focus::Sections if app.drag.is_some() => (
      "DRAG",
      "↑↓/jk choose target  m/Enter drop  Esc cancel",
    ),
    Focus::Details => ("DETAILS", "↑↓/jk move  Enter edit"),
    Focus::Sections => (
      "SECTIONS",
      "↑↓/jk move  space show/hide  m move  f summary format  Enter open",
    ),
    Focus::Content => (
      "CONTENT",
      "↑↓/jk move  Enter edit  a add  x remove  Esc back",
    ),
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );

  let message = match &app.error_msg {
    Some(err) => Span::styled(format!("  {err}"), Style::default().fg(Color::Red)),
    None if !app.status_msg.is_empty() => Span::styled(
      format!("  {}", app.status_msg),
      Style::default().fg(Color::White),
    ),
    None => Span::styled(format!("  {hints}"), Style::default().fg(Color::DarkGray)),
  };

  let line = Line::from(vec![mode_span, message]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}

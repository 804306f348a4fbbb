//! Right pane: the selected section's content as editable rows.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use vitae_core::{SectionType, document::SummaryFormat};

use crate::app::{App, Focus};

/// What one item of a section's list is called.
fn item_noun(kind: SectionType) -> &'static str {
  match kind {
    SectionType::ProfileSummary => "Summary",
    SectionType::TechSkills => "Category",
    SectionType::Experience => "Position",
    SectionType::Projects => "Project",
    SectionType::Volunteer => "Role",
    SectionType::Education => "School",
  }
}

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let Some(section) = app.selected_section() else {
    let block = Block::default()
      .title(" Content ")
      .borders(Borders::ALL)
      .border_style(super::border_style(app, Focus::Content));
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
      Paragraph::new("No sections.").style(Style::default().fg(Color::DarkGray)),
      inner,
    );
    return;
  };

  let kind = section.kind();
  let mut title = format!(" {} ", kind.title());
  if !section.visible {
    title.push_str("(hidden, not compiled) ");
  }
  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(super::border_style(app, Focus::Content));

  let focused = app.focus == Focus::Content;
  let dim = !section.visible;
  let mut last_group = None;

  let items: Vec<ListItem> = app
    .rows()
    .into_iter()
    .enumerate()
    .map(|(i, row)| {
      let is_cursor = focused && i == app.row_cursor;

      // Number the first row of every list item.
      let group = row.field.group();
      let gutter = match group {
        Some(n) if group != last_group => format!("{} {:<2}", item_noun(kind), n + 1),
        _ => String::new(),
      };
      last_group = group;

      let value = match &app.editing {
        Some(buffer) if is_cursor => format!("{buffer}_"),
        _ => row.value,
      };
      let value_style = if dim {
        Style::default().fg(Color::DarkGray)
      } else {
        Style::default()
      };

      ListItem::new(Line::from(vec![
        Span::styled(format!("{gutter:<12}"), Style::default().fg(Color::DarkGray)),
        Span::styled(
          format!("{:<13}", row.label),
          Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        ),
        Span::styled(value, value_style),
      ]))
    })
    .collect();

  let mut state = ListState::default();
  state.select(focused.then_some(app.row_cursor));

  let inner = block.inner(area);
  f.render_widget(block, area);

  let list = List::new(items).highlight_style(
    Style::default()
      .bg(Color::Blue)
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  f.render_stateful_widget(list, inner, &mut state);

  // Long paragraph text does not fit on one row; show it wrapped below.
  if let vitae_core::SectionContent::ProfileSummary(summary) = &section.content
    && summary.format == SummaryFormat::Paragraph
    && app.editing.is_none()
    && let Some(text) = summary.text.as_deref().filter(|t| t.len() > inner.width as usize)
    && inner.height > 4
  {
    let area = Rect {
      y: inner.y + 3,
      height: inner.height - 3,
      ..inner
    };
    f.render_widget(
      Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::Gray)),
      area,
    );
  }
}

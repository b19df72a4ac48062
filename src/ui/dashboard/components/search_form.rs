//! Search form component
//!
//! Text fields on the left, branch filter on the right. The focused field
//! carries a block cursor.

use super::super::form::{FormField, SearchForm};
use super::super::state::DashboardState;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph};

const TEXT_FIELDS: [FormField; 4] = [
    FormField::Query,
    FormField::Latitude,
    FormField::Longitude,
    FormField::MaxResults,
];

pub fn render_search_form(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    render_text_fields(f, columns[0], &state.form);
    render_branch_filter(f, columns[1], state);
}

fn render_text_fields(f: &mut Frame, area: Rect, form: &SearchForm) {
    let field_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);

    for (field, chunk) in TEXT_FIELDS.iter().zip(field_chunks.iter()) {
        let focused = form.focus == *field;
        let text = if focused {
            format!("{}█", form.field_text(*field))
        } else {
            form.field_text(*field).to_string()
        };

        let border_color = if focused { Color::Yellow } else { Color::DarkGray };
        let widget = Paragraph::new(text)
            .style(Style::default().fg(Color::White))
            .block(
                Block::default()
                    .title(field.label())
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(border_color)),
            );
        f.render_widget(widget, *chunk);
    }

    let hint = Paragraph::new(vec![
        Line::from("Leave coordinates empty to search"),
        Line::from("around the selected branches."),
    ])
    .style(Style::default().fg(Color::DarkGray));
    f.render_widget(hint, field_chunks[4]);
}

fn render_branch_filter(f: &mut Frame, area: Rect, state: &DashboardState) {
    let form = &state.form;
    let focused = form.focus == FormField::Branches;
    let border_color = if focused { Color::Yellow } else { Color::DarkGray };

    let block = Block::default()
        .title(format!(
            "Branch filter ({} selected, empty = all)",
            form.selected_branches.len()
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color));

    if state.branches.is_empty() {
        f.render_widget(
            Paragraph::new("No branches loaded")
                .style(Style::default().fg(Color::DarkGray))
                .block(block),
            area,
        );
        return;
    }

    let items: Vec<ListItem> = state
        .branches
        .iter()
        .map(|branch| {
            let marker = if form.selected_branches.contains(&branch.name) {
                "[x]"
            } else {
                "[ ]"
            };
            ListItem::new(format!("{} {} ({})", marker, branch.name, branch.city))
        })
        .collect();

    let list = List::new(items)
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .block(block);

    let mut list_state = ListState::default();
    if focused {
        list_state.select(Some(form.branch_cursor.min(state.branches.len() - 1)));
    }
    f.render_stateful_widget(list, area, &mut list_state);
}

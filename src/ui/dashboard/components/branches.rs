//! Branch table component

use super::super::state::DashboardState;
use ratatui::Frame;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState};

pub fn render_branch_table(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let block = Block::default()
        .title("BRANCHES")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));

    if state.branches.is_empty() {
        let placeholder = if state.branches_loaded {
            "No branches available"
        } else {
            "Loading branches..."
        };
        f.render_widget(
            Paragraph::new(placeholder)
                .style(Style::default().fg(Color::DarkGray))
                .block(block),
            area,
        );
        return;
    }

    let header = Row::new(vec!["Branch", "IFSC", "City", "Address"]).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = state
        .branches
        .iter()
        .map(|branch| {
            Row::new(vec![
                Cell::from(branch.name.clone()),
                Cell::from(branch.ifsc_code.clone()),
                Cell::from(branch.city.clone()),
                Cell::from(branch.address.clone()),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            ratatui::layout::Constraint::Percentage(28),
            ratatui::layout::Constraint::Percentage(18),
            ratatui::layout::Constraint::Percentage(18),
            ratatui::layout::Constraint::Percentage(36),
        ],
    )
    .header(header)
    .row_highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .block(block);

    let mut table_state = TableState::default();
    table_state.select(Some(state.branch_cursor.min(state.branches.len() - 1)));
    f.render_stateful_widget(table, area, &mut table_state);
}

//! POI results table and detail panel

use super::super::state::DashboardState;
use ratatui::Frame;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, BorderType, Borders, Cell, Padding, Paragraph, Row, Table, TableState, Wrap,
};

pub fn render_results_table(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let block = Block::default()
        .title("SEARCH RESULTS")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));

    if state.poi_results.is_empty() {
        f.render_widget(
            Paragraph::new("No results - run a search from the Search tab")
                .style(Style::default().fg(Color::DarkGray))
                .block(block),
            area,
        );
        return;
    }

    let header = Row::new(vec!["Name", "Type", "Rating", "Reviews", "Distance"]).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = state
        .poi_results
        .iter()
        .map(|poi| {
            let rating = poi
                .rating
                .map(|r| format!("{:.1}", r))
                .unwrap_or_else(|| "-".to_string());
            let reviews = poi
                .review_count
                .map(|count| count.to_string())
                .unwrap_or_else(|| "-".to_string());
            let distance = poi
                .distance_km
                .map(|km| format!("{:.2} km", km))
                .unwrap_or_else(|| "-".to_string());
            Row::new(vec![
                Cell::from(poi.name.clone()),
                Cell::from(poi.primary_type().to_string()),
                Cell::from(rating),
                Cell::from(reviews),
                Cell::from(distance),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            ratatui::layout::Constraint::Percentage(35),
            ratatui::layout::Constraint::Percentage(20),
            ratatui::layout::Constraint::Percentage(13),
            ratatui::layout::Constraint::Percentage(14),
            ratatui::layout::Constraint::Percentage(18),
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
    table_state.select(Some(state.result_cursor.min(state.poi_results.len() - 1)));
    f.render_stateful_widget(table, area, &mut table_state);
}

/// Detail panel for the selected POI, the terminal counterpart of the map
/// marker popup.
pub fn render_poi_details(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let block = Block::default()
        .title("DETAILS")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1));

    let Some(poi) = state.poi_results.get(state.result_cursor) else {
        f.render_widget(
            Paragraph::new("Nothing selected")
                .style(Style::default().fg(Color::DarkGray))
                .block(block),
            area,
        );
        return;
    };

    let mut lines = vec![Line::from(Span::styled(
        poi.name.clone(),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    ))];

    let address = poi.display_address();
    if !address.is_empty() {
        lines.push(Line::from(address.to_string()));
    }

    lines.push(detail_line(
        "Rating: ",
        match (poi.rating, poi.review_count) {
            (Some(rating), Some(reviews)) => format!("{:.1}/5 ({} reviews)", rating, reviews),
            (Some(rating), None) => format!("{:.1}/5", rating),
            _ => "N/A".to_string(),
        },
    ));
    lines.push(detail_line("Type: ", poi.primary_type().to_string()));

    if let Some(distance) = poi.distance_km {
        lines.push(detail_line("Distance: ", format!("{:.1} km", distance)));
    }
    if let Some(phone) = &poi.phone_number {
        lines.push(detail_line("Phone: ", phone.clone()));
    }
    if let Some(website) = &poi.website {
        lines.push(detail_line("Website: ", website.clone()));
    }
    if let Some(branch) = &poi.source_branch {
        lines.push(detail_line("Near branch: ", branch.clone()));
    }

    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn detail_line(label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(label, Style::default().fg(Color::Gray)),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}

//! Dashboard metrics components
//!
//! Renders branch and POI headline metrics

use super::super::state::DashboardState;
use crate::stats::{BranchMetrics, PoiMetrics};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

/// Render the metrics row: branch metrics next to POI metrics.
pub fn render_metrics_section(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let metrics_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_branch_metrics(f, metrics_chunks[0], state);
    render_poi_metrics(f, metrics_chunks[1], state);
}

fn metric_line<'a>(label: &'a str, value: String, color: Color) -> Line<'a> {
    Line::from(vec![
        Span::styled(label, Style::default().fg(Color::Gray)),
        Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
    ])
}

pub fn render_branch_metrics(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let metrics = BranchMetrics::compute(&state.branches);

    let lines = vec![
        metric_line("Branches: ", format!("{}", metrics.total), Color::White),
        metric_line(
            "Cities: ",
            format!("{}", metrics.distinct_cities),
            Color::White,
        ),
        metric_line(
            "Latitude span: ",
            metrics.format_latitude_span(),
            Color::Cyan,
        ),
    ];

    let block = Block::default()
        .title("BRANCH NETWORK")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1));

    f.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: true }), area);
}

pub fn render_poi_metrics(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let metrics = PoiMetrics::compute(&state.poi_results);

    let (rating_text, rating_color) = match metrics.average_rating {
        Some(average) => {
            let color = if average >= 4.0 {
                Color::Green
            } else if average >= 3.0 {
                Color::Yellow
            } else {
                Color::Red
            };
            (format!("{:.1}/5", average), color)
        }
        None => ("N/A".to_string(), Color::Gray),
    };

    let mut lines = vec![
        metric_line("Results: ", format!("{}", metrics.total), Color::White),
        metric_line("Avg rating: ", rating_text, rating_color),
        metric_line(
            "Unique types: ",
            format!("{}", metrics.unique_types),
            Color::White,
        ),
    ];

    if let Some(path) = &state.last_export {
        lines.push(metric_line(
            "Last export: ",
            path.display().to_string(),
            Color::Yellow,
        ));
    }

    let block = Block::default()
        .title("POI RESULTS")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1));

    f.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: true }), area);
}

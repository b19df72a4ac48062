//! Dashboard header component
//!
//! Renders the title, the tab strip and the loading gauge

use super::super::state::{DashboardState, Tab};

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph, Tabs};

/// Render the header with title, tabs and operation progress.
pub fn render_header(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let header_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(2),
        ])
        .split(area);

    let version = env!("CARGO_PKG_VERSION");
    let title = Paragraph::new(format!(
        "BRANCHSCOPE v{} — {} backend",
        version, state.environment
    ))
    .alignment(Alignment::Center)
    .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    f.render_widget(title, header_chunks[0]);

    let titles: Vec<String> = Tab::ALL
        .iter()
        .enumerate()
        .map(|(index, tab)| format!("{} {}", index + 1, tab))
        .collect();
    let tabs = Tabs::new(titles)
        .select(state.active_tab.index())
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    f.render_widget(tabs, header_chunks[1]);

    // Gauge logic: in-flight work animates, idle shows a summary.
    let (progress_text, gauge_color, progress_percent) = if state.search_in_flight() {
        let progress = ((state.tick % 20) as f64 / 20.0 * 100.0) as u16;
        (
            "SEARCHING - POI search in flight".to_string(),
            Color::LightGreen,
            progress,
        )
    } else if let Some(format) = state.export_in_flight() {
        let progress = ((state.tick % 20) as f64 / 20.0 * 100.0) as u16;
        (
            format!("EXPORTING - writing {} file", format),
            Color::LightMagenta,
            progress,
        )
    } else if !state.branches_loaded {
        let progress = ((state.tick % 20) as f64 / 20.0 * 100.0) as u16;
        (
            "LOADING - fetching branch list".to_string(),
            Color::LightBlue,
            progress,
        )
    } else {
        (
            format!(
                "READY - {} branches · {} results",
                state.branches.len(),
                state.poi_results.len()
            ),
            Color::Cyan,
            100,
        )
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_type(BorderType::Thick)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .gauge_style(
            Style::default()
                .fg(gauge_color)
                .add_modifier(Modifier::BOLD),
        )
        .percent(progress_percent)
        .label(progress_text);

    f.render_widget(gauge, header_chunks[2]);
}

//! Chart components
//!
//! Rebuilds both charts from the current POI result set on every draw: the
//! type distribution as a proportion chart and the rating histogram.

use super::super::state::DashboardState;
use super::super::utils::truncate_label;
use crate::geo::poi_color;
use crate::stats::{RATING_BUCKET_LABELS, rating_histogram, type_distribution};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, BorderType, Borders, Paragraph};

pub fn render_charts_section(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    if state.poi_results.is_empty() {
        let block = Block::default()
            .title("CHARTS")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan));
        f.render_widget(
            Paragraph::new("Run a search to populate the charts")
                .style(Style::default().fg(Color::DarkGray))
                .block(block),
            area,
        );
        return;
    }

    let chart_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_type_chart(f, chart_chunks[0], state);
    render_rating_chart(f, chart_chunks[1], state);
}

/// POI count by primary type, largest first, with proportion labels.
fn render_type_chart(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let distribution = type_distribution(&state.poi_results);
    let total: u64 = distribution.iter().map(|(_, count)| count).sum();

    let bars: Vec<Bar> = distribution
        .iter()
        .map(|(name, count)| {
            let percent = if total > 0 { count * 100 / total } else { 0 };
            Bar::default()
                .value(*count)
                .label(Line::from(truncate_label(name, 14)))
                .text_value(format!("{} ({}%)", count, percent))
                .style(Style::default().fg(poi_color(name)))
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .title("TYPE DISTRIBUTION")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(1)
        .data(BarGroup::default().bars(&bars));

    f.render_widget(chart, area);
}

/// Rated POIs bucketed into the five fixed rating bins.
fn render_rating_chart(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let bins = rating_histogram(&state.poi_results);

    let bars: Vec<Bar> = bins
        .iter()
        .zip(RATING_BUCKET_LABELS)
        .map(|(count, label)| {
            Bar::default()
                .value(*count)
                .label(Line::from(label))
                .style(Style::default().fg(Color::Cyan))
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .title("RATING DISTRIBUTION")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .bar_width(5)
        .bar_gap(2)
        .data(BarGroup::default().bars(&bars));

    f.render_widget(chart, area);
}

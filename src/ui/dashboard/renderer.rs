//! Dashboard main renderer

use super::components::{
    branches, charts, footer, header, history, logs, map_panel, metrics, results, search_form,
};
use super::state::{DashboardState, Tab};
use crate::geo::MapView;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Color, Style};
use ratatui::widgets::Block;

pub fn render_dashboard(f: &mut Frame, state: &DashboardState) {
    if state.with_background_color {
        f.render_widget(
            Block::default().style(Style::default().bg(Color::Rgb(16, 20, 24))),
            f.area(),
        );
    }

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Fill(1),
            Constraint::Percentage(22),
            Constraint::Length(2),
        ])
        .margin(1)
        .split(f.area());

    header::render_header(f, main_chunks[0], state);

    let content = main_chunks[1];
    match state.active_tab {
        Tab::Overview => render_overview_tab(f, content, state),
        Tab::Search => search_form::render_search_form(f, content, state),
        Tab::Results => render_results_tab(f, content, state),
        Tab::Charts => charts::render_charts_section(f, content, state),
        Tab::History => history::render_history(f, content, state),
    }

    logs::render_logs_panel(f, main_chunks[2], state);
    footer::render_footer(f, main_chunks[3], state);
}

/// Branch metrics above the branch table and overview map.
fn render_overview_tab(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Fill(1)])
        .split(area);

    metrics::render_metrics_section(f, chunks[0], state);

    let lower = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[1]);

    branches::render_branch_table(f, lower[0], state);

    let view = MapView::from_branches(&state.branches);
    let selected = (!state.branches.is_empty()).then_some(state.branch_cursor);
    map_panel::render_map(f, lower[1], "BRANCH MAP", &view, selected);
}

/// Results table next to the POI map and the selected POI's details.
fn render_results_tab(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    results::render_results_table(f, columns[0], state);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(columns[1]);

    let view = MapView::from_pois(&state.poi_results);
    // The cursor indexes the full result list; the map only shows points
    // with coordinates, so map the selection over when possible.
    let selected = selected_map_index(state, &view);
    map_panel::render_map(f, right[0], "POI MAP", &view, selected);
    results::render_poi_details(f, right[1], state);
}

fn selected_map_index(state: &DashboardState, view: &MapView) -> Option<usize> {
    let poi = state.poi_results.get(state.result_cursor)?;
    let (latitude, longitude) = poi.coordinates()?;
    view.points
        .iter()
        .position(|point| point.latitude == latitude && point.longitude == longitude)
}

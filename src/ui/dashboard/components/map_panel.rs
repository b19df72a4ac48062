//! Canvas point map component
//!
//! Draws a `MapView` as a braille scatter: longitude on the x axis,
//! latitude on the y axis, viewport fitted to the padded data bounds.

use crate::geo::MapView;
use ratatui::Frame;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::canvas::Canvas;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

pub fn render_map(
    f: &mut Frame,
    area: ratatui::layout::Rect,
    title: &str,
    view: &MapView,
    selected: Option<usize>,
) {
    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));

    if view.points.is_empty() {
        f.render_widget(
            Paragraph::new("No points to display")
                .style(Style::default().fg(Color::DarkGray))
                .block(block),
            area,
        );
        return;
    }

    let canvas = Canvas::default()
        .block(block)
        .x_bounds(view.x_bounds())
        .y_bounds(view.y_bounds())
        .paint(|ctx| {
            for (index, point) in view.points.iter().enumerate() {
                if selected == Some(index) {
                    continue;
                }
                ctx.print(
                    point.longitude,
                    point.latitude,
                    Span::styled("●", Style::default().fg(point.color)),
                );
            }
            // The selected point is drawn last, with its label, so it sits
            // on top of any overlapping markers.
            if let Some(point) = selected.and_then(|index| view.points.get(index)) {
                ctx.print(
                    point.longitude,
                    point.latitude,
                    Span::styled(
                        format!("◉ {}", point.label),
                        Style::default()
                            .fg(point.color)
                            .add_modifier(Modifier::BOLD),
                    ),
                );
            }
        });

    f.render_widget(canvas, area);
}

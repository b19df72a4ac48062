//! Dashboard footer component
//!
//! Renders key hints for the active tab

use super::super::state::{DashboardState, Tab};

use ratatui::Frame;
use ratatui::layout::Alignment;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

pub fn render_footer(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let footer_text = match state.active_tab {
        Tab::Overview => "[Tab] Next tab | [1-5] Jump | [Up/Down] Select branch | [Q] Quit",
        Tab::Search => {
            "[Up/Down] Field | [Space] Toggle branch | [Enter] Search | [Tab] Next tab | [Esc] Quit"
        }
        Tab::Results => {
            "[Up/Down] Select | [S] CSV [J] JSON [X] Excel | [C] Clear | [Tab] Next tab | [Q] Quit"
        }
        Tab::Charts => "[C] Clear results | [Tab] Next tab | [1-5] Jump | [Q] Quit",
        Tab::History => "[Tab] Next tab | [1-5] Jump | [Q] Quit",
    };

    let footer = Paragraph::new(footer_text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_type(BorderType::Thick),
        );
    f.render_widget(footer, area);
}

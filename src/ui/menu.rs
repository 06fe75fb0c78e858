use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::config::Theme;
use crate::game::{GameState, GameStatus};

/// Draws the end-of-game banner as a centered popup.
pub fn render_game_over_menu(frame: &mut Frame<'_>, area: Rect, state: &GameState, theme: &Theme) {
    let popup = centered_popup(area, 80, 50);
    frame.render_widget(Clear, popup);

    let lines = banner_lines(state, theme);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered()),
        popup,
    );
}

fn banner_lines(state: &GameState, theme: &Theme) -> Vec<Line<'static>> {
    let title = match state.status {
        GameStatus::Victory => "BOARD FULL",
        _ => "GAME OVER",
    };

    let mut lines = vec![
        Line::from(title).style(
            Style::default()
                .fg(theme.menu_title)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(format!("Score: {}", state.score)),
    ];
    if let Some(reason) = state.death_reason {
        lines.push(Line::from(format!("Snake {}", reason.describe())));
    }
    lines.push(Line::from("[Q] Quit").style(Style::default().fg(theme.hud_label)));
    lines
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}

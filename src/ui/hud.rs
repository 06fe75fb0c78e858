use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::config::Theme;
use crate::game::GameState;

/// Renders the one-line status row under the board.
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, state: &GameState, theme: &Theme) {
    frame.render_widget(
        Paragraph::new(info_line(state, theme.hud_label, theme.hud_value))
            .alignment(Alignment::Center),
        area,
    );
}

fn info_line(state: &GameState, label_color: Color, value_color: Color) -> Line<'static> {
    let fields = [
        ("score", state.score.to_string()),
        ("len", state.snake.target_len().to_string()),
        ("tick", state.tick_count.to_string()),
        ("", state.rules().strategy.to_string()),
    ];

    let mut spans = Vec::with_capacity(fields.len() * 3);
    for (index, (label, value)) in fields.into_iter().enumerate() {
        if index > 0 {
            spans.push(Span::styled("  ", Style::default().fg(label_color)));
        }
        if !label.is_empty() {
            spans.push(Span::styled(format!("{label} "), Style::default().fg(label_color)));
        }
        spans.push(Span::styled(value, Style::default().fg(value_color)));
    }

    Line::from(spans)
}

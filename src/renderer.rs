use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;

use crate::config::{
    BORDER_HALF_BLOCK, CELL_COLUMNS, GLYPH_GOAL, GLYPH_GOAL_LETHAL, GLYPH_SNAKE, GridSize, Theme,
};
use crate::food::{Effect, Goal};
use crate::game::GameState;
use crate::grid::Cell;
use crate::ui::hud::render_hud;
use crate::ui::menu::render_game_over_menu;

/// Renders the full game frame from immutable state.
pub fn render(frame: &mut Frame<'_>, state: &GameState, theme: &Theme) {
    let (play_area, hud_area) = board_layout(frame.area(), state.bounds());

    let block = Block::bordered()
        .border_set(BORDER_HALF_BLOCK)
        .border_style(Style::new().fg(theme.border_fg).bg(theme.border_bg))
        .style(Style::new().bg(theme.play_bg));
    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    render_goal(frame, inner, state, theme);
    render_snake(frame, inner, state, theme);
    render_hud(frame, hud_area, state, theme);

    if state.status.is_terminal() {
        render_game_over_menu(frame, play_area, state, theme);
    }
}

/// Splits `area` into a centered bordered board sized to the grid and a one-row HUD beneath it.
fn board_layout(area: Rect, bounds: GridSize) -> (Rect, Rect) {
    let board_width = bounds.width.saturating_mul(CELL_COLUMNS).saturating_add(2);
    let board_height = bounds.height.saturating_add(2);

    let outer = centered(area, board_width, board_height.saturating_add(1));
    let play_area = Rect {
        height: outer.height.saturating_sub(1),
        ..outer
    };
    let hud_area = Rect {
        y: play_area.bottom(),
        height: outer.height.saturating_sub(play_area.height),
        ..outer
    };

    (play_area, hud_area)
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_goal(frame: &mut Frame<'_>, inner: Rect, state: &GameState, theme: &Theme) {
    let Some((x, y)) = logical_to_terminal(inner, state.bounds(), state.goal.position) else {
        return;
    };

    let glyph = match state.goal.effect {
        Effect::Lethal => GLYPH_GOAL_LETHAL,
        _ => GLYPH_GOAL,
    };
    frame
        .buffer_mut()
        .set_string(x, y, glyph, Style::new().fg(goal_color(state.goal, theme)));
}

fn goal_color(goal: Goal, theme: &Theme) -> ratatui::style::Color {
    match goal.effect {
        Effect::None => theme.goal_plain,
        Effect::GrowDouble => theme.goal_grow,
        Effect::ShrinkHalf => theme.goal_shrink,
        Effect::Lethal => theme.goal_lethal,
    }
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, state: &GameState, theme: &Theme) {
    let head = state.snake.head();
    let buffer = frame.buffer_mut();

    for segment in state.snake.segments() {
        let Some((x, y)) = logical_to_terminal(inner, state.bounds(), *segment) else {
            continue;
        };

        let style = if *segment == head {
            Style::new()
                .fg(theme.snake_head)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::new().fg(theme.snake_body)
        };
        buffer.set_string(x, y, GLYPH_SNAKE, style);
    }
}

fn logical_to_terminal(inner: Rect, bounds: GridSize, cell: Cell) -> Option<(u16, u16)> {
    if !cell.is_within_bounds(bounds) {
        return None;
    }

    let x_offset = u16::try_from(cell.x).ok()?.checked_mul(CELL_COLUMNS)?;
    let y_offset = u16::try_from(cell.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(CELL_COLUMNS) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

use std::time::Duration;

use log::info;

use crate::error::AppError;
use crate::game::{DeathReason, GameState, GameStatus};

/// Presentation side of the tick loop: draws each state and reports quit requests.
pub trait Frontend {
    /// Shows the current state. Called once before the first tick and once after every tick.
    fn present(&mut self, state: &GameState) -> Result<(), AppError>;

    /// Waits up to `timeout` and reports whether the user asked to quit.
    fn wait_for_quit(&mut self, timeout: Duration) -> Result<bool, AppError>;
}

/// Pacing for one run.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct RunOptions {
    pub tick_interval: Duration,
    /// How long the final frame stays up once the game has ended.
    pub linger: Duration,
    /// Stop after this many ticks even if the game is still running.
    pub max_ticks: Option<u64>,
}

/// How a run finished.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct RunSummary {
    pub ticks: u64,
    pub score: u32,
    pub length: usize,
    pub status: GameStatus,
    pub death_reason: Option<DeathReason>,
    pub quit: bool,
}

impl RunSummary {
    fn from_state(state: &GameState, ticks: u64, quit: bool) -> Self {
        Self {
            ticks,
            score: state.score,
            length: state.snake.target_len(),
            status: state.status,
            death_reason: state.death_reason,
            quit,
        }
    }
}

/// Drives `state` until it ends, the tick limit is hit, or the frontend reports a quit.
///
/// Quit requests are only honoured between ticks; a tick that has started always completes.
pub fn run<F: Frontend>(
    state: &mut GameState,
    frontend: &mut F,
    options: RunOptions,
) -> Result<RunSummary, AppError> {
    let mut ticks = 0_u64;
    frontend.present(state)?;

    loop {
        if state.status.is_terminal() {
            break;
        }
        if options.max_ticks.is_some_and(|limit| ticks >= limit) {
            info!("tick limit {ticks} reached");
            return Ok(RunSummary::from_state(state, ticks, false));
        }
        if frontend.wait_for_quit(options.tick_interval)? {
            info!("quit requested after {ticks} ticks");
            return Ok(RunSummary::from_state(state, ticks, true));
        }

        state.tick()?;
        ticks += 1;
        frontend.present(state)?;
    }

    let quit = frontend.wait_for_quit(options.linger)?;
    Ok(RunSummary::from_state(state, ticks, quit))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::config::{GridSize, Variant};
    use crate::error::AppError;
    use crate::food::{Effect, Goal};
    use crate::game::{DeathReason, GameState, GameStatus};
    use crate::grid::Cell;
    use crate::snake::Snake;

    use super::{Frontend, RunOptions, run};

    /// Records presented heads and quits after a fixed number of waits.
    #[derive(Default)]
    struct Scripted {
        heads: Vec<Cell>,
        waits: Vec<Duration>,
        quit_after: Option<usize>,
    }

    impl Frontend for Scripted {
        fn present(&mut self, state: &GameState) -> Result<(), AppError> {
            self.heads.push(state.snake.head());
            Ok(())
        }

        fn wait_for_quit(&mut self, timeout: Duration) -> Result<bool, AppError> {
            self.waits.push(timeout);
            Ok(self.quit_after.is_some_and(|limit| self.waits.len() > limit))
        }
    }

    const OPTIONS: RunOptions = RunOptions {
        tick_interval: Duration::from_millis(5),
        linger: Duration::from_millis(50),
        max_ticks: None,
    };

    fn state() -> GameState {
        GameState::new_with_seed(GridSize::square(10), Variant::Classic.rules(), 99)
            .expect("fresh game should start")
    }

    #[test]
    fn quit_is_checked_before_each_tick() {
        let mut state = state();
        let mut frontend = Scripted {
            quit_after: Some(3),
            ..Scripted::default()
        };

        let summary = run(&mut state, &mut frontend, OPTIONS).expect("run should succeed");

        assert!(summary.quit);
        assert_eq!(summary.ticks, 3);
        assert_eq!(frontend.heads.len(), 4);
        assert_eq!(summary.status, GameStatus::Running);
    }

    #[test]
    fn tick_limit_stops_a_running_game() {
        let mut state = state();
        let mut frontend = Scripted::default();

        let summary = run(
            &mut state,
            &mut frontend,
            RunOptions {
                max_ticks: Some(5),
                ..OPTIONS
            },
        )
        .expect("run should succeed");

        assert!(!summary.quit);
        assert_eq!(summary.ticks, 5);
        assert_eq!(frontend.waits, vec![OPTIONS.tick_interval; 5]);
    }

    #[test]
    fn finished_game_lingers_on_the_last_frame() {
        let mut state = state();
        state.snake = Snake::new(Cell::new(1, 1));
        state.goal = Goal::new(Cell::new(2, 1), Effect::Lethal);
        let mut frontend = Scripted::default();

        let summary = run(&mut state, &mut frontend, OPTIONS).expect("run should succeed");

        assert_eq!(summary.status, GameStatus::GameOver);
        assert_eq!(summary.death_reason, Some(DeathReason::LethalGoal));
        assert_eq!(summary.ticks, 1);
        assert_eq!(frontend.waits, vec![OPTIONS.tick_interval, OPTIONS.linger]);
        assert_eq!(frontend.heads, vec![Cell::new(1, 1), Cell::new(1, 1)]);
    }
}

use std::time::Duration;

use log::trace;

use crate::error::AppError;
use crate::game::GameState;
use crate::runtime::Frontend;

/// Frontend that draws nothing and never quits. Each presented frame becomes a trace line.
#[derive(Debug, Default)]
pub struct HeadlessFrontend {
    frames: u64,
}

impl HeadlessFrontend {
    /// Number of frames presented so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Frontend for HeadlessFrontend {
    fn present(&mut self, state: &GameState) -> Result<(), AppError> {
        self.frames += 1;
        trace!(
            "frame {}: head {:?} len {} goal {:?} {:?} score {} {:?}",
            self.frames,
            state.snake.head(),
            state.snake.target_len(),
            state.goal.position,
            state.goal.effect,
            state.score,
            state.status
        );
        Ok(())
    }

    fn wait_for_quit(&mut self, _timeout: Duration) -> Result<bool, AppError> {
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::config::{GridSize, Variant};
    use crate::game::GameState;
    use crate::runtime::{RunOptions, run};

    use super::HeadlessFrontend;

    #[test]
    fn counts_the_initial_frame_and_one_per_tick() {
        let mut state = GameState::new_with_seed(GridSize::square(10), Variant::Classic.rules(), 9)
            .expect("fresh game should start");
        let mut frontend = HeadlessFrontend::default();
        let options = RunOptions {
            tick_interval: Duration::ZERO,
            linger: Duration::ZERO,
            max_ticks: Some(4),
        };

        let summary = run(&mut state, &mut frontend, options).expect("headless run");

        assert_eq!(summary.ticks, 4);
        assert_eq!(frontend.frames(), summary.ticks + 1);
    }
}

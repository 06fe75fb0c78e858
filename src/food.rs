use std::collections::HashSet;

use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::config::{GridSize, MAX_SAMPLE_ATTEMPTS};
use crate::error::GoalError;
use crate::grid::Cell;

/// What happens to the snake when it reaches a goal.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Effect {
    /// Ordinary food: grow by one.
    None,
    /// Double the snake's length.
    GrowDouble,
    /// Halve the snake's length, never below one segment.
    ShrinkHalf,
    /// Ends the game on contact.
    Lethal,
}

impl Effect {
    /// Returns the score value granted when eaten.
    #[must_use]
    pub fn points(self) -> u32 {
        match self {
            Self::None | Self::ShrinkHalf => 1,
            Self::GrowDouble => 2,
            Self::Lethal => 0,
        }
    }
}

/// The single target cell the snake is currently steering toward.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Goal {
    pub position: Cell,
    pub effect: Effect,
}

impl Goal {
    #[must_use]
    pub fn new(position: Cell, effect: Effect) -> Self {
        Self { position, effect }
    }

    /// Creates an ordinary goal at `position`.
    #[must_use]
    pub fn plain(position: Cell) -> Self {
        Self::new(position, Effect::None)
    }
}

/// Picks a free cell for the next goal and tags it with a random effect from `effects`.
///
/// The cell is never in `occupied` and never equal to `previous`. Uniform
/// rejection sampling is tried first; after [`MAX_SAMPLE_ATTEMPTS`] misses the
/// free cells are enumerated and one is chosen uniformly, so a crowded board
/// cannot stall the generator.
pub fn generate_goal<R: Rng + ?Sized>(
    rng: &mut R,
    occupied: &HashSet<Cell>,
    previous: Option<Cell>,
    bounds: GridSize,
    effects: &[Effect],
) -> Result<Goal, GoalError> {
    let effect = *effects.choose(rng).ok_or(GoalError::NoEffects)?;
    let is_free = |cell: Cell| !occupied.contains(&cell) && Some(cell) != previous;

    for _ in 0..MAX_SAMPLE_ATTEMPTS {
        let candidate = Cell::new(
            rng.gen_range(0..i32::from(bounds.width)),
            rng.gen_range(0..i32::from(bounds.height)),
        );
        if is_free(candidate) {
            return Ok(Goal::new(candidate, effect));
        }
    }

    debug!("goal sampling missed {MAX_SAMPLE_ATTEMPTS} times, scanning free cells");
    let candidates: Vec<Cell> = (0..i32::from(bounds.height))
        .flat_map(|y| (0..i32::from(bounds.width)).map(move |x| Cell::new(x, y)))
        .filter(|cell| is_free(*cell))
        .collect();

    candidates
        .choose(rng)
        .map(|position| Goal::new(*position, effect))
        .ok_or(GoalError::GridFull {
            width: bounds.width,
            height: bounds.height,
        })
}

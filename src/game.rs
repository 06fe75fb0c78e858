use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::{Rng, SeedableRng};

use crate::config::{GridSize, NoPathPolicy, RuleSet};
use crate::error::{GameError, GoalError};
use crate::food::{Effect, Goal, generate_goal};
use crate::grid::Cell;
use crate::snake::Snake;

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Running,
    GameOver,
    /// The board filled up and no goal could be placed.
    Victory,
}

impl GameStatus {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Running)
    }
}

/// Why a game ended in [`GameStatus::GameOver`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    /// No route to the goal and the rules end the game.
    NoPath,
    /// No route to the goal and no free neighbour to escape into.
    Trapped,
    SelfCollision,
    WallCollision,
    LethalGoal,
}

impl DeathReason {
    #[must_use]
    pub fn describe(self) -> &'static str {
        match self {
            Self::NoPath => "no path to the apple",
            Self::Trapped => "trapped",
            Self::SelfCollision => "hit itself",
            Self::WallCollision => "hit the wall",
            Self::LethalGoal => "ate a poisoned apple",
        }
    }
}

/// What one call to [`GameState::tick`] did.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    /// The game was already over; nothing changed.
    Idle,
    Moved,
    Ate(Effect),
    Ended(GameStatus),
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub goal: Goal,
    pub score: u32,
    pub tick_count: u64,
    pub status: GameStatus,
    pub death_reason: Option<DeathReason>,
    bounds: GridSize,
    rules: RuleSet,
    rng: StdRng,
}

impl GameState {
    /// Creates a state seeded from system entropy.
    pub fn new(bounds: GridSize, rules: RuleSet) -> Result<Self, GameError> {
        Self::with_rng(bounds, rules, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible simulations.
    pub fn new_with_seed(bounds: GridSize, rules: RuleSet, seed: u64) -> Result<Self, GameError> {
        Self::with_rng(bounds, rules, StdRng::seed_from_u64(seed))
    }

    fn with_rng(bounds: GridSize, rules: RuleSet, mut rng: StdRng) -> Result<Self, GameError> {
        if bounds.total_cells() == 0 {
            return Err(GoalError::GridFull {
                width: bounds.width,
                height: bounds.height,
            }
            .into());
        }
        let start = Cell::new(
            rng.gen_range(0..i32::from(bounds.width)),
            rng.gen_range(0..i32::from(bounds.height)),
        );
        let snake = Snake::new(start);
        let goal = generate_goal(&mut rng, &snake.occupied(), None, bounds, &rules.effects)?;
        debug!("new game on {}x{}, snake at {start:?}, goal {goal:?}", bounds.width, bounds.height);

        Ok(Self {
            snake,
            goal,
            score: 0,
            tick_count: 0,
            status: GameStatus::Running,
            death_reason: None,
            bounds,
            rules,
            rng,
        })
    }

    /// Advances the simulation by one step.
    ///
    /// Every terminal condition is checked against the candidate head before
    /// anything is mutated, so a losing tick leaves the snake exactly as it was.
    pub fn tick(&mut self) -> Result<TickOutcome, GameError> {
        if self.status.is_terminal() {
            return Ok(TickOutcome::Idle);
        }

        let head = self.snake.head();
        let path = self.rules.strategy.checked_path(
            head,
            self.goal.position,
            &self.snake.obstacles(),
            self.bounds,
        )?;

        let next_head = match path.and_then(|path| path.first().copied()) {
            Some(step) => step,
            None => match self.escape_move() {
                Ok(step) => step,
                Err(reason) => return Ok(self.end(reason)),
            },
        };

        if self.snake.occupies(next_head) {
            return Ok(self.end(DeathReason::SelfCollision));
        }
        if !next_head.is_within_bounds(self.bounds) {
            return Ok(self.end(DeathReason::WallCollision));
        }
        if next_head == self.goal.position && self.goal.effect == Effect::Lethal {
            return Ok(self.end(DeathReason::LethalGoal));
        }

        self.tick_count += 1;

        if next_head != self.goal.position {
            self.snake.advance(next_head);
            return Ok(TickOutcome::Moved);
        }

        let eaten = self.goal;
        self.snake.advance_and_grow(next_head);
        match eaten.effect {
            Effect::GrowDouble => self.snake.grow_double(),
            Effect::ShrinkHalf => self.snake.shrink_half(),
            Effect::None | Effect::Lethal => {}
        }
        self.score += eaten.effect.points();
        debug!(
            "ate {:?} at {:?}, length now {}, score {}",
            eaten.effect,
            eaten.position,
            self.snake.target_len(),
            self.score
        );

        match generate_goal(
            &mut self.rng,
            &self.snake.occupied(),
            Some(eaten.position),
            self.bounds,
            &self.rules.effects,
        ) {
            Ok(goal) => {
                debug!("next goal {goal:?}");
                self.goal = goal;
                Ok(TickOutcome::Ate(eaten.effect))
            }
            Err(GoalError::GridFull { .. }) => {
                info!("board filled after {} ticks, score {}", self.tick_count, self.score);
                self.status = GameStatus::Victory;
                Ok(TickOutcome::Ended(GameStatus::Victory))
            }
            Err(error) => Err(error.into()),
        }
    }

    /// Picks the move to make when the goal is unreachable.
    fn escape_move(&mut self) -> Result<Cell, DeathReason> {
        match self.rules.no_path {
            NoPathPolicy::GameOver => Err(DeathReason::NoPath),
            NoPathPolicy::RandomMove => {
                let head = self.snake.head();
                let step = head
                    .neighbours_within(self.bounds)
                    .filter(|cell| !self.snake.occupies(*cell))
                    .choose(&mut self.rng)
                    .ok_or(DeathReason::Trapped)?;
                info!("no path from {head:?} to {:?}, wandering to {step:?}", self.goal.position);
                Ok(step)
            }
        }
    }

    fn end(&mut self, reason: DeathReason) -> TickOutcome {
        info!(
            "game over after {} ticks: {}, score {}, length {}",
            self.tick_count,
            reason.describe(),
            self.score,
            self.snake.len()
        );
        self.status = GameStatus::GameOver;
        self.death_reason = Some(reason);
        TickOutcome::Ended(GameStatus::GameOver)
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }

    #[must_use]
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{GridSize, NoPathPolicy, Variant};
    use crate::error::{GameError, GoalError, PathError};
    use crate::food::{Effect, Goal};
    use crate::grid::Cell;
    use crate::snake::Snake;

    use super::{DeathReason, GameState, GameStatus, TickOutcome};

    fn body(segments: Vec<Cell>) -> Snake {
        Snake::from_segments(segments).expect("test bodies are non-empty")
    }

    fn state(variant: Variant, size: u16, seed: u64) -> GameState {
        GameState::new_with_seed(GridSize::square(size), variant.rules(), seed)
            .expect("fresh game should start")
    }

    #[test]
    fn empty_grid_is_rejected_instead_of_panicking() {
        let square = GameState::new_with_seed(GridSize::square(0), Variant::Classic.rules(), 1);
        assert_eq!(
            square.err(),
            Some(GameError::Goal(GoalError::GridFull {
                width: 0,
                height: 0
            }))
        );

        let flat = GridSize {
            width: 5,
            height: 0,
        };
        let flat = GameState::new_with_seed(flat, Variant::Scored.rules(), 1);
        assert_eq!(
            flat.err(),
            Some(GameError::Goal(GoalError::GridFull {
                width: 5,
                height: 0
            }))
        );
    }

    #[test]
    fn fresh_game_never_starts_on_the_goal() {
        for seed in 0..200 {
            let state = state(Variant::Scored, 5, seed);
            assert_ne!(state.snake.head(), state.goal.position);
            assert_eq!(state.status, GameStatus::Running);
            assert_eq!(state.snake.len(), 1);
        }
    }

    #[test]
    fn single_cell_snake_steps_toward_goal() {
        for variant in [Variant::Classic, Variant::Advanced, Variant::Scored] {
            let mut state = state(variant, 5, 1);
            state.snake = Snake::new(Cell::new(2, 2));
            state.goal = Goal::plain(Cell::new(4, 4));

            assert_eq!(state.tick(), Ok(TickOutcome::Moved));

            assert_eq!(state.snake.len(), 1);
            assert_eq!(state.snake.head().manhattan(Cell::new(4, 4)), 3);
            assert_eq!(state.tick_count, 1);
        }
    }

    #[test]
    fn plain_goal_grows_by_one_and_scores() {
        let mut state = state(Variant::Classic, 10, 2);
        state.snake = Snake::new(Cell::new(1, 1));
        state.goal = Goal::plain(Cell::new(2, 1));

        assert_eq!(state.tick(), Ok(TickOutcome::Ate(Effect::None)));

        assert_eq!(state.snake.len(), 2);
        assert_eq!(state.score, 1);
        assert_ne!(state.goal.position, Cell::new(2, 1));
        assert!(!state.snake.occupies(state.goal.position));
    }

    #[test]
    fn grow_double_goal_doubles_length() {
        let mut state = state(Variant::Scored, 8, 3);
        state.snake = body(vec![Cell::new(0, 1), Cell::new(0, 2)]);
        state.goal = Goal::new(Cell::new(0, 0), Effect::GrowDouble);

        assert_eq!(state.tick(), Ok(TickOutcome::Ate(Effect::GrowDouble)));

        assert_eq!(state.snake.head(), Cell::new(0, 0));
        assert_eq!(state.snake.len(), 3);
        assert_eq!(state.snake.target_len(), 6);
        assert_eq!(state.score, 2);

        // Body is now (0,0) (0,1) (0,2); walk right along the top row.
        state.goal = Goal::plain(Cell::new(7, 0));
        for _ in 0..3 {
            assert_eq!(state.tick(), Ok(TickOutcome::Moved));
        }

        assert_eq!(state.snake.head(), Cell::new(3, 0));
        assert_eq!(state.snake.len(), 6);
        assert_eq!(state.snake.pending_growth(), 0);
        assert_eq!(state.snake.target_len(), 6);
    }

    #[test]
    fn shrink_half_goal_keeps_head_end() {
        let mut state = state(Variant::Advanced, 8, 4);
        state.snake = body((1..5).map(|y| Cell::new(0, y)).collect());
        state.goal = Goal::new(Cell::new(0, 0), Effect::ShrinkHalf);

        assert_eq!(state.tick(), Ok(TickOutcome::Ate(Effect::ShrinkHalf)));

        assert_eq!(
            state.snake.segments().copied().collect::<Vec<_>>(),
            vec![Cell::new(0, 0), Cell::new(0, 1)]
        );
        assert_eq!(state.score, 1);
    }

    #[test]
    fn lethal_goal_ends_game_without_moving() {
        let mut state = state(Variant::Scored, 6, 5);
        let before = body(vec![Cell::new(1, 1), Cell::new(1, 2)]);
        state.snake = before.clone();
        state.goal = Goal::new(Cell::new(2, 1), Effect::Lethal);

        assert_eq!(state.tick(), Ok(TickOutcome::Ended(GameStatus::GameOver)));

        assert_eq!(state.death_reason, Some(DeathReason::LethalGoal));
        assert_eq!(state.snake, before);
        assert_eq!(state.tick_count, 0);
    }

    fn boxed_in() -> Snake {
        body(vec![
            Cell::new(0, 0),
            Cell::new(1, 0),
            Cell::new(1, 1),
            Cell::new(0, 1),
        ])
    }

    #[test]
    fn trapped_snake_ends_game_and_stays_frozen() {
        let mut state = state(Variant::Scored, 5, 6);
        state.snake = boxed_in();
        state.goal = Goal::plain(Cell::new(4, 4));

        assert_eq!(state.tick(), Ok(TickOutcome::Ended(GameStatus::GameOver)));
        assert_eq!(state.death_reason, Some(DeathReason::Trapped));

        assert_eq!(state.tick(), Ok(TickOutcome::Idle));
        assert_eq!(state.tick(), Ok(TickOutcome::Idle));
        assert_eq!(state.snake, boxed_in());
        assert_eq!(state.goal, Goal::plain(Cell::new(4, 4)));
    }

    /// Goal at (4,4) sealed off by the body; the head at (1,1) still has room.
    fn sealed_goal(state: &mut GameState) {
        state.snake = body(vec![
            Cell::new(1, 1),
            Cell::new(1, 2),
            Cell::new(2, 2),
            Cell::new(3, 2),
            Cell::new(4, 2),
            Cell::new(4, 3),
            Cell::new(3, 3),
            Cell::new(3, 4),
        ]);
        state.goal = Goal::plain(Cell::new(4, 4));
    }

    #[test]
    fn game_over_policy_ends_on_missing_path() {
        let mut state = state(Variant::Advanced, 5, 7);
        sealed_goal(&mut state);
        let before = state.snake.clone();

        assert_eq!(state.tick(), Ok(TickOutcome::Ended(GameStatus::GameOver)));
        assert_eq!(state.death_reason, Some(DeathReason::NoPath));
        assert_eq!(state.snake, before);
    }

    #[test]
    fn random_move_policy_wanders_when_goal_is_unreachable() {
        let mut state = state(Variant::Scored, 5, 8);
        sealed_goal(&mut state);

        assert_eq!(state.tick(), Ok(TickOutcome::Moved));

        let head = state.snake.head();
        assert!([Cell::new(1, 0), Cell::new(0, 1), Cell::new(2, 1)].contains(&head));
        assert_eq!(state.snake.len(), 8);
        assert_eq!(state.status, GameStatus::Running);
    }

    #[test]
    fn filling_the_board_is_a_victory() {
        let mut state = state(Variant::Classic, 2, 9);
        state.snake = body(vec![Cell::new(1, 0), Cell::new(0, 0), Cell::new(0, 1)]);
        state.goal = Goal::plain(Cell::new(1, 1));

        assert_eq!(state.tick(), Ok(TickOutcome::Ended(GameStatus::Victory)));

        assert_eq!(state.snake.len(), 4);
        assert_eq!(state.score, 1);
        assert_eq!(state.death_reason, None);
        assert_eq!(state.tick(), Ok(TickOutcome::Idle));
    }

    #[test]
    fn goal_inside_the_body_is_rejected() {
        let mut state = state(Variant::Classic, 5, 10);
        state.snake = body(vec![Cell::new(0, 0), Cell::new(1, 0)]);
        state.goal = Goal::plain(Cell::new(1, 0));

        assert_eq!(
            state.tick(),
            Err(GameError::Path(PathError::TargetBlocked(Cell::new(1, 0))))
        );
        assert_eq!(state.status, GameStatus::Running);
    }

    #[test]
    fn rules_are_kept_on_the_state() {
        let state = state(Variant::Scored, 5, 11);
        assert_eq!(state.rules().no_path, NoPathPolicy::RandomMove);
        assert_eq!(state.bounds(), GridSize::square(5));
    }
}

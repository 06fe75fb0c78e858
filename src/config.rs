use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use clap::ValueEnum;
use ratatui::style::Color;
use ratatui::symbols::border;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::food::Effect;
use crate::pathfinder::PathStrategy;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns an `n`×`n` grid.
    #[must_use]
    pub const fn square(n: u16) -> Self {
        Self {
            width: n,
            height: n,
        }
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Rejects grids too small to hold a snake and a goal.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.width < MIN_GRID_SIZE || self.height < MIN_GRID_SIZE {
            return Err(ConfigError::GridTooSmall {
                width: self.width,
                height: self.height,
            });
        }
        if self.width > MAX_GRID_SIZE || self.height > MAX_GRID_SIZE {
            return Err(ConfigError::GridTooLarge {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }
}

/// Smallest accepted grid side.
pub const MIN_GRID_SIZE: u16 = 2;

/// Largest accepted grid side.
pub const MAX_GRID_SIZE: u16 = 256;

/// How long the final frame stays up after the game ends.
pub const GAME_OVER_LINGER: Duration = Duration::from_secs(3);

/// Attempts at uniform rejection sampling before the goal generator scans for free cells.
pub const MAX_SAMPLE_ATTEMPTS: usize = 64;

/// What the snake does when no path to the goal exists.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NoPathPolicy {
    /// Step onto a random free neighbour; end the game when none exists.
    RandomMove,
    /// End the game immediately.
    GameOver,
}

/// Variant-specific rules shared by one game state machine.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RuleSet {
    pub strategy: PathStrategy,
    /// Effects a freshly generated goal may carry, drawn uniformly.
    pub effects: Vec<Effect>,
    pub no_path: NoPathPolicy,
}

impl RuleSet {
    /// Checks that the rules can drive a game.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.effects.is_empty() {
            return Err(ConfigError::EmptyEffects);
        }
        Ok(self)
    }

    /// Loads and validates a JSON rules file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json(&raw)
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?
            .validate()
    }

    fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Writes the rules as pretty JSON, creating parent directories when needed.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error))?;

        fs::write(path, json)
    }
}

/// Built-in rule presets.
#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
pub enum Variant {
    /// A* search, plain food, game over when trapped.
    Classic,
    /// BFS search, special apples, game over when no path exists.
    Advanced,
    /// BFS search, special apples, random escape move when no path exists.
    Scored,
}

impl Variant {
    #[must_use]
    pub fn rules(self) -> RuleSet {
        match self {
            Self::Classic => RuleSet {
                strategy: PathStrategy::AStar,
                effects: vec![Effect::None],
                no_path: NoPathPolicy::GameOver,
            },
            Self::Advanced => RuleSet {
                strategy: PathStrategy::BreadthFirst,
                effects: SPECIAL_EFFECTS.to_vec(),
                no_path: NoPathPolicy::GameOver,
            },
            Self::Scored => RuleSet {
                strategy: PathStrategy::BreadthFirst,
                effects: SPECIAL_EFFECTS.to_vec(),
                no_path: NoPathPolicy::RandomMove,
            },
        }
    }

    #[must_use]
    pub fn grid_size(self) -> GridSize {
        match self {
            Self::Classic => GridSize::square(20),
            Self::Advanced | Self::Scored => GridSize::square(25),
        }
    }

    #[must_use]
    pub fn ticks_per_second(self) -> u32 {
        match self {
            Self::Classic => 10,
            Self::Advanced | Self::Scored => 15,
        }
    }
}

const SPECIAL_EFFECTS: [Effect; 3] = [Effect::GrowDouble, Effect::ShrinkHalf, Effect::Lethal];

/// Returns the pause between ticks for a tick rate.
pub fn tick_interval(ticks_per_second: u32) -> Result<Duration, ConfigError> {
    if ticks_per_second == 0 {
        return Err(ConfigError::ZeroTickRate);
    }
    Ok(Duration::from_secs(1) / ticks_per_second)
}

/// Colors applied to all visual elements.
#[derive(Debug)]
pub struct Theme {
    pub snake_head: Color,
    pub snake_body: Color,
    /// Goal colors, one per effect.
    pub goal_plain: Color,
    pub goal_grow: Color,
    pub goal_shrink: Color,
    pub goal_lethal: Color,
    pub play_bg: Color,
    pub border_fg: Color,
    pub border_bg: Color,
    pub hud_value: Color,
    pub hud_label: Color,
    pub menu_title: Color,
}

pub const THEME: Theme = Theme {
    snake_head: Color::LightGreen,
    snake_body: Color::Green,
    goal_plain: Color::Red,
    goal_grow: Color::Blue,
    goal_shrink: Color::Rgb(217, 187, 160),
    goal_lethal: Color::Red,
    play_bg: Color::Black,
    border_fg: Color::White,
    border_bg: Color::DarkGray,
    hud_value: Color::White,
    hud_label: Color::DarkGray,
    menu_title: Color::Red,
};

/// Half-block border set: solid side faces the play area.
pub const BORDER_HALF_BLOCK: border::Set = border::Set {
    top_left: "▄",
    top_right: "▄",
    bottom_left: "▀",
    bottom_right: "▀",
    vertical_left: "█",
    vertical_right: "█",
    horizontal_top: "▄",
    horizontal_bottom: "▀",
};

/// Each logical cell is drawn two terminal columns wide so it reads square.
pub const CELL_COLUMNS: u16 = 2;

pub const GLYPH_SNAKE: &str = "██";
pub const GLYPH_GOAL: &str = "██";
pub const GLYPH_GOAL_LETHAL: &str = "▓▓";

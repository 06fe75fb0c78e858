use std::fs::File;
use std::path::PathBuf;
use std::time::Duration;

use auto_snake::config::{GAME_OVER_LINGER, GridSize, RuleSet, Variant, tick_interval};
use auto_snake::error::AppError;
use auto_snake::game::{GameState, GameStatus};
use auto_snake::headless::HeadlessFrontend;
use auto_snake::pathfinder::PathStrategy;
use auto_snake::runtime::{RunOptions, RunSummary, run};
use auto_snake::terminal_runtime::{TerminalFrontend, TerminalSession, install_panic_hook};
use clap::Parser;
use log::info;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode, WriteLogger};

/// Snake that steers itself to each apple with BFS or A*.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Rule preset.
    #[arg(long, value_enum, default_value_t = Variant::Scored)]
    variant: Variant,

    /// Search algorithm, overriding the preset.
    #[arg(long, value_enum)]
    strategy: Option<PathStrategy>,

    /// JSON rules file used instead of the preset's rules.
    #[arg(long, value_name = "FILE")]
    rules: Option<PathBuf>,

    /// Side length of the square board.
    #[arg(long)]
    grid_size: Option<u16>,

    /// Ticks per second.
    #[arg(long)]
    tps: Option<u32>,

    /// Seed for a reproducible game.
    #[arg(long)]
    seed: Option<u64>,

    /// Simulate without drawing, as fast as possible.
    #[arg(long)]
    headless: bool,

    /// Stop after this many ticks.
    #[arg(long)]
    max_ticks: Option<u64>,

    /// Write log output to this file.
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    #[arg(long, default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,

    /// Write the resolved rules as JSON to this file and exit without playing.
    #[arg(long, value_name = "FILE")]
    dump_rules: Option<PathBuf>,
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let rules = resolve_rules(&cli)?;
    if let Some(path) = &cli.dump_rules {
        rules.save(path)?;
        println!("rules written to {}", path.display());
        return Ok(());
    }

    let summary = play(&cli, rules)?;
    print_summary(&summary);
    Ok(())
}

fn init_logging(cli: &Cli) -> Result<(), AppError> {
    // The interactive board owns the terminal, so it only logs to a file.
    if let Some(path) = &cli.log_file {
        WriteLogger::init(cli.log_level, Config::default(), File::create(path)?)?;
    } else if cli.headless {
        TermLogger::init(
            cli.log_level,
            Config::default(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        )?;
    }
    Ok(())
}

fn resolve_rules(cli: &Cli) -> Result<RuleSet, AppError> {
    let preset = match &cli.rules {
        Some(path) => RuleSet::load(path)?,
        None => cli.variant.rules(),
    };
    let rules = RuleSet {
        strategy: cli.strategy.unwrap_or(preset.strategy),
        ..preset
    }
    .validate()?;
    Ok(rules)
}

fn play(cli: &Cli, rules: RuleSet) -> Result<RunSummary, AppError> {
    let side = cli.grid_size.unwrap_or(cli.variant.grid_size().width);
    let bounds = GridSize::square(side).validate()?;
    let interval = tick_interval(cli.tps.unwrap_or(cli.variant.ticks_per_second()))?;

    info!(
        "starting {side}x{side} game, {} search, {:?} on no path, effects {:?}",
        rules.strategy, rules.no_path, rules.effects
    );
    let mut state = match cli.seed {
        Some(seed) => GameState::new_with_seed(bounds, rules, seed)?,
        None => GameState::new(bounds, rules)?,
    };

    if cli.headless {
        let options = RunOptions {
            tick_interval: Duration::ZERO,
            linger: Duration::ZERO,
            max_ticks: cli.max_ticks,
        };
        let mut frontend = HeadlessFrontend::default();
        let summary = run(&mut state, &mut frontend, options)?;
        info!("headless run presented {} frames", frontend.frames());
        return Ok(summary);
    }

    install_panic_hook();
    let mut frontend = TerminalFrontend::new(TerminalSession::enter()?);
    let options = RunOptions {
        tick_interval: interval,
        linger: GAME_OVER_LINGER,
        max_ticks: cli.max_ticks,
    };
    run(&mut state, &mut frontend, options)
}

fn print_summary(summary: &RunSummary) {
    let outcome = match (summary.status, summary.death_reason) {
        (GameStatus::Victory, _) => "board full".to_owned(),
        (GameStatus::GameOver, Some(reason)) => format!("game over, snake {}", reason.describe()),
        (GameStatus::GameOver, None) => "game over".to_owned(),
        (GameStatus::Running, _) if summary.quit => "quit".to_owned(),
        (GameStatus::Running, _) => "stopped".to_owned(),
    };

    println!(
        "{outcome} after {} ticks: score {}, length {}",
        summary.ticks, summary.score, summary.length
    );
}

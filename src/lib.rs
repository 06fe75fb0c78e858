pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod grid;
pub mod headless;
pub mod input;
pub mod pathfinder;
pub mod renderer;
pub mod runtime;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;

//! Centralized error types for the mini-game engine.
//!
//! Gameplay never produces these: a move into a wall or a wrong bin is a rejected
//! input reported through [`crate::events::Feedback`]. Errors here describe broken
//! configuration, unloadable settings and session operations called out of order.

use crate::session::Status;

/// Main error type for the engine.
///
/// This is the primary error type that should be used in public APIs.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Settings error: {0}")]
    Settings(#[from] Box<figment::Error>),

    #[error("Cannot {action} a session that is {from}")]
    InvalidTransition { from: Status, action: &'static str },
}

/// Error type for maze board parsing operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown character in board: {0}")]
    UnknownCharacter(char),
    #[error("Board row {row} has {found} cells, expected {expected}")]
    RaggedRow { row: usize, expected: usize, found: usize },
    #[error("Board must have exactly 1 spawn position, found {0}")]
    InvalidSpawnCount(usize),
    #[error("Board is empty")]
    EmptyBoard,
}

/// Catalog and rule validation failures.
///
/// Detected once when a session is constructed; a session holding one of these
/// refuses to start.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Maze board error: {0}")]
    Board(#[from] ParseError),

    #[error("Maze has no collectibles")]
    NoCollectibles,

    #[error("Maze needs at least one life")]
    NoLives,

    #[error("Step size must be positive, got {0}")]
    InvalidStep(f32),

    #[error("{name} must be positive, got {value}")]
    InvalidSize { name: &'static str, value: f32 },

    #[error("Obstacle at {0} reaches the spawn point")]
    ObstacleAtSpawn(glam::UVec2),

    #[error("Puzzle catalog is empty")]
    NoPuzzles,

    #[error("Puzzle '{puzzle}' needs at least 2 waypoints, found {found}")]
    TooFewWaypoints { puzzle: String, found: usize },

    #[error("Puzzle '{puzzle}' has label {found} at position {index}, expected {expected}")]
    NonContiguousLabels {
        puzzle: String,
        index: usize,
        expected: u32,
        found: u32,
    },

    #[error("Waste catalog is empty")]
    EmptyCatalog,

    #[error("Item '{0}' is worth no points")]
    WorthlessItem(String),

    #[error("Accuracy threshold must lie in (0, 1], got {0}")]
    InvalidThreshold(f32),

    #[error("Countdown budget must be at least one second")]
    NoTimeBudget,
}

/// Result type for engine operations.
pub type GameResult<T> = Result<T, GameError>;

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub mod attempt;
pub mod config;
pub mod error;
pub mod executor;
pub mod finalize;
pub mod orchestrator;
pub mod placement;
pub mod slot_fill;
pub mod sparse_grid;
pub mod word;
pub mod word_pool;

pub use config::{GeneratorConfig, GridSize};
pub use error::GenerateError;
pub use finalize::Crossword;
pub use orchestrator::{generate, Generator};
pub use word::{Direction, PlacedWord, Placement};

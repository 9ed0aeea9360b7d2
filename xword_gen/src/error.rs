use core::fmt;
use std::{
  error::Error,
  fmt::{Display, Formatter},
};

/// Why a generation produced no crossword.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GenerateError {
  /// No themed word survived normalization, so there is nothing to seed an
  /// attempt with.
  NoThemedWords,
  /// Themed words exist, but none fits the configured grid.
  GridTooSmall { height: u32, width: u32 },
  InvalidConfig(String),
  /// Every attempt ran, but none met the selection bar. Retrying with a larger
  /// grid, more attempts or relaxed thresholds may succeed.
  SearchExhausted { attempts: usize, best_placed: usize },
  Internal(String),
}

impl GenerateError {
  /// Configuration errors are raised before any attempt runs.
  pub fn is_configuration_error(&self) -> bool {
    matches!(
      self,
      GenerateError::NoThemedWords
        | GenerateError::GridTooSmall { .. }
        | GenerateError::InvalidConfig(_)
    )
  }
}

impl Display for GenerateError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      GenerateError::NoThemedWords => write!(f, "No themed words available to seed the grid"),
      GenerateError::GridTooSmall { height, width } => {
        write!(f, "No themed word fits in a {height}x{width} grid")
      }
      GenerateError::InvalidConfig(msg) => write!(f, "Invalid configuration: {msg}"),
      GenerateError::SearchExhausted { attempts, best_placed } => write!(
        f,
        "None of {attempts} attempts produced an acceptable grid (best placed {best_placed} words)"
      ),
      GenerateError::Internal(msg) => write!(f, "Internal error: {msg}"),
    }
  }
}

impl Error for GenerateError {}

use crate::error::GenerateError;

/// Upper bound on the bounding box of every placed cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridSize {
  pub height: u32,
  pub width: u32,
}

impl GridSize {
  pub const fn new(height: u32, width: u32) -> Self {
    Self { height, width }
  }

  /// Longest word that fits in at least one direction.
  pub fn max_word_len(&self) -> usize {
    self.height.max(self.width) as usize
  }
}

#[derive(Clone, Debug)]
pub struct GeneratorConfig {
  pub max_size: GridSize,
  pub num_attempts: usize,
  /// Fraction of the bounding box that must be filled before slot filling
  /// stops early.
  pub target_density: f32,
  /// Master seed. Each attempt derives its own generator from this and its
  /// index, so a fixed seed reproduces every attempt.
  pub seed: Option<u64>,
  /// Attempts placing fewer words than this are never selected.
  pub min_placed_words: usize,
  /// If set, attempts whose themed share of placed words is below this are
  /// discarded before ranking.
  pub min_themed_ratio: Option<f32>,
  /// Stop waiting on outstanding attempts once one acceptable attempt places
  /// at least this many words.
  pub stop_at_words: Option<usize>,
  pub parallel: bool,
}

impl Default for GeneratorConfig {
  fn default() -> Self {
    Self {
      max_size: GridSize::new(20, 15),
      num_attempts: 8,
      target_density: 0.7,
      seed: None,
      min_placed_words: 2,
      min_themed_ratio: None,
      stop_at_words: None,
      parallel: true,
    }
  }
}

impl GeneratorConfig {
  pub fn validate(&self) -> Result<(), GenerateError> {
    if self.max_size.height == 0 || self.max_size.width == 0 {
      return Err(GenerateError::InvalidConfig(format!(
        "Grid size must be non-empty, got {}x{}",
        self.max_size.height, self.max_size.width
      )));
    }
    if self.num_attempts == 0 {
      return Err(GenerateError::InvalidConfig(
        "At least one attempt is required".to_owned(),
      ));
    }
    if !(self.target_density > 0. && self.target_density <= 1.) {
      return Err(GenerateError::InvalidConfig(format!(
        "Target density must be in (0, 1], got {}",
        self.target_density
      )));
    }
    if let Some(ratio) = self.min_themed_ratio {
      if !(0. ..=1.).contains(&ratio) {
        return Err(GenerateError::InvalidConfig(format!(
          "Themed ratio must be in [0, 1], got {ratio}"
        )));
      }
    }
    Ok(())
  }
}

use std::path::PathBuf;

use clap::Parser;
use xword_gen::{GeneratorConfig, GridSize};

#[derive(Parser, Debug)]
#[command(version, about = "Builds a themed crossword from word banks", long_about = None)]
pub struct Args {
  /// Themed word bank, as a JSON list of {word, clue} objects or one word per
  /// line. May be given more than once.
  #[arg(short, long = "themed", required = true)]
  pub themed: Vec<PathBuf>,

  /// Word bank used to fill in around the themed words.
  #[arg(short, long)]
  pub common: Option<PathBuf>,

  #[arg(long, default_value_t = 20)]
  pub height: u32,

  #[arg(long, default_value_t = 15)]
  pub width: u32,

  #[arg(short, long, default_value_t = 8)]
  pub attempts: usize,

  /// Fraction of the bounding box to fill before an attempt stops.
  #[arg(long, default_value_t = 0.7)]
  pub density: f32,

  #[arg(long)]
  pub seed: Option<u64>,

  /// Grids with fewer words than this are rejected.
  #[arg(long, default_value_t = 2)]
  pub min_words: usize,

  #[arg(long)]
  pub min_themed_ratio: Option<f32>,

  /// Stop as soon as any attempt places this many words.
  #[arg(long)]
  pub stop_at: Option<usize>,

  #[arg(long)]
  pub sequential: bool,

  #[arg(short, long, default_value = ".")]
  pub out_dir: PathBuf,

  #[arg(short, long, default_value = "crossword")]
  pub basename: String,

  /// JSON list of themed words used by earlier puzzles.
  #[arg(long)]
  pub used_themed: Option<PathBuf>,

  #[arg(long)]
  pub used_common: Option<PathBuf>,

  /// Add the placed words to the used-word files.
  #[arg(long)]
  pub record_used: bool,

  #[arg(short, long)]
  pub verbose: bool,
}

impl Args {
  pub fn generator_config(&self) -> GeneratorConfig {
    GeneratorConfig {
      max_size: GridSize::new(self.height, self.width),
      num_attempts: self.attempts,
      target_density: self.density,
      seed: self.seed,
      min_placed_words: self.min_words,
      min_themed_ratio: self.min_themed_ratio,
      stop_at_words: self.stop_at,
      parallel: !self.sequential,
    }
  }
}

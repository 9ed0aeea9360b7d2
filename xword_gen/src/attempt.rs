use std::{
  collections::HashSet,
  sync::atomic::{AtomicBool, Ordering},
};

use log::debug;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use util::pos::Pos;

use crate::{
  config::GeneratorConfig,
  placement::{evaluate, Candidate},
  slot_fill::SlotFiller,
  sparse_grid::SparseGrid,
  word::{Direction, PlacedWord, Placement},
  word_pool::WordPool,
};

/// Everything needed to run one attempt, independent of every other attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttemptSpec {
  pub index: usize,
  pub seed_word: String,
  pub rng_seed: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttemptState {
  Seeded,
  Placing,
  SlotFilling,
  Done,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttemptResult {
  pub index: usize,
  pub seed_word: String,
  /// Placed words in placement order, seed first.
  pub placed: Vec<PlacedWord>,
}

impl AttemptResult {
  pub fn placed_count(&self) -> usize {
    self.placed.len()
  }

  pub fn themed_count(&self) -> usize {
    self.placed.iter().filter(|placed| placed.themed).count()
  }

  pub fn themed_ratio(&self) -> f32 {
    if self.placed.is_empty() {
      0.
    } else {
      self.themed_count() as f32 / self.placed_count() as f32
    }
  }
}

pub struct Attempt<'a> {
  index: usize,
  seed_word: &'a str,
  pool: &'a WordPool,
  config: &'a GeneratorConfig,
  stop: Option<&'a AtomicBool>,
  order: Vec<&'a str>,
  grid: SparseGrid,
  placed: Vec<PlacedWord>,
  used: HashSet<&'a str>,
  greedy_count: usize,
  state: AttemptState,
}

impl<'a> Attempt<'a> {
  /// Shuffles this attempt's word order and writes the seed word across at
  /// the origin.
  pub fn new(pool: &'a WordPool, config: &'a GeneratorConfig, spec: &'a AttemptSpec) -> Self {
    let mut rng = StdRng::seed_from_u64(spec.rng_seed);
    let mut order: Vec<_> = pool
      .fill_list()
      .iter()
      .map(String::as_str)
      .filter(|&word| word != spec.seed_word)
      .collect();
    order.shuffle(&mut rng);

    let mut attempt = Self {
      index: spec.index,
      seed_word: &spec.seed_word,
      pool,
      config,
      stop: None,
      order,
      grid: SparseGrid::new(),
      placed: Vec::new(),
      used: HashSet::new(),
      greedy_count: 0,
      state: AttemptState::Seeded,
    };

    let seed = Placement::new(Pos::zero(), Direction::Across);
    let themed = pool.is_themed(&spec.seed_word);
    match evaluate(&attempt.grid, &spec.seed_word, seed, config.max_size, themed) {
      Some(candidate) => attempt.commit(&spec.seed_word, candidate),
      None => attempt.state = AttemptState::Done,
    }
    attempt
  }

  /// Makes the attempt finish early once `stop` is raised. Stopping only cuts
  /// the search short; the grid built so far is still consistent.
  pub fn with_stop_flag(mut self, stop: &'a AtomicBool) -> Self {
    self.stop = Some(stop);
    self
  }

  pub fn state(&self) -> AttemptState {
    self.state
  }

  pub fn grid(&self) -> &SparseGrid {
    &self.grid
  }

  fn stopped(&self) -> bool {
    self.stop.is_some_and(|stop| stop.load(Ordering::Relaxed))
  }

  fn commit(&mut self, word: &'a str, candidate: Candidate) {
    self.grid.place(word, candidate.placement);
    self.placed.push(PlacedWord {
      word: word.to_owned(),
      placement: candidate.placement,
      themed: self.pool.is_themed(word),
    });
    self.used.insert(word);
  }

  /// Highest scoring legal placement of `word` crossing any letter on the grid.
  fn best_candidate(&self, word: &str) -> Option<Candidate> {
    let themed = self.pool.is_themed(word);
    self
      .placed
      .iter()
      .flat_map(|anchor| {
        let direction = anchor.placement.direction.perpendicular();
        anchor
          .letter_positions()
          .map(move |(letter, pos)| (direction, letter, pos))
      })
      .flat_map(move |(direction, letter, pos)| {
        word
          .chars()
          .enumerate()
          .filter(move |&(_, c)| c == letter)
          .map(move |(idx, _)| Placement::new(pos - direction.step() * idx as i32, direction))
      })
      .filter_map(|placement| evaluate(&self.grid, word, placement, self.config.max_size, themed))
      .fold(None, Candidate::better_of)
  }

  fn place_greedily(&mut self) {
    for word in self.order.clone() {
      if self.stopped() {
        break;
      }
      if self.used.contains(word) {
        continue;
      }
      if let Some(candidate) = self.best_candidate(word) {
        self.commit(word, candidate);
        self.greedy_count += 1;
      }
    }
  }

  fn fill_slots(&mut self) {
    let filler = SlotFiller::new(self.order.iter().copied());
    while !self.stopped() && self.grid.density() < self.config.target_density {
      let next = filler.next_fill(
        &self.grid,
        self.config.max_size,
        |word| self.used.contains(word),
        |word| self.pool.is_themed(word),
      );
      match next {
        Some((word, candidate)) => self.commit(word, candidate),
        None => break,
      }
    }
  }

  /// Runs the current phase and returns the next state.
  pub fn step(&mut self) -> AttemptState {
    self.state = match self.state {
      AttemptState::Seeded => AttemptState::Placing,
      AttemptState::Placing => {
        self.place_greedily();
        AttemptState::SlotFilling
      }
      AttemptState::SlotFilling => {
        self.fill_slots();
        AttemptState::Done
      }
      AttemptState::Done => AttemptState::Done,
    };
    self.state
  }

  pub fn run(mut self) -> AttemptResult {
    while self.step() != AttemptState::Done {}

    debug!(
      "Attempt {} ({}): placed {} words, {} greedily and {} by slot filling, density {:.2}",
      self.index,
      self.seed_word,
      self.placed.len(),
      self.greedy_count,
      self.placed.len().saturating_sub(self.greedy_count + 1),
      self.grid.density()
    );

    AttemptResult {
      index: self.index,
      seed_word: self.seed_word.to_owned(),
      placed: self.placed,
    }
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

  use std::{
    collections::{HashMap, HashSet},
    sync::atomic::AtomicBool,
  };

  use googletest::prelude::*;
  use rand::{rngs::StdRng, SeedableRng};
  use util::pos::Pos;

  use crate::{
    config::{GeneratorConfig, GridSize},
    word::{Direction, Placement},
    word_pool::WordPool,
  };

  use super::{Attempt, AttemptResult, AttemptSpec, AttemptState};

  const THEMED: [&str; 8] = [
    "ocean", "river", "island", "harbor", "anchor", "sailor", "coral", "tide",
  ];
  const COMMON: [&str; 10] = [
    "cat", "dog", "tree", "stone", "rain", "salt", "boat", "net", "car", "ant",
  ];

  fn pool(config: &GeneratorConfig) -> WordPool {
    WordPool::prepare(THEMED, COMMON, config.max_size, &mut StdRng::seed_from_u64(1)).unwrap()
  }

  fn spec(seed_word: &str, rng_seed: u64) -> AttemptSpec {
    AttemptSpec { index: 0, seed_word: seed_word.to_owned(), rng_seed }
  }

  /// Every letter position of every placed word, failing on conflicts.
  fn letters(result: &AttemptResult) -> HashMap<Pos, char> {
    let mut letters = HashMap::new();
    for placed in &result.placed {
      for (letter, pos) in placed.letter_positions() {
        let existing = *letters.entry(pos).or_insert(letter);
        assert_eq!(existing, letter, "conflict at {pos}");
      }
    }
    letters
  }

  #[gtest]
  fn test_seed_at_origin() {
    let config = GeneratorConfig::default();
    let pool = pool(&config);
    let spec = spec("OCEAN", 3);
    let attempt = Attempt::new(&pool, &config, &spec);
    expect_that!(attempt.state(), eq(AttemptState::Seeded));
    expect_that!(attempt.grid().occupied_count(), eq(5));

    let result = attempt.run();
    expect_that!(result.placed[0].word, eq("OCEAN"));
    expect_that!(result.placed[0].placement, eq(Placement::new(Pos::zero(), Direction::Across)));
    expect_true!(result.placed[0].themed);
  }

  #[gtest]
  fn test_state_machine() {
    let config = GeneratorConfig::default();
    let pool = pool(&config);
    let spec = spec("ISLAND", 5);
    let mut attempt = Attempt::new(&pool, &config, &spec);
    expect_that!(attempt.step(), eq(AttemptState::Placing));
    expect_that!(attempt.step(), eq(AttemptState::SlotFilling));
    expect_that!(attempt.step(), eq(AttemptState::Done));
    expect_that!(attempt.step(), eq(AttemptState::Done));
  }

  #[gtest]
  fn test_places_consistent_words() {
    let config = GeneratorConfig::default();
    let pool = pool(&config);
    let spec = spec("HARBOR", 11);
    let result = Attempt::new(&pool, &config, &spec).run();

    expect_that!(result.placed_count(), gt(1));
    let letters = letters(&result);

    let words: HashSet<_> = result.placed.iter().map(|placed| placed.word.as_str()).collect();
    expect_that!(words.len(), eq(result.placed_count()));

    let xs = letters.keys().map(|pos| pos.x);
    let ys = letters.keys().map(|pos| pos.y);
    let width = xs.clone().max().unwrap() - xs.min().unwrap() + 1;
    let height = ys.clone().max().unwrap() - ys.min().unwrap() + 1;
    expect_that!(width as u32, le(config.max_size.width));
    expect_that!(height as u32, le(config.max_size.height));

    for placed in &result.placed {
      expect_that!(placed.len(), ge(3));
      let step = placed.placement.direction.step();
      expect_false!(letters.contains_key(&(placed.placement.pos - step)));
      expect_false!(letters.contains_key(&(placed.placement.pos + step * placed.len() as i32)));
    }
  }

  #[gtest]
  fn test_deterministic() {
    let config = GeneratorConfig::default();
    let pool = pool(&config);
    let spec = spec("ANCHOR", 42);
    let first = Attempt::new(&pool, &config, &spec).run();
    let second = Attempt::new(&pool, &config, &spec).run();
    expect_that!(first, eq(&second));
  }

  #[gtest]
  fn test_stop_flag() {
    let config = GeneratorConfig::default();
    let pool = pool(&config);
    let spec = spec("SAILOR", 9);
    let stop = AtomicBool::new(true);
    let result = Attempt::new(&pool, &config, &spec).with_stop_flag(&stop).run();
    expect_that!(result.placed_count(), eq(1));
  }

  /// OCEAN seeds the grid, CUT can only cross its C, and TRY can only cross
  /// the T of CUT. Whenever TRY is tried before CUT, only the slot filler can
  /// place it.
  fn slot_pool() -> WordPool {
    WordPool::prepare(["ocean"], ["cut", "try"], GridSize::new(10, 10), &mut StdRng::seed_from_u64(1))
      .unwrap()
  }

  #[gtest]
  fn test_dense_grid_skips_slot_filling() {
    let config = GeneratorConfig { target_density: 0.05, ..Default::default() };
    let pool = slot_pool();
    for rng_seed in 0..32 {
      let spec = spec("OCEAN", rng_seed);
      let mut attempt = Attempt::new(&pool, &config, &spec);
      expect_that!(attempt.step(), eq(AttemptState::Placing));
      expect_that!(attempt.step(), eq(AttemptState::SlotFilling));
      let greedy_cells = attempt.grid().occupied_count();

      expect_that!(attempt.step(), eq(AttemptState::Done));
      expect_that!(attempt.grid().occupied_count(), eq(greedy_cells), "rng seed {rng_seed}");
    }
  }

  #[gtest]
  fn test_slot_filling_places_skipped_word() {
    let full = GeneratorConfig { target_density: 1.0, ..Default::default() };
    let sparse = GeneratorConfig { target_density: 0.05, ..Default::default() };
    let pool = slot_pool();

    let mut filled_by_slots = 0;
    for rng_seed in 0..32 {
      let spec = spec("OCEAN", rng_seed);
      let result = Attempt::new(&pool, &full, &spec).run();
      expect_that!(result.placed_count(), eq(3), "rng seed {rng_seed}");
      let tried = result.placed.iter().find(|placed| placed.word == "TRY");
      expect_that!(
        tried.map(|placed| placed.placement),
        some(eq(Placement::new(Pos { x: 1, y: 2 }, Direction::Across)))
      );

      if Attempt::new(&pool, &sparse, &spec).run().placed_count() == 2 {
        filled_by_slots += 1;
      }
    }
    expect_that!(filled_by_slots, gt(0));
  }

  #[gtest]
  fn test_seed_too_long() {
    let config = GeneratorConfig { max_size: GridSize::new(10, 4), ..Default::default() };
    let pool = WordPool::prepare(["tide", "ocean"], COMMON, config.max_size, &mut StdRng::seed_from_u64(1))
      .unwrap();
    let spec = spec("OCEAN", 1);
    let attempt = Attempt::new(&pool, &config, &spec);
    expect_that!(attempt.state(), eq(AttemptState::Done));
    expect_that!(attempt.run().placed_count(), eq(0));
  }
}

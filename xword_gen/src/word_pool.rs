use std::collections::HashSet;

use itertools::Itertools;
use rand::{seq::SliceRandom, Rng};

use crate::{config::GridSize, error::GenerateError, word::word_len};

/// Words shorter than this are never placed.
pub const MIN_WORD_LEN: usize = 3;

/// The prepared vocabulary shared read-only by every attempt.
#[derive(Clone, Debug)]
pub struct WordPool {
  /// Themed words, longest first.
  themed: Vec<String>,
  /// Common words not also themed, longest first.
  common: Vec<String>,
  /// Themed and common words in a shuffled order.
  fill: Vec<String>,
  themed_set: HashSet<String>,
  /// Themed words short enough to be written across at the origin.
  seeds: Vec<String>,
}

impl WordPool {
  /// Uppercases `word` and drops everything that is not a letter.
  pub fn normalize(word: &str) -> String {
    word
      .chars()
      .filter(|c| c.is_alphabetic())
      .flat_map(char::to_uppercase)
      .collect()
  }

  fn prepare_list<S: AsRef<str>>(words: impl IntoIterator<Item = S>) -> Vec<String> {
    words
      .into_iter()
      .map(|word| Self::normalize(word.as_ref()))
      .filter(|word| word_len(word) >= MIN_WORD_LEN)
      .unique()
      .sorted_by(|a, b| word_len(b).cmp(&word_len(a)).then_with(|| a.cmp(b)))
      .collect()
  }

  pub fn prepare<S, T, R>(
    themed: impl IntoIterator<Item = S>,
    common: impl IntoIterator<Item = T>,
    max_size: GridSize,
    rng: &mut R,
  ) -> Result<Self, GenerateError>
  where
    S: AsRef<str>,
    T: AsRef<str>,
    R: Rng + ?Sized,
  {
    let max_len = max_size.max_word_len();
    let too_small = GenerateError::GridTooSmall {
      height: max_size.height,
      width: max_size.width,
    };

    let themed = Self::prepare_list(themed);
    if themed.is_empty() {
      return Err(GenerateError::NoThemedWords);
    }
    let themed: Vec<_> = themed
      .into_iter()
      .filter(|word| word_len(word) <= max_len)
      .collect();
    if themed.is_empty() {
      return Err(too_small);
    }

    let seeds: Vec<_> = themed
      .iter()
      .filter(|word| word_len(word) <= max_size.width as usize)
      .cloned()
      .collect();
    if seeds.is_empty() {
      return Err(too_small);
    }

    let themed_set: HashSet<_> = themed.iter().cloned().collect();
    let common: Vec<_> = Self::prepare_list(common)
      .into_iter()
      .filter(|word| word_len(word) <= max_len && !themed_set.contains(word))
      .collect();

    let mut fill: Vec<_> = themed.iter().chain(common.iter()).cloned().collect();
    fill.shuffle(rng);

    Ok(Self { themed, common, fill, themed_set, seeds })
  }

  pub fn themed(&self) -> &[String] {
    &self.themed
  }

  pub fn common(&self) -> &[String] {
    &self.common
  }

  pub fn fill_list(&self) -> &[String] {
    &self.fill
  }

  pub fn is_themed(&self, word: &str) -> bool {
    self.themed_set.contains(word)
  }

  /// Seed words for `count` attempts, longest first. When there are more
  /// attempts than seeds the list wraps around, so the extra attempts retry the
  /// longest seeds with different word orders.
  pub fn seeds(&self, count: usize) -> impl Iterator<Item = &str> {
    self.seeds.iter().map(String::as_str).cycle().take(count)
  }
}

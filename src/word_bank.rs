use std::{
  collections::HashMap,
  fs,
  path::{Path, PathBuf},
};

use log::debug;
use serde::Deserialize;
use util::error::{XWordError, XWordResult};
use xword_gen::word_pool::WordPool;

pub const MISSING_CLUE: &str = "(no clue)";

#[derive(Deserialize)]
struct Entry {
  word: String,
  #[serde(default)]
  clue: String,
}

/// Words read from one or more bank files, normalized the way the generator
/// normalizes them, with the clue for each.
#[derive(Clone, Debug, Default)]
pub struct WordBank {
  words: Vec<String>,
  clues: HashMap<String, String>,
}

impl WordBank {
  /// Parses either a JSON list of `{"word": .., "clue": ..}` objects or a
  /// plain list with one word per line, where blank lines and lines starting
  /// with `#` are skipped.
  pub fn parse(text: &str) -> XWordResult<Self> {
    let entries = if text.trim_start().starts_with('[') {
      serde_json::from_str::<Vec<Entry>>(text)
        .map_err(|err| XWordError::Parse(format!("Invalid word bank: {err}")))?
    } else {
      text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| Entry { word: line.to_owned(), clue: String::new() })
        .collect()
    };

    let mut bank = Self::default();
    for entry in entries {
      bank.insert(&entry.word, entry.clue);
    }
    Ok(bank)
  }

  pub fn load(path: &Path) -> XWordResult<Self> {
    let text = fs::read_to_string(path)
      .map_err(|err| XWordError::Io(format!("Failed to read {}: {err}", path.display())))?;
    let bank = Self::parse(&text)?;
    debug!("Loaded {} words from {}", bank.len(), path.display());
    Ok(bank)
  }

  pub fn load_all(paths: &[PathBuf]) -> XWordResult<Self> {
    paths.iter().try_fold(Self::default(), |mut bank, path| -> XWordResult<Self> {
      bank.merge(Self::load(path)?);
      Ok(bank)
    })
  }

  /// The first occurrence of a word keeps its position and its clue.
  fn insert(&mut self, word: &str, clue: String) {
    let word = WordPool::normalize(word);
    if word.is_empty() || self.clues.contains_key(&word) {
      return;
    }
    self.clues.insert(word.clone(), clue.trim().to_owned());
    self.words.push(word);
  }

  pub fn merge(&mut self, other: WordBank) {
    let WordBank { words, mut clues } = other;
    for word in words {
      let clue = clues.remove(&word).unwrap_or_default();
      self.insert(&word, clue);
    }
  }

  pub fn words(&self) -> &[String] {
    &self.words
  }

  pub fn len(&self) -> usize {
    self.words.len()
  }

  pub fn clue(&self, word: &str) -> Option<&str> {
    self
      .clues
      .get(word)
      .map(String::as_str)
      .filter(|clue| !clue.is_empty())
  }

  pub fn clue_or_placeholder(&self, word: &str) -> &str {
    self.clue(word).unwrap_or(MISSING_CLUE)
  }
}

use std::{collections::BTreeSet, fs, path::Path};

use log::debug;
use util::error::{XWordError, XWordResult};
use xword_gen::word_pool::WordPool;

/// Words already used by earlier puzzles, stored as a sorted JSON list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UsedWords {
  words: BTreeSet<String>,
}

impl UsedWords {
  /// A missing file is an empty history.
  pub fn load(path: &Path) -> XWordResult<Self> {
    if !path.exists() {
      debug!("No used-word file at {}", path.display());
      return Ok(Self::default());
    }

    let text = fs::read_to_string(path)?;
    let words: Vec<String> = serde_json::from_str(&text).map_err(|err| {
      XWordError::Parse(format!("Invalid used-word file {}: {err}", path.display()))
    })?;
    Ok(words.iter().map(|word| WordPool::normalize(word)).collect())
  }

  pub fn save(&self, path: &Path) -> XWordResult {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
      fs::create_dir_all(dir)?;
    }
    fs::write(path, serde_json::to_string_pretty(&self.words)?)?;
    Ok(())
  }

  pub fn contains(&self, word: &str) -> bool {
    self.words.contains(word)
  }

  /// The words of `words` not in the history, in their original order.
  pub fn unused<'a>(&self, words: &'a [String]) -> Vec<&'a str> {
    words
      .iter()
      .map(String::as_str)
      .filter(|word| !self.contains(word))
      .collect()
  }

  /// Adds `words`, returning how many were new.
  pub fn record<'a>(&mut self, words: impl IntoIterator<Item = &'a str>) -> usize {
    words
      .into_iter()
      .filter(|&word| self.words.insert(word.to_owned()))
      .count()
  }
}

impl FromIterator<String> for UsedWords {
  fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
    Self { words: iter.into_iter().filter(|word| !word.is_empty()).collect() }
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

  use std::{env, fs, path::PathBuf};

  use googletest::prelude::*;

  use super::UsedWords;

  fn scratch_file(name: &str) -> PathBuf {
    env::temp_dir()
      .join(format!("xword-maker-{}", std::process::id()))
      .join(name)
  }

  #[gtest]
  fn test_unused_keeps_order() {
    let used: UsedWords = ["RIVER".to_owned()].into_iter().collect();
    let words = ["OCEAN".to_owned(), "RIVER".to_owned(), "CORAL".to_owned()];
    expect_that!(used.unused(&words), container_eq(["OCEAN", "CORAL"]));
  }

  #[gtest]
  fn test_record_counts_new() {
    let mut used = UsedWords::default();
    expect_that!(used.record(["OCEAN", "RIVER"]), eq(2));
    expect_that!(used.record(["RIVER", "CORAL"]), eq(1));
    expect_true!(used.contains("CORAL"));
    expect_that!(
      used,
      eq(&["CORAL", "OCEAN", "RIVER"].into_iter().map(str::to_owned).collect::<UsedWords>())
    );
  }

  #[gtest]
  fn test_missing_file_is_empty() {
    let used = UsedWords::load(&scratch_file("does_not_exist.json")).unwrap();
    expect_that!(used, eq(&UsedWords::default()));
  }

  #[gtest]
  fn test_save_and_load() {
    let path = scratch_file("used_themed.json");
    let mut used = UsedWords::default();
    used.record(["RIVER", "OCEAN"]);
    used.save(&path).unwrap();

    expect_that!(
      fs::read_to_string(&path).unwrap(),
      eq("[\n  \"OCEAN\",\n  \"RIVER\"\n]")
    );
    expect_that!(UsedWords::load(&path).unwrap(), eq(&used));
    fs::remove_file(&path).unwrap();
  }

  #[gtest]
  fn test_load_normalizes() {
    let path = scratch_file("used_common.json");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, r#"["sea-horse", "cat"]"#).unwrap();

    let used = UsedWords::load(&path).unwrap();
    expect_true!(used.contains("SEAHORSE"));
    expect_true!(used.contains("CAT"));
    fs::remove_file(&path).unwrap();
  }
}

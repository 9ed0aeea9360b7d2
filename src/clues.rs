use itertools::Itertools;
use xword_gen::{Crossword, Direction};

use crate::word_bank::WordBank;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Clue {
  pub number: usize,
  pub direction: Direction,
  pub word: String,
  pub text: String,
}

/// Numbers every placed word by its first cell in reading order. Each word
/// gets its own number, across before down when two words share a start.
pub fn number_clues(crossword: &Crossword, bank: &WordBank) -> Vec<Clue> {
  crossword
    .placements()
    .iter()
    .sorted_by_key(|placed| {
      (placed.placement.pos.reading_order(), placed.placement.direction)
    })
    .enumerate()
    .map(|(idx, placed)| Clue {
      number: idx + 1,
      direction: placed.placement.direction,
      word: placed.word.clone(),
      text: bank.clue_or_placeholder(&placed.word).to_owned(),
    })
    .collect()
}

/// An ACROSS section then a DOWN section of `N. clue` lines.
pub fn clue_list(clues: &[Clue]) -> String {
  Direction::ALL
    .iter()
    .map(|&direction| {
      let lines = clues
        .iter()
        .filter(|clue| clue.direction == direction)
        .map(|clue| format!("{}. {}\n", clue.number, clue.text))
        .join("");
      format!("{direction}\n{lines}")
    })
    .join("\n")
}

use std::fmt::Display;

use bitcode::{Decode, Encode};
use util::pos::{Diff, Pos};

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Encode, Decode)]
pub enum Direction {
  /// Row fixed, column increasing.
  Across,
  /// Column fixed, row increasing.
  Down,
}

impl Direction {
  pub const ALL: [Direction; 2] = [Direction::Across, Direction::Down];

  pub const fn step(self) -> Diff {
    match self {
      Direction::Across => Diff::DX,
      Direction::Down => Diff::DY,
    }
  }

  pub const fn perpendicular(self) -> Self {
    match self {
      Direction::Across => Direction::Down,
      Direction::Down => Direction::Across,
    }
  }
}

impl Display for Direction {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "{}",
      match self {
        Direction::Across => "ACROSS",
        Direction::Down => "DOWN",
      }
    )
  }
}

/// Origin and direction of a word on the grid.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Encode, Decode)]
pub struct Placement {
  pub pos: Pos,
  pub direction: Direction,
}

impl Placement {
  pub const fn new(pos: Pos, direction: Direction) -> Self {
    Self { pos, direction }
  }

  /// The `idx`-th cell along this placement.
  pub fn cell(&self, idx: usize) -> Pos {
    self.pos + self.direction.step() * idx as i32
  }

  pub fn cells(self, len: usize) -> impl Iterator<Item = Pos> {
    (0..len).map(move |idx| self.cell(idx))
  }

  pub fn letter_positions(self, word: &str) -> impl Iterator<Item = (char, Pos)> + '_ {
    word
      .chars()
      .enumerate()
      .map(move |(idx, c)| (c, self.cell(idx)))
  }

  /// The cell just before the first letter.
  pub fn before(&self) -> Pos {
    self.pos - self.direction.step()
  }

  /// The cell just after the last letter of a word of length `len`.
  pub fn after(&self, len: usize) -> Pos {
    self.cell(len)
  }

  pub fn translated(&self, diff: Diff) -> Self {
    Self { pos: self.pos + diff, ..*self }
  }
}

impl Display for Placement {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{} {}", self.pos, self.direction)
  }
}

/// Number of letters in a normalized word.
pub fn word_len(word: &str) -> usize {
  word.chars().count()
}

#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
pub struct PlacedWord {
  pub word: String,
  pub placement: Placement,
  pub themed: bool,
}

impl PlacedWord {
  pub fn len(&self) -> usize {
    word_len(&self.word)
  }

  pub fn is_empty(&self) -> bool {
    self.word.is_empty()
  }

  pub fn cells(&self) -> impl Iterator<Item = Pos> {
    self.placement.cells(self.len())
  }

  pub fn letter_positions(&self) -> impl Iterator<Item = (char, Pos)> + '_ {
    self.placement.letter_positions(&self.word)
  }
}

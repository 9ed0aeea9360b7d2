use std::collections::HashMap;

use util::pos::Pos;

use crate::word::{Direction, Placement};

/// An occupied cell, remembering which directions have a word running through
/// it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
  pub letter: char,
  across: bool,
  down: bool,
}

impl Cell {
  pub fn owned_by(&self, direction: Direction) -> bool {
    match direction {
      Direction::Across => self.across,
      Direction::Down => self.down,
    }
  }

  fn claim(&mut self, direction: Direction) {
    match direction {
      Direction::Across => self.across = true,
      Direction::Down => self.down = true,
    }
  }
}

/// Inclusive rectangle of cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
  pub min: Pos,
  pub max: Pos,
}

impl Bounds {
  pub fn of_span(placement: Placement, len: usize) -> Self {
    let end = placement.cell(len.saturating_sub(1));
    Self { min: placement.pos, max: end }
  }

  pub fn union(self, other: Self) -> Self {
    Self {
      min: Pos {
        x: self.min.x.min(other.min.x),
        y: self.min.y.min(other.min.y),
      },
      max: Pos {
        x: self.max.x.max(other.max.x),
        y: self.max.y.max(other.max.y),
      },
    }
  }

  pub fn expanded(self, margin: i32) -> Self {
    Self {
      min: Pos { x: self.min.x - margin, y: self.min.y - margin },
      max: Pos { x: self.max.x + margin, y: self.max.y + margin },
    }
  }

  pub fn width(&self) -> u32 {
    (self.max.x - self.min.x + 1) as u32
  }

  pub fn height(&self) -> u32 {
    (self.max.y - self.min.y + 1) as u32
  }

  pub fn area(&self) -> u32 {
    self.width() * self.height()
  }
}

/// Working grid of one attempt. Only occupied cells are stored, so words may
/// grow in any direction from the seed, including into negative coordinates.
#[derive(Clone, Debug, Default)]
pub struct SparseGrid {
  cells: HashMap<Pos, Cell>,
  bounds: Option<Bounds>,
}

impl SparseGrid {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn get(&self, pos: Pos) -> Option<&Cell> {
    self.cells.get(&pos)
  }

  pub fn letter(&self, pos: Pos) -> Option<char> {
    self.get(pos).map(|cell| cell.letter)
  }

  pub fn is_occupied(&self, pos: Pos) -> bool {
    self.cells.contains_key(&pos)
  }

  pub fn bounds(&self) -> Option<Bounds> {
    self.bounds
  }

  pub fn occupied_count(&self) -> usize {
    self.cells.len()
  }

  /// Fraction of the bounding box that is occupied.
  pub fn density(&self) -> f32 {
    self
      .bounds
      .map(|bounds| self.cells.len() as f32 / bounds.area() as f32)
      .unwrap_or(0.)
  }

  /// Writes `word` at `placement`. The caller must have validated the
  /// placement; existing cells are only claimed, never overwritten.
  pub fn place(&mut self, word: &str, placement: Placement) {
    let mut len = 0;
    for (letter, pos) in placement.letter_positions(word) {
      let cell = self
        .cells
        .entry(pos)
        .or_insert(Cell { letter, across: false, down: false });
      debug_assert_eq!(cell.letter, letter, "conflicting letter at {pos}");
      cell.claim(placement.direction);
      len += 1;
    }

    let span = Bounds::of_span(placement, len);
    self.bounds = Some(self.bounds.map_or(span, |bounds| bounds.union(span)));
  }
}

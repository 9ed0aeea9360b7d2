//! Post-pass filling leftover space once greedy placement stalls.
//!
//! A slot is a maximal run of open cells along a row (for across words) or a
//! column (for down words) inside the bounding box plus a one-cell margin. A
//! cell is open when a word running that way could cover it: it is either
//! empty with nothing beside it, or it holds a letter that belongs only to a
//! word running the other way. Slots must contain at least one existing
//! letter so that whatever fills them crosses the rest of the grid.

use std::collections::BTreeMap;

use itertools::Itertools;
use util::pos::Pos;

use crate::{
  config::GridSize,
  placement::{evaluate, Candidate},
  sparse_grid::SparseGrid,
  word::{word_len, Direction, Placement},
  word_pool::MIN_WORD_LEN,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slot {
  pub placement: Placement,
  pub len: usize,
}

fn is_open(grid: &SparseGrid, pos: Pos, direction: Direction) -> bool {
  match grid.get(pos) {
    Some(cell) => !cell.owned_by(direction),
    None => {
      let side = direction.perpendicular().step();
      !grid.is_occupied(pos + side) && !grid.is_occupied(pos - side)
    }
  }
}

fn line_slots(grid: &SparseGrid, start: Pos, direction: Direction, count: u32) -> Vec<Slot> {
  let step = direction.step();
  let runs = (0..count as i32)
    .map(|idx| start + step * idx)
    .chunk_by(|&pos| is_open(grid, pos, direction));

  let slots = runs
    .into_iter()
    .filter_map(|(open, run)| open.then(|| run.collect::<Vec<_>>()))
    .filter(|run| {
      run.len() >= MIN_WORD_LEN
        && run.iter().any(|&pos| grid.is_occupied(pos))
        && run.iter().any(|&pos| !grid.is_occupied(pos))
    })
    .filter_map(|run| {
      run
        .first()
        .map(|&first| Slot { placement: Placement::new(first, direction), len: run.len() })
    })
    .collect();
  slots
}

/// Every slot of the grid: rows top to bottom, then columns left to right.
pub fn find_slots(grid: &SparseGrid) -> Vec<Slot> {
  let Some(bounds) = grid.bounds() else {
    return Vec::new();
  };
  let window = bounds.expanded(1);

  let rows = (window.min.y..=window.max.y).flat_map(|y| {
    line_slots(grid, Pos { x: window.min.x, y }, Direction::Across, window.width())
  });
  let cols = (window.min.x..=window.max.x).flat_map(|x| {
    line_slots(grid, Pos { x, y: window.min.y }, Direction::Down, window.height())
  });
  rows.chain(cols).collect()
}

fn fits_pattern(word: &str, pattern: &[Option<char>]) -> bool {
  word
    .chars()
    .zip(pattern)
    .all(|(letter, fixed)| fixed.is_none_or(|fixed| fixed == letter))
}

/// Fill candidates grouped by length, in the attempt's word order.
pub struct SlotFiller<'w> {
  by_len: BTreeMap<usize, Vec<&'w str>>,
}

impl<'w> SlotFiller<'w> {
  pub fn new(words: impl IntoIterator<Item = &'w str>) -> Self {
    let by_len = words.into_iter().fold(BTreeMap::<_, Vec<_>>::new(), |mut by_len, word| {
      by_len.entry(word_len(word)).or_default().push(word);
      by_len
    });
    Self { by_len }
  }

  /// Best word for a stretch of `slot`, trying every sub-span that covers at
  /// least one existing letter. A word must match the letters already fixed in
  /// the stretch it covers, exactly.
  fn best_in_slot<U, T>(
    &self,
    grid: &SparseGrid,
    slot: Slot,
    max_size: GridSize,
    is_used: &U,
    is_themed: &T,
  ) -> Option<(&'w str, Candidate)>
  where
    U: Fn(&str) -> bool,
    T: Fn(&str) -> bool,
  {
    let pattern: Vec<_> = slot.placement.cells(slot.len).map(|pos| grid.letter(pos)).collect();

    let mut best: Option<(&'w str, Candidate)> = None;
    for start in 0..slot.len {
      for len in MIN_WORD_LEN..=slot.len - start {
        let window = &pattern[start..start + len];
        if window.iter().all(Option::is_none) || window.iter().all(Option::is_some) {
          continue;
        }

        let placement = Placement::new(slot.placement.cell(start), slot.placement.direction);
        for &word in self.by_len.get(&len).into_iter().flatten() {
          if is_used(word) || !fits_pattern(word, window) {
            continue;
          }
          if let Some(candidate) = evaluate(grid, word, placement, max_size, is_themed(word)) {
            if best.is_none_or(|(_, best)| candidate.score > best.score) {
              best = Some((word, candidate));
            }
          }
        }
      }
    }
    best
  }

  /// The next word to write, taken from the first slot that can hold one.
  pub fn next_fill<U, T>(
    &self,
    grid: &SparseGrid,
    max_size: GridSize,
    is_used: U,
    is_themed: T,
  ) -> Option<(&'w str, Candidate)>
  where
    U: Fn(&str) -> bool,
    T: Fn(&str) -> bool,
  {
    find_slots(grid)
      .into_iter()
      .find_map(|slot| self.best_in_slot(grid, slot, max_size, &is_used, &is_themed))
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

  use googletest::prelude::*;
  use util::pos::Pos;

  use crate::{
    config::GridSize,
    sparse_grid::SparseGrid,
    word::{Direction, Placement},
  };

  use super::{find_slots, Slot, SlotFiller};

  const SIZE: GridSize = GridSize::new(10, 10);

  fn at(x: i32, y: i32, direction: Direction) -> Placement {
    Placement::new(Pos { x, y }, direction)
  }

  /// OCEAN across with COD and ANT hanging down from its C and A:
  ///
  /// ```text
  /// O C E A N
  /// . O . N .
  /// . D . T .
  /// ```
  fn comb() -> SparseGrid {
    let mut grid = SparseGrid::new();
    grid.place("OCEAN", at(0, 0, Direction::Across));
    grid.place("COD", at(1, 0, Direction::Down));
    grid.place("ANT", at(3, 0, Direction::Down));
    grid
  }

  #[gtest]
  fn test_find_slots() {
    let grid = comb();
    expect_that!(
      find_slots(&grid),
      container_eq([Slot { placement: at(-1, 2, Direction::Across), len: 7 }])
    );
  }

  #[gtest]
  fn test_no_slots_on_empty_grid() {
    expect_that!(find_slots(&SparseGrid::new()), is_empty());
  }

  #[gtest]
  fn test_fills_matching_word() {
    let grid = comb();
    let filler = SlotFiller::new(["CAT", "TOAD", "DOT"]);
    let fill = filler.next_fill(&grid, SIZE, |_| false, |_| false);
    assert_that!(fill, some(anything()));
    let (word, candidate) = fill.unwrap();
    expect_that!(word, eq("DOT"));
    expect_that!(candidate.placement, eq(at(1, 2, Direction::Across)));
    expect_that!(candidate.fit.intersections, eq(2));
  }

  #[gtest]
  fn test_skips_used_words() {
    let grid = comb();
    let filler = SlotFiller::new(["DOT"]);
    expect_that!(filler.next_fill(&grid, SIZE, |word| word == "DOT", |_| false), none());
  }

  #[gtest]
  fn test_prefers_higher_score() {
    let grid = comb();
    // Both span D . T; the themed one wins.
    let filler = SlotFiller::new(["DOT", "DIT"]);
    let fill = filler.next_fill(&grid, SIZE, |_| false, |word| word == "DIT");
    expect_that!(fill.map(|(word, _)| word), some(eq("DIT")));
  }
}

use bitcode::{Decode, Encode};
use log::info;
use util::{
  error::{XWordError, XWordResult},
  grid::{Grid, Gridlike, MutGridlike},
  pos::{Diff, Pos},
};

use crate::{
  config::GridSize,
  error::GenerateError,
  sparse_grid::Bounds,
  word::{PlacedWord, Placement},
};

/// Blank cells kept around the words on each side, space permitting.
pub const MARGIN: u32 = 1;

/// A finished puzzle: a dense grid with `None` for blocked cells, and every
/// placed word in the grid's zero-based frame.
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
pub struct Crossword {
  grid: Grid<Option<char>>,
  placements: Vec<PlacedWord>,
}

impl Crossword {
  pub fn grid(&self) -> &Grid<Option<char>> {
    &self.grid
  }

  pub fn width(&self) -> u32 {
    self.grid.width()
  }

  pub fn height(&self) -> u32 {
    self.grid.height()
  }

  pub fn placements(&self) -> &[PlacedWord] {
    &self.placements
  }

  pub fn placement(&self, word: &str) -> Option<&PlacedWord> {
    self.placements.iter().find(|placed| placed.word == word)
  }

  pub fn themed_count(&self) -> usize {
    self.placements.iter().filter(|placed| placed.themed).count()
  }

  /// Reads `len` letters from the grid starting at `placement`, or `None` if
  /// any of those cells is blocked or out of bounds.
  pub fn read_word(&self, placement: Placement, len: usize) -> Option<String> {
    placement
      .cells(len)
      .map(|pos| self.grid.get(pos).copied().flatten())
      .collect()
  }

  pub fn occupied_cells(&self) -> usize {
    self.grid.iter().filter(|tile| tile.is_some()).count()
  }

  pub fn density(&self) -> f32 {
    let area = self.width() * self.height();
    if area == 0 {
      0.
    } else {
      self.occupied_cells() as f32 / area as f32
    }
  }

  /// Checks that replaying every placement against the grid spells its word.
  pub fn verify(&self) -> XWordResult {
    for placed in &self.placements {
      let found = self.read_word(placed.placement, placed.len());
      if found.as_deref() != Some(placed.word.as_str()) {
        return Err(
          XWordError::Internal(format!(
            "Word {} at {} reads back as {found:?}",
            placed.word, placed.placement
          ))
          .into(),
        );
      }
    }
    Ok(())
  }
}

fn margins(span: u32, max: u32) -> (u32, u32) {
  let spare = max.saturating_sub(span);
  let before = MARGIN.min(spare);
  let after = MARGIN.min(spare - before);
  (before, after)
}

/// Materializes `placed` into a dense grid just large enough to hold every
/// word plus the margin, shifting all coordinates so the top-left cell is the
/// origin. The margin never grows the grid past `max_size`.
pub fn finalize(placed: &[PlacedWord], max_size: GridSize) -> Result<Crossword, GenerateError> {
  let bounds = placed
    .iter()
    .map(|placed| Bounds::of_span(placed.placement, placed.len()))
    .reduce(Bounds::union)
    .ok_or_else(|| GenerateError::Internal("No words to finalize".to_owned()))?;

  let (left, right) = margins(bounds.width(), max_size.width);
  let (top, bottom) = margins(bounds.height(), max_size.height);
  let width = bounds.width() + left + right;
  let height = bounds.height() + top + bottom;
  let origin = bounds.min - Diff { x: left as i32, y: top as i32 };
  let shift = Pos::zero() - origin;

  let mut grid = Grid::new(width, height);
  let placements: Vec<_> = placed
    .iter()
    .map(|placed| PlacedWord { placement: placed.placement.translated(shift), ..placed.clone() })
    .collect();

  for placed in &placements {
    for (letter, pos) in placed.letter_positions() {
      let tile = grid
        .get_mut(pos)
        .ok_or_else(|| GenerateError::Internal(format!("Position {pos} is out of bounds")))?;
      match tile {
        Some(existing) if *existing != letter => {
          return Err(GenerateError::Internal(format!(
            "Conflicting letter assignment at position {pos}: {letter} vs {existing}"
          )));
        }
        _ => *tile = Some(letter),
      }
    }
  }

  info!("Finalized {} words into a {width}x{height} grid", placements.len());
  Ok(Crossword { grid, placements })
}

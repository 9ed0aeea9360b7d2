//! Legality check and scoring for a single candidate placement.

use crate::{
  config::GridSize,
  sparse_grid::{Bounds, SparseGrid},
  word::Placement,
};

/// Added to the score of every themed word.
pub const THEMED_BONUS: i32 = 10;
/// Each letter shared with an existing word is worth this much.
pub const INTERSECTION_WEIGHT: i32 = 2;
/// Subtracted when the candidate grows the bounding box.
pub const GROWTH_PENALTY: i32 = 3;

/// Facts about a legal placement, consumed by [`score`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fit {
  /// Letters that coincide with letters already on the grid.
  pub intersections: u32,
  /// Occupied cells one lane over (two steps away perpendicular to the
  /// word) from the word's new cells.
  pub adjacency: u32,
  /// Whether the candidate grows the bounding box.
  pub grows: bool,
}

/// A legal placement together with its score.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Candidate {
  pub placement: Placement,
  pub fit: Fit,
  pub score: i32,
}

impl Candidate {
  /// Keeps the first of equally scored candidates.
  pub fn better_of(best: Option<Self>, candidate: Self) -> Option<Self> {
    match best {
      Some(best) if best.score >= candidate.score => Some(best),
      _ => Some(candidate),
    }
  }
}

/// Returns `None` if `word` can't legally go at `placement`.
///
/// A placement is legal when:
/// - the bounding box stays within `max_size`,
/// - the cells just before and just after the word are empty,
/// - every occupied cell it covers already holds the same letter and belongs
///   only to a word running the other way,
/// - no new cell has an occupied neighbor across the word's direction,
/// - at least one cell is new.
pub fn check_placement(
  grid: &SparseGrid,
  word: &str,
  placement: Placement,
  max_size: GridSize,
) -> Option<Fit> {
  let len = word.chars().count();
  if len == 0 {
    return None;
  }

  let span = Bounds::of_span(placement, len);
  let bounds = grid.bounds().map_or(span, |bounds| bounds.union(span));
  if bounds.width() > max_size.width || bounds.height() > max_size.height {
    return None;
  }

  if grid.is_occupied(placement.before()) || grid.is_occupied(placement.after(len)) {
    return None;
  }

  let side = placement.direction.perpendicular().step();
  let mut intersections = 0;
  let mut adjacency = 0;
  for (letter, pos) in placement.letter_positions(word) {
    match grid.get(pos) {
      Some(cell) => {
        if cell.letter != letter || cell.owned_by(placement.direction) {
          return None;
        }
        intersections += 1;
      }
      None => {
        if grid.is_occupied(pos + side) || grid.is_occupied(pos - side) {
          return None;
        }
        adjacency += [pos + side * 2, pos - side * 2]
          .into_iter()
          .filter(|&lane| grid.is_occupied(lane))
          .count() as u32;
      }
    }
  }

  if intersections as usize == len {
    return None;
  }

  Some(Fit {
    intersections,
    adjacency,
    grows: grid.bounds().is_some_and(|old| old != bounds),
  })
}

/// Validates and scores `word` at `placement` in one step.
pub fn evaluate(
  grid: &SparseGrid,
  word: &str,
  placement: Placement,
  max_size: GridSize,
  themed: bool,
) -> Option<Candidate> {
  check_placement(grid, word, placement, max_size)
    .map(|fit| Candidate { placement, fit, score: score(&fit, themed) })
}

pub fn score(fit: &Fit, themed: bool) -> i32 {
  let thematic_bonus = if themed { THEMED_BONUS } else { 0 };
  let growth_penalty = if fit.grows { GROWTH_PENALTY } else { 0 };
  thematic_bonus + INTERSECTION_WEIGHT * fit.intersections as i32 + fit.adjacency as i32
    - growth_penalty
}

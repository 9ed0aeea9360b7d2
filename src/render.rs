use xword_gen::Crossword;

pub const BLOCKED: char = '.';
pub const BLANK: char = '_';

/// The filled-in grid, one row per line.
pub fn answer_grid(crossword: &Crossword) -> String {
  crossword
    .grid()
    .map(|tile| tile.unwrap_or(BLOCKED))
    .to_string()
}

/// The grid with every letter hidden.
pub fn exercise_grid(crossword: &Crossword) -> String {
  crossword
    .grid()
    .map(|tile| if tile.is_some() { BLANK } else { BLOCKED })
    .to_string()
}

pub fn stats(crossword: &Crossword) -> String {
  format!(
    "{} words ({} themed) in a {}x{} grid, {:.1}% filled",
    crossword.placements().len(),
    crossword.themed_count(),
    crossword.width(),
    crossword.height(),
    crossword.density() * 100.
  )
}

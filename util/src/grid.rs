use std::fmt::{Debug, Display};

use bitcode::{Decode, Encode};

use crate::pos::Pos;

pub trait Gridlike<T> {
  fn width(&self) -> u32;
  fn height(&self) -> u32;
  fn in_bounds(&self, pos: Pos) -> bool;

  fn get(&self, pos: Pos) -> Option<&T>;

  fn iter_row<'a, 'b>(&'a self, y: u32) -> impl Iterator<Item = &'b T>
  where
    'a: 'b,
    T: 'a;
}

pub trait MutGridlike<T>: Gridlike<T> {
  fn get_mut(&mut self, pos: Pos) -> Option<&mut T>;
}

#[derive(Clone, PartialEq, Eq, Encode, Decode)]
pub struct Grid<T> {
  grid: Vec<T>,
  width: u32,
  height: u32,
}

impl<T> Grid<T> {
  fn idx(&self, pos: Pos) -> usize {
    debug_assert!(self.in_bounds(pos));
    let x = pos.x as usize;
    let y = pos.y as usize;
    x + y * self.width as usize
  }

  pub fn iter(&self) -> impl Iterator<Item = &T> {
    self.grid.iter()
  }

  pub fn map<F, U>(&self, f: F) -> Grid<U>
  where
    F: FnMut(&T) -> U,
  {
    Grid {
      grid: self.grid.iter().map(f).collect(),
      width: self.width,
      height: self.height,
    }
  }
}

impl<T> Grid<T>
where
  T: Default,
{
  pub fn new(width: u32, height: u32) -> Self {
    Self {
      grid: (0..width * height).map(|_| T::default()).collect(),
      width,
      height,
    }
  }
}

impl<T> Gridlike<T> for Grid<T> {
  fn width(&self) -> u32 {
    self.width
  }

  fn height(&self) -> u32 {
    self.height
  }

  fn in_bounds(&self, pos: Pos) -> bool {
    pos.x >= 0 && pos.x < self.width() as i32 && pos.y >= 0 && pos.y < self.height() as i32
  }

  fn get(&self, pos: Pos) -> Option<&T> {
    self
      .in_bounds(pos)
      .then(|| self.grid.get(self.idx(pos)))
      .flatten()
  }

  fn iter_row<'a, 'b>(&'a self, y: u32) -> impl Iterator<Item = &'b T>
  where
    'a: 'b,
    T: 'a,
  {
    let y = y as i32;
    (0..self.width()).flat_map(move |x| self.get(Pos { x: x as i32, y }))
  }
}

impl<T> MutGridlike<T> for Grid<T> {
  fn get_mut(&mut self, pos: Pos) -> Option<&mut T> {
    self
      .in_bounds(pos)
      .then(|| {
        let index = self.idx(pos);
        self.grid.get_mut(index)
      })
      .flatten()
  }
}

impl<T: Debug> Debug for Grid<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    (0..self.height).try_fold((), |_, y| {
      self.iter_row(y).try_fold((), |_, t| write!(f, "{t:?} "))?;
      writeln!(f)
    })
  }
}

impl<T: Display> Display for Grid<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    (0..self.height).try_fold((), |_, y| {
      self.iter_row(y).try_fold((), |_, t| write!(f, "{t} "))?;
      writeln!(f)
    })
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

  use googletest::prelude::*;

  use crate::pos::Pos;

  use super::{Grid, Gridlike, MutGridlike};

  fn counting_grid() -> Grid<i32> {
    let mut grid = Grid::new(3, 2);
    for (value, x, y) in [(1, 0, 0), (2, 1, 0), (3, 2, 0), (4, 0, 1), (5, 1, 1), (6, 2, 1)] {
      *grid.get_mut(Pos { x, y }).unwrap() = value;
    }
    grid
  }

  #[gtest]
  fn test_get() {
    let grid = counting_grid();
    expect_that!(grid.get(Pos { x: 0, y: 0 }).copied(), some(eq(1)));
    expect_that!(grid.get(Pos { x: 2, y: 0 }).copied(), some(eq(3)));
    expect_that!(grid.get(Pos { x: 1, y: 1 }).copied(), some(eq(5)));
    expect_that!(grid.get(Pos { x: 3, y: 0 }).copied(), none());
    expect_that!(grid.get(Pos { x: -1, y: 1 }).copied(), none());
  }

  #[gtest]
  fn test_rows_and_display() {
    let grid = counting_grid();
    expect_that!(grid.iter_row(1).cloned().collect::<Vec<_>>(), container_eq([4, 5, 6]));
    expect_that!(grid.map(|value| value * 2).to_string(), eq("2 4 6 \n8 10 12 \n"));
  }

  #[gtest]
  fn test_get_mut() {
    let mut grid: Grid<Option<char>> = Grid::new(2, 2);
    *grid.get_mut(Pos { x: 1, y: 0 }).unwrap() = Some('a');
    expect_that!(grid.get(Pos { x: 1, y: 0 }).cloned().flatten(), some(eq('a')));
    expect_that!(grid.iter().filter(|tile| tile.is_some()).count(), eq(1));
    expect_true!(grid.get_mut(Pos { x: 2, y: 0 }).is_none());
  }
}

//! Square, heap-backed module storage

use alloc::vec;
use alloc::vec::Vec;
use core::ops::{Index, IndexMut};

/// Position of a module, counted from the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Grid<T> {
    size: usize,
    cells: Vec<T>,
}

impl<T: Copy> Grid<T> {
    /// A `size` × `size` grid with every cell set to `value`
    #[must_use]
    pub fn new(size: usize, value: T) -> Self {
        Self {
            size,
            cells: vec![value; size * size],
        }
    }

    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        (row < self.size && col < self.size).then(|| self.cells[row * self.size + col])
    }

    /// Every row as a slice, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        self.cells.chunks(self.size)
    }

    /// Every column as an iterator, left to right
    pub fn columns(&self) -> impl Iterator<Item = impl Iterator<Item = T> + '_> + '_ {
        (0..self.size).map(move |col| self.column(col))
    }

    pub fn column(&self, col: usize) -> impl Iterator<Item = T> + '_ {
        self.cells.iter().skip(col).step_by(self.size).copied()
    }

    /// Cells with their coordinates, row-major
    pub fn iter(&self) -> impl Iterator<Item = (Coordinate, T)> + '_ {
        self.cells.iter().enumerate().map(|(index, &cell)| {
            (Coordinate::new(index / self.size, index % self.size), cell)
        })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Coordinate, &mut T)> + '_ {
        let size = self.size;
        self.cells
            .iter_mut()
            .enumerate()
            .map(move |(index, cell)| (Coordinate::new(index / size, index % size), cell))
    }

    #[must_use]
    pub fn map<U: Copy>(&self, f: impl Fn(T) -> U) -> Grid<U> {
        Grid {
            size: self.size,
            cells: self.cells.iter().map(|&cell| f(cell)).collect(),
        }
    }
}

impl<T> Grid<T> {
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }
}

impl<T> Index<Coordinate> for Grid<T> {
    type Output = T;

    fn index(&self, pos: Coordinate) -> &T {
        assert!(pos.row < self.size && pos.col < self.size, "{pos:?} outside grid");
        &self.cells[pos.row * self.size + pos.col]
    }
}

impl<T> IndexMut<Coordinate> for Grid<T> {
    fn index_mut(&mut self, pos: Coordinate) -> &mut T {
        assert!(pos.row < self.size && pos.col < self.size, "{pos:?} outside grid");
        &mut self.cells[pos.row * self.size + pos.col]
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        &self[Coordinate::new(row, col)]
    }
}

impl<T> IndexMut<(usize, usize)> for Grid<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        &mut self[Coordinate::new(row, col)]
    }
}

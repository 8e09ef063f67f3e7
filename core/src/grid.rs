use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Rectangular board of cells, stored row-major.
///
/// Clones are deep, so every snapshot handed out by a [`Session`] is independent of the
/// session's later state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    cells: Array2<Cell>,
}

/// Builds a grid with every cell hidden, unflagged and mine-free.
pub fn empty_grid(rows: Coord, cols: Coord) -> Result<Grid> {
    Grid::empty((rows, cols))
}

impl Grid {
    pub fn empty((rows, cols): Coord2) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(GameError::InvalidDimensions {
                rows: rows.into(),
                cols: cols.into(),
            });
        }
        Ok(Self {
            cells: Array2::default((rows, cols).to_nd_index()),
        })
    }

    /// Builds a grid with mines at exactly `mine_coords` and neighbor counts filled in.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut grid = Self::empty(size)?;
        for &coords in mine_coords {
            let coords = grid.validate_coords(coords)?;
            grid[coords].is_mine = true;
        }
        grid.fill_neighbor_counts();
        Ok(grid)
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (
            rows.try_into().unwrap_or(Coord::MAX),
            cols.try_into().unwrap_or(Coord::MAX),
        )
    }

    pub fn rows(&self) -> Coord {
        self.size().0
    }

    pub fn cols(&self) -> Coord {
        self.size().1
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds(coords))
        }
    }

    pub fn get(&self, coords: Coord2) -> Option<&Cell> {
        self.cells.get(coords.to_nd_index())
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self[coords]
    }

    pub fn view_at(&self, coords: Coord2) -> CellView {
        self[coords].view()
    }

    /// Iterates every cell in row-major order together with its coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((row, col), &cell)| ((row as Coord, col as Coord), cell))
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    pub fn mine_count(&self) -> CellCount {
        self.count_where(|cell| cell.is_mine)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count()
    }

    pub fn revealed_safe_count(&self) -> CellCount {
        self.count_where(|cell| cell.revealed && !cell.is_mine)
    }

    pub fn flagged_count(&self) -> CellCount {
        self.count_where(|cell| cell.flagged)
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.count_neighbors_where(coords, |cell| cell.is_mine)
    }

    pub fn count_flagged_neighbors(&self, coords: Coord2) -> u8 {
        self.count_neighbors_where(coords, |cell| cell.flagged)
    }

    pub(crate) fn fill_neighbor_counts(&mut self) {
        let (rows, cols) = self.size();
        for row in 0..rows {
            for col in 0..cols {
                let coords = (row, col);
                self[coords].neighbor_count = if self[coords].is_mine {
                    0
                } else {
                    self.adjacent_mine_count(coords)
                };
            }
        }
    }

    fn count_where(&self, predicate: impl Fn(&Cell) -> bool) -> CellCount {
        self.cells
            .iter()
            .filter(|cell| predicate(cell))
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX)
    }

    fn count_neighbors_where(&self, coords: Coord2, predicate: impl Fn(&Cell) -> bool) -> u8 {
        // at most 8 neighbors, so the cast cannot truncate
        self.iter_neighbors(coords)
            .filter(|&pos| predicate(&self[pos]))
            .count() as u8
    }
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Grid {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}

use crate::*;

/// Returns a copy of `grid` with every mine revealed. Flags and safe cells are untouched.
pub fn expose_all_mines(grid: &Grid) -> Grid {
    let mut next = grid.clone();
    next.expose_mines();
    next
}

/// Whether every safe cell has been revealed. Mines need not be flagged.
pub fn is_won(grid: &Grid) -> bool {
    grid.is_won()
}

impl Grid {
    pub fn is_won(&self) -> bool {
        self.revealed_safe_count() == self.safe_cell_count()
    }

    pub(crate) fn expose_mines(&mut self) {
        let (rows, cols) = self.size();
        for row in 0..rows {
            for col in 0..cols {
                let cell = &mut self[(row, col)];
                if cell.is_mine {
                    cell.revealed = true;
                }
            }
        }
    }
}

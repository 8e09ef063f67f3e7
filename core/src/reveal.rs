use alloc::vec;

use crate::*;

/// Returns a copy of `grid` with the flood reveal from `coords` applied.
///
/// Flagged cells stop the cascade, numbered cells are revealed but do not propagate. An
/// origin that is already revealed or flagged leaves the copy unchanged.
pub fn reveal(grid: &Grid, coords: Coord2) -> Result<Grid> {
    let coords = grid.validate_coords(coords)?;
    let mut next = grid.clone();
    next.flood_reveal(coords);
    Ok(next)
}

impl Grid {
    /// Reveals the connected region around `origin`, returning how many cells were opened.
    pub(crate) fn flood_reveal(&mut self, origin: Coord2) -> CellCount {
        let mut opened: CellCount = 0;
        let mut to_visit = vec![origin];

        while let Some(coords) = to_visit.pop() {
            let cell = self[coords];
            if cell.revealed || cell.flagged {
                continue;
            }

            self[coords].revealed = true;
            opened += 1;

            if cell.neighbor_count == 0 {
                to_visit.extend(
                    self.iter_neighbors(coords)
                        .filter(|&pos| self[pos].is_hidden()),
                );
            }
        }

        log::trace!("Flood from {:?} opened {} cells", origin, opened);
        opened
    }
}

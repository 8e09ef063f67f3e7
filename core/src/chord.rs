use alloc::vec::Vec;

use crate::*;

/// Returns a copy of `grid` with the chord at `coords` applied.
///
/// The chord only acts on a revealed, safe, numbered cell whose flagged neighbors match its
/// number exactly. Hidden neighbors are then opened all at once: a safe one floods, a mine
/// exposes every mine on the board.
pub fn chord(grid: &Grid, coords: Coord2) -> Result<Grid> {
    let coords = grid.validate_coords(coords)?;
    let mut next = grid.clone();
    next.chord_reveal(coords);
    Ok(next)
}

impl Grid {
    pub fn can_chord_at(&self, coords: Coord2) -> bool {
        let Some(&cell) = self.get(coords) else {
            return false;
        };
        cell.revealed
            && !cell.flagged
            && !cell.is_mine
            && cell.neighbor_count > 0
            && cell.neighbor_count == self.count_flagged_neighbors(coords)
    }

    pub(crate) fn chord_reveal(&mut self, coords: Coord2) -> RevealOutcome {
        if !self.can_chord_at(coords) {
            return RevealOutcome::NoChange;
        }

        let hidden: Vec<Coord2> = self
            .iter_neighbors(coords)
            .filter(|&pos| self[pos].is_hidden())
            .collect();
        log::debug!("Chord at {:?} opens {} neighbors", coords, hidden.len());

        hidden
            .into_iter()
            .map(|pos| {
                if self[pos].is_mine {
                    self.expose_mines();
                    RevealOutcome::HitMine
                } else if self.flood_reveal(pos) > 0 {
                    RevealOutcome::Revealed
                } else {
                    RevealOutcome::NoChange
                }
            })
            .fold(RevealOutcome::NoChange, core::ops::BitOr::bitor)
    }
}

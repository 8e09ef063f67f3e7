use serde::{Deserialize, Serialize};

use crate::*;
pub use random::*;
pub use scripted::*;

mod random;
mod scripted;

/// Source of board positions for mine placement.
///
/// Implementations should draw uniformly from `[0, rows) x [0, cols)`. Out of range picks are
/// discarded by the generator.
pub trait CellPicker {
    fn pick(&mut self, size: Coord2) -> Coord2;
}

impl<P: CellPicker + ?Sized> CellPicker for &mut P {
    fn pick(&mut self, size: Coord2) -> Coord2 {
        (**self).pick(size)
    }
}

impl<P: CellPicker + ?Sized> CellPicker for alloc::boxed::Box<P> {
    fn pick(&mut self, size: Coord2) -> Coord2 {
        (**self).pick(size)
    }
}

/// Cells around the first click that are kept free of mines.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SafeZone {
    /// Only the clicked cell.
    Origin,
    /// The clicked cell and its 8 neighbors, so the first click always cascades.
    Neighborhood,
}

impl SafeZone {
    pub fn contains(self, origin: Coord2, coords: Coord2) -> bool {
        match self {
            Self::Origin => coords == origin,
            Self::Neighborhood => {
                coords.0.abs_diff(origin.0) <= 1 && coords.1.abs_diff(origin.1) <= 1
            }
        }
    }

    /// Number of in-bounds cells covered by the zone.
    pub fn cell_count(self, origin: Coord2, size: Coord2) -> CellCount {
        match self {
            Self::Origin => 1,
            Self::Neighborhood => 1 + NeighborIter::new(origin, size).count() as CellCount,
        }
    }
}

/// Builds a grid with `mine_count` mines, none of them on or next to `safe`.
///
/// At least one cell outside the safe zone must stay mine-free, so `mine_count` has to be
/// strictly below the number of free cells.
pub fn mined_grid(
    size: Coord2,
    mine_count: CellCount,
    safe: Coord2,
    picker: &mut impl CellPicker,
) -> Result<Grid> {
    let available = free_cells(size, safe, SafeZone::Neighborhood)?;
    if mine_count >= available {
        return Err(GameError::InvalidMineCount {
            requested: mine_count,
            available,
        });
    }
    generate(size, mine_count, safe, SafeZone::Neighborhood, picker)
}

/// Builds the grid for a first reveal at `origin`, keeping the whole neighborhood safe when
/// the mines fit around it and only the clicked cell otherwise.
pub fn first_move_grid(
    size: Coord2,
    mine_count: CellCount,
    origin: Coord2,
    picker: &mut impl CellPicker,
) -> Result<Grid> {
    let total_cells = mult(size.0, size.1);
    let neighborhood = SafeZone::Neighborhood.cell_count(origin, size);
    let zone = if mine_count.saturating_add(neighborhood) >= total_cells {
        log::warn!("Cannot keep the start neighborhood clear, fallback to a safe start cell");
        SafeZone::Origin
    } else {
        SafeZone::Neighborhood
    };
    generate(size, mine_count, origin, zone, picker)
}

/// Rejection-samples mine positions from `picker` until `mine_count` mines sit outside `zone`.
///
/// Accepts any count that fits, filling every free cell when `mine_count` equals it.
pub fn generate(
    size: Coord2,
    mine_count: CellCount,
    origin: Coord2,
    zone: SafeZone,
    picker: &mut impl CellPicker,
) -> Result<Grid> {
    let available = free_cells(size, origin, zone)?;
    if mine_count > available {
        return Err(GameError::InvalidMineCount {
            requested: mine_count,
            available,
        });
    }
    log::debug!(
        "Placing {} mines on {:?}, {:?} safe zone at {:?}",
        mine_count,
        size,
        zone,
        origin
    );

    let mut grid = Grid::empty(size)?;
    let mut placed = 0;
    let mut rejected: usize = 0;
    while placed < mine_count {
        let coords = picker.pick(size);
        if grid.validate_coords(coords).is_err()
            || grid[coords].is_mine
            || zone.contains(origin, coords)
        {
            rejected += 1;
            continue;
        }
        grid[coords].is_mine = true;
        placed += 1;
    }
    log::trace!("Mine placement rejected {} picks", rejected);

    grid.fill_neighbor_counts();
    Ok(grid)
}

/// Cells outside `zone` around `origin`, after checking both the size and the origin.
fn free_cells(size: Coord2, origin: Coord2, zone: SafeZone) -> Result<CellCount> {
    let grid = Grid::empty(size)?;
    let origin = grid.validate_coords(origin)?;
    Ok(grid.total_cells() - zone.cell_count(origin, size))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_structure(grid: &Grid, mines: CellCount, safe: Coord2, zone: SafeZone) {
        assert_eq!(grid.mine_count(), mines);
        for (coords, cell) in grid.iter() {
            assert!(!cell.revealed && !cell.flagged);
            if zone.contains(safe, coords) {
                assert!(!cell.is_mine, "mine inside safe zone at {:?}", coords);
            }
            if !cell.is_mine {
                let expected = grid
                    .iter_neighbors(coords)
                    .filter(|&pos| grid[pos].is_mine)
                    .count() as u8;
                assert_eq!(cell.neighbor_count, expected);
            }
        }
    }

    #[test]
    fn mined_grid_respects_count_and_safe_zone() {
        let presets = [((8, 8), 10), ((16, 16), 40), ((16, 30), 99), ((4, 4), 6)];
        for seed in 0..20 {
            for &(size, mines) in &presets {
                let safe = ((seed as Coord) % size.0, (seed as Coord * 7) % size.1);
                let mut picker = RandomPicker::new(seed);
                let grid = mined_grid(size, mines, safe, &mut picker).unwrap();
                check_structure(&grid, mines, safe, SafeZone::Neighborhood);
            }
        }
    }

    #[test]
    fn mined_grid_rejects_mines_filling_every_free_cell() {
        // 3x3 with a corner click keeps 4 cells safe, leaving 5 for mines
        let mut picker = RandomPicker::new(7);
        assert_eq!(
            mined_grid((3, 3), 5, (0, 0), &mut picker),
            Err(GameError::InvalidMineCount {
                requested: 5,
                available: 5
            })
        );

        let grid = mined_grid((3, 3), 4, (0, 0), &mut picker).unwrap();
        check_structure(&grid, 4, (0, 0), SafeZone::Neighborhood);
    }

    #[test]
    fn generate_fills_every_free_cell_outside_origin_zone() {
        let mut picker = RandomPicker::new(7);
        let grid = generate((3, 3), 8, (0, 0), SafeZone::Origin, &mut picker).unwrap();

        check_structure(&grid, 8, (0, 0), SafeZone::Origin);
        assert_eq!(grid[(0, 0)].neighbor_count, 3);
    }

    #[test]
    fn first_move_grid_degrades_when_no_cell_outside_neighborhood_stays_free() {
        // 5 mines would fill all 5 cells around a corner neighborhood, so only the corner is kept
        let mut picker = RandomPicker::new(11);
        let grid = first_move_grid((3, 3), 5, (0, 0), &mut picker).unwrap();

        check_structure(&grid, 5, (0, 0), SafeZone::Origin);
    }

    #[test]
    fn mined_grid_rejects_mines_that_cannot_fit() {
        let mut picker = RandomPicker::new(0);
        assert_eq!(
            mined_grid((3, 3), 1, (1, 1), &mut picker),
            Err(GameError::InvalidMineCount {
                requested: 1,
                available: 0
            })
        );
    }

    #[test]
    fn mined_grid_rejects_bad_dimensions_and_origin() {
        let mut picker = RandomPicker::new(0);
        assert_eq!(
            mined_grid((0, 3), 0, (0, 0), &mut picker),
            Err(GameError::InvalidDimensions { rows: 0, cols: 3 })
        );
        assert_eq!(
            mined_grid((3, 3), 0, (3, 0), &mut picker),
            Err(GameError::OutOfBounds((3, 0)))
        );
    }

    #[test]
    fn scripted_picks_are_used_in_order() {
        let mut picker = ScriptedPicker::new([(0, 0), (1, 1), (0, 0), (4, 4)]);
        let grid = mined_grid((5, 5), 2, (1, 1), &mut picker).unwrap();

        // scripted (0,0) and (1,1) fall in the safe zone, the sweep supplies the second mine
        assert!(grid[(4, 4)].is_mine);
        assert!(grid[(0, 3)].is_mine);
        check_structure(&grid, 2, (1, 1), SafeZone::Neighborhood);
    }

    #[test]
    fn first_move_grid_degrades_to_origin_on_dense_boards() {
        let mut picker = RandomPicker::new(3);
        let grid = first_move_grid((3, 3), 8, (1, 1), &mut picker).unwrap();

        check_structure(&grid, 8, (1, 1), SafeZone::Origin);
        assert_eq!(grid[(1, 1)].neighbor_count, 8);
    }

    #[test]
    fn first_move_grid_keeps_neighborhood_when_possible() {
        for seed in 0..10 {
            let mut picker = RandomPicker::new(seed);
            let grid = first_move_grid((8, 8), 10, (0, 7), &mut picker).unwrap();
            check_structure(&grid, 10, (0, 7), SafeZone::Neighborhood);
            assert_eq!(grid[(0, 7)].neighbor_count, 0);
        }
    }

    #[test]
    fn zone_cell_count_clips_to_bounds() {
        assert_eq!(SafeZone::Neighborhood.cell_count((0, 0), (5, 5)), 4);
        assert_eq!(SafeZone::Neighborhood.cell_count((0, 2), (5, 5)), 6);
        assert_eq!(SafeZone::Neighborhood.cell_count((2, 2), (5, 5)), 9);
        assert_eq!(SafeZone::Origin.cell_count((2, 2), (5, 5)), 1);
    }

    #[test]
    fn placement_is_roughly_uniform() {
        // each free cell of an 8x8 board with a corner click should see mines at a similar rate
        let mut hits = [[0u32; 8]; 8];
        let rounds = 400;
        for seed in 0..rounds {
            let mut picker = RandomPicker::new(seed);
            let grid = mined_grid((8, 8), 10, (0, 0), &mut picker).unwrap();
            for ((row, col), cell) in grid.iter() {
                if cell.is_mine {
                    hits[row as usize][col as usize] += 1;
                }
            }
        }

        // 10 mines over 60 free cells
        let expected = rounds as f64 * 10.0 / 60.0;
        for (row, line) in hits.iter().enumerate() {
            for (col, &count) in line.iter().enumerate() {
                if row <= 1 && col <= 1 {
                    assert_eq!(count, 0);
                } else {
                    let ratio = f64::from(count) / expected;
                    assert!(
                        (0.5..1.5).contains(&ratio),
                        "cell ({}, {}) got {} mines, expected about {}",
                        row,
                        col,
                        count,
                        expected
                    );
                }
            }
        }
    }
}

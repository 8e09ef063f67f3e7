use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// No mines placed yet, the first reveal generates the board.
    #[default]
    Pending,
    Active,
    Won,
    Lost,
}

impl Phase {
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// One game from the first click to a win or loss.
///
/// The session is the only way to change a game: every command builds the next grid on a
/// copy and swaps it in whole, so [`Session::grid`] always shows a consistent board. Finished
/// sessions ignore further commands until replaced with [`Session::reset`].
#[derive(Clone, Debug)]
pub struct Session<P = RandomPicker> {
    config: GameConfig,
    grid: Grid,
    phase: Phase,
    triggered_mine: Option<Coord2>,
    picker: P,
}

impl Session<RandomPicker> {
    /// Starts a session whose mines are placed from an OS-seeded generator.
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_picker(config, RandomPicker::from_entropy())
    }

    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_picker(config, RandomPicker::new(seed))
    }
}

impl<P: CellPicker> Session<P> {
    pub fn with_picker(config: GameConfig, picker: P) -> Result<Self> {
        let config = config.validate()?;
        Ok(Self {
            grid: Grid::empty(config.size)?,
            config,
            phase: Phase::default(),
            triggered_mine: None,
            picker,
        })
    }

    /// Discards this game and starts a fresh one with the same configuration.
    pub fn reset(self) -> Result<Self> {
        let config = self.config;
        self.reset_with(config)
    }

    /// Discards this game and starts a fresh one, possibly with new dimensions.
    pub fn reset_with(self, config: GameConfig) -> Result<Self> {
        log::debug!("Reset session to {:?}", config);
        Self::with_picker(config, self.picker)
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines
    }

    pub fn flagged_count(&self) -> CellCount {
        self.grid.flagged_count()
    }

    /// Mines not accounted for by flags, negative when the player over-flags.
    pub fn mines_left(&self) -> isize {
        (self.config.mines as isize) - (self.flagged_count() as isize)
    }

    /// The mine whose reveal lost the game.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.grid.validate_coords(coords)?;
        Ok(self.grid[coords])
    }

    pub fn can_chord_at(&self, coords: Coord2) -> bool {
        !self.phase.is_finished() && self.grid.can_chord_at(coords)
    }

    /// Primary action on a cell: reveal a hidden cell or chord a revealed number.
    ///
    /// The first reveal places the mines around the clicked cell and always leaves the
    /// session `Active`. Flagged cells ignore the click. Later clicks on revealed cells chord
    /// where possible and then settle a cleared board as won.
    pub fn on_reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        use RevealOutcome::*;

        let coords = self.grid.validate_coords(coords)?;
        if self.phase.is_finished() {
            return Ok(NoChange);
        }

        let cell = self.grid[coords];
        if cell.flagged {
            return Ok(NoChange);
        }
        if self.phase.is_pending() {
            let mut next =
                first_move_grid(self.config.size, self.config.mines, coords, &mut self.picker)?;
            self.carry_flags_onto(&mut next);
            next.flood_reveal(coords);
            self.grid = next;
            self.transition(Phase::Active);
            return Ok(Revealed);
        }

        let mut next = self.grid.clone();
        let outcome = if cell.revealed {
            if self.grid.can_chord_at(coords) {
                let trigger = self
                    .grid
                    .iter_neighbors(coords)
                    .find(|&pos| self.grid[pos].is_mine && self.grid[pos].is_hidden());
                let outcome = next.chord_reveal(coords);
                if outcome == HitMine {
                    self.triggered_mine = trigger;
                }
                outcome
            } else {
                NoChange
            }
        } else if cell.is_mine {
            next.expose_mines();
            self.triggered_mine = Some(coords);
            HitMine
        } else {
            next.flood_reveal(coords);
            Revealed
        };

        let outcome = match outcome {
            HitMine => {
                self.transition(Phase::Lost);
                HitMine
            }
            _ if next.is_won() => {
                self.transition(Phase::Won);
                Won
            }
            outcome => outcome,
        };
        self.grid = next;
        Ok(outcome)
    }

    /// Secondary action on a cell: toggle the flag on a cell that is not revealed.
    pub fn on_flag_toggle(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.grid.validate_coords(coords)?;
        if self.phase.is_finished() || self.grid[coords].revealed {
            return Ok(MarkOutcome::NoChange);
        }

        let mut next = self.grid.clone();
        next[coords].flagged = !next[coords].flagged;
        self.grid = next;
        Ok(MarkOutcome::Changed)
    }

    /// Flags placed before the board existed stay where the player put them.
    fn carry_flags_onto(&self, next: &mut Grid) {
        for (coords, cell) in self.grid.iter() {
            if cell.flagged {
                next[coords].flagged = true;
            }
        }
    }

    fn transition(&mut self, phase: Phase) {
        if self.phase != phase {
            log::debug!("Session phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
    }
}

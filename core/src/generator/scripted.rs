use alloc::vec::Vec;

use super::*;

/// Deterministic picker for tests and replays.
///
/// Yields the scripted positions in order, then sweeps the board in row-major order forever,
/// so generation terminates even when the script runs short.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScriptedPicker {
    script: Vec<Coord2>,
    next: usize,
    sweep: u32,
}

impl ScriptedPicker {
    pub fn new(script: impl IntoIterator<Item = Coord2>) -> Self {
        Self {
            script: script.into_iter().collect(),
            next: 0,
            sweep: 0,
        }
    }
}

impl CellPicker for ScriptedPicker {
    fn pick(&mut self, (rows, cols): Coord2) -> Coord2 {
        if let Some(&coords) = self.script.get(self.next) {
            self.next += 1;
            return coords;
        }

        let total = u32::from(rows) * u32::from(cols);
        let index = self.sweep % total.max(1);
        self.sweep = self.sweep.wrapping_add(1);
        let cols = u32::from(cols.max(1));
        ((index / cols) as Coord, (index % cols) as Coord)
    }
}

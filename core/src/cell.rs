use serde::{Deserialize, Serialize};

/// One board position with its hidden truth and the player's marks.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub is_mine: bool,
    pub revealed: bool,
    pub flagged: bool,
    /// Mined 8-neighbors; only meaningful when `is_mine` is false.
    pub neighbor_count: u8,
}

impl Cell {
    pub const fn is_hidden(self) -> bool {
        !self.revealed && !self.flagged
    }

    /// Revealed safe cell with no adjacent mines.
    pub const fn is_blank(self) -> bool {
        self.revealed && !self.is_mine && self.neighbor_count == 0
    }

    pub const fn view(self) -> CellView {
        match self {
            Cell { revealed: true, is_mine: true, .. } => CellView::Mine,
            Cell { revealed: true, neighbor_count, .. } => CellView::Revealed(neighbor_count),
            Cell { flagged: true, .. } => CellView::Flagged,
            _ => CellView::Hidden,
        }
    }
}

/// Player-visible state of a cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    #[default]
    Hidden,
    Flagged,
    Revealed(u8),
    Mine,
}

impl CellView {
    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }
}

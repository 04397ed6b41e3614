use serde::{Deserialize, Serialize};

/// Player-visible state of a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    Hidden,
    RevealedSafe,
    RevealedMine,
}

impl CellState {
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }
}

impl Default for CellState {
    fn default() -> Self {
        Self::Hidden
    }
}

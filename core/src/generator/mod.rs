use crate::*;
pub use random::*;

mod random;

pub trait LayoutGenerator {
    fn generate(self, mines: CellCount) -> MineLayout;
}

/// How mines are placed on a fresh board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementStrategy {
    /// Draw uniform cells and skip the ones already mined.
    Rejection,
    /// Partial Fisher-Yates shuffle of all cell indices.
    PartialShuffle,
}

impl Default for PlacementStrategy {
    fn default() -> Self {
        Self::Rejection
    }
}

#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use generator::*;
pub use ledger::*;
pub use notify::*;
pub use payout::*;
pub use round::*;
pub use store::*;
pub use tile::*;
pub use types::*;

mod engine;
mod error;
mod generator;
mod ledger;
mod notify;
mod payout;
mod round;
mod store;
mod tile;
mod types;

/// Validated parameters of a round about to start.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundConfig {
    pub bet: Decimal,
    pub mines: CellCount,
}

impl RoundConfig {
    pub fn new(bet: Decimal, mines: CellCount) -> Result<Self> {
        let bet = validate_bet(bet)?;
        if !(1..=MAX_MINES).contains(&mines) {
            return Err(RoundError::InvalidMineCount);
        }
        Ok(Self { bet, mines })
    }

    pub const fn safe_cell_count(&self) -> CellCount {
        GRID_SIZE - self.mines
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask
            .iter()
            .filter(|&&is_mine| is_mine)
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX);
        Self {
            mine_mask,
            mine_count,
        }
    }

    /// Builds a layout from explicit mine positions; duplicates collapse into one mine.
    pub fn from_mine_indices(mine_indices: &[CellIndex]) -> Result<Self> {
        let side = GRID_SIDE as usize;
        let mut mine_mask: Array2<bool> = Array2::default((side, side));

        for &index in mine_indices {
            if !is_valid_index(index) {
                return Err(RoundError::InvalidCellIndex(index));
            }
            mine_mask[index.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(mine_mask))
    }

    pub fn validate_index(&self, index: CellIndex) -> Result<CellIndex> {
        if is_valid_index(index) {
            Ok(index)
        } else {
            Err(RoundError::InvalidCellIndex(index))
        }
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        GRID_SIZE - self.mine_count
    }

    /// `false` for indices off the board.
    pub fn contains_mine(&self, index: CellIndex) -> bool {
        self.mine_mask
            .get(index.to_nd_index())
            .copied()
            .unwrap_or(false)
    }

    pub fn mine_indices(&self) -> Vec<CellIndex> {
        (0..GRID_SIZE).filter(|&index| self[index]).collect()
    }
}

/// # Panics
///
/// Panics when `index` is not on the board, see [`MineLayout::contains_mine`].
impl Index<CellIndex> for MineLayout {
    type Output = bool;

    fn index(&self, index: CellIndex) -> &Self::Output {
        &self.mine_mask[index.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Safe,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Safe => true,
            HitMine => true,
            Won => true,
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::HitMine | Self::Won)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn config_rejects_out_of_range_mines() {
        assert_eq!(
            RoundConfig::new(dec!(10), 0),
            Err(RoundError::InvalidMineCount)
        );
        assert_eq!(
            RoundConfig::new(dec!(10), GRID_SIZE),
            Err(RoundError::InvalidMineCount)
        );
        assert_eq!(RoundConfig::new(dec!(10), 24).unwrap().safe_cell_count(), 1);
    }

    #[test]
    fn config_rejects_non_positive_bet() {
        assert_eq!(RoundConfig::new(dec!(0), 3), Err(RoundError::InvalidBet));
        assert_eq!(RoundConfig::new(dec!(-1), 3), Err(RoundError::InvalidBet));
    }

    #[test]
    fn layout_from_indices_counts_distinct_mines() {
        let layout = MineLayout::from_mine_indices(&[0, 7, 7, 24]).unwrap();

        assert_eq!(layout.mine_count(), 3);
        assert_eq!(layout.safe_cell_count(), 22);
        assert!(layout.contains_mine(7));
        assert!(!layout.contains_mine(8));
        assert_eq!(layout.mine_indices(), alloc::vec![0, 7, 24]);
    }

    #[test]
    fn layout_rejects_off_board_index() {
        assert_eq!(
            MineLayout::from_mine_indices(&[3, 25]),
            Err(RoundError::InvalidCellIndex(25))
        );
    }
}

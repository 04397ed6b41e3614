use thiserror::Error;

use crate::{CellIndex, Operation, RoundPhase};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum RoundError {
    #[error("Please enter a valid bet amount.")]
    InvalidBet,
    #[error("Insufficient balance.")]
    InsufficientBalance,
    #[error("Bet is too large to pay out.")]
    PayoutOverflow,
    #[error("Mine count must be between 1 and 24.")]
    InvalidMineCount,
    #[error("Cell {0} is not on the board.")]
    InvalidCellIndex(CellIndex),
    #[error("Cannot {operation} while the round is {phase}.")]
    IllegalTransition {
        operation: Operation,
        phase: RoundPhase,
    },
}

pub type Result<T> = core::result::Result<T, RoundError>;

use alloc::vec::Vec;
use core::fmt;
use ndarray::Array2;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Idle -> Active
/// - Active -> Won
/// - Active -> Lost
/// - Won | Lost -> Active (a new round replaces the finished one)
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// No round has been played yet
    Idle,
    /// Bet placed, cells can be revealed
    Active,
    /// Cashed out or cleared every safe cell
    Won,
    /// Revealed a mine
    Lost,
}

impl RoundPhase {
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for RoundPhase {
    fn default() -> Self {
        Self::Idle
    }
}

impl fmt::Display for RoundPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Idle => "idle",
            Self::Active => "active",
            Self::Won => "won",
            Self::Lost => "lost",
        })
    }
}

/// Player actions, used to describe rejected transitions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    StartRound,
    RevealCell,
    CashOut,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::StartRound => "start a round",
            Self::RevealCell => "reveal a cell",
            Self::CashOut => "cash out",
        })
    }
}

/// A single betting round, from bet placement until it is won or lost.
///
/// The round only tracks the board and the bet it holds; moving money in and
/// out of a balance is up to [`RoundEngine`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Round {
    seed: u64,
    bet: Decimal,
    mine_layout: MineLayout,
    cells: Array2<CellState>,
    revealed_safe: CellCount,
    phase: RoundPhase,
    triggered_mine: Option<CellIndex>,
}

impl Round {
    pub fn new(seed: u64, bet: Decimal, mine_layout: MineLayout) -> Self {
        let side = GRID_SIDE as usize;
        Self {
            seed,
            bet,
            mine_layout,
            cells: Array2::default((side, side)),
            revealed_safe: 0,
            phase: RoundPhase::Active,
            triggered_mine: None,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn bet(&self) -> Decimal {
        self.bet
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_layout.mine_count()
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.mine_layout.safe_cell_count()
    }

    pub fn revealed_safe(&self) -> CellCount {
        self.revealed_safe
    }

    pub fn multiplier(&self) -> Decimal {
        multiplier(self.revealed_safe)
    }

    pub fn current_winnings(&self) -> Decimal {
        winnings(self.bet, self.revealed_safe)
    }

    /// State of the cell at `index`, `None` when it is not on the board.
    pub fn cell_at(&self, index: CellIndex) -> Option<CellState> {
        self.cells.get(index.to_nd_index()).copied()
    }

    pub fn cells(&self) -> impl Iterator<Item = CellState> + '_ {
        (0..GRID_SIZE).map(|index| self.cell(index))
    }

    pub fn triggered_mine(&self) -> Option<CellIndex> {
        self.triggered_mine
    }

    pub fn mine_layout(&self) -> &MineLayout {
        &self.mine_layout
    }

    pub fn is_cleared(&self) -> bool {
        self.revealed_safe == self.mine_layout.safe_cell_count()
    }

    /// Reveals a hidden cell; already revealed cells are left untouched.
    ///
    /// Clearing the last safe cell finishes the round as won.
    pub fn reveal(&mut self, index: CellIndex) -> Result<RevealOutcome> {
        let index = self.mine_layout.validate_index(index)?;
        self.check_active(Operation::RevealCell)?;

        if !self.cell(index).is_hidden() {
            return Ok(RevealOutcome::NoChange);
        }

        if self.mine_layout.contains_mine(index) {
            self.cells[index.to_nd_index()] = CellState::RevealedMine;
            self.triggered_mine = Some(index);
            self.end_round(false);
            log::debug!("Hit mine at {}", index);
            return Ok(RevealOutcome::HitMine);
        }

        self.cells[index.to_nd_index()] = CellState::RevealedSafe;
        self.revealed_safe += 1;
        log::debug!(
            "Revealed safe cell {}, {} of {}",
            index,
            self.revealed_safe,
            self.safe_cell_count()
        );

        if self.is_cleared() {
            self.end_round(true);
            Ok(RevealOutcome::Won)
        } else {
            Ok(RevealOutcome::Safe)
        }
    }

    /// Ends an active round as won and returns the winnings owed.
    pub fn cash_out(&mut self) -> Result<Decimal> {
        self.check_active(Operation::CashOut)?;
        self.end_round(true);
        Ok(self.current_winnings())
    }

    /// Payout of a finished round, zero unless it was won.
    pub fn payout(&self) -> Decimal {
        match self.phase {
            RoundPhase::Won => self.current_winnings(),
            _ => Decimal::ZERO,
        }
    }

    pub fn to_record(&self) -> RoundRecord {
        RoundRecord {
            seed: self.seed,
            bet: self.bet,
            mines: self.mine_count(),
            mine_indices: self.mine_layout.mine_indices(),
            revealed_safe: self.revealed_safe,
            multiplier: self.multiplier(),
            payout: self.payout(),
            outcome: self.phase,
        }
    }

    fn cell(&self, index: CellIndex) -> CellState {
        self.cells[index.to_nd_index()]
    }

    fn check_active(&self, operation: Operation) -> Result<()> {
        if self.phase.is_active() {
            Ok(())
        } else {
            Err(RoundError::IllegalTransition {
                operation,
                phase: self.phase,
            })
        }
    }

    fn end_round(&mut self, won: bool) {
        if self.phase.is_finished() {
            return;
        }

        self.phase = if won { RoundPhase::Won } else { RoundPhase::Lost };
        if !won {
            self.reveal_mines();
        }
    }

    /// Shows every mine still hidden, safe cells stay as they are.
    fn reveal_mines(&mut self) {
        let hidden_mines: Vec<CellIndex> = self
            .mine_layout
            .mine_indices()
            .into_iter()
            .filter(|&index| self.cell(index).is_hidden())
            .collect();
        for index in hidden_mines {
            self.cells[index.to_nd_index()] = CellState::RevealedMine;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn round(bet: Decimal, mines: &[CellIndex]) -> Round {
        Round::new(0, bet, MineLayout::from_mine_indices(mines).unwrap())
    }

    #[test]
    fn safe_reveals_raise_multiplier() {
        let mut round = round(dec!(50), &[20, 21, 22, 23, 24]);

        for index in 0..3 {
            assert_eq!(round.reveal(index).unwrap(), RevealOutcome::Safe);
        }

        assert_eq!(round.revealed_safe(), 3);
        assert_eq!(round.multiplier(), dec!(1.6));
        assert_eq!(round.current_winnings(), dec!(80.00));
        assert_eq!(round.phase(), RoundPhase::Active);
    }

    #[test]
    fn hitting_mine_shows_mines_and_keeps_safe_cells_hidden() {
        let mut round = round(dec!(10), &[0, 5, 10]);
        round.reveal(1).unwrap();

        assert_eq!(round.reveal(5).unwrap(), RevealOutcome::HitMine);

        assert_eq!(round.phase(), RoundPhase::Lost);
        assert_eq!(round.triggered_mine(), Some(5));
        for index in [0, 5, 10] {
            assert_eq!(round.cell_at(index), Some(CellState::RevealedMine));
        }
        assert_eq!(round.cell_at(1), Some(CellState::RevealedSafe));
        assert_eq!(round.cell_at(2), Some(CellState::Hidden));
        assert_eq!(round.revealed_safe(), 1);
        assert_eq!(round.payout(), Decimal::ZERO);
    }

    #[test]
    fn revealing_twice_is_a_no_op() {
        let mut round = round(dec!(10), &[24]);
        round.reveal(3).unwrap();
        let before = round.clone();

        assert_eq!(round.reveal(3).unwrap(), RevealOutcome::NoChange);
        assert_eq!(round, before);
    }

    #[test]
    fn clearing_board_wins() {
        let mines: Vec<CellIndex> = (1..GRID_SIZE).collect();
        let mut round = round(dec!(10), &mines);

        assert_eq!(round.reveal(0).unwrap(), RevealOutcome::Won);
        assert_eq!(round.phase(), RoundPhase::Won);
        assert_eq!(round.multiplier(), dec!(1.2));
        assert_eq!(round.payout(), dec!(12));
    }

    #[test]
    fn cash_out_without_reveals_refunds_bet() {
        let mut round = round(dec!(33.33), &[4]);

        assert_eq!(round.cash_out().unwrap(), dec!(33.33));
        assert_eq!(round.phase(), RoundPhase::Won);
    }

    #[test]
    fn finished_round_rejects_moves() {
        let mut round = round(dec!(10), &[4]);
        round.cash_out().unwrap();

        assert_eq!(
            round.reveal(0),
            Err(RoundError::IllegalTransition {
                operation: Operation::RevealCell,
                phase: RoundPhase::Won,
            })
        );
        assert_eq!(
            round.cash_out(),
            Err(RoundError::IllegalTransition {
                operation: Operation::CashOut,
                phase: RoundPhase::Won,
            })
        );
    }

    #[test]
    fn off_board_index_is_rejected() {
        let mut round = round(dec!(10), &[4]);
        assert_eq!(round.reveal(25), Err(RoundError::InvalidCellIndex(25)));
        assert_eq!(round.cell_at(25), None);
        assert_eq!(round.cell_at(CellIndex::MAX), None);
        assert!(!round.mine_layout().contains_mine(25));
    }

    #[test]
    fn record_captures_outcome() {
        let mut round = round(dec!(20), &[0, 1]);
        round.reveal(2).unwrap();
        round.reveal(3).unwrap();
        round.cash_out().unwrap();

        let record = round.to_record();
        assert_eq!(record.outcome, RoundPhase::Won);
        assert_eq!(record.mines, 2);
        assert_eq!(record.mine_indices, alloc::vec![0, 1]);
        assert_eq!(record.revealed_safe, 2);
        assert_eq!(record.multiplier, dec!(1.4));
        assert_eq!(record.payout, dec!(28));
    }
}

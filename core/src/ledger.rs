use alloc::vec::Vec;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::*;

/// Summary of a finished round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub seed: u64,
    pub bet: Decimal,
    pub mines: CellCount,
    pub mine_indices: Vec<CellIndex>,
    pub revealed_safe: CellCount,
    pub multiplier: Decimal,
    pub payout: Decimal,
    pub outcome: RoundPhase,
}

impl RoundRecord {
    /// Balance change caused by the round, negative when the bet was lost.
    pub fn net(&self) -> Decimal {
        self.payout - self.bet
    }
}

/// Append-only store of finished rounds.
pub trait RoundLedger {
    fn append_record(&mut self, record: RoundRecord);
}

impl RoundLedger for Vec<RoundRecord> {
    fn append_record(&mut self, record: RoundRecord) {
        self.push(record);
    }
}

impl<T: RoundLedger + ?Sized> RoundLedger for &mut T {
    fn append_record(&mut self, record: RoundRecord) {
        (**self).append_record(record)
    }
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::*;

/// Player balance owned outside the engine.
///
/// Implementations are expected to apply each call atomically; retries and
/// transport failures are their own concern.
pub trait BalanceStore {
    fn balance(&self) -> Decimal;

    /// Takes `amount` out of the balance, failing without change when it is not covered.
    fn debit(&mut self, amount: Decimal) -> Result<()>;

    /// Adds `amount`, failing without change when the balance would overflow.
    fn credit(&mut self, amount: Decimal) -> Result<()>;
}

/// In-memory balance.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Wallet {
    balance: Decimal,
}

impl Wallet {
    pub fn new(balance: Decimal) -> Self {
        Self { balance }
    }
}

impl BalanceStore for Wallet {
    fn balance(&self) -> Decimal {
        self.balance
    }

    fn debit(&mut self, amount: Decimal) -> Result<()> {
        if amount > self.balance {
            return Err(RoundError::InsufficientBalance);
        }
        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or(RoundError::InsufficientBalance)?;
        Ok(())
    }

    fn credit(&mut self, amount: Decimal) -> Result<()> {
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(RoundError::PayoutOverflow)?;
        Ok(())
    }
}

impl<T: BalanceStore + ?Sized> BalanceStore for &mut T {
    fn balance(&self) -> Decimal {
        (**self).balance()
    }

    fn debit(&mut self, amount: Decimal) -> Result<()> {
        (**self).debit(amount)
    }

    fn credit(&mut self, amount: Decimal) -> Result<()> {
        (**self).credit(amount)
    }
}

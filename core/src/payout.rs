use alloc::string::String;
use core::str::FromStr;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::*;

/// Multiplier gained per revealed safe cell.
///
/// The curve is linear, so a cash-out with no reveals refunds the bet exactly.
pub const MULTIPLIER_STEP: Decimal = dec!(0.2);

/// Symbol used when no other currency is configured.
pub const DEFAULT_CURRENCY: &str = "₹";

pub fn multiplier(revealed_safe: CellCount) -> Decimal {
    Decimal::ONE + Decimal::from(revealed_safe) * MULTIPLIER_STEP
}

/// Saturates at `Decimal::MAX`; the engine refuses bets whose [`max_payout`] does not fit.
pub fn winnings(bet: Decimal, revealed_safe: CellCount) -> Decimal {
    bet.saturating_mul(multiplier(revealed_safe))
}

/// Payout for clearing every safe cell, `None` when it overflows.
pub fn max_payout(bet: Decimal, mines: CellCount) -> Option<Decimal> {
    bet.checked_mul(multiplier(GRID_SIZE.saturating_sub(mines)))
}

/// Parses user input into a bet, rejecting anything that is not a positive number.
pub fn parse_bet(input: &str) -> Result<Decimal> {
    let bet = Decimal::from_str(input.trim()).map_err(|_| RoundError::InvalidBet)?;
    validate_bet(bet)
}

pub fn validate_bet(bet: Decimal) -> Result<Decimal> {
    if bet.is_sign_positive() && !bet.is_zero() {
        Ok(bet)
    } else {
        Err(RoundError::InvalidBet)
    }
}

/// Formats `amount` with two decimals behind `symbol`, e.g. `₹80.00`.
pub fn format_currency(symbol: &str, amount: Decimal) -> String {
    alloc::format!("{symbol}{:.2}", amount.round_dp(2))
}

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    /// Progress of the current round
    Info,
    Success,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

/// State transitions, published so a presentation layer can render them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RoundEvent {
    Started {
        seed: u64,
        bet: Decimal,
        mines: CellCount,
    },
    Revealed {
        index: CellIndex,
        revealed_safe: CellCount,
        multiplier: Decimal,
        winnings: Decimal,
    },
    CashedOut {
        multiplier: Decimal,
        payout: Decimal,
    },
    Busted {
        index: CellIndex,
        mine_indices: Vec<CellIndex>,
    },
}

/// Receives user-visible messages and transition events from the engine.
pub trait NotificationSink {
    fn report(&mut self, message: &str, severity: Severity);

    fn observe(&mut self, _event: &RoundEvent) {}
}

impl NotificationSink for Vec<Notification> {
    fn report(&mut self, message: &str, severity: Severity) {
        self.push(Notification {
            message: message.into(),
            severity,
        });
    }
}

impl<T: NotificationSink + ?Sized> NotificationSink for &mut T {
    fn report(&mut self, message: &str, severity: Severity) {
        (**self).report(message, severity)
    }

    fn observe(&mut self, event: &RoundEvent) {
        (**self).observe(event)
    }
}

use alloc::string::{String, ToString};
use rand::prelude::*;
use rust_decimal::Decimal;

use crate::*;

/// Runs betting rounds against a balance, reporting every transition.
///
/// Money only moves twice per round: the bet is debited when the round starts
/// and the winnings are credited when it is won. A new round is refused while
/// one is still active.
#[derive(Debug)]
pub struct RoundEngine<B, N, L> {
    balance: B,
    sink: N,
    ledger: L,
    round: Option<Round>,
    seeds: SmallRng,
    strategy: PlacementStrategy,
    currency: String,
}

impl<B, N, L> RoundEngine<B, N, L>
where
    B: BalanceStore,
    N: NotificationSink,
    L: RoundLedger,
{
    pub fn new(balance: B, sink: N, ledger: L, seed: u64) -> Self {
        Self {
            balance,
            sink,
            ledger,
            round: None,
            seeds: SmallRng::seed_from_u64(seed),
            strategy: PlacementStrategy::default(),
            currency: DEFAULT_CURRENCY.into(),
        }
    }

    pub fn with_strategy(mut self, strategy: PlacementStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_currency(mut self, symbol: impl Into<String>) -> Self {
        self.currency = symbol.into();
        self
    }

    pub fn phase(&self) -> RoundPhase {
        self.round
            .as_ref()
            .map(Round::phase)
            .unwrap_or(RoundPhase::Idle)
    }

    /// Current round, or the last finished one until a new round starts.
    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn balance(&self) -> Decimal {
        self.balance.balance()
    }

    pub fn strategy(&self) -> PlacementStrategy {
        self.strategy
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn format_amount(&self, amount: Decimal) -> String {
        format_currency(&self.currency, amount)
    }

    pub fn balance_store(&self) -> &B {
        &self.balance
    }

    pub fn sink(&self) -> &N {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut N {
        &mut self.sink
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn into_parts(self) -> (B, N, L) {
        (self.balance, self.sink, self.ledger)
    }

    /// Places a bet and deals a fresh random board.
    pub fn start_round(&mut self, bet: Decimal, mines: CellCount) -> Result<()> {
        let config = self.check_start(bet, mines).or_else(|err| self.reject(err))?;
        let seed = self.seeds.random();
        let layout = RandomLayoutGenerator::new(seed, self.strategy).generate(config.mines);
        self.open_round(config, seed, layout)
    }

    /// Places a bet on a known board, e.g. one regenerated from a recorded seed.
    pub fn start_round_with_layout(
        &mut self,
        bet: Decimal,
        seed: u64,
        layout: MineLayout,
    ) -> Result<()> {
        let config = self
            .check_start(bet, layout.mine_count())
            .or_else(|err| self.reject(err))?;
        self.open_round(config, seed, layout)
    }

    pub fn reveal_cell(&mut self, index: CellIndex) -> Result<RevealOutcome> {
        if !is_valid_index(index) {
            return self.reject(RoundError::InvalidCellIndex(index));
        }
        let Some(round) = self.round.as_mut() else {
            return self.reject(RoundError::IllegalTransition {
                operation: Operation::RevealCell,
                phase: RoundPhase::Idle,
            });
        };

        let outcome = match round.reveal(index) {
            Ok(outcome) => outcome,
            Err(err) => return self.reject(err),
        };

        match outcome {
            RevealOutcome::NoChange => {
                log::trace!("Cell {} already revealed", index);
            }
            RevealOutcome::Safe | RevealOutcome::Won => {
                let event = RoundEvent::Revealed {
                    index,
                    revealed_safe: round.revealed_safe(),
                    multiplier: round.multiplier(),
                    winnings: round.current_winnings(),
                };
                let message =
                    alloc::format!("Good! Revealed {} tiles.", round.revealed_safe());
                let record = round.to_record();

                self.sink.observe(&event);
                self.sink.report(&message, Severity::Info);
                if outcome == RevealOutcome::Won {
                    log::debug!("Board cleared, cashing out");
                    self.settle_win(record);
                }
            }
            RevealOutcome::HitMine => {
                let record = round.to_record();
                self.settle_loss(index, record);
            }
        }

        Ok(outcome)
    }

    /// Ends the active round and credits its current winnings.
    pub fn cash_out(&mut self) -> Result<Decimal> {
        let Some(round) = self.round.as_mut() else {
            return self.reject(RoundError::IllegalTransition {
                operation: Operation::CashOut,
                phase: RoundPhase::Idle,
            });
        };

        match round.cash_out() {
            Ok(_) => {
                let record = round.to_record();
                Ok(self.settle_win(record))
            }
            Err(err) => self.reject(err),
        }
    }

    fn check_start(&self, bet: Decimal, mines: CellCount) -> Result<RoundConfig> {
        let phase = self.phase();
        if phase.is_active() {
            return Err(RoundError::IllegalTransition {
                operation: Operation::StartRound,
                phase,
            });
        }

        let config = RoundConfig::new(bet, mines)?;
        let balance = self.balance.balance();
        if config.bet > balance {
            return Err(RoundError::InsufficientBalance);
        }
        // a full clear must still fit in the balance left after the debit
        max_payout(config.bet, config.mines)
            .and_then(|payout| (balance - config.bet).checked_add(payout))
            .ok_or(RoundError::PayoutOverflow)?;
        Ok(config)
    }

    fn open_round(&mut self, config: RoundConfig, seed: u64, layout: MineLayout) -> Result<()> {
        if let Err(err) = self.balance.debit(config.bet) {
            return self.reject(err);
        }

        let round = Round::new(seed, config.bet, layout);
        log::debug!(
            "Round started, bet: {}, mines: {}, seed: {}",
            config.bet,
            round.mine_count(),
            seed
        );
        self.sink.observe(&RoundEvent::Started {
            seed,
            bet: config.bet,
            mines: round.mine_count(),
        });
        self.sink
            .report("Game started! Click on tiles to reveal.", Severity::Info);
        self.round = Some(round);
        Ok(())
    }

    fn settle_win(&mut self, record: RoundRecord) -> Decimal {
        let payout = record.payout;
        if let Err(err) = self.balance.credit(payout) {
            log::error!("Could not credit {}: {}", payout, err);
            self.sink.report(&err.to_string(), Severity::Error);
        }
        log::info!(
            "Round won, multiplier: {}, payout: {}, balance: {}",
            record.multiplier,
            payout,
            self.balance.balance()
        );

        self.sink.observe(&RoundEvent::CashedOut {
            multiplier: record.multiplier,
            payout,
        });
        let message = alloc::format!("You won {}!", self.format_amount(payout));
        self.sink.report(&message, Severity::Success);
        self.ledger.append_record(record);
        payout
    }

    fn settle_loss(&mut self, index: CellIndex, record: RoundRecord) {
        log::info!("Round lost on cell {}, bet: {}", index, record.bet);

        self.sink.observe(&RoundEvent::Busted {
            index,
            mine_indices: record.mine_indices.clone(),
        });
        self.sink
            .report("Game Over! You lost your bet.", Severity::Error);
        self.ledger.append_record(record);
    }

    fn reject<T>(&mut self, err: RoundError) -> Result<T> {
        log::debug!("Rejected: {}", err);
        self.sink.report(&err.to_string(), Severity::Error);
        Err(err)
    }
}

use minestake_core::*;
use rust_decimal::Decimal;
use std::io::Write;

use crate::command::{Command, HELP};
use crate::render::{TerminalSink, render_board, render_history, render_status};

pub type Engine<W> = RoundEngine<Wallet, TerminalSink<W>, Vec<RoundRecord>>;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// One player at the terminal: an engine plus the defaults used to fill in commands.
#[derive(Debug)]
pub struct Session<W> {
    engine: Engine<W>,
    default_mines: CellCount,
}

impl<W: Write> Session<W> {
    pub fn new(engine: Engine<W>, default_mines: CellCount) -> Self {
        Self {
            engine,
            default_mines,
        }
    }

    pub fn engine(&self) -> &Engine<W> {
        &self.engine
    }

    pub fn into_engine(self) -> Engine<W> {
        self.engine
    }

    pub fn prompt(&mut self) {
        self.engine.sink_mut().prompt("> ");
    }

    /// Parses and runs one input line; parse failures are printed, never fatal.
    pub fn handle_line(&mut self, line: &str) -> Flow {
        if line.trim().is_empty() {
            return Flow::Continue;
        }
        match line.parse::<Command>() {
            Ok(command) => self.execute(command),
            Err(err) => {
                log::debug!("Could not parse {:?}: {}", line, err);
                self.engine
                    .sink_mut()
                    .report(&err.to_string(), Severity::Error);
                Flow::Continue
            }
        }
    }

    pub fn execute(&mut self, command: Command) -> Flow {
        log::trace!("command: {:?}", command);
        match command {
            Command::Start { bet, mines } => {
                let mines = mines.unwrap_or(self.default_mines);
                if let Some(bet) = self.bet_or_report(&bet) {
                    if self.engine.start_round(bet, mines).is_ok() {
                        self.show_board();
                    }
                }
            }
            Command::Replay { seed, bet, mines } => {
                if let Some(bet) = self.bet_or_report(&bet) {
                    self.replay(seed, bet, mines);
                }
            }
            Command::Reveal(index) => {
                if let Ok(outcome) = self.engine.reveal_cell(index) {
                    if outcome.has_update() {
                        self.show_board();
                    }
                }
            }
            Command::CashOut => {
                if self.engine.cash_out().is_ok() {
                    self.show_balance();
                }
            }
            Command::Board => self.show_board(),
            Command::Balance => self.show_balance(),
            Command::History => {
                let history = render_history(self.engine.ledger(), self.engine.currency());
                self.write_line(&history);
            }
            Command::Help => self.write_line(HELP),
            Command::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    /// Bad bets go through the engine's sink like any other rejected move.
    fn bet_or_report(&mut self, input: &str) -> Option<Decimal> {
        match parse_bet(input) {
            Ok(bet) => Some(bet),
            Err(err) => {
                self.engine
                    .sink_mut()
                    .report(&err.to_string(), Severity::Error);
                None
            }
        }
    }

    fn replay(&mut self, seed: u64, bet: Decimal, mines: CellCount) {
        // the generator clamps oversized counts, reject them before dealing
        if let Err(err) = RoundConfig::new(bet, mines) {
            self.engine
                .sink_mut()
                .report(&err.to_string(), Severity::Error);
            return;
        }
        let layout = RandomLayoutGenerator::new(seed, self.engine.strategy()).generate(mines);
        if self
            .engine
            .start_round_with_layout(bet, seed, layout)
            .is_ok()
        {
            self.show_board();
        }
    }

    fn show_board(&mut self) {
        let board = render_board(self.engine.round());
        let status = render_status(&self.engine);
        self.write_line(&board);
        self.write_line(&status);
    }

    fn show_balance(&mut self) {
        let balance = self.engine.format_amount(self.engine.balance());
        self.write_line(&format!("Balance: {balance}"));
    }

    fn write_line(&mut self, line: &str) {
        self.engine.sink_mut().write_line(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn session(balance: Decimal) -> Session<Vec<u8>> {
        let sink = TerminalSink::new(Vec::new(), false);
        let engine = RoundEngine::new(Wallet::new(balance), sink, Vec::new(), 3);
        Session::new(engine, 3)
    }

    fn output(session: Session<Vec<u8>>) -> String {
        let (_, sink, _) = session.into_engine().into_parts();
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn start_uses_default_mines_and_debits() {
        let mut session = session(dec!(150));

        assert_eq!(session.handle_line("start 50"), Flow::Continue);

        let round = session.engine().round().unwrap();
        assert_eq!(round.mine_count(), 3);
        assert_eq!(session.engine().balance(), dec!(100));
        let out = output(session);
        assert!(out.contains("Game started! Click on tiles to reveal."));
        assert!(out.contains("Cash out ₹50.00"));
    }

    #[test]
    fn bad_input_is_reported_and_play_continues() {
        let mut session = session(dec!(150));

        session.handle_line("start abc");
        session.handle_line("start 500");
        session.handle_line("fly");
        session.handle_line("reveal 3");

        assert_eq!(session.engine().balance(), dec!(150));
        assert_eq!(session.engine().phase(), RoundPhase::Idle);
        let out = output(session);
        assert!(out.contains("✘ Please enter a valid bet amount."));
        assert!(out.contains("✘ Insufficient balance."));
        assert!(out.contains("✘ Unknown command `fly`"));
        assert!(out.contains("✘ Cannot reveal a cell while the round is idle."));
    }

    #[test]
    fn full_round_through_commands() {
        let mut session = session(dec!(100));
        session.handle_line("replay 11 20 2");
        let safe: Vec<CellIndex> = {
            let layout = session.engine().round().unwrap().mine_layout();
            (0..GRID_SIZE).filter(|&i| !layout.contains_mine(i)).take(2).collect()
        };

        for index in &safe {
            session.handle_line(&format!("reveal {index}"));
        }
        session.handle_line("cashout");
        session.handle_line("history");

        assert_eq!(session.engine().balance(), dec!(108));
        assert_eq!(session.engine().ledger()[0].seed, 11);
        let out = output(session);
        assert!(out.contains("✔ You won ₹28.00!"));
        assert!(out.contains("Balance: ₹108.00"));
        assert!(out.contains("Session net: +₹8.00"));
    }

    #[test]
    fn replay_rejects_mine_count_before_dealing() {
        let mut session = session(dec!(100));

        session.handle_line("replay 1 10 200");

        assert_eq!(session.engine().balance(), dec!(100));
        assert!(session.engine().round().is_none());
        let out = output(session);
        assert_eq!(out.matches("✘ Mine count must be between 1 and 24.").count(), 1);
    }

    #[test]
    fn bet_that_cannot_be_paid_out_is_refused() {
        let mut session = session(Decimal::MAX);

        session.handle_line("start 1");

        assert_eq!(session.engine().balance(), Decimal::MAX);
        assert_eq!(session.engine().phase(), RoundPhase::Idle);
        assert!(output(session).contains("✘ Bet is too large to pay out."));
    }

    #[test]
    fn quit_stops_the_loop() {
        let mut session = session(dec!(1));
        assert_eq!(session.handle_line("  "), Flow::Continue);
        assert_eq!(session.handle_line("quit"), Flow::Quit);
    }
}

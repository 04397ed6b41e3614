use minestake_core::*;
use rust_decimal::Decimal;
use std::fmt::Write as _;
use std::io::Write;

const HIDDEN: char = '·';
const GEM: char = '◆';
const MINE: char = '✹';

/// Writes engine messages to a terminal, optionally echoing events as JSON lines.
#[derive(Debug)]
pub struct TerminalSink<W> {
    out: W,
    json_events: bool,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W, json_events: bool) -> Self {
        Self { out, json_events }
    }

    pub fn write_line(&mut self, line: &str) {
        if let Err(err) = writeln!(self.out, "{line}") {
            log::warn!("Could not write to terminal: {}", err);
        }
    }

    pub fn prompt(&mut self, prompt: &str) {
        if let Err(err) = write!(self.out, "{prompt}").and_then(|_| self.out.flush()) {
            log::warn!("Could not write to terminal: {}", err);
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> NotificationSink for TerminalSink<W> {
    fn report(&mut self, message: &str, severity: Severity) {
        let marker = match severity {
            Severity::Info => "  ",
            Severity::Success => "✔ ",
            Severity::Error => "✘ ",
        };
        self.write_line(&format!("{marker}{message}"));
    }

    fn observe(&mut self, event: &RoundEvent) {
        if !self.json_events {
            return;
        }
        match serde_json::to_string(event) {
            Ok(json) => self.write_line(&json),
            Err(err) => log::warn!("Could not serialize {:?}: {}", event, err),
        }
    }
}

pub fn cell_symbol(cell: CellState) -> char {
    match cell {
        CellState::Hidden => HIDDEN,
        CellState::RevealedSafe => GEM,
        CellState::RevealedMine => MINE,
    }
}

/// Draws the board with row and column headers, an empty board when no round was played.
pub fn render_board(round: Option<&Round>) -> String {
    let mut out = String::from("   ");
    for col in 0..GRID_SIDE {
        let _ = write!(out, " {col}");
    }
    for row in 0..GRID_SIDE {
        let _ = write!(out, "\n {row} ");
        for col in 0..GRID_SIDE {
            let cell = coords_to_index((row, col))
                .zip(round)
                .and_then(|(index, round)| round.cell_at(index))
                .unwrap_or_default();
            let _ = write!(out, " {}", cell_symbol(cell));
        }
    }
    out
}

pub fn format_multiplier(multiplier: Decimal) -> String {
    format!("{}x", multiplier.normalize())
}

pub fn render_status<B, N, L>(engine: &RoundEngine<B, N, L>) -> String
where
    B: BalanceStore,
    N: NotificationSink,
    L: RoundLedger,
{
    let Some(round) = engine.round() else {
        return "No round yet, type `start <bet> [mines]` to play.".into();
    };

    let summary = format!(
        "Bet {} · Mines {} · Revealed {}/{} · {}",
        engine.format_amount(round.bet()),
        round.mine_count(),
        round.revealed_safe(),
        round.safe_cell_count(),
        format_multiplier(round.multiplier()),
    );
    match round.phase() {
        RoundPhase::Active => format!(
            "{summary} · Cash out {}",
            engine.format_amount(round.current_winnings())
        ),
        RoundPhase::Won => format!(
            "{summary} · Won {}",
            engine.format_amount(round.payout())
        ),
        RoundPhase::Lost => format!("{summary} · Lost"),
        RoundPhase::Idle => summary,
    }
}

/// Signed amount, e.g. `+₹2.00` or `-₹10.00`.
pub fn format_net(currency: &str, net: Decimal) -> String {
    let sign = if net.is_sign_negative() { '-' } else { '+' };
    format!("{sign}{}", format_currency(currency, net.abs()))
}

pub fn render_history(records: &[RoundRecord], currency: &str) -> String {
    if records.is_empty() {
        return "No finished rounds yet.".into();
    }

    let mut out = String::new();
    for (number, record) in records.iter().enumerate() {
        let _ = writeln!(
            out,
            "#{:<3} {:<4} bet {} · mines {} · revealed {} · {} · payout {} · net {} · seed {}",
            number + 1,
            record.outcome,
            format_currency(currency, record.bet),
            record.mines,
            record.revealed_safe,
            format_multiplier(record.multiplier),
            format_currency(currency, record.payout),
            format_net(currency, record.net()),
            record.seed,
        );
    }
    let total: Decimal = records.iter().map(RoundRecord::net).sum();
    let _ = write!(out, "Session net: {}", format_net(currency, total));
    out
}

use crate::game::HandSummary;
use crate::player::{parse_action, Action, BetError};
use std::io::{self, BufRead, Read, Stdout, Write};
use tracing::{event, Level};

use super::{ActionProvider, AgentKind, TurnView};

/// A human at a line-oriented terminal.
///
/// Shows the acting player's cards and the current bet, then reads one of
/// `c`, `b <amount>` or `f`. Unparseable input is answered with a message
/// and a fresh prompt; end of input folds.
pub struct ConsoleAgent<R, W> {
    input: R,
    output: W,
}

impl ConsoleAgent<StdinLines, Stdout> {
    /// Read from the process stdin. Several seats may each hold one; stdin
    /// is only locked while a line is being read.
    pub fn stdio() -> Self {
        Self::new(StdinLines::default(), io::stdout())
    }
}

/// Buffered stdin that takes the stdin lock one line at a time.
#[derive(Debug, Default)]
pub struct StdinLines {
    line: Vec<u8>,
    pos: usize,
}

impl Read for StdinLines {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        let available = self.fill_buf()?;
        let n = available.len().min(out.len());
        out[..n].copy_from_slice(&available[..n]);
        self.consume(n);
        Ok(n)
    }
}

impl BufRead for StdinLines {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        if self.pos >= self.line.len() {
            self.line.clear();
            self.pos = 0;
            io::stdin().lock().read_until(b'\n', &mut self.line)?;
        }
        Ok(&self.line[self.pos..])
    }

    fn consume(&mut self, amt: usize) {
        self.pos = (self.pos + amt).min(self.line.len());
    }
}

impl<R: BufRead, W: Write> ConsoleAgent<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Give back the writer, e.g. to inspect what was printed.
    pub fn into_output(self) -> W {
        self.output
    }

    fn say(&mut self, line: impl std::fmt::Display) {
        if let Err(e) = writeln!(self.output, "{line}") {
            event!(Level::WARN, error = %e, "console write failed");
        }
    }

    fn read_line(&mut self) -> Option<String> {
        if let Err(e) = self.output.flush() {
            event!(Level::WARN, error = %e, "console flush failed");
        }
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line),
            Err(e) => {
                event!(Level::WARN, error = %e, "console read failed");
                None
            }
        }
    }
}

impl<R: BufRead, W: Write> ActionProvider for ConsoleAgent<R, W> {
    fn next_action(&mut self, view: &TurnView<'_>) -> Action {
        let player = view.player;
        self.say(format_args!("{} ({} chips): {}", player.name(), player.chips(), player.hand()));
        self.say(format_args!("The current bet is {}.", view.round.bet_to_match));
        if view.to_match() > 0 {
            self.say(format_args!("You need {} more to stay in.", view.to_match()));
        }
        loop {
            self.say("[C]heck, [B]et, or [F]old?");
            let Some(line) = self.read_line() else {
                event!(Level::INFO, seat = player.seat(), "console input closed, folding");
                return Action::Fold;
            };
            match parse_action(&line) {
                Ok(action) => return action,
                Err(e) => self.say(e),
            }
        }
    }

    fn on_rejected(&mut self, _view: &TurnView<'_>, error: &BetError) {
        self.say(error);
    }

    fn on_hand_complete(&mut self, summary: &HandSummary) {
        self.say(summary);
        for name in &summary.eliminated {
            self.say(format_args!("{name} is out of chips."));
        }
    }

    fn kind(&self) -> AgentKind {
        AgentKind::Human
    }
}

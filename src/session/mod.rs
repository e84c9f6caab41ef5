//! A small line-based text driver over [`GameState`]: set up positions, list
//! and play legal moves, take them back and run [perft] from a terminal or a
//! script.
//!
//! [`Session::run`] is the "main loop" which reads commands from the input
//! stream and writes responses to the output stream. Supported commands:
//!
//! - `position startpos|fen <FEN> [moves <move1> ... <move_i>]`
//! - `moves [<square>]`: legal moves of the side to move or of a single piece
//! - `play <move>`: plays a legal move, e.g. `play e2e4`
//! - `undo`: takes back the last move played with `play`
//! - `history`: moves played since the position was set up
//! - `d`: dumps the board and the FEN of the current position
//! - `perft <depth>`: number of leaf nodes per root move
//! - `quit`
//!
//! A command that can not be executed prints `error: <reason>` and leaves the
//! session unchanged.
//!
//! [perft]: https://www.chessprogramming.org/Perft

use std::io::{BufRead, Write};

use anyhow::{bail, Context};
use itertools::Itertools;

use crate::chess::core::Square;
use crate::chess::moves::Move;
use crate::chess::state::{perft, GameState};
use crate::session::command::Command;

mod command;

/// Connects the rules with the I/O: keeps the current position along with the
/// positions it was reached from.
pub struct Session<'a, R: BufRead, W: Write> {
    state: GameState,
    /// Positions before each `play`, most recent last.
    previous: Vec<GameState>,
    input: &'a mut R,
    output: &'a mut W,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    /// Creates a new session starting from `state` with provided I/O.
    #[must_use]
    pub fn new(state: GameState, input: &'a mut R, output: &'a mut W) -> Self {
        Self {
            state,
            previous: Vec::new(),
            input,
            output,
        }
    }

    /// The current position.
    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    /// Continuously reads the input stream and executes the commands until
    /// "quit" is sent or the input is exhausted.
    ///
    /// # Errors
    ///
    /// Only I/O failures stop the loop: invalid commands are reported to the
    /// output stream.
    pub fn run(&mut self) -> anyhow::Result<()> {
        loop {
            let mut line = String::new();
            let read = self
                .input
                .read_line(&mut line)
                .context("reading command from input")?;
            if read == 0 {
                break;
            }
            if line.trim().is_empty() {
                continue;
            }
            log::debug!("received command: {}", line.trim());
            let command = Command::parse(&line);
            if command == Command::Quit {
                break;
            }
            if let Err(e) = self.execute(command) {
                writeln!(self.output, "error: {e:#}")?;
            }
            self.output.flush()?;
        }
        Ok(())
    }

    fn execute(&mut self, command: Command) -> anyhow::Result<()> {
        match command {
            Command::SetPosition { fen, moves } => self.handle_position(fen.as_deref(), &moves),
            Command::Moves { square } => self.handle_moves(square.as_deref()),
            Command::Play { next_move } => self.handle_play(&next_move),
            Command::Undo => self.handle_undo(),
            Command::History => self.handle_history(),
            Command::Display => self.handle_display(),
            Command::Perft { depth } => self.handle_perft(&depth),
            Command::Quit => Ok(()),
            Command::Unknown(command) => bail!("unsupported command: '{command}'"),
        }
    }

    /// Replaces the current position. Nothing changes if the position or any
    /// of the moves are invalid.
    fn handle_position(&mut self, fen: Option<&str>, moves: &[String]) -> anyhow::Result<()> {
        let mut state = match fen {
            None => GameState::starting(),
            Some(fen) => GameState::try_from(fen)?,
        };
        for next_move in moves {
            let parsed = Move::try_from(next_move.as_str())?;
            state = state
                .make_move(parsed.from, parsed.to)
                .with_context(|| format!("playing {next_move} in {state}"))?;
        }
        self.state = state;
        self.previous.clear();
        Ok(())
    }

    fn handle_moves(&mut self, square: Option<&str>) -> anyhow::Result<()> {
        let moves = match square {
            None => self.state.legal_moves(),
            Some(square) => {
                let from = Square::try_from(square)?;
                self.state
                    .legal_destinations(from)
                    .into_iter()
                    .map(|to| Move::new(from, to))
                    .collect()
            },
        };
        if moves.is_empty() {
            writeln!(self.output, "(none)")?;
        } else {
            writeln!(
                self.output,
                "{}",
                moves.iter().map(Move::to_string).sorted().join(" ")
            )?;
        }
        Ok(())
    }

    fn handle_play(&mut self, next_move: &str) -> anyhow::Result<()> {
        let parsed = Move::try_from(next_move)?;
        let next = self.state.make_move(parsed.from, parsed.to)?;
        self.previous.push(std::mem::replace(&mut self.state, next));
        Ok(())
    }

    fn handle_undo(&mut self) -> anyhow::Result<()> {
        match self.previous.pop() {
            Some(state) => {
                self.state = state;
                Ok(())
            },
            None => bail!("nothing to undo"),
        }
    }

    fn handle_history(&mut self) -> anyhow::Result<()> {
        if self.state.history().is_empty() {
            writeln!(self.output, "(none)")?;
        } else {
            writeln!(self.output, "{}", self.state.history().iter().join(" "))?;
        }
        Ok(())
    }

    fn handle_display(&mut self) -> anyhow::Result<()> {
        write!(self.output, "{:?}", self.state)?;
        Ok(())
    }

    /// Prints the number of leaf nodes reachable through each legal move and
    /// the total, in the same format as Stockfish's `go perft`.
    fn handle_perft(&mut self, depth: &str) -> anyhow::Result<()> {
        let depth: u8 = depth
            .parse()
            .with_context(|| format!("perft depth should be a small number, got '{depth}'"))?;
        let total = if depth == 0 {
            1
        } else {
            let mut total = 0;
            for next in self.state.legal_moves() {
                let nodes = perft(&self.state.apply_move(next.from, next.to), depth - 1);
                writeln!(self.output, "{next}: {nodes}")?;
                total += nodes;
            }
            writeln!(self.output)?;
            total
        };
        writeln!(self.output, "Nodes searched: {total}")?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    fn run(script: &str) -> (GameState, String) {
        let mut input = script.as_bytes();
        let mut output = Vec::new();
        let mut session = Session::new(GameState::starting(), &mut input, &mut output);
        session.run().unwrap();
        let state = session.state().clone();
        (state, String::from_utf8(output).unwrap())
    }

    #[test]
    fn play_and_undo() {
        let (state, output) = run("play e2e4\nplay e7e5\nundo\n");
        assert_eq!(output, "");
        assert_eq!(
            state.to_string(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );
    }

    #[test]
    fn errors_do_not_stop_the_loop() {
        let (state, output) = run("play e2e5\nundo\nfly\nplay e2e4\n");
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|line| line.starts_with("error: ")), "{output}");
        assert_eq!(state.en_passant(), Some(Square::E3));
    }

    #[test]
    fn quit_stops_reading() {
        let (state, _) = run("quit\nplay e2e4\n");
        assert_eq!(state, GameState::starting());
    }

    #[test]
    fn position_with_moves() {
        let (state, output) = run("position startpos moves e2e4 d7d5 e4d5\nhistory\n");
        assert_eq!(output, "e2e4 d7d5 e4d5\n");
        assert_eq!(state.halfmove_clock(), 0);

        // An illegal move keeps the previous position.
        let (state, output) = run("position startpos moves e2e4 e2e4\n");
        assert!(output.starts_with("error: playing e2e4"), "{output}");
        assert_eq!(state, GameState::starting());
    }

    #[test]
    fn list_moves() {
        let (_, output) = run("moves b1\nmoves e7\nmoves\n");
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "b1a3 b1c3");
        assert_eq!(lines[1], "(none)");
        assert_eq!(lines[2].split(' ').count(), 20);
    }

    #[test]
    fn perft_divide() {
        let (_, output) = run("perft 2\n");
        assert!(output.contains("e2e4: 20\n"), "{output}");
        assert!(output.ends_with("\nNodes searched: 400\n"), "{output}");
    }
}

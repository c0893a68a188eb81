//! Line-oriented front end: prints the board as text and reads 1-based column
//! numbers, one command per line.

use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::error::MoveError;
use crate::game::{GameEngine, GameOutcome};

pub struct TextHarness<R, W> {
    engine: GameEngine,
    input: R,
    output: W,
}

enum Command {
    Drop(usize),
    Reset,
    Quit,
    Help,
}

fn parse_command(line: &str) -> Result<Command, String> {
    match line.trim() {
        "q" | "quit" | "exit" => Ok(Command::Quit),
        "r" | "reset" => Ok(Command::Reset),
        "h" | "help" | "?" => Ok(Command::Help),
        other => match other.parse::<usize>() {
            Ok(n) if n >= 1 => Ok(Command::Drop(n - 1)),
            _ => Err(format!("Unrecognized input '{other}'")),
        },
    }
}

impl<R: BufRead, W: Write> TextHarness<R, W> {
    pub fn new(engine: GameEngine, input: R, output: W) -> Self {
        TextHarness {
            engine,
            input,
            output,
        }
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Run until `q` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        self.print_board()?;
        self.print_prompt()?;

        let mut line = String::new();
        loop {
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }
            if line.trim().is_empty() {
                self.print_prompt()?;
                continue;
            }

            match parse_command(&line) {
                Ok(Command::Quit) => break,
                Ok(Command::Help) => self.print_help()?,
                Ok(Command::Reset) => {
                    self.engine.reset();
                    writeln!(self.output, "New game started!")?;
                    self.print_board()?;
                }
                Ok(Command::Drop(col)) => self.drop_disc(col)?,
                Err(msg) => writeln!(self.output, "{msg}. Type 'h' for help.")?,
            }
            self.print_prompt()?;
        }

        self.output.flush()
    }

    fn drop_disc(&mut self, col: usize) -> io::Result<()> {
        match self.engine.apply_move(col) {
            Ok(result) => {
                debug!(row = result.row, col = result.col, "text move applied");
                self.print_board()?;
                if let GameOutcome::Win(_) | GameOutcome::Draw = result.outcome {
                    writeln!(self.output, "{}", result.outcome)?;
                    writeln!(self.output, "Type 'r' to play again or 'q' to quit.")?;
                }
            }
            Err(MoveError::InvalidColumn { cols, .. }) => writeln!(
                self.output,
                "Invalid move: column {} does not exist (1-{cols})",
                col + 1
            )?,
            Err(MoveError::ColumnFull(_)) => {
                writeln!(self.output, "Invalid move: column {} is full", col + 1)?
            }
            Err(MoveError::GameOver(outcome)) => {
                writeln!(self.output, "Invalid move: game is already over ({outcome})")?
            }
        }
        Ok(())
    }

    fn print_board(&mut self) -> io::Result<()> {
        let board = self.engine.board();
        let header: String = (1..=board.cols()).map(|c| format!("{:<2}", c % 10)).collect();
        writeln!(self.output, "{}", header.trim_end())?;
        for row in board.to_string().lines() {
            let spaced: Vec<String> = row.chars().map(String::from).collect();
            writeln!(self.output, "{}", spaced.join(" "))?;
        }
        Ok(())
    }

    fn print_prompt(&mut self) -> io::Result<()> {
        if !self.engine.is_terminal() {
            write!(
                self.output,
                "{}'s Turn ({}) > ",
                self.engine.active_player(),
                self.engine.active_player().to_cell().symbol()
            )?;
        } else {
            write!(self.output, "> ")?;
        }
        self.output.flush()
    }

    fn print_help(&mut self) -> io::Result<()> {
        writeln!(
            self.output,
            "Enter a column number 1-{} to drop a disc, 'r' to reset, 'q' to quit.",
            self.engine.board().cols()
        )
    }
}

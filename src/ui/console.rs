use crate::chess_board::Player;
use crate::error::ChessError;
use crate::game::input::parse_coordinate;
use crate::game::{Coordinates, SquareRequest, SquareSource};
use std::collections::VecDeque;
use std::io::{stdin, stdout, BufRead, StdinLock, Stdout, Write};
use tracing::warn;

/// Reads squares from a line oriented reader, prompting on `writer`.
///
/// Integers may be spread over several lines. The first token that is not an
/// integer is reported as malformed and the rest of its line is dropped.
pub struct ConsoleSquares<R, W> {
    reader: R,
    writer: W,
    pending: VecDeque<String>,
}

impl ConsoleSquares<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(stdin().lock(), stdout())
    }
}

impl<R: BufRead, W: Write> ConsoleSquares<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            pending: VecDeque::new(),
        }
    }

    fn next_token(&mut self) -> Result<String, ChessError> {
        let mut line = String::new();
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(token);
            }

            line.clear();
            match self.reader.read_line(&mut line) {
                Ok(0) => return Err(ChessError::InputClosed),
                Ok(_) => self.pending.extend(line.split_whitespace().map(str::to_string)),
                Err(e) => {
                    warn!(%e, "failed to read input");
                    return Err(ChessError::InputClosed);
                }
            }
        }
    }

    fn next_coordinate(&mut self) -> Result<i32, ChessError> {
        let token = self.next_token()?;
        parse_coordinate(&token).map_err(|e| {
            self.pending.clear();
            e
        })
    }
}

impl<R: BufRead, W: Write> SquareSource for ConsoleSquares<R, W> {
    fn request_square(&mut self, player: Player, request: SquareRequest) -> Result<Coordinates, ChessError> {
        let action = match request {
            SquareRequest::Origin => "Select a piece",
            SquareRequest::Destination => "Specify a square to move to",
        };
        writeln!(
            self.writer,
            "[{}] {} (Enter two integers: '<row> <col>'), or any other input to undo the last action.",
            player, action
        )
        .ok();
        self.writer.flush().ok();

        let row = self.next_coordinate()?;
        let col = self.next_coordinate()?;
        Ok((row, col))
    }
}

use crate::chess_board::Player;
use crate::error::ChessError;
use std::collections::VecDeque;

/// Raw (row, col) pair as typed by a player; not bounds-checked yet.
pub type Coordinates = (i32, i32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SquareRequest {
    /// The square of the piece to move.
    Origin,
    /// The square to move it to.
    Destination,
}

/// Where a round gets its squares from.
pub trait SquareSource {
    /// Returns the next coordinate pair for `player`.
    ///
    /// `ChessError::MalformedInput` makes the round attempt an undo;
    /// `ChessError::InputClosed` ends the game.
    fn request_square(&mut self, player: Player, request: SquareRequest) -> Result<Coordinates, ChessError>;
}

/// Parses one token the way a stream extraction of an integer would.
pub fn parse_coordinate(token: &str) -> Result<i32, ChessError> {
    token
        .parse::<i32>()
        .map_err(|_| ChessError::MalformedInput(token.to_string()))
}

/// Squares from a fixed token list, used for replays and tests.
/// Each request consumes two tokens; a token that is not an integer
/// is consumed and reported as malformed.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSquares {
    tokens: VecDeque<String>,
}

impl ScriptedSquares {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// Splits a whitespace separated script.
    pub fn from_script(script: &str) -> Self {
        Self::new(script.split_whitespace())
    }

    pub fn is_exhausted(&self) -> bool {
        self.tokens.is_empty()
    }

    fn next_coordinate(&mut self) -> Result<i32, ChessError> {
        let token = self.tokens.pop_front().ok_or(ChessError::InputClosed)?;
        parse_coordinate(&token)
    }
}

impl SquareSource for ScriptedSquares {
    fn request_square(&mut self, _player: Player, _request: SquareRequest) -> Result<Coordinates, ChessError> {
        let row = self.next_coordinate()?;
        let col = self.next_coordinate()?;
        Ok((row, col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_squares() {
        let mut script = ScriptedSquares::from_script("1 4\n3 4 u 6 x");
        let mut next = || script.request_square(Player::One, SquareRequest::Origin);
        assert_eq!(next(), Ok((1, 4)));
        assert_eq!(next(), Ok((3, 4)));
        assert_eq!(next(), Err(ChessError::MalformedInput("u".to_string())));
        assert_eq!(next(), Err(ChessError::MalformedInput("x".to_string())));
        assert_eq!(next(), Err(ChessError::InputClosed));
    }

    #[test]
    fn test_negative_and_large_coordinates_parse() {
        let mut script = ScriptedSquares::new(["-1", "12"]);
        assert_eq!(script.request_square(Player::Two, SquareRequest::Destination), Ok((-1, 12)));
        assert!(script.is_exhausted());
    }
}

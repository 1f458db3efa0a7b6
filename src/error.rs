//! Error types of the board and the round protocol.
//!
//! None of these are fatal to a game. `IllegalMove` reasons are only logged:
//! the board's public move operation reports a plain `bool`.

use thiserror::Error;

/// Why the board refused a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IllegalMove {
    #[error("square is outside the board")]
    OutOfBounds,
    #[error("no piece on the origin square")]
    EmptyOrigin,
    #[error("piece does not belong to the player to move")]
    WrongColor,
    #[error("piece cannot move that way")]
    RuleViolation,
    #[error("a king cannot be captured")]
    KingCapture,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    /// The input could not be read as a pair of integers.
    #[error("malformed input: {0}")]
    MalformedInput(String),
    #[error("illegal move: {0}")]
    IllegalMove(#[from] IllegalMove),
    #[error("no moves to undo")]
    NoHistory,
    /// The input source is exhausted; the game cannot continue.
    #[error("input closed")]
    InputClosed,
    #[error("invalid layout: {0}")]
    InvalidLayout(String),
}

//! Text rendering of the board and the game loop shell around the rounds.

pub mod console;

use crate::chess_board::{BoardSnapshot, BoardView, ChessField, Color, Piece, BOARD_LENGTH};
use crate::error::ChessError;
use crate::game::{Game, RoundOutcome, SquareSource};
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::io::Write;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use tracing::{debug, error};

const RESET: &str = "\x1b[0m";

lazy_static! {
    static ref ANSI_CODES: HashMap<Color, &'static str> = HashMap::from([
        (Color::Black, "\x1b[1;90m"),
        (Color::Red, "\x1b[1;31m"),
        (Color::Green, "\x1b[1;32m"),
        (Color::Yellow, "\x1b[1;33m"),
        (Color::Blue, "\x1b[1;34m"),
        (Color::Magenta, "\x1b[1;35m"),
        (Color::Cyan, "\x1b[1;36m"),
        (Color::White, "\x1b[1;37m"),
    ]);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Wrap piece letters in the ANSI code of their color.
    pub ansi: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { ansi: true }
    }
}

/// Wraps `text` in the ANSI code of `color`.
pub fn colorize(text: &str, color: Color) -> String {
    match ANSI_CODES.get(&color) {
        Some(code) => format!("{}{}{}", code, text, RESET),
        None => text.to_string(),
    }
}

fn piece_symbol(piece: Option<&Piece>, options: RenderOptions) -> String {
    match piece {
        None => "*".to_string(),
        Some(piece) if options.ansi => colorize(&piece.symbol().to_string(), piece.color),
        Some(piece) => piece.symbol().to_string(),
    }
}

/// Renders the board with row 7 on top, e.g.
///
/// ```text
/// 7 | R N B K Q B N R
/// 6 | P P P P P P P P
/// ...
///     ---------------
///     0 1 2 3 4 5 6 7
/// ```
pub fn render_board(snapshot: &BoardSnapshot, options: RenderOptions) -> String {
    let mut board_representation = String::new();

    for row in (0..BOARD_LENGTH as u8).rev() {
        board_representation.push_str(&format!("{} | ", row));
        for col in 0..BOARD_LENGTH as u8 {
            let piece = snapshot.piece_at(ChessField::new(row, col));
            board_representation.push_str(&piece_symbol(piece, options));
            board_representation.push(' ');
        }
        board_representation.push('\n');
    }

    board_representation.push_str(&format!("{}{}\n", " ".repeat(4), "-".repeat(15)));
    board_representation.push_str(&" ".repeat(4));
    for col in 0..BOARD_LENGTH {
        board_representation.push_str(&format!("{} ", col));
    }
    board_representation.push('\n');

    board_representation
}

/// The message a player sees after a round.
pub fn describe_outcome(outcome: &RoundOutcome) -> String {
    match outcome {
        RoundOutcome::Moved { from, to } => format!("Moved {} to {}", from, to),
        RoundOutcome::Undone { from } => format!("Undo move from ({}, {})", from.row, from.col),
        RoundOutcome::UnableToMove { from, to } => format!(
            "Unable to move piece at ({},{}) to ({},{})",
            from.0, from.1, to.0, to.1
        ),
        RoundOutcome::UndoFailed => "No moves to undo.\nUndo failed.".to_string(),
    }
}

#[derive(Tabled)]
struct HistoryRow {
    ply: usize,
    player: String,
    piece: char,
    from: String,
    to: String,
    captured: String,
}

/// Table of the moves that can still be taken back, oldest first.
pub fn render_history(game: &Game) -> String {
    let board = game.board();
    let rows: Vec<HistoryRow> = game
        .history()
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let moved = board.piece(record.moved);
            HistoryRow {
                ply: i + 1,
                player: moved.map_or_else(|| "?".to_string(), |p| p.color.to_string()),
                piece: moved.map_or('?', Piece::symbol),
                from: record.from.to_string(),
                to: record.to.to_string(),
                captured: record
                    .captured
                    .and_then(|id| board.piece(id))
                    .map_or_else(|| "-".to_string(), |p| p.symbol().to_string()),
            }
        })
        .collect();

    Table::new(rows).with(Style::modern()).to_string()
}

/// Plays rounds until the input is exhausted, echoing the board and each outcome.
/// Returns the number of rounds played.
pub fn run_rounds<S, W>(game: &mut Game, input: &mut S, out: &mut W, options: RenderOptions) -> usize
where
    S: SquareSource + ?Sized,
    W: Write + ?Sized,
{
    let mut rounds = 0;
    loop {
        write!(out, "{}", render_board(&game.snapshot(), options)).ok();
        match game.attempt_round(input) {
            Ok(outcome) => {
                rounds += 1;
                writeln!(out, "{}", describe_outcome(&outcome)).ok();
            }
            Err(ChessError::InputClosed) => {
                debug!(rounds, "input closed");
                break;
            }
            Err(e) => {
                error!(%e, "round aborted");
                break;
            }
        }
    }
    out.flush().ok();
    rounds
}

//! FEN-like piece placement strings.
//!
//! Ranks are listed from row 7 down to row 0 and separated by `/`; digits
//! stand for runs of empty cells. Upper-case letters belong to player one,
//! lower-case letters to player two. Only placement is encoded: the side to
//! move is passed separately and movement flags are derived from the rows.

use super::{ChessBoard, ChessField, Color, PieceKind, PieceType, Player, BOARD_LENGTH};
use crate::error::ChessError;

pub const INITIAL_LAYOUT: &str = "rnbkqbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBKQBNR";

/// Parses a placement string into a board with the default player colors.
/// Pawns standing on their start row may still double-jump.
pub fn from_layout(layout: &str, player_one_turn: bool) -> Result<ChessBoard, ChessError> {
    let colors = [Color::DEFAULT_PLAYER_ONE, Color::DEFAULT_PLAYER_TWO];
    let mut board = ChessBoard::empty(colors, player_one_turn);

    let ranks: Vec<&str> = layout.trim().split('/').collect();
    if ranks.len() != BOARD_LENGTH {
        return Err(ChessError::InvalidLayout(format!(
            "expected {} ranks, found {}",
            BOARD_LENGTH,
            ranks.len()
        )));
    }

    for (rank_index, rank) in ranks.iter().enumerate() {
        let row = (BOARD_LENGTH - 1 - rank_index) as u8;
        let mut col = 0usize;

        for c in rank.chars() {
            if let Some(skip) = c.to_digit(10) {
                col += skip as usize;
                continue;
            }
            if col >= BOARD_LENGTH {
                return Err(ChessError::InvalidLayout(format!("too many squares in row {}", row)));
            }
            let piece_type = PieceType::from_code(c)
                .ok_or_else(|| ChessError::InvalidLayout(format!("invalid piece character: {}", c)))?;
            let player_one = c.is_ascii_uppercase();
            let color = if player_one { colors[0] } else { colors[1] };

            let field = ChessField::new(row, col as u8);
            let kind = match PieceKind::from_type(piece_type, player_one) {
                PieceKind::Pawn { moving_up, .. } => PieceKind::Pawn {
                    moving_up,
                    double_jumpable: row == pawn_start_row(moving_up),
                },
                other => other,
            };
            board.place(color, kind, field);
            col += 1;
        }

        if col != BOARD_LENGTH {
            return Err(ChessError::InvalidLayout(format!(
                "row {} covers {} squares instead of {}",
                row, col, BOARD_LENGTH
            )));
        }
    }

    Ok(board)
}

pub fn to_layout(board: &ChessBoard) -> String {
    let mut layout = String::new();
    let player_one_color = board.player_color(Player::One);

    for row in (0..BOARD_LENGTH as u8).rev() {
        let mut empty_count = 0;

        for col in 0..BOARD_LENGTH as u8 {
            match board.get_piece_at(row as i32, col as i32) {
                Some(piece) => {
                    if empty_count > 0 {
                        layout.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    let code = piece.symbol();
                    layout.push(if piece.color == player_one_color {
                        code
                    } else {
                        code.to_ascii_lowercase()
                    });
                }
                None => empty_count += 1,
            }
        }

        if empty_count > 0 {
            layout.push_str(&empty_count.to_string());
        }
        if row > 0 {
            layout.push('/');
        }
    }

    layout
}

fn pawn_start_row(moving_up: bool) -> u8 {
    if moving_up {
        1
    } else {
        BOARD_LENGTH as u8 - 2
    }
}

pub mod layout;
pub mod zobrist_hash;
pub use zobrist_hash::ZobristHash;
pub use zobrist_hash::ZOBRIST;
pub mod model;
pub use model::{ChessField, Color, PieceId, PieceType, Player, Square, BOARD_LENGTH};
pub mod piece;
pub use piece::{Piece, PieceFlags, PieceKind};
mod move_record;
pub use move_record::MoveRecord;

mod chess_board;
mod movement;
pub mod test_utils;
pub use chess_board::ChessBoard;

/// Read access to piece placement, all the movement rules need.
pub trait BoardView {
    fn piece_at(&self, field: ChessField) -> Option<&Piece>;
}

/// A detached copy of the grid, for renderers and rule checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardSnapshot {
    pub cells: [[Option<Piece>; BOARD_LENGTH]; BOARD_LENGTH],
    pub player_one_turn: bool,
}

impl BoardView for BoardSnapshot {
    fn piece_at(&self, field: ChessField) -> Option<&Piece> {
        self.cells[field.row as usize][field.col as usize].as_ref()
    }
}

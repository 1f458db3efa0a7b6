use super::{ChessBoard, Color, PieceType, BOARD_LENGTH};
use lazy_static::lazy_static;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use std::sync::Arc;

const COLOR_COUNT: usize = Color::ALL.len();

/// Position fingerprint over piece placement and side to move.
pub struct ZobristHash {
    piece_keys: [[[u64; BOARD_LENGTH * BOARD_LENGTH]; 6]; COLOR_COUNT],
    side_to_move_key: u64,
}

impl ZobristHash {
    fn new(seed: u64) -> Self {
        let mut rng = Pcg64::seed_from_u64(seed);

        // Random numbers for every color, piece type and square
        let mut piece_keys = [[[0; BOARD_LENGTH * BOARD_LENGTH]; 6]; COLOR_COUNT];
        for color_keys in &mut piece_keys {
            for piece_type_keys in color_keys {
                for square_key in piece_type_keys {
                    *square_key = rng.gen();
                }
            }
        }

        let side_to_move_key = rng.gen();

        ZobristHash {
            piece_keys,
            side_to_move_key,
        }
    }

    pub fn piece_key(&self, color: Color, piece_type: PieceType, square_index: usize) -> u64 {
        self.piece_keys[color.index()][piece_type.index()][square_index]
    }

    pub fn calculate_hash(&self, board: &ChessBoard) -> u64 {
        let mut hash = 0;

        for (field, piece) in board.pieces_with_coordinates() {
            hash ^= self.piece_key(piece.color, piece.piece_type(), field.index());
        }

        if !board.is_player_one_turn() {
            hash ^= self.side_to_move_key;
        }

        hash
    }
}

lazy_static! {
    pub static ref ZOBRIST: Arc<ZobristHash> = Arc::new(ZobristHash::new(42));
}

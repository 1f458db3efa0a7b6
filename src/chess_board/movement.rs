use super::{BoardView, ChessField, Piece, PieceKind};

const KNIGHT_MOVES: [(i32, i32); 8] = [(-2, -1), (-1, -2), (1, -2), (2, -1), (2, 1), (1, 2), (-1, 2), (-2, 1)];

impl Piece {
    /// Whether this piece may move to `target` on the given board.
    ///
    /// The board is read as it currently stands, so the piece is still on its
    /// own square and any piece on `target` is a capture candidate. Bounds are
    /// guaranteed by `ChessField`. King captures are refused by the board, not here.
    pub fn can_move<B: BoardView + ?Sized>(&self, target: ChessField, board: &B) -> bool {
        if target == self.position {
            return false;
        }
        if let Some(occupant) = board.piece_at(target) {
            if occupant.color == self.color {
                return false;
            }
        }

        let d_row = target.row as i32 - self.position.row as i32;
        let d_col = target.col as i32 - self.position.col as i32;

        match self.kind {
            PieceKind::Pawn {
                moving_up,
                double_jumpable,
            } => self.pawn_can_move(target, d_row, d_col, moving_up, double_jumpable, board),
            PieceKind::Rook => is_orthogonal(d_row, d_col) && self.is_path_clear(target, board),
            PieceKind::Bishop => is_diagonal(d_row, d_col) && self.is_path_clear(target, board),
            PieceKind::Queen => {
                (is_orthogonal(d_row, d_col) || is_diagonal(d_row, d_col)) && self.is_path_clear(target, board)
            }
            PieceKind::Knight => KNIGHT_MOVES.contains(&(d_row, d_col)),
            PieceKind::King => d_row.abs() <= 1 && d_col.abs() <= 1,
        }
    }

    fn pawn_can_move<B: BoardView + ?Sized>(
        &self,
        target: ChessField,
        d_row: i32,
        d_col: i32,
        moving_up: bool,
        double_jumpable: bool,
        board: &B,
    ) -> bool {
        let forward = if moving_up { 1 } else { -1 };
        let target_occupied = board.piece_at(target).is_some();

        match (d_row, d_col.abs()) {
            // Single step onto an empty square
            (r, 0) if r == forward => !target_occupied,
            // Double step, both squares must be free
            (r, 0) if r == 2 * forward && double_jumpable => {
                let intermediate = self.position.offset(forward, 0);
                !target_occupied && intermediate.map_or(false, |f| board.piece_at(f).is_none())
            }
            // Diagonal capture, same-color targets were refused above
            (r, 1) if r == forward => target_occupied,
            _ => false,
        }
    }

    /// Every square strictly between the piece and `target` is empty.
    /// Callers make sure `target` lies on a straight line or diagonal.
    fn is_path_clear<B: BoardView + ?Sized>(&self, target: ChessField, board: &B) -> bool {
        let step_row = (target.row as i32 - self.position.row as i32).signum();
        let step_col = (target.col as i32 - self.position.col as i32).signum();

        let mut current = self.position;
        loop {
            current = match current.offset(step_row, step_col) {
                Some(field) => field,
                None => return false,
            };
            if current == target {
                return true;
            }
            if board.piece_at(current).is_some() {
                return false;
            }
        }
    }
}

fn is_orthogonal(d_row: i32, d_col: i32) -> bool {
    (d_row == 0) != (d_col == 0)
}

fn is_diagonal(d_row: i32, d_col: i32) -> bool {
    d_row != 0 && d_row.abs() == d_col.abs()
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::{assert_targets, board_from_layout};
    use super::super::ChessBoard;
    use super::*;

    fn piece(board: &ChessBoard, row: u8, col: u8) -> Piece {
        *board.piece_at(ChessField::new(row, col)).unwrap()
    }

    #[test]
    fn test_pawn_moves_from_start() {
        let board = ChessBoard::default();
        assert_targets(&board, piece(&board, 1, 4), vec![(2, 4), (3, 4)]);
        assert_targets(&board, piece(&board, 6, 4), vec![(5, 4), (4, 4)]);
    }

    #[test]
    fn test_pawn_blocked_double_step() {
        // Player two knight directly in front of the e-pawn, another two squares ahead of the d-pawn
        let board = board_from_layout("rnbkqbnr/pppppppp/8/8/3n4/4n3/PPPPPPPP/RNBKQBNR", true);
        assert_targets(&board, piece(&board, 1, 4), vec![]);
        assert_targets(&board, piece(&board, 1, 3), vec![(2, 3), (2, 4)]);
        assert_targets(&board, piece(&board, 1, 5), vec![(2, 4), (2, 5), (3, 5)]);
    }

    #[test]
    fn test_pawn_captures_only_opponents() {
        let board = board_from_layout("k7/8/8/8/8/1p1P4/2P5/K7", true);
        let pawn = piece(&board, 1, 2);
        assert!(pawn.can_move(ChessField::new(2, 1), &board));
        assert!(!pawn.can_move(ChessField::new(2, 3), &board));
        assert!(!pawn.can_move(ChessField::new(0, 1), &board));
        assert!(!pawn.can_move(ChessField::new(1, 3), &board));
    }

    #[test]
    fn test_pawn_without_double_jump() {
        let board = board_from_layout("k7/8/8/8/8/4P3/8/K7", true);
        let pawn = piece(&board, 2, 4);
        assert_targets(&board, pawn, vec![(3, 4)]);
    }

    #[test]
    fn test_pawn_moving_down() {
        let board = board_from_layout("k7/8/3p4/2P1P3/8/8/8/K7", true);
        let pawn = piece(&board, 5, 3);
        assert_targets(&board, pawn, vec![(4, 2), (4, 3), (4, 4)]);
    }

    #[test]
    fn test_rook_moves() {
        let board = board_from_layout("k7/8/8/3p4/8/8/3R1P2/K7", true);
        assert_targets(
            &board,
            piece(&board, 1, 3),
            vec![(0, 3), (2, 3), (3, 3), (4, 3), (1, 0), (1, 1), (1, 2), (1, 4)],
        );
    }

    #[test]
    fn test_bishop_moves() {
        let board = board_from_layout("k7/8/8/8/8/4p3/8/K1B5", true);
        assert_targets(&board, piece(&board, 0, 2), vec![(1, 1), (2, 0), (1, 3), (2, 4)]);
    }

    #[test]
    fn test_queen_moves() {
        let board = board_from_layout("k7/8/8/8/8/8/PP6/KQ6", true);
        assert_targets(
            &board,
            piece(&board, 0, 1),
            vec![
                (0, 2),
                (0, 3),
                (0, 4),
                (0, 5),
                (0, 6),
                (0, 7),
                (1, 2),
                (2, 3),
                (3, 4),
                (4, 5),
                (5, 6),
                (6, 7),
            ],
        );
    }

    #[test]
    fn test_knight_jumps() {
        let board = ChessBoard::default();
        assert_targets(&board, piece(&board, 0, 1), vec![(2, 0), (2, 2)]);
        assert_targets(&board, piece(&board, 7, 6), vec![(5, 5), (5, 7)]);
    }

    #[test]
    fn test_king_steps() {
        let board = board_from_layout("k7/8/8/8/3p4/3K4/8/8", true);
        assert_targets(
            &board,
            piece(&board, 2, 3),
            vec![(1, 2), (1, 3), (1, 4), (2, 2), (2, 4), (3, 2), (3, 3), (3, 4)],
        );
    }

    #[test]
    fn test_same_color_target_always_illegal() {
        let board = ChessBoard::default();
        for field in board.occupied_fields() {
            let mover = *board.piece_at(field).unwrap();
            for other in board.occupied_fields() {
                if board.piece_at(other).unwrap().color == mover.color {
                    assert!(!mover.can_move(other, &board), "{:?} -> {}", mover, other);
                }
            }
        }
    }

    #[test]
    fn test_rules_read_a_snapshot() {
        let board = ChessBoard::default();
        let snapshot = board.snapshot();
        let rook = piece(&board, 0, 0);
        assert!(!rook.can_move(ChessField::new(5, 5), &snapshot));
        assert!(!rook.can_move(ChessField::new(3, 0), &snapshot));
        assert!(piece(&board, 0, 6).can_move(ChessField::new(2, 5), &snapshot));
    }
}

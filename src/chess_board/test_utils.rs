#![cfg(test)]

use super::{BoardView, ChessBoard, ChessField, Piece, BOARD_LENGTH};

pub fn board_from_layout(layout: &str, player_one_turn: bool) -> ChessBoard {
    ChessBoard::from_layout(layout, player_one_turn).expect("Invalid layout string")
}

/// Compares every field `piece` may move to against `expected` (row, col) pairs.
pub fn assert_targets<B: BoardView>(board: &B, piece: Piece, mut expected: Vec<(u8, u8)>) {
    let mut generated: Vec<(u8, u8)> = (0..BOARD_LENGTH as u8)
        .flat_map(|row| (0..BOARD_LENGTH as u8).map(move |col| (row, col)))
        .filter(|&(row, col)| piece.can_move(ChessField::new(row, col), board))
        .collect();
    generated.sort();
    expected.sort();

    assert_eq!(generated, expected, "targets of {:?}", piece);
}

/// Every piece on the grid knows the field it stands on.
pub fn assert_consistent(board: &ChessBoard) {
    for (field, piece) in board.pieces_with_coordinates() {
        assert_eq!(piece.position, field, "{:?} is out of place", piece);
    }
}

use super::zobrist_hash::ZOBRIST;
use super::{
    layout, BoardSnapshot, BoardView, ChessField, Color, MoveRecord, Piece, PieceId, PieceKind, PieceType, Player,
    Square, BOARD_LENGTH,
};
use crate::error::{ChessError, IllegalMove};
use tracing::{debug, info, warn};

const BACK_RANK: [PieceType; BOARD_LENGTH] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::King,
    PieceType::Queen,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

/// The board owns every piece ever placed on it. Cells hold handles into the
/// piece arena; a captured piece leaves the grid but stays in the arena until
/// the board releases it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChessBoard {
    squares: [[Square; BOARD_LENGTH]; BOARD_LENGTH],
    pieces: Vec<Option<Piece>>,
    player_one_turn: bool,
    colors: [Color; 2],
}

impl Default for ChessBoard {
    fn default() -> Self {
        Self::new(Color::DEFAULT_PLAYER_ONE, Color::DEFAULT_PLAYER_TWO)
    }
}

impl ChessBoard {
    /// Sets up the starting position. Player one owns ranks 0 and 1 and moves first.
    /// Equal colors fall back to the defaults.
    pub fn new(color_player_one: Color, color_player_two: Color) -> Self {
        let colors = if color_player_one == color_player_two {
            warn!(color = %color_player_one, "both players share a color, using defaults");
            [Color::DEFAULT_PLAYER_ONE, Color::DEFAULT_PLAYER_TWO]
        } else {
            [color_player_one, color_player_two]
        };

        let mut board = Self::empty(colors, true);
        for (col, &piece_type) in BACK_RANK.iter().enumerate() {
            let col = col as u8;
            board.place(colors[0], PieceKind::pawn(true), ChessField::new(1, col));
            board.place(colors[1], PieceKind::pawn(false), ChessField::new(6, col));
            board.place(colors[0], PieceKind::from_type(piece_type, true), ChessField::new(0, col));
            board.place(colors[1], PieceKind::from_type(piece_type, false), ChessField::new(7, col));
        }
        board
    }

    /// Like `new`, but from color names. Unknown names fall back to the defaults.
    pub fn from_color_names(color_player_one: &str, color_player_two: &str) -> Self {
        match (color_player_one.parse::<Color>(), color_player_two.parse::<Color>()) {
            (Ok(one), Ok(two)) => Self::new(one, two),
            _ => {
                warn!(color_player_one, color_player_two, "unknown player color, using defaults");
                Self::default()
            }
        }
    }

    /// Delegates layout parsing to the `layout` module.
    pub fn from_layout(placement: &str, player_one_turn: bool) -> Result<Self, ChessError> {
        layout::from_layout(placement, player_one_turn)
    }

    pub fn to_layout(&self) -> String {
        layout::to_layout(self)
    }

    pub(crate) fn empty(colors: [Color; 2], player_one_turn: bool) -> Self {
        Self {
            squares: [[Square::Empty; BOARD_LENGTH]; BOARD_LENGTH],
            pieces: Vec::with_capacity(32),
            player_one_turn,
            colors,
        }
    }

    pub(crate) fn place(&mut self, color: Color, kind: PieceKind, field: ChessField) -> PieceId {
        let id = PieceId(self.pieces.len());
        self.pieces.push(Some(Piece::new(color, kind, field)));
        *self.square_mut(field) = Square::Occupied(id);
        id
    }
}

impl ChessBoard {
    /// The piece on (row, col), or `None` if the cell is empty or off the board.
    pub fn get_piece_at(&self, row: i32, col: i32) -> Option<&Piece> {
        ChessField::try_new(row, col).and_then(|field| self.piece_at(field))
    }

    pub fn piece_id_at(&self, field: ChessField) -> Option<PieceId> {
        match self.cell(field) {
            Square::Occupied(id) => Some(id),
            Square::Empty => None,
        }
    }

    pub fn cell(&self, field: ChessField) -> Square {
        self.squares[field.row as usize][field.col as usize]
    }

    /// Looks a piece up by handle, whether it is on the grid or displaced by a capture.
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id.0).and_then(Option::as_ref)
    }

    fn piece_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.pieces.get_mut(id.0).and_then(Option::as_mut)
    }

    fn square_mut(&mut self, field: ChessField) -> &mut Square {
        &mut self.squares[field.row as usize][field.col as usize]
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        let mut cells = [[None; BOARD_LENGTH]; BOARD_LENGTH];
        for (field, piece) in self.pieces_with_coordinates() {
            cells[field.row as usize][field.col as usize] = Some(*piece);
        }
        BoardSnapshot {
            cells,
            player_one_turn: self.player_one_turn,
        }
    }

    /// All pieces on the grid with the field they stand on, row by row.
    pub fn pieces_with_coordinates(&self) -> impl Iterator<Item = (ChessField, &Piece)> + '_ {
        (0..BOARD_LENGTH as u8)
            .flat_map(|row| (0..BOARD_LENGTH as u8).map(move |col| ChessField::new(row, col)))
            .filter_map(move |field| self.piece_at(field).map(|piece| (field, piece)))
    }

    pub fn occupied_fields(&self) -> impl Iterator<Item = ChessField> + '_ {
        self.pieces_with_coordinates().map(|(field, _)| field)
    }

    /// Pieces still owned by the board, including displaced ones.
    pub fn live_piece_count(&self) -> usize {
        self.pieces.iter().filter(|p| p.is_some()).count()
    }

    pub fn is_player_one_turn(&self) -> bool {
        self.player_one_turn
    }

    pub fn active_player(&self) -> Player {
        if self.player_one_turn {
            Player::One
        } else {
            Player::Two
        }
    }

    pub fn player_color(&self, player: Player) -> Color {
        match player {
            Player::One => self.colors[0],
            Player::Two => self.colors[1],
        }
    }

    pub fn active_color(&self) -> Color {
        self.player_color(self.active_player())
    }

    pub fn toggle_turn(&mut self) {
        self.player_one_turn = !self.player_one_turn;
    }

    pub fn position_hash(&self) -> u64 {
        ZOBRIST.calculate_hash(self)
    }
}

impl ChessBoard {
    /// Moves the piece on (row, col) to (new_row, new_col) if the player to move may do so.
    ///
    /// Returns false and leaves the board untouched when either square is off the
    /// board, the origin is empty or holds an opponent's piece, the piece's rule
    /// forbids the target, or the target holds a king. Does not change the turn.
    pub fn make_move(&mut self, row: i32, col: i32, new_row: i32, new_col: i32) -> bool {
        match self.try_move(row, col, new_row, new_col) {
            Ok(()) => true,
            Err(reason) => {
                debug!(row, col, new_row, new_col, %reason, "move rejected");
                false
            }
        }
    }

    pub(crate) fn try_move(&mut self, row: i32, col: i32, new_row: i32, new_col: i32) -> Result<(), IllegalMove> {
        let (from, to) = self.validate_move(row, col, new_row, new_col)?;
        let id = self.piece_id_at(from).ok_or(IllegalMove::EmptyOrigin)?;

        // A captured piece only loses its cell, the arena keeps it
        *self.square_mut(to) = Square::Occupied(id);
        *self.square_mut(from) = Square::Empty;
        if let Some(piece) = self.piece_mut(id) {
            piece.flag_moved(to);
        }

        info!(%from, %to, "moved");
        Ok(())
    }

    fn validate_move(
        &self,
        row: i32,
        col: i32,
        new_row: i32,
        new_col: i32,
    ) -> Result<(ChessField, ChessField), IllegalMove> {
        let from = ChessField::try_new(row, col).ok_or(IllegalMove::OutOfBounds)?;
        let to = ChessField::try_new(new_row, new_col).ok_or(IllegalMove::OutOfBounds)?;

        let piece = self.piece_at(from).ok_or(IllegalMove::EmptyOrigin)?;
        if piece.color != self.active_color() {
            return Err(IllegalMove::WrongColor);
        }
        if !piece.can_move(to, self) {
            return Err(IllegalMove::RuleViolation);
        }
        if self.piece_at(to).map_or(false, Piece::is_king) {
            return Err(IllegalMove::KingCapture);
        }
        Ok((from, to))
    }

    /// Puts the pieces of `record` back: the mover on its origin, the captured
    /// piece (if any) on the destination. Turn ownership is left to the caller.
    pub(crate) fn unmake_move(&mut self, record: &MoveRecord, restore_flags: bool) {
        debug_assert_eq!(self.piece_id_at(record.to), Some(record.moved));

        *self.square_mut(record.from) = Square::Occupied(record.moved);
        if let Some(piece) = self.piece_mut(record.moved) {
            piece.position = record.from;
            if restore_flags {
                piece.restore_flags(record.moved_flags);
            }
        }

        let restored = match record.captured {
            Some(id) => {
                if let Some(piece) = self.piece_mut(id) {
                    piece.position = record.to;
                }
                Square::Occupied(id)
            }
            None => Square::Empty,
        };
        *self.square_mut(record.to) = restored;
    }

    /// Drops a displaced piece for good.
    pub(crate) fn release(&mut self, id: PieceId) -> Option<Piece> {
        debug_assert!(!self.occupied_fields().any(|f| self.piece_id_at(f) == Some(id)));
        self.pieces.get_mut(id.0).and_then(Option::take)
    }
}

impl BoardView for ChessBoard {
    fn piece_at(&self, field: ChessField) -> Option<&Piece> {
        match self.cell(field) {
            Square::Occupied(id) => self.piece(id),
            Square::Empty => None,
        }
    }
}

use super::{ChessField, Color, PieceType};

/// Movement rule of a piece. Pawns carry their direction and double-jump right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceKind {
    Pawn { moving_up: bool, double_jumpable: bool },
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl PieceKind {
    pub fn pawn(moving_up: bool) -> Self {
        PieceKind::Pawn {
            moving_up,
            double_jumpable: true,
        }
    }

    pub fn from_type(piece_type: PieceType, moving_up: bool) -> Self {
        match piece_type {
            PieceType::Pawn => PieceKind::pawn(moving_up),
            PieceType::Rook => PieceKind::Rook,
            PieceType::Knight => PieceKind::Knight,
            PieceType::Bishop => PieceKind::Bishop,
            PieceType::Queen => PieceKind::Queen,
            PieceType::King => PieceKind::King,
        }
    }

    pub fn piece_type(&self) -> PieceType {
        match self {
            PieceKind::Pawn { .. } => PieceType::Pawn,
            PieceKind::Rook => PieceType::Rook,
            PieceKind::Knight => PieceType::Knight,
            PieceKind::Bishop => PieceType::Bishop,
            PieceKind::Queen => PieceType::Queen,
            PieceKind::King => PieceType::King,
        }
    }
}

/// The movement flags a move can change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceFlags {
    pub has_moved: bool,
    pub double_jumpable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
    pub position: ChessField,
    pub has_moved: bool,
}

impl Piece {
    pub fn new(color: Color, kind: PieceKind, position: ChessField) -> Self {
        Self {
            color,
            kind,
            position,
            has_moved: false,
        }
    }

    pub fn piece_type(&self) -> PieceType {
        self.kind.piece_type()
    }

    /// One-letter type code used by renderers.
    pub fn symbol(&self) -> char {
        self.piece_type().code()
    }

    pub fn is_king(&self) -> bool {
        self.kind == PieceKind::King
    }

    pub fn flags(&self) -> PieceFlags {
        PieceFlags {
            has_moved: self.has_moved,
            double_jumpable: matches!(
                self.kind,
                PieceKind::Pawn {
                    double_jumpable: true,
                    ..
                }
            ),
        }
    }

    pub fn restore_flags(&mut self, flags: PieceFlags) {
        self.has_moved = flags.has_moved;
        if let PieceKind::Pawn {
            double_jumpable, ..
        } = &mut self.kind
        {
            *double_jumpable = flags.double_jumpable;
        }
    }

    /// Records a completed move: new position, moved flag, and a pawn loses its double jump.
    pub(crate) fn flag_moved(&mut self, to: ChessField) {
        self.position = to;
        self.has_moved = true;
        if let PieceKind::Pawn {
            double_jumpable, ..
        } = &mut self.kind
        {
            *double_jumpable = false;
        }
    }
}

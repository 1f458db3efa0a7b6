use super::{ChessField, PieceFlags, PieceId};

/// Everything needed to take back one executed move.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct MoveRecord {
    pub from: ChessField,
    pub to: ChessField,
    pub moved: PieceId,
    /// Displaced from the board but kept alive until this record is undone or discarded.
    pub captured: Option<PieceId>,
    /// Flags of the moved piece before the move.
    pub moved_flags: PieceFlags,
}

impl MoveRecord {
    pub fn new(
        from: ChessField,
        to: ChessField,
        moved: PieceId,
        captured: Option<PieceId>,
        moved_flags: PieceFlags,
    ) -> Self {
        Self {
            from,
            to,
            moved,
            captured,
            moved_flags,
        }
    }

    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

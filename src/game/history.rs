use crate::chess_board::MoveRecord;
use circular_buffer::CircularBuffer;

/// Records kept before the oldest is discarded.
pub const HISTORY_CAPACITY: usize = 64;

/// Executed moves, most recent last.
#[derive(Debug, Clone)]
pub struct MoveHistory {
    records: CircularBuffer<HISTORY_CAPACITY, MoveRecord>,
}

impl Default for MoveHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveHistory {
    pub fn new() -> Self {
        Self {
            records: CircularBuffer::new(),
        }
    }

    /// Pushes a record. On a full history the oldest record is dropped and returned,
    /// so the caller can release the piece it captured.
    pub fn push(&mut self, record: MoveRecord) -> Option<MoveRecord> {
        let discarded = if self.records.is_full() {
            self.records.pop_front()
        } else {
            None
        };
        self.records.push_back(record);
        discarded
    }

    pub fn pop(&mut self) -> Option<MoveRecord> {
        self.records.pop_back()
    }

    pub fn last(&self) -> Option<&MoveRecord> {
        self.records.back()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &MoveRecord> + '_ {
        self.records.iter()
    }
}

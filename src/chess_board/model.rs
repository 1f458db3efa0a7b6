use lazy_static::lazy_static;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

pub const BOARD_LENGTH: usize = 8;

/// Colors a player can be assigned. Each has an ANSI code for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

lazy_static! {
    static ref COLOR_NAMES: HashMap<&'static str, Color> = {
        let mut names = HashMap::new();
        for color in Color::ALL {
            names.insert(color.name(), color);
        }
        names
    };
}

impl Color {
    pub const ALL: [Color; 8] = [
        Color::Black,
        Color::Red,
        Color::Green,
        Color::Yellow,
        Color::Blue,
        Color::Magenta,
        Color::Cyan,
        Color::White,
    ];

    pub const DEFAULT_PLAYER_ONE: Color = Color::Black;
    pub const DEFAULT_PLAYER_TWO: Color = Color::White;

    pub fn name(&self) -> &'static str {
        match self {
            Color::Black => "BLACK",
            Color::Red => "RED",
            Color::Green => "GREEN",
            Color::Yellow => "YELLOW",
            Color::Blue => "BLUE",
            Color::Magenta => "MAGENTA",
            Color::Cyan => "CYAN",
            Color::White => "WHITE",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Color::Black => 0,
            Color::Red => 1,
            Color::Green => 2,
            Color::Yellow => 3,
            Color::Blue => 4,
            Color::Magenta => 5,
            Color::Cyan => 6,
            Color::White => 7,
        }
    }
}

impl FromStr for Color {
    type Err = String;

    /// Accepts any casing of the allowed color names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        COLOR_NAMES
            .get(s.trim().to_ascii_uppercase().as_str())
            .copied()
            .ok_or_else(|| format!("Unknown color: {}", s))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The two seats at the board. Player one sits on the low ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn opposite(&self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::One => write!(f, "PLAYER 1"),
            Player::Two => write!(f, "PLAYER 2"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash)]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceType {
    pub fn index(&self) -> usize {
        match self {
            PieceType::Pawn => 0,
            PieceType::Knight => 1,
            PieceType::Bishop => 2,
            PieceType::Rook => 3,
            PieceType::Queen => 4,
            PieceType::King => 5,
        }
    }

    pub fn code(&self) -> char {
        match self {
            PieceType::Pawn => 'P',
            PieceType::Knight => 'N',
            PieceType::Bishop => 'B',
            PieceType::Rook => 'R',
            PieceType::Queen => 'Q',
            PieceType::King => 'K',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_uppercase() {
            'P' => Some(PieceType::Pawn),
            'N' => Some(PieceType::Knight),
            'B' => Some(PieceType::Bishop),
            'R' => Some(PieceType::Rook),
            'Q' => Some(PieceType::Queen),
            'K' => Some(PieceType::King),
            _ => None,
        }
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Stable handle of a piece inside the board's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub(crate) usize);

/// A board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Square {
    Occupied(PieceId),
    Empty,
}

/// A coordinate known to be on the board.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
pub struct ChessField {
    pub row: u8,
    pub col: u8,
}

impl ChessField {
    pub fn new(row: u8, col: u8) -> Self {
        debug_assert!((row as usize) < BOARD_LENGTH && (col as usize) < BOARD_LENGTH);
        Self { row, col }
    }

    /// Bounds-checks raw coordinates, as they arrive from input.
    pub fn try_new(row: i32, col: i32) -> Option<Self> {
        let range = 0..BOARD_LENGTH as i32;
        if range.contains(&row) && range.contains(&col) {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// The field shifted by a signed delta, if still on the board.
    pub fn offset(&self, d_row: i32, d_col: i32) -> Option<Self> {
        Self::try_new(self.row as i32 + d_row, self.col as i32 + d_col)
    }

    pub fn index(&self) -> usize {
        self.row as usize * BOARD_LENGTH + self.col as usize
    }
}

impl fmt::Display for ChessField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_parsing() {
        assert_eq!("MAGENTA".parse::<Color>(), Ok(Color::Magenta));
        assert_eq!("cyan".parse::<Color>(), Ok(Color::Cyan));
        assert_eq!(" White ".parse::<Color>(), Ok(Color::White));
        assert!("ORANGE".parse::<Color>().is_err());
        assert!("".parse::<Color>().is_err());
    }

    #[test]
    fn test_piece_codes() {
        let codes: String = [
            PieceType::Pawn,
            PieceType::Rook,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Queen,
            PieceType::King,
        ]
        .iter()
        .map(|p| p.code())
        .collect();
        assert_eq!(codes, "PRNBQK");
        assert_eq!(PieceType::from_code('n'), Some(PieceType::Knight));
        assert_eq!(PieceType::from_code('x'), None);
    }

    #[test]
    fn test_field_bounds() {
        assert_eq!(ChessField::try_new(0, 7), Some(ChessField::new(0, 7)));
        assert_eq!(ChessField::try_new(8, 0), None);
        assert_eq!(ChessField::try_new(0, -1), None);
        assert_eq!(ChessField::new(3, 3).offset(-4, 0), None);
        assert_eq!(ChessField::new(3, 3).offset(2, -1), Some(ChessField::new(5, 2)));
        assert_eq!(ChessField::new(1, 4).to_string(), "(1,4)");
    }
}

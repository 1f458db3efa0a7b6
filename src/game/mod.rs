//! Turn protocol on top of the board.
//!
//! A round asks the player to move for an origin and a destination square and
//! either plays the move or, on malformed input, takes back the last move.
//! The game value is the whole mutable state of a match: board, history and
//! configuration travel together and nothing is kept in globals.

pub mod history;
pub mod input;

pub use history::{MoveHistory, HISTORY_CAPACITY};
pub use input::{Coordinates, ScriptedSquares, SquareRequest, SquareSource};

use crate::chess_board::{BoardSnapshot, ChessBoard, ChessField, Color, MoveRecord, Player};
use crate::error::ChessError;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub player_one_color: Color,
    pub player_two_color: Color,
    /// Whether undo also resets the mover's `has_moved` and double-jump flags.
    /// Off by default: a pawn whose first double step is taken back stays
    /// unable to double-jump.
    pub undo_restores_flags: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_one_color: Color::DEFAULT_PLAYER_ONE,
            player_two_color: Color::DEFAULT_PLAYER_TWO,
            undo_restores_flags: false,
        }
    }
}

impl GameConfig {
    /// Colors from their names. Unknown or equal names give the default pair.
    pub fn with_color_names(color_player_one: &str, color_player_two: &str, undo_restores_flags: bool) -> Self {
        let defaults = Self {
            undo_restores_flags,
            ..Self::default()
        };
        match (color_player_one.parse::<Color>(), color_player_two.parse::<Color>()) {
            (Ok(one), Ok(two)) if one != two => Self {
                player_one_color: one,
                player_two_color: two,
                ..defaults
            },
            _ => {
                warn!(color_player_one, color_player_two, "invalid player colors, using defaults");
                defaults
            }
        }
    }
}

/// Result of one round, as reported to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    Moved { from: ChessField, to: ChessField },
    /// The last move was taken back; `from` is where the piece returned to.
    Undone { from: ChessField },
    UnableToMove { from: Coordinates, to: Coordinates },
    UndoFailed,
}

impl RoundOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RoundOutcome::Moved { .. } | RoundOutcome::Undone { .. })
    }
}

#[derive(Debug, Clone)]
pub struct Game {
    board: ChessBoard,
    history: MoveHistory,
    config: GameConfig,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        let board = ChessBoard::new(config.player_one_color, config.player_two_color);
        Self::with_board(board, config)
    }

    /// Starts from an existing position. The board's colors win over the config's.
    pub fn with_board(board: ChessBoard, config: GameConfig) -> Self {
        let config = GameConfig {
            player_one_color: board.player_color(Player::One),
            player_two_color: board.player_color(Player::Two),
            ..config
        };
        Self {
            board,
            history: MoveHistory::new(),
            config,
        }
    }

    pub fn board(&self) -> &ChessBoard {
        &self.board
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        self.board.snapshot()
    }

    pub fn is_player_one_turn(&self) -> bool {
        self.board.is_player_one_turn()
    }

    pub fn active_player(&self) -> Player {
        self.board.active_player()
    }

    /// Plays one round against `input`.
    ///
    /// Only `ChessError::InputClosed` (or another non-recoverable input error)
    /// comes back as `Err`; illegal moves and failed undos are outcomes.
    pub fn attempt_round<S: SquareSource + ?Sized>(&mut self, input: &mut S) -> Result<RoundOutcome, ChessError> {
        let player = self.board.active_player();

        let from = match input.request_square(player, SquareRequest::Origin) {
            Ok(coordinates) => coordinates,
            Err(ChessError::MalformedInput(token)) => {
                debug!(%token, "malformed origin, undoing");
                return Ok(self.undo_round());
            }
            Err(e) => return Err(e),
        };

        let to = match input.request_square(player, SquareRequest::Destination) {
            Ok(coordinates) => coordinates,
            Err(ChessError::MalformedInput(token)) => {
                debug!(%token, "malformed destination, undoing");
                return Ok(self.undo_round());
            }
            Err(e) => return Err(e),
        };

        Ok(self.attempt_move(from, to))
    }

    /// Plays a move for the player whose turn it is, records it and passes the turn.
    pub fn attempt_move(&mut self, from: Coordinates, to: Coordinates) -> RoundOutcome {
        let Some(record) = self.prepare_record(from, to) else {
            debug!(?from, ?to, "no piece to move");
            return RoundOutcome::UnableToMove { from, to };
        };

        if !self.board.make_move(from.0, from.1, to.0, to.1) {
            return RoundOutcome::UnableToMove { from, to };
        }

        if let Some(discarded) = self.history.push(record) {
            if let Some(captured) = discarded.captured {
                warn!(at = %discarded.to, "history full, releasing captured piece of the oldest move");
                self.board.release(captured);
            }
        }
        self.board.toggle_turn();
        debug!(hash = self.board.position_hash(), "position after move");

        RoundOutcome::Moved {
            from: record.from,
            to: record.to,
        }
    }

    /// What the history needs to know about a move, taken before it is played.
    fn prepare_record(&self, from: Coordinates, to: Coordinates) -> Option<MoveRecord> {
        let from = ChessField::try_new(from.0, from.1)?;
        let to = ChessField::try_new(to.0, to.1)?;
        let moved = self.board.piece_id_at(from)?;
        let flags = self.board.piece(moved)?.flags();
        Some(MoveRecord::new(from, to, moved, self.board.piece_id_at(to), flags))
    }

    /// Takes back the most recent move and passes the turn back.
    /// Returns the square the moved piece returned to.
    pub fn undo(&mut self) -> Result<ChessField, ChessError> {
        let record = self.history.pop().ok_or(ChessError::NoHistory)?;
        self.board.unmake_move(&record, self.config.undo_restores_flags);
        self.board.toggle_turn();

        info!(from = %record.from, to = %record.to, "undid move");
        debug!(hash = self.board.position_hash(), "position after undo");
        Ok(record.from)
    }

    fn undo_round(&mut self) -> RoundOutcome {
        match self.undo() {
            Ok(from) => RoundOutcome::Undone { from },
            Err(e) => {
                debug!(%e, "undo failed");
                RoundOutcome::UndoFailed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess_board::{PieceKind, PieceType};

    fn fields(board: &ChessBoard) -> Vec<(ChessField, PieceType, Color)> {
        board
            .pieces_with_coordinates()
            .map(|(f, p)| (f, p.piece_type(), p.color))
            .collect()
    }

    #[test]
    fn test_round_moves_and_toggles() {
        let mut game = Game::default();
        let mut input = ScriptedSquares::from_script("1 4 3 4  6 4 5 4");

        assert_eq!(
            game.attempt_round(&mut input),
            Ok(RoundOutcome::Moved {
                from: ChessField::new(1, 4),
                to: ChessField::new(3, 4)
            })
        );
        assert!(!game.is_player_one_turn());
        assert_eq!(
            game.board().get_piece_at(3, 4).unwrap().kind,
            PieceKind::Pawn {
                moving_up: true,
                double_jumpable: false
            }
        );

        assert!(game.attempt_round(&mut input).unwrap().is_success());
        assert!(game.is_player_one_turn());
        assert_eq!(game.history().len(), 2);
        assert_eq!(game.attempt_round(&mut input), Err(ChessError::InputClosed));
    }

    #[test]
    fn test_failed_move_changes_nothing() {
        let mut game = Game::default();
        let before = game.board().clone();
        let mut input = ScriptedSquares::from_script("0 0 5 5  6 4 5 4  9 9 0 0");

        for _ in 0..3 {
            let outcome = game.attempt_round(&mut input).unwrap();
            assert!(matches!(outcome, RoundOutcome::UnableToMove { .. }));
        }
        assert_eq!(game.board(), &before);
        assert!(game.history().is_empty());
        assert!(game.is_player_one_turn());
    }

    #[test]
    fn test_undo_with_empty_history() {
        let mut game = Game::default();
        let before = game.board().clone();
        let mut input = ScriptedSquares::from_script("undo");

        assert_eq!(game.attempt_round(&mut input), Ok(RoundOutcome::UndoFailed));
        assert_eq!(game.undo(), Err(ChessError::NoHistory));
        assert_eq!(game.board(), &before);
        assert!(game.is_player_one_turn());
    }

    #[test]
    fn test_malformed_destination_undoes() {
        let mut game = Game::default();
        let mut input = ScriptedSquares::from_script("0 6 2 5  6 0 x");

        assert!(game.attempt_round(&mut input).unwrap().is_success());
        assert_eq!(
            game.attempt_round(&mut input),
            Ok(RoundOutcome::Undone {
                from: ChessField::new(0, 6)
            })
        );
        assert!(game.is_player_one_turn());
        assert_eq!(game.board().to_layout(), ChessBoard::default().to_layout());
    }

    #[test]
    fn test_undo_is_inverse_of_move() {
        let mut game = Game::default();
        let before = fields(game.board());
        let hash = game.board().position_hash();

        game.attempt_move((0, 1), (2, 2));
        assert_ne!(fields(game.board()), before);
        assert_eq!(game.undo(), Ok(ChessField::new(0, 1)));

        assert_eq!(fields(game.board()), before);
        assert_eq!(game.board().position_hash(), hash);
        for (field, piece) in game.board().pieces_with_coordinates() {
            assert_eq!(piece.position, field);
        }
        assert!(game.is_player_one_turn());
    }

    #[test]
    fn test_undo_capture_restores_both_pieces() {
        let board = ChessBoard::from_layout("4k3/8/8/3p4/4P3/8/8/4K3", true).unwrap();
        let mut game = Game::with_board(board, GameConfig::default());
        let before = game.board().snapshot();

        assert_eq!(
            game.attempt_move((3, 4), (4, 3)),
            RoundOutcome::Moved {
                from: ChessField::new(3, 4),
                to: ChessField::new(4, 3)
            }
        );
        assert!(game.history().last().unwrap().is_capture());
        assert_eq!(game.board().occupied_fields().count(), 3);

        assert_eq!(game.undo(), Ok(ChessField::new(3, 4)));
        let captured = game.board().get_piece_at(4, 3).unwrap();
        assert_eq!(captured.piece_type(), PieceType::Pawn);
        assert_eq!(captured.color, Color::White);
        assert_eq!(captured.position, ChessField::new(4, 3));
        assert_eq!(game.board().get_piece_at(3, 4).unwrap().color, Color::Black);
        assert_eq!(game.board().occupied_fields().count(), 4);
        // The capturing pawn keeps its moved flag
        assert_ne!(game.board().snapshot(), before);
        assert_eq!(game.board().to_layout(), "4k3/8/8/3p4/4P3/8/8/4K3");
    }

    #[test]
    fn test_undo_keeps_flags_by_default() {
        let mut game = Game::default();
        game.attempt_move((1, 4), (3, 4));
        game.undo().unwrap();

        let pawn = game.board().get_piece_at(1, 4).unwrap();
        assert!(pawn.has_moved);
        assert_eq!(
            pawn.kind,
            PieceKind::Pawn {
                moving_up: true,
                double_jumpable: false
            }
        );
        // The pawn cannot double step again
        assert!(matches!(game.attempt_move((1, 4), (3, 4)), RoundOutcome::UnableToMove { .. }));
        assert!(game.attempt_move((1, 4), (2, 4)).is_success());
    }

    #[test]
    fn test_undo_restores_flags_when_configured() {
        let config = GameConfig {
            undo_restores_flags: true,
            ..GameConfig::default()
        };
        let mut game = Game::new(config);
        let before = game.board().clone();

        game.attempt_move((1, 4), (3, 4));
        game.undo().unwrap();

        assert_eq!(game.board(), &before);
        assert!(game.attempt_move((1, 4), (3, 4)).is_success());
    }

    #[test]
    fn test_turn_toggles_once_per_success() {
        let mut game = Game::default();
        let mut input = ScriptedSquares::from_script("1 0 2 0  1 1 2 1  6 0 5 0  ? ? ?");
        let expected_turns = [false, false, true, false, true, true];

        for expected in expected_turns {
            let _ = game.attempt_round(&mut input);
            assert_eq!(game.is_player_one_turn(), expected);
        }
    }

    #[test]
    fn test_colors_come_from_config() {
        let config = GameConfig {
            player_one_color: Color::Green,
            player_two_color: Color::Magenta,
            ..GameConfig::default()
        };
        let mut game = Game::new(config);
        assert_eq!(game.board().active_color(), Color::Green);
        assert!(game.attempt_move((1, 0), (2, 0)).is_success());
        assert_eq!(game.board().active_color(), Color::Magenta);

        let game = Game::with_board(ChessBoard::default(), config);
        assert_eq!(game.config().player_one_color, Color::Black);
    }

    #[test]
    fn test_config_from_color_names() {
        let config = GameConfig::with_color_names("red", "CYAN", true);
        assert_eq!(config.player_one_color, Color::Red);
        assert_eq!(config.player_two_color, Color::Cyan);
        assert!(config.undo_restores_flags);

        for (one, two) in [("RED", "RED"), ("PURPLE", "CYAN"), ("", "")] {
            let config = GameConfig::with_color_names(one, two, false);
            assert_eq!(config.player_one_color, Color::Black);
            assert_eq!(config.player_two_color, Color::White);
        }
    }

    #[test]
    fn test_full_history_releases_old_captures() {
        // Two knights shuffle back and forth after player one's rook captures a pawn
        let board = ChessBoard::from_layout("n3k3/8/8/8/8/p7/8/R3K2N", true).unwrap();
        let mut game = Game::with_board(board, GameConfig::default());
        assert_eq!(game.board().live_piece_count(), 6);

        assert!(game.attempt_move((0, 0), (2, 0)).is_success());
        let shuffle = [((7, 0), (5, 1)), ((0, 7), (2, 6)), ((5, 1), (7, 0)), ((2, 6), (0, 7))];
        for (from, to) in shuffle.iter().cycle().take(HISTORY_CAPACITY - 1) {
            assert!(game.attempt_move(*from, *to).is_success());
        }
        assert_eq!(game.history().len(), HISTORY_CAPACITY);
        assert_eq!(game.board().live_piece_count(), 6);

        let (from, to) = shuffle[(HISTORY_CAPACITY - 1) % shuffle.len()];
        assert!(game.attempt_move(from, to).is_success());
        assert_eq!(game.history().len(), HISTORY_CAPACITY);
        assert_eq!(game.board().live_piece_count(), 5);
    }
}

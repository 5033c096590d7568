use std::collections::BTreeMap;

use chess_core::{
    Board, ChessError, ChessResult, Color, GameStatus, Move, MoveOutcome, Rejection,
};
use log::{info, warn};

use crate::ai::ChessAI;
use crate::config::GameConfig;

/// The answer to a move attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveVerdict {
    Accepted {
        outcome: MoveOutcome,
        /// Status of the game after the move, for the side now to move.
        status: GameStatus,
    },
    Rejected(Rejection),
}

impl MoveVerdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, MoveVerdict::Accepted { .. })
    }
}

/// One game: the authoritative board plus, optionally, the engine playing one side.
///
/// The board only changes through [`Game::try_move`], [`Game::try_play`] and
/// [`Game::play_engine_move`], each of which applies at most one validated move.
#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    board: Board,
    engine: Option<ChessAI>,
    status: GameStatus,
}

impl Game {
    pub fn new(config: GameConfig) -> ChessResult<Self> {
        let board = match &config.fen {
            Some(fen) => Board::from_fen(fen)?,
            None => Board::new(),
        };
        for color in Color::ALL {
            board.find_king(color)?;
        }
        let status = board.status()?;
        let engine = config.engine.map(ChessAI::with_config);
        Ok(Self {
            config,
            board,
            engine,
            status,
        })
    }

    /// Two human players from the standard layout.
    pub fn two_player() -> Self {
        Self {
            config: GameConfig::default(),
            board: Board::new(),
            engine: None,
            status: GameStatus::Ongoing,
        }
    }

    /// Two human players from `fen`.
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        Self::new(GameConfig {
            engine: None,
            fen: Some(fen.to_string()),
        })
    }

    /// Back to the configured starting position.
    pub fn reset(&mut self) -> ChessResult<()> {
        *self = Self::new(self.config.clone())?;
        info!("game reset");
        Ok(())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_map(&self) -> BTreeMap<String, String> {
        self.board.board_map()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn current_player(&self) -> Color {
        self.board.current_player()
    }

    pub fn engine(&self) -> Option<&ChessAI> {
        self.engine.as_ref()
    }

    pub fn is_engine_turn(&self) -> bool {
        self.engine
            .as_ref()
            .map_or(false, |ai| ai.color() == self.current_player())
    }

    /// `player` asks to move from `source` to `target`. Malformed square
    /// symbols are errors; everything the rules forbid is a rejection.
    pub fn try_move(
        &mut self,
        player: Color,
        source: &str,
        target: &str,
    ) -> ChessResult<MoveVerdict> {
        let mv = Move::parse(source, target)?;
        self.try_play(player, mv)
    }

    pub fn try_play(&mut self, player: Color, mv: Move) -> ChessResult<MoveVerdict> {
        if let Some(reason) = self.precheck(player, mv) {
            warn!("{} move {} rejected: {}", player, mv, reason);
            return Ok(MoveVerdict::Rejected(reason));
        }

        // The move is only committed once the resulting status is known.
        let mut next = self.board.clone();
        match next.play(mv) {
            Ok(outcome) => {
                self.status = next.status()?;
                self.board = next;
                info!("{} played {}, status: {}", player, mv, self.status);
                Ok(MoveVerdict::Accepted {
                    outcome,
                    status: self.status,
                })
            }
            Err(ChessError::IllegalMove(reason)) => {
                warn!("{} move {} rejected: {}", player, mv, reason);
                Ok(MoveVerdict::Rejected(reason))
            }
            Err(err) => Err(err),
        }
    }

    fn precheck(&self, player: Color, mv: Move) -> Option<Rejection> {
        if self.status.is_over() {
            return Some(Rejection::GameOver);
        }
        if player != self.current_player() {
            return Some(Rejection::NotYourTurn);
        }
        match self.board.piece_at(mv.from) {
            None => Some(Rejection::EmptySquare),
            Some(piece) if piece.color != player => Some(Rejection::NotYourPiece),
            Some(_) => None,
        }
    }

    /// Lets the engine move if it is its turn and the game is still running.
    pub fn play_engine_move(&mut self) -> ChessResult<Option<(Move, GameStatus)>> {
        if self.status.is_over() || !self.is_engine_turn() {
            return Ok(None);
        }
        let Some(ai) = self.engine.clone() else {
            return Ok(None);
        };
        let Some(mv) = ai.get_move(&self.board)? else {
            return Ok(None);
        };

        match self.try_play(ai.color(), mv)? {
            MoveVerdict::Accepted { status, .. } => Ok(Some((mv, status))),
            MoveVerdict::Rejected(reason) => Err(ChessError::IllegalMove(reason)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;

    #[test]
    fn two_players_alternate() {
        let mut game = Game::two_player();
        let verdict = game.try_move(Color::White, "e2", "e4").unwrap();
        assert!(verdict.is_accepted());
        assert_eq!(game.current_player(), Color::Black);
        assert_eq!(game.board_map()["e4"], "wP");

        assert_eq!(
            game.try_move(Color::White, "d2", "d4").unwrap(),
            MoveVerdict::Rejected(Rejection::NotYourTurn)
        );
        assert_eq!(
            game.try_move(Color::Black, "e4", "e3").unwrap(),
            MoveVerdict::Rejected(Rejection::NotYourPiece)
        );
        assert_eq!(
            game.try_move(Color::Black, "e5", "e4").unwrap(),
            MoveVerdict::Rejected(Rejection::EmptySquare)
        );
        assert_eq!(
            game.try_move(Color::Black, "e7", "e4").unwrap(),
            MoveVerdict::Rejected(Rejection::IllegalGeometry)
        );
        assert_eq!(game.current_player(), Color::Black);
    }

    #[test]
    fn malformed_squares_are_errors() {
        let mut game = Game::two_player();
        assert!(matches!(
            game.try_move(Color::White, "e2", "e0"),
            Err(ChessError::InvalidLocation(_))
        ));
        assert!(matches!(
            game.try_move(Color::White, "e22", "e4"),
            Err(ChessError::InvalidLocation(_))
        ));
        assert_eq!(game.board(), &Board::new());
    }

    #[test]
    fn engine_moves_only_on_its_turn() {
        let config = GameConfig {
            engine: Some(EngineConfig::new(Color::Black, 1).with_parallel(false)),
            fen: None,
        };
        let mut game = Game::new(config).unwrap();
        assert!(!game.is_engine_turn());
        assert_eq!(game.play_engine_move().unwrap(), None);

        game.try_move(Color::White, "e2", "e4").unwrap();
        let (mv, status) = game.play_engine_move().unwrap().unwrap();
        assert_eq!(status, GameStatus::Ongoing);
        assert_eq!(game.board().piece_at(mv.to).unwrap().color, Color::Black);
        assert_eq!(game.current_player(), Color::White);
    }

    #[test]
    fn finished_game_rejects_moves_and_reset_restores() {
        let config = GameConfig {
            engine: None,
            fen: Some("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1".to_string()),
        };
        let mut game = Game::new(config).unwrap();
        let verdict = game.try_move(Color::White, "a1", "a8").unwrap();
        assert_eq!(
            verdict,
            MoveVerdict::Accepted {
                outcome: MoveOutcome {
                    captured: None,
                    promoted: false
                },
                status: GameStatus::Checkmate {
                    winner: Color::White
                },
            }
        );
        assert_eq!(
            game.try_move(Color::Black, "g8", "h8").unwrap(),
            MoveVerdict::Rejected(Rejection::GameOver)
        );

        game.reset().unwrap();
        assert_eq!(game.status(), GameStatus::Ongoing);
        assert!(game.board().piece_at(chess_core::Square::parse("a1").unwrap()).is_some());
    }
}

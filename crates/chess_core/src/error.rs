use thiserror::Error;

use crate::piece::Color;

pub type ChessResult<T> = Result<T, ChessError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    /// A square symbol that is not a file `a`-`h` followed by a rank `1`-`8`.
    #[error("invalid location: {0}")]
    InvalidLocation(String),

    #[error("invalid board description: {0}")]
    InvalidFen(String),

    /// Only reachable from a hand-built board; a played game always keeps both kings.
    #[error("no {0} king on the board")]
    MissingKing(Color),

    #[error("illegal move: {0}")]
    IllegalMove(Rejection),
}

/// Why a requested move was refused. These are rule outcomes, not faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("it is not this player's turn")]
    NotYourTurn,
    #[error("there is no piece on the source square")]
    EmptySquare,
    #[error("the piece on the source square belongs to the opponent")]
    NotYourPiece,
    #[error("the piece cannot reach the target square")]
    IllegalGeometry,
    #[error("the move would leave the king in check")]
    LeavesKingInCheck,
    #[error("the game is already over")]
    GameOver,
}

impl From<Rejection> for ChessError {
    fn from(reason: Rejection) -> Self {
        ChessError::IllegalMove(reason)
    }
}

// Core chess game logic modules
pub mod board;
pub mod error;
pub mod moves;
pub mod piece;
pub mod rules;
pub mod square;

// Re-export main types for convenience
pub use board::{Board, STARTING_FEN};
pub use error::{ChessError, ChessResult, Rejection};
pub use moves::{Move, MoveOutcome};
pub use piece::{Color, Piece, PieceType};
pub use rules::GameStatus;
pub use square::Square;

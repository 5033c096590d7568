pub mod ai;
pub mod config;
pub mod evaluation;
pub mod game;
pub mod search;

pub use ai::ChessAI;
pub use config::{EngineConfig, GameConfig};
pub use evaluation::evaluate_position;
pub use game::{Game, MoveVerdict};
pub use search::{search_best_move, SearchResult, SearchStats};

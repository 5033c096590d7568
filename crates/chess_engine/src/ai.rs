use chess_core::{Board, ChessResult, Color, Move};
use log::info;

use crate::config::{EngineConfig, MAX_DEPTH, MIN_DEPTH};
use crate::search::{search_best_move, SearchResult};

/// The automated player: a fixed color and search depth.
#[derive(Debug, Clone)]
pub struct ChessAI {
    config: EngineConfig,
}

impl ChessAI {
    pub fn new(color: Color, depth: u8) -> Self {
        Self::with_config(EngineConfig::new(color, depth))
    }

    pub fn with_config(mut config: EngineConfig) -> Self {
        config.depth = config.depth.clamp(MIN_DEPTH, MAX_DEPTH);
        ChessAI { config }
    }

    pub fn color(&self) -> Color {
        self.config.color
    }

    pub fn depth(&self) -> u8 {
        self.config.depth
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Best move for the engine's color on `board`, or `None` if it has none.
    pub fn get_move(&self, board: &Board) -> ChessResult<Option<Move>> {
        Ok(self.search(board)?.map(|found| found.best_move))
    }

    /// Like [`ChessAI::get_move`] but with the score and search counters.
    pub fn search(&self, board: &Board) -> ChessResult<Option<SearchResult>> {
        let found = search_best_move(board, &self.config)?;
        if let Some(result) = &found {
            info!(
                "{} engine picked {} (score {}, {} nodes)",
                self.config.color, result.best_move, result.score, result.stats.nodes
            );
        }
        Ok(found)
    }
}

impl Default for ChessAI {
    fn default() -> Self {
        Self::with_config(EngineConfig::default())
    }
}

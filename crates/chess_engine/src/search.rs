// Depth-limited minimax with alpha-beta pruning.
//
// Every node works on its own board: children are produced with
// `Board::successor`, which clones before moving, so the caller's board is
// never touched. There is no mate score: a node whose side has no legal move
// is scored by the static evaluator like any other leaf.
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use chess_core::{Board, ChessResult, Color, Move};
use log::{debug, trace};
use rayon::prelude::*;

use crate::config::EngineConfig;
use crate::evaluation::evaluate_position;

/// Counters collected during one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes visited below the root, leaves included.
    pub nodes: u64,
    /// Times the remaining siblings of a node were skipped.
    pub cutoffs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Move,
    /// Minimax value of `best_move` from the engine's point of view.
    pub score: i32,
    pub stats: SearchStats,
}

struct Searcher {
    color: Color,
    pruning: bool,
    nodes: AtomicU64,
    cutoffs: AtomicU64,
}

impl Searcher {
    fn new(config: &EngineConfig) -> Self {
        Self {
            color: config.color,
            pruning: config.pruning,
            nodes: AtomicU64::new(0),
            cutoffs: AtomicU64::new(0),
        }
    }

    fn stats(&self) -> SearchStats {
        SearchStats {
            nodes: self.nodes.load(Ordering::Relaxed),
            cutoffs: self.cutoffs.load(Ordering::Relaxed),
        }
    }

    fn minimax(
        &self,
        board: &Board,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> ChessResult<i32> {
        self.nodes.fetch_add(1, Ordering::Relaxed);

        if depth == 0 || board.is_dead_position() {
            return evaluate_position(board, self.color);
        }

        let side = if maximizing { self.color } else { self.color.opponent() };
        let moves = board.legal_moves(side)?;
        if moves.is_empty() {
            return evaluate_position(board, self.color);
        }

        if maximizing {
            let mut max_eval = i32::MIN;
            for mv in moves {
                let eval = self.minimax(&board.successor(mv), depth - 1, alpha, beta, false)?;
                max_eval = max_eval.max(eval);
                alpha = alpha.max(eval);
                if self.pruning && beta <= alpha {
                    self.cutoffs.fetch_add(1, Ordering::Relaxed);
                    trace!("beta cutoff after {} at depth {}", mv, depth);
                    break;
                }
            }
            Ok(max_eval)
        } else {
            let mut min_eval = i32::MAX;
            for mv in moves {
                let eval = self.minimax(&board.successor(mv), depth - 1, alpha, beta, true)?;
                min_eval = min_eval.min(eval);
                beta = beta.min(eval);
                if self.pruning && beta <= alpha {
                    self.cutoffs.fetch_add(1, Ordering::Relaxed);
                    trace!("alpha cutoff after {} at depth {}", mv, depth);
                    break;
                }
            }
            Ok(min_eval)
        }
    }
}

/// Finds the engine's move on `board`, or `None` if it has no legal move.
///
/// Each root move is searched with a full window, so scoring them in parallel
/// gives exactly the serial result. Ties go to the move generated first.
pub fn search_best_move(board: &Board, config: &EngineConfig) -> ChessResult<Option<SearchResult>> {
    let start_time = Instant::now();
    let searcher = Searcher::new(config);
    let depth = config.depth.max(1);

    let moves = board.legal_moves(config.color)?;
    if moves.is_empty() {
        debug!("{} has no legal move", config.color);
        return Ok(None);
    }

    let score_move = |mv: &Move| {
        searcher.minimax(&board.successor(*mv), depth - 1, i32::MIN, i32::MAX, false)
    };
    let scores: Vec<i32> = if config.parallel {
        moves.par_iter().map(score_move).collect::<ChessResult<_>>()?
    } else {
        moves.iter().map(score_move).collect::<ChessResult<_>>()?
    };

    let mut best: Option<(Move, i32)> = None;
    for (&mv, score) in moves.iter().zip(scores) {
        debug!("root move {}: {}", mv, score);
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((mv, score));
        }
    }

    let stats = searcher.stats();
    let result = best.map(|(best_move, score)| SearchResult {
        best_move,
        score,
        stats,
    });
    if let Some(found) = &result {
        debug!(
            "depth {} search for {} chose {} (score {}) after {} nodes, {} cutoffs in {:?}",
            depth,
            config.color,
            found.best_move,
            found.score,
            stats.nodes,
            stats.cutoffs,
            start_time.elapsed()
        );
    }
    Ok(result)
}

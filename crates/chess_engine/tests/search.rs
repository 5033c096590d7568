use chess_core::{Board, Color};
use chess_engine::{search_best_move, EngineConfig, SearchResult};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

fn random_position(seed: u64, plies: usize) -> Board {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut board = Board::new();
    for _ in 0..plies {
        let moves = board.legal_moves(board.current_player()).unwrap();
        let Some(&mv) = moves.choose(&mut rng) else {
            break;
        };
        board.play(mv).unwrap();
    }
    board
}

fn search(board: &Board, depth: u8, pruning: bool) -> SearchResult {
    let config = EngineConfig::new(board.current_player(), depth)
        .with_pruning(pruning)
        .with_parallel(false);
    search_best_move(board, &config)
        .unwrap()
        .expect("position should have a legal move")
}

#[test]
fn pruning_agrees_with_exhaustive_minimax() {
    for seed in 0..3 {
        let board = random_position(seed, 8);
        if board.status().unwrap().is_over() {
            continue;
        }
        let pruned = search(&board, 2, true);
        let exhaustive = search(&board, 2, false);
        assert_eq!(pruned.score, exhaustive.score, "seed {seed}: {}", board.to_fen());
        assert_eq!(pruned.best_move, exhaustive.best_move, "seed {seed}");
    }
}

#[test]
fn pruning_saves_nodes_at_depth_three() {
    let board = Board::from_fen("4k3/3p4/8/3q4/8/8/5PPP/3R2K1 w - - 0 1").unwrap();
    let pruned = search(&board, 3, true);
    let exhaustive = search(&board, 3, false);

    assert_eq!(pruned.score, exhaustive.score);
    assert_eq!(pruned.best_move, exhaustive.best_move);
    assert_eq!(exhaustive.stats.cutoffs, 0);
    assert!(pruned.stats.cutoffs > 0);
    assert!(pruned.stats.nodes < exhaustive.stats.nodes);
}

#[test]
fn engine_plays_for_either_color() {
    let board = random_position(7, 5);
    let side = board.current_player();
    let found = search(&board, 2, true);
    assert_eq!(board.piece_at(found.best_move.from).unwrap().color, side);
    assert!(board.is_legal(found.best_move).unwrap());

    let other = EngineConfig::new(side.opponent(), 2).with_parallel(false);
    let reply = search_best_move(&board, &other).unwrap().unwrap();
    assert_eq!(board.piece_at(reply.best_move.from).unwrap().color, side.opponent());
}

#[test]
fn searched_board_is_unchanged() {
    let board = random_position(11, 10);
    let before = board.clone();
    let config = EngineConfig::new(Color::White, 2);
    search_best_move(&board, &config).unwrap();
    assert_eq!(board, before);
    assert_eq!(board.to_fen(), before.to_fen());
}

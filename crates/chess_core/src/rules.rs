//! Check detection, legal-move filtering and terminal-state classification.
//!
//! Every legality probe clones the board and plays the candidate on the
//! clone, so none of these queries can disturb the board they are asked of.

use std::fmt;

use crate::{
    piece::{Color, PieceType},
    Board, ChessError, ChessResult, Move, Square,
};

/// Where a game stands from the point of view of the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Checkmate { winner: Color },
    Stalemate,
    /// Neither side has enough material left to deliver mate.
    DeadPosition,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        self != GameStatus::Ongoing
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Ongoing => write!(f, "Ongoing"),
            GameStatus::Checkmate { winner } => write!(f, "Checkmate, {winner} wins"),
            GameStatus::Stalemate => write!(f, "Stalemate"),
            GameStatus::DeadPosition => write!(f, "Dead Position"),
        }
    }
}

impl Board {
    /// True if some piece of `by_color` could pseudo-legally move onto `sq`.
    pub fn is_square_attacked(&self, sq: Square, by_color: Color) -> bool {
        self.pieces(by_color)
            .any(|attacker| Move::new(attacker.square, sq).is_valid(self))
    }

    pub fn find_king(&self, color: Color) -> ChessResult<Square> {
        self.pieces(color)
            .find(|p| p.piece_type == PieceType::King)
            .map(|p| p.square)
            .ok_or(ChessError::MissingKing(color))
    }

    pub fn is_king_in_check(&self, color: Color) -> ChessResult<bool> {
        let king_square = self.find_king(color)?;
        Ok(self.is_square_attacked(king_square, color.opponent()))
    }

    /// Plays the piece on `from` to `target` on a clone and reports whether
    /// its own king is safe afterwards. Geometry is not checked here.
    pub fn is_move_legal(&self, from: Square, target: &str) -> ChessResult<bool> {
        let to = self.square_at(target)?;
        self.leaves_king_safe(Move::new(from, to))
    }

    /// [`Board::is_move_legal`] for an already parsed move. An empty source
    /// square is never legal.
    pub fn leaves_king_safe(&self, mv: Move) -> ChessResult<bool> {
        let color = match mv.mover(self) {
            Some(color) => color,
            None => return Ok(false),
        };
        let probe = self.successor(mv);
        Ok(!probe.is_king_in_check(color)?)
    }

    /// Pseudo-legal and king-safe.
    pub fn is_legal(&self, mv: Move) -> ChessResult<bool> {
        Ok(mv.is_valid(self) && self.leaves_king_safe(mv)?)
    }

    /// Legal moves of the piece on `from`, targets in file-major order.
    pub fn legal_moves_from(&self, from: Square) -> ChessResult<Vec<Move>> {
        let mut moves = Vec::new();
        for to in Square::all() {
            if to == from {
                continue;
            }
            let mv = Move::new(from, to);
            if self.is_legal(mv)? {
                moves.push(mv);
            }
        }
        Ok(moves)
    }

    /// All legal moves for `color`, sources and targets both in file-major
    /// order. The order is stable and the search relies on it for tie-breaks.
    pub fn legal_moves(&self, color: Color) -> ChessResult<Vec<Move>> {
        let mut moves = Vec::new();
        for piece in self.pieces(color) {
            moves.extend(self.legal_moves_from(piece.square)?);
        }
        Ok(moves)
    }

    pub fn has_any_legal_move(&self, color: Color) -> ChessResult<bool> {
        for piece in self.pieces(color) {
            for to in Square::all() {
                if to != piece.square && self.is_legal(Move::new(piece.square, to))? {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    /// Conservative insufficient-material test: bare kings, a lone minor piece
    /// against a bare king, or one bishop each. The last case ignores which
    /// colour of square the bishops run on and so over-reports dead positions.
    pub fn is_dead_position(&self) -> bool {
        let mut others = [0u8; 2];
        let mut bishops = [0u8; 2];
        let mut knights = [0u8; 2];

        for piece in self.all_pieces() {
            let side = piece.color.index();
            match piece.piece_type {
                PieceType::King => continue,
                PieceType::Bishop => bishops[side] += 1,
                PieceType::Knight => knights[side] += 1,
                _ => {}
            }
            others[side] += 1;
        }

        let [white, black] = others;
        let lone_minor =
            |side: usize| others[side] == 1 && (bishops[side] == 1 || knights[side] == 1);

        if white == 0 && black == 0 {
            return true;
        }
        if (lone_minor(0) && black == 0) || (lone_minor(1) && white == 0) {
            return true;
        }
        white == 1 && bishops[0] == 1 && black == 1 && bishops[1] == 1
    }

    /// Classifies the position for the side to move.
    pub fn status(&self) -> ChessResult<GameStatus> {
        let side = self.current_player();
        if !self.has_any_legal_move(side)? {
            return Ok(if self.is_king_in_check(side)? {
                GameStatus::Checkmate {
                    winner: side.opponent(),
                }
            } else {
                GameStatus::Stalemate
            });
        }
        if self.is_dead_position() {
            return Ok(GameStatus::DeadPosition);
        }
        Ok(GameStatus::Ongoing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(fen: &str) -> Board {
        Board::from_fen(fen).unwrap()
    }

    fn sq(symbol: &str) -> Square {
        Square::parse(symbol).unwrap()
    }

    #[test]
    fn twenty_moves_each_from_the_start() {
        let start = Board::new();
        assert_eq!(start.legal_moves(Color::White).unwrap().len(), 20);
        assert_eq!(start.legal_moves(Color::Black).unwrap().len(), 20);
    }

    #[test]
    fn move_order_is_file_major() {
        let moves: Vec<String> = Board::new()
            .legal_moves(Color::White)
            .unwrap()
            .iter()
            .map(Move::to_string)
            .collect();
        assert_eq!(&moves[..4], ["a2a3", "a2a4", "b1a3", "b1c3"]);
        assert_eq!(moves.last().unwrap(), "h2h4");
    }

    #[test]
    fn e2_pawn_from_the_start() {
        let start = Board::new();
        let e2 = sq("e2");
        assert!(start.can_move(e2, "e4").unwrap());
        assert!(start.is_move_legal(e2, "e4").unwrap());
        assert!(!start.can_move(e2, "e5").unwrap());
    }

    #[test]
    fn attacks_and_check() {
        let b = board("4k3/8/8/8/8/8/8/R3K3 b - - 0 1");
        assert!(b.is_square_attacked(sq("a8"), Color::White));
        assert!(!b.is_square_attacked(sq("b8"), Color::White));
        assert!(!b.is_king_in_check(Color::Black).unwrap());

        let b = board("R3k3/8/8/8/8/8/8/4K3 b - - 0 1");
        assert!(b.is_king_in_check(Color::Black).unwrap());
        assert!(!b.is_king_in_check(Color::White).unwrap());
    }

    #[test]
    fn pinned_piece_cannot_leave_the_line() {
        let b = board("4k3/4r3/8/8/8/8/4B3/4K3 w - - 0 1");
        let e2 = sq("e2");
        assert!(b.can_move(e2, "d3").unwrap());
        assert!(!b.is_move_legal(e2, "d3").unwrap());
        assert!(b.legal_moves_from(e2).unwrap().is_empty());
    }

    #[test]
    fn king_cannot_step_into_attack() {
        let b = board("4k3/8/8/8/8/8/r7/4K3 w - - 0 1");
        let moves: Vec<String> = b
            .legal_moves(Color::White)
            .unwrap()
            .iter()
            .map(Move::to_string)
            .collect();
        assert_eq!(moves, ["e1d1", "e1f1"]);
    }

    #[test]
    fn missing_king_is_reported() {
        let b = board("8/8/8/8/8/8/4P3/8 w - - 0 1");
        assert_eq!(b.find_king(Color::White), Err(ChessError::MissingKing(Color::White)));
        assert!(b.is_king_in_check(Color::Black).is_err());
    }

    #[test]
    fn checkmate_is_classified() {
        // back-rank mate
        let b = board("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1");
        assert!(!b.has_any_legal_move(Color::Black).unwrap());
        assert!(b.is_king_in_check(Color::Black).unwrap());
        assert_eq!(b.status().unwrap(), GameStatus::Checkmate { winner: Color::White });
    }

    #[test]
    fn stalemate_is_classified() {
        let b = board("k7/2Q5/1K6/8/8/8/8/8 b - - 0 1");
        assert!(!b.has_any_legal_move(Color::Black).unwrap());
        assert!(!b.is_king_in_check(Color::Black).unwrap());
        assert_eq!(b.status().unwrap(), GameStatus::Stalemate);
    }

    #[test]
    fn dead_positions() {
        assert!(board("4k3/8/8/8/8/8/8/4K3 w - - 0 1").is_dead_position());
        assert!(board("4k3/8/8/8/8/8/8/4KB2 w - - 0 1").is_dead_position());
        assert!(board("4k3/8/8/8/8/8/8/4KN2 w - - 0 1").is_dead_position());
        assert!(board("4kn2/8/8/8/8/8/8/4K3 w - - 0 1").is_dead_position());
        assert!(board("4kb2/8/8/8/8/8/8/4K1B1 w - - 0 1").is_dead_position());
        // bishops on opposite colours still count as dead
        assert!(board("4kb2/8/8/8/8/8/8/4KB2 w - - 0 1").is_dead_position());

        assert!(!board("4k3/8/8/8/8/8/8/4KQ2 w - - 0 1").is_dead_position());
        assert!(!board("4k3/8/8/8/8/8/8/3NKN2 w - - 0 1").is_dead_position());
        assert!(!board("4kn2/8/8/8/8/8/8/4KB2 w - - 0 1").is_dead_position());
        assert!(!board("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").is_dead_position());
        assert!(!Board::new().is_dead_position());
    }

    #[test]
    fn status_reports_dead_before_ongoing() {
        assert_eq!(
            board("4k3/8/8/8/8/8/8/4K3 w - - 0 1").status().unwrap(),
            GameStatus::DeadPosition
        );
        assert_eq!(Board::new().status().unwrap(), GameStatus::Ongoing);
    }

    #[test]
    fn probing_does_not_disturb_the_board() {
        let b = Board::new();
        let before = b.clone();
        b.legal_moves(Color::White).unwrap();
        b.is_move_legal(sq("e2"), "e4").unwrap();
        b.status().unwrap();
        assert_eq!(b, before);
    }
}

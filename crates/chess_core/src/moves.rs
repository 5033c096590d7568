use std::fmt;
use std::str::FromStr;

use crate::{piece::PieceType, Board, ChessError, ChessResult, Color, Piece, Square};

/// A request to move whatever stands on `from` to `to`.
///
/// Legality is not a property of the pair: it depends on the board it is asked of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

/// What applying a move did to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub captured: Option<Piece>,
    /// The pawn reached its last rank and was replaced by a queen.
    pub promoted: bool,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    /// Builds a move from two square symbols such as `"e2"` and `"e4"`.
    pub fn parse(from: &str, to: &str) -> ChessResult<Self> {
        Ok(Self::new(Square::parse(from)?, Square::parse(to)?))
    }

    /// Pseudo-legal test: the piece on `from` can geometrically reach `to` and
    /// `to` is empty or holds an enemy. King safety is not considered.
    pub fn is_valid(&self, board: &Board) -> bool {
        let piece = match board.piece_at(self.from) {
            Some(p) => p,
            None => return false,
        };

        if self.from == self.to {
            return false;
        }

        if let Some(dest_piece) = board.piece_at(self.to) {
            if dest_piece.color == piece.color {
                return false;
            }
        }

        self.is_valid_piece_movement(piece, board)
    }

    fn is_valid_piece_movement(&self, piece: &Piece, board: &Board) -> bool {
        match piece.piece_type {
            PieceType::Pawn => self.is_valid_pawn_move(piece, board),
            PieceType::Knight => self.is_valid_knight_move(),
            PieceType::Bishop => self.is_valid_diagonal_move(board),
            PieceType::Rook => self.is_valid_straight_move(board),
            PieceType::Queen => {
                self.is_valid_diagonal_move(board) || self.is_valid_straight_move(board)
            }
            PieceType::King => self.is_valid_king_move(),
        }
    }

    fn is_valid_pawn_move(&self, pawn: &Piece, board: &Board) -> bool {
        let direction = pawn.color.forward();
        let rank_diff = self.to.row_distance(self.from);
        let target_empty = board.piece_at(self.to).is_none();

        if self.from.is_same_file(self.to) {
            if rank_diff == direction {
                return target_empty;
            }
            if rank_diff == 2 * direction && pawn.on_start_rank {
                let between = board.squares_between(self.from, self.to);
                return target_empty && between.iter().all(|sq| board.piece_at(*sq).is_none());
            }
            return false;
        }

        // Diagonal steps only ever capture.
        if self.from.is_neighbor_file(self.to) && rank_diff == direction {
            return board
                .piece_at(self.to)
                .map_or(false, |victim| victim.is_enemy_of(pawn));
        }

        false
    }

    fn is_valid_knight_move(&self) -> bool {
        let rank_diff = self.to.row_distance(self.from).abs();
        let file_diff = self.to.column_distance(self.from).abs();

        (rank_diff == 2 && file_diff == 1) || (rank_diff == 1 && file_diff == 2)
    }

    fn is_valid_diagonal_move(&self, board: &Board) -> bool {
        let rank_diff = self.to.row_distance(self.from).abs();
        let file_diff = self.to.column_distance(self.from).abs();

        if rank_diff != file_diff || rank_diff == 0 {
            return false;
        }

        self.is_path_clear(board)
    }

    fn is_valid_straight_move(&self, board: &Board) -> bool {
        let rank_diff = self.to.row_distance(self.from);
        let file_diff = self.to.column_distance(self.from);

        if (rank_diff != 0) == (file_diff != 0) {
            return false;
        }

        self.is_path_clear(board)
    }

    fn is_valid_king_move(&self) -> bool {
        let rank_diff = self.to.row_distance(self.from).abs();
        let file_diff = self.to.column_distance(self.from).abs();

        rank_diff <= 1 && file_diff <= 1
    }

    fn is_path_clear(&self, board: &Board) -> bool {
        board
            .squares_between(self.from, self.to)
            .into_iter()
            .all(|sq| board.piece_at(sq).is_none())
    }

    /// The color whose piece stands on `from`, if any.
    pub fn mover(&self, board: &Board) -> Option<Color> {
        board.piece_at(self.from).map(|p| p.color)
    }
}

impl FromStr for Move {
    type Err = ChessError;

    /// Coordinate notation: `e2e4`, with optional whitespace or `-` between the squares.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .collect();
        if compact.chars().count() != 4 {
            return Err(ChessError::InvalidLocation(format!(
                "'{s}' is not a move, expected something like 'e2e4'"
            )));
        }
        let split = compact
            .char_indices()
            .nth(2)
            .map(|(idx, _)| idx)
            .unwrap_or(compact.len());
        Move::parse(&compact[..split], &compact[split..])
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

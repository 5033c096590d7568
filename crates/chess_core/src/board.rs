use std::collections::BTreeMap;
use std::fmt;

use log::debug;

use crate::{
    piece::{Color, PieceType},
    ChessError, ChessResult, Move, MoveOutcome, Piece, Rejection, Square,
};

pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1";

const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

/// The game state: an 8x8 grid that owns every piece, the side to move, and
/// how many pieces each side still has.
///
/// Cloning is a full deep copy. Exploring a move is always done on a clone
/// (see [`Board::successor`]); the only mutation available to callers is
/// [`Board::play`], which validates first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    // indexed [file][rank]
    squares: [[Option<Piece>; 8]; 8],
    current_turn: Color,
    piece_counts: [u8; 2],
}

impl Board {
    pub fn new() -> Self {
        let mut board = Self::empty(Color::White);
        board.setup_initial_position();
        board
    }

    fn empty(current_turn: Color) -> Self {
        Self {
            squares: [[None; 8]; 8],
            current_turn,
            piece_counts: [0; 2],
        }
    }

    fn setup_initial_position(&mut self) {
        for file in 0..8u8 {
            for color in Color::ALL {
                if let Some(sq) = Square::new(file, color.pawn_rank()) {
                    self.place(Piece::new(PieceType::Pawn, color, sq));
                }
                if let Some(sq) = Square::new(file, color.home_rank()) {
                    self.place(Piece::new(BACK_RANK[file as usize], color, sq));
                }
            }
        }
    }

    /// Builds a board from a FEN-style description. Only the placement and
    /// side-to-move fields are used; anything after them is accepted and ignored.
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        let mut fields = fen.split_whitespace();
        let placement = fields
            .next()
            .ok_or_else(|| ChessError::InvalidFen("empty description".to_string()))?;
        let current_turn = match fields.next() {
            Some("w") => Color::White,
            Some("b") => Color::Black,
            Some(other) => {
                return Err(ChessError::InvalidFen(format!(
                    "side to move must be 'w' or 'b', got '{other}'"
                )))
            }
            None => return Err(ChessError::InvalidFen("missing side to move".to_string())),
        };

        let rows: Vec<&str> = placement.split('/').collect();
        if rows.len() != 8 {
            return Err(ChessError::InvalidFen(format!(
                "expected 8 ranks, found {}",
                rows.len()
            )));
        }

        let mut board = Self::empty(current_turn);
        for (row_idx, row) in rows.iter().enumerate() {
            let rank = 7 - row_idx as u8;
            let mut file = 0u8;
            for c in row.chars() {
                if let Some(run) = c.to_digit(10) {
                    if run == 0 {
                        return Err(ChessError::InvalidFen(format!("empty run of 0 in '{row}'")));
                    }
                    file += run as u8;
                } else {
                    let piece_type = PieceType::from_letter(c).ok_or_else(|| {
                        ChessError::InvalidFen(format!("unknown piece letter '{c}'"))
                    })?;
                    let color = if c.is_ascii_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    let sq = Square::new(file, rank).ok_or_else(|| {
                        ChessError::InvalidFen(format!("rank '{row}' is longer than 8 squares"))
                    })?;
                    board.place(Piece::new(piece_type, color, sq));
                    file += 1;
                }
                if file > 8 {
                    return Err(ChessError::InvalidFen(format!(
                        "rank '{row}' is longer than 8 squares"
                    )));
                }
            }
            if file != 8 {
                return Err(ChessError::InvalidFen(format!(
                    "rank '{row}' describes {file} squares instead of 8"
                )));
            }
        }

        debug!(
            "loaded board: {} white / {} black pieces, {} to move",
            board.piece_count(Color::White),
            board.piece_count(Color::Black),
            current_turn
        );
        Ok(board)
    }

    /// Placement and side to move; castling, en passant and clocks are always `- - 0 1`.
    pub fn to_fen(&self) -> String {
        let mut rows = Vec::with_capacity(8);
        for rank in (0..8u8).rev() {
            let mut row = String::new();
            let mut empty = 0;
            for file in 0..8u8 {
                match self.squares[file as usize][rank as usize] {
                    Some(piece) => {
                        if empty > 0 {
                            row.push_str(&empty.to_string());
                            empty = 0;
                        }
                        row.push(piece.symbol());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                row.push_str(&empty.to_string());
            }
            rows.push(row);
        }
        let side = match self.current_turn {
            Color::White => 'w',
            Color::Black => 'b',
        };
        format!("{} {} - - 0 1", rows.join("/"), side)
    }

    fn place(&mut self, piece: Piece) {
        let slot = &mut self.squares[piece.square.file() as usize][piece.square.rank() as usize];
        if let Some(old) = slot.replace(piece) {
            self.piece_counts[old.color.index()] -= 1;
        }
        self.piece_counts[piece.color.index()] += 1;
    }

    pub fn square_at(&self, symbol: &str) -> ChessResult<Square> {
        Square::parse(symbol)
    }

    pub fn piece_at(&self, sq: Square) -> Option<&Piece> {
        self.squares[sq.file() as usize][sq.rank() as usize].as_ref()
    }

    /// Every piece on the board in file-major square order (a1, a2, ..., h8).
    pub fn all_pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.squares.iter().flatten().flatten()
    }

    pub fn pieces(&self, color: Color) -> impl Iterator<Item = &Piece> + '_ {
        self.all_pieces().filter(move |p| p.color == color)
    }

    pub fn current_player(&self) -> Color {
        self.current_turn
    }

    pub fn piece_count(&self, color: Color) -> u8 {
        self.piece_counts[color.index()]
    }

    /// Coarse end signal: one side has no pieces left at all.
    pub fn is_game_ended(&self) -> bool {
        self.piece_counts.iter().any(|&count| count == 0)
    }

    pub(crate) fn next_player(&mut self) {
        self.current_turn = self.current_turn.opponent();
    }

    pub(crate) fn apply_capture(&mut self, color: Color) {
        let count = &mut self.piece_counts[color.index()];
        *count = count.saturating_sub(1);
    }

    /// Squares strictly between `a` and `b`, starting next to `a`. Empty unless
    /// the two share a rank, a file, or a diagonal.
    pub fn squares_between(&self, a: Square, b: Square) -> Vec<Square> {
        let rank_diff = b.row_distance(a);
        let file_diff = b.column_distance(a);
        let aligned = rank_diff == 0 || file_diff == 0 || rank_diff.abs() == file_diff.abs();
        if a == b || !aligned {
            return Vec::new();
        }

        let (file_step, rank_step) = (file_diff.signum(), rank_diff.signum());
        let steps = rank_diff.abs().max(file_diff.abs());
        (1..steps)
            .filter_map(|i| a.offset(file_step * i, rank_step * i))
            .collect()
    }

    /// Pseudo-legal test for the piece on `from` against a target symbol.
    /// A malformed symbol is an error; an empty `from` simply cannot move.
    pub fn can_move(&self, from: Square, target: &str) -> ChessResult<bool> {
        let to = self.square_at(target)?;
        Ok(Move::new(from, to).is_valid(self))
    }

    /// Moves the piece on `mv.from` to `mv.to` with no rule checks and hands
    /// the turn over, whatever the move was. Only ever run on a disposable
    /// clone or after [`Board::play`] has validated the move.
    pub(crate) fn move_piece(&mut self, mv: Move) -> MoveOutcome {
        let mut outcome = MoveOutcome {
            captured: None,
            promoted: false,
        };

        let source = &mut self.squares[mv.from.file() as usize][mv.from.rank() as usize];
        if let Some(mut piece) = source.take() {
            let target = &mut self.squares[mv.to.file() as usize][mv.to.rank() as usize];
            outcome.captured = target.take();

            if piece.piece_type == PieceType::Pawn && mv.to.is_last_rank(piece.color) {
                // The pawn record is dropped here; a fresh queen takes the square.
                *target = Some(Piece::new(PieceType::Queen, piece.color, mv.to));
                outcome.promoted = true;
            } else {
                piece.square = mv.to;
                piece.on_start_rank = false;
                *target = Some(piece);
            }

            if let Some(captured) = outcome.captured {
                self.apply_capture(captured.color);
            }
        }

        self.next_player();
        outcome
    }

    /// A copy of this board with `mv` applied, rules unchecked. `self` is untouched.
    pub fn successor(&self, mv: Move) -> Board {
        let mut next = self.clone();
        next.move_piece(mv);
        next
    }

    /// Applies a move to this board after checking turn, geometry and king
    /// safety. A refused move leaves the board exactly as it was.
    pub fn play(&mut self, mv: Move) -> ChessResult<MoveOutcome> {
        let piece = *self.piece_at(mv.from).ok_or(Rejection::EmptySquare)?;

        if piece.color != self.current_turn {
            return Err(Rejection::NotYourPiece.into());
        }
        if !mv.is_valid(self) {
            return Err(Rejection::IllegalGeometry.into());
        }
        if !self.leaves_king_safe(mv)? {
            return Err(Rejection::LeavesKingInCheck.into());
        }

        Ok(self.move_piece(mv))
    }

    /// Occupied squares mapped to two-character piece codes, e.g. `"e2" -> "wP"`.
    pub fn board_map(&self) -> BTreeMap<String, String> {
        self.all_pieces()
            .map(|p| (p.square.symbol(), p.code()))
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const FILES: &str = "    A   B   C   D   E   F   G   H";
        const RULE: &str = "   -------------------------------";

        writeln!(f, "{FILES}")?;
        writeln!(f, "{RULE}")?;
        for rank in (0..8usize).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8usize {
                let symbol = self.squares[file][rank].map_or(' ', |p| p.symbol());
                write!(f, "| {symbol} ")?;
            }
            writeln!(f, "| {}", rank + 1)?;
            writeln!(f, "{RULE}")?;
        }
        write!(f, "{FILES}")
    }
}

use std::fmt;

use crate::Square;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    pub fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Index into per-color arrays: White=0, Black=1.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Rank index (0-7) of this color's back rank.
    pub fn home_rank(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    /// Rank index where this color's pawns start.
    pub fn pawn_rank(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    /// Direction pawns of this color advance in, as a rank delta.
    pub fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    fn prefix(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }
}

impl std::ops::Not for Color {
    type Output = Color;

    fn not(self) -> Color {
        self.opponent()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceType {
    /// Uppercase letter used in board descriptions and exported codes.
    pub fn letter(self) -> char {
        match self {
            PieceType::Pawn => 'P',
            PieceType::Knight => 'N',
            PieceType::Bishop => 'B',
            PieceType::Rook => 'R',
            PieceType::Queen => 'Q',
            PieceType::King => 'K',
        }
    }

    pub fn from_letter(letter: char) -> Option<PieceType> {
        match letter.to_ascii_uppercase() {
            'P' => Some(PieceType::Pawn),
            'N' => Some(PieceType::Knight),
            'B' => Some(PieceType::Bishop),
            'R' => Some(PieceType::Rook),
            'Q' => Some(PieceType::Queen),
            'K' => Some(PieceType::King),
            _ => None,
        }
    }

    pub fn is_minor(self) -> bool {
        matches!(self, PieceType::Knight | PieceType::Bishop)
    }
}

/// A piece together with the square it currently stands on.
///
/// The square is a plain coordinate into the board grid, so copying a board
/// copies its pieces without any shared references.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub piece_type: PieceType,
    pub color: Color,
    pub square: Square,
    /// Pawns only: still on the starting rank, so the double step is open.
    pub on_start_rank: bool,
}

impl Piece {
    pub fn new(piece_type: PieceType, color: Color, square: Square) -> Self {
        let on_start_rank = piece_type == PieceType::Pawn && square.rank() == color.pawn_rank();
        Self {
            piece_type,
            color,
            square,
            on_start_rank,
        }
    }

    /// Board-description letter: uppercase for White, lowercase for Black.
    pub fn symbol(&self) -> char {
        let letter = self.piece_type.letter();
        match self.color {
            Color::White => letter,
            Color::Black => letter.to_ascii_lowercase(),
        }
    }

    /// Two-character export code, e.g. `wP` or `bK`.
    pub fn code(&self) -> String {
        format!("{}{}", self.color.prefix(), self.piece_type.letter())
    }

    pub fn is_enemy_of(&self, other: &Piece) -> bool {
        self.color != other.color
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_and_symbols() {
        let sq = Square::new(4, 0).unwrap();
        let king = Piece::new(PieceType::King, Color::White, sq);
        assert_eq!(king.code(), "wK");
        assert_eq!(king.symbol(), 'K');

        let knight = Piece::new(PieceType::Knight, Color::Black, sq);
        assert_eq!(knight.code(), "bN");
        assert_eq!(knight.symbol(), 'n');
    }

    #[test]
    fn pawn_start_flag_follows_rank() {
        let e2 = Square::new(4, 1).unwrap();
        let e3 = Square::new(4, 2).unwrap();
        let e7 = Square::new(4, 6).unwrap();
        assert!(Piece::new(PieceType::Pawn, Color::White, e2).on_start_rank);
        assert!(!Piece::new(PieceType::Pawn, Color::White, e3).on_start_rank);
        assert!(Piece::new(PieceType::Pawn, Color::Black, e7).on_start_rank);
        assert!(!Piece::new(PieceType::Pawn, Color::Black, e2).on_start_rank);
        assert!(!Piece::new(PieceType::Rook, Color::White, e2).on_start_rank);
    }

    #[test]
    fn opponent_flips() {
        assert_eq!(!Color::White, Color::Black);
        assert_eq!(Color::Black.opponent(), Color::White);
    }
}

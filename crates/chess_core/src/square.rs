use std::fmt;
use std::str::FromStr;

use crate::{ChessError, ChessResult, Color};

/// A board coordinate. `file` and `rank` are zero-based: `a1` is (0, 0), `h8` is (7, 7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    pub fn new(file: u8, rank: u8) -> Option<Self> {
        if file < 8 && rank < 8 {
            Some(Self { file, rank })
        } else {
            None
        }
    }

    /// Parses a two-character symbol such as `e4`. The file letter is case-insensitive.
    pub fn parse(symbol: &str) -> ChessResult<Self> {
        let mut chars = symbol.chars();
        let (file, rank) = match (chars.next(), chars.next(), chars.next()) {
            (Some(file), Some(rank), None) => (file, rank),
            _ => {
                return Err(ChessError::InvalidLocation(format!(
                    "'{symbol}' must be exactly two characters, e.g. 'a3'"
                )))
            }
        };

        let rank = rank.to_digit(10).ok_or_else(|| {
            ChessError::InvalidLocation(format!("'{symbol}': the rank must be a number"))
        })?;
        let file = file.to_ascii_lowercase();
        if !('a'..='h').contains(&file) || !(1..=8).contains(&rank) {
            return Err(ChessError::InvalidLocation(format!(
                "'{symbol}': use a-h for the file and 1-8 for the rank"
            )));
        }

        Ok(Self {
            file: file as u8 - b'a',
            rank: rank as u8 - 1,
        })
    }

    /// All 64 squares, file-major: a1, a2, ..., a8, b1, ..., h8.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|file| (0..8u8).map(move |rank| Square { file, rank }))
    }

    pub fn file(self) -> u8 {
        self.file
    }

    pub fn rank(self) -> u8 {
        self.rank
    }

    pub fn symbol(self) -> String {
        self.to_string()
    }

    /// Signed rank difference `self - from`.
    pub fn row_distance(self, from: Square) -> i8 {
        self.rank as i8 - from.rank as i8
    }

    /// Signed file difference `self - from`.
    pub fn column_distance(self, from: Square) -> i8 {
        self.file as i8 - from.file as i8
    }

    pub fn is_same_file(self, other: Square) -> bool {
        self.file == other.file
    }

    pub fn is_neighbor_file(self, other: Square) -> bool {
        self.file.abs_diff(other.file) == 1
    }

    /// True on the rank where a pawn of `color` promotes.
    pub fn is_last_rank(self, color: Color) -> bool {
        self.rank == color.opponent().home_rank()
    }

    pub fn offset(self, file_delta: i8, rank_delta: i8) -> Option<Square> {
        let file = self.file as i8 + file_delta;
        let rank = self.rank as i8 + rank_delta;
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Some(Square {
                file: file as u8,
                rank: rank as u8,
            })
        } else {
            None
        }
    }
}

impl FromStr for Square {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Square::parse(s)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file) as char, self.rank + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_corners_and_mixed_case() {
        assert_eq!(Square::parse("a1").unwrap(), Square::new(0, 0).unwrap());
        assert_eq!(Square::parse("h8").unwrap(), Square::new(7, 7).unwrap());
        assert_eq!(Square::parse("E4").unwrap(), Square::new(4, 3).unwrap());
    }

    #[test]
    fn rejects_malformed_symbols() {
        for bad in ["", "e", "e44", "i1", "a0", "a9", "ax", "11", "é4"] {
            assert!(
                matches!(Square::parse(bad), Err(ChessError::InvalidLocation(_))),
                "{bad:?} should not parse"
            );
        }
    }

    #[test]
    fn symbol_round_trips() {
        for sq in Square::all() {
            assert_eq!(Square::parse(&sq.symbol()).unwrap(), sq);
        }
    }

    #[test]
    fn enumeration_is_file_major() {
        let first: Vec<String> = Square::all().take(9).map(Square::symbol).collect();
        assert_eq!(first, ["a1", "a2", "a3", "a4", "a5", "a6", "a7", "a8", "b1"]);
        assert_eq!(Square::all().count(), 64);
    }

    #[test]
    fn geometry_helpers() {
        let e4 = Square::parse("e4").unwrap();
        let d5 = Square::parse("d5").unwrap();
        assert_eq!(d5.row_distance(e4), 1);
        assert_eq!(d5.column_distance(e4), -1);
        assert!(e4.is_neighbor_file(d5));
        assert!(!e4.is_same_file(d5));
        assert!(Square::parse("c8").unwrap().is_last_rank(Color::White));
        assert!(Square::parse("c1").unwrap().is_last_rank(Color::Black));
        assert_eq!(Square::parse("h8").unwrap().offset(1, 0), None);
    }
}

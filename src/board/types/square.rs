//! Square types and utilities.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::error::SquareError;

fn file_to_index(file: char) -> Option<usize> {
    match file {
        'a'..='h' => Some(file as usize - 'a' as usize),
        _ => None,
    }
}

/// Algebraic rank digit to row index ('8' is row 0, '1' is row 7)
fn rank_to_index(rank: char) -> Option<usize> {
    match rank {
        '1'..='8' => Some(7 - (rank as usize - '1' as usize)),
        _ => None,
    }
}

/// A square on the chess board, represented as (rank, file).
///
/// Rank 0 is the row holding Black's back-rank pieces in the starting position
/// (algebraic rank 8) and rank 7 holds White's. File 0 is the a-file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Square(pub usize, pub usize); // (rank, file)

impl Square {
    /// Create a new square with bounds checking
    #[must_use]
    pub fn new(rank: usize, file: usize) -> Option<Self> {
        if rank < 8 && file < 8 {
            Some(Square(rank, file))
        } else {
            None
        }
    }

    /// Get the rank (0-7, where 0 = algebraic rank 8)
    #[inline]
    #[must_use]
    pub const fn rank(self) -> usize {
        self.0
    }

    /// Get the file (0-7, where 0 = file a)
    #[inline]
    #[must_use]
    pub const fn file(self) -> usize {
        self.1
    }

    /// Step by a signed (rank, file) delta, `None` when leaving the board
    #[inline]
    #[must_use]
    pub fn offset(self, d_rank: isize, d_file: isize) -> Option<Self> {
        let rank = self.0.checked_add_signed(d_rank)?;
        let file = self.1.checked_add_signed(d_file)?;
        Square::new(rank, file)
    }

    /// File letter, 'a' through 'h'
    #[inline]
    #[must_use]
    pub const fn file_char(self) -> char {
        (b'a' + self.1 as u8) as char
    }

    /// Rank digit as written in algebraic notation, '1' through '8'
    #[inline]
    #[must_use]
    pub const fn rank_char(self) -> char {
        (b'8' - self.0 as u8) as char
    }

    /// All 64 squares in row-major order, starting at a8
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8).flat_map(|rank| (0..8).map(move |file| Square(rank, file)))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl TryFrom<(usize, usize)> for Square {
    type Error = SquareError;

    fn try_from((rank, file): (usize, usize)) -> Result<Self, Self::Error> {
        if rank >= 8 {
            return Err(SquareError::RankOutOfBounds { rank });
        }
        if file >= 8 {
            return Err(SquareError::FileOutOfBounds { file });
        }
        Ok(Square(rank, file))
    }
}

impl FromStr for Square {
    type Err = SquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SquareError::InvalidNotation {
            notation: s.to_string(),
        };
        let mut chars = s.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(invalid());
        };
        let file = file_to_index(file).ok_or_else(invalid)?;
        let rank = rank_to_index(rank).ok_or_else(invalid)?;
        Ok(Square(rank, file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algebraic_names() {
        assert_eq!(Square(6, 4).to_string(), "e2");
        assert_eq!(Square(0, 0).to_string(), "a8");
        assert_eq!(Square(7, 7).to_string(), "h1");
        assert_eq!("e4".parse::<Square>().unwrap(), Square(4, 4));
    }

    #[test]
    fn test_name_round_trip() {
        for sq in Square::all() {
            assert_eq!(sq.to_string().parse::<Square>().unwrap(), sq);
        }
        assert_eq!(Square::all().count(), 64);
    }

    #[test]
    fn test_invalid_names() {
        for bad in ["", "e", "e9", "i1", "e44", "E4"] {
            assert!(
                matches!(bad.parse::<Square>(), Err(SquareError::InvalidNotation { .. })),
                "{bad} should not parse"
            );
        }
    }

    #[test]
    fn test_offset_bounds() {
        assert_eq!(Square(0, 0).offset(-1, 0), None);
        assert_eq!(Square(7, 7).offset(0, 1), None);
        assert_eq!(Square(4, 4).offset(-2, 1), Some(Square(2, 5)));
    }

    #[test]
    fn test_try_from_tuple() {
        assert_eq!(Square::try_from((3, 3)), Ok(Square(3, 3)));
        assert_eq!(
            Square::try_from((8, 0)),
            Err(SquareError::RankOutOfBounds { rank: 8 })
        );
        assert_eq!(
            Square::try_from((0, 9)),
            Err(SquareError::FileOutOfBounds { file: 9 })
        );
    }
}

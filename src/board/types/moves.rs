//! Move requests and the move bookkeeping the game carries between plies.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::PieceKind;
use super::square::Square;
use crate::board::error::MoveParseError;

/// A move request in coordinate form.
///
/// Prints and parses as coordinate notation: `e2e4`, `e7e8q`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl Move {
    #[inline]
    #[must_use]
    pub const fn new(from: Square, to: Square) -> Self {
        Move {
            from,
            to,
            promotion: None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn with_promotion(from: Square, to: Square, kind: PieceKind) -> Self {
        Move {
            from,
            to,
            promotion: Some(kind),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.to_char())?;
        }
        Ok(())
    }
}

impl FromStr for Move {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.is_ascii() || s.len() < 4 || s.len() > 5 {
            return Err(MoveParseError::InvalidLength { len: s.len() });
        }
        let invalid_square = || MoveParseError::InvalidSquare {
            notation: s.to_string(),
        };
        let from: Square = s[0..2].parse().map_err(|_| invalid_square())?;
        let to: Square = s[2..4].parse().map_err(|_| invalid_square())?;

        let promotion = match s[4..].chars().next() {
            None => None,
            Some(c) => match PieceKind::from_char(c) {
                Some(kind) if kind.is_promotable() => Some(kind),
                _ => return Err(MoveParseError::InvalidPromotion { char: c }),
            },
        };

        Ok(Move {
            from,
            to,
            promotion,
        })
    }
}

/// The most recently applied (from, to) pair. Only en passant looks at it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LastMove {
    pub from: Square,
    pub to: Square,
}

impl LastMove {
    #[inline]
    #[must_use]
    pub const fn new(from: Square, to: Square) -> Self {
        LastMove { from, to }
    }

    /// True when the move covered two ranks along one file
    #[inline]
    #[must_use]
    pub const fn is_double_step(self) -> bool {
        self.from.1 == self.to.1 && self.from.0.abs_diff(self.to.0) == 2
    }

    /// The square skipped by a double step
    #[must_use]
    pub const fn skipped_square(self) -> Option<Square> {
        if self.is_double_step() {
            Some(Square((self.from.0 + self.to.0) / 2, self.to.1))
        } else {
            None
        }
    }
}

/// A pawn move to the last rank waiting for its promotion piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PendingPromotion {
    pub from: Square,
    pub to: Square,
}

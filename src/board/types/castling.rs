//! Castling rights type.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::Color;

const CASTLE_WHITE_K: u8 = 1 << 0;
const CASTLE_WHITE_Q: u8 = 1 << 1;
const CASTLE_BLACK_K: u8 = 1 << 2;
const CASTLE_BLACK_Q: u8 = 1 << 3;

/// All castling rights combined
const ALL_CASTLING_RIGHTS: u8 = CASTLE_WHITE_K | CASTLE_WHITE_Q | CASTLE_BLACK_K | CASTLE_BLACK_Q;

/// FEN letters in the order they are written
const FEN_ORDER: [(char, Color, bool); 4] = [
    ('K', Color::White, true),
    ('Q', Color::White, false),
    ('k', Color::Black, true),
    ('q', Color::Black, false),
];

/// Castling rights represented as a bitmask.
///
/// The board does not store rights: they are derived from the moved flags of
/// kings and corner rooks, and only materialised for FEN.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CastlingRights(u8);

impl CastlingRights {
    /// No castling rights
    #[must_use]
    pub const fn none() -> Self {
        CastlingRights(0)
    }

    /// All castling rights (both sides can castle kingside and queenside)
    #[must_use]
    pub const fn all() -> Self {
        CastlingRights(ALL_CASTLING_RIGHTS)
    }

    /// Check if a specific castling right is set
    #[inline]
    #[must_use]
    pub const fn has(self, color: Color, kingside: bool) -> bool {
        let bit = Self::bit_for(color, kingside);
        self.0 & bit != 0
    }

    /// Whether `color` keeps at least one right
    #[inline]
    #[must_use]
    pub const fn has_any(self, color: Color) -> bool {
        self.has(color, true) || self.has(color, false)
    }

    /// Set a specific castling right
    #[inline]
    pub fn set(&mut self, color: Color, kingside: bool) {
        self.0 |= Self::bit_for(color, kingside);
    }

    /// Remove a specific castling right
    #[inline]
    pub fn remove(&mut self, color: Color, kingside: bool) {
        self.0 &= !Self::bit_for(color, kingside);
    }

    /// Parse the FEN castling field (`KQkq`, any subset, or `-`).
    ///
    /// Returns the offending character on failure.
    pub fn from_fen_field(field: &str) -> Result<Self, char> {
        let mut rights = CastlingRights::none();
        if field == "-" {
            return Ok(rights);
        }
        for c in field.chars() {
            match FEN_ORDER.iter().find(|(letter, _, _)| *letter == c) {
                Some(&(_, color, kingside)) => rights.set(color, kingside),
                None => return Err(c),
            }
        }
        Ok(rights)
    }

    /// Render the FEN castling field
    #[must_use]
    pub fn to_fen_field(self) -> String {
        let field: String = FEN_ORDER
            .iter()
            .filter(|(_, color, kingside)| self.has(*color, *kingside))
            .map(|(letter, _, _)| *letter)
            .collect();
        if field.is_empty() {
            "-".to_string()
        } else {
            field
        }
    }

    /// Get the bit for a specific castling right
    #[inline]
    const fn bit_for(color: Color, kingside: bool) -> u8 {
        match (color, kingside) {
            (Color::White, true) => CASTLE_WHITE_K,
            (Color::White, false) => CASTLE_WHITE_Q,
            (Color::Black, true) => CASTLE_BLACK_K,
            (Color::Black, false) => CASTLE_BLACK_Q,
        }
    }
}

use std::fmt;

use once_cell::sync::Lazy;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{BoardBuilder, Color, Piece, PieceKind, Square};

static STARTING_BOARD: Lazy<Board> = Lazy::new(|| BoardBuilder::starting_position().build());

/// An 8×8 grid of optional pieces.
///
/// A `Board` is a plain value. Every operation that changes the position
/// returns a new `Board` and leaves `self` untouched, so snapshots kept in the
/// history can never be altered after the fact.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Board {
    pub(crate) squares: [[Option<Piece>; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// The standard starting position
    #[must_use]
    pub fn new() -> Self {
        *STARTING_BOARD
    }

    /// A board with no pieces
    #[must_use]
    pub const fn empty() -> Self {
        Board {
            squares: [[None; 8]; 8],
        }
    }

    /// The raw grid, row 0 first
    #[inline]
    #[must_use]
    pub const fn squares(&self) -> &[[Option<Piece>; 8]; 8] {
        &self.squares
    }

    #[inline]
    #[must_use]
    pub const fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.0][square.1]
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(&self, square: Square) -> bool {
        self.squares[square.0][square.1].is_none()
    }

    /// A copy of this board with `piece` placed on `square`
    #[must_use]
    pub fn with_piece(&self, square: Square, piece: Piece) -> Board {
        let mut next = *self;
        next.set(square, Some(piece));
        next
    }

    /// A copy of this board with `square` cleared
    #[must_use]
    pub fn without_piece(&self, square: Square) -> Board {
        let mut next = *self;
        next.set(square, None);
        next
    }

    /// Only ever called on a local copy that has not been handed out yet
    #[inline]
    pub(crate) fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square.0][square.1] = piece;
    }

    /// Every occupied square with its piece, row-major from a8
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|p| (sq, p)))
    }

    #[must_use]
    pub fn piece_count(&self) -> usize {
        self.pieces().count()
    }

    /// First square (row-major) whose piece satisfies `pred`
    pub fn find_first_matching<F>(&self, pred: F) -> Option<Square>
    where
        F: Fn(Square, Piece) -> bool,
    {
        self.pieces()
            .find(|&(sq, piece)| pred(sq, piece))
            .map(|(sq, _)| sq)
    }

    /// All squares (row-major) whose piece satisfies `pred`
    pub fn find_all_matching<F>(&self, pred: F) -> Vec<Square>
    where
        F: Fn(Square, Piece) -> bool,
    {
        self.pieces()
            .filter(|&(sq, piece)| pred(sq, piece))
            .map(|(sq, _)| sq)
            .collect()
    }

    #[must_use]
    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.find_first_matching(|_, p| p.is(PieceKind::King, color))
    }

    /// Move whatever stands on `from` to `to`, capturing whatever stands on `to`.
    ///
    /// Pawns, kings and rooks are marked as moved. Castling and en passant have their
    /// own executors; this is the plain relocation they build on. An empty
    /// origin yields an unchanged copy.
    #[must_use]
    pub fn apply_move(&self, from: Square, to: Square) -> Board {
        let mut next = *self;
        if let Some(piece) = self.piece_at(from) {
            next.set(from, None);
            next.set(to, Some(piece.after_move()));
        }
        next
    }

    /// A copy whose kings carry an up-to-date `in_check` flag
    #[must_use]
    pub fn with_check_flags(&self) -> Board {
        let mut next = *self;
        for color in Color::BOTH {
            let in_check = self.is_king_in_check(color);
            for sq in self.find_all_matching(|_, p| p.is(PieceKind::King, color)) {
                if let Some(king) = self.piece_at(sq) {
                    next.set(sq, Some(Piece { in_check, ..king }));
                }
            }
        }
        next
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (rank, row) in self.squares.iter().enumerate() {
            write!(f, "{} ", 8 - rank)?;
            for cell in row {
                let c = cell.map_or('.', Piece::to_fen_char);
                write!(f, " {c}")?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

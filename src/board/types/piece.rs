//! Piece kinds, colors and the per-snapshot piece value.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A (rank, file) step. Rank grows toward White's side of the board.
pub(crate) type Direction = (isize, isize);

const ORTHOGONAL: [Direction; 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONAL: [Direction; 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ROYAL: [Direction; 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];
const KNIGHT_JUMPS: [Direction; 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];
const WHITE_PAWN_CAPTURES: [Direction; 2] = [(-1, -1), (-1, 1)];
const BLACK_PAWN_CAPTURES: [Direction; 2] = [(1, -1), (1, 1)];

/// Chess piece kinds.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// All piece kinds in index order
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Parse a piece kind from a character, ignoring case (p, n, b, r, q, k)
    #[must_use]
    pub fn from_char(c: char) -> Option<PieceKind> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }

    /// Convert to lowercase character
    #[inline]
    #[must_use]
    pub const fn to_char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    /// Uppercase letter used in algebraic notation. Pawns have none.
    #[inline]
    #[must_use]
    pub const fn notation_letter(self) -> Option<char> {
        match self {
            PieceKind::Pawn => None,
            PieceKind::Knight => Some('N'),
            PieceKind::Bishop => Some('B'),
            PieceKind::Rook => Some('R'),
            PieceKind::Queen => Some('Q'),
            PieceKind::King => Some('K'),
        }
    }

    /// Whether a pawn may promote into this kind
    #[inline]
    #[must_use]
    pub const fn is_promotable(self) -> bool {
        matches!(
            self,
            PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen
        )
    }

    /// Returns true if this piece walks its directions until blocked (Bishop, Rook, Queen)
    #[inline]
    #[must_use]
    pub const fn is_slider(self) -> bool {
        matches!(self, PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen)
    }

    /// Directions used for both moving and capturing. Pawns are handled separately
    /// because their geometry depends on color and occupancy.
    #[must_use]
    pub(crate) const fn directions(self) -> &'static [Direction] {
        match self {
            PieceKind::Pawn => &[],
            PieceKind::Knight => &KNIGHT_JUMPS,
            PieceKind::Bishop => &DIAGONAL,
            PieceKind::Rook => &ORTHOGONAL,
            PieceKind::Queen | PieceKind::King => &ROYAL,
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceKind::Pawn => "pawn",
            PieceKind::Knight => "knight",
            PieceKind::Bishop => "bishop",
            PieceKind::Rook => "rook",
            PieceKind::Queen => "queen",
            PieceKind::King => "king",
        };
        f.write_str(name)
    }
}

/// Promotion choices in order of typical preference (queen first)
pub const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// Chess colors.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Both colors, White first
    pub const BOTH: [Color; 2] = [Color::White, Color::Black];

    /// Returns the opposite color
    #[inline]
    #[must_use]
    pub const fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row holding this color's pieces in the starting position (7 for White, 0 for Black)
    #[inline]
    #[must_use]
    pub const fn back_rank(self) -> usize {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// Rank step a pawn of this color advances by (-1 for White, +1 for Black)
    #[inline]
    #[must_use]
    pub const fn pawn_direction(self) -> isize {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Row pawns of this color start on (6 for White, 1 for Black)
    #[inline]
    #[must_use]
    pub const fn pawn_start_rank(self) -> usize {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    /// Row on which pawns of this color promote (0 for White, 7 for Black)
    #[inline]
    #[must_use]
    pub const fn pawn_promotion_rank(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    /// FEN active-color letter
    #[inline]
    #[must_use]
    pub const fn fen_char(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }

    #[must_use]
    pub(crate) const fn pawn_captures(self) -> &'static [Direction] {
        match self {
            Color::White => &WHITE_PAWN_CAPTURES,
            Color::Black => &BLACK_PAWN_CAPTURES,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

/// A piece as it stands in one board snapshot.
///
/// `moved` and `in_check` belong to the snapshot: applying a move produces a new
/// board holding updated copies, so older snapshots keep their flags.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    /// Set once a pawn, king or rook has left its starting square; always
    /// false for the other kinds
    pub moved: bool,
    /// Only ever set on kings
    pub in_check: bool,
}

impl Piece {
    /// A piece that has never moved
    #[inline]
    #[must_use]
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Piece {
            kind,
            color,
            moved: false,
            in_check: false,
        }
    }

    /// The same piece with `moved` set
    #[inline]
    #[must_use]
    pub const fn mark_moved(self) -> Self {
        Piece {
            moved: true,
            ..self
        }
    }

    /// Pawns, kings and rooks: the kinds whose rules look at `moved`
    #[inline]
    #[must_use]
    pub const fn tracks_moves(self) -> bool {
        matches!(self.kind, PieceKind::Pawn | PieceKind::King | PieceKind::Rook)
    }

    /// The piece after it has moved, with `moved` set only where it is tracked
    #[inline]
    #[must_use]
    pub const fn after_move(self) -> Self {
        Piece {
            moved: self.moved || self.tracks_moves(),
            ..self
        }
    }

    #[inline]
    #[must_use]
    pub fn is(self, kind: PieceKind, color: Color) -> bool {
        self.kind == kind && self.color == color
    }

    /// FEN letter, uppercase for White
    #[inline]
    #[must_use]
    pub fn to_fen_char(self) -> char {
        let c = self.kind.to_char();
        if self.color == Color::White {
            c.to_ascii_uppercase()
        } else {
            c
        }
    }

    /// Parse a FEN letter into an unmoved piece
    #[must_use]
    pub fn from_fen_char(c: char) -> Option<Self> {
        let kind = PieceKind::from_char(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece::new(kind, color))
    }
}

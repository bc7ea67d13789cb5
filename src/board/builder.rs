//! Fluent builder for constructing chess positions.
//!
//! Allows creating positions piece by piece rather than parsing FEN strings.
//!
//! # Example
//! ```
//! use chess_rules::board::{BoardBuilder, Color, PieceKind, Square};
//!
//! let board = BoardBuilder::new()
//!     .piece(Square(7, 4), Color::White, PieceKind::King)
//!     .piece(Square(0, 4), Color::Black, PieceKind::King)
//!     .moved_piece(Square(1, 0), Color::White, PieceKind::Pawn)
//!     .build();
//! assert_eq!(board.piece_count(), 3);
//! ```

use super::{Board, Color, Piece, PieceKind, Square};

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// A fluent builder for constructing `Board` values.
#[derive(Clone, Debug)]
pub struct BoardBuilder {
    pieces: Vec<(Square, Piece)>,
}

impl Default for BoardBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardBuilder {
    /// Create a new empty board builder.
    #[must_use]
    pub fn new() -> Self {
        BoardBuilder { pieces: Vec::new() }
    }

    /// Create a builder starting from the standard initial position.
    #[must_use]
    pub fn starting_position() -> Self {
        let mut builder = Self::new();
        for (file, &kind) in BACK_RANK.iter().enumerate() {
            builder = builder
                .piece(Square(Color::White.back_rank(), file), Color::White, kind)
                .piece(Square(Color::Black.back_rank(), file), Color::Black, kind)
                .piece(
                    Square(Color::White.pawn_start_rank(), file),
                    Color::White,
                    PieceKind::Pawn,
                )
                .piece(
                    Square(Color::Black.pawn_start_rank(), file),
                    Color::Black,
                    PieceKind::Pawn,
                );
        }
        builder
    }

    /// Place an unmoved piece on the board.
    #[must_use]
    pub fn piece(self, square: Square, color: Color, kind: PieceKind) -> Self {
        self.place(square, Piece::new(kind, color))
    }

    /// Place a piece that counts as having moved (no castling, no double step).
    #[must_use]
    pub fn moved_piece(self, square: Square, color: Color, kind: PieceKind) -> Self {
        self.place(square, Piece::new(kind, color).mark_moved())
    }

    /// Place an exact piece value, flags included.
    #[must_use]
    pub fn place(mut self, square: Square, piece: Piece) -> Self {
        // Remove any existing piece on this square
        self.pieces.retain(|(sq, _)| *sq != square);
        self.pieces.push((square, piece));
        self
    }

    /// Remove a piece from a square.
    #[must_use]
    pub fn clear(mut self, square: Square) -> Self {
        self.pieces.retain(|(sq, _)| *sq != square);
        self
    }

    /// Build the board.
    #[must_use]
    pub fn build(self) -> Board {
        let mut board = Board::empty();
        for (square, piece) in self.pieces {
            board.set(square, Some(piece));
        }
        board
    }
}

//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types.
//!
//! # Example
//! ```
//! use chess_rules::board::prelude::*;
//!
//! let pos = Position::starting();
//! assert_eq!(pos.board, Board::new());
//! ```

pub use super::{
    Board, BoardBuilder, Color, FenError, LastMove, Move, MoveCategory, MoveHistoryEntry, Piece,
    PieceKind, Position, Square,
};

//! Core chess types.
//!
//! This module contains the fundamental value types used throughout the engine:
//! - `PieceKind`, `Color` and `Piece` - piece identity plus per-snapshot flags
//! - `Square` - (rank, file) board coordinate
//! - `Move`, `LastMove` and `PendingPromotion` - move requests and bookkeeping
//! - `CastlingRights` - castling state as written in FEN

mod castling;
mod moves;
mod piece;
mod square;

// Re-export all public types
pub use castling::CastlingRights;
pub use moves::{LastMove, Move, PendingPromotion};
pub use piece::{Color, Piece, PieceKind, PROMOTION_KINDS};
pub use square::Square;

// Re-export internal utilities
pub(crate) use piece::Direction;

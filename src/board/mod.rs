//! Chess board representation and move rules.
//!
//! A [`Board`] is an immutable 8×8 grid. Legal-move queries, check detection
//! and the special-move executors are split across submodules as `impl Board`
//! blocks; every operation that changes the position returns a new board.
//!
//! # Example
//! ```
//! use chess_rules::board::{Board, Square};
//!
//! let board = Board::new();
//! let e2: Square = "e2".parse().unwrap();
//! println!("e2 pawn can reach {} squares", board.legal_moves(e2, None).len());
//! ```

mod builder;
mod check;
mod error;
mod fen;
mod movegen;
mod notation;
mod position;
pub mod prelude;
mod special;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use builder::BoardBuilder;
pub use error::{FenError, MoveParseError, MoveRejection, SquareError};
pub use fen::STARTING_FEN;
pub use notation::{CheckStatus, MoveCategory, MoveHistoryEntry, MoveShape};
pub use position::Position;
pub use state::Board;
pub use types::{
    CastlingRights, Color, LastMove, Move, PendingPromotion, Piece, PieceKind, Square,
    PROMOTION_KINDS,
};

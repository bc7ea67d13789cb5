//! Chess rules: legal move generation, check detection, special moves, FEN,
//! move notation and a game state machine with history.

/// Forward to the `log` crate when the `logging` feature is on.
#[cfg(feature = "logging")]
macro_rules! engine_log {
    ($level:ident, $($arg:tt)+) => {
        ::log::$level!($($arg)+)
    };
}

/// Expands to nothing without the `logging` feature; arguments are still
/// type-checked.
#[cfg(not(feature = "logging"))]
macro_rules! engine_log {
    ($level:ident, $($arg:tt)+) => {
        if false {
            let _ = format_args!($($arg)+);
        }
    };
}

pub mod board;
pub mod game;
pub mod history;
pub mod remote;
pub mod sync;

pub use board::{Board, Color, FenError, Move, Piece, PieceKind, Position, Square};
pub use game::{Game, MoveObserver, MoveOutcome};
pub use history::BoardHistory;
pub use remote::{AnalysisService, MoveValidator, Reconciliation, ValidatedMove};
pub use sync::SharedGame;

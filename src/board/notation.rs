//! Algebraic move notation and the category attached to each recorded move.
//!
//! Notation is built from the board *before* the move is applied, together with
//! the shape the executor reported and the check status of the board after it.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{Board, LastMove, PieceKind, Square};

/// Which executor carried out a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MoveShape {
    Normal,
    Castle,
    EnPassant,
    Promotion(PieceKind),
}

/// Check status of the side to move after a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CheckStatus {
    #[default]
    None,
    Check,
    Checkmate,
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckStatus::None => Ok(()),
            CheckStatus::Check => f.write_str("+"),
            CheckStatus::Checkmate => f.write_str("#"),
        }
    }
}

/// Category recorded with each move; consumers use it to pick a side effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MoveCategory {
    Normal,
    Capture,
    Castle,
    EnPassant,
    Promote,
    Check,
    Checkmate,
}

impl MoveCategory {
    /// Checkmate over check over the move's own shape; among shapes castle
    /// beats en passant beats promotion beats capture.
    #[must_use]
    pub fn classify(shape: MoveShape, capture: bool, status: CheckStatus) -> MoveCategory {
        match (status, shape) {
            (CheckStatus::Checkmate, _) => MoveCategory::Checkmate,
            (CheckStatus::Check, _) => MoveCategory::Check,
            (_, MoveShape::Castle) => MoveCategory::Castle,
            (_, MoveShape::EnPassant) => MoveCategory::EnPassant,
            (_, MoveShape::Promotion(_)) => MoveCategory::Promote,
            _ if capture => MoveCategory::Capture,
            _ => MoveCategory::Normal,
        }
    }
}

impl fmt::Display for MoveCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MoveCategory::Normal => "normal",
            MoveCategory::Capture => "capture",
            MoveCategory::Castle => "castle",
            MoveCategory::EnPassant => "en passant",
            MoveCategory::Promote => "promote",
            MoveCategory::Check => "check",
            MoveCategory::Checkmate => "checkmate",
        };
        f.write_str(name)
    }
}

/// One recorded move
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MoveHistoryEntry {
    pub notation: String,
    pub category: MoveCategory,
}

impl fmt::Display for MoveHistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.notation)
    }
}

impl Board {
    /// Whether a move of the given shape onto `to` removes an enemy piece
    #[must_use]
    pub fn is_capture(&self, to: Square, shape: MoveShape) -> bool {
        shape == MoveShape::EnPassant || (shape != MoveShape::Castle && !self.is_empty(to))
    }

    /// Algebraic notation for a move about to be played on this board.
    ///
    /// `status` describes the opponent after the move and supplies the single
    /// trailing `+` or `#`. Returns an empty string when `from` is empty.
    #[must_use]
    pub fn notation_for(
        &self,
        from: Square,
        to: Square,
        shape: MoveShape,
        last_move: Option<LastMove>,
        status: CheckStatus,
    ) -> String {
        let Some(piece) = self.piece_at(from) else {
            return String::new();
        };

        let mut san = String::new();
        if shape == MoveShape::Castle {
            san.push_str(if to.1 > from.1 { "O-O" } else { "O-O-O" });
            san.push_str(&status.to_string());
            return san;
        }

        let capture = self.is_capture(to, shape);
        match piece.kind.notation_letter() {
            Some(letter) => {
                san.push(letter);
                san.push_str(&self.disambiguation(from, to, last_move));
            }
            None if capture => san.push(from.file_char()),
            None => {}
        }
        if capture {
            san.push('x');
        }
        san.push_str(&to.to_string());

        match shape {
            MoveShape::EnPassant => san.push_str(" e.p."),
            MoveShape::Promotion(kind) => {
                san.push('=');
                san.push(kind.notation_letter().unwrap_or('Q'));
            }
            _ => {}
        }
        san.push_str(&status.to_string());
        san
    }

    /// File, rank or both of `from` when another piece of the same kind and
    /// color could also legally reach `to`.
    fn disambiguation(&self, from: Square, to: Square, last_move: Option<LastMove>) -> String {
        let Some(piece) = self.piece_at(from) else {
            return String::new();
        };
        if piece.kind == PieceKind::King {
            return String::new();
        }

        let rivals = self.find_all_matching(|sq, p| {
            sq != from
                && p.is(piece.kind, piece.color)
                && self.legal_moves(sq, last_move).contains(&to)
        });
        if rivals.is_empty() {
            return String::new();
        }

        let file_unique = rivals.iter().all(|sq| sq.1 != from.1);
        let rank_unique = rivals.iter().all(|sq| sq.0 != from.0);
        if file_unique {
            from.file_char().to_string()
        } else if rank_unique {
            from.rank_char().to_string()
        } else {
            from.to_string()
        }
    }
}

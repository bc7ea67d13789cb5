//! Castling, en passant and promotion: extra candidates beyond piece geometry,
//! and the executors that carry them out.

mod castling;
mod en_passant;
mod promotion;

use super::{Board, LastMove, Move, MoveShape, PieceKind};

impl Board {
    /// The executor `mv` routes to on this board.
    ///
    /// A king moving two files castles, a pawn moving diagonally onto an en
    /// passant candidate captures en passant, and a pawn reaching its last rank
    /// promotes to `mv.promotion` (queen when unset).
    #[must_use]
    pub fn move_shape(&self, mv: Move, last_move: Option<LastMove>) -> MoveShape {
        if self.is_castling_move(mv.from, mv.to) {
            MoveShape::Castle
        } else if self.is_en_passant_capture(mv.from, mv.to, last_move) {
            MoveShape::EnPassant
        } else if self.is_promotion_move(mv.from, mv.to) {
            MoveShape::Promotion(mv.promotion.unwrap_or(PieceKind::Queen))
        } else {
            MoveShape::Normal
        }
    }

    /// Apply `mv` through the matching executor without checking legality.
    ///
    /// `None` when `from` is empty, when a promotion move carries no piece
    /// choice, or when a special executor finds its pieces missing.
    #[must_use]
    pub fn execute(&self, mv: Move, last_move: Option<LastMove>) -> Option<(Board, MoveShape)> {
        self.piece_at(mv.from)?;
        if self.is_promotion_move(mv.from, mv.to) && mv.promotion.is_none() {
            return None;
        }
        let shape = self.move_shape(mv, last_move);
        let next = match shape {
            MoveShape::Castle => self.perform_castling(mv.from, mv.to)?,
            MoveShape::EnPassant => self.perform_en_passant(mv.from, mv.to)?,
            MoveShape::Promotion(kind) => self.perform_promotion(mv.from, mv.to, kind)?,
            MoveShape::Normal => self.apply_move(mv.from, mv.to),
        };
        Some((next, shape))
    }
}

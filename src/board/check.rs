//! Attack detection and the king-safety filter applied to every candidate move.

use super::{Board, Color, LastMove, Square};

impl Board {
    /// Whether any piece of `defender`'s opponent attacks `square`.
    ///
    /// Pawns attack their diagonals only, so an empty square a pawn could
    /// capture on counts and the square in front of it does not.
    #[must_use]
    pub fn is_square_attacked(&self, square: Square, defender: Color) -> bool {
        let attacker = defender.opponent();
        self.pieces()
            .filter(|(_, p)| p.color == attacker)
            .any(|(from, piece)| self.attacks_square(piece, from, square))
    }

    /// A side with no king on the board is never in check.
    #[must_use]
    pub fn is_king_in_check(&self, color: Color) -> bool {
        self.find_king(color)
            .is_some_and(|king| self.is_square_attacked(king, color))
    }

    /// Play `from`→`to` as a plain relocation on a copy and test the mover's king.
    ///
    /// No castling or en passant side effects are applied; those moves have
    /// their own safety checks.
    #[must_use]
    pub fn would_leave_king_in_check(&self, from: Square, to: Square) -> bool {
        let Some(piece) = self.piece_at(from) else {
            return false;
        };
        self.apply_move(from, to).is_king_in_check(piece.color)
    }

    /// Keep only the candidates that do not expose the mover's king
    #[must_use]
    pub fn filter_legal_moves(&self, from: Square, candidates: Vec<Square>) -> Vec<Square> {
        candidates
            .into_iter()
            .filter(|&to| !self.would_leave_king_in_check(from, to))
            .collect()
    }

    /// In check with no legal move anywhere.
    #[must_use]
    pub fn is_checkmate(&self, color: Color, last_move: Option<LastMove>) -> bool {
        self.is_king_in_check(color) && !self.has_any_legal_move(color, last_move)
    }

    /// Not in check, but no legal move anywhere.
    #[must_use]
    pub fn is_stalemate(&self, color: Color, last_move: Option<LastMove>) -> bool {
        !self.is_king_in_check(color) && !self.has_any_legal_move(color, last_move)
    }
}

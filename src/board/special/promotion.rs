use super::super::{Board, Piece, PieceKind, Square};

impl Board {
    /// A pawn moving onto its promotion rank
    #[must_use]
    pub fn is_promotion_move(&self, from: Square, to: Square) -> bool {
        self.piece_at(from)
            .is_some_and(|p| p.kind == PieceKind::Pawn && to.0 == p.color.pawn_promotion_rank())
    }

    /// Replace the pawn on `from` with a `kind` piece on `to`, capturing
    /// whatever stands there. A new rook counts as moved; the other pieces
    /// carry no moved flag.
    ///
    /// `None` when `from` holds no pawn or `kind` is not a promotion choice.
    #[must_use]
    pub fn perform_promotion(&self, from: Square, to: Square, kind: PieceKind) -> Option<Board> {
        if !kind.is_promotable() {
            return None;
        }
        let pawn = self.piece_at(from).filter(|p| p.kind == PieceKind::Pawn)?;
        Some(
            self.without_piece(from)
                .with_piece(to, Piece::new(kind, pawn.color).after_move()),
        )
    }
}

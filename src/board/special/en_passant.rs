use super::super::{Board, LastMove, PieceKind, Square};

impl Board {
    /// The en passant destination available to the pawn on `pawn_square`, if any.
    ///
    /// Requires `last_move` to be an enemy pawn's double step that landed beside
    /// this pawn; the destination is the square that pawn skipped.
    #[must_use]
    pub fn en_passant_candidates(
        &self,
        pawn_square: Square,
        last_move: Option<LastMove>,
    ) -> Vec<Square> {
        let Some(pawn) = self
            .piece_at(pawn_square)
            .filter(|p| p.kind == PieceKind::Pawn)
        else {
            return Vec::new();
        };
        let Some(last) = last_move else {
            return Vec::new();
        };
        let Some(skipped) = last.skipped_square() else {
            return Vec::new();
        };

        let victim_is_pawn = self
            .piece_at(last.to)
            .is_some_and(|p| p.is(PieceKind::Pawn, pawn.color.opponent()));
        let beside = last.to.0 == pawn_square.0 && last.to.1.abs_diff(pawn_square.1) == 1;

        if victim_is_pawn && beside && self.is_empty(skipped) {
            vec![skipped]
        } else {
            Vec::new()
        }
    }

    #[must_use]
    pub fn is_en_passant_capture(
        &self,
        from: Square,
        to: Square,
        last_move: Option<LastMove>,
    ) -> bool {
        self.en_passant_candidates(from, last_move).contains(&to)
    }

    /// Move the pawn diagonally and remove the enemy pawn beside its origin.
    #[must_use]
    pub fn perform_en_passant(&self, from: Square, to: Square) -> Option<Board> {
        let pawn = self.piece_at(from).filter(|p| p.kind == PieceKind::Pawn)?;
        let captured = Square(from.0, to.1);
        self.piece_at(captured)
            .filter(|p| p.is(PieceKind::Pawn, pawn.color.opponent()))?;
        Some(self.apply_move(from, to).without_piece(captured))
    }

    /// Both pawns leave the capturing rank, which a plain relocation does not
    /// model, so the real capture is played out.
    pub(crate) fn en_passant_exposes_king(&self, from: Square, to: Square) -> bool {
        let Some(pawn) = self.piece_at(from) else {
            return true;
        };
        self.perform_en_passant(from, to)
            .map_or(true, |next| next.is_king_in_check(pawn.color))
    }
}

use super::super::{Board, Piece, PieceKind, Square};

/// One castling direction: corner rook file, the files that must be empty, and
/// the file the king crosses.
struct CastleSide {
    rook_file: usize,
    between: &'static [usize],
    transit_file: usize,
    king_to_file: usize,
}

const KING_HOME_FILE: usize = 4;

const KINGSIDE: CastleSide = CastleSide {
    rook_file: 7,
    between: &[5, 6],
    transit_file: 5,
    king_to_file: 6,
};

const QUEENSIDE: CastleSide = CastleSide {
    rook_file: 0,
    between: &[1, 2, 3],
    transit_file: 3,
    king_to_file: 2,
};

impl Board {
    /// Castling destinations for the king on `king_square`.
    ///
    /// The king must be unmoved on its home square and not in check, the
    /// corner rook unmoved, the squares between them empty, and none of the
    /// squares the king stands on, crosses or lands on attacked.
    #[must_use]
    pub fn castling_candidates(&self, king_square: Square) -> Vec<Square> {
        let Some(king) = self.piece_at(king_square) else {
            return Vec::new();
        };
        let rank = king.color.back_rank();
        if king.kind != PieceKind::King
            || king.moved
            || king_square != Square(rank, KING_HOME_FILE)
            || self.is_square_attacked(king_square, king.color)
        {
            return Vec::new();
        }

        [KINGSIDE, QUEENSIDE]
            .iter()
            .filter(|side| {
                let rook_ready = self
                    .piece_at(Square(rank, side.rook_file))
                    .is_some_and(|rook| rook.is(PieceKind::Rook, king.color) && !rook.moved);
                rook_ready
                    && side.between.iter().all(|&f| self.is_empty(Square(rank, f)))
                    && !self.is_square_attacked(Square(rank, side.transit_file), king.color)
                    && !self.is_square_attacked(Square(rank, side.king_to_file), king.color)
            })
            .map(|side| Square(rank, side.king_to_file))
            .collect()
    }

    /// A king moving two files along its row
    #[must_use]
    pub fn is_castling_move(&self, from: Square, to: Square) -> bool {
        let is_king = self.piece_at(from).is_some_and(|p| p.kind == PieceKind::King);
        is_king && from.0 == to.0 && from.1.abs_diff(to.1) == 2
    }

    /// Move the king two files and the rook onto the square the king crossed.
    ///
    /// Both pieces end up marked as moved. `None` when there is no king on
    /// `from` or no same-colored rook in the matching corner.
    #[must_use]
    pub fn perform_castling(&self, from: Square, to: Square) -> Option<Board> {
        let king = self.piece_at(from).filter(|p| p.kind == PieceKind::King)?;
        if !self.is_castling_move(from, to) {
            return None;
        }
        let rook_file = if to.1 > from.1 { 7 } else { 0 };
        let rook_from = Square(from.0, rook_file);
        let rook_to = Square(from.0, (from.1 + to.1) / 2);
        let rook = self
            .piece_at(rook_from)
            .filter(|p| p.is(PieceKind::Rook, king.color))?;

        let mut next = *self;
        next.set(from, None);
        next.set(rook_from, None);
        next.set(to, Some(king.mark_moved()));
        next.set(rook_to, Some(Piece { moved: true, ..rook }));
        Some(next)
    }
}

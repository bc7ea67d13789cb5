use super::super::{Board, Color, Square};

impl Board {
    /// Forward pushes that never capture, then diagonal steps that only capture.
    pub(crate) fn generate_pawn_moves(&self, from: Square, color: Color, moved: bool) -> Vec<Square> {
        let mut moves = Vec::new();
        let dir = color.pawn_direction();

        if let Some(one) = from.offset(dir, 0).filter(|sq| self.is_empty(*sq)) {
            moves.push(one);
            if !moved {
                if let Some(two) = one.offset(dir, 0).filter(|sq| self.is_empty(*sq)) {
                    moves.push(two);
                }
            }
        }

        for &(d_rank, d_file) in color.pawn_captures() {
            if let Some(target) = from.offset(d_rank, d_file) {
                if self.piece_at(target).is_some_and(|p| p.color != color) {
                    moves.push(target);
                }
            }
        }

        moves
    }

    /// Diagonal squares a pawn controls, occupied or not.
    pub(crate) fn pawn_attacks(from: Square, color: Color) -> impl Iterator<Item = Square> {
        color
            .pawn_captures()
            .iter()
            .filter_map(move |&(d_rank, d_file)| from.offset(d_rank, d_file))
    }
}

use super::super::types::Direction;
use super::super::{Board, Color, Square};

impl Board {
    /// Walk each direction from `from`.
    ///
    /// Empty squares are collected; the walk stops at the board edge, at an own
    /// piece (excluded) or at an enemy piece (included). Step pieces stop after
    /// one square.
    pub(crate) fn generate_ray_moves(
        &self,
        from: Square,
        color: Color,
        directions: &[Direction],
        slide: bool,
    ) -> Vec<Square> {
        let mut moves = Vec::new();
        for &(d_rank, d_file) in directions {
            let mut current = from.offset(d_rank, d_file);
            while let Some(sq) = current {
                match self.piece_at(sq) {
                    None => moves.push(sq),
                    Some(other) => {
                        if other.color != color {
                            moves.push(sq);
                        }
                        break;
                    }
                }
                if !slide {
                    break;
                }
                current = sq.offset(d_rank, d_file);
            }
        }
        moves
    }

    /// Whether a ray piece on `from` reaches `target` through empty squares.
    pub(crate) fn ray_reaches(
        &self,
        from: Square,
        target: Square,
        directions: &[Direction],
        slide: bool,
    ) -> bool {
        for &(d_rank, d_file) in directions {
            let mut current = from.offset(d_rank, d_file);
            while let Some(sq) = current {
                if sq == target {
                    return true;
                }
                if !slide || !self.is_empty(sq) {
                    break;
                }
                current = sq.offset(d_rank, d_file);
            }
        }
        false
    }
}

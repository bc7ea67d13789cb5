//! Move generation: piece geometry, attack maps and the legal-move query.

mod pawns;
mod sliders;

use super::{Board, Color, LastMove, Move, Piece, PieceKind, Square, PROMOTION_KINDS};

impl Board {
    /// Destinations consistent with `piece`'s geometry when standing on `from`,
    /// ignoring whether the owner's king would be left in check.
    #[must_use]
    pub fn pseudo_moves(&self, piece: Piece, from: Square) -> Vec<Square> {
        match piece.kind {
            PieceKind::Pawn => self.generate_pawn_moves(from, piece.color, piece.moved),
            kind => self.generate_ray_moves(from, piece.color, kind.directions(), kind.is_slider()),
        }
    }

    /// Squares `piece` on `from` attacks.
    ///
    /// Same as [`Board::pseudo_moves`] except for pawns, which attack both
    /// diagonals whether or not anything stands there and never attack forward.
    #[must_use]
    pub fn attacked_squares(&self, piece: Piece, from: Square) -> Vec<Square> {
        match piece.kind {
            PieceKind::Pawn => Board::pawn_attacks(from, piece.color).collect(),
            kind => self.generate_ray_moves(from, piece.color, kind.directions(), kind.is_slider()),
        }
    }

    /// Allocation-free form of `attacked_squares(piece, from).contains(&target)`
    pub(crate) fn attacks_square(&self, piece: Piece, from: Square, target: Square) -> bool {
        match piece.kind {
            PieceKind::Pawn => Board::pawn_attacks(from, piece.color).any(|sq| sq == target),
            kind => self.ray_reaches(from, target, kind.directions(), kind.is_slider()),
        }
    }

    /// Legal destinations for the piece on `square`.
    ///
    /// Pseudo-moves plus castling (kings) and en passant (pawns) candidates,
    /// with every destination that would leave the mover's king in check
    /// removed. Empty when `square` is empty.
    #[must_use]
    pub fn legal_moves(&self, square: Square, last_move: Option<LastMove>) -> Vec<Square> {
        let Some(piece) = self.piece_at(square) else {
            return Vec::new();
        };

        let mut moves = self.filter_legal_moves(square, self.pseudo_moves(piece, square));
        match piece.kind {
            // castling candidates already exclude attacked transit squares
            PieceKind::King => moves.extend(self.castling_candidates(square)),
            PieceKind::Pawn => moves.extend(
                self.en_passant_candidates(square, last_move)
                    .into_iter()
                    .filter(|&to| !self.en_passant_exposes_king(square, to)),
            ),
            _ => {}
        }
        moves
    }

    /// Every legal move for `color`, one entry per promotion choice.
    #[must_use]
    pub fn all_legal_moves(&self, color: Color, last_move: Option<LastMove>) -> Vec<Move> {
        let mut moves = Vec::new();
        for (from, _) in self.pieces().filter(|(_, p)| p.color == color) {
            for to in self.legal_moves(from, last_move) {
                if self.is_promotion_move(from, to) {
                    moves.extend(
                        PROMOTION_KINDS
                            .iter()
                            .map(|&kind| Move::with_promotion(from, to, kind)),
                    );
                } else {
                    moves.push(Move::new(from, to));
                }
            }
        }
        moves
    }

    /// Whether `color` has at least one legal move
    #[must_use]
    pub fn has_any_legal_move(&self, color: Color, last_move: Option<LastMove>) -> bool {
        self.pieces()
            .filter(|(_, p)| p.color == color)
            .any(|(from, _)| !self.legal_moves(from, last_move).is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardBuilder;

    fn sorted(mut squares: Vec<Square>) -> Vec<Square> {
        squares.sort();
        squares
    }

    #[test]
    fn test_starting_position_has_twenty_moves() {
        let board = Board::new();
        assert_eq!(board.all_legal_moves(Color::White, None).len(), 20);
        assert_eq!(board.all_legal_moves(Color::Black, None).len(), 20);
    }

    #[test]
    fn test_pawn_single_and_double_push() {
        let board = Board::new();
        assert_eq!(
            sorted(board.legal_moves(Square(6, 4), None)),
            vec![Square(4, 4), Square(5, 4)]
        );
    }

    #[test]
    fn test_moved_pawn_has_no_double_push() {
        let board = BoardBuilder::new()
            .moved_piece(Square(6, 4), Color::White, PieceKind::Pawn)
            .build();
        assert_eq!(board.legal_moves(Square(6, 4), None), vec![Square(5, 4)]);
    }

    #[test]
    fn test_pawn_blocked_double_push() {
        let board = BoardBuilder::new()
            .piece(Square(6, 4), Color::White, PieceKind::Pawn)
            .piece(Square(5, 4), Color::Black, PieceKind::Knight)
            .build();
        assert!(board.legal_moves(Square(6, 4), None).is_empty());
    }

    #[test]
    fn test_pawn_diagonal_only_captures() {
        let board = BoardBuilder::new()
            .moved_piece(Square(4, 4), Color::White, PieceKind::Pawn)
            .piece(Square(3, 3), Color::Black, PieceKind::Knight)
            .piece(Square(3, 5), Color::White, PieceKind::Knight)
            .build();
        assert_eq!(
            sorted(board.legal_moves(Square(4, 4), None)),
            vec![Square(3, 3), Square(3, 4)]
        );
    }

    #[test]
    fn test_black_pawn_moves_down_the_board() {
        let board = Board::new();
        assert_eq!(
            sorted(board.legal_moves(Square(1, 3), None)),
            vec![Square(2, 3), Square(3, 3)]
        );
    }

    #[test]
    fn test_knight_in_corner() {
        let board = BoardBuilder::new()
            .piece(Square(0, 0), Color::White, PieceKind::Knight)
            .build();
        assert_eq!(
            sorted(board.legal_moves(Square(0, 0), None)),
            vec![Square(1, 2), Square(2, 1)]
        );
    }

    #[test]
    fn test_rook_stops_at_pieces() {
        let board = BoardBuilder::new()
            .piece(Square(4, 0), Color::White, PieceKind::Rook)
            .piece(Square(4, 3), Color::Black, PieceKind::Pawn)
            .piece(Square(2, 0), Color::White, PieceKind::Pawn)
            .build();
        assert_eq!(
            sorted(board.legal_moves(Square(4, 0), None)),
            vec![
                Square(3, 0),
                Square(4, 1),
                Square(4, 2),
                Square(4, 3),
                Square(5, 0),
                Square(6, 0),
                Square(7, 0),
            ]
        );
    }

    #[test]
    fn test_queen_in_center_reaches_27_squares() {
        let board = BoardBuilder::new()
            .piece(Square(3, 3), Color::White, PieceKind::Queen)
            .build();
        assert_eq!(board.legal_moves(Square(3, 3), None).len(), 27);
    }

    #[test]
    fn test_pseudo_moves_stay_on_board() {
        for sq in Square::all() {
            for kind in PieceKind::ALL {
                for color in Color::BOTH {
                    let piece = Piece::new(kind, color);
                    let board = Board::empty().with_piece(sq, piece);
                    for to in board.pseudo_moves(piece, sq) {
                        assert!(to.rank() < 8 && to.file() < 8);
                        assert_ne!(to, sq);
                    }
                }
            }
        }
    }

    #[test]
    fn test_pawn_attacks_ignore_occupancy() {
        let pawn = Piece::new(PieceKind::Pawn, Color::White);
        let board = Board::empty().with_piece(Square(6, 0), pawn);
        assert_eq!(board.attacked_squares(pawn, Square(6, 0)), vec![Square(5, 1)]);
        assert!(board.pseudo_moves(pawn, Square(6, 0)).contains(&Square(5, 0)));
    }

    #[test]
    fn test_pinned_piece_cannot_leave_the_line() {
        let board = BoardBuilder::new()
            .piece(Square(7, 4), Color::White, PieceKind::King)
            .piece(Square(5, 4), Color::White, PieceKind::Bishop)
            .piece(Square(0, 4), Color::Black, PieceKind::Rook)
            .build();
        assert!(board.legal_moves(Square(5, 4), None).is_empty());
    }

    #[test]
    fn test_empty_square_has_no_moves() {
        assert!(Board::new().legal_moves(Square(4, 4), None).is_empty());
    }
}

//! A board together with the state that travels with it between plies.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{Board, Color, LastMove, Move, MoveShape, PieceKind};

/// A board plus side to move, en passant history and move counters.
///
/// This is what a FEN string describes. [`Game`](crate::game::Game) layers
/// promotion deferral, history and observers on top of the same state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    pub board: Board,
    pub turn: Color,
    pub last_move: Option<LastMove>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

impl Default for Position {
    fn default() -> Self {
        Self::starting()
    }
}

impl Position {
    #[must_use]
    pub fn starting() -> Self {
        Position {
            board: Board::new(),
            turn: Color::White,
            last_move: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Every legal move for the side to move
    #[must_use]
    pub fn legal_moves(&self) -> Vec<Move> {
        self.board.all_legal_moves(self.turn, self.last_move)
    }

    /// Play a legal move, returning the position after it.
    ///
    /// `None` when the piece on `mv.from` does not belong to the side to move,
    /// the destination is not legal, or a promotion move has no piece chosen.
    #[must_use]
    pub fn play(&self, mv: Move) -> Option<Position> {
        let piece = self.board.piece_at(mv.from)?;
        if piece.color != self.turn {
            return None;
        }
        if !self.board.legal_moves(mv.from, self.last_move).contains(&mv.to) {
            return None;
        }
        Some(self.play_unchecked(mv)?.0)
    }

    /// Play a move already known to be legal and report its shape.
    ///
    /// The result is in the form FEN import would produce: moved flags are
    /// settled and `last_move` is kept only for a pawn double step.
    pub(crate) fn play_unchecked(&self, mv: Move) -> Option<(Position, MoveShape)> {
        let piece = self.board.piece_at(mv.from)?;
        let (next, shape) = self.board.execute(mv, self.last_move)?;
        let resets_clock = piece.kind == PieceKind::Pawn || self.board.is_capture(mv.to, shape);
        let next = next.with_settled_flags().with_check_flags();
        let last_move = Some(LastMove::new(mv.from, mv.to))
            .filter(|&last| next.en_passant_target(Some(last)).is_some());
        let position = Position {
            board: next,
            turn: self.turn.opponent(),
            last_move,
            halfmove_clock: if resets_clock {
                0
            } else {
                self.halfmove_clock.saturating_add(1)
            },
            fullmove_number: self
                .fullmove_number
                .saturating_add(u32::from(self.turn == Color::Black)),
        };
        Some((position, shape))
    }

    /// Count leaf nodes of the legal move tree to `depth` plies.
    #[must_use]
    pub fn perft(&self, depth: usize) -> u64 {
        if depth == 0 {
            return 1;
        }

        let moves = self.legal_moves();
        if depth == 1 {
            return moves.len() as u64;
        }

        let mut nodes = 0;
        for mv in moves {
            if let Some((next, _)) = self.play_unchecked(mv) {
                nodes += next.perft(depth - 1);
            }
        }
        nodes
    }
}

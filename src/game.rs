//! The one-ply game state machine.
//!
//! [`Game`] owns the live board, whose turn it is, the last move (for en
//! passant), a pending promotion and the [`BoardHistory`]. Every request either
//! commits a complete ply or leaves all of that state untouched.

use std::fmt;

use crate::board::{
    Board, CheckStatus, Color, FenError, LastMove, Move, MoveCategory, MoveHistoryEntry,
    MoveParseError, MoveRejection, PendingPromotion, PieceKind, Position, Square,
};
use crate::history::BoardHistory;

/// Notified after every committed move.
///
/// Observers see the move once the game state has been updated and have no
/// way to change it. Closures taking `&MoveHistoryEntry` implement this trait.
pub trait MoveObserver {
    fn on_move(&self, entry: &MoveHistoryEntry);
}

impl<F> MoveObserver for F
where
    F: Fn(&MoveHistoryEntry),
{
    fn on_move(&self, entry: &MoveHistoryEntry) {
        self(entry)
    }
}

/// Result of a move request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The ply was committed
    Applied(MoveHistoryEntry),
    /// A pawn reached its last rank; call [`Game::complete_promotion`]
    AwaitingPromotion(PendingPromotion),
    /// Nothing changed
    Rejected(MoveRejection),
}

impl MoveOutcome {
    /// True when the request was accepted, including a deferred promotion
    #[must_use]
    pub fn is_success(&self) -> bool {
        !matches!(self, MoveOutcome::Rejected(_))
    }

    #[must_use]
    pub fn entry(&self) -> Option<&MoveHistoryEntry> {
        match self {
            MoveOutcome::Applied(entry) => Some(entry),
            _ => None,
        }
    }

    #[must_use]
    pub fn rejection(&self) -> Option<&MoveRejection> {
        match self {
            MoveOutcome::Rejected(reason) => Some(reason),
            _ => None,
        }
    }
}

pub struct Game {
    board: Board,
    turn: Color,
    last_move: Option<LastMove>,
    pending_promotion: Option<PendingPromotion>,
    history: BoardHistory,
    observers: Vec<Box<dyn MoveObserver + Send + Sync>>,
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("board", &self.board)
            .field("turn", &self.turn)
            .field("last_move", &self.last_move)
            .field("pending_promotion", &self.pending_promotion)
            .field("history", &self.history)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// A game from the standard starting position
    #[must_use]
    pub fn new() -> Self {
        Self::from_position(&Position::starting())
    }

    /// A game on an arbitrary board with `turn` to move
    #[must_use]
    pub fn with_board(board: Board, turn: Color) -> Self {
        Self::from_position(&Position {
            board: board.with_check_flags(),
            turn,
            ..Position::starting()
        })
    }

    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Ok(Self::from_position(&Position::from_fen(fen)?))
    }

    #[must_use]
    pub fn from_position(position: &Position) -> Self {
        Game {
            board: position.board,
            turn: position.turn,
            last_move: position.last_move,
            pending_promotion: None,
            history: BoardHistory::from_position(position),
            observers: Vec::new(),
        }
    }

    /// Request the move `from`→`to` for the side to move.
    ///
    /// A legal pawn move onto the last rank is deferred: the game records a
    /// [`PendingPromotion`] and waits for [`Game::complete_promotion`].
    pub fn play(&mut self, from: Square, to: Square) -> MoveOutcome {
        if self.pending_promotion.is_some() {
            return self.reject(MoveRejection::PromotionPending);
        }
        let Some(piece) = self.board.piece_at(from) else {
            return self.reject(MoveRejection::NoPiece { square: from });
        };
        if piece.color != self.turn {
            return self.reject(MoveRejection::WrongTurn {
                expected: self.turn,
            });
        }
        if !self.board.legal_moves(from, self.last_move).contains(&to) {
            return self.reject(MoveRejection::IllegalDestination { from, to });
        }

        if self.board.is_promotion_move(from, to) {
            let pending = PendingPromotion { from, to };
            engine_log!(debug, "promotion pending on {}", to);
            self.pending_promotion = Some(pending);
            return MoveOutcome::AwaitingPromotion(pending);
        }

        self.commit(Move::new(from, to))
    }

    /// Boolean form of [`Game::play`]
    pub fn handle_move(&mut self, from: Square, to: Square) -> bool {
        self.play(from, to).is_success()
    }

    /// Finish a deferred promotion with the chosen piece
    pub fn complete_promotion(&mut self, kind: PieceKind) -> MoveOutcome {
        let Some(pending) = self.pending_promotion else {
            return self.reject(MoveRejection::NoPendingPromotion);
        };
        if !kind.is_promotable() {
            return self.reject(MoveRejection::InvalidPromotionPiece);
        }
        let pawn_present = self
            .board
            .piece_at(pending.from)
            .is_some_and(|p| p.is(PieceKind::Pawn, self.turn));
        if !pawn_present {
            return self.reject(MoveRejection::PromotionPawnMissing {
                square: pending.from,
            });
        }

        self.commit(Move::with_promotion(pending.from, pending.to, kind))
    }

    /// Drop a pending promotion; the board never changed
    pub fn cancel_promotion(&mut self) -> Option<PendingPromotion> {
        self.pending_promotion.take()
    }

    /// Play a move in coordinate notation (`e2e4`, `e7e8q`).
    ///
    /// A promotion suffix completes the promotion in the same call; without
    /// one a promotion move stays pending.
    pub fn play_coordinate(&mut self, text: &str) -> Result<MoveOutcome, MoveParseError> {
        let mv: Move = text.parse()?;
        let outcome = self.play(mv.from, mv.to);
        Ok(match (outcome, mv.promotion) {
            (MoveOutcome::AwaitingPromotion(_), Some(kind)) => self.complete_promotion(kind),
            (outcome, _) => outcome,
        })
    }

    /// Replace the game with the position `fen` describes.
    ///
    /// The whole string is validated first; on error the game is unchanged.
    /// On success the history restarts at the loaded position.
    pub fn load_fen(&mut self, fen: &str) -> Result<(), FenError> {
        let position = Position::from_fen(fen)?;
        self.board = position.board;
        self.turn = position.turn;
        self.last_move = position.last_move;
        self.pending_promotion = None;
        self.history = BoardHistory::from_position(&position);
        engine_log!(debug, "loaded position {}", fen);
        Ok(())
    }

    fn reject(&self, reason: MoveRejection) -> MoveOutcome {
        engine_log!(debug, "move rejected: {}", reason);
        MoveOutcome::Rejected(reason)
    }

    /// Execute an already validated move and commit every piece of state.
    fn commit(&mut self, mv: Move) -> MoveOutcome {
        let Some(piece) = self.board.piece_at(mv.from) else {
            return self.reject(MoveRejection::NoPiece { square: mv.from });
        };
        let Some((next, shape)) = self.board.execute(mv, self.last_move) else {
            return self.reject(MoveRejection::IllegalDestination {
                from: mv.from,
                to: mv.to,
            });
        };

        let mover = self.turn;
        let opponent = mover.opponent();
        let last_move = LastMove::new(mv.from, mv.to);
        let next = next.with_settled_flags().with_check_flags();

        let status = if next.is_checkmate(opponent, Some(last_move)) {
            CheckStatus::Checkmate
        } else if next.is_king_in_check(opponent) {
            CheckStatus::Check
        } else {
            CheckStatus::None
        };
        let capture = self.board.is_capture(mv.to, shape);
        let entry = MoveHistoryEntry {
            notation: self
                .board
                .notation_for(mv.from, mv.to, shape, self.last_move, status),
            category: MoveCategory::classify(shape, capture, status),
        };

        self.history.record(
            next,
            mover,
            entry.clone(),
            piece.kind == PieceKind::Pawn || capture,
        );
        self.board = next;
        self.last_move = Some(last_move);
        self.turn = opponent;
        self.pending_promotion = None;

        engine_log!(debug, "{} played {} ({})", mover, entry.notation, entry.category);
        if status == CheckStatus::Checkmate {
            engine_log!(info, "checkmate, {} wins", mover);
        }

        for observer in &self.observers {
            observer.on_move(&entry);
        }
        MoveOutcome::Applied(entry)
    }

    pub fn add_observer<O>(&mut self, observer: O)
    where
        O: MoveObserver + Send + Sync + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    // --- accessors ---

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn current_turn(&self) -> Color {
        self.turn
    }

    #[must_use]
    pub fn last_move(&self) -> Option<LastMove> {
        self.last_move
    }

    #[must_use]
    pub fn pending_promotion(&self) -> Option<PendingPromotion> {
        self.pending_promotion
    }

    #[must_use]
    pub fn history(&self) -> &BoardHistory {
        &self.history
    }

    /// Navigation moves the history cursor only; the live board is unaffected.
    pub fn history_mut(&mut self) -> &mut BoardHistory {
        &mut self.history
    }

    /// The live state as a [`Position`]
    #[must_use]
    pub fn position(&self) -> Position {
        self.history.position(self.last_move)
    }

    #[must_use]
    pub fn fen(&self) -> String {
        self.history.to_fen(self.last_move)
    }

    #[must_use]
    pub fn is_in_check(&self, color: Color) -> bool {
        self.board.is_king_in_check(color)
    }

    /// Whether the side to move is checkmated
    #[must_use]
    pub fn is_checkmate(&self) -> bool {
        self.board.is_checkmate(self.turn, self.last_move)
    }

    /// Whether the side to move is stalemated. Reported only; play is not stopped.
    #[must_use]
    pub fn is_stalemate(&self) -> bool {
        self.board.is_stalemate(self.turn, self.last_move)
    }

    /// Legal destinations for the piece on `square`, whichever side owns it
    #[must_use]
    pub fn legal_moves(&self, square: Square) -> Vec<Square> {
        self.board.legal_moves(square, self.last_move)
    }

    /// Every legal move for the side to move
    #[must_use]
    pub fn all_legal_moves(&self) -> Vec<Move> {
        self.board.all_legal_moves(self.turn, self.last_move)
    }
}

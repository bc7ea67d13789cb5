//! Seams for optional remote collaborators: a move validator and an analysis
//! engine.
//!
//! The local [`Game`] stays authoritative. Remote answers are compared against
//! the local FEN and never written into local state; a failing or absent
//! service leaves the game exactly as it was.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::{Color, Move, PieceKind, Square};
use crate::game::{Game, MoveOutcome};

/// Move submitted to a remote validator.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ValidationRequest {
    pub from: Square,
    pub to: Square,
    pub promotion_piece: Option<PieceKind>,
    /// Ask the remote side to answer with its own move
    pub request_engine_reply: bool,
}

/// A remote validator's verdict and its view of the resulting position.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ValidationResponse {
    pub valid: bool,
    pub promotion_pending: bool,
    pub board_fen: Option<String>,
    pub turn: Option<Color>,
    /// Reply in coordinate notation, when one was requested
    pub engine_move: Option<String>,
}

/// Failure talking to a remote collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    /// The service could not be reached
    Unavailable { reason: String },
    /// The service answered with something unusable
    InvalidResponse { reason: String },
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteError::Unavailable { reason } => write!(f, "Remote service unavailable: {reason}"),
            RemoteError::InvalidResponse { reason } => {
                write!(f, "Invalid response from remote service: {reason}")
            }
        }
    }
}

impl std::error::Error for RemoteError {}

pub trait MoveValidator {
    fn validate(&self, request: &ValidationRequest) -> Result<ValidationResponse, RemoteError>;
}

pub trait AnalysisService {
    /// Best move for `fen` searched to `depth`, in coordinate notation
    fn best_move(&self, fen: &str, depth: u32) -> Result<String, RemoteError>;
}

/// How a remote view of the game compares with the local one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reconciliation {
    /// Same placement and side to move
    Agrees,
    /// The positions differ; the local one stands
    Diverged { local: String, remote: String },
    /// The remote side refused a move the local rules accepted
    RemoteRejected,
    /// No usable remote position
    Unavailable,
}

/// What [`Game::play_validated`] did with a move and the validator's answer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedMove {
    /// The local result; only `Applied` moves reach the validator
    pub outcome: MoveOutcome,
    pub verdict: Reconciliation,
    /// The engine reply, when one was requested, agreed on and legal here
    pub reply: Option<MoveOutcome>,
}

/// Placement and active color, the fields every FEN producer agrees on
fn comparable_fields(fen: &str) -> Option<(&str, &str)> {
    let mut fields = fen.split_whitespace();
    Some((fields.next()?, fields.next()?))
}

impl Game {
    /// Compare a validator's response with the local position.
    ///
    /// Placement and side to move are compared; castling, en passant and
    /// counters are not, since producers differ on when they emit them.
    #[must_use]
    pub fn reconcile(&self, response: &ValidationResponse) -> Reconciliation {
        if !response.valid {
            return Reconciliation::RemoteRejected;
        }
        let Some(remote) = response.board_fen.as_deref() else {
            return Reconciliation::Unavailable;
        };
        let local = self.fen();
        let (Some(local_fields), Some(remote_fields)) =
            (comparable_fields(&local), comparable_fields(remote))
        else {
            return Reconciliation::Unavailable;
        };

        let turn_matches = response.turn.map_or(true, |turn| turn == self.current_turn());
        if local_fields == remote_fields && turn_matches {
            Reconciliation::Agrees
        } else {
            engine_log!(warn, "remote position {} differs from local {}", remote, local);
            Reconciliation::Diverged {
                local,
                remote: remote.to_string(),
            }
        }
    }

    /// Play locally, then ask `validator` for a second opinion.
    ///
    /// `promotion` completes a promotion in the same call. The remote verdict
    /// is only reported: a rejection, divergence or outage never undoes the
    /// local move. The validator is not contacted for moves the local rules
    /// refuse or leave pending.
    ///
    /// With `request_engine_reply`, a reply the validator sends back is played
    /// when its view of the position agrees with ours and the move is legal
    /// here; anything else is dropped and the game stays after our move.
    pub fn play_validated(
        &mut self,
        validator: &dyn MoveValidator,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
        request_engine_reply: bool,
    ) -> ValidatedMove {
        let mut outcome = self.play(from, to);
        if let (MoveOutcome::AwaitingPromotion(_), Some(kind)) = (&outcome, promotion) {
            outcome = self.complete_promotion(kind);
        }
        if !matches!(outcome, MoveOutcome::Applied(_)) {
            return ValidatedMove {
                outcome,
                verdict: Reconciliation::Unavailable,
                reply: None,
            };
        }

        let request = ValidationRequest {
            from,
            to,
            promotion_piece: promotion,
            request_engine_reply,
        };
        let response = match validator.validate(&request) {
            Ok(response) => response,
            Err(err) => {
                engine_log!(warn, "move validator failed: {}", err);
                return ValidatedMove {
                    outcome,
                    verdict: Reconciliation::Unavailable,
                    reply: None,
                };
            }
        };

        let verdict = self.reconcile(&response);
        let reply = match response.engine_move.as_deref() {
            Some(text) if request_engine_reply && verdict == Reconciliation::Agrees => {
                self.play_remote_move(text)
            }
            _ => None,
        };
        ValidatedMove {
            outcome,
            verdict,
            reply,
        }
    }

    /// Ask `service` for a move and play it if it is legal here.
    ///
    /// Promotion suggestions without a piece promote to a queen. Returns
    /// `None`, with the game untouched, when the service fails, the answer
    /// does not parse, or the move is not legal for the side to move.
    pub fn play_suggestion(
        &mut self,
        service: &dyn AnalysisService,
        depth: u32,
    ) -> Option<MoveOutcome> {
        if self.pending_promotion().is_some() {
            return None;
        }
        match service.best_move(&self.fen(), depth) {
            Ok(text) => self.play_remote_move(&text),
            Err(err) => {
                engine_log!(warn, "analysis service failed: {}", err);
                None
            }
        }
    }

    /// Play a coordinate move that came from outside, only if it is legal for
    /// the side to move. A missing promotion piece means a queen.
    fn play_remote_move(&mut self, text: &str) -> Option<MoveOutcome> {
        if self.pending_promotion().is_some() {
            return None;
        }
        let mv: Move = match text.trim().parse() {
            Ok(mv) => mv,
            Err(err) => {
                engine_log!(warn, "unreadable remote move {:?}: {}", text, err);
                return None;
            }
        };

        let owned = self
            .board()
            .piece_at(mv.from)
            .is_some_and(|p| p.color == self.current_turn());
        if !owned || !self.legal_moves(mv.from).contains(&mv.to) {
            engine_log!(warn, "ignoring illegal remote move {}", mv);
            return None;
        }

        let outcome = match self.play(mv.from, mv.to) {
            MoveOutcome::AwaitingPromotion(_) => {
                self.complete_promotion(mv.promotion.unwrap_or(PieceKind::Queen))
            }
            outcome => outcome,
        };
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    /// Validator that mirrors a fixed answer and records requests
    struct ScriptedValidator {
        answer: Result<ValidationResponse, RemoteError>,
        requests: Mutex<Vec<ValidationRequest>>,
    }

    impl ScriptedValidator {
        fn new(answer: Result<ValidationResponse, RemoteError>) -> Self {
            ScriptedValidator {
                answer,
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    impl MoveValidator for ScriptedValidator {
        fn validate(&self, request: &ValidationRequest) -> Result<ValidationResponse, RemoteError> {
            self.requests.lock().push(request.clone());
            self.answer.clone()
        }
    }

    struct FixedAnalysis(Result<String, RemoteError>);

    impl AnalysisService for FixedAnalysis {
        fn best_move(&self, _fen: &str, _depth: u32) -> Result<String, RemoteError> {
            self.0.clone()
        }
    }

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    fn response_for(fen: &str, turn: Color) -> ValidationResponse {
        ValidationResponse {
            valid: true,
            board_fen: Some(fen.to_string()),
            turn: Some(turn),
            ..ValidationResponse::default()
        }
    }

    #[test]
    fn test_reconcile_agrees_ignoring_counters() {
        let mut game = Game::new();
        assert!(game.handle_move(sq("e2"), sq("e4")));
        let remote = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1";
        assert_eq!(
            game.reconcile(&response_for(remote, Color::Black)),
            Reconciliation::Agrees
        );
    }

    #[test]
    fn test_reconcile_reports_divergence() {
        let game = Game::new();
        let remote = "rnbqkbnr/pppppppp/8/8/3P4/8/PPP1PPPP/RNBQKBNR b KQkq - 0 1";
        let before = game.fen();
        match game.reconcile(&response_for(remote, Color::Black)) {
            Reconciliation::Diverged { local, remote: theirs } => {
                assert_eq!(local, before);
                assert_eq!(theirs, remote);
            }
            other => panic!("expected divergence, got {other:?}"),
        }
        assert_eq!(game.fen(), before);
    }

    #[test]
    fn test_reconcile_invalid_and_missing() {
        let game = Game::new();
        assert_eq!(
            game.reconcile(&ValidationResponse::default()),
            Reconciliation::RemoteRejected
        );
        let no_fen = ValidationResponse {
            valid: true,
            ..ValidationResponse::default()
        };
        assert_eq!(game.reconcile(&no_fen), Reconciliation::Unavailable);
    }

    const AFTER_E4: &str = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";

    fn agreeing_reply(engine_move: &str) -> ValidationResponse {
        ValidationResponse {
            engine_move: Some(engine_move.to_string()),
            ..response_for(AFTER_E4, Color::Black)
        }
    }

    #[test]
    fn test_play_validated_keeps_local_move_on_outage() {
        let validator = ScriptedValidator::new(Err(RemoteError::Unavailable {
            reason: "connection refused".to_string(),
        }));
        let mut game = Game::new();
        let result = game.play_validated(&validator, sq("e2"), sq("e4"), None, true);
        assert!(matches!(result.outcome, MoveOutcome::Applied(_)));
        assert_eq!(result.verdict, Reconciliation::Unavailable);
        assert_eq!(result.reply, None);
        assert_eq!(game.current_turn(), Color::Black);
        assert_eq!(validator.requests.lock().len(), 1);
    }

    #[test]
    fn test_play_validated_skips_rejected_moves() {
        let validator = ScriptedValidator::new(Ok(ValidationResponse::default()));
        let mut game = Game::new();
        let result = game.play_validated(&validator, sq("e2"), sq("e5"), None, false);
        assert!(!result.outcome.is_success());
        assert!(validator.requests.lock().is_empty());
    }

    #[test]
    fn test_play_validated_sends_promotion_piece() {
        let validator = ScriptedValidator::new(Ok(ValidationResponse {
            valid: true,
            board_fen: Some("N3k3/8/8/8/8/8/8/4K3 b - - 0 1".to_string()),
            turn: Some(Color::Black),
            ..ValidationResponse::default()
        }));
        let mut game = Game::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let result =
            game.play_validated(&validator, sq("a7"), sq("a8"), Some(PieceKind::Knight), false);
        assert_eq!(
            result.outcome.entry().map(|e| e.notation.as_str()),
            Some("a8=N")
        );
        assert_eq!(result.verdict, Reconciliation::Agrees);
        let requests = validator.requests.lock();
        assert_eq!(requests[0].promotion_piece, Some(PieceKind::Knight));
        assert!(!requests[0].request_engine_reply);
    }

    #[test]
    fn test_play_validated_applies_legal_engine_reply() {
        let validator = ScriptedValidator::new(Ok(agreeing_reply("e7e5")));
        let mut game = Game::new();
        let result = game.play_validated(&validator, sq("e2"), sq("e4"), None, true);

        assert!(validator.requests.lock()[0].request_engine_reply);
        assert_eq!(result.verdict, Reconciliation::Agrees);
        let reply = result.reply.and_then(|o| o.entry().cloned()).unwrap();
        assert_eq!(reply.notation, "e5");
        assert_eq!(game.current_turn(), Color::White);
        assert_eq!(game.history().move_log(), vec!["1. e4 e5"]);
    }

    #[test]
    fn test_play_validated_drops_bad_engine_replies() {
        for bad in ["zz99", "e2e4", "e7e4", ""] {
            let validator = ScriptedValidator::new(Ok(agreeing_reply(bad)));
            let mut game = Game::new();
            let result = game.play_validated(&validator, sq("e2"), sq("e4"), None, true);
            assert!(matches!(result.outcome, MoveOutcome::Applied(_)));
            assert_eq!(result.reply, None, "reply {bad:?} was played");
            assert_eq!(game.fen(), AFTER_E4);
        }

        // a reply is only played when it was asked for
        let validator = ScriptedValidator::new(Ok(agreeing_reply("e7e5")));
        let mut game = Game::new();
        let result = game.play_validated(&validator, sq("e2"), sq("e4"), None, false);
        assert_eq!(result.reply, None);
        assert_eq!(game.fen(), AFTER_E4);
    }

    #[test]
    fn test_play_validated_ignores_reply_for_diverged_position() {
        let diverged = ValidationResponse {
            engine_move: Some("e7e5".to_string()),
            ..response_for(
                "rnbqkbnr/pppppppp/8/8/3P4/8/PPP1PPPP/RNBQKBNR b KQkq d3 0 1",
                Color::Black,
            )
        };
        let validator = ScriptedValidator::new(Ok(diverged));
        let mut game = Game::new();
        let result = game.play_validated(&validator, sq("e2"), sq("e4"), None, true);
        assert!(matches!(result.verdict, Reconciliation::Diverged { .. }));
        assert_eq!(result.reply, None);
        assert_eq!(game.fen(), AFTER_E4);
    }

    #[test]
    fn test_play_suggestion() {
        let mut game = Game::new();
        let outcome = game.play_suggestion(&FixedAnalysis(Ok("g1f3\n".to_string())), 12);
        assert_eq!(outcome.and_then(|o| o.entry().cloned()).unwrap().notation, "Nf3");

        let before = game.fen();
        assert!(game
            .play_suggestion(&FixedAnalysis(Ok("g1f3".to_string())), 12)
            .is_none());
        assert!(game
            .play_suggestion(&FixedAnalysis(Ok("bogus".to_string())), 12)
            .is_none());
        let down = FixedAnalysis(Err(RemoteError::Unavailable {
            reason: "timeout".to_string(),
        }));
        assert!(game.play_suggestion(&down, 12).is_none());
        assert_eq!(game.fen(), before);
    }

    #[test]
    fn test_remote_error_display() {
        let err = RemoteError::InvalidResponse {
            reason: "empty body".to_string(),
        };
        assert!(err.to_string().contains("empty body"));
    }
}

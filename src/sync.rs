//! Thread-safe handle to a single game.
//!
//! Lets several threads (a UI, a network task, a remote validator) read and
//! drive one [`Game`] without each of them owning it.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::board::{Color, Square};
use crate::game::{Game, MoveOutcome};

/// A cloneable handle to a shared [`Game`].
///
/// This wraps `Arc<RwLock<Game>>`. Each move request holds the write lock for
/// the whole ply, so readers never observe a half-applied move.
#[derive(Clone, Debug, Default)]
pub struct SharedGame(Arc<RwLock<Game>>);

impl SharedGame {
    #[must_use]
    pub fn new(game: Game) -> Self {
        SharedGame(Arc::new(RwLock::new(game)))
    }

    /// Run `f` with shared access to the game.
    pub fn read<R>(&self, f: impl FnOnce(&Game) -> R) -> R {
        f(&self.0.read())
    }

    /// Run `f` with exclusive access to the game.
    pub fn write<R>(&self, f: impl FnOnce(&mut Game) -> R) -> R {
        f(&mut self.0.write())
    }

    pub fn play(&self, from: Square, to: Square) -> MoveOutcome {
        self.write(|game| game.play(from, to))
    }

    #[must_use]
    pub fn fen(&self) -> String {
        self.read(Game::fen)
    }

    #[inline]
    #[must_use]
    pub fn current_turn(&self) -> Color {
        self.read(Game::current_turn)
    }
}

impl From<Game> for SharedGame {
    fn from(game: Game) -> Self {
        SharedGame::new(game)
    }
}

impl From<Arc<RwLock<Game>>> for SharedGame {
    fn from(inner: Arc<RwLock<Game>>) -> Self {
        SharedGame(inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    #[test]
    fn test_clones_share_state() {
        let shared = SharedGame::default();
        let other = shared.clone();
        assert!(shared.play(sq("e2"), sq("e4")).is_success());
        assert_eq!(other.current_turn(), Color::Black);
        assert_eq!(other.fen(), shared.fen());
    }

    #[test]
    fn test_concurrent_requests_apply_once() {
        let shared = SharedGame::new(Game::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let game = shared.clone();
                thread::spawn(move || game.play(sq("e2"), sq("e4")).is_success())
            })
            .collect();

        let applied = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|&ok| ok)
            .count();
        assert_eq!(applied, 1);
        assert_eq!(shared.read(|g| g.history().ply_count()), 1);
    }

    #[test]
    fn test_readers_see_whole_plies() {
        let shared = SharedGame::new(Game::new());
        let writer = {
            let game = shared.clone();
            thread::spawn(move || {
                for text in ["e2e4", "e7e5", "g1f3", "b8c6"] {
                    game.write(|g| g.play_coordinate(text).unwrap());
                }
            })
        };
        for _ in 0..100 {
            shared.read(|g| {
                assert_eq!(g.history().snapshots().len(), g.history().ply_count() + 1);
                assert_eq!(g.history().latest(), g.board());
            });
        }
        writer.join().unwrap();
        assert_eq!(shared.read(|g| g.history().ply_count()), 4);
    }
}

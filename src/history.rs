//! Append-only record of a game: board snapshots, move notation, FEN export and
//! a navigation cursor.
//!
//! Snapshot 0 is the position the game started from; snapshot `n` is the board
//! after the `n`th recorded ply. The cursor only affects what
//! [`BoardHistory::current_board`] returns: the live game always plays on the
//! latest snapshot.

use crate::board::{Board, Color, LastMove, MoveHistoryEntry, Position};

#[derive(Clone, Debug)]
pub struct BoardHistory {
    snapshots: Vec<Board>,
    /// Halfmove clock after the latest snapshot
    halfmove_clock: u32,
    entries: Vec<MoveHistoryEntry>,
    white_moves: Vec<String>,
    black_moves: Vec<String>,
    cursor: usize,
    first_mover: Color,
    starting_fullmove: u32,
}

impl Default for BoardHistory {
    fn default() -> Self {
        Self::from_position(&Position::starting())
    }
}

impl BoardHistory {
    /// History starting at `board` with White to move.
    #[must_use]
    pub fn new(board: Board) -> Self {
        Self::from_position(&Position {
            board,
            ..Position::starting()
        })
    }

    /// History starting at a loaded position, keeping its side to move and
    /// move counters.
    #[must_use]
    pub fn from_position(position: &Position) -> Self {
        BoardHistory {
            snapshots: vec![position.board],
            halfmove_clock: position.halfmove_clock,
            entries: Vec::new(),
            white_moves: Vec::new(),
            black_moves: Vec::new(),
            cursor: 0,
            first_mover: position.turn,
            starting_fullmove: position.fullmove_number,
        }
    }

    /// Append the board produced by `mover`'s move.
    ///
    /// `resets_clock` is true for pawn moves and captures. The cursor snaps to
    /// the new snapshot.
    pub fn record(
        &mut self,
        board: Board,
        mover: Color,
        entry: MoveHistoryEntry,
        resets_clock: bool,
    ) {
        self.halfmove_clock = if resets_clock {
            0
        } else {
            self.halfmove_clock.saturating_add(1)
        };
        match mover {
            Color::White => self.white_moves.push(entry.notation.clone()),
            Color::Black => self.black_moves.push(entry.notation.clone()),
        }
        self.snapshots.push(board);
        self.entries.push(entry);
        self.cursor = self.snapshots.len() - 1;
    }

    /// The newest snapshot, regardless of the cursor
    #[must_use]
    pub fn latest(&self) -> &Board {
        // never empty: construction pushes the starting snapshot
        &self.snapshots[self.snapshots.len() - 1]
    }

    #[must_use]
    pub fn snapshots(&self) -> &[Board] {
        &self.snapshots
    }

    #[must_use]
    pub fn snapshot(&self, index: usize) -> Option<&Board> {
        self.snapshots.get(index)
    }

    /// Number of recorded plies
    #[must_use]
    pub fn ply_count(&self) -> usize {
        self.entries.len()
    }

    /// Side to move on the latest snapshot
    #[must_use]
    pub fn side_to_move(&self) -> Color {
        if self.entries.len() % 2 == 0 {
            self.first_mover
        } else {
            self.first_mover.opponent()
        }
    }

    /// Starts at the loaded value and grows after every Black move
    #[must_use]
    pub fn fullmove_number(&self) -> u32 {
        let black_moves = u32::try_from(self.black_moves.len()).unwrap_or(u32::MAX);
        self.starting_fullmove.saturating_add(black_moves)
    }

    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// The latest snapshot as a [`Position`]; `last_move` is kept only when
    /// it was a pawn double step
    #[must_use]
    pub fn position(&self, last_move: Option<LastMove>) -> Position {
        let board = *self.latest();
        Position {
            board,
            turn: self.side_to_move(),
            last_move: last_move.filter(|&last| board.en_passant_target(Some(last)).is_some()),
            halfmove_clock: self.halfmove_clock(),
            fullmove_number: self.fullmove_number(),
        }
    }

    /// FEN of the latest snapshot
    #[must_use]
    pub fn to_fen(&self, last_move: Option<LastMove>) -> String {
        self.position(last_move).to_fen()
    }

    #[must_use]
    pub fn white_moves(&self) -> &[String] {
        &self.white_moves
    }

    #[must_use]
    pub fn black_moves(&self) -> &[String] {
        &self.black_moves
    }

    /// Every recorded move with its category, in order
    #[must_use]
    pub fn move_history(&self) -> &[MoveHistoryEntry] {
        &self.entries
    }

    /// Moves paired as `"<fullmove>. <white> <black>"`.
    ///
    /// When Black moved first the opening White slot reads `...`; a trailing
    /// White move without a reply stands alone.
    #[must_use]
    pub fn move_log(&self) -> Vec<String> {
        let mut whites: Vec<&str> = Vec::with_capacity(self.white_moves.len() + 1);
        if self.first_mover == Color::Black && !self.black_moves.is_empty() {
            whites.push("...");
        }
        whites.extend(self.white_moves.iter().map(String::as_str));

        whites
            .iter()
            .enumerate()
            .map(|(i, white)| {
                let number = self
                    .starting_fullmove
                    .saturating_add(u32::try_from(i).unwrap_or(u32::MAX));
                match self.black_moves.get(i) {
                    Some(black) => format!("{number}. {white} {black}"),
                    None => format!("{number}. {white}"),
                }
            })
            .collect()
    }

    // --- navigation ---

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.cursor
    }

    /// The snapshot under the cursor
    #[must_use]
    pub fn current_board(&self) -> &Board {
        &self.snapshots[self.cursor]
    }

    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.cursor + 1 == self.snapshots.len()
    }

    pub fn go_to_start(&mut self) -> Option<&Board> {
        self.go_to_move(0)
    }

    pub fn go_to_end(&mut self) -> Option<&Board> {
        self.go_to_move(self.snapshots.len() - 1)
    }

    /// Step back one ply; `None` at the starting snapshot
    pub fn go_to_previous_move(&mut self) -> Option<&Board> {
        let target = self.cursor.checked_sub(1)?;
        self.go_to_move(target)
    }

    /// Step forward one ply; `None` at the latest snapshot
    pub fn go_to_next_move(&mut self) -> Option<&Board> {
        self.go_to_move(self.cursor + 1)
    }

    /// Jump to the snapshot after `ply` plies (0 is the starting position).
    /// Out of range leaves the cursor where it was and returns `None`.
    pub fn go_to_move(&mut self, ply: usize) -> Option<&Board> {
        if ply >= self.snapshots.len() {
            return None;
        }
        self.cursor = ply;
        self.snapshots.get(ply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{MoveCategory, Square};

    fn entry(notation: &str) -> MoveHistoryEntry {
        MoveHistoryEntry {
            notation: notation.to_string(),
            category: MoveCategory::Normal,
        }
    }

    fn history_after(moves: &[(&str, Square, Square)]) -> BoardHistory {
        let mut history = BoardHistory::default();
        let mut mover = Color::White;
        for &(san, from, to) in moves {
            let board = history.latest().apply_move(from, to);
            history.record(board, mover, entry(san), false);
            mover = mover.opponent();
        }
        history
    }

    #[test]
    fn test_record_appends_and_splits_by_color() {
        let history = history_after(&[
            ("e4", Square(6, 4), Square(4, 4)),
            ("e5", Square(1, 4), Square(3, 4)),
            ("Nf3", Square(7, 6), Square(5, 5)),
        ]);
        assert_eq!(history.snapshots().len(), 4);
        assert_eq!(history.ply_count(), 3);
        assert_eq!(history.white_moves(), ["e4", "Nf3"]);
        assert_eq!(history.black_moves(), ["e5"]);
        assert_eq!(history.move_log(), vec!["1. e4 e5", "2. Nf3"]);
        assert_eq!(history.side_to_move(), Color::Black);
        assert_eq!(history.fullmove_number(), 2);
    }

    #[test]
    fn test_snapshots_are_independent() {
        let history = history_after(&[("e4", Square(6, 4), Square(4, 4))]);
        assert_eq!(history.snapshot(0), Some(&Board::new()));
        assert!(history.snapshot(1).unwrap().is_empty(Square(6, 4)));
        assert!(history.snapshot(2).is_none());
    }

    #[test]
    fn test_black_first_log() {
        let pos = Position {
            turn: Color::Black,
            fullmove_number: 12,
            ..Position::starting()
        };
        let mut history = BoardHistory::from_position(&pos);
        let board = *history.latest();
        history.record(board, Color::Black, entry("e5"), false);
        history.record(board, Color::White, entry("Nf3"), false);
        history.record(board, Color::Black, entry("Nc6"), false);
        assert_eq!(history.move_log(), vec!["12. ... e5", "13. Nf3 Nc6"]);
        assert_eq!(history.fullmove_number(), 14);
        assert_eq!(history.side_to_move(), Color::White);
    }

    #[test]
    fn test_halfmove_clock() {
        let mut history = BoardHistory::default();
        let board = *history.latest();
        history.record(board, Color::White, entry("Nf3"), false);
        history.record(board, Color::Black, entry("Nf6"), false);
        assert_eq!(history.halfmove_clock(), 2);
        history.record(board, Color::White, entry("e4"), true);
        assert_eq!(history.halfmove_clock(), 0);
    }

    #[test]
    fn test_counters_saturate() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K3 b - - 4294967295 4294967295").unwrap();
        let mut history = BoardHistory::from_position(&pos);
        let board = *history.latest();
        history.record(board, Color::Black, entry("Kd8"), false);
        history.record(board, Color::White, entry("Kd1"), false);
        assert_eq!(history.halfmove_clock(), u32::MAX);
        assert_eq!(history.fullmove_number(), u32::MAX);
        assert_eq!(history.move_log().len(), 2);
    }

    #[test]
    fn test_fen_of_latest_snapshot() {
        let history = history_after(&[("e4", Square(6, 4), Square(4, 4))]);
        let last = Some(LastMove::new(Square(6, 4), Square(4, 4)));
        assert_eq!(
            history.to_fen(last),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 1 1"
        );
    }

    #[test]
    fn test_navigation() {
        let mut history = history_after(&[
            ("e4", Square(6, 4), Square(4, 4)),
            ("e5", Square(1, 4), Square(3, 4)),
        ]);
        assert_eq!(history.current_index(), 2);
        assert!(history.go_to_next_move().is_none());
        assert_eq!(history.current_index(), 2);

        assert!(history.go_to_previous_move().is_some());
        assert_eq!(history.current_index(), 1);
        assert_eq!(history.go_to_start(), Some(&Board::new()));
        assert!(history.go_to_previous_move().is_none());
        assert_eq!(history.current_index(), 0);

        assert!(history.go_to_move(5).is_none());
        assert_eq!(history.current_index(), 0);
        assert!(history.go_to_move(2).is_some());
        assert!(history.is_at_end());

        history.go_to_start();
        let board = *history.latest();
        history.record(board, Color::White, entry("Nf3"), false);
        assert_eq!(history.current_index(), 3);
    }
}

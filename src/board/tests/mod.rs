//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `perft.rs` - Move generation counts against known positions
//! - `edge_cases.rs` - Special positions and edge cases
//! - `special_moves.rs` - Castling, en passant and promotion sequences
//! - `proptest.rs` - Property-based tests over random legal walks

mod perft;

//! FEN import and export.
//!
//! Boards do not store castling rights or an en passant square: both are
//! derived from moved flags and the last move on export, and turned back into
//! moved flags and a synthetic last move on import.

use std::fmt;
use std::str::FromStr;

use super::error::FenError;
use super::{Board, CastlingRights, Color, LastMove, Piece, PieceKind, Position, Square};

/// FEN of the standard starting position
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

const KING_HOME_FILE: usize = 4;

impl Position {
    /// Parse a FEN string.
    ///
    /// Placement and side to move are required; castling and en passant
    /// default to `-` and the counters to `0 1`. Nothing is built until every
    /// field has been validated.
    ///
    /// # Example
    /// ```
    /// use chess_rules::board::{Color, Position};
    ///
    /// let pos = Position::from_fen("8/8/8/8/8/8/8/K6k b").unwrap();
    /// assert_eq!(pos.turn, Color::Black);
    /// assert_eq!(pos.to_fen(), "8/8/8/8/8/8/8/K6k b - - 0 1");
    /// ```
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 2 {
            return Err(FenError::TooFewParts { found: parts.len() });
        }
        if parts.len() > 6 {
            return Err(FenError::TooManyParts { found: parts.len() });
        }

        let grid = parse_placement(parts[0])?;
        let turn = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        };

        let castling_field = parts.get(2).copied().unwrap_or("-");
        let rights = CastlingRights::from_fen_field(castling_field)
            .map_err(|c| FenError::InvalidCastling { char: c })?;
        check_castling_pieces(&grid, castling_field)?;

        let last_move = match parts.get(3).copied().unwrap_or("-") {
            "-" => None,
            field => Some(parse_en_passant(&grid, turn, field)?),
        };

        let halfmove_clock = parse_counter(parts.get(4).copied(), 0)?;
        let fullmove_number = parse_counter(parts.get(5).copied(), 1)?;
        if fullmove_number == 0 {
            return Err(FenError::InvalidCounter {
                found: "0".to_string(),
            });
        }

        let mut board = Board::empty();
        for sq in Square::all() {
            if let Some(piece) = grid[sq.0][sq.1] {
                board.set(sq, Some(infer_moved(piece, sq, rights)));
            }
        }

        Ok(Position {
            board: board.with_check_flags(),
            turn,
            last_move,
            halfmove_clock,
            fullmove_number,
        })
    }

    /// Render all six FEN fields
    #[must_use]
    pub fn to_fen(&self) -> String {
        let ep = self
            .board
            .en_passant_target(self.last_move)
            .map_or_else(|| "-".to_string(), |sq| sq.to_string());
        format!(
            "{} {} {} {} {} {}",
            self.board.placement_fen(),
            self.turn.fen_char(),
            self.board.castling_rights().to_fen_field(),
            ep,
            self.halfmove_clock,
            self.fullmove_number
        )
    }
}

impl FromStr for Position {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::from_fen(s)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_fen())
    }
}

impl Board {
    /// The placement field, rank 8 first
    #[must_use]
    pub fn placement_fen(&self) -> String {
        let mut rows: Vec<String> = Vec::with_capacity(8);
        for row in &self.squares {
            let mut text = String::new();
            let mut empty = 0;
            for cell in row {
                match cell {
                    Some(piece) => {
                        if empty > 0 {
                            text.push_str(&empty.to_string());
                            empty = 0;
                        }
                        text.push(piece.to_fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                text.push_str(&empty.to_string());
            }
            rows.push(text);
        }
        rows.join("/")
    }

    /// Rights still available according to the kings' and corner rooks' moved flags
    #[must_use]
    pub fn castling_rights(&self) -> CastlingRights {
        let mut rights = CastlingRights::all();
        for color in Color::BOTH {
            let rank = color.back_rank();
            let unmoved = |sq: Square, kind: PieceKind| {
                self.piece_at(sq)
                    .is_some_and(|p| p.is(kind, color) && !p.moved)
            };
            if !unmoved(Square(rank, KING_HOME_FILE), PieceKind::King) {
                rights.remove(color, true);
                rights.remove(color, false);
                continue;
            }
            if !unmoved(Square(rank, 7), PieceKind::Rook) {
                rights.remove(color, true);
            }
            if !unmoved(Square(rank, 0), PieceKind::Rook) {
                rights.remove(color, false);
            }
        }
        rights
    }

    /// A copy carrying the moved flags FEN import would infer for it.
    ///
    /// Kings and corner rooks left without a castling partner are marked as
    /// moved; legal moves stay the same.
    #[must_use]
    pub(crate) fn with_settled_flags(&self) -> Board {
        let rights = self.castling_rights();
        let mut next = *self;
        for (sq, piece) in self.pieces() {
            next.set(sq, Some(infer_moved(piece, sq, rights)));
        }
        next
    }

    /// The square a pawn skipped when `last_move` was a pawn double step
    #[must_use]
    pub fn en_passant_target(&self, last_move: Option<LastMove>) -> Option<Square> {
        let last = last_move?;
        self.piece_at(last.to)
            .filter(|p| p.kind == PieceKind::Pawn)?;
        last.skipped_square()
    }
}

type Grid = [[Option<Piece>; 8]; 8];

fn parse_placement(field: &str) -> Result<Grid, FenError> {
    let ranks: Vec<&str> = field.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::WrongRankCount { found: ranks.len() });
    }

    let mut grid: Grid = [[None; 8]; 8];
    for (row, text) in ranks.iter().enumerate() {
        let mut file = 0;
        for c in text.chars() {
            match c.to_digit(10) {
                Some(skip @ 1..=8) => file += skip as usize,
                _ => {
                    let piece = Piece::from_fen_char(c).ok_or(FenError::InvalidPiece { char: c })?;
                    if file < 8 {
                        grid[row][file] = Some(piece);
                    }
                    file += 1;
                }
            }
            if file > 8 {
                return Err(FenError::WrongFileCount {
                    rank: 8 - row,
                    files: file,
                });
            }
        }
        if file != 8 {
            return Err(FenError::WrongFileCount {
                rank: 8 - row,
                files: file,
            });
        }
    }
    Ok(grid)
}

/// Every castling right needs its king and rook on their home squares.
fn check_castling_pieces(grid: &Grid, field: &str) -> Result<(), FenError> {
    for c in field.chars().filter(|&c| c != '-') {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let rank = color.back_rank();
        let rook_file = if c.eq_ignore_ascii_case(&'k') { 7 } else { 0 };
        let holds = |file: usize, kind: PieceKind| {
            grid[rank][file].is_some_and(|p| p.is(kind, color))
        };
        if !holds(KING_HOME_FILE, PieceKind::King) || !holds(rook_file, PieceKind::Rook) {
            return Err(FenError::CastlingWithoutPieces { char: c });
        }
    }
    Ok(())
}

/// Rebuild the double step behind an en passant square.
///
/// The target must sit on the row a pawn of the side that just moved skips,
/// with that pawn one row further and both skipped and origin squares empty.
fn parse_en_passant(grid: &Grid, turn: Color, field: &str) -> Result<LastMove, FenError> {
    let invalid = || FenError::InvalidEnPassant {
        found: field.to_string(),
    };
    let target: Square = field.parse().map_err(|_| invalid())?;
    let mover = turn.opponent();
    let dir = mover.pawn_direction();

    let origin = target.offset(-dir, 0).ok_or_else(invalid)?;
    let landing = target.offset(dir, 0).ok_or_else(invalid)?;
    let pawn_landed = grid[landing.0][landing.1].is_some_and(|p| p.is(PieceKind::Pawn, mover));
    if origin.0 != mover.pawn_start_rank()
        || !pawn_landed
        || grid[target.0][target.1].is_some()
        || grid[origin.0][origin.1].is_some()
    {
        return Err(invalid());
    }
    Ok(LastMove::new(origin, landing))
}

fn parse_counter(field: Option<&str>, default: u32) -> Result<u32, FenError> {
    match field {
        None => Ok(default),
        Some(text) => text.parse().map_err(|_| FenError::InvalidCounter {
            found: text.to_string(),
        }),
    }
}

/// Moved flags FEN does not carry: pawns off their start row have moved;
/// kings and rooks have not only while a castling right still needs them.
fn infer_moved(piece: Piece, sq: Square, rights: CastlingRights) -> Piece {
    let color = piece.color;
    let home = sq.0 == color.back_rank();
    let moved = match piece.kind {
        PieceKind::Pawn => sq.0 != color.pawn_start_rank(),
        PieceKind::King => !(home && sq.1 == KING_HOME_FILE && rights.has_any(color)),
        PieceKind::Rook => match sq.1 {
            7 if home => !rights.has(color, true),
            0 if home => !rights.has(color, false),
            _ => true,
        },
        _ => false,
    };
    Piece { moved, ..piece }
}

//! Error types for board, notation and game operations.

use std::fmt;

use super::{Color, Square};

/// Error type for FEN parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// FEN string has too few parts (needs at least 2)
    TooFewParts { found: usize },
    /// FEN string has more than six fields
    TooManyParts { found: usize },
    /// Placement field does not have exactly eight ranks
    WrongRankCount { found: usize },
    /// Invalid piece character in position string
    InvalidPiece { char: char },
    /// A rank describes more or fewer than eight files
    WrongFileCount { rank: usize, files: usize },
    /// Invalid castling character
    InvalidCastling { char: char },
    /// A castling right names a king or rook that is not on its home square
    CastlingWithoutPieces { char: char },
    /// Invalid side to move (must be 'w' or 'b')
    InvalidSideToMove { found: String },
    /// Invalid en passant square
    InvalidEnPassant { found: String },
    /// Halfmove clock or fullmove number is not a valid count
    InvalidCounter { found: String },
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::TooFewParts { found } => {
                write!(f, "FEN must have at least 2 parts, found {found}")
            }
            FenError::TooManyParts { found } => {
                write!(f, "FEN must have at most 6 parts, found {found}")
            }
            FenError::WrongRankCount { found } => {
                write!(f, "FEN placement must have 8 ranks, found {found}")
            }
            FenError::InvalidPiece { char } => {
                write!(f, "Invalid piece character '{char}' in FEN")
            }
            FenError::WrongFileCount { rank, files } => {
                write!(f, "Rank {rank} describes {files} files, expected 8")
            }
            FenError::InvalidCastling { char } => {
                write!(f, "Invalid castling character '{char}' in FEN")
            }
            FenError::CastlingWithoutPieces { char } => {
                write!(f, "Castling right '{char}' has no king and rook on their home squares")
            }
            FenError::InvalidSideToMove { found } => {
                write!(f, "Invalid side to move '{found}', expected 'w' or 'b'")
            }
            FenError::InvalidEnPassant { found } => {
                write!(f, "Invalid en passant square '{found}'")
            }
            FenError::InvalidCounter { found } => {
                write!(f, "Invalid move counter '{found}' in FEN")
            }
        }
    }
}

impl std::error::Error for FenError {}

/// Error type for coordinate move parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    /// Move string has invalid length (must be 4-5 characters)
    InvalidLength { len: usize },
    /// Invalid square notation in move
    InvalidSquare { notation: String },
    /// Invalid promotion piece
    InvalidPromotion { char: char },
}

impl fmt::Display for MoveParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveParseError::InvalidLength { len } => {
                write!(f, "Move must be 4-5 characters, found {len}")
            }
            MoveParseError::InvalidSquare { notation } => {
                write!(f, "Invalid square notation in '{notation}'")
            }
            MoveParseError::InvalidPromotion { char } => {
                write!(f, "Invalid promotion piece '{char}'")
            }
        }
    }
}

impl std::error::Error for MoveParseError {}

/// Error type for square parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquareError {
    /// Rank out of bounds (must be 0-7)
    RankOutOfBounds { rank: usize },
    /// File out of bounds (must be 0-7)
    FileOutOfBounds { file: usize },
    /// Invalid algebraic notation
    InvalidNotation { notation: String },
}

impl fmt::Display for SquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SquareError::RankOutOfBounds { rank } => {
                write!(f, "Rank {rank} out of bounds (must be 0-7)")
            }
            SquareError::FileOutOfBounds { file } => {
                write!(f, "File {file} out of bounds (must be 0-7)")
            }
            SquareError::InvalidNotation { notation } => {
                write!(f, "Invalid square notation '{notation}'")
            }
        }
    }
}

impl std::error::Error for SquareError {}

/// Why the game refused a move request. The game state is unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveRejection {
    /// A promotion choice must be made before any other move
    PromotionPending,
    /// No piece stands on the origin square
    NoPiece { square: Square },
    /// The piece on the origin square belongs to the side not on move
    WrongTurn { expected: Color },
    /// The destination is not among the piece's legal moves
    IllegalDestination { from: Square, to: Square },
    /// `complete_promotion` was called with nothing pending
    NoPendingPromotion,
    /// Pawns cannot promote to a king or another pawn
    InvalidPromotionPiece,
    /// The pawn recorded for promotion is no longer on its square
    PromotionPawnMissing { square: Square },
}

impl fmt::Display for MoveRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveRejection::PromotionPending => write!(f, "A promotion is waiting for its piece"),
            MoveRejection::NoPiece { square } => write!(f, "No piece on {square}"),
            MoveRejection::WrongTurn { expected } => write!(f, "It is {expected}'s turn"),
            MoveRejection::IllegalDestination { from, to } => {
                write!(f, "Illegal move {from}{to}")
            }
            MoveRejection::NoPendingPromotion => write!(f, "No promotion is pending"),
            MoveRejection::InvalidPromotionPiece => {
                write!(f, "Promotion piece must be a queen, rook, bishop or knight")
            }
            MoveRejection::PromotionPawnMissing { square } => {
                write!(f, "No pawn left on {square} to promote")
            }
        }
    }
}

impl std::error::Error for MoveRejection {}

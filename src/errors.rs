//! Errors used throughout the crate.
//!
//! Each layer owns one enum so callers can tell a corrupt upstream record
//! apart from a rejected action:
//! - `EncodingError` comes out of the record codec and encoder. It is always
//!   surfaced to the caller; a malformed record means the source is corrupt.
//! - `IllegalActionError` comes out of the rules engine when a submitted move
//!   cannot be parsed or played. The environment converts it into a terminal
//!   transition with a penalty instead of propagating it.
//! - `RulesError` covers rules-engine construction (bad FEN, bad squares).
//! - `EnvError` is what environment constructors and resets return.

use thiserror::Error;

/// Failures while decomposing or encoding a position record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    /// The record does not have the expected field count or its board field
    /// does not expand to 8 ranks of 8 squares.
    ///
    /// Payload: a description naming the offending field.
    #[error("malformed position record: {0}")]
    MalformedRecord(String),

    /// A board cell holds a symbol outside the 13-symbol alphabet.
    #[error("unknown board symbol '{0}'")]
    UnknownSymbol(char),

    /// An encoded board value lies outside [-6, 6].
    #[error("unknown encoded piece value {0}")]
    UnknownValue(i32),

    /// The caller-supplied acting color is not 0 or 1.
    #[error("self color must be 0 or 1, got {0}")]
    InvalidColor(i32),
}

/// A move rejected by the rules engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IllegalActionError {
    /// The move text is not structurally valid long algebraic notation.
    ///
    /// Payload: (move text, reason).
    #[error("unparseable move '{0}': {1}")]
    Unparseable(String, String),

    /// The move text parsed but is not legal in the current position.
    #[error("illegal move '{0}'")]
    Illegal(String),

    /// The action has a coordinate or promotion value outside the action spec.
    #[error("action outside the action spec: {0}")]
    OutOfSpec(String),
}

/// Failures while building or querying the rules engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    #[error("invalid square: {0}")]
    InvalidSquare(String),
}

/// Errors surfaced by environment construction, resets, and position-tree
/// growth.
#[derive(Debug, Error)]
pub enum EnvError {
    #[error(transparent)]
    Rules(#[from] RulesError),

    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error(transparent)]
    IllegalAction(#[from] IllegalActionError),

    #[error("invalid configuration: {0}")]
    Config(String),

    /// A position-tree node index that was never allocated.
    #[error("unknown tree node {0}")]
    UnknownNode(usize),
}

pub type EncodingResult<T> = Result<T, EncodingError>;
pub type RulesResult<T> = Result<T, RulesError>;
pub type EnvResult<T> = Result<T, EnvError>;

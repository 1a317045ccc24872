//! Errors reported by the puzzle engine and its catalog.
//!
//! All of them are local and synchronous. None is retried internally;
//! the caller corrects the request and tries again.

use thiserror::Error;

use crate::model::Square;

/// A board specification that could not be decoded.
///
/// Parsing is all-or-nothing: no session is created from a
/// malformed specification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedSpec {
    #[error("expected 8 ranks separated by '/', found {0}")]
    RankCount(usize),
    #[error("rank {rank} has {width} squares, expected 8")]
    RankWidth { rank: u8, width: usize },
    #[error("unexpected character {found:?} at offset {offset}")]
    UnexpectedCharacter { found: Option<char>, offset: usize },
}

/// A square label that is not `a1` ... `h8`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not a square: {0:?}")]
pub struct InvalidSquare(pub String);

/// A rejected session command. The session is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("{from}{to} is not a legal move")]
    IllegalMove { from: Square, to: Square },
    #[error("there is no move to undo")]
    NothingToUndo,
}

/// A rejected command of a host-side [`Attempt`](crate::attempt::Attempt).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AttemptError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("no tries left")]
    OutOfTries,
}

/// Why a solution walkthrough does not hold together.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalkthroughError {
    #[error("a walkthrough needs at least one frame")]
    NoFrames,
    #[error("frame {index}: {source}")]
    Frame {
        index: usize,
        #[source]
        source: MalformedSpec,
    },
    #[error("frame {index} changes the disabled or obstacle squares")]
    Terrain { index: usize },
    #[error("frame {index} is not reached by a single white move")]
    Step { index: usize },
    #[error("frame {index} is not what the move produces")]
    Diverges { index: usize },
}

/// Failure to load a puzzle catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("cannot read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("catalog is not valid: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("puzzle {id}: {source}")]
    Board {
        id: String,
        #[source]
        source: MalformedSpec,
    },
    #[error("puzzle {id}: a puzzle needs at least one try")]
    NoTries { id: String },
    #[error("walkthrough {id}: {source}")]
    Walkthrough {
        id: String,
        #[source]
        source: WalkthroughError,
    },
}

//! # Gobble chess puzzles.
//!
//! A single-player chess puzzle: only white moves, some squares are
//! disabled or obstacles, and a man that captures turns into a white
//! man of the captured role. The puzzle is solved when one white man
//! and no black men are left.
//!
//! ```
//! use gobblechess::{GameSession, Square};
//!
//! let mut game: GameSession =
//!     "XXXXXXXX/XXXXXXXX/XXXXXXXX/XXXKbXXX/XXXnrXXX/XXXXXXXX/XXXXXXXX/XXXXXXXX"
//!         .parse()
//!         .unwrap();
//! game.apply_move(Square::d5, Square::e4).unwrap();
//! game.apply_move(Square::e4, Square::e5).unwrap();
//! let snap = game.apply_move(Square::e5, Square::d4).unwrap();
//! assert!(snap.finished);
//! ```

pub use crate::{
    attempt::{Attempt, Outcome},
    catalog::{Catalog, Puzzle, rating::RatingPolicy, walkthrough::Walkthrough},
    error::{AttemptError, CatalogError, MalformedSpec, SessionError},
    model::{
        ChessColor, ChessMan, ChessPiece, Square, SquareStatus,
        game::{GameSession, Snapshot},
        mailbox::Position,
        squareset::SquareSet,
    },
    notation::spec::BoardSpec,
};

/// Host-side house rules for a puzzle attempt.
pub mod attempt;
/// Puzzle data.
pub mod catalog;
pub mod error;
/// Modeling the gobble chess puzzle.
pub mod model;
/// Text formats.
pub mod notation;

#[test]
fn expert_scenario() {
    let spec: BoardSpec = "XXXXXXXX/XXXXXXXX/XXrnqqXX/XXqKpkXX/XXrpbrXX/XXrnnbXX/XXXXXXXX/XXXXXXXX"
        .parse()
        .expect("expert board");
    assert_eq!(spec.pieces().count(), 16);
    assert_eq!(spec.obstacles().len(), 0);
    assert_eq!(spec.disabled().len(), 48);

    let mut game = GameSession::new(spec);
    let prey = game.board().man(Square::e6).expect("black queen");
    let snap = game.apply_move(Square::d5, Square::e6).expect("king takes queen");
    assert_eq!(snap.points, 1);
    assert_eq!(
        snap.board.man(Square::e6),
        Some(ChessMan::new(ChessColor::WHITE, prey.role()))
    );

    let snap = game.undo().expect("one move made");
    assert_eq!(snap.points, 0);
    assert_eq!(snap.board.man(Square::e6), Some(prey));
    assert_eq!(snap.board.standard_fen(), "8/8/2rnqq2/2qKpk2/2rpbr2/2rnnb2/8/8 w - - 0 1");
}

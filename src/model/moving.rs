//! # Making and unmaking gobble moves.
//!
//! A capturing man becomes a white man of the captured man's role.
//! The [`MoveRecord`] keeps the pre-move snapshots, which is all that
//! is needed to put the board back exactly as it was.

use crate::model::{ChessColor, ChessMan, Square, mailbox::Position};

/// Representation of a move made on a position.
///
/// Both men are recorded as they were before the move; the man
/// that lands on `to` is derived, see [`MoveRecord::landed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveRecord {
    pub from: Square,
    pub to: Square,
    pub moved: ChessMan,
    pub captured: Option<ChessMan>,
}

impl MoveRecord {
    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    /// The man standing on `to` after the move.
    #[inline]
    pub fn landed(&self) -> ChessMan {
        match self.captured {
            Some(prey) => ChessMan::new(ChessColor::WHITE, prey.role()),
            None => self.moved,
        }
    }
}

impl Position {
    /// Move the man on `from` to `to`, gobbling whatever stands there.
    ///
    /// Legality is not checked here beyond `from` being occupied;
    /// callers go through the move generator first. Returns `None`
    /// and leaves the position untouched when `from` is empty.
    pub fn make_move(&mut self, from: Square, to: Square) -> Option<MoveRecord> {
        let moved = self.man(from)?;
        let record = MoveRecord {
            from,
            to,
            moved,
            captured: self.man(to),
        };

        self.put(from, None);
        self.put(to, Some(record.landed()));

        Some(record)
    }

    /// Reverse a move previously made with [`make_move`](Position::make_move).
    ///
    /// Only sound when `record` is the last move made on this position.
    pub fn unmake_move(&mut self, record: MoveRecord) {
        self.put(record.to, record.captured);
        self.put(record.from, Some(record.moved));
    }
}

#[cfg(test)]
fn position(board: &str) -> Position {
    crate::notation::spec::BoardSpec::parse_snapshot(board)
        .expect("test board")
        .position()
}

#[test]
fn capture_takes_the_role_of_the_prey() {
    let mut pos = position("8/8/8/3Kq3/8/8/8/8");
    let rec = pos.make_move(Square::d5, Square::e5).expect("king on d5");

    assert_eq!(rec.moved, ChessMan::WHITE_KING);
    assert_eq!(rec.captured, Some(ChessMan::BLACK_QUEEN));
    assert_eq!(pos.man(Square::e5), Some(ChessMan::WHITE_QUEEN));
    assert_eq!(pos.man(Square::d5), None);
}

#[test]
fn quiet_move_keeps_the_man() {
    let mut pos = position("8/8/8/3N4/8/8/8/8");
    let rec = pos.make_move(Square::d5, Square::f6).expect("knight on d5");

    assert!(!rec.is_capture());
    assert_eq!(pos.man(Square::f6), Some(ChessMan::WHITE_KNIGHT));
}

#[test]
fn unmake_restores_position() {
    let start = position("8/8/8/3Pb3/8/8/8/8");
    let mut pos = start;
    let rec = pos.make_move(Square::d5, Square::e5).expect("pawn on d5");
    assert_eq!(pos.man(Square::e5), Some(ChessMan::WHITE_BISHOP));

    pos.unmake_move(rec);
    assert_eq!(pos, start);
}

#[test]
fn make_from_empty_square_is_refused() {
    let start = position("8/8/8/8/8/8/8/8");
    let mut pos = start;
    assert_eq!(pos.make_move(Square::a1, Square::a2), None);
    assert_eq!(pos, start);
}

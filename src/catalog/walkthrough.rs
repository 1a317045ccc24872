//! # Solution walkthroughs.
//!
//! A walkthrough is a worked solution stored as one board per step in
//! the snapshot dialect. The moves are not stored: each one is found by
//! comparing two consecutive frames, then replayed on a real
//! [`GameSession`] to check that it produces the next frame exactly.

use crate::{
    error::WalkthroughError,
    model::{ChessColor, ChessMan, Square, game::GameSession, mailbox::Position, squareset::SquareSet},
    notation::spec::BoardSpec,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Walkthrough {
    title: String,
    frames: Vec<BoardSpec>,
    moves: Vec<(Square, Square)>,
}

impl Walkthrough {
    pub fn new<S: AsRef<str>>(title: String, frames: &[S]) -> Result<Self, WalkthroughError> {
        let frames = frames
            .iter()
            .enumerate()
            .map(|(index, s)| {
                BoardSpec::parse_snapshot(s.as_ref())
                    .map_err(|source| WalkthroughError::Frame { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let first = *frames.first().ok_or(WalkthroughError::NoFrames)?;
        let mut session = GameSession::new(first);
        let mut moves = Vec::with_capacity(frames.len() - 1);

        for (index, pair) in frames.windows(2).enumerate().map(|(i, w)| (i + 1, w)) {
            let (before, after) = (pair[0].position(), pair[1].position());

            if before.disabled() != after.disabled() || before.obstacles() != after.obstacles() {
                return Err(WalkthroughError::Terrain { index });
            }

            let (from, to) = infer_move(&before, &after).ok_or(WalkthroughError::Step { index })?;
            session
                .apply_move(from, to)
                .map_err(|_| WalkthroughError::Step { index })?;

            if *session.board() != after {
                return Err(WalkthroughError::Diverges { index });
            }
            moves.push((from, to));
        }

        Ok(Self { title, frames, moves })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// The boards, starting position first.
    pub fn frames(&self) -> &[BoardSpec] {
        &self.frames
    }

    /// The move leading to each frame after the first.
    pub fn moves(&self) -> &[(Square, Square)] {
        &self.moves
    }

    /// A fresh session on the first frame.
    pub fn session(&self) -> GameSession {
        // `new` refuses empty frame lists
        GameSession::new(self.frames[0])
    }
}

/// A white move touches exactly two squares: it empties the origin
/// and leaves a white man on the destination.
fn infer_move(before: &Position, after: &Position) -> Option<(Square, Square)> {
    let changed: SquareSet = before
        .men()
        .map(|(sq, _)| sq)
        .chain(after.men().map(|(sq, _)| sq))
        .filter(|&sq| before.man(sq) != after.man(sq))
        .collect();

    if changed.len() != 2 {
        return None;
    }

    let white = |cm: Option<ChessMan>| cm.is_some_and(|cm| cm.color() == ChessColor::WHITE);
    let from = changed
        .iter()
        .find(|&sq| white(before.man(sq)) && after.man(sq).is_none())?;
    let to = changed.iter().find(|&sq| sq != from)?;

    white(after.man(to)).then_some((from, to))
}

#[cfg(test)]
const FRAMES: [&str; 3] = [
    "XXXXXXXX/XXXXXXXX/XXXXXXXX/XXXKbXXX/XXXnrXXX/XXXXXXXX/XXXXXXXX/XXXXXXXX",
    "XXXXXXXX/XXXXXXXX/XXXXXXXX/XXX1bXXX/XXXnRXXX/XXXXXXXX/XXXXXXXX/XXXXXXXX",
    "XXXXXXXX/XXXXXXXX/XXXXXXXX/XXX1BXXX/XXXn1XXX/XXXXXXXX/XXXXXXXX/XXXXXXXX",
];

#[test]
fn moves_are_inferred_from_frames() {
    let walk = Walkthrough::new("warm-up".to_owned(), &FRAMES).expect("valid frames");
    assert_eq!(walk.moves(), &[(Square::d5, Square::e4), (Square::e4, Square::e5)]);
    assert_eq!(walk.frames().len(), 3);

    let mut session = walk.session();
    for &(from, to) in walk.moves() {
        session.apply_move(from, to).expect("replayable");
    }
    assert_eq!(*session.board(), walk.frames()[2].position());
}

#[test]
fn single_frame_has_no_moves() {
    let walk = Walkthrough::new("still".to_owned(), &FRAMES[..1]).expect("one frame");
    assert!(walk.moves().is_empty());
    assert_eq!(
        Walkthrough::new::<&str>("nothing".to_owned(), &[]),
        Err(WalkthroughError::NoFrames)
    );
}

#[test]
fn broken_walkthroughs() {
    // skips a step
    assert_eq!(
        Walkthrough::new("skip".to_owned(), &[FRAMES[0], FRAMES[2]]),
        Err(WalkthroughError::Step { index: 1 })
    );

    // the rook should have become a bishop
    let wrong = "XXXXXXXX/XXXXXXXX/XXXXXXXX/XXX1RXXX/XXXn1XXX/XXXXXXXX/XXXXXXXX/XXXXXXXX";
    assert_eq!(
        Walkthrough::new("wrong".to_owned(), &[FRAMES[0], FRAMES[1], wrong]),
        Err(WalkthroughError::Diverges { index: 2 })
    );

    let moved_wall = "XXXXXXXX/XXXXXXXx/XXXXXXXX/XXX1bXXX/XXXnRXXX/XXXXXXXX/XXXXXXXX/XXXXXXXX";
    assert_eq!(
        Walkthrough::new("wall".to_owned(), &[FRAMES[0], moved_wall]),
        Err(WalkthroughError::Terrain { index: 1 })
    );

    assert!(matches!(
        Walkthrough::new("typo".to_owned(), &[FRAMES[0], "XXXXXXXX"]),
        Err(WalkthroughError::Frame { index: 1, .. })
    ));
}

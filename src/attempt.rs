//! # A player's attempt at a puzzle.
//!
//! The [`GameSession`] only knows the rules. An [`Attempt`] adds the
//! house rules a puzzle page plays by: a budget of tries that every
//! undo spends, star ratings, and the verdict shown at the end.

use tracing::{debug, info, warn};

use crate::{
    catalog::{Puzzle, rating::RatingPolicy},
    error::AttemptError,
    model::{
        ChessColor, Square,
        game::{GameSession, Snapshot},
        squareset::SquareSet,
    },
};

/// The verdict on an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    InProgress,
    Solved { moves: u32, optimal: u32, stars: u8 },
    /// Out of tries without solving it.
    Puzzled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    session: GameSession,
    optimal: u32,
    rating: RatingPolicy,
    max_tries: u32,
    tries_left: u32,
}

impl Attempt {
    pub fn new(puzzle: &Puzzle) -> Self {
        Self::with_policy(
            puzzle.session(),
            puzzle.optimal_moves(),
            puzzle.rating().clone(),
            puzzle.tries(),
        )
    }

    pub fn with_policy(session: GameSession, optimal: u32, rating: RatingPolicy, tries: u32) -> Self {
        Self {
            session,
            optimal,
            rating,
            max_tries: tries,
            tries_left: tries,
        }
    }

    #[inline]
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    #[inline]
    pub fn tries_left(&self) -> u32 {
        self.tries_left
    }

    #[inline]
    pub fn max_tries(&self) -> u32 {
        self.max_tries
    }

    /// Destinations to highlight when the player picks up the man on
    /// `sq`. Black men cannot be picked up.
    pub fn select(&self, sq: Square) -> SquareSet {
        match self.session.board().man(sq) {
            Some(cm) if cm.color() == ChessColor::WHITE => self.session.legal_destinations(sq),
            _ => SquareSet::EMPTY,
        }
    }

    pub fn play(&mut self, from: Square, to: Square) -> Result<Snapshot, AttemptError> {
        self.check_tries()?;
        let snap = self.session.apply_move(from, to)?;
        if let Outcome::Solved { moves, stars, .. } = self.outcome() {
            info!(moves, stars, "[ATTEMPT] Solved");
        }
        Ok(snap)
    }

    /// Take back a move, spending a try.
    ///
    /// An undo that fails for lack of moves costs nothing.
    pub fn undo(&mut self) -> Result<Snapshot, AttemptError> {
        self.check_tries()?;
        let snap = self.session.undo()?;
        self.tries_left -= 1;
        debug!(tries_left = self.tries_left, "[ATTEMPT] Spent a try");
        if self.tries_left == 0 && !snap.finished {
            info!("[ATTEMPT] Puzzled");
        }
        Ok(snap)
    }

    /// Start over with a fresh board and a full set of tries.
    pub fn try_again(&mut self) -> Snapshot {
        self.tries_left = self.max_tries;
        self.session.reset()
    }

    pub fn outcome(&self) -> Outcome {
        if self.session.is_finished() {
            let moves = self.session.moves_used();
            Outcome::Solved {
                moves,
                optimal: self.optimal,
                stars: self.rating.stars(moves),
            }
        } else if self.tries_left == 0 {
            Outcome::Puzzled
        } else {
            Outcome::InProgress
        }
    }

    fn check_tries(&self) -> Result<(), AttemptError> {
        if self.tries_left == 0 {
            warn!("[ATTEMPT] No tries left");
            return Err(AttemptError::OutOfTries);
        }
        Ok(())
    }
}

#[cfg(test)]
fn warm_up(tries: u32) -> Attempt {
    let session = "XXXXXXXX/XXXXXXXX/XXXXXXXX/XXXKbXXX/XXXnrXXX/XXXXXXXX/XXXXXXXX/XXXXXXXX"
        .parse()
        .expect("warm-up board");
    Attempt::with_policy(session, 3, RatingPolicy::for_optimal(3), tries)
}

#[test]
fn optimal_solve_earns_three_stars() {
    let mut attempt = warm_up(8);
    attempt.play(Square::d5, Square::e4).expect("king takes rook");
    attempt.play(Square::e4, Square::e5).expect("rook takes bishop");
    assert_eq!(attempt.outcome(), Outcome::InProgress);
    attempt.play(Square::e5, Square::d4).expect("bishop takes knight");
    assert_eq!(
        attempt.outcome(),
        Outcome::Solved { moves: 3, optimal: 3, stars: 3 }
    );
    assert_eq!(attempt.tries_left(), 8);
}

#[test]
fn undo_spends_tries_until_puzzled() {
    use crate::error::SessionError;

    let mut attempt = warm_up(2);
    assert_eq!(
        attempt.undo(),
        Err(AttemptError::Session(SessionError::NothingToUndo))
    );
    assert_eq!(attempt.tries_left(), 2);

    for left in [1, 0] {
        attempt.play(Square::d5, Square::e5).expect("king takes bishop");
        attempt.undo().expect("one move to undo");
        assert_eq!(attempt.tries_left(), left);
    }

    assert_eq!(attempt.outcome(), Outcome::Puzzled);
    assert_eq!(attempt.undo(), Err(AttemptError::OutOfTries));
    assert_eq!(
        attempt.play(Square::d5, Square::e5),
        Err(AttemptError::OutOfTries)
    );

    attempt.try_again();
    assert_eq!(attempt.tries_left(), 2);
    assert_eq!(attempt.outcome(), Outcome::InProgress);
}

#[test]
fn only_white_men_can_be_picked_up() {
    let attempt = warm_up(8);
    assert_eq!(attempt.select(Square::d5).len(), 3);
    assert!(attempt.select(Square::e5).is_empty());
    assert!(attempt.select(Square::a1).is_empty());
}

#[test]
fn builtin_puzzle_attempt() {
    let catalog = crate::catalog::Catalog::builtin().expect("builtin catalog");
    let puzzle = catalog.get("gobble-expert").expect("expert puzzle");
    let mut attempt = Attempt::new(puzzle);
    assert_eq!(attempt.max_tries(), 8);

    let snap = attempt.play(Square::d5, Square::e5).expect("king takes pawn");
    assert_eq!(snap.points, 1);
    assert!(matches!(
        attempt.play(Square::d5, Square::d6),
        Err(AttemptError::Session(_))
    ));
}

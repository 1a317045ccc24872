//! # The 'mailbox' representation of the puzzle board.
//!
//! This is the simple and most obvious representation,
//! using a separate value in an array for each square, a so-called
//! 'board'-centric representation.
//!
//! The [`Mailbox`] itself is generalized to allow any values, not just
//! `Option<ChessMan>` to fill the squares; the [`Position`] pairs a
//! mailbox of men with a mailbox of [`SquareStatus`] terrain.

use std::ops::{Index, IndexMut};

use strum::VariantArray;

use crate::model::{ChessColor, ChessMan, Square, SquareStatus, squareset::SquareSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Mailbox<T>(pub [T; 64]);

impl<T: Copy> Mailbox<T> {
    /// A mailbox with every square holding the same value.
    pub fn new(it: T) -> Self {
        Self([it; 64])
    }
}

impl<T> Mailbox<T> {
    /// Obtain the set of squares the predicate returns true for.
    pub fn mask(&self, mut p: impl FnMut(Square, &T) -> bool) -> SquareSet {
        self.iter().filter(|(sq, it)| p(*sq, *it)).map(|(sq, _)| sq).collect()
    }

    /// Write to a square
    pub fn set(&mut self, sq: Square, it: T) {
        self.0[sq.ix()] = it
    }

    /// Visit every square together with its value, a1 first.
    pub fn iter(&self) -> impl Iterator<Item = (Square, &T)> {
        Square::VARIANTS.iter().copied().zip(self.0.iter())
    }
}

impl<T> Index<Square> for Mailbox<T> {
    type Output = T;

    #[inline]
    fn index(&self, sq: Square) -> &T {
        &self.0[sq.ix()]
    }
}

impl<T> IndexMut<Square> for Mailbox<T> {
    #[inline]
    fn index_mut(&mut self, sq: Square) -> &mut T {
        &mut self.0[sq.ix()]
    }
}

/// A puzzle position: which man stands where, and which squares
/// are disabled or obstacles.
///
/// The terrain is fixed when the position is created. No man ever
/// stands on a blocked square; the only ways to put men on the board
/// are the board specification parser, which cannot express it, and
/// [`make_move`](Position::make_move), which only lands on squares
/// the move generator allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    men: Mailbox<Option<ChessMan>>,
    terrain: Mailbox<SquareStatus>,
}

impl Position {
    /// Assemble a position from its men and terrain.
    ///
    /// Men standing on blocked squares are dropped.
    pub(crate) fn from_parts(
        mut men: Mailbox<Option<ChessMan>>,
        terrain: Mailbox<SquareStatus>,
    ) -> Self {
        for (sq, status) in terrain.iter() {
            if status.is_blocked() {
                men.set(sq, None);
            }
        }
        Self { men, terrain }
    }

    /// The man on a square, if any.
    #[inline]
    pub fn man(&self, sq: Square) -> Option<ChessMan> {
        self.men[sq]
    }

    /// The fixed status of a square.
    #[inline]
    pub fn status(&self, sq: Square) -> SquareStatus {
        self.terrain[sq]
    }

    #[inline]
    pub fn is_blocked(&self, sq: Square) -> bool {
        self.terrain[sq].is_blocked()
    }

    /// Every man on the board with its square, a1 first.
    pub fn men(&self) -> impl Iterator<Item = (Square, ChessMan)> + '_ {
        self.men.iter().filter_map(|(sq, cm)| cm.map(|cm| (sq, cm)))
    }

    pub fn occupied(&self) -> SquareSet {
        self.men.mask(|_, cm| cm.is_some())
    }

    /// Squares holding a man of the given color.
    pub fn side(&self, color: ChessColor) -> SquareSet {
        self.men.mask(|_, cm| cm.is_some_and(|cm| cm.color() == color))
    }

    pub fn disabled(&self) -> SquareSet {
        self.terrain.mask(|_, st| st.is_disabled())
    }

    pub fn obstacles(&self) -> SquareSet {
        self.terrain.mask(|_, st| st.is_obstacle())
    }

    /// Disabled and obstacle squares together.
    pub fn blocked(&self) -> SquareSet {
        self.terrain.mask(|_, st| st.is_blocked())
    }

    /// Number of men of each color, indexed by [`ChessColor::ix`].
    pub fn census(&self) -> [usize; 2] {
        let mut res = [0; 2];
        for (_, cm) in self.men() {
            res[cm.color().ix()] += 1;
        }
        res
    }

    /// The puzzle goal: exactly one white man and no black men left.
    pub fn is_solved(&self) -> bool {
        self.census() == [1, 0]
    }

    #[inline]
    pub(crate) fn put(&mut self, sq: Square, cm: Option<ChessMan>) {
        self.men.set(sq, cm)
    }
}

#[cfg(test)]
fn sample() -> Position {
    let mut men = Mailbox::new(None);
    let mut terrain = Mailbox::new(SquareStatus::NORMAL);
    men.set(Square::d5, Some(ChessMan::WHITE_KING));
    men.set(Square::e5, Some(ChessMan::BLACK_PAWN));
    men.set(Square::a1, Some(ChessMan::BLACK_ROOK));
    terrain.set(Square::a1, SquareStatus::DISABLED);
    terrain.set(Square::h8, SquareStatus::OBSTACLE);
    Position::from_parts(men, terrain)
}

#[test]
fn position_drops_men_on_blocked_squares() {
    let pos = sample();
    assert_eq!(pos.man(Square::a1), None);
    assert_eq!(pos.occupied().len(), 2);
    assert_eq!(pos.disabled(), SquareSet::from(Square::a1));
    assert_eq!(pos.obstacles(), SquareSet::from(Square::h8));
    assert_eq!(pos.blocked().len(), 2);
}

#[test]
fn position_census() {
    let mut pos = sample();
    assert_eq!(pos.census(), [1, 1]);
    assert!(!pos.is_solved());
    pos.put(Square::e5, None);
    assert!(pos.is_solved());
    assert_eq!(pos.side(ChessColor::WHITE), SquareSet::from(Square::d5));
}

//! # Sets of squares as 64-bit masks.
//!
//! Bit `n` of the mask stands for the square with discriminant `n`,
//! so set operations are plain bit arithmetic and iteration visits
//! squares in a1, b1, ... h8 order.

use std::ops::{BitAnd, BitOr, BitOrAssign, Not};

use crate::model::Square;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct SquareSet(pub u64);

impl SquareSet {
    pub const EMPTY: Self = Self(0);
    pub const FULL: Self = Self(!0);

    #[inline]
    pub fn insert(&mut self, sq: Square) {
        self.0 |= 1 << sq.ix();
    }

    #[inline]
    pub fn remove(&mut self, sq: Square) {
        self.0 &= !(1 << sq.ix());
    }

    #[inline]
    pub fn contains(self, sq: Square) -> bool {
        self.0 & 1 << sq.ix() != 0
    }

    #[inline]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn iter(self) -> Squares {
        Squares(self.0)
    }
}

/// Iterator over the squares of a [`SquareSet`], lowest bit first.
#[derive(Debug, Clone)]
pub struct Squares(u64);

impl Iterator for Squares {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        if self.0 == 0 {
            return None;
        }
        let sq = Square::from_u8(self.0.trailing_zeros() as u8);
        self.0 &= self.0 - 1;
        Some(sq)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Squares {}

impl IntoIterator for SquareSet {
    type Item = Square;
    type IntoIter = Squares;

    fn into_iter(self) -> Squares {
        self.iter()
    }
}

impl FromIterator<Square> for SquareSet {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        let mut res = Self::EMPTY;
        for sq in iter {
            res.insert(sq);
        }
        res
    }
}

impl From<Square> for SquareSet {
    #[inline]
    fn from(sq: Square) -> Self {
        Self(1 << sq.ix())
    }
}

impl BitOr for SquareSet {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for SquareSet {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0
    }
}

impl BitAnd for SquareSet {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl Not for SquareSet {
    type Output = Self;

    #[inline]
    fn not(self) -> Self {
        Self(!self.0)
    }
}

#[test]
fn squareset_iterates_in_square_order() {
    let set: SquareSet = [Square::h8, Square::a1, Square::e4].into_iter().collect();
    assert_eq!(set.len(), 3);
    assert_eq!(
        set.iter().collect::<Vec<_>>(),
        vec![Square::a1, Square::e4, Square::h8]
    );
    assert!(set.contains(Square::e4));
    assert!(!set.contains(Square::e5));
}

#[test]
fn squareset_insert_remove() {
    let mut set = SquareSet::EMPTY;
    set.insert(Square::c3);
    set.insert(Square::c3);
    assert_eq!(set, SquareSet::from(Square::c3));
    set.remove(Square::c3);
    assert!(set.is_empty());
    assert_eq!((!SquareSet::EMPTY).len(), 64);
}

use std::{fmt::Display, str::FromStr};

use chumsky::prelude::*;
use strum::VariantArray;

use crate::{
    error::InvalidSquare,
    model::{BoardFile, BoardRank, Square},
    notation::{Extra, Parsable},
};

impl Square {
    /// File letter, `a` ... `h`.
    #[inline]
    pub fn file(self) -> char {
        char::from(b'a' + (self as u8 & 0x7))
    }

    /// Rank number, 1 at white's side of the board.
    #[inline]
    pub fn rank(self) -> u8 {
        1 + (self as u8 >> 3)
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

impl Parsable for BoardFile {
    fn parser<'s>() -> impl Parser<'s, &'s str, Self, Extra<'s>> {
        one_of("abcdefgh").map(|c: char| Self::from_u8(c as u8 - b'a'))
    }
}

impl Parsable for BoardRank {
    fn parser<'s>() -> impl Parser<'s, &'s str, Self, Extra<'s>> {
        one_of("12345678").map(|c: char| Self::from_u8(c as u8 - b'1'))
    }
}

impl Parsable for Square {
    fn parser<'s>() -> impl Parser<'s, &'s str, Self, Extra<'s>> {
        BoardFile::parser()
            .then(BoardRank::parser())
            .map(|(f, r)| Self::from_coords(f, r))
    }
}

impl FromStr for Square {
    type Err = InvalidSquare;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parser()
            .then_ignore(end())
            .parse(s)
            .into_result()
            .map_err(|_| InvalidSquare(s.to_owned()))
    }
}

#[test]
fn square_labels_parse_back() {
    for &sq in Square::VARIANTS {
        let label = sq.to_string();
        assert_eq!(label.parse::<Square>(), Ok(sq));
    }
}

#[test]
fn square_labels() {
    assert_eq!(Square::a1.to_string(), "a1");
    assert_eq!(Square::e4.to_string(), "e4");
    assert_eq!(Square::h8.to_string(), "h8");
    assert!("i1".parse::<Square>().is_err());
    assert!("a9".parse::<Square>().is_err());
    assert!("a11".parse::<Square>().is_err());
}

//! # Text formats of the puzzle.
//!
//! - Square labels, `a1` ... `h8`.
//! - Chessmen as the usual letters, uppercase for white and lowercase for black.
//! - Board specifications, see [`spec`].
//! - Standard FEN for renderers, see [`fen`].
//!
//! Parsing is done with `chumsky` combinators; every parsable type
//! exposes its parser through [`Parsable`] so they can be composed.

pub mod fen;
pub mod spec;
pub mod square;

use std::fmt::Display;

use chumsky::{error::Rich, extra, prelude::*};

use crate::model::{ChessColor, ChessMan, ChessPiece};

/// Parser extras used throughout: rich errors over string input.
pub type Extra<'s> = extra::Err<Rich<'s, char>>;

pub trait Parsable: Sized {
    fn parser<'s>() -> impl Parser<'s, &'s str, Self, Extra<'s>>;
}

impl Parsable for ChessMan {
    fn parser<'s>() -> impl Parser<'s, &'s str, Self, Extra<'s>> {
        use ChessMan::*;
        choice((
            just('k').to(BLACK_KING),
            just('q').to(BLACK_QUEEN),
            just('r').to(BLACK_ROOK),
            just('b').to(BLACK_BISHOP),
            just('n').to(BLACK_KNIGHT),
            just('p').to(BLACK_PAWN),
            just('P').to(WHITE_PAWN),
            just('N').to(WHITE_KNIGHT),
            just('B').to(WHITE_BISHOP),
            just('R').to(WHITE_ROOK),
            just('Q').to(WHITE_QUEEN),
            just('K').to(WHITE_KING),
        ))
    }
}

impl ChessPiece {
    /// Lowercase letter of this role.
    pub fn letter(self) -> char {
        ['p', 'n', 'b', 'r', 'q', 'k'][self.ix()]
    }
}

impl ChessMan {
    /// Letter of this man, uppercase for white.
    pub fn letter(self) -> char {
        let c = self.role().letter();
        match self.color() {
            ChessColor::WHITE => c.to_ascii_uppercase(),
            ChessColor::BLACK => c,
        }
    }
}

/// `{}` prints the letter, `{:#}` the figurine.
impl Display for ChessMan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if f.alternate() {
            let arr = match self.color() {
                ChessColor::WHITE => ["♙", "♘", "♗", "♖", "♕", "♔"],
                ChessColor::BLACK => ["♟", "♞", "♝", "♜", "♛", "♚"],
            };
            f.write_str(arr[self.role().ix()])
        } else {
            write!(f, "{}", self.letter())
        }
    }
}

impl Display for ChessPiece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let arr = if f.alternate() {
            ["p", "n", "b", "r", "q", "k"]
        } else {
            ["pawn", "knight", "bishop", "rook", "queen", "king"]
        };
        f.write_str(arr[self.ix()])
    }
}

impl Display for ChessColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (*self, f.alternate()) {
            (Self::WHITE, true) => f.write_str("w"),
            (Self::BLACK, true) => f.write_str("b"),
            (Self::WHITE, false) => f.write_str("white"),
            (Self::BLACK, false) => f.write_str("black"),
        }
    }
}

#[test]
fn chessman_letters_parse_back() {
    use strum::VariantArray;

    for &cm in ChessMan::VARIANTS {
        let s = cm.to_string();
        let parsed = ChessMan::parser()
            .then_ignore(end())
            .parse(s.as_str())
            .into_result();
        assert_eq!(parsed.ok(), Some(cm));
    }
}

#[test]
fn chessman_display() {
    assert_eq!(ChessMan::WHITE_QUEEN.to_string(), "Q");
    assert_eq!(ChessMan::BLACK_KNIGHT.to_string(), "n");
    assert_eq!(format!("{:#}", ChessMan::WHITE_ROOK), "♖");
    assert_eq!(format!("{:#}", ChessColor::BLACK), "b");
}

//! # Board specifications
//!
//! A board specification seeds a puzzle. It is written as eight
//! solidus-separated (`/`) ranks, starting with the 8th rank and then
//! in descending order, each rank with its files in a-h order.
//!
//! Every square has exactly one character, there is no run-length
//! encoding:
//!
//! - `X` is a disabled square,
//! - `x` is an obstacle square,
//! - `PNBRQK` / `pnbrqk` is a white / black man on a normal square.
//!
//! So a specification only has empty squares where they are blocked.
//! The starting board of the expert puzzle reads:
//!
//! ```text
//! XXXXXXXX/XXXXXXXX/XXrnqqXX/XXqKpkXX/XXrpbrXX/XXrnnbXX/XXXXXXXX/XXXXXXXX
//! ```
//!
//! Boards in the middle of play do have empty normal squares. They are
//! written in the *snapshot* dialect, which is the above plus FEN-style
//! digits `1` ... `8` for runs of empty normal squares. Solution
//! walkthroughs use it, and it is what a [`Position`] displays as:
//!
//! ```text
//! XXXXXXXX/XXXXXXXX/XX1bbxXX/XXNx1pXX/XXnxprXX/XXrbrxXX/XXXXXXXX/XXXXXXXX
//! ```

use std::{fmt::Display, str::FromStr};

use chumsky::{error::Rich, prelude::*};

use crate::{
    error::MalformedSpec,
    model::{
        BoardFile, BoardRank, ChessMan, Square, SquareStatus,
        mailbox::{Mailbox, Position},
        squareset::SquareSet,
    },
    notation::{Extra, Parsable},
};

/// A decoded board specification: the starting men and the
/// fixed disabled and obstacle squares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardSpec {
    position: Position,
}

impl BoardSpec {
    /// Decode a board in the snapshot dialect, which also accepts
    /// digits for runs of empty normal squares.
    pub fn parse_snapshot(s: &str) -> Result<Self, MalformedSpec> {
        let ranks = snapshot_board()
            .parse(s)
            .into_result()
            .map_err(malformed)?;
        assemble(ranks)
    }

    /// The starting position.
    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    /// The starting men with their squares, a1 first.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, ChessMan)> + '_ {
        self.position.men()
    }

    pub fn disabled(&self) -> SquareSet {
        self.position.disabled()
    }

    pub fn obstacles(&self) -> SquareSet {
        self.position.obstacles()
    }
}

/// Decode a board in the strict one-character-per-square dialect.
impl FromStr for BoardSpec {
    type Err = MalformedSpec;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ranks = strict_board().parse(s).into_result().map_err(malformed)?;
        assemble(ranks)
    }
}

impl Display for BoardSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.position, f)
    }
}

/// Writes the snapshot dialect.
impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for r in (0..8u8).rev() {
            let mut empty = 0;
            for file in 0..8u8 {
                let sq = Square::from_coords(BoardFile::from_u8(file), BoardRank::from_u8(r));
                let c = match (self.status(sq), self.man(sq)) {
                    (SquareStatus::DISABLED, _) => 'X',
                    (SquareStatus::OBSTACLE, _) => 'x',
                    (SquareStatus::NORMAL, Some(cm)) => cm.letter(),
                    (SquareStatus::NORMAL, None) => {
                        empty += 1;
                        continue;
                    }
                };
                if empty > 0 {
                    write!(f, "{empty}")?;
                    empty = 0;
                }
                write!(f, "{c}")?;
            }
            if empty > 0 {
                write!(f, "{empty}")?;
            }
            if r > 0 {
                f.write_str("/")?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Disabled,
    Obstacle,
    Empty,
    Man(ChessMan),
}

fn cell<'s>() -> impl Parser<'s, &'s str, Cell, Extra<'s>> {
    choice((
        just('X').to(Cell::Disabled),
        just('x').to(Cell::Obstacle),
        ChessMan::parser().map(Cell::Man),
    ))
}

fn empty_run<'s>() -> impl Parser<'s, &'s str, Vec<Cell>, Extra<'s>> {
    one_of("12345678").map(|d: char| vec![Cell::Empty; (d as u8 - b'0') as usize])
}

fn strict_board<'s>() -> impl Parser<'s, &'s str, Vec<Vec<Cell>>, Extra<'s>> {
    cell()
        .repeated()
        .collect::<Vec<_>>()
        .separated_by(just('/'))
        .collect::<Vec<_>>()
        .then_ignore(end())
}

fn snapshot_board<'s>() -> impl Parser<'s, &'s str, Vec<Vec<Cell>>, Extra<'s>> {
    choice((cell().map(|c| vec![c]), empty_run()))
        .repeated()
        .collect::<Vec<_>>()
        .map(|runs| runs.concat())
        .separated_by(just('/'))
        .collect::<Vec<_>>()
        .then_ignore(end())
}

fn malformed(errs: Vec<Rich<'_, char>>) -> MalformedSpec {
    match errs.first() {
        Some(e) => MalformedSpec::UnexpectedCharacter {
            found: e.found().copied(),
            offset: e.span().start,
        },
        None => MalformedSpec::UnexpectedCharacter {
            found: None,
            offset: 0,
        },
    }
}

fn assemble(ranks: Vec<Vec<Cell>>) -> Result<BoardSpec, MalformedSpec> {
    if ranks.len() != 8 {
        return Err(MalformedSpec::RankCount(ranks.len()));
    }

    let mut men = Mailbox::new(None);
    let mut terrain = Mailbox::new(SquareStatus::NORMAL);

    for (row, cells) in ranks.iter().enumerate() {
        let rank = BoardRank::from_u8(7 - row as u8);
        if cells.len() != 8 {
            return Err(MalformedSpec::RankWidth {
                rank: 8 - row as u8,
                width: cells.len(),
            });
        }

        for (file, cell) in cells.iter().enumerate() {
            let sq = Square::from_coords(BoardFile::from_u8(file as u8), rank);
            match *cell {
                Cell::Disabled => terrain.set(sq, SquareStatus::DISABLED),
                Cell::Obstacle => terrain.set(sq, SquareStatus::OBSTACLE),
                Cell::Empty => {}
                Cell::Man(cm) => men.set(sq, Some(cm)),
            }
        }
    }

    Ok(BoardSpec {
        position: Position::from_parts(men, terrain),
    })
}

#[cfg(test)]
const EXPERT: &str = "XXXXXXXX/XXXXXXXX/XXrnqqXX/XXqKpkXX/XXrpbrXX/XXrnnbXX/XXXXXXXX/XXXXXXXX";

#[test]
fn expert_board_counts() {
    let spec: BoardSpec = EXPERT.parse().expect("expert board");
    assert_eq!(spec.pieces().count(), 16);
    assert_eq!(spec.obstacles().len(), 0);
    assert_eq!(spec.disabled().len(), 48);
    assert_eq!(spec.position().man(Square::d5), Some(ChessMan::WHITE_KING));
    assert_eq!(spec.position().man(Square::f5), Some(ChessMan::BLACK_KING));
    assert_eq!(spec.position().man(Square::c3), Some(ChessMan::BLACK_ROOK));
}

#[test]
fn strict_spec_displays_as_itself() {
    let spec: BoardSpec = EXPERT.parse().expect("expert board");
    assert_eq!(spec.to_string(), EXPERT);
}

#[test]
fn obstacles_and_disabled_are_told_apart() {
    let spec: BoardSpec = "XXXXXXXX/xxxxxxxx/KKKKKKKK/kkkkkkkk/XXXXXXXX/xXxXxXxX/pppppppp/PPPPPPPP"
        .parse()
        .expect("striped board");
    assert_eq!(spec.disabled().len(), 20);
    assert_eq!(spec.obstacles().len(), 12);
    assert_eq!(spec.pieces().count(), 32);
    assert_eq!(spec.position().status(Square::a3), SquareStatus::OBSTACLE);
    assert_eq!(spec.position().status(Square::b3), SquareStatus::DISABLED);
}

#[test]
fn wrong_rank_count() {
    assert_eq!(
        "XXXXXXXX/XXXXXXXX".parse::<BoardSpec>(),
        Err(MalformedSpec::RankCount(2))
    );
    assert_eq!(
        format!("{EXPERT}/XXXXXXXX").parse::<BoardSpec>(),
        Err(MalformedSpec::RankCount(9))
    );
    assert_eq!("".parse::<BoardSpec>(), Err(MalformedSpec::RankCount(1)));
}

#[test]
fn wrong_rank_width() {
    assert_eq!(
        "XXXXXXXX/XXXXXXX/XXXXXXXX/XXXXXXXX/XXXXXXXX/XXXXXXXX/XXXXXXXX/XXXXXXXX"
            .parse::<BoardSpec>(),
        Err(MalformedSpec::RankWidth { rank: 7, width: 7 })
    );
    assert_eq!(
        "XXXXXXXX/XXXXXXXX/XXXXXXXX/XXXXXXXX/XXXXXXXX/XXXXXXXX/XXXXXXXX/XXXXXXXXK"
            .parse::<BoardSpec>(),
        Err(MalformedSpec::RankWidth { rank: 1, width: 9 })
    );
}

#[test]
fn unknown_character() {
    assert_eq!(
        "XXZXXXXX/XXXXXXXX/XXXXXXXX/XXXXXXXX/XXXXXXXX/XXXXXXXX/XXXXXXXX/XXXXXXXX"
            .parse::<BoardSpec>(),
        Err(MalformedSpec::UnexpectedCharacter {
            found: Some('Z'),
            offset: 2
        })
    );
}

#[test]
fn strict_dialect_rejects_run_lengths() {
    assert!(matches!(
        "8/8/8/8/8/8/8/8".parse::<BoardSpec>(),
        Err(MalformedSpec::UnexpectedCharacter { found: Some('8'), offset: 0 })
    ));
    assert!(BoardSpec::parse_snapshot("8/8/8/8/8/8/8/8").is_ok());
}

#[test]
fn snapshot_dialect() {
    let frame = "XXXXXXXX/XXXXXXXX/XX1bbxXX/XXNx1pXX/XXnxprXX/XXrbrxXX/XXXXXXXX/XXXXXXXX";
    let spec = BoardSpec::parse_snapshot(frame).expect("frame");
    assert_eq!(spec.pieces().count(), 10);
    assert_eq!(spec.obstacles().len(), 4);
    assert_eq!(spec.disabled().len(), 48);
    assert_eq!(spec.position().man(Square::c6), None);
    assert_eq!(spec.to_string(), frame);

    assert!(matches!(
        BoardSpec::parse_snapshot("9/8/8/8/8/8/8/8"),
        Err(MalformedSpec::UnexpectedCharacter { found: Some('9'), .. })
    ));
    assert_eq!(
        BoardSpec::parse_snapshot("44/8/8/8/8/8/8/71"),
        Ok(BoardSpec::parse_snapshot("8/8/8/8/8/8/8/8").expect("empty"))
    );
    assert_eq!(
        BoardSpec::parse_snapshot("5/8/8/8/8/8/8/8"),
        Err(MalformedSpec::RankWidth { rank: 8, width: 5 })
    );
}

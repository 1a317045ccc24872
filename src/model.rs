//! # Modeling the gobble chess puzzle.
//!
//! This module contains enums modeling values on the puzzle board,
//! as well as the board representation, move generation and the
//! game session in its sub-modules.

use strum::{EnumIs, VariantArray};

pub mod game;
pub mod mailbox;
pub mod movegen;
pub mod moving;
pub mod squareset;

/// Representation of the squares on a chessboard.
///
/// This enum uses the convention of numbering
/// squares starting with a1 = 0 and then counting
/// up over the files first, b1 = 1, c1 = 2, ... and then the
/// ranks, a2 = 8, a3 = 16, ... ending with h8 = 63.
///
/// This is the so called file-major little-endian layout, and it
/// means that a square doubles as a bit index into a [`SquareSet`](squareset::SquareSet).
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, VariantArray)]
#[repr(u8)]
#[rustfmt::skip]
pub enum Square {
    a1 = 0o00, b1 = 0o01, c1 = 0o02, d1 = 0o03, e1 = 0o04, f1 = 0o05, g1 = 0o06, h1 = 0o07,
    a2 = 0o10, b2 = 0o11, c2 = 0o12, d2 = 0o13, e2 = 0o14, f2 = 0o15, g2 = 0o16, h2 = 0o17,
    a3 = 0o20, b3 = 0o21, c3 = 0o22, d3 = 0o23, e3 = 0o24, f3 = 0o25, g3 = 0o26, h3 = 0o27,
    a4 = 0o30, b4 = 0o31, c4 = 0o32, d4 = 0o33, e4 = 0o34, f4 = 0o35, g4 = 0o36, h4 = 0o37,
    a5 = 0o40, b5 = 0o41, c5 = 0o42, d5 = 0o43, e5 = 0o44, f5 = 0o45, g5 = 0o46, h5 = 0o47,
    a6 = 0o50, b6 = 0o51, c6 = 0o52, d6 = 0o53, e6 = 0o54, f6 = 0o55, g6 = 0o56, h6 = 0o57,
    a7 = 0o60, b7 = 0o61, c7 = 0o62, d7 = 0o63, e7 = 0o64, f7 = 0o65, g7 = 0o66, h7 = 0o67,
    a8 = 0o70, b8 = 0o71, c8 = 0o72, d8 = 0o73, e8 = 0o74, f8 = 0o75, g8 = 0o76, h8 = 0o77,
}

impl Square {
    /// Use this Square as an array index.
    #[inline]
    pub fn ix(self) -> usize {
        self as usize
    }

    /// Infallible conversion from a u8 by way of truncating the
    /// extraneous bits.
    #[inline]
    pub fn from_u8(ix: u8) -> Self {
        Self::VARIANTS[(ix & 0x3F) as usize]
    }

    /// Split a square into file and rank
    #[inline]
    pub fn coords(self) -> (BoardFile, BoardRank) {
        (
            BoardFile::from_u8(self as u8),
            BoardRank::from_u8(self as u8 >> 3),
        )
    }

    /// Join a file and a rank into a square
    #[inline]
    pub fn from_coords(f: BoardFile, r: BoardRank) -> Self {
        Self::from_u8(f as u8 | (r as u8) << 3)
    }

    /// The square `df` files towards the h-file and `dr` ranks towards
    /// the 8th rank from this one, if that is still on the board.
    #[inline]
    pub fn offset(self, df: i8, dr: i8) -> Option<Self> {
        let f = (self as u8 & 0x7) as i8 + df;
        let r = (self as u8 >> 3) as i8 + dr;
        if (0..8).contains(&f) && (0..8).contains(&r) {
            Some(Self::from_u8((f | r << 3) as u8))
        } else {
            None
        }
    }

    /// Step one square in the given direction.
    #[inline]
    pub fn step(self, dir: CompassRose) -> Option<Self> {
        let (df, dr) = dir.delta();
        self.offset(df, dr)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, VariantArray)]
#[repr(u8)]
pub enum BoardRank {
    _1 = 0,
    _2 = 1,
    _3 = 2,
    _4 = 3,
    _5 = 4,
    _6 = 5,
    _7 = 6,
    _8 = 7,
}

impl BoardRank {
    /// Infallible conversion from a u8 by way of truncating the
    /// extraneous bits.
    #[inline]
    pub fn from_u8(ix: u8) -> Self {
        Self::VARIANTS[(ix & 0x7) as usize]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, VariantArray)]
#[allow(non_camel_case_types)]
#[repr(u8)]
pub enum BoardFile {
    a_ = 0,
    b_ = 1,
    c_ = 2,
    d_ = 3,
    e_ = 4,
    f_ = 5,
    g_ = 6,
    h_ = 7,
}

impl BoardFile {
    /// Infallible conversion from a u8 by way of truncating the
    /// extraneous bits.
    #[inline]
    pub fn from_u8(ix: u8) -> Self {
        Self::VARIANTS[(ix & 0x7) as usize]
    }
}

/// Representation of a chessman.
///
/// The discriminants carry the role in their absolute value
/// and the color in their sign, so a chessman is a single byte.
///
/// The name chessman is used because it allows a distinction between
/// the man standing on a square and its role ([`ChessPiece`]), which
/// is exactly what changes when a man gobbles another.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, VariantArray)]
#[repr(i8)]
pub enum ChessMan {
    /// ♚
    BLACK_KING = -6,
    /// ♛
    BLACK_QUEEN = -5,
    /// ♜
    BLACK_ROOK = -4,
    /// ♝
    BLACK_BISHOP = -3,
    /// ♞
    BLACK_KNIGHT = -2,
    /// ♟
    BLACK_PAWN = -1,
    /// ♙
    WHITE_PAWN = 1,
    /// ♘
    WHITE_KNIGHT = 2,
    /// ♗
    WHITE_BISHOP = 3,
    /// ♖
    WHITE_ROOK = 4,
    /// ♕
    WHITE_QUEEN = 5,
    /// ♔
    WHITE_KING = 6,
}

impl ChessMan {
    /// Assemble a chessman from color and role.
    pub fn new(color: ChessColor, role: ChessPiece) -> Self {
        use ChessColor::*;
        use ChessMan::*;
        use ChessPiece::*;
        match (color, role) {
            (WHITE, PAWN) => WHITE_PAWN,
            (WHITE, KNIGHT) => WHITE_KNIGHT,
            (WHITE, BISHOP) => WHITE_BISHOP,
            (WHITE, ROOK) => WHITE_ROOK,
            (WHITE, QUEEN) => WHITE_QUEEN,
            (WHITE, KING) => WHITE_KING,
            (BLACK, PAWN) => BLACK_PAWN,
            (BLACK, KNIGHT) => BLACK_KNIGHT,
            (BLACK, BISHOP) => BLACK_BISHOP,
            (BLACK, ROOK) => BLACK_ROOK,
            (BLACK, QUEEN) => BLACK_QUEEN,
            (BLACK, KING) => BLACK_KING,
        }
    }

    /// Color of this chessman.
    #[inline]
    pub fn color(self) -> ChessColor {
        ChessColor::from(self)
    }

    /// Role of this chessman.
    #[inline]
    pub fn role(self) -> ChessPiece {
        ChessPiece::from(self)
    }
}

/// Representation of color of a player or chessman.
///
/// Only white is ever moved by the player; black men are static
/// targets waiting to be gobbled.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIs, VariantArray)]
#[repr(u8)]
pub enum ChessColor {
    WHITE = 0,
    BLACK = 1,
}

impl ChessColor {
    /// Opposing color.
    #[inline]
    pub fn opp(self) -> Self {
        match self {
            Self::WHITE => Self::BLACK,
            Self::BLACK => Self::WHITE,
        }
    }

    /// Rank direction in which pawns of this color advance.
    #[inline]
    pub fn forward(self) -> i8 {
        match self {
            Self::WHITE => 1,
            Self::BLACK => -1,
        }
    }

    /// Associated array index.
    #[inline]
    pub fn ix(self) -> usize {
        self as usize
    }
}

/// Extracting the color of a chessman.
impl From<ChessMan> for ChessColor {
    #[inline]
    fn from(value: ChessMan) -> Self {
        if (value as i8) < 0 {
            Self::BLACK
        } else {
            Self::WHITE
        }
    }
}

/// Representation of the roles of chessmen.
///
/// The discriminant values of this enum are the absolute
/// values of the [`ChessMan`] enum, or equivalently, the white chessmen.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, VariantArray)]
#[repr(u8)]
pub enum ChessPiece {
    PAWN = 1,
    KNIGHT = 2,
    BISHOP = 3,
    ROOK = 4,
    QUEEN = 5,
    KING = 6,
}

impl ChessPiece {
    /// Use as an array index: equal to one less than the discriminant value.
    #[inline]
    pub fn ix(self) -> usize {
        self as usize - 1
    }
}

/// Extracting the role of a chessman.
impl From<ChessMan> for ChessPiece {
    #[inline]
    fn from(value: ChessMan) -> Self {
        Self::VARIANTS[(value as i8).unsigned_abs() as usize - 1]
    }
}

/// The fixed nature of a square, decided once by the board
/// specification and never changed during a session.
///
/// Disabled and obstacle squares block movement identically;
/// they differ only in how a renderer draws them.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIs)]
#[repr(u8)]
pub enum SquareStatus {
    #[default]
    NORMAL = 0,
    DISABLED = 1,
    OBSTACLE = 2,
}

impl SquareStatus {
    /// Whether the square can never be entered, landed on or passed through.
    #[inline]
    pub fn is_blocked(self) -> bool {
        !self.is_normal()
    }
}

/// Representation of the directions on a chessboard.
///
/// ```text
///  NW     North    NE
///     (-1,1) (0,1) (1,1)
/// West (-1,0)  ..  (1,0) East
///     (-1,-1)(0,-1)(1,-1)
///  SW     South    SE
/// ```
///
/// Each direction is a `(file, rank)` step as understood by [`Square::offset`],
/// east being towards the h-file and north towards the 8th rank.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, VariantArray)]
pub enum CompassRose {
    NORTH,
    EAST,
    SOUTH,
    WEST,
    NORTHEAST,
    SOUTHEAST,
    SOUTHWEST,
    NORTHWEST,
}

impl CompassRose {
    /// Rook directions.
    pub const ORTHOGONAL: [Self; 4] = [Self::NORTH, Self::EAST, Self::SOUTH, Self::WEST];

    /// Bishop directions.
    pub const DIAGONAL: [Self; 4] = [
        Self::NORTHEAST,
        Self::SOUTHEAST,
        Self::SOUTHWEST,
        Self::NORTHWEST,
    ];

    /// The `(file, rank)` step of this direction.
    #[inline]
    pub fn delta(self) -> (i8, i8) {
        match self {
            Self::NORTH => (0, 1),
            Self::EAST => (1, 0),
            Self::SOUTH => (0, -1),
            Self::WEST => (-1, 0),
            Self::NORTHEAST => (1, 1),
            Self::SOUTHEAST => (1, -1),
            Self::SOUTHWEST => (-1, -1),
            Self::NORTHWEST => (-1, 1),
        }
    }
}

#[test]
fn square_coords_roundtrip() {
    for &sq in Square::VARIANTS {
        let (f, r) = sq.coords();
        assert_eq!(Square::from_coords(f, r), sq);
    }
}

#[test]
fn square_offsets_stay_on_board() {
    assert_eq!(Square::a1.offset(-1, 0), None);
    assert_eq!(Square::h8.offset(0, 1), None);
    assert_eq!(Square::h1.offset(1, 0), None);
    assert_eq!(Square::d4.offset(1, 2), Some(Square::e6));
    assert_eq!(Square::d4.step(CompassRose::SOUTHWEST), Some(Square::c3));
}

#[test]
fn chessman_color_and_role() {
    for &cm in ChessMan::VARIANTS {
        assert_eq!(ChessMan::new(cm.color(), cm.role()), cm);
    }
    assert_eq!(ChessMan::BLACK_ROOK.role(), ChessPiece::ROOK);
    assert!(ChessMan::BLACK_ROOK.color().is_black());
}

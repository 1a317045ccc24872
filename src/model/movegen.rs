//! # Move generation under the blocking rules.
//!
//! Destinations are generated per role from the origin square.
//! Blocked squares (disabled or obstacle) are never destinations
//! and stop sliding rays the way the board edge does. Men of the
//! same color stop rays without being a destination, men of the
//! opposite color stop rays and are a destination.
//!
//! There is no notion of check, castling, double pawn pushes or
//! en-passant; black never moves, so none of them can arise.

use crate::model::{
    ChessColor, ChessPiece, CompassRose, Square, mailbox::Position, squareset::SquareSet,
};

const KNIGHT_LEAPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];

const KING_STEPS: [(i8, i8); 8] = [
    (1, 0),
    (0, 1),
    (-1, 0),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// The squares the man on `from` may move to.
///
/// Empty for an empty origin. Any man can be queried, black
/// included, though the game session only ever moves white.
pub fn legal_destinations(board: &Position, from: Square) -> SquareSet {
    let Some(man) = board.man(from) else {
        return SquareSet::EMPTY;
    };
    let color = man.color();

    match man.role() {
        ChessPiece::PAWN => pawn_moves(board, from, color),
        ChessPiece::KNIGHT => leaps(board, from, color, &KNIGHT_LEAPS),
        ChessPiece::BISHOP => slides(board, from, color, &CompassRose::DIAGONAL),
        ChessPiece::ROOK => slides(board, from, color, &CompassRose::ORTHOGONAL),
        ChessPiece::QUEEN => {
            slides(board, from, color, &CompassRose::ORTHOGONAL)
                | slides(board, from, color, &CompassRose::DIAGONAL)
        }
        ChessPiece::KING => leaps(board, from, color, &KING_STEPS),
    }
}

/// Whether a man of `color` may land on `to`: the square is not
/// blocked and holds nothing of its own color.
#[inline]
fn landable(board: &Position, to: Square, color: ChessColor) -> bool {
    !board.is_blocked(to) && board.man(to).is_none_or(|cm| cm.color() != color)
}

fn leaps(board: &Position, from: Square, color: ChessColor, deltas: &[(i8, i8)]) -> SquareSet {
    deltas
        .iter()
        .filter_map(|&(df, dr)| from.offset(df, dr))
        .filter(|&to| landable(board, to, color))
        .collect()
}

fn slides(board: &Position, from: Square, color: ChessColor, rays: &[CompassRose]) -> SquareSet {
    let mut res = SquareSet::EMPTY;

    for &dir in rays {
        let mut at = from;
        while let Some(to) = at.step(dir) {
            if board.is_blocked(to) {
                break;
            }
            match board.man(to) {
                None => res.insert(to),
                Some(cm) => {
                    if cm.color() != color {
                        res.insert(to);
                    }
                    break;
                }
            }
            at = to;
        }
    }

    res
}

fn pawn_moves(board: &Position, from: Square, color: ChessColor) -> SquareSet {
    let mut res = SquareSet::EMPTY;
    let dr = color.forward();

    if let Some(to) = from.offset(0, dr) {
        if !board.is_blocked(to) && board.man(to).is_none() {
            res.insert(to);
        }
    }

    for df in [-1, 1] {
        let Some(to) = from.offset(df, dr) else {
            continue;
        };
        if !board.is_blocked(to) && board.man(to).is_some_and(|cm| cm.color() != color) {
            res.insert(to);
        }
    }

    res
}

#[cfg(test)]
fn dests(board: &str, from: Square) -> Vec<Square> {
    let spec = crate::notation::spec::BoardSpec::parse_snapshot(board).expect("test board");
    legal_destinations(&spec.position(), from).iter().collect()
}

#[test]
fn knight_ignores_blocked_squares_in_between() {
    assert_eq!(dests("8/8/8/8/8/8/8/N7", Square::a1), vec![Square::c2, Square::b3]);
    assert_eq!(
        dests("8/8/8/8/8/8/XX6/NX6", Square::a1),
        vec![Square::c2, Square::b3]
    );
    assert_eq!(dests("8/8/8/8/8/1x6/8/N7", Square::a1), vec![Square::c2]);
}

#[test]
fn knight_captures_but_never_lands_on_own() {
    assert_eq!(dests("8/8/8/8/8/1p6/2B5/N7", Square::a1), vec![Square::b3]);
}

#[test]
fn king_steps_around() {
    let d = dests("XXXXXXXX/XXXXXXXX/XXrnqqXX/XXqKpkXX/XXrpbrXX/XXrnnbXX/XXXXXXXX/XXXXXXXX", Square::d5);
    assert_eq!(
        d,
        vec![
            Square::c4,
            Square::d4,
            Square::e4,
            Square::c5,
            Square::e5,
            Square::c6,
            Square::d6,
            Square::e6
        ]
    );
}

#[test]
fn rook_ray_stops_before_own_man() {
    // Rook a1, knight c1: east ray is only b1.
    let d = dests("8/8/8/8/8/8/8/R1N5", Square::a1);
    assert!(d.contains(&Square::b1));
    assert!(!d.contains(&Square::c1));
    assert!(!d.contains(&Square::d1));
    assert_eq!(d.len(), 8);
}

#[test]
fn rook_ray_stops_at_blocked_square() {
    let d = dests("8/8/8/8/8/X7/8/R7", Square::a1);
    assert!(d.contains(&Square::a2));
    assert!(!d.contains(&Square::a3));
    assert!(!d.contains(&Square::a4));
    assert_eq!(d.len(), 8);

    let d = dests("8/8/8/8/8/x7/8/R7", Square::a1);
    assert_eq!(d.len(), 8);
}

#[test]
fn bishop_ray_captures_then_stops() {
    let d = dests("8/8/8/8/3p4/8/1B6/8", Square::b2);
    assert_eq!(d, vec![Square::a1, Square::c1, Square::a3, Square::c3, Square::d4]);
}

#[test]
fn queen_is_rook_and_bishop() {
    let board = "8/8/8/8/8/8/8/Q7";
    let d = dests(board, Square::a1);
    assert_eq!(d.len(), 21);
}

#[test]
fn white_pawn_pushes_north_and_captures_diagonally() {
    assert_eq!(dests("8/8/8/8/8/8/1P6/8", Square::b2), vec![Square::b3]);
    assert_eq!(dests("8/8/8/8/8/1Xp5/1P6/8", Square::b2), vec![Square::c3]);
    assert_eq!(dests("8/8/8/8/8/1p6/1P6/8", Square::b2), Vec::<Square>::new());
    assert_eq!(dests("8/8/8/8/8/pxP5/1P6/8", Square::b2), vec![Square::a3]);
}

#[test]
fn black_pawn_mirrors_white() {
    assert_eq!(dests("8/1p6/B7/8/8/8/8/8", Square::b7), vec![Square::a6, Square::b6]);
}

#[test]
fn empty_origin_has_no_moves() {
    assert!(dests("8/8/8/8/8/8/8/8", Square::e4).is_empty());
}

//! # Forsyth-Edwards Notation for renderers.
//!
//! Board widgets expect a standard FEN string. Disabled and obstacle
//! squares are simply empty in it; the renderer draws them from the
//! square sets it gets separately. Empty squares are run-length encoded
//! as digits, and since this variant has no turns, castling, en-passant
//! or move clocks, the trailing fields are always `w - - 0 1`.

use std::fmt::Display;

use crate::model::{BoardFile, BoardRank, Square, mailbox::Position};

/// Display wrapper writing a position as standard FEN.
#[derive(Debug, Clone, Copy)]
pub struct StandardFen<'a>(pub &'a Position);

impl Display for StandardFen<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for r in (0..8u8).rev() {
            let mut empty = 0;
            for file in 0..8u8 {
                let sq = Square::from_coords(BoardFile::from_u8(file), BoardRank::from_u8(r));
                match self.0.man(sq) {
                    None => empty += 1,
                    Some(cm) => {
                        if empty > 0 {
                            write!(f, "{empty}")?;
                            empty = 0;
                        }
                        write!(f, "{cm}")?;
                    }
                }
            }
            if empty > 0 {
                write!(f, "{empty}")?;
            }
            if r > 0 {
                f.write_str("/")?;
            }
        }
        f.write_str(" w - - 0 1")
    }
}

impl Position {
    /// This position as standard FEN, see [`StandardFen`].
    pub fn standard_fen(&self) -> String {
        StandardFen(self).to_string()
    }
}

#[cfg(test)]
use crate::notation::spec::BoardSpec;

#[test]
fn expert_board_as_fen() {
    let spec: BoardSpec = "XXXXXXXX/XXXXXXXX/XXrnqqXX/XXqKpkXX/XXrpbrXX/XXrnnbXX/XXXXXXXX/XXXXXXXX"
        .parse()
        .expect("expert board");
    assert_eq!(
        spec.position().standard_fen(),
        "8/8/2rnqq2/2qKpk2/2rpbr2/2rnnb2/8/8 w - - 0 1"
    );
}

#[test]
fn blocked_squares_render_empty() {
    let spec = BoardSpec::parse_snapshot(
        "XXXXXXXX/XXXXXXXX/XX1bbxXX/XXNx1pXX/XXnxprXX/XXrbrxXX/XXXXXXXX/XXXXXXXX",
    )
    .expect("frame");
    assert_eq!(
        spec.position().standard_fen(),
        "8/8/3bb3/2N2p2/2n1pr2/2rbr3/8/8 w - - 0 1"
    );
}

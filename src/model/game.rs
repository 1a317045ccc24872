//! # The game session.
//!
//! The [`GameSession`] owns the board, the move history and the score.
//! It is mutated only through [`apply_move`](GameSession::apply_move),
//! [`undo`](GameSession::undo) and [`reset`](GameSession::reset), each of
//! which either succeeds completely or leaves the session untouched.
//!
//! After every operation:
//!
//! 1. every occupied square is a normal square,
//! 2. `moves_used` is the length of the history,
//! 3. `points` is the number of captures in the history,
//! 4. `finished` holds iff one white man and no black men are left.

use std::str::FromStr;

use tracing::{debug, info, warn};

use crate::{
    error::{MalformedSpec, SessionError},
    model::{
        ChessColor, Square, mailbox::Position, movegen, moving::MoveRecord,
        squareset::SquareSet,
    },
    notation::spec::BoardSpec,
};

/// What a host re-renders after each command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Snapshot {
    pub board: Position,
    pub points: u32,
    pub moves_used: u32,
    pub finished: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    spec: BoardSpec,
    board: Position,
    history: Vec<MoveRecord>,
    points: u32,
    finished: bool,
}

impl GameSession {
    pub fn new(spec: BoardSpec) -> Self {
        let board = spec.position();
        Self {
            spec,
            board,
            history: Vec::new(),
            points: 0,
            finished: board.is_solved(),
        }
    }

    /// The board specification this session started from and resets to.
    #[inline]
    pub fn spec(&self) -> &BoardSpec {
        &self.spec
    }

    #[inline]
    pub fn board(&self) -> &Position {
        &self.board
    }

    /// Moves made so far, oldest first.
    #[inline]
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    #[inline]
    pub fn points(&self) -> u32 {
        self.points
    }

    #[inline]
    pub fn moves_used(&self) -> u32 {
        self.history.len() as u32
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Where the man on `from` may go on the current board.
    ///
    /// Any man can be queried, black ones included; only white ones
    /// are accepted by [`apply_move`](GameSession::apply_move).
    pub fn legal_destinations(&self, from: Square) -> SquareSet {
        movegen::legal_destinations(&self.board, from)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board,
            points: self.points,
            moves_used: self.moves_used(),
            finished: self.finished,
        }
    }

    /// Move the white man on `from` to `to`, gobbling whatever is there.
    pub fn apply_move(&mut self, from: Square, to: Square) -> Result<Snapshot, SessionError> {
        let white = self
            .board
            .man(from)
            .is_some_and(|cm| cm.color() == ChessColor::WHITE);

        if !white || !self.legal_destinations(from).contains(to) {
            warn!(%from, %to, "[SESSION] Rejected illegal move");
            return Err(SessionError::IllegalMove { from, to });
        }

        let Some(record) = self.board.make_move(from, to) else {
            return Err(SessionError::IllegalMove { from, to });
        };

        if record.is_capture() {
            self.points += 1;
        }
        self.history.push(record);

        debug!(
            %from,
            %to,
            landed = %record.landed(),
            points = self.points,
            moves = self.moves_used(),
            "[SESSION] Applied move"
        );

        self.refresh();
        Ok(self.snapshot())
    }

    /// Take back the last move, restoring both men as they were.
    pub fn undo(&mut self) -> Result<Snapshot, SessionError> {
        let Some(record) = self.history.pop() else {
            warn!("[SESSION] Nothing to undo");
            return Err(SessionError::NothingToUndo);
        };

        self.board.unmake_move(record);
        if record.is_capture() {
            self.points -= 1;
        }

        debug!(
            from = %record.from,
            to = %record.to,
            points = self.points,
            moves = self.moves_used(),
            "[SESSION] Undid move"
        );

        self.refresh();
        Ok(self.snapshot())
    }

    /// Start over from the board specification.
    pub fn reset(&mut self) -> Snapshot {
        *self = Self::new(self.spec);
        debug!("[SESSION] Reset");
        self.snapshot()
    }

    fn refresh(&mut self) {
        let solved = self.board.is_solved();
        if solved && !self.finished {
            info!(
                moves = self.moves_used(),
                points = self.points,
                "[SESSION] Puzzle solved"
            );
        }
        self.finished = solved;
    }
}

impl FromStr for GameSession {
    type Err = MalformedSpec;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s.parse()?))
    }
}

#[cfg(test)]
const EXPERT: &str = "XXXXXXXX/XXXXXXXX/XXrnqqXX/XXqKpkXX/XXrpbrXX/XXrnnbXX/XXXXXXXX/XXXXXXXX";

#[cfg(test)]
const WARM_UP: &str = "XXXXXXXX/XXXXXXXX/XXXXXXXX/XXXKbXXX/XXXnrXXX/XXXXXXXX/XXXXXXXX/XXXXXXXX";

#[cfg(test)]
use crate::model::ChessMan;

#[test]
fn king_gobbles_a_pawn_and_undoes_it() {
    let mut game: GameSession = EXPERT.parse().expect("expert board");
    assert_eq!(game.board().occupied().len(), 16);

    let snap = game.apply_move(Square::d5, Square::e5).expect("legal capture");
    assert_eq!(snap.points, 1);
    assert_eq!(snap.moves_used, 1);
    assert!(!snap.finished);
    assert_eq!(snap.board.man(Square::e5), Some(ChessMan::WHITE_PAWN));
    assert_eq!(snap.board.man(Square::d5), None);

    let snap = game.undo().expect("one move made");
    assert_eq!(snap.points, 0);
    assert_eq!(snap.moves_used, 0);
    assert_eq!(snap.board.man(Square::e5), Some(ChessMan::BLACK_PAWN));
    assert_eq!(snap.board.man(Square::d5), Some(ChessMan::WHITE_KING));
    assert_eq!(snap.board, game.spec().position());
}

#[test]
fn last_capture_finishes_and_undo_unfinishes() {
    let mut game: GameSession = WARM_UP.parse().expect("warm-up board");
    assert!(!game.is_finished());

    game.apply_move(Square::d5, Square::e4).expect("king takes rook");
    assert_eq!(game.board().man(Square::e4), Some(ChessMan::WHITE_ROOK));
    game.apply_move(Square::e4, Square::e5).expect("rook takes bishop");
    assert!(!game.is_finished());

    let snap = game.apply_move(Square::e5, Square::d4).expect("bishop takes knight");
    assert!(snap.finished);
    assert_eq!(snap.points, 3);
    assert_eq!(snap.board.man(Square::d4), Some(ChessMan::WHITE_KNIGHT));

    let snap = game.undo().expect("three moves made");
    assert!(!snap.finished);
    assert_eq!(snap.points, 2);
}

#[test]
fn rejected_moves_change_nothing() {
    let mut game: GameSession = EXPERT.parse().expect("expert board");
    let before = game.clone();

    // onto a disabled square
    assert_eq!(
        game.apply_move(Square::d5, Square::d7),
        Err(SessionError::IllegalMove { from: Square::d5, to: Square::d7 })
    );
    // black men never move
    assert_eq!(
        game.apply_move(Square::e5, Square::d5),
        Err(SessionError::IllegalMove { from: Square::e5, to: Square::d5 })
    );
    // nothing there
    assert_eq!(
        game.apply_move(Square::a1, Square::a2),
        Err(SessionError::IllegalMove { from: Square::a1, to: Square::a2 })
    );
    assert_eq!(game, before);
}

#[test]
fn undo_on_fresh_session() {
    let mut game: GameSession = EXPERT.parse().expect("expert board");
    assert_eq!(game.undo(), Err(SessionError::NothingToUndo));
    assert_eq!(game.moves_used(), 0);
}

#[test]
fn reset_discards_history() {
    let mut game: GameSession = WARM_UP.parse().expect("warm-up board");
    game.apply_move(Square::d5, Square::e4).expect("king takes rook");
    game.apply_move(Square::e4, Square::e5).expect("rook takes bishop");

    let snap = game.reset();
    assert_eq!(snap, GameSession::new(*game.spec()).snapshot());
    assert!(game.history().is_empty());
    assert_eq!(game.points(), 0);
    assert!(!snap.finished);
}

#[test]
fn malformed_spec_makes_no_session() {
    assert_eq!(
        "XXXXXXXX".parse::<GameSession>(),
        Err(MalformedSpec::RankCount(1))
    );
}

#[cfg(test)]
fn pi_rng() -> rand::rngs::SmallRng {
    use rand::SeedableRng;
    rand::rngs::SmallRng::from_seed(*b"3.141592653589793238462643383279")
}

#[cfg(test)]
fn white_moves(game: &GameSession) -> Vec<(Square, Square)> {
    game.board()
        .side(ChessColor::WHITE)
        .iter()
        .flat_map(|from| game.legal_destinations(from).iter().map(move |to| (from, to)))
        .collect()
}

#[cfg(test)]
fn check_invariants(game: &GameSession) {
    let board = game.board();
    assert!((board.occupied() & board.blocked()).is_empty());
    assert_eq!(game.moves_used() as usize, game.history().len());
    assert_eq!(
        game.points() as usize,
        game.history().iter().filter(|rec| rec.is_capture()).count()
    );
    assert_eq!(game.is_finished(), board.census() == [1, 0]);
    assert!(board.census()[ChessColor::WHITE.ix()] >= 1);
}

#[test]
fn random_playouts_undo_exactly() {
    use rand::Rng;

    let mut rng = pi_rng();

    for _ in 0..200 {
        let mut game: GameSession = EXPERT.parse().expect("expert board");
        let start = game.snapshot();

        while game.moves_used() < 40 {
            let moves = white_moves(&game);
            if moves.is_empty() {
                break;
            }

            let (from, to) = moves[rng.random_range(0..moves.len())];
            let prey = game.board().man(to);
            let snap = game.apply_move(from, to).expect("generated move");

            match prey {
                Some(prey) => assert_eq!(
                    snap.board.man(to),
                    Some(ChessMan::new(ChessColor::WHITE, prey.role()))
                ),
                None => assert_eq!(snap.board.man(to), game.history().last().map(|r| r.moved)),
            }
            assert_eq!(snap.board.man(from), None);
            check_invariants(&game);
        }

        while game.undo().is_ok() {
            check_invariants(&game);
        }
        assert_eq!(game.snapshot(), start);
    }
}

#[test]
fn random_boards_never_offer_blocked_squares() {
    use rand::Rng;
    use strum::VariantArray;

    const CELLS: &[u8] = b"Xx1111PNBRQKpnbrqk";
    let mut rng = pi_rng();

    for _ in 0..500 {
        let ranks: Vec<String> = (0..8)
            .map(|_| {
                (0..8)
                    .map(|_| CELLS[rng.random_range(0..CELLS.len())] as char)
                    .collect()
            })
            .collect();
        let spec = BoardSpec::parse_snapshot(&ranks.join("/")).expect("random board");
        let board = spec.position();

        for &from in Square::VARIANTS {
            let dests = movegen::legal_destinations(&board, from);
            assert!((dests & board.blocked()).is_empty());
            if let Some(cm) = board.man(from) {
                assert!((dests & board.side(cm.color())).is_empty());
            } else {
                assert!(dests.is_empty());
            }
        }
    }
}

//! # The puzzle catalog.
//!
//! Puzzles are data: a TOML document with one `[puzzle.<id>]` table per
//! puzzle and one `[walkthrough.<id>]` table per worked solution.
//!
//! ```toml
//! [puzzle.gobble-expert]
//! title = "Expert"
//! date = "2025-09-26"
//! board = "XXXXXXXX/XXXXXXXX/XXrnqqXX/XXqKpkXX/XXrpbrXX/XXrnnbXX/XXXXXXXX/XXXXXXXX"
//! optimal-moves = 15
//! stars = [17, 20, 25]  # optional, ascending move counts for 3, 2 and 1 stars
//! tries = 8             # optional, at least 1
//! ```
//!
//! A catalog ships with the crate, compressed into the binary, see
//! [`Catalog::builtin`]. Every board is checked when the catalog is
//! loaded, so a [`Puzzle`] always holds a valid [`BoardSpec`].

pub mod rating;
pub mod walkthrough;

use std::path::Path;

use chrono::NaiveDate;
use include_flate::flate;
use indexmap::IndexMap;
use serde::Deserialize;
use tracing::debug;

use crate::{
    catalog::{rating::RatingPolicy, walkthrough::Walkthrough},
    error::CatalogError,
    model::game::GameSession,
    notation::spec::BoardSpec,
};

flate!(static BUILTIN: str from "data/puzzles.toml");

/// Tries a player gets when the puzzle does not say.
pub const DEFAULT_TRIES: u32 = 8;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct PuzzleRecord {
    title: String,
    date: NaiveDate,
    board: String,
    optimal_moves: u32,
    #[serde(default)]
    stars: Option<Vec<u32>>,
    #[serde(default = "default_tries")]
    tries: u32,
}

fn default_tries() -> u32 {
    DEFAULT_TRIES
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct WalkthroughRecord {
    title: String,
    frames: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    #[serde(default)]
    puzzle: IndexMap<String, PuzzleRecord>,
    #[serde(default)]
    walkthrough: IndexMap<String, WalkthroughRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    id: String,
    title: String,
    date: NaiveDate,
    spec: BoardSpec,
    optimal_moves: u32,
    rating: RatingPolicy,
    tries: u32,
}

impl Puzzle {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// The day this puzzle is the daily puzzle.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn spec(&self) -> &BoardSpec {
        &self.spec
    }

    /// Fewest moves known to solve the puzzle.
    pub fn optimal_moves(&self) -> u32 {
        self.optimal_moves
    }

    pub fn rating(&self) -> &RatingPolicy {
        &self.rating
    }

    pub fn tries(&self) -> u32 {
        self.tries
    }

    /// Start a new attempt at this puzzle.
    pub fn session(&self) -> GameSession {
        GameSession::new(self.spec)
    }
}

/// Puzzles and walkthroughs by id, in the order they were listed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    puzzles: IndexMap<String, Puzzle>,
    walkthroughs: IndexMap<String, Walkthrough>,
}

impl Catalog {
    /// The catalog shipped with this crate.
    pub fn builtin() -> Result<Self, CatalogError> {
        let text: &str = &BUILTIN;
        Self::from_toml_str(text)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "[CATALOG] Loading");
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(text)?;

        let mut puzzles = IndexMap::with_capacity(file.puzzle.len());
        for (id, rec) in file.puzzle {
            if rec.tries == 0 {
                return Err(CatalogError::NoTries { id });
            }
            let spec = rec.board.parse().map_err(|source| CatalogError::Board {
                id: id.clone(),
                source,
            })?;
            let rating = match rec.stars {
                Some(bands) => RatingPolicy::new(bands),
                None => RatingPolicy::for_optimal(rec.optimal_moves),
            };
            let puzzle = Puzzle {
                id: id.clone(),
                title: rec.title,
                date: rec.date,
                spec,
                optimal_moves: rec.optimal_moves,
                rating,
                tries: rec.tries,
            };
            puzzles.insert(id, puzzle);
        }

        let mut walkthroughs = IndexMap::with_capacity(file.walkthrough.len());
        for (id, rec) in file.walkthrough {
            let walk = Walkthrough::new(rec.title, &rec.frames).map_err(|source| {
                CatalogError::Walkthrough {
                    id: id.clone(),
                    source,
                }
            })?;
            walkthroughs.insert(id, walk);
        }

        debug!(
            puzzles = puzzles.len(),
            walkthroughs = walkthroughs.len(),
            "[CATALOG] Loaded"
        );

        Ok(Self {
            puzzles,
            walkthroughs,
        })
    }

    pub fn get(&self, id: &str) -> Option<&Puzzle> {
        self.puzzles.get(id)
    }

    /// The first puzzle listed for the given day.
    pub fn for_date(&self, date: NaiveDate) -> Option<&Puzzle> {
        self.puzzles.values().find(|p| p.date == date)
    }

    /// The most recent puzzle not dated after `date`, for hosts that
    /// serve a daily puzzle and fall back on the last one published.
    pub fn latest_on_or_before(&self, date: NaiveDate) -> Option<&Puzzle> {
        self.puzzles
            .values()
            .filter(|p| p.date <= date)
            .fold(None, |best: Option<&Puzzle>, p| match best {
                Some(b) if b.date >= p.date => Some(b),
                _ => Some(p),
            })
    }

    pub fn puzzles(&self) -> impl Iterator<Item = &Puzzle> {
        self.puzzles.values()
    }

    pub fn walkthrough(&self, id: &str) -> Option<&Walkthrough> {
        self.walkthroughs.get(id)
    }

    pub fn walkthroughs(&self) -> impl Iterator<Item = (&str, &Walkthrough)> {
        self.walkthroughs.iter().map(|(id, w)| (id.as_str(), w))
    }
}

#[cfg(test)]
fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[test]
fn builtin_catalog_loads() {
    let catalog = Catalog::builtin().expect("builtin catalog");
    let ids: Vec<_> = catalog.puzzles().map(Puzzle::id).collect();
    assert_eq!(ids, ["gobble-warm-up", "gobble-expert"]);

    let expert = catalog.get("gobble-expert").expect("expert puzzle");
    assert_eq!(expert.optimal_moves(), 15);
    assert_eq!(expert.tries(), DEFAULT_TRIES);
    assert_eq!(expert.rating().bands(), &[17, 20, 25]);
    assert_eq!(expert.spec().pieces().count(), 16);
    assert_eq!(expert.session().moves_used(), 0);

    let warm_up = catalog.get("gobble-warm-up").expect("warm-up puzzle");
    assert_eq!(warm_up.tries(), 3);
    assert_eq!(warm_up.rating().bands(), &[3, 5, 8]);
}

#[test]
fn builtin_walkthrough_solves_its_board() {
    let catalog = Catalog::builtin().expect("builtin catalog");
    let walk = catalog.walkthrough("obstacle-course").expect("walkthrough");
    assert_eq!(walk.moves().len(), 10);
    assert_eq!(walk.frames().len(), 11);

    let mut session = walk.session();
    for &(from, to) in walk.moves() {
        session.apply_move(from, to).expect("replayable");
    }
    assert!(session.is_finished());
    assert_eq!(session.points(), 9);
}

#[test]
fn lookup_by_date() {
    let catalog = Catalog::builtin().expect("builtin catalog");
    assert_eq!(
        catalog.for_date(day(2025, 9, 26)).map(Puzzle::id),
        Some("gobble-expert")
    );
    assert_eq!(catalog.for_date(day(2025, 9, 27)), None);
    assert_eq!(
        catalog.latest_on_or_before(day(2030, 1, 1)).map(Puzzle::id),
        Some("gobble-expert")
    );
    assert_eq!(
        catalog.latest_on_or_before(day(2025, 9, 25)).map(Puzzle::id),
        Some("gobble-warm-up")
    );
    assert_eq!(catalog.latest_on_or_before(day(2025, 1, 1)), None);
}

#[test]
fn bad_catalogs_are_refused() {
    let bad_board = r#"
        [puzzle.broken]
        title = "Broken"
        date = "2025-01-01"
        board = "XXXXXXXX/XXXXXXXX"
        optimal-moves = 1
    "#;
    assert!(matches!(
        Catalog::from_toml_str(bad_board),
        Err(CatalogError::Board { id, source: crate::error::MalformedSpec::RankCount(2) }) if id == "broken"
    ));

    let missing_key = r#"
        [puzzle.broken]
        title = "Broken"
    "#;
    assert!(matches!(
        Catalog::from_toml_str(missing_key),
        Err(CatalogError::Toml(_))
    ));

    let bad_walk = r#"
        [walkthrough.empty]
        title = "Empty"
        frames = []
    "#;
    assert!(matches!(
        Catalog::from_toml_str(bad_walk),
        Err(CatalogError::Walkthrough { .. })
    ));

    let no_tries = r#"
        [puzzle.locked]
        title = "Locked"
        date = "2025-01-01"
        board = "XXXXXXXX/XXXXXXXX/XXXXXXXX/XXXKbXXX/XXXXXXXX/XXXXXXXX/XXXXXXXX/XXXXXXXX"
        optimal-moves = 1
        tries = 0
    "#;
    assert!(matches!(
        Catalog::from_toml_str(no_tries),
        Err(CatalogError::NoTries { id }) if id == "locked"
    ));

    assert!(matches!(
        Catalog::load("no/such/catalog.toml"),
        Err(CatalogError::Io(_))
    ));
    assert_eq!(Catalog::from_toml_str("").ok(), Some(Catalog::default()));
}

#[test]
fn listing_order_is_file_order() {
    let text = r#"
        [puzzle.zebra]
        title = "Zebra"
        date = "2025-03-02"
        board = "XXXXXXXX/XXXXXXXX/XXXXXXXX/XXXKbXXX/XXXXXXXX/XXXXXXXX/XXXXXXXX/XXXXXXXX"
        optimal-moves = 1

        [puzzle.apple]
        title = "Apple"
        date = "2025-03-02"
        board = "XXXXXXXX/XXXXXXXX/XXXXXXXX/XXXKrXXX/XXXXXXXX/XXXXXXXX/XXXXXXXX/XXXXXXXX"
        optimal-moves = 1

        [puzzle.mango]
        title = "Mango"
        date = "2025-03-01"
        board = "XXXXXXXX/XXXXXXXX/XXXXXXXX/XXXKnXXX/XXXXXXXX/XXXXXXXX/XXXXXXXX/XXXXXXXX"
        optimal-moves = 1
    "#;
    let catalog = Catalog::from_toml_str(text).expect("catalog");
    let ids: Vec<_> = catalog.puzzles().map(Puzzle::id).collect();
    assert_eq!(ids, ["zebra", "apple", "mango"]);

    assert_eq!(catalog.for_date(day(2025, 3, 2)).map(Puzzle::id), Some("zebra"));
    assert_eq!(
        catalog.latest_on_or_before(day(2025, 3, 5)).map(Puzzle::id),
        Some("zebra")
    );
    assert_eq!(
        catalog.latest_on_or_before(day(2025, 3, 1)).map(Puzzle::id),
        Some("mango")
    );
}

#[test]
fn huge_optimal_moves_saturate_the_bands() {
    let text = r#"
        [puzzle.endless]
        title = "Endless"
        date = "2025-01-01"
        board = "XXXXXXXX/XXXXXXXX/XXXXXXXX/XXXKbXXX/XXXXXXXX/XXXXXXXX/XXXXXXXX/XXXXXXXX"
        optimal-moves = 4294967295
    "#;
    let catalog = Catalog::from_toml_str(text).expect("catalog");
    let puzzle = catalog.get("endless").expect("puzzle");
    assert_eq!(puzzle.optimal_moves(), u32::MAX);
    assert_eq!(puzzle.rating().bands(), &[u32::MAX; 3]);
}

//! Star ratings for a finished puzzle.

/// Move-count bands, ascending. The first band the move count fits
/// in wins: with three bands that is 3 stars for the first, 2 for the
/// second and 1 for the third. Anything over the last band gets 0.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RatingPolicy {
    bands: Vec<u32>,
}

impl RatingPolicy {
    /// Bands are sorted ascending whatever order they are given in.
    pub fn new(mut bands: Vec<u32>) -> Self {
        bands.sort_unstable();
        Self { bands }
    }

    /// The bands used when a puzzle gives none:
    /// optimal, two over optimal and five over optimal.
    pub fn for_optimal(optimal: u32) -> Self {
        Self::new(vec![
            optimal,
            optimal.saturating_add(2),
            optimal.saturating_add(5),
        ])
    }

    pub fn bands(&self) -> &[u32] {
        &self.bands
    }

    /// The most stars there are to earn.
    pub fn max_stars(&self) -> u8 {
        self.bands.len() as u8
    }

    pub fn stars(&self, moves: u32) -> u8 {
        self.bands
            .iter()
            .position(|&limit| moves <= limit)
            .map_or(0, |ix| (self.bands.len() - ix) as u8)
    }
}

#[test]
fn default_bands() {
    let policy = RatingPolicy::for_optimal(15);
    assert_eq!(policy.bands(), &[15, 17, 20]);
    assert_eq!(policy.stars(3), 3);
    assert_eq!(policy.stars(15), 3);
    assert_eq!(policy.stars(16), 2);
    assert_eq!(policy.stars(17), 2);
    assert_eq!(policy.stars(20), 1);
    assert_eq!(policy.stars(21), 0);
}

#[test]
fn default_bands_saturate() {
    let policy = RatingPolicy::for_optimal(u32::MAX);
    assert_eq!(policy.bands(), &[u32::MAX; 3]);
    assert_eq!(policy.stars(u32::MAX), 3);
    assert_eq!(
        RatingPolicy::for_optimal(u32::MAX - 3).bands(),
        &[u32::MAX - 3, u32::MAX - 1, u32::MAX]
    );
}

#[test]
fn bands_are_ordered() {
    let policy = RatingPolicy::new(vec![25, 17, 20]);
    assert_eq!(policy.bands(), &[17, 20, 25]);
    assert_eq!(policy.max_stars(), 3);
    assert_eq!(policy.stars(18), 2);
    assert_eq!(policy.stars(26), 0);
}

#[test]
fn no_bands_no_stars() {
    let policy = RatingPolicy::new(vec![]);
    assert_eq!(policy.stars(0), 0);
    assert_eq!(RatingPolicy::new(vec![4]).stars(4), 1);
}

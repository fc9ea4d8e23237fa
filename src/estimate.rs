//! Bounds on how many nanobots can reach into a region.

use crate::bot::Bot;
use crate::region::Region;

/// How many bots reach into a region.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Estimate {
    /// The number of bots that reach at least one point of the region. No
    /// point in the region is covered by more bots than this.
    pub upper: usize,

    /// The number of bots that reach every corner of the region.
    ///
    /// A bot's range is an octahedron, which is convex, so a bot that reaches
    /// all eight corners reaches every point between them too.
    pub lower: usize,
}

/// How a single bot's range meets a region, in order of decreasing
/// reach. A bot is classified by the first of these that applies.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Coverage {
    /// The bot reaches all eight corners.
    AllCorners,

    /// The bot reaches at least one corner, but not all of them.
    SomeCorners,

    /// The bot reaches no corner, but sits inside the region.
    CenterInside,

    /// The bot sits outside the region and reaches no corner, but does reach
    /// some other point on the region's surface.
    TouchesSurface,

    OutOfRange,
}

impl Coverage {
    pub fn counts_toward_upper(self) -> bool {
        self != Coverage::OutOfRange
    }

    pub fn counts_toward_lower(self) -> bool {
        self == Coverage::AllCorners
    }
}

pub fn classify(bot: &Bot, region: &Region) -> Coverage {
    let corners_in_range = region
        .corners()
        .iter()
        .filter(|&&corner| bot.covers_point(corner))
        .count();

    if corners_in_range == 8 {
        Coverage::AllCorners
    } else if corners_in_range > 0 {
        Coverage::SomeCorners
    } else if region.contains_point(bot.pos) {
        Coverage::CenterInside
    } else if region.distance_to_point(bot.pos) <= bot.radius {
        // With the center outside, the nearest point of the region lies on
        // its surface.
        Coverage::TouchesSurface
    } else {
        Coverage::OutOfRange
    }
}

pub fn estimate(region: &Region, bots: &[Bot]) -> Estimate {
    let mut upper = 0;
    let mut lower = 0;
    for bot in bots {
        let coverage = classify(bot, region);
        upper += coverage.counts_toward_upper() as usize;
        lower += coverage.counts_toward_lower() as usize;
    }
    Estimate { upper, lower }
}

/// Check every lattice point on each face of `region` for one in range of
/// `bot`. This is the slow way to answer `TouchesSurface`, kept to check the
/// fast one.
#[cfg(test)]
fn scan_faces(bot: &Bot, region: &Region) -> bool {
    let (x0, y0, z0) = region.min;
    let (x1, y1, z1) = region.max;
    for x in x0..=x1 {
        for y in y0..=y1 {
            if bot.covers_point((x, y, z0)) || bot.covers_point((x, y, z1)) {
                return true;
            }
        }
        for z in z0..=z1 {
            if bot.covers_point((x, y0, z)) || bot.covers_point((x, y1, z)) {
                return true;
            }
        }
    }
    for z in z0..=z1 {
        for y in y0..=y1 {
            if bot.covers_point((x0, y, z)) || bot.covers_point((x1, y, z)) {
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
use crate::region::test_region as region;

#[test]
#[rustfmt::skip]
fn test_classify() {
    let r = region((0, 0, 0), (4, 4, 4));

    assert_eq!(classify(&Bot::new((2, 2, 2), 6), &r), Coverage::AllCorners);
    assert_eq!(classify(&Bot::new((-1, -1, -1), 100), &r), Coverage::AllCorners);
    assert_eq!(classify(&Bot::new((0, 0, 0), 1), &r), Coverage::SomeCorners);
    assert_eq!(classify(&Bot::new((-1, 0, 0), 1), &r), Coverage::SomeCorners);
    assert_eq!(classify(&Bot::new((2, 2, 2), 1), &r), Coverage::CenterInside);
    assert_eq!(classify(&Bot::new((2, 2, 2), 0), &r), Coverage::CenterInside);
    assert_eq!(classify(&Bot::new((2, 2, 6), 2), &r), Coverage::TouchesSurface);
    assert_eq!(classify(&Bot::new((2, 2, 6), 1), &r), Coverage::OutOfRange);
    assert_eq!(classify(&Bot::new((8, 8, 8), 11), &r), Coverage::OutOfRange);
    assert_eq!(classify(&Bot::new((8, 8, 8), 12), &r), Coverage::SomeCorners);
}

#[test]
fn test_surface_matches_face_scan() {
    let regions = [
        region((0, 0, 0), (4, 4, 4)),
        region((-3, 2, -1), (1, 6, 5)),
        region((5, 5, 5), (5, 5, 5)),
        region((0, 0, 0), (6, 0, 3)),
    ];
    for r in regions.iter() {
        for center in region((-9, -9, -9), (9, 9, 9)).points() {
            for &radius in &[0, 1, 3, 6] {
                let bot = Bot::new(center, radius);
                if r.contains_point(center) {
                    continue;
                }
                let fast = r.distance_to_point(center) <= radius;
                assert_eq!(fast, scan_faces(&bot, r), "bot {:?} vs region {}", bot, r);
            }
        }
    }
}

#[test]
fn test_estimate() {
    let bots = vec![
        Bot::new((2, 2, 2), 6), // all corners
        Bot::new((0, 0, 0), 1), // one corner
        Bot::new((2, 2, 2), 1), // inside
        Bot::new((2, 2, 6), 2), // touches the top face
        Bot::new((20, 2, 2), 3),
        Bot::new((-3, -3, -3), 9), // only the nearest corner
    ];
    let r = region((0, 0, 0), (4, 4, 4));
    assert_eq!(estimate(&r, &bots), Estimate { upper: 5, lower: 1 });

    // Deterministic.
    assert_eq!(estimate(&r, &bots), estimate(&r, &bots));

    assert_eq!(estimate(&r, &[]), Estimate { upper: 0, lower: 0 });
}

#[test]
fn test_estimate_counts_enclosed_bots() {
    let bots = vec![Bot::new((10, 10, 10), 0), Bot::new((-50, 3, 3), 1)];
    let r = region((0, 0, 0), (100, 100, 100));
    let e = estimate(&r, &bots);
    assert_eq!(e.upper, 1);
    assert_eq!(e.lower, 0);
}

#[test]
fn test_estimate_with_caches() {
    let bots = vec![Bot::new((1, 1, 1), 1)];
    let mut r = region((0, 0, 0), (2, 2, 2));
    assert_eq!(r.estimate(), None);
    let first = r.estimate_with(&bots);
    assert_eq!(first, Estimate { upper: 1, lower: 0 });
    assert_eq!(r.estimate(), Some(first));

    // The cached bounds stand, even against different bots.
    assert_eq!(r.estimate_with(&[]), first);
}

//! Axis-aligned boxes of integer points.
//!
//! A `Region` includes both of its bounds on every axis, so a region whose
//! `min` and `max` are equal holds exactly one point. Regions may be flat on
//! any number of axes.

use failure::{Error, Fail};
use std::cmp::{max, min};
use std::fmt;

use crate::bot::Bot;
use crate::estimate::{estimate, Estimate};
use crate::Point;

#[derive(Debug, Fail)]
#[fail(display = "invalid region: min {:?} exceeds max {:?}", min, max)]
pub struct InvalidRegion {
    pub min: Point,
    pub max: Point,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Region {
    pub min: Point,
    pub max: Point,

    /// Bounds on how many bots reach into this region. Filled in at most once,
    /// by `estimate_with`; a region's bounds never change.
    estimate: Option<Estimate>,
}

/// The extent of one axis of a region, as a pair of inclusive bounds.
type Span = (i64, i64);

/// The distance from `c` to the nearest value in `lo..=hi`.
fn gap((lo, hi): Span, c: i64) -> i64 {
    max(0, max(lo - c, c - hi))
}

/// Split a span at its midpoint, rounding down. The halves share the
/// midpoint.
fn halves((lo, hi): Span) -> [Span; 2] {
    let mid = (lo + hi).div_euclid(2);
    [(lo, mid), (mid, hi)]
}

/// Choose the low or high entry on each axis for octant `i`: bit `2⁰` picks
/// the high `x`, `2¹` the high `y`, and `2²` the high `z`.
fn octant<T: Copy>(xs: [T; 2], ys: [T; 2], zs: [T; 2], i: usize) -> (T, T, T) {
    (xs[i & 1], ys[(i >> 1) & 1], zs[(i >> 2) & 1])
}

impl Region {
    pub fn new(min: Point, max: Point) -> Result<Region, InvalidRegion> {
        if min.0 > max.0 || min.1 > max.1 || min.2 > max.2 {
            return Err(InvalidRegion { min, max });
        }
        Ok(Region::from_spans((min.0, max.0), (min.1, max.1), (min.2, max.2)))
    }

    /// Callers must ensure every span is non-empty.
    fn from_spans(x: Span, y: Span, z: Span) -> Region {
        Region {
            min: (x.0, y.0, z.0),
            max: (x.1, y.1, z.1),
            estimate: None,
        }
    }

    /// The smallest region that includes every bot's position.
    pub fn enclosing_centers(bots: &[Bot]) -> Result<Region, Error> {
        Region::enclosing(bots.iter().map(|bot| (bot.pos, bot.pos)))
    }

    /// The smallest region that includes every point any bot can reach.
    pub fn enclosing_ranges(bots: &[Bot]) -> Result<Region, Error> {
        Region::enclosing(bots.iter().map(|bot| {
            let (x, y, z) = bot.pos;
            let r = bot.radius;
            ((x - r, y - r, z - r), (x + r, y + r, z + r))
        }))
    }

    fn enclosing<I>(boxes: I) -> Result<Region, Error>
    where I: IntoIterator<Item = (Point, Point)>
    {
        let (lo, hi) = boxes
            .into_iter()
            .fold(None, |acc: Option<(Point, Point)>, (lo, hi)| match acc {
                None => Some((lo, hi)),
                Some((a, b)) => Some((
                    (min(a.0, lo.0), min(a.1, lo.1), min(a.2, lo.2)),
                    (max(b.0, hi.0), max(b.1, hi.1), max(b.2, hi.2)),
                )),
            })
            .ok_or_else(|| format_err!("no nanobots in input"))?;
        Ok(Region::new(lo, hi)?)
    }

    fn x(&self) -> Span {
        (self.min.0, self.max.0)
    }

    fn y(&self) -> Span {
        (self.min.1, self.max.1)
    }

    fn z(&self) -> Span {
        (self.min.2, self.max.2)
    }

    /// The eight corners, numbered the same way as the octants of `split`.
    pub fn corners(&self) -> [Point; 8] {
        let (x0, y0, z0) = self.min;
        let (x1, y1, z1) = self.max;
        let corner = |i: usize| octant([x0, x1], [y0, y1], [z0, z1], i);
        [
            corner(0),
            corner(1),
            corner(2),
            corner(3),
            corner(4),
            corner(5),
            corner(6),
            corner(7),
        ]
    }

    pub fn contains_point(&self, p: Point) -> bool {
        self.min.0 <= p.0 && p.0 <= self.max.0
            && self.min.1 <= p.1 && p.1 <= self.max.1
            && self.min.2 <= p.2 && p.2 <= self.max.2
    }

    /// The product of the region's edge lengths. This is zero for flat
    /// regions, however many points they hold; see `point_count`.
    pub fn size(&self) -> i128 {
        let edge = |(lo, hi): Span| hi as i128 - lo as i128;
        edge(self.x())
            .saturating_mul(edge(self.y()))
            .saturating_mul(edge(self.z()))
    }

    /// The number of integer points in the region. Both this and `size`
    /// saturate at `i128::MAX`.
    pub fn point_count(&self) -> i128 {
        let len = |(lo, hi): Span| hi as i128 - lo as i128 + 1;
        len(self.x())
            .saturating_mul(len(self.y()))
            .saturating_mul(len(self.z()))
    }

    /// The Manhattan distance from `p` to the nearest point in the region, or
    /// zero if `p` is inside.
    ///
    /// Per axis, the nearest coordinate is `p`'s clamped into the region's
    /// span, so the nearest point is always a lattice point.
    pub fn distance_to_point(&self, p: Point) -> i64 {
        gap(self.x(), p.0) + gap(self.y(), p.1) + gap(self.z(), p.2)
    }

    pub fn distance_to_origin(&self) -> i64 {
        self.distance_to_point((0, 0, 0))
    }

    /// Every point in the region, in order of increasing `x`, then `y`, then
    /// `z`.
    pub fn points(&self) -> impl Iterator<Item = Point> {
        let (x0, y0, z0) = self.min;
        let (x1, y1, z1) = self.max;
        iproduct!(x0..=x1, y0..=y1, z0..=z1)
    }

    /// Split `self` into octants at the midpoint of each axis.
    ///
    /// Neighboring octants share the plane through the midpoint, so the
    /// octants' union is exactly `self`. The midpoint rounds toward negative
    /// infinity; on an axis of length one, the low half is flat and the high
    /// half is the whole axis.
    ///
    /// Octant `i` takes the high half of `x` if bit `2⁰` of `i` is set, `y`
    /// for `2¹`, and `z` for `2²`.
    pub fn split(&self) -> [Region; 8] {
        let xs = halves(self.x());
        let ys = halves(self.y());
        let zs = halves(self.z());
        let child = |i: usize| {
            let (x, y, z) = octant(xs, ys, zs, i);
            Region::from_spans(x, y, z)
        };
        [
            child(0),
            child(1),
            child(2),
            child(3),
            child(4),
            child(5),
            child(6),
            child(7),
        ]
    }

    pub fn estimate(&self) -> Option<Estimate> {
        self.estimate
    }

    /// Return this region's bounds against `bots`, computing them if this is
    /// the first request. Later calls return the cached bounds, whatever
    /// `bots` they pass.
    pub fn estimate_with(&mut self, bots: &[Bot]) -> Estimate {
        if let Some(estimate) = self.estimate {
            return estimate;
        }
        let bounds = estimate(self, bots);
        trace!("{} estimated at {:?}", self, bounds);
        self.estimate = Some(bounds);
        bounds
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(
            f,
            "<{},{},{}>..=<{},{},{}>",
            self.min.0, self.min.1, self.min.2, self.max.0, self.max.1, self.max.2
        )
    }
}

#[cfg(test)]
pub(crate) fn test_region(min: Point, max: Point) -> Region {
    Region::new(min, max).expect("test region should be valid")
}

#[cfg(test)]
use self::test_region as region;

#[test]
fn test_new() {
    assert!(Region::new((0, 0, 0), (0, 0, 0)).is_ok());
    assert!(Region::new((-5, -5, -5), (5, 5, 5)).is_ok());
    assert!(Region::new((0, 0, 0), (10, 0, 3)).is_ok());

    assert!(Region::new((1, 0, 0), (0, 0, 0)).is_err());
    assert!(Region::new((0, 1, 0), (0, 0, 0)).is_err());
    assert!(Region::new((0, 0, 1), (0, 0, 0)).is_err());
    assert!(Region::new((0, 0, 0), (10, 10, -1)).is_err());

    let err = Region::new((3, 0, 0), (2, 5, 5)).unwrap_err();
    assert_eq!(err.to_string(),
               "invalid region: min (3, 0, 0) exceeds max (2, 5, 5)");
}

#[test]
#[rustfmt::skip]
fn test_corners() {
    let r = region((0, 10, 20), (1, 11, 21));
    assert_eq!(r.corners(),
               [(0, 10, 20), (1, 10, 20), (0, 11, 20), (1, 11, 20),
                (0, 10, 21), (1, 10, 21), (0, 11, 21), (1, 11, 21)]);

    // Corner `i` is the far corner of octant `i`.
    let children = r.split();
    for (i, corner) in r.corners().iter().enumerate() {
        assert!(children[i].contains_point(*corner));
    }

    let r = region((4, 4, 4), (4, 4, 4));
    assert!(r.corners().iter().all(|&c| c == (4, 4, 4)));
}

#[test]
fn test_contains_point() {
    let r = region((-2, 0, 3), (2, 4, 3));
    assert!(r.contains_point((0, 0, 3)));
    assert!(r.contains_point((-2, 4, 3)));
    assert!(r.contains_point((2, 2, 3)));
    assert!(!r.contains_point((3, 2, 3)));
    assert!(!r.contains_point((0, -1, 3)));
    assert!(!r.contains_point((0, 0, 4)));
    for &c in r.corners().iter() {
        assert!(r.contains_point(c));
    }
}

#[test]
fn test_size() {
    assert_eq!(region((0, 0, 0), (0, 0, 0)).size(), 0);
    assert_eq!(region((0, 0, 0), (0, 0, 0)).point_count(), 1);
    assert_eq!(region((0, 0, 0), (2, 3, 4)).size(), 24);
    assert_eq!(region((0, 0, 0), (2, 3, 4)).point_count(), 60);
    assert_eq!(region((0, 0, 0), (100, 100, 0)).size(), 0);
    assert_eq!(region((0, 0, 0), (100, 100, 0)).point_count(), 101 * 101);

    // Large enough to overflow `i64`.
    let big = region((-400_000_000, -400_000_000, -400_000_000), (400_000_000, 400_000_000, 400_000_000));
    assert_eq!(big.size(), 800_000_000i128.pow(3));
    assert_eq!(region((0, 0, 0), (2, 3, 4)).points().count(), 60);

    let widest = region((i64::MIN, i64::MIN, i64::MIN), (i64::MAX, i64::MAX, i64::MAX));
    assert_eq!(widest.size(), i128::MAX);
    assert_eq!(widest.point_count(), i128::MAX);
    let wide = region((i64::MIN, 0, 0), (i64::MAX, 0, 0));
    assert_eq!(wide.size(), 0);
    assert_eq!(wide.point_count(), 1i128 << 64);
}

#[test]
fn test_distance_to_point() {
    let r = region((0, 0, 0), (10, 10, 10));
    assert_eq!(r.distance_to_point((5, 5, 5)), 0);
    assert_eq!(r.distance_to_point((10, 0, 10)), 0);
    assert_eq!(r.distance_to_point((11, 5, 5)), 1);
    assert_eq!(r.distance_to_point((-3, 5, 12)), 5);
    assert_eq!(r.distance_to_point((-1, -1, -1)), 3);
    assert_eq!(r.distance_to_point((20, 20, 20)), 30);
    assert_eq!(r.distance_to_origin(), 0);
    assert_eq!(region((2, -5, 3), (4, -1, 9)).distance_to_origin(), 2 + 1 + 3);
}

#[test]
fn test_points() {
    let r = region((0, 0, 0), (1, 1, 0));
    assert_eq!(r.points().collect::<Vec<_>>(),
               vec![(0, 0, 0), (0, 1, 0), (1, 0, 0), (1, 1, 0)]);
    assert_eq!(region((7, 7, 7), (7, 7, 7)).points().collect::<Vec<_>>(), vec![(7, 7, 7)]);
}

#[test]
fn test_split_spans_parent() {
    let parents = [
        region((0, 0, 0), (10, 10, 10)),
        region((-7, -3, 0), (2, 5, 1)),
        region((-3, -3, -3), (0, 0, 0)),
        region((5, 5, 5), (5, 9, 5)),
    ];
    for parent in parents.iter() {
        let children = parent.split();
        for child in children.iter() {
            assert!(parent.contains_point(child.min));
            assert!(parent.contains_point(child.max));
            assert_eq!(child.estimate(), None);
        }

        assert_eq!(children.iter().map(|c| c.min.0).min(), Some(parent.min.0));
        assert_eq!(children.iter().map(|c| c.min.1).min(), Some(parent.min.1));
        assert_eq!(children.iter().map(|c| c.min.2).min(), Some(parent.min.2));
        assert_eq!(children.iter().map(|c| c.max.0).max(), Some(parent.max.0));
        assert_eq!(children.iter().map(|c| c.max.1).max(), Some(parent.max.1));
        assert_eq!(children.iter().map(|c| c.max.2).max(), Some(parent.max.2));

        // No gaps: every point of the parent lands in some octant.
        for p in parent.points() {
            assert!(children.iter().any(|c| c.contains_point(p)), "{:?} not covered", p);
        }
    }
}

#[test]
#[rustfmt::skip]
fn test_split_midpoints() {
    let children = region((0, 0, 0), (10, 10, 10)).split();
    assert_eq!(children[0], region((0, 0, 0), (5, 5, 5)));
    assert_eq!(children[1], region((5, 0, 0), (10, 5, 5)));
    assert_eq!(children[2], region((0, 5, 0), (5, 10, 5)));
    assert_eq!(children[4], region((0, 0, 5), (5, 5, 10)));
    assert_eq!(children[7], region((5, 5, 5), (10, 10, 10)));

    // Negative midpoints round down, not toward zero.
    let children = region((-3, -3, -3), (0, 0, 0)).split();
    assert_eq!(children[0], region((-3, -3, -3), (-2, -2, -2)));
    assert_eq!(children[7], region((-2, -2, -2), (0, 0, 0)));

    // Flat axes stay flat.
    let children = region((1, 1, 1), (1, 1, 2)).split();
    assert_eq!(children[0], region((1, 1, 1), (1, 1, 1)));
    assert_eq!(children[7], region((1, 1, 1), (1, 1, 2)));
}

#[test]
fn test_enclosing() -> Result<(), Error> {
    let bots = vec![
        Bot::new((1, -2, 3), 1),
        Bot::new((-4, 5, 0), 2),
        Bot::new((0, 0, 7), 0),
    ];
    assert_eq!(Region::enclosing_centers(&bots)?, region((-4, -2, 0), (1, 5, 7)));
    assert_eq!(Region::enclosing_ranges(&bots)?, region((-6, -3, -2), (2, 7, 7)));
    assert!(Region::enclosing_centers(&[]).is_err());
    assert!(Region::enclosing_ranges(&[]).is_err());
    Ok(())
}

#[test]
fn test_display() {
    assert_eq!(region((-1, 2, -3), (4, 5, 6)).to_string(), "<-1,2,-3>..=<4,5,6>");
}

//! Exhaustive search of a small region for the best point.

use std::cmp::Reverse;

use crate::bot::{coverage, Bot};
use crate::region::Region;
use crate::{Manhattan, Point};

/// A point, together with how many bots reach it and how far it is from the
/// origin.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Best {
    pub point: Point,
    pub count: usize,
    pub distance: i64,
}

impl Best {
    pub fn at(point: Point, bots: &[Bot]) -> Best {
        Best {
            point,
            count: coverage(bots, point),
            distance: point.manhattan((0, 0, 0)),
        }
    }

    /// Lower ranks are better: more bots first, then closer to the origin,
    /// then the earlier point in lexicographic order, so that ties always
    /// resolve the same way.
    pub fn rank(&self) -> (Reverse<usize>, i64, Point) {
        (Reverse(self.count), self.distance, self.point)
    }

    pub fn better(self, other: Best) -> Best {
        if other.rank() < self.rank() {
            other
        } else {
            self
        }
    }
}

/// Check every point in `region`, and return the one in range of the most
/// bots, breaking ties as `Best::rank` does.
pub fn scan(region: &Region, bots: &[Bot]) -> Best {
    let best = region
        .points()
        .map(|point| Best::at(point, bots))
        .min_by_key(Best::rank)
        .expect("regions are never empty");
    debug!(
        "scanned {} points of {}: best {:?} with {} bots, distance {}",
        region.point_count(),
        region,
        best.point,
        best.count,
        best.distance
    );
    best
}

#[cfg(test)]
use crate::bot::parse_bots;
#[cfg(test)]
use crate::region::test_region as region;
#[cfg(test)]
use failure::Error;

#[cfg(test)]
static SAMPLE_INPUT: &str = include_str!("../data/small2.txt");

#[test]
fn test_best_rank() {
    let a = Best { point: (1, 1, 1), count: 4, distance: 3 };
    let b = Best { point: (0, 0, 5), count: 4, distance: 5 };
    let c = Best { point: (9, 9, 9), count: 5, distance: 27 };
    let d = Best { point: (-1, 1, 1), count: 4, distance: 3 };
    assert_eq!(a.better(b), a);
    assert_eq!(b.better(a), a);
    assert_eq!(a.better(c), c);
    assert_eq!(a.better(d), d);
    assert_eq!(d.better(a), d);
}

#[test]
fn test_scan_sample() -> Result<(), Error> {
    let bots = parse_bots(SAMPLE_INPUT)?;
    let best = scan(&region((10, 10, 10), (14, 14, 14)), &bots);
    assert_eq!(best, Best { point: (12, 12, 12), count: 5, distance: 36 });
    Ok(())
}

#[test]
fn test_scan_prefers_origin() {
    // Every point is in range of the one bot; the answer is the nearest one
    // to the origin.
    let bots = vec![Bot::new((5, 5, 5), 100)];
    let best = scan(&region((2, -3, 4), (6, 3, 8)), &bots);
    assert_eq!(best, Best { point: (2, 0, 4), count: 1, distance: 6 });
}

#[test]
fn test_scan_without_bots() {
    let best = scan(&region((-1, -1, -1), (1, 1, 1)), &[]);
    assert_eq!(best, Best { point: (0, 0, 0), count: 0, distance: 0 });
}

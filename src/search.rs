//! Octree search for the point in range of the most nanobots.
//!
//! Both strategies start from a box around the bots and repeatedly split the
//! region whose upper bound is highest into octants, using `estimate` to
//! rank them. Once a region holds fewer points than the configured
//! threshold, we stop splitting and `scan` it point by point.

use failure::Error;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use crate::bot::Bot;
use crate::config::{SearchConfig, Strategy};
use crate::region::Region;
use crate::scan::{scan, Best};
use crate::IteratorExt;

/// Find the point in range of the most bots, preferring points closer to the
/// origin, using the strategy `config` selects.
pub fn best_point(bots: &[Bot], config: &SearchConfig) -> Result<Best, Error> {
    config.validate()?;
    match config.strategy {
        Strategy::FirstCandidate => {
            let candidate = first_candidate(bots, config)?;
            Ok(scan(&candidate, bots))
        }
        Strategy::Exhaustive => exhaustive(bots, config),
    }
}

/// Starting with the box around the bots' positions, split the region with
/// the highest upper bound until that region is small enough, and return it.
///
/// Of several regions with the same upper bound, the one that entered the
/// worklist first is chosen. Octants overlap where they meet, so different
/// parents can produce the same child; each region enters the worklist once.
///
/// This is a greedy search: there may be better points in regions the search
/// never got around to.
pub fn first_candidate(bots: &[Bot], config: &SearchConfig) -> Result<Region, Error> {
    config.validate()?;
    let start = Region::enclosing_centers(bots)?;
    let mut visited = HashSet::new();
    visited.insert((start.min, start.max));
    let mut regions = vec![start];
    let mut splits = 0;

    loop {
        let (index, upper) = regions
            .iter_mut()
            .map(|region| region.estimate_with(bots).upper)
            .enumerate()
            .first_max_by_key(|&(_, upper)| upper)
            .expect("worklist is never empty");

        if regions[index].point_count() < config.threshold {
            let candidate = regions.remove(index);
            info!(
                "first candidate {} reaches at most {} bots, after {} splits",
                candidate, upper, splits
            );
            return Ok(candidate);
        }

        let parent = regions.remove(index);
        debug!("splitting {} (upper bound {})", parent, upper);
        for child in parent.split().iter() {
            if visited.insert((child.min, child.max)) {
                regions.push(child.clone());
            }
        }
        splits += 1;
    }
}

/// A region waiting to be explored, with its bounds already computed.
#[derive(Debug)]
struct Pending {
    upper: usize,
    distance: i64,
    points: i128,
    region: Region,
}

impl Pending {
    fn new(mut region: Region, bots: &[Bot]) -> Pending {
        let upper = region.estimate_with(bots).upper;
        Pending {
            upper,
            distance: region.distance_to_origin(),
            points: region.point_count(),
            region,
        }
    }

    /// True if some point in this region could rank better than `best`.
    fn could_beat(&self, best: &Option<Best>) -> bool {
        match best {
            None => true,
            Some(best) => {
                self.upper > best.count
                    || (self.upper == best.count && self.distance <= best.distance)
            }
        }
    }
}

// For the sake of `BinaryHeap`, a `Pending` region is 'greater' if it is a
// better prospect: a higher upper bound first, then nearer the origin, then
// smaller, so that we reach scannable regions sooner.
impl PartialEq for Pending {
    fn eq(&self, other: &Pending) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Pending {}

impl Ord for Pending {
    fn cmp(&self, other: &Pending) -> Ordering {
        self.upper
            .cmp(&other.upper)
            .then(other.distance.cmp(&self.distance))
            .then(other.points.cmp(&self.points))
    }
}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Pending) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Branch and bound over every bot's full range.
///
/// The heap always yields the region with the highest upper bound, so once
/// that bound drops below the best count found so far, no region left can
/// beat it. Regions that could at best tie the count are still explored if
/// they come as near to the origin as the best point. As in
/// `first_candidate`, a region reached from two parents is explored once.
fn exhaustive(bots: &[Bot], config: &SearchConfig) -> Result<Best, Error> {
    let start = Region::enclosing_ranges(bots)?;
    let mut visited = HashSet::new();
    visited.insert((start.min, start.max));
    let mut pending = BinaryHeap::new();
    pending.push(Pending::new(start, bots));

    let mut best: Option<Best> = None;
    let mut splits = 0;
    let mut scans = 0;

    while let Some(next) = pending.pop() {
        if let Some(ref best) = best {
            if next.upper < best.count {
                break;
            }
        }
        if !next.could_beat(&best) {
            continue;
        }

        if next.points < config.threshold {
            let found = scan(&next.region, bots);
            scans += 1;
            best = Some(match best {
                None => found,
                Some(best) => best.better(found),
            });
            continue;
        }

        debug!("splitting {} (upper bound {})", next.region, next.upper);
        splits += 1;
        for child in next.region.split().iter() {
            if !visited.insert((child.min, child.max)) {
                continue;
            }
            let child = Pending::new(child.clone(), bots);
            if child.could_beat(&best) {
                pending.push(child);
            }
        }
    }

    info!(
        "exhaustive search: {} splits, {} regions scanned, {} left pending",
        splits,
        scans,
        pending.len()
    );
    best.ok_or_else(|| format_err!("no nanobots in input"))
}

#[cfg(test)]
use crate::bot::{parse_bots, MAX_REACH};
#[cfg(test)]
use crate::estimate::Estimate;
#[cfg(test)]
use crate::region::test_region as region;

#[cfg(test)]
static SMALL_INPUT: &str = include_str!("../data/small.txt");
#[cfg(test)]
static SAMPLE_INPUT: &str = include_str!("../data/small2.txt");

#[cfg(test)]
fn exhaustive_config(threshold: i128) -> SearchConfig {
    SearchConfig {
        threshold,
        strategy: Strategy::Exhaustive,
    }
}

#[test]
fn test_sample() -> Result<(), Error> {
    let bots = parse_bots(SAMPLE_INPUT)?;
    let best = best_point(&bots, &SearchConfig::default())?;
    assert_eq!(best, Best { point: (12, 12, 12), count: 5, distance: 36 });
    Ok(())
}

#[test]
fn test_matches_brute_force() -> Result<(), Error> {
    let inputs = vec![
        parse_bots(SMALL_INPUT)?,
        vec![
            Bot::new((-5, -5, -5), 4),
            Bot::new((-3, -4, -6), 3),
            Bot::new((-8, -2, -5), 5),
            Bot::new((2, 2, 2), 3),
            Bot::new((-4, -4, -4), 1),
        ],
        vec![
            Bot::new((3, 0, 0), 2),
            Bot::new((0, 3, 0), 2),
            Bot::new((0, 0, 3), 2),
            Bot::new((-3, 0, 0), 2),
        ],
    ];

    for bots in &inputs {
        let expected = scan(&Region::enclosing_ranges(bots)?, bots);
        for &threshold in &[9, 50, 500] {
            assert_eq!(best_point(bots, &exhaustive_config(threshold))?, expected,
                       "threshold {} on {:?}", threshold, bots);
        }
    }
    Ok(())
}

#[test]
fn test_point_outside_bot_positions() -> Result<(), Error> {
    // The box around the bot positions is just (10,0,0), but the origin
    // itself is in range, and closer.
    let bots = vec![Bot::new((10, 0, 0), 20)];
    let best = best_point(&bots, &SearchConfig::default())?;
    assert_eq!(best, Best { point: (0, 0, 0), count: 1, distance: 0 });
    Ok(())
}

#[test]
fn test_far_from_origin() -> Result<(), Error> {
    let bots = vec![
        Bot::new((95_000_000, 19_000_000, 43_000_000), 72_000_000),
        Bot::new((95_000_010, 19_000_000, 43_000_000), 5),
        Bot::new((-4_000_000, 80_000_000, 1_000_000), 30_000_000),
    ];
    let best = best_point(&bots, &SearchConfig::default())?;
    assert_eq!(best.count, 2);
    assert_eq!(best.point, (95_000_005, 19_000_000, 43_000_000));
    assert_eq!(best.distance, 157_000_005);
    Ok(())
}

#[test]
fn test_bots_at_the_limits() -> Result<(), Error> {
    let far = MAX_REACH - 1;
    let input = format!("pos=<{},0,0>, r=1\npos=<{},0,0>, r=1\n", far, -far);
    let bots = parse_bots(&input)?;

    let root = Region::enclosing_ranges(&bots)?;
    assert_eq!(root, region((-MAX_REACH, -1, -1), (MAX_REACH, 1, 1)));
    assert!(root.point_count() > 0);

    // Two points tie for the best distance; the lesser one wins.
    let best = best_point(&bots, &SearchConfig::default())?;
    assert_eq!(best, Best { point: (1 - far, 0, 0), count: 1, distance: far - 1 });

    let config = SearchConfig { strategy: Strategy::FirstCandidate, ..SearchConfig::default() };
    assert_eq!(best_point(&bots, &config)?.count, 1);
    Ok(())
}

#[test]
fn test_first_candidate() -> Result<(), Error> {
    let config = SearchConfig {
        threshold: 50,
        strategy: Strategy::FirstCandidate,
    };

    let bots = vec![Bot::new((3, -2, 7), 0)];
    let candidate = first_candidate(&bots, &config)?;
    assert_eq!(candidate, {
        let mut r = region((3, -2, 7), (3, -2, 7));
        r.estimate_with(&bots);
        r
    });
    assert_eq!(best_point(&bots, &config)?, Best { point: (3, -2, 7), count: 1, distance: 12 });

    // The box around the positions is (10,10,10)..=(50,50,50). At every step
    // the earliest region with the best upper bound is the low octant, down
    // through (10,10,10)..=(30,30,30) and (10,10,10)..=(20,20,20) and
    // (10,10,10)..=(15,15,15), which still holds 216 points.
    let bots = parse_bots(SAMPLE_INPUT)?;
    let candidate = first_candidate(&bots, &config)?;
    assert_eq!(candidate.min, (10, 10, 10));
    assert_eq!(candidate.max, (12, 12, 12));
    assert_eq!(candidate.estimate(), Some(Estimate { upper: 6, lower: 1 }));
    assert_eq!(best_point(&bots, &config)?, Best { point: (12, 12, 12), count: 5, distance: 36 });
    Ok(())
}

#[test]
fn test_errors() {
    assert!(best_point(&[], &SearchConfig::default()).is_err());
    assert!(first_candidate(&[], &SearchConfig::default()).is_err());

    let bots = vec![Bot::new((0, 0, 0), 1)];
    assert!(best_point(&bots, &exhaustive_config(8)).is_err());
    assert!(first_candidate(&bots, &exhaustive_config(3)).is_err());
}

#[test]
fn test_pending_order() {
    let bots = vec![Bot::new((0, 0, 0), 10), Bot::new((20, 0, 0), 10)];
    let mut heap = BinaryHeap::new();
    heap.push(Pending::new(region((100, 100, 100), (101, 101, 101)), &bots));
    heap.push(Pending::new(region((15, 0, 0), (16, 1, 1)), &bots));
    heap.push(Pending::new(region((5, 0, 0), (6, 1, 1)), &bots));
    heap.push(Pending::new(region((8, 0, 0), (12, 0, 0)), &bots));

    let order: Vec<Region> = std::iter::from_fn(|| heap.pop().map(|p| p.region)).collect();
    assert_eq!(order[0].min, (8, 0, 0));
    assert_eq!(order[1].min, (5, 0, 0));
    assert_eq!(order[2].min, (15, 0, 0));
    assert_eq!(order[3].min, (100, 100, 100));
}

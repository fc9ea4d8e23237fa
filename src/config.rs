//! Tuning for the octree search: when to stop splitting, and how to pick
//! regions.

use failure::Error;
use std::fmt;

/// How the octree search chooses which small regions to scan.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Strategy {
    /// Keep splitting the most promising region, and scan only the first
    /// region that gets small enough. Fast, but the answer is only the best
    /// point in that one region.
    FirstCandidate,

    /// Branch and bound: scan every small region whose upper bound could still
    /// beat the best point found so far.
    Exhaustive,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        f.write_str(match self {
            Strategy::FirstCandidate => "first-candidate",
            Strategy::Exhaustive => "exhaustive",
        })
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SearchConfig {
    /// Regions holding fewer integer points than this are scanned point by
    /// point rather than split further.
    pub threshold: i128,

    pub strategy: Strategy,
}

/// A region whose every axis spans at most two values holds at most this many
/// points, and splitting it may give back the same region. Thresholds must
/// exceed this, or the search could split forever.
pub const MIN_THRESHOLD: i128 = 8;

impl Default for SearchConfig {
    fn default() -> SearchConfig {
        SearchConfig {
            threshold: 50,
            strategy: Strategy::Exhaustive,
        }
    }
}

impl SearchConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if self.threshold <= MIN_THRESHOLD {
            return Err(format_err!(
                "search threshold must be greater than {}, not {}",
                MIN_THRESHOLD,
                self.threshold
            ));
        }
        Ok(())
    }
}

#[test]
fn test_strategy_display() {
    assert_eq!(Strategy::Exhaustive.to_string(), "exhaustive");
    assert_eq!(Strategy::FirstCandidate.to_string(), "first-candidate");
}

#[test]
fn test_validate() {
    assert!(SearchConfig::default().validate().is_ok());
    assert_eq!(SearchConfig::default().threshold, 50);

    let config = |threshold| SearchConfig { threshold, ..SearchConfig::default() };
    assert!(config(9).validate().is_ok());
    assert!(config(8).validate().is_err());
    assert!(config(0).validate().is_err());
    assert!(config(-1).validate().is_err());
}

#[macro_use]
extern crate failure;
#[macro_use]
extern crate itertools;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
extern crate regex;

use std::cmp::Ordering;

pub mod bot;
pub mod config;
pub mod estimate;
pub mod region;
pub mod scan;
pub mod search;

pub use crate::bot::Bot;
pub use crate::config::{SearchConfig, Strategy};
pub use crate::region::Region;
pub use crate::scan::Best;

/// A point in space. Nanobot coordinates in real inputs run to hundreds of
/// millions, so `i32` is too tight for sums of them.
pub type Point = (i64, i64, i64);

pub trait Manhattan {
    fn manhattan(self, other: Self) -> i64;
}

impl Manhattan for Point {
    fn manhattan(self, other: Point) -> i64 {
        (self.0 - other.0).abs() + (self.1 - other.1).abs() + (self.2 - other.2).abs()
    }
}

pub trait IteratorExt: Iterator {
    fn first_max_by_key<B, F>(self, f: F) -> Option<Self::Item>
    where B: Ord,
          F: FnMut(&Self::Item) -> B;
}

impl<I: Iterator> IteratorExt for I {
    /// Return the item of `self` for which `f` returns the greatest value. If
    /// there is a tie, return the earliest such item.
    ///
    /// `Iterator::max_by_key` returns the *last* of several equal maxima,
    /// which isn't what you want when input order is meaningful.
    fn first_max_by_key<B, F>(mut self, mut f: F) -> Option<Self::Item>
    where B: Ord,
          F: FnMut(&Self::Item) -> B
    {
        let mut best = match self.next() {
            None => return None,
            Some(b) => b
        };
        let mut best_key = f(&best);

        for item in self {
            let key = f(&item);
            if let Ordering::Greater = key.cmp(&best_key) {
                best = item;
                best_key = key;
            }
        }

        Some(best)
    }
}

#[test]
fn test_manhattan() {
    assert_eq!((0, 0, 0).manhattan((0, 0, 0)), 0);
    assert_eq!((1, 2, 3).manhattan((2, 3, 5)), 4);
    assert_eq!((-1, -2, -3).manhattan((1, 2, 3)), 12);
    assert_eq!((12, 12, 12).manhattan((0, 0, 0)), 36);
}

#[test]
fn test_first_max_by_key() {
    let empty: Vec<(usize, i32)> = vec![];
    assert_eq!(empty.into_iter().first_max_by_key(|&(_, v)| v), None);

    let items = vec![(0, 3), (1, 7), (2, 7), (3, 1)];
    assert_eq!(items.iter().first_max_by_key(|&&(_, v)| v), Some(&(1, 7)));
    assert_eq!(items.iter().max_by_key(|&&(_, v)| v), Some(&(2, 7)));

    let items = vec![(0, 5)];
    assert_eq!(items.into_iter().first_max_by_key(|&(_, v)| v), Some((0, 5)));
}

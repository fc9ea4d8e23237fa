//! Nanobots: a position and a Manhattan-distance signal radius.

use failure::{Error, Fail};
use regex::Regex;
use std::num::ParseIntError;
use std::str::FromStr;

use crate::{IteratorExt, Manhattan, Point};

/// On every axis, a parsed bot's coordinate plus its radius must stay within
/// this distance of zero. Sums and differences of positions, reaches and
/// region bounds then all fit in an `i64`.
pub const MAX_REACH: i64 = i64::MAX / 8;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Bot {
    pub pos: Point,
    pub radius: i64,
}

impl Bot {
    pub fn new(pos: Point, radius: i64) -> Bot {
        Bot { pos, radius }
    }

    pub fn distance(&self, other: &Bot) -> i64 {
        self.pos.manhattan(other.pos)
    }

    pub fn covers_point(&self, point: Point) -> bool {
        self.pos.manhattan(point) <= self.radius
    }

    pub fn covers_bot(&self, other: &Bot) -> bool {
        self.covers_point(other.pos)
    }

    /// True if every point this bot reaches lies within `MAX_REACH` of zero
    /// on each axis.
    pub fn within_limits(&self) -> bool {
        let (x, y, z) = self.pos;
        self.radius >= 0
            && [x, y, z].iter().all(|c| {
                c.checked_abs()
                    .and_then(|c| c.checked_add(self.radius))
                    .map_or(false, |reach| reach <= MAX_REACH)
            })
    }
}

#[derive(Debug, Fail)]
pub enum ParseBotError {
    #[fail(display = "line {}: not a nanobot: {:?}", line, text)]
    Malformed { line: usize, text: String },

    #[fail(display = "line {}: nanobot reaches too far from the origin: {:?}", line, text)]
    OutOfRange { line: usize, text: String },

    #[fail(display = "bad number in nanobot: {}", _0)]
    Number(#[cause] ParseIntError),
}

impl From<ParseIntError> for ParseBotError {
    fn from(err: ParseIntError) -> Self {
        ParseBotError::Number(err)
    }
}

lazy_static! {
    static ref BOT_RE: Regex =
        Regex::new(r"pos=<(-?\d+),(-?\d+),(-?\d+)>, r=(\d+)").unwrap();
}

impl FromStr for Bot {
    type Err = ParseBotError;

    fn from_str(s: &str) -> Result<Bot, ParseBotError> {
        let cap = match BOT_RE.captures(s.trim()) {
            Some(c) => c,
            None => {
                return Err(ParseBotError::Malformed {
                    line: 0,
                    text: s.to_string(),
                })
            }
        };

        let bot = Bot {
            pos: (cap[1].parse()?, cap[2].parse()?, cap[3].parse()?),
            radius: cap[4].parse()?,
        };
        if !bot.within_limits() {
            return Err(ParseBotError::OutOfRange {
                line: 0,
                text: s.to_string(),
            });
        }
        Ok(bot)
    }
}

/// Parse one nanobot per line. Blank lines are ignored; anything else that
/// doesn't look like `pos=<X,Y,Z>, r=R` is an error, as is a bot that
/// reaches past `MAX_REACH`.
pub fn parse_bots(input: &str) -> Result<Vec<Bot>, Error> {
    let mut bots = Vec::new();
    for (i, line) in input.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let bot = Bot::from_str(line).map_err(|err| match err {
            ParseBotError::Malformed { text, .. } => ParseBotError::Malformed { line: i + 1, text },
            ParseBotError::OutOfRange { text, .. } => ParseBotError::OutOfRange { line: i + 1, text },
            other => other,
        })?;
        bots.push(bot);
    }
    Ok(bots)
}

/// The bot with the largest radius. If several share it, the first one in
/// `bots` wins.
pub fn strongest(bots: &[Bot]) -> Option<&Bot> {
    bots.iter().first_max_by_key(|bot| bot.radius)
}

/// Count the bots within range of the strongest bot, including itself.
pub fn in_range_of_strongest(bots: &[Bot]) -> Result<usize, Error> {
    let strongest = strongest(bots).ok_or_else(|| format_err!("no nanobots in input"))?;
    debug!("strongest nanobot: {:?}", strongest);
    Ok(bots.iter().filter(|bot| strongest.covers_bot(bot)).count())
}

/// Number of bots whose range includes `point`.
pub fn coverage(bots: &[Bot], point: Point) -> usize {
    bots.iter().filter(|bot| bot.covers_point(point)).count()
}

#[cfg(test)]
static SMALL_INPUT: &str = include_str!("../data/small.txt");

#[test]
fn test_distance() {
    let a = Bot::new((1, 2, 3), 10);
    let b = Bot::new((2, 3, 5), 10);
    assert_eq!(a.distance(&b), 4);
    assert_eq!(b.distance(&a), 4);
    assert_eq!(a.distance(&a), 0);

    let c = Bot::new((-7, 0, 12), 0);
    assert_eq!(a.distance(&c), c.distance(&a));
    assert_eq!(a.distance(&c), 8 + 2 + 9);
}

#[test]
#[rustfmt::skip]
fn test_covers() {
    let bot1 = Bot::new((0, 0, 0), 4);
    let bot2 = Bot::new((1, 0, 0), 1);
    let bot3 = Bot::new((4, 0, 0), 3);
    let bot4 = Bot::new((0, 2, 0), 1);
    let bot5 = Bot::new((0, 5, 0), 3);
    assert!(bot1.covers_bot(&bot2));
    assert!(bot1.covers_bot(&bot3));
    assert!(bot1.covers_bot(&bot4));
    assert!(!bot1.covers_bot(&bot5));

    for a in &[bot1, bot2, bot3, bot4, bot5] {
        for b in &[bot1, bot2, bot3, bot4, bot5] {
            assert_eq!(a.covers_bot(b), a.distance(b) <= a.radius);
        }
    }

    assert!(bot2.covers_point((1, 0, 1)));
    assert!(!bot2.covers_point((1, 1, 1)));
    assert!(Bot::new((3, 3, 3), 0).covers_point((3, 3, 3)));
}

#[test]
#[rustfmt::skip]
fn test_from_str() -> Result<(), Error> {
    assert_eq!(Bot::from_str("pos=<0,0,0>, r=4")?, Bot::new((0, 0, 0), 4));
    assert_eq!(Bot::from_str("pos=<-12,3,-40>, r=17")?, Bot::new((-12, 3, -40), 17));
    assert_eq!(Bot::from_str("  pos=<95960412,19065138,43707446>, r=72438138\n")?,
               Bot::new((95960412, 19065138, 43707446), 72438138));

    assert!(Bot::from_str("").is_err());
    assert!(Bot::from_str("pos=<1,2>, r=3").is_err());
    assert!(Bot::from_str("pos=<1,2,3>, r=-3").is_err());
    assert!(Bot::from_str("pos=<1,2,99999999999999999999>, r=3").is_err());
    Ok(())
}

#[test]
fn test_parse_bots() -> Result<(), Error> {
    let bots = parse_bots(SMALL_INPUT)?;
    assert_eq!(bots.len(), 9);
    assert_eq!(bots[0], Bot::new((0, 0, 0), 4));
    assert_eq!(bots[8], Bot::new((1, 3, 1), 1));

    assert_eq!(parse_bots("\n\npos=<1,1,1>, r=1\n\n")?, vec![Bot::new((1, 1, 1), 1)]);

    let err = parse_bots("pos=<1,1,1>, r=1\nbogus\n").unwrap_err();
    assert_eq!(err.to_string(), "line 2: not a nanobot: \"bogus\"");
    Ok(())
}

#[test]
fn test_out_of_range() -> Result<(), Error> {
    let err = parse_bots("pos=<9000000000000000000,0,0>, r=1\npos=<-9000000000000000000,0,0>, r=1\n")
        .unwrap_err();
    assert_eq!(err.to_string(),
               "line 1: nanobot reaches too far from the origin: \"pos=<9000000000000000000,0,0>, r=1\"");

    let err = parse_bots("pos=<1,1,1>, r=1\npos=<0,0,0>, r=9223372036854775807\n").unwrap_err();
    assert!(err.to_string().starts_with("line 2: nanobot reaches too far"));

    let edge = format!("pos=<{},0,{}>, r=1", MAX_REACH - 1, -(MAX_REACH - 1));
    assert_eq!(Bot::from_str(&edge)?, Bot::new((MAX_REACH - 1, 0, -(MAX_REACH - 1)), 1));
    assert_eq!(Bot::from_str(&format!("pos=<0,0,0>, r={}", MAX_REACH))?,
               Bot::new((0, 0, 0), MAX_REACH));

    assert!(Bot::from_str(&format!("pos=<{},0,0>, r=1", MAX_REACH)).is_err());
    assert!(Bot::from_str(&format!("pos=<0,{},0>, r=1", -MAX_REACH)).is_err());
    assert!(Bot::from_str(&format!("pos=<0,0,{}>, r=0", i64::MIN)).is_err());
    assert!(!Bot::new((0, 0, 0), -1).within_limits());
    Ok(())
}

#[test]
fn test_in_range_of_strongest() -> Result<(), Error> {
    let bots = parse_bots(SMALL_INPUT)?;
    assert_eq!(strongest(&bots), Some(&Bot::new((0, 0, 0), 4)));
    assert_eq!(in_range_of_strongest(&bots)?, 7);

    // Ties go to the first bot listed.
    let bots = vec![Bot::new((0, 0, 0), 2), Bot::new((10, 0, 0), 2), Bot::new((9, 0, 0), 0)];
    assert_eq!(strongest(&bots), Some(&bots[0]));
    assert_eq!(in_range_of_strongest(&bots)?, 1);

    assert!(in_range_of_strongest(&[]).is_err());
    Ok(())
}

#[test]
fn test_coverage() -> Result<(), Error> {
    let bots = parse_bots(SMALL_INPUT)?;
    assert_eq!(coverage(&bots, (0, 0, 0)), 2);
    assert_eq!(coverage(&bots, (1, 1, 1)), 3);
    assert_eq!(coverage(&bots, (100, 100, 100)), 0);
    Ok(())
}

extern crate clap;
extern crate env_logger;
#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;
extern crate nanobot_search;

use clap::{Parser, ValueEnum};
use failure::Error;
use std::io::Read;
use std::path::PathBuf;

use nanobot_search::bot::{in_range_of_strongest, parse_bots};
use nanobot_search::search::best_point;
use nanobot_search::{SearchConfig, Strategy};

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
enum Part {
    #[value(name = "1")]
    One,
    #[value(name = "2")]
    Two,
    #[value(name = "both")]
    Both,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliStrategy {
    #[value(name = "exhaustive")]
    Exhaustive,
    #[value(name = "first-candidate")]
    FirstCandidate,
}

impl From<CliStrategy> for Strategy {
    fn from(value: CliStrategy) -> Self {
        match value {
            CliStrategy::Exhaustive => Strategy::Exhaustive,
            CliStrategy::FirstCandidate => Strategy::FirstCandidate,
        }
    }
}

/// Find the strongest nanobot's reach, and the point in range of the most
/// nanobots.
#[derive(Parser, Debug)]
#[command(name = "nanobots", version, about)]
struct Cli {
    /// Nanobot list, one `pos=<X,Y,Z>, r=R` per line. Reads stdin if omitted.
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Which answer to print
    #[arg(long, value_enum, default_value_t = Part::Both)]
    part: Part,

    /// Scan regions point by point once they hold fewer points than this
    #[arg(long)]
    threshold: Option<u64>,

    /// How the octree search picks regions to scan
    #[arg(long, value_enum, default_value_t = CliStrategy::Exhaustive)]
    strategy: CliStrategy,
}

fn read_input(path: &Option<PathBuf>) -> Result<String, Error> {
    let mut input = String::new();
    match path {
        Some(path) => {
            input = std::fs::read_to_string(path)
                .map_err(|err| format_err!("{}: {}", path.display(), err))?;
        }
        None => {
            let stdin = std::io::stdin();
            stdin.lock().read_to_string(&mut input)?;
        }
    }
    Ok(input)
}

fn run(cli: Cli) -> Result<(), Error> {
    let bots = parse_bots(&read_input(&cli.input)?)?;
    info!("read {} nanobots", bots.len());

    if cli.part != Part::Two {
        println!("Nanobots in range of the strongest: {}", in_range_of_strongest(&bots)?);
    }

    if cli.part != Part::One {
        let mut config = SearchConfig {
            strategy: Strategy::from(cli.strategy),
            ..SearchConfig::default()
        };
        if let Some(threshold) = cli.threshold {
            config.threshold = threshold as i128;
        }
        info!("searching with the {} strategy, threshold {}", config.strategy, config.threshold);

        let best = best_point(&bots, &config)?;
        println!(
            "Best point: <{},{},{}>, in range of {} nanobots",
            best.point.0, best.point.1, best.point.2, best.count
        );
        println!("Distance from origin: {}", best.distance);
    }

    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}

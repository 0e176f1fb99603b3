#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use perc::PercolationStats;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::num::NonZeroUsize;

////////////////////////////////////////////////////////////////////////////////

/// Estimates the percolation threshold of an N-by-N grid.
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Arguments {
    /// Grid dimension.
    size: NonZeroUsize,

    /// Number of independent trials.
    trials: NonZeroUsize,

    /// Master seed. Drawn from OS entropy when omitted.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Run every trial on the main thread.
    #[arg(long)]
    sequential: bool,

    /// 0 = error, 1 = warn, 2 = info, 3 = debug (one line per trial), 4 = trace.
    #[arg(short, long, default_value_t = 2)]
    log_level: usize,
}

fn level_filter(log_level: usize) -> LevelFilter {
    match log_level {
        0 => LevelFilter::Error,
        1 => LevelFilter::Warn,
        2 => LevelFilter::Info,
        3 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn main() -> Result<()> {
    let args = Arguments::parse();

    TermLogger::init(
        level_filter(args.log_level),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .context("failed to initialize logger")?;

    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("seed: {seed}");

    let (size, trials) = (args.size.get(), args.trials.get());
    let stats = if args.sequential {
        PercolationStats::run_seeded_sequential(size, trials, seed)
    } else {
        PercolationStats::run_seeded(size, trials, seed)
    }
    .with_context(|| format!("failed to run {trials} trials on a {size}x{size} grid"))?;

    println!("mean                    = {:.6}", stats.mean());
    println!("stddev                  = {:.6}", stats.stddev());
    println!(
        "95% confidence interval = [{:.6}, {:.6}]",
        stats.confidence_lo(),
        stats.confidence_hi()
    );

    Ok(())
}

////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod test {
    use super::*;

    use clap::error::ErrorKind;

    #[test]
    fn positional_arguments() {
        let args = Arguments::try_parse_from(["perc-stats", "20", "30", "--seed", "5"]).unwrap();
        assert_eq!(args.size.get(), 20);
        assert_eq!(args.trials.get(), 30);
        assert_eq!(args.seed, Some(5));
        assert!(!args.sequential);
        assert_eq!(args.log_level, 2);
    }

    #[test]
    fn rejects_zero() {
        for argv in [["perc-stats", "0", "10"], ["perc-stats", "10", "0"]] {
            let err = Arguments::try_parse_from(argv).err().unwrap();
            assert_eq!(err.kind(), ErrorKind::ValueValidation);
        }
    }

    #[test]
    fn rejects_non_numeric() {
        for argv in [["perc-stats", "abc", "10"], ["perc-stats", "10", "-3"]] {
            assert!(Arguments::try_parse_from(argv).is_err());
        }
    }

    #[test]
    fn requires_both_arguments() {
        let err = Arguments::try_parse_from(["perc-stats", "10"]).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn log_levels() {
        assert_eq!(level_filter(0), LevelFilter::Error);
        assert_eq!(level_filter(3), LevelFilter::Debug);
        assert_eq!(level_filter(9), LevelFilter::Trace);
    }
}

use std::time::{Duration, Instant};

use rand::{rngs::StdRng, Rng, SeedableRng};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{
    error::{Error, Result},
    grid::PercolationGrid,
    stats::{self, CONFIDENCE_95},
};

////////////////////////////////////////////////////////////////////////////////

/// Outcome of a single trial.
#[derive(Debug, Clone)]
pub struct TrialRecord {
    /// Sites opened when the grid first percolated.
    pub opened: usize,
    /// Total number of sites in the grid.
    pub sites: usize,
    pub elapsed: Duration,
}

impl TrialRecord {
    pub fn fraction(&self) -> f64 {
        self.opened as f64 / self.sites as f64
    }
}

/// Opens uniformly random blocked sites of a fresh `size`-by-`size` grid until
/// it percolates.
pub fn run_trial<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Result<TrialRecord> {
    let started = Instant::now();
    let mut grid = PercolationGrid::new(size)?;

    while !grid.percolates() {
        let (row, col) = loop {
            let row = rng.gen_range(1..=size);
            let col = rng.gen_range(1..=size);
            if !grid.is_open(row, col)? {
                break (row, col);
            }
        };
        grid.open(row, col)?;
    }

    log::trace!("percolated after {} sites:\n{}", grid.open_sites(), grid);

    Ok(TrialRecord {
        opened: grid.open_sites(),
        sites: size * size,
        elapsed: started.elapsed(),
    })
}

////////////////////////////////////////////////////////////////////////////////

/// Percolation threshold estimate over a number of independent trials.
///
/// All statistics are computed once, after every trial has been recorded.
#[derive(Debug, Clone)]
pub struct PercolationStats {
    size: usize,
    trials: Vec<TrialRecord>,
    mean: f64,
    stddev: f64,
    elapsed: Duration,
}

impl PercolationStats {
    /// Runs `trials` trials on `size`-by-`size` grids, drawing every site from
    /// `rng`.
    pub fn run<R: Rng + ?Sized>(size: usize, trials: usize, rng: &mut R) -> Result<Self> {
        validate(size, trials)?;

        let started = Instant::now();
        let records = (0..trials)
            .map(|index| run_trial(size, &mut *rng).inspect(|record| log_trial(index, record)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::from_trials(size, records, started.elapsed()))
    }

    /// Runs every trial with its own generator, seeded from a master generator
    /// seeded with `seed`. Trials are spread over the rayon pool; the result
    /// is the same as with [`run_seeded_sequential`](Self::run_seeded_sequential).
    #[cfg(feature = "parallel")]
    pub fn run_seeded(size: usize, trials: usize, seed: u64) -> Result<Self> {
        validate(size, trials)?;

        let started = Instant::now();
        let records = trial_seeds(trials, seed)
            .into_par_iter()
            .enumerate()
            .map(|(index, seed)| {
                run_trial(size, &mut StdRng::seed_from_u64(seed))
                    .inspect(|record| log_trial(index, record))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::from_trials(size, records, started.elapsed()))
    }

    #[cfg(not(feature = "parallel"))]
    pub fn run_seeded(size: usize, trials: usize, seed: u64) -> Result<Self> {
        Self::run_seeded_sequential(size, trials, seed)
    }

    /// Runs every trial on the calling thread with its own generator, seeded
    /// from a master generator seeded with `seed`.
    pub fn run_seeded_sequential(size: usize, trials: usize, seed: u64) -> Result<Self> {
        validate(size, trials)?;

        let started = Instant::now();
        let records = trial_seeds(trials, seed)
            .into_iter()
            .enumerate()
            .map(|(index, seed)| {
                run_trial(size, &mut StdRng::seed_from_u64(seed))
                    .inspect(|record| log_trial(index, record))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::from_trials(size, records, started.elapsed()))
    }

    fn from_trials(size: usize, trials: Vec<TrialRecord>, elapsed: Duration) -> Self {
        log::info!(
            "{} trials on a {size}x{size} grid took {elapsed:?}",
            trials.len()
        );

        let fractions: Vec<f64> = trials.iter().map(TrialRecord::fraction).collect();
        Self {
            size,
            mean: stats::mean(&fractions),
            stddev: stats::stddev(&fractions),
            trials,
            elapsed,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn trials(&self) -> &[TrialRecord] {
        &self.trials
    }

    /// Total wall time of all trials.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Sample mean of the percolation threshold.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Sample standard deviation of the percolation threshold, NaN after a
    /// single trial.
    pub fn stddev(&self) -> f64 {
        self.stddev
    }

    /// Lower bound of the 95% confidence interval.
    pub fn confidence_lo(&self) -> f64 {
        self.mean - self.half_width()
    }

    /// Upper bound of the 95% confidence interval.
    pub fn confidence_hi(&self) -> f64 {
        self.mean + self.half_width()
    }

    fn half_width(&self) -> f64 {
        CONFIDENCE_95 * self.stddev / (self.trials.len() as f64).sqrt()
    }
}

fn validate(size: usize, trials: usize) -> Result<()> {
    if size == 0 {
        return Err(Error::invalid_argument("size", format!("must be positive, got {size}")));
    }
    if trials == 0 {
        return Err(Error::invalid_argument("trials", format!("must be positive, got {trials}")));
    }
    Ok(())
}

fn trial_seeds(trials: usize, seed: u64) -> Vec<u64> {
    let mut master = StdRng::seed_from_u64(seed);
    (0..trials).map(|_| master.gen()).collect()
}

fn log_trial(index: usize, record: &TrialRecord) {
    log::debug!(
        "trial {index:04}: {:.6} ({}/{}) in {:?}",
        record.fraction(),
        record.opened,
        record.sites,
        record.elapsed
    );
}

////////////////////////////////////////////////////////////////////////////////

/// Two-sided 95% quantile of the standard normal distribution.
pub const CONFIDENCE_95: f64 = 1.96;

/// Arithmetic mean. NaN for an empty slice.
pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return f64::NAN;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Sample standard deviation (`n - 1` denominator). NaN for fewer than two
/// samples.
pub fn stddev(samples: &[f64]) -> f64 {
    if samples.len() < 2 {
        return f64::NAN;
    }
    let mean = mean(samples);
    let sum_of_squares: f64 = samples.iter().map(|x| (x - mean).powi(2)).sum();
    (sum_of_squares / (samples.len() - 1) as f64).sqrt()
}

////////////////////////////////////////////////////////////////////////////////

//! Mean and dispersion of plain `f64` samples.

use crate::error::EvaluationError;

/// Arithmetic mean and sample standard deviation of a dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spread {
    pub mean: f64,
    /// Standard deviation with Bessel's correction (`n - 1` denominator).
    pub std_dev: f64,
}

impl Spread {
    /// Two-pass mean and sample standard deviation.
    ///
    /// Fails with [`EvaluationError::InsufficientSampleSize`] for fewer than
    /// two values, where the corrected variance is undefined.
    pub fn sample(values: &[f64]) -> Result<Spread, EvaluationError> {
        let count = values.len();
        if count < 2 {
            return Err(EvaluationError::InsufficientSampleSize { count });
        }
        let n = count as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
        Ok(Spread { mean, std_dev: variance.sqrt() })
    }
}

/// `mean(|x - center|)`; zero for an empty slice.
pub fn mean_abs_deviation(values: &[f64], center: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|v| (v - center).abs()).sum::<f64>() / values.len() as f64
}

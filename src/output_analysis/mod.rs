//! The output analysis module reduces simulation state into published
//! measures.  `NetworkMetrics` and `StationMetrics` hold the queueing
//! measures of a single run.  Measures gathered over independent
//! replications are analyzed with the `IndependentSample`.

use num_traits::Float;
use serde::{Deserialize, Serialize};

pub mod metrics;
pub mod t_scores;

pub use self::metrics::{NetworkMetrics, StationMetrics};
use crate::utils::errors::SimulationError;

fn usize_to_float<T: Float>(unconv: usize) -> Result<T, SimulationError> {
    T::from(unconv).ok_or(SimulationError::InvalidModelState)
}

/// The confidence interval provides an upper and lower estimate on the mean
/// of a replicated measure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfidenceInterval<T: Float> {
    lower: T,
    upper: T,
}

impl<T: Float> ConfidenceInterval<T> {
    pub fn lower(&self) -> T {
        self.lower
    }

    pub fn upper(&self) -> T {
        self.upper
    }

    pub fn half_width(&self) -> T {
        (self.upper - self.lower) / (T::one() + T::one())
    }

    pub fn contains(&self, value: T) -> bool {
        self.lower <= value && value <= self.upper
    }
}

/// The independent sample is for independent, identically-distributed (IID)
/// points, such as one measure taken from each of several replications.
/// The sample variance uses the unbiased (n - 1) denominator.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct IndependentSample<T> {
    points: Vec<T>,
    mean: T,
    variance: T,
}

impl<T: Float> IndependentSample<T> {
    /// Create an `IndependentSample` from at least one point.
    pub fn post(points: Vec<T>) -> Result<IndependentSample<T>, SimulationError> {
        if points.is_empty() {
            return Err(SimulationError::InvalidModelState);
        }
        let count: T = usize_to_float(points.len())?;
        let mean = points.iter().fold(T::zero(), |sum, point| sum + *point) / count;
        let variance = if points.len() > 1 {
            points
                .iter()
                .fold(T::zero(), |acc, point| acc + (*point - mean).powi(2))
                / (count - T::one())
        } else {
            T::zero()
        };
        Ok(IndependentSample {
            points,
            mean,
            variance,
        })
    }

    /// Calculate the confidence interval of the mean, at significance
    /// level `alpha`.
    pub fn confidence_interval_mean(
        &self,
        alpha: f64,
    ) -> Result<ConfidenceInterval<T>, SimulationError> {
        if self.points.len() == 1 {
            return Ok(ConfidenceInterval {
                lower: self.mean,
                upper: self.mean,
            });
        }
        let points_len: T = usize_to_float(self.points.len())?;
        let t_score = T::from(t_scores::t_score(alpha, self.points.len() - 1))
            .ok_or(SimulationError::InvalidModelState)?;
        let half_width = t_score * (self.variance / points_len).sqrt();
        Ok(ConfidenceInterval {
            lower: self.mean - half_width,
            upper: self.mean + half_width,
        })
    }

    pub fn point_estimate_mean(&self) -> T {
        self.mean
    }

    pub fn variance(&self) -> T {
        self.variance
    }
}

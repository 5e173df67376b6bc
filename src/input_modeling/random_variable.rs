//! Random variables drive the stochastic behavior of the network.  The
//! exponential distribution supplies interarrival and service times, and
//! the uniform distribution supplies routing draws.

use rand::distributions::Distribution;
use rand_distr::{Exp, Uniform};
use serde::{Deserialize, Serialize};

use super::UniformRNG;
use crate::utils::errors::SimulationError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Continuous {
    Exp { lambda: f64 },
    /// Range is inclusive of min, exclusive of max: [min, max)
    Uniform { min: f64, max: f64 },
}

impl Continuous {
    /// The generation of random variates drives stochastic behaviors during
    /// simulation execution.  This function requires the random number
    /// generator of the simulation, and produces a f64 random variate.
    pub fn random_variate(&self, uniform_rng: &mut UniformRNG) -> Result<f64, SimulationError> {
        match self {
            Continuous::Exp { lambda } => Ok(Exp::new(*lambda)?.sample(uniform_rng.rng())),
            Continuous::Uniform { min, max } => {
                Ok(Uniform::new(*min, *max).sample(uniform_rng.rng()))
            }
        }
    }

    /// The mean of the distribution.
    pub fn mean(&self) -> f64 {
        match self {
            Continuous::Exp { lambda } => 1.0 / lambda,
            Continuous::Uniform { min, max } => (min + max) / 2.0,
        }
    }
}

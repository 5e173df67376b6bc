use serde::{Deserialize, Serialize};

use crate::input_modeling::uniform_rng::DEFAULT_SEED;
use crate::models::StationId;
use crate::utils::errors::SimulationError;

/// The immutable parameters of a tandem network run.  Missing fields take
/// their defaults when parsed from YAML or JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Rate of the network's external (Poisson) arrival process
    pub inter_arrival_rate: f64,
    pub mu_1: f64,
    pub mu_2: f64,
    pub mu_3: f64,
    /// Probability that a station 1 departure routes to station 2, rather
    /// than station 3
    pub p_route_to_station_2: f64,
    /// Horizon at which the run halts
    pub simulation_time: f64,
    pub random_seed: u64,
    pub store_records: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inter_arrival_rate: 1.0,
            mu_1: 2.0,
            mu_2: 4.0,
            mu_3: 3.0,
            p_route_to_station_2: 0.4,
            simulation_time: 1000.0,
            random_seed: DEFAULT_SEED,
            store_records: false,
        }
    }
}

fn positive_rate(parameter: &'static str, rate: f64) -> Result<(), SimulationError> {
    if rate.is_finite() && rate > 0.0 {
        Ok(())
    } else {
        Err(SimulationError::InvalidConfiguration {
            parameter,
            reason: format!("rate must be positive and finite, found {}", rate),
        })
    }
}

impl Config {
    pub fn from_yaml(config: &str) -> Result<Self, SimulationError> {
        Ok(serde_yaml::from_str(config)?)
    }

    pub fn from_json(config: &str) -> Result<Self, SimulationError> {
        Ok(serde_json::from_str(config)?)
    }

    /// Reject configurations that cannot be simulated.  A zero horizon is
    /// allowed, and produces an empty run.
    pub fn validate(&self) -> Result<(), SimulationError> {
        positive_rate("interArrivalRate", self.inter_arrival_rate)?;
        positive_rate("mu1", self.mu_1)?;
        positive_rate("mu2", self.mu_2)?;
        positive_rate("mu3", self.mu_3)?;
        if !(0.0..=1.0).contains(&self.p_route_to_station_2) {
            return Err(SimulationError::InvalidConfiguration {
                parameter: "pRouteToStation2",
                reason: format!(
                    "probability must be within [0, 1], found {}",
                    self.p_route_to_station_2
                ),
            });
        }
        if !self.simulation_time.is_finite() || self.simulation_time < 0.0 {
            return Err(SimulationError::InvalidConfiguration {
                parameter: "simulationTime",
                reason: format!(
                    "horizon must be non-negative and finite, found {}",
                    self.simulation_time
                ),
            });
        }
        Ok(())
    }

    pub fn service_rate(&self, station: StationId) -> f64 {
        match station {
            StationId::One => self.mu_1,
            StationId::Two => self.mu_2,
            StationId::Three => self.mu_3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_fields_are_camel_case() -> Result<(), SimulationError> {
        let config = Config::from_yaml(
            r#"
interArrivalRate: 0.5
mu1: 1.5
mu2: 2.5
mu3: 3.5
pRouteToStation2: 0.25
simulationTime: 200.0
randomSeed: 7
"#,
        )?;
        assert_eq!(config.inter_arrival_rate, 0.5);
        assert_eq!(config.service_rate(StationId::One), 1.5);
        assert_eq!(config.service_rate(StationId::Two), 2.5);
        assert_eq!(config.service_rate(StationId::Three), 3.5);
        assert_eq!(config.p_route_to_station_2, 0.25);
        assert_eq!(config.simulation_time, 200.0);
        assert_eq!(config.random_seed, 7);
        assert!(!config.store_records);
        config.validate()
    }

    #[test]
    fn missing_json_fields_take_defaults() -> Result<(), SimulationError> {
        let config = Config::from_json(r#"{ "simulationTime": 10.0 }"#)?;
        assert_eq!(
            config,
            Config {
                simulation_time: 10.0,
                ..Config::default()
            }
        );
        Ok(())
    }

    #[test]
    fn non_positive_rates_are_rejected() {
        let config = Config {
            mu_2: 0.0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SimulationError::InvalidConfiguration {
                parameter: "mu2",
                ..
            })
        ));
        let config = Config {
            inter_arrival_rate: f64::NAN,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn horizon_and_probability_are_bounded() {
        let config = Config {
            simulation_time: -1.0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SimulationError::InvalidConfiguration {
                parameter: "simulationTime",
                ..
            })
        ));
        let config = Config {
            p_route_to_station_2: 1.5,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SimulationError::InvalidConfiguration {
                parameter: "pRouteToStation2",
                ..
            })
        ));
        let config = Config {
            simulation_time: 0.0,
            ..Config::default()
        };
        assert!(config.validate().is_ok());
    }
}

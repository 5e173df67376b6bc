//! The models module provides the queueing stations of the tandem network
//! and the customer flow that moves through them.  Customers always visit
//! station 1, and are then routed to either station 2 or station 3.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::utils::errors::SimulationError;

pub mod customer;
pub mod station;

pub use self::customer::{Customer, CustomerFlow, CustomerId, FlowStep, Phase};
pub use self::station::{Station, StationAction, StationRecord, StationStatistics};

/// Identifies one of the three stations.  Serialized as `"1"`, `"2"` and
/// `"3"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StationId {
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
}

impl StationId {
    pub const ALL: [StationId; 3] = [StationId::One, StationId::Two, StationId::Three];

    pub fn index(self) -> usize {
        match self {
            StationId::One => 0,
            StationId::Two => 1,
            StationId::Three => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StationId::One => "1",
            StationId::Two => "2",
            StationId::Three => "3",
        }
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StationId {
    type Err = SimulationError;

    fn from_str(id: &str) -> Result<Self, Self::Err> {
        match id {
            "1" => Ok(StationId::One),
            "2" => Ok(StationId::Two),
            "3" => Ok(StationId::Three),
            _ => Err(SimulationError::StationNotFound),
        }
    }
}

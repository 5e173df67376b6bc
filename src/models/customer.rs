use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::StationId;
use crate::input_modeling::ContinuousRandomVariable;
use crate::simulator::Services;
use crate::utils::errors::SimulationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CustomerId(u64);

impl CustomerId {
    pub fn new(index: u64) -> Self {
        Self(index)
    }

    pub fn index(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "customer {}", self.0)
    }
}

/// Where a customer is in its trip through the network.  A customer waits
/// for and receives service at station 1, is routed, then waits for and
/// receives service at station 2 or 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    AwaitingServer(StationId),
    InService(StationId),
    Routing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: CustomerId,
    pub arrival_time: f64,
    pub phase: Phase,
}

/// What a customer does after leaving a station.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowStep {
    Route,
    Exit,
}

/// The customer flow generates external arrivals and moves each customer
/// through the network.  It owns the routing decision, and refers to
/// stations by id without owning them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerFlow {
    interarrival_time: ContinuousRandomVariable,
    routing_draw: ContinuousRandomVariable,
    route_to_station_2: f64,
    #[serde(default)]
    state: State,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct State {
    next_index: u64,
    active: BTreeMap<CustomerId, Customer>,
    exited: usize,
    cumulative_sojourn_time: f64,
}

impl CustomerFlow {
    pub fn new(inter_arrival_rate: f64, route_to_station_2: f64) -> Self {
        Self {
            interarrival_time: ContinuousRandomVariable::Exp {
                lambda: inter_arrival_rate,
            },
            routing_draw: ContinuousRandomVariable::Uniform { min: 0.0, max: 1.0 },
            route_to_station_2,
            state: State::default(),
        }
    }

    pub fn next_interarrival(&self, services: &mut Services) -> Result<f64, SimulationError> {
        self.interarrival_time.random_variate(services.uniform_rng())
    }

    /// A new customer enters the network, headed for station 1.
    pub fn spawn(&mut self, services: &Services) -> CustomerId {
        self.state.next_index += 1;
        let id = CustomerId::new(self.state.next_index);
        self.state.active.insert(
            id,
            Customer {
                id,
                arrival_time: services.global_time(),
                phase: Phase::AwaitingServer(StationId::One),
            },
        );
        id
    }

    /// The customer has been granted the server at `station`.
    pub fn enter_service(
        &mut self,
        customer: CustomerId,
        station: StationId,
    ) -> Result<(), SimulationError> {
        self.transition(customer, Phase::AwaitingServer(station), Phase::InService(station))
    }

    /// The customer has completed service at `station`.  Station 1
    /// departures move on to routing, and departures from station 2 or 3
    /// leave the network, adding their time since arrival to the network
    /// sojourn total.
    pub fn depart(
        &mut self,
        customer: CustomerId,
        station: StationId,
        services: &Services,
    ) -> Result<FlowStep, SimulationError> {
        match station {
            StationId::One => {
                self.transition(customer, Phase::InService(station), Phase::Routing)?;
                Ok(FlowStep::Route)
            }
            StationId::Two | StationId::Three => {
                let current = self.phase(customer)?;
                if current != Phase::InService(station) {
                    return Err(SimulationError::InvalidModelState);
                }
                let exiting = self
                    .state
                    .active
                    .remove(&customer)
                    .ok_or(SimulationError::CustomerNotFound)?;
                let sojourn_time = services.global_time() - exiting.arrival_time;
                self.state.cumulative_sojourn_time += sojourn_time;
                self.state.exited += 1;
                debug!(%customer, time = services.global_time(), sojourn_time, "Exited");
                Ok(FlowStep::Exit)
            }
        }
    }

    /// Draw the routing decision for a customer leaving station 1: station
    /// 2 with the configured probability, station 3 otherwise.
    pub fn route(
        &mut self,
        customer: CustomerId,
        services: &mut Services,
    ) -> Result<StationId, SimulationError> {
        let draw = self.routing_draw.random_variate(services.uniform_rng())?;
        let next = if draw < self.route_to_station_2 {
            StationId::Two
        } else {
            StationId::Three
        };
        self.transition(customer, Phase::Routing, Phase::AwaitingServer(next))?;
        debug!(%customer, time = services.global_time(), draw, station = %next, "Routed");
        Ok(next)
    }

    fn phase(&self, customer: CustomerId) -> Result<Phase, SimulationError> {
        self.state
            .active
            .get(&customer)
            .map(|active| active.phase)
            .ok_or(SimulationError::CustomerNotFound)
    }

    fn transition(
        &mut self,
        customer: CustomerId,
        from: Phase,
        to: Phase,
    ) -> Result<(), SimulationError> {
        let active = self
            .state
            .active
            .get_mut(&customer)
            .ok_or(SimulationError::CustomerNotFound)?;
        if active.phase != from {
            return Err(SimulationError::InvalidModelState);
        }
        active.phase = to;
        Ok(())
    }

    pub fn customer(&self, customer: CustomerId) -> Option<&Customer> {
        self.state.active.get(&customer)
    }

    /// Customers currently in the network.
    pub fn active(&self) -> usize {
        self.state.active.len()
    }

    /// Customers generated so far.
    pub fn generated(&self) -> u64 {
        self.state.next_index
    }

    /// Customers that completed their second station.
    pub fn exited(&self) -> usize {
        self.state.exited
    }

    /// Mean time from arrival at station 1 to departure from station 2 or
    /// 3, over the customers that have exited.  Zero before any exit.
    pub fn average_sojourn_time(&self) -> f64 {
        if self.state.exited == 0 {
            0.0
        } else {
            self.state.cumulative_sojourn_time / self.state.exited as f64
        }
    }
}

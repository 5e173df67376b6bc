use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::{CustomerId, StationId};
use crate::input_modeling::ContinuousRandomVariable;
use crate::simulator::Services;
use crate::utils::errors::SimulationError;

/// The station is a single-server queueing stage.  Arriving customers join
/// a FIFO line and are granted the server one at a time.  Service times are
/// drawn from the station's service time distribution (exponential in the
/// tandem network).
///
/// Alongside the queueing state, the station integrates the number of
/// waiting customers and the server busy indicator over simulated time.
/// These areas are always closed out under the state that held during the
/// elapsed interval, before any counter changes, so they divide by the
/// horizon into time-average queue length and utilization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    id: StationId,
    service_time: ContinuousRandomVariable,
    #[serde(default)]
    store_records: bool,
    #[serde(default)]
    state: State,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct State {
    holder: Option<CustomerId>,
    waiters: VecDeque<CustomerId>,
    server_busy: bool,
    queue_length: usize,
    waiting_arrival_timestamps: VecDeque<f64>,
    arrivals: usize,
    customers_serviced: usize,
    departures: usize,
    cumulative_delay: f64,
    cumulative_service_time: f64,
    area_under_busy: f64,
    area_under_queue: f64,
    last_event_time: f64,
    records: Vec<StationRecord>,
}

/// A point-in-time copy of a station's counters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationStatistics {
    pub server_busy: bool,
    /// Customers that have arrived but not yet started service.
    pub queue_length: usize,
    pub arrivals: usize,
    /// Customers that have started service.
    pub customers_serviced: usize,
    /// Customers that have completed service.
    pub departures: usize,
    pub cumulative_delay: f64,
    pub cumulative_service_time: f64,
    pub area_under_busy: f64,
    pub area_under_queue: f64,
    pub last_event_time: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StationAction {
    Arrival,
    ServiceStart,
    Departure,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationRecord {
    pub time: f64,
    pub action: StationAction,
    pub customer: CustomerId,
}

impl Station {
    pub fn new(id: StationId, service_rate: f64, store_records: bool) -> Self {
        Self {
            id,
            service_time: ContinuousRandomVariable::Exp {
                lambda: service_rate,
            },
            store_records,
            state: State::default(),
        }
    }

    pub fn id(&self) -> StationId {
        self.id
    }

    /// A customer joins the line.  If the server is free, the customer is
    /// granted it and returned, and the caller schedules the service start.
    /// Otherwise the customer waits for a departure to hand the server over.
    pub fn arrive(&mut self, customer: CustomerId, services: &Services) -> Option<CustomerId> {
        let now = services.global_time();
        self.state.waiting_arrival_timestamps.push_back(now);
        self.integrate_statistics(now);
        self.state.queue_length += 1;
        self.state.arrivals += 1;
        self.record(now, StationAction::Arrival, customer);
        debug!(
            station = %self.id,
            %customer,
            time = now,
            queue_length = self.state.queue_length,
            "Arrival"
        );
        self.request_server(customer)
    }

    /// The customer holding the server begins service.  The oldest waiting
    /// arrival timestamp is charged as this customer's delay, and the
    /// sampled service duration is returned.
    pub fn start_service(
        &mut self,
        customer: CustomerId,
        services: &mut Services,
    ) -> Result<f64, SimulationError> {
        if self.state.holder != Some(customer) {
            return Err(SimulationError::InvalidModelState);
        }
        let now = services.global_time();
        self.integrate_statistics(now);
        let arrival_time = self
            .state
            .waiting_arrival_timestamps
            .pop_front()
            .ok_or(SimulationError::InvalidModelState)?;
        self.state.queue_length = self
            .state
            .queue_length
            .checked_sub(1)
            .ok_or(SimulationError::InvalidModelState)?;
        self.state.server_busy = true;
        self.state.cumulative_delay += now - arrival_time;
        self.state.customers_serviced += 1;
        self.record(now, StationAction::ServiceStart, customer);
        let service_time = self.service_time.random_variate(services.uniform_rng())?;
        debug!(
            station = %self.id,
            %customer,
            time = now,
            delay = now - arrival_time,
            service_time,
            "Service start"
        );
        Ok(service_time)
    }

    /// The customer holding the server finishes service and releases it.
    /// The next waiting customer, if any, is granted the server and
    /// returned so the caller can schedule its service start.
    pub fn complete_service(
        &mut self,
        customer: CustomerId,
        service_time: f64,
        services: &Services,
    ) -> Result<Option<CustomerId>, SimulationError> {
        if self.state.holder != Some(customer) {
            return Err(SimulationError::InvalidModelState);
        }
        let now = services.global_time();
        self.integrate_statistics(now);
        self.state.cumulative_service_time += service_time;
        self.state.departures += 1;
        self.record(now, StationAction::Departure, customer);
        debug!(station = %self.id, %customer, time = now, "Departure");
        Ok(self.release_server())
    }

    fn request_server(&mut self, customer: CustomerId) -> Option<CustomerId> {
        match self.state.holder {
            None => {
                self.state.holder = Some(customer);
                Some(customer)
            }
            Some(_) => {
                self.state.waiters.push_back(customer);
                None
            }
        }
    }

    fn release_server(&mut self) -> Option<CustomerId> {
        self.state.holder = self.state.waiters.pop_front();
        if self.state.queue_length == 0 {
            self.state.server_busy = false;
        }
        self.state.holder
    }

    /// Close out the interval since the last update under the state that
    /// held during it.
    fn integrate_statistics(&mut self, now: f64) {
        let time_since_last_event = now - self.state.last_event_time;
        if self.state.server_busy {
            self.state.area_under_busy += time_since_last_event;
        }
        self.state.area_under_queue += time_since_last_event * self.state.queue_length as f64;
        self.state.last_event_time = now;
        trace!(
            station = %self.id,
            time = now,
            area_under_busy = self.state.area_under_busy,
            area_under_queue = self.state.area_under_queue,
            "Statistics integrated"
        );
    }

    fn record(&mut self, time: f64, action: StationAction, customer: CustomerId) {
        if self.store_records {
            self.state.records.push(StationRecord {
                time,
                action,
                customer,
            });
        }
    }

    pub fn statistics(&self) -> StationStatistics {
        StationStatistics {
            server_busy: self.state.server_busy,
            queue_length: self.state.queue_length,
            arrivals: self.state.arrivals,
            customers_serviced: self.state.customers_serviced,
            departures: self.state.departures,
            cumulative_delay: self.state.cumulative_delay,
            cumulative_service_time: self.state.cumulative_service_time,
            area_under_busy: self.state.area_under_busy,
            area_under_queue: self.state.area_under_queue,
            last_event_time: self.state.last_event_time,
        }
    }

    pub fn status(&self) -> String {
        if self.state.server_busy {
            String::from("Busy")
        } else {
            String::from("Idle")
        }
    }

    pub fn records(&self) -> &Vec<StationRecord> {
        &self.state.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn services_at(services: &mut Services, time: f64) -> &mut Services {
        services.set_global_time(time);
        services
    }

    #[test]
    fn idle_server_is_granted_on_arrival() -> Result<(), SimulationError> {
        let mut services = Services::default();
        let mut station = Station::new(StationId::One, 2.0, true);
        let customer = CustomerId::new(1);
        assert_eq!(
            station.arrive(customer, services_at(&mut services, 1.0)),
            Some(customer)
        );
        let service_time = station.start_service(customer, &mut services)?;
        assert!(service_time > 0.0);
        let statistics = station.statistics();
        assert!(statistics.server_busy);
        assert_eq!(statistics.queue_length, 0);
        assert_eq!(statistics.customers_serviced, 1);
        assert_eq!(statistics.cumulative_delay, 0.0);
        assert_eq!(statistics.area_under_queue, 0.0);
        assert_eq!(station.status(), "Busy");
        Ok(())
    }

    #[test]
    fn areas_follow_the_state_of_each_interval() -> Result<(), SimulationError> {
        let mut services = Services::default();
        let mut station = Station::new(StationId::One, 2.0, false);
        let first = CustomerId::new(1);
        let second = CustomerId::new(2);

        // First customer arrives at 1.0 and is served over [1.0, 4.0)
        station.arrive(first, services_at(&mut services, 1.0));
        station.start_service(first, &mut services)?;
        // Second customer waits over [2.0, 4.0)
        assert_eq!(station.arrive(second, services_at(&mut services, 2.0)), None);
        let granted = station.complete_service(first, 3.0, services_at(&mut services, 4.0))?;
        assert_eq!(granted, Some(second));
        station.start_service(second, &mut services)?;
        // Second customer is served over [4.0, 4.5)
        let granted = station.complete_service(second, 0.5, services_at(&mut services, 4.5))?;
        assert_eq!(granted, None);

        let statistics = station.statistics();
        assert_eq!(statistics.area_under_busy, 3.5);
        assert_eq!(statistics.area_under_queue, 2.0);
        assert_eq!(statistics.cumulative_delay, 2.0);
        assert_eq!(statistics.cumulative_service_time, 3.5);
        assert_eq!(statistics.customers_serviced, 2);
        assert_eq!(statistics.departures, 2);
        assert!(!statistics.server_busy);
        assert_eq!(station.status(), "Idle");
        Ok(())
    }

    #[test]
    fn server_stays_busy_while_customers_wait() -> Result<(), SimulationError> {
        let mut services = Services::default();
        let mut station = Station::new(StationId::Two, 4.0, false);
        let first = CustomerId::new(1);
        let second = CustomerId::new(2);
        station.arrive(first, services_at(&mut services, 0.5));
        station.start_service(first, &mut services)?;
        station.arrive(second, services_at(&mut services, 0.6));
        station.complete_service(first, 0.2, services_at(&mut services, 0.7))?;
        assert!(station.statistics().server_busy);
        Ok(())
    }

    #[test]
    fn only_the_holder_may_use_the_server() {
        let mut services = Services::default();
        let mut station = Station::new(StationId::Three, 3.0, false);
        let first = CustomerId::new(1);
        let second = CustomerId::new(2);
        station.arrive(first, &services);
        station.arrive(second, &services);
        assert!(matches!(
            station.start_service(second, &mut services),
            Err(SimulationError::InvalidModelState)
        ));
        assert!(matches!(
            station.complete_service(second, 1.0, &services),
            Err(SimulationError::InvalidModelState)
        ));
    }

    #[test]
    fn records_are_kept_on_request() -> Result<(), SimulationError> {
        let mut services = Services::default();
        let mut station = Station::new(StationId::One, 2.0, true);
        let customer = CustomerId::new(1);
        station.arrive(customer, services_at(&mut services, 0.25));
        let service_time = station.start_service(customer, &mut services)?;
        station.complete_service(
            customer,
            service_time,
            services_at(&mut services, 0.25 + service_time),
        )?;
        let actions: Vec<StationAction> = station
            .records()
            .iter()
            .map(|record| record.action)
            .collect();
        assert_eq!(
            actions,
            vec![
                StationAction::Arrival,
                StationAction::ServiceStart,
                StationAction::Departure
            ]
        );
        Ok(())
    }
}

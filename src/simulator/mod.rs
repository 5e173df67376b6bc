//! The simulator module provides the mechanics to run the tandem network
//! via discrete event simulation.  Each customer is a cooperative flow,
//! suspended at timed delays (interarrival waits and service times) and
//! while waiting for a busy server.  The `Scheduler` resumes exactly one
//! suspended flow at a time, in time order, until the horizon.
//!
//! `Simulation` and `WebSimulation` are used for Rust- and npm-based
//! projects, respectively.  The `Simulation` methods use the associated
//! struct types directly, while the `WebSimulation` provides an interface
//! with better JS/WASM compatibility.

use tracing::{debug, info};

use crate::models::{CustomerFlow, CustomerId, FlowStep, Station, StationId, StationRecord};
use crate::output_analysis::NetworkMetrics;
use crate::utils::errors::SimulationError;
use crate::utils::set_panic_hook;

pub mod config;
pub mod scheduler;
pub mod services;
pub mod web;

pub use self::config::Config;
pub use self::scheduler::{Activity, Scheduler};
pub use self::services::Services;
pub use self::web::Simulation as WebSimulation;

/// The `Simulation` struct is the core of the crate, and includes
/// everything needed to run the network - the stations, the customer flow,
/// the scheduler, and a random number generator.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: Config,
    stations: Vec<Station>,
    flow: CustomerFlow,
    scheduler: Scheduler,
    services: Services,
}

impl Simulation {
    /// This constructor method validates the configuration and creates a
    /// simulation with empty stations, ready to generate arrivals from time
    /// zero.
    pub fn post(config: Config) -> Result<Self, SimulationError> {
        set_panic_hook();
        config.validate()?;
        let mut simulation = Self {
            stations: Vec::new(),
            flow: CustomerFlow::new(config.inter_arrival_rate, config.p_route_to_station_2),
            scheduler: Scheduler::default(),
            services: Services::new(config.random_seed),
            config,
        };
        simulation.initialize()?;
        info!(
            horizon = simulation.config.simulation_time,
            seed = simulation.config.random_seed,
            "Simulation created"
        );
        Ok(simulation)
    }

    fn initialize(&mut self) -> Result<(), SimulationError> {
        self.stations = StationId::ALL
            .iter()
            .map(|id| Station::new(*id, self.config.service_rate(*id), self.config.store_records))
            .collect();
        self.flow = CustomerFlow::new(
            self.config.inter_arrival_rate,
            self.config.p_route_to_station_2,
        );
        self.scheduler.clear();
        self.services.set_global_time(0.0);
        self.scheduler
            .schedule_now(&self.services, Activity::StartArrivals)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// An accessor method for the simulation global time.
    pub fn get_global_time(&self) -> f64 {
        self.services.global_time()
    }

    pub fn station(&self, id: StationId) -> &Station {
        &self.stations[id.index()]
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn flow(&self) -> &CustomerFlow {
        &self.flow
    }

    /// This method provides a mechanism for getting the status of any
    /// station, by its name ("1", "2" or "3").
    pub fn get_status(&self, station_id: &str) -> Result<String, SimulationError> {
        Ok(self.station(station_id.parse()?).status())
    }

    /// This method provides a mechanism for getting the records of any
    /// station, by its name ("1", "2" or "3").  Records are only kept when
    /// the configuration enables `store_records`.
    pub fn get_records(&self, station_id: &str) -> Result<&Vec<StationRecord>, SimulationError> {
        Ok(self.station(station_id.parse()?).records())
    }

    /// To enable simulation replications, the reset method restores the
    /// initial network state, except for the random number generator.
    /// Successive runs then continue the random stream, and are independent
    /// replications.
    pub fn reset(&mut self) -> Result<(), SimulationError> {
        self.initialize()?;
        info!("Simulation reset");
        Ok(())
    }

    /// Execute a single activity, if one is pending before the configured
    /// horizon.  The executed activity is returned.  Once nothing is left
    /// before the horizon, the clock halts there and `None` is returned.
    pub fn step(&mut self) -> Result<Option<Activity>, SimulationError> {
        let horizon = self.config.simulation_time;
        match self.scheduler.advance(&mut self.services, horizon) {
            Some(activity) => {
                self.execute(activity)?;
                Ok(Some(activity))
            }
            None => {
                self.scheduler.halt(&mut self.services, horizon);
                Ok(None)
            }
        }
    }

    /// Execute up to `n` activities before the configured horizon, and
    /// return them.
    pub fn step_n(&mut self, n: usize) -> Result<Vec<Activity>, SimulationError> {
        let mut activities = Vec::with_capacity(n);
        for _ in 0..n {
            match self.step()? {
                Some(activity) => activities.push(activity),
                None => break,
            }
        }
        Ok(activities)
    }

    /// Execute every activity scheduled strictly before `until`, then halt
    /// the clock at `until`.  Flows still suspended at that point are left
    /// where they stand.  Returns the number of activities executed.
    pub fn step_until(&mut self, until: f64) -> Result<usize, SimulationError> {
        let mut executed = 0;
        while let Some(activity) = self.scheduler.advance(&mut self.services, until) {
            self.execute(activity)?;
            executed += 1;
        }
        self.scheduler.halt(&mut self.services, until);
        info!(
            time = self.services.global_time(),
            executed,
            pending = self.scheduler.pending(),
            "Simulation halted"
        );
        Ok(executed)
    }

    /// Run to the configured horizon and aggregate the metrics.
    pub fn run(&mut self) -> Result<NetworkMetrics, SimulationError> {
        self.step_until(self.config.simulation_time)?;
        Ok(self.metrics())
    }

    /// Run `replications` independent replications, resetting between them,
    /// and return the metrics of each.
    pub fn replicate(
        &mut self,
        replications: usize,
    ) -> Result<Vec<NetworkMetrics>, SimulationError> {
        (0..replications)
            .map(|_| {
                self.reset()?;
                self.run()
            })
            .collect()
    }

    /// Aggregate the station counters into metrics, over the elapsed
    /// simulated time.
    pub fn metrics(&self) -> NetworkMetrics {
        let statistics: Vec<_> = self
            .stations
            .iter()
            .map(|station| (station.id(), station.statistics()))
            .collect();
        NetworkMetrics::aggregate(
            statistics.iter().map(|(id, statistics)| (*id, statistics)),
            self.services.global_time(),
            self.config.inter_arrival_rate,
        )
    }

    fn execute(&mut self, activity: Activity) -> Result<(), SimulationError> {
        match activity {
            Activity::StartArrivals => self.schedule_next_arrival(),
            Activity::ExternalArrival => {
                let customer = self.flow.spawn(&self.services);
                debug!(%customer, time = self.services.global_time(), "Customer generated");
                self.scheduler.schedule_now(
                    &self.services,
                    Activity::Arrive {
                        customer,
                        station: StationId::One,
                    },
                )?;
                self.schedule_next_arrival()
            }
            Activity::Arrive { customer, station } => self.arrive(customer, station),
            Activity::BeginService { customer, station } => {
                self.flow.enter_service(customer, station)?;
                let service_time =
                    self.stations[station.index()].start_service(customer, &mut self.services)?;
                self.scheduler.schedule_in(
                    &self.services,
                    service_time,
                    Activity::EndService {
                        customer,
                        station,
                        service_time,
                    },
                )
            }
            Activity::EndService {
                customer,
                station,
                service_time,
            } => {
                let granted = self.stations[station.index()].complete_service(
                    customer,
                    service_time,
                    &self.services,
                )?;
                if let Some(next) = granted {
                    self.grant(next, station)?;
                }
                match self.flow.depart(customer, station, &self.services)? {
                    FlowStep::Route => self
                        .scheduler
                        .schedule_now(&self.services, Activity::Route { customer }),
                    FlowStep::Exit => Ok(()),
                }
            }
            Activity::Route { customer } => {
                let station = self.flow.route(customer, &mut self.services)?;
                self.arrive(customer, station)
            }
        }
    }

    fn schedule_next_arrival(&mut self) -> Result<(), SimulationError> {
        let interarrival_time = self.flow.next_interarrival(&mut self.services)?;
        self.scheduler
            .schedule_in(&self.services, interarrival_time, Activity::ExternalArrival)
    }

    fn arrive(&mut self, customer: CustomerId, station: StationId) -> Result<(), SimulationError> {
        match self.stations[station.index()].arrive(customer, &self.services) {
            Some(granted) => self.grant(granted, station),
            None => Ok(()),
        }
    }

    fn grant(&mut self, customer: CustomerId, station: StationId) -> Result<(), SimulationError> {
        self.scheduler
            .schedule_now(&self.services, Activity::BeginService { customer, station })
    }
}

//! # Overview
//! A discrete event simulation of a tandem queueing network.  Customers
//! arrive at station 1 as a Poisson process, are served, and are then
//! routed at random to station 2 or station 3.  Every station has one
//! server and a FIFO line.
//!
//! This crate contains:
//!
//! * Input modeling - a seeded random number generator and the
//! distributions that drive arrivals, services and routing.
//! * Models - the stations, with time-weighted statistics, and the customer
//! flow through the network.
//! * Simulator - a time-ordered scheduler, and the simulation that pumps it
//! to a configured horizon.
//! * Output analysis - the standard queueing measures (LQ, L, WQ, W, rho,
//! N and R), and confidence intervals over replications.
//!
//! ```
//! use tandem_sim::models::StationId;
//! use tandem_sim::simulator::{Config, Simulation};
//!
//! let mut simulation = Simulation::post(Config::default())?;
//! let metrics = simulation.run()?;
//! let station_1 = metrics.station(StationId::One).expect("station 1 is reported");
//! assert!(station_1.utilization > 0.0);
//! # Ok::<(), tandem_sim::SimulationError>(())
//! ```
pub mod input_modeling;
pub mod models;
pub mod output_analysis;
pub mod simulator;
pub mod utils;

pub use utils::errors::SimulationError;

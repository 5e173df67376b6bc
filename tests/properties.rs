use proptest::prelude::*;

use tandem_sim::models::StationId;
use tandem_sim::simulator::{Config, Simulation};
use tandem_sim::SimulationError;

fn arbitrary_config() -> impl Strategy<Value = Config> {
    (
        0.2f64..3.0,
        0.5f64..5.0,
        0.5f64..5.0,
        0.5f64..5.0,
        0.0f64..=1.0,
        0.0f64..200.0,
        any::<u64>(),
    )
        .prop_map(
            |(
                inter_arrival_rate,
                mu_1,
                mu_2,
                mu_3,
                p_route_to_station_2,
                simulation_time,
                random_seed,
            )| Config {
                inter_arrival_rate,
                mu_1,
                mu_2,
                mu_3,
                p_route_to_station_2,
                simulation_time,
                random_seed,
                store_records: false,
            },
        )
}

fn simulate(config: Config) -> Result<Simulation, TestCaseError> {
    let mut simulation = Simulation::post(config).map_err(fail)?;
    simulation.run().map_err(fail)?;
    Ok(simulation)
}

fn fail(error: SimulationError) -> TestCaseError {
    TestCaseError::fail(error.to_string())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn customers_are_conserved(config in arbitrary_config()) {
        let simulation = simulate(config)?;
        let station_1 = simulation.station(StationId::One).statistics();
        let station_2 = simulation.station(StationId::Two).statistics();
        let station_3 = simulation.station(StationId::Three).statistics();
        prop_assert_eq!(station_1.departures, station_2.arrivals + station_3.arrivals);
        prop_assert_eq!(station_1.arrivals as u64, simulation.flow().generated());
        for station in [station_1, station_2, station_3].iter() {
            prop_assert!(station.customers_serviced <= station.arrivals);
            prop_assert!(station.departures <= station.customers_serviced);
            prop_assert!(station.customers_serviced - station.departures <= 1);
        }
    }

    #[test]
    fn measures_stay_within_bounds(config in arbitrary_config()) {
        let horizon = config.simulation_time;
        let simulation = simulate(config)?;
        prop_assert_eq!(simulation.get_global_time(), horizon);
        let metrics = simulation.metrics();
        for id in StationId::ALL.iter() {
            let station = metrics
                .station(*id)
                .ok_or_else(|| fail(SimulationError::StationNotFound))?;
            prop_assert!(station.utilization >= 0.0);
            prop_assert!(station.utilization <= 1.0 + 1.0e-9);
            prop_assert!(station.average_queue_length >= 0.0);
            prop_assert!(station.average_waiting_time >= 0.0);
            prop_assert!(station.average_sojourn_time >= station.average_waiting_time);
        }
        prop_assert!(metrics.total_customers_in_network >= 0.0);
    }

    #[test]
    fn areas_never_decrease(config in arbitrary_config()) {
        let mut simulation = Simulation::post(config).map_err(fail)?;
        let mut previous: Vec<_> = StationId::ALL
            .iter()
            .map(|id| simulation.station(*id).statistics())
            .collect();
        while simulation.step().map_err(fail)?.is_some() {
            for (id, before) in StationId::ALL.iter().zip(previous.iter_mut()) {
                let after = simulation.station(*id).statistics();
                prop_assert!(after.area_under_busy >= before.area_under_busy);
                prop_assert!(after.area_under_queue >= before.area_under_queue);
                prop_assert!(after.cumulative_delay >= before.cumulative_delay);
                *before = after;
            }
        }
    }

    #[test]
    fn equal_seeds_replay_equal_runs(config in arbitrary_config()) {
        let first = simulate(config.clone())?;
        let second = simulate(config)?;
        prop_assert_eq!(first.metrics(), second.metrics());
        for id in StationId::ALL.iter() {
            prop_assert_eq!(first.station(*id).statistics(), second.station(*id).statistics());
        }
    }
}

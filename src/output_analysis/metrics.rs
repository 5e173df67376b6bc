//! Reduction of station counters into the standard queueing measures.
//! Time-weighted measures divide the integrated areas by the horizon, and
//! per-customer measures divide the accumulated delays and service times by
//! the customers serviced.  Degenerate denominators report zero.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{StationId, StationStatistics};

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationMetrics {
    /// LQ - time-average number of customers waiting
    pub average_queue_length: f64,
    /// L - time-average number of customers at the station
    pub average_number_in_system: f64,
    /// WQ - average delay before service
    pub average_waiting_time: f64,
    /// W - average time spent at the station
    pub average_sojourn_time: f64,
    /// Es - average service time
    pub average_service_time: f64,
    /// rho - fraction of time the server is busy
    pub utilization: f64,
}

impl StationMetrics {
    pub fn aggregate(statistics: &StationStatistics, horizon: f64) -> Self {
        let serviced = statistics.customers_serviced as f64;
        let average_waiting_time = ratio(statistics.cumulative_delay, serviced);
        let average_service_time = ratio(statistics.cumulative_service_time, serviced);
        let average_queue_length = ratio(statistics.area_under_queue, horizon);
        let utilization = ratio(statistics.area_under_busy, horizon);
        Self {
            average_queue_length,
            average_number_in_system: average_queue_length + utilization,
            average_waiting_time,
            average_sojourn_time: average_waiting_time + average_service_time,
            average_service_time,
            utilization,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkMetrics {
    pub stations: BTreeMap<StationId, StationMetrics>,
    /// N - sum of the time-average number at each station
    pub total_customers_in_network: f64,
    /// R - network response time, by Little's Law on the external arrivals
    pub average_network_response_time: f64,
}

impl NetworkMetrics {
    pub fn aggregate<'s, I>(stations: I, horizon: f64, inter_arrival_rate: f64) -> Self
    where
        I: IntoIterator<Item = (StationId, &'s StationStatistics)>,
    {
        let stations: BTreeMap<StationId, StationMetrics> = stations
            .into_iter()
            .map(|(id, statistics)| (id, StationMetrics::aggregate(statistics, horizon)))
            .collect();
        let total_customers_in_network = stations
            .values()
            .map(|metrics| metrics.average_number_in_system)
            .sum();
        Self {
            stations,
            total_customers_in_network,
            average_network_response_time: ratio(total_customers_in_network, inter_arrival_rate),
        }
    }

    pub fn station(&self, id: StationId) -> Option<&StationMetrics> {
        self.stations.get(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn statistics() -> StationStatistics {
        StationStatistics {
            customers_serviced: 4,
            cumulative_delay: 2.0,
            cumulative_service_time: 6.0,
            area_under_queue: 5.0,
            area_under_busy: 7.0,
            ..StationStatistics::default()
        }
    }

    #[test]
    fn station_measures_follow_their_definitions() {
        let metrics = StationMetrics::aggregate(&statistics(), 10.0);
        assert_eq!(metrics.average_waiting_time, 0.5);
        assert_eq!(metrics.average_service_time, 1.5);
        assert_eq!(metrics.average_sojourn_time, 2.0);
        assert_eq!(metrics.average_queue_length, 0.5);
        assert_eq!(metrics.utilization, 0.7);
        assert_eq!(metrics.average_number_in_system, 1.2);
    }

    #[test]
    fn degenerate_denominators_report_zero() {
        let empty = StationMetrics::aggregate(&StationStatistics::default(), 10.0);
        assert_eq!(empty, StationMetrics::default());
        let no_horizon = StationMetrics::aggregate(&statistics(), 0.0);
        assert_eq!(no_horizon.average_queue_length, 0.0);
        assert_eq!(no_horizon.utilization, 0.0);
        assert_eq!(no_horizon.average_number_in_system, 0.0);
    }

    #[test]
    fn network_measures_sum_station_occupancy() {
        let first = statistics();
        let second = StationStatistics::default();
        let metrics = NetworkMetrics::aggregate(
            vec![(StationId::One, &first), (StationId::Two, &second)],
            10.0,
            0.5,
        );
        assert_eq!(metrics.total_customers_in_network, 1.2);
        assert_eq!(metrics.average_network_response_time, 2.4);
        assert!(metrics.station(StationId::Three).is_none());
    }

    #[test]
    fn stations_serialize_by_name() -> Result<(), serde_json::Error> {
        let first = statistics();
        let metrics = NetworkMetrics::aggregate(vec![(StationId::One, &first)], 10.0, 1.0);
        let json: serde_json::Value = serde_json::to_value(&metrics)?;
        assert_eq!(json["stations"]["1"]["utilization"], 0.7);
        assert_eq!(json["totalCustomersInNetwork"], 1.2);
        Ok(())
    }
}

//! The scheduler keeps the pending activities of a simulation in time
//! order.  Activities scheduled for the same instant run in the order they
//! were scheduled, which keeps a seeded run reproducible.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::Services;
use crate::models::{CustomerId, StationId};
use crate::utils::errors::SimulationError;

/// A resumption point of one of the cooperative flows in the network.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Activity {
    /// The arrival generator draws its first interarrival time.
    StartArrivals,
    /// An interarrival time has elapsed, so a new customer enters the network.
    ExternalArrival,
    /// A customer joins the line at a station.
    Arrive {
        customer: CustomerId,
        station: StationId,
    },
    /// A customer has been granted a station's server.
    BeginService {
        customer: CustomerId,
        station: StationId,
    },
    /// A customer's service time has elapsed.
    EndService {
        customer: CustomerId,
        station: StationId,
        service_time: f64,
    },
    /// A customer leaving station 1 picks its next station.
    Route { customer: CustomerId },
}

#[derive(Debug, Clone)]
struct ScheduledActivity {
    time: f64,
    sequence: u64,
    activity: Activity,
}

impl PartialEq for ScheduledActivity {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScheduledActivity {}

impl PartialOrd for ScheduledActivity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScheduledActivity {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for min-heap behavior in BinaryHeap; earliest time first,
        // then earliest registration
        other
            .time
            .total_cmp(&self.time)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    events: BinaryHeap<ScheduledActivity>,
    next_sequence: u64,
}

impl Scheduler {
    /// Schedule an activity at an absolute time, which may not be earlier
    /// than the current clock.
    pub fn schedule_at(
        &mut self,
        services: &Services,
        time: f64,
        activity: Activity,
    ) -> Result<(), SimulationError> {
        if !time.is_finite() || time < services.global_time() {
            return Err(SimulationError::EventSchedulingError);
        }
        trace!(time, ?activity, "Activity scheduled");
        self.events.push(ScheduledActivity {
            time,
            sequence: self.next_sequence,
            activity,
        });
        self.next_sequence += 1;
        Ok(())
    }

    /// Schedule an activity after a delay from the current clock.
    pub fn schedule_in(
        &mut self,
        services: &Services,
        delay: f64,
        activity: Activity,
    ) -> Result<(), SimulationError> {
        self.schedule_at(services, services.global_time() + delay, activity)
    }

    /// Schedule an activity at the current clock, behind anything already
    /// scheduled for this instant.
    pub fn schedule_now(
        &mut self,
        services: &Services,
        activity: Activity,
    ) -> Result<(), SimulationError> {
        self.schedule_at(services, services.global_time(), activity)
    }

    /// The time of the next pending activity.
    pub fn next_time(&self) -> Option<f64> {
        self.events.peek().map(|scheduled| scheduled.time)
    }

    /// Remove the next activity strictly before `until` and advance the
    /// clock to it.  Activities at or after `until` stay pending.
    pub fn advance(&mut self, services: &mut Services, until: f64) -> Option<Activity> {
        match self.next_time() {
            Some(time) if time < until => {
                let scheduled = self.events.pop()?;
                services.set_global_time(scheduled.time);
                Some(scheduled.activity)
            }
            _ => None,
        }
    }

    /// Stop at `until`: the clock moves to the horizon and any activities
    /// still pending are abandoned where they stand.
    pub fn halt(&mut self, services: &mut Services, until: f64) {
        if until > services.global_time() {
            services.set_global_time(until);
        }
    }

    pub fn pending(&self) -> usize {
        self.events.len()
    }

    pub fn clear(&mut self) {
        self.events.clear();
        self.next_sequence = 0;
    }
}

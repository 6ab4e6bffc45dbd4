use crate::error::{Error, Result};
use crate::station::{Station, StationConnectivity};

use serde::Serialize;
use std::fmt;

/// One origin/destination pair of a ticket, with its point value.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Trip {
    from: Station,
    to: Station,
    points: i32,
}

impl Trip {
    pub fn new(from: Station, to: Station, points: i32) -> Self {
        Self { from, to, points }
    }

    /// Every trip from one of `from` to one of `to`, all worth `points`.
    /// Convenience for building station-group tickets.
    pub fn all(from: &[Station], to: &[Station], points: i32) -> Vec<Trip> {
        from.iter()
            .flat_map(|start| {
                to.iter()
                    .map(move |end| Trip::new(start.clone(), end.clone(), points))
            })
            .collect()
    }

    pub fn from(&self) -> &Station {
        &self.from
    }

    pub fn to(&self) -> &Station {
        &self.to
    }

    /// The trip's value under the given connectivity: positive if its two
    /// stations are connected, negative otherwise.
    pub fn points(&self, connectivity: &impl StationConnectivity) -> i32 {
        if connectivity.connected(&self.from, &self.to) {
            self.points
        } else {
            -self.points
        }
    }
}

/// A scoring objective: connect the two stations of one of the ticket's
/// trips. Most tickets hold a single trip; station-group tickets hold one
/// trip per reachable destination.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Ticket {
    trips: Vec<Trip>,
}

impl Ticket {
    /// Builds a ticket from its trips.
    ///
    /// Fails with [`Error::EmptyTicket`] if `trips` is empty.
    pub fn new(trips: Vec<Trip>) -> Result<Self> {
        if trips.is_empty() {
            return Err(Error::EmptyTicket);
        }

        Ok(Self { trips })
    }

    /// The common single-trip ticket.
    pub fn of(from: Station, to: Station, points: i32) -> Self {
        Self {
            trips: vec![Trip::new(from, to, points)],
        }
    }

    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    /// The ticket's value under the given connectivity: the best value among
    /// its trips. With nothing connected this is negative, the smallest
    /// penalty among the trips.
    pub fn points(&self, connectivity: &impl StationConnectivity) -> i32 {
        self.trips
            .iter()
            .map(|trip| trip.points(connectivity))
            .max()
            .unwrap_or(0)
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.trips.as_slice() {
            [trip] => write!(f, "{} - {} ({})", trip.from, trip.to, trip.points),
            trips => {
                let destinations: Vec<String> = trips
                    .iter()
                    .map(|trip| format!("{} ({})", trip.to, trip.points))
                    .collect();
                match trips.first() {
                    Some(first) => write!(f, "{} - {{{}}}", first.from, destinations.join(", ")),
                    None => Ok(()),
                }
            }
        }
    }
}

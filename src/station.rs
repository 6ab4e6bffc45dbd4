use crate::route::Route;

use serde::Serialize;
use smallvec::SmallVec;
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

/// A named node of the map.
///
/// Stations are immutable values created at map-definition time and shared
/// by every route that touches them. Identity is the (id, name) pair.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Station {
    id: usize,
    name: String,
}

impl Station {
    pub fn new(id: usize, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Answers whether two stations are linked by some player's claimed routes.
///
/// Used for ticket scoring and for any external highlighting of a player's
/// network.
pub trait StationConnectivity {
    fn connected(&self, station1: &Station, station2: &Station) -> bool;
}

/// [`StationConnectivity`] over a fixed set of claimed routes, answered by
/// breadth-first reachability.
///
/// # Examples:
/// ```
/// use railgame::route::{Level, Route};
/// use railgame::station::{RouteConnectivity, Station, StationConnectivity};
///
/// let a = Station::new(0, "Aubonne");
/// let b = Station::new(1, "Bienne");
/// let c = Station::new(2, "Coire");
/// let route = Route::new("AB", a.clone(), b.clone(), 2, Level::Overground, None).unwrap();
///
/// let connectivity = RouteConnectivity::of([&route]);
/// assert!(connectivity.connected(&a, &b));
/// assert!(!connectivity.connected(&a, &c));
/// ```
#[derive(Clone, Debug)]
pub struct RouteConnectivity {
    neighbors: HashMap<usize, SmallVec<[usize; 4]>>,
}

impl RouteConnectivity {
    /// Builds the adjacency relation spanned by the given routes.
    pub fn of<'a>(routes: impl IntoIterator<Item = &'a Route>) -> Self {
        let mut neighbors: HashMap<usize, SmallVec<[usize; 4]>> = HashMap::new();

        for route in routes {
            let (start, end) = (route.station1().id(), route.station2().id());
            neighbors.entry(start).or_default().push(end);
            neighbors.entry(end).or_default().push(start);
        }

        Self { neighbors }
    }
}

impl StationConnectivity for RouteConnectivity {
    fn connected(&self, station1: &Station, station2: &Station) -> bool {
        // A station is trivially connected to itself.
        if station1.id() == station2.id() {
            return true;
        }

        let mut visited = HashSet::new();
        let mut to_visit = VecDeque::new();
        visited.insert(station1.id());
        to_visit.push_back(station1.id());

        while let Some(station) = to_visit.pop_front() {
            if station == station2.id() {
                return true;
            }

            if let Some(adjacent) = self.neighbors.get(&station) {
                for &next in adjacent {
                    if visited.insert(next) {
                        to_visit.push_back(next);
                    }
                }
            }
        }

        false
    }
}

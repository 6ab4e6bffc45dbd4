use crate::bag::Bag;
use crate::card::Color::*;
use crate::error::Result;
use crate::route::{Level, Route};
use crate::station::Station;
use crate::ticket::{Ticket, Trip};

/// Convenience macro to declare one route of the map.
/// `None` means a neutral route that any single color can pay for.
macro_rules! route {
    ($id:literal, $station1:expr, $station2:expr, $length:literal, $level:expr, $color:expr) => {
        Route::new(
            $id,
            $station1.clone(),
            $station2.clone(),
            $length,
            $level,
            $color,
        )?
    };
}

/// A playable map: its stations, its routes, and its ticket pool.
///
/// The engine is map-agnostic; a `GameMap` is just the data an external
/// driver feeds into [`crate::game_state::GameState::initial`] and consults
/// when a player points at a route.
#[derive(Clone, Debug)]
pub struct GameMap {
    stations: Vec<Station>,
    routes: Vec<Route>,
    tickets: Bag<Ticket>,
}

impl GameMap {
    /// The built-in map: a compact North-American network.
    ///
    /// Small enough to reason about in tests, but exercises everything the
    /// rules care about: tunnels, colored and neutral routes, one pair of
    /// parallel routes, and a station-group ticket.
    pub fn standard() -> Result<Self> {
        let atlanta = Station::new(0, "Atlanta");
        let boston = Station::new(1, "Boston");
        let chicago = Station::new(2, "Chicago");
        let dallas = Station::new(3, "Dallas");
        let denver = Station::new(4, "Denver");
        let helena = Station::new(5, "Helena");
        let miami = Station::new(6, "Miami");
        let montreal = Station::new(7, "Montreal");
        let nashville = Station::new(8, "Nashville");
        let new_orleans = Station::new(9, "New Orleans");
        let new_york = Station::new(10, "New York");
        let phoenix = Station::new(11, "Phoenix");
        let salt_lake_city = Station::new(12, "Salt Lake City");
        let seattle = Station::new(13, "Seattle");
        let toronto = Station::new(14, "Toronto");
        let washington = Station::new(15, "Washington");

        let over = Level::Overground;
        let under = Level::Underground;

        let routes = vec![
            route!("ATL-MIA", atlanta, miami, 5, over, Some(Blue)),
            route!("ATL-NSH", atlanta, nashville, 1, over, None),
            route!("ATL-NOR", atlanta, new_orleans, 4, over, Some(Yellow)),
            route!("ATL-WAS", atlanta, washington, 2, over, Some(Orange)),
            // The map's one parallel pair.
            route!("BOS-NYC-1", boston, new_york, 2, over, Some(Yellow)),
            route!("BOS-NYC-2", boston, new_york, 2, over, Some(Red)),
            route!("BOS-MTL", boston, montreal, 3, over, None),
            route!("CHI-NSH", chicago, nashville, 3, over, Some(White)),
            route!("CHI-TOR", chicago, toronto, 4, over, Some(Pink)),
            route!("CHI-DEN", chicago, denver, 6, over, Some(Green)),
            route!("DAL-NOR", dallas, new_orleans, 2, over, None),
            route!("DAL-DEN", dallas, denver, 4, over, Some(Black)),
            route!("DAL-PHX", dallas, phoenix, 6, over, None),
            route!("DEN-SLC", denver, salt_lake_city, 3, under, Some(Red)),
            route!("DEN-HEL", denver, helena, 4, over, Some(Green)),
            route!("DEN-PHX", denver, phoenix, 5, under, Some(White)),
            route!("HEL-SEA", helena, seattle, 6, under, Some(Yellow)),
            route!("HEL-SLC", helena, salt_lake_city, 3, under, Some(Pink)),
            route!("MIA-NOR", miami, new_orleans, 6, over, Some(Red)),
            route!("MTL-NYC", montreal, new_york, 3, over, Some(Blue)),
            route!("MTL-TOR", montreal, toronto, 3, over, None),
            route!("NSH-WAS", nashville, washington, 3, over, Some(Black)),
            route!("NYC-WAS", new_york, washington, 2, over, Some(Orange)),
            route!("PHX-SLC", phoenix, salt_lake_city, 4, under, None),
            route!("SEA-SLC", seattle, salt_lake_city, 6, under, Some(Blue)),
            route!("TOR-NYC", toronto, new_york, 4, over, Some(Green)),
        ];

        let tickets = [
            Ticket::of(atlanta.clone(), chicago.clone(), 6),
            Ticket::of(boston.clone(), miami.clone(), 12),
            Ticket::of(dallas.clone(), toronto.clone(), 10),
            Ticket::of(denver.clone(), new_york.clone(), 11),
            Ticket::of(helena.clone(), new_orleans.clone(), 9),
            Ticket::of(montreal.clone(), phoenix.clone(), 13),
            Ticket::of(seattle.clone(), washington.clone(), 15),
            // One station-group ticket, west-coast hub to the east.
            Ticket::new(Trip::all(
                &[salt_lake_city.clone()],
                &[boston.clone(), miami.clone(), montreal.clone()],
                11,
            ))?,
        ]
        .into_iter()
        .collect();

        let stations = vec![
            atlanta,
            boston,
            chicago,
            dallas,
            denver,
            helena,
            miami,
            montreal,
            nashville,
            new_orleans,
            new_york,
            phoenix,
            salt_lake_city,
            seattle,
            toronto,
            washington,
        ];

        Ok(Self {
            stations,
            routes,
            tickets,
        })
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Looks a route up by its identifier.
    pub fn route(&self, id: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.id() == id)
    }

    /// The full ticket pool of this map.
    pub fn tickets(&self) -> &Bag<Ticket> {
        &self.tickets
    }
}

use crate::bag::Bag;
use crate::card::{Card, Color};
use crate::error::{Error, Result};
use crate::station::Station;

use serde::Serialize;
use std::fmt;
use strum::IntoEnumIterator;

/// Shortest route allowed by the rules.
pub const MIN_ROUTE_LENGTH: usize = 1;
/// Longest route allowed by the rules.
pub const MAX_ROUTE_LENGTH: usize = 6;
/// How many cards are drawn from the pile when a tunnel claim is attempted.
pub const TUNNEL_DRAWN_CARDS_COUNT: usize = 3;

// Points granted for claiming a route, indexed by its length.
const CLAIM_POINTS: [i32; MAX_ROUTE_LENGTH + 1] = [0, 1, 2, 4, 7, 10, 15];

/// The two kinds of routes on the map.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    /// A regular surface route.
    Overground,
    /// A tunnel: claiming it triggers the extra draw-three-and-match step.
    Underground,
}

/// A route between two adjacent stations on the map.
///
/// Immutable once constructed, at map-definition time. A route of color
/// `None` is neutral: any single color is accepted to claim it.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct Route {
    id: String,
    station1: Station,
    station2: Station,
    length: usize,
    level: Level,
    color: Option<Color>,
}

impl Route {
    /// Constructs a route, validating that its two stations are distinct and
    /// that its length is within `[MIN_ROUTE_LENGTH, MAX_ROUTE_LENGTH]`.
    pub fn new(
        id: impl Into<String>,
        station1: Station,
        station2: Station,
        length: usize,
        level: Level,
        color: Option<Color>,
    ) -> Result<Self> {
        let id = id.into();

        if station1 == station2 {
            return Err(Error::IdenticalStations { route: id });
        }
        if !(MIN_ROUTE_LENGTH..=MAX_ROUTE_LENGTH).contains(&length) {
            return Err(Error::InvalidRouteLength { route: id, length });
        }

        Ok(Self {
            id,
            station1,
            station2,
            length,
            level,
            color,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn station1(&self) -> &Station {
        &self.station1
    }

    pub fn station2(&self) -> &Station {
        &self.station2
    }

    pub fn stations(&self) -> [&Station; 2] {
        [&self.station1, &self.station2]
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// The endpoint opposite to `station`.
    ///
    /// Fails with [`Error::ForeignStation`] if `station` is not an endpoint
    /// of this route.
    pub fn station_opposite(&self, station: &Station) -> Result<&Station> {
        if station == &self.station1 {
            Ok(&self.station2)
        } else if station == &self.station2 {
            Ok(&self.station1)
        } else {
            Err(Error::ForeignStation {
                route: self.id.clone(),
                station: station.name().to_string(),
            })
        }
    }

    /// Every multiset of cards a player could spend to claim this route, in a
    /// fixed order that external drivers rely on to present deterministic
    /// choices:
    ///
    /// - underground, specific color: `length + 1` combinations, from fewest
    ///   to most locomotives;
    /// - underground, neutral: for each locomotive count then each color, the
    ///   mixed combinations, followed by the all-locomotive one;
    /// - overground, neutral: one single-color combination per color;
    /// - overground, specific color: exactly one combination.
    pub fn possible_claim_cards(&self) -> Vec<Bag<Card>> {
        let mut combinations = Vec::new();

        match (self.level, self.color) {
            (Level::Underground, Some(color)) => {
                for locomotives in 0..=self.length {
                    combinations.push(
                        Bag::of(self.length - locomotives, Card::of(color))
                            .with_added(locomotives, Card::Locomotive),
                    );
                }
            }
            (Level::Underground, None) => {
                for locomotives in 0..self.length {
                    for color in Color::iter() {
                        combinations.push(
                            Bag::of(self.length - locomotives, Card::of(color))
                                .with_added(locomotives, Card::Locomotive),
                        );
                    }
                }
                combinations.push(Bag::of(self.length, Card::Locomotive));
            }
            (Level::Overground, None) => {
                for color in Color::iter() {
                    combinations.push(Bag::of(self.length, Card::of(color)));
                }
            }
            (Level::Overground, Some(color)) => {
                combinations.push(Bag::of(self.length, Card::of(color)));
            }
        }

        combinations
    }

    /// How many additional cards the player must play to finish claiming this
    /// tunnel, given the cards they initially played and the three cards drawn
    /// from the pile.
    ///
    /// If the claim was all locomotives, only drawn locomotives count;
    /// otherwise drawn cards of the claim's color count too. The result is in
    /// `[0, TUNNEL_DRAWN_CARDS_COUNT]`.
    ///
    /// Fails with [`Error::NotUnderground`] on an overground route, and with
    /// [`Error::InvalidDrawnCount`] unless exactly
    /// [`TUNNEL_DRAWN_CARDS_COUNT`] cards were drawn.
    pub fn additional_claim_cards_count(
        &self,
        claim_cards: &Bag<Card>,
        drawn_cards: &Bag<Card>,
    ) -> Result<usize> {
        if self.level != Level::Underground {
            return Err(Error::NotUnderground {
                route: self.id.clone(),
            });
        }
        if drawn_cards.len() != TUNNEL_DRAWN_CARDS_COUNT {
            return Err(Error::InvalidDrawnCount {
                expected: TUNNEL_DRAWN_CARDS_COUNT,
                actual: drawn_cards.len(),
            });
        }

        let locomotives = drawn_cards.count_of(&Card::Locomotive);

        // A claim holds at most one concrete color; all-locomotive claims
        // have none.
        Ok(match claim_cards.iter().find_map(|card| card.color()) {
            Some(color) => drawn_cards.count_of(&Card::of(color)) + locomotives,
            None => locomotives,
        })
    }

    /// Points granted for claiming this route, by the standard schedule.
    pub fn claim_points(&self) -> i32 {
        CLAIM_POINTS[self.length]
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.station1, self.station2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stations() -> (Station, Station) {
        (Station::new(0, "Geneva"), Station::new(1, "Zurich"))
    }

    fn route(length: usize, level: Level, color: Option<Color>) -> Route {
        let (from, to) = stations();
        Route::new("GE_ZU", from, to, length, level, color).unwrap()
    }

    #[test]
    fn identical_stations_are_rejected() {
        let from = Station::new(0, "Geneva");
        assert_eq!(
            Route::new("GE_GE", from.clone(), from, 2, Level::Overground, None),
            Err(Error::IdenticalStations {
                route: String::from("GE_GE")
            })
        );
    }

    #[test]
    fn out_of_bounds_lengths_are_rejected() {
        let (from, to) = stations();
        assert_eq!(
            Route::new(
                "GE_ZU",
                from.clone(),
                to.clone(),
                0,
                Level::Overground,
                None
            ),
            Err(Error::InvalidRouteLength {
                route: String::from("GE_ZU"),
                length: 0
            })
        );
        assert_eq!(
            Route::new("GE_ZU", from, to, 7, Level::Overground, None),
            Err(Error::InvalidRouteLength {
                route: String::from("GE_ZU"),
                length: 7
            })
        );
    }

    #[test]
    fn station_opposite_flips_endpoints() {
        let (from, to) = stations();
        let route = route(3, Level::Overground, None);

        assert_eq!(route.station_opposite(&from), Ok(&to));
        assert_eq!(route.station_opposite(&to), Ok(&from));

        let elsewhere = Station::new(9, "Lugano");
        assert_eq!(
            route.station_opposite(&elsewhere),
            Err(Error::ForeignStation {
                route: String::from("GE_ZU"),
                station: String::from("Lugano")
            })
        );
    }

    #[test]
    fn overground_colored_has_one_combination() {
        let combinations = route(4, Level::Overground, Some(Color::Blue)).possible_claim_cards();

        assert_eq!(combinations, vec![Bag::of(4, Card::Blue)]);
    }

    #[test]
    fn overground_neutral_has_one_combination_per_color() {
        let combinations = route(4, Level::Overground, None).possible_claim_cards();

        assert_eq!(combinations.len(), 8);
        for (combination, card) in combinations.iter().zip(Card::cars()) {
            assert_eq!(combination, &Bag::of(4, card));
        }
    }

    #[test]
    fn underground_colored_mixes_in_locomotives() {
        let combinations = route(2, Level::Underground, Some(Color::Red)).possible_claim_cards();

        assert_eq!(
            combinations,
            vec![
                Bag::of(2, Card::Red),
                Bag::of(1, Card::Red).with_added(1, Card::Locomotive),
                Bag::of(2, Card::Locomotive),
            ]
        );
    }

    #[test]
    fn underground_neutral_enumerates_colors_then_all_locomotives() {
        let length = 3;
        let combinations = route(length, Level::Underground, None).possible_claim_cards();

        assert_eq!(combinations.len(), 8 * length + 1);
        // First combination: all cards of the first color, no locomotives.
        assert_eq!(combinations[0], Bag::of(length, Card::Black));
        // Locomotive count increases every 8 combinations.
        assert_eq!(
            combinations[8],
            Bag::of(length - 1, Card::Black).with_added(1, Card::Locomotive)
        );
        // Last combination: locomotives only.
        assert_eq!(
            combinations[combinations.len() - 1],
            Bag::of(length, Card::Locomotive)
        );
    }

    #[test]
    fn additional_cards_for_colored_claim() {
        let route = route(3, Level::Underground, Some(Color::Green));
        let claim = Bag::of(2, Card::Green).with_added(1, Card::Locomotive);

        // One matching color + one locomotive among the drawn cards.
        let drawn = Bag::of(1, Card::Green)
            .with_added(1, Card::Blue)
            .with_added(1, Card::Locomotive);
        assert_eq!(route.additional_claim_cards_count(&claim, &drawn), Ok(2));

        // Nothing matches.
        let drawn = Bag::of(3, Card::Yellow);
        assert_eq!(route.additional_claim_cards_count(&claim, &drawn), Ok(0));
    }

    #[test]
    fn additional_cards_for_all_locomotive_claim() {
        let route = route(2, Level::Underground, None);
        let claim = Bag::of(2, Card::Locomotive);

        // Only locomotives count when the claim was all locomotives.
        let drawn = Bag::of(1, Card::Locomotive).with_added(2, Card::Red);
        assert_eq!(route.additional_claim_cards_count(&claim, &drawn), Ok(1));
    }

    #[test]
    fn additional_cards_preconditions() {
        let overground = route(2, Level::Overground, None);
        let claim = Bag::of(2, Card::Red);
        let drawn = Bag::of(3, Card::Red);
        assert_eq!(
            overground.additional_claim_cards_count(&claim, &drawn),
            Err(Error::NotUnderground {
                route: String::from("GE_ZU")
            })
        );

        let underground = route(2, Level::Underground, None);
        assert_eq!(
            underground.additional_claim_cards_count(&claim, &Bag::of(2, Card::Red)),
            Err(Error::InvalidDrawnCount {
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn claim_points_schedule() {
        for (length, points) in [(1, 1), (2, 2), (3, 4), (4, 7), (5, 10), (6, 15)] {
            assert_eq!(route(length, Level::Overground, None).claim_points(), points);
        }
    }

    #[test]
    fn route_display() {
        assert_eq!(route(2, Level::Overground, None).to_string(), "Geneva - Zurich");
    }
}

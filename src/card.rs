use crate::bag::Bag;

use serde::{Deserialize, Serialize};
use std::iter::repeat;
use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{Display, EnumCount as EnumCountMacro, EnumIter};

/// How many car cards of each concrete color the full game deck holds.
pub const CARS_PER_COLOR: usize = 12;
/// How many locomotive cards the full game deck holds.
pub const LOCOMOTIVE_COUNT: usize = 14;
/// Total card count of the game.
pub const TOTAL_CARDS_COUNT: usize = Color::COUNT * CARS_PER_COLOR + LOCOMOTIVE_COUNT;

/// The concrete colors a car card or a route can have.
///
/// # JSON
/// Colors are serialized as lowercase strings.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    EnumCountMacro,
    EnumIter,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Color {
    Black,
    Blue,
    Green,
    Orange,
    Pink,
    Red,
    White,
    Yellow,
}

/// A transportation card: one variant per [`Color`], plus the locomotive.
///
/// The total order puts [`Card::Locomotive`] last, so bags of cards always
/// iterate concrete colors before locomotives.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    EnumIter,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Card {
    Black,
    Blue,
    Green,
    Orange,
    Pink,
    Red,
    White,
    Yellow,
    /// The wildcard: matches with any color.
    Locomotive,
}

impl Card {
    /// The car card of the given color.
    pub fn of(color: Color) -> Self {
        match color {
            Color::Black => Card::Black,
            Color::Blue => Card::Blue,
            Color::Green => Card::Green,
            Color::Orange => Card::Orange,
            Color::Pink => Card::Pink,
            Color::Red => Card::Red,
            Color::White => Card::White,
            Color::Yellow => Card::Yellow,
        }
    }

    /// The color of this card, or `None` for the locomotive.
    ///
    /// # Examples:
    /// ```
    /// use railgame::card::{Card, Color};
    ///
    /// assert_eq!(Card::of(Color::Red).color(), Some(Color::Red));
    /// assert_eq!(Card::Locomotive.color(), None);
    /// ```
    pub fn color(self) -> Option<Color> {
        match self {
            Card::Black => Some(Color::Black),
            Card::Blue => Some(Color::Blue),
            Card::Green => Some(Color::Green),
            Card::Orange => Some(Color::Orange),
            Card::Pink => Some(Color::Pink),
            Card::Red => Some(Color::Red),
            Card::White => Some(Color::White),
            Card::Yellow => Some(Color::Yellow),
            Card::Locomotive => None,
        }
    }

    /// Whether this card is the locomotive, i.e. matches with any color.
    ///
    /// # Examples:
    /// ```
    /// use railgame::card::Card;
    ///
    /// assert!(Card::Locomotive.is_locomotive());
    /// assert!(!Card::Green.is_locomotive());
    /// ```
    #[inline]
    pub fn is_locomotive(self) -> bool {
        self == Card::Locomotive
    }

    /// Iterates over all car cards, i.e. every card except the locomotive,
    /// in color order.
    pub fn cars() -> impl Iterator<Item = Card> {
        Color::iter().map(Card::of)
    }

    /// The full card deck of the game:
    /// [`CARS_PER_COLOR`] cards per color plus [`LOCOMOTIVE_COUNT`] locomotives.
    pub fn full_deck() -> Bag<Card> {
        Card::iter()
            .flat_map(|card| {
                let copies = if card.is_locomotive() {
                    LOCOMOTIVE_COUNT
                } else {
                    CARS_PER_COLOR
                };
                repeat(card).take(copies)
            })
            .collect()
    }
}

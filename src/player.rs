use crate::bag::Bag;
use crate::card::Card;
use crate::error::{Error, Result};
use crate::route::Route;
use crate::station::RouteConnectivity;
use crate::ticket::Ticket;

use im::Vector;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumCount as EnumCountMacro, EnumIter};

/// Movable pieces each player starts the game with.
pub const INITIAL_CAR_COUNT: usize = 40;
/// Cards dealt to each player before the first turn.
pub const INITIAL_CARDS_COUNT: usize = 4;

/// The closed set of players, in turn order.
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
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    /// The player whose turn follows this player's, cyclically.
    pub fn next(self) -> Self {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }
}

/// A total, persistent mapping from [`PlayerId`] to [`PlayerState`].
///
/// Because the player set is a small closed enum, the mapping is a plain
/// struct: lookups cannot miss, and updates copy only the changed entry
/// (the entries themselves share structure internally).
#[derive(Clone, Debug)]
pub struct PlayerMap {
    one: PlayerState,
    two: PlayerState,
}

impl PlayerMap {
    pub fn new(one: PlayerState, two: PlayerState) -> Self {
        Self { one, two }
    }

    pub fn get(&self, id: PlayerId) -> &PlayerState {
        match id {
            PlayerId::One => &self.one,
            PlayerId::Two => &self.two,
        }
    }

    /// A new map with `id` bound to `state` and every other entry shared
    /// with this map.
    pub fn updated(&self, id: PlayerId, state: PlayerState) -> Self {
        match id {
            PlayerId::One => Self {
                one: state,
                two: self.two.clone(),
            },
            PlayerId::Two => Self {
                one: self.one.clone(),
                two: state,
            },
        }
    }
}

/// A single player's complete state: private hand, tickets, and claimed
/// routes. The remaining car count is derived from the claimed routes.
///
/// Immutable; the `with_*` operations return new values.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PlayerState {
    tickets: Bag<Ticket>,
    cards: Bag<Card>,
    routes: Vector<Route>,
}

impl PlayerState {
    pub fn new(tickets: Bag<Ticket>, cards: Bag<Card>, routes: Vector<Route>) -> Self {
        Self {
            tickets,
            cards,
            routes,
        }
    }

    /// The state every player starts the game in: the dealt hand, no tickets,
    /// no routes.
    ///
    /// Fails with [`Error::WrongInitialHand`] unless exactly
    /// [`INITIAL_CARDS_COUNT`] cards were dealt.
    pub fn initial(cards: Bag<Card>) -> Result<Self> {
        if cards.len() != INITIAL_CARDS_COUNT {
            return Err(Error::WrongInitialHand {
                expected: INITIAL_CARDS_COUNT,
                actual: cards.len(),
            });
        }

        Ok(Self {
            tickets: Bag::new(),
            cards,
            routes: Vector::new(),
        })
    }

    pub fn tickets(&self) -> &Bag<Ticket> {
        &self.tickets
    }

    pub fn cards(&self) -> &Bag<Card> {
        &self.cards
    }

    pub fn routes(&self) -> &Vector<Route> {
        &self.routes
    }

    /// A new state with the given tickets added.
    pub fn with_added_tickets(&self, additional: &Bag<Ticket>) -> Self {
        Self {
            tickets: self.tickets.union(additional),
            cards: self.cards.clone(),
            routes: self.routes.clone(),
        }
    }

    /// A new state with the given card added to the hand.
    pub fn with_added_card(&self, card: Card) -> Self {
        Self {
            tickets: self.tickets.clone(),
            cards: self.cards.with_added(1, card),
            routes: self.routes.clone(),
        }
    }

    /// A new state where the player has claimed `route` by spending exactly
    /// `claim_cards` from their hand.
    ///
    /// Fails with [`Error::InsufficientCards`] if the hand does not contain
    /// the cards. Does not check the car count; the caller must have
    /// confirmed [`PlayerState::can_claim_route`] first.
    pub fn with_claimed_route(&self, route: &Route, claim_cards: &Bag<Card>) -> Result<Self> {
        let cards = self.cards.difference(claim_cards)?;
        let mut routes = self.routes.clone();
        routes.push_back(route.clone());

        Ok(Self {
            tickets: self.tickets.clone(),
            cards,
            routes,
        })
    }

    /// Cars the player has left; each claim consumes the route's length.
    pub fn car_count(&self) -> usize {
        let used: usize = self.routes.iter().map(|route| route.length()).sum();
        INITIAL_CAR_COUNT.saturating_sub(used)
    }

    /// Whether the player has the cars and the cards to claim `route`.
    pub fn can_claim_route(&self, route: &Route) -> bool {
        self.car_count() >= route.length() && !self.possible_claim_cards(route).is_empty()
    }

    /// The combinations from [`Route::possible_claim_cards`] that this
    /// player's hand can actually pay, in the same order.
    pub fn possible_claim_cards(&self, route: &Route) -> Vec<Bag<Card>> {
        route
            .possible_claim_cards()
            .into_iter()
            .filter(|combination| self.cards.contains(combination))
            .collect()
    }

    /// Points from claimed routes alone.
    pub fn claim_points(&self) -> i32 {
        self.routes.iter().map(|route| route.claim_points()).sum()
    }

    /// Points from tickets, each scored against the connectivity of this
    /// player's claimed routes.
    pub fn ticket_points(&self) -> i32 {
        let connectivity = RouteConnectivity::of(self.routes.iter());
        self.tickets
            .iter()
            .map(|ticket| ticket.points(&connectivity))
            .sum()
    }

    /// Claim points plus ticket points. The longest-trail bonus is awarded
    /// by the driver, which compares trails across players.
    pub fn final_points(&self) -> i32 {
        self.claim_points() + self.ticket_points()
    }

    /// The projection of this player's state that opponents may see.
    pub fn public_view(&self) -> PublicPlayerState {
        PublicPlayerState {
            ticket_count: self.tickets.len(),
            card_count: self.cards.len(),
            car_count: self.car_count(),
            claim_points: self.claim_points(),
            claimed_routes: self.routes.iter().cloned().collect(),
        }
    }
}

/// Observable player state: counts and claimed routes, but neither the hand
/// nor the ticket contents.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PublicPlayerState {
    pub ticket_count: usize,
    pub card_count: usize,
    pub car_count: usize,
    pub claim_points: i32,
    pub claimed_routes: Vec<Route>,
}

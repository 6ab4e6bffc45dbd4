use crate::bag::Bag;
use crate::card::Card;
use crate::card_state::{CardState, PublicCardState};
use crate::deck::Deck;
use crate::error::{Error, Result};
use crate::player::{PlayerId, PlayerMap, PlayerState, PublicPlayerState, INITIAL_CARDS_COUNT};
use crate::route::Route;
use crate::ticket::Ticket;

use rand::Rng;
use serde::Serialize;
use std::collections::BTreeMap;
use strum::{EnumCount, IntoEnumIterator};

/// Once the current player is down to this many cars, the last round begins.
pub const CAR_COUNT_LAST_TURN_THRESHOLD: usize = 2;

/// The aggregate root: all state of one game at one point in time.
///
/// Every transition returns a brand-new `GameState` and never mutates the
/// receiver; unchanged sub-parts are shared structurally, so holding on to
/// historical states is free and always safe. A rejected transition returns
/// an [`Error`] and changes nothing.
///
/// The engine only answers "is this legal" and "what does the state look
/// like after"; turn sequencing belongs to the external driver.
#[derive(Clone, Debug)]
pub struct GameState {
    ticket_deck: Deck<Ticket>,
    card_state: CardState,
    players: PlayerMap,
    current_player: PlayerId,
    last_player: Option<PlayerId>,
}

impl GameState {
    /// The initial state of a game: the given tickets shuffled into a deck,
    /// the full card deck shuffled, [`INITIAL_CARDS_COUNT`] cards dealt to
    /// each player, the face-up window dealt from the remainder, and a
    /// random first player.
    ///
    /// All shuffling uses the supplied random source, so a fixed seed
    /// reproduces the whole game setup.
    pub fn initial(tickets: &Bag<Ticket>, rng: &mut impl Rng) -> Result<Self> {
        let ticket_deck = Deck::of(tickets, rng);
        let card_deck = Deck::of(&Card::full_deck(), rng);

        let hand_one = card_deck.top_cards(INITIAL_CARDS_COUNT)?;
        let card_deck = card_deck.without_top_cards(INITIAL_CARDS_COUNT)?;
        let hand_two = card_deck.top_cards(INITIAL_CARDS_COUNT)?;
        let card_deck = card_deck.without_top_cards(INITIAL_CARDS_COUNT)?;

        let players = PlayerMap::new(
            PlayerState::initial(hand_one)?,
            PlayerState::initial(hand_two)?,
        );
        let card_state = CardState::of(card_deck)?;

        let current_player = if rng.gen_range(0..PlayerId::COUNT) == 0 {
            PlayerId::One
        } else {
            PlayerId::Two
        };

        Ok(Self {
            ticket_deck,
            card_state,
            players,
            current_player,
            last_player: None,
        })
    }

    // Queries.

    pub fn tickets_count(&self) -> usize {
        self.ticket_deck.len()
    }

    pub fn can_draw_tickets(&self) -> bool {
        !self.ticket_deck.is_empty()
    }

    /// The `count` top tickets of the ticket deck, without removing them.
    ///
    /// Fails with [`Error::InvalidCount`] unless `count` is in
    /// `[0, tickets_count]`.
    pub fn top_tickets(&self, count: usize) -> Result<Bag<Ticket>> {
        self.ticket_deck.top_cards(count)
    }

    /// Whether a card can be drawn at all: the draw pile is nonempty, or the
    /// discards could be reshuffled into a new one.
    pub fn can_draw_cards(&self) -> bool {
        !self.card_state.is_deck_empty() || self.card_state.discards_size() > 0
    }

    /// The top card of the draw pile.
    ///
    /// Fails with [`Error::EmptyDeck`] if the draw pile is empty.
    pub fn top_card(&self) -> Result<Card> {
        self.card_state.top_deck_card()
    }

    pub fn card_state(&self) -> &CardState {
        &self.card_state
    }

    pub fn player_state(&self, id: PlayerId) -> &PlayerState {
        self.players.get(id)
    }

    pub fn current_player_state(&self) -> &PlayerState {
        self.players.get(self.current_player)
    }

    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    pub fn last_player(&self) -> Option<PlayerId> {
        self.last_player
    }

    /// Whether the end-game trigger fires now: the last player is still
    /// unknown and the current player is down to
    /// [`CAR_COUNT_LAST_TURN_THRESHOLD`] cars or fewer.
    pub fn last_turn_begins(&self) -> bool {
        self.last_player.is_none()
            && self.current_player_state().car_count() <= CAR_COUNT_LAST_TURN_THRESHOLD
    }

    // Transitions.

    /// A new state with the `count` top tickets removed from the ticket deck.
    ///
    /// Fails with [`Error::InvalidCount`] unless `count` is in
    /// `[0, tickets_count]`.
    pub fn without_top_tickets(&self, count: usize) -> Result<Self> {
        Ok(Self {
            ticket_deck: self.ticket_deck.without_top_cards(count)?,
            ..self.clone()
        })
    }

    /// A new state with the draw pile's top card removed.
    ///
    /// Fails with [`Error::EmptyDeck`] if the draw pile is empty.
    pub fn without_top_card(&self) -> Result<Self> {
        Ok(Self {
            card_state: self.card_state.without_top_deck_card()?,
            ..self.clone()
        })
    }

    /// A new state with the given cards appended to the discards.
    pub fn with_more_discarded_cards(&self, discarded: &Bag<Card>) -> Self {
        Self {
            card_state: self.card_state.with_more_discarded_cards(discarded),
            ..self.clone()
        }
    }

    /// This state unchanged if the draw pile is nonempty; otherwise a new
    /// state whose draw pile was recreated by shuffling the discards.
    /// Idempotent once the draw pile is nonempty.
    pub fn with_cards_deck_recreated_if_needed(&self, rng: &mut impl Rng) -> Result<Self> {
        if self.card_state.is_deck_empty() {
            Ok(Self {
                card_state: self.card_state.with_deck_recreated_from_discards(rng)?,
                ..self.clone()
            })
        } else {
            Ok(self.clone())
        }
    }

    /// A new state where `player` has been granted their initially chosen
    /// tickets.
    ///
    /// Fails with [`Error::TicketsAlreadyChosen`] unless that player
    /// currently owns zero tickets.
    pub fn with_initially_chosen_tickets(
        &self,
        player: PlayerId,
        chosen: &Bag<Ticket>,
    ) -> Result<Self> {
        let state = self.players.get(player);
        if !state.tickets().is_empty() {
            return Err(Error::TicketsAlreadyChosen);
        }

        Ok(Self {
            players: self.players.updated(player, state.with_added_tickets(chosen)),
            ..self.clone()
        })
    }

    /// A new state where the current player has drawn `drawn` tickets and
    /// kept `chosen` of them: the kept tickets join the player's state and
    /// all drawn tickets leave the deck.
    ///
    /// Fails with [`Error::ChosenTicketsNotDrawn`] unless `chosen` is a
    /// sub-multiset of `drawn`.
    pub fn with_chosen_additional_tickets(
        &self,
        drawn: &Bag<Ticket>,
        chosen: &Bag<Ticket>,
    ) -> Result<Self> {
        if !drawn.contains(chosen) {
            return Err(Error::ChosenTicketsNotDrawn);
        }

        Ok(Self {
            ticket_deck: self.ticket_deck.without_top_cards(drawn.len())?,
            players: self.players.updated(
                self.current_player,
                self.current_player_state().with_added_tickets(chosen),
            ),
            ..self.clone()
        })
    }

    /// A new state where the current player has taken the face-up card at
    /// `slot` into their hand, and the slot was refilled from the draw pile.
    ///
    /// Fails with [`Error::CannotDrawCards`] if no card may be drawn, and
    /// with the face-up window's own errors for a bad slot or an empty draw
    /// pile (recreate the deck from the discards first).
    pub fn with_drawn_face_up_card(&self, slot: usize) -> Result<Self> {
        if !self.can_draw_cards() {
            return Err(Error::CannotDrawCards);
        }

        let card = self.card_state.face_up_card(slot)?;

        Ok(Self {
            card_state: self.card_state.with_drawn_face_up_card(slot)?,
            players: self.players.updated(
                self.current_player,
                self.current_player_state().with_added_card(card),
            ),
            ..self.clone()
        })
    }

    /// A new state where the current player has taken the draw pile's top
    /// card into their hand.
    ///
    /// Fails with [`Error::CannotDrawCards`] if no card may be drawn, and
    /// with [`Error::EmptyDeck`] if the draw pile is empty (recreate the
    /// deck from the discards first).
    pub fn with_blindly_drawn_card(&self) -> Result<Self> {
        if !self.can_draw_cards() {
            return Err(Error::CannotDrawCards);
        }

        let card = self.card_state.top_deck_card()?;

        Ok(Self {
            card_state: self.card_state.without_top_deck_card()?,
            players: self.players.updated(
                self.current_player,
                self.current_player_state().with_added_card(card),
            ),
            ..self.clone()
        })
    }

    /// A new state where the current player has claimed `route` with
    /// `claim_cards`: the cards move from their hand to the discards, and
    /// the route joins their claimed set.
    ///
    /// The caller is expected to have validated the claim's legality
    /// beforehand ([`PlayerState::can_claim_route`],
    /// [`PlayerState::possible_claim_cards`]); as a backstop this fails with
    /// [`Error::InsufficientCards`] if the hand lacks the cards.
    pub fn with_claimed_route(&self, route: &Route, claim_cards: &Bag<Card>) -> Result<Self> {
        let claimed = self
            .current_player_state()
            .with_claimed_route(route, claim_cards)?;

        Ok(Self {
            card_state: self.card_state.with_more_discarded_cards(claim_cards),
            players: self.players.updated(self.current_player, claimed),
            ..self.clone()
        })
    }

    /// A new state where it is the next player's turn. If the last turn
    /// begins now, the player who just acted is latched as the last player;
    /// once set, the latch never changes.
    pub fn for_next_turn(&self) -> Self {
        let last_player = if self.last_turn_begins() {
            Some(self.current_player)
        } else {
            self.last_player
        };

        Self {
            current_player: self.current_player.next(),
            last_player,
            ..self.clone()
        }
    }

    /// The projection of this state that any observer may see: counts and
    /// public per-player stats, but no hand, deck or ticket contents.
    pub fn public_view(&self) -> PublicGameState {
        PublicGameState {
            tickets_count: self.tickets_count(),
            card_state: self.card_state.public_view(),
            current_player: self.current_player,
            players: PlayerId::iter()
                .map(|id| (id, self.players.get(id).public_view()))
                .collect(),
            last_player: self.last_player,
        }
    }
}

/// Observable game state, safe to share with every player and spectator.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PublicGameState {
    pub tickets_count: usize,
    pub card_state: PublicCardState,
    pub current_player: PlayerId,
    pub players: BTreeMap<PlayerId, PublicPlayerState>,
    pub last_player: Option<PlayerId>,
}

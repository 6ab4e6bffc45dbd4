use crate::bag::Bag;
use crate::card::Card;
use crate::deck::Deck;
use crate::error::{Error, Result};

use array_init::array_init;
use rand::Rng;
use serde::Serialize;

/// How many cards are visible face up at all times.
pub const FACE_UP_CARDS_COUNT: usize = 5;

/// The cards that are not in any player's hand: the face-up window, the draw
/// pile and the discard pile.
///
/// Immutable; every transition returns a new `CardState`. The total card
/// count (face-up + draw pile + discards) is invariant across every
/// transition that does not explicitly move a card to a hand.
#[derive(Clone, Debug)]
pub struct CardState {
    face_up: [Card; FACE_UP_CARDS_COUNT],
    draw_pile: Deck<Card>,
    discards: Bag<Card>,
}

impl CardState {
    /// Deals the [`FACE_UP_CARDS_COUNT`] top cards of `deck` face up and
    /// keeps the remainder as the draw pile, with empty discards.
    ///
    /// Fails with [`Error::InsufficientCards`] if the deck is smaller than
    /// the face-up window.
    pub fn of(deck: Deck<Card>) -> Result<Self> {
        if deck.len() < FACE_UP_CARDS_COUNT {
            return Err(Error::InsufficientCards);
        }

        let mut draw_pile = deck;
        let mut face_up = [Card::Locomotive; FACE_UP_CARDS_COUNT];
        for slot in face_up.iter_mut() {
            *slot = *draw_pile.top_card()?;
            draw_pile = draw_pile.without_top_card()?;
        }

        Ok(Self {
            face_up,
            draw_pile,
            discards: Bag::new(),
        })
    }

    pub fn face_up_cards(&self) -> &[Card; FACE_UP_CARDS_COUNT] {
        &self.face_up
    }

    /// The face-up card at `slot`.
    ///
    /// Fails with [`Error::InvalidSlot`] if `slot` is outside the window.
    pub fn face_up_card(&self, slot: usize) -> Result<Card> {
        self.face_up
            .get(slot)
            .copied()
            .ok_or(Error::InvalidSlot { slot })
    }

    pub fn deck_size(&self) -> usize {
        self.draw_pile.len()
    }

    pub fn is_deck_empty(&self) -> bool {
        self.draw_pile.is_empty()
    }

    pub fn discards_size(&self) -> usize {
        self.discards.len()
    }

    /// Replaces the face-up card at `slot` with the top card of the draw
    /// pile. The replaced card is gone from this state; the caller is
    /// expected to have moved it to a hand. Discards are unchanged.
    ///
    /// Fails with [`Error::InvalidSlot`] if `slot` is outside the window, or
    /// with [`Error::EmptyDeck`] if the draw pile is empty.
    pub fn with_drawn_face_up_card(&self, slot: usize) -> Result<Self> {
        if slot >= FACE_UP_CARDS_COUNT {
            return Err(Error::InvalidSlot { slot });
        }

        let replacement = *self.draw_pile.top_card()?;
        let face_up = array_init(|i| if i == slot { replacement } else { self.face_up[i] });

        Ok(Self {
            face_up,
            draw_pile: self.draw_pile.without_top_card()?,
            discards: self.discards.clone(),
        })
    }

    /// The top card of the draw pile.
    ///
    /// Fails with [`Error::EmptyDeck`] if the draw pile is empty.
    pub fn top_deck_card(&self) -> Result<Card> {
        self.draw_pile.top_card().map(|card| *card)
    }

    /// A new state missing the draw pile's top card.
    ///
    /// Fails with [`Error::EmptyDeck`] if the draw pile is empty.
    pub fn without_top_deck_card(&self) -> Result<Self> {
        Ok(Self {
            face_up: self.face_up,
            draw_pile: self.draw_pile.without_top_card()?,
            discards: self.discards.clone(),
        })
    }

    /// Shuffles the entire discard pile into a new draw pile and empties the
    /// discards. This is the only path that replenishes the draw pile, and
    /// the caller must invoke it before any further draw once the pile runs
    /// dry.
    ///
    /// Fails with [`Error::DeckNotEmpty`] unless the draw pile is empty.
    pub fn with_deck_recreated_from_discards(&self, rng: &mut impl Rng) -> Result<Self> {
        if !self.draw_pile.is_empty() {
            return Err(Error::DeckNotEmpty);
        }

        Ok(Self {
            face_up: self.face_up,
            draw_pile: Deck::of(&self.discards, rng),
            discards: Bag::new(),
        })
    }

    /// Appends cards to the discard pile. Never fails.
    pub fn with_more_discarded_cards(&self, additional: &Bag<Card>) -> Self {
        Self {
            face_up: self.face_up,
            draw_pile: self.draw_pile.clone(),
            discards: self.discards.union(additional),
        }
    }

    /// Total number of cards held by this state.
    pub fn total_size(&self) -> usize {
        FACE_UP_CARDS_COUNT + self.draw_pile.len() + self.discards.len()
    }

    /// The projection of this state that every player may see.
    pub fn public_view(&self) -> PublicCardState {
        PublicCardState {
            face_up_cards: self.face_up,
            deck_size: self.deck_size(),
            discards_size: self.discards_size(),
        }
    }
}

/// Observable card state: the face-up cards and the pile sizes, but never
/// the pile contents.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PublicCardState {
    pub face_up_cards: [Card; FACE_UP_CARDS_COUNT],
    pub deck_size: usize,
    pub discards_size: usize,
}

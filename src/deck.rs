use crate::bag::Bag;
use crate::error::{Error, Result};

use im::Vector;
use rand::seq::SliceRandom;
use rand::Rng;

/// A persistent, shuffled sequence of cards.
///
/// Built once from a [`Bag`] and a caller-supplied random source, then only
/// ever consumed from the top. Removing cards returns a new deck that shares
/// structure with the old one; a previously returned deck stays valid and
/// unchanged forever.
///
/// # Examples:
/// ```
/// use railgame::bag::Bag;
/// use railgame::deck::Deck;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(42);
/// let deck = Deck::of(&Bag::of(3, 'a'), &mut rng);
///
/// assert_eq!(deck.len(), 3);
/// assert_eq!(deck.top_card(), Ok(&'a'));
/// assert_eq!(deck.without_top_card().unwrap().len(), 2);
/// assert_eq!(deck.len(), 3);
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Deck<T: Clone> {
    cards: Vector<T>,
}

impl<T: Clone> Deck<T> {
    /// Shuffles the contents of `bag` into a new deck, using the supplied
    /// random source. The same seed and bag always produce the same order.
    pub fn of(bag: &Bag<T>, rng: &mut impl Rng) -> Self
    where
        T: Ord,
    {
        let mut cards: Vec<T> = bag.iter().cloned().collect();
        cards.shuffle(rng);

        Self {
            cards: cards.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The card at the top of the deck.
    ///
    /// Fails with [`Error::EmptyDeck`] if the deck is empty.
    pub fn top_card(&self) -> Result<&T> {
        self.cards.last().ok_or(Error::EmptyDeck)
    }

    /// A new deck missing the top card.
    ///
    /// Fails with [`Error::EmptyDeck`] if the deck is empty.
    pub fn without_top_card(&self) -> Result<Self> {
        let mut cards = self.cards.clone();
        cards.pop_back().ok_or(Error::EmptyDeck)?;

        Ok(Self { cards })
    }

    /// The `count` top cards, as a bag.
    ///
    /// Fails with [`Error::InvalidCount`] unless `count` is in `[0, len]`.
    pub fn top_cards(&self, count: usize) -> Result<Bag<T>>
    where
        T: Ord,
    {
        self.check_count(count)?;

        Ok(self
            .cards
            .iter()
            .skip(self.len() - count)
            .cloned()
            .collect())
    }

    /// A new deck missing the `count` top cards.
    ///
    /// Fails with [`Error::InvalidCount`] unless `count` is in `[0, len]`.
    pub fn without_top_cards(&self, count: usize) -> Result<Self> {
        self.check_count(count)?;

        Ok(Self {
            cards: self.cards.take(self.len() - count),
        })
    }

    fn check_count(&self, count: usize) -> Result<()> {
        if count > self.len() {
            Err(Error::InvalidCount {
                requested: count,
                available: self.len(),
            })
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(17)
    }

    fn sample_bag() -> Bag<u8> {
        [1, 1, 2, 3, 3, 3, 4].into_iter().collect()
    }

    #[test]
    fn shuffling_preserves_the_multiset() {
        let bag = sample_bag();
        let mut deck = Deck::of(&bag, &mut rng());
        assert_eq!(deck.len(), bag.len());

        // Draining the deck card by card yields exactly the bag contents,
        // with none lost or duplicated.
        let mut drained = Vec::new();
        while !deck.is_empty() {
            drained.push(*deck.top_card().unwrap());
            deck = deck.without_top_card().unwrap();
        }
        assert_eq!(drained.into_iter().collect::<Bag<_>>(), bag);
    }

    #[test]
    fn same_seed_same_order() {
        let bag = sample_bag();
        let first = Deck::of(&bag, &mut rng());
        let second = Deck::of(&bag, &mut rng());

        assert_eq!(first, second);
    }

    #[test]
    fn empty_deck_fails_loudly() {
        let deck: Deck<u8> = Deck::of(&Bag::new(), &mut rng());

        assert!(deck.is_empty());
        assert_eq!(deck.top_card(), Err(Error::EmptyDeck));
        assert_eq!(deck.without_top_card(), Err(Error::EmptyDeck));
    }

    #[test]
    fn top_cards_returns_a_bag_of_the_topmost() {
        let deck = Deck::of(&sample_bag(), &mut rng());
        let top_three = deck.top_cards(3).unwrap();
        assert_eq!(top_three.len(), 3);

        // Drawing the same three cards one by one agrees with the bag.
        let mut singles = Vec::new();
        let mut rest = deck.clone();
        for _ in 0..3 {
            singles.push(*rest.top_card().unwrap());
            rest = rest.without_top_card().unwrap();
        }
        assert_eq!(singles.into_iter().collect::<Bag<_>>(), top_three);
        assert_eq!(rest, deck.without_top_cards(3).unwrap());
    }

    #[test]
    fn zero_top_cards_is_allowed() {
        let deck = Deck::of(&sample_bag(), &mut rng());

        assert_eq!(deck.top_cards(0), Ok(Bag::new()));
        assert_eq!(deck.without_top_cards(0), Ok(deck));
    }

    #[test]
    fn out_of_range_counts_are_rejected() {
        let deck = Deck::of(&sample_bag(), &mut rng());
        let expected = Error::InvalidCount {
            requested: 8,
            available: 7,
        };

        assert_eq!(deck.top_cards(8), Err(expected.clone()));
        assert_eq!(deck.without_top_cards(8), Err(expected));
    }

    #[test]
    fn removal_does_not_touch_the_original() {
        let deck = Deck::of(&sample_bag(), &mut rng());
        let smaller = deck.without_top_cards(4).unwrap();

        assert_eq!(deck.len(), 7);
        assert_eq!(smaller.len(), 3);
    }
}

use thiserror::Error;

/// Convenience alias used by every fallible operation in the engine.
pub type Result<T> = std::result::Result<T, Error>;

/// All engine failures are precondition violations: a rejected operation
/// returns one of these and leaves the prior state completely untouched.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum Error {
    #[error("the draw pile is empty")]
    EmptyDeck,
    #[error("requested {requested} cards, but only {available} are available")]
    InvalidCount { requested: usize, available: usize },
    #[error("the bag does not contain the required cards")]
    InsufficientCards,
    #[error("an initial hand must contain {expected} cards, got {actual}")]
    WrongInitialHand { expected: usize, actual: usize },
    #[error("station {station} is not an endpoint of route {route}")]
    ForeignStation { route: String, station: String },
    #[error("route {route} connects a station to itself")]
    IdenticalStations { route: String },
    #[error("route {route} has invalid length {length}")]
    InvalidRouteLength { route: String, length: usize },
    #[error("face-up slot {slot} is out of bounds")]
    InvalidSlot { slot: usize },
    #[error("route {route} is not a tunnel")]
    NotUnderground { route: String },
    #[error("a tunnel claim requires exactly {expected} drawn cards, got {actual}")]
    InvalidDrawnCount { expected: usize, actual: usize },
    #[error("the draw pile is not empty")]
    DeckNotEmpty,
    #[error("a ticket must contain at least one trip")]
    EmptyTicket,
    #[error("player has already chosen their initial tickets")]
    TicketsAlreadyChosen,
    #[error("the chosen tickets are not among the drawn tickets")]
    ChosenTicketsNotDrawn,
    #[error("no cards can be drawn")]
    CannotDrawCards,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_are_human_readable() {
        assert_eq!(Error::EmptyDeck.to_string(), "the draw pile is empty");
        assert_eq!(
            Error::InvalidCount {
                requested: 7,
                available: 3
            }
            .to_string(),
            "requested 7 cards, but only 3 are available"
        );
        assert_eq!(
            Error::InvalidSlot { slot: 9 }.to_string(),
            "face-up slot 9 is out of bounds"
        );
    }
}

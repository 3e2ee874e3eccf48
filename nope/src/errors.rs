/// The error type for rule-level invariant violations.
///
/// Every variant is a programming or protocol error: the snapshot the server
/// sent us cannot be acted on, and continuing would desynchronize the bot
/// from the server's action timeout. These are surfaced to the session layer
/// and terminate the instance instead of being swallowed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RuleViolation {
    /// An empty discard pile outside `GAME_END`. The game must already be
    /// over, so acting on this snapshot is impossible.
    EmptyDiscardPile,
    /// A number card without a value.
    MissingCardValue { card: String },
    /// A nominate card reached color/amount matching without the snapshot
    /// carrying the nominated color to resolve it against.
    UnresolvedNominate { card: String },
    /// The server flipped a starting card that is not a nominate card but
    /// still asked for a nomination.
    UnexpectedFlippedCard { card: String },
    /// A nomination was required but no opponent is eligible as target.
    NoNominationTarget,
}

impl std::error::Error for RuleViolation {}

impl std::fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuleViolation::EmptyDiscardPile => {
                write!(f, "The discard pile is empty although the game has not ended")
            }
            RuleViolation::MissingCardValue { card } => {
                write!(f, "Number card {} carries no value", card)
            }
            RuleViolation::UnresolvedNominate { card } => write!(
                f,
                "Nominate card {} cannot be matched against: the snapshot names no nominated color",
                card
            ),
            RuleViolation::UnexpectedFlippedCard { card } => write!(
                f,
                "A nomination was requested but the flipped starting card {} is not a nominate card",
                card
            ),
            RuleViolation::NoNominationTarget => {
                write!(f, "No opponent is eligible to be nominated")
            }
        }
    }
}

use serde::{Deserialize, Serialize};

use crate::{Card, CardColor, Player};

/// One turn's outbound action.
///
/// An action is terminal and one-shot: the selector produces exactly one per
/// actionable snapshot and it is never retried or amended. Each variant
/// carries a free-text rationale for the server's game log.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Action {
    /// Draw a card from the draw pile.
    Take { explanation: String },
    /// Discard a set of cards; index 0 lands on top of the pile.
    Discard { explanation: String, cards: Vec<Card> },
    /// Play a nominate card (or answer a flipped one, with an empty card
    /// list) and force the chosen player to serve the chosen color/amount.
    #[serde(rename_all = "camelCase")]
    Nominate {
        explanation: String,
        cards: Vec<Card>,
        nominated_player: Player,
        /// Only sent when the nominate card shows all four colors; the
        /// server derives the color from the card itself otherwise.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        nominated_color: Option<CardColor>,
        nominated_amount: u8,
    },
    /// Concede the turn after drawing without finding a playable set.
    #[serde(rename = "nope")]
    SayNope { explanation: String },
}

/// Discriminant of an [`Action`], as echoed in a snapshot's `lastAction`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    #[serde(alias = "TAKE")]
    Take,
    #[serde(alias = "DISCARD")]
    Discard,
    #[serde(alias = "NOMINATE")]
    Nominate,
    #[serde(alias = "NOPE")]
    Nope,
    #[serde(alias = "ELIMINATION")]
    Elimination,
}

impl Action {
    pub fn take(explanation: impl Into<String>) -> Self {
        Action::Take {
            explanation: explanation.into(),
        }
    }

    pub fn discard(cards: Vec<Card>, explanation: impl Into<String>) -> Self {
        Action::Discard {
            explanation: explanation.into(),
            cards,
        }
    }

    pub fn nominate(
        cards: Vec<Card>,
        nominated_player: Player,
        nominated_color: Option<CardColor>,
        nominated_amount: u8,
        explanation: impl Into<String>,
    ) -> Self {
        Action::Nominate {
            explanation: explanation.into(),
            cards,
            nominated_player,
            nominated_color,
            nominated_amount,
        }
    }

    pub fn say_nope(explanation: impl Into<String>) -> Self {
        Action::SayNope {
            explanation: explanation.into(),
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Take { .. } => ActionKind::Take,
            Action::Discard { .. } => ActionKind::Discard,
            Action::Nominate { .. } => ActionKind::Nominate,
            Action::SayNope { .. } => ActionKind::Nope,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discard_preserves_card_order() {
        let first = Card::number(1, [CardColor::Red]);
        let second = Card::number(1, [CardColor::Red, CardColor::Blue]);
        let action = Action::discard(vec![first.clone(), second], "set");
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["type"], "discard");
        // Index 0 must stay the card that lands on the pile top.
        assert_eq!(json["cards"][0]["name"], first.name);
    }

    #[test]
    fn nominate_color_omitted_unless_chosen() {
        let target = Player {
            username: String::from("other"),
            socket_id: String::from("s2"),
            card_amount: Some(2),
            cards: Vec::new(),
            ranking: None,
            disqualified: false,
        };
        let plain = Action::nominate(Vec::new(), target.clone(), None, 1, "flipped");
        let json = serde_json::to_value(&plain).unwrap();
        assert!(json.get("nominatedColor").is_none());
        assert_eq!(json["nominatedAmount"], 1);

        let chosen = Action::nominate(Vec::new(), target, Some(CardColor::Blue), 3, "flipped");
        let json = serde_json::to_value(&chosen).unwrap();
        assert_eq!(json["nominatedColor"], "blue");
    }

    #[test]
    fn legacy_action_kind_spelling() {
        let kind: ActionKind = serde_json::from_str(r#""NOMINATE""#).unwrap();
        assert_eq!(kind, ActionKind::Nominate);
    }
}

use serde::{Deserialize, Serialize};

/// A card in a game of Nope.
///
/// Cards are value copies embedded in a [snapshot](crate::GameSnapshot);
/// the server owns every hand and pile, so nothing here is ever mutated
/// locally.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    #[serde(rename = "type")]
    pub kind: CardKind,
    /// Present on number cards, absent on action cards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<u8>,
    /// The colors this card shows. Wildcards show more than one,
    /// a wildcard nominate shows all four.
    #[serde(rename = "color", alias = "colors")]
    pub colors: Vec<CardColor>,
    /// Server-assigned display name, echoed back when the card is played.
    pub name: String,
}

/// The kind of a [card](Card).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardKind {
    Number,
    Nominate,
    Reset,
    Invisible,
}

/// The color of a [card](Card).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardColor {
    Red,
    Green,
    Blue,
    Yellow,
}

/// All colors in a fixed order, used for tie-breaking and for the
/// color-independent reset requirement.
pub static ALL_COLORS: [CardColor; 4] = [
    CardColor::Red,
    CardColor::Green,
    CardColor::Blue,
    CardColor::Yellow,
];

impl std::fmt::Display for CardColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CardColor::Red => "red",
            CardColor::Green => "green",
            CardColor::Blue => "blue",
            CardColor::Yellow => "yellow",
        };
        write!(f, "{}", name)
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Card {
    /// Builds a number card. The display name follows the server's
    /// `"<value> <colors>"` convention.
    pub fn number(value: u8, colors: impl Into<Vec<CardColor>>) -> Self {
        let colors = colors.into();
        Self {
            kind: CardKind::Number,
            value: Some(value),
            name: format!("{} {}", value, join_colors(&colors)),
            colors,
        }
    }

    /// Builds a nominate card; pass all four colors for a wildcard nominate.
    pub fn nominate(colors: impl Into<Vec<CardColor>>) -> Self {
        let colors = colors.into();
        Self {
            kind: CardKind::Nominate,
            value: None,
            name: format!("nominate {}", join_colors(&colors)),
            colors,
        }
    }

    /// Builds a reset card. Reset cards are color-independent.
    pub fn reset() -> Self {
        Self {
            kind: CardKind::Reset,
            value: None,
            name: String::from("reset"),
            colors: Vec::new(),
        }
    }

    /// Builds an invisible (pass-through) card.
    pub fn invisible(colors: impl Into<Vec<CardColor>>) -> Self {
        let colors = colors.into();
        Self {
            kind: CardKind::Invisible,
            value: None,
            name: format!("invisible {}", join_colors(&colors)),
            colors,
        }
    }

    pub fn has_color(&self, color: CardColor) -> bool {
        self.colors.contains(&color)
    }

    /// Whether this card shows at least one of the given colors.
    pub fn shares_any_color(&self, colors: &[CardColor]) -> bool {
        self.colors.iter().any(|c| colors.contains(c))
    }

    /// A nominate card showing all four colors. Its required color comes
    /// from the nominating player, not from the card itself.
    pub fn is_wildcard_nominate(&self) -> bool {
        self.kind == CardKind::Nominate
            && ALL_COLORS.iter().all(|&c| self.colors.contains(&c))
    }
}

fn join_colors(colors: &[CardColor]) -> String {
    let names: Vec<String> = colors.iter().map(|c| c.to_string()).collect();
    names.join("-")
}

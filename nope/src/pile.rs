use crate::{Card, CardColor, CardKind, GameSnapshot, RuleViolation, ALL_COLORS};

/// Resolves the *effective top card* of the discard pile: the card a discard
/// must match, skipping invisible pass-through cards.
///
/// Invisible cards defer to the card beneath them, so the scan advances while
/// the current card is invisible and more cards remain. A pile of only
/// invisible cards can only occur as the single flipped starting card; the
/// last remaining card is returned in that case.
pub fn effective_top(pile: &[Card]) -> Result<&Card, RuleViolation> {
    if pile.is_empty() {
        return Err(RuleViolation::EmptyDiscardPile);
    }
    let mut idx = 0;
    while pile[idx].kind == CardKind::Invisible && idx + 1 < pile.len() {
        idx += 1;
    }
    Ok(&pile[idx])
}

/// The colors and amount the next discard must match, fully resolved.
///
/// Nominate cards never enter plain color/amount matching: their requirement
/// comes from the snapshot's nominate context, and resolution fails loudly
/// when that context is missing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TopRequirement {
    pub colors: Vec<CardColor>,
    pub amount: u8,
}

impl TopRequirement {
    pub fn resolve(top: &Card, game: &GameSnapshot) -> Result<Self, RuleViolation> {
        match top.kind {
            CardKind::Number => {
                let amount = top.value.ok_or_else(|| RuleViolation::MissingCardValue {
                    card: top.name.clone(),
                })?;
                Ok(Self {
                    colors: top.colors.clone(),
                    amount,
                })
            }
            // Only reachable as the flipped starting card: one card of a
            // matching color suffices.
            CardKind::Invisible => Ok(Self {
                colors: top.colors.clone(),
                amount: 1,
            }),
            // A reset clears positional constraints: any single number card.
            CardKind::Reset => Ok(Self {
                colors: ALL_COLORS.to_vec(),
                amount: 1,
            }),
            CardKind::Nominate => {
                let colors = if top.is_wildcard_nominate() {
                    let color = game.last_nominate_color.ok_or_else(|| {
                        RuleViolation::UnresolvedNominate {
                            card: top.name.clone(),
                        }
                    })?;
                    vec![color]
                } else {
                    top.colors.clone()
                };
                Ok(Self {
                    colors,
                    amount: game.last_nominate_amount.unwrap_or(1),
                })
            }
        }
    }
}

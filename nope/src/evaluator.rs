use crate::{Card, CardColor, CardKind};

/// Tunable weights for ranking discard candidates.
///
/// `breadth` rewards shedding multi-color cards, which are the hardest to
/// match later. `match_penalty` keeps cards whose colors are still well
/// represented in the hand, a one-step lookahead on future sets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EvalWeights {
    pub breadth: f64,
    pub match_penalty: f64,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            breadth: 1.0,
            match_penalty: 0.25,
        }
    }
}

/// How much discarding `card` is worth right now, higher first.
fn discard_score(card: &Card, hand: &[Card], weights: EvalWeights) -> f64 {
    let hand_matches = hand
        .iter()
        .filter(|other| other.shares_any_color(&card.colors))
        .count()
        // The card itself always matches.
        .saturating_sub(1);
    card.colors.len() as f64 * weights.breadth - hand_matches as f64 * weights.match_penalty
}

/// Finds the best discardable set of number cards: `amount` cards sharing one
/// of the required `colors`.
///
/// For each candidate color the matching number cards form one candidate set;
/// candidates are ranked by their mean discard score and the winner is cut
/// down to exactly `amount` cards, best first (index 0 lands on the pile
/// top).
pub fn find_number_set(
    colors: &[CardColor],
    amount: u8,
    hand: &[Card],
    weights: EvalWeights,
) -> Option<Vec<Card>> {
    let amount = amount as usize;
    if amount == 0 {
        return None;
    }

    let mut best: Option<(f64, Vec<(f64, &Card)>)> = None;
    for &color in colors {
        let candidate: Vec<(f64, &Card)> = hand
            .iter()
            .filter(|card| card.kind == CardKind::Number && card.has_color(color))
            .map(|card| (discard_score(card, hand, weights), card))
            .collect();
        if candidate.len() < amount {
            continue;
        }
        let mean = candidate.iter().map(|(score, _)| score).sum::<f64>() / candidate.len() as f64;
        if best.as_ref().map_or(true, |(top, _)| mean > *top) {
            best = Some((mean, candidate));
        }
    }

    let (_, mut cards) = best?;
    cards.sort_by(|(a, _), (b, _)| b.total_cmp(a));
    Some(cards.into_iter().take(amount).map(|(_, c)| c.clone()).collect())
}

/// Discard priority among the action card kinds.
///
/// The order is a policy choice, not a game rule; `Number` entries are
/// ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActionCardOrder(pub [CardKind; 3]);

impl Default for ActionCardOrder {
    fn default() -> Self {
        Self([CardKind::Nominate, CardKind::Reset, CardKind::Invisible])
    }
}

/// Returns the hand's playable action cards in configured priority order:
/// nominate and invisible cards matching the required colors, reset cards
/// unconditionally.
pub fn find_action_cards<'a>(
    colors: &[CardColor],
    hand: &'a [Card],
    order: ActionCardOrder,
) -> Vec<&'a Card> {
    let mut found = Vec::new();
    for kind in order.0 {
        match kind {
            CardKind::Nominate | CardKind::Invisible => found.extend(
                hand.iter()
                    .filter(|card| card.kind == kind && card.shares_any_color(colors)),
            ),
            CardKind::Reset => found.extend(hand.iter().filter(|card| card.kind == CardKind::Reset)),
            CardKind::Number => {}
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;
    use crate::arbitrary::NumberSetInput;
    use crate::ALL_COLORS;

    #[test]
    fn takes_exactly_the_required_amount() {
        // Two red number cards against a red 2: both get discarded.
        let hand = vec![
            Card::number(1, [CardColor::Red]),
            Card::number(2, [CardColor::Red]),
            Card::number(1, [CardColor::Green]),
        ];
        let set = find_number_set(&[CardColor::Red], 2, &hand, EvalWeights::default()).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.iter().all(|c| c.has_color(CardColor::Red)));
    }

    #[test]
    fn insufficient_cards_yield_nothing() {
        let hand = vec![
            Card::number(1, [CardColor::Yellow]),
            Card::number(2, [CardColor::Yellow]),
        ];
        assert_eq!(
            find_number_set(&[CardColor::Yellow], 3, &hand, EvalWeights::default()),
            None
        );
    }

    #[test]
    fn multi_color_cards_go_first() {
        // The wildcard number card is harder to match later, so it should
        // lead the discarded set.
        let wild = Card::number(1, [CardColor::Blue, CardColor::Red]);
        let plain = Card::number(2, [CardColor::Blue]);
        let hand = vec![plain.clone(), wild.clone()];
        let set = find_number_set(&[CardColor::Blue], 1, &hand, EvalWeights::default()).unwrap();
        assert_eq!(set, vec![wild]);
    }

    #[test]
    fn richer_color_wins_between_candidates() {
        // Both colors can serve amount 1; the blue candidate holds the
        // broader cards and scores higher on average.
        let hand = vec![
            Card::number(1, [CardColor::Green]),
            Card::number(1, [CardColor::Blue, CardColor::Yellow]),
        ];
        let set = find_number_set(
            &[CardColor::Green, CardColor::Blue],
            1,
            &hand,
            EvalWeights::default(),
        )
        .unwrap();
        assert!(set[0].has_color(CardColor::Blue));
    }

    #[test]
    fn action_cards_follow_configured_order() {
        let nominate = Card::nominate([CardColor::Red]);
        let reset = Card::reset();
        let invisible = Card::invisible([CardColor::Red]);
        let hand = vec![invisible.clone(), reset.clone(), nominate.clone()];

        let found = find_action_cards(&[CardColor::Red], &hand, ActionCardOrder::default());
        assert_eq!(found, vec![&nominate, &reset, &invisible]);

        let reversed = ActionCardOrder([CardKind::Invisible, CardKind::Reset, CardKind::Nominate]);
        let found = find_action_cards(&[CardColor::Red], &hand, reversed);
        assert_eq!(found, vec![&invisible, &reset, &nominate]);
    }

    #[test]
    fn color_mismatched_action_cards_are_skipped() {
        let hand = vec![
            Card::nominate([CardColor::Green]),
            Card::invisible([CardColor::Green]),
            Card::reset(),
        ];
        let found = find_action_cards(&[CardColor::Red], &hand, ActionCardOrder::default());
        // Only the color-independent reset survives.
        assert_eq!(found, vec![&hand[2]]);
    }

    #[test]
    fn wildcard_nominate_matches_every_color() {
        let hand = vec![Card::nominate(ALL_COLORS)];
        for &color in &ALL_COLORS {
            assert_eq!(
                find_action_cards(&[color], &hand, ActionCardOrder::default()).len(),
                1
            );
        }
    }

    quickcheck! {
        /// Any returned set has exactly `amount` cards, all number cards,
        /// all sharing one of the required colors.
        fn returned_sets_are_valid(input: NumberSetInput) -> bool {
            let NumberSetInput { colors, amount, hand } = input;
            match find_number_set(&colors, amount, &hand, EvalWeights::default()) {
                None => true,
                Some(set) => {
                    set.len() == amount as usize
                        && set.iter().all(|c| c.kind == CardKind::Number)
                        && colors
                            .iter()
                            .any(|&color| set.iter().all(|c| c.has_color(color)))
                }
            }
        }
    }
}

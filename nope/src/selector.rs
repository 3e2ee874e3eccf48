use crate::{
    effective_top, find_action_cards, find_number_set, Action, ActionCardOrder, Card, CardColor,
    CardKind, EvalWeights, GameSnapshot, GameState, Player, RuleViolation, TopRequirement,
    ALL_COLORS,
};

/// Which color to demand when playing a wildcard nominate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NominateColorPolicy {
    /// Always demand the same color.
    Static(CardColor),
    /// Demand the color the own hand holds least of, so the bot is unlikely
    /// to be re-targeted with a color it cannot serve.
    LeastHeld,
}

/// How many cards to demand from the nominated player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NominateAmountPolicy {
    pub base: u8,
    pub escalated: u8,
    /// Escalate only against targets with at least this many known cards.
    pub escalate_at: u32,
}

impl Default for NominateAmountPolicy {
    fn default() -> Self {
        Self {
            base: 1,
            escalated: 3,
            escalate_at: 3,
        }
    }
}

impl NominateAmountPolicy {
    /// Never escalate; always demand `amount`.
    pub fn flat(amount: u8) -> Self {
        Self {
            base: amount,
            escalated: amount,
            escalate_at: u32::MAX,
        }
    }
}

/// All policy knobs of the [`ActionSelector`], passed in at construction so
/// tests can sweep configurations deterministically.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelectorConfig {
    pub weights: EvalWeights,
    pub action_order: ActionCardOrder,
    pub color_policy: NominateColorPolicy,
    pub amount_policy: NominateAmountPolicy,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            weights: EvalWeights::default(),
            action_order: ActionCardOrder::default(),
            color_policy: NominateColorPolicy::LeastHeld,
            amount_policy: NominateAmountPolicy::default(),
        }
    }
}

/// The turn-level decision policy.
///
/// `decide` is a pure function of the snapshot and the configuration: the
/// same snapshot always yields the same action, and an actionable snapshot
/// always yields exactly one.
pub struct ActionSelector {
    config: SelectorConfig,
}

enum Play {
    Set(Vec<Card>),
    ActionCard(Card),
}

impl ActionSelector {
    pub fn new(config: SelectorConfig) -> Self {
        Self { config }
    }

    /// Computes the single action for this snapshot, or `None` when the
    /// state is observation-only. The caller is responsible for only asking
    /// when the snapshot's current player is this client.
    pub fn decide(&self, game: &GameSnapshot) -> Result<Option<Action>, RuleViolation> {
        let Some(me) = game.current_player.as_ref() else {
            return Ok(None);
        };
        match game.state {
            GameState::GameStart | GameState::GameEnd | GameState::Cancelled => Ok(None),
            GameState::NominateFlipped => self.answer_flipped_nominate(game, me).map(Some),
            GameState::TurnStart | GameState::CardDrawn => self.play_turn(game, me).map(Some),
        }
    }

    /// The opening card is a nominate card: act as if this client had just
    /// played it, with an empty card list.
    fn answer_flipped_nominate(
        &self,
        game: &GameSnapshot,
        me: &Player,
    ) -> Result<Action, RuleViolation> {
        let flipped = game.top_card().ok_or(RuleViolation::EmptyDiscardPile)?;
        if flipped.kind != CardKind::Nominate {
            return Err(RuleViolation::UnexpectedFlippedCard {
                card: flipped.name.clone(),
            });
        }
        let target = self.choose_target(game, me)?;
        let wildcard = flipped.is_wildcard_nominate();
        let color = wildcard.then(|| self.choose_color(&me.cards));
        let amount = self.choose_amount(target, wildcard, flipped, color, &me.cards);
        Ok(Action::nominate(
            Vec::new(),
            target.clone(),
            color,
            amount,
            format!("answering the flipped {}", flipped.name),
        ))
    }

    fn play_turn(&self, game: &GameSnapshot, me: &Player) -> Result<Action, RuleViolation> {
        let hand = &me.cards;
        let top = effective_top(&game.discard_pile)?;
        let requirement = TopRequirement::resolve(top, game)?;

        let play = if top.kind == CardKind::Nominate {
            // Nominate response: serving the demanded set beats chaining
            // another action card.
            self.number_play(&requirement, hand)
                .or_else(|| self.action_play(&requirement, hand))
        } else {
            self.action_play(&requirement, hand)
                .or_else(|| self.number_play(&requirement, hand))
        };

        match play {
            Some(Play::Set(cards)) => Ok(Action::discard(
                cards,
                format!("serving {} matching number cards", requirement.amount),
            )),
            Some(Play::ActionCard(card)) => self.play_action_card(card, game, me),
            None if game.state == GameState::CardDrawn => {
                Ok(Action::say_nope("drew a card and still cannot play"))
            }
            None => Ok(Action::take("no playable set, drawing a card")),
        }
    }

    fn number_play(&self, requirement: &TopRequirement, hand: &[Card]) -> Option<Play> {
        find_number_set(
            &requirement.colors,
            requirement.amount,
            hand,
            self.config.weights,
        )
        .map(Play::Set)
    }

    fn action_play(&self, requirement: &TopRequirement, hand: &[Card]) -> Option<Play> {
        find_action_cards(&requirement.colors, hand, self.config.action_order)
            .first()
            .map(|card| Play::ActionCard((*card).clone()))
    }

    fn play_action_card(
        &self,
        card: Card,
        game: &GameSnapshot,
        me: &Player,
    ) -> Result<Action, RuleViolation> {
        if card.kind != CardKind::Nominate {
            let explanation = format!("playing action card {}", card.name);
            return Ok(Action::discard(vec![card], explanation));
        }
        let target = self.choose_target(game, me)?;
        let wildcard = card.is_wildcard_nominate();
        let color = wildcard.then(|| self.choose_color(&me.cards));
        let amount = self.choose_amount(target, wildcard, &card, color, &me.cards);
        let explanation = format!("nominating {} with {}", target.username, card.name);
        Ok(Action::nominate(
            vec![card],
            target.clone(),
            color,
            amount,
            explanation,
        ))
    }

    /// The opponent with the fewest known cards; ties and unknown counts
    /// fall back to list order.
    fn choose_target<'a>(
        &self,
        game: &'a GameSnapshot,
        me: &'a Player,
    ) -> Result<&'a Player, RuleViolation> {
        let mut best: Option<&Player> = None;
        for player in game.opponents_of(me) {
            match best {
                None => best = Some(player),
                Some(current) => {
                    let known = player.card_amount.unwrap_or(u32::MAX);
                    if known < current.card_amount.unwrap_or(u32::MAX) {
                        best = Some(player);
                    }
                }
            }
        }
        best.ok_or(RuleViolation::NoNominationTarget)
    }

    fn choose_color(&self, hand: &[Card]) -> CardColor {
        match self.config.color_policy {
            NominateColorPolicy::Static(color) => color,
            NominateColorPolicy::LeastHeld => {
                let mut least = ALL_COLORS[0];
                let mut least_count = usize::MAX;
                for &color in &ALL_COLORS {
                    let count = hand.iter().filter(|card| card.has_color(color)).count();
                    if count < least_count {
                        least = color;
                        least_count = count;
                    }
                }
                least
            }
        }
    }

    /// Escalates the demanded amount against well-stocked targets, unless
    /// the own hand is positioned to serve the demanded color anyway.
    fn choose_amount(
        &self,
        target: &Player,
        wildcard: bool,
        trigger: &Card,
        color: Option<CardColor>,
        hand: &[Card],
    ) -> u8 {
        let policy = self.config.amount_policy;
        let own_matching = hand
            .iter()
            .filter(|card| card.kind == CardKind::Number)
            .filter(|card| match color {
                Some(color) => card.has_color(color),
                None => card.shares_any_color(&trigger.colors),
            })
            .count();
        match target.card_amount {
            Some(known)
                if known >= policy.escalate_at
                    && (wildcard || (own_matching as u8) < policy.escalated) =>
            {
                policy.escalated
            }
            _ => policy.base,
        }
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;
    use crate::arbitrary::{player, snapshot_with_pile, ActionableSnapshot};

    fn selector() -> ActionSelector {
        ActionSelector::new(SelectorConfig::default())
    }

    /// Snapshot where the bot is the current player with the given hand.
    fn turn(state: GameState, pile: Vec<Card>, hand: Vec<Card>) -> GameSnapshot {
        let mut me = player("bot", Some(hand.len() as u32));
        me.cards = hand;
        let opponent = player("other", Some(5));
        let mut game = snapshot_with_pile(pile);
        game.state = state;
        game.players = vec![me.clone(), opponent];
        game.current_player = Some(me);
        game
    }

    #[test]
    fn discards_matching_number_set() {
        // Top card red 2, hand has two red cards: both go.
        let game = turn(
            GameState::TurnStart,
            vec![Card::number(2, [CardColor::Red])],
            vec![
                Card::number(1, [CardColor::Red]),
                Card::number(3, [CardColor::Red]),
                Card::number(1, [CardColor::Green]),
            ],
        );
        match selector().decide(&game).unwrap().unwrap() {
            Action::Discard { cards, .. } => {
                assert_eq!(cards.len(), 2);
                assert!(cards.iter().all(|c| c.has_color(CardColor::Red)));
            }
            other => panic!("expected discard, got {:?}", other),
        }
    }

    #[test]
    fn single_invisible_start_card_needs_one_match() {
        let blue = Card::number(1, [CardColor::Blue]);
        let game = turn(
            GameState::TurnStart,
            vec![Card::invisible([CardColor::Blue])],
            vec![blue.clone(), Card::number(2, [CardColor::Red])],
        );
        match selector().decide(&game).unwrap().unwrap() {
            Action::Discard { cards, .. } => assert_eq!(cards, vec![blue]),
            other => panic!("expected discard, got {:?}", other),
        }
    }

    #[test]
    fn says_nope_after_fruitless_draw() {
        let game = turn(
            GameState::CardDrawn,
            vec![Card::number(3, [CardColor::Yellow])],
            vec![
                Card::number(1, [CardColor::Yellow]),
                Card::number(2, [CardColor::Yellow]),
            ],
        );
        assert!(matches!(
            selector().decide(&game).unwrap().unwrap(),
            Action::SayNope { .. }
        ));
    }

    #[test]
    fn takes_a_card_before_drawing() {
        let game = turn(
            GameState::TurnStart,
            vec![Card::number(3, [CardColor::Yellow])],
            vec![
                Card::number(1, [CardColor::Yellow]),
                Card::number(2, [CardColor::Yellow]),
            ],
        );
        assert!(matches!(
            selector().decide(&game).unwrap().unwrap(),
            Action::Take { .. }
        ));
    }

    #[test]
    fn flipped_nominate_targets_shortest_hand() {
        let mut me = player("bot", Some(5));
        me.cards = vec![Card::number(1, [CardColor::Red])];
        let big = player("big", Some(5));
        let small = player("small", Some(2));
        let mut game = snapshot_with_pile(vec![Card::nominate(ALL_COLORS)]);
        game.state = GameState::NominateFlipped;
        game.players = vec![me.clone(), big, small];
        game.current_player = Some(me);

        match selector().decide(&game).unwrap().unwrap() {
            Action::Nominate {
                cards,
                nominated_player,
                nominated_color,
                ..
            } => {
                assert!(cards.is_empty());
                assert_eq!(nominated_player.username, "small");
                // Wildcard flip: a color must be demanded.
                assert!(nominated_color.is_some());
            }
            other => panic!("expected nominate, got {:?}", other),
        }
    }

    #[test]
    fn flipped_single_color_nominate_omits_color() {
        let mut me = player("bot", Some(1));
        me.cards = vec![Card::number(1, [CardColor::Red])];
        let other = player("other", Some(4));
        let mut game = snapshot_with_pile(vec![Card::nominate([CardColor::Green])]);
        game.state = GameState::NominateFlipped;
        game.players = vec![me.clone(), other];
        game.current_player = Some(me);

        match selector().decide(&game).unwrap().unwrap() {
            Action::Nominate {
                nominated_color, ..
            } => assert_eq!(nominated_color, None),
            other => panic!("expected nominate, got {:?}", other),
        }
    }

    #[test]
    fn action_card_beats_number_set_in_standard_policy() {
        let nominate = Card::nominate([CardColor::Red]);
        let game = turn(
            GameState::TurnStart,
            vec![Card::number(1, [CardColor::Red])],
            vec![Card::number(2, [CardColor::Red]), nominate.clone()],
        );
        match selector().decide(&game).unwrap().unwrap() {
            Action::Nominate { cards, .. } => assert_eq!(cards, vec![nominate]),
            other => panic!("expected nominate, got {:?}", other),
        }
    }

    #[test]
    fn nominate_response_prefers_serving_the_set() {
        // Forced to serve 2 green; hand could also chain a reset, but the
        // number set wins under the nominate top card.
        let mut game = turn(
            GameState::TurnStart,
            vec![Card::nominate([CardColor::Green])],
            vec![
                Card::reset(),
                Card::number(1, [CardColor::Green]),
                Card::number(2, [CardColor::Green]),
            ],
        );
        game.last_nominate_amount = Some(2);
        match selector().decide(&game).unwrap().unwrap() {
            Action::Discard { cards, .. } => {
                assert_eq!(cards.len(), 2);
                assert!(cards.iter().all(|c| c.kind == CardKind::Number));
            }
            other => panic!("expected discard, got {:?}", other),
        }
    }

    #[test]
    fn nominate_response_falls_back_to_action_cards() {
        let mut game = turn(
            GameState::TurnStart,
            vec![Card::nominate([CardColor::Green])],
            vec![Card::reset(), Card::number(1, [CardColor::Red])],
        );
        game.last_nominate_amount = Some(2);
        match selector().decide(&game).unwrap().unwrap() {
            Action::Discard { cards, .. } => assert_eq!(cards[0].kind, CardKind::Reset),
            other => panic!("expected discard, got {:?}", other),
        }
    }

    #[test]
    fn least_held_color_avoids_own_strengths() {
        let me_cards = vec![
            Card::number(1, [CardColor::Red]),
            Card::number(2, [CardColor::Red]),
            Card::number(1, [CardColor::Green]),
            Card::number(1, [CardColor::Blue]),
        ];
        // Yellow is unrepresented, so it is the safest demand.
        assert_eq!(selector().choose_color(&me_cards), CardColor::Yellow);
    }

    #[test]
    fn static_color_policy_is_honored() {
        let config = SelectorConfig {
            color_policy: NominateColorPolicy::Static(CardColor::Blue),
            ..SelectorConfig::default()
        };
        assert_eq!(
            ActionSelector::new(config).choose_color(&[]),
            CardColor::Blue
        );
    }

    #[test]
    fn amount_escalates_against_stocked_targets() {
        let sel = selector();
        let trigger = Card::nominate(ALL_COLORS);
        let stocked = player("other", Some(4));
        let thin = player("other", Some(1));
        let unknown = player("other", None);
        assert_eq!(
            sel.choose_amount(&stocked, true, &trigger, Some(CardColor::Red), &[]),
            3
        );
        assert_eq!(
            sel.choose_amount(&thin, true, &trigger, Some(CardColor::Red), &[]),
            1
        );
        assert_eq!(
            sel.choose_amount(&unknown, true, &trigger, Some(CardColor::Red), &[]),
            1
        );
    }

    #[test]
    fn amount_stays_low_when_own_hand_serves_the_color() {
        let sel = selector();
        let trigger = Card::nominate([CardColor::Red]);
        let stocked = player("other", Some(5));
        let strong_hand = vec![
            Card::number(1, [CardColor::Red]),
            Card::number(2, [CardColor::Red]),
            Card::number(3, [CardColor::Red]),
        ];
        // Non-wildcard trigger and three own matches: no reason to escalate.
        assert_eq!(
            sel.choose_amount(&stocked, false, &trigger, None, &strong_hand),
            1
        );
    }

    #[test]
    fn observation_states_yield_no_action() {
        for state in [GameState::GameStart, GameState::GameEnd, GameState::Cancelled] {
            let game = turn(state, vec![Card::reset()], vec![Card::reset()]);
            assert_eq!(selector().decide(&game).unwrap(), None);
        }
    }

    #[test]
    fn nomination_without_opponents_is_fatal() {
        let mut me = player("bot", Some(1));
        me.cards = vec![Card::number(1, [CardColor::Red])];
        let mut game = snapshot_with_pile(vec![Card::nominate(ALL_COLORS)]);
        game.state = GameState::NominateFlipped;
        game.players = vec![me.clone()];
        game.current_player = Some(me);
        assert_eq!(
            selector().decide(&game),
            Err(RuleViolation::NoNominationTarget)
        );
    }

    quickcheck! {
        /// The same immutable snapshot always yields the same action.
        fn decisions_are_deterministic(input: ActionableSnapshot) -> bool {
            let sel = selector();
            sel.decide(&input.0).unwrap() == sel.decide(&input.0).unwrap()
        }

        /// Every actionable snapshot yields exactly one action.
        fn actionable_snapshots_always_get_an_action(input: ActionableSnapshot) -> bool {
            matches!(selector().decide(&input.0), Ok(Some(_)))
        }
    }
}

use quickcheck::{Arbitrary, Gen};

use crate::{Card, CardColor, GameSnapshot, GameState, Player, ALL_COLORS};

/// A snapshot with the given discard pile and no players; tests fill in the
/// rest as needed.
pub(crate) fn snapshot_with_pile(pile: Vec<Card>) -> GameSnapshot {
    GameSnapshot {
        id: String::from("g-test"),
        state: GameState::TurnStart,
        no_action_cards: false,
        no_wild_cards: false,
        one_more_start_cards: false,
        action_timeout: None,
        invitation_timeout: None,
        start_with_rejection: false,
        encounter_round: None,
        player_amount: None,
        players: Vec::new(),
        discard_pile: pile,
        last_action: None,
        last_nominate_amount: None,
        last_nominate_color: None,
        current_player: None,
        start_time: None,
        end_time: None,
    }
}

pub(crate) fn player(username: &str, card_amount: Option<u32>) -> Player {
    Player {
        username: String::from(username),
        socket_id: format!("socket-{}", username),
        card_amount,
        cards: Vec::new(),
        ranking: None,
        disqualified: false,
    }
}

impl Arbitrary for CardColor {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&ALL_COLORS).unwrap()
    }
}

impl Arbitrary for Card {
    fn arbitrary(g: &mut Gen) -> Self {
        match *g.choose(&[0u8, 1, 2, 3]).unwrap() {
            0 => {
                let value = *g.choose(&[1, 2, 3]).unwrap();
                Card::number(value, distinct_colors(g))
            }
            1 => {
                if bool::arbitrary(g) {
                    Card::nominate(ALL_COLORS)
                } else {
                    Card::nominate([CardColor::arbitrary(g)])
                }
            }
            2 => Card::reset(),
            _ => Card::invisible([CardColor::arbitrary(g)]),
        }
    }
}

/// One or two distinct colors (number cards are single-color or two-color
/// wildcards).
fn distinct_colors(g: &mut Gen) -> Vec<CardColor> {
    let first = CardColor::arbitrary(g);
    if bool::arbitrary(g) {
        let second = loop {
            let c = CardColor::arbitrary(g);
            if c != first {
                break c;
            }
        };
        vec![first, second]
    } else {
        vec![first]
    }
}

/// Input for the number-set search properties.
#[derive(Clone, Debug)]
pub(crate) struct NumberSetInput {
    // Nonempty
    pub colors: Vec<CardColor>,
    pub amount: u8,
    pub hand: Vec<Card>,
}

impl Arbitrary for NumberSetInput {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut colors = vec![CardColor::arbitrary(g)];
        if bool::arbitrary(g) {
            colors.push(CardColor::arbitrary(g));
        }
        NumberSetInput {
            colors,
            amount: *g.choose(&[1, 2, 3]).unwrap(),
            hand: small_hand(g),
        }
    }
}

/// A snapshot in `TURN_START` or `CARD_DRAWN` where the generated client is
/// the current player. Shaped so that the selector can always act on it:
/// the pile is nonempty, nominate context is present, and at least one
/// opponent is in the game.
#[derive(Clone, Debug)]
pub(crate) struct ActionableSnapshot(pub GameSnapshot);

impl Arbitrary for ActionableSnapshot {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut pile = small_hand(g);
        if pile.is_empty() {
            pile.push(Card::arbitrary(g));
        }
        let mut game = snapshot_with_pile(pile);
        game.state = *g.choose(&[GameState::TurnStart, GameState::CardDrawn]).unwrap();
        game.last_nominate_color = Some(CardColor::arbitrary(g));
        game.last_nominate_amount = Some(*g.choose(&[1, 2, 3]).unwrap());

        let mut me = player("bot", None);
        me.cards = small_hand(g);
        me.card_amount = Some(me.cards.len() as u32);
        let opponent_count = *g.choose(&[1, 2, 3]).unwrap();
        let mut players = vec![me.clone()];
        for i in 0..opponent_count {
            let known = if bool::arbitrary(g) {
                Some(*g.choose(&[1u32, 2, 3, 4, 5, 6, 7]).unwrap())
            } else {
                None
            };
            players.push(player(&format!("opponent-{}", i), known));
        }
        game.players = players;
        game.current_player = Some(me);
        ActionableSnapshot(game)
    }
}

fn small_hand(g: &mut Gen) -> Vec<Card> {
    let len = *g.choose(&[0usize, 1, 2, 3, 4, 5, 6]).unwrap();
    (0..len).map(|_| Card::arbitrary(g)).collect()
}

use serde::{Deserialize, Serialize};

use crate::{ActionKind, Card, CardColor};

/// One authoritative, complete push of game state.
///
/// A snapshot is never patched: each `game:state` event replaces the previous
/// one wholesale, and every decision is computed fresh from the latest copy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub id: String,
    pub state: GameState,
    #[serde(default)]
    pub no_action_cards: bool,
    #[serde(default)]
    pub no_wild_cards: bool,
    #[serde(default)]
    pub one_more_start_cards: bool,
    /// Seconds the server waits for an action before disqualifying.
    #[serde(default)]
    pub action_timeout: Option<u32>,
    #[serde(default)]
    pub invitation_timeout: Option<u32>,
    #[serde(default)]
    pub start_with_rejection: bool,
    #[serde(default)]
    pub encounter_round: Option<u32>,
    #[serde(default)]
    pub player_amount: Option<u32>,
    #[serde(default)]
    pub players: Vec<Player>,
    /// Index 0 is the top of the pile (the most recently played card).
    #[serde(default)]
    pub discard_pile: Vec<Card>,
    #[serde(default)]
    pub last_action: Option<LastAction>,
    /// Valid only immediately after a nominate action.
    #[serde(default)]
    pub last_nominate_amount: Option<u8>,
    /// Valid only immediately after a nominate action.
    #[serde(default)]
    pub last_nominate_color: Option<CardColor>,
    #[serde(default)]
    pub current_player: Option<Player>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
}

/// The game phase carried in a snapshot's `state` field.
///
/// Transitions are driven entirely by the server; the client only reacts to
/// the snapshot it is handed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameState {
    GameStart,
    /// The flipped starting card is itself a nominate card; the current
    /// player must nominate as if they had just played it.
    NominateFlipped,
    TurnStart,
    CardDrawn,
    GameEnd,
    Cancelled,
}

/// A player as reported by the server.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub username: String,
    #[serde(default)]
    pub socket_id: String,
    /// Unknown for opponents in some snapshots.
    #[serde(default)]
    pub card_amount: Option<u32>,
    /// Populated only for the client's own player.
    #[serde(default)]
    pub cards: Vec<Card>,
    #[serde(default)]
    pub ranking: Option<u32>,
    #[serde(default)]
    pub disqualified: bool,
}

impl Player {
    /// Identity check that prefers the connection id and falls back to the
    /// username when either side lacks one (e.g. directory entries).
    pub fn is_same(&self, other: &Player) -> bool {
        if !self.socket_id.is_empty() && !other.socket_id.is_empty() {
            self.socket_id == other.socket_id
        } else {
            self.username == other.username
        }
    }
}

/// The most recent action the server applied, echoed inside a snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastAction {
    #[serde(rename = "type")]
    pub kind: ActionKind,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub player: Option<Player>,
}

impl GameSnapshot {
    /// The card on top of the discard pile, if any.
    pub fn top_card(&self) -> Option<&Card> {
        self.discard_pile.first()
    }

    /// Opponents of `player` that are still in the game, in list order.
    pub fn opponents_of<'a>(&'a self, player: &'a Player) -> impl Iterator<Item = &'a Player> {
        self.players
            .iter()
            .filter(move |p| !p.is_same(player) && !p.disqualified)
    }
}

/// A tournament as reported by invite and end events.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub id: u64,
    #[serde(default)]
    pub mode: Option<TournamentMode>,
    #[serde(default)]
    pub participants: Vec<TournamentParticipant>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentMode {
    pub name: String,
    #[serde(default)]
    pub number_of_rounds: u32,
    #[serde(default)]
    pub points_per_game_win: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentParticipant {
    pub username: String,
    #[serde(default)]
    pub ranking: Option<u32>,
    #[serde(default)]
    pub disqualified: bool,
    #[serde(default)]
    pub score: Option<i64>,
}

/// Configuration posted to the start-game endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartGameConfig {
    pub no_action_cards: bool,
    pub no_wild_cards: bool,
    pub one_more_start_cards: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_timeout: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invitation_timeout: Option<u32>,
    #[serde(default)]
    pub start_with_rejection: bool,
    /// The invited players, the inviting client included.
    pub players: Vec<Player>,
}

/// Roster returned by the start-game endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StartGameReturn {
    #[serde(default)]
    pub players: Vec<Player>,
}

/// Configuration posted to the start-tournament endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartTournamentConfig {
    pub mode: TournamentMode,
    pub players: Vec<Player>,
}

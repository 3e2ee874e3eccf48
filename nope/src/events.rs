use serde::{Deserialize, Serialize};

use crate::{Action, GameSnapshot, Tournament};

/// Push events delivered by the server, decoded once at the transport
/// boundary and dispatched by exhaustive matching.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ServerEvent {
    /// A full replacement snapshot of the running game.
    #[serde(rename = "game:state")]
    GameState(GameSnapshot),

    /// Invitation to a game; must be answered with a [`PlayerReady`].
    #[serde(rename = "game:invite")]
    GameInvite(GameSnapshot),

    /// Invitation to a tournament; must be answered with a [`PlayerReady`].
    #[serde(rename = "tournament:invite")]
    TournamentInvite(Tournament),

    /// Final snapshot including rankings.
    #[serde(rename = "game:end")]
    GameEnd(GameSnapshot),

    #[serde(rename = "tournament:end")]
    TournamentEnd(Tournament),

    /// This client was eliminated (empty hand or disqualification).
    #[serde(rename = "eliminated")]
    Eliminated(PlayerEliminated),

    /// Communication-level error; informational, the connection stays up.
    #[serde(rename = "error")]
    CommunicationError(CommunicationError),
}

/// Messages sent from the client to the server.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ClientMessage {
    /// The single action answering an actionable snapshot.
    #[serde(rename = "game:playAction")]
    PlayAction(Action),

    /// Answer to a game or tournament invitation.
    #[serde(rename = "ready")]
    Ready(PlayerReady),
}

/// Invitation answer payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerReady {
    pub accept: bool,
    #[serde(rename = "type")]
    pub ready_type: ReadyType,
    pub invite_id: String,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadyType {
    Game,
    Tournament,
}

/// Payload of the `eliminated` event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerEliminated {
    pub reason: String,
    #[serde(default)]
    pub disqualified: bool,
}

/// Payload of the `error` event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CommunicationError {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_envelope_decodes_by_name() {
        let event: ServerEvent = serde_json::from_str(
            r#"{"event":"eliminated","data":{"reason":"hand is empty","disqualified":false}}"#,
        )
        .unwrap();
        assert_eq!(
            event,
            ServerEvent::Eliminated(PlayerEliminated {
                reason: String::from("hand is empty"),
                disqualified: false,
            })
        );
    }

    #[test]
    fn ready_envelope() {
        let message = ClientMessage::Ready(PlayerReady {
            accept: true,
            ready_type: ReadyType::Game,
            invite_id: String::from("g-1"),
        });
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["event"], "ready");
        assert_eq!(json["data"]["type"], "game");
        assert_eq!(json["data"]["inviteId"], "g-1");
    }
}

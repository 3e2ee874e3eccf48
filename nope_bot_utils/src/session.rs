use anyhow::Context;
use nope::{
    ActionSelector, ClientMessage, GameSnapshot, PlayerReady, ReadyType, ServerEvent, Tournament,
};
use tracing::{debug, info, warn};

use crate::NopeHandler;

/// The client-side protocol state machine.
///
/// Sequences inbound [`ServerEvent`]s into at most one outbound
/// [`ClientMessage`] each: the current snapshot is replaced wholesale per
/// push, and the selector is invoked exactly once per snapshot in which this
/// client is the current player. Fatal rule violations propagate out of
/// [`handle_event`](GameSession::handle_event) instead of being swallowed,
/// since an unresolvable snapshot would silently run down the server's
/// action timeout.
pub struct GameSession<H> {
    username: String,
    selector: ActionSelector,
    handler: H,
    current: Option<GameSnapshot>,
}

impl<H: NopeHandler> GameSession<H> {
    pub fn new(username: impl Into<String>, selector: ActionSelector, handler: H) -> Self {
        Self {
            username: username.into(),
            selector,
            handler,
            current: None,
        }
    }

    /// The latest snapshot, if a game is running.
    pub fn snapshot(&self) -> Option<&GameSnapshot> {
        self.current.as_ref()
    }

    pub fn handler(&mut self) -> &mut H {
        &mut self.handler
    }

    /// Feeds one decoded event through the state machine.
    pub fn handle_event(&mut self, event: ServerEvent) -> anyhow::Result<Option<ClientMessage>> {
        match event {
            ServerEvent::GameState(game) => self.on_game_state(game),
            ServerEvent::GameInvite(game) => {
                let accept = self.handler.game_invite(&game);
                info!(game = %game.id, accept, "game invite");
                Ok(Some(ClientMessage::Ready(PlayerReady {
                    accept,
                    ready_type: ReadyType::Game,
                    invite_id: game.id,
                })))
            }
            ServerEvent::TournamentInvite(tournament) => {
                let accept = self.handler.tournament_invite(&tournament);
                info!(tournament = tournament.id, accept, "tournament invite");
                Ok(Some(ClientMessage::Ready(PlayerReady {
                    accept,
                    ready_type: ReadyType::Tournament,
                    invite_id: tournament.id.to_string(),
                })))
            }
            ServerEvent::GameEnd(game) => {
                log_rankings(&game);
                self.handler.game_end(&game);
                self.current = None;
                Ok(None)
            }
            ServerEvent::TournamentEnd(tournament) => {
                self.on_tournament_end(tournament);
                Ok(None)
            }
            ServerEvent::Eliminated(note) => {
                warn!(reason = %note.reason, disqualified = note.disqualified, "eliminated");
                self.handler.eliminated(&note);
                Ok(None)
            }
            ServerEvent::CommunicationError(error) => {
                warn!(message = %error.message, "communication error");
                self.handler.communication_error(&error);
                Ok(None)
            }
        }
    }

    fn on_game_state(&mut self, game: GameSnapshot) -> anyhow::Result<Option<ClientMessage>> {
        debug!(game = %game.id, state = ?game.state, "game state");
        let our_turn = game
            .current_player
            .as_ref()
            .map_or(false, |p| p.username == self.username);
        let action = if our_turn {
            self.selector
                .decide(&game)
                .with_context(|| format!("unresolvable game state in game {}", game.id))?
        } else {
            None
        };
        if let Some(action) = &action {
            info!(kind = ?action.kind(), "playing action");
        }
        self.current = Some(game);
        Ok(action.map(ClientMessage::PlayAction))
    }

    fn on_tournament_end(&mut self, tournament: Tournament) {
        for participant in &tournament.participants {
            info!(
                player = %participant.username,
                ranking = ?participant.ranking,
                "tournament result"
            );
        }
        self.handler.tournament_end(&tournament);
    }
}

fn log_rankings(game: &GameSnapshot) {
    for player in &game.players {
        info!(
            player = %player.username,
            ranking = ?player.ranking,
            disqualified = player.disqualified,
            "final ranking"
        );
    }
}

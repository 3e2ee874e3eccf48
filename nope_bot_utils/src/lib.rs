mod session;
pub use session::*;

use nope::{CommunicationError, GameSnapshot, PlayerEliminated, Tournament};

/// A trait to simplify writing bots.
///
/// The [`GameSession`](crate::GameSession) owns the decision engine; a
/// handler only observes the protocol and answers invitations.
pub trait NopeHandler {
    /// Called on a game invitation.
    ///
    /// Returns whether to accept; the session answers the server either way.
    fn game_invite(&mut self, game: &GameSnapshot) -> bool;

    /// Called on a tournament invitation.
    fn tournament_invite(&mut self, tournament: &Tournament) -> bool;

    /// This client was eliminated (empty hand or disqualification). The
    /// session keeps listening for the final game snapshots.
    fn eliminated(&mut self, note: &PlayerEliminated);

    /// A communication-level error. Non-fatal, the connection stays up.
    fn communication_error(&mut self, error: &CommunicationError);

    /// The game has ended; the snapshot carries the final rankings.
    fn game_end(&mut self, game: &GameSnapshot);

    /// The tournament has ended.
    fn tournament_end(&mut self, tournament: &Tournament);
}

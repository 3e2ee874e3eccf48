//! Transport adapters for the Nope game server: a REST client for account
//! and lobby calls, and a websocket loop that feeds pushed events into a
//! [`GameSession`](nope_bot_utils::GameSession).

mod error;
mod rest;
mod socket;

pub use error::ClientError;
pub use rest::{LoginData, RestApi};
pub use socket::run_session;

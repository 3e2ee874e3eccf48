use futures_util::{SinkExt, StreamExt};
use nope::ServerEvent;
use nope_bot_utils::{GameSession, NopeHandler};
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, info, warn};

use crate::ClientError;

/// Connects to the server's push channel and runs the session until the
/// server closes the connection.
///
/// Events arrive strictly ordered on this one connection and are handled one
/// at a time; each decision produces at most one outbound message, sent
/// before the next event is read. Undecodable frames are logged and skipped
/// (recoverable protocol noise); rule violations surfaced by the session
/// abort the loop.
pub async fn run_session<H: NopeHandler>(
    socket_url: &str,
    token: &str,
    session: &mut GameSession<H>,
) -> Result<(), ClientError> {
    let url = format!("{}/?token={}", socket_url.trim_end_matches('/'), token);
    let (stream, _) = connect_async(&url).await?;
    info!(url = socket_url, "connected");
    let (mut sink, mut stream) = stream.split();

    while let Some(message) = stream.next().await {
        match message? {
            Message::Text(text) => match serde_json::from_str::<ServerEvent>(&text) {
                Ok(event) => {
                    if let Some(reply) = session.handle_event(event)? {
                        let encoded = serde_json::to_string(&reply)?;
                        debug!(message = %encoded, "sending");
                        sink.send(Message::Text(encoded)).await?;
                    }
                }
                Err(err) => warn!(%err, frame = %text, "ignoring undecodable event"),
            },
            Message::Ping(payload) => sink.send(Message::Pong(payload)).await?,
            Message::Close(_) => {
                info!("server closed the connection");
                break;
            }
            _ => {}
        }
    }
    Ok(())
}

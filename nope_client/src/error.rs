use thiserror::Error;

/// The error type for transport and authentication failures.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("http request failed")]
    Http(#[from] reqwest::Error),

    #[error("server rejected the credentials (status {status})")]
    AuthRejected { status: u16 },

    #[error("not signed in")]
    NotSignedIn,

    #[error("websocket failure")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("malformed message to or from the server")]
    Encoding(#[from] serde_json::Error),

    /// A fatal rule violation surfaced by the session; terminates the
    /// instance.
    #[error(transparent)]
    Session(#[from] anyhow::Error),
}

use nope::{
    GameSnapshot, Player, StartGameConfig, StartGameReturn, StartTournamentConfig, Tournament,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::ClientError;

mod endpoints {
    pub const SIGNUP: &str = "/signup";
    pub const SIGNIN: &str = "/signin";
    pub const USER_CONNECTIONS: &str = "/userConnections";
    pub const START_GAME: &str = "/game/start";
    pub const START_TOURNAMENT: &str = "/tournament/start";
    pub const GAME_INFO: &str = "/game";
    pub const TOURNAMENT_INFO: &str = "/tournament";
}

#[derive(Clone, Debug, Serialize)]
struct LoginCredentials<'a> {
    username: &'a str,
    password: &'a str,
}

/// The JSON web token returned after sign-up/sign-in, used as bearer token
/// on every later request and to authenticate the websocket.
#[derive(Clone, Debug, Deserialize)]
pub struct LoginData {
    #[serde(rename = "jsonwebtoken")]
    pub json_web_token: String,
}

/// REST client for the game server.
///
/// Sign in (or sign up) first; the other calls require the session token.
#[derive(Clone)]
pub struct RestApi {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl RestApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: reqwest::Client::new(),
            base_url,
            token: None,
        }
    }

    /// Signs in, falling back to signing up a fresh account when the server
    /// does not know the credentials.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<LoginData, ClientError> {
        match self.sign_in(username, password).await? {
            Some(login) => Ok(login),
            None => {
                info!(username, "account unknown, signing up");
                self.sign_up(username, password).await
            }
        }
    }

    /// Returns `None` when the server rejects the credentials as unknown,
    /// so the caller can fall back to [`sign_up`](Self::sign_up).
    pub async fn sign_in(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<Option<LoginData>, ClientError> {
        let response = self
            .http
            .post(self.url(endpoints::SIGNIN))
            .json(&LoginCredentials { username, password })
            .send()
            .await?;
        if !response.status().is_success() {
            debug!(status = %response.status(), "sign-in rejected");
            return Ok(None);
        }
        let login: LoginData = response.json().await?;
        self.token = Some(login.json_web_token.clone());
        Ok(Some(login))
    }

    pub async fn sign_up(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<LoginData, ClientError> {
        let response = self
            .http
            .post(self.url(endpoints::SIGNUP))
            .json(&LoginCredentials { username, password })
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ClientError::AuthRejected {
                status: response.status().as_u16(),
            });
        }
        let login: LoginData = response.json().await?;
        self.token = Some(login.json_web_token.clone());
        Ok(login)
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// All players currently connected to the server socket.
    pub async fn user_connections(&self) -> Result<Vec<Player>, ClientError> {
        self.get(endpoints::USER_CONNECTIONS).await
    }

    /// Invites the configured players and starts a game.
    pub async fn start_game(
        &self,
        config: &StartGameConfig,
    ) -> Result<StartGameReturn, ClientError> {
        self.post(endpoints::START_GAME, config).await
    }

    /// Invites the configured players and starts a tournament.
    pub async fn start_tournament(
        &self,
        config: &StartTournamentConfig,
    ) -> Result<Tournament, ClientError> {
        self.post(endpoints::START_TOURNAMENT, config).await
    }

    pub async fn game(&self, game_id: &str) -> Result<GameSnapshot, ClientError> {
        self.get(&format!("{}/{}", endpoints::GAME_INFO, game_id))
            .await
    }

    pub async fn games(&self) -> Result<Vec<GameSnapshot>, ClientError> {
        self.get(endpoints::GAME_INFO).await
    }

    pub async fn tournament(&self, tournament_id: u64) -> Result<Tournament, ClientError> {
        self.get(&format!("{}/{}", endpoints::TOURNAMENT_INFO, tournament_id))
            .await
    }

    pub async fn tournaments(&self) -> Result<Vec<Tournament>, ClientError> {
        self.get(endpoints::TOURNAMENT_INFO).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn bearer(&self) -> Result<&str, ClientError> {
        self.token.as_deref().ok_or(ClientError::NotSignedIn)
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self
            .http
            .get(self.url(path))
            .bearer_auth(self.bearer()?)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    async fn post<B: Serialize, T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let response = self
            .http
            .post(self.url(path))
            .bearer_auth(self.bearer()?)
            .json(body)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }
}

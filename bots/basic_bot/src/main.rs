use std::time::Duration;

use clap::Parser;
use nope::{
    ActionSelector, CardColor, CommunicationError, GameSnapshot, NominateAmountPolicy,
    NominateColorPolicy, SelectorConfig, StartGameConfig, Tournament,
};
use nope_bot_utils::{GameSession, NopeHandler};
use nope_client::{run_session, RestApi};
use tracing::{error, info};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// Account name on the game server
    #[arg(short, long)]
    username: String,

    /// Account password
    #[arg(short, long)]
    password: String,

    /// Base URL of the REST api
    #[arg(long, default_value = "http://nope.ddns.net/api")]
    api_url: String,

    /// URL of the websocket endpoint
    #[arg(long, default_value = "ws://nope.ddns.net")]
    socket_url: String,

    /// Invite this connected user and start a game (for test runs)
    #[arg(long)]
    invite: Option<String>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

struct BasicBot;

impl NopeHandler for BasicBot {
    fn game_invite(&mut self, game: &GameSnapshot) -> bool {
        // Accept all invitations by default.
        info!(game = %game.id, "accepting game invite");
        true
    }

    fn tournament_invite(&mut self, tournament: &Tournament) -> bool {
        info!(tournament = tournament.id, "accepting tournament invite");
        true
    }

    fn eliminated(&mut self, note: &nope::PlayerEliminated) {
        if note.disqualified {
            error!(reason = %note.reason, "disqualified");
        } else {
            info!("hand is empty, game is lost");
        }
    }

    fn communication_error(&mut self, error: &CommunicationError) {
        error!(message = %error.message, "communication error");
    }

    fn game_end(&mut self, _game: &GameSnapshot) {
        info!("game over");
    }

    fn tournament_end(&mut self, _tournament: &Tournament) {
        info!("tournament over");
    }
}

/// The baseline policy: default action-card order, a fixed nominate color
/// and a flat demand of one card.
fn selector_config() -> SelectorConfig {
    SelectorConfig {
        color_policy: NominateColorPolicy::Static(CardColor::Red),
        amount_policy: NominateAmountPolicy::flat(1),
        ..SelectorConfig::default()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    initialize_logging(args.log_level);

    let mut api = RestApi::new(args.api_url.as_str());
    let login = api.login(&args.username, &args.password).await?;
    info!(username = %args.username, "signed in");

    if let Some(opponent) = args.invite.clone() {
        let api = api.clone();
        let username = args.username.clone();
        tokio::spawn(async move {
            // Give the invited client a moment to connect.
            tokio::time::sleep(Duration::from_secs(3)).await;
            if let Err(err) = invite_and_start(&api, &username, &opponent).await {
                error!(%err, "starting a game failed");
            }
        });
    }

    let selector = ActionSelector::new(selector_config());
    let mut session = GameSession::new(args.username.as_str(), selector, BasicBot);
    run_session(&args.socket_url, &login.json_web_token, &mut session).await?;
    Ok(())
}

async fn invite_and_start(api: &RestApi, username: &str, opponent: &str) -> anyhow::Result<()> {
    let connections = api.user_connections().await?;
    let me = connections
        .iter()
        .find(|p| p.username == username)
        .ok_or_else(|| anyhow::anyhow!("own connection is not listed"))?;
    let invited = connections
        .iter()
        .find(|p| p.username == opponent)
        .ok_or_else(|| anyhow::anyhow!("user {} is not connected", opponent))?;

    let roster = api
        .start_game(&StartGameConfig {
            no_action_cards: true,
            no_wild_cards: false,
            one_more_start_cards: false,
            action_timeout: None,
            invitation_timeout: None,
            start_with_rejection: false,
            players: vec![invited.clone(), me.clone()],
        })
        .await?;
    let invited: Vec<&str> = roster.players.iter().map(|p| p.username.as_str()).collect();
    info!(players = ?invited, "sent game invite");
    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

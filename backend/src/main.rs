use dotenvy::dotenv;
use axum::{
    routing::get,
    Router,
};
use anyhow::Context;
use tower_http::cors::{CorsLayer, Any};
use tower_http::trace::{TraceLayer, DefaultMakeSpan, DefaultOnResponse};
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;
use std::sync::Arc;

mod config {
    pub mod server;
}
mod handlers {
    pub mod player_handlers;
}
mod repositories {
    pub mod player_repository;
}

use config::server::ServerConfig;
use handlers::player_handlers;
use repositories::player_repository::PlayerRepository;


pub struct AppState {
    players: Arc<PlayerRepository>,
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(player_handlers::root))
        .route("/players", get(player_handlers::search_players))
        .route("/players/{player_id}", get(player_handlers::get_player))
        .route("/players/{player_id}/games", get(player_handlers::get_last_games))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO))
        )
        .layer(
            CorsLayer::new()
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::OPTIONS,
                ])
                .allow_origin(Any) // read-only public stats
                .allow_headers([axum::http::header::CONTENT_TYPE])
        )
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    let players = PlayerRepository::open(&config.database_path)
        .with_context(|| format!("opening stats database {}", config.database_path.display()))?;

    let schema = players.schema();
    info!(
        "Stats database ready (players team column: {:?}, weekly team column: {:?}, {} stat columns)",
        schema.players_team(),
        schema.weekly_team(),
        schema.stat_columns().len()
    );

    let state = Arc::new(AppState {
        players: Arc::new(players),
    });

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    info!("Listening on {}", config.bind_addr);
    axum::serve(listener, app(state)).await?;

    Ok(())
}

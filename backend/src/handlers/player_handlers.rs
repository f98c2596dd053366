use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::AppState;
use crate::repositories::player_repository::{
    PlayerFilter, PlayerRepository, Record, RepositoryError,
};

type ApiError = (StatusCode, Json<Value>);

const DEFAULT_SEARCH_LIMIT: i64 = 50;
const DEFAULT_GAMES_LIMIT: i64 = 5;

#[derive(Debug, Default, Deserialize)]
pub struct PlayerSearchParams {
    pub q: Option<String>,
    pub team: Option<String>,
    pub position: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GamesParams {
    pub limit: Option<i64>,
}

pub async fn root() -> Json<Value> {
    Json(json!({"status": "ok", "message": "NFL API running"}))
}

pub async fn search_players(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PlayerSearchParams>,
) -> Result<Json<Vec<Record>>, ApiError> {
    let filter = PlayerFilter {
        name: params.q,
        team: params.team,
        position: params.position,
        limit: params.limit.unwrap_or(DEFAULT_SEARCH_LIMIT),
    };
    let players = with_repository(&state, move |repo| repo.search_players(&filter)).await?;
    Ok(Json(players))
}

pub async fn get_player(
    State(state): State<Arc<AppState>>,
    Path(player_id): Path<String>,
) -> Result<Json<Record>, ApiError> {
    let player = with_repository(&state, move |repo| repo.find_player(&player_id)).await?;
    match player {
        Some(player) => Ok(Json(player)),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(json!({"detail": "Player not found"})),
        )),
    }
}

pub async fn get_last_games(
    State(state): State<Arc<AppState>>,
    Path(player_id): Path<String>,
    Query(params): Query<GamesParams>,
) -> Result<Json<Vec<Record>>, ApiError> {
    let limit = params.limit.unwrap_or(DEFAULT_GAMES_LIMIT);
    let games = with_repository(&state, move |repo| repo.last_games(&player_id, limit)).await?;
    Ok(Json(games))
}

/// Runs a blocking SQLite query off the async workers.
async fn with_repository<T, F>(state: &AppState, query: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&PlayerRepository) -> Result<T, RepositoryError> + Send + 'static,
{
    let repo = state.players.clone();
    tokio::task::spawn_blocking(move || query(&repo))
        .await
        .map_err(RepositoryError::from)
        .and_then(|result| result)
        .map_err(|e| {
            tracing::error!("Stats query failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"detail": format!("Database error: {}", e)})),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::player_repository::test_support::TempDb;

    fn state(db: &TempDb) -> State<Arc<AppState>> {
        State(Arc::new(AppState {
            players: Arc::new(PlayerRepository::open(&db.path).unwrap()),
        }))
    }

    #[tokio::test]
    async fn root_reports_running() {
        let Json(body) = root().await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["message"], "NFL API running");
    }

    #[tokio::test]
    async fn search_uses_default_limit_and_filters() {
        let db = TempDb::seeded();
        let Json(players) = search_players(
            state(&db),
            Query(PlayerSearchParams {
                team: Some("det".to_string()),
                ..Default::default()
            }),
        )
        .await
        .unwrap();
        assert_eq!(players.len(), 1);
        assert_eq!(players[0]["player_name"], "Jahmyr Gibbs");
    }

    #[tokio::test]
    async fn unknown_player_is_404() {
        let db = TempDb::seeded();
        let (status, Json(body)) = get_player(state(&db), Path("nobody".to_string()))
            .await
            .unwrap_err();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Player not found");
    }

    #[tokio::test]
    async fn known_player_is_returned() {
        let db = TempDb::seeded();
        let Json(player) = get_player(state(&db), Path("00-0039851".to_string()))
            .await
            .unwrap();
        assert_eq!(player["team"], "NE");
    }

    #[tokio::test]
    async fn games_default_to_last_five() {
        let db = TempDb::seeded();
        let Json(games) = get_last_games(
            state(&db),
            Path("00-0039075".to_string()),
            Query(GamesParams::default()),
        )
        .await
        .unwrap();
        assert_eq!(games.len(), 4);
        assert_eq!(games[0]["week"], 3);
        assert_eq!(games[3]["season"], 2023);
    }

    #[tokio::test]
    async fn broken_database_is_500() {
        let db = TempDb::new("CREATE TABLE weekly_stats (player_id TEXT);");
        let err = search_players(state(&db), Query(PlayerSearchParams::default()))
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::INTERNAL_SERVER_ERROR);
    }
}

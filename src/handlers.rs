use crate::backup::{export_file_name, export_rounds, parse_backup};
use crate::errors::AppError;
use crate::models::{
    CommentaryResponse, HistoryQuery, HistoryResponse, ImportQuery, ImportResponse,
    LeaderboardResponse, PeriodQuery, Round, RoundForm, TrendPoint,
};
use crate::state::AppState;
use crate::stats::build_leaderboard;
use crate::trend::build_trend;
use crate::ui::render_index;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse},
    Json,
};
use chrono::Utc;
use tracing::info;

const HISTORY_PREVIEW: usize = 5;

pub async fn index() -> Html<String> {
    Html(render_index())
}

pub async fn list_rounds(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Json<HistoryResponse> {
    let store = state.store.lock().await;
    let limit = (!query.all).then_some(HISTORY_PREVIEW);
    Json(HistoryResponse {
        total: store.rounds().len(),
        rounds: store.history(limit),
    })
}

pub async fn create_round(
    State(state): State<AppState>,
    Json(form): Json<RoundForm>,
) -> Result<(StatusCode, Json<Round>), AppError> {
    let mut store = state.store.lock().await;
    let round = store.add(form).await?;
    state.refresh_commentary(&store).await;
    Ok((StatusCode::CREATED, Json(round)))
}

pub async fn update_round(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(form): Json<RoundForm>,
) -> Result<Json<Round>, AppError> {
    let mut store = state.store.lock().await;
    let round = store.update(&id, form).await?;
    state.refresh_commentary(&store).await;
    Ok(Json(round))
}

pub async fn delete_round(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let mut store = state.store.lock().await;
    store.remove(&id).await?;
    state.refresh_commentary(&store).await;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_leaderboard(
    State(state): State<AppState>,
    Query(query): Query<PeriodQuery>,
) -> Json<LeaderboardResponse> {
    let store = state.store.lock().await;
    Json(build_leaderboard(store.rounds(), query.period))
}

pub async fn get_trend(
    State(state): State<AppState>,
    Query(query): Query<PeriodQuery>,
) -> Json<Vec<TrendPoint>> {
    let store = state.store.lock().await;
    Json(build_trend(store.rounds(), query.period))
}

pub async fn get_commentary(State(state): State<AppState>) -> Json<CommentaryResponse> {
    Json(state.commentator.snapshot().await)
}

pub async fn export(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let store = state.store.lock().await;
    let body = export_rounds(store.rounds())?;
    let file_name = export_file_name(Utc::now().naive_utc());
    info!(rounds = store.rounds().len(), %file_name, "exporting rounds");

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        body,
    ))
}

/// Validates an uploaded backup and, once confirmed, replaces every round with it.
pub async fn import(
    State(state): State<AppState>,
    Query(query): Query<ImportQuery>,
    body: String,
) -> Result<Json<ImportResponse>, AppError> {
    let rounds = parse_backup(&body)?;
    let count = rounds.len();
    if !query.confirm {
        return Ok(Json(ImportResponse {
            rounds: count,
            applied: false,
        }));
    }

    let mut store = state.store.lock().await;
    store.replace_all(rounds).await?;
    state.refresh_commentary(&store).await;
    Ok(Json(ImportResponse {
        rounds: count,
        applied: true,
    }))
}

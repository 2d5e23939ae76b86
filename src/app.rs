use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/rounds", get(handlers::list_rounds).post(handlers::create_round))
        .route(
            "/api/rounds/:id",
            put(handlers::update_round).delete(handlers::delete_round),
        )
        .route("/api/leaderboard", get(handlers::get_leaderboard))
        .route("/api/trend", get(handlers::get_trend))
        .route("/api/commentary", get(handlers::get_commentary))
        .route("/api/export", get(handlers::export))
        .route("/api/import", post(handlers::import))
        .with_state(state)
}

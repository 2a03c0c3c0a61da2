use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/progress", get(handlers::get_progress))
        .route("/api/today", get(handlers::get_today))
        .route("/api/toggle", post(handlers::toggle))
        .route("/api/day", post(handlers::set_day))
        .route("/api/day/next", post(handlers::next_day))
        .route("/api/day/prev", post(handlers::prev_day))
        .route("/api/reset", post(handlers::reset))
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/calendar", get(handlers::get_calendar))
        .with_state(state)
}

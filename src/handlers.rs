use crate::errors::AppError;
use crate::models::{
    CalendarCell, DayResponse, ProgressResponse, SetDayRequest, StatsResponse, TaskKind,
    ToggleRequest,
};
use crate::progress::ChallengeState;
use crate::state::AppState;
use crate::stats::{build_calendar, build_stats};
use axum::{Json, extract::State};

pub async fn get_progress(State(state): State<AppState>) -> Json<ProgressResponse> {
    let store = state.store.lock().await;
    Json(store.state().snapshot())
}

pub async fn get_today(State(state): State<AppState>) -> Json<DayResponse> {
    let store = state.store.lock().await;
    let challenge = store.state();
    Json(day_response(challenge, challenge.current_day().into(), true))
}

pub async fn toggle(
    State(state): State<AppState>,
    Json(payload): Json<ToggleRequest>,
) -> Result<Json<DayResponse>, AppError> {
    let kind: TaskKind = payload.task.parse()?;
    let mut store = state.store.lock().await;
    let day = payload
        .day
        .unwrap_or_else(|| store.state().current_day().into());
    let applied = match u32::try_from(day) {
        Ok(day) => store.toggle_task(day, kind, payload.value).await,
        Err(_) => false,
    };

    Ok(Json(day_response(store.state(), day, applied)))
}

pub async fn set_day(
    State(state): State<AppState>,
    Json(payload): Json<SetDayRequest>,
) -> Json<DayResponse> {
    let mut store = state.store.lock().await;
    let applied = u32::try_from(payload.day).is_ok_and(|day| store.set_current_day(day));
    let challenge = store.state();
    Json(day_response(challenge, challenge.current_day().into(), applied))
}

pub async fn next_day(State(state): State<AppState>) -> Json<DayResponse> {
    step(&state, 1).await
}

pub async fn prev_day(State(state): State<AppState>) -> Json<DayResponse> {
    step(&state, -1).await
}

pub async fn reset(State(state): State<AppState>) -> Json<ProgressResponse> {
    let mut store = state.store.lock().await;
    Json(store.reset().await.snapshot())
}

pub async fn get_stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let store = state.store.lock().await;
    Json(build_stats(store.state()))
}

pub async fn get_calendar(State(state): State<AppState>) -> Json<Vec<CalendarCell>> {
    let store = state.store.lock().await;
    Json(build_calendar(store.state()))
}

async fn step(state: &AppState, delta: i64) -> Json<DayResponse> {
    let mut store = state.store.lock().await;
    let applied = store.step_day(delta);
    let challenge = store.state();
    Json(day_response(challenge, challenge.current_day().into(), applied))
}

// Out-of-range days echo back an empty record with `applied: false`.
fn day_response(challenge: &ChallengeState, day: i64, applied: bool) -> DayResponse {
    DayResponse {
        day,
        current_day: challenge.current_day(),
        applied,
        challenge_complete: challenge.is_challenge_complete(),
        record: u32::try_from(day)
            .ok()
            .and_then(|day| challenge.day(day).copied())
            .unwrap_or_default(),
    }
}

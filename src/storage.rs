use crate::models::DayRecord;
use crate::progress::ChallengeState;
use std::{collections::BTreeMap, env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::{error, warn};

pub fn resolve_data_path() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from("data/progress.json"))
}

/// Missing, unreadable or malformed data all yield a fresh challenge.
pub async fn load_state(path: &Path) -> ChallengeState {
    match fs::read(path).await {
        Ok(bytes) => decode_state(&bytes).unwrap_or_default(),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => ChallengeState::fresh(),
        Err(err) => {
            error!("failed to read data file: {err}");
            ChallengeState::fresh()
        }
    }
}

pub fn decode_state(bytes: &[u8]) -> Option<ChallengeState> {
    let days: BTreeMap<u32, DayRecord> = match serde_json::from_slice(bytes) {
        Ok(days) => days,
        Err(err) => {
            error!("failed to parse data file: {err}");
            return None;
        }
    };
    let count = days.len();
    let state = ChallengeState::from_days(days);
    if state.is_none() {
        warn!("data file holds {count} day records, expected days 1-75; starting fresh");
    }
    state
}

pub async fn persist_state(path: &Path, state: &ChallengeState) -> Result<(), std::io::Error> {
    let payload = serde_json::to_vec_pretty(state.days())?;
    fs::write(path, payload).await
}

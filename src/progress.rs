use crate::models::{DayRecord, ProgressResponse, TOTAL_DAYS, TaskKind};
use crate::storage::{load_state, persist_state};
use std::{collections::BTreeMap, path::PathBuf};
use tracing::{error, info};

/// Day records 1..=75 plus the day cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct ChallengeState {
    days: BTreeMap<u32, DayRecord>,
    current_day: u32,
}

impl Default for ChallengeState {
    fn default() -> Self {
        Self::fresh()
    }
}

impl ChallengeState {
    pub fn fresh() -> Self {
        Self {
            days: (1..=TOTAL_DAYS).map(|day| (day, DayRecord::default())).collect(),
            current_day: 1,
        }
    }

    /// Accepts a loaded day map only if it holds exactly days 1..=75.
    pub fn from_days(days: BTreeMap<u32, DayRecord>) -> Option<Self> {
        if !days.keys().copied().eq(1..=TOTAL_DAYS) {
            return None;
        }
        Some(Self {
            days,
            current_day: 1,
        })
    }

    pub fn days(&self) -> &BTreeMap<u32, DayRecord> {
        &self.days
    }

    pub fn day(&self, day: u32) -> Option<&DayRecord> {
        self.days.get(&day)
    }

    pub fn current_day(&self) -> u32 {
        self.current_day
    }

    /// Returns false and leaves the state alone when `day` is out of range.
    pub fn toggle_task(&mut self, day: u32, kind: TaskKind, value: bool) -> bool {
        match self.days.get_mut(&day) {
            Some(record) => {
                record.set(kind, value);
                true
            }
            None => false,
        }
    }

    pub fn set_current_day(&mut self, day: u32) -> bool {
        if !(1..=TOTAL_DAYS).contains(&day) {
            return false;
        }
        self.current_day = day;
        true
    }

    pub fn step_day(&mut self, delta: i64) -> bool {
        let target = i64::from(self.current_day) + delta;
        match u32::try_from(target) {
            Ok(day) => self.set_current_day(day),
            Err(_) => false,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::fresh();
    }

    pub fn is_challenge_complete(&self) -> bool {
        self.days.values().all(DayRecord::completed)
    }

    pub fn snapshot(&self) -> ProgressResponse {
        ProgressResponse {
            current_day: self.current_day,
            total_days: TOTAL_DAYS,
            days: self.days.clone(),
        }
    }
}

/// Owns the challenge and writes the day map back to disk after every
/// change to it. Cursor moves stay in memory.
#[derive(Debug)]
pub struct ProgressStore {
    data_path: PathBuf,
    state: ChallengeState,
}

impl ProgressStore {
    pub async fn initialize(data_path: PathBuf) -> Self {
        let state = load_state(&data_path).await;
        Self { data_path, state }
    }

    pub fn state(&self) -> &ChallengeState {
        &self.state
    }

    pub async fn toggle_task(&mut self, day: u32, kind: TaskKind, value: bool) -> bool {
        if !self.state.toggle_task(day, kind, value) {
            return false;
        }
        if self.state.day(day).is_some_and(DayRecord::completed) {
            info!("day {day} complete");
        }
        self.save().await;
        true
    }

    pub fn set_current_day(&mut self, day: u32) -> bool {
        self.state.set_current_day(day)
    }

    pub fn step_day(&mut self, delta: i64) -> bool {
        self.state.step_day(delta)
    }

    pub async fn reset(&mut self) -> &ChallengeState {
        self.state.reset();
        info!("challenge reset");
        self.save().await;
        &self.state
    }

    async fn save(&self) {
        if let Err(err) = persist_state(&self.data_path, &self.state).await {
            error!("failed to persist progress: {err}");
        }
    }
}

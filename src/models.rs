use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt, str::FromStr};

pub const TOTAL_DAYS: u32 = 75;
pub const TASK_COUNT: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    Diet,
    Workout1,
    Workout2,
    Water,
    Reading,
    Photo,
}

impl TaskKind {
    /// Declaration order; every "first wins" tie-break walks this.
    pub const ALL: [TaskKind; TASK_COUNT] = [
        TaskKind::Diet,
        TaskKind::Workout1,
        TaskKind::Workout2,
        TaskKind::Water,
        TaskKind::Reading,
        TaskKind::Photo,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TaskKind::Diet => "diet",
            TaskKind::Workout1 => "workout1",
            TaskKind::Workout2 => "workout2",
            TaskKind::Water => "water",
            TaskKind::Reading => "reading",
            TaskKind::Photo => "photo",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TaskKind::Diet => "Diet",
            TaskKind::Workout1 => "First Workout",
            TaskKind::Workout2 => "Outdoor Workout",
            TaskKind::Water => "Water Intake",
            TaskKind::Reading => "Reading",
            TaskKind::Photo => "Progress Photos",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTaskKind(pub String);

impl fmt::Display for UnknownTaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown task '{}'", self.0)
    }
}

impl std::error::Error for UnknownTaskKind {}

impl FromStr for TaskKind {
    type Err = UnknownTaskKind;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        TaskKind::ALL
            .into_iter()
            .find(|kind| kind.name() == value)
            .ok_or_else(|| UnknownTaskKind(value.to_string()))
    }
}

/// Six task flags plus `completed`, which is always the AND of the flags.
/// The only way to change a flag is [`DayRecord::set`], and deserialization
/// recomputes `completed` instead of trusting the stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "StoredDayRecord")]
pub struct DayRecord {
    diet: bool,
    workout1: bool,
    workout2: bool,
    water: bool,
    reading: bool,
    photo: bool,
    completed: bool,
}

impl DayRecord {
    pub fn get(&self, kind: TaskKind) -> bool {
        match kind {
            TaskKind::Diet => self.diet,
            TaskKind::Workout1 => self.workout1,
            TaskKind::Workout2 => self.workout2,
            TaskKind::Water => self.water,
            TaskKind::Reading => self.reading,
            TaskKind::Photo => self.photo,
        }
    }

    pub fn set(&mut self, kind: TaskKind, value: bool) {
        let flag = match kind {
            TaskKind::Diet => &mut self.diet,
            TaskKind::Workout1 => &mut self.workout1,
            TaskKind::Workout2 => &mut self.workout2,
            TaskKind::Water => &mut self.water,
            TaskKind::Reading => &mut self.reading,
            TaskKind::Photo => &mut self.photo,
        };
        *flag = value;
        self.completed = self.all_tasks_done();
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn completed_tasks(&self) -> usize {
        TaskKind::ALL.into_iter().filter(|kind| self.get(*kind)).count()
    }

    fn all_tasks_done(&self) -> bool {
        TaskKind::ALL.into_iter().all(|kind| self.get(kind))
    }
}

// Every field is required so a record missing one is rejected as malformed.
#[derive(Deserialize)]
struct StoredDayRecord {
    diet: bool,
    workout1: bool,
    workout2: bool,
    water: bool,
    reading: bool,
    photo: bool,
    #[allow(dead_code)]
    completed: bool,
}

impl From<StoredDayRecord> for DayRecord {
    fn from(stored: StoredDayRecord) -> Self {
        let mut record = DayRecord {
            diet: stored.diet,
            workout1: stored.workout1,
            workout2: stored.workout2,
            water: stored.water,
            reading: stored.reading,
            photo: stored.photo,
            completed: false,
        };
        record.completed = record.all_tasks_done();
        record
    }
}

// Days arrive signed and wide so any out-of-range number reaches the no-op
// path instead of failing extraction.
#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub day: Option<i64>,
    pub task: String,
    pub value: bool,
}

#[derive(Debug, Deserialize)]
pub struct SetDayRequest {
    pub day: i64,
}

#[derive(Debug, Serialize)]
pub struct DayResponse {
    pub day: i64,
    pub current_day: u32,
    pub applied: bool,
    pub challenge_complete: bool,
    #[serde(flatten)]
    pub record: DayRecord,
}

#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub current_day: u32,
    pub total_days: u32,
    pub days: BTreeMap<u32, DayRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DayStatus {
    Current,
    Future,
    Complete,
    Incomplete,
}

#[derive(Debug, Serialize)]
pub struct CalendarCell {
    pub day: u32,
    pub status: DayStatus,
}

#[derive(Debug, Serialize)]
pub struct DailyPoint {
    pub day: u32,
    pub completed_tasks: usize,
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskPoint {
    pub task: TaskKind,
    pub label: &'static str,
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyPoint {
    pub week: u32,
    pub start_day: u32,
    pub end_day: u32,
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Extremes<T> {
    pub best: T,
    pub worst: T,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub current_day: u32,
    pub completed_days: usize,
    pub current_streak: u32,
    pub overall_completion: u8,
    pub average_completion: u8,
    pub days_remaining: u32,
    pub challenge_complete: bool,
    pub daily_rates: Vec<DailyPoint>,
    pub task_rates: Vec<TaskPoint>,
    pub weekly_rates: Vec<WeeklyPoint>,
    pub tasks: Extremes<TaskPoint>,
    pub weeks: Option<Extremes<WeeklyPoint>>,
    pub insights: Vec<String>,
}

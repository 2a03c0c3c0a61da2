use crate::insights::{InsightContext, generate_insights};
use crate::models::{
    CalendarCell, DailyPoint, DayStatus, Extremes, StatsResponse, TASK_COUNT, TOTAL_DAYS,
    TaskKind, TaskPoint, WeeklyPoint,
};
use crate::progress::ChallengeState;

const WEEK_LENGTH: u32 = 7;

pub fn build_stats(state: &ChallengeState) -> StatsResponse {
    let upto = state.current_day();
    let task_rates = task_points(state, upto);
    let tasks = best_and_worst_task(state, upto);
    let current_streak = current_streak(state);

    let insights = generate_insights(&InsightContext {
        elapsed_days: upto,
        perfect_days: completed_days_upto(state, upto),
        best_task: tasks.best.clone(),
        worst_task: tasks.worst.clone(),
        current_streak,
        days_remaining: days_remaining(state),
    });

    StatsResponse {
        current_day: upto,
        completed_days: completed_days(state),
        current_streak,
        overall_completion: overall_completion_percent(state),
        average_completion: average_completion_percent(state, upto),
        days_remaining: days_remaining(state),
        challenge_complete: state.is_challenge_complete(),
        daily_rates: daily_completion_rates(state, upto),
        task_rates,
        weekly_rates: weekly_points(state, upto),
        tasks,
        weeks: best_and_worst_week(state, upto),
        insights,
    }
}

/// Consecutive completed days directly before the cursor.
pub fn current_streak(state: &ChallengeState) -> u32 {
    (1..state.current_day())
        .rev()
        .take_while(|day| state.day(*day).is_some_and(|record| record.completed()))
        .count() as u32
}

pub fn completed_days(state: &ChallengeState) -> usize {
    completed_days_upto(state, TOTAL_DAYS)
}

pub fn completed_task_count(state: &ChallengeState) -> usize {
    done_in(state, 1, TOTAL_DAYS)
}

pub fn overall_completion_percent(state: &ChallengeState) -> u8 {
    let possible = TOTAL_DAYS as usize * TASK_COUNT;
    percent(completed_task_count(state), possible)
}

/// Like [`overall_completion_percent`] but over days `1..=upto` only.
pub fn average_completion_percent(state: &ChallengeState, upto: u32) -> u8 {
    let upto = clamp_upto(upto);
    percent(done_in(state, 1, upto), upto as usize * TASK_COUNT)
}

pub fn task_completion_rate(state: &ChallengeState, kind: TaskKind, upto: u32) -> f64 {
    let upto = clamp_upto(upto);
    if upto == 0 {
        return 0.0;
    }
    let done = (1..=upto)
        .filter(|day| state.day(*day).is_some_and(|record| record.get(kind)))
        .count();
    done as f64 / f64::from(upto)
}

pub fn weekly_completion_rates(state: &ChallengeState, upto: u32) -> Vec<f64> {
    weekly_points(state, upto)
        .into_iter()
        .map(|point| point.rate)
        .collect()
}

pub fn daily_completion_rates(state: &ChallengeState, upto: u32) -> Vec<DailyPoint> {
    (1..=clamp_upto(upto))
        .map(|day| {
            let completed_tasks = state.day(day).map_or(0, |record| record.completed_tasks());
            DailyPoint {
                day,
                completed_tasks,
                rate: completed_tasks as f64 / TASK_COUNT as f64,
            }
        })
        .collect()
}

pub fn best_and_worst_task(state: &ChallengeState, upto: u32) -> Extremes<TaskPoint> {
    let points = task_points(state, upto);
    let best = first_extreme(&points, |point| point.rate, |a, b| a > b);
    let worst = first_extreme(&points, |point| point.rate, |a, b| a < b);
    Extremes {
        best: points[best].clone(),
        worst: points[worst].clone(),
    }
}

/// `None` until a second week has started; one window has nothing to compare.
pub fn best_and_worst_week(state: &ChallengeState, upto: u32) -> Option<Extremes<WeeklyPoint>> {
    let points = weekly_points(state, upto);
    if points.len() < 2 {
        return None;
    }
    let best = first_extreme(&points, |point| point.rate, |a, b| a > b);
    let worst = first_extreme(&points, |point| point.rate, |a, b| a < b);
    Some(Extremes {
        best: points[best].clone(),
        worst: points[worst].clone(),
    })
}

pub fn days_remaining(state: &ChallengeState) -> u32 {
    TOTAL_DAYS - state.current_day()
}

pub fn build_calendar(state: &ChallengeState) -> Vec<CalendarCell> {
    let current = state.current_day();
    state
        .days()
        .iter()
        .map(|(&day, record)| {
            let status = if day == current {
                DayStatus::Current
            } else if day > current {
                DayStatus::Future
            } else if record.completed() {
                DayStatus::Complete
            } else {
                DayStatus::Incomplete
            };
            CalendarCell { day, status }
        })
        .collect()
}

fn task_points(state: &ChallengeState, upto: u32) -> Vec<TaskPoint> {
    TaskKind::ALL
        .into_iter()
        .map(|task| TaskPoint {
            task,
            label: task.label(),
            rate: task_completion_rate(state, task, upto),
        })
        .collect()
}

fn weekly_points(state: &ChallengeState, upto: u32) -> Vec<WeeklyPoint> {
    let upto = clamp_upto(upto);
    let weeks = upto.div_ceil(WEEK_LENGTH);
    (0..weeks)
        .map(|week| {
            let start_day = week * WEEK_LENGTH + 1;
            let end_day = ((week + 1) * WEEK_LENGTH).min(upto);
            let cells = (end_day - start_day + 1) as usize * TASK_COUNT;
            WeeklyPoint {
                week: week + 1,
                start_day,
                end_day,
                rate: done_in(state, start_day, end_day) as f64 / cells as f64,
            }
        })
        .collect()
}

fn completed_days_upto(state: &ChallengeState, upto: u32) -> usize {
    (1..=clamp_upto(upto))
        .filter(|day| state.day(*day).is_some_and(|record| record.completed()))
        .count()
}

fn done_in(state: &ChallengeState, start: u32, end: u32) -> usize {
    if start > end {
        return 0;
    }
    state
        .days()
        .range(start..=end)
        .map(|(_, record)| record.completed_tasks())
        .sum()
}

// Strict comparison keeps the earliest entry on ties.
fn first_extreme<T>(
    points: &[T],
    rate: impl Fn(&T) -> f64,
    better: impl Fn(f64, f64) -> bool,
) -> usize {
    let mut chosen = 0;
    for (index, point) in points.iter().enumerate().skip(1) {
        if better(rate(point), rate(&points[chosen])) {
            chosen = index;
        }
    }
    chosen
}

fn percent(done: usize, possible: usize) -> u8 {
    if possible == 0 {
        return 0;
    }
    (100.0 * done as f64 / possible as f64).round() as u8
}

fn clamp_upto(upto: u32) -> u32 {
    upto.min(TOTAL_DAYS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_day(state: &mut ChallengeState, day: u32) {
        for kind in TaskKind::ALL {
            state.toggle_task(day, kind, true);
        }
    }

    #[test]
    fn streak_counts_completed_days_before_cursor() {
        let mut state = ChallengeState::fresh();
        for day in 1..=5 {
            complete_day(&mut state, day);
        }
        state.set_current_day(7);
        assert_eq!(current_streak(&state), 5);

        state.set_current_day(6);
        assert_eq!(current_streak(&state), 5);

        state.set_current_day(8);
        assert_eq!(current_streak(&state), 0);

        state.set_current_day(1);
        assert_eq!(current_streak(&state), 0);
    }

    #[test]
    fn streak_stops_at_first_gap() {
        let mut state = ChallengeState::fresh();
        complete_day(&mut state, 1);
        complete_day(&mut state, 3);
        complete_day(&mut state, 4);
        state.set_current_day(5);
        assert_eq!(current_streak(&state), 2);
    }

    #[test]
    fn overall_completion_spans_whole_challenge() {
        let mut state = ChallengeState::fresh();
        assert_eq!(overall_completion_percent(&state), 0);
        assert!(!state.is_challenge_complete());

        // 9 of 450 cells rounds to 2%.
        for day in 1..=9 {
            state.toggle_task(day, TaskKind::Diet, true);
        }
        assert_eq!(overall_completion_percent(&state), 2);

        for day in 1..=TOTAL_DAYS {
            complete_day(&mut state, day);
        }
        assert_eq!(overall_completion_percent(&state), 100);
        assert!(state.is_challenge_complete());
        assert_eq!(completed_days(&state), 75);
    }

    #[test]
    fn challenge_complete_matches_full_percentage() {
        let mut state = ChallengeState::fresh();
        for day in 1..=TOTAL_DAYS {
            complete_day(&mut state, day);
        }
        state.toggle_task(40, TaskKind::Photo, false);
        // 449 of 450 still rounds to 100 but one day is open.
        assert_eq!(overall_completion_percent(&state), 100);
        assert!(!state.is_challenge_complete());
    }

    #[test]
    fn task_rate_uses_elapsed_window() {
        let mut state = ChallengeState::fresh();
        state.toggle_task(1, TaskKind::Water, true);
        state.toggle_task(3, TaskKind::Water, true);
        state.toggle_task(10, TaskKind::Water, true);

        assert_eq!(task_completion_rate(&state, TaskKind::Water, 0), 0.0);
        assert_eq!(task_completion_rate(&state, TaskKind::Water, 4), 0.5);
        assert_eq!(task_completion_rate(&state, TaskKind::Reading, 4), 0.0);
    }

    #[test]
    fn weekly_rates_split_into_seven_day_windows() {
        let mut state = ChallengeState::fresh();
        for day in 1..=7 {
            complete_day(&mut state, day);
        }
        state.toggle_task(8, TaskKind::Diet, true);
        state.toggle_task(8, TaskKind::Photo, true);
        state.toggle_task(9, TaskKind::Diet, true);

        let rates = weekly_completion_rates(&state, 10);
        assert_eq!(rates.len(), 2);
        assert_eq!(rates[0], 1.0);
        assert_eq!(rates[1], 3.0 / 18.0);

        assert!(weekly_completion_rates(&state, 0).is_empty());
        assert_eq!(weekly_completion_rates(&state, 75).len(), 11);
    }

    #[test]
    fn week_extremes_prefer_earliest_on_ties() {
        let mut state = ChallengeState::fresh();
        assert!(best_and_worst_week(&state, 0).is_none());

        let weeks = best_and_worst_week(&state, 21).unwrap();
        assert_eq!(weeks.best.week, 1);
        assert_eq!(weeks.worst.week, 1);

        complete_day(&mut state, 9);
        complete_day(&mut state, 16);
        let weeks = best_and_worst_week(&state, 21).unwrap();
        assert_eq!(weeks.best.week, 2);
        assert_eq!(weeks.worst.week, 1);
    }

    #[test]
    fn week_extremes_need_two_windows() {
        let mut state = ChallengeState::fresh();
        complete_day(&mut state, 2);
        assert!(best_and_worst_week(&state, 7).is_none());

        let weeks = best_and_worst_week(&state, 8).unwrap();
        assert_eq!(weeks.best.week, 1);
        assert_eq!(weeks.worst.week, 2);
        assert_eq!(weeks.worst.start_day, 8);
        assert_eq!(weeks.worst.end_day, 8);

        state.set_current_day(5);
        assert!(build_stats(&state).weeks.is_none());
    }

    #[test]
    fn task_extremes_prefer_declaration_order_on_ties() {
        let mut state = ChallengeState::fresh();
        let tasks = best_and_worst_task(&state, 5);
        assert_eq!(tasks.best.task, TaskKind::Diet);
        assert_eq!(tasks.worst.task, TaskKind::Diet);

        for day in 1..=5 {
            state.toggle_task(day, TaskKind::Water, true);
            state.toggle_task(day, TaskKind::Reading, true);
            for kind in [TaskKind::Diet, TaskKind::Workout1, TaskKind::Workout2, TaskKind::Photo] {
                state.toggle_task(day, kind, day % 2 == 0);
            }
        }
        state.toggle_task(1, TaskKind::Photo, true);
        let tasks = best_and_worst_task(&state, 5);
        assert_eq!(tasks.best.task, TaskKind::Water);
        assert_eq!(tasks.best.rate, 1.0);
        assert_eq!(tasks.worst.task, TaskKind::Diet);
        assert_eq!(tasks.worst.label, "Diet");
    }

    #[test]
    fn daily_rates_and_average() {
        let mut state = ChallengeState::fresh();
        complete_day(&mut state, 1);
        state.toggle_task(2, TaskKind::Diet, true);
        state.toggle_task(2, TaskKind::Water, true);

        let daily = daily_completion_rates(&state, 3);
        assert_eq!(daily.len(), 3);
        assert_eq!(daily[0].rate, 1.0);
        assert_eq!(daily[1].completed_tasks, 2);
        assert_eq!(daily[2].rate, 0.0);

        // 8 of 18 cells.
        assert_eq!(average_completion_percent(&state, 3), 44);
        assert_eq!(average_completion_percent(&state, 0), 0);
    }

    #[test]
    fn calendar_marks_cursor_past_and_future() {
        let mut state = ChallengeState::fresh();
        complete_day(&mut state, 1);
        state.set_current_day(3);
        let calendar = build_calendar(&state);
        assert_eq!(calendar.len(), 75);
        assert_eq!(calendar[0].status, DayStatus::Complete);
        assert_eq!(calendar[1].status, DayStatus::Incomplete);
        assert_eq!(calendar[2].status, DayStatus::Current);
        assert_eq!(calendar[3].status, DayStatus::Future);
    }

    #[test]
    fn stats_report_covers_elapsed_days() {
        let mut state = ChallengeState::fresh();
        for day in 1..=3 {
            complete_day(&mut state, day);
        }
        state.set_current_day(4);
        let stats = build_stats(&state);
        assert_eq!(stats.current_day, 4);
        assert_eq!(stats.current_streak, 3);
        assert_eq!(stats.completed_days, 3);
        assert_eq!(stats.days_remaining, 71);
        assert_eq!(stats.daily_rates.len(), 4);
        assert_eq!(stats.task_rates.len(), 6);
        assert_eq!(stats.weekly_rates.len(), 1);
        assert_eq!(stats.average_completion, 75);
        assert_eq!(stats.overall_completion, 4);
        assert!(!stats.challenge_complete);
        assert!(!stats.insights.is_empty());
    }
}

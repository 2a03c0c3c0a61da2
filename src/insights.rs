use crate::models::TaskPoint;

/// Inputs the insight rules read, all taken over the elapsed days.
#[derive(Debug, Clone)]
pub struct InsightContext {
    pub elapsed_days: u32,
    pub perfect_days: usize,
    pub best_task: TaskPoint,
    pub worst_task: TaskPoint,
    pub current_streak: u32,
    pub days_remaining: u32,
}

impl InsightContext {
    fn consistency_percent(&self) -> f64 {
        if self.elapsed_days == 0 {
            return 0.0;
        }
        100.0 * self.perfect_days as f64 / f64::from(self.elapsed_days)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Group {
    Consistency,
    BestTask,
    WorstTask,
    Streak,
    Countdown,
}

struct Rule {
    group: Group,
    applies: fn(&InsightContext) -> bool,
    message: fn(&InsightContext) -> String,
}

// Evaluated top to bottom; the first matching rule of a group wins.
const RULES: &[Rule] = &[
    Rule {
        group: Group::Consistency,
        applies: |ctx| ctx.consistency_percent() >= 90.0,
        message: |_| "Incredible! You're crushing this challenge with over 90% perfect days!".into(),
    },
    Rule {
        group: Group::Consistency,
        applies: |ctx| ctx.consistency_percent() >= 70.0,
        message: |_| "Great work! You're maintaining strong consistency.".into(),
    },
    Rule {
        group: Group::Consistency,
        applies: |ctx| ctx.consistency_percent() >= 50.0,
        message: |_| "You're making progress! Focus on building consistency.".into(),
    },
    Rule {
        group: Group::Consistency,
        applies: |_| true,
        message: |_| "Every day is a new opportunity. Stay focused on your goals!".into(),
    },
    Rule {
        group: Group::BestTask,
        applies: |ctx| ctx.best_task.rate >= 0.8,
        message: |ctx| format!("You're excelling at {}! Keep it up!", ctx.best_task.label),
    },
    Rule {
        group: Group::WorstTask,
        applies: |ctx| ctx.worst_task.rate < 0.6 && ctx.elapsed_days > 7,
        message: |ctx| {
            format!(
                "{} needs attention. Try setting reminders or adjusting your routine.",
                ctx.worst_task.label
            )
        },
    },
    Rule {
        group: Group::Streak,
        applies: |ctx| ctx.current_streak >= 7,
        message: |ctx| {
            format!(
                "Amazing {}-day streak! You're building unstoppable momentum!",
                ctx.current_streak
            )
        },
    },
    Rule {
        group: Group::Streak,
        applies: |ctx| ctx.current_streak >= 3,
        message: |ctx| format!("{}-day streak building! Keep the momentum going!", ctx.current_streak),
    },
    Rule {
        group: Group::Countdown,
        applies: |ctx| (1..=10).contains(&ctx.days_remaining),
        message: |ctx| format!("Only {} days left! The finish line is in sight!", ctx.days_remaining),
    },
    Rule {
        group: Group::Countdown,
        applies: |ctx| (11..=30).contains(&ctx.days_remaining),
        message: |_| "Less than a month to go! You've got this!".into(),
    },
];

pub fn generate_insights(ctx: &InsightContext) -> Vec<String> {
    let mut fired: Vec<Group> = Vec::new();
    let mut insights = Vec::new();
    for rule in RULES {
        if fired.contains(&rule.group) || !(rule.applies)(ctx) {
            continue;
        }
        fired.push(rule.group);
        insights.push((rule.message)(ctx));
    }
    insights
}

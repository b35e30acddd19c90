//! The scoring engine: one normalized item in, one non-negative score out.
//!
//! `score = base(priority) + age_days * 2 + escalation_count * 15 + bonus`
//! where the bonus is the severity table for blockers and topics, and a
//! capped days-overdue bonus for items that carry a due date. Scores are
//! deterministic for fixed inputs at a fixed instant; age legitimately
//! drifts between projections, so nothing here is memoized.

use liaison_models::{Priority, Severity, WorkItem};

/// Ceiling for the days-overdue bonus. Keeps one very late item from
/// dominating priority ordering across more than one bracket step.
pub const OVERDUE_BONUS_CAP: f64 = 60.0;

/// Base score contribution of a priority bracket.
pub fn base_score(priority: Priority) -> f64 {
    match priority {
        Priority::Critical => 100.0,
        Priority::High => 75.0,
        Priority::Medium => 50.0,
        Priority::Low => 25.0,
    }
}

/// Additive bonus for a severity classification.
pub fn severity_bonus(severity: Severity) -> f64 {
    match severity {
        Severity::Critical => 50.0,
        Severity::High => 30.0,
        Severity::New => 10.0,
        Severity::Normal => 0.0,
    }
}

/// Capped bonus proportional to days overdue.
pub fn overdue_bonus(days_overdue: i64) -> f64 {
    (days_overdue.max(0) as f64 * 4.0).min(OVERDUE_BONUS_CAP)
}

/// Scores one normalized work item.
///
/// Repairs are already applied upstream (lenient priority, zero age for a
/// missing timestamp); negative ages are clamped here as a final guard so
/// the result is always non-negative.
pub fn score(item: &WorkItem) -> f64 {
    let bonus = match item.days_overdue {
        // Overdue-based urgency replaces the severity table.
        Some(days) => overdue_bonus(days),
        None => severity_bonus(item.severity),
    };

    base_score(item.priority)
        + item.age_days.max(0) as f64 * 2.0
        + f64::from(item.escalation_count) * 15.0
        + bonus
}

//! The unified work-item view and its classification enums.
//!
//! Blockers, action items, and discussion topics all flatten into
//! [`WorkItem`] for scoring and ranking. The concrete record schemas stay
//! untouched; only this projection is shared.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ids::{ItemId, OwnerId, ProjectRef, VendorId};

/// Priority bracket of a work item.
///
/// Total order: `Critical > High > Medium > Low`. Deserialization is
/// lenient so one record with a mangled priority cannot blank an entire
/// agenda; unrecognized or missing values repair to `Medium`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Priority {
    /// Returns the lowercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Critical => "critical",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "critical" => Ok(Priority::Critical),
            _ => Err(()),
        }
    }
}

impl Serialize for Priority {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        // Repair malformed values instead of failing the whole record.
        Ok(raw.parse().unwrap_or_default())
    }
}

/// Lifecycle status of a work item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    #[default]
    Open,
    Resolved,
}

impl ItemStatus {
    /// Returns true for items still eligible for ranking.
    pub fn is_open(&self) -> bool {
        matches!(self, ItemStatus::Open)
    }
}

/// Type-specific urgency classification, distinct from priority.
///
/// Derived from age for blockers and from due-date overrun for action
/// items; discussion topics store it explicitly. Only ever used as an
/// additive scoring input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    High,
    New,
    #[default]
    Normal,
}

impl Severity {
    /// Returns the lowercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::New => "new",
            Severity::Normal => "normal",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tag for the three concrete record shapes behind [`WorkItem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Blocker,
    ActionItem,
    Topic,
}

impl EntityKind {
    /// Returns the lowercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Blocker => "blocker",
            EntityKind::ActionItem => "action_item",
            EntityKind::Topic => "topic",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One normalized work item, as the scoring engine and assembler see it.
///
/// `age_days` and `severity` are derived at projection time from the
/// backing record and are never written back to the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkItem {
    /// Which concrete record shape this item came from.
    pub kind: EntityKind,

    /// Id of the backing record, unique within its kind.
    pub id: ItemId,

    /// Vendor this item belongs to.
    pub vendor_id: VendorId,

    /// Short title shown on the agenda.
    pub title: String,

    /// Free-text context (a blocker's impact description maps here).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    /// What is being asked of the vendor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ask: Option<String>,

    /// Priority bracket.
    pub priority: Priority,

    /// Open or resolved.
    pub status: ItemStatus,

    /// When the item was first raised; missing values score as age zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_raised_at: Option<DateTime<Utc>>,

    /// Number of times the item has been escalated. Monotonic.
    #[serde(default)]
    pub escalation_count: u32,

    /// Person responsible, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<OwnerId>,

    /// Associated project, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<ProjectRef>,

    /// Due date (action items only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,

    /// Whole days since `first_raised_at`, computed at read time.
    pub age_days: i64,

    /// Whole days past the due date, computed at read time. `Some(0)` for
    /// an item that has a due date but is not yet overdue; `None` when
    /// the item has no due date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_overdue: Option<i64>,

    /// Derived (or stored, for topics) severity, computed at read time.
    pub severity: Severity,
}

/// A scored, positioned work item within one vendor's agenda.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedItem {
    /// The normalized item.
    pub item: WorkItem,

    /// Non-negative score; higher sorts earlier.
    pub score: f64,

    /// 1-based position in the score-sorted list.
    pub rank: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_total_order() {
        assert!(Priority::Critical > Priority::High);
        assert!(Priority::High > Priority::Medium);
        assert!(Priority::Medium > Priority::Low);
    }

    #[test]
    fn test_priority_serialize_lowercase() {
        assert_eq!(
            serde_json::to_string(&Priority::Critical).unwrap(),
            "\"critical\""
        );
    }

    #[test]
    fn test_priority_deserialize_known() {
        let p: Priority = serde_json::from_str("\"high\"").unwrap();
        assert_eq!(p, Priority::High);
    }

    #[test]
    fn test_priority_deserialize_case_insensitive() {
        let p: Priority = serde_json::from_str("\" Critical \"").unwrap();
        assert_eq!(p, Priority::Critical);
    }

    #[test]
    fn test_priority_repairs_malformed_to_medium() {
        let p: Priority = serde_json::from_str("\"urgent!!\"").unwrap();
        assert_eq!(p, Priority::Medium);
    }

    #[test]
    fn test_status_is_open() {
        assert!(ItemStatus::Open.is_open());
        assert!(!ItemStatus::Resolved.is_open());
    }

    #[test]
    fn test_severity_serde_roundtrip() {
        let json = serde_json::to_string(&Severity::New).unwrap();
        assert_eq!(json, "\"new\"");
        let back: Severity = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Severity::New);
    }

    #[test]
    fn test_entity_kind_names() {
        assert_eq!(EntityKind::Blocker.as_str(), "blocker");
        assert_eq!(EntityKind::ActionItem.as_str(), "action_item");
        assert_eq!(EntityKind::Topic.as_str(), "topic");
    }
}

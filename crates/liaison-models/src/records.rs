//! The three concrete record shapes behind a vendor agenda.
//!
//! Each type keeps its own schema; the ranking side only ever sees the
//! flattened [`crate::item::WorkItem`] projection.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{ItemId, OwnerId, ProjectRef, VendorId};
use crate::item::{ItemStatus, Priority, Severity};

/// An issue blocking progress with a vendor.
///
/// Severity is never stored for blockers; it is derived from age at read
/// time (>21d critical, >7d high, else new).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blocker {
    /// Unique identifier.
    pub id: ItemId,

    /// Vendor this blocker belongs to.
    pub vendor_id: VendorId,

    /// Short title shown on the agenda.
    pub title: String,

    /// What the blocker is preventing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,

    /// What is being asked of the vendor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ask: Option<String>,

    /// Priority bracket.
    #[serde(default)]
    pub priority: Priority,

    /// Open or resolved.
    #[serde(default)]
    pub status: ItemStatus,

    /// When the blocker was first raised.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_raised_at: Option<DateTime<Utc>>,

    /// Number of escalations. Only ever incremented.
    #[serde(default)]
    pub escalation_count: u32,

    /// Person responsible, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<OwnerId>,

    /// Associated project, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<ProjectRef>,

    /// When the blocker was resolved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
}

impl Blocker {
    /// Creates a new open blocker raised now.
    pub fn new(vendor_id: impl Into<VendorId>, title: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(),
            vendor_id: vendor_id.into(),
            title: title.into(),
            impact: None,
            ask: None,
            priority: Priority::Medium,
            status: ItemStatus::Open,
            first_raised_at: Some(Utc::now()),
            escalation_count: 0,
            owner: None,
            project: None,
            resolved_at: None,
        }
    }

    /// Returns true if the blocker is still open.
    pub fn is_open(&self) -> bool {
        self.status.is_open()
    }

    /// Marks the blocker resolved at the given instant.
    pub fn resolve(&mut self, at: DateTime<Utc>) {
        self.status = ItemStatus::Resolved;
        self.resolved_at = Some(at);
    }
}

/// A pending action item owed by or to a vendor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionItem {
    /// Unique identifier.
    pub id: ItemId,

    /// Vendor this action item belongs to.
    pub vendor_id: VendorId,

    /// Short title shown on the agenda.
    pub title: String,

    /// Free-text context.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    /// What is being asked of the vendor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ask: Option<String>,

    /// Priority bracket.
    #[serde(default)]
    pub priority: Priority,

    /// Open or resolved.
    #[serde(default)]
    pub status: ItemStatus,

    /// When the action item was first raised.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_raised_at: Option<DateTime<Utc>>,

    /// Due date; overrun drives the derived severity and score bonus.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,

    /// Number of escalations. Only ever incremented.
    #[serde(default)]
    pub escalation_count: u32,

    /// Person responsible, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<OwnerId>,

    /// Associated project, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<ProjectRef>,

    /// When the action item was resolved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
}

impl ActionItem {
    /// Creates a new open action item raised now.
    pub fn new(vendor_id: impl Into<VendorId>, title: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(),
            vendor_id: vendor_id.into(),
            title: title.into(),
            context: None,
            ask: None,
            priority: Priority::Medium,
            status: ItemStatus::Open,
            first_raised_at: Some(Utc::now()),
            due_date: None,
            escalation_count: 0,
            owner: None,
            project: None,
            resolved_at: None,
        }
    }

    /// Returns true if the action item is still open.
    pub fn is_open(&self) -> bool {
        self.status.is_open()
    }

    /// Marks the action item resolved at the given instant.
    pub fn resolve(&mut self, at: DateTime<Utc>) {
        self.status = ItemStatus::Resolved;
        self.resolved_at = Some(at);
    }
}

/// An ad-hoc discussion topic for the next vendor meeting.
///
/// Topics carry an explicit stored severity; new topics default to
/// `Severity::New`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscussionTopic {
    /// Unique identifier.
    pub id: ItemId,

    /// Vendor this topic belongs to.
    pub vendor_id: VendorId,

    /// Short title shown on the agenda.
    pub title: String,

    /// Free-text context.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    /// What is being asked of the vendor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ask: Option<String>,

    /// Priority bracket.
    #[serde(default)]
    pub priority: Priority,

    /// Open or resolved.
    #[serde(default)]
    pub status: ItemStatus,

    /// When the topic was first raised.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_raised_at: Option<DateTime<Utc>>,

    /// Explicit severity used as the scoring bonus input.
    #[serde(default)]
    pub severity: Severity,

    /// Number of escalations. Only ever incremented.
    #[serde(default)]
    pub escalation_count: u32,

    /// Person responsible, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<OwnerId>,

    /// Associated project, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<ProjectRef>,

    /// When the topic was resolved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
}

impl DiscussionTopic {
    /// Creates a new open topic raised now, severity `new`.
    pub fn new(vendor_id: impl Into<VendorId>, title: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(),
            vendor_id: vendor_id.into(),
            title: title.into(),
            context: None,
            ask: None,
            priority: Priority::Medium,
            status: ItemStatus::Open,
            first_raised_at: Some(Utc::now()),
            severity: Severity::New,
            escalation_count: 0,
            owner: None,
            project: None,
            resolved_at: None,
        }
    }

    /// Returns true if the topic is still open.
    pub fn is_open(&self) -> bool {
        self.status.is_open()
    }

    /// Marks the topic resolved at the given instant.
    pub fn resolve(&mut self, at: DateTime<Utc>) {
        self.status = ItemStatus::Resolved;
        self.resolved_at = Some(at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocker_new_defaults() {
        let blocker = Blocker::new("ven-acme", "Waiting on sandbox access");

        assert!(blocker.id.as_str().starts_with("itm-"));
        assert_eq!(blocker.vendor_id.as_str(), "ven-acme");
        assert_eq!(blocker.priority, Priority::Medium);
        assert_eq!(blocker.escalation_count, 0);
        assert!(blocker.is_open());
        assert!(blocker.first_raised_at.is_some());
        assert!(blocker.resolved_at.is_none());
    }

    #[test]
    fn test_blocker_resolve() {
        let mut blocker = Blocker::new("ven-acme", "Blocked");
        let now = Utc::now();

        blocker.resolve(now);

        assert!(!blocker.is_open());
        assert_eq!(blocker.resolved_at, Some(now));
    }

    #[test]
    fn test_topic_defaults_to_new_severity() {
        let topic = DiscussionTopic::new("ven-acme", "Renewal terms");

        assert_eq!(topic.severity, Severity::New);
        assert_eq!(topic.priority, Priority::Medium);
        assert!(topic.is_open());
    }

    #[test]
    fn test_action_item_serde_roundtrip() {
        let mut action = ActionItem::new("ven-acme", "Send usage report");
        action.due_date = Some(NaiveDate::from_ymd_opt(2026, 8, 1).unwrap());
        action.ask = Some("Confirm receipt".to_string());

        let json = serde_json::to_string(&action).unwrap();
        let back: ActionItem = serde_json::from_str(&json).unwrap();

        assert_eq!(back.id, action.id);
        assert_eq!(back.due_date, action.due_date);
        assert_eq!(back.ask, action.ask);
    }

    #[test]
    fn test_minimal_record_deserializes_with_defaults() {
        // Old or hand-edited files may omit status, priority, counters.
        let json = r#"{"id":"itm-1","vendor_id":"ven-1","title":"Bare"}"#;
        let blocker: Blocker = serde_json::from_str(json).unwrap();

        assert_eq!(blocker.priority, Priority::Medium);
        assert_eq!(blocker.status, ItemStatus::Open);
        assert_eq!(blocker.escalation_count, 0);
        assert!(blocker.first_raised_at.is_none());
    }
}

//! Read-only source adapters over the three record stores.
//!
//! Each adapter projects one record type into the normalized
//! [`WorkItem`] shape, computing `age_days`, `days_overdue`, and severity
//! from stored timestamps at the projection instant. Nothing derived is
//! ever written back.

use chrono::{DateTime, Utc};

use liaison_models::{
    ActionItem, Blocker, DiscussionTopic, EntityKind, Severity, VendorId, WorkItem,
};
use liaison_persistence::{ActionItemStore, BlockerStore, TopicStore};

use crate::error::Result;

/// A read-only projection of one record type into normalized work items.
pub trait SourceAdapter {
    /// The record shape this adapter projects.
    fn kind(&self) -> EntityKind;

    /// Returns the vendor's open items with derived fields computed at
    /// `now`, in stable store order.
    fn open_items(&self, vendor: &VendorId, now: DateTime<Utc>) -> Result<Vec<WorkItem>>;
}

/// Whole days since the item was raised; missing timestamps age as zero.
fn age_days(first_raised_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> i64 {
    first_raised_at
        .map(|raised| (now - raised).num_days().max(0))
        .unwrap_or(0)
}

/// Age-band severity for blockers.
fn blocker_severity(age_days: i64) -> Severity {
    if age_days > 21 {
        Severity::Critical
    } else if age_days > 7 {
        Severity::High
    } else {
        Severity::New
    }
}

/// Overrun-band severity for action items.
fn action_severity(days_overdue: Option<i64>) -> Severity {
    match days_overdue {
        Some(days) if days > 7 => Severity::Critical,
        Some(days) if days > 0 => Severity::High,
        _ => Severity::New,
    }
}

/// Projects blockers; severity derives from age, "context" is the impact.
pub struct BlockerAdapter {
    store: BlockerStore,
}

impl BlockerAdapter {
    pub fn new(store: BlockerStore) -> Self {
        Self { store }
    }

    fn project(blocker: Blocker, now: DateTime<Utc>) -> WorkItem {
        let age = age_days(blocker.first_raised_at, now);
        WorkItem {
            kind: EntityKind::Blocker,
            id: blocker.id,
            vendor_id: blocker.vendor_id,
            title: blocker.title,
            context: blocker.impact,
            ask: blocker.ask,
            priority: blocker.priority,
            status: blocker.status,
            first_raised_at: blocker.first_raised_at,
            escalation_count: blocker.escalation_count,
            owner: blocker.owner,
            project: blocker.project,
            due_date: None,
            age_days: age,
            days_overdue: None,
            severity: blocker_severity(age),
        }
    }
}

impl SourceAdapter for BlockerAdapter {
    fn kind(&self) -> EntityKind {
        EntityKind::Blocker
    }

    fn open_items(&self, vendor: &VendorId, now: DateTime<Utc>) -> Result<Vec<WorkItem>> {
        Ok(self
            .store
            .list(vendor)?
            .into_iter()
            .filter(Blocker::is_open)
            .map(|blocker| Self::project(blocker, now))
            .collect())
    }
}

/// Projects action items; severity and score bonus derive from due-date
/// overrun.
pub struct ActionItemAdapter {
    store: ActionItemStore,
}

impl ActionItemAdapter {
    pub fn new(store: ActionItemStore) -> Self {
        Self { store }
    }

    fn project(action: ActionItem, now: DateTime<Utc>) -> WorkItem {
        let days_overdue = action
            .due_date
            .map(|due| (now.date_naive() - due).num_days().max(0));
        WorkItem {
            kind: EntityKind::ActionItem,
            id: action.id,
            vendor_id: action.vendor_id,
            title: action.title,
            context: action.context,
            ask: action.ask,
            priority: action.priority,
            status: action.status,
            first_raised_at: action.first_raised_at,
            escalation_count: action.escalation_count,
            owner: action.owner,
            project: action.project,
            due_date: action.due_date,
            age_days: age_days(action.first_raised_at, now),
            days_overdue,
            severity: action_severity(days_overdue),
        }
    }
}

impl SourceAdapter for ActionItemAdapter {
    fn kind(&self) -> EntityKind {
        EntityKind::ActionItem
    }

    fn open_items(&self, vendor: &VendorId, now: DateTime<Utc>) -> Result<Vec<WorkItem>> {
        Ok(self
            .store
            .list(vendor)?
            .into_iter()
            .filter(ActionItem::is_open)
            .map(|action| Self::project(action, now))
            .collect())
    }
}

/// Projects discussion topics; severity is the stored explicit value.
pub struct TopicAdapter {
    store: TopicStore,
}

impl TopicAdapter {
    pub fn new(store: TopicStore) -> Self {
        Self { store }
    }

    fn project(topic: DiscussionTopic, now: DateTime<Utc>) -> WorkItem {
        WorkItem {
            kind: EntityKind::Topic,
            id: topic.id,
            vendor_id: topic.vendor_id,
            title: topic.title,
            context: topic.context,
            ask: topic.ask,
            priority: topic.priority,
            status: topic.status,
            first_raised_at: topic.first_raised_at,
            escalation_count: topic.escalation_count,
            owner: topic.owner,
            project: topic.project,
            due_date: None,
            age_days: age_days(topic.first_raised_at, now),
            days_overdue: None,
            severity: topic.severity,
        }
    }
}

impl SourceAdapter for TopicAdapter {
    fn kind(&self) -> EntityKind {
        EntityKind::Topic
    }

    fn open_items(&self, vendor: &VendorId, now: DateTime<Utc>) -> Result<Vec<WorkItem>> {
        Ok(self
            .store
            .list(vendor)?
            .into_iter()
            .filter(DiscussionTopic::is_open)
            .map(|topic| Self::project(topic, now))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use liaison_models::Priority;
    use tempfile::tempdir;

    fn days_ago(days: i64) -> DateTime<Utc> {
        Utc::now() - Duration::days(days)
    }

    #[test]
    fn test_blocker_severity_bands() {
        assert_eq!(blocker_severity(0), Severity::New);
        assert_eq!(blocker_severity(7), Severity::New);
        assert_eq!(blocker_severity(8), Severity::High);
        assert_eq!(blocker_severity(21), Severity::High);
        assert_eq!(blocker_severity(22), Severity::Critical);
    }

    #[test]
    fn test_action_severity_bands() {
        assert_eq!(action_severity(None), Severity::New);
        assert_eq!(action_severity(Some(0)), Severity::New);
        assert_eq!(action_severity(Some(1)), Severity::High);
        assert_eq!(action_severity(Some(7)), Severity::High);
        assert_eq!(action_severity(Some(8)), Severity::Critical);
    }

    #[test]
    fn test_age_zero_when_timestamp_missing() {
        assert_eq!(age_days(None, Utc::now()), 0);
    }

    #[test]
    fn test_age_clamps_future_timestamps() {
        let future = Utc::now() + Duration::days(3);
        assert_eq!(age_days(Some(future), Utc::now()), 0);
    }

    #[test]
    fn test_blocker_projection() {
        let dir = tempdir().unwrap();
        let store = BlockerStore::new(dir.path());
        let vendor = VendorId::from("ven-1");

        let mut blocker = Blocker::builder(vendor.clone(), "Stalled rollout")
            .impact("Launch slipped a sprint")
            .priority(Priority::High)
            .build();
        blocker.first_raised_at = Some(days_ago(10));
        store.save(&blocker).unwrap();

        let adapter = BlockerAdapter::new(store);
        let items = adapter.open_items(&vendor, Utc::now()).unwrap();

        assert_eq!(items.len(), 1);
        let item = &items[0];
        assert_eq!(item.kind, EntityKind::Blocker);
        assert_eq!(item.age_days, 10);
        assert_eq!(item.severity, Severity::High);
        assert_eq!(item.context.as_deref(), Some("Launch slipped a sprint"));
    }

    #[test]
    fn test_resolved_records_excluded() {
        let dir = tempdir().unwrap();
        let store = TopicStore::new(dir.path());
        let vendor = VendorId::from("ven-1");

        let mut resolved = DiscussionTopic::new(vendor.clone(), "Done");
        resolved.resolve(Utc::now());
        store.save(&resolved).unwrap();
        store
            .save(&DiscussionTopic::new(vendor.clone(), "Still open"))
            .unwrap();

        let adapter = TopicAdapter::new(store);
        let items = adapter.open_items(&vendor, Utc::now()).unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Still open");
    }

    #[test]
    fn test_action_item_overdue_projection() {
        let dir = tempdir().unwrap();
        let store = ActionItemStore::new(dir.path());
        let vendor = VendorId::from("ven-1");

        let overdue_due = (Utc::now() - Duration::days(3)).date_naive();
        store
            .save(
                &ActionItem::builder(vendor.clone(), "Late deliverable")
                    .due(overdue_due)
                    .build(),
            )
            .unwrap();

        let future_due = (Utc::now() + Duration::days(30)).date_naive();
        store
            .save(
                &ActionItem::builder(vendor.clone(), "On track")
                    .due(future_due)
                    .build(),
            )
            .unwrap();

        let adapter = ActionItemAdapter::new(store);
        let items = adapter.open_items(&vendor, Utc::now()).unwrap();
        assert_eq!(items.len(), 2);

        let late = items.iter().find(|i| i.title == "Late deliverable").unwrap();
        assert_eq!(late.days_overdue, Some(3));
        assert_eq!(late.severity, Severity::High);

        let on_track = items.iter().find(|i| i.title == "On track").unwrap();
        assert_eq!(on_track.days_overdue, Some(0));
        assert_eq!(on_track.severity, Severity::New);
    }

    #[test]
    fn test_projection_is_recomputed_per_call() {
        let dir = tempdir().unwrap();
        let store = BlockerStore::new(dir.path());
        let vendor = VendorId::from("ven-1");

        let mut blocker = Blocker::new(vendor.clone(), "Aging");
        blocker.first_raised_at = Some(days_ago(5));
        store.save(&blocker).unwrap();

        let adapter = BlockerAdapter::new(store);
        let today = adapter.open_items(&vendor, Utc::now()).unwrap();
        let later = adapter
            .open_items(&vendor, Utc::now() + Duration::days(20))
            .unwrap();

        assert_eq!(today[0].age_days, 5);
        assert_eq!(later[0].age_days, 25);
        assert_eq!(today[0].severity, Severity::New);
        assert_eq!(later[0].severity, Severity::Critical);
    }

    #[test]
    fn test_due_date_band_boundary() {
        let due = NaiveDate::from_ymd_opt(2026, 7, 1).unwrap();
        let eight_days_later = due + Duration::days(8);
        let now = eight_days_later
            .and_hms_opt(9, 0, 0)
            .unwrap()
            .and_utc();

        let dir = tempdir().unwrap();
        let store = ActionItemStore::new(dir.path());
        let vendor = VendorId::from("ven-1");
        store
            .save(&ActionItem::builder(vendor.clone(), "Very late").due(due).build())
            .unwrap();

        let adapter = ActionItemAdapter::new(store);
        let items = adapter.open_items(&vendor, now).unwrap();
        assert_eq!(items[0].days_overdue, Some(8));
        assert_eq!(items[0].severity, Severity::Critical);
    }
}

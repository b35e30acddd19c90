//! Builder patterns for the record types.

use chrono::NaiveDate;

use crate::ids::{OwnerId, ProjectRef, VendorId};
use crate::item::{Priority, Severity};
use crate::records::{ActionItem, Blocker, DiscussionTopic};

/// Builder for creating [`Blocker`] instances with a fluent API.
#[derive(Debug, Clone)]
pub struct BlockerBuilder {
    blocker: Blocker,
}

impl BlockerBuilder {
    /// Creates a new builder with required fields.
    pub fn new(vendor_id: impl Into<VendorId>, title: impl Into<String>) -> Self {
        Self {
            blocker: Blocker::new(vendor_id, title),
        }
    }

    /// Sets the impact description.
    pub fn impact(mut self, impact: impl Into<String>) -> Self {
        self.blocker.impact = Some(impact.into());
        self
    }

    /// Sets the ask.
    pub fn ask(mut self, ask: impl Into<String>) -> Self {
        self.blocker.ask = Some(ask.into());
        self
    }

    /// Sets the priority (defaults to medium).
    pub fn priority(mut self, priority: Priority) -> Self {
        self.blocker.priority = priority;
        self
    }

    /// Sets the owner.
    pub fn owner(mut self, owner: impl Into<OwnerId>) -> Self {
        self.blocker.owner = Some(owner.into());
        self
    }

    /// Sets the associated project.
    pub fn project(mut self, project: impl Into<ProjectRef>) -> Self {
        self.blocker.project = Some(project.into());
        self
    }

    /// Builds the blocker.
    pub fn build(self) -> Blocker {
        self.blocker
    }
}

impl Blocker {
    /// Creates a builder for a new blocker.
    pub fn builder(vendor_id: impl Into<VendorId>, title: impl Into<String>) -> BlockerBuilder {
        BlockerBuilder::new(vendor_id, title)
    }
}

/// Builder for creating [`ActionItem`] instances with a fluent API.
#[derive(Debug, Clone)]
pub struct ActionItemBuilder {
    action: ActionItem,
}

impl ActionItemBuilder {
    /// Creates a new builder with required fields.
    pub fn new(vendor_id: impl Into<VendorId>, title: impl Into<String>) -> Self {
        Self {
            action: ActionItem::new(vendor_id, title),
        }
    }

    /// Sets the context.
    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.action.context = Some(context.into());
        self
    }

    /// Sets the ask.
    pub fn ask(mut self, ask: impl Into<String>) -> Self {
        self.action.ask = Some(ask.into());
        self
    }

    /// Sets the priority (defaults to medium).
    pub fn priority(mut self, priority: Priority) -> Self {
        self.action.priority = priority;
        self
    }

    /// Sets the due date.
    pub fn due(mut self, due: NaiveDate) -> Self {
        self.action.due_date = Some(due);
        self
    }

    /// Sets the owner.
    pub fn owner(mut self, owner: impl Into<OwnerId>) -> Self {
        self.action.owner = Some(owner.into());
        self
    }

    /// Sets the associated project.
    pub fn project(mut self, project: impl Into<ProjectRef>) -> Self {
        self.action.project = Some(project.into());
        self
    }

    /// Builds the action item.
    pub fn build(self) -> ActionItem {
        self.action
    }
}

impl ActionItem {
    /// Creates a builder for a new action item.
    pub fn builder(vendor_id: impl Into<VendorId>, title: impl Into<String>) -> ActionItemBuilder {
        ActionItemBuilder::new(vendor_id, title)
    }
}

/// Builder for creating [`DiscussionTopic`] instances with a fluent API.
#[derive(Debug, Clone)]
pub struct TopicBuilder {
    topic: DiscussionTopic,
}

impl TopicBuilder {
    /// Creates a new builder with required fields.
    pub fn new(vendor_id: impl Into<VendorId>, title: impl Into<String>) -> Self {
        Self {
            topic: DiscussionTopic::new(vendor_id, title),
        }
    }

    /// Sets the context.
    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.topic.context = Some(context.into());
        self
    }

    /// Sets the ask.
    pub fn ask(mut self, ask: impl Into<String>) -> Self {
        self.topic.ask = Some(ask.into());
        self
    }

    /// Sets the priority (defaults to medium).
    pub fn priority(mut self, priority: Priority) -> Self {
        self.topic.priority = priority;
        self
    }

    /// Sets the explicit severity (defaults to new).
    pub fn severity(mut self, severity: Severity) -> Self {
        self.topic.severity = severity;
        self
    }

    /// Sets the owner.
    pub fn owner(mut self, owner: impl Into<OwnerId>) -> Self {
        self.topic.owner = Some(owner.into());
        self
    }

    /// Sets the associated project.
    pub fn project(mut self, project: impl Into<ProjectRef>) -> Self {
        self.topic.project = Some(project.into());
        self
    }

    /// Builds the topic.
    pub fn build(self) -> DiscussionTopic {
        self.topic
    }
}

impl DiscussionTopic {
    /// Creates a builder for a new discussion topic.
    pub fn builder(vendor_id: impl Into<VendorId>, title: impl Into<String>) -> TopicBuilder {
        TopicBuilder::new(vendor_id, title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemStatus;

    #[test]
    fn test_blocker_builder() {
        let blocker = Blocker::builder("ven-1", "API keys revoked")
            .impact("Integration tests cannot run")
            .ask("Reissue service credentials")
            .priority(Priority::Critical)
            .owner("own-ana")
            .build();

        assert_eq!(blocker.title, "API keys revoked");
        assert_eq!(blocker.impact.as_deref(), Some("Integration tests cannot run"));
        assert_eq!(blocker.ask.as_deref(), Some("Reissue service credentials"));
        assert_eq!(blocker.priority, Priority::Critical);
        assert_eq!(blocker.owner.as_ref().map(|o| o.as_str()), Some("own-ana"));
        assert_eq!(blocker.status, ItemStatus::Open);
    }

    #[test]
    fn test_action_builder_with_due_date() {
        let due = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
        let action = ActionItem::builder("ven-1", "Ship migration plan")
            .due(due)
            .priority(Priority::High)
            .build();

        assert_eq!(action.due_date, Some(due));
        assert_eq!(action.priority, Priority::High);
    }

    #[test]
    fn test_topic_builder_defaults() {
        let topic = DiscussionTopic::builder("ven-1", "Roadmap sync").build();

        assert_eq!(topic.priority, Priority::Medium);
        assert_eq!(topic.severity, Severity::New);
        assert!(topic.context.is_none());
    }

    #[test]
    fn test_topic_builder_overrides() {
        let topic = DiscussionTopic::builder("ven-1", "Incident follow-up")
            .context("Sev1 from last week")
            .severity(Severity::Critical)
            .project("prj-platform")
            .build();

        assert_eq!(topic.severity, Severity::Critical);
        assert_eq!(topic.context.as_deref(), Some("Sev1 from last week"));
        assert_eq!(
            topic.project.as_ref().map(|p| p.as_str()),
            Some("prj-platform")
        );
    }
}

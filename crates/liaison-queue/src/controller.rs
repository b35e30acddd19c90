//! QueueController - one operator session over one vendor's agenda.
//!
//! Two intentionally divergent state holders back every operation: the
//! synchronous local list (authoritative for rendering) and the
//! asynchronously persisted records (authoritative only on the next full
//! refresh). Reorders happen on the calling thread before the matching
//! store write is even scheduled; a failed write is logged and left
//! alone. That trade favors responsiveness over strict consistency and
//! matches the single-operator usage this controller is built for.

use chrono::Utc;
use tokio::runtime::Handle;
use tracing::{debug, warn};

use liaison_models::{
    DiscussionTopic, EntityKind, ItemId, Priority, RankedItem, VendorId,
};
use liaison_persistence::AgendaStore;
use liaison_ranking::RankingAssembler;

use crate::error::Result;
use crate::export::render_snapshot;

/// Free-text and priority edits applied through the per-kind field
/// mapping: `context` lands in a blocker's impact description and in the
/// context field of action items and topics.
#[derive(Debug, Clone, Default)]
pub struct EditFields {
    /// New title.
    pub title: Option<String>,
    /// New context (impact, for blockers).
    pub context: Option<String>,
    /// New ask.
    pub ask: Option<String>,
    /// New priority bracket.
    pub priority: Option<Priority>,
}

impl EditFields {
    /// Returns true when no field is set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.context.is_none()
            && self.ask.is_none()
            && self.priority.is_none()
    }
}

/// Holds the ranked list for an interactive session and executes the
/// escalation-queue operations against it.
pub struct QueueController {
    vendor: VendorId,
    limit: usize,
    store: AgendaStore,
    assembler: RankingAssembler,
    /// Local display order. Ranks always read 1..=len after a mutation;
    /// scores go stale until the next refresh.
    items: Vec<RankedItem>,
    runtime: Handle,
}

impl QueueController {
    /// Creates a controller for one vendor. Call [`refresh`](Self::refresh)
    /// to populate the list.
    pub fn new(store: AgendaStore, vendor: VendorId, limit: usize, runtime: Handle) -> Self {
        let assembler = RankingAssembler::new(&store);
        Self {
            vendor,
            limit,
            store,
            assembler,
            items: Vec::new(),
            runtime,
        }
    }

    /// The vendor this session is scoped to.
    pub fn vendor(&self) -> &VendorId {
        &self.vendor
    }

    /// Current local list, in display order.
    pub fn items(&self) -> &[RankedItem] {
        &self.items
    }

    /// Replaces the local list with a fresh assembler fetch. The only
    /// path back to a fully store-confirmed order.
    pub fn refresh(&mut self) -> Result<()> {
        self.items = self.assembler.ranked_agenda(&self.vendor, self.limit)?;
        Ok(())
    }

    /// Escalates an item one position.
    ///
    /// Swaps the item with its immediate predecessor; if the predecessor
    /// sits in a strictly higher priority bracket, the item adopts that
    /// bracket (never jumping further). The escalation count always goes
    /// up by one. No-op on the top item or a stale reference.
    ///
    /// Returns true if the local list changed.
    pub fn escalate(&mut self, kind: EntityKind, id: &ItemId) -> bool {
        let Some(index) = self.position(kind, id) else {
            debug!(kind = %kind, item = %id, "escalate target no longer listed");
            return false;
        };
        if index == 0 {
            return false;
        }

        let predecessor_priority = self.items[index - 1].item.priority;
        let entry = &mut self.items[index];

        let mut new_priority = None;
        if predecessor_priority > entry.item.priority {
            entry.item.priority = predecessor_priority;
            new_priority = Some(predecessor_priority);
        }
        entry.item.escalation_count += 1;
        let escalation_count = entry.item.escalation_count;
        let id = entry.item.id.clone();

        self.items.swap(index - 1, index);
        self.renumber();

        self.spawn_escalation_write(kind, id, escalation_count, new_priority);
        true
    }

    /// De-escalates an item one position.
    ///
    /// Symmetric with [`escalate`](Self::escalate) against the successor:
    /// the item may drop into a strictly lower bracket, and the
    /// escalation count is never touched. No-op on the last item or a
    /// stale reference.
    ///
    /// Returns true if the local list changed.
    pub fn deescalate(&mut self, kind: EntityKind, id: &ItemId) -> bool {
        let Some(index) = self.position(kind, id) else {
            debug!(kind = %kind, item = %id, "de-escalate target no longer listed");
            return false;
        };
        if index + 1 == self.items.len() {
            return false;
        }

        let successor_priority = self.items[index + 1].item.priority;
        let entry = &mut self.items[index];

        let mut new_priority = None;
        if successor_priority < entry.item.priority {
            entry.item.priority = successor_priority;
            new_priority = Some(successor_priority);
        }
        let id = entry.item.id.clone();

        self.items.swap(index, index + 1);
        self.renumber();

        if let Some(priority) = new_priority {
            self.spawn_priority_write(kind, id, priority);
        }
        true
    }

    /// Resolves an item: resolved status and timestamp go to the store,
    /// the item leaves the local list immediately. Other items keep
    /// their relative order; only their displayed positions move up.
    ///
    /// Returns true if an item was removed.
    pub fn resolve(&mut self, kind: EntityKind, id: &ItemId) -> bool {
        let Some(index) = self.position(kind, id) else {
            debug!(kind = %kind, item = %id, "resolve target no longer listed");
            return false;
        };

        let entry = self.items.remove(index);
        self.renumber();

        let store = self.store.clone();
        let vendor = self.vendor.clone();
        let id = entry.item.id;
        self.runtime.spawn(async move {
            let resolved_at = Utc::now();
            let result = match kind {
                EntityKind::Blocker => store
                    .blockers
                    .update(&vendor, &id, |b| b.resolve(resolved_at))
                    .map(|_| ()),
                EntityKind::ActionItem => store
                    .actions
                    .update(&vendor, &id, |a| a.resolve(resolved_at))
                    .map(|_| ()),
                EntityKind::Topic => store
                    .topics
                    .update(&vendor, &id, |t| t.resolve(resolved_at))
                    .map(|_| ()),
            };
            if let Err(e) = result {
                // Item reappears on the next full fetch; resolving again
                // is idempotent.
                warn!(kind = %kind, item = %id, error = %e, "resolve write failed");
            }
        });
        true
    }

    /// Permanently deletes the underlying record and drops the item from
    /// the local list. Irreversible.
    ///
    /// Returns true if an item was removed.
    pub fn delete(&mut self, kind: EntityKind, id: &ItemId) -> bool {
        let Some(index) = self.position(kind, id) else {
            debug!(kind = %kind, item = %id, "delete target no longer listed");
            return false;
        };

        let entry = self.items.remove(index);
        self.renumber();

        let store = self.store.clone();
        let vendor = self.vendor.clone();
        let id = entry.item.id;
        self.runtime.spawn(async move {
            let result = match kind {
                EntityKind::Blocker => store.blockers.delete(&vendor, &id),
                EntityKind::ActionItem => store.actions.delete(&vendor, &id),
                EntityKind::Topic => store.topics.delete(&vendor, &id),
            };
            if let Err(e) = result {
                warn!(kind = %kind, item = %id, error = %e, "delete write failed");
            }
        });
        true
    }

    /// Creates a new open discussion topic (priority medium, severity
    /// new) and re-runs the full assembler fetch so the new item lands at
    /// its true rank rather than being spliced in.
    pub fn add_item(
        &mut self,
        title: impl Into<String>,
        context: Option<String>,
        ask: Option<String>,
    ) -> Result<ItemId> {
        let mut builder = DiscussionTopic::builder(self.vendor.clone(), title);
        if let Some(context) = context {
            builder = builder.context(context);
        }
        if let Some(ask) = ask {
            builder = builder.ask(ask);
        }
        let topic = builder.build();

        // Creation is synchronous: the refresh below must see the record.
        self.store.topics.save(&topic)?;
        let id = topic.id;
        self.refresh()?;
        Ok(id)
    }

    /// Edits free-text and/or priority fields through the per-kind field
    /// mapping. The local display copy updates immediately; position and
    /// escalation count are untouched.
    ///
    /// Returns true if an edit was applied locally.
    pub fn edit_item(&mut self, kind: EntityKind, id: &ItemId, fields: EditFields) -> bool {
        if fields.is_empty() {
            return false;
        }
        let Some(index) = self.position(kind, id) else {
            debug!(kind = %kind, item = %id, "edit target no longer listed");
            return false;
        };

        let entry = &mut self.items[index];
        if let Some(title) = &fields.title {
            entry.item.title = title.clone();
        }
        if let Some(context) = &fields.context {
            entry.item.context = Some(context.clone());
        }
        if let Some(ask) = &fields.ask {
            entry.item.ask = Some(ask.clone());
        }
        if let Some(priority) = fields.priority {
            entry.item.priority = priority;
        }
        let id = entry.item.id.clone();

        self.spawn_edit_write(kind, id, fields);
        true
    }

    /// Renders the current in-memory list as a fixed-column table.
    /// Pure read.
    pub fn export_snapshot(&self) -> String {
        render_snapshot(&self.items)
    }

    fn position(&self, kind: EntityKind, id: &ItemId) -> Option<usize> {
        self.items
            .iter()
            .position(|entry| entry.item.kind == kind && entry.item.id == *id)
    }

    fn renumber(&mut self) {
        for (index, entry) in self.items.iter_mut().enumerate() {
            entry.rank = index + 1;
        }
    }

    fn spawn_escalation_write(
        &self,
        kind: EntityKind,
        id: ItemId,
        escalation_count: u32,
        priority: Option<Priority>,
    ) {
        let store = self.store.clone();
        let vendor = self.vendor.clone();
        self.runtime.spawn(async move {
            let result = match kind {
                EntityKind::Blocker => store
                    .blockers
                    .update(&vendor, &id, |b| {
                        b.escalation_count = escalation_count;
                        if let Some(priority) = priority {
                            b.priority = priority;
                        }
                    })
                    .map(|_| ()),
                EntityKind::ActionItem => store
                    .actions
                    .update(&vendor, &id, |a| {
                        a.escalation_count = escalation_count;
                        if let Some(priority) = priority {
                            a.priority = priority;
                        }
                    })
                    .map(|_| ()),
                EntityKind::Topic => store
                    .topics
                    .update(&vendor, &id, |t| {
                        t.escalation_count = escalation_count;
                        if let Some(priority) = priority {
                            t.priority = priority;
                        }
                    })
                    .map(|_| ()),
            };
            if let Err(e) = result {
                warn!(kind = %kind, item = %id, error = %e, "escalation write failed");
            }
        });
    }

    fn spawn_priority_write(&self, kind: EntityKind, id: ItemId, priority: Priority) {
        let store = self.store.clone();
        let vendor = self.vendor.clone();
        self.runtime.spawn(async move {
            let result = match kind {
                EntityKind::Blocker => store
                    .blockers
                    .update(&vendor, &id, |b| b.priority = priority)
                    .map(|_| ()),
                EntityKind::ActionItem => store
                    .actions
                    .update(&vendor, &id, |a| a.priority = priority)
                    .map(|_| ()),
                EntityKind::Topic => store
                    .topics
                    .update(&vendor, &id, |t| t.priority = priority)
                    .map(|_| ()),
            };
            if let Err(e) = result {
                warn!(kind = %kind, item = %id, error = %e, "priority write failed");
            }
        });
    }

    fn spawn_edit_write(&self, kind: EntityKind, id: ItemId, fields: EditFields) {
        let store = self.store.clone();
        let vendor = self.vendor.clone();
        self.runtime.spawn(async move {
            let result = match kind {
                EntityKind::Blocker => store
                    .blockers
                    .update(&vendor, &id, |b| {
                        if let Some(title) = fields.title {
                            b.title = title;
                        }
                        // The generic "context" field maps to a
                        // blocker's impact description.
                        if let Some(context) = fields.context {
                            b.impact = Some(context);
                        }
                        if let Some(ask) = fields.ask {
                            b.ask = Some(ask);
                        }
                        if let Some(priority) = fields.priority {
                            b.priority = priority;
                        }
                    })
                    .map(|_| ()),
                EntityKind::ActionItem => store
                    .actions
                    .update(&vendor, &id, |a| {
                        if let Some(title) = fields.title {
                            a.title = title;
                        }
                        if let Some(context) = fields.context {
                            a.context = Some(context);
                        }
                        if let Some(ask) = fields.ask {
                            a.ask = Some(ask);
                        }
                        if let Some(priority) = fields.priority {
                            a.priority = priority;
                        }
                    })
                    .map(|_| ()),
                EntityKind::Topic => store
                    .topics
                    .update(&vendor, &id, |t| {
                        if let Some(title) = fields.title {
                            t.title = title;
                        }
                        if let Some(context) = fields.context {
                            t.context = Some(context);
                        }
                        if let Some(ask) = fields.ask {
                            t.ask = Some(ask);
                        }
                        if let Some(priority) = fields.priority {
                            t.priority = priority;
                        }
                    })
                    .map(|_| ()),
            };
            if let Err(e) = result {
                warn!(kind = %kind, item = %id, error = %e, "edit write failed");
            }
        });
    }
}

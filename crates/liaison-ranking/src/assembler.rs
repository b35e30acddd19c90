//! The ranking assembler: merge, score, sort, rank, truncate.

use chrono::{DateTime, Utc};

use liaison_models::{RankedItem, VendorId};
use liaison_persistence::AgendaStore;

use crate::adapters::{ActionItemAdapter, BlockerAdapter, SourceAdapter, TopicAdapter};
use crate::error::Result;
use crate::score::score;

/// Default number of agenda entries when no limit is given.
pub const DEFAULT_LIMIT: usize = 20;

/// Assembles one vendor's prioritized agenda from all three sources.
///
/// A pure read: every call is a fresh projection over current store
/// state, scored at a single shared instant. Ties keep merged input
/// order (blockers, then action items, then topics; oldest first within
/// each) — that order is an implementation detail, not a contract.
pub struct RankingAssembler {
    adapters: Vec<Box<dyn SourceAdapter + Send + Sync>>,
}

impl RankingAssembler {
    /// Creates an assembler over the three stores of an [`AgendaStore`].
    pub fn new(store: &AgendaStore) -> Self {
        Self {
            adapters: vec![
                Box::new(BlockerAdapter::new(store.blockers.clone())),
                Box::new(ActionItemAdapter::new(store.actions.clone())),
                Box::new(TopicAdapter::new(store.topics.clone())),
            ],
        }
    }

    /// Returns up to `limit` open items for the vendor, strictly
    /// descending by score, with dense ranks `1..=len`.
    pub fn ranked_agenda(&self, vendor: &VendorId, limit: usize) -> Result<Vec<RankedItem>> {
        self.ranked_agenda_at(vendor, limit, Utc::now())
    }

    /// Same projection at a fixed instant.
    pub fn ranked_agenda_at(
        &self,
        vendor: &VendorId,
        limit: usize,
        now: DateTime<Utc>,
    ) -> Result<Vec<RankedItem>> {
        let mut merged = Vec::new();
        for adapter in &self.adapters {
            merged.extend(adapter.open_items(vendor, now)?);
        }

        let mut ranked: Vec<RankedItem> = merged
            .into_iter()
            .map(|item| RankedItem {
                score: score(&item),
                item,
                rank: 0,
            })
            .collect();

        // Stable sort keeps merged input order for equal scores.
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked.truncate(limit);

        for (index, entry) in ranked.iter_mut().enumerate() {
            entry.rank = index + 1;
        }

        Ok(ranked)
    }
}

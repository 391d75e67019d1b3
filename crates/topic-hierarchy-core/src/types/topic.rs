//! Per-topic record for one tier of the hierarchy.

use std::collections::BTreeSet;

/// A learned topic: a distribution over vocabulary words plus the links
/// written by the hierarchy assigner.
///
/// `linked_topic_ids` holds ids of topics in the *other* tier: for a main
/// topic, the sub-topics that chose it; for a sub-topic, the main topics it
/// was assigned to. An ordered set keeps exports deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct Topic {
    /// 0-based index within its tier, stable for the tier's lifetime.
    pub id: usize,
    /// Human-readable summary, e.g. top words.
    pub label: String,
    /// Topic-by-word distribution row.
    pub word_weights: Vec<f64>,
    /// Cross-tier links, populated only by the assigner.
    pub linked_topic_ids: BTreeSet<usize>,
}

impl Topic {
    /// Create a topic as the training stage would: id, label and weights,
    /// no links yet.
    pub fn new(id: usize, label: impl Into<String>, word_weights: Vec<f64>) -> Self {
        Self {
            id,
            label: label.into(),
            word_weights,
            linked_topic_ids: BTreeSet::new(),
        }
    }

    /// Record a link to a topic in the other tier.
    pub fn add_linked_id(&mut self, other_tier_id: usize) {
        self.linked_topic_ids.insert(other_tier_id);
    }

    /// Linked ids in ascending order, for export.
    pub fn linked_ids_sorted(&self) -> Vec<usize> {
        self.linked_topic_ids.iter().copied().collect()
    }
}

//! Greedy sub-topic to main-topic assignment.
//!
//! For each sub-topic row of the similarity matrix, independently, the
//! assigner picks the `max_assign` best main topics one at a time. The scan
//! only replaces the current best on a *strictly* greater value, so ties
//! resolve to the first (lowest) column index. Deterministic: the same
//! matrix and `max_assign` always produce the identical table.
//!
//! # Degenerate rows
//!
//! The per-pick scan seeds its running maximum at value 0.0 and column 0.
//! When every unchosen value in a row is non-positive, the seed survives
//! and column 0 is selected with score 0.0. This is a known, deliberately
//! preserved behavior: the row is flagged `degenerate` on the output and
//! logged as a warning, never silently dropped or "fixed", because changing
//! the seed would change output for any corpus with a zero-similarity row.

use tracing::{debug, warn};

use crate::error::ConfigError;
use crate::similarity::SimilarityMatrix;
use crate::store::TopicStore;

/// One greedily chosen `(main topic, score)` pair.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentChoice {
    /// Chosen main topic id (matrix column).
    pub main_topic: usize,
    /// Similarity score at the moment of the pick.
    pub score: f64,
}

/// All picks for one sub-topic, in the order they were chosen
/// (descending score).
#[derive(Debug, Clone, PartialEq)]
pub struct SubTopicAssignment {
    /// Sub-topic id (matrix row).
    pub sub_topic: usize,
    /// Chosen pairs, `min(max_assign, main_topic_count)` of them.
    pub choices: Vec<AssignmentChoice>,
    /// True when at least one pick fell back to column 0 because no
    /// positive similarity remained. A data-quality caveat, not an error.
    pub degenerate: bool,
}

/// The canonical hierarchy output: one entry per sub-topic, in sub-topic
/// id order. Topic-store links are a denormalized view of the same fact.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AssignmentTable {
    entries: Vec<SubTopicAssignment>,
}

impl AssignmentTable {
    /// Entries in sub-topic id order.
    pub fn entries(&self) -> &[SubTopicAssignment] {
        &self.entries
    }

    /// Entry for one sub-topic.
    pub fn get(&self, sub_topic: usize) -> Option<&SubTopicAssignment> {
        self.entries.get(sub_topic)
    }

    /// Number of sub-topics covered.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sub-topic ids whose rows were degenerate.
    pub fn degenerate_rows(&self) -> Vec<usize> {
        self.entries
            .iter()
            .filter(|e| e.degenerate)
            .map(|e| e.sub_topic)
            .collect()
    }
}

/// Run the assignment and write back-references into both topic stores.
///
/// Validates up front (fatal, before any work): `max_assign >= 1` and the
/// matrix shape must agree with both stores' topic counts. A `max_assign`
/// larger than the main topic count truncates silently to the main topic
/// count.
pub fn assign_hierarchy(
    matrix: &SimilarityMatrix,
    max_assign: usize,
    main_topics: &mut TopicStore,
    sub_topics: &mut TopicStore,
) -> Result<AssignmentTable, ConfigError> {
    if max_assign == 0 {
        return Err(ConfigError::InvalidMaxAssign { got: max_assign });
    }
    if matrix.sub_count() != sub_topics.len() {
        return Err(ConfigError::TopicCountMismatch {
            what: "similarity matrix rows vs sub tier store",
            declared: sub_topics.len(),
            found: matrix.sub_count(),
        });
    }
    if matrix.main_count() != main_topics.len() {
        return Err(ConfigError::TopicCountMismatch {
            what: "similarity matrix columns vs main tier store",
            declared: main_topics.len(),
            found: matrix.main_count(),
        });
    }

    let picks_per_row = max_assign.min(main_topics.len());
    if picks_per_row < max_assign {
        debug!(
            max_assign,
            main_topics = main_topics.len(),
            "maxAssign exceeds main topic count, truncating"
        );
    }

    let mut entries = Vec::with_capacity(matrix.sub_count());
    for sub_topic in 0..matrix.sub_count() {
        let row = matrix.row(sub_topic);
        let mut used: Vec<usize> = Vec::with_capacity(picks_per_row);
        let mut choices = Vec::with_capacity(picks_per_row);
        let mut degenerate = false;

        for _ in 0..picks_per_row {
            // Seeding at (0.0, column 0) reproduces first-index-wins ties
            // and the documented column-0 fallback for all-non-positive
            // remainders.
            let mut current_max = 0.0;
            let mut current_max_idx = 0;
            for (main_topic, &score) in row.iter().enumerate() {
                if score > current_max && !used.contains(&main_topic) {
                    current_max = score;
                    current_max_idx = main_topic;
                }
            }
            if current_max <= 0.0 {
                degenerate = true;
            }
            used.push(current_max_idx);
            choices.push(AssignmentChoice {
                main_topic: current_max_idx,
                score: current_max,
            });
        }

        if degenerate {
            warn!(
                sub_topic,
                "no positive similarity remained; fell back to main topic 0"
            );
        }
        entries.push(SubTopicAssignment {
            sub_topic,
            choices,
            degenerate,
        });
    }

    // Denormalize the table into both stores' link sets.
    for entry in &entries {
        for choice in &entry.choices {
            if let Some(main) = main_topics.get_mut(choice.main_topic) {
                main.add_linked_id(entry.sub_topic);
            }
            if let Some(sub) = sub_topics.get_mut(entry.sub_topic) {
                sub.add_linked_id(choice.main_topic);
            }
        }
    }

    Ok(AssignmentTable { entries })
}

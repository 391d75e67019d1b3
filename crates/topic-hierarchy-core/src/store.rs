//! Keyed collections for documents and topics.
//!
//! Ingestion may populate a [`DocumentStore`] from several worker threads
//! with no arrival-order guarantee, so it is backed by a [`DashMap`]. The
//! assigner and merger stages are strictly single-threaded and must not
//! start before ingestion is drained: [`DocumentStore::into_snapshot`] is
//! that barrier, handing over a single-owner, index-ordered
//! [`DocumentSet`].

use std::collections::HashMap;

use dashmap::DashMap;

use crate::error::{ConfigError, InputError};
use crate::types::{Document, Topic};

/// Thread-safe keyed document table used during ingestion only.
#[derive(Debug, Default)]
pub struct DocumentStore {
    docs: DashMap<String, Document>,
}

impl DocumentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a document keyed by its id. Returns the previous document if
    /// the id was already present.
    pub fn insert(&self, doc: Document) -> Option<Document> {
        self.docs.insert(doc.id.clone(), doc)
    }

    /// Number of documents ingested so far.
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Drain the store into an immutable, index-ordered snapshot.
    ///
    /// This is the hard barrier between concurrent ingestion and the
    /// single-threaded assignment/merge stages.
    pub fn into_snapshot(self) -> DocumentSet {
        let mut docs: Vec<Document> = self.docs.into_iter().map(|(_, d)| d).collect();
        docs.sort_by_key(|d| d.index);
        DocumentSet::from_sorted(docs)
    }
}

/// Immutable-ordered document collection owned by one pipeline stage at a
/// time. Iteration order is ingestion index order.
#[derive(Debug, Clone, Default)]
pub struct DocumentSet {
    docs: Vec<Document>,
    by_id: HashMap<String, usize>,
}

impl DocumentSet {
    fn from_sorted(docs: Vec<Document>) -> Self {
        let by_id = docs
            .iter()
            .enumerate()
            .map(|(pos, d)| (d.id.clone(), pos))
            .collect();
        Self { docs, by_id }
    }

    /// Build a set from documents in arbitrary order, rejecting duplicate
    /// ids. Used when loading a tier from file.
    pub fn from_documents(docs: Vec<Document>) -> Result<Self, InputError> {
        let mut sorted = docs;
        sorted.sort_by_key(|d| d.index);
        let mut by_id = HashMap::with_capacity(sorted.len());
        for (pos, doc) in sorted.iter().enumerate() {
            if by_id.insert(doc.id.clone(), pos).is_some() {
                return Err(InputError::DuplicateDocument {
                    doc_id: doc.id.clone(),
                });
            }
        }
        Ok(Self { docs: sorted, by_id })
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Look up a document by id.
    pub fn get(&self, id: &str) -> Option<&Document> {
        self.by_id.get(id).map(|&pos| &self.docs[pos])
    }

    /// Whether a document id is present.
    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Iterate documents in index order.
    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.docs.iter()
    }

    /// Iterate documents mutably, in index order. Used by the merger.
    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Document> {
        self.docs.iter_mut()
    }
}

/// One tier's topics, indexed by topic id.
///
/// Construction validates that topic ids form the dense 0-based sequence
/// the similarity matrix and distribution vectors are aligned to.
#[derive(Debug, Clone)]
pub struct TopicStore {
    topics: Vec<Topic>,
}

impl TopicStore {
    /// Build a store, rejecting non-contiguous topic ids.
    pub fn new(topics: Vec<Topic>) -> Result<Self, InputError> {
        for (position, topic) in topics.iter().enumerate() {
            if topic.id != position {
                return Err(InputError::NonContiguousTopics {
                    found: topic.id,
                    position,
                });
            }
        }
        Ok(Self { topics })
    }

    /// Topic count for the tier.
    pub fn len(&self) -> usize {
        self.topics.len()
    }

    /// Whether the tier has no topics.
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// Topic by id.
    pub fn get(&self, id: usize) -> Option<&Topic> {
        self.topics.get(id)
    }

    /// Mutable topic by id. Used by the assigner to write links.
    pub(crate) fn get_mut(&mut self, id: usize) -> Option<&mut Topic> {
        self.topics.get_mut(id)
    }

    /// Iterate topics in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Topic> {
        self.topics.iter()
    }

    /// Labels in id order, for the tabular exports.
    pub fn labels(&self) -> Vec<&str> {
        self.topics.iter().map(|t| t.label.as_str()).collect()
    }

    /// Check the store against a declared topic count.
    pub fn check_declared_count(
        &self,
        what: &'static str,
        declared: usize,
    ) -> Result<(), ConfigError> {
        if declared == 0 {
            return Err(ConfigError::InvalidTopicCount { what });
        }
        if self.len() != declared {
            return Err(ConfigError::TopicCountMismatch {
                what,
                declared,
                found: self.len(),
            });
        }
        Ok(())
    }
}

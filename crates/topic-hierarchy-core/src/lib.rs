//! Topic Hierarchy Core Library
//!
//! Reconciliation engine for two-tier topic models: given a coarse "main"
//! model and a fine "sub" model trained independently on the same corpus,
//! it links every fine topic to one or more coarse topics by similarity,
//! merges each document's two topic distributions into one record, and
//! exports the hierarchy in deterministic formats.
//!
//! # Architecture
//!
//! - Data model: [`types::Document`], [`types::Topic`], the 4-decimal
//!   away-from-zero rounding rule for stored distributions
//! - Stores: concurrent-ingestion [`store::DocumentStore`] with a snapshot
//!   barrier, index-validated [`store::TopicStore`]
//! - [`similarity::SimilarityMatrix`]: shape-validated, cosine default
//! - [`hierarchy`]: greedy assignment (first-index tie-break, documented
//!   column-0 degenerate fallback) and cross-tier document merge
//! - [`export`]: topics / merged corpus JSON, always-quoted similarity and
//!   assignment tables, detail level as an explicit parameter
//! - [`pipeline`]: the strictly sequential driver
//!
//! # Example
//!
//! ```
//! use topic_hierarchy_core::hierarchy::assign_hierarchy;
//! use topic_hierarchy_core::similarity::SimilarityMatrix;
//! use topic_hierarchy_core::store::TopicStore;
//! use topic_hierarchy_core::types::Topic;
//!
//! let mut main = TopicStore::new(vec![
//!     Topic::new(0, "economy", vec![]),
//!     Topic::new(1, "health", vec![]),
//! ]).unwrap();
//! let mut sub = TopicStore::new(vec![
//!     Topic::new(0, "trade", vec![]),
//! ]).unwrap();
//!
//! let matrix = SimilarityMatrix::from_rows(vec![vec![0.9, 0.1]]).unwrap();
//! let table = assign_hierarchy(&matrix, 1, &mut main, &mut sub).unwrap();
//! assert_eq!(table.get(0).unwrap().choices[0].main_topic, 0);
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod hierarchy;
pub mod input;
pub mod pipeline;
pub mod similarity;
pub mod store;
pub mod types;

// Re-exports for convenience
pub use config::HierarchySpec;
pub use error::{HierarchyError, Result};
pub use export::OutputDetail;
pub use hierarchy::AssignmentTable;
pub use input::TrainedTier;
pub use pipeline::{run_hierarchy, run_hierarchy_with_matrix, PipelineReport};
pub use similarity::SimilarityMatrix;
pub use store::{DocumentSet, DocumentStore, TopicStore};
pub use types::{Document, Topic};

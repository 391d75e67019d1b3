//! Hierarchy reconciliation: greedy topic assignment and cross-tier
//! document merge.

mod assigner;
mod merger;

pub use assigner::{assign_hierarchy, AssignmentChoice, AssignmentTable, SubTopicAssignment};
pub use merger::merge_documents;

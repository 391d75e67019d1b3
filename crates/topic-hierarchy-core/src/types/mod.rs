//! Core data model: documents, topics and the stored-value rounding rule.

mod document;
mod rounding;
mod topic;

pub use document::Document;
pub use rounding::{round_distribution, round_up4};
pub use topic::Topic;

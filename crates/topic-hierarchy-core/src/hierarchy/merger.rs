//! Cross-tier document merge.
//!
//! After both tiers are trained, every main-tier document picks up the
//! matching sub-tier document's topic distribution, keyed by the shared
//! document id. The sub tier is conceptually a refinement of the main
//! tier's corpus, so a missing id is a hard congruence error — silently
//! dropping a document would corrupt downstream counts.

use tracing::info;

use crate::error::MergeError;
use crate::store::DocumentSet;

/// Attach each sub-tier document's main-tier distribution onto the
/// corresponding main-tier record, as its sub-tier distribution.
///
/// Every id in the main set must exist in the sub set; all missing ids are
/// collected and reported together. Documents flagged `too_short` in the
/// sub tier simply carry no distribution and pass through; the merge does
/// not fail for them.
///
/// On success the main set becomes the export-authoritative corpus.
pub fn merge_documents(
    main_docs: &mut DocumentSet,
    sub_docs: &DocumentSet,
) -> Result<(), MergeError> {
    let mut missing: Vec<String> = main_docs
        .iter()
        .filter(|doc| !sub_docs.contains(&doc.id))
        .map(|doc| doc.id.clone())
        .collect();
    if !missing.is_empty() {
        missing.sort();
        return Err(MergeError::MissingDocuments { ids: missing });
    }

    let mut merged = 0usize;
    for doc in main_docs.iter_mut() {
        // Presence was checked above; too_short sub documents yield None,
        // which the setter passes through untouched.
        if let Some(sub_doc) = sub_docs.get(&doc.id) {
            doc.set_sub_topic_distribution(sub_doc.main_topic_distribution());
            if doc.sub_topic_distribution().is_some() {
                merged += 1;
            }
        }
    }
    info!(
        documents = main_docs.len(),
        with_sub_distribution = merged,
        "merged sub tier distributions into main corpus"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Document;

    fn set(docs: Vec<Document>) -> DocumentSet {
        DocumentSet::from_documents(docs).unwrap()
    }

    fn doc_with_dist(id: &str, index: usize, dist: &[f64]) -> Document {
        let mut d = Document::new(id, index);
        d.set_main_topic_distribution(dist);
        d
    }

    #[test]
    fn merge_attaches_sub_distribution_rounded() {
        let mut main = set(vec![doc_with_dist("0", 0, &[0.6, 0.4])]);
        let sub = set(vec![doc_with_dist("0", 0, &[0.123456, 0.5, 0.376544])]);
        merge_documents(&mut main, &sub).unwrap();
        let merged = main.get("0").unwrap();
        assert_eq!(merged.main_topic_distribution(), Some(&[0.6, 0.4][..]));
        assert_eq!(
            merged.sub_topic_distribution(),
            Some(&[0.1235, 0.5, 0.3766][..])
        );
    }

    #[test]
    fn missing_sub_document_fails_and_names_the_id() {
        let mut main = set(vec![
            doc_with_dist("0", 0, &[1.0]),
            doc_with_dist("1", 1, &[1.0]),
            doc_with_dist("2", 2, &[1.0]),
        ]);
        let sub = set(vec![doc_with_dist("0", 0, &[1.0]), doc_with_dist("1", 1, &[1.0])]);
        let err = merge_documents(&mut main, &sub).unwrap_err();
        assert_eq!(
            err,
            MergeError::MissingDocuments { ids: vec!["2".to_string()] }
        );
        // nothing silently dropped: untouched main docs keep no sub dist
        assert!(main.get("2").unwrap().sub_topic_distribution().is_none());
    }

    #[test]
    fn all_missing_ids_are_reported_sorted() {
        let mut main = set(vec![
            doc_with_dist("b", 0, &[1.0]),
            doc_with_dist("a", 1, &[1.0]),
        ]);
        let sub = set(Vec::new());
        let err = merge_documents(&mut main, &sub).unwrap_err();
        assert_eq!(
            err,
            MergeError::MissingDocuments {
                ids: vec!["a".to_string(), "b".to_string()]
            }
        );
    }

    #[test]
    fn too_short_sub_document_passes_through_without_distribution() {
        let mut main = set(vec![doc_with_dist("0", 0, &[0.7, 0.3])]);
        let mut short = Document::new("0", 0);
        short.too_short = true;
        let sub = set(vec![short]);
        merge_documents(&mut main, &sub).unwrap();
        let merged = main.get("0").unwrap();
        assert!(merged.sub_topic_distribution().is_none());
        assert_eq!(merged.main_topic_distribution(), Some(&[0.7, 0.3][..]));
    }

    #[test]
    fn too_short_main_document_keeps_both_sides_absent() {
        let mut short = Document::new("s", 0);
        short.too_short = true;
        let mut main = set(vec![short]);
        let sub = set(vec![doc_with_dist("s", 0, &[0.5, 0.5])]);
        merge_documents(&mut main, &sub).unwrap();
        let merged = main.get("s").unwrap();
        assert!(merged.main_topic_distribution().is_none());
        // the sub tier did model it, so the distribution is attached
        assert_eq!(merged.sub_topic_distribution(), Some(&[0.5, 0.5][..]));
        assert!(merged.too_short);
    }
}

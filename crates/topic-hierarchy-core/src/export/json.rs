//! JSON artifact writers: per-tier topic files and the merged corpus.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use tracing::debug;

use crate::error::ExportError;
use crate::store::{DocumentSet, TopicStore};

use super::records::{CorpusFile, CorpusMetadata, DocRecord, TopicRecord};
use super::OutputDetail;

/// Write one tier's topics as a JSON array.
///
/// `artifact` names the output for error reporting ("main topics" or
/// "sub topics").
pub fn write_topics(
    path: &Path,
    topics: &TopicStore,
    detail: OutputDetail,
    artifact: &'static str,
) -> Result<(), ExportError> {
    let records: Vec<TopicRecord> = topics
        .iter()
        .map(|t| TopicRecord::from_topic(t, detail))
        .collect();
    let file = File::create(path).map_err(|source| ExportError::Io {
        artifact,
        path: path.to_path_buf(),
        source,
    })?;
    let writer = BufWriter::new(file);
    serde_json::to_writer(writer, &records)
        .map_err(|source| ExportError::Serialize { artifact, source })?;
    debug!(?path, count = records.len(), "wrote {artifact}");
    Ok(())
}

/// Write the merged corpus: `{"metadata":{"totalDocs":N},"corpus":[...]}`.
pub fn write_corpus(
    path: &Path,
    docs: &DocumentSet,
    detail: OutputDetail,
) -> Result<(), ExportError> {
    let artifact = "merged corpus";
    let corpus = CorpusFile {
        metadata: CorpusMetadata {
            total_docs: docs.len(),
        },
        corpus: docs
            .iter()
            .map(|d| DocRecord::from_document(d, detail))
            .collect(),
    };
    let file = File::create(path).map_err(|source| ExportError::Io {
        artifact,
        path: path.to_path_buf(),
        source,
    })?;
    let writer = BufWriter::new(file);
    serde_json::to_writer(writer, &corpus)
        .map_err(|source| ExportError::Serialize { artifact, source })?;
    debug!(?path, total_docs = corpus.metadata.total_docs, "wrote merged corpus");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Document, Topic};
    use serde_json::Value;

    #[test]
    fn corpus_file_has_metadata_and_ordered_docs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("documents.json");

        let mut d0 = Document::new("0", 0);
        d0.set_main_topic_distribution(&[1.0]);
        let mut d1 = Document::new("1", 1);
        d1.too_short = true;
        let docs = DocumentSet::from_documents(vec![d1, d0]).unwrap();

        write_corpus(&path, &docs, OutputDetail::Model).unwrap();

        let parsed: Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed["metadata"]["totalDocs"], 2);
        let corpus = parsed["corpus"].as_array().unwrap();
        assert_eq!(corpus[0]["docId"], "0");
        assert_eq!(corpus[1]["docId"], "1");
        assert_eq!(corpus[1]["tooShort"], true);
        assert!(corpus[1].get("mainTopicDistribution").is_none());
    }

    #[test]
    fn topics_write_to_missing_directory_reports_artifact() {
        let store = TopicStore::new(vec![Topic::new(0, "t", vec![])]).unwrap();
        let err = write_topics(
            Path::new("/nonexistent-dir/topics.json"),
            &store,
            OutputDetail::Basic,
            "main topics",
        )
        .unwrap_err();
        assert_eq!(err.artifact(), "main topics");
    }
}

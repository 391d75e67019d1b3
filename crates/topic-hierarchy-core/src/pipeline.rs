//! Sequential reconciliation pipeline.
//!
//! Stages run strictly in order, each only after its inputs are fully
//! materialized: similarity matrix → hierarchy assignment → document merge
//! → export. Nothing here is async or retried; a failed stage fails the
//! run, and export failures are collected per artifact so siblings still
//! get written.

use std::time::{Duration, Instant};

use tracing::{error, info};

use crate::config::HierarchySpec;
use crate::error::{HierarchyError, Result};
use crate::export::{
    write_assignment_table, write_corpus, write_similarity_matrix, write_topics,
};
use crate::hierarchy::{assign_hierarchy, merge_documents, AssignmentTable};
use crate::input::TrainedTier;
use crate::similarity::SimilarityMatrix;

/// Summary of one completed run.
#[derive(Debug)]
pub struct PipelineReport {
    /// The canonical hierarchy output.
    pub assignment: AssignmentTable,
    /// Sub-topic ids whose similarity rows were degenerate (data-quality
    /// caveat, not a failure).
    pub degenerate_rows: Vec<usize>,
    /// Documents in the exported corpus.
    pub total_docs: usize,
    /// Wall-clock duration of the run.
    pub elapsed: Duration,
}

/// Run the full pipeline, computing cosine similarity between the tiers'
/// topic word-weight rows.
pub fn run_hierarchy(
    spec: &HierarchySpec,
    main: TrainedTier,
    sub: TrainedTier,
) -> Result<PipelineReport> {
    let matrix = {
        info!("computing topic similarity matrix");
        SimilarityMatrix::cosine_from_topics(&sub.topics, &main.topics)?
    };
    run_hierarchy_with_matrix(spec, main, sub, matrix)
}

/// Run the full pipeline with a caller-provided similarity matrix
/// (rows = sub-topics, columns = main topics, higher means more similar).
pub fn run_hierarchy_with_matrix(
    spec: &HierarchySpec,
    mut main: TrainedTier,
    mut sub: TrainedTier,
    matrix: SimilarityMatrix,
) -> Result<PipelineReport> {
    let started = Instant::now();

    // Configuration problems abort before any assignment work.
    spec.validate()?;
    main.topics
        .check_declared_count("main tier", spec.main_model.topics)?;
    sub.topics
        .check_declared_count("sub tier", spec.sub_model.topics)?;

    info!(max_assign = spec.max_assign(), "calculating hierarchy assignments");
    let assignment = assign_hierarchy(
        &matrix,
        spec.max_assign(),
        &mut main.topics,
        &mut sub.topics,
    )?;
    let degenerate_rows = assignment.degenerate_rows();

    info!("merging documents across tiers");
    merge_documents(&mut main.documents, &sub.documents)?;

    // Exports are independent: attempt every artifact, then fail the run
    // if any of them could not be written.
    let mut failed: Vec<String> = Vec::new();
    let mut record = |result: std::result::Result<(), crate::error::ExportError>| {
        if let Err(e) = result {
            error!(artifact = e.artifact(), "export failed: {e}");
            failed.push(e.artifact().to_string());
        }
    };

    info!("saving topics");
    record(write_topics(
        &spec.main_topic_output_path(),
        &main.topics,
        spec.output_detail,
        "main topics",
    ));
    record(write_topics(
        &spec.sub_topic_output_path(),
        &sub.topics,
        spec.output_detail,
        "sub topics",
    ));

    info!("saving merged corpus");
    record(write_corpus(
        &spec.document_output_path(),
        &main.documents,
        spec.output_detail,
    ));

    if let Some(path) = spec.similarity_output_path() {
        info!("saving model similarities");
        record(write_similarity_matrix(
            &path,
            &matrix,
            &sub.topics.labels(),
            &main.topics.labels(),
        ));
    }
    if let Some(path) = spec.assignment_output_path() {
        info!("saving hierarchy assignments");
        record(write_assignment_table(
            &path,
            &assignment,
            &sub.topics.labels(),
            &main.topics.labels(),
        ));
    }

    if !failed.is_empty() {
        return Err(HierarchyError::ExportFailed { artifacts: failed });
    }

    let elapsed = started.elapsed();
    info!(
        elapsed_s = elapsed.as_secs_f64(),
        degenerate = degenerate_rows.len(),
        "hierarchical reconciliation complete"
    );
    Ok(PipelineReport {
        assignment,
        degenerate_rows,
        total_docs: main.documents.len(),
        elapsed,
    })
}

//! Delimited-text artifact writers: similarity matrix and assignment table.
//!
//! Every cell is quoted, matching the always-delimited CSV the rest of the
//! toolchain expects. Numeric cells are plain decimal text.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::error::ExportError;
use crate::hierarchy::AssignmentTable;
use crate::similarity::SimilarityMatrix;

/// Quote one cell, doubling embedded quotes.
fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn write_line(out: &mut impl Write, cells: &[String]) -> std::io::Result<()> {
    let quoted: Vec<String> = cells.iter().map(|c| quote(c)).collect();
    writeln!(out, "{}", quoted.join(","))
}

/// Write the similarity matrix.
///
/// Header row: empty cell, then every main-topic label in column order.
/// Then one row per sub-topic: its label followed by its score against
/// every main topic.
pub fn write_similarity_matrix(
    path: &Path,
    matrix: &SimilarityMatrix,
    sub_labels: &[&str],
    main_labels: &[&str],
) -> Result<(), ExportError> {
    let artifact = "similarity matrix";
    let io_err = |source| ExportError::Io {
        artifact,
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_err)?;
    let mut out = BufWriter::new(file);

    let mut header = vec![String::new()];
    header.extend(main_labels.iter().map(|l| l.to_string()));
    write_line(&mut out, &header).map_err(io_err)?;

    for (sub_topic, label) in sub_labels.iter().enumerate() {
        let mut cells = vec![label.to_string()];
        cells.extend(matrix.row(sub_topic).iter().map(|v| v.to_string()));
        write_line(&mut out, &cells).map_err(io_err)?;
    }
    out.flush().map_err(io_err)?;
    debug!(?path, rows = sub_labels.len(), "wrote similarity matrix");
    Ok(())
}

/// Write the assignment table.
///
/// One row per chosen `(subTopic, mainTopic)` pair, in assignment order,
/// grouped by sub-topic: the sub-topic label appears only on the first row
/// of its group, continuation rows leave that cell blank.
pub fn write_assignment_table(
    path: &Path,
    table: &AssignmentTable,
    sub_labels: &[&str],
    main_labels: &[&str],
) -> Result<(), ExportError> {
    let artifact = "assignment table";
    let io_err = |source| ExportError::Io {
        artifact,
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_err)?;
    let mut out = BufWriter::new(file);

    for entry in table.entries() {
        for (rank, choice) in entry.choices.iter().enumerate() {
            let sub_cell = if rank == 0 {
                sub_labels[entry.sub_topic].to_string()
            } else {
                String::new()
            };
            let cells = vec![
                sub_cell,
                main_labels[choice.main_topic].to_string(),
                choice.score.to_string(),
            ];
            write_line(&mut out, &cells).map_err(io_err)?;
        }
    }
    out.flush().map_err(io_err)?;
    debug!(?path, groups = table.len(), "wrote assignment table");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::assign_hierarchy;
    use crate::store::TopicStore;
    use crate::types::Topic;

    fn topics(labels: &[&str]) -> TopicStore {
        TopicStore::new(
            labels
                .iter()
                .enumerate()
                .map(|(id, l)| Topic::new(id, *l, vec![]))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn quoting_doubles_embedded_quotes() {
        assert_eq!(quote("plain"), "\"plain\"");
        assert_eq!(quote("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn similarity_layout_matches_expectation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("similarity.csv");
        let matrix =
            SimilarityMatrix::from_rows(vec![vec![0.9, 0.1], vec![0.25, 0.75]]).unwrap();
        write_similarity_matrix(&path, &matrix, &["s0", "s1"], &["m0", "m1"]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "\"\",\"m0\",\"m1\"");
        assert_eq!(lines[1], "\"s0\",\"0.9\",\"0.1\"");
        assert_eq!(lines[2], "\"s1\",\"0.25\",\"0.75\"");
    }

    #[test]
    fn assignment_groups_blank_continuation_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("assignment.csv");

        let matrix =
            SimilarityMatrix::from_rows(vec![vec![0.9, 0.6, 0.1], vec![0.2, 0.3, 0.8]]).unwrap();
        let mut main = topics(&["m0", "m1", "m2"]);
        let mut sub = topics(&["s0", "s1"]);
        let table = assign_hierarchy(&matrix, 2, &mut main, &mut sub).unwrap();

        write_assignment_table(&path, &table, &sub.labels(), &main.labels()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "\"s0\",\"m0\",\"0.9\"");
        assert_eq!(lines[1], "\"\",\"m1\",\"0.6\"");
        assert_eq!(lines[2], "\"s1\",\"m2\",\"0.8\"");
        assert_eq!(lines[3], "\"\",\"m1\",\"0.3\"");
    }
}

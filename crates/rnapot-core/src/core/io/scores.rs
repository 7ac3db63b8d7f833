use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// One row of a score table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureScore {
    pub structure: String,
    pub score: f64,
}

impl StructureScore {
    pub fn new(structure: impl Into<String>, score: f64) -> Self {
        Self {
            structure: structure.into(),
            score,
        }
    }
}

#[derive(Debug, Error)]
pub enum ScoreSinkError {
    #[error("CSV writing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("I/O error while flushing '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

const HEADER: [&str; 2] = ["structure", "score"];

fn writer_builder() -> csv::WriterBuilder {
    let mut builder = csv::WriterBuilder::new();
    // The header is written explicitly so that an empty table still carries it.
    builder.has_headers(false);
    builder
}

fn write_rows<W: Write>(
    csv_writer: &mut csv::Writer<W>,
    scores: &[StructureScore],
) -> Result<(), csv::Error> {
    csv_writer.write_record(HEADER)?;
    for record in scores {
        csv_writer.serialize(record)?;
    }
    Ok(())
}

/// Writes scores as CSV with a `structure,score` header, in the order given.
pub fn write_scores<W: Write>(writer: W, scores: &[StructureScore]) -> Result<(), csv::Error> {
    let mut csv_writer = writer_builder().from_writer(writer);
    write_rows(&mut csv_writer, scores)?;
    csv_writer.flush()?;
    Ok(())
}

pub fn write_scores_to_path(path: &Path, scores: &[StructureScore]) -> Result<(), ScoreSinkError> {
    let path_str = path.to_string_lossy().to_string();
    let mut csv_writer = writer_builder()
        .from_path(path)
        .map_err(|source| ScoreSinkError::Csv {
            path: path_str.clone(),
            source,
        })?;
    write_rows(&mut csv_writer, scores).map_err(|source| ScoreSinkError::Csv {
        path: path_str.clone(),
        source,
    })?;
    csv_writer.flush().map_err(|source| ScoreSinkError::Io {
        path: path_str,
        source,
    })
}

/// Reads a score table back, e.g. to compare runs.
pub fn read_scores_from_path(path: &Path) -> Result<Vec<StructureScore>, ScoreSinkError> {
    let path_str = path.to_string_lossy().to_string();
    let mut reader = csv::Reader::from_path(path).map_err(|source| ScoreSinkError::Csv {
        path: path_str.clone(),
        source,
    })?;
    reader
        .deserialize::<StructureScore>()
        .map(|result| {
            result.map_err(|source| ScoreSinkError::Csv {
                path: path_str.clone(),
                source,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn writes_header_and_rows_in_given_order() {
        let mut buffer = Vec::new();
        let scores = vec![
            StructureScore::new("model_b.pdb", -3.25),
            StructureScore::new("model_a.pdb", 12.0),
        ];
        write_scores(&mut buffer, &scores).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(
            text,
            "structure,score\nmodel_b.pdb,-3.25\nmodel_a.pdb,12.0\n"
        );
    }

    #[test]
    fn empty_table_still_has_header() {
        let mut buffer = Vec::new();
        write_scores(&mut buffer, &[]).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "structure,score\n");
    }

    #[test]
    fn empty_table_written_to_path_reads_back_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scores.csv");
        write_scores_to_path(&path, &[]).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "structure,score\n");
        assert!(read_scores_from_path(&path).unwrap().is_empty());
    }

    #[test]
    fn file_written_to_path_can_be_read_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scores.csv");
        let scores = vec![
            StructureScore::new("decoy_1.pdb", 1.5),
            StructureScore::new("decoy_2.cif", 0.0),
        ];
        write_scores_to_path(&path, &scores).unwrap();

        assert_eq!(read_scores_from_path(&path).unwrap(), scores);
    }

    #[test]
    fn writing_into_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent").join("scores.csv");
        let result = write_scores_to_path(&path, &[]);
        assert!(matches!(result, Err(ScoreSinkError::Csv { .. })));
    }
}

use rnapot::core::io::scores::StructureScore;
use std::fmt::Write;

const MODEL_HEADER: &str = "MODEL";
const SCORE_HEADER: &str = "SCORE";

/// Formats scores as a two-column console table, one structure per line.
pub fn format_score_table(scores: &[StructureScore]) -> String {
    let name_width = scores
        .iter()
        .map(|s| s.structure.chars().count())
        .chain(std::iter::once(MODEL_HEADER.len()))
        .max()
        .unwrap_or(MODEL_HEADER.len());

    let mut out = String::new();
    let _ = writeln!(out, "{:<name_width$}  {:>12}", MODEL_HEADER, SCORE_HEADER);
    for score in scores {
        let _ = writeln!(out, "{:<name_width$}  {:>12.4}", score.structure, score.score);
    }
    out
}

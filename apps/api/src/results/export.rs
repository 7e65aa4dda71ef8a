//! CSV export of the currently filtered and sorted recommendations.
//!
//! Every data cell is wrapped in double quotes. Embedded quotes are not
//! escaped: a value containing `"` yields a malformed row.

use crate::errors::AppError;
use crate::models::record::RecommendationRecord;

pub const CSV_FILENAME: &str = "college_recommendations.csv";

const HEADERS: [&str; 7] = [
    "Name",
    "Location",
    "Programs",
    "Min GPA",
    "Budget",
    "Similarity Score",
    "Confidence Score",
];

/// Serializes `records` in the order given. Scores are written raw, not ×100.
pub fn to_csv(records: &[RecommendationRecord]) -> Result<String, AppError> {
    if records.is_empty() {
        return Err(AppError::Validation("No recommendations to export".to_string()));
    }

    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(HEADERS.join(","));

    for record in records {
        let cells = [
            record.name.clone(),
            record.location.clone(),
            record.programs.join("; "),
            record.min_gpa.to_string(),
            record.budget_range.to_string(),
            record.similarity_score.to_string(),
            record.confidence_score.to_string(),
        ];
        let row: Vec<String> = cells.iter().map(|cell| format!("\"{cell}\"")).collect();
        lines.push(row.join(","));
    }

    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BudgetRange;

    fn record() -> RecommendationRecord {
        RecommendationRecord {
            name: "Nepal College of Information Technology (NCIT)".to_string(),
            location: "Lalitpur".to_string(),
            programs: vec!["Software Engineering".to_string(), "BCA".to_string()],
            min_gpa: 2.5,
            budget_range: BudgetRange::High,
            similarity_score: 0.812,
            confidence_score: 0.9,
            ..RecommendationRecord::default()
        }
    }

    #[test]
    fn test_header_row_is_fixed_and_unquoted() {
        let csv = to_csv(&[record()]).unwrap();
        assert_eq!(
            csv.lines().next().unwrap(),
            "Name,Location,Programs,Min GPA,Budget,Similarity Score,Confidence Score"
        );
    }

    #[test]
    fn test_row_cells_are_quoted_and_programs_semicolon_joined() {
        let csv = to_csv(&[record()]).unwrap();
        assert_eq!(
            csv.lines().nth(1).unwrap(),
            "\"Nepal College of Information Technology (NCIT)\",\"Lalitpur\",\"Software Engineering; BCA\",\"2.5\",\"high\",\"0.812\",\"0.9\""
        );
    }

    #[test]
    fn test_embedded_quotes_are_not_escaped() {
        let mut quoted = record();
        quoted.name = "The \"Best\" College".to_string();
        let csv = to_csv(&[quoted]).unwrap();
        assert!(csv.contains("\"The \"Best\" College\""));
    }

    #[test]
    fn test_whole_numbers_have_no_trailing_fraction() {
        let mut whole = record();
        whole.min_gpa = 3.0;
        whole.similarity_score = 1.0;
        let csv = to_csv(&[whole]).unwrap();
        assert!(csv.contains(",\"3\","));
        assert!(csv.contains(",\"1\","));
    }

    #[test]
    fn test_empty_export_is_rejected() {
        assert!(matches!(to_csv(&[]), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_one_line_per_record_plus_header() {
        let csv = to_csv(&[record(), record(), record()]).unwrap();
        assert_eq!(csv.lines().count(), 4);
        assert!(!csv.ends_with('\n'));
    }
}

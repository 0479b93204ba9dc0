//! Ordered clause report and CSV export
//!
//! Records accumulate in traversal order and are never mutated after
//! creation; the report is append-only.

use serde::Serialize;

use crate::error::AnalyzeError;

/// Names the location column of the report: page numbers for PDF,
/// paragraph numbers for DOCX.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LocationKind {
    Page,
    Paragraph,
}

impl LocationKind {
    pub fn column_name(&self) -> &'static str {
        match self {
            LocationKind::Page => "Page",
            LocationKind::Paragraph => "Paragraph",
        }
    }
}

/// One classified clause. `label` is upper-cased and `confidence` is
/// pre-formatted to two decimals at construction time.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClauseRecord {
    pub location: u32,
    pub clause: String,
    pub label: String,
    pub confidence: String,
}

impl ClauseRecord {
    pub fn new(location: u32, clause: &str, label: &str, confidence: f64) -> Self {
        Self {
            location,
            clause: clause.to_string(),
            label: label.to_uppercase(),
            confidence: format!("{:.2}", confidence),
        }
    }
}

/// Append-only collection of clause records in traversal order.
#[derive(Clone, Debug)]
pub struct ClauseReport {
    location_kind: LocationKind,
    records: Vec<ClauseRecord>,
}

impl ClauseReport {
    pub fn new(location_kind: LocationKind) -> Self {
        Self {
            location_kind,
            records: Vec::new(),
        }
    }

    pub fn push(&mut self, record: ClauseRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[ClauseRecord] {
        &self.records
    }

    pub fn location_kind(&self) -> LocationKind {
        self.location_kind
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Serialize the report as CSV with a header row.
    pub fn to_csv(&self) -> Result<String, AnalyzeError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record([
                self.location_kind.column_name(),
                "Clause",
                "Label",
                "Confidence",
            ])
            .map_err(|e| AnalyzeError::Io(std::io::Error::other(e)))?;
        for record in &self.records {
            writer
                .write_record([
                    record.location.to_string().as_str(),
                    record.clause.as_str(),
                    record.label.as_str(),
                    record.confidence.as_str(),
                ])
                .map_err(|e| AnalyzeError::Io(std::io::Error::other(e)))?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| AnalyzeError::Io(std::io::Error::other(e)))?;
        String::from_utf8(bytes).map_err(|e| AnalyzeError::Io(std::io::Error::other(e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_record_uppercases_label() {
        let record = ClauseRecord::new(1, "some clause text", "termination", 0.92);
        assert_eq!(record.label, "TERMINATION");
    }

    #[test]
    fn test_confidence_always_two_decimals() {
        assert_eq!(ClauseRecord::new(1, "x", "a", 0.0).confidence, "0.00");
        assert_eq!(ClauseRecord::new(1, "x", "a", 0.5).confidence, "0.50");
        assert_eq!(ClauseRecord::new(1, "x", "a", 0.999).confidence, "1.00");
        assert_eq!(ClauseRecord::new(1, "x", "a", 1.0).confidence, "1.00");
    }

    #[test]
    fn test_csv_header_for_pdf_reports() {
        let mut report = ClauseReport::new(LocationKind::Page);
        report.push(ClauseRecord::new(1, "clause", "termination", 0.92));
        let csv = report.to_csv().unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("Page,Clause,Label,Confidence"));
        assert_eq!(lines.next(), Some("1,clause,TERMINATION,0.92"));
    }

    #[test]
    fn test_csv_header_for_docx_reports() {
        let report = ClauseReport::new(LocationKind::Paragraph);
        let csv = report.to_csv().unwrap();
        assert_eq!(csv.lines().next(), Some("Paragraph,Clause,Label,Confidence"));
    }

    #[test]
    fn test_csv_quotes_embedded_delimiters() {
        let mut report = ClauseReport::new(LocationKind::Page);
        report.push(ClauseRecord::new(2, "first, second", "other", 0.4));
        let csv = report.to_csv().unwrap();
        assert!(csv.contains("\"first, second\""));
    }

    #[test]
    fn test_report_preserves_push_order() {
        let mut report = ClauseReport::new(LocationKind::Paragraph);
        for i in 1..=5 {
            report.push(ClauseRecord::new(i, "clause", "other", 0.5));
        }
        let locations: Vec<u32> = report.records().iter().map(|r| r.location).collect();
        assert_eq!(locations, vec![1, 2, 3, 4, 5]);
    }
}

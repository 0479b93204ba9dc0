//! End-to-end pipeline tests
//!
//! Drive the public API the way the server does: raw document bytes in,
//! annotated bytes and reports out.

use std::io::{Cursor, Write};

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream};
use proptest::prelude::*;
use zip::write::SimpleFileOptions;

use clauselens_core::{
    analyze_docx, annotate_pdf, extract::extract_blocks, AnalyzeError, ClauseClassifier,
    DocumentFormat, LocationKind, Prediction, MIN_CLAUSE_LEN,
};

/// Deterministic single-label classifier for pipeline tests.
struct StubClassifier;

impl ClauseClassifier for StubClassifier {
    fn classify(&self, _text: &str) -> Result<Vec<Prediction>, AnalyzeError> {
        Ok(vec![Prediction {
            label: "other".to_string(),
            confidence: 0.5,
        }])
    }
}

fn build_pdf(lines: &[(i64, i64, &str)]) -> Vec<u8> {
    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new(
            "Tf",
            vec![Object::Name(b"F1".to_vec()), Object::Integer(12)],
        ),
    ];
    let mut last = (0i64, 0i64);
    for &(x, y, text) in lines {
        operations.push(Operation::new(
            "Td",
            vec![Object::Integer(x - last.0), Object::Integer(y - last.1)],
        ));
        operations.push(Operation::new(
            "Tj",
            vec![Object::String(
                text.as_bytes().to_vec(),
                lopdf::StringFormat::Literal,
            )],
        ));
        last = (x, y);
    }
    operations.push(Operation::new("ET", vec![]));

    let mut doc = Document::with_version("1.7");
    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(Dictionary::new(), content.encode().unwrap()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        "Contents" => Object::Reference(content_id),
    });
    let pages_id = doc.add_object(dictionary! {
        "Type" => "Pages",
        "Kids" => vec![Object::Reference(page_id)],
        "Count" => 1,
    });
    if let Ok(page) = doc.get_object_mut(page_id) {
        if let Ok(dict) = page.as_dict_mut() {
            dict.set("Parent", Object::Reference(pages_id));
        }
    }
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

fn build_docx(paragraphs: &[String]) -> Vec<u8> {
    let body: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t>{p}</w:t></w:r></w:p>"))
        .collect();
    let xml = format!(
        "<w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
         <w:body>{body}</w:body></w:document>"
    );
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file("word/document.xml", SimpleFileOptions::default())
        .unwrap();
    writer.write_all(xml.as_bytes()).unwrap();
    writer.finish().unwrap().into_inner()
}

#[test]
fn test_annotation_preserves_extractable_text() {
    let pdf = build_pdf(&[
        (72, 700, "Either party may terminate this agreement at any time."),
        (72, 500, "All proprietary information shall remain strictly confidential."),
    ]);
    let before: Vec<String> = extract_blocks(&pdf, DocumentFormat::Pdf)
        .unwrap()
        .into_iter()
        .map(|b| b.text)
        .collect();

    let annotated = annotate_pdf(&pdf, &StubClassifier).unwrap();

    let after: Vec<String> = extract_blocks(&annotated.pdf_bytes, DocumentFormat::Pdf)
        .unwrap()
        .into_iter()
        .map(|b| b.text)
        .collect();
    assert_eq!(before, after);
}

#[test]
fn test_pdf_report_matches_block_order() {
    let pdf = build_pdf(&[
        (72, 700, &"A".repeat(40)),
        (72, 500, &"B".repeat(40)),
        (72, 300, &"C".repeat(40)),
    ]);
    let annotated = annotate_pdf(&pdf, &StubClassifier).unwrap();

    assert_eq!(annotated.report.location_kind(), LocationKind::Page);
    let clauses: Vec<&str> = annotated
        .report
        .records()
        .iter()
        .map(|r| r.clause.as_str())
        .collect();
    assert_eq!(clauses, vec!["A".repeat(40), "B".repeat(40), "C".repeat(40)]);
}

#[test]
fn test_docx_report_as_csv() {
    let docx = build_docx(&[
        "intro".to_string(),
        "The receiving party shall keep all disclosed information confidential.".to_string(),
    ]);
    let report = analyze_docx(&docx, &StubClassifier).unwrap();
    let csv = report.to_csv().unwrap();

    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("Paragraph,Clause,Label,Confidence"));
    let row = lines.next().unwrap();
    assert!(row.starts_with("2,"));
    assert!(row.ends_with("OTHER,0.50"));
}

proptest! {
    /// Records come back in paragraph order with 1-based numbering that
    /// counts every non-empty paragraph, qualifying or not.
    #[test]
    fn prop_docx_records_follow_paragraph_order(
        paragraphs in proptest::collection::vec("[a-z][a-z ]{0,70}", 1..10)
    ) {
        let docx = build_docx(&paragraphs);
        let report = analyze_docx(&docx, &StubClassifier).unwrap();

        let mut expected = Vec::new();
        let mut number = 0u32;
        for p in &paragraphs {
            let trimmed = p.trim();
            if trimmed.is_empty() {
                continue;
            }
            number += 1;
            if trimmed.chars().count() >= MIN_CLAUSE_LEN {
                expected.push((number, trimmed.to_string()));
            }
        }

        let actual: Vec<(u32, String)> = report
            .records()
            .iter()
            .map(|r| (r.location, r.clause.clone()))
            .collect();
        prop_assert_eq!(actual, expected);
    }
}

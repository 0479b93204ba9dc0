//! DOCX paragraph extraction
//!
//! A DOCX file is a ZIP archive whose main body lives in
//! `word/document.xml`. We stream that XML and collect the text runs
//! (`w:t`) of each paragraph (`w:p`). Paragraph numbering is 1-based
//! and counts every non-empty paragraph, including ones too short to
//! qualify as a clause, so numbers match what a reader sees.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;

use super::TextBlock;
use crate::error::AnalyzeError;

pub(crate) fn extract_blocks(bytes: &[u8]) -> Result<Vec<TextBlock>, AnalyzeError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| AnalyzeError::DocumentParse(e.to_string()))?;
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| AnalyzeError::DocumentParse(format!("missing document body: {e}")))?
        .read_to_string(&mut xml)?;
    parse_document_xml(&xml)
}

fn parse_document_xml(xml: &str) -> Result<Vec<TextBlock>, AnalyzeError> {
    let mut reader = Reader::from_str(xml);
    let mut blocks = Vec::new();
    let mut paragraph_num = 0u32;
    let mut current: Option<String> = None;
    let mut in_text_run = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| AnalyzeError::DocumentParse(e.to_string()))?;
        match event {
            Event::Start(e) => match e.name().as_ref() {
                b"w:p" => current = Some(String::new()),
                b"w:t" => in_text_run = true,
                _ => {}
            },
            Event::Empty(e) => {
                if let Some(text) = current.as_mut() {
                    match e.name().as_ref() {
                        b"w:tab" => text.push('\t'),
                        b"w:br" => text.push('\n'),
                        _ => {}
                    }
                }
            }
            Event::Text(t) => {
                if in_text_run {
                    if let Some(text) = current.as_mut() {
                        let run = t
                            .unescape()
                            .map_err(|e| AnalyzeError::DocumentParse(e.to_string()))?;
                        text.push_str(&run);
                    }
                }
            }
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_text_run = false,
                b"w:p" => {
                    if let Some(text) = current.take() {
                        let trimmed = text.trim();
                        if !trimmed.is_empty() {
                            paragraph_num += 1;
                            let block = TextBlock {
                                location: paragraph_num,
                                rect: None,
                                text: trimmed.to_string(),
                            };
                            if block.qualifies() {
                                blocks.push(block);
                            }
                        }
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(blocks)
}

//! PDF text block extraction via lopdf content streams
//!
//! Walks each page's content stream tracking the text-positioning
//! operators, decodes shown strings (UTF-8, UTF-16BE, Latin-1
//! fallback), then groups text into baseline lines and vertically
//! adjacent lines into blocks with a bounding rectangle.

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object};

use super::{Rect, TextBlock};
use crate::error::AnalyzeError;

/// Approximate glyph advance relative to the font size, used to
/// estimate line widths without consulting font metrics.
const GLYPH_WIDTH_RATIO: f64 = 0.5;

/// Lines whose baselines are further apart than this many multiples of
/// the font size start a new block.
const BLOCK_GAP_FACTOR: f64 = 1.8;

/// Baselines within this distance (points) are treated as one line.
const BASELINE_TOLERANCE: f64 = 0.5;

/// A single text-showing operation with its resolved position.
struct Span {
    text: String,
    x: f64,
    y: f64,
    font_size: f64,
}

/// A baseline line assembled from one or more spans.
struct Line {
    text: String,
    x0: f64,
    x1: f64,
    y: f64,
    font_size: f64,
}

/// Extract qualifying text blocks from every page, in page order.
pub(crate) fn extract_blocks(doc: &Document) -> Result<Vec<TextBlock>, AnalyzeError> {
    let mut blocks = Vec::new();
    for (&page_num, &page_id) in doc.get_pages().iter() {
        let content = doc
            .get_page_content(page_id)
            .map_err(|e| AnalyzeError::DocumentParse(e.to_string()))?;
        let operations = Content::decode(&content)
            .map_err(|e| AnalyzeError::DocumentParse(e.to_string()))?;
        let spans = collect_spans(&operations.operations);
        blocks.extend(group_spans(page_num, spans));
    }
    Ok(blocks)
}

/// Walk the content stream and record every shown string with the text
/// cursor position at which it was drawn.
fn collect_spans(ops: &[Operation]) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut font_size = 12.0;
    let mut leading = 0.0;
    let mut line_x = 0.0;
    let mut line_y = 0.0;
    let mut cursor_x = 0.0;

    for op in ops {
        match op.operator.as_str() {
            "BT" => {
                line_x = 0.0;
                line_y = 0.0;
                cursor_x = 0.0;
            }
            "Tf" => {
                if let Some(size) = op.operands.get(1).and_then(as_number) {
                    font_size = size;
                }
            }
            "TL" => {
                if let Some(l) = op.operands.first().and_then(as_number) {
                    leading = l;
                }
            }
            "Tm" => {
                // Only the translation components matter for positioning
                if op.operands.len() >= 6 {
                    if let (Some(e), Some(f)) = (
                        as_number(&op.operands[4]),
                        as_number(&op.operands[5]),
                    ) {
                        line_x = e;
                        line_y = f;
                        cursor_x = e;
                    }
                }
            }
            "Td" | "TD" => {
                if let (Some(tx), Some(ty)) = (
                    op.operands.first().and_then(as_number),
                    op.operands.get(1).and_then(as_number),
                ) {
                    line_x += tx;
                    line_y += ty;
                    cursor_x = line_x;
                    if op.operator == "TD" {
                        leading = -ty;
                    }
                }
            }
            "T*" => {
                line_y -= effective_leading(leading, font_size);
                cursor_x = line_x;
            }
            "Tj" | "TJ" | "'" | "\"" => {
                if op.operator == "'" || op.operator == "\"" {
                    line_y -= effective_leading(leading, font_size);
                    cursor_x = line_x;
                }
                for operand in &op.operands {
                    if let Some(text) = decode_text_operand(operand) {
                        if text.is_empty() {
                            continue;
                        }
                        let width = text.chars().count() as f64 * font_size * GLYPH_WIDTH_RATIO;
                        spans.push(Span {
                            text,
                            x: cursor_x,
                            y: line_y,
                            font_size,
                        });
                        cursor_x += width;
                    }
                }
            }
            _ => {}
        }
    }
    spans
}

fn effective_leading(leading: f64, font_size: f64) -> f64 {
    if leading > 0.0 {
        leading
    } else {
        font_size
    }
}

fn as_number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(*r as f64),
        _ => None,
    }
}

/// Decode the string payload of a text-showing operand.
fn decode_text_operand(operand: &Object) -> Option<String> {
    match operand {
        Object::String(bytes, _) => Some(decode_pdf_string(bytes)),
        Object::Array(items) => {
            // TJ arrays interleave strings with kerning adjustments;
            // large negative adjustments act as word spacing.
            let mut text = String::new();
            for item in items {
                match item {
                    Object::String(bytes, _) => text.push_str(&decode_pdf_string(bytes)),
                    Object::Integer(n) if *n < -100 => text.push(' '),
                    Object::Real(n) if *n < -100.0 => text.push(' '),
                    _ => {}
                }
            }
            Some(text)
        }
        _ => None,
    }
}

fn decode_pdf_string(bytes: &[u8]) -> String {
    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }
    // UTF-16BE with BOM is common in PDFs
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let units: Vec<u16> = bytes[2..]
            .chunks(2)
            .filter_map(|chunk| {
                if chunk.len() == 2 {
                    Some(u16::from_be_bytes([chunk[0], chunk[1]]))
                } else {
                    None
                }
            })
            .collect();
        if let Ok(s) = String::from_utf16(&units) {
            return s;
        }
    }
    // Latin-1 fallback
    bytes.iter().map(|&b| b as char).collect()
}

/// Assemble spans into lines, then lines into blocks.
fn group_spans(page: u32, spans: Vec<Span>) -> Vec<TextBlock> {
    let mut lines: Vec<Line> = Vec::new();
    for span in spans {
        let width = span.text.chars().count() as f64 * span.font_size * GLYPH_WIDTH_RATIO;
        let same_line = lines
            .last()
            .map(|line| (line.y - span.y).abs() <= BASELINE_TOLERANCE)
            .unwrap_or(false);
        if same_line {
            if let Some(line) = lines.last_mut() {
                if span.x > line.x1 + span.font_size * GLYPH_WIDTH_RATIO {
                    line.text.push(' ');
                }
                line.text.push_str(&span.text);
                line.x0 = line.x0.min(span.x);
                line.x1 = line.x1.max(span.x + width);
                line.font_size = line.font_size.max(span.font_size);
            }
        } else {
            lines.push(Line {
                text: span.text,
                x0: span.x,
                x1: span.x + width,
                y: span.y,
                font_size: span.font_size,
            });
        }
    }

    let mut blocks = Vec::new();
    let mut texts: Vec<String> = Vec::new();
    let mut rect = Rect {
        x0: 0.0,
        y0: 0.0,
        x1: 0.0,
        y1: 0.0,
    };
    let mut last_y = 0.0;
    let mut last_font = 0.0;

    for line in lines {
        let line_rect = Rect {
            x0: line.x0,
            // Pad below the baseline for descenders
            y0: line.y - line.font_size * 0.25,
            x1: line.x1,
            y1: line.y + line.font_size,
        };
        let continues = !texts.is_empty()
            && last_y - line.y > 0.0
            && last_y - line.y <= last_font * BLOCK_GAP_FACTOR;
        if continues {
            texts.push(line.text);
            rect.x0 = rect.x0.min(line_rect.x0);
            rect.x1 = rect.x1.max(line_rect.x1);
            rect.y0 = rect.y0.min(line_rect.y0);
            rect.y1 = rect.y1.max(line_rect.y1);
        } else {
            push_block(&mut blocks, page, std::mem::take(&mut texts), rect);
            texts.push(line.text);
            rect = line_rect;
        }
        last_y = line.y;
        last_font = line.font_size;
    }
    push_block(&mut blocks, page, texts, rect);

    blocks
}

fn push_block(blocks: &mut Vec<TextBlock>, page: u32, texts: Vec<String>, rect: Rect) {
    if texts.is_empty() {
        return;
    }
    let block = TextBlock {
        location: page,
        rect: Some(rect),
        text: texts.join("\n").trim().to_string(),
    };
    if block.qualifies() {
        blocks.push(block);
    }
}

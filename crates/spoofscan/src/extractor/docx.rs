//! Word-processor (`.docx`) text recovery.
//!
//! The body part `word/document.xml` is first converted to a small HTML-like
//! markup (paragraphs, tables, rows, cells, line breaks) and the markup is then
//! stripped back to visible text. Header, footer and style parts are never
//! opened, so only body content survives, in reading order.

use std::io::{Cursor, Read, Seek};
use std::sync::LazyLock;

use quick_xml::escape::{escape, resolve_predefined_entity};
use quick_xml::events::{BytesRef, Event};
use quick_xml::Reader;
use regex::Regex;

use crate::error::ExtractError;

const DOCUMENT_PART: &str = "word/document.xml";

static RE_LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</p>|<br\s*/?>|</tr>").unwrap());
static RE_CELL_END: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)</td>").unwrap());
static RE_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

pub fn extract_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let markup = convert_to_markup(bytes)?;
    Ok(strip_markup(&markup))
}

/// Converts a `.docx` container into intermediate markup.
pub fn convert_to_markup(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| {
        ExtractError::ExtractionFailure(format!("Failed to open DOCX: {}", e))
    })?;

    let xml = read_document_part(&mut archive)?;
    document_xml_to_markup(&xml)
}

fn read_document_part<R: Read + Seek>(
    archive: &mut zip::ZipArchive<R>,
) -> Result<String, ExtractError> {
    let mut part = archive.by_name(DOCUMENT_PART).map_err(|e| {
        ExtractError::ExtractionFailure(format!("Failed to find {}: {}", DOCUMENT_PART, e))
    })?;

    let mut xml = String::new();
    part.read_to_string(&mut xml).map_err(|e| {
        ExtractError::ExtractionFailure(format!("Failed to read {}: {}", DOCUMENT_PART, e))
    })?;

    Ok(xml)
}

fn document_xml_to_markup(xml: &str) -> Result<String, ExtractError> {
    let mut reader = Reader::from_str(xml);

    let mut markup = String::new();
    let mut in_text_element = false;
    let mut in_run = false;
    // Nesting depth of table cells; paragraphs inside a cell are joined inline.
    let mut cell_depth = 0usize;
    let mut cell_has_paragraph = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"t" => in_text_element = true,
                b"r" => in_run = true,
                b"p" => {
                    if cell_depth == 0 {
                        markup.push_str("<p>");
                    } else if cell_has_paragraph {
                        markup.push(' ');
                    } else {
                        cell_has_paragraph = true;
                    }
                }
                b"tbl" => markup.push_str("<table>"),
                b"tr" => markup.push_str("<tr>"),
                b"tc" => {
                    cell_depth += 1;
                    cell_has_paragraph = false;
                    markup.push_str("<td>");
                }
                _ => {}
            },
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"t" => in_text_element = false,
                b"r" => in_run = false,
                b"p" if cell_depth == 0 => markup.push_str("</p>"),
                b"tbl" => markup.push_str("</table>"),
                b"tr" => markup.push_str("</tr>"),
                b"tc" => {
                    cell_depth = cell_depth.saturating_sub(1);
                    markup.push_str("</td>");
                }
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                b"p" if cell_depth == 0 => markup.push_str("<p></p>"),
                b"br" | b"cr" if in_run => markup.push_str("<br/>"),
                b"tab" if in_run => markup.push(if cell_depth == 0 { '\t' } else { ' ' }),
                _ => {}
            },
            Ok(Event::Text(e)) => {
                if in_text_element {
                    let decoded = e.decode().map_err(|err| {
                        ExtractError::ExtractionFailure(format!(
                            "Invalid text in {}: {}",
                            DOCUMENT_PART, err
                        ))
                    })?;
                    markup.push_str(&escape(decoded.as_ref()));
                }
            }
            Ok(Event::GeneralRef(r)) => {
                if in_text_element {
                    markup.push_str(&escape(resolve_reference(&r)?.as_str()));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ExtractError::ExtractionFailure(format!(
                    "XML parsing error: {}",
                    e
                )));
            }
            _ => {}
        }
    }

    Ok(markup)
}

/// Resolves `&amp;`-style and numeric references found inside a text run.
fn resolve_reference(reference: &BytesRef<'_>) -> Result<String, ExtractError> {
    let invalid = |detail: String| {
        ExtractError::ExtractionFailure(format!(
            "Invalid entity reference in {}: {}",
            DOCUMENT_PART, detail
        ))
    };

    if let Some(ch) = reference
        .resolve_char_ref()
        .map_err(|e| invalid(e.to_string()))?
    {
        return Ok(ch.to_string());
    }

    let name = reference.decode().map_err(|e| invalid(e.to_string()))?;
    resolve_predefined_entity(&name)
        .map(str::to_string)
        .ok_or_else(|| invalid(format!("&{};", name)))
}

/// Removes all markup, keeping visible text only. Paragraphs, line breaks and
/// table rows end a line; table cells are separated by tabs.
pub fn strip_markup(markup: &str) -> String {
    let with_breaks = RE_LINE_BREAK.replace_all(markup, "\n");
    let with_cells = RE_CELL_END.replace_all(&with_breaks, "\t");
    let bare = RE_TAG.replace_all(&with_cells, "");
    let decoded = decode_entities(&bare);

    decoded
        .lines()
        .map(|line| line.trim_end_matches([' ', '\t']))
        .collect::<Vec<_>>()
        .join("\n")
}

fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

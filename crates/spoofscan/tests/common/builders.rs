//! Builder patterns for creating test data programmatically.
//!
//! These builders allow creating docx fixtures, backend payloads and
//! scripted analyzers without repetitive boilerplate code.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::io::{Cursor, Write};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};
use zip::write::SimpleFileOptions;

use spoofscan::analyzer::{AnalyzerError, DocumentAnalyzer, Issue, Verdict};

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Builder for minimal `.docx` containers.
pub struct DocxBuilder {
    body: String,
    header: Option<String>,
}

impl DocxBuilder {
    pub fn new() -> Self {
        Self {
            body: String::new(),
            header: None,
        }
    }

    /// Add a paragraph with a single run.
    pub fn paragraph(mut self, text: &str) -> Self {
        self.body.push_str(&format!(
            "<w:p><w:r><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>",
            xml_escape(text)
        ));
        self
    }

    /// Add a table, one inner vec per row.
    pub fn table(mut self, rows: &[&[&str]]) -> Self {
        self.body.push_str("<w:tbl>");
        for row in rows {
            self.body.push_str("<w:tr>");
            for cell in *row {
                self.body.push_str(&format!(
                    "<w:tc><w:p><w:r><w:t>{}</w:t></w:r></w:p></w:tc>",
                    xml_escape(cell)
                ));
            }
            self.body.push_str("</w:tr>");
        }
        self.body.push_str("</w:tbl>");
        self
    }

    /// Add a page header part; its text must never reach the extractor output.
    pub fn header(mut self, text: &str) -> Self {
        self.header = Some(text.to_string());
        self
    }

    pub fn build(self) -> Vec<u8> {
        let document = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="{}"><w:body>{}</w:body></w:document>"#,
            W_NS, self.body
        );

        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("[Content_Types].xml", SimpleFileOptions::default())
            .expect("Failed to start zip entry");
        writer
            .write_all(br#"<?xml version="1.0" encoding="UTF-8"?><Types/>"#)
            .expect("Failed to write zip entry");
        writer
            .start_file("word/document.xml", SimpleFileOptions::default())
            .expect("Failed to start zip entry");
        writer
            .write_all(document.as_bytes())
            .expect("Failed to write zip entry");

        if let Some(header) = self.header {
            let part = format!(
                r#"<w:hdr xmlns:w="{}"><w:p><w:r><w:t>{}</w:t></w:r></w:p></w:hdr>"#,
                W_NS,
                xml_escape(&header)
            );
            writer
                .start_file("word/header1.xml", SimpleFileOptions::default())
                .expect("Failed to start zip entry");
            writer
                .write_all(part.as_bytes())
                .expect("Failed to write zip entry");
        }

        writer
            .finish()
            .expect("Failed to finish zip")
            .into_inner()
    }
}

impl Default for DocxBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub fn issue(claim: &str, reference: &str, explanation: &str) -> Issue {
    Issue {
        text_claim: claim.to_string(),
        structural_reference: reference.to_string(),
        explanation: explanation.to_string(),
    }
}

/// Wrap verdict JSON text in a generateContent response envelope.
pub fn gemini_payload(verdict_text: &str) -> String {
    json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{ "text": verdict_text }]
            },
            "finishReason": "STOP"
        }]
    })
    .to_string()
}

pub fn verdict_json(verdict: &Value) -> String {
    gemini_payload(&verdict.to_string())
}

/// Analyzer that answers from a fixed script and records the text it saw.
/// Once the script runs out every document is judged safe.
pub struct ScriptedAnalyzer {
    answers: Mutex<VecDeque<Result<Verdict, AnalyzerError>>>,
    seen: Mutex<Vec<String>>,
}

impl ScriptedAnalyzer {
    pub fn new(answers: Vec<Result<Verdict, AnalyzerError>>) -> Self {
        Self {
            answers: Mutex::new(answers.into()),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn always_safe() -> Self {
        Self::new(Vec::new())
    }

    pub fn calls(&self) -> Vec<String> {
        self.seen.lock().expect("lock poisoned").clone()
    }
}

#[async_trait]
impl DocumentAnalyzer for ScriptedAnalyzer {
    async fn analyze(&self, text: &str) -> Result<Verdict, AnalyzerError> {
        self.seen.lock().expect("lock poisoned").push(text.to_string());
        self.answers
            .lock()
            .expect("lock poisoned")
            .pop_front()
            .unwrap_or_else(|| Ok(Verdict::safe("No structural mismatches found.")))
    }
}

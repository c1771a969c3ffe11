pub mod docx;
pub mod text;

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ExtractError;
use crate::sanitize;

/// Name given to text pasted directly instead of uploaded as a file.
pub const PASTED_TEXT_NAME: &str = "pasted-text.txt";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Text,
    Markdown,
    Docx,
}

impl DocumentFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "txt" => Some(Self::Text),
            "md" | "markdown" => Some(Self::Markdown),
            "docx" => Some(Self::Docx),
            _ => None,
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Text => write!(f, "text"),
            DocumentFormat::Markdown => write!(f, "markdown"),
            DocumentFormat::Docx => write!(f, "docx"),
        }
    }
}

/// Format declared by a file's name. An unrecognized suffix is kept as its
/// own case so extraction can report it, rather than guessing a format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclaredFormat {
    Known(DocumentFormat),
    Unsupported(String),
}

impl DeclaredFormat {
    pub fn from_file_name(name: &str) -> Self {
        let extension = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");

        match DocumentFormat::from_extension(extension) {
            Some(format) => DeclaredFormat::Known(format),
            None => DeclaredFormat::Unsupported(extension.to_string()),
        }
    }
}

/// A file submitted for scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    name: String,
    declared_format: DeclaredFormat,
    bytes: Vec<u8>,
}

impl InputFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        let name = name.into();
        let declared_format = DeclaredFormat::from_file_name(&name);
        Self {
            name,
            declared_format,
            bytes: bytes.into(),
        }
    }

    /// Wraps text typed or pasted by the user as a plain-text file.
    pub fn from_pasted_text(text: impl Into<String>) -> Self {
        Self {
            name: PASTED_TEXT_NAME.to_string(),
            declared_format: DeclaredFormat::Known(DocumentFormat::Text),
            bytes: text.into().into_bytes(),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, ExtractError> {
        let bytes = std::fs::read(path).map_err(|e| ExtractError::ReadDocument {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(Self::new(sanitize::redact_path(path), bytes))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declared_format(&self) -> &DeclaredFormat {
        &self.declared_format
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    pub source_name: String,
    pub format: DocumentFormat,
    pub text: String,
}

impl ExtractedText {
    /// True when there is nothing worth sending to the analyzer.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

pub fn extract(file: &InputFile) -> Result<ExtractedText, ExtractError> {
    let format = match file.declared_format() {
        DeclaredFormat::Known(format) => *format,
        DeclaredFormat::Unsupported(ext) => {
            return Err(ExtractError::UnsupportedFormat(ext.clone()));
        }
    };

    let text = match format {
        DocumentFormat::Text | DocumentFormat::Markdown => text::extract_text(file.bytes())?,
        DocumentFormat::Docx => docx::extract_text(file.bytes())?,
    };

    Ok(ExtractedText {
        source_name: file.name().to_string(),
        format,
        text,
    })
}

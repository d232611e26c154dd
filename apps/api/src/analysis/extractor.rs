//! Document text extraction: turns an uploaded PDF or DOCX into plain text
//! suitable for the downstream fact extractors.

use std::io::{Cursor, Read};

use bytes::Bytes;
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::{Deserialize, Serialize};
use zip::ZipArchive;

use crate::errors::AppError;

/// Supported resume upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// Maps a filename extension to a format tag. `None` means the upload
    /// should be rejected as `UnsupportedFormat`.
    pub fn from_extension(filename: &str) -> Option<Self> {
        let (_, ext) = filename.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" | "doc" => Some(Self::Docx),
            _ => None,
        }
    }
}

/// An uploaded document, alive only for the duration of one analysis request.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub bytes: Bytes,
    pub format: DocumentFormat,
}

/// Extracts plain text from the document. Fails with `Extraction` when the
/// content is corrupt, encrypted, or yields no text at all.
pub fn extract_text(doc: &RawDocument) -> Result<String, AppError> {
    let raw = match doc.format {
        DocumentFormat::Pdf => extract_pdf(&doc.bytes)?,
        DocumentFormat::Docx => extract_docx(&doc.bytes)?,
    };
    let text = normalize_whitespace(&raw);
    if text.is_empty() {
        return Err(AppError::Extraction(
            "document contains no extractable text".to_string(),
        ));
    }
    Ok(text)
}

fn extract_pdf(bytes: &[u8]) -> Result<String, AppError> {
    pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| AppError::Extraction(format!("failed to read PDF: {e}")))
}

/// DOCX is a zip archive; the document body lives in `word/document.xml`.
/// Text runs are concatenated, with paragraph ends and explicit breaks
/// turned into line breaks so words never run together.
fn extract_docx(bytes: &[u8]) -> Result<String, AppError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| AppError::Extraction(format!("failed to open DOCX archive: {e}")))?;
    let mut entry = archive
        .by_name("word/document.xml")
        .map_err(|_| AppError::Extraction("DOCX is missing word/document.xml".to_string()))?;
    let mut xml = String::new();
    entry
        .read_to_string(&mut xml)
        .map_err(|e| AppError::Extraction(format!("failed to read DOCX body: {e}")))?;

    let mut reader = Reader::from_str(&xml);
    let mut out = String::new();
    loop {
        match reader.read_event() {
            Ok(Event::Text(t)) => {
                let text = t
                    .unescape()
                    .map_err(|e| AppError::Extraction(format!("malformed DOCX text run: {e}")))?;
                out.push_str(&text);
            }
            Ok(Event::End(e)) if e.name().as_ref() == b"w:p" => out.push('\n'),
            Ok(Event::Empty(e)) if matches!(e.name().as_ref(), b"w:br" | b"w:tab") => {
                out.push('\n')
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(AppError::Extraction(format!("malformed DOCX XML: {e}")));
            }
            _ => {}
        }
    }
    Ok(out)
}

/// Normalizes line endings, collapses runs of spaces/tabs, and shrinks runs
/// of blank lines to one. Line breaks are kept as breaks (never removed), so
/// words split across lines stay separate tokens and section parsing still
/// sees line structure.
fn normalize_whitespace(raw: &str) -> String {
    let unified = raw.replace("\r\n", "\n").replace('\r', "\n");
    let mut out = String::with_capacity(unified.len());
    let mut prev_blank = true;
    for line in unified.lines() {
        let collapsed = line.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() {
            if prev_blank {
                continue;
            }
            prev_blank = true;
        } else {
            prev_blank = false;
        }
        out.push_str(&collapsed);
        out.push('\n');
    }
    out.trim_end().to_string()
}

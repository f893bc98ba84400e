//! Raw text extraction from uploaded documents.

use crate::errors::AppError;

/// Upper bound on the text handed to model-assisted extraction. Longer
/// uploads are clipped; the heuristic pass still sees the full text.
pub const MAX_ANALYZE_CHARS: usize = 4000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Pdf,
    Text,
}

/// Decides how to treat an upload. The `%PDF-` magic wins over the file
/// extension; anything else is treated as plain text.
pub fn detect_kind(filename: Option<&str>, bytes: &[u8]) -> UploadKind {
    if bytes.starts_with(b"%PDF-") {
        return UploadKind::Pdf;
    }
    let is_pdf_name = filename
        .map(|f| f.to_lowercase().ends_with(".pdf"))
        .unwrap_or(false);
    if is_pdf_name {
        UploadKind::Pdf
    } else {
        UploadKind::Text
    }
}

/// Extracts raw text from an upload. PDF text extraction failures are
/// surfaced as ingestion errors; text uploads decode lossily so a stray
/// invalid byte cannot abort the pipeline.
pub fn extract_text(kind: UploadKind, bytes: &[u8]) -> Result<String, AppError> {
    let text = match kind {
        UploadKind::Pdf => pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| AppError::Ingest(format!("Failed to extract PDF text: {e}")))?,
        UploadKind::Text => String::from_utf8_lossy(bytes).into_owned(),
    };
    Ok(normalize_newlines(&text))
}

/// Collapses CRLF/CR to LF so downstream line parsing sees one convention.
pub fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Clips text to `MAX_ANALYZE_CHARS` characters on a char boundary.
pub fn clip_for_analysis(text: &str) -> &str {
    match text.char_indices().nth(MAX_ANALYZE_CHARS) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_kind_by_magic_bytes() {
        assert_eq!(detect_kind(None, b"%PDF-1.7 rest"), UploadKind::Pdf);
        assert_eq!(detect_kind(Some("cv.txt"), b"%PDF-1.4"), UploadKind::Pdf);
    }

    #[test]
    fn test_detect_kind_by_extension() {
        assert_eq!(detect_kind(Some("resume.PDF"), b"not magic"), UploadKind::Pdf);
        assert_eq!(detect_kind(Some("resume.txt"), b"hello"), UploadKind::Text);
        assert_eq!(detect_kind(None, b"hello"), UploadKind::Text);
    }

    #[test]
    fn test_extract_text_plain_lossy() {
        let bytes = b"Jane Doe\xFF\nEngineer";
        let text = extract_text(UploadKind::Text, bytes).unwrap();
        assert!(text.starts_with("Jane Doe"));
        assert!(text.contains("Engineer"));
    }

    #[test]
    fn test_extract_text_bad_pdf_is_ingest_error() {
        let err = extract_text(UploadKind::Pdf, b"%PDF-not really").unwrap_err();
        assert!(err.to_string().contains("PDF"));
    }

    #[test]
    fn test_normalize_newlines() {
        assert_eq!(normalize_newlines("a\r\nb\rc\nd"), "a\nb\nc\nd");
    }

    #[test]
    fn test_clip_for_analysis_short_text_untouched() {
        assert_eq!(clip_for_analysis("short"), "short");
    }

    #[test]
    fn test_clip_for_analysis_respects_char_boundary() {
        let long: String = "é".repeat(MAX_ANALYZE_CHARS + 100);
        let clipped = clip_for_analysis(&long);
        assert_eq!(clipped.chars().count(), MAX_ANALYZE_CHARS);
    }
}

//! Splits generated document text into typed blocks for the PDF writer.
//!
//! ATS resumes are line-oriented: ALL-CAPS or `**…**` lines are section
//! headings, `-`/`•` lines are bullets, everything else is body text.
//! Human resumes and cover letters are paragraph-oriented, split on blank
//! lines. Cover letters gain a salutation and signature here when the
//! drafted body does not already carry them.

use crate::models::document::DocumentType;

// ────────────────────────────────────────────────────────────────────────────
// Block model
// ────────────────────────────────────────────────────────────────────────────

/// One layout block of a rendered document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Section heading, markup stripped (no `**`, no trailing colon).
    Heading(String),
    /// Bullet item, marker stripped.
    Bullet(String),
    /// Body paragraph.
    Paragraph(String),
    /// Signature name line at the end of a cover letter.
    Signature(String),
}

/// Splits a document into blocks according to its type.
pub fn document_blocks(doc_type: DocumentType, content: &str, name: &str) -> Vec<Block> {
    match doc_type {
        DocumentType::AtsResume => ats_blocks(content),
        DocumentType::HumanResume => paragraph_blocks(content),
        DocumentType::CoverLetter => cover_letter_blocks(content, name),
        // Portfolio downloads are HTML; a PDF request never reaches here.
        DocumentType::PortfolioSite => paragraph_blocks(content),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Classifiers
// ────────────────────────────────────────────────────────────────────────────

/// Line-oriented split for ATS resumes.
pub fn ats_blocks(content: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    for raw in content.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(heading) = heading_text(line) {
            blocks.push(Block::Heading(heading));
        } else if let Some(item) = bullet_text(line) {
            blocks.push(Block::Bullet(item.to_string()));
        } else {
            blocks.push(Block::Paragraph(line.to_string()));
        }
    }
    blocks
}

/// Blank-line split for narrative documents.
pub fn paragraph_blocks(content: &str) -> Vec<Block> {
    content
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| Block::Paragraph(p.to_string()))
        .collect()
}

/// Paragraph split plus salutation and signature for cover letters.
///
/// The drafting prompt asks for body paragraphs only, so the letter frame
/// is added here. A draft that already opens with "Dear" or closes with
/// "Sincerely" keeps its own frame.
pub fn cover_letter_blocks(content: &str, name: &str) -> Vec<Block> {
    let trimmed = content.trim();
    let mut blocks = Vec::new();
    if !trimmed.starts_with("Dear") {
        blocks.push(Block::Paragraph("Dear Hiring Manager,".to_string()));
    }
    blocks.extend(paragraph_blocks(trimmed));
    if !trimmed.contains("Sincerely") {
        blocks.push(Block::Paragraph("Sincerely,".to_string()));
        blocks.push(Block::Signature(name.to_string()));
    }
    blocks
}

/// Returns the heading text if `line` is a section heading.
///
/// A heading is either ALL-CAPS (at least one letter, no lowercase) or
/// wrapped in `**`. Markup and any trailing colon are stripped.
fn heading_text(line: &str) -> Option<String> {
    let starred = line.len() > 4 && line.starts_with("**") && line.ends_with("**");
    let has_alpha = line.chars().any(|c| c.is_alphabetic());
    let all_caps = has_alpha && !line.chars().any(|c| c.is_lowercase());
    if !starred && !all_caps {
        return None;
    }
    let inner = line.trim_matches('*').trim().trim_end_matches(':').trim();
    if inner.is_empty() {
        None
    } else {
        Some(inner.to_string())
    }
}

/// Returns the bullet text if `line` is a bullet item.
fn bullet_text(line: &str) -> Option<&str> {
    let rest = line
        .strip_prefix('-')
        .or_else(|| line.strip_prefix('•'))
        .or_else(|| line.strip_prefix("* "))?;
    let text = rest.trim();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

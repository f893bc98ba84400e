//! Rendering: turns stored documents into downloadable artifacts.
//!
//! Resumes and cover letters download as styled PDF or plain TXT; the
//! portfolio downloads as a single self-contained HTML file. Filenames
//! follow `{Name_With_Underscores}_{Document_Suffix}.{ext}`.

pub mod blocks;
pub mod handlers;
pub mod html;
pub mod layout;
pub mod pdf;

use crate::errors::AppError;
use crate::models::document::{ArtifactFormat, DocumentType, GeneratedDocument, RenderedArtifact};
use crate::models::profile::Profile;

/// Renders a stored document into a downloadable artifact.
///
/// Format availability is per document type: `pdf` and `txt` for resumes
/// and cover letters, `html` for the portfolio. Anything else is a
/// validation error rather than an empty file.
pub fn render_document(
    document: &GeneratedDocument,
    profile: &Profile,
    format: ArtifactFormat,
) -> Result<RenderedArtifact, AppError> {
    let doc_type = document.doc_type;
    let bytes = match (doc_type, format) {
        (DocumentType::PortfolioSite, ArtifactFormat::Html) => {
            html::portfolio_html(&document.content, profile).into_bytes()
        }
        (DocumentType::PortfolioSite, _) => {
            return Err(AppError::Validation(format!(
                "{} downloads are available as html only",
                doc_type.as_str()
            )));
        }
        (_, ArtifactFormat::Html) => {
            return Err(AppError::Validation(format!(
                "{} downloads are available as pdf or txt",
                doc_type.as_str()
            )));
        }
        (_, ArtifactFormat::Pdf) => pdf::render_pdf(doc_type, &document.content, profile)?,
        (_, ArtifactFormat::Txt) => render_txt(doc_type, &document.content, profile).into_bytes(),
    };
    Ok(RenderedArtifact {
        filename: artifact_filename(profile, doc_type, format),
        content_type: format.content_type(),
        bytes,
    })
}

/// `Alex Morgan` + ATS resume + pdf → `Alex_Morgan_ATS_Resume.pdf`.
pub fn artifact_filename(
    profile: &Profile,
    doc_type: DocumentType,
    format: ArtifactFormat,
) -> String {
    let safe_name = profile
        .contact
        .name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");
    format!("{}_{}.{}", safe_name, doc_type.file_suffix(), format.extension())
}

/// Email and phone joined with ` | `, skipping empty fields.
pub(crate) fn contact_line(profile: &Profile) -> String {
    let mut parts = Vec::new();
    for value in [&profile.contact.email, &profile.contact.phone] {
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            parts.push(trimmed);
        }
    }
    parts.join(" | ")
}

fn render_txt(doc_type: DocumentType, content: &str, profile: &Profile) -> String {
    match doc_type {
        DocumentType::CoverLetter => cover_letter_txt(content, profile),
        _ => content.to_string(),
    }
}

/// Plain-text cover letter: name and contact header, then the letter with
/// its salutation and signature added when the draft lacks them.
fn cover_letter_txt(content: &str, profile: &Profile) -> String {
    let name = profile.contact.name.trim();
    let trimmed = content.trim();
    let mut out = String::from(name);
    let contact = contact_line(profile);
    if !contact.is_empty() {
        out.push('\n');
        out.push_str(&contact);
    }
    out.push_str("\n\n");
    if !trimmed.starts_with("Dear") {
        out.push_str("Dear Hiring Manager,\n\n");
    }
    out.push_str(trimmed);
    if !trimmed.contains("Sincerely") {
        out.push_str("\n\nSincerely,\n");
        out.push_str(name);
    }
    out.push('\n');
    out
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

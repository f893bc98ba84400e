use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The four producible document types. Closed set: the generator and the
/// renderer match on this exhaustively, so adding a variant forces both
/// to handle it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    AtsResume,
    HumanResume,
    CoverLetter,
    PortfolioSite,
}

impl DocumentType {
    pub const ALL: [DocumentType; 4] = [
        DocumentType::AtsResume,
        DocumentType::HumanResume,
        DocumentType::CoverLetter,
        DocumentType::PortfolioSite,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::AtsResume => "ats_resume",
            DocumentType::HumanResume => "human_resume",
            DocumentType::CoverLetter => "cover_letter",
            DocumentType::PortfolioSite => "portfolio_site",
        }
    }

    /// Human-readable title used in document headers and logs.
    pub fn label(&self) -> &'static str {
        match self {
            DocumentType::AtsResume => "ATS Resume",
            DocumentType::HumanResume => "Human Resume",
            DocumentType::CoverLetter => "Cover Letter",
            DocumentType::PortfolioSite => "Portfolio",
        }
    }

    /// Filename suffix for downloads, e.g. `Jane_Doe_ATS_Resume.pdf`.
    pub fn file_suffix(&self) -> &'static str {
        match self {
            DocumentType::AtsResume => "ATS_Resume",
            DocumentType::HumanResume => "Human_Resume",
            DocumentType::CoverLetter => "Cover_Letter",
            DocumentType::PortfolioSite => "Portfolio",
        }
    }
}

/// Download format for a rendered artifact. PDF and TXT apply to the
/// resume and cover-letter types; HTML applies to the portfolio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactFormat {
    Pdf,
    Txt,
    Html,
}

impl ArtifactFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ArtifactFormat::Pdf => "pdf",
            ArtifactFormat::Txt => "txt",
            ArtifactFormat::Html => "html",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ArtifactFormat::Pdf => "application/pdf",
            ArtifactFormat::Txt => "text/plain; charset=utf-8",
            ArtifactFormat::Html => "text/html; charset=utf-8",
        }
    }
}

/// One generation call: which documents to produce, plus optional
/// targeting overrides for the cover letter. Ephemeral.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub document_types: Vec<DocumentType>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
}

/// Where a document's content came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DraftOrigin {
    /// Drafted by the external model named here.
    Model { model: String },
    /// Deterministic template output after drafting failed.
    Fallback { reason: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedDocument {
    pub id: Uuid,
    pub doc_type: DocumentType,
    pub content: String,
    pub origin: DraftOrigin,
    pub generated_at: DateTime<Utc>,
}

impl GeneratedDocument {
    pub fn summary(&self) -> DocumentSummary {
        DocumentSummary {
            id: self.id,
            doc_type: self.doc_type,
            origin: self.origin.clone(),
            content_chars: self.content.chars().count(),
            generated_at: self.generated_at,
        }
    }
}

/// Listing view of a generated document; the full content is fetched
/// through the download endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub id: Uuid,
    pub doc_type: DocumentType,
    pub origin: DraftOrigin,
    pub content_chars: usize,
    pub generated_at: DateTime<Utc>,
}

/// A downloadable artifact produced by the renderer.
#[derive(Debug, Clone)]
pub struct RenderedArtifact {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

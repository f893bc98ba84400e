//! Generation orchestrator: validation gate, drafting, fallback.
//!
//! One generated document per requested type, always. A draft that the
//! chain cannot produce, or that comes back empty or malformed, is
//! replaced by the deterministic fallback for that type; the document's
//! origin records which path produced it. The only hard failures are an
//! invalid profile and an empty request.

use std::collections::HashSet;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::generate::drafter::{strip_fences, Drafter};
use crate::generate::fallback::build_fallback;
use crate::generate::prompts::{build_document_request, resolve_target, TargetContext};
use crate::models::document::{DocumentType, DraftOrigin, GeneratedDocument, GenerationRequest};
use crate::models::profile::Profile;
use crate::render::html::looks_like_html;
use crate::validate::validate_profile;

/// Generates one document per requested type, in request order.
///
/// Duplicate types collapse to their first occurrence. The profile must
/// pass validation first; the failed report is returned in the error body
/// so the caller can see which fields are missing.
pub async fn generate_documents(
    drafter: &dyn Drafter,
    profile: &Profile,
    request: &GenerationRequest,
) -> Result<Vec<GeneratedDocument>, AppError> {
    let report = validate_profile(profile);
    if !report.passed {
        return Err(AppError::UnprocessableEntity(
            serde_json::to_string(&report).unwrap_or_default(),
        ));
    }
    if request.document_types.is_empty() {
        return Err(AppError::Validation(
            "document_types must name at least one document".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    let requested: Vec<DocumentType> = request
        .document_types
        .iter()
        .copied()
        .filter(|t| seen.insert(*t))
        .collect();

    let target = resolve_target(profile, request);
    let mut documents = Vec::with_capacity(requested.len());
    for doc_type in requested {
        documents.push(generate_one(drafter, profile, doc_type, &target).await);
    }
    Ok(documents)
}

async fn generate_one(
    drafter: &dyn Drafter,
    profile: &Profile,
    doc_type: DocumentType,
    target: &TargetContext,
) -> GeneratedDocument {
    let draft_request = build_document_request(doc_type, profile, target);
    let (content, origin) = match drafter.draft(&draft_request).await {
        Ok(draft) => match clean_draft(doc_type, &draft.content) {
            Some(content) => {
                info!(
                    doc_type = doc_type.as_str(),
                    model = %draft.model,
                    chars = content.len(),
                    "document drafted"
                );
                (content, DraftOrigin::Model { model: draft.model })
            }
            None => {
                warn!(
                    doc_type = doc_type.as_str(),
                    model = %draft.model,
                    "draft unusable, using fallback"
                );
                (
                    build_fallback(doc_type, profile, target),
                    DraftOrigin::Fallback {
                        reason: "draft was empty or malformed".to_string(),
                    },
                )
            }
        },
        Err(err) => {
            warn!(doc_type = doc_type.as_str(), error = %err, "drafting failed, using fallback");
            (
                build_fallback(doc_type, profile, target),
                DraftOrigin::Fallback {
                    reason: err.to_string(),
                },
            )
        }
    };

    GeneratedDocument {
        id: Uuid::new_v4(),
        doc_type,
        content,
        origin,
        generated_at: Utc::now(),
    }
}

/// Strips code fences and rejects drafts that cannot serve as the document.
///
/// Portfolio drafts must be a complete HTML page; the other types only
/// need non-empty text. Models sometimes wrap the page in prose around a
/// fenced block, so before rejecting a portfolio draft the fenced body is
/// pulled out and checked on its own.
fn clean_draft(doc_type: DocumentType, raw: &str) -> Option<String> {
    let cleaned = strip_fences(raw).trim();
    if cleaned.is_empty() {
        return None;
    }
    if doc_type != DocumentType::PortfolioSite || looks_like_html(cleaned) {
        return Some(cleaned.to_string());
    }
    extract_fenced_html(raw)
        .map(str::trim)
        .filter(|body| looks_like_html(body))
        .map(String::from)
}

/// Returns the body of the first ```html fence (or the first bare fence),
/// ignoring any prose around it.
fn extract_fenced_html(text: &str) -> Option<&str> {
    let after = match text.split_once("```html") {
        Some((_, rest)) => rest,
        None => text.split_once("```")?.1,
    };
    match after.find("```") {
        Some(end) => Some(&after[..end]),
        None => Some(after),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::drafter::{Draft, DraftError, DraftRequest};
    use async_trait::async_trait;

    struct FixedDrafter {
        content: String,
    }

    impl FixedDrafter {
        fn new(content: &str) -> Self {
            FixedDrafter {
                content: content.to_string(),
            }
        }
    }

    #[async_trait]
    impl Drafter for FixedDrafter {
        async fn draft(&self, _request: &DraftRequest) -> Result<Draft, DraftError> {
            Ok(Draft {
                content: self.content.clone(),
                model: "stub-model".to_string(),
            })
        }
    }

    struct FailingDrafter;

    #[async_trait]
    impl Drafter for FailingDrafter {
        async fn draft(&self, _request: &DraftRequest) -> Result<Draft, DraftError> {
            Err(DraftError::ChainExhausted {
                last: "connection refused".to_string(),
            })
        }
    }

    fn request_for(types: &[DocumentType]) -> GenerationRequest {
        GenerationRequest {
            document_types: types.to_vec(),
            ..GenerationRequest::default()
        }
    }

    #[tokio::test]
    async fn test_one_document_per_requested_type_in_order() {
        let drafter = FixedDrafter::new("SUMMARY\n- Rust");
        let profile = Profile::example();
        let request = request_for(&[DocumentType::CoverLetter, DocumentType::AtsResume]);
        let docs = generate_documents(&drafter, &profile, &request)
            .await
            .expect("generate");
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].doc_type, DocumentType::CoverLetter);
        assert_eq!(docs[1].doc_type, DocumentType::AtsResume);
        for doc in &docs {
            assert_eq!(
                doc.origin,
                DraftOrigin::Model {
                    model: "stub-model".to_string()
                }
            );
        }
    }

    #[tokio::test]
    async fn test_duplicate_types_collapse_to_first_occurrence() {
        let drafter = FixedDrafter::new("content");
        let profile = Profile::example();
        let request = request_for(&[
            DocumentType::AtsResume,
            DocumentType::AtsResume,
            DocumentType::HumanResume,
            DocumentType::AtsResume,
        ]);
        let docs = generate_documents(&drafter, &profile, &request)
            .await
            .expect("generate");
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].doc_type, DocumentType::AtsResume);
        assert_eq!(docs[1].doc_type, DocumentType::HumanResume);
    }

    #[tokio::test]
    async fn test_empty_request_is_rejected() {
        let drafter = FixedDrafter::new("content");
        let profile = Profile::example();
        let err = generate_documents(&drafter, &profile, &request_for(&[]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_invalid_profile_is_refused_with_report() {
        let drafter = FixedDrafter::new("content");
        let mut profile = Profile::example();
        profile.contact.name.clear();
        let err = generate_documents(&drafter, &profile, &request_for(&[DocumentType::AtsResume]))
            .await
            .unwrap_err();
        match err {
            AppError::UnprocessableEntity(body) => {
                assert!(body.contains("\"name\""), "report should name the missing field")
            }
            other => panic!("expected UnprocessableEntity, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_chain_failure_falls_back_per_type() {
        let profile = Profile::example();
        let request = request_for(&[DocumentType::AtsResume, DocumentType::PortfolioSite]);
        let docs = generate_documents(&FailingDrafter, &profile, &request)
            .await
            .expect("generate");
        assert_eq!(docs.len(), 2);
        for doc in &docs {
            assert!(
                matches!(&doc.origin, DraftOrigin::Fallback { reason } if reason.contains("connection refused")),
                "origin should carry the drafting error"
            );
            assert!(!doc.content.trim().is_empty());
        }
        assert!(looks_like_html(&docs[1].content), "portfolio fallback is a full page");
    }

    #[tokio::test]
    async fn test_empty_draft_falls_back() {
        let drafter = FixedDrafter::new("   \n  ");
        let profile = Profile::example();
        let docs = generate_documents(&drafter, &profile, &request_for(&[DocumentType::AtsResume]))
            .await
            .expect("generate");
        assert!(
            matches!(&docs[0].origin, DraftOrigin::Fallback { reason } if reason.contains("empty or malformed"))
        );
        assert!(docs[0].content.contains("SUMMARY"));
    }

    #[tokio::test]
    async fn test_portfolio_draft_must_be_html() {
        let drafter = FixedDrafter::new("Sorry, I cannot build a website for you.");
        let profile = Profile::example();
        let docs = generate_documents(&drafter, &profile, &request_for(&[DocumentType::PortfolioSite]))
            .await
            .expect("generate");
        assert!(matches!(docs[0].origin, DraftOrigin::Fallback { .. }));
        assert!(looks_like_html(&docs[0].content));
        assert!(docs[0].content.contains("Alex Morgan"));
    }

    #[tokio::test]
    async fn test_portfolio_fenced_block_inside_prose_is_salvaged() {
        let drafter = FixedDrafter::new(
            "Here is your site:\n```html\n<!DOCTYPE html>\n<html><body>Hi</body></html>\n```\nEnjoy!",
        );
        let profile = Profile::example();
        let docs = generate_documents(&drafter, &profile, &request_for(&[DocumentType::PortfolioSite]))
            .await
            .expect("generate");
        assert!(matches!(docs[0].origin, DraftOrigin::Model { .. }));
        assert!(docs[0].content.starts_with("<!DOCTYPE html>"));
        assert!(!docs[0].content.contains("```"));
    }

    #[tokio::test]
    async fn test_fenced_draft_is_unwrapped() {
        let drafter =
            FixedDrafter::new("```html\n<!DOCTYPE html>\n<html><body>Hi</body></html>\n```");
        let profile = Profile::example();
        let docs = generate_documents(&drafter, &profile, &request_for(&[DocumentType::PortfolioSite]))
            .await
            .expect("generate");
        assert!(matches!(docs[0].origin, DraftOrigin::Model { .. }));
        assert!(docs[0].content.starts_with("<!DOCTYPE html>"));
        assert!(!docs[0].content.contains("```"));
    }

    #[tokio::test]
    async fn test_example_round_trip_renders_every_type() {
        use crate::models::document::ArtifactFormat;
        use crate::render::render_document;

        let profile = Profile::example();
        let request = request_for(&DocumentType::ALL);
        let docs = generate_documents(&FailingDrafter, &profile, &request)
            .await
            .expect("generate");
        assert_eq!(docs.len(), DocumentType::ALL.len());

        for doc in &docs {
            let format = match doc.doc_type {
                DocumentType::PortfolioSite => ArtifactFormat::Html,
                _ => ArtifactFormat::Pdf,
            };
            let artifact = render_document(doc, &profile, format).expect("render");
            assert!(!artifact.bytes.is_empty(), "{:?} artifact is empty", doc.doc_type);
        }

        let portfolio = docs
            .iter()
            .find(|d| d.doc_type == DocumentType::PortfolioSite)
            .expect("portfolio");
        for needle in [
            "Alex Morgan",
            "University of Washington",
            "Harborline Logistics",
            "Rust",
        ] {
            assert!(
                portfolio.content.contains(needle),
                "portfolio should include {needle}"
            );
        }
    }

    #[tokio::test]
    async fn test_draft_content_is_trimmed() {
        let drafter = FixedDrafter::new("\n\nSUMMARY\n- Rust\n\n");
        let profile = Profile::example();
        let docs = generate_documents(&drafter, &profile, &request_for(&[DocumentType::AtsResume]))
            .await
            .expect("generate");
        assert_eq!(docs[0].content, "SUMMARY\n- Rust");
    }
}

//! Deterministic drafts for when no usable model draft is available.
//!
//! Every document type has a pure builder here that works from the profile
//! alone, so generation always yields a complete document even when every
//! model in the chain is down. The output follows the same shape the
//! drafting prompts ask for: ATS resumes are plain sections with `- `
//! bullets, human resumes are narrative paragraphs, cover letters are body
//! paragraphs without the letter frame, and the portfolio is a full HTML
//! page.

use crate::generate::prompts::TargetContext;
use crate::models::document::DocumentType;
use crate::models::profile::Profile;
use crate::render::html;

/// Builds the deterministic draft for one document type.
pub fn build_fallback(doc_type: DocumentType, profile: &Profile, target: &TargetContext) -> String {
    match doc_type {
        DocumentType::AtsResume => ats_fallback(profile),
        DocumentType::HumanResume => human_fallback(profile),
        DocumentType::CoverLetter => cover_letter_fallback(profile, target),
        DocumentType::PortfolioSite => html::portfolio_page(profile),
    }
}

/// Sectioned plain-text resume. No name or contact header; the renderer
/// adds those. Entries keep their profile order and skills appear verbatim
/// so keyword scans still hit.
fn ats_fallback(profile: &Profile) -> String {
    let mut out = String::new();

    let summary = profile.summary.as_deref().unwrap_or("").trim();
    if !summary.is_empty() {
        out.push_str("SUMMARY\n");
        out.push_str(summary);
        out.push('\n');
    }

    if !profile.skills.is_empty() {
        push_section_gap(&mut out);
        out.push_str("SKILLS\n");
        for skill in &profile.skills {
            out.push_str("- ");
            out.push_str(skill.trim());
            out.push('\n');
        }
    }

    if !profile.experience.is_empty() {
        push_section_gap(&mut out);
        out.push_str("EXPERIENCE\n");
        for entry in &profile.experience {
            out.push_str("- ");
            out.push_str(&entry.display_line());
            out.push('\n');
        }
    }

    if !profile.education.is_empty() {
        push_section_gap(&mut out);
        out.push_str("EDUCATION\n");
        for entry in &profile.education {
            out.push_str("- ");
            out.push_str(&entry.display_line());
            out.push('\n');
        }
    }

    if out.is_empty() {
        out = format!("SUMMARY\nCandidate profile for {}.\n", profile.contact.name.trim());
    }
    out
}

/// Narrative resume built from the same facts, one paragraph per section.
fn human_fallback(profile: &Profile) -> String {
    let name = profile.contact.name.trim();
    let mut paragraphs: Vec<String> = Vec::new();

    let summary = profile.summary.as_deref().unwrap_or("").trim();
    if summary.is_empty() {
        paragraphs.push(format!(
            "{name} is a motivated professional looking to bring their experience to a new role."
        ));
    } else {
        paragraphs.push(summary.to_string());
    }

    if !profile.experience.is_empty() {
        let mut para = String::new();
        for (i, entry) in profile.experience.iter().enumerate() {
            if i == 0 {
                para.push_str("Most recently, ");
            } else {
                para.push_str(" Before that, ");
            }
            para.push_str(&sentence(&entry.display_line()));
        }
        paragraphs.push(para);
    }

    if !profile.education.is_empty() {
        let lines: Vec<String> = profile.education.iter().map(|e| e.display_line()).collect();
        paragraphs.push(format!("Their education includes {}.", join_naturally(&lines)));
    }

    if !profile.skills.is_empty() {
        paragraphs.push(format!(
            "Their toolkit covers {}.",
            join_naturally(&profile.skills)
        ));
    }

    paragraphs.join("\n\n")
}

/// Cover letter body paragraphs. The salutation and signature are the
/// renderer's job, so they are deliberately absent here.
fn cover_letter_fallback(profile: &Profile, target: &TargetContext) -> String {
    let mut paragraphs: Vec<String> = Vec::new();

    paragraphs.push(format!(
        "I am writing to apply for {} at {}. My background aligns well with what you are looking for, and I would be glad to bring it to your team.",
        target.position, target.company
    ));

    if let Some(entry) = profile.experience.first() {
        paragraphs.push(format!(
            "Most recently, {} This experience taught me how to deliver dependable results and collaborate across teams.",
            sentence(&entry.display_line())
        ));
    } else if let Some(summary) = profile.summary.as_deref().map(str::trim) {
        if !summary.is_empty() {
            paragraphs.push(summary.to_string());
        }
    }

    if !profile.skills.is_empty() {
        let top: Vec<String> = profile.skills.iter().take(5).cloned().collect();
        paragraphs.push(format!(
            "I bring hands-on experience with {}.",
            join_naturally(&top)
        ));
    }

    paragraphs.push(
        "I would welcome the opportunity to discuss how I can contribute, and I appreciate your consideration.".to_string(),
    );
    paragraphs.join("\n\n")
}

fn push_section_gap(out: &mut String) {
    if !out.is_empty() {
        out.push('\n');
    }
}

/// Ensures a display line reads as a sentence when embedded in prose.
fn sentence(line: &str) -> String {
    let trimmed = line.trim_end();
    if trimmed.ends_with('.') {
        trimmed.to_string()
    } else {
        format!("{trimmed}.")
    }
}

/// `a` / `a and b` / `a, b, and c`.
fn join_naturally(items: &[String]) -> String {
    match items.len() {
        0 => String::new(),
        1 => items[0].clone(),
        2 => format!("{} and {}", items[0], items[1]),
        _ => {
            let head = &items[..items.len() - 1];
            format!("{}, and {}", head.join(", "), items[items.len() - 1])
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

//! Prompt construction for every drafting intent.
//!
//! Templates are consts with `{placeholder}` slots; the build functions fill
//! them from the profile and return ready `DraftRequest`s, including the
//! sampling temperature for the intent.

use crate::generate::drafter::DraftRequest;
use crate::models::document::{DocumentType, GenerationRequest};
use crate::models::profile::Profile;

/// Temperature used for profile extraction from raw resume text.
pub const EXTRACT_TEMPERATURE: f32 = 0.3;

/// Sampling temperature per document intent. Keyword-exact ATS output runs
/// coldest; the portfolio, where layout creativity helps, runs warmest.
pub fn temperature_for(doc_type: DocumentType) -> f32 {
    match doc_type {
        DocumentType::AtsResume => 0.2,
        DocumentType::HumanResume => 0.4,
        DocumentType::CoverLetter => 0.5,
        DocumentType::PortfolioSite => 0.6,
    }
}

/// System prompt for profile extraction; enforces JSON-only output.
pub const EXTRACT_SYSTEM: &str =
    "You are an expert resume analyst. Extract structured career information \
    from raw resume text. You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT invent information that is not present in the text.";

/// Extraction prompt template. Replace `{resume_text}` before sending.
pub const EXTRACT_PROMPT_TEMPLATE: &str = r#"Extract career information from the resume text below.

Return a JSON object with this EXACT schema (use "" or [] for anything absent):
{
  "name": "",
  "email": "",
  "phone": "",
  "linkedin": "",
  "github": "",
  "summary": "",
  "education": [
    {"institution": "", "degree": "", "start_date": "", "end_date": "", "description": ""}
  ],
  "experience": [
    {"organization": "", "role": "", "start_date": "", "end_date": "", "description": ""}
  ],
  "skills": [],
  "target_job": "",
  "company": "",
  "position": ""
}

Rules:
- Keep education and experience entries in the order they appear in the text.
- Dates are free-form strings exactly as written ("2019", "Mar 2021", "Present").
- skills is a flat list of short skill names.
- Use only facts present in the text.

RESUME TEXT:
{resume_text}"#;

/// Shared system prompt for document drafting.
pub const DOCUMENT_SYSTEM: &str =
    "You are an expert career-document writer. You draft resumes, cover \
    letters, and portfolio pages strictly from the candidate profile you are \
    given. Never invent employers, dates, degrees, or skills that are not in \
    the profile.";

/// ATS resume prompt. Replace `{profile}` and `{job_description}`.
pub const ATS_RESUME_PROMPT_TEMPLATE: &str = r#"Write an ATS-optimized resume from the candidate profile below.

Output format rules:
- Plain text only. No markdown, no tables, no columns.
- Section headings in ALL CAPS on their own line: SUMMARY, SKILLS, EXPERIENCE, EDUCATION.
- Bullet lines start with "- ".
- Do NOT include the candidate's name or contact line; the document header is added separately.
- Use the profile's skill names verbatim so keyword scanners match them.
- Keep experience and education entries in exactly the order given in the profile.

TARGET ROLE CONTEXT (optimize keywords for this if provided):
{job_description}

CANDIDATE PROFILE:
{profile}"#;

/// Narrative resume prompt. Replace `{profile}`.
pub const HUMAN_RESUME_PROMPT_TEMPLATE: &str = r#"Write a resume meant for human readers from the candidate profile below.

Output format rules:
- Plain text: section headings in ALL CAPS, short narrative paragraphs under each.
- Favor readable phrasing over keyword density; show the arc of the career.
- Do NOT include the candidate's name or contact line; the document header is added separately.
- Keep experience and education entries in exactly the order given in the profile.

CANDIDATE PROFILE:
{profile}"#;

/// Cover letter prompt. Replace `{profile}`, `{company}`, `{position}`,
/// `{job_description}`.
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"Write the body of a cover letter for the candidate below, applying to {company} for the {position} position.

Output format rules:
- Three to four short paragraphs of plain text.
- Do NOT include the salutation or the signature; those are added separately.
- Ground every claim in the candidate profile. Mention the company by name.

TARGET ROLE CONTEXT:
{job_description}

CANDIDATE PROFILE:
{profile}"#;

/// Portfolio site prompt. Replace `{profile}`.
pub const PORTFOLIO_PROMPT_TEMPLATE: &str = r#"Create a single-file portfolio web page for the candidate below.

Output format rules:
- Return ONLY a complete HTML5 document: <!DOCTYPE html> through </html>.
- All CSS inline in a <style> block. No external assets, scripts, or fonts.
- Include a section for every part of the profile that has content
  (about, education, experience, skills, contact), in that order.
- Keep entries within each section in exactly the order given in the profile.

CANDIDATE PROFILE:
{profile}"#;

/// Targeting context resolved from the request and the profile, with
/// generic stand-ins when neither provides a value.
#[derive(Debug, Clone)]
pub struct TargetContext {
    pub company: String,
    pub position: String,
    pub job_description: String,
}

/// Request overrides win over the profile's target role; blanks fall back
/// to neutral phrasing so the cover letter template always fills.
pub fn resolve_target(profile: &Profile, request: &GenerationRequest) -> TargetContext {
    let target = profile.target_role.as_ref();
    let pick = |primary: &Option<String>, secondary: Option<&String>| -> Option<String> {
        primary
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .or_else(|| {
                secondary
                    .map(|s| s.trim())
                    .filter(|s| !s.is_empty())
                    .map(String::from)
            })
    };

    TargetContext {
        company: pick(
            &request.company,
            target.and_then(|t| t.company.as_ref()),
        )
        .unwrap_or_else(|| "the company".to_string()),
        position: pick(
            &request.position,
            target.and_then(|t| t.position.as_ref()),
        )
        .unwrap_or_else(|| "the role".to_string()),
        job_description: target
            .and_then(|t| t.job_description.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("(not provided)")
            .to_string(),
    }
}

/// Serializes the profile into the labeled block the prompts consume.
/// Entry order is preserved verbatim; models are told to keep it.
pub fn profile_block(profile: &Profile) -> String {
    let mut block = String::new();
    let c = &profile.contact;
    block.push_str(&format!("NAME: {}\n", c.name.trim()));
    if !c.email.trim().is_empty() {
        block.push_str(&format!("EMAIL: {}\n", c.email.trim()));
    }
    if !c.phone.trim().is_empty() {
        block.push_str(&format!("PHONE: {}\n", c.phone.trim()));
    }
    if !c.linkedin.trim().is_empty() {
        block.push_str(&format!("LINKEDIN: {}\n", c.linkedin.trim()));
    }
    if !c.github.trim().is_empty() {
        block.push_str(&format!("GITHUB: {}\n", c.github.trim()));
    }

    if let Some(summary) = profile.summary.as_deref().map(str::trim) {
        if !summary.is_empty() {
            block.push_str("\nSUMMARY:\n");
            block.push_str(summary);
            block.push('\n');
        }
    }

    if !profile.experience.is_empty() {
        block.push_str("\nEXPERIENCE (in order):\n");
        for entry in &profile.experience {
            block.push_str(&format!("- {}\n", entry.display_line()));
        }
    }

    if !profile.education.is_empty() {
        block.push_str("\nEDUCATION (in order):\n");
        for entry in &profile.education {
            block.push_str(&format!("- {}\n", entry.display_line()));
        }
    }

    if !profile.skills.is_empty() {
        block.push_str("\nSKILLS: ");
        block.push_str(&profile.skills.join(", "));
        block.push('\n');
    }

    block
}

/// Builds the drafting request for one document type.
pub fn build_document_request(
    doc_type: DocumentType,
    profile: &Profile,
    target: &TargetContext,
) -> DraftRequest {
    let profile_text = profile_block(profile);
    let prompt = match doc_type {
        DocumentType::AtsResume => ATS_RESUME_PROMPT_TEMPLATE
            .replace("{job_description}", &target.job_description)
            .replace("{profile}", &profile_text),
        DocumentType::HumanResume => HUMAN_RESUME_PROMPT_TEMPLATE.replace("{profile}", &profile_text),
        DocumentType::CoverLetter => COVER_LETTER_PROMPT_TEMPLATE
            .replace("{company}", &target.company)
            .replace("{position}", &target.position)
            .replace("{job_description}", &target.job_description)
            .replace("{profile}", &profile_text),
        DocumentType::PortfolioSite => PORTFOLIO_PROMPT_TEMPLATE.replace("{profile}", &profile_text),
    };

    DraftRequest {
        system: DOCUMENT_SYSTEM.to_string(),
        prompt,
        temperature: temperature_for(doc_type),
    }
}

/// Builds the extraction request for raw resume text (already clipped by
/// the caller).
pub fn build_extraction_request(resume_text: &str) -> DraftRequest {
    DraftRequest {
        system: EXTRACT_SYSTEM.to_string(),
        prompt: EXTRACT_PROMPT_TEMPLATE.replace("{resume_text}", resume_text),
        temperature: EXTRACT_TEMPERATURE,
    }
}

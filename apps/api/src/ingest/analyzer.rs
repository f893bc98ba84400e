//! Two-tier profile analysis.
//!
//! Tier one is local and always runs: the structured `key: value` field
//! parser, with the heuristic free-form pass filling whatever it left
//! blank. Tier two is optional: a model extraction call whose JSON result,
//! when usable, takes precedence while the local result fills its gaps.
//! Analysis never hard-fails; a broken extraction degrades to tier one
//! with a warning attached.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::generate::drafter::{strip_fences, Drafter};
use crate::generate::prompts::build_extraction_request;
use crate::ingest::extract::clip_for_analysis;
use crate::ingest::fields::{parse_field_lines, FieldParseOutcome};
use crate::ingest::heuristics::heuristic_profile;
use crate::models::profile::{ContactInfo, EducationEntry, ExperienceEntry, Profile, TargetRole};

/// Which tier produced the final profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileSource {
    Parser,
    Model,
}

/// Result of analyzing raw resume text.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub profile: Profile,
    pub warnings: Vec<String>,
    pub source: ProfileSource,
}

/// Local analysis: structured field lines first, heuristics fill the gaps.
pub fn parse_text(text: &str) -> AnalysisOutcome {
    let FieldParseOutcome {
        profile: mut merged,
        matched_lines,
        mut warnings,
    } = parse_field_lines(text);

    let heuristic = heuristic_profile(text);
    merge_missing(&mut merged, &heuristic);
    debug!(matched_lines, "structured field pass finished");

    if profile_is_empty(&merged) {
        warnings.push("no recognizable resume content was found".to_string());
    }
    AnalysisOutcome {
        profile: merged,
        warnings,
        source: ProfileSource::Parser,
    }
}

/// Local analysis plus a model extraction pass on top.
///
/// The extraction's fields win where present; the local result fills the
/// rest. Any drafting or JSON failure keeps the local result and appends a
/// warning instead of failing the ingest.
pub async fn parse_text_with_model(drafter: &dyn Drafter, text: &str) -> AnalysisOutcome {
    let mut base = parse_text(text);
    let request = build_extraction_request(clip_for_analysis(text));

    match drafter.draft(&request).await {
        Ok(draft) => match parse_extraction(&draft.content) {
            Ok(payload) => {
                let mut profile = payload.into_profile();
                merge_missing(&mut profile, &base.profile);
                AnalysisOutcome {
                    profile,
                    warnings: base.warnings,
                    source: ProfileSource::Model,
                }
            }
            Err(err) => {
                warn!(error = %err, model = %draft.model, "extraction JSON unusable, keeping parser result");
                base.warnings
                    .push("model extraction failed; results come from the local parser".to_string());
                base
            }
        },
        Err(err) => {
            warn!(error = %err, "model extraction unavailable, keeping parser result");
            base.warnings
                .push("model extraction failed; results come from the local parser".to_string());
            base
        }
    }
}

/// Copies `fill` into `dst` wherever `dst` is blank. Lists are taken whole
/// only when `dst`'s list is empty, so the two tiers never interleave
/// entries.
pub fn merge_missing(dst: &mut Profile, fill: &Profile) {
    merge_scalar(&mut dst.contact.name, &fill.contact.name);
    merge_scalar(&mut dst.contact.email, &fill.contact.email);
    merge_scalar(&mut dst.contact.phone, &fill.contact.phone);
    merge_scalar(&mut dst.contact.linkedin, &fill.contact.linkedin);
    merge_scalar(&mut dst.contact.github, &fill.contact.github);

    if blank_opt(&dst.summary) && !blank_opt(&fill.summary) {
        dst.summary = fill.summary.clone();
    }
    if dst.education.is_empty() && !fill.education.is_empty() {
        dst.education = fill.education.clone();
    }
    if dst.experience.is_empty() && !fill.experience.is_empty() {
        dst.experience = fill.experience.clone();
    }
    if dst.skills.is_empty() && !fill.skills.is_empty() {
        dst.skills = fill.skills.clone();
    }
    if dst.target_role.is_none() {
        dst.target_role = fill.target_role.clone();
    }
}

fn merge_scalar(dst: &mut String, fill: &str) {
    if dst.trim().is_empty() && !fill.trim().is_empty() {
        *dst = fill.to_string();
    }
}

fn blank_opt(value: &Option<String>) -> bool {
    value.as_deref().map(str::trim).unwrap_or("").is_empty()
}

fn profile_is_empty(profile: &Profile) -> bool {
    profile.contact.name.trim().is_empty()
        && profile.contact.email.trim().is_empty()
        && profile.contact.phone.trim().is_empty()
        && blank_opt(&profile.summary)
        && profile.education.is_empty()
        && profile.experience.is_empty()
        && profile.skills.is_empty()
}

// ────────────────────────────────────────────────────────────────────────────
// Extraction payload
// ────────────────────────────────────────────────────────────────────────────

/// Wire shape of the extraction response. Scalars are `Option` so that
/// models emitting `null` instead of `""` still deserialize.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ExtractedPayload {
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    linkedin: Option<String>,
    github: Option<String>,
    summary: Option<String>,
    education: Option<Vec<EducationEntry>>,
    experience: Option<Vec<ExperienceEntry>>,
    skills: Option<Vec<String>>,
    target_job: Option<String>,
    company: Option<String>,
    position: Option<String>,
}

impl ExtractedPayload {
    fn into_profile(self) -> Profile {
        let target_role = TargetRole {
            job_description: clean_opt(self.target_job),
            company: clean_opt(self.company),
            position: clean_opt(self.position),
        };
        Profile {
            contact: ContactInfo {
                name: clean(self.name),
                email: clean(self.email),
                phone: clean(self.phone),
                linkedin: clean(self.linkedin),
                github: clean(self.github),
            },
            summary: clean_opt(self.summary),
            education: drop_empty_education(self.education.unwrap_or_default()),
            experience: drop_empty_experience(self.experience.unwrap_or_default()),
            skills: self
                .skills
                .unwrap_or_default()
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            target_role: if target_role.is_empty() {
                None
            } else {
                Some(target_role)
            },
        }
    }
}

fn parse_extraction(raw: &str) -> Result<ExtractedPayload, serde_json::Error> {
    serde_json::from_str(strip_fences(raw).trim())
}

fn clean(value: Option<String>) -> String {
    value.as_deref().map(str::trim).unwrap_or("").to_string()
}

fn clean_opt(value: Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

fn drop_empty_education(entries: Vec<EducationEntry>) -> Vec<EducationEntry> {
    entries
        .into_iter()
        .filter(|e| !e.institution.trim().is_empty() || !e.degree.trim().is_empty())
        .collect()
}

fn drop_empty_experience(entries: Vec<ExperienceEntry>) -> Vec<ExperienceEntry> {
    entries
        .into_iter()
        .filter(|e| !e.organization.trim().is_empty() || !e.role.trim().is_empty())
        .collect()
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
                last: "timed out".to_string(),
            })
        }
    }

    const STRUCTURED: &str = "Name: Jordan Lee\nEmail: jordan@lee.dev\nSkills: Rust, SQL";

    const FREEFORM: &str = "Priya Raman\npriya.raman@example.org | +1 212 555 0147\n\n\
                            SUMMARY\nData engineer who enjoys boring, reliable systems.\n\n\
                            SKILLS\nPython, Spark, Airflow";

    #[test]
    fn test_parse_text_structured_fields_win() {
        let outcome = parse_text(STRUCTURED);
        assert_eq!(outcome.source, ProfileSource::Parser);
        assert_eq!(outcome.profile.contact.name, "Jordan Lee");
        assert_eq!(outcome.profile.contact.email, "jordan@lee.dev");
        assert_eq!(outcome.profile.skills, vec!["Rust", "SQL"]);
    }

    #[test]
    fn test_parse_text_heuristics_fill_freeform_text() {
        let outcome = parse_text(FREEFORM);
        assert_eq!(outcome.profile.contact.name, "Priya Raman");
        assert_eq!(outcome.profile.contact.email, "priya.raman@example.org");
        assert!(outcome.profile.summary.is_some());
        assert!(outcome.profile.skills.contains(&"Spark".to_string()));
    }

    #[test]
    fn test_parse_text_field_lines_beat_heuristics() {
        // First line would be the heuristic name guess; the labeled line wins.
        let text = "Resume of a Backend Engineer\nName: Casey Fox\ncasey@fox.io";
        let outcome = parse_text(text);
        assert_eq!(outcome.profile.contact.name, "Casey Fox");
        assert_eq!(outcome.profile.contact.email, "casey@fox.io");
    }

    #[test]
    fn test_parse_text_empty_input_warns() {
        let outcome = parse_text("");
        assert!(outcome
            .warnings
            .iter()
            .any(|w| w.contains("no recognizable resume content")));
        assert_eq!(outcome.profile, Profile::default());
    }

    #[tokio::test]
    async fn test_model_extraction_wins_and_parser_fills_gaps() {
        // Model knows the name and summary but not the phone; the local
        // pass still sees the phone line.
        let drafter = FixedDrafter {
            content: r#"```json
{"name": "Priya R. Raman", "summary": "Data engineer.", "skills": ["Python"]}
```"#
                .to_string(),
        };
        let outcome = parse_text_with_model(&drafter, FREEFORM).await;
        assert_eq!(outcome.source, ProfileSource::Model);
        assert_eq!(outcome.profile.contact.name, "Priya R. Raman");
        assert_eq!(outcome.profile.summary.as_deref(), Some("Data engineer."));
        assert_eq!(outcome.profile.skills, vec!["Python"]);
        assert_eq!(
            outcome.profile.contact.phone, "+1 212 555 0147",
            "parser result should fill fields the model omitted"
        );
    }

    #[tokio::test]
    async fn test_malformed_extraction_keeps_parser_result() {
        let drafter = FixedDrafter {
            content: "I could not produce JSON, sorry.".to_string(),
        };
        let outcome = parse_text_with_model(&drafter, FREEFORM).await;
        assert_eq!(outcome.source, ProfileSource::Parser);
        assert_eq!(outcome.profile.contact.name, "Priya Raman");
        assert!(outcome
            .warnings
            .iter()
            .any(|w| w.contains("model extraction failed")));
    }

    #[tokio::test]
    async fn test_drafter_failure_keeps_parser_result() {
        let outcome = parse_text_with_model(&FailingDrafter, FREEFORM).await;
        assert_eq!(outcome.source, ProfileSource::Parser);
        assert!(outcome
            .warnings
            .iter()
            .any(|w| w.contains("model extraction failed")));
    }

    #[test]
    fn test_extraction_payload_tolerates_nulls() {
        let payload = parse_extraction(
            r#"{"name": "Kim Soto", "phone": null, "education": null, "skills": [" Rust ", ""]}"#,
        )
        .expect("parse");
        let profile = payload.into_profile();
        assert_eq!(profile.contact.name, "Kim Soto");
        assert_eq!(profile.contact.phone, "");
        assert!(profile.education.is_empty());
        assert_eq!(profile.skills, vec!["Rust"]);
    }

    #[test]
    fn test_extraction_payload_builds_target_role() {
        let payload = parse_extraction(
            r#"{"name": "Kim", "target_job": "Build data platforms", "company": "Acme", "position": ""}"#,
        )
        .expect("parse");
        let profile = payload.into_profile();
        let target = profile.target_role.expect("target role");
        assert_eq!(target.job_description.as_deref(), Some("Build data platforms"));
        assert_eq!(target.company.as_deref(), Some("Acme"));
        assert!(target.position.is_none());

        let empty = parse_extraction(r#"{"name": "Kim"}"#).expect("parse");
        assert!(empty.into_profile().target_role.is_none());
    }

    #[test]
    fn test_extraction_drops_hollow_entries() {
        let payload = parse_extraction(
            r#"{"experience": [
                {"organization": "Acme", "role": "Engineer"},
                {"organization": "", "role": "", "description": "orphan text"}
            ]}"#,
        )
        .expect("parse");
        let profile = payload.into_profile();
        assert_eq!(profile.experience.len(), 1);
        assert_eq!(profile.experience[0].organization, "Acme");
    }

    #[test]
    fn test_merge_missing_never_overwrites() {
        let mut dst = Profile::example();
        let original_name = dst.contact.name.clone();
        let mut fill = Profile::default();
        fill.contact.name = "Someone Else".to_string();
        fill.contact.github = "github.com/someone".to_string();
        merge_missing(&mut dst, &fill);
        assert_eq!(dst.contact.name, original_name);
        assert_eq!(
            dst.contact.github, "github.com/alexmorgan",
            "existing github should be kept"
        );
    }
}

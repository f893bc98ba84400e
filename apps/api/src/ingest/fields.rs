//! Line-oriented `key: value` parser for pasted profile text.
//!
//! This is the first parsing tier: it only consumes lines that carry an
//! explicit field label. Free-form text is left for the heuristic scan.

use crate::ingest::heuristics;
use crate::models::profile::{Profile, TargetRole};

#[derive(Debug, Clone)]
pub struct FieldParseOutcome {
    pub profile: Profile,
    /// Number of lines consumed as labeled fields.
    pub matched_lines: usize,
    /// Labeled lines whose key was not recognized. Dropped, never fatal.
    pub warnings: Vec<String>,
}

/// Parses `key: value` lines into a partial profile.
///
/// Only the first `:` splits; later colons belong to the value. Keys are
/// matched case-insensitively against the alias table below. Lines without
/// a colon are ignored here. Repeated scalar keys follow last-wins
/// semantics; list keys (skills, education, experience) accumulate.
pub fn parse_field_lines(text: &str) -> FieldParseOutcome {
    let mut profile = Profile::default();
    let mut target = TargetRole::default();
    let mut matched_lines = 0;
    let mut warnings = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        let Some((raw_key, raw_value)) = line.split_once(':') else {
            continue;
        };
        let key = raw_key.trim().to_lowercase();
        let value = raw_value.trim();
        if value.is_empty() {
            continue;
        }

        match key.as_str() {
            "name" | "full name" => profile.contact.name = value.to_string(),
            "email" | "e-mail" | "mail" => profile.contact.email = value.to_string(),
            "phone" | "mobile" | "contact" => profile.contact.phone = value.to_string(),
            "linkedin" => profile.contact.linkedin = value.to_string(),
            "github" => profile.contact.github = value.to_string(),
            "summary" | "about" | "objective" | "profile" => {
                profile.summary = Some(value.to_string())
            }
            "skills" | "technologies" | "tech stack" => {
                profile.skills.extend(split_list(value));
            }
            "education" | "degree" | "university" => {
                profile
                    .education
                    .push(heuristics::education_entry_from_line(value));
            }
            "experience" | "work experience" | "employment" => {
                profile
                    .experience
                    .push(heuristics::experience_entry_from_line(value));
            }
            "target job" | "job description" | "role" => {
                target.job_description = Some(value.to_string())
            }
            "company" | "employer" => target.company = Some(value.to_string()),
            "position" | "title" => target.position = Some(value.to_string()),
            other => {
                if looks_like_field_label(other) {
                    warnings.push(format!("Unrecognized field '{other}' was skipped"));
                    continue;
                }
                // A colon inside prose, not a field label.
                continue;
            }
        }
        matched_lines += 1;
    }

    if !target.is_empty() {
        profile.target_role = Some(target);
    }

    FieldParseOutcome {
        profile,
        matched_lines,
        warnings,
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split([',', ';'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Short, digit-free keys are treated as intended field labels (and warned
/// about when unknown); anything longer is prose that happens to contain
/// a colon.
fn looks_like_field_label(key: &str) -> bool {
    key.len() <= 30 && !key.is_empty() && !key.chars().any(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_contact_fields() {
        let out = parse_field_lines("Name: Jane Doe\nEmail: jane@doe.dev\nPhone: 555-0100");
        assert_eq!(out.profile.contact.name, "Jane Doe");
        assert_eq!(out.profile.contact.email, "jane@doe.dev");
        assert_eq!(out.profile.contact.phone, "555-0100");
        assert_eq!(out.matched_lines, 3);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_key_aliases() {
        let out = parse_field_lines("Full Name: Jane\nE-mail: j@d.dev\nMobile: 1\nAbout: hi");
        assert_eq!(out.profile.contact.name, "Jane");
        assert_eq!(out.profile.contact.email, "j@d.dev");
        assert_eq!(out.profile.contact.phone, "1");
        assert_eq!(out.profile.summary.as_deref(), Some("hi"));
    }

    #[test]
    fn test_only_first_colon_splits() {
        let out = parse_field_lines("LinkedIn: https://linkedin.com/in/jane");
        assert_eq!(out.profile.contact.linkedin, "https://linkedin.com/in/jane");
    }

    #[test]
    fn test_skills_comma_split() {
        let out = parse_field_lines("Skills: Rust, Python,  SQL ;Go");
        assert_eq!(out.profile.skills, vec!["Rust", "Python", "SQL", "Go"]);
    }

    #[test]
    fn test_skills_accumulate_across_lines() {
        let out = parse_field_lines("Skills: Rust\nSkills: Python");
        assert_eq!(out.profile.skills, vec!["Rust", "Python"]);
    }

    #[test]
    fn test_education_value_with_degree_and_dates() {
        let out = parse_field_lines("Education: B.S. Computer Science - MIT (2014-2018)");
        let entry = &out.profile.education[0];
        assert_eq!(entry.degree, "B.S. Computer Science");
        assert_eq!(entry.institution, "MIT");
        assert_eq!(entry.start_date.as_deref(), Some("2014"));
        assert_eq!(entry.end_date.as_deref(), Some("2018"));
    }

    #[test]
    fn test_experience_role_at_organization() {
        let out = parse_field_lines("Experience: Senior Engineer at Acme Corp (2020-2023)");
        let entry = &out.profile.experience[0];
        assert_eq!(entry.role, "Senior Engineer");
        assert_eq!(entry.organization, "Acme Corp");
        assert_eq!(entry.start_date.as_deref(), Some("2020"));
        assert_eq!(entry.end_date.as_deref(), Some("2023"));
    }

    #[test]
    fn test_entries_preserve_input_order() {
        let out = parse_field_lines("Experience: A at X\nExperience: B at Y\nExperience: C at Z");
        let orgs: Vec<_> = out
            .profile
            .experience
            .iter()
            .map(|e| e.organization.as_str())
            .collect();
        assert_eq!(orgs, vec!["X", "Y", "Z"]);
    }

    #[test]
    fn test_target_role_fields() {
        let out = parse_field_lines("Company: Acme\nPosition: Staff Engineer");
        let target = out.profile.target_role.expect("target role set");
        assert_eq!(target.company.as_deref(), Some("Acme"));
        assert_eq!(target.position.as_deref(), Some("Staff Engineer"));
    }

    #[test]
    fn test_unknown_label_warns_and_skips() {
        let out = parse_field_lines("Hobbies: chess");
        assert!(out.profile.skills.is_empty());
        assert_eq!(out.matched_lines, 0);
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].contains("hobbies"));
    }

    #[test]
    fn test_prose_with_colon_is_ignored_silently() {
        let long = "In 2020 I did the following at scale: shipped a platform rewrite";
        let out = parse_field_lines(long);
        assert_eq!(out.matched_lines, 0);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_empty_values_ignored() {
        let out = parse_field_lines("Name:\nEmail:   ");
        assert!(out.profile.contact.name.is_empty());
        assert_eq!(out.matched_lines, 0);
    }

    #[test]
    fn test_scalar_fields_last_wins() {
        let out = parse_field_lines("Name: First\nName: Second");
        assert_eq!(out.profile.contact.name, "Second");
    }
}

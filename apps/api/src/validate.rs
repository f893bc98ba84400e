//! Required-field validation. Generation is refused until a profile passes.

use serde::{Deserialize, Serialize};

use crate::models::profile::Profile;

pub const FIELD_NAME: &str = "name";
pub const FIELD_CONTACT: &str = "contact";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub passed: bool,
    /// Missing required fields, in declaration order. Empty when passed.
    pub missing: Vec<String>,
}

/// Validates a profile against the required-field rules.
///
/// PASS conditions:
/// - `name` is non-blank
/// - at least one contact method (email or phone) is non-blank
///
/// Everything else is optional. Pure function: the same profile always
/// yields the same report, with missing fields in a stable order
/// (`name` before `contact`).
pub fn validate_profile(profile: &Profile) -> ValidationReport {
    let mut missing = Vec::new();

    if profile.contact.name.trim().is_empty() {
        missing.push(FIELD_NAME.to_string());
    }

    let has_contact_method =
        !profile.contact.email.trim().is_empty() || !profile.contact.phone.trim().is_empty();
    if !has_contact_method {
        missing.push(FIELD_CONTACT.to_string());
    }

    ValidationReport {
        passed: missing.is_empty(),
        missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::ContactInfo;

    fn profile_with_contact(name: &str, email: &str, phone: &str) -> Profile {
        Profile {
            contact: ContactInfo {
                name: name.to_string(),
                email: email.to_string(),
                phone: phone.to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_pass_with_name_and_email() {
        let r = validate_profile(&profile_with_contact("Jane Doe", "jane@doe.dev", ""));
        assert!(r.passed);
        assert!(r.missing.is_empty());
    }

    #[test]
    fn test_pass_with_name_and_phone_only() {
        let r = validate_profile(&profile_with_contact("Jane Doe", "", "+44 20 7946 0958"));
        assert!(r.passed);
    }

    #[test]
    fn test_missing_name_reports_exactly_name() {
        let r = validate_profile(&profile_with_contact("", "jane@doe.dev", ""));
        assert!(!r.passed);
        assert_eq!(r.missing, vec![FIELD_NAME.to_string()]);
    }

    #[test]
    fn test_whitespace_name_counts_as_missing() {
        let r = validate_profile(&profile_with_contact("   ", "jane@doe.dev", ""));
        assert_eq!(r.missing, vec![FIELD_NAME.to_string()]);
    }

    #[test]
    fn test_missing_contact_method_reports_contact() {
        let r = validate_profile(&profile_with_contact("Jane Doe", "", ""));
        assert!(!r.passed);
        assert_eq!(r.missing, vec![FIELD_CONTACT.to_string()]);
    }

    #[test]
    fn test_empty_profile_reports_both_in_order() {
        let r = validate_profile(&Profile::default());
        assert!(!r.passed);
        assert_eq!(
            r.missing,
            vec![FIELD_NAME.to_string(), FIELD_CONTACT.to_string()]
        );
    }

    #[test]
    fn test_linkedin_alone_is_not_a_contact_method() {
        let mut p = profile_with_contact("Jane Doe", "", "");
        p.contact.linkedin = "linkedin.com/in/janedoe".to_string();
        let r = validate_profile(&p);
        assert_eq!(r.missing, vec![FIELD_CONTACT.to_string()]);
    }

    #[test]
    fn test_optional_sections_do_not_affect_validation() {
        let p = profile_with_contact("Jane Doe", "jane@doe.dev", "");
        assert!(p.education.is_empty() && p.experience.is_empty() && p.skills.is_empty());
        assert!(validate_profile(&p).passed);
    }

    #[test]
    fn test_validation_is_deterministic() {
        let p = Profile::default();
        let first = validate_profile(&p);
        let second = validate_profile(&p);
        assert_eq!(first, second);
    }

    #[test]
    fn test_example_profile_passes() {
        assert!(validate_profile(&Profile::example()).passed);
    }
}

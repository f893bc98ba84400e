use serde::{Deserialize, Serialize};

/// Contact block of a profile. Every field is optional at the type level;
/// the validator decides which combinations are acceptable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub linkedin: String,
    #[serde(default)]
    pub github: String,
}

impl ContactInfo {
    /// Non-empty contact fields joined with " | ", in display order.
    /// Used for the contact line under the document title.
    pub fn summary_line(&self) -> String {
        [&self.email, &self.phone, &self.linkedin, &self.github]
            .iter()
            .filter(|v| !v.trim().is_empty())
            .map(|v| v.trim().to_string())
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl EducationEntry {
    /// One-line rendering: `degree, institution (start - end): description`,
    /// with absent parts omitted.
    pub fn display_line(&self) -> String {
        let mut line = match (self.degree.trim(), self.institution.trim()) {
            ("", "") => String::new(),
            (degree, "") => degree.to_string(),
            ("", institution) => institution.to_string(),
            (degree, institution) => format!("{degree}, {institution}"),
        };
        if let Some(dates) = format_date_span(&self.start_date, &self.end_date) {
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(&dates);
        }
        if let Some(desc) = self.description.as_deref().map(str::trim) {
            if !desc.is_empty() {
                line.push_str(": ");
                line.push_str(desc);
            }
        }
        line
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ExperienceEntry {
    /// One-line rendering: `role at organization (start - end): description`,
    /// with absent parts omitted.
    pub fn display_line(&self) -> String {
        let mut line = match (self.role.trim(), self.organization.trim()) {
            ("", "") => String::new(),
            (role, "") => role.to_string(),
            ("", organization) => organization.to_string(),
            (role, organization) => format!("{role} at {organization}"),
        };
        if let Some(dates) = format_date_span(&self.start_date, &self.end_date) {
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(&dates);
        }
        if let Some(desc) = self.description.as_deref().map(str::trim) {
            if !desc.is_empty() {
                line.push_str(": ");
                line.push_str(desc);
            }
        }
        line
    }
}

fn format_date_span(start: &Option<String>, end: &Option<String>) -> Option<String> {
    let start = start.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let end = end.as_deref().map(str::trim).filter(|s| !s.is_empty());
    match (start, end) {
        (Some(s), Some(e)) => Some(format!("({s} - {e})")),
        (Some(s), None) => Some(format!("({s})")),
        (None, Some(e)) => Some(format!("({e})")),
        (None, None) => None,
    }
}

/// Optional targeting context consumed by the cover letter and ATS prompts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetRole {
    #[serde(default)]
    pub job_description: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
}

impl TargetRole {
    pub fn is_empty(&self) -> bool {
        fn blank(v: &Option<String>) -> bool {
            v.as_deref().map(str::trim).unwrap_or("").is_empty()
        }
        blank(&self.job_description) && blank(&self.company) && blank(&self.position)
    }
}

/// The structured career profile: the single value that flows through
/// ingest, validation, generation, and rendering. Section order and entry
/// order within sections are user-significant and preserved end to end.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub contact: ContactInfo,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub target_role: Option<TargetRole>,
}

impl Profile {
    /// Canned profile for the demonstration mode. Bypasses parsing entirely.
    pub fn example() -> Self {
        Profile {
            contact: ContactInfo {
                name: "Alex Morgan".to_string(),
                email: "alex.morgan@example.com".to_string(),
                phone: "+1 (415) 555-0172".to_string(),
                linkedin: "linkedin.com/in/alexmorgan".to_string(),
                github: "github.com/alexmorgan".to_string(),
            },
            summary: Some(
                "Backend engineer with six years of experience building data-intensive \
                 services. Comfortable owning systems from design through operation, \
                 with a bias toward boring technology and measurable outcomes."
                    .to_string(),
            ),
            education: vec![
                EducationEntry {
                    institution: "University of Washington".to_string(),
                    degree: "B.S. Computer Science".to_string(),
                    start_date: Some("2014".to_string()),
                    end_date: Some("2018".to_string()),
                    description: Some("Focus on distributed systems and databases.".to_string()),
                },
                EducationEntry {
                    institution: "Coursera".to_string(),
                    degree: "Machine Learning Specialization".to_string(),
                    start_date: Some("2020".to_string()),
                    end_date: Some("2020".to_string()),
                    description: None,
                },
            ],
            experience: vec![
                ExperienceEntry {
                    organization: "Harborline Logistics".to_string(),
                    role: "Senior Backend Engineer".to_string(),
                    start_date: Some("2021".to_string()),
                    end_date: Some("Present".to_string()),
                    description: Some(
                        "Own the shipment-tracking platform (Rust, Postgres, Kafka). \
                         Cut p99 API latency from 900ms to 140ms and led the migration \
                         off a legacy monolith with zero downtime."
                            .to_string(),
                    ),
                },
                ExperienceEntry {
                    organization: "Brightpath Analytics".to_string(),
                    role: "Software Engineer".to_string(),
                    start_date: Some("2018".to_string()),
                    end_date: Some("2021".to_string()),
                    description: Some(
                        "Built ETL pipelines ingesting 40M events/day and the internal \
                         metrics API used by every product team."
                            .to_string(),
                    ),
                },
            ],
            skills: vec![
                "Rust".to_string(),
                "Python".to_string(),
                "PostgreSQL".to_string(),
                "Kafka".to_string(),
                "Kubernetes".to_string(),
                "gRPC".to_string(),
                "Terraform".to_string(),
                "Observability".to_string(),
            ],
            target_role: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_summary_line_joins_non_empty() {
        let contact = ContactInfo {
            name: "A".to_string(),
            email: "a@b.c".to_string(),
            phone: String::new(),
            linkedin: "linkedin.com/in/a".to_string(),
            github: String::new(),
        };
        assert_eq!(contact.summary_line(), "a@b.c | linkedin.com/in/a");
    }

    #[test]
    fn test_contact_summary_line_empty_contact() {
        assert_eq!(ContactInfo::default().summary_line(), "");
    }

    #[test]
    fn test_profile_deserializes_from_partial_json() {
        let profile: Profile =
            serde_json::from_str(r#"{"contact": {"name": "Sam"}, "skills": ["Go"]}"#)
                .expect("partial profile should deserialize");
        assert_eq!(profile.contact.name, "Sam");
        assert_eq!(profile.skills, vec!["Go".to_string()]);
        assert!(profile.education.is_empty());
        assert!(profile.summary.is_none());
    }

    #[test]
    fn test_example_profile_has_all_sections() {
        let p = Profile::example();
        assert!(!p.contact.name.is_empty());
        assert!(!p.contact.email.is_empty());
        assert!(p.summary.is_some());
        assert!(!p.education.is_empty());
        assert!(!p.experience.is_empty());
        assert!(!p.skills.is_empty());
    }

    #[test]
    fn test_experience_display_line_full() {
        let e = ExperienceEntry {
            organization: "Acme Corp".to_string(),
            role: "Senior Engineer".to_string(),
            start_date: Some("2020".to_string()),
            end_date: Some("Present".to_string()),
            description: Some("Led the billing rewrite.".to_string()),
        };
        assert_eq!(
            e.display_line(),
            "Senior Engineer at Acme Corp (2020 - Present): Led the billing rewrite."
        );
    }

    #[test]
    fn test_experience_display_line_partial() {
        let e = ExperienceEntry {
            organization: "Acme Corp".to_string(),
            ..Default::default()
        };
        assert_eq!(e.display_line(), "Acme Corp");
    }

    #[test]
    fn test_education_display_line() {
        let e = EducationEntry {
            institution: "MIT".to_string(),
            degree: "B.S. Computer Science".to_string(),
            start_date: Some("2014".to_string()),
            end_date: Some("2018".to_string()),
            description: None,
        };
        assert_eq!(e.display_line(), "B.S. Computer Science, MIT (2014 - 2018)");
    }

    #[test]
    fn test_target_role_is_empty_when_all_blank() {
        assert!(TargetRole::default().is_empty());
        let t = TargetRole {
            company: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(t.is_empty());
        let t = TargetRole {
            position: Some("Staff Engineer".to_string()),
            ..Default::default()
        };
        assert!(!t.is_empty());
    }
}

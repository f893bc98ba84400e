//! Profile completeness scoring, returned with every ingest response so the
//! client can prompt the user to fill gaps before generating.

use serde::{Deserialize, Serialize};

use crate::models::profile::Profile;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum SectionStatus {
    Strong,
    Moderate,
    Weak,
    Missing,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionHealth {
    pub section: String,
    pub score: f64,
    pub status: SectionStatus,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletenessReport {
    pub overall_score: f64,
    pub sections: Vec<SectionHealth>,
    pub missing_sections: Vec<String>,
}

const SECTION_WEIGHTS: &[(&str, f64)] = &[
    ("contact", 0.30),
    ("experience", 0.30),
    ("education", 0.15),
    ("skills", 0.15),
    ("summary", 0.10),
];

pub fn compute_completeness(profile: &Profile) -> CompletenessReport {
    let mut sections = Vec::new();
    let mut missing_sections = Vec::new();
    let mut weighted_sum = 0.0;

    for (section, weight) in SECTION_WEIGHTS {
        let (score, recommendations) = match *section {
            "contact" => score_contact(profile),
            "experience" => score_entries(
                profile.experience.len(),
                entry_detail_fraction(profile.experience.iter().map(|e| {
                    (e.start_date.is_some(), e.description.is_some())
                })),
                "experience",
            ),
            "education" => score_entries(
                profile.education.len(),
                entry_detail_fraction(profile.education.iter().map(|e| {
                    (e.start_date.is_some(), e.description.is_some())
                })),
                "education",
            ),
            "skills" => score_skills(profile),
            "summary" => score_summary(profile),
            _ => (0.0, Vec::new()),
        };

        let status = match score {
            s if s >= 0.8 => SectionStatus::Strong,
            s if s >= 0.5 => SectionStatus::Moderate,
            s if s > 0.0 => SectionStatus::Weak,
            _ => SectionStatus::Missing,
        };
        if status == SectionStatus::Missing {
            missing_sections.push(section.to_string());
        }

        weighted_sum += score * weight;
        sections.push(SectionHealth {
            section: section.to_string(),
            score,
            status,
            recommendations,
        });
    }

    let total_weight: f64 = SECTION_WEIGHTS.iter().map(|(_, w)| w).sum();
    let overall_score = if total_weight > 0.0 {
        (weighted_sum / total_weight).clamp(0.0, 1.0)
    } else {
        0.0
    };

    CompletenessReport {
        overall_score,
        sections,
        missing_sections,
    }
}

fn score_contact(profile: &Profile) -> (f64, Vec<String>) {
    let c = &profile.contact;
    let mut score = 0.0;
    let mut recommendations = Vec::new();

    if !c.name.trim().is_empty() {
        score += 0.5;
    } else {
        recommendations.push("Add your name".to_string());
    }
    if !c.email.trim().is_empty() || !c.phone.trim().is_empty() {
        score += 0.3;
    } else {
        recommendations.push("Add an email address or phone number".to_string());
    }
    if !c.linkedin.trim().is_empty() || !c.github.trim().is_empty() {
        score += 0.2;
    }

    (score, recommendations)
}

/// Fraction of entries that carry dates and a description, averaged.
fn entry_detail_fraction(parts: impl Iterator<Item = (bool, bool)>) -> f64 {
    let mut total = 0usize;
    let mut detail = 0.0;
    for (has_dates, has_description) in parts {
        total += 1;
        if has_dates {
            detail += 0.5;
        }
        if has_description {
            detail += 0.5;
        }
    }
    if total == 0 {
        0.0
    } else {
        detail / total as f64
    }
}

fn score_entries(count: usize, detail: f64, section: &str) -> (f64, Vec<String>) {
    if count == 0 {
        return (
            0.0,
            vec![format!("Add at least one {section} entry")],
        );
    }
    // Half the score comes from having entries at all, half from detail.
    let presence = (count as f64 / 2.0).min(1.0);
    let score = (0.5 * presence + 0.5 * detail).clamp(0.0, 1.0);
    let mut recommendations = Vec::new();
    if detail < 0.5 {
        recommendations.push(format!(
            "Add dates and a short description to your {section} entries"
        ));
    }
    (score, recommendations)
}

fn score_skills(profile: &Profile) -> (f64, Vec<String>) {
    let count = profile.skills.len();
    if count == 0 {
        return (0.0, vec!["List a few skills".to_string()]);
    }
    let score = (count as f64 / 5.0).min(1.0);
    let recommendations = if count < 5 {
        vec!["Five or more skills give the generator more to work with".to_string()]
    } else {
        Vec::new()
    };
    (score, recommendations)
}

fn score_summary(profile: &Profile) -> (f64, Vec<String>) {
    match profile.summary.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => (1.0, Vec::new()),
        _ => (0.0, vec!["Add a short professional summary".to_string()]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_profile_scores_zero_and_lists_all_missing() {
        let report = compute_completeness(&Profile::default());
        assert_eq!(report.overall_score, 0.0);
        assert_eq!(
            report.missing_sections,
            vec!["contact", "experience", "education", "skills", "summary"]
        );
    }

    #[test]
    fn test_example_profile_scores_high() {
        let report = compute_completeness(&Profile::example());
        assert!(
            report.overall_score > 0.8,
            "example profile should be nearly complete, got {}",
            report.overall_score
        );
        assert!(report.missing_sections.is_empty());
    }

    #[test]
    fn test_contact_only_profile_is_partial() {
        let mut profile = Profile::default();
        profile.contact.name = "Jane".to_string();
        profile.contact.email = "j@d.dev".to_string();
        let report = compute_completeness(&profile);
        assert!(report.overall_score > 0.0);
        assert!(report.overall_score < 0.5);
        assert!(report.missing_sections.contains(&"experience".to_string()));
    }

    #[test]
    fn test_recommendations_name_gaps() {
        let report = compute_completeness(&Profile::default());
        let contact = &report.sections[0];
        assert_eq!(contact.section, "contact");
        assert!(contact
            .recommendations
            .iter()
            .any(|r| r.contains("name")));
    }

    #[test]
    fn test_entries_without_detail_score_lower() {
        let mut with_detail = Profile::default();
        with_detail.experience = Profile::example().experience;
        let mut bare = Profile::default();
        bare.experience = with_detail.experience.clone();
        for e in &mut bare.experience {
            e.start_date = None;
            e.end_date = None;
            e.description = None;
        }
        let detailed_score = compute_completeness(&with_detail).overall_score;
        let bare_score = compute_completeness(&bare).overall_score;
        assert!(detailed_score > bare_score);
    }

    #[test]
    fn test_score_is_deterministic() {
        let profile = Profile::example();
        let a = compute_completeness(&profile);
        let b = compute_completeness(&profile);
        assert_eq!(a.overall_score, b.overall_score);
        assert_eq!(a.missing_sections, b.missing_sections);
    }
}

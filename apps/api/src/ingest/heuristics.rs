//! Pattern-based extraction from free-form resume text.
//!
//! Second parsing tier: finds contact details anywhere in the text, splits
//! the body on recognizable section headings, and turns section blocks into
//! entries. Everything here is best-effort; a miss returns `None` or an
//! empty list, never an error.

use regex::Regex;

use crate::models::profile::{EducationEntry, ExperienceEntry, Profile};

const EMAIL_PATTERN: &str = r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}";
const PHONE_PATTERN: &str = r"\+?\(?\d[\d\s().-]{6,}\d";
const LINKEDIN_PATTERN: &str = r"(?i)(?:https?://)?(?:www\.)?linkedin\.com/[A-Za-z0-9_%/.-]+";
const GITHUB_PATTERN: &str = r"(?i)(?:https?://)?(?:www\.)?github\.com/[A-Za-z0-9_%/.-]+";
const DATE_RANGE_PATTERN: &str =
    r"(?i)\(?\b((?:19|20)\d{2})\s*(?:[-–—]|to)\s*((?:19|20)\d{2}|present|current|now)\b\)?";
const SINGLE_YEAR_PATTERN: &str = r"\(?\b((?:19|20)\d{2})\b\)?";

fn compile(pattern: &str) -> Option<Regex> {
    // Patterns are fixed literals; a compile failure just disables the probe.
    Regex::new(pattern).ok()
}

// ────────────────────────────────────────────────────────────────────────────
// Contact probes
// ────────────────────────────────────────────────────────────────────────────

pub fn find_email(text: &str) -> Option<String> {
    let re = compile(EMAIL_PATTERN)?;
    re.find(text).map(|m| m.as_str().to_string())
}

/// Finds a phone-shaped run of digits and separators. Requires at least
/// nine digits so year ranges like `2014-2018` never qualify.
pub fn find_phone(text: &str) -> Option<String> {
    let re = compile(PHONE_PATTERN)?;
    let found = re
        .find_iter(text)
        .map(|m| m.as_str().trim().to_string())
        .find(|c| c.chars().filter(|ch| ch.is_ascii_digit()).count() >= 9);
    found
}

pub fn find_linkedin(text: &str) -> Option<String> {
    let re = compile(LINKEDIN_PATTERN)?;
    re.find(text).map(|m| m.as_str().trim_end_matches('/').to_string())
}

pub fn find_github(text: &str) -> Option<String> {
    let re = compile(GITHUB_PATTERN)?;
    re.find(text).map(|m| m.as_str().trim_end_matches('/').to_string())
}

/// Takes the first non-empty line as the candidate name, rejecting lines
/// that cannot plausibly be one (contact data, digits, headings, prose).
pub fn guess_name(text: &str) -> Option<String> {
    let line = text.lines().map(str::trim).find(|l| !l.is_empty())?;
    if line.contains('@') || line.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    if line.split_whitespace().count() > 5 || line.len() > 60 {
        return None;
    }
    let lowered = line.trim_end_matches(':').trim().to_lowercase();
    if matches!(lowered.as_str(), "resume" | "curriculum vitae" | "cv") {
        return None;
    }
    if section_kind(line).is_some() {
        return None;
    }
    Some(line.to_string())
}

// ────────────────────────────────────────────────────────────────────────────
// Date handling
// ────────────────────────────────────────────────────────────────────────────

/// Removes the first year range (or lone year) from `text` and returns the
/// cleaned remainder plus the extracted start/end strings.
pub fn strip_date_range(text: &str) -> (String, Option<String>, Option<String>) {
    if let Some(re) = compile(DATE_RANGE_PATTERN) {
        if let Some(caps) = re.captures(text) {
            if let (Some(whole), Some(start), Some(end)) = (caps.get(0), caps.get(1), caps.get(2))
            {
                let cleaned = remove_span(text, whole.start(), whole.end());
                return (
                    cleaned,
                    Some(start.as_str().to_string()),
                    Some(end.as_str().to_string()),
                );
            }
        }
    }
    if let Some(re) = compile(SINGLE_YEAR_PATTERN) {
        if let Some(caps) = re.captures(text) {
            if let (Some(whole), Some(year)) = (caps.get(0), caps.get(1)) {
                let cleaned = remove_span(text, whole.start(), whole.end());
                return (cleaned, Some(year.as_str().to_string()), None);
            }
        }
    }
    (text.trim().to_string(), None, None)
}

fn remove_span(text: &str, start: usize, end: usize) -> String {
    let joined = format!("{}{}", &text[..start], &text[end..]);
    joined
        .trim()
        .trim_end_matches([',', '-', '–', '|'])
        .trim()
        .to_string()
}

// ────────────────────────────────────────────────────────────────────────────
// Section splitting
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionKind {
    Summary,
    Education,
    Experience,
    Skills,
}

/// Raw text blocks keyed by recognized section, plus everything before the
/// first heading (where the name and contact line usually live).
#[derive(Debug, Clone, Default)]
pub struct Sections {
    pub preamble: String,
    pub summary: Option<String>,
    pub education: Option<String>,
    pub experience: Option<String>,
    pub skills: Option<String>,
}

fn section_kind(line: &str) -> Option<SectionKind> {
    let cleaned = line.trim().trim_end_matches(':').trim().to_lowercase();
    match cleaned.as_str() {
        "summary" | "about" | "about me" | "objective" | "profile"
        | "professional summary" => Some(SectionKind::Summary),
        "education" | "academic background" | "academics" => Some(SectionKind::Education),
        "experience" | "work experience" | "employment" | "employment history"
        | "professional experience" => Some(SectionKind::Experience),
        "skills" | "technical skills" | "technologies" | "skills & tools" => {
            Some(SectionKind::Skills)
        }
        _ => None,
    }
}

/// Splits text on section headings. A heading is a line that consists of
/// nothing but a known section title (optionally with a trailing colon).
/// Repeated headings of the same kind append to the same block.
pub fn extract_sections(text: &str) -> Sections {
    let mut sections = Sections::default();
    let mut current: Option<SectionKind> = None;

    for line in text.lines() {
        if let Some(kind) = section_kind(line) {
            current = Some(kind);
            continue;
        }
        match current {
            None => {
                if !sections.preamble.is_empty() {
                    sections.preamble.push('\n');
                }
                sections.preamble.push_str(line);
            }
            Some(kind) => {
                let slot = match kind {
                    SectionKind::Summary => &mut sections.summary,
                    SectionKind::Education => &mut sections.education,
                    SectionKind::Experience => &mut sections.experience,
                    SectionKind::Skills => &mut sections.skills,
                };
                match slot {
                    Some(existing) => {
                        existing.push('\n');
                        existing.push_str(line);
                    }
                    None => *slot = Some(line.to_string()),
                }
            }
        }
    }

    sections
}

// ────────────────────────────────────────────────────────────────────────────
// Block parsers
// ────────────────────────────────────────────────────────────────────────────

fn strip_bullet(line: &str) -> Option<&str> {
    for prefix in ["- ", "• ", "* "] {
        if let Some(rest) = line.strip_prefix(prefix) {
            return Some(rest.trim());
        }
    }
    None
}

/// One entry per non-bullet line; bullet lines extend the previous entry's
/// description.
pub fn parse_education_block(block: &str) -> Vec<EducationEntry> {
    let mut entries: Vec<EducationEntry> = Vec::new();
    for line in block.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some(detail) = strip_bullet(line) {
            if let Some(last) = entries.last_mut() {
                append_description(&mut last.description, detail);
                continue;
            }
        }
        entries.push(education_entry_from_line(line));
    }
    entries
}

pub fn parse_experience_block(block: &str) -> Vec<ExperienceEntry> {
    let mut entries: Vec<ExperienceEntry> = Vec::new();
    for line in block.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some(detail) = strip_bullet(line) {
            if let Some(last) = entries.last_mut() {
                append_description(&mut last.description, detail);
                continue;
            }
        }
        entries.push(experience_entry_from_line(line));
    }
    entries
}

pub fn parse_skills_block(block: &str) -> Vec<String> {
    block
        .split(['\n', ',', ';', '•'])
        .map(|s| s.trim().trim_start_matches(['-', '*']).trim())
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn append_description(slot: &mut Option<String>, detail: &str) {
    match slot {
        Some(existing) => {
            existing.push(' ');
            existing.push_str(detail);
        }
        None => *slot = Some(detail.to_string()),
    }
}

/// `B.S. Computer Science - MIT (2014-2018)`: degree ` - ` institution,
/// with the year range peeled off. Without a separator the whole line is
/// the institution.
pub fn education_entry_from_line(line: &str) -> EducationEntry {
    let (rest, start, end) = strip_date_range(line);
    let mut entry = EducationEntry {
        start_date: start,
        end_date: end,
        ..Default::default()
    };
    match rest.split_once(" - ") {
        Some((degree, institution)) => {
            entry.degree = degree.trim().to_string();
            entry.institution = institution.trim().to_string();
        }
        None => entry.institution = rest.trim().to_string(),
    }
    entry
}

/// `Senior Engineer at Acme Corp (2020-2023)`: role ` at ` organization,
/// falling back to role ` - ` organization, then to organization alone.
pub fn experience_entry_from_line(line: &str) -> ExperienceEntry {
    let (rest, start, end) = strip_date_range(line);
    let mut entry = ExperienceEntry {
        start_date: start,
        end_date: end,
        ..Default::default()
    };
    let split = rest
        .split_once(" at ")
        .or_else(|| rest.split_once(" - "));
    match split {
        Some((role, organization)) => {
            entry.role = role.trim().to_string();
            entry.organization = organization.trim().to_string();
        }
        None => entry.organization = rest.trim().to_string(),
    }
    entry
}

// ────────────────────────────────────────────────────────────────────────────
// Whole-text scan
// ────────────────────────────────────────────────────────────────────────────

/// Best-effort profile from free text alone: name from the preamble,
/// contact probes over the whole text, section blocks parsed into entries.
pub fn heuristic_profile(text: &str) -> Profile {
    let sections = extract_sections(text);
    let mut profile = Profile::default();

    if let Some(name) = guess_name(&sections.preamble).or_else(|| guess_name(text)) {
        profile.contact.name = name;
    }
    if let Some(email) = find_email(text) {
        profile.contact.email = email;
    }
    if let Some(phone) = find_phone(text) {
        profile.contact.phone = phone;
    }
    if let Some(linkedin) = find_linkedin(text) {
        profile.contact.linkedin = linkedin;
    }
    if let Some(github) = find_github(text) {
        profile.contact.github = github;
    }
    if let Some(summary) = sections.summary.as_deref() {
        let summary = summary.trim();
        if !summary.is_empty() {
            profile.summary = Some(summary.to_string());
        }
    }
    if let Some(block) = sections.education.as_deref() {
        profile.education = parse_education_block(block);
    }
    if let Some(block) = sections.experience.as_deref() {
        profile.experience = parse_experience_block(block);
    }
    if let Some(block) = sections.skills.as_deref() {
        profile.skills = parse_skills_block(block);
    }

    profile
}

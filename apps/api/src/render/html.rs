//! Portfolio HTML assembly and shared HTML helpers.
//!
//! Drafted portfolio pages arrive as complete HTML documents. When a draft
//! is missing or not recognizably HTML, `portfolio_page` builds a
//! self-contained page from the profile directly, with inline CSS and no
//! external assets, so the download always opens in a browser.

use std::fmt::Write;

use crate::models::profile::{EducationEntry, ExperienceEntry, Profile};

// ────────────────────────────────────────────────────────────────────────────
// Shared helpers
// ────────────────────────────────────────────────────────────────────────────

/// Escapes text for safe interpolation into HTML.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Returns true if `text` is recognizably a complete HTML document.
pub fn looks_like_html(text: &str) -> bool {
    let head: String = text.trim_start().chars().take(32).collect::<String>().to_lowercase();
    head.starts_with("<!doctype html") || head.starts_with("<html")
}

/// Returns the portfolio markup for a document, regenerating the page from
/// the profile when the stored content is not a usable HTML document.
pub fn portfolio_html(content: &str, profile: &Profile) -> String {
    if looks_like_html(content) {
        content.to_string()
    } else {
        portfolio_page(profile)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Deterministic portfolio page
// ────────────────────────────────────────────────────────────────────────────

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{name} | Portfolio</title>
<style>
  * { margin: 0; padding: 0; box-sizing: border-box; }
  body { font-family: 'Segoe UI', Helvetica, Arial, sans-serif; color: #2c3e50; line-height: 1.6; background: #f7f8fa; }
  header { background: linear-gradient(90deg, #667eea 0%, #764ba2 100%); color: white; text-align: center; padding: 4rem 1.5rem 3rem; }
  header h1 { font-size: 2.6rem; letter-spacing: 0.02em; }
  header .contact { margin-top: 0.8rem; font-size: 1rem; opacity: 0.9; }
  main { max-width: 46rem; margin: 0 auto; padding: 1rem 1.5rem 3rem; }
  section { background: white; border-radius: 10px; padding: 1.5rem 2rem; margin-top: 1.5rem; box-shadow: 0 1px 4px rgba(44, 62, 80, 0.08); }
  h2 { font-size: 1.3rem; color: #764ba2; border-bottom: 2px solid #667eea; padding-bottom: 0.4rem; margin-bottom: 1rem; }
  h3 { font-size: 1.05rem; margin-top: 0.8rem; }
  .dates { color: #7f8c8d; font-size: 0.88rem; margin-bottom: 0.3rem; }
  ul.skills { list-style: none; display: flex; flex-wrap: wrap; gap: 0.5rem; }
  ul.skills li { background: #eef0fb; color: #4a4f8c; border-radius: 999px; padding: 0.25rem 0.9rem; font-size: 0.9rem; }
  ul.entries { list-style: none; }
  ul.entries li { margin-bottom: 0.6rem; }
</style>
</head>
<body>
<header>
<h1>{name}</h1>
{contact_line}
</header>
<main>
{sections}</main>
</body>
</html>
"#;

/// Builds a complete single-file portfolio page from the profile.
///
/// Sections appear in profile order and empty sections are omitted.
pub fn portfolio_page(profile: &Profile) -> String {
    let mut sections = String::new();
    push_about(&mut sections, profile.summary.as_deref().unwrap_or(""));
    push_education(&mut sections, &profile.education);
    push_experience(&mut sections, &profile.experience);
    push_skills(&mut sections, &profile.skills);

    let contact = profile.contact.summary_line();
    let contact_line = if contact.is_empty() {
        String::new()
    } else {
        format!("<p class=\"contact\">{}</p>", escape_html(&contact))
    };

    PAGE_TEMPLATE
        .replace("{name}", &escape_html(profile.contact.name.trim()))
        .replace("{contact_line}", &contact_line)
        .replace("{sections}", &sections)
}

fn push_about(out: &mut String, summary: &str) {
    if summary.trim().is_empty() {
        return;
    }
    let _ = write!(
        out,
        "<section id=\"about\">\n<h2>About</h2>\n<p>{}</p>\n</section>\n",
        escape_html(summary.trim())
    );
}

fn push_education(out: &mut String, entries: &[EducationEntry]) {
    if entries.is_empty() {
        return;
    }
    out.push_str("<section id=\"education\">\n<h2>Education</h2>\n<ul class=\"entries\">\n");
    for entry in entries {
        let _ = write!(out, "<li>{}</li>\n", escape_html(&entry.display_line()));
    }
    out.push_str("</ul>\n</section>\n");
}

fn push_experience(out: &mut String, entries: &[ExperienceEntry]) {
    if entries.is_empty() {
        return;
    }
    out.push_str("<section id=\"experience\">\n<h2>Experience</h2>\n");
    for entry in entries {
        let title = if entry.role.trim().is_empty() {
            entry.organization.trim().to_string()
        } else if entry.organization.trim().is_empty() {
            entry.role.trim().to_string()
        } else {
            format!("{} at {}", entry.role.trim(), entry.organization.trim())
        };
        let _ = write!(out, "<h3>{}</h3>\n", escape_html(&title));
        let dates = date_span(entry.start_date.as_deref(), entry.end_date.as_deref());
        if !dates.is_empty() {
            let _ = write!(out, "<p class=\"dates\">{}</p>\n", escape_html(&dates));
        }
        if let Some(description) = entry.description.as_deref().map(str::trim) {
            if !description.is_empty() {
                let _ = write!(out, "<p>{}</p>\n", escape_html(description));
            }
        }
    }
    out.push_str("</section>\n");
}

fn push_skills(out: &mut String, skills: &[String]) {
    if skills.is_empty() {
        return;
    }
    out.push_str("<section id=\"skills\">\n<h2>Skills</h2>\n<ul class=\"skills\">\n");
    for skill in skills {
        let _ = write!(out, "<li>{}</li>\n", escape_html(skill));
    }
    out.push_str("</ul>\n</section>\n");
}

fn date_span(start: Option<&str>, end: Option<&str>) -> String {
    match (start, end) {
        (Some(s), Some(e)) => format!("{s} - {e}"),
        (Some(s), None) => format!("{s} - present"),
        (None, Some(e)) => format!("until {e}"),
        (None, None) => String::new(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

//! Heuristic extractors that turn raw document text into the structured fields
//! of [`ResumeDocument`] and [`JobPosting`].
//!
//! Every function here is a pure function of its input text and the vocabulary.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analysis::truncate_chars;
use crate::analysis::vocabulary::{contains_any, find_phrase, Vocabulary};
use crate::models::job::JobPosting;
use crate::models::resume::ResumeDocument;

/// Lines taken per experience/education hit: the matching line plus the next two.
const SECTION_WINDOW: usize = 3;
const SECTION_LINE_CAP: usize = 10;
/// Lines taken per requirements hit: the matching line plus the next four.
const REQUIREMENTS_WINDOW: usize = 5;
const REQUIREMENTS_LINE_CAP: usize = 20;
pub const REQUIREMENTS_FALLBACK_CHARS: usize = 2000;

const TITLE_SCAN_LINES: usize = 10;
const TITLE_FALLBACK_CHARS: usize = 100;
const DEFAULT_TITLE: &str = "Vacancy";

/// Phrase markers followed by a technology name, e.g. "worked with Kafka",
/// "опыт работы с PostgreSQL".
static WORKED_WITH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:worked|experience|proficient|familiar|работал|работала|опыт|знаю|владею|использую|применяю)\b[\w\s,]*?\b(?:with|in|on|с|в|на)\s+([a-z][a-z0-9\s+#.]*)",
    )
    .expect("valid worked-with regex")
});

/// List markers, e.g. "Skills: Rust, Go" or "Технологии: Kafka".
static SKILLS_LIST_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:skills|technologies|tech stack|stack|технологии|технология|навыки|навык)\s*:\s*([a-z][a-z0-9\s,+#.]*)",
    )
    .expect("valid skills-list regex")
});

static YEARS_RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d{1,2})\s*[-–]\s*(\d{1,2})\s*(?:years?|yrs|года|год|лет)")
        .expect("valid years-range regex")
});

static YEARS_FROM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:от|from|at least)\s+(\d{1,2})\s*(?:years?|yrs|года|год|лет)")
        .expect("valid years-from regex")
});

static YEARS_PLUS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d{1,2})\s*\+?\s*(?:years?|yrs|года|год|лет)")
        .expect("valid years-plus regex")
});

/// A parsed "N+ years" style requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceRequirement {
    pub min_years: u32,
    pub max_years: Option<u32>,
    /// The matched fragment, as written in the posting.
    pub text: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Document builders
// ────────────────────────────────────────────────────────────────────────────

/// Builds a [`ResumeDocument`] from already-extracted resume text.
pub fn build_resume(raw_text: &str, vocabulary: &Vocabulary) -> ResumeDocument {
    ResumeDocument {
        raw_text: raw_text.to_string(),
        skills: extract_skills(raw_text, vocabulary),
        experience_text: extract_experience(raw_text, vocabulary),
        education_text: extract_education(raw_text, vocabulary),
        languages: extract_languages(raw_text, vocabulary),
    }
}

/// Builds a [`JobPosting`] from already-extracted posting text.
/// A non-empty `title_hint` (e.g. a scraped page heading) wins over the title heuristic.
pub fn build_job(raw_text: &str, title_hint: Option<&str>, vocabulary: &Vocabulary) -> JobPosting {
    let title = match title_hint.map(str::trim) {
        Some(hint) if !hint.is_empty() => hint.to_string(),
        _ => extract_title(raw_text, vocabulary),
    };

    JobPosting {
        raw_text: raw_text.to_string(),
        title,
        skills: extract_skills(raw_text, vocabulary),
        requirements_text: extract_requirements(raw_text, vocabulary),
        experience_required: extract_experience_requirement(raw_text)
            .map(|r| r.text)
            .unwrap_or_default(),
        education_required: extract_education_requirement(raw_text, vocabulary),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Skills
// ────────────────────────────────────────────────────────────────────────────

/// Canonical skills mentioned in `text`, unique, in vocabulary order.
///
/// The vocabulary scan is widened by a marker pass ("worked with X",
/// "skills: X") that re-resolves the captured token against the vocabulary.
pub fn extract_skills(text: &str, vocabulary: &Vocabulary) -> Vec<String> {
    let mut found: HashSet<String> = vocabulary.find_skills(text).into_iter().collect();

    let captured = WORKED_WITH_RE
        .captures_iter(text)
        .chain(SKILLS_LIST_RE.captures_iter(text))
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()));

    for capture in captured {
        let token = capture.split(',').next().unwrap_or("").trim();
        if token.chars().count() <= 2 {
            continue;
        }
        if let Some(name) = resolve_token(token, vocabulary) {
            found.insert(name);
        }
    }

    vocabulary
        .skills()
        .iter()
        .filter(|s| found.contains(&s.name))
        .map(|s| s.name.clone())
        .collect()
}

/// Resolves a captured token to the first vocabulary skill it names, under the
/// same word-boundary rule as the vocabulary scan.
fn resolve_token(token: &str, vocabulary: &Vocabulary) -> Option<String> {
    let lower = token.to_lowercase();
    vocabulary
        .skills()
        .iter()
        .find(|skill| vocabulary.mentions(&lower, skill))
        .map(|skill| skill.name.clone())
}

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

/// Lines around experience keywords, at most ten.
pub fn extract_experience(text: &str, vocabulary: &Vocabulary) -> String {
    collect_windows(text, &vocabulary.keywords.experience, SECTION_WINDOW, SECTION_LINE_CAP)
        .join("\n")
}

/// Lines around education keywords, at most ten.
pub fn extract_education(text: &str, vocabulary: &Vocabulary) -> String {
    collect_windows(text, &vocabulary.keywords.education, SECTION_WINDOW, SECTION_LINE_CAP)
        .join("\n")
}

/// Lines around requirement keywords, at most twenty. Falls back to the first
/// 2000 characters of the posting when no requirement keyword appears.
pub fn extract_requirements(text: &str, vocabulary: &Vocabulary) -> String {
    let lines = collect_windows(
        text,
        &vocabulary.keywords.requirements,
        REQUIREMENTS_WINDOW,
        REQUIREMENTS_LINE_CAP,
    );
    if lines.is_empty() {
        truncate_chars(text, REQUIREMENTS_FALLBACK_CHARS).to_string()
    } else {
        lines.join("\n")
    }
}

/// For each line containing a keyword, takes that line and the following
/// `window - 1` lines. Overlapping windows repeat lines, as they are not merged.
fn collect_windows<'a>(
    text: &'a str,
    keywords: &[String],
    window: usize,
    cap: usize,
) -> Vec<&'a str> {
    let lines: Vec<&str> = text.lines().collect();
    let mut picked = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        if picked.len() >= cap {
            break;
        }
        if contains_any(&line.to_lowercase(), keywords) {
            let end = (i + window).min(lines.len());
            picked.extend_from_slice(&lines[i..end]);
        }
    }

    picked.truncate(cap);
    picked
}

/// Spoken languages mentioned in the text, in keyword-list order.
pub fn extract_languages(text: &str, vocabulary: &Vocabulary) -> Vec<String> {
    let lower = text.to_lowercase();
    vocabulary
        .keywords
        .languages
        .iter()
        .filter(|lang| lower.contains(lang.as_str()))
        .cloned()
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Job heuristics
// ────────────────────────────────────────────────────────────────────────────

/// Best-effort job title from the first lines of the posting.
pub fn extract_title(text: &str, vocabulary: &Vocabulary) -> String {
    for line in text.lines().take(TITLE_SCAN_LINES) {
        let line = line.trim();
        let len = line.chars().count();
        if len <= 10 || len >= 200 {
            continue;
        }
        if contains_any(&line.to_lowercase(), &vocabulary.keywords.vacancy_markers) {
            return line.to_string();
        }
        if !line.ends_with('.') && line.split_whitespace().count() < 15 {
            return line.to_string();
        }
    }

    let first = text.lines().next().unwrap_or("").trim();
    if first.is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        truncate_chars(first, TITLE_FALLBACK_CHARS).to_string()
    }
}

/// First "N-M years", "from N years" or "N+ years" requirement in the text.
pub fn extract_experience_requirement(text: &str) -> Option<ExperienceRequirement> {
    if let Some(caps) = YEARS_RANGE_RE.captures(text) {
        return Some(ExperienceRequirement {
            min_years: caps[1].parse().ok()?,
            max_years: caps[2].parse().ok(),
            text: caps[0].trim().to_string(),
        });
    }
    YEARS_FROM_RE
        .captures(text)
        .or_else(|| YEARS_PLUS_RE.captures(text))
        .and_then(|caps| {
            Some(ExperienceRequirement {
                min_years: caps[1].parse().ok()?,
                max_years: None,
                text: caps[0].trim().to_string(),
            })
        })
}

/// `"Required: <keyword>"` for the first education keyword present, else empty.
pub fn extract_education_requirement(text: &str, vocabulary: &Vocabulary) -> String {
    let lower = text.to_lowercase();
    vocabulary
        .keywords
        .education_requirement
        .iter()
        .find(|kw| find_phrase(&lower, kw).is_some())
        .map(|kw| format!("Required: {kw}"))
        .unwrap_or_default()
}

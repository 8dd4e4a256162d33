//! Five-category weighted scoring of a resume against a job posting.
//!
//! | category         | max | formula                                   |
//! |------------------|-----|-------------------------------------------|
//! | required_skills  | 50  | skill overlap with the leading job skills |
//! | preferred_skills | 30  | skill overlap with the remaining skills   |
//! | experience       | 10  | word overlap with the requirements text   |
//! | education        | 5   | keyword presence                          |
//! | soft_skills      | 5   | share of demanded soft-skill families     |
//!
//! A category the posting asks nothing of scores full marks. A category the
//! posting asks for but the resume has no data on is flagged `not_specified`
//! and left out of the overall percentage instead of counting as zero.

use std::collections::HashSet;

use crate::analysis::engine::EngineConfig;
use crate::analysis::round2;
use crate::analysis::similarity::{skill_overlap, word_overlap};
use crate::analysis::vocabulary::{contains_any, Vocabulary};
use crate::models::analysis::{Breakdown, Category, CategoryScore};
use crate::models::job::JobPosting;
use crate::models::resume::ResumeDocument;

/// Splits job skills into (required, preferred). The required share is
/// `ceil(len × percent / 100)`, at least one skill when any exist.
pub fn split_skills(skills: &[String], required_share_percent: u32) -> (&[String], &[String]) {
    if skills.is_empty() {
        return (skills, skills);
    }
    let len = skills.len();
    let percent = required_share_percent as usize;
    let split = ((len * percent + 99) / 100).clamp(1, len);
    skills.split_at(split)
}

pub fn compute_breakdown(
    resume: &ResumeDocument,
    job: &JobPosting,
    vocabulary: &Vocabulary,
    config: &EngineConfig,
) -> Breakdown {
    let (required, preferred) = split_skills(&job.skills, config.required_share_percent);

    Breakdown {
        required_skills: score_skill_tier(&resume.skills, required, Category::RequiredSkills),
        preferred_skills: score_skill_tier(&resume.skills, preferred, Category::PreferredSkills),
        experience: score_experience(resume, job),
        education: score_education(resume, job, vocabulary),
        soft_skills: score_soft_skills(resume, job, vocabulary),
    }
}

/// `Σ score / Σ max × 100` over categories that are not `not_specified`,
/// rounded to 2 decimals. 0 when every category is excluded.
pub fn compatibility_percentage(breakdown: &Breakdown) -> f64 {
    let (score, max) = breakdown
        .iter()
        .filter(|(_, c)| !c.not_specified)
        .fold((0.0, 0.0), |(s, m), (_, c)| (s + c.score, m + c.max));

    if max <= 0.0 {
        return 0.0;
    }
    round2((score / max * 100.0).clamp(0.0, 100.0))
}

// ────────────────────────────────────────────────────────────────────────────
// Categories
// ────────────────────────────────────────────────────────────────────────────

fn category_score(category: Category, raw_score: f64, details: Vec<String>) -> CategoryScore {
    let max = category.max_points();
    let score = round2(raw_score.clamp(0.0, max));
    CategoryScore {
        score,
        max,
        percentage: round2(score / max * 100.0),
        details,
        matching_skills: Vec::new(),
        missing_skills: Vec::new(),
        not_specified: false,
    }
}

fn score_skill_tier(resume_skills: &[String], tier: &[String], category: Category) -> CategoryScore {
    let max = category.max_points();
    let label = category.label().to_lowercase();

    if tier.is_empty() {
        return category_score(
            category,
            max,
            vec![format!("The posting lists no {label}; full score awarded")],
        );
    }

    if resume_skills.is_empty() {
        let mut result = category_score(
            category,
            0.0,
            vec![
                "No skills were found in the resume".to_string(),
                "Category excluded from the overall score".to_string(),
            ],
        );
        result.missing_skills = tier.to_vec();
        result.not_specified = true;
        return result;
    }

    let resume_lower: HashSet<String> = resume_skills.iter().map(|s| s.to_lowercase()).collect();
    let (matching, missing): (Vec<String>, Vec<String>) = tier
        .iter()
        .cloned()
        .partition(|s| resume_lower.contains(&s.to_lowercase()));

    let ratio = skill_overlap(resume_skills, tier);
    let raw = ratio * max;

    let mut details = vec![format!("Matched {} of {} {label}", matching.len(), tier.len())];
    if !missing.is_empty() {
        details.push(format!("Missing: {}", missing.join(", ")));
    }
    details.push(format!(
        "{}/{} × {max} = {:.2}",
        matching.len(),
        tier.len(),
        raw
    ));

    let mut result = category_score(category, raw, details);
    result.matching_skills = matching;
    result.missing_skills = missing;
    result
}

fn score_experience(resume: &ResumeDocument, job: &JobPosting) -> CategoryScore {
    let category = Category::Experience;
    let max = category.max_points();

    if job.requirements_text.trim().is_empty() {
        return category_score(
            category,
            max,
            vec!["The posting states no requirements; full score awarded".to_string()],
        );
    }

    if !resume.has_experience() {
        let mut result = category_score(
            category,
            0.0,
            vec![
                "No work experience section was found in the resume".to_string(),
                "Category excluded from the overall score".to_string(),
            ],
        );
        result.not_specified = true;
        return result;
    }

    let ratio = word_overlap(&resume.experience_text, &job.requirements_text);
    let raw = ratio * max;
    category_score(
        category,
        raw,
        vec![
            format!(
                "{:.0}% of the requirement words appear in your experience",
                ratio * 100.0
            ),
            format!("{ratio:.2} × {max} = {raw:.2}"),
        ],
    )
}

fn score_education(
    resume: &ResumeDocument,
    job: &JobPosting,
    vocabulary: &Vocabulary,
) -> CategoryScore {
    let category = Category::Education;
    let max = category.max_points();

    if !job.requires_education() {
        return category_score(
            category,
            max,
            vec!["The posting states no education requirement; full score awarded".to_string()],
        );
    }

    if !resume.has_education() {
        let mut result = category_score(
            category,
            0.0,
            vec![
                format!("The posting asks for education ({})", job.education_required.trim()),
                "No education section was found in the resume".to_string(),
                "Category excluded from the overall score".to_string(),
            ],
        );
        result.not_specified = true;
        return result;
    }

    let resume_lower = resume.education_text.to_lowercase();
    if contains_any(&resume_lower, &vocabulary.keywords.education) {
        category_score(
            category,
            max,
            vec!["Education requirement covered".to_string()],
        )
    } else {
        category_score(
            category,
            max / 2.0,
            vec![
                "An education section is present but names no recognised degree or institution"
                    .to_string(),
                format!("Half credit: {:.1} of {max}", max / 2.0),
            ],
        )
    }
}

fn score_soft_skills(
    resume: &ResumeDocument,
    job: &JobPosting,
    vocabulary: &Vocabulary,
) -> CategoryScore {
    let category = Category::SoftSkills;
    let max = category.max_points();
    let job_lower = job.raw_text.to_lowercase();
    let resume_lower = resume.raw_text.to_lowercase();

    let demanded: Vec<_> = vocabulary
        .keywords
        .soft_skills
        .iter()
        .filter(|group| contains_any(&job_lower, &group.keywords))
        .collect();

    if demanded.is_empty() {
        return category_score(
            category,
            max,
            vec!["The posting mentions no soft skills; full score awarded".to_string()],
        );
    }

    let total = demanded.len();
    let (matched, unmatched): (Vec<_>, Vec<_>) = demanded
        .into_iter()
        .partition(|group| contains_any(&resume_lower, &group.keywords));
    let matching: Vec<String> = matched.iter().map(|g| g.name.clone()).collect();
    let missing: Vec<String> = unmatched.iter().map(|g| g.name.clone()).collect();

    let raw = matching.len() as f64 / total as f64 * max;
    let mut details = vec![format!(
        "Matched {} of {total} soft skills the posting asks for",
        matching.len()
    )];
    if !missing.is_empty() {
        details.push(format!("Not shown in the resume: {}", missing.join(", ")));
    }

    let mut result = category_score(category, raw, details);
    result.matching_skills = matching;
    result.missing_skills = missing;
    result
}

//! Gap detection and the plain recommendation list.

use std::collections::HashSet;

use crate::analysis::vocabulary::Vocabulary;
use crate::models::analysis::{Gap, GapCategory};
use crate::models::job::JobPosting;
use crate::models::resume::ResumeDocument;

const RECOMMENDED_SKILLS: usize = 3;
const ATS_MATCH_THRESHOLD: f64 = 0.5;

/// Gaps ordered skills → experience → education, at most one per category.
pub fn find_gaps(
    resume: &ResumeDocument,
    job: &JobPosting,
    vocabulary: &Vocabulary,
    skill_limit: usize,
) -> Vec<Gap> {
    let mut gaps = Vec::new();

    let missing = missing_skills(resume, job);
    if !missing.is_empty() {
        let items: Vec<String> = missing.into_iter().take(skill_limit).collect();
        gaps.push(Gap {
            category: GapCategory::Skills,
            description: format!("Missing skills: {}", items.join(", ")),
            items,
        });
    }

    let requirements = job.requirements_text.to_lowercase();
    let experience = resume.experience_text.to_lowercase();
    let unmet_keyword = vocabulary
        .keywords
        .experience_gap
        .iter()
        .any(|k| requirements.contains(k.as_str()) && !experience.contains(k.as_str()));
    if unmet_keyword && !resume.has_experience() {
        gaps.push(Gap {
            category: GapCategory::Experience,
            items: vec!["Work experience is not described in the resume".to_string()],
            description: "The resume has no work experience section".to_string(),
        });
    }

    if job.requires_education() && !resume.has_education() {
        gaps.push(Gap {
            category: GapCategory::Education,
            items: vec!["Education details are not provided".to_string()],
            description: "The resume has no education information".to_string(),
        });
    }

    gaps
}

/// Job skills absent from the resume (case-insensitive), in job order, deduplicated.
pub fn missing_skills(resume: &ResumeDocument, job: &JobPosting) -> Vec<String> {
    let have: HashSet<String> = resume.skills.iter().map(|s| s.to_lowercase()).collect();
    let mut seen = HashSet::new();
    job.skills
        .iter()
        .filter(|s| !have.contains(&s.to_lowercase()))
        .filter(|s| seen.insert(s.to_lowercase()))
        .cloned()
        .collect()
}

/// One sentence per gap, then an overall assessment keyed on the percentage,
/// then an ATS tip when fewer than half of the job skills are matched.
pub fn recommendations(
    gaps: &[Gap],
    resume: &ResumeDocument,
    job: &JobPosting,
    percentage: f64,
) -> Vec<String> {
    let mut out: Vec<String> = gaps
        .iter()
        .map(|gap| match gap.category {
            GapCategory::Skills => {
                let names: Vec<&str> = gap
                    .items
                    .iter()
                    .take(RECOMMENDED_SKILLS)
                    .map(String::as_str)
                    .collect();
                format!("Study the missing technologies: {}", names.join(", "))
            }
            GapCategory::Experience => {
                "Add a detailed description of your work experience and projects".to_string()
            }
            GapCategory::Education => "Add your education details to the resume".to_string(),
        })
        .collect();

    let both_have_skills = resume.has_skills() && !job.skills.is_empty();
    if percentage < 50.0 {
        if both_have_skills {
            let count = missing_skills(resume, job).len();
            out.push(format!(
                "Rework the resume to better match the posting: {count} of {} required technologies are not mentioned",
                job.skills.len()
            ));
        } else {
            out.push("Rework the resume to better match the posting requirements".to_string());
        }
    } else if percentage < 70.0 {
        out.push(
            "Moderate match. Focus on closing the gaps listed above to strengthen your application"
                .to_string(),
        );
    } else {
        out.push("Good fit. A little polish on wording and details is all the resume needs".to_string());
    }

    if skill_match_ratio(resume, job) < ATS_MATCH_THRESHOLD {
        out.push(
            "Use the posting's own keywords in your resume so applicant tracking systems pick them up"
                .to_string(),
        );
    }

    out
}

/// Share of job skills found in the resume; 1.0 when the job lists none.
fn skill_match_ratio(resume: &ResumeDocument, job: &JobPosting) -> f64 {
    if job.skills.is_empty() {
        return 1.0;
    }
    let missing = missing_skills(resume, job).len();
    let unique: HashSet<String> = job.skills.iter().map(|s| s.to_lowercase()).collect();
    (unique.len() - missing) as f64 / unique.len() as f64
}

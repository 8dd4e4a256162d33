//! Per-skill status table: present / partial / missing, with a proficiency
//! level guessed from the words around the skill mention.

use std::collections::HashSet;

use crate::analysis::vocabulary::{contains_any, find_phrase, Vocabulary};
use crate::models::analysis::{SkillLevel, SkillRow, SkillStatus};
use crate::models::job::JobPosting;
use crate::models::resume::ResumeDocument;

/// One row per job skill, in job-skill order.
pub fn build_skills_table(
    resume: &ResumeDocument,
    job: &JobPosting,
    vocabulary: &Vocabulary,
    level_window: usize,
) -> Vec<SkillRow> {
    let resume_skills: HashSet<String> = resume.skills.iter().map(|s| s.to_lowercase()).collect();
    let raw_lower = resume.raw_text.to_lowercase();

    job.skills
        .iter()
        .map(|skill| {
            if resume_skills.contains(&skill.to_lowercase()) {
                SkillRow {
                    skill: skill.clone(),
                    status: SkillStatus::Present,
                    level: infer_level(&raw_lower, skill, vocabulary, level_window),
                    action: "-".to_string(),
                }
            } else if has_alias(&raw_lower, skill, vocabulary) {
                SkillRow {
                    skill: skill.clone(),
                    status: SkillStatus::Partial,
                    level: SkillLevel::Intermediate,
                    action: format!("Practice {skill}"),
                }
            } else {
                SkillRow {
                    skill: skill.clone(),
                    status: SkillStatus::Missing,
                    level: SkillLevel::Basic,
                    action: format!("Learn {skill}"),
                }
            }
        })
        .collect()
}

/// Scans `window` characters on each side of the first mention of `skill`
/// for proficiency words. `Basic` when nothing is found or the skill is not
/// mentioned in the text.
pub fn infer_level(
    raw_lower: &str,
    skill: &str,
    vocabulary: &Vocabulary,
    window: usize,
) -> SkillLevel {
    let Some((start, len)) = locate_mention(raw_lower, skill, vocabulary) else {
        return SkillLevel::Basic;
    };

    let context: String = raw_lower
        .chars()
        .skip(start.saturating_sub(window))
        .take(window + len + window.min(start))
        .collect();

    let keywords = &vocabulary.keywords;
    if contains_any(&context, &keywords.advanced_level) {
        SkillLevel::Advanced
    } else if contains_any(&context, &keywords.intermediate_level) {
        SkillLevel::Intermediate
    } else {
        SkillLevel::Basic
    }
}

/// (char offset, char length) of the first mention of the skill, trying the
/// skill name itself before its vocabulary synonyms.
fn locate_mention(raw_lower: &str, skill: &str, vocabulary: &Vocabulary) -> Option<(usize, usize)> {
    let name = skill.to_lowercase();
    if let Some(byte) = find_phrase(raw_lower, &name) {
        return Some((raw_lower[..byte].chars().count(), name.chars().count()));
    }
    let entry = vocabulary.skill(skill)?;
    entry.synonyms.iter().find_map(|synonym| {
        vocabulary
            .find_synonym(raw_lower, synonym)
            .map(|offset| (offset, synonym.chars().count()))
    })
}

/// True when a known alias hint for `skill` starts a word in the text.
/// Hints are stems, so "контейнер" also matches "контейнеризация".
fn has_alias(raw_lower: &str, skill: &str, vocabulary: &Vocabulary) -> bool {
    vocabulary
        .keywords
        .aliases
        .iter()
        .filter(|(name, _)| name.eq_ignore_ascii_case(skill))
        .flat_map(|(_, hints)| hints.iter())
        .any(|hint| starts_word(raw_lower, hint))
}

fn starts_word(text: &str, stem: &str) -> bool {
    if stem.is_empty() {
        return false;
    }
    text.match_indices(stem)
        .any(|(i, _)| !text[..i].chars().next_back().is_some_and(char::is_alphanumeric))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn job(skills: &[&str]) -> JobPosting {
        JobPosting {
            skills: strings(skills),
            ..Default::default()
        }
    }

    #[test]
    fn test_one_row_per_job_skill_in_order() {
        let vocab = Vocabulary::default();
        let resume = ResumeDocument {
            raw_text: "Python developer".to_string(),
            skills: strings(&["Python"]),
            ..Default::default()
        };
        let table = build_skills_table(&resume, &job(&["Rust", "Python", "Go"]), &vocab, 50);
        let names: Vec<&str> = table.iter().map(|r| r.skill.as_str()).collect();
        assert_eq!(names, vec!["Rust", "Python", "Go"]);
        assert_eq!(table[1].status, SkillStatus::Present);
        assert_eq!(table[1].action, "-");
        assert_eq!(table[0].status, SkillStatus::Missing);
        assert_eq!(table[0].action, "Learn Rust");
    }

    #[test]
    fn test_container_wording_gives_partial_docker() {
        let vocab = Vocabulary::default();
        let resume = ResumeDocument {
            raw_text: "Настраивал контейнеризация сервисов и container registry".to_string(),
            ..Default::default()
        };
        let table = build_skills_table(&resume, &job(&["Docker"]), &vocab, 50);
        assert_eq!(table[0].status, SkillStatus::Partial);
        assert_eq!(table[0].level, SkillLevel::Intermediate);
        assert_eq!(table[0].action, "Practice Docker");
    }

    #[test]
    fn test_alias_must_start_a_word() {
        let vocab = Vocabulary::default();
        let resume = ResumeDocument {
            raw_text: "mypostgres fork".to_string(),
            ..Default::default()
        };
        let table = build_skills_table(&resume, &job(&["PostgreSQL"]), &vocab, 50);
        assert_eq!(table[0].status, SkillStatus::Missing);

        let resume = ResumeDocument {
            raw_text: "tuned postgres indexes".to_string(),
            ..Default::default()
        };
        let table = build_skills_table(&resume, &job(&["PostgreSQL"]), &vocab, 50);
        assert_eq!(table[0].status, SkillStatus::Partial);
    }

    #[test]
    fn test_level_advanced_near_mention() {
        let vocab = Vocabulary::default();
        let raw = "senior rust engineer";
        assert_eq!(infer_level(raw, "Rust", &vocab, 50), SkillLevel::Advanced);
    }

    #[test]
    fn test_level_intermediate_near_mention() {
        let vocab = Vocabulary::default();
        let raw = "3 years of python in production";
        assert_eq!(infer_level(raw, "Python", &vocab, 50), SkillLevel::Intermediate);
    }

    #[test]
    fn test_level_ignores_words_outside_window() {
        let vocab = Vocabulary::default();
        let raw = format!("senior{}python", " ".repeat(80));
        assert_eq!(infer_level(&raw, "Python", &vocab, 50), SkillLevel::Basic);
        assert_eq!(infer_level(&raw, "Python", &vocab, 100), SkillLevel::Advanced);
    }

    #[test]
    fn test_level_found_through_synonym() {
        let vocab = Vocabulary::default();
        // Python is mentioned only as "django".
        let raw = "expert django developer";
        assert_eq!(infer_level(raw, "Python", &vocab, 50), SkillLevel::Advanced);
    }

    #[test]
    fn test_level_window_stays_on_synonym_after_masked_phrases() {
        let vocab = Vocabulary::default();
        // "js" only stands alone at the very end; every "vue.js" is a longer phrase.
        let raw = format!("{}senior {}js", "vue.js ".repeat(10), "vue.js ".repeat(20));
        assert_eq!(infer_level(&raw, "JavaScript", &vocab, 50), SkillLevel::Basic);
    }

    #[test]
    fn test_level_basic_when_not_mentioned() {
        let vocab = Vocabulary::default();
        assert_eq!(infer_level("", "Rust", &vocab, 50), SkillLevel::Basic);
    }
}

//! Compatibility engine: pluggable, trait-based scorer for a resume against a job posting.
//!
//! Default: `KeywordCompatibilityScorer` (vocabulary matching + five-category breakdown).
//! `AppState` holds an `Arc<dyn CompatibilityScorer>` built once at startup.

use std::sync::Arc;

use tracing::{debug, info};

use crate::analysis::breakdown::{compatibility_percentage, compute_breakdown};
use crate::analysis::gaps::{find_gaps, recommendations};
use crate::analysis::motivation::{opening_line, summary_lines};
use crate::analysis::round2;
use crate::analysis::similarity::text_similarity;
use crate::analysis::skills_table::build_skills_table;
use crate::analysis::vocabulary::Vocabulary;
use crate::models::analysis::AnalysisResult;
use crate::models::job::JobPosting;
use crate::models::resume::ResumeDocument;

// ────────────────────────────────────────────────────────────────────────────
// Tunables
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Share of job skills treated as required (ceil, at least one).
    pub required_share_percent: u32,
    /// Characters on each side of a skill mention scanned for proficiency words.
    pub level_context_window: usize,
    pub vector_max_features: usize,
    pub vector_max_chars: usize,
    /// Missing skills listed in the skills gap.
    pub gap_skill_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            required_share_percent: 60,
            level_context_window: 50,
            vector_max_features: 500,
            vector_max_chars: 5000,
            gap_skill_limit: 5,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Implement this to swap scoring backends without touching handlers.
///
/// Implementations must be total: any two records, including empty ones,
/// produce a result.
pub trait CompatibilityScorer: Send + Sync {
    fn analyze(&self, resume: &ResumeDocument, job: &JobPosting) -> AnalysisResult;

    /// Vocabulary used to build documents from raw text for this scorer.
    fn vocabulary(&self) -> &Vocabulary;
}

// ────────────────────────────────────────────────────────────────────────────
// KeywordCompatibilityScorer
// ────────────────────────────────────────────────────────────────────────────

/// Algorithm:
/// 1. Five-category breakdown (required/preferred skills, experience, education, soft skills)
/// 2. compatibility = Σ score / Σ max × 100 over categories with data
/// 3. Per-skill table, gaps, recommendations and motivational text from the breakdown
pub struct KeywordCompatibilityScorer {
    vocabulary: Arc<Vocabulary>,
    config: EngineConfig,
}

impl KeywordCompatibilityScorer {
    pub fn new(vocabulary: Arc<Vocabulary>, config: EngineConfig) -> Self {
        Self { vocabulary, config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

impl CompatibilityScorer for KeywordCompatibilityScorer {
    fn analyze(&self, resume: &ResumeDocument, job: &JobPosting) -> AnalysisResult {
        let vocabulary = self.vocabulary.as_ref();
        let config = &self.config;

        debug!(
            "Analyzing resume ({} skills) against job ({} skills)",
            resume.skills.len(),
            job.skills.len()
        );

        let breakdown = compute_breakdown(resume, job, vocabulary, config);
        let compatibility = compatibility_percentage(&breakdown);

        let skills_table =
            build_skills_table(resume, job, vocabulary, config.level_context_window);
        let gaps = find_gaps(resume, job, vocabulary, config.gap_skill_limit);

        let mut recs = recommendations(&gaps, resume, job, compatibility);
        recs.extend(summary_lines(&breakdown, &gaps));

        let similarity = round2(text_similarity(&resume.raw_text, &job.raw_text, config));

        info!(
            "Analysis complete: {compatibility}% compatibility, {} gaps, text similarity {similarity}",
            gaps.len()
        );

        AnalysisResult {
            compatibility_percentage: compatibility,
            motivational_message: opening_line(compatibility),
            breakdown,
            skills_table,
            gaps,
            recommendations: recs,
            text_similarity: similarity,
            resume_skills: resume.skills.clone(),
            job_skills: job.skills.clone(),
        }
    }

    fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }
}

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Breakdown
// ────────────────────────────────────────────────────────────────────────────

/// One of the five fixed scoring buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    RequiredSkills,
    PreferredSkills,
    Experience,
    Education,
    SoftSkills,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::RequiredSkills,
        Category::PreferredSkills,
        Category::Experience,
        Category::Education,
        Category::SoftSkills,
    ];

    /// Point cap for the category. The caps sum to 100.
    pub fn max_points(self) -> f64 {
        match self {
            Category::RequiredSkills => 50.0,
            Category::PreferredSkills => 30.0,
            Category::Experience => 10.0,
            Category::Education => 5.0,
            Category::SoftSkills => 5.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::RequiredSkills => "Required skills",
            Category::PreferredSkills => "Preferred skills",
            Category::Experience => "Work experience",
            Category::Education => "Education",
            Category::SoftSkills => "Soft skills",
        }
    }
}

/// Score of a single breakdown category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub score: f64,
    pub max: f64,
    /// `score / max * 100`, rounded to 2 decimals.
    pub percentage: f64,
    /// Human-readable trace of how the score was computed.
    pub details: Vec<String>,
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    /// The resume had nothing to score here; excluded from the overall percentage.
    pub not_specified: bool,
}

/// Per-category scores, serialized as a map keyed by category name in fixed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breakdown {
    pub required_skills: CategoryScore,
    pub preferred_skills: CategoryScore,
    pub experience: CategoryScore,
    pub education: CategoryScore,
    pub soft_skills: CategoryScore,
}

impl Breakdown {
    pub fn get(&self, category: Category) -> &CategoryScore {
        match category {
            Category::RequiredSkills => &self.required_skills,
            Category::PreferredSkills => &self.preferred_skills,
            Category::Experience => &self.experience,
            Category::Education => &self.education,
            Category::SoftSkills => &self.soft_skills,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &CategoryScore)> {
        Category::ALL.into_iter().map(move |c| (c, self.get(c)))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Skills table
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillStatus {
    Present,
    Partial,
    Missing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillLevel {
    Basic,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRow {
    pub skill: String,
    pub status: SkillStatus,
    pub level: SkillLevel,
    /// "-" | "Practice {skill}" | "Learn {skill}"
    pub action: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Gaps
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapCategory {
    Skills,
    Experience,
    Education,
}

impl GapCategory {
    /// The breakdown categories a gap of this kind explains.
    pub fn categories(self) -> &'static [Category] {
        match self {
            GapCategory::Skills => &[Category::RequiredSkills, Category::PreferredSkills],
            GapCategory::Experience => &[Category::Experience],
            GapCategory::Education => &[Category::Education],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gap {
    pub category: GapCategory,
    pub items: Vec<String>,
    pub description: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Full result
// ────────────────────────────────────────────────────────────────────────────

/// Everything one `analyze` call produces. Built fresh per call and owned by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// 0 – 100, rounded to 2 decimals.
    pub compatibility_percentage: f64,
    pub breakdown: Breakdown,
    /// One row per job skill, in job-skill order.
    pub skills_table: Vec<SkillRow>,
    /// Ordered skills → experience → education.
    pub gaps: Vec<Gap>,
    pub recommendations: Vec<String>,
    pub motivational_message: String,
    /// Cosine similarity of the two raw texts. Display only.
    pub text_similarity: f64,
    pub resume_skills: Vec<String>,
    pub job_skills: Vec<String>,
}

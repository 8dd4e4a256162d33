use serde::{Deserialize, Serialize};

/// A job posting reduced to the fields the analysis engine consumes.
///
/// `skills` order matters: the leading share is treated as required,
/// the rest as preferred.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobPosting {
    pub raw_text: String,
    /// Display only.
    pub title: String,
    pub skills: Vec<String>,
    /// Requirements section, or a truncated prefix of `raw_text` when none was found.
    pub requirements_text: String,
    /// Display only, e.g. "3+ years".
    pub experience_required: String,
    /// Empty when the posting states no education requirement.
    pub education_required: String,
}

impl JobPosting {
    pub fn requires_education(&self) -> bool {
        !self.education_required.trim().is_empty()
    }
}

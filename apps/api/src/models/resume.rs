use serde::{Deserialize, Serialize};

/// A resume reduced to the fields the analysis engine consumes.
///
/// Produced either by an upstream extractor or by
/// [`build_resume`](crate::analysis::extract::build_resume) from raw text.
/// The engine never mutates it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeDocument {
    pub raw_text: String,
    /// Canonical skill names, unique case-insensitively, in vocabulary order.
    pub skills: Vec<String>,
    pub experience_text: String,
    pub education_text: String,
    /// Spoken languages mentioned in the text. Display only.
    pub languages: Vec<String>,
}

impl ResumeDocument {
    pub fn has_skills(&self) -> bool {
        !self.skills.is_empty()
    }

    pub fn has_experience(&self) -> bool {
        !self.experience_text.trim().is_empty()
    }

    pub fn has_education(&self) -> bool {
        !self.education_text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_deserialize_to_empty() {
        let resume: ResumeDocument = serde_json::from_str(r#"{"raw_text": "hello"}"#).unwrap();
        assert_eq!(resume.raw_text, "hello");
        assert!(resume.skills.is_empty());
        assert!(!resume.has_experience());
        assert!(!resume.has_education());
    }

    #[test]
    fn test_whitespace_only_sections_count_as_missing() {
        let resume = ResumeDocument {
            experience_text: "  \n ".to_string(),
            education_text: "\t".to_string(),
            ..Default::default()
        };
        assert!(!resume.has_experience());
        assert!(!resume.has_education());
    }
}

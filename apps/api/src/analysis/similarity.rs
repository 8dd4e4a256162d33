//! Similarity functions: skill-list overlap, bag-of-words overlap, and TF-IDF
//! cosine similarity with a bag-of-words fallback.

use std::collections::{BTreeMap, HashSet};

use thiserror::Error;
use tracing::debug;

use crate::analysis::engine::EngineConfig;
use crate::analysis::truncate_chars;

/// Why the TF-IDF path could not produce vectors. Recovered locally, never surfaced.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VectorizationError {
    #[error("no documents to fit")]
    EmptyCorpus,

    #[error("empty vocabulary; documents contain only stop words")]
    EmptyVocabulary,
}

// ────────────────────────────────────────────────────────────────────────────
// Set overlaps
// ────────────────────────────────────────────────────────────────────────────

/// `|lower(a) ∩ lower(b)| / |b|`, capped at 1.0.
///
/// 1.0 when `b` is empty, 0.0 when only `a` is empty.
pub fn skill_overlap(a: &[String], b: &[String]) -> f64 {
    if b.is_empty() {
        return 1.0;
    }
    if a.is_empty() {
        return 0.0;
    }
    let a_lower: HashSet<String> = a.iter().map(|s| s.to_lowercase()).collect();
    let b_lower: HashSet<String> = b.iter().map(|s| s.to_lowercase()).collect();
    let matched = a_lower.intersection(&b_lower).count();
    (matched as f64 / b.len() as f64).min(1.0)
}

/// Share of the distinct whitespace-separated words of `text2` that also occur
/// in `text1`, case-insensitive. 1.0 when `text2` has no words.
pub fn word_overlap(text1: &str, text2: &str) -> f64 {
    let lower1 = text1.to_lowercase();
    let lower2 = text2.to_lowercase();
    let words1: HashSet<&str> = lower1.split_whitespace().collect();
    let words2: HashSet<&str> = lower2.split_whitespace().collect();

    if words2.is_empty() {
        return 1.0;
    }
    let common = words1.intersection(&words2).count();
    common as f64 / words2.len() as f64
}

// ────────────────────────────────────────────────────────────────────────────
// Vector space
// ────────────────────────────────────────────────────────────────────────────

/// Cosine similarity of the TF-IDF vectors of two texts, fitted on just those
/// two documents. 0.0 when either text is blank. Falls back to
/// [`word_overlap`] when no vocabulary can be built.
pub fn text_similarity(text1: &str, text2: &str, config: &EngineConfig) -> f64 {
    if text1.trim().is_empty() || text2.trim().is_empty() {
        return 0.0;
    }
    let text1 = truncate_chars(text1, config.vector_max_chars);
    let text2 = truncate_chars(text2, config.vector_max_chars);

    match tfidf_cosine(text1, text2, config.vector_max_features) {
        Ok(similarity) => similarity,
        Err(e) => {
            debug!("TF-IDF unavailable ({e}); using word overlap");
            word_overlap(text1, text2)
        }
    }
}

/// Primary path of [`text_similarity`]. A fresh vectorizer is fitted per call.
pub fn tfidf_cosine(
    text1: &str,
    text2: &str,
    max_features: usize,
) -> Result<f64, VectorizationError> {
    let vectorizer = TfIdfVectorizer::fit(&[text1, text2], max_features)?;
    debug!("TF-IDF vocabulary: {} terms", vectorizer.dimensions());
    let a = vectorizer.transform(text1);
    let b = vectorizer.transform(text2);
    Ok(cosine(&a, &b).clamp(0.0, 1.0))
}

/// Two-document TF-IDF model: raw term counts, smoothed IDF, L2-normalised rows.
///
/// Ordered maps keep every floating-point sum in a fixed order so repeated runs
/// give bit-identical results.
#[derive(Debug, Clone)]
pub struct TfIdfVectorizer {
    /// term → dimension index
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
}

impl TfIdfVectorizer {
    /// Builds the vocabulary from the `max_features` most frequent terms of the
    /// corpus (ties broken alphabetically) and computes
    /// `idf = ln((1 + n) / (1 + df)) + 1`.
    pub fn fit(documents: &[&str], max_features: usize) -> Result<Self, VectorizationError> {
        if documents.is_empty() {
            return Err(VectorizationError::EmptyCorpus);
        }

        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| tokenize(d)).collect();

        let mut term_freq: BTreeMap<&str, usize> = BTreeMap::new();
        let mut doc_freq: BTreeMap<&str, usize> = BTreeMap::new();
        for tokens in &tokenized {
            let mut seen: HashSet<&str> = HashSet::new();
            for token in tokens {
                *term_freq.entry(token.as_str()).or_insert(0) += 1;
                if seen.insert(token.as_str()) {
                    *doc_freq.entry(token.as_str()).or_insert(0) += 1;
                }
            }
        }

        if term_freq.is_empty() || max_features == 0 {
            return Err(VectorizationError::EmptyVocabulary);
        }

        let mut ranked: Vec<(&str, usize)> = term_freq.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(max_features);

        let mut kept: Vec<&str> = ranked.into_iter().map(|(term, _)| term).collect();
        kept.sort_unstable();

        let n = documents.len() as f64;
        let mut vocabulary = BTreeMap::new();
        let mut idf = Vec::with_capacity(kept.len());
        for (idx, term) in kept.into_iter().enumerate() {
            let df = doc_freq.get(term).copied().unwrap_or(0) as f64;
            idf.push(((1.0 + n) / (1.0 + df)).ln() + 1.0);
            vocabulary.insert(term.to_string(), idx);
        }

        Ok(Self { vocabulary, idf })
    }

    pub fn dimensions(&self) -> usize {
        self.idf.len()
    }

    /// L2-normalised TF-IDF vector. All zeros when no term is in the vocabulary.
    pub fn transform(&self, text: &str) -> Vec<f64> {
        let mut vector = vec![0.0; self.idf.len()];
        for token in tokenize(text) {
            if let Some(&idx) = self.vocabulary.get(&token) {
                vector[idx] += 1.0;
            }
        }
        for (value, idf) in vector.iter_mut().zip(&self.idf) {
            *value *= idf;
        }
        normalize(&mut vector);
        vector
    }
}

/// Lowercase, split on anything that is not a word character, keep tokens of
/// two or more characters that are not English stop words.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|w| w.chars().count() >= 2)
        .filter(|w| !STOP_WORDS.contains(w))
        .map(str::to_string)
        .collect()
}

fn normalize(v: &mut [f64]) {
    let norm = v.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}

/// Dot product of two unit vectors. 0.0 when either is all zeros.
fn cosine(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "almost", "also", "am", "among",
    "an", "and", "any", "are", "as", "at", "be", "because", "been", "before", "being", "below",
    "between", "both", "but", "by", "can", "cannot", "could", "did", "do", "does", "doing",
    "down", "during", "each", "either", "else", "etc", "ever", "every", "few", "for", "from",
    "further", "had", "has", "have", "having", "he", "her", "here", "hers", "herself", "him",
    "himself", "his", "how", "however", "i", "ie", "if", "in", "into", "is", "it", "its",
    "itself", "just", "least", "less", "may", "me", "might", "more", "most", "much", "must",
    "my", "myself", "neither", "no", "nor", "not", "now", "of", "off", "often", "on", "once",
    "only", "or", "other", "our", "ours", "ourselves", "out", "over", "own", "per", "rather",
    "same", "she", "should", "since", "so", "some", "such", "than", "that", "the", "their",
    "theirs", "them", "themselves", "then", "there", "these", "they", "this", "those",
    "through", "thus", "to", "too", "under", "until", "up", "upon", "us", "very", "via", "was",
    "we", "well", "were", "what", "when", "where", "whether", "which", "while", "who", "whom",
    "whose", "why", "will", "with", "within", "without", "would", "yet", "you", "your",
    "yours", "yourself", "yourselves",
];

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_skill_overlap_edge_rules() {
        assert_eq!(skill_overlap(&skills(&["Rust"]), &[]), 1.0);
        assert_eq!(skill_overlap(&[], &[]), 1.0);
        assert_eq!(skill_overlap(&[], &skills(&["Rust"])), 0.0);
    }

    #[test]
    fn test_skill_overlap_case_insensitive_ratio() {
        let a = skills(&["python", "SQL"]);
        let b = skills(&["Python", "SQL", "Docker"]);
        let ratio = skill_overlap(&a, &b);
        assert!((ratio - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_skill_overlap_bounded() {
        let a = skills(&["Rust", "Go", "Python"]);
        let b = skills(&["rust"]);
        let ratio = skill_overlap(&a, &b);
        assert!((0.0..=1.0).contains(&ratio));
        assert_eq!(ratio, 1.0);
    }

    #[test]
    fn test_word_overlap() {
        assert_eq!(word_overlap("anything", ""), 1.0);
        assert_eq!(word_overlap("", "two words"), 0.0);
        assert_eq!(word_overlap("Rust and Go", "rust python"), 0.5);
    }

    #[test]
    fn test_identical_texts_have_similarity_one() {
        let config = EngineConfig::default();
        let text = "Senior Rust engineer building distributed storage systems";
        let sim = text_similarity(text, text, &config);
        assert!((sim - 1.0).abs() < 1e-9, "similarity was {sim}");
    }

    #[test]
    fn test_empty_text_similarity_is_zero() {
        let config = EngineConfig::default();
        assert_eq!(text_similarity("", "rust", &config), 0.0);
        assert_eq!(text_similarity("rust", "   ", &config), 0.0);
    }

    #[test]
    fn test_disjoint_texts_have_similarity_zero() {
        let config = EngineConfig::default();
        assert_eq!(text_similarity("kafka streams", "pottery glazing", &config), 0.0);
    }

    #[test]
    fn test_partial_similarity_between_zero_and_one() {
        let config = EngineConfig::default();
        let sim = text_similarity(
            "python developer with docker experience",
            "looking for python engineer who knows kubernetes",
            &config,
        );
        assert!(sim > 0.0 && sim < 1.0, "similarity was {sim}");
    }

    #[test]
    fn test_stop_words_only_falls_back_to_word_overlap() {
        let config = EngineConfig::default();
        assert_eq!(
            tfidf_cosine("the and of", "of the", config.vector_max_features),
            Err(VectorizationError::EmptyVocabulary)
        );
        assert_eq!(text_similarity("the and of", "of the", &config), 1.0);
    }

    #[test]
    fn test_fit_caps_vocabulary() {
        let vectorizer = TfIdfVectorizer::fit(&["aa bb cc dd", "aa bb"], 2).unwrap();
        assert_eq!(vectorizer.dimensions(), 2);
        // Terms outside the vocabulary contribute nothing.
        assert!(vectorizer.transform("cc dd").iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_fit_empty_corpus() {
        assert_eq!(
            TfIdfVectorizer::fit(&[], 10).unwrap_err(),
            VectorizationError::EmptyCorpus
        );
    }

    #[test]
    fn test_similarity_is_deterministic() {
        let config = EngineConfig::default();
        let a = "rust tokio axum serde tracing postgres kafka redis";
        let b = "we use rust with axum and kafka plus some go services";
        let first = text_similarity(a, b, &config);
        for _ in 0..10 {
            assert_eq!(text_similarity(a, b, &config).to_bits(), first.to_bits());
        }
    }
}

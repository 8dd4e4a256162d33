//! Skill vocabulary and keyword tables shared by every extractor and matcher.
//!
//! Built once at startup and passed by reference into the pure functions of the
//! engine. Nothing in here is mutated after construction.

use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;
use tracing::info;

/// Errors raised while loading a custom skill table.
#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error("failed to read vocabulary file: {0}")]
    Io(#[from] std::io::Error),

    #[error("vocabulary file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("vocabulary entry '{0}' must be a non-empty array of strings")]
    InvalidEntry(String),

    #[error("vocabulary contains no skills")]
    Empty,
}

/// A canonical skill and the lowercase phrases that indicate it.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillEntry {
    pub name: String,
    pub synonyms: Vec<String>,
}

/// A soft-skill family detected by stem/substring presence.
#[derive(Debug, Clone, PartialEq)]
pub struct SoftSkillGroup {
    pub name: String,
    pub keywords: Vec<String>,
}

/// Keyword lists used by the section extractors and heuristics.
/// All entries are lowercase and matched as plain substrings.
#[derive(Debug, Clone)]
pub struct KeywordSets {
    pub experience: Vec<String>,
    pub education: Vec<String>,
    pub requirements: Vec<String>,
    /// Words in job requirements that signal an experience expectation.
    pub experience_gap: Vec<String>,
    pub education_requirement: Vec<String>,
    pub vacancy_markers: Vec<String>,
    pub languages: Vec<String>,
    pub advanced_level: Vec<String>,
    pub intermediate_level: Vec<String>,
    pub soft_skills: Vec<SoftSkillGroup>,
    /// Canonical skill → free-text hints that suggest partial familiarity.
    pub aliases: Vec<(String, Vec<String>)>,
}

#[derive(Debug, Clone)]
pub struct Vocabulary {
    skills: Vec<SkillEntry>,
    /// synonym → longer vocabulary phrases that contain it, longest first
    shadows: HashMap<String, Vec<String>>,
    pub keywords: KeywordSets,
}

// ────────────────────────────────────────────────────────────────────────────
// Built-in tables
// ────────────────────────────────────────────────────────────────────────────

const DEFAULT_SKILLS: &[(&str, &[&str])] = &[
    // Languages
    ("Python", &["python", "python3", "python 3", "django", "flask", "fastapi"]),
    ("JavaScript", &["javascript", "js", "ecmascript", "node.js", "nodejs", "node"]),
    ("TypeScript", &["typescript", "ts"]),
    ("Java", &["java", "spring", "spring boot"]),
    ("C++", &["c++", "cpp", "c plus plus"]),
    ("C#", &["c#", "csharp", "dotnet", ".net", "asp.net"]),
    ("Go", &["go", "golang"]),
    ("Rust", &["rust"]),
    ("PHP", &["php"]),
    ("Ruby", &["ruby", "rails", "ruby on rails"]),
    ("Swift", &["swift"]),
    ("Kotlin", &["kotlin"]),
    ("Scala", &["scala"]),
    ("R", &["r language", "r programming"]),
    // Frameworks
    ("React", &["react", "react.js", "reactjs"]),
    ("Vue", &["vue", "vue.js", "vuejs"]),
    ("Angular", &["angular", "angularjs"]),
    ("Node.js", &["node.js", "nodejs", "node", "express"]),
    ("Django", &["django"]),
    ("Flask", &["flask"]),
    ("FastAPI", &["fastapi", "fast api"]),
    ("Spring", &["spring", "spring boot", "spring framework"]),
    ("Laravel", &["laravel"]),
    ("Symfony", &["symfony"]),
    // Databases
    ("SQL", &["sql", "mysql", "postgresql", "oracle", "mssql"]),
    ("PostgreSQL", &["postgresql", "postgres"]),
    ("MySQL", &["mysql", "mariadb"]),
    ("MongoDB", &["mongodb", "mongo"]),
    ("Redis", &["redis"]),
    ("Elasticsearch", &["elasticsearch"]),
    ("Cassandra", &["cassandra"]),
    ("DynamoDB", &["dynamodb", "dynamo db"]),
    // Cloud and infrastructure
    ("AWS", &["aws", "amazon web services", "amazon aws"]),
    ("Azure", &["azure", "microsoft azure"]),
    ("GCP", &["gcp", "google cloud", "google cloud platform"]),
    ("Docker", &["docker", "dockerfile", "docker compose"]),
    ("Kubernetes", &["kubernetes", "k8s"]),
    ("Terraform", &["terraform"]),
    ("Ansible", &["ansible"]),
    // Tooling
    ("Git", &["git"]),
    ("GitHub", &["github"]),
    ("GitLab", &["gitlab"]),
    ("Linux", &["linux", "unix", "bash", "shell"]),
    ("CI/CD", &["ci/cd", "jenkins", "gitlab ci", "github actions", "circleci"]),
    ("Jira", &["jira"]),
    ("Confluence", &["confluence"]),
    // Process
    ("Agile", &["agile", "scrum", "kanban"]),
    ("Scrum", &["scrum", "scrum master"]),
    ("DevOps", &["devops", "dev ops"]),
    // Data
    ("Machine Learning", &["machine learning", "ml", "deep learning"]),
    ("Data Science", &["data science", "data scientist"]),
    ("TensorFlow", &["tensorflow"]),
    ("PyTorch", &["pytorch", "torch"]),
    ("Pandas", &["pandas"]),
    ("NumPy", &["numpy"]),
    ("Scikit-learn", &["scikit-learn", "sklearn", "scikit learn"]),
    // Frontend
    ("HTML", &["html", "html5"]),
    ("CSS", &["css", "css3", "sass", "scss"]),
    ("Bootstrap", &["bootstrap"]),
    ("Tailwind CSS", &["tailwind", "tailwind css"]),
    ("Webpack", &["webpack"]),
    ("Vite", &["vite"]),
    // APIs
    ("REST API", &["rest api", "restful", "restful api"]),
    ("GraphQL", &["graphql", "graph ql"]),
    ("gRPC", &["grpc", "g rpc"]),
    // Architecture and messaging
    ("Microservices", &["microservices", "micro services"]),
    ("RabbitMQ", &["rabbitmq", "rabbit mq"]),
    ("Kafka", &["kafka", "apache kafka"]),
];

const SOFT_SKILLS: &[(&str, &[&str])] = &[
    (
        "communication",
        &["коммуникаб", "общени", "переговор", "презентац", "communicat", "presentation", "negotiat"],
    ),
    (
        "leadership",
        &["лидер", "руковод", "наставни", "leadership", "leader", "mentor", "team lead"],
    ),
    (
        "adaptability",
        &["адаптив", "гибкост", "обучаем", "adaptab", "flexib", "fast learner", "quick learner"],
    ),
    (
        "responsibility",
        &["ответствен", "пунктуал", "responsib", "accountab", "ownership", "reliab"],
    ),
    (
        "creativity",
        &["креатив", "нестандартн", "инновац", "creativ", "innovat", "problem solving", "problem-solving"],
    ),
];

const EXPERIENCE_KEYWORDS: &[&str] = &[
    "опыт", "experience", "работал", "работала", "работаю", "worked", "employment",
];

const EDUCATION_KEYWORDS: &[&str] = &[
    "образование", "education", "университет", "институт", "вуз", "university", "institute",
    "college", "bachelor", "master", "degree", "бакалавр", "магистр",
];

const REQUIREMENT_KEYWORDS: &[&str] = &[
    "требования", "requirements", "обязательно", "необходимо", "нужно", "должен", "должна",
    "must have", "required", "qualifications",
];

const EXPERIENCE_GAP_KEYWORDS: &[&str] = &["опыт", "experience", "работал", "проект", "project"];

const EDUCATION_REQUIREMENT_KEYWORDS: &[&str] = &[
    "высшее образование", "higher education", "университет", "university", "бакалавр", "магистр",
    "bachelor", "master", "degree",
];

const VACANCY_MARKERS: &[&str] = &["вакансия", "требуется", "ищем", "vacancy", "position", "hiring"];

const LANGUAGES: &[&str] = &[
    "русский", "английский", "немецкий", "французский", "испанский", "russian", "english",
    "german", "french", "spanish",
];

const ADVANCED_LEVEL: &[&str] = &[
    "senior", "expert", "advanced", "lead", "architect", "эксперт", "продвинут", "ведущ",
    "глубок", "сеньор",
];

const INTERMEDIATE_LEVEL: &[&str] = &[
    "middle", "intermediate", "experienced", "proficient", "уверенн", "опыт", "experience",
    "years", "лет", "год",
];

const PARTIAL_ALIASES: &[(&str, &[&str])] = &[
    ("Docker", &["container", "контейнер"]),
    ("Kubernetes", &["k8s", "orchestration", "оркестрац", "openshift"]),
    ("AWS", &["amazon", "cloud", "облач"]),
    ("PostgreSQL", &["postgres", "sql"]),
    ("SQL", &["database", "баз данных", "query"]),
    ("React", &["jsx", "next.js"]),
    ("Git", &["github", "gitlab", "version control", "контроль версий"]),
    ("CI/CD", &["pipeline", "пайплайн", "jenkins"]),
    ("Linux", &["unix", "ubuntu", "debian", "bash"]),
    ("Machine Learning", &["нейросет", "neural"]),
];

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for KeywordSets {
    fn default() -> Self {
        Self {
            experience: owned(EXPERIENCE_KEYWORDS),
            education: owned(EDUCATION_KEYWORDS),
            requirements: owned(REQUIREMENT_KEYWORDS),
            experience_gap: owned(EXPERIENCE_GAP_KEYWORDS),
            education_requirement: owned(EDUCATION_REQUIREMENT_KEYWORDS),
            vacancy_markers: owned(VACANCY_MARKERS),
            languages: owned(LANGUAGES),
            advanced_level: owned(ADVANCED_LEVEL),
            intermediate_level: owned(INTERMEDIATE_LEVEL),
            soft_skills: SOFT_SKILLS
                .iter()
                .map(|(name, kws)| SoftSkillGroup {
                    name: name.to_string(),
                    keywords: owned(kws),
                })
                .collect(),
            aliases: PARTIAL_ALIASES
                .iter()
                .map(|(skill, hints)| (skill.to_string(), owned(hints)))
                .collect(),
        }
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        let skills = DEFAULT_SKILLS
            .iter()
            .map(|(name, synonyms)| SkillEntry {
                name: name.to_string(),
                synonyms: owned(synonyms),
            })
            .collect();
        Self::new(skills, KeywordSets::default())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Construction
// ────────────────────────────────────────────────────────────────────────────

impl Vocabulary {
    pub fn new(skills: Vec<SkillEntry>, keywords: KeywordSets) -> Self {
        let skills: Vec<SkillEntry> = skills
            .into_iter()
            .map(|s| SkillEntry {
                name: s.name,
                synonyms: s.synonyms.iter().map(|p| p.to_lowercase()).collect(),
            })
            .collect();
        let shadows = build_shadows(&skills);
        Self {
            skills,
            shadows,
            keywords,
        }
    }

    /// Loads a skill table from a JSON object `{"Canonical": ["synonym", ...]}`.
    /// File order becomes vocabulary order. Keyword sets stay at their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, VocabularyError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let vocabulary = Self::from_json_str(&raw)?;
        info!(
            "Loaded skill vocabulary from {} ({} skills)",
            path.as_ref().display(),
            vocabulary.skills.len()
        );
        Ok(vocabulary)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, VocabularyError> {
        let table: serde_json::Map<String, serde_json::Value> = serde_json::from_str(raw)?;
        if table.is_empty() {
            return Err(VocabularyError::Empty);
        }

        let mut skills = Vec::with_capacity(table.len());
        for (name, value) in table {
            let synonyms: Vec<String> = serde_json::from_value(value)
                .map_err(|_| VocabularyError::InvalidEntry(name.clone()))?;
            if synonyms.is_empty() || synonyms.iter().any(|s| s.trim().is_empty()) {
                return Err(VocabularyError::InvalidEntry(name));
            }
            skills.push(SkillEntry { name, synonyms });
        }

        Ok(Self::new(skills, KeywordSets::default()))
    }

    pub fn skills(&self) -> &[SkillEntry] {
        &self.skills
    }

    pub fn skill(&self, name: &str) -> Option<&SkillEntry> {
        self.skills.iter().find(|s| s.name.eq_ignore_ascii_case(name))
    }

    // ────────────────────────────────────────────────────────────────────────
    // Lookup
    // ────────────────────────────────────────────────────────────────────────

    /// Canonical names of every skill with at least one boundary-respecting
    /// synonym occurrence in `text`, in vocabulary order.
    pub fn find_skills(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        self.skills
            .iter()
            .filter(|skill| self.mentions(&lower, skill))
            .map(|skill| skill.name.clone())
            .collect()
    }

    /// True when `lower` (already lowercased) mentions any synonym of `skill`.
    pub fn mentions(&self, lower: &str, skill: &SkillEntry) -> bool {
        skill
            .synonyms
            .iter()
            .any(|synonym| self.find_synonym(lower, synonym).is_some())
    }

    /// Char offset of the first isolated occurrence of `synonym`.
    ///
    /// Longer vocabulary phrases containing the synonym are blanked out first,
    /// so "git" is not found in text that only says "github".
    pub fn find_synonym(&self, lower: &str, synonym: &str) -> Option<usize> {
        match self.shadows.get(synonym) {
            Some(longer) => {
                let masked = mask_phrases(lower, longer);
                find_phrase(&masked, synonym)
                    .map(|byte| masked[..byte].chars().count())
            }
            None => find_phrase(lower, synonym).map(|byte| lower[..byte].chars().count()),
        }
    }
}

/// For each synonym, the other phrases in the vocabulary that strictly contain it.
fn build_shadows(skills: &[SkillEntry]) -> HashMap<String, Vec<String>> {
    let mut phrases: Vec<&str> = skills
        .iter()
        .flat_map(|s| s.synonyms.iter().map(String::as_str))
        .collect();
    phrases.sort_unstable();
    phrases.dedup();

    let mut shadows = HashMap::new();
    for &short in &phrases {
        let mut longer: Vec<String> = phrases
            .iter()
            .filter(|&&p| p.len() > short.len() && p.contains(short))
            .map(|p| p.to_string())
            .collect();
        if !longer.is_empty() {
            longer.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
            shadows.insert(short.to_string(), longer);
        }
    }
    shadows
}

/// Blanks every occurrence of each phrase with as many spaces as it has chars,
/// so char offsets in the masked text match the original.
fn mask_phrases(text: &str, phrases: &[String]) -> String {
    let mut masked = text.to_string();
    for phrase in phrases {
        if masked.contains(phrase.as_str()) {
            masked = masked.replace(phrase.as_str(), &" ".repeat(phrase.chars().count()));
        }
    }
    masked
}

/// Byte offset of the first occurrence of `phrase` in `text` that sits on word
/// boundaries. A side is only checked when the phrase begins/ends with an
/// alphanumeric character, so ".net" or "c++" still match next to punctuation.
pub fn find_phrase(text: &str, phrase: &str) -> Option<usize> {
    if phrase.is_empty() {
        return None;
    }
    let check_start = phrase.chars().next().is_some_and(char::is_alphanumeric);
    let check_end = phrase.chars().next_back().is_some_and(char::is_alphanumeric);

    text.match_indices(phrase).map(|(i, _)| i).find(|&i| {
        let before_ok = !check_start
            || !text[..i].chars().next_back().is_some_and(char::is_alphanumeric);
        let after_ok = !check_end
            || !text[i + phrase.len()..]
                .chars()
                .next()
                .is_some_and(char::is_alphanumeric);
        before_ok && after_ok
    })
}

/// Plain substring presence of any keyword in already-lowercased text.
pub fn contains_any(lower: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|k| lower.contains(k.as_str()))
}

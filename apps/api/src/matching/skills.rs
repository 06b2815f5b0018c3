//! Skill extractor — finds vocabulary skills mentioned in free text.
//!
//! A term matches only as a whole word: the characters around it must not be
//! letters, digits, or underscores. Terms with punctuation (`c++`, `node.js`)
//! are matched literally.

use regex::Regex;

/// Skills recognised in resumes and job descriptions. All lower case.
pub const DEFAULT_VOCABULARY: &[&str] = &[
    "javascript",
    "typescript",
    "python",
    "java",
    "kotlin",
    "swift",
    "go",
    "rust",
    "c++",
    "c#",
    "php",
    "ruby",
    "dart",
    "html",
    "css",
    "tailwind",
    "bootstrap",
    "react",
    "angular",
    "vue",
    "next.js",
    "node",
    "express",
    "django",
    "flask",
    "spring",
    "laravel",
    "flutter",
    "react native",
    "graphql",
    "rest",
    "sql",
    "mysql",
    "postgresql",
    "mongodb",
    "redis",
    "firebase",
    "docker",
    "kubernetes",
    "aws",
    "azure",
    "gcp",
    "linux",
    "git",
    "ci/cd",
    "machine learning",
    "deep learning",
    "tensorflow",
    "pytorch",
    "pandas",
    "data analysis",
    "excel",
    "power bi",
    "figma",
    "ui/ux",
    "seo",
    "digital marketing",
    "communication",
    "leadership",
    "project management",
];

/// Compiled whole-word matcher over a fixed vocabulary.
#[derive(Debug)]
pub struct SkillExtractor {
    terms: Vec<(String, Regex)>,
}

impl SkillExtractor {
    pub fn new<I, S>(vocabulary: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut terms: Vec<(String, Regex)> = Vec::new();
        for term in vocabulary {
            let term = term.as_ref().trim().to_lowercase();
            if term.is_empty() || terms.iter().any(|(t, _)| *t == term) {
                continue;
            }
            let pattern = format!(r"(?i)(?:^|[^\w]){}(?:[^\w]|$)", regex::escape(&term));
            terms.push((term, Regex::new(&pattern)?));
        }
        Ok(Self { terms })
    }

    pub fn with_default_vocabulary() -> Result<Self, regex::Error> {
        Self::new(DEFAULT_VOCABULARY.iter().copied())
    }

    /// Returns the vocabulary terms found in `text`, in vocabulary order.
    pub fn extract(&self, text: &str) -> Vec<String> {
        self.terms
            .iter()
            .filter(|(_, re)| re.is_match(text))
            .map(|(term, _)| term.clone())
            .collect()
    }

    pub fn vocabulary(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(|(t, _)| t.as_str())
    }
}

/// Trims and case-folds a free-text skill list, dropping empties and
/// duplicates while keeping first-seen order.
pub fn normalize_skills<I, S>(skills: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for skill in skills {
        let skill = skill.as_ref().trim().to_lowercase();
        if !skill.is_empty() && !out.contains(&skill) {
            out.push(skill);
        }
    }
    out
}

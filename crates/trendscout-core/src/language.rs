// Language filters offered on the first screen
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    All,
    Go,
    Java,
    JavaScript,
    TypeScript,
    Python,
    Ruby,
    Php,
    Swift,
    Kotlin,
    Rust,
    Scala,
}

impl Language {
    /// Display order of the picker
    pub const ALL: [Language; 12] = [
        Language::All,
        Language::Go,
        Language::Java,
        Language::JavaScript,
        Language::TypeScript,
        Language::Python,
        Language::Ruby,
        Language::Php,
        Language::Swift,
        Language::Kotlin,
        Language::Rust,
        Language::Scala,
    ];

    /// URL path segment used by the trending page
    pub fn slug(&self) -> &'static str {
        match self {
            Language::All => "all",
            Language::Go => "go",
            Language::Java => "java",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Python => "python",
            Language::Ruby => "ruby",
            Language::Php => "php",
            Language::Swift => "swift",
            Language::Kotlin => "kotlin",
            Language::Rust => "rust",
            Language::Scala => "scala",
        }
    }

    /// Slug to filter by, or `None` for the unfiltered page
    pub fn filter(&self) -> Option<&'static str> {
        match self {
            Language::All => None,
            other => Some(other.slug()),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_unfiltered() {
        assert_eq!(Language::All.filter(), None);
        assert_eq!(Language::Go.filter(), Some("go"));
        assert_eq!(Language::ALL[0], Language::All);
    }

    #[test]
    fn test_slugs_are_unique() {
        let mut slugs: Vec<_> = Language::ALL.iter().map(|l| l.slug()).collect();
        slugs.sort();
        slugs.dedup();
        assert_eq!(slugs.len(), Language::ALL.len());
    }
}

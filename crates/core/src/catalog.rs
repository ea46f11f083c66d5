use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of file content the generator can produce.
///
/// The set is closed: every category maps to exactly one canonical extension
/// through [`FileCategory::extension`], and the compiler enforces that the
/// mapping stays total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    Python,
    JavaScript,
    TypeScript,
    Html,
    Css,
    Json,
    Markdown,
    Text,
    Sql,
    Bash,
}

impl FileCategory {
    /// Every category, in declaration order.
    pub const ALL: [FileCategory; 10] = [
        FileCategory::Python,
        FileCategory::JavaScript,
        FileCategory::TypeScript,
        FileCategory::Html,
        FileCategory::Css,
        FileCategory::Json,
        FileCategory::Markdown,
        FileCategory::Text,
        FileCategory::Sql,
        FileCategory::Bash,
    ];

    /// Canonical filename extension, including the leading dot.
    pub const fn extension(self) -> &'static str {
        match self {
            FileCategory::Python => ".py",
            FileCategory::JavaScript => ".js",
            FileCategory::TypeScript => ".ts",
            FileCategory::Html => ".html",
            FileCategory::Css => ".css",
            FileCategory::Json => ".json",
            FileCategory::Markdown => ".md",
            FileCategory::Text => ".txt",
            FileCategory::Sql => ".sql",
            FileCategory::Bash => ".sh",
        }
    }

    /// Lowercase identifier, shared by serde and the CLI.
    pub const fn as_str(self) -> &'static str {
        match self {
            FileCategory::Python => "python",
            FileCategory::JavaScript => "javascript",
            FileCategory::TypeScript => "typescript",
            FileCategory::Html => "html",
            FileCategory::Css => "css",
            FileCategory::Json => "json",
            FileCategory::Markdown => "markdown",
            FileCategory::Text => "text",
            FileCategory::Sql => "sql",
            FileCategory::Bash => "bash",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            FileCategory::Python => "Python",
            FileCategory::JavaScript => "JavaScript",
            FileCategory::TypeScript => "TypeScript",
            FileCategory::Html => "HTML",
            FileCategory::Css => "CSS",
            FileCategory::Json => "JSON",
            FileCategory::Markdown => "Markdown",
            FileCategory::Text => "Plain Text",
            FileCategory::Sql => "SQL",
            FileCategory::Bash => "Bash",
        }
    }

    /// Whether the category is a programming language, where inline comments
    /// belong in the generated file.
    pub const fn is_code(self) -> bool {
        matches!(
            self,
            FileCategory::Python
                | FileCategory::JavaScript
                | FileCategory::TypeScript
                | FileCategory::Sql
                | FileCategory::Bash
        )
    }
}

/// Canonical extension for `category`.
pub fn extension_for(category: FileCategory) -> &'static str {
    category.extension()
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileCategory {
    type Err = String;

    /// Accepts the identifier (`python`) or the extension (`py`, `.py`),
    /// ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        let bare = needle.trim_start_matches('.');

        FileCategory::ALL
            .iter()
            .copied()
            .find(|category| {
                category.as_str() == needle || category.extension().trim_start_matches('.') == bare
            })
            .ok_or_else(|| {
                let valid: Vec<&str> = FileCategory::ALL.iter().map(|c| c.as_str()).collect();
                format!("Unknown file type '{}'. Valid types: {}", s, valid.join(", "))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_has_dotted_extension() {
        for category in FileCategory::ALL {
            let ext = extension_for(category);
            assert!(ext.starts_with('.'), "{category} -> {ext}");
            assert!(ext.len() > 1, "{category} has an empty extension");
        }
    }

    #[test]
    fn test_extensions_are_distinct() {
        let mut seen: Vec<&str> = FileCategory::ALL.iter().map(|c| c.extension()).collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), FileCategory::ALL.len());
    }

    #[test]
    fn test_known_extensions() {
        assert_eq!(extension_for(FileCategory::Python), ".py");
        assert_eq!(extension_for(FileCategory::Markdown), ".md");
        assert_eq!(extension_for(FileCategory::Bash), ".sh");
        assert_eq!(extension_for(FileCategory::Text), ".txt");
    }

    #[test]
    fn test_parse_identifier_and_extension() {
        assert_eq!("python".parse::<FileCategory>(), Ok(FileCategory::Python));
        assert_eq!("TypeScript".parse::<FileCategory>(), Ok(FileCategory::TypeScript));
        assert_eq!("py".parse::<FileCategory>(), Ok(FileCategory::Python));
        assert_eq!(".sh".parse::<FileCategory>(), Ok(FileCategory::Bash));
        assert_eq!(" md ".parse::<FileCategory>(), Ok(FileCategory::Markdown));
    }

    #[test]
    fn test_parse_unknown_lists_valid_types() {
        let err = "cobol".parse::<FileCategory>().unwrap_err();
        assert!(err.contains("cobol"));
        assert!(err.contains("python"));
        assert!(err.contains("bash"));
    }

    #[test]
    fn test_identifier_round_trips_through_display() {
        for category in FileCategory::ALL {
            assert_eq!(category.to_string().parse::<FileCategory>(), Ok(category));
        }
    }

    #[test]
    fn test_serde_uses_lowercase_identifier() {
        let json = serde_json::to_string(&FileCategory::JavaScript).unwrap();
        assert_eq!(json, "\"javascript\"");
    }

    #[test]
    fn test_code_categories() {
        assert!(FileCategory::Python.is_code());
        assert!(FileCategory::Sql.is_code());
        assert!(!FileCategory::Markdown.is_code());
        assert!(!FileCategory::Json.is_code());
        assert!(!FileCategory::Html.is_code());
    }
}

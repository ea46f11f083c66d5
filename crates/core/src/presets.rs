use serde::Serialize;

use crate::catalog::FileCategory;
use crate::request::GenerationRequest;

/// A ready-made submission the user can start from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Preset {
    pub title: &'static str,
    pub prompt: &'static str,
    #[serde(rename = "type")]
    pub category: FileCategory,
    pub filename: &'static str,
}

pub static PRESETS: [Preset; 4] = [
    Preset {
        title: "React Component",
        prompt: "Create a responsive Navigation Bar component using React and Tailwind CSS.",
        category: FileCategory::TypeScript,
        filename: "Navbar",
    },
    Preset {
        title: "Python Scraper",
        prompt: "A Python script using BeautifulSoup to scrape titles from a news website.",
        category: FileCategory::Python,
        filename: "scraper",
    },
    Preset {
        title: "SQL Schema",
        prompt: "Create a normalized SQL schema for an E-commerce database including users, products, and orders.",
        category: FileCategory::Sql,
        filename: "schema",
    },
    Preset {
        title: "README Template",
        prompt: "A professional README.md for an open-source JavaScript library.",
        category: FileCategory::Markdown,
        filename: "README",
    },
];

impl Preset {
    /// Kebab-case form of the title, e.g. `react-component`.
    pub fn slug(&self) -> String {
        self.title.to_ascii_lowercase().replace(' ', "-")
    }

    pub fn to_request(&self) -> GenerationRequest {
        GenerationRequest::new(self.prompt, self.filename, self.category)
    }
}

/// Look a preset up by title (any case) or slug.
pub fn find_preset(name: &str) -> Option<&'static Preset> {
    let name = name.trim();
    PRESETS
        .iter()
        .find(|preset| preset.title.eq_ignore_ascii_case(name) || preset.slug() == name)
}

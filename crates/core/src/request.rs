use serde::{Deserialize, Serialize};

use crate::catalog::FileCategory;
use crate::error::Error;

/// A single submission from the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Free-text description of the desired file content.
    pub prompt: String,
    /// Target filename, without extension.
    pub filename: String,
    /// Target file type.
    #[serde(rename = "type")]
    pub category: FileCategory,
}

impl GenerationRequest {
    pub fn new(
        prompt: impl Into<String>,
        filename: impl Into<String>,
        category: FileCategory,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            filename: filename.into(),
            category,
        }
    }

    /// Reject blank prompts and filenames, and filenames that would escape
    /// the output directory.
    pub fn validate(&self) -> Result<(), Error> {
        if self.prompt.trim().is_empty() {
            return Err(Error::invalid("prompt must not be empty"));
        }

        let filename = self.filename.trim();
        if filename.is_empty() {
            return Err(Error::invalid("filename must not be empty"));
        }
        if filename.contains(['/', '\\']) {
            return Err(Error::invalid(format!(
                "filename '{filename}' must not contain a path separator"
            )));
        }

        Ok(())
    }
}

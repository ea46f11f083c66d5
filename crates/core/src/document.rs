use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::catalog::extension_for;
use crate::request::GenerationRequest;

/// The editable result of the most recent successful generation.
///
/// Identity, filename and extension are fixed at creation; only the content
/// changes afterwards, and only through the owning
/// [`Session`](crate::session::Session).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    id: Uuid,
    filename: String,
    extension: &'static str,
    content: String,
    created_at: DateTime<Utc>,
}

impl Document {
    pub(crate) fn from_generation(request: &GenerationRequest, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            filename: request.filename.trim().to_string(),
            extension: extension_for(request.category),
            content,
            created_at: Utc::now(),
        }
    }

    pub(crate) fn replace_content(&mut self, content: String) {
        self.content = content;
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn extension(&self) -> &str {
        self.extension
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Download name: filename followed by the extension.
    pub fn file_name(&self) -> String {
        format!("{}{}", self.filename, self.extension)
    }

    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }
}

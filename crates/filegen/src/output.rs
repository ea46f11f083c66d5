use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use filegen_core::Document;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// JSON view of a document, with the derived download name.
#[derive(Debug, Serialize)]
pub struct DocumentOutput<'a> {
    #[serde(flatten)]
    pub document: &'a Document,
    pub file_name: String,
    pub chars: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl<'a> DocumentOutput<'a> {
    pub fn new(document: &'a Document, path: Option<&Path>) -> Self {
        Self {
            document,
            file_name: document.file_name(),
            chars: document.char_count(),
            path: path.map(|p| p.display().to_string()),
        }
    }
}

/// Write the document as `<dir>/<filename><extension>`.
///
/// Refuses to replace an existing file unless `force` is set.
pub async fn save_document(document: &Document, dir: &Path, force: bool) -> Result<PathBuf> {
    let path = dir.join(document.file_name());

    // Never clobber an existing file unless asked to
    let exists = tokio::fs::try_exists(&path)
        .await
        .wrap_err_with(|| f!("Failed to check whether '{}' exists", path.display()))?;
    if exists && !force {
        return Err(Error::FileExists(path).into());
    }

    if !dir.as_os_str().is_empty() {
        tokio::fs::create_dir_all(dir)
            .await
            .wrap_err_with(|| f!("Failed to create directory '{}'", dir.display()))?;
    }

    tokio::fs::write(&path, document.content())
        .await
        .wrap_err_with(|| f!("Failed to write '{}'", path.display()))?;

    log::info!("saved {} ({} chars)", path.display(), document.char_count());
    Ok(path)
}

pub fn output_json(document: &Document, path: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(&DocumentOutput::new(document, path))?;
    println!("{}", json);
    Ok(())
}

/// Print the document with a header line, like the preview pane.
pub fn output_formatted(document: &Document) {
    eprintln!(
        "{} {}",
        "Preview:".bright_black(),
        document.file_name().blue().bold()
    );
    println!("{}", document.content());
    eprintln!(
        "{}",
        f!("{} characters", document.char_count()).bright_black()
    );
}

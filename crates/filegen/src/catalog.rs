use crate::prelude::{println, *};
use colored::Colorize;
use filegen_core::{FileCategory, PRESETS};
use serde::Serialize;

#[derive(Debug, clap::Args, Clone, Default)]
pub struct ListOptions {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
pub struct FileTypeOutput {
    #[serde(rename = "type")]
    pub category: FileCategory,
    pub label: &'static str,
    pub extension: &'static str,
    pub code: bool,
}

/// Every supported file type, for CLI and MCP listings.
pub fn file_types_data() -> Vec<FileTypeOutput> {
    FileCategory::ALL
        .iter()
        .map(|&category| FileTypeOutput {
            category,
            label: category.label(),
            extension: category.extension(),
            code: category.is_code(),
        })
        .collect()
}

pub fn types(options: ListOptions) -> Result<()> {
    let types = file_types_data();

    if options.json {
        println!("{}", serde_json::to_string_pretty(&types)?);
        return Ok(());
    }

    let mut table = new_table(&["TYPE", "LABEL", "EXTENSION"]);
    for item in &types {
        table.add_row(prettytable::row![item.category.as_str().cyan(), item.label, item.extension]);
    }
    table.printstd();

    Ok(())
}

pub fn presets(options: ListOptions) -> Result<()> {
    if options.json {
        println!("{}", serde_json::to_string_pretty(&PRESETS)?);
        return Ok(());
    }

    let mut table = new_table(&["PRESET", "TYPE", "FILE", "PROMPT"]);
    for preset in PRESETS.iter() {
        table.add_row(prettytable::row![
            preset.slug().cyan(),
            preset.category.as_str(),
            f!("{}{}", preset.filename, preset.category.extension()),
            preset.prompt
        ]);
    }
    table.printstd();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_types_data_covers_catalog() {
        let types = file_types_data();
        assert_eq!(types.len(), FileCategory::ALL.len());
        assert!(types
            .iter()
            .any(|t| t.category == FileCategory::Sql && t.extension == ".sql" && t.code));
    }

    #[test]
    fn test_file_types_serialize_with_type_key() {
        let json = serde_json::to_value(file_types_data()).unwrap();
        assert_eq!(json[0]["type"], "python");
        assert_eq!(json[0]["extension"], ".py");
    }
}

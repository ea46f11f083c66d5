use crate::prelude::{eprintln, *};
use colored::Colorize;
use filegen_core::{find_preset, FileCategory, GenerationRequest, Session};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, clap::Args, Clone, Default)]
pub struct GenerateOptions {
    /// What the file should contain
    pub prompt: Option<String>,

    /// Target filename, without extension
    #[arg(short, long)]
    pub filename: Option<String>,

    /// Target file type (e.g. python, sql, md)
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub category: Option<FileCategory>,

    /// Start from a built-in preset; explicit arguments override its fields
    #[arg(long)]
    pub preset: Option<String>,

    /// Directory the file is written to
    #[arg(short, long, env = "FILEGEN_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Print the content (or the JSON document) to stdout instead of writing a file
    #[arg(long)]
    pub stdout: bool,

    /// Output the document as JSON
    #[arg(long)]
    pub json: bool,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Merge the preset (if any) with the explicit arguments.
pub fn build_request(options: &GenerateOptions) -> Result<GenerationRequest> {
    let preset = match &options.preset {
        Some(name) => Some(find_preset(name).ok_or_else(|| Error::UnknownPreset(name.clone()))?),
        None => None,
    };

    let prompt = options
        .prompt
        .clone()
        .or_else(|| preset.map(|p| p.prompt.to_string()))
        .ok_or(Error::MissingInput("prompt"))?;
    let filename = options
        .filename
        .clone()
        .or_else(|| preset.map(|p| p.filename.to_string()))
        .ok_or(Error::MissingInput("--filename"))?;
    let category = options
        .category
        .or_else(|| preset.map(|p| p.category))
        .ok_or(Error::MissingInput("--type"))?;

    Ok(GenerationRequest::new(prompt, filename, category))
}

pub fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

pub async fn run(options: GenerateOptions, global: crate::Global) -> Result<()> {
    // Merge preset and arguments into a request
    let request = build_request(&options)?;

    if global.verbose {
        eprintln!("Provider: {:?}", global.provider.provider);
        eprintln!("Model: {}", global.provider.model());
        eprintln!("Temperature: {}", global.provider.temperature);
        eprintln!("Target: {}{}", request.filename.trim(), request.category.extension());
    }

    // One session, one submission
    let gateway = global.provider.gateway();
    let mut session = Session::new();

    let progress = spinner("Generating...");
    let result = session.submit(&gateway, &request).await;
    progress.finish_and_clear();

    let document = result.map_err(|e| eyre!(e))?;

    // Print instead of writing when asked to
    if options.stdout {
        if options.json {
            return crate::output::output_json(document, None);
        }
        print!("{}", document.content());
        return Ok(());
    }

    // Write <filename><extension> to the output directory
    let path = crate::output::save_document(document, &options.output_dir, options.force).await?;

    if options.json {
        crate::output::output_json(document, Some(&path))?;
    } else {
        eprintln!(
            "{} {} ({} characters)",
            "Saved".green().bold(),
            path.display(),
            document.char_count()
        );
    }

    Ok(())
}

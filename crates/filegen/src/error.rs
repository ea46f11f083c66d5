use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{} already exists (use --force to overwrite)", .0.display())]
    FileExists(PathBuf),

    #[error("Unknown preset '{0}'. Run `filegen presets` to list them.")]
    UnknownPreset(String),

    #[error("Missing {0}: pass it as an argument or use --preset")]
    MissingInput(&'static str),
}

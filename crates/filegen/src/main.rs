use crate::prelude::*;
use clap::Parser;

mod catalog;
mod error;
mod generate;
mod mcp;
mod output;
mod prelude;
mod provider;
mod session;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Generate ready-to-save files from a natural language description"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Whether to display additional information.
    #[clap(long, env = "FILEGEN_VERBOSE", global = true, default_value = "false")]
    verbose: bool,

    #[clap(flatten)]
    provider: crate::provider::ProviderOptions,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Generate a single file
    Generate(crate::generate::GenerateOptions),

    /// Interactive session: generate, edit and save files
    Session(crate::session::SessionOptions),

    /// List supported file types
    Types(crate::catalog::ListOptions),

    /// List built-in prompt presets
    Presets(crate::catalog::ListOptions),

    /// Model Context Protocol server
    MCP(crate::mcp::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    // Dispatch to the selected subcommand

    match app.command {
        SubCommands::Generate(options) => crate::generate::run(options, app.global).await,
        SubCommands::Session(options) => crate::session::run(options, app.global).await,
        SubCommands::Types(options) => crate::catalog::types(options),
        SubCommands::Presets(options) => crate::catalog::presets(options),
        SubCommands::MCP(sub_app) => crate::mcp::run(sub_app, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}

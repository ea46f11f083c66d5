use crate::prelude::{eprint, eprintln, println, *};
use colored::Colorize;
use filegen_core::{
    find_preset, FileCategory, Gateway, GenerationCapability, GenerationRequest, Session,
};
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};

const HELP: &str = "\
Commands:
  generate <type> <filename> <prompt...>  Generate a new file (replaces the current one)
  preset <name>                          Generate from a built-in preset
  show                                   Print the current file
  edit                                   Replace the content; end with a line containing only '.'
                                         (start a line with '..' to enter a leading '.')
  save [dir]                             Write the current file to disk
  status                                 Show the session state
  types                                  List supported file types
  presets                                List built-in presets
  help                                   Show this message
  quit                                   Leave the session";

#[derive(Debug, clap::Args, Clone)]
pub struct SessionOptions {
    /// Default directory for `save`
    #[arg(short, long, env = "FILEGEN_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Overwrite existing files on `save`
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Generate(GenerationRequest),
    Preset(String),
    Show,
    Edit,
    Save(Option<PathBuf>),
    Status,
    Types,
    Presets,
    Help,
    Quit,
}

/// Parse one line of input. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Option<std::result::Result<Command, String>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    let command = match name.to_ascii_lowercase().as_str() {
        "generate" | "gen" | "g" => parse_generate(rest),
        "preset" if rest.is_empty() => Err("usage: preset <name>".to_string()),
        "preset" => Ok(Command::Preset(rest.to_string())),
        "show" | "cat" => Ok(Command::Show),
        "edit" => Ok(Command::Edit),
        "save" | "download" => Ok(Command::Save((!rest.is_empty()).then(|| PathBuf::from(rest)))),
        "status" => Ok(Command::Status),
        "types" => Ok(Command::Types),
        "presets" => Ok(Command::Presets),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        other => Err(f!("unknown command '{other}' (try 'help')")),
    };

    Some(command)
}

/// `<type> <filename> <prompt...>`. The prompt may be empty; the session
/// rejects it.
fn parse_generate(args: &str) -> std::result::Result<Command, String> {
    let mut parts = args.splitn(3, char::is_whitespace);
    let (Some(category), Some(filename)) = (parts.next(), parts.next()) else {
        return Err("usage: generate <type> <filename> <prompt...>".to_string());
    };
    let category: FileCategory = category.parse()?;
    let prompt = parts.next().unwrap_or("").trim();

    Ok(Command::Generate(GenerationRequest::new(prompt, filename, category)))
}

pub async fn run(options: SessionOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        eprintln!(
            "Provider: {:?}, model: {}",
            global.provider.provider,
            global.provider.model()
        );
    }

    let gateway = global.provider.gateway();
    let reader = BufReader::new(tokio::io::stdin());

    eprintln!("{}", "filegen interactive session. Type 'help' for commands.".bright_black());
    run_session(reader, &gateway, &options).await?;

    Ok(())
}

/// Drive one session from line-based input until `quit` or end of input.
pub async fn run_session<R, C>(
    reader: R,
    gateway: &Gateway<C>,
    options: &SessionOptions,
) -> Result<Session>
where
    R: AsyncBufRead + Unpin,
    C: GenerationCapability,
{
    let mut session = Session::new();
    let mut lines = reader.lines();

    loop {
        eprint!("{}", "filegen> ".blue());
        let Some(line) = lines.next_line().await? else {
            break;
        };

        // Blank lines are ignored, parse errors reported
        let command = match parse_command(&line) {
            None => continue,
            Some(Ok(command)) => command,
            Some(Err(message)) => {
                eprintln!("{}", message.red());
                continue;
            }
        };

        match command {
            Command::Generate(request) => generate(&mut session, gateway, &request).await,
            Command::Preset(name) => match find_preset(&name) {
                Some(preset) => generate(&mut session, gateway, &preset.to_request()).await,
                None => eprintln!("{}", Error::UnknownPreset(name).to_string().red()),
            },
            Command::Show => match session.document() {
                Some(document) => crate::output::output_formatted(document),
                None => eprintln!("{}", "No file generated yet".bright_black()),
            },
            Command::Edit => {
                if session.document().is_none() {
                    eprintln!("{}", filegen_core::Error::NoDocument.to_string().red());
                    continue;
                }
                eprintln!(
                    "{}",
                    "Enter new content; finish with a line containing only '.'".bright_black()
                );
                // Input ending before the terminator discards the edit
                let Some(content) = read_block(&mut lines).await? else {
                    eprintln!("{}", "Edit aborted: input ended before '.'".red());
                    break;
                };
                match session.edit_content(content) {
                    Ok(document) => eprintln!(
                        "Updated {} ({} characters)",
                        document.file_name(),
                        document.char_count()
                    ),
                    Err(e) => eprintln!("{}", e.to_string().red()),
                }
            }
            Command::Save(dir) => match session.document() {
                Some(document) => {
                    let dir = dir.as_deref().unwrap_or(&options.output_dir);
                    match crate::output::save_document(document, dir, options.force).await {
                        Ok(path) => eprintln!("{} {}", "Saved".green().bold(), path.display()),
                        Err(e) => eprintln!("{}", e.to_string().red()),
                    }
                }
                None => eprintln!("{}", filegen_core::Error::NoDocument.to_string().red()),
            },
            Command::Status => print_status(&session),
            Command::Types => crate::catalog::types(Default::default())?,
            Command::Presets => crate::catalog::presets(Default::default())?,
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
        }
    }

    Ok(session)
}

/// Read lines up to a lone `.`, undoing `..` escapes. `None` when input ends
/// first.
async fn read_block<R>(lines: &mut Lines<R>) -> Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    let mut content = Vec::new();

    while let Some(line) = lines.next_line().await? {
        if line == "." {
            return Ok(Some(content.join("\n")));
        }
        let line = match line.strip_prefix("..") {
            Some(rest) => f!(".{rest}"),
            None => line,
        };
        content.push(line);
    }

    Ok(None)
}

async fn generate<C: GenerationCapability>(
    session: &mut Session,
    gateway: &Gateway<C>,
    request: &GenerationRequest,
) {
    if let Err(e) = session.begin(request) {
        eprintln!("{}", e.to_string().red());
        return;
    }

    // The session is Pending while the gateway call is in flight
    let progress = crate::generate::spinner("Generating...");
    let outcome = gateway.generate(request).await;
    progress.finish_and_clear();

    match session.complete(request, outcome) {
        Ok(document) => eprintln!(
            "{} {} ({} characters). Use 'show', 'edit' or 'save'.",
            "Generated".green().bold(),
            document.file_name(),
            document.char_count()
        ),
        Err(e) => eprintln!("{} {}", "Error:".red().bold(), e),
    }
}

fn print_status(session: &Session) {
    println!("State: {}", session.status());
    if let Some(document) = session.document() {
        println!("File: {}", document.file_name());
        println!("Id: {}", document.id());
        println!("Created: {}", document.created_at().to_rfc3339());
        println!("Characters: {}", document.char_count());
    }
    if let Some(error) = session.last_error() {
        println!("Last error: {error}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filegen_core::{CapabilityError, InvokeOptions, SessionStatus};
    use std::cell::RefCell;

    struct Replies(RefCell<Vec<std::result::Result<String, CapabilityError>>>);

    impl Replies {
        fn new(mut replies: Vec<std::result::Result<String, CapabilityError>>) -> Self {
            replies.reverse();
            Self(RefCell::new(replies))
        }
    }

    impl GenerationCapability for Replies {
        async fn invoke(
            &self,
            _directive: &str,
            _options: &InvokeOptions,
        ) -> std::result::Result<String, CapabilityError> {
            self.0
                .borrow_mut()
                .pop()
                .unwrap_or_else(|| Err(CapabilityError::new("exhausted")))
        }
    }

    fn options(dir: &std::path::Path) -> SessionOptions {
        SessionOptions {
            output_dir: dir.to_path_buf(),
            force: false,
        }
    }

    #[test]
    fn test_parse_generate() {
        let command = parse_command("generate python fact a factorial function")
            .unwrap()
            .unwrap();
        assert_eq!(
            command,
            Command::Generate(GenerationRequest::new(
                "a factorial function",
                "fact",
                FileCategory::Python
            ))
        );
    }

    #[test]
    fn test_parse_generate_accepts_extension_and_empty_prompt() {
        let command = parse_command("gen md notes").unwrap().unwrap();
        assert_eq!(
            command,
            Command::Generate(GenerationRequest::new("", "notes", FileCategory::Markdown))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_command("generate python").unwrap().is_err());
        assert!(parse_command("generate cobol x y").unwrap().is_err());
        assert!(parse_command("frobnicate").unwrap().is_err());
        assert!(parse_command("preset").unwrap().is_err());
        assert!(parse_command("   ").is_none());
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse_command("SHOW").unwrap(), Ok(Command::Show));
        assert_eq!(parse_command("save").unwrap(), Ok(Command::Save(None)));
        assert_eq!(
            parse_command("save out/dir").unwrap(),
            Ok(Command::Save(Some(PathBuf::from("out/dir"))))
        );
        assert_eq!(
            parse_command("preset sql-schema").unwrap(),
            Ok(Command::Preset("sql-schema".to_string()))
        );
        assert_eq!(parse_command("exit").unwrap(), Ok(Command::Quit));
    }

    #[tokio::test]
    async fn test_generate_edit_save() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = Gateway::new(Replies::new(vec![Ok(
            "```python\ndef fact(n): ...\n```".to_string()
        )]));
        let script = "generate python fact factorial function\nedit\ndef fact(n):\n    return 1\n.\nsave\nquit\n";

        let session = run_session(script.as_bytes(), &gateway, &options(dir.path()))
            .await
            .unwrap();

        let document = session.document().unwrap();
        assert_eq!(document.content(), "def fact(n):\n    return 1");
        assert_eq!(
            std::fs::read_to_string(dir.path().join("fact.py")).unwrap(),
            "def fact(n):\n    return 1"
        );
    }

    #[tokio::test]
    async fn test_edit_unescapes_dot_lines() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = Gateway::new(Replies::new(vec![Ok("x".to_string())]));
        let script = "generate text notes n\nedit\nfirst\n..\n...more\n.\n";

        let session = run_session(script.as_bytes(), &gateway, &options(dir.path()))
            .await
            .unwrap();

        assert_eq!(session.document().unwrap().content(), "first\n.\n..more");
    }

    #[tokio::test]
    async fn test_edit_without_terminator_keeps_content() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = Gateway::new(Replies::new(vec![Ok("original".to_string())]));
        let script = "generate text notes n\nedit\npartial line\n";

        let session = run_session(script.as_bytes(), &gateway, &options(dir.path()))
            .await
            .unwrap();

        assert_eq!(session.document().unwrap().content(), "original");
    }

    #[tokio::test]
    async fn test_failed_regeneration_clears_document() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = Gateway::new(Replies::new(vec![
            Ok("SELECT 1;".to_string()),
            Err(CapabilityError::new("quota exceeded")),
        ]));
        let script = "preset sql-schema\nedit\nY\n.\npreset sql-schema\n";

        let session = run_session(script.as_bytes(), &gateway, &options(dir.path()))
            .await
            .unwrap();

        assert_eq!(session.status(), SessionStatus::Failed);
        assert!(session.document().is_none());
    }

    #[tokio::test]
    async fn test_empty_prompt_stays_idle() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = Gateway::new(Replies::new(vec![]));

        let script = "generate python fact\n";

        let session = run_session(script.as_bytes(), &gateway, &options(dir.path()))
            .await
            .unwrap();

        assert_eq!(session.status(), SessionStatus::Idle);
    }
}

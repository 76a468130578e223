//! Inkboard command line entry point.
//!
//! ```text
//! inkboard <script.json> [--config <cfg.json>] [--out <dir> [--name <doc-id>]]
//! ```
//!
//! Replays a session script and prints the resulting document as JSON, or
//! saves it into a document directory when `--out` is given.

mod script;

use inkboard_core::{Editor, EditorConfig, FileStorage, Storage};
use script::{Session, parse_script};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

#[derive(Debug, Error)]
enum CliError {
    #[error("Usage: inkboard <script.json> [--config <cfg.json>] [--out <dir> [--name <doc-id>]]")]
    Usage,
    #[error("Missing value for {0}")]
    MissingValue(&'static str),
    #[error("Unexpected argument: {0}")]
    Unexpected(String),
    #[error("--name requires --out")]
    NameWithoutOut,
    #[error("Failed to read script {path}: {source}")]
    Script {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Default, PartialEq)]
struct Args {
    script: PathBuf,
    config: Option<PathBuf>,
    out: Option<PathBuf>,
    name: Option<String>,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, CliError> {
        let mut script = None;
        let mut parsed = Args::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    parsed.config = Some(args.next().ok_or(CliError::MissingValue("--config"))?.into())
                }
                "--out" => parsed.out = Some(args.next().ok_or(CliError::MissingValue("--out"))?.into()),
                "--name" => parsed.name = Some(args.next().ok_or(CliError::MissingValue("--name"))?),
                "-h" | "--help" => return Err(CliError::Usage),
                _ if arg.starts_with("--") => return Err(CliError::Unexpected(arg)),
                _ if script.is_none() => script = Some(PathBuf::from(arg)),
                _ => return Err(CliError::Unexpected(arg)),
            }
        }
        if parsed.name.is_some() && parsed.out.is_none() {
            return Err(CliError::NameWithoutOut);
        }
        parsed.script = script.ok_or(CliError::Usage)?;
        Ok(parsed)
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let config = match &args.config {
        Some(path) => EditorConfig::load(path)?,
        None => EditorConfig::default(),
    };

    let json = std::fs::read_to_string(&args.script).map_err(|source| CliError::Script {
        path: args.script.display().to_string(),
        source,
    })?;
    let steps = parse_script(&json)?;
    log::info!("Replaying {} step(s) from {}", steps.len(), args.script.display());

    let mut session = Session::new(Editor::with_config(&config));
    session.run(&steps);
    // Commit a gesture the script left open
    session.editor.tools.end(&mut session.editor.scene);

    let snapshot = session.editor.scene.snapshot();
    match args.out {
        Some(dir) => {
            let storage = FileStorage::new(dir)?;
            let name = args
                .name
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
            storage.save(&name, &snapshot)?;
            log::info!("Saved document {} to {}", name, storage.base_path().display());
            println!("{}", name);
        }
        None => println!("{}", snapshot.to_json()?),
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let result = Args::parse(std::env::args().skip(1))
        .map_err(Box::<dyn Error>::from)
        .and_then(run);
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

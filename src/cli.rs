//! Command-line interface for commitlens.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::analysis::{analyze_many, register_analyzers, AnalysisResult, Snippet};
use crate::language::Language;
use crate::report;
use crate::settings::{self, Settings};

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Path argument meaning "read the snippet from stdin".
const STDIN_PATH: &str = "-";

/// Directory names never descended into.
const SKIPPED_DIRS: &[&str] = &["node_modules", "target"];

const DEFAULT_SETTINGS_TEMPLATE: &str = include_str!("templates/default.yaml");

/// Syntax diagnostics for JavaScript, TypeScript, C and C++ snippets.
///
/// Each file is analyzed on its own and reported with its line/column
/// diagnostics. Nothing is compiled or executed.
#[derive(Parser)]
#[command(name = "commitlens")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log analyzer activity to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze files, directories or stdin
    #[command(visible_alias = "lint")]
    Check(CheckArgs),
    /// Write a settings file with every default spelled out
    Init(InitArgs),
}

/// Arguments for the check command.
#[derive(Parser)]
pub struct CheckArgs {
    /// Files or directories to analyze ("-" reads stdin)
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Language of every input: javascript, typescript, cpp or c
    /// (default: inferred from the file extension)
    #[arg(short, long)]
    pub language: Option<String>,

    /// Title for a stdin snippet or a single file
    #[arg(short, long)]
    pub title: Option<String>,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,

    /// Path to settings YAML file (default: auto-discover)
    #[arg(short, long)]
    pub settings: Option<PathBuf>,

    /// Exit non-zero when any warning is reported
    #[arg(long)]
    pub fail_on_warnings: bool,
}

/// Arguments for the init command.
#[derive(Parser)]
pub struct InitArgs {
    /// Output file path
    #[arg(short, long, default_value = "commitlens.yaml")]
    pub output: PathBuf,
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` applies unless `verbose` forces debug output.
pub fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("commitlens=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // A subscriber may already be installed (tests); keep it.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Collect analyzable files under a directory, sorted by path.
pub fn collect_files(root: &Path, settings: &Settings) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| {
            if e.depth() == 0 || !e.file_type().is_dir() {
                return true;
            }
            let name = e.file_name().to_string_lossy();
            // Skip hidden and build/dependency directories
            !name.starts_with('.') && !SKIPPED_DIRS.iter().any(|skip| name == *skip)
        })
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if language_of(path).is_some() && !settings.is_path_excluded(path) {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}

fn language_of(path: &Path) -> Option<Language> {
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(Language::from_extension)
}

/// Turn the command-line inputs into snippets.
fn collect_snippets(args: &CheckArgs, language: Option<Language>, settings: &Settings) -> anyhow::Result<Vec<Snippet>> {
    let mut snippets = Vec::new();

    for path in &args.paths {
        if path.as_os_str() == STDIN_PATH {
            let language = language.context("reading stdin requires --language")?;
            let mut code = String::new();
            std::io::stdin()
                .read_to_string(&mut code)
                .context("failed to read stdin")?;
            let title = args.title.clone().unwrap_or_else(|| settings.default_title.clone());
            snippets.push(Snippet::new(code, language, title));
            continue;
        }

        let metadata = std::fs::metadata(path)
            .with_context(|| format!("cannot access path {}", path.display()))?;

        let files = if metadata.is_dir() {
            collect_files(path, settings)?
        } else {
            vec![path.clone()]
        };

        for file in files {
            let file_language = language
                .or_else(|| language_of(&file))
                .with_context(|| {
                    format!("cannot infer language of {} (use --language)", file.display())
                })?;
            let code = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            snippets.push(Snippet::new(code, file_language, file.display().to_string()));
        }
    }

    // --title names a single input
    if let (Some(title), [only]) = (&args.title, snippets.as_mut_slice()) {
        only.title = title.clone();
    }

    Ok(snippets)
}

/// Exit code for a batch of results.
pub fn exit_code(results: &[AnalysisResult], fail_on_warnings: bool) -> i32 {
    let invalid = results.iter().any(|r| !r.is_valid());
    let warned = results.iter().any(|r| r.warning_count() > 0);
    if invalid || (fail_on_warnings && warned) {
        EXIT_FAILED
    } else {
        EXIT_SUCCESS
    }
}

/// Run the check command.
pub fn run_check(args: &CheckArgs) -> anyhow::Result<i32> {
    // Validate format
    if args.format != "pretty" && args.format != "json" {
        eprintln!("Error: invalid format {:?}, must be 'pretty' or 'json'", args.format);
        return Ok(EXIT_ERROR);
    }

    let language = match args.language.as_deref().map(str::parse::<Language>).transpose() {
        Ok(language) => language,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    let cwd = std::env::current_dir()?;
    let (settings, source) = match settings::discover(args.settings.as_deref(), &cwd) {
        Ok(found) => found,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return Ok(EXIT_ERROR);
        }
    };
    match &source {
        Some(path) => tracing::debug!("Using settings from {}", path.display()),
        None => tracing::debug!("Using default settings"),
    }

    let snippets = collect_snippets(args, language, &settings)?;
    if snippets.is_empty() {
        eprintln!("Warning: no files to analyze");
        return Ok(EXIT_SUCCESS);
    }

    register_analyzers();
    let results = analyze_many(&snippets, &settings);

    match args.format.as_str() {
        "json" => report::write_json(&results)?,
        _ => report::write_pretty(&results),
    }

    Ok(exit_code(&results, args.fail_on_warnings))
}

/// Run the init command.
pub fn run_init(args: &InitArgs) -> anyhow::Result<i32> {
    // Check if output already exists
    if args.output.exists() {
        eprintln!("Error: file already exists: {}", args.output.display());
        eprintln!("Remove it or use --output to specify a different path");
        return Ok(EXIT_ERROR);
    }

    // Create output directory if needed
    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() && parent != Path::new(".") {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
    }

    std::fs::write(&args.output, DEFAULT_SETTINGS_TEMPLATE)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    println!("Created {}", args.output.display());
    println!();
    println!("Next steps:");
    println!("  1. Edit {} to turn checks on or off", args.output.display());
    println!("  2. Run: commitlens check . --settings {}", args.output.display());

    Ok(EXIT_SUCCESS)
}

/// The template written by `init`.
pub fn default_settings_template() -> &'static str {
    DEFAULT_SETTINGS_TEMPLATE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;

    #[test]
    fn test_template_parses_and_validates() {
        let settings = Settings::from_yaml_str(default_settings_template()).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_exit_codes() {
        let valid = analyze("int main() { return 0; }", Language::Cpp, "a");
        let invalid = analyze("int main() {", Language::Cpp, "b");
        let warned = analyze("int* p = new int;", Language::Cpp, "c");

        assert_eq!(exit_code(&[valid.clone()], false), EXIT_SUCCESS);
        assert_eq!(exit_code(&[valid, invalid], false), EXIT_FAILED);
        assert_eq!(exit_code(&[warned.clone()], false), EXIT_SUCCESS);
        assert_eq!(exit_code(&[warned], true), EXIT_FAILED);
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from(["commitlens", "check", "src", "--format", "json", "-l", "c"]).unwrap();
        match cli.command {
            Commands::Check(args) => {
                assert_eq!(args.paths, vec![PathBuf::from("src")]);
                assert_eq!(args.language.as_deref(), Some("c"));
                assert_eq!(args.format, "json");
            }
            Commands::Init(_) => panic!("expected check"),
        }
    }
}

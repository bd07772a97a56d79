//! Analyzer settings.
//!
//! Settings are read from YAML. Every field has a default, so an empty file
//! (or no file at all) gives the stock behaviour.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

/// File names looked up in the working directory.
pub const SETTINGS_FILE_NAMES: &[&str] = &["commitlens.yaml", ".commitlens.yaml"];

/// Title used when the caller gives none.
pub const DEFAULT_TITLE: &str = "Untitled Snippet";

/// Top-level settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default = "default_version")]
    pub version: String,
    /// Leading chars compared when merging the fail-fast parser's message.
    #[serde(default = "default_dedup_prefix_len")]
    pub dedup_prefix_len: usize,
    #[serde(default = "default_title")]
    pub default_title: String,
    /// Glob patterns for paths the CLI never analyses (e.g., "**/vendor/**")
    #[serde(default = "default_excluded_paths")]
    pub excluded_paths: Vec<String>,
    #[serde(default)]
    pub checks: Checks,
}

/// Toggles for the advisory passes.
///
/// Bracket scanning, parser passes and C++-keyword rejection in C decide
/// validity and cannot be turned off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Checks {
    #[serde(default = "default_true")]
    pub typos: bool,
    #[serde(default = "default_true")]
    pub missing_semicolons: bool,
    #[serde(default = "default_true")]
    pub undefined_identifiers: bool,
    /// C/C++ best-practice smells
    #[serde(default = "default_true")]
    pub best_practices: bool,
    /// C: declarations at the start of a block
    #[serde(default = "default_true")]
    pub declarations_first: bool,
    /// C: prototypes before definitions
    #[serde(default = "default_true")]
    pub prototypes: bool,
    /// C: `//` comments
    #[serde(default = "default_true")]
    pub line_comments: bool,
}

fn default_true() -> bool {
    true
}

fn default_version() -> String {
    "1".to_string()
}

fn default_dedup_prefix_len() -> usize {
    20
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_excluded_paths() -> Vec<String> {
    vec!["**/node_modules/**".to_string()]
}

impl Default for Checks {
    fn default() -> Self {
        Self {
            typos: true,
            missing_semicolons: true,
            undefined_identifiers: true,
            best_practices: true,
            declarations_first: true,
            prototypes: true,
            line_comments: true,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            dedup_prefix_len: default_dedup_prefix_len(),
            default_title: default_title(),
            excluded_paths: default_excluded_paths(),
            checks: Checks::default(),
        }
    }
}

impl Settings {
    /// Parse settings from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("invalid settings file {}", path.display()))
    }

    /// Parse settings from YAML text. Empty text gives the defaults.
    pub fn from_yaml_str(content: &str) -> anyhow::Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let settings: Settings = serde_yaml::from_str(content)?;
        validate(&settings)?;
        Ok(settings)
    }

    /// Check if a path should be excluded based on excluded_paths patterns.
    pub fn is_path_excluded(&self, path: &Path) -> bool {
        if self.excluded_paths.is_empty() {
            return false;
        }

        let path_str = path.to_string_lossy();
        self.excluded_paths.iter().any(|pattern| {
            globset::Glob::new(pattern)
                .map(|glob| glob.compile_matcher().is_match(&*path_str))
                .unwrap_or(false)
        })
    }
}

/// Validate settings for correctness.
pub fn validate(settings: &Settings) -> anyhow::Result<()> {
    if settings.dedup_prefix_len == 0 {
        anyhow::bail!("dedup_prefix_len must be at least 1");
    }

    for pattern in &settings.excluded_paths {
        globset::Glob::new(pattern)
            .map_err(|e| anyhow::anyhow!("invalid excluded_paths pattern {:?}: {}", pattern, e))?;
    }

    Ok(())
}

/// Per-user settings file, if the platform has a config directory.
pub fn user_settings_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "commitlens")
        .map(|dirs| dirs.config_dir().join("commitlens.yaml"))
}

/// Locate and load settings.
///
/// An explicit path must exist. Otherwise the working directory is searched,
/// then the per-user config directory; with nothing found the defaults apply.
/// Returns the settings and the file they came from.
pub fn discover(explicit: Option<&Path>, cwd: &Path) -> anyhow::Result<(Settings, Option<PathBuf>)> {
    if let Some(path) = explicit {
        return Ok((Settings::parse_file(path)?, Some(path.to_path_buf())));
    }

    let candidates = SETTINGS_FILE_NAMES
        .iter()
        .map(|name| cwd.join(name))
        .chain(user_settings_path());

    for candidate in candidates {
        if candidate.is_file() {
            let settings = Settings::parse_file(&candidate)?;
            return Ok((settings, Some(candidate)));
        }
    }

    Ok((Settings::default(), None))
}

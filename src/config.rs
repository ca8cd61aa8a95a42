use std::{
    fs,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::collect::DirectiveSyntax;
use crate::core::collect::directive::{DEFAULT_DIRECTIVE_TAG, DEFAULT_PREFERRED_TAG};
use crate::core::merger::ModuleMerger;
use crate::core::model::DeclarationKind;

pub const CONFIG_FILE_NAME: &str = ".declmergerc.json";

static TAG_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z](?:[A-Za-z0-9_-]*[A-Za-z0-9_])?$").unwrap());

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_includes")]
    pub includes: Vec<String>,
    #[serde(default = "default_ignores")]
    pub ignores: Vec<String>,
    #[serde(default = "default_out_dir")]
    pub out_dir: String,
    #[serde(default = "DeclarationKind::default_mergeable")]
    pub mergeable_kind: DeclarationKind,
    #[serde(default = "default_directive_tag")]
    pub directive_tag: String,
    #[serde(default = "default_preferred_tag")]
    pub preferred_tag: String,
}

fn default_includes() -> Vec<String> {
    vec![".".to_string()]
}

fn default_ignores() -> Vec<String> {
    vec!["**/node_modules/**".to_string()]
}

fn default_out_dir() -> String {
    "./resolved".to_string()
}

fn default_directive_tag() -> String {
    DEFAULT_DIRECTIVE_TAG.to_string()
}

fn default_preferred_tag() -> String {
    DEFAULT_PREFERRED_TAG.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            includes: default_includes(),
            ignores: default_ignores(),
            out_dir: default_out_dir(),
            mergeable_kind: DeclarationKind::default_mergeable(),
            directive_tag: default_directive_tag(),
            preferred_tag: default_preferred_tag(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob pattern is invalid, or if the directive
    /// tags are not plain tag names.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        // Includes without wildcards are literal directory paths.
        for pattern in &self.includes {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        for (field, tag) in [
            ("directiveTag", &self.directive_tag),
            ("preferredTag", &self.preferred_tag),
        ] {
            if !TAG_NAME_REGEX.is_match(tag) {
                bail!(
                    "Invalid tag name in '{}': \"{}\" (use letters, digits, '-' or '_', without '@')",
                    field,
                    tag
                );
            }
        }
        if self.directive_tag == self.preferred_tag {
            bail!(
                "'directiveTag' and 'preferredTag' must differ (both are \"{}\")",
                self.directive_tag
            );
        }

        Ok(())
    }

    pub fn directive_syntax(&self) -> Result<DirectiveSyntax> {
        if self.directive_tag == DEFAULT_DIRECTIVE_TAG && self.preferred_tag == DEFAULT_PREFERRED_TAG
        {
            return Ok(DirectiveSyntax::default());
        }
        Ok(DirectiveSyntax::new(
            &self.directive_tag,
            &self.preferred_tag,
        )?)
    }

    /// A fresh merger for one build.
    pub fn merger(&self) -> Result<ModuleMerger> {
        Ok(ModuleMerger::new(
            self.directive_syntax()?,
            self.mergeable_kind,
        ))
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
    pub path: Option<PathBuf>,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
                path: Some(path),
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
            path: None,
        }),
    }
}

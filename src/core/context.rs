//! Project-level context: configuration, document discovery and per-document builds.
//!
//! Every declaration document under the configured includes is an independent
//! build. Builds share nothing, so they run in parallel with rayon; each one
//! gets its own [`ModuleMerger`](crate::core::merger::ModuleMerger) and tree.

use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use colored::Colorize;
use glob::{Pattern, glob};
use rayon::prelude::*;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::{CONFIG_FILE_NAME, Config, load_config};
use crate::core::model::DeclarationTree;
use crate::core::parsers::document::{ResolvedDeclaration, TreeBuilder, parse_document_file};
use crate::core::resolve::MergeReport;

/// A declaration document that could not be read or resolved.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ParseErrorIssue {
    pub file_path: String,
    pub error: String,
}

/// One resolved build.
#[derive(Debug)]
pub struct DocumentResolution {
    pub path: PathBuf,
    /// Path relative to the project root, used to mirror the layout on write.
    pub relative_path: PathBuf,
    pub tree: DeclarationTree,
    pub report: MergeReport,
}

impl DocumentResolution {
    /// Write the resolved tree under `out_dir`, returning the written path.
    pub fn write_to(&self, out_dir: &Path) -> Result<PathBuf> {
        let target = out_dir.join(&self.relative_path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let json = ResolvedDeclaration::from_tree(&self.tree)?.to_json()?;
        fs::write(&target, json)
            .with_context(|| format!("Failed to write file: {}", target.display()))?;
        Ok(target)
    }
}

#[derive(Debug, Default)]
pub struct ResolveResults {
    pub documents: Vec<DocumentResolution>,
    pub parse_errors: Vec<ParseErrorIssue>,
}

pub struct MergeContext {
    pub config: Config,
    pub root_dir: PathBuf,
    pub files: Vec<PathBuf>,
    pub verbose: bool,
}

impl MergeContext {
    pub fn new(root_dir: &Path, verbose: bool) -> Result<Self> {
        let loaded = load_config(root_dir)?;
        if let Some(path) = &loaded.path {
            debug!(target: "declmerge::context", config = %path.display(), "loaded config");
        }
        Self::with_config(root_dir, loaded.config, verbose)
    }

    pub fn with_config(root_dir: &Path, config: Config, verbose: bool) -> Result<Self> {
        config.validate()?;
        let root_dir = root_dir.to_path_buf();
        let out_dir = resolve_dir(&root_dir, &config.out_dir);
        let files = scan_documents(&root_dir, &config, &out_dir, verbose);
        debug!(
            target: "declmerge::context",
            root = %root_dir.display(),
            documents = files.len(),
            "scanned declaration documents"
        );

        Ok(Self {
            config,
            root_dir,
            files,
            verbose,
        })
    }

    pub fn out_dir(&self) -> PathBuf {
        resolve_dir(&self.root_dir, &self.config.out_dir)
    }

    /// Resolve every discovered document.
    ///
    /// Documents that fail to read, parse or build become [`ParseErrorIssue`]s;
    /// only configuration problems abort the whole run.
    pub fn resolve_all(&self) -> Result<ResolveResults> {
        // Fail fast on a bad syntax before spawning any work.
        self.config.directive_syntax()?;

        let outcomes: Vec<_> = self
            .files
            .par_iter()
            .map(|path| (path, self.resolve_document(path)))
            .collect();

        let mut results = ResolveResults::default();
        for (path, outcome) in outcomes {
            match outcome {
                Ok(document) => results.documents.push(document),
                Err(err) => {
                    warn!(
                        target: "declmerge::context",
                        file = %path.display(),
                        error = %format!("{:#}", err),
                        "failed to resolve declaration document"
                    );
                    results.parse_errors.push(ParseErrorIssue {
                        file_path: self.display_path(path),
                        error: format!("{:#}", err),
                    });
                }
            }
        }
        results.parse_errors.sort();
        Ok(results)
    }

    fn resolve_document(&self, path: &Path) -> Result<DocumentResolution> {
        let document = parse_document_file(path)?;
        let mut merger = self.config.merger()?;

        merger.begin_collection();
        let mut tree = TreeBuilder::build(&document, &mut merger)?;
        let report = merger.resolve_merges(&mut tree)?;

        Ok(DocumentResolution {
            path: path.to_path_buf(),
            relative_path: path.strip_prefix(&self.root_dir).unwrap_or(path).to_path_buf(),
            tree,
            report,
        })
    }

    /// Path as shown to the user: relative to the root when possible.
    pub fn display_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.root_dir)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}

fn resolve_dir(root_dir: &Path, dir: &str) -> PathBuf {
    let p = Path::new(dir);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        root_dir.join(p.strip_prefix(".").unwrap_or(p))
    }
}

/// Find declaration documents (`*.json`) under the configured includes.
///
/// Skips hidden directories, the config file, the output directory and
/// anything matching an ignore pattern. The result is sorted.
fn scan_documents(root_dir: &Path, config: &Config, out_dir: &Path, verbose: bool) -> Vec<PathBuf> {
    let ignore_patterns: Vec<Pattern> = config
        .ignores
        .iter()
        .filter_map(|p| Pattern::new(p).ok())
        .collect();

    let mut dirs_to_scan = Vec::new();
    for inc in &config.includes {
        if inc.contains('*') || inc.contains('?') {
            let pattern = root_dir.join(inc);
            match glob(&pattern.to_string_lossy()) {
                Ok(entries) => dirs_to_scan.extend(entries.flatten()),
                Err(e) => {
                    if verbose {
                        eprintln!(
                            "{} Invalid glob pattern '{}': {}",
                            "warning:".bold().yellow(),
                            inc,
                            e
                        );
                    }
                }
            }
        } else {
            let path = resolve_dir(root_dir, inc);
            if path.exists() {
                dirs_to_scan.push(path);
            } else if verbose {
                eprintln!(
                    "{} Include path does not exist: {}",
                    "warning:".bold().yellow(),
                    path.display()
                );
            }
        }
    }

    let mut files = BTreeSet::new();
    for dir in dirs_to_scan {
        let walker = WalkDir::new(&dir).into_iter().filter_entry(|entry| {
            entry.depth() == 0
                || !(entry.file_type().is_dir()
                    && entry.file_name().to_string_lossy().starts_with('.'))
        });

        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    if verbose {
                        eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                    }
                    continue;
                }
            };
            let path = entry.path();
            if path.starts_with(out_dir) {
                continue;
            }
            let path_str = path.to_string_lossy();
            if ignore_patterns.iter().any(|p| p.matches(&path_str)) {
                continue;
            }
            if path.is_file() && is_document_file(path) {
                files.insert(path.to_path_buf());
            }
        }
    }

    files.into_iter().collect()
}

fn is_document_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("json")
        && path.file_name().and_then(|n| n.to_str()) != Some(CONFIG_FILE_NAME)
}

use std::path::PathBuf;

use super::super::exit_status::ExitStatus;
use crate::core::{MergeReport, ParseErrorIssue};

#[derive(Debug)]
pub enum CommandSummary {
    Merge(MergeSummary),
    Init(InitSummary),
}

/// Merge outcomes for one declaration document.
#[derive(Debug)]
pub struct DocumentSummary {
    pub file_path: String,
    pub report: MergeReport,
}

#[derive(Debug)]
pub struct MergeSummary {
    /// Only documents with at least one directive.
    pub documents: Vec<DocumentSummary>,
    pub renamed_count: usize,
    pub merged_count: usize,
    pub skipped_count: usize,
    pub is_apply: bool,
    pub out_dir: PathBuf,
    pub written_count: usize,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Result of running declmerge commands
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    /// If true, exit code 1 should be returned when error_count > 0.
    pub exit_on_errors: bool,
    pub parse_errors: Vec<ParseErrorIssue>,
    /// Number of declaration documents that were processed.
    pub documents_checked: usize,
}

impl CommandResult {
    pub fn exit_status(&self) -> ExitStatus {
        if self.exit_on_errors && self.error_count > 0 {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}

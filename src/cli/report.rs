//! Report formatting and printing utilities.
//!
//! Separate from core logic so declmerge can be used as a library.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{CommandResult, CommandSummary, DocumentSummary, InitSummary, MergeSummary};
use crate::config::CONFIG_FILE_NAME;
use crate::core::{MergeOutcome, ParseErrorIssue};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print a command result: the summary to stdout, errors to stderr.
pub fn print(result: &CommandResult, verbose: bool) {
    print_to(
        result,
        verbose,
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    );
}

pub fn print_to<W: Write, E: Write>(result: &CommandResult, verbose: bool, out: &mut W, err: &mut E) {
    match &result.summary {
        CommandSummary::Merge(summary) => {
            print_parse_errors(&result.parse_errors, verbose, err);
            print_merge_summary(summary, result.documents_checked, out);
        }
        CommandSummary::Init(summary) => print_init(summary, out, err),
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn plural(count: usize, one: &str, many: &str) -> String {
    format!("{} {}", count, if count == 1 { one } else { many })
}

fn pad_to_width(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(fill))
}

fn print_parse_errors<E: Write>(errors: &[ParseErrorIssue], verbose: bool, err: &mut E) {
    for issue in errors {
        if verbose {
            let _ = writeln!(err, "{} {}: {}", "error:".bold().red(), issue.file_path, issue.error);
        } else {
            let first_line = issue.error.lines().next().unwrap_or("");
            let _ = writeln!(err, "{} {}: {}", "error:".bold().red(), issue.file_path, first_line);
        }
    }
}

fn print_document<W: Write>(document: &DocumentSummary, out: &mut W) {
    let _ = writeln!(out, "{}", document.file_path.bold());

    let width = document
        .report
        .outcomes
        .iter()
        .map(|outcome| match outcome {
            MergeOutcome::Renamed { from, .. } => from.width(),
            MergeOutcome::Merged { source_name, .. } => source_name.width(),
            MergeOutcome::Skipped { source, .. } => source.to_string().width(),
        })
        .max()
        .unwrap_or(0);

    for outcome in &document.report.outcomes {
        let line = match outcome {
            MergeOutcome::Renamed { from, to, .. } => format!(
                "{} {} {} {}",
                format!("{:<7}", "renamed").green(),
                pad_to_width(from, width),
                "->".dimmed(),
                to
            ),
            MergeOutcome::Merged {
                source_name,
                target_name,
                relinked,
                comment_replaced,
                ..
            } => {
                let mut details = format!("{} moved", plural(relinked.len(), "declaration", "declarations"));
                if *comment_replaced {
                    details.push_str(", comment replaced");
                }
                format!(
                    "{} {} {} {} {}",
                    format!("{:<7}", "merged").cyan(),
                    pad_to_width(source_name, width),
                    "->".dimmed(),
                    target_name,
                    format!("({})", details).dimmed()
                )
            }
            MergeOutcome::Skipped {
                source,
                target_name,
            } => format!(
                "{} {} {} {} {}",
                format!("{:<7}", "skipped").yellow(),
                pad_to_width(&source.to_string(), width),
                "->".dimmed(),
                target_name,
                "(declaration no longer in tree)".dimmed()
            ),
        };
        let _ = writeln!(out, "  {}", line);
    }
    let _ = writeln!(out);
}

fn print_merge_summary<W: Write>(summary: &MergeSummary, documents_checked: usize, out: &mut W) {
    if documents_checked == 0 {
        let _ = writeln!(
            out,
            "{} no declaration documents found",
            "warning:".bold().yellow()
        );
        return;
    }

    for document in &summary.documents {
        print_document(document, out);
    }

    let mut counts = vec![
        plural(summary.renamed_count, "rename", "renames"),
        plural(summary.merged_count, "merge", "merges"),
    ];
    if summary.skipped_count > 0 {
        counts.push(format!("{} skipped", summary.skipped_count));
    }
    let _ = writeln!(
        out,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Checked {}: {}",
            plural(documents_checked, "document", "documents"),
            counts.join(", ")
        )
        .green()
    );

    let out_dir = summary.out_dir.display();
    if summary.is_apply {
        let _ = writeln!(
            out,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Wrote {} to {}",
                plural(summary.written_count, "resolved document", "resolved documents"),
                out_dir
            )
            .green()
        );
    } else if summary.renamed_count + summary.merged_count > 0 {
        let _ = writeln!(
            out,
            "Run with {} to write resolved documents to {}",
            "--apply".cyan(),
            out_dir
        );
    }
}

fn print_init<W: Write, E: Write>(summary: &InitSummary, out: &mut W, err: &mut E) {
    if summary.created {
        let _ = writeln!(
            out,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    } else {
        let _ = writeln!(
            err,
            "{} {}",
            FAILURE_MARK.red(),
            format!("{} already exists", CONFIG_FILE_NAME).red()
        );
    }
}

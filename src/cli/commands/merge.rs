use anyhow::{Ok, Result};

use super::super::args::MergeCommand;
use super::{CommandResult, CommandSummary, DocumentSummary, MergeSummary};
use crate::config::load_config;
use crate::core::MergeContext;

pub fn merge(cmd: MergeCommand) -> Result<CommandResult> {
    let args = &cmd.args;
    let mut loaded = load_config(&args.common.path)?;
    if let Some(out_dir) = &args.out_dir {
        loaded.config.out_dir = out_dir.to_string_lossy().into_owned();
    }
    let ctx = MergeContext::with_config(&args.common.path, loaded.config, args.common.verbose)?;
    let out_dir = ctx.out_dir();

    let results = ctx.resolve_all()?;

    let written_count = if args.apply {
        for document in &results.documents {
            document.write_to(&out_dir)?;
        }
        results.documents.len()
    } else {
        0
    };

    let mut renamed_count = 0;
    let mut merged_count = 0;
    let mut skipped_count = 0;
    let mut documents = Vec::new();
    for document in results.documents {
        renamed_count += document.report.renamed_count();
        merged_count += document.report.merged_count();
        skipped_count += document.report.skipped_count();
        if !document.report.is_empty() {
            documents.push(DocumentSummary {
                file_path: ctx.display_path(&document.path),
                report: document.report,
            });
        }
    }

    Ok(CommandResult {
        summary: CommandSummary::Merge(MergeSummary {
            documents,
            renamed_count,
            merged_count,
            skipped_count,
            is_apply: args.apply,
            out_dir,
            written_count,
        }),
        error_count: results.parse_errors.len(),
        exit_on_errors: true,
        parse_errors: results.parse_errors,
        documents_checked: ctx.files.len(),
    })
}

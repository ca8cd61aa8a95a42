use std::{fs, path::Path};

use anyhow::Result;

use super::{CommandResult, CommandSummary, InitSummary};
use crate::config::{CONFIG_FILE_NAME, default_config_json};

pub fn init() -> Result<CommandResult> {
    let config_path = Path::new(CONFIG_FILE_NAME);
    let created = !config_path.exists();

    if created {
        fs::write(config_path, default_config_json()? + "\n")?;
    }

    Ok(CommandResult {
        summary: CommandSummary::Init(InitSummary { created }),
        error_count: usize::from(!created),
        exit_on_errors: true,
        parse_errors: Vec::new(),
        documents_checked: 0,
    })
}

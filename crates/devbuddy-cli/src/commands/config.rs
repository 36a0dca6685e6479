use devbuddy_core::config::HOME_ENV_VAR;
use devbuddy_core::StorageConfig;

use crate::commands::common::print_json;
use crate::error::CliError;

pub fn run_config(config: &StorageConfig, as_json: bool) -> Result<(), CliError> {
    if as_json {
        return print_json(config);
    }

    for line in format_config_lines(config) {
        println!("{line}");
    }
    Ok(())
}

pub fn format_config_lines(config: &StorageConfig) -> Vec<String> {
    let override_note = std::env::var_os(HOME_ENV_VAR).map_or_else(
        || format!("{HOME_ENV_VAR} not set"),
        |value| format!("{HOME_ENV_VAR}={}", value.to_string_lossy()),
    );
    vec![
        format!("notes:     {}", config.notes_dir.display()),
        format!("tasks:     {}", config.tasks_dir.display()),
        format!("bookmarks: {}", config.bookmarks_path.display()),
        format!("({override_note})"),
    ]
}

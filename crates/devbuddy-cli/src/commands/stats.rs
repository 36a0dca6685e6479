use devbuddy_core::models::TaskStats;
use devbuddy_core::TasksService;

use crate::commands::common::print_json;
use crate::error::CliError;

pub fn run_stats(as_json: bool, tasks: &TasksService) -> Result<(), CliError> {
    let stats = tasks.get_stats()?;

    if as_json {
        print_json(&stats)?;
    } else {
        for line in format_stats_lines(&stats) {
            println!("{line}");
        }
    }

    Ok(())
}

pub fn format_stats_lines(stats: &TaskStats) -> Vec<String> {
    vec![
        format!("total:      {}", stats.total),
        format!("completed:  {} ({}%)", stats.completed, stats.completion_rate),
        format!("pending:    {}", stats.pending),
        format!("overdue:    {}", stats.overdue),
        format!("due today:  {}", stats.due_today),
        format!("categories: {}", stats.total_categories),
    ]
}

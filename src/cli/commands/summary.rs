use serde_json::json;
use wishlist_core::{SortOption, SummaryService};

use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "summary",
        "Show totals and the nearest goal",
        "summary [json]",
        cmd_summary,
    )]
}

fn cmd_summary(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let as_json = match args.first() {
        None => false,
        Some(flag) if flag.eq_ignore_ascii_case("json") => true,
        Some(other) => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown summary option `{other}`"
            )))
        }
    };

    let app = &context.app;
    let projections = app.projections(SortOption::Recent);
    let summary = SummaryService::summarize(&projections);

    if as_json {
        let nearest = summary.nearest_goal.map(|goal| {
            json!({
                "id": goal.product.id,
                "name": goal.product.name,
                "months_needed": goal.months_needed,
                "progress_percentage": goal.progress_percentage,
                "estimated_completion": goal.estimated_completion_label,
            })
        });
        let document = json!({
            "wishlist": app.name(),
            "total_value": summary.total_value,
            "count": summary.count,
            "high_priority_count": summary.high_priority_count,
            "nearest_goal": nearest,
        });
        output::line(serde_json::to_string_pretty(&document)?);
        return Ok(());
    }

    output::section(format!("Summary: {}", app.name()));
    output::line(format!("  Items         : {}", summary.count));
    output::line(format!(
        "  Total value   : {}",
        app.format_amount(summary.total_value)
    ));
    output::line(format!("  High priority : {}", summary.high_priority_count));
    match summary.nearest_goal {
        Some(goal) if goal.months_needed > 0 => output::line(format!(
            "  Nearest goal  : {} in {} month(s), {}",
            goal.product.name, goal.months_needed, goal.estimated_completion_label
        )),
        Some(goal) => output::line(format!(
            "  Nearest goal  : {} ({})",
            goal.product.name, goal.estimated_completion_label
        )),
        None => output::line("  Nearest goal  : none"),
    }
    if app.budget().is_none() && summary.count > 0 {
        io::print_hint("Set a budget with `set-budget` to see saving projections.");
    }
    Ok(())
}

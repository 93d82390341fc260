use wishlist_core::{BudgetDraft, BudgetService};

use super::{parse_amount, required};
use crate::cli::context::{CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("budget", "Show the monthly budget", "budget", cmd_budget),
        CommandEntry::new(
            "set-budget",
            "Set income, monthly saving and fixed expenses",
            "set-budget <income> <saving> [expenses] [currency]",
            cmd_set_budget,
        ),
        CommandEntry::new(
            "suggest",
            "Suggest a monthly saving from income and expenses",
            "suggest <income> [expenses]",
            cmd_suggest,
        ),
    ]
}

fn cmd_budget(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let app = &context.app;
    let Some(budget) = app.budget() else {
        io::print_info("No budget set.");
        io::print_hint("Use `set-budget <income> <saving> [expenses] [currency]`.");
        return Ok(());
    };
    output::section("Budget");
    output::line(format!("  Monthly income : {}", app.format_amount(budget.monthly_income)));
    output::line(format!("  Fixed expenses : {}", app.format_amount(budget.fixed_expenses)));
    output::line(format!(
        "  Available      : {}",
        app.format_amount(budget.available_for_saving())
    ));
    output::line(format!("  Monthly saving : {}", app.format_amount(budget.monthly_saving)));
    output::line(format!(
        "  Updated        : {}",
        budget.last_updated.format("%Y-%m-%d %H:%M")
    ));
    Ok(())
}

fn cmd_set_budget(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let monthly_income = parse_amount(required(args, 0, "income")?, "income")?;
    let monthly_saving = parse_amount(required(args, 1, "saving")?, "saving")?;
    let fixed_expenses = match args.get(2) {
        Some(value) => parse_amount(value, "expenses")?,
        None => 0.0,
    };
    let budget = context.app.set_budget(BudgetDraft {
        monthly_income,
        monthly_saving,
        fixed_expenses,
        currency: args.get(3).map(|value| value.to_string()),
    })?;
    io::print_success(format!(
        "Budget saved: saving {} per month.",
        context.app.format_amount(budget.monthly_saving)
    ));
    if budget.monthly_saving > budget.available_for_saving() {
        io::print_warning("Monthly saving is higher than income left after fixed expenses.");
    }
    Ok(())
}

fn cmd_suggest(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let income = parse_amount(required(args, 0, "income")?, "income")?;
    let expenses = match args.get(1) {
        Some(value) => parse_amount(value, "expenses")?,
        None => 0.0,
    };
    let suggested = BudgetService::suggested_saving(income, expenses);
    io::print_info(format!(
        "Suggested monthly saving: {}",
        context.app.format_amount(suggested)
    ));
    Ok(())
}

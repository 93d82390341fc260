use wishlist_core::SortOption;
use wishlist_domain::Priority;

use super::{parse_amount, required, rest, short_id};
use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "add",
            "Add a product to the wishlist",
            "add <name> <price> [low|medium|high] [category]",
            cmd_add,
        ),
        CommandEntry::new(
            "list",
            "List products with their saving progress",
            "list [recent|priority|price] [low|medium|high]",
            cmd_list,
        ),
        CommandEntry::new(
            "purchased",
            "List purchased products",
            "purchased",
            cmd_purchased,
        ),
        CommandEntry::new("buy", "Mark a product as purchased", "buy <id>", cmd_buy),
        CommandEntry::new("remove", "Remove a product", "remove <id>", cmd_remove),
    ]
}

fn parse_priority(value: &str) -> Result<Priority, CommandError> {
    value
        .parse()
        .map_err(|err: wishlist_domain::ParsePriorityError| {
            CommandError::InvalidArguments(err.to_string())
        })
}

/// Splits list arguments into an ordering and an optional priority filter.
pub(crate) fn parse_list_args(args: &[&str]) -> Result<(SortOption, Option<Priority>), CommandError> {
    let mut sort = SortOption::default();
    let mut filter = None;
    for arg in args {
        if let Ok(option) = arg.parse::<SortOption>() {
            sort = option;
        } else if let Ok(priority) = arg.parse::<Priority>() {
            filter = Some(priority);
        } else {
            return Err(CommandError::InvalidArguments(format!(
                "unknown list option `{arg}`"
            )));
        }
    }
    Ok((sort, filter))
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let name = required(args, 0, "name")?;
    let price = parse_amount(required(args, 1, "price")?, "price")?;
    let mut draft = context.app.draft(name, price);
    if let Some(priority) = args.get(2) {
        draft.priority = parse_priority(priority)?;
    }
    if let Some(category) = rest(args, 3) {
        draft.category = Some(category);
    }
    let id = context.app.add_product(draft)?;
    io::print_success(format!("Added `{}` ({})", name.trim(), short_id(&id)));
    Ok(())
}

fn cmd_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (sort, filter) = parse_list_args(args)?;
    let app = &context.app;
    let mut projections = app.projections(sort);
    if let Some(priority) = filter {
        projections.retain(|projection| projection.product.priority == priority);
    }
    if projections.is_empty() {
        io::print_info("No products to show. Use `add <name> <price>` to add one.");
        return Ok(());
    }

    output::section(format!("Wishlist: {} (sorted by {sort})", app.name()));
    let mut table = Table::new(vec![
        TableColumn::left("Id"),
        TableColumn::left("Name"),
        TableColumn::right("Price"),
        TableColumn::left("Priority"),
        TableColumn::right("Months"),
        TableColumn::right("Progress"),
        TableColumn::left("Target"),
    ]);
    for projection in &projections {
        let product = projection.product;
        table.push(vec![
            short_id(&product.id),
            product.name.clone(),
            app.format_amount(product.price),
            product.priority.display_name().to_string(),
            projection.months_needed.to_string(),
            format!("{:.0}%", projection.progress_percentage),
            projection.estimated_completion_label.clone(),
        ]);
    }
    output::line(table.render());
    if app.budget().is_none() {
        io::print_hint("Set a budget with `set-budget` to see saving projections.");
    }
    Ok(())
}

fn cmd_purchased(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let products = context.app.purchased();
    if products.is_empty() {
        io::print_info("Nothing purchased yet.");
        return Ok(());
    }
    output::section("Purchased");
    let mut table = Table::new(vec![
        TableColumn::left("Id"),
        TableColumn::left("Name"),
        TableColumn::right("Price"),
        TableColumn::left("Purchased on"),
    ]);
    for product in products {
        table.push(vec![
            short_id(&product.id),
            product.name.clone(),
            context.app.format_amount(product.price),
            product
                .purchased_at
                .map(|at| at.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        ]);
    }
    output::line(table.render());
    Ok(())
}

fn cmd_buy(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let reference = required(args, 0, "id")?;
    let name = context.app.mark_purchased(reference)?;
    io::print_success(format!("Marked `{name}` as purchased."));
    Ok(())
}

fn cmd_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let reference = required(args, 0, "id")?;
    let name = context.app.product(reference)?.name.clone();
    if !context.confirm(&format!("Remove `{name}`?"))? {
        io::print_info("Nothing removed.");
        return Ok(());
    }
    context.app.remove_product(reference)?;
    io::print_success(format!("Removed `{name}`."));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_args_accept_sort_and_priority_in_any_order() {
        let (sort, filter) = parse_list_args(&["high", "price"]).unwrap();
        assert_eq!(sort, SortOption::Price);
        assert_eq!(filter, Some(Priority::High));

        let (sort, filter) = parse_list_args(&[]).unwrap();
        assert_eq!(sort, SortOption::Recent);
        assert_eq!(filter, None);

        assert!(parse_list_args(&["cheapest"]).is_err());
    }
}

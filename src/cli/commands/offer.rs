use crate::cli::context::{CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("offers", "List active offers", "offers", cmd_offers),
        CommandEntry::new(
            "seed-offers",
            "Add sample offers when none are active",
            "seed-offers",
            cmd_seed_offers,
        ),
        CommandEntry::new(
            "prune-offers",
            "Delete expired offers",
            "prune-offers",
            cmd_prune_offers,
        ),
    ]
}

fn cmd_offers(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let expired = context.app.expire_offers()?;
    if expired > 0 {
        io::print_info(format!("{expired} offer(s) expired."));
    }
    let app = &context.app;
    let offers = app.active_offers();
    if offers.is_empty() {
        io::print_info("No active offers.");
        io::print_hint("Use `seed-offers` to load sample offers.");
        return Ok(());
    }
    output::section("Active offers");
    let mut table = Table::new(vec![
        TableColumn::left("Product"),
        TableColumn::right("Discount"),
        TableColumn::right("Was"),
        TableColumn::right("Now"),
        TableColumn::right("You save"),
        TableColumn::left("Expires"),
        TableColumn::left("Source"),
    ]);
    for offer in offers {
        table.push(vec![
            offer.product_name.clone(),
            format!("{}%", offer.discount_percentage),
            app.format_amount(offer.original_price),
            app.format_amount(offer.discounted_price),
            app.format_amount(offer.savings()),
            offer
                .expires_at
                .map(|at| at.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".into()),
            offer.source.clone(),
        ]);
    }
    output::line(table.render());
    Ok(())
}

fn cmd_seed_offers(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    match context.app.seed_offers()? {
        0 => io::print_info("Active offers already exist; nothing seeded."),
        added => io::print_success(format!("Seeded {added} sample offer(s).")),
    }
    Ok(())
}

fn cmd_prune_offers(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if !context.confirm("Delete all expired offers?")? {
        return Ok(());
    }
    let removed = context.app.prune_offers()?;
    io::print_success(format!("Removed {removed} expired offer(s)."));
    Ok(())
}

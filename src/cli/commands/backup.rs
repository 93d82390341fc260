use std::path::PathBuf;

use super::{required, rest};
use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("open", "Open or create a wishlist", "open <name>", cmd_open),
        CommandEntry::new("wishlists", "List stored wishlists", "wishlists", cmd_wishlists),
        CommandEntry::new(
            "export",
            "Write the wishlist to a JSON file",
            "export <path>",
            cmd_export,
        ),
        CommandEntry::new("backup", "Back up the wishlist", "backup [note]", cmd_backup),
        CommandEntry::new("backups", "List wishlist backups", "backups", cmd_backups),
        CommandEntry::new(
            "restore",
            "Restore the wishlist from a backup",
            "restore <number|name>",
            cmd_restore,
        ),
    ]
}

fn cmd_open(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let name =
        rest(args, 0).ok_or_else(|| CommandError::InvalidArguments("missing <name>".into()))?;
    let warnings = context.app.open(&name)?;
    for warning in warnings {
        io::print_warning(warning);
    }
    io::print_success(format!(
        "Opened wishlist `{}` ({} product(s)).",
        context.app.name(),
        context.app.wishlist().products.len()
    ));
    Ok(())
}

fn cmd_wishlists(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let names = context.app.wishlists()?;
    if names.is_empty() {
        io::print_info("No wishlists saved yet.");
        return Ok(());
    }
    output::section("Wishlists");
    for name in names {
        output::line(format!("  {name}"));
    }
    Ok(())
}

fn cmd_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let path = PathBuf::from(required(args, 0, "path")?);
    context.app.export_to(&path)?;
    io::print_success(format!("Wishlist exported to {}", path.display()));
    Ok(())
}

fn cmd_backup(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let note = rest(args, 0);
    let info = context.app.backup(note.as_deref())?;
    io::print_success(format!("Backup created: {}", info.id));
    Ok(())
}

fn cmd_backups(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let backups = context.app.backups()?;
    if backups.is_empty() {
        io::print_info("No backups yet. Use `backup [note]` to create one.");
        return Ok(());
    }
    output::section(format!("Backups of {}", context.app.name()));
    for (index, info) in backups.iter().enumerate() {
        output::line(format!("  {:>2}. {}  ({})", index + 1, info.id, info.created_at));
    }
    Ok(())
}

fn cmd_restore(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let reference = required(args, 0, "number|name")?;
    if !context.confirm("Replace the current wishlist with this backup?")? {
        io::print_info("Restore cancelled.");
        return Ok(());
    }
    let info = context.app.restore(reference)?;
    io::print_success(format!("Restored from {}", info.id));
    Ok(())
}

use wishlist_config::Config;

use super::{required, rest};
use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::AppError;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "Show or change preferences",
        "config [show | get <key> | set <key> <value> | backup [note] | backups | restore <name>]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let action = args.first().map(|a| a.to_ascii_lowercase());
    match action.as_deref() {
        None | Some("show") => show(context),
        Some("get") => {
            let key = required(args, 1, "key")?;
            output::line(format!("{key} = {}", context.app.config_value(key)?));
            Ok(())
        }
        Some("set") => {
            let key = required(args, 1, "key")?;
            let value = rest(args, 2).unwrap_or_default();
            context.app.set_config_value(key, &value)?;
            output::apply_config(context.app.config());
            if key.trim() == "data_root" {
                let stored = context.app.config().get(key).map_err(AppError::from)?;
                io::print_success(format!("{key} = {stored}"));
                io::print_info("The new data directory is used from the next start.");
                return Ok(());
            }
            io::print_success(format!(
                "{key} = {}",
                context.app.config_value(key)?
            ));
            Ok(())
        }
        Some("backup") => {
            let note = rest(args, 1);
            let name = context.app.backup_config(note.as_deref())?;
            io::print_success(format!("Configuration backup created: {name}"));
            Ok(())
        }
        Some("backups") => {
            let names = context.app.config_backups()?;
            if names.is_empty() {
                io::print_info("No configuration backups.");
            }
            for name in names {
                output::line(format!("  {name}"));
            }
            Ok(())
        }
        Some("restore") => {
            let name = required(args, 1, "name")?;
            if !context.confirm(&format!("Restore configuration from `{name}`?"))? {
                return Ok(());
            }
            context.app.restore_config(name)?;
            output::apply_config(context.app.config());
            io::print_success("Configuration restored.");
            Ok(())
        }
        Some(other) => Err(CommandError::InvalidArguments(format!(
            "unknown config action `{other}`"
        ))),
    }
}

fn show(context: &ShellContext) -> CommandResult {
    output::section("Configuration");
    for key in Config::KEYS {
        output::line(format!("  {key:<18} {}", context.app.config_value(key)?));
    }
    output::line(format!(
        "  {:<18} {}",
        "config file",
        context.app.config_manager().config_path().display()
    ));
    Ok(())
}

use std::str::FromStr;

pub mod backup;
pub mod budget;
pub mod config;
pub mod offer;
pub mod product;
pub mod summary;
pub mod system;

use crate::cli::context::CommandError;
use crate::cli::registry::CommandEntry;

pub(crate) fn all_entries() -> Vec<CommandEntry> {
    let mut entries = Vec::new();
    entries.extend(product::definitions());
    entries.extend(summary::definitions());
    entries.extend(budget::definitions());
    entries.extend(offer::definitions());
    entries.extend(backup::definitions());
    entries.extend(config::definitions());
    entries.extend(system::definitions());
    entries
}

/// Required positional argument.
pub(crate) fn required<'a>(args: &[&'a str], index: usize, name: &str) -> Result<&'a str, CommandError> {
    args.get(index)
        .copied()
        .ok_or_else(|| CommandError::InvalidArguments(format!("missing <{name}>")))
}

/// Numeric argument; rejects NaN and infinities.
pub(crate) fn parse_amount(value: &str, name: &str) -> Result<f64, CommandError> {
    f64::from_str(value.trim())
        .ok()
        .filter(|amount| amount.is_finite())
        .ok_or_else(|| CommandError::InvalidArguments(format!("{name} must be a number, got `{value}`")))
}

/// Joins the remaining arguments, `None` when there are none.
pub(crate) fn rest(args: &[&str], from: usize) -> Option<String> {
    let joined = args.get(from..)?.join(" ");
    (!joined.trim().is_empty()).then_some(joined)
}

/// First eight characters of a product id.
pub(crate) fn short_id(id: &uuid::Uuid) -> String {
    id.to_string().chars().take(8).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_reject_non_numbers() {
        assert_eq!(parse_amount("12.5", "price").unwrap(), 12.5);
        assert!(parse_amount("twelve", "price").is_err());
        assert!(parse_amount("inf", "price").is_err());
    }

    #[test]
    fn rest_joins_trailing_words() {
        assert_eq!(rest(&["a", "big", "trip"], 1), Some("big trip".to_string()));
        assert_eq!(rest(&["a"], 1), None);
        assert_eq!(rest(&["a"], 4), None);
    }

    #[test]
    fn all_entries_have_unique_names() {
        let entries = all_entries();
        let mut names: Vec<_> = entries.iter().map(|e| e.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), entries.len());
    }
}

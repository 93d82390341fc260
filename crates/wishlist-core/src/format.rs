use chrono::NaiveDate;

/// Label used when no completion date can be projected.
pub const UNDETERMINED_LABEL: &str = "undetermined";

/// Formats currency amounts for presentation.
pub trait CurrencyFormatter: Send + Sync {
    fn format_amount(&self, amount: f64, currency: &str) -> String;
}

/// Renders the month/year pair of a projected completion date.
pub trait MonthYearFormatter: Send + Sync {
    fn format_month_year(&self, year: i32, month: u32) -> String;

    fn undetermined(&self) -> String {
        UNDETERMINED_LABEL.to_string()
    }
}

/// `Mar 2025` style labels.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShortMonthYear;

impl MonthYearFormatter for ShortMonthYear {
    fn format_month_year(&self, year: i32, month: u32) -> String {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|date| date.format("%b %Y").to_string())
            .unwrap_or_else(|| format!("{month:02}/{year}"))
    }
}

/// Two-decimal amounts followed by the currency label.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainCurrency;

impl CurrencyFormatter for PlainCurrency {
    fn format_amount(&self, amount: f64, currency: &str) -> String {
        if currency.is_empty() {
            format!("{amount:.2}")
        } else {
            format!("{amount:.2} {currency}")
        }
    }
}

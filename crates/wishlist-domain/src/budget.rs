//! The single monthly budget record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::*;

pub const DEFAULT_CURRENCY: &str = "SAR";

/// Monthly income and saving plan. A wishlist holds at most one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Budget {
    pub monthly_income: f64,
    pub monthly_saving: f64,
    pub fixed_expenses: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub last_updated: DateTime<Utc>,
}

impl Budget {
    pub fn new(
        monthly_income: f64,
        monthly_saving: f64,
        fixed_expenses: f64,
        last_updated: DateTime<Utc>,
    ) -> Self {
        Self {
            monthly_income,
            monthly_saving,
            fixed_expenses,
            currency: default_currency(),
            last_updated,
        }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Income left after fixed expenses. May be negative.
    pub fn available_for_saving(&self) -> f64 {
        self.monthly_income - self.fixed_expenses
    }

    pub fn savings_rate(&self) -> SavingsRate {
        SavingsRate::new(self.monthly_saving)
    }
}

impl Amounted for Budget {
    fn amount(&self) -> f64 {
        self.monthly_saving
    }
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

//! Shared traits and value types for wishlist primitives.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Exposes a stable identifier for entities stored in a wishlist.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Provides read-only access to an entity's display name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Supplies a common contract for retrieving numeric amounts.
pub trait Amounted {
    fn amount(&self) -> f64;
}

/// Converts an entity into a user-facing display label.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Currency set aside per elapsed 30-day period.
///
/// Negative and non-finite inputs collapse to zero, which also stands for
/// "no budget configured".
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SavingsRate(f64);

impl SavingsRate {
    pub const ZERO: SavingsRate = SavingsRate(0.0);

    pub fn new(per_month: f64) -> Self {
        Self(non_negative(per_month))
    }

    pub fn per_month(self) -> f64 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }
}

impl From<f64> for SavingsRate {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for SavingsRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}/month", self.0)
    }
}

/// Clamps amounts that must never go below zero.
pub fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

// Re-export common dependencies so consumers can rely on this module as a façade.
pub use chrono;
pub use serde;
pub use uuid;

//! Domain types for wishlist products and their priority tiers.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

/// Category assigned when the user does not pick one.
pub const DEFAULT_CATEGORY: &str = "Other";

/// Categories offered as suggestions when adding a product.
pub const SUGGESTED_CATEGORIES: [&str; 6] = ["Tech", "Clothing", "Home", "Sports", "Books", "Other"];

/// A desired item the user is saving towards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_uri: Option<String>,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_url: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchased_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Product {
    pub fn new(name: impl Into<String>, price: f64, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            price: non_negative(price),
            image_uri: None,
            category: default_category(),
            priority: Priority::default(),
            product_url: None,
            created_at,
            purchased_at: None,
            notes: None,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// A product counts as purchased exactly when it carries a purchase time.
    pub fn is_purchased(&self) -> bool {
        self.purchased_at.is_some()
    }

    pub fn mark_purchased(&mut self, at: DateTime<Utc>) {
        self.purchased_at = Some(at);
    }
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

impl Identifiable for Product {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Product {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Amounted for Product {
    fn amount(&self) -> f64 {
        self.price
    }
}

impl Displayable for Product {
    fn display_label(&self) -> String {
        format!("{} ({:.2}, {})", self.name, self.price, self.priority)
    }
}

/// Importance tiers, ordered from lowest to highest.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// Numeric weight used for ordering (`1..=3`).
    pub fn value(self) -> u8 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
        }
    }

    /// The top tier counted by the "high priority" summary.
    pub fn highest() -> Self {
        Priority::High
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Returned when text does not name a priority tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePriorityError(pub String);

impl fmt::Display for ParsePriorityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown priority `{}` (expected low, medium or high)", self.0)
    }
}

impl std::error::Error for ParsePriorityError {}

impl FromStr for Priority {
    type Err = ParsePriorityError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" | "1" => Ok(Priority::Low),
            "medium" | "2" => Ok(Priority::Medium),
            "high" | "3" => Ok(Priority::High),
            other => Err(ParsePriorityError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn created() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, 9, 0, 0).unwrap()
    }

    #[test]
    fn new_product_defaults_to_medium_other_and_unpurchased() {
        let product = Product::new("Headphones", 250.0, created());
        assert_eq!(product.priority, Priority::Medium);
        assert_eq!(product.category, DEFAULT_CATEGORY);
        assert!(!product.is_purchased());
    }

    #[test]
    fn marking_purchased_sets_timestamp() {
        let mut product = Product::new("Desk", 400.0, created());
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        product.mark_purchased(at);
        assert!(product.is_purchased());
        assert_eq!(product.purchased_at, Some(at));
    }

    #[test]
    fn priority_ordering_follows_values() {
        assert!(Priority::High > Priority::Medium);
        assert!(Priority::Medium > Priority::Low);
        assert_eq!(Priority::highest().value(), 3);
    }

    #[test]
    fn priority_parses_names_and_numbers() {
        assert_eq!("HIGH".parse::<Priority>(), Ok(Priority::High));
        assert_eq!(" low ".parse::<Priority>(), Ok(Priority::Low));
        assert_eq!("2".parse::<Priority>(), Ok(Priority::Medium));
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn product_json_omits_empty_optionals() {
        let product = Product::new("Lamp", 80.0, created());
        let json = serde_json::to_string(&product).unwrap();
        assert!(!json.contains("purchased_at"));
        assert!(json.contains("\"priority\":\"MEDIUM\""));
        let back: Product = serde_json::from_str(&json).unwrap();
        assert_eq!(back, product);
    }
}

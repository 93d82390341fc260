//! Discount offers shown alongside the wishlist.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

pub const DEFAULT_OFFER_SOURCE: &str = "Local offer";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Offer {
    pub id: Uuid,
    pub product_name: String,
    pub discount_percentage: u8,
    pub original_price: f64,
    pub discounted_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offer_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Offer {
    pub fn new(
        product_name: impl Into<String>,
        discount_percentage: u8,
        original_price: f64,
        discounted_price: f64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            product_name: product_name.into(),
            discount_percentage: discount_percentage.min(100),
            original_price,
            discounted_price,
            offer_url: None,
            expires_at: None,
            source: default_source(),
            is_active: true,
            created_at,
        }
    }

    pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.offer_url = Some(url.into());
        self
    }

    /// Amount saved by taking the offer.
    pub fn savings(&self) -> f64 {
        self.original_price - self.discounted_price
    }

    /// Offers without an expiry never expire.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expiry| expiry < now)
    }
}

impl Identifiable for Offer {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Offer {
    fn name(&self) -> &str {
        &self.product_name
    }
}

impl Displayable for Offer {
    fn display_label(&self) -> String {
        format!("{} -{}%", self.product_name, self.discount_percentage)
    }
}

fn default_source() -> String {
    DEFAULT_OFFER_SOURCE.to_string()
}

fn default_active() -> bool {
    true
}

use std::{cmp::Reverse, fmt, str::FromStr};

use chrono::{DateTime, Utc};
use uuid::Uuid;
use wishlist_domain::{Priority, Product, Wishlist, DEFAULT_CATEGORY};

use crate::CoreError;

/// Orderings offered by the wishlist view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOption {
    /// Newest first.
    #[default]
    Recent,
    /// Highest priority first, newest first within a tier.
    Priority,
    /// Cheapest first.
    Price,
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SortOption::Recent => "recent",
            SortOption::Priority => "priority",
            SortOption::Price => "price",
        };
        f.write_str(label)
    }
}

impl FromStr for SortOption {
    type Err = CoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "recent" | "date" => Ok(SortOption::Recent),
            "priority" => Ok(SortOption::Priority),
            "price" => Ok(SortOption::Price),
            other => Err(CoreError::Validation(format!(
                "unknown sort `{other}` (expected recent, priority or price)"
            ))),
        }
    }
}

/// User input for a new product before validation.
#[derive(Debug, Clone, Default)]
pub struct ProductDraft {
    pub name: String,
    pub price: f64,
    pub category: Option<String>,
    pub priority: Priority,
    pub image_uri: Option<String>,
    pub product_url: Option<String>,
    pub notes: Option<String>,
}

impl ProductDraft {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::Validation("product name is required".into()));
        }
        if !self.price.is_finite() || self.price <= 0.0 {
            return Err(CoreError::Validation(
                "product price must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    fn into_product(self, created_at: DateTime<Utc>) -> Product {
        let mut product = Product::new(self.name.trim(), self.price, created_at)
            .with_priority(self.priority)
            .with_category(
                non_blank(self.category).unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            );
        product.image_uri = non_blank(self.image_uri);
        product.product_url = non_blank(self.product_url);
        product.notes = non_blank(self.notes);
        product
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

pub struct ProductService;

impl ProductService {
    pub fn add(
        wishlist: &mut Wishlist,
        draft: ProductDraft,
        now: DateTime<Utc>,
    ) -> Result<Uuid, CoreError> {
        draft.validate()?;
        let product = draft.into_product(now);
        let id = product.id;
        tracing::debug!(%id, name = %product.name, "adding product");
        wishlist.products.push(product);
        wishlist.touch();
        Ok(id)
    }

    pub fn find(wishlist: &Wishlist, id: Uuid) -> Result<&Product, CoreError> {
        wishlist.product(id).ok_or(CoreError::ProductNotFound(id))
    }

    pub fn update<F>(wishlist: &mut Wishlist, id: Uuid, apply: F) -> Result<(), CoreError>
    where
        F: FnOnce(&mut Product),
    {
        let product = wishlist
            .product_mut(id)
            .ok_or(CoreError::ProductNotFound(id))?;
        apply(product);
        if !product.price.is_finite() || product.price < 0.0 {
            product.price = 0.0;
        }
        wishlist.touch();
        Ok(())
    }

    pub fn remove(wishlist: &mut Wishlist, id: Uuid) -> Result<Product, CoreError> {
        let index = wishlist
            .products
            .iter()
            .position(|product| product.id == id)
            .ok_or(CoreError::ProductNotFound(id))?;
        let removed = wishlist.products.remove(index);
        wishlist.touch();
        tracing::debug!(%id, "removed product");
        Ok(removed)
    }

    pub fn mark_purchased(
        wishlist: &mut Wishlist,
        id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<(), CoreError> {
        let product = wishlist
            .product_mut(id)
            .ok_or(CoreError::ProductNotFound(id))?;
        if product.is_purchased() {
            return Err(CoreError::InvalidOperation(format!(
                "`{}` is already purchased",
                product.name
            )));
        }
        product.mark_purchased(at);
        wishlist.touch();
        Ok(())
    }

    /// Unpurchased products in the requested order.
    pub fn active(wishlist: &Wishlist, sort: SortOption) -> Vec<&Product> {
        let mut products: Vec<&Product> = wishlist
            .products
            .iter()
            .filter(|product| !product.is_purchased())
            .collect();
        match sort {
            SortOption::Recent => products.sort_by_key(|p| Reverse(p.created_at)),
            SortOption::Priority => {
                products.sort_by_key(|p| (Reverse(p.priority), Reverse(p.created_at)))
            }
            SortOption::Price => products.sort_by(|a, b| a.price.total_cmp(&b.price)),
        }
        products
    }

    /// Purchased products, most recent purchase first.
    pub fn purchased(wishlist: &Wishlist) -> Vec<&Product> {
        let mut products: Vec<&Product> = wishlist
            .products
            .iter()
            .filter(|product| product.is_purchased())
            .collect();
        products.sort_by_key(|p| Reverse(p.purchased_at));
        products
    }

    pub fn active_count(wishlist: &Wishlist) -> usize {
        wishlist
            .products
            .iter()
            .filter(|product| !product.is_purchased())
            .count()
    }

    pub fn total_active_value(wishlist: &Wishlist) -> f64 {
        wishlist
            .products
            .iter()
            .filter(|product| !product.is_purchased())
            .map(|product| product.price)
            .sum()
    }

    /// Keeps only products of `priority`; `None` keeps everything.
    pub fn filter_by_priority<'a>(
        products: Vec<&'a Product>,
        priority: Option<Priority>,
    ) -> Vec<&'a Product> {
        match priority {
            Some(tier) => products
                .into_iter()
                .filter(|product| product.priority == tier)
                .collect(),
            None => products,
        }
    }

    /// Resolves a full id or a unique id prefix.
    pub fn resolve_id(wishlist: &Wishlist, reference: &str) -> Result<Uuid, CoreError> {
        let needle = reference.trim().to_ascii_lowercase();
        if needle.is_empty() {
            return Err(CoreError::UnknownReference(reference.to_string()));
        }
        if let Ok(id) = Uuid::parse_str(&needle) {
            return wishlist
                .product(id)
                .map(|product| product.id)
                .ok_or(CoreError::ProductNotFound(id));
        }
        let mut matches = wishlist
            .products
            .iter()
            .filter(|product| product.id.to_string().starts_with(&needle));
        match (matches.next(), matches.next()) {
            (Some(product), None) => Ok(product.id),
            (Some(_), Some(_)) => Err(CoreError::AmbiguousReference(reference.to_string())),
            (None, _) => Err(CoreError::UnknownReference(reference.to_string())),
        }
    }
}

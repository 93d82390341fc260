use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use wishlist_domain::Wishlist;

use crate::CoreError;

/// Describes a persisted backup artifact for a wishlist.
#[derive(Debug, Clone)]
pub struct WishlistBackupInfo {
    pub wishlist: String,
    pub id: String,
    pub created_at: String,
    pub path: PathBuf,
}

/// Abstraction over persistence backends capable of storing wishlists and backups.
pub trait WishlistStorage: Send + Sync {
    fn save_wishlist(&self, name: &str, wishlist: &Wishlist) -> Result<(), CoreError>;
    fn load_wishlist(&self, name: &str) -> Result<Wishlist, CoreError>;
    fn list_wishlists(&self) -> Result<Vec<String>, CoreError>;
    fn delete_wishlist(&self, name: &str) -> Result<(), CoreError>;
    fn save_wishlist_to_path(&self, wishlist: &Wishlist, path: &Path) -> Result<(), CoreError>;
    fn load_wishlist_from_path(&self, path: &Path) -> Result<Wishlist, CoreError>;
    fn backup_wishlist(
        &self,
        name: &str,
        wishlist: &Wishlist,
        note: Option<&str>,
    ) -> Result<WishlistBackupInfo, CoreError>;
    fn list_backups(&self, name: &str) -> Result<Vec<WishlistBackupInfo>, CoreError>;
    fn restore_backup(&self, backup: &WishlistBackupInfo) -> Result<Wishlist, CoreError>;
}

/// Detects anomalies within a loaded wishlist snapshot.
pub fn wishlist_warnings(wishlist: &Wishlist) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut warnings = Vec::new();

    for product in &wishlist.products {
        if !seen.insert(product.id) {
            warnings.push(format!("product id {} appears more than once", product.id));
        }
        if !product.price.is_finite() || product.price < 0.0 {
            warnings.push(format!(
                "product {} has invalid price {}",
                product.id, product.price
            ));
        }
        if let Some(purchased) = product.purchased_at {
            if purchased < product.created_at {
                warnings.push(format!(
                    "product {} purchased before it was added",
                    product.id
                ));
            }
        }
    }
    if let Some(budget) = &wishlist.budget {
        if budget.monthly_saving < 0.0 {
            warnings.push("budget has a negative monthly saving".to_string());
        }
    }
    for offer in &wishlist.offers {
        if offer.discounted_price > offer.original_price {
            warnings.push(format!(
                "offer {} is priced above its original price",
                offer.id
            ));
        }
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use wishlist_domain::{Budget, Offer, Product};

    #[test]
    fn clean_wishlist_has_no_warnings() {
        let mut wishlist = Wishlist::new("Clean");
        wishlist.products.push(Product::new("Chair", 120.0, Utc::now()));
        assert!(wishlist_warnings(&wishlist).is_empty());
    }

    #[test]
    fn anomalies_are_reported() {
        let now = Utc::now();
        let mut wishlist = Wishlist::new("Broken");
        let mut product = Product::new("Chair", 120.0, now);
        product.price = -3.0;
        product.purchased_at = Some(now - Duration::days(2));
        wishlist.products.push(product.clone());
        wishlist.products.push(product);
        wishlist.budget = Some(Budget::new(1000.0, -5.0, 0.0, now));
        wishlist.offers.push(Offer::new("Odd", 5, 10.0, 20.0, now));

        let warnings = wishlist_warnings(&wishlist);
        assert!(warnings.iter().any(|w| w.contains("more than once")));
        assert!(warnings.iter().any(|w| w.contains("invalid price")));
        assert!(warnings.iter().any(|w| w.contains("purchased before")));
        assert!(warnings.iter().any(|w| w.contains("negative monthly saving")));
        assert!(warnings.iter().any(|w| w.contains("above its original")));
    }
}

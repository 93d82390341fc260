use chrono::{DateTime, Utc};
use wishlist_domain::{Priority, Product, SavingsRate, Wishlist};

use crate::{
    format::MonthYearFormatter,
    product_service::{ProductService, SortOption},
    progress_service::{ProgressProjection, ProgressService},
};

/// List-level figures shown above the wishlist.
#[derive(Debug, Clone, PartialEq)]
pub struct WishlistSummary<'p, 'a> {
    pub total_value: f64,
    pub count: usize,
    pub nearest_goal: Option<&'p ProgressProjection<'a>>,
    pub high_priority_count: usize,
}

pub struct SummaryService;

impl SummaryService {
    /// Projects every product with one shared rate, keeping input order.
    pub fn project_all<'a, I>(
        products: I,
        rate: SavingsRate,
        now: DateTime<Utc>,
        formatter: &dyn MonthYearFormatter,
    ) -> Vec<ProgressProjection<'a>>
    where
        I: IntoIterator<Item = &'a Product>,
    {
        products
            .into_iter()
            .map(|product| ProgressService::project(product, rate, now, formatter))
            .collect()
    }

    /// Projects the unpurchased products of `wishlist` in the requested order.
    pub fn project_wishlist<'a>(
        wishlist: &'a Wishlist,
        sort: SortOption,
        now: DateTime<Utc>,
        formatter: &dyn MonthYearFormatter,
    ) -> Vec<ProgressProjection<'a>> {
        let rate = crate::budget_service::BudgetService::savings_rate(wishlist);
        let products = ProductService::active(wishlist, sort);
        tracing::debug!(
            count = products.len(),
            rate = rate.per_month(),
            "projecting wishlist"
        );
        Self::project_all(products, rate, now, formatter)
    }

    /// Negative prices count as zero.
    pub fn total_value(projections: &[ProgressProjection<'_>]) -> f64 {
        projections
            .iter()
            .map(|p| wishlist_domain::non_negative(p.product.price))
            .sum()
    }

    pub fn count(projections: &[ProgressProjection<'_>]) -> usize {
        projections.len()
    }

    /// Smallest `months_needed`; the earliest entry wins ties.
    pub fn nearest_goal<'p, 'a>(
        projections: &'p [ProgressProjection<'a>],
    ) -> Option<&'p ProgressProjection<'a>> {
        projections.iter().min_by_key(|p| p.months_needed)
    }

    pub fn high_priority_count(projections: &[ProgressProjection<'_>]) -> usize {
        let top = Priority::highest();
        projections
            .iter()
            .filter(|p| p.product.priority == top)
            .count()
    }

    pub fn summarize<'p, 'a>(projections: &'p [ProgressProjection<'a>]) -> WishlistSummary<'p, 'a> {
        WishlistSummary {
            total_value: Self::total_value(projections),
            count: Self::count(projections),
            nearest_goal: Self::nearest_goal(projections),
            high_priority_count: Self::high_priority_count(projections),
        }
    }
}

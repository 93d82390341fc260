//! Time-to-afford projection for a single product.
//!
//! Elapsed time is measured in fixed 30-day periods while the completion label
//! advances by calendar months, so the two can disagree by a few days around
//! short months.

use chrono::{DateTime, Datelike, Months, Utc};
use wishlist_domain::{Product, SavingsRate};

use crate::format::MonthYearFormatter;

/// Length of one savings period: 30 days in milliseconds.
pub const MILLIS_PER_SAVING_MONTH: i64 = 30 * 24 * 60 * 60 * 1000;

/// Derived progress view of one product. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressProjection<'a> {
    pub product: &'a Product,
    pub months_needed: u32,
    pub progress_percentage: f64,
    pub estimated_completion_label: String,
}

pub struct ProgressService;

impl ProgressService {
    /// `ceil(price / rate)`, or zero when either side is zero.
    pub fn months_needed(price: f64, rate: SavingsRate) -> u32 {
        let price = wishlist_domain::non_negative(price);
        if rate.is_zero() || price == 0.0 {
            return 0;
        }
        // float-to-int casts saturate, so absurd ratios pin to u32::MAX
        (price / rate.per_month()).ceil() as u32
    }

    /// Whole 30-day periods between `created_at` and `now`, never negative.
    pub fn months_elapsed(created_at: DateTime<Utc>, now: DateTime<Utc>) -> u32 {
        let elapsed = (now - created_at).num_milliseconds().max(0);
        u32::try_from(elapsed / MILLIS_PER_SAVING_MONTH).unwrap_or(u32::MAX)
    }

    /// Share of the saving horizon already behind us, clamped to `0..=100`.
    pub fn progress_percentage(months_elapsed: u32, months_needed: u32) -> f64 {
        if months_needed == 0 {
            return 0.0;
        }
        let ratio = f64::from(months_elapsed) / f64::from(months_needed) * 100.0;
        ratio.clamp(0.0, 100.0)
    }

    /// `created_at` advanced by `months_needed` calendar months, day clamped to month end.
    pub fn estimated_completion(
        created_at: DateTime<Utc>,
        months_needed: u32,
    ) -> Option<DateTime<Utc>> {
        if months_needed == 0 {
            return None;
        }
        created_at.checked_add_months(Months::new(months_needed))
    }

    pub fn completion_label(
        created_at: DateTime<Utc>,
        months_needed: u32,
        formatter: &dyn MonthYearFormatter,
    ) -> String {
        match Self::estimated_completion(created_at, months_needed) {
            Some(date) => formatter.format_month_year(date.year(), date.month()),
            None => formatter.undetermined(),
        }
    }

    pub fn project<'a>(
        product: &'a Product,
        rate: SavingsRate,
        now: DateTime<Utc>,
        formatter: &dyn MonthYearFormatter,
    ) -> ProgressProjection<'a> {
        let months_needed = Self::months_needed(product.price, rate);
        let progress_percentage = if rate.is_zero() {
            0.0
        } else {
            let elapsed = Self::months_elapsed(product.created_at, now);
            Self::progress_percentage(elapsed, months_needed)
        };
        ProgressProjection {
            product,
            months_needed,
            progress_percentage,
            estimated_completion_label: Self::completion_label(
                product.created_at,
                months_needed,
                formatter,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{ShortMonthYear, UNDETERMINED_LABEL};
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 10, 8, 30, 0).unwrap()
    }

    fn product(price: f64) -> Product {
        Product::new("Camera", price, t0())
    }

    #[test]
    fn two_periods_of_five_is_forty_percent() {
        let item = product(1000.0);
        let projection = ProgressService::project(
            &item,
            SavingsRate::new(200.0),
            t0() + Duration::days(60),
            &ShortMonthYear,
        );
        assert_eq!(projection.months_needed, 5);
        assert_eq!(ProgressService::months_elapsed(t0(), t0() + Duration::days(60)), 2);
        assert_eq!(projection.progress_percentage, 40.0);
        assert_eq!(projection.estimated_completion_label, "Jun 2025");
    }

    #[test]
    fn free_product_is_undetermined() {
        let item = product(0.0);
        let projection =
            ProgressService::project(&item, SavingsRate::new(500.0), t0(), &ShortMonthYear);
        assert_eq!(projection.months_needed, 0);
        assert_eq!(projection.progress_percentage, 0.0);
        assert_eq!(projection.estimated_completion_label, UNDETERMINED_LABEL);
    }

    #[test]
    fn zero_rate_yields_no_progress() {
        let item = product(1000.0);
        let projection = ProgressService::project(
            &item,
            SavingsRate::ZERO,
            t0() + Duration::days(900),
            &ShortMonthYear,
        );
        assert_eq!(projection.months_needed, 0);
        assert_eq!(projection.progress_percentage, 0.0);
        assert_eq!(projection.estimated_completion_label, UNDETERMINED_LABEL);
    }

    #[test]
    fn long_elapsed_time_saturates_at_hundred() {
        let item = product(1000.0);
        let now = t0() + Duration::days(400);
        let projection =
            ProgressService::project(&item, SavingsRate::new(300.0), now, &ShortMonthYear);
        assert_eq!(projection.months_needed, 4);
        assert!(ProgressService::months_elapsed(t0(), now) >= 13);
        assert_eq!(projection.progress_percentage, 100.0);
    }

    #[test]
    fn months_needed_rounds_up() {
        assert_eq!(ProgressService::months_needed(1000.0, SavingsRate::new(300.0)), 4);
        assert_eq!(ProgressService::months_needed(900.0, SavingsRate::new(300.0)), 3);
        assert_eq!(ProgressService::months_needed(0.01, SavingsRate::new(300.0)), 1);
        assert_eq!(ProgressService::months_needed(0.0, SavingsRate::new(300.0)), 0);
    }

    #[test]
    fn months_needed_saturates_for_tiny_rates() {
        assert_eq!(
            ProgressService::months_needed(f64::MAX, SavingsRate::new(f64::MIN_POSITIVE)),
            u32::MAX
        );
    }

    #[test]
    fn clock_before_creation_counts_as_no_time() {
        assert_eq!(ProgressService::months_elapsed(t0(), t0() - Duration::days(45)), 0);
        let item = product(600.0);
        let projection = ProgressService::project(
            &item,
            SavingsRate::new(100.0),
            t0() - Duration::days(45),
            &ShortMonthYear,
        );
        assert_eq!(projection.progress_percentage, 0.0);
    }

    #[test]
    fn partial_periods_do_not_count() {
        let almost = t0() + Duration::milliseconds(MILLIS_PER_SAVING_MONTH - 1);
        assert_eq!(ProgressService::months_elapsed(t0(), almost), 0);
        let exact = t0() + Duration::milliseconds(MILLIS_PER_SAVING_MONTH);
        assert_eq!(ProgressService::months_elapsed(t0(), exact), 1);
    }

    #[test]
    fn completion_label_clamps_to_month_end() {
        let created = Utc.with_ymd_and_hms(2025, 1, 31, 0, 0, 0).unwrap();
        let date = ProgressService::estimated_completion(created, 1).unwrap();
        assert_eq!((date.month(), date.day()), (2, 28));
        assert_eq!(
            ProgressService::completion_label(created, 1, &ShortMonthYear),
            "Feb 2025"
        );
    }

    #[test]
    fn completion_label_crosses_year_boundary() {
        let created = Utc.with_ymd_and_hms(2024, 11, 5, 0, 0, 0).unwrap();
        assert_eq!(
            ProgressService::completion_label(created, 3, &ShortMonthYear),
            "Feb 2025"
        );
    }

    #[test]
    fn calendar_label_and_thirty_day_periods_may_diverge() {
        // The label reaches Feb 28 while the first 30-day period is still open.
        let created = Utc.with_ymd_and_hms(2025, 1, 31, 0, 0, 0).unwrap();
        let item = Product::new("Bike", 50.0, created);
        let projection = ProgressService::project(
            &item,
            SavingsRate::new(50.0),
            created + Duration::days(28),
            &ShortMonthYear,
        );
        assert_eq!(projection.estimated_completion_label, "Feb 2025");
        assert_eq!(projection.progress_percentage, 0.0);
    }

    #[test]
    fn projection_is_idempotent() {
        let item = product(750.0);
        let now = t0() + Duration::days(95);
        let first = ProgressService::project(&item, SavingsRate::new(120.0), now, &ShortMonthYear);
        let second = ProgressService::project(&item, SavingsRate::new(120.0), now, &ShortMonthYear);
        assert_eq!(first, second);
    }

    #[test]
    fn progress_never_decreases_as_time_advances() {
        let item = product(1234.0);
        let rate = SavingsRate::new(97.0);
        let mut previous = 0.0;
        for day in (0..800).step_by(7) {
            let projection =
                ProgressService::project(&item, rate, t0() + Duration::days(day), &ShortMonthYear);
            assert!(projection.progress_percentage >= previous);
            assert!((0.0..=100.0).contains(&projection.progress_percentage));
            previous = projection.progress_percentage;
        }
        assert_eq!(previous, 100.0);
    }
}

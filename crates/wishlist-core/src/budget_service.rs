use chrono::{DateTime, Utc};
use wishlist_domain::{Budget, SavingsRate, Wishlist, DEFAULT_CURRENCY};

use crate::CoreError;

/// Share of disposable income suggested as a monthly saving.
pub const SUGGESTED_SAVING_SHARE: f64 = 0.3;

#[derive(Debug, Clone)]
pub struct BudgetDraft {
    pub monthly_income: f64,
    pub monthly_saving: f64,
    pub fixed_expenses: f64,
    pub currency: Option<String>,
}

pub struct BudgetService;

impl BudgetService {
    /// Income must be positive, saving must not be negative.
    pub fn validate(monthly_income: f64, monthly_saving: f64) -> Result<(), CoreError> {
        if !monthly_income.is_finite() || monthly_income <= 0.0 {
            return Err(CoreError::Validation(
                "monthly income must be greater than zero".into(),
            ));
        }
        if !monthly_saving.is_finite() || monthly_saving < 0.0 {
            return Err(CoreError::Validation(
                "monthly saving cannot be negative".into(),
            ));
        }
        Ok(())
    }

    pub fn set(
        wishlist: &mut Wishlist,
        draft: BudgetDraft,
        now: DateTime<Utc>,
    ) -> Result<&Budget, CoreError> {
        Self::validate(draft.monthly_income, draft.monthly_saving)?;
        if !draft.fixed_expenses.is_finite() || draft.fixed_expenses < 0.0 {
            return Err(CoreError::Validation(
                "fixed expenses cannot be negative".into(),
            ));
        }
        let currency = draft
            .currency
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .or_else(|| wishlist.budget.as_ref().map(|b| b.currency.clone()))
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());
        let budget = Budget::new(
            draft.monthly_income,
            draft.monthly_saving,
            draft.fixed_expenses,
            now,
        )
        .with_currency(currency);
        if budget.monthly_saving > budget.available_for_saving() {
            tracing::warn!(
                saving = budget.monthly_saving,
                available = budget.available_for_saving(),
                "monthly saving exceeds income left after fixed expenses"
            );
        }
        wishlist.touch();
        Ok(wishlist.budget.insert(budget))
    }

    /// Rate from the stored budget, zero when none is configured.
    pub fn savings_rate(wishlist: &Wishlist) -> SavingsRate {
        wishlist
            .budget
            .as_ref()
            .map(Budget::savings_rate)
            .unwrap_or(SavingsRate::ZERO)
    }

    pub fn suggested_saving(monthly_income: f64, fixed_expenses: f64) -> f64 {
        (monthly_income - fixed_expenses) * SUGGESTED_SAVING_SHARE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(income: f64, saving: f64) -> BudgetDraft {
        BudgetDraft {
            monthly_income: income,
            monthly_saving: saving,
            fixed_expenses: 0.0,
            currency: None,
        }
    }

    #[test]
    fn validate_requires_positive_income() {
        assert!(BudgetService::validate(0.0, 10.0).is_err());
        assert!(BudgetService::validate(5000.0, -1.0).is_err());
        assert!(BudgetService::validate(5000.0, 0.0).is_ok());
    }

    #[test]
    fn missing_budget_means_zero_rate() {
        let wishlist = Wishlist::new("Empty");
        assert!(BudgetService::savings_rate(&wishlist).is_zero());
    }

    #[test]
    fn set_replaces_singleton_and_keeps_currency() {
        let mut wishlist = Wishlist::new("Budget");
        let now = Utc::now();
        let mut first = draft(6000.0, 500.0);
        first.currency = Some("EUR".into());
        BudgetService::set(&mut wishlist, first, now).unwrap();
        BudgetService::set(&mut wishlist, draft(7000.0, 800.0), now).unwrap();

        let budget = wishlist.budget.as_ref().unwrap();
        assert_eq!(budget.monthly_income, 7000.0);
        assert_eq!(budget.currency, "EUR");
        assert_eq!(BudgetService::savings_rate(&wishlist).per_month(), 800.0);
    }

    #[test]
    fn set_rejects_invalid_input_without_touching_state() {
        let mut wishlist = Wishlist::new("Budget");
        let err = BudgetService::set(&mut wishlist, draft(-1.0, 100.0), Utc::now()).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(wishlist.budget.is_none());
    }

    #[test]
    fn suggestion_is_thirty_percent_of_disposable_income() {
        assert_eq!(BudgetService::suggested_saving(10000.0, 4000.0), 1800.0);
    }
}

//! Composition root: owns the storage backend, clock, formatters and the
//! currently open wishlist. Every mutating operation saves the wishlist
//! before returning.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use chrono::{DateTime, Utc};
use uuid::Uuid;
use wishlist_config::{Config, ConfigManager};
use wishlist_core::{
    storage::{wishlist_warnings, WishlistBackupInfo, WishlistStorage},
    BudgetDraft, BudgetService, Clock, CoreError, CurrencyFormatter, MonthYearFormatter,
    OfferService, PlainCurrency, ProductDraft, ProductService, ProgressProjection, ShortMonthYear,
    SortOption, SummaryService,
};
use wishlist_domain::{Budget, Offer, Product, Wishlist};
use wishlist_storage_json::{JsonWishlistStorage, StoragePaths};

use crate::{clock::SystemClock, AppError};

/// Wishlist opened when the config does not name one.
pub const DEFAULT_WISHLIST: &str = "default";

pub struct WishlistApp {
    storage: Box<dyn WishlistStorage>,
    clock: Arc<dyn Clock>,
    labels: Box<dyn MonthYearFormatter>,
    amounts: Box<dyn CurrencyFormatter>,
    config_manager: ConfigManager,
    config: Config,
    data_dir: PathBuf,
    name: String,
    wishlist: Wishlist,
}

impl WishlistApp {
    /// Wires the JSON backend under `WISHLIST_HOME` (or the configured data
    /// root) with the system clock.
    pub fn from_env() -> Result<Self, AppError> {
        Self::with_config_manager(ConfigManager::from_env()?, Arc::new(SystemClock))
    }

    /// Lays out config, wishlists and backups under `base`.
    pub fn with_base_dir(base: &Path, clock: Arc<dyn Clock>) -> Result<Self, AppError> {
        Self::with_config_manager(ConfigManager::with_base_dir(base.to_path_buf())?, clock)
    }

    fn with_config_manager(
        config_manager: ConfigManager,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, AppError> {
        let config = config_manager.load()?;
        let data_dir = effective_data_dir(&config, &config_manager);
        let storage = JsonWishlistStorage::new(StoragePaths::under(&data_dir))?;
        Self::new(Box::new(storage), clock, config_manager)
    }

    /// Opens the last used wishlist, or [`DEFAULT_WISHLIST`].
    pub fn new(
        storage: Box<dyn WishlistStorage>,
        clock: Arc<dyn Clock>,
        config_manager: ConfigManager,
    ) -> Result<Self, AppError> {
        let config = config_manager.load()?;
        let name = config
            .last_opened_wishlist
            .clone()
            .unwrap_or_else(|| DEFAULT_WISHLIST.to_string());
        let data_dir = effective_data_dir(&config, &config_manager);
        let mut app = Self {
            storage,
            clock,
            labels: Box::new(ShortMonthYear),
            amounts: Box::new(PlainCurrency),
            config_manager,
            config,
            data_dir,
            wishlist: Wishlist::new(name.clone()),
            name: String::new(),
        };
        app.open(&name)?;
        Ok(app)
    }

    pub fn with_formatters(
        mut self,
        labels: Box<dyn MonthYearFormatter>,
        amounts: Box<dyn CurrencyFormatter>,
    ) -> Self {
        self.labels = labels;
        self.amounts = amounts;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn wishlist(&self) -> &Wishlist {
        &self.wishlist
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_manager(&self) -> &ConfigManager {
        &self.config_manager
    }

    /// Directory the wishlists were loaded from in this session.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Switches to `name`, starting an empty wishlist when none is stored.
    /// Returns anomalies found in the loaded data.
    pub fn open(&mut self, name: &str) -> Result<Vec<String>, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CoreError::Validation("wishlist name is required".into()).into());
        }
        let wishlist = match self.storage.load_wishlist(name) {
            Ok(wishlist) => wishlist,
            Err(CoreError::WishlistNotFound(_)) => {
                tracing::info!(wishlist = name, "starting a new wishlist");
                Wishlist::new(name)
            }
            Err(err) => return Err(err.into()),
        };
        let warnings = wishlist_warnings(&wishlist);
        for warning in &warnings {
            tracing::warn!(wishlist = name, %warning, "wishlist anomaly");
        }
        self.wishlist = wishlist;
        self.name = name.to_string();
        if self.config.last_opened_wishlist.as_deref() != Some(name) {
            self.config.last_opened_wishlist = Some(name.to_string());
            self.config_manager.save(&self.config)?;
        }
        Ok(warnings)
    }

    /// Names of stored wishlists.
    pub fn wishlists(&self) -> Result<Vec<String>, AppError> {
        Ok(self.storage.list_wishlists()?)
    }

    pub fn save(&self) -> Result<(), AppError> {
        self.storage.save_wishlist(&self.name, &self.wishlist)?;
        Ok(())
    }

    pub fn export_to(&self, path: &Path) -> Result<(), AppError> {
        self.storage.save_wishlist_to_path(&self.wishlist, path)?;
        Ok(())
    }

    /// Fills category and priority from the configured defaults when unset.
    pub fn draft(&self, name: impl Into<String>, price: f64) -> ProductDraft {
        let mut draft = ProductDraft::new(name, price);
        draft.priority = self.config.default_priority;
        draft.category = Some(self.config.default_category.clone());
        draft
    }

    pub fn add_product(&mut self, draft: ProductDraft) -> Result<Uuid, AppError> {
        let id = ProductService::add(&mut self.wishlist, draft, self.clock.now())?;
        self.save()?;
        Ok(id)
    }

    pub fn product(&self, reference: &str) -> Result<&Product, AppError> {
        let id = ProductService::resolve_id(&self.wishlist, reference)?;
        Ok(ProductService::find(&self.wishlist, id)?)
    }

    /// Marks the referenced product purchased and returns its name.
    pub fn mark_purchased(&mut self, reference: &str) -> Result<String, AppError> {
        let id = ProductService::resolve_id(&self.wishlist, reference)?;
        ProductService::mark_purchased(&mut self.wishlist, id, self.clock.now())?;
        self.save()?;
        Ok(ProductService::find(&self.wishlist, id)?.name.clone())
    }

    pub fn remove_product(&mut self, reference: &str) -> Result<Product, AppError> {
        let id = ProductService::resolve_id(&self.wishlist, reference)?;
        let removed = ProductService::remove(&mut self.wishlist, id)?;
        self.save()?;
        Ok(removed)
    }

    pub fn purchased(&self) -> Vec<&Product> {
        ProductService::purchased(&self.wishlist)
    }

    pub fn set_budget(&mut self, draft: BudgetDraft) -> Result<Budget, AppError> {
        let budget = BudgetService::set(&mut self.wishlist, draft, self.clock.now())?.clone();
        self.save()?;
        Ok(budget)
    }

    pub fn budget(&self) -> Option<&Budget> {
        self.wishlist.budget.as_ref()
    }

    /// Unpurchased products projected against the current budget.
    pub fn projections(&self, sort: SortOption) -> Vec<ProgressProjection<'_>> {
        SummaryService::project_wishlist(
            &self.wishlist,
            sort,
            self.clock.now(),
            self.labels.as_ref(),
        )
    }

    /// Uses the budget currency, falling back to the configured one.
    pub fn format_amount(&self, amount: f64) -> String {
        let currency = self
            .wishlist
            .budget
            .as_ref()
            .map(|budget| budget.currency.as_str())
            .unwrap_or(self.config.currency.as_str());
        self.amounts.format_amount(amount, currency)
    }

    /// Deactivates expired offers, saving only when something changed.
    pub fn expire_offers(&mut self) -> Result<usize, AppError> {
        let changed = OfferService::deactivate_expired(&mut self.wishlist, self.clock.now());
        if changed > 0 {
            self.save()?;
        }
        Ok(changed)
    }

    pub fn active_offers(&self) -> Vec<&Offer> {
        OfferService::active(&self.wishlist)
    }

    pub fn seed_offers(&mut self) -> Result<usize, AppError> {
        let added = OfferService::seed_samples_if_empty(&mut self.wishlist, self.clock.now());
        if added > 0 {
            self.save()?;
        }
        Ok(added)
    }

    pub fn prune_offers(&mut self) -> Result<usize, AppError> {
        let removed = OfferService::delete_expired(&mut self.wishlist, self.clock.now());
        if removed > 0 {
            self.save()?;
        }
        Ok(removed)
    }

    pub fn backup(&self, note: Option<&str>) -> Result<WishlistBackupInfo, AppError> {
        Ok(self
            .storage
            .backup_wishlist(&self.name, &self.wishlist, note)?)
    }

    /// Backups of the open wishlist, newest first.
    pub fn backups(&self) -> Result<Vec<WishlistBackupInfo>, AppError> {
        Ok(self.storage.list_backups(&self.name)?)
    }

    /// Restores by 1-based position in [`Self::backups`], by file name, or by
    /// a prefix that names exactly one backup.
    pub fn restore(&mut self, reference: &str) -> Result<WishlistBackupInfo, AppError> {
        let reference = reference.trim();
        if reference.is_empty() {
            return Err(CoreError::Validation("backup reference is required".into()).into());
        }
        let backups = self.backups()?;
        let selected = match reference.parse::<usize>() {
            Ok(index) if index >= 1 => backups.into_iter().nth(index - 1),
            _ => select_backup(backups, reference)?,
        }
        .ok_or_else(|| AppError::BackupNotFound(reference.to_string()))?;
        self.wishlist = self.storage.restore_backup(&selected)?;
        Ok(selected)
    }

    /// `data_root` reports the directory in use, which may differ from the
    /// stored value until the next start.
    pub fn config_value(&self, key: &str) -> Result<String, AppError> {
        if key.trim() == "data_root" {
            return Ok(self.data_dir.display().to_string());
        }
        Ok(self.config.get(key)?)
    }

    pub fn set_config_value(&mut self, key: &str, value: &str) -> Result<(), AppError> {
        self.config.set(key, value)?;
        self.config_manager.save(&self.config)?;
        tracing::info!(key, "configuration updated");
        Ok(())
    }

    pub fn backup_config(&self, note: Option<&str>) -> Result<String, AppError> {
        Ok(self.config_manager.backup(&self.config, note)?)
    }

    pub fn config_backups(&self) -> Result<Vec<String>, AppError> {
        Ok(self.config_manager.list_backups()?)
    }

    pub fn restore_config(&mut self, backup_name: &str) -> Result<(), AppError> {
        self.config = self.config_manager.restore(backup_name)?;
        self.config_manager.save(&self.config)?;
        Ok(())
    }
}

fn effective_data_dir(config: &Config, config_manager: &ConfigManager) -> PathBuf {
    config
        .data_root
        .clone()
        .unwrap_or_else(|| config_manager.base_dir().to_path_buf())
}

/// Exact file name first, then a unique prefix.
fn select_backup(
    backups: Vec<WishlistBackupInfo>,
    reference: &str,
) -> Result<Option<WishlistBackupInfo>, AppError> {
    if let Some(exact) = backups.iter().find(|info| info.id == reference) {
        return Ok(Some(exact.clone()));
    }
    let mut matches = backups
        .into_iter()
        .filter(|info| info.id.starts_with(reference));
    let first = matches.next();
    if matches.next().is_some() {
        return Err(AppError::AmbiguousBackup(reference.to_string()));
    }
    Ok(first)
}

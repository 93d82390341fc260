use thiserror::Error;
use wishlist_config::ConfigError;
use wishlist_core::CoreError;

/// Failures surfaced by [`crate::WishlistApp`].
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("No backup matches `{0}`")]
    BackupNotFound(String),
    #[error("`{0}` matches more than one backup")]
    AmbiguousBackup(String),
}

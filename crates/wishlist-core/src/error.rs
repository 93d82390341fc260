use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Wishlist not found: {0}")]
    WishlistNotFound(String),
    #[error("Product not found: {0}")]
    ProductNotFound(Uuid),
    #[error("Offer not found: {0}")]
    OfferNotFound(Uuid),
    #[error("No product matches `{0}`")]
    UnknownReference(String),
    #[error("`{0}` matches more than one product")]
    AmbiguousReference(String),
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

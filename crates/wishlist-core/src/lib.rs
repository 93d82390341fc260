//! wishlist-core
//!
//! Business logic and services for the wishlist.
//! Depends on wishlist-domain. No CLI, no terminal I/O, no direct storage interactions.

pub mod budget_service;
pub mod error;
pub mod format;
pub mod offer_service;
pub mod product_service;
pub mod progress_service;
pub mod storage;
pub mod summary_service;
pub mod time;

pub use budget_service::*;
pub use error::CoreError;
pub use format::*;
pub use offer_service::*;
pub use product_service::*;
pub use progress_service::*;
pub use summary_service::*;
pub use time::*;

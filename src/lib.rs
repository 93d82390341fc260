#![doc(test(attr(deny(warnings))))]

//! Wishlist ties the domain, projection services, JSON storage and
//! configuration together behind [`app::WishlistApp`] and the `wishlist_cli`
//! shell.

pub mod app;
pub mod cli;
pub mod clock;
pub mod errors;
pub mod utils;

pub use app::WishlistApp;
pub use errors::AppError;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("wishlist tracing initialized");
    });
}

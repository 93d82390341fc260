//! wishlist-domain
//!
//! Pure domain models (Wishlist, Product, Budget, Offer, etc.).
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod budget;
pub mod common;
pub mod offer;
pub mod product;
pub mod wishlist;

pub use budget::*;
pub use common::*;
pub use offer::*;
pub use product::*;
pub use wishlist::*;

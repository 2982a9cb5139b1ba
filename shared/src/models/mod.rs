//! Data models
//!
//! Listing records as the admin API serves them. Every reorderable
//! collection implements [`Ranked`] and [`Collection`] so the list engine
//! is written once for all of them.

pub mod car;
pub mod property;
pub mod ranked;

// Re-exports
pub use car::*;
pub use property::*;
pub use ranked::*;

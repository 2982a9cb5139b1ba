//! Shared types for the Clutch admin back office
//!
//! Wire models for the listing collections (cars, properties), the rank
//! capability the reordering engine is written against, and the request and
//! response envelopes used by both the client and the mock backend.

pub mod error;
pub mod models;
pub mod request;
pub mod response;

// Re-exports
pub use error::{ValidationError, ValidationResult};
pub use models::{
    Car, CarCreate, CarUpdate, Collection, Property, PropertyCreate, PropertyUpdate, Ranked,
};
pub use request::ReorderRequest;
pub use response::ApiResponse;
pub use serde::{Deserialize, Serialize};

//! Clutch Client - admin list management for the marketplace API
//!
//! Loads listing collections (cars, properties) into an ordered view, lets
//! the admin move rows up and down with immediate feedback, persists the new
//! ranks and reconciles against the backend afterwards.
//!
//! ## Example
//!
//! ```ignore
//! use clutch_client::{ClientConfig, Direction, HttpClient, ListManager};
//! use shared::Car;
//!
//! let config = ClientConfig::from_env();
//! let http = HttpClient::new(&config)?;
//! let cars: ListManager<Car, _> = ListManager::new(http, &config);
//!
//! cars.load().await?;
//! cars.move_item(3, Direction::TowardStart).await?;
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod logger;
pub mod manager;
pub mod notice;
pub mod phase;
pub mod plan;
pub mod store;
pub mod view;

pub use config::{ClientConfig, RankStrategy};
pub use error::{ClientError, ClientResult, ListError, ListResult, UnknownRankStrategy};
pub use http::HttpClient;
pub use manager::{ListManager, MoveOutcome};
pub use notice::{Notice, NoticeBoard, NoticeKind};
pub use phase::{ReorderEvent, ReorderPhase};
pub use plan::{Direction, MovePlan, RankAssignment};
pub use store::ListStore;
pub use view::OrderedView;

// Re-export shared types for convenience
pub use shared::{
    ApiResponse, Car, CarCreate, CarUpdate, Collection, Property, PropertyCreate, PropertyUpdate,
    Ranked,
};

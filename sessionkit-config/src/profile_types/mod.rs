//! Profile types and the arena that owns them.
//!
//! ## Sub-modules
//!
//! - [`profile`]: Core `Profile` struct holding locally-set values
//! - [`store`]: `ProfileStore` arena with inherited-value resolution
//! - [`group`]: group aggregation on top of the store

pub mod group;
pub mod profile;
pub mod store;

pub use profile::{Profile, ProfileId, ProfileKind};
pub use store::ProfileStore;

//! Business rules of the V-aiR travel app: the Hub activity catalog
//! (filter, sort, capacity-checked reservations), the flight price
//! estimate, the in-flight VR price and the smart-booking destination pick.

pub mod activity;
pub mod catalog;
pub mod config;
pub mod demo_data;
pub mod error;
pub mod logging;
pub mod pricing;
pub mod suggest;
pub mod utils;
pub mod vr;

pub use activity::{Activity, ActivityKind};
pub use catalog::{list_visible, reserve, ActivityCatalog, Availability, FilterState, SortKey};
pub use error::{CatalogError, Result, VairError, ValidationError};

//! Providers domain - therapist directory records and the filter/sort core

pub mod activities;
pub mod data;
pub mod models;

// Re-export commonly used types
pub use activities::search::{apply, filter_providers, filter_locations, sort_providers};
pub use models::{Address, Provider, SearchCriteria, SortKey};

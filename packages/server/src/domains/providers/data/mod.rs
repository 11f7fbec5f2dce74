pub mod seed;

pub use seed::{seed_locations, seed_providers};

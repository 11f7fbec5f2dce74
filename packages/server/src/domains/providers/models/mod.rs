pub mod criteria;
pub mod provider;

pub use criteria::*;
pub use provider::*;

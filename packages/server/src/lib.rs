// MindBridge - API Core
//
// Backend for the MindBridge mental-health site: therapist directory search,
// blog store with an admin panel, newsletter signups, and the SPA shell.
// Domains live under domains/, infrastructure traits and adapters under kernel/.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;

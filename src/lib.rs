//! # Token Expiry Exporter Library
//!
//! Polls a personal access token listing API and republishes, per token,
//! the days left until expiration as Prometheus gauges.
//!
//! Modules:
//! - `config` — CLI/environment surface and typed settings
//! - `sources` — paginated token listing client
//! - `expiration` — days-until-expiration and redaction rule
//! - `sinks` — gauge publication
//! - `poller` — fetch/evaluate/publish cycle and its sleep loop
//! - `observability`, `server` — registry and the metrics HTTP endpoint

pub mod config;
pub mod sources;
pub mod expiration;
pub mod poller;
pub mod observability;
pub mod server;
pub mod sinks;
pub mod helpers;
pub mod utils;
#[cfg(test)]
mod tests;


pub use crate::config::settings::ExporterSettings;
pub use crate::poller::poll_loop::{CycleReport, PollLoop};
pub use crate::sources::client::{FetchTokens, TokenClient};

//! # Quantum Trade Matrix
//! Synthetic market/portfolio telemetry behind the Quantum Trade Matrix
//! dashboard.
//!
//! A [`store::SnapshotStore`] holds the current [`market::MarketSnapshot`];
//! a [`refresh::RefreshSession`] replaces it every tick with a randomly
//! perturbed copy. The module panel ([`modules::ModuleConfig`]) is owned
//! separately and only changes through explicit toggle/priority edits.
//! Nothing here trades: every strategy, module and signal is an inert label
//! over mock numbers.

pub use crate::utils::error::{Error, Result};

pub mod config;
#[cfg(feature = "dashboard")]
pub mod dashboard;
pub mod market;
pub mod metrics;
pub mod modules;
pub mod refresh;
pub mod risk_controls;
pub mod store;
pub mod system;
pub mod utils;
pub mod views;

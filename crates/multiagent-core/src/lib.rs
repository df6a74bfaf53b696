//! Core types and rules for the multiagent grid simulation.

pub mod types;
pub mod config;
pub mod error;
pub mod stats;
pub mod strategy;

pub use error::{Error, Result};
pub use types::*;
pub use config::*;
pub use stats::*;
pub use strategy::Strategy;

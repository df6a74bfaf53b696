//! World simulation engine.
//!
//! This module implements the bounded grid where agents move, collect
//! resources, and interact with the agents they share a cell with.

pub mod agent;
pub mod field;
pub mod simulation;

pub use agent::Agent;
pub use field::ResourceField;
pub use simulation::Simulation;

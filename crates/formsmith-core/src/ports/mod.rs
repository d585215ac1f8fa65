//! Ports layer
//!
//! Hexagonal architecture: interfaces the infrastructure must implement.

pub mod gateway;

//! Gateway implementations

pub mod memory;
pub mod http;

//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - reqwest blocking client for the FastHR REST API
//! - JSON file on disk for the KeyValueStore port
//! - In-memory map for the KeyValueStore port (tests, one-shot sessions)

pub mod file_store;
pub mod http;
pub mod memory_store;

#[cfg(test)]
pub mod hr_mock;

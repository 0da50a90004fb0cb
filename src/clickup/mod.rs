//! ClickUp REST API (v2) integration.
//!
//! - **client**: thin reqwest wrapper over the ClickUp API
//! - **types**: serde models for the payload slices the adapter touches
//! - **hierarchy**: workspace tree assembly and rendering

pub mod client;
pub mod error;
pub mod hierarchy;
pub mod types;

#[cfg(test)]
mod client_test;

pub use client::ApiClient;

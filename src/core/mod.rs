//! Core components of the `iex-rs` client.
//!
//! This module contains the foundational building blocks of the library, including:
//! - The main [`IexClient`] and its builder.
//! - The primary [`IexError`] type.
//! - The batch query executor and the batching utility.
//! - Shared data models like [`Cell`] and [`Row`].

/// Splitting symbol lists into request-sized batches.
pub mod batch;
/// The main client (`IexClient`), builder, and configuration.
pub mod client;
/// The primary error type (`IexError`) for the crate.
pub mod error;
/// Shared data models used across the fetchers and tables.
pub mod models;
/// Batch endpoint query parameters and response access.
pub mod query;

#[cfg(feature = "dataframe")]
pub mod dataframe;

#[cfg(feature = "test-mode")]
pub(crate) mod fixtures;

pub(crate) mod net;

// convenient re-exports so most code can just `use crate::core::IexClient`
pub use batch::chunked;
pub use client::{IexClient, IexClientBuilder};
pub use error::IexError;
pub use models::{Cell, ChartRange, InstrumentType, MissingReason, Period, Row};
pub use query::{BatchQuery, BatchResponse};

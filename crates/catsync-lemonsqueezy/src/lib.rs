//! Typed client for the Lemon Squeezy JSON:API.
//!
//! Covers exactly the three operations catalog provisioning needs —
//! create product, list a product's variants, update a variant — with
//! bearer auth, request timeouts, and retry-with-backoff on transient
//! failures.

mod client;
mod error;
mod retry;
pub mod types;

pub use client::LemonSqueezyClient;
pub use error::LemonSqueezyError;

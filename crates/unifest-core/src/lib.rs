//! Core types and trait definitions for the Unifest client.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! store, gateway, repository and screen crates all build on it.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod booth;
pub mod error;
pub mod event;
pub mod festival;
pub mod live;
pub mod preference;
pub mod store;

pub use error::{Error, ErrorKind, Result};

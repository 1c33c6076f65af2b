//! Core types and trait definitions for the Lost & Found board.
//!
//! This crate is deliberately free of HTTP and storage dependencies. It owns
//! the post model, draft validation, the filter engine, and the [`PostStore`]
//! abstraction that backends implement.
//!
//! [`PostStore`]: store::PostStore

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod clock;
pub mod error;
pub mod post;
pub mod query;
pub mod store;
pub mod user;
pub mod validation;

pub use error::{Error, Result};

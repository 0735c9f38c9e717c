#![deny(warnings)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

//! # Corral Core
//!
//! `corral_core` provides the contracts for the Corral resource pool:
//! the error taxonomy and the [`ResourcePool`] trait. Implementations
//! live in sibling crates (see `corral_pool` for the bounded,
//! thread-safe implementation).
//!
//! ## Crate Structure
//!
//! - **error**: the `PoolError` taxonomy and `Result` alias
//! - **traits**: the `ResourcePool` contract

pub mod error;
pub mod traits;

// Re-export key types and traits for convenience
pub use error::{PoolError, Result};
pub use traits::ResourcePool;

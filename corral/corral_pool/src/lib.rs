#![deny(warnings)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

//! # Corral Pool
//!
//! A bounded, thread-safe pool of exclusively-usable resources
//! (connections, buffers, workers) shared among many concurrent
//! callers. The pool guarantees that a resource handed to one caller is
//! never handed to another until released, gates every operation on its
//! lifecycle, and supports both graceful shutdown (wait for in-flight
//! resources to return) and forced shutdown (abandon them immediately).
//!
//! Callers supply ready-made resources; the pool performs no
//! construction, validation, or health checking of its own.
//!
//! ## Example
//!
//! ```
//! use corral_pool::{BoundedPool, PoolConfig, ResourcePool};
//!
//! let pool = BoundedPool::with_config(PoolConfig::with_capacity(4).with_name("conns"));
//! pool.add("conn-1".to_string());
//! pool.open()?;
//!
//! let conn = pool.acquire()?.expect("pool is open");
//! // ... use the connection exclusively ...
//! pool.release(conn);
//!
//! pool.close()?;
//! # Ok::<(), corral_pool::PoolError>(())
//! ```

pub mod bounded;
pub mod config;

mod lifecycle;
mod queue;
mod registry;
mod slot;
mod sync;

pub use bounded::BoundedPool;
pub use config::PoolConfig;

// Re-export the contract and error types so depending on `corral_pool`
// alone is enough for most callers.
pub use corral_core::{PoolError, ResourcePool, Result};

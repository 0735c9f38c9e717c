//! Core trait definitions for the Corral system.
//!
//! Each trait lives in its own file. Implementations are provided by the
//! sibling crates; this crate only declares the contracts.

pub mod pool;

pub use pool::ResourcePool;

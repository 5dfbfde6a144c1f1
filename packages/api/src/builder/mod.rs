//! Filter builder API modules
//!
//! Provides the fluent API for assembling filter specifications and
//! compiling them into a [`Filter`](datapath_engine::Filter).

pub mod core;
pub mod logical;
pub mod operators;
pub mod projection;

pub use self::core::FilterBuilder;

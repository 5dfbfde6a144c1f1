//! Path-addressable data container
//!
//! [`PathedContainer`] stores a normalized [`Node`] tree and exposes
//! get/set/unset/exists with delimited path keys, a strict or silent error
//! policy, depth-bounded key listing, live sub-views and snapshots.

mod core;
mod keys;
mod mutation;
mod node;
mod snapshot;

pub use self::core::PathedContainer;
pub use node::{Children, Node};

#[cfg(test)]
mod view_tests;

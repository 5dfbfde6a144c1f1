//! # Datapath engine
//!
//! Path-addressable data containers and a MongoDB-style filter compiler.
//!
//! ## Features
//!
//! - **Delimited path keys** (`"db.host"`, `["db", "host"]`, several
//!   interchangeable delimiters)
//! - **Strict or silent access** selected per container at runtime
//! - **Live views** aliasing a sub-tree of another container
//! - **Filter language** with `$or $and $not $eq $gt $lt $gte $lte $between
//!   $in $prefix $suffix $factor $regex`, compiled once into a predicate
//! - **Projection** of selected records through `$project`
//!
//! ## Usage
//!
//! ```
//! use datapath_engine::prelude::*;
//! use serde_json::json;
//!
//! let mut config = PathedContainer::new(json!({"db": {"host": "localhost"}}));
//! config.set_forced("db.pool.size", 8).unwrap();
//! assert_eq!(config.get_value("db.pool.size"), Some(json!(8)));
//!
//! let filter = Filter::new(&json!({"name": {"$prefix": "al"}})).unwrap();
//! let people = vec![json!({"name": "alice"}), json!({"name": "bob"})];
//! assert_eq!(filter.filter(&people).unwrap(), vec![json!({"name": "alice"})]);
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all)]

pub mod config;
pub mod container;
pub mod error;
pub mod filter;
pub mod path;
pub mod prelude;

pub use config::{AccessPolicy, ContainerConfig};
pub use container::{Node, PathedContainer};
pub use error::{
    AccessError, AccessResult, FilterError, FilterResult, FilterSyntaxError, MissingFieldError,
    PathError, TypeError,
};
pub use filter::{Filter, FilterOptions, Projection};
pub use path::{PathSpec, tokenize};

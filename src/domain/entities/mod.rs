//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without business logic. Creation inputs
//! use separate `New*` structs so persisted fields (ids, timestamps, counters)
//! are always database-assigned.

pub mod account;
pub mod link;

pub use account::{Account, NewAccount};
pub use link::{Link, NewLink};

#![deny(missing_docs)]

//! # atelier-core — Foundational Types for the Atelier Production Backend
//!
//! Defines the domain vocabulary shared by every other crate in the
//! workspace: production-order and work statuses, order priorities, and the
//! validation errors raised when wire values fall outside those vocabularies.
//! It has no internal crate dependencies — only `serde` and `thiserror` from
//! the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Exhaustive enums for every status vocabulary.** A status is either one
//!    of the enumerated values or it is rejected at the boundary with a
//!    [`ValidationError`]. There is no pass-through branch for unrecognized
//!    strings.
//! 2. **One canonical string form.** `as_str()` and `parse()` round-trip the
//!    snake_case form used both on the wire and in the database.

pub mod error;
pub mod status;

pub use error::ValidationError;
pub use status::{OrderStatus, Priority, WorkStatus};

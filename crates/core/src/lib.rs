//! Domain types shared by the help-desk database and API crates.
//!
//! This crate has no I/O: it defines the ticket enums, the error taxonomy
//! and the field-level validation primitives.

pub mod error;
pub mod ticket;
pub mod types;
pub mod validation;

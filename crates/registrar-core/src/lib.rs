//! Core types, rules, and trait definitions for the course registrar.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! Student Directory, Course Catalog, and Enrollment Ledger are expressed as
//! pure rule functions over the record traits in [`records`]; storage
//! backends supply the records and the transaction around each call.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod catalog;
pub mod course;
pub mod directory;
pub mod enrollment;
pub mod error;
pub mod ledger;
pub mod records;
pub mod store;
pub mod student;

mod patch;

pub use error::{DomainError, Error, ErrorClass, Result};

#[cfg(test)]
mod memory;

//! # wopihub-core
//!
//! Core crate for WopiHub. Contains traits, configuration schemas, typed
//! identifiers, the lock model, and the unified error system.
//!
//! This crate has **no** internal dependencies on other WopiHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;

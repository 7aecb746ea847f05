//! # wopihub-storage
//!
//! Storage adapter implementations. The [`WopiStorage`] trait is defined
//! in `wopihub-core`; this crate provides the local-filesystem backend.
//!
//! [`WopiStorage`]: wopihub_core::traits::WopiStorage

pub mod providers;

pub use providers::LocalWopiStorage;

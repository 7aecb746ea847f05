//! Storage provider implementations.

pub mod local;

pub use local::LocalWopiStorage;

//! Request/response middleware.

pub mod headers;
pub mod proof;

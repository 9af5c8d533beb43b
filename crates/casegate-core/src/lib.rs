#![forbid(unsafe_code)]

pub mod errors;
pub mod schema;
pub mod spec;
pub mod traits;
pub mod types;
pub mod usecase;

#![forbid(unsafe_code)]

pub mod assess;
pub mod enforcement;
pub mod gates;
pub mod metrics;
pub mod phase;
pub mod scoring;
pub mod sizing;

pub mod scoring;
pub mod sizing;
pub mod tom;

pub mod activation;
pub mod regression;

pub mod error;
pub mod logger;
pub mod models;
#[cfg(test)]
pub mod testutil;
pub mod workflow;

pub mod error;
pub mod run_provider;
pub mod source;

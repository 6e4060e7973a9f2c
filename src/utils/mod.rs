pub mod config;
pub mod errors;
pub mod storage;
pub mod validation;

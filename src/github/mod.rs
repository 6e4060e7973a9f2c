mod client;
mod types;

#[cfg(test)]
pub mod testing;

pub use client::{GitHubApi, GitHubClient};
pub use types::*;

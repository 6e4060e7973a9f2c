pub mod controller;

pub use controller::{PaginationController, RepositoryListing};

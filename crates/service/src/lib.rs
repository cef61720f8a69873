//! Service layer for the cinema record manager.
//! - `storage` persists entity lists as JSON documents.
//! - `file` layers per-entity queries over the stores.
//! - The `*_service` modules hold the business rules the console calls.

pub mod errors;
pub mod domain;
pub mod storage;
pub mod repository;
pub mod file;
pub mod customer_service;
pub mod movie_service;
pub mod theater_service;
#[cfg(test)]
pub mod test_support;

pub use customer_service::CustomerService;
pub use domain::{CustomerUpdate, MovieUpdate, TheaterUpdate};
pub use errors::ServiceError;
pub use movie_service::MovieService;
pub use storage::WriteMode;
pub use theater_service::TheaterService;

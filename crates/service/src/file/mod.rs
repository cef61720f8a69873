//! File-backed repositories, one per entity type.

pub mod customers;
pub mod movies;
pub mod theaters;

pub use customers::CustomerRepository;
pub use movies::MovieRepository;
pub use theaters::TheaterRepository;

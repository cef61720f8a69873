//! Entity records for the cinema domain.
//! - Every record embeds [`entity::EntityMeta`] for identity and timestamps.
//! - Field rules live in each record's [`entity::Entity::validate`].

pub mod errors;
pub mod entity;
pub mod customer;
pub mod movie;
pub mod theater;

pub use customer::Customer;
pub use entity::{Entity, EntityMeta};
pub use errors::ModelError;
pub use movie::Movie;
pub use theater::Theater;

#[cfg(test)]
mod tests;

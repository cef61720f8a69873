//! Cross-cutting helpers shared by the binary and the console crate.

pub mod env;
pub mod text;
pub mod utils;

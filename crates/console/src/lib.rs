//! Text-menu front-end for the cinema record manager.
//!
//! Generic over the input reader and output writer so a session can be
//! scripted in tests.

pub mod app;
pub mod error;
pub mod prompt;
pub mod tables;

pub use app::CinemaConsole;
pub use error::ConsoleError;

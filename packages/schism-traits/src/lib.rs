//! Base types and traits shared by the Schism crates
//!
//! The types here are deliberately small and dependency free so that the DOM
//! ([`schism-dom`](https://docs.rs/schism-dom)) and the splitter
//! ([`schism`](https://docs.rs/schism)) can agree on them without depending on each other.

pub mod events;
pub mod geometry;
pub mod shell;

pub use events::{ResizeEvent, ResizeSource};
pub use geometry::UnitRect;
pub use shell::Viewport;

//! The headless render tree used by Schism
//!
//! This crate implements a small DOM ([`BaseDocument`]) which is designed to be embedded in and
//! "driven" by external code. It includes a slab-backed node tree, inline `style` resolution,
//! a taffy-based layout pass, HTML serialization, structural snapshots and resize notification.
//!
//! Parsing markup into a [`BaseDocument`] lives in [schism-html](https://docs.rs/schism-html).

/// The DOM implementation.
///
/// This is the primary entry point for this crate.
mod document;

/// The nodes themsleves, and their data.
pub mod node;

mod config;
mod debug;
mod error;
/// Integration of taffy and the DOM.
pub mod layout;
mod mutator;
pub mod resize;
mod serialize;
pub mod snapshot;
pub mod style;

pub use config::DocumentConfig;
pub use document::BaseDocument;
pub use error::DomError;
pub use markup5ever::{LocalName, Namespace, QualName, local_name, ns};
pub use mutator::DocumentMutator;
pub use node::{Attribute, ElementData, Node, NodeData, NodeLayout, TextNodeData};
pub use resize::{ResizeListenerId, ResizeObserverId};
pub use snapshot::SnapshotNode;
pub use style::ComputedStyle;

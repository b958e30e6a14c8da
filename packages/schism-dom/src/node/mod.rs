#![allow(clippy::module_inception)]

mod attributes;
pub mod element;
mod node;

pub use attributes::{Attribute, Attributes};
pub use element::ElementData;
pub use node::*;

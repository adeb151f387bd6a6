//! Foundational types for the incremental mark-sweep collector.
//!
//! This crate provides the vocabulary shared by the graph store and the
//! collector: node identity, edge sources, tri-color tags and errors.
//!
//! # Overview
//!
//! - [`NodeId`] - Bound satisfied by every usable node identity
//! - [`EdgeSource`] - Source of a directed edge (the root pseudo-node or a real node)
//! - [`Color`] - Tri-color marking tag
//! - [`GraphError`] - Errors reported by graph mutations
//! - [`GcError`] - Errors reported by the collector
//!
//! # Examples
//!
//! ```
//! use core_types::{Color, EdgeSource};
//!
//! let root: EdgeSource<&str> = EdgeSource::Root;
//! assert!(root.is_root());
//! assert_eq!(EdgeSource::Node("A").node(), Some(&"A"));
//! assert_eq!(Color::default(), Color::Black);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod color;
mod error;
mod node;

pub use color::Color;
pub use error::{GcError, GcResult, GraphError, GraphResult};
pub use node::{EdgeSource, NodeId};

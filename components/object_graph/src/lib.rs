//! Object graph store for the mark-sweep collector.
//!
//! This crate provides:
//! - [`Graph`] - the read and reclaim interface the collector consumes
//! - [`MutatorListener`] - the observer notified inline with every mutation
//! - [`DirectedGraph`] - a thread-safe in-memory graph honoring both
//!
//! All mutations pass through [`DirectedGraph`]'s entry points, which invoke
//! the registered listener before the mutation becomes visible to readers.
//!
//! # Examples
//!
//! ```
//! use core_types::EdgeSource;
//! use object_graph::{DirectedGraph, Graph};
//!
//! let graph = DirectedGraph::new();
//! graph.create_node("A").unwrap();
//! graph.create_node("B").unwrap();
//! graph.create_directed_edge(EdgeSource::Root, "A").unwrap();
//! graph.create_directed_edge(EdgeSource::Node("A"), "B").unwrap();
//!
//! assert_eq!(graph.successors(&EdgeSource::Root), vec!["A"]);
//! assert_eq!(graph.successors(&EdgeSource::Node("A")), vec!["B"]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod directed;
pub mod listener;

pub use directed::DirectedGraph;
pub use listener::{Graph, MutatorListener};

//! Graph algorithm implementations.
//!
//! Each engine is a set of free functions over a borrowed [`crate::Graph`]
//! working on node indices. None of them mutates the graph or keeps a
//! reference to it after returning.

pub mod scc;
pub mod shortest_path;
pub mod traversal;

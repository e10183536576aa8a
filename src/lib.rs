//! Graph algorithms for collaboration networks.
//!
//! A [`Graph`] is a directed, weighted adjacency mapping keyed by node ID.
//! Three independent engines run over it:
//!
//! - [`algorithms::traversal`]: BFS and DFS, as visit order or reachability search
//! - [`algorithms::shortest_path`]: Dijkstra with path, distance and hop count
//! - [`algorithms::scc`]: Kosaraju strongly connected components
//!
//! With the `network` feature, [`network`] builds the graph from
//! person/title credit records.

pub mod algorithms;
pub mod error;
pub mod graph;
#[cfg(feature = "network")]
pub mod network;

pub use algorithms::scc::SccResult;
pub use algorithms::shortest_path::{PathOutcome, ShortestPath};
pub use algorithms::traversal::Traversal;
pub use error::{GraphError, Result};
pub use graph::{Adjacency, AdjacencyMap, Graph};

use wasm_bindgen::prelude::*;

/// Runs when the WASM module is instantiated.
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

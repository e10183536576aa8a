//! Error taxonomy for graph construction and algorithm entry points.

use thiserror::Error;
use wasm_bindgen::prelude::*;

/// Errors raised when a graph is built or queried with bad input.
///
/// Unreachable targets and failed searches are *not* errors; they are
/// ordinary results (`PathOutcome::Unreachable`, `Traversal::Found(false)`).
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("unknown node: {0}")]
    UnknownNode(String),

    #[error("edge {from} -> {to} points at a node that is not in the graph")]
    DanglingEdge { from: String, to: String },

    #[error("node index {0} is out of range")]
    IndexOutOfRange(usize),

    #[error("edge {from} -> {to} has invalid weight {weight} (must be finite and >= 0)")]
    InvalidWeight { from: String, to: String, weight: f64 },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GraphError>;

impl From<GraphError> for JsValue {
    fn from(err: GraphError) -> Self {
        JsError::new(&err.to_string()).into()
    }
}

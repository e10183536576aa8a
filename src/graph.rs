//! Core directed graph structure with weighted adjacency lists.

use crate::algorithms::scc::{kosaraju_scc, SccResult};
use crate::algorithms::shortest_path::{dijkstra, PathOutcome};
use crate::algorithms::traversal::{bfs, bfs_search, dfs, dfs_search, Traversal};
use crate::error::{GraphError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use wasm_bindgen::prelude::*;

/// Directed, weighted graph keyed by string node IDs (e.g. "nm0000123").
///
/// Adjacency lists keep insertion order, which is the neighbor order seen by
/// the traversals.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct Graph {
    /// Node ID strings
    nodes: Vec<String>,

    /// Reverse lookup: ID string -> index
    node_index: HashMap<String, usize>,

    /// Forward adjacency: adj[u] = (v, weight) for every edge u -> v
    adj: Vec<Vec<(usize, f64)>>,

    edge_count: usize,
}

/// Outgoing adjacency of one node, as it appears on the JSON boundary.
///
/// `{"b": 2.0}` is weighted; `["b"]` is unweighted and every edge gets
/// weight 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Adjacency {
    Weighted(IndexMap<String, f64>),
    Unweighted(Vec<String>),
}

/// Node ID -> adjacency, in node insertion order.
pub type AdjacencyMap = IndexMap<String, Adjacency>;

#[wasm_bindgen]
impl Graph {
    /// Create an empty graph.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Graph {
        Graph {
            nodes: Vec::new(),
            node_index: HashMap::new(),
            adj: Vec::new(),
            edge_count: 0,
        }
    }

    /// Create a graph with room for `node_capacity` nodes.
    #[wasm_bindgen(js_name = withCapacity)]
    pub fn with_capacity(node_capacity: usize) -> Graph {
        Graph {
            nodes: Vec::with_capacity(node_capacity),
            node_index: HashMap::with_capacity(node_capacity),
            adj: Vec::with_capacity(node_capacity),
            edge_count: 0,
        }
    }

    /// Add a node, returns its index. Idempotent - returns existing index if already present.
    #[wasm_bindgen(js_name = addNode)]
    pub fn add_node(&mut self, id: &str) -> usize {
        if let Some(&idx) = self.node_index.get(id) {
            return idx;
        }
        let idx = self.nodes.len();
        self.nodes.push(id.to_string());
        self.node_index.insert(id.to_string(), idx);
        self.adj.push(Vec::new());
        idx
    }

    /// Add a directed edge from -> to. Adding an existing edge replaces its weight.
    #[wasm_bindgen(js_name = addEdge)]
    pub fn add_edge(&mut self, from: usize, to: usize, weight: f64) -> Result<()> {
        for idx in [from, to] {
            if idx >= self.nodes.len() {
                return Err(GraphError::IndexOutOfRange(idx));
            }
        }
        if !weight.is_finite() || weight < 0.0 {
            return Err(GraphError::InvalidWeight {
                from: self.nodes[from].clone(),
                to: self.nodes[to].clone(),
                weight,
            });
        }

        if let Some(edge) = self.adj[from].iter_mut().find(|(v, _)| *v == to) {
            edge.1 = weight;
            return Ok(());
        }

        self.adj[from].push((to, weight));
        self.edge_count += 1;
        Ok(())
    }

    /// Add a directed edge by node ID, creating either endpoint if needed.
    #[wasm_bindgen(js_name = addEdgeById)]
    pub fn add_edge_by_id(&mut self, from: &str, to: &str, weight: f64) -> Result<()> {
        let from = self.add_node(from);
        let to = self.add_node(to);
        self.add_edge(from, to, weight)
    }

    /// Number of nodes.
    #[wasm_bindgen(js_name = nodeCount)]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    #[wasm_bindgen(js_name = edgeCount)]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Get node ID by index.
    #[wasm_bindgen(js_name = nodeId)]
    pub fn node_id(&self, idx: usize) -> Option<String> {
        self.nodes.get(idx).cloned()
    }

    /// Get node index by ID.
    #[wasm_bindgen(js_name = nodeIdx)]
    pub fn node_idx(&self, id: &str) -> Option<usize> {
        self.node_index.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    /// Weight of the edge from -> to, if present.
    pub fn weight(&self, from: usize, to: usize) -> Option<f64> {
        self.successors(from)
            .iter()
            .find(|(v, _)| *v == to)
            .map(|&(_, w)| w)
    }

    /// Get all node IDs as JSON array.
    #[wasm_bindgen(js_name = nodeIds)]
    pub fn node_ids(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.nodes).unwrap_or(JsValue::NULL)
    }

    /// Build the transpose: every edge u -> v (weight w) becomes v -> u (weight w).
    /// Nodes keep their indices, including nodes with no edges.
    pub fn transpose(&self) -> Graph {
        let mut rev_adj: Vec<Vec<(usize, f64)>> = vec![Vec::new(); self.len()];
        for (from, to, weight) in self.edges() {
            rev_adj[to].push((from, weight));
        }
        Graph {
            nodes: self.nodes.clone(),
            node_index: self.node_index.clone(),
            adj: rev_adj,
            edge_count: self.edge_count,
        }
    }

    /// Export the adjacency mapping as JSON: `{"a": {"b": 1.0}, "b": {}}`.
    #[wasm_bindgen(js_name = toJson)]
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_adjacency())?)
    }

    /// Import an adjacency mapping from JSON (weighted or unweighted form).
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(json: &str) -> Result<Graph> {
        let mapping: AdjacencyMap = serde_json::from_str(json)?;
        Graph::from_adjacency(&mapping)
    }

    /// Breadth-first search. Returns the visit order as an array of IDs, or a
    /// boolean when `target` is given.
    #[wasm_bindgen(js_name = bfs)]
    pub fn bfs_js(&self, start: &str, target: Option<String>) -> Result<JsValue> {
        let result = self.breadth_first(start, target.as_deref())?;
        Ok(serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL))
    }

    /// Depth-first search (pre-order). Same return contract as `bfs`.
    #[wasm_bindgen(js_name = dfs)]
    pub fn dfs_js(&self, start: &str, target: Option<String>) -> Result<JsValue> {
        let result = self.depth_first(start, target.as_deref())?;
        Ok(serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL))
    }

    /// Dijkstra shortest path.
    /// Returns JSON: { path: string[], distance: number, hops: number }, or null if unreachable.
    #[wasm_bindgen(js_name = dijkstra)]
    pub fn dijkstra_js(&self, start: &str, end: &str) -> Result<JsValue> {
        match self.shortest_path(start, end)? {
            PathOutcome::Reachable(path) => {
                Ok(serde_wasm_bindgen::to_value(&path).unwrap_or(JsValue::NULL))
            }
            PathOutcome::Unreachable => Ok(JsValue::NULL),
        }
    }

    /// Strongly connected components using Kosaraju's algorithm.
    /// Returns JSON: { components: string[][], has_cycles: bool, cycle_count: number }
    #[wasm_bindgen(js_name = kosaraju)]
    pub fn kosaraju_js(&self) -> JsValue {
        let result = self.strongly_connected_components();
        serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
    }

    /// Get all node IDs reachable from a source node, in BFS order.
    #[wasm_bindgen(js_name = reachableFrom)]
    pub fn reachable_from_js(&self, source: &str) -> Result<JsValue> {
        let nodes = self.reachable_from(source)?;
        Ok(serde_wasm_bindgen::to_value(&nodes).unwrap_or(JsValue::NULL))
    }
}

// ID-based Rust API (not exposed to WASM)
impl Graph {
    /// Build a graph from an adjacency mapping.
    ///
    /// Every key becomes a node in mapping order. A neighbor that is not
    /// itself a key is rejected rather than skipped.
    pub fn from_adjacency(mapping: &AdjacencyMap) -> Result<Graph> {
        let mut graph = Graph::with_capacity(mapping.len());
        for id in mapping.keys() {
            graph.add_node(id);
        }

        for (from_id, adjacency) in mapping {
            let from = graph.add_node(from_id);
            let edges: Vec<(&str, f64)> = match adjacency {
                Adjacency::Weighted(weights) => {
                    weights.iter().map(|(id, &w)| (id.as_str(), w)).collect()
                }
                Adjacency::Unweighted(ids) => ids.iter().map(|id| (id.as_str(), 1.0)).collect(),
            };
            for (to_id, weight) in edges {
                let to = graph
                    .node_idx(to_id)
                    .ok_or_else(|| GraphError::DanglingEdge {
                        from: from_id.clone(),
                        to: to_id.to_string(),
                    })?;
                graph.add_edge(from, to, weight)?;
            }
        }

        Ok(graph)
    }

    /// Export as a weighted adjacency mapping.
    pub fn to_adjacency(&self) -> AdjacencyMap {
        self.nodes
            .iter()
            .zip(&self.adj)
            .map(|(id, edges)| {
                let weights = edges
                    .iter()
                    .map(|&(to, w)| (self.nodes[to].clone(), w))
                    .collect();
                (id.clone(), Adjacency::Weighted(weights))
            })
            .collect()
    }

    /// Outgoing edges of a node as (target, weight), in insertion order.
    pub fn successors(&self, node: usize) -> &[(usize, f64)] {
        self.adj.get(node).map_or(&[], |v| v.as_slice())
    }

    /// Iterate over all edges as (from, to, weight).
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.adj
            .iter()
            .enumerate()
            .flat_map(|(from, tos)| tos.iter().map(move |&(to, w)| (from, to, w)))
    }

    /// Look up a node index, failing with `UnknownNode`.
    pub fn resolve(&self, id: &str) -> Result<usize> {
        self.node_idx(id)
            .ok_or_else(|| GraphError::UnknownNode(id.to_string()))
    }

    /// BFS from `start`; with a `target`, report whether it was reached.
    ///
    /// A target that is not in the graph is simply never found.
    pub fn breadth_first(&self, start: &str, target: Option<&str>) -> Result<Traversal<String>> {
        let start = self.resolve(start)?;
        Ok(match target.and_then(|t| self.node_idx(t)) {
            Some(target) => Traversal::Found(bfs_search(self, start, target)?),
            None if target.is_some() => Traversal::Found(false),
            None => Traversal::Order(self.ids(&bfs(self, start)?)),
        })
    }

    /// Pre-order DFS from `start`; same contract as [`Graph::breadth_first`].
    pub fn depth_first(&self, start: &str, target: Option<&str>) -> Result<Traversal<String>> {
        let start = self.resolve(start)?;
        Ok(match target.and_then(|t| self.node_idx(t)) {
            Some(target) => Traversal::Found(dfs_search(self, start, target)?),
            None if target.is_some() => Traversal::Found(false),
            None => Traversal::Order(self.ids(&dfs(self, start)?)),
        })
    }

    /// Minimum-weight path from `start` to `end`.
    pub fn shortest_path(&self, start: &str, end: &str) -> Result<PathOutcome<String>> {
        let start = self.resolve(start)?;
        let end = self.resolve(end)?;
        Ok(dijkstra(self, start, end)?.map_nodes(|idx| self.nodes[idx].clone()))
    }

    /// Strongly connected components, as node IDs.
    pub fn strongly_connected_components(&self) -> SccResult<String> {
        kosaraju_scc(self).map_nodes(|idx| self.nodes[idx].clone())
    }

    /// Node IDs reachable from `source` (including itself), in BFS order.
    pub fn reachable_from(&self, source: &str) -> Result<Vec<String>> {
        let source = self.resolve(source)?;
        Ok(self.ids(&bfs(self, source)?))
    }

    fn ids(&self, indices: &[usize]) -> Vec<String> {
        indices.iter().map(|&idx| self.nodes[idx].clone()).collect()
    }

    /// Get node count (internal, non-WASM).
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if graph is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

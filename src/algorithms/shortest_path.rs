//! Single-source shortest paths (Dijkstra).
//!
//! Edge weights are non-negative; [`Graph`] rejects anything else when the
//! edge is added. The priority queue tolerates duplicate entries and skips
//! stale ones on pop instead of doing decrease-key.
//!
//! When several shortest paths tie, the one returned depends on queue order
//! (distance, then node index). Only the distance and hop count of such a
//! path should be relied on.

use crate::algorithms::traversal::check_index;
use crate::error::Result;
use crate::graph::Graph;
use serde::Serialize;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use tracing::{debug, instrument};

/// A minimum-weight path between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShortestPath<N = usize> {
    /// Nodes from start to end, inclusive
    pub path: Vec<N>,
    /// Sum of edge weights along `path`
    pub distance: f64,
    /// Number of edges on `path` (path.len() - 1)
    pub hops: usize,
}

/// Outcome of a shortest-path query.
#[derive(Debug, Clone, PartialEq)]
pub enum PathOutcome<N = usize> {
    Reachable(ShortestPath<N>),
    /// No path exists from start to end.
    Unreachable,
}

impl<N> PathOutcome<N> {
    pub fn is_reachable(&self) -> bool {
        matches!(self, PathOutcome::Reachable(_))
    }

    pub fn distance(&self) -> Option<f64> {
        match self {
            PathOutcome::Reachable(p) => Some(p.distance),
            PathOutcome::Unreachable => None,
        }
    }

    /// Translate node handles, e.g. indices into IDs.
    pub fn map_nodes<M>(self, f: impl FnMut(N) -> M) -> PathOutcome<M> {
        match self {
            PathOutcome::Reachable(p) => PathOutcome::Reachable(ShortestPath {
                path: p.path.into_iter().map(f).collect(),
                distance: p.distance,
                hops: p.hops,
            }),
            PathOutcome::Unreachable => PathOutcome::Unreachable,
        }
    }
}

/// Priority queue entry, ordered by tentative distance then node index.
#[derive(Debug, Clone, Copy)]
struct State {
    distance: f64,
    node: usize,
}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then_with(|| self.node.cmp(&other.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for State {}

/// Final distances and predecessors from `start`.
struct Relaxation {
    dist: Vec<f64>,
    prev: Vec<Option<usize>>,
}

fn relax_from(graph: &Graph, start: usize) -> Relaxation {
    let n = graph.len();
    let mut dist = vec![f64::INFINITY; n];
    let mut prev: Vec<Option<usize>> = vec![None; n];

    // Min-heap via Reverse
    let mut heap: BinaryHeap<Reverse<State>> = BinaryHeap::new();
    dist[start] = 0.0;
    heap.push(Reverse(State {
        distance: 0.0,
        node: start,
    }));

    while let Some(Reverse(State { distance, node })) = heap.pop() {
        // Stale entry: a shorter route to `node` was settled already
        if distance > dist[node] {
            continue;
        }

        for &(next, weight) in graph.successors(node) {
            let candidate = distance + weight;
            if candidate < dist[next] {
                dist[next] = candidate;
                prev[next] = Some(node);
                heap.push(Reverse(State {
                    distance: candidate,
                    node: next,
                }));
            }
        }
    }

    Relaxation { dist, prev }
}

/// Shortest path from `start` to `end`.
///
/// # Returns
/// `PathOutcome::Reachable` with the path, its total weight and hop count,
/// or `PathOutcome::Unreachable` when `end` cannot be reached.
///
/// A path whose finite weights sum past `f64::MAX` has distance infinity
/// and is reported as `Unreachable`.
///
/// # Errors
/// `GraphError::IndexOutOfRange` if `start` or `end` is not a node.
#[instrument(skip(graph))]
pub fn dijkstra(graph: &Graph, start: usize, end: usize) -> Result<PathOutcome> {
    check_index(graph, start)?;
    check_index(graph, end)?;

    let Relaxation { dist, prev } = relax_from(graph, start);
    if dist[end].is_infinite() {
        debug!("end node unreachable");
        return Ok(PathOutcome::Unreachable);
    }

    let mut path = vec![end];
    let mut node = end;
    while node != start {
        match prev[node] {
            Some(p) => {
                path.push(p);
                node = p;
            }
            None => return Ok(PathOutcome::Unreachable),
        }
    }
    path.reverse();

    let hops = path.len() - 1;
    debug!(distance = dist[end], hops, "shortest path found");
    Ok(PathOutcome::Reachable(ShortestPath {
        path,
        distance: dist[end],
        hops,
    }))
}

/// Distance from `start` to every node, `None` where unreachable.
///
/// # Errors
/// `GraphError::IndexOutOfRange` if `start` is not a node.
#[instrument(skip(graph))]
pub fn shortest_distances(graph: &Graph, start: usize) -> Result<Vec<Option<f64>>> {
    check_index(graph, start)?;
    Ok(relax_from(graph, start)
        .dist
        .into_iter()
        .map(|d| d.is_finite().then_some(d))
        .collect())
}

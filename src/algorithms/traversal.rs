//! Breadth-first and depth-first traversal.
//!
//! Both walks only touch nodes reachable from the start node. Without a
//! target they return the visit order; with a target they stop as soon as
//! the target is visited and report whether it was reached.
//!
//! DFS uses an explicit stack of (node, next-neighbor cursor) frames, so deep
//! graphs cannot overflow the call stack, while visiting nodes in the same
//! pre-order a recursive walk would.

use crate::error::{GraphError, Result};
use crate::graph::Graph;
use serde::Serialize;
use std::collections::VecDeque;
use tracing::{debug, instrument};

/// Result of a traversal: the visit order, or whether a target was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Traversal<N = usize> {
    /// Nodes in the order they were first visited.
    Order(Vec<N>),
    /// Search mode: whether the target was visited.
    Found(bool),
}

impl<N> Traversal<N> {
    /// True only for a successful search.
    pub fn is_found(&self) -> bool {
        matches!(self, Traversal::Found(true))
    }

    /// The visit order, if this was a full traversal.
    pub fn order(&self) -> Option<&[N]> {
        match self {
            Traversal::Order(nodes) => Some(nodes),
            Traversal::Found(_) => None,
        }
    }
}

/// Full BFS visit order from `start`.
///
/// # Errors
/// `GraphError::IndexOutOfRange` if `start` is not a node.
#[instrument(skip(graph))]
pub fn bfs(graph: &Graph, start: usize) -> Result<Vec<usize>> {
    check_index(graph, start)?;
    let (order, _) = bfs_walk(graph, start, None);
    debug!(visited = order.len(), "bfs complete");
    Ok(order)
}

/// BFS that stops when `target` is dequeued.
///
/// # Errors
/// `GraphError::IndexOutOfRange` if `start` or `target` is not a node.
#[instrument(skip(graph))]
pub fn bfs_search(graph: &Graph, start: usize, target: usize) -> Result<bool> {
    check_index(graph, start)?;
    check_index(graph, target)?;
    let (order, found) = bfs_walk(graph, start, Some(target));
    debug!(visited = order.len(), found, "bfs search complete");
    Ok(found)
}

/// Full pre-order DFS visit order from `start`.
///
/// # Errors
/// `GraphError::IndexOutOfRange` if `start` is not a node.
#[instrument(skip(graph))]
pub fn dfs(graph: &Graph, start: usize) -> Result<Vec<usize>> {
    check_index(graph, start)?;
    let (order, _) = dfs_walk(graph, start, None);
    debug!(visited = order.len(), "dfs complete");
    Ok(order)
}

/// DFS that stops as soon as `target` is entered.
///
/// # Errors
/// `GraphError::IndexOutOfRange` if `start` or `target` is not a node.
#[instrument(skip(graph))]
pub fn dfs_search(graph: &Graph, start: usize, target: usize) -> Result<bool> {
    check_index(graph, start)?;
    check_index(graph, target)?;
    let (order, found) = dfs_walk(graph, start, Some(target));
    debug!(visited = order.len(), found, "dfs search complete");
    Ok(found)
}

pub(crate) fn check_index(graph: &Graph, node: usize) -> Result<()> {
    if node < graph.len() {
        Ok(())
    } else {
        Err(GraphError::IndexOutOfRange(node))
    }
}

/// Neighbors are enqueued unless already visited; duplicates from different
/// parents are dropped when dequeued. The target check happens on dequeue.
fn bfs_walk(graph: &Graph, start: usize, target: Option<usize>) -> (Vec<usize>, bool) {
    let mut visited = vec![false; graph.len()];
    let mut order = Vec::new();
    let mut queue = VecDeque::from([start]);

    while let Some(v) = queue.pop_front() {
        if visited[v] {
            continue;
        }
        visited[v] = true;
        order.push(v);

        if target == Some(v) {
            return (order, true);
        }

        queue.extend(
            graph
                .successors(v)
                .iter()
                .map(|&(w, _)| w)
                .filter(|&w| !visited[w]),
        );
    }

    (order, false)
}

fn dfs_walk(graph: &Graph, start: usize, target: Option<usize>) -> (Vec<usize>, bool) {
    let mut visited = vec![false; graph.len()];
    let mut order = vec![start];
    visited[start] = true;

    if target == Some(start) {
        return (order, true);
    }

    // (node, index of the next successor to examine)
    let mut stack: Vec<(usize, usize)> = vec![(start, 0)];

    while let Some(frame) = stack.last_mut() {
        let (node, cursor) = *frame;
        match graph.successors(node).get(cursor) {
            Some(&(next, _)) => {
                frame.1 += 1;
                if visited[next] {
                    continue;
                }
                visited[next] = true;
                order.push(next);
                if target == Some(next) {
                    return (order, true);
                }
                stack.push((next, 0));
            }
            None => {
                stack.pop();
            }
        }
    }

    (order, false)
}

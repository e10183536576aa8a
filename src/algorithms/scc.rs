//! Strongly connected components (Kosaraju).
//!
//! Pass one records nodes in DFS finishing order over the original graph.
//! Pass two walks the transpose in reverse finishing order; each walk started
//! from an unvisited node collects exactly one component.
//!
//! Both passes use an explicit stack so recursion depth is not a limit.

use crate::graph::Graph;
use serde::Serialize;
use tracing::{debug, instrument};

/// Result of SCC decomposition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SccResult<N = usize> {
    /// Disjoint components covering every node. Neither the list nor the
    /// members of a component are in any particular order.
    pub components: Vec<Vec<N>>,
    /// True if any component is a cycle.
    pub has_cycles: bool,
    /// Components with more than one node, or a single node with a self-loop.
    pub cycle_count: usize,
}

impl<N> SccResult<N> {
    /// Translate node handles, e.g. indices into IDs.
    pub fn map_nodes<M>(self, mut f: impl FnMut(N) -> M) -> SccResult<M> {
        SccResult {
            components: self
                .components
                .into_iter()
                .map(|c| c.into_iter().map(&mut f).collect())
                .collect(),
            has_cycles: self.has_cycles,
            cycle_count: self.cycle_count,
        }
    }
}

/// Find strongly connected components using Kosaraju's two-pass algorithm.
#[instrument(skip(graph))]
pub fn kosaraju_scc(graph: &Graph) -> SccResult {
    let n = graph.len();
    if n == 0 {
        return SccResult {
            components: Vec::new(),
            has_cycles: false,
            cycle_count: 0,
        };
    }

    // Pass one: global finishing order over every root
    let mut visited = vec![false; n];
    let mut finished: Vec<usize> = Vec::with_capacity(n);
    for root in 0..n {
        if !visited[root] {
            post_order(graph, root, &mut visited, &mut finished);
        }
    }

    // Pass two: the transpose, latest finisher first
    let transpose = graph.transpose();
    let mut visited = vec![false; n];
    let mut components: Vec<Vec<usize>> = Vec::new();
    for &root in finished.iter().rev() {
        if !visited[root] {
            let mut component = Vec::new();
            post_order(&transpose, root, &mut visited, &mut component);
            components.push(component);
        }
    }

    let cycle_count = components
        .iter()
        .filter(|c| c.len() > 1 || graph.weight(c[0], c[0]).is_some())
        .count();

    debug!(components = components.len(), cycle_count, "scc complete");
    SccResult {
        components,
        has_cycles: cycle_count > 0,
        cycle_count,
    }
}

/// Iterative DFS from `root` that appends each node to `out` once all of its
/// unvisited descendants are finished.
fn post_order(graph: &Graph, root: usize, visited: &mut [bool], out: &mut Vec<usize>) {
    visited[root] = true;
    let mut stack: Vec<(usize, usize)> = vec![(root, 0)];

    while let Some(frame) = stack.last_mut() {
        let (node, cursor) = *frame;
        match graph.successors(node).get(cursor) {
            Some(&(next, _)) => {
                frame.1 += 1;
                if !visited[next] {
                    visited[next] = true;
                    stack.push((next, 0));
                }
            }
            None => {
                out.push(node);
                stack.pop();
            }
        }
    }
}

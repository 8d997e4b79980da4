//! Simple-path enumeration by iterative depth-first search.

use crate::graph::InMemoryGraph;

/// Lazy enumeration of all simple paths from `source` to `target`.
///
/// Neighbours are explored in adjacency-list order, so discovery order is
/// deterministic for a given topology. A path is yielded as soon as the
/// target is reached and is never extended through the target. Paths have at
/// least one and at most `max_hops` edges.
pub struct SimplePaths<'a> {
    graph: &'a InMemoryGraph,
    target: usize,
    max_hops: usize,
    /// Current path from the source, as node indices.
    path: Vec<usize>,
    on_path: Vec<bool>,
    stack: Vec<DfsFrame>,
}

/// One level of the DFS: which node we are expanding and the next edge to try.
struct DfsFrame {
    node: usize,
    next_edge: usize,
}

impl<'a> SimplePaths<'a> {
    pub fn new(graph: &'a InMemoryGraph, source: usize, target: usize, max_hops: usize) -> Self {
        let mut on_path = vec![false; graph.node_count()];
        let mut path = Vec::new();
        let mut stack = Vec::new();

        if source != target && max_hops > 0 {
            on_path[source] = true;
            path.push(source);
            stack.push(DfsFrame {
                node: source,
                next_edge: 0,
            });
        }

        Self {
            graph,
            target,
            max_hops,
            path,
            on_path,
            stack,
        }
    }
}

impl Iterator for SimplePaths<'_> {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.stack.last_mut()?;
            let edges = &self.graph.adjacency[frame.node];

            if frame.next_edge >= edges.len() {
                self.stack.pop();
                if let Some(node) = self.path.pop() {
                    self.on_path[node] = false;
                }
                continue;
            }

            let child = edges[frame.next_edge].target_index;
            frame.next_edge += 1;

            if self.on_path[child] {
                continue;
            }

            if child == self.target {
                let mut found = self.path.clone();
                found.push(child);
                return Some(found);
            }

            // `path.len()` is the hop count once `child` is appended.
            if self.path.len() < self.max_hops {
                self.on_path[child] = true;
                self.path.push(child);
                self.stack.push(DfsFrame {
                    node: child,
                    next_edge: 0,
                });
            }
        }
    }
}

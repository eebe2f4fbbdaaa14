// NETREL: Exact Packet Delivery Reliability of Networks with Independently Failing Links
// Copyright (C) 2024-2025 Roland Schmid <roschmi@ethz.ch> and Tibor Schneider <sctibor@ethz.ch>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.
//! Reachability of the destination under a given set of failed links.
//!
//! The adjacency of the full route is built once per analysis. A failure hypothesis does not
//! modify it; failed links are simply skipped during the depth-first search.
use std::collections::{HashMap, HashSet};

use crate::{topology::Link, Node};

/// Set of failed links, identified by their endpoints. A failed link `(a, b)` blocks travel from
/// `a` to `b` and from `b` to `a`.
#[derive(Clone, Debug)]
pub struct FailureSet<'a, N> {
    links: HashSet<(&'a N, &'a N)>,
}

impl<'a, N: Node> FailureSet<'a, N> {
    pub fn new(failed: impl IntoIterator<Item = &'a Link<N>>) -> Self {
        Self {
            links: failed.into_iter().map(|Link(a, b)| (a, b)).collect(),
        }
    }

    /// check if the edge between `a` and `b` is failed, in either direction
    pub fn is_failed(&self, a: &N, b: &N) -> bool {
        self.links.contains(&(a, b)) || self.links.contains(&(b, a))
    }

}

/// Undirected adjacency of a route: every link is an edge in both directions.
#[derive(Clone, Debug)]
pub struct Adjacency<N> {
    neighbors: HashMap<N, Vec<N>>,
}

impl<N: Node> Adjacency<N> {
    pub fn new(route: &[Link<N>]) -> Self {
        let mut neighbors: HashMap<N, Vec<N>> = HashMap::new();
        for Link(a, b) in route {
            for (x, y) in [(a, b), (b, a)] {
                let entry = neighbors.entry(x.clone()).or_default();
                if !entry.contains(y) {
                    entry.push(y.clone());
                }
            }
        }
        Self { neighbors }
    }

    /// check if `n` is an endpoint of any link
    pub fn contains(&self, n: &N) -> bool {
        self.neighbors.contains_key(n)
    }

    pub fn neighbors(&self, n: &N) -> &[N] {
        self.neighbors.get(n).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn num_nodes(&self) -> usize {
        self.neighbors.len()
    }

    /// Check if `destination` can be reached from `source` without crossing a failed link.
    ///
    /// A node always reaches itself. Otherwise, if either endpoint is not part of the route, the
    /// answer is `false`. The search uses an explicit stack and a visited set, so it terminates on
    /// cyclic topologies and is not limited by the call stack.
    pub fn is_connected(&self, source: &N, destination: &N, failed: &FailureSet<'_, N>) -> bool {
        if source == destination {
            return true;
        }
        if !self.contains(source) || !self.contains(destination) {
            return false;
        }

        let mut visited: HashSet<&N> = HashSet::from([source]);
        let mut stack = vec![source];
        while let Some(current) = stack.pop() {
            for next in self.neighbors(current) {
                if visited.contains(next) || failed.is_failed(current, next) {
                    continue;
                }
                if next == destination {
                    return true;
                }
                visited.insert(next);
                stack.push(next);
            }
        }
        false
    }
}

/// Check if `source` and `destination` remain connected in `route` when exactly `failed_links`
/// fail. Builds the adjacency from scratch; use [`Adjacency`] directly to check many failure
/// hypotheses on the same route.
pub fn is_connected<N: Node>(
    source: &N,
    destination: &N,
    route: &[Link<N>],
    failed_links: &[&Link<N>],
) -> bool {
    Adjacency::new(route).is_connected(
        source,
        destination,
        &FailureSet::new(failed_links.iter().copied()),
    )
}

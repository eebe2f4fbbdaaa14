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
//! Links, routes, and generated topology shapes.
use serde::{Deserialize, Serialize};

use crate::architectures::Architecture;

/// An undirected link between two nodes. Connectivity ignores the order of the endpoints, but two
/// links are only equal if their endpoints are given in the same order.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link<N>(pub N, pub N);

/// All links that may carry a packet from the source to the destination, including redundant
/// ones. Duplicates are kept as they are given.
pub type Route<N> = Vec<Link<N>>;

/// Build a route of `String` nodes from a list of name pairs.
pub fn route_from_pairs(pairs: &[(&str, &str)]) -> Route<String> {
    pairs
        .iter()
        .map(|(a, b)| Link(a.to_string(), b.to_string()))
        .collect()
}

/// Generated topologies, plus the named architectures.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Topology {
    Path(usize),
    Star(usize),
    Grid(usize, usize),
    Ring(usize),
    Architecture(Architecture),
}

impl Topology {
    /// print readable (and filename-compatible) string representation of the topology
    pub fn fmt(&self) -> String {
        match self {
            Self::Path(i) => format!("Path_{i}"),
            Self::Star(i) => format!("Star_{i}"),
            Self::Grid(rows, cols) => format!("Grid_{rows}_{cols}"),
            Self::Ring(i) => format!("Ring_{i}"),
            Self::Architecture(arch) => format!("{arch:?}"),
        }
    }

    /// Build the list of links of this topology.
    pub fn build_route(&self) -> Route<String> {
        let mut route = Vec::new();
        match self {
            Self::Path(k) => {
                for i in 1..*k {
                    route.push(Link(format!("r{}", i - 1), format!("r{i}")));
                }
            }
            Self::Star(k) => {
                // connect all leaves to the center node
                for i in 0..k.saturating_sub(1) {
                    route.push(Link(format!("r{i}"), "center".to_string()));
                }
            }
            Self::Grid(rows, cols) => {
                for i in 0..*rows {
                    for j in 0..*cols {
                        // connect in the row
                        if j > 0 {
                            route.push(Link(format!("r_{i}_{}", j - 1), format!("r_{i}_{j}")));
                        }
                        // connect to the last row
                        if i > 0 {
                            route.push(Link(format!("r_{}_{j}", i - 1), format!("r_{i}_{j}")));
                        }
                    }
                }
            }
            Self::Ring(k) => {
                route = Self::Path(*k).build_route();
                // two nodes are already connected by the path
                if *k >= 3 {
                    route.push(Link(format!("r{}", k - 1), "r0".to_string()));
                }
            }
            Self::Architecture(arch) => route = arch.route(),
        }
        route
    }

    /// A natural pair of (source, destination) for this topology, if it has at least two nodes.
    pub fn default_endpoints(&self) -> Option<(String, String)> {
        match *self {
            Self::Path(k) if k >= 2 => Some(("r0".to_string(), format!("r{}", k - 1))),
            Self::Star(k) if k >= 3 => Some(("r0".to_string(), "r1".to_string())),
            Self::Star(2) => Some(("r0".to_string(), "center".to_string())),
            Self::Grid(rows, cols) if rows * cols >= 2 => {
                Some(("r_0_0".to_string(), format!("r_{}_{}", rows - 1, cols - 1)))
            }
            Self::Ring(k) if k >= 2 => Some(("r0".to_string(), format!("r{}", k / 2))),
            Self::Architecture(arch) => {
                Some((arch.source().to_string(), arch.destination().to_string()))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::reachability::Adjacency;

    #[test]
    fn generated_link_counts() {
        assert_eq!(Topology::Path(4).build_route().len(), 3);
        assert_eq!(Topology::Star(5).build_route().len(), 4);
        assert_eq!(Topology::Grid(2, 3).build_route().len(), 7);
        assert_eq!(Topology::Ring(4).build_route().len(), 4);
        assert_eq!(Topology::Ring(2).build_route().len(), 1);
        assert!(Topology::Path(0).build_route().is_empty());
        assert!(Topology::Star(0).build_route().is_empty());
        assert!(Topology::Grid(0, 5).build_route().is_empty());
    }

    #[test]
    fn endpoints_are_part_of_the_route() {
        for topo in [
            Topology::Path(5),
            Topology::Star(4),
            Topology::Star(2),
            Topology::Grid(3, 3),
            Topology::Ring(6),
            Topology::Architecture(Architecture::Baseline),
        ] {
            let graph = Adjacency::new(&topo.build_route());
            let (s, d) = topo.default_endpoints().unwrap();
            assert!(graph.contains(&s), "{} misses {s}", topo.fmt());
            assert!(graph.contains(&d), "{} misses {d}", topo.fmt());
            assert_ne!(s, d);
        }
        assert_eq!(Topology::Path(1).default_endpoints(), None);
    }
}

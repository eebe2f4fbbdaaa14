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
//! Library for computing the exact probability that a packet is delivered from a source to a
//! destination across a topology whose links fail independently.
use std::{fmt::Debug, hash::Hash};

pub mod analyzer;
pub mod architectures;
pub mod config;
pub mod enumerator;
pub mod link_model;
pub mod reachability;
pub mod records;
pub mod topology;
pub mod util;

#[cfg(test)]
mod test;

pub use netrel_utils::decimal::{Decimal, DecimalError};

/// Node identifiers accepted by the analysis. Strings are used throughout the binaries, but any
/// comparable, hashable token works.
pub trait Node: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> Node for T {}

pub mod prelude {
    pub use super::{
        analyzer::{compute_reliability, Analyzer, AnalyzerError, ReliabilityResult, SuccessFormula},
        architectures::Architecture,
        config::AnalyzerConfig,
        topology::{Link, Route, Topology},
        Decimal, Node,
    };
}

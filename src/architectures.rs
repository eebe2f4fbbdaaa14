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
//! Network architectures connecting the motor control unit `MCU-4` to the gateway `SGA`.
use serde::{Deserialize, Serialize};

use crate::topology::{route_from_pairs, Route};

const SOURCE: &str = "MCU-4";
const DESTINATION: &str = "SGA";

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Deserialize,
    Serialize,
    strum::Display,
    strum::EnumIter,
    strum_macros::EnumString,
)]
#[strum(ascii_case_insensitive)]
/// Architectures available for the analysis. Each one is represented by all links that can be
/// used to transmit a packet from `MCU-4` to `SGA`.
pub enum Architecture {
    /// Two switch chains, cross-connected at both ends.
    #[strum(to_string = "Baseline")]
    Baseline,
    /// Single-homed at both ends, two disjoint paths in the middle.
    #[serde(rename = "CB-aware")]
    #[strum(to_string = "CB-aware", serialize = "cb-aware", serialize = "CbAware")]
    CbAware,
    /// A single chain of four links.
    #[serde(rename = "CB-aware with multi-homing")]
    #[strum(
        to_string = "CB-aware with multi-homing",
        serialize = "cb-aware-multi-homing",
        serialize = "CbAwareMultiHoming"
    )]
    CbAwareMultiHoming,
    /// The three-link example route.
    #[serde(rename = "Sample route")]
    #[strum(
        to_string = "Sample route",
        serialize = "sample-route",
        serialize = "SampleRoute"
    )]
    SampleRoute,
}

impl Architecture {
    /// The architectures compared by default.
    pub fn study() -> [Self; 3] {
        [Self::Baseline, Self::CbAware, Self::CbAwareMultiHoming]
    }

    pub fn source(&self) -> &'static str {
        SOURCE
    }

    pub fn destination(&self) -> &'static str {
        DESTINATION
    }

    pub fn route(&self) -> Route<String> {
        let pairs: &[(&str, &str)] = match self {
            Self::Baseline => &[
                ("MCU-4", "SW_4"),
                ("MCU-4", "SW_A"),
                ("SW_4", "SW_A"),
                ("SW_4", "SW_2"),
                ("SW_A", "SW_B"),
                ("SW_2", "SW_B"),
                ("SW_2", "SGA"),
                ("SW_B", "SGA"),
            ],
            Self::CbAware => &[
                ("MCU-4", "SW_4"),
                ("SW_4", "SW_A"),
                ("SW_4", "SW_2"),
                ("SW_A", "SW_B"),
                ("SW_2", "SW_B"),
                ("SW_B", "SGA"),
            ],
            Self::CbAwareMultiHoming => &[
                ("MCU-4", "SW_4"),
                ("SW_4", "SW_2"),
                ("SW_2", "SW_B"),
                ("SW_B", "SGA"),
            ],
            Self::SampleRoute => &[("MCU-4", "SW_4"), ("SW_4", "SW_2"), ("SW_2", "SGA")],
        };
        route_from_pairs(pairs)
    }
}

#[cfg(test)]
mod test {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;
    use crate::reachability::Adjacency;

    #[test]
    fn route_sizes() {
        assert_eq!(Architecture::Baseline.route().len(), 8);
        assert_eq!(Architecture::CbAware.route().len(), 6);
        assert_eq!(Architecture::CbAwareMultiHoming.route().len(), 4);
        assert_eq!(Architecture::SampleRoute.route().len(), 3);
    }

    #[test]
    fn endpoints_present() {
        for arch in Architecture::iter() {
            let graph = Adjacency::new(&arch.route());
            assert!(graph.contains(&arch.source().to_string()));
            assert!(graph.contains(&arch.destination().to_string()));
        }
    }

    #[test]
    fn names() {
        assert_eq!(
            Architecture::CbAwareMultiHoming.to_string(),
            "CB-aware with multi-homing"
        );
        assert_eq!(
            Architecture::from_str("baseline").unwrap(),
            Architecture::Baseline
        );
        assert_eq!(
            Architecture::from_str("cb-aware").unwrap(),
            Architecture::CbAware
        );
        assert_eq!(
            Architecture::from_str("CB-aware with multi-homing").unwrap(),
            Architecture::CbAwareMultiHoming
        );
        assert!(Architecture::from_str("mesh").is_err());
        let json = serde_json::to_string(&Architecture::CbAware).unwrap();
        assert_eq!(json, "\"CB-aware\"");
    }
}

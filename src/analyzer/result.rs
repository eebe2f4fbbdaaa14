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
//! Describes an analysis result.

use std::time::Duration;

use num_traits::Zero;

use super::{AnalyzerError, SuccessFormula};
use crate::Decimal;

/// Result of the reliability analysis of one route at one bit error rate.
#[derive(Clone, Debug)]
pub struct ReliabilityResult {
    /// Probability that at least one failure-free path connects source and destination.
    pub total_success_probability: Decimal,
    /// `1 - total_success_probability`, exact.
    pub packet_loss_rate: Decimal,
    /// Expected time between two lost packets, in hours. `None` if no packet is ever lost.
    pub average_time_between_losses_hours: Option<Decimal>,
    /// Closed-form expression of the success probability, if requested.
    pub success_formula: Option<SuccessFormula>,
    /// Probability that a single link delivers a packet intact.
    pub link_success_probability: Decimal,
    /// Number of links in the route
    pub n_links: usize,
    /// Number of failure subsets checked
    pub n_subsets: u64,
    /// Number of failure subsets that keep source and destination connected
    pub n_connected_subsets: u64,
    /// Significant digits used by `Display`
    pub display_digits: usize,
    /// Time to run the analysis
    pub t_wall: Duration,
}

impl ReliabilityResult {
    /// The mean time between losses in hours, or `UndefinedMetric` if the loss rate is zero.
    pub fn mean_time_between_losses(&self) -> Result<&Decimal, AnalyzerError> {
        self.average_time_between_losses_hours
            .as_ref()
            .ok_or(AnalyzerError::UndefinedMetric)
    }

    /// Source and destination are never connected: either they are not connected in the healthy
    /// topology, one of them is missing, or every link always fails.
    pub fn is_unreachable(&self) -> bool {
        self.total_success_probability.is_zero()
    }
}

impl std::fmt::Display for ReliabilityResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let digits = self.display_digits;
        let mtbl = match &self.average_time_between_losses_hours {
            Some(hours) => format!("{}h", hours.format_significant(digits.min(6))),
            None => "never".to_string(),
        };
        write!(
            f,
            "prob success: {}, loss rate: {}, time between losses: {}, {}/{} subsets connected, time: {:>8.2?}",
            self.total_success_probability.format_significant(digits),
            self.packet_loss_rate.format_significant(digits),
            mtbl,
            self.n_connected_subsets,
            self.n_subsets,
            self.t_wall,
        )
    }
}

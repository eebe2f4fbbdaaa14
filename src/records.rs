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
//! Module defining the record data type to (de-)serialize analysis results to CSV or JSON.
use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{analyzer::ReliabilityResult, Decimal};

/// Flat, rounded representation of a `ReliabilityResult`, one row per (architecture, BER).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReliabilityRecord {
    pub architecture: String,
    pub bit_error_rate: String,
    pub packet_size_bits: u32,
    pub n_links: usize,
    /// number of failure subsets that keep source and destination connected
    pub n_connected_subsets: u64,
    pub total_success_probability: String,
    pub packet_loss_rate: String,
    /// empty if no packet is ever lost
    pub average_time_between_losses_hours: Option<String>,
    pub success_formula: Option<String>,
}

impl ReliabilityRecord {
    /// Round all values of `result` to `digits` significant digits.
    pub fn new(
        architecture: impl Display,
        ber: &Decimal,
        packet_size_bits: u32,
        result: &ReliabilityResult,
        digits: usize,
    ) -> Self {
        Self {
            architecture: architecture.to_string(),
            bit_error_rate: ber.to_scientific(digits),
            packet_size_bits,
            n_links: result.n_links,
            n_connected_subsets: result.n_connected_subsets,
            total_success_probability: result.total_success_probability.format_significant(digits),
            packet_loss_rate: result.packet_loss_rate.format_significant(digits),
            average_time_between_losses_hours: result
                .average_time_between_losses_hours
                .as_ref()
                .map(|hours| hours.format_significant(digits)),
            success_formula: result.success_formula.as_ref().map(|f| f.render(digits)),
        }
    }
}

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
//! Per-link delivery probability.
use num_traits::One;

use crate::{analyzer::AnalyzerError, Decimal};

/// Probability that a packet of `packet_size_bits` bits crosses a single link intact, given the
/// link's bit error rate: `(1 - ber)^packet_size_bits`, computed exactly.
pub fn link_success_probability(
    ber: &Decimal,
    packet_size_bits: u32,
) -> Result<Decimal, AnalyzerError> {
    if ber.is_negative() || ber > &Decimal::one() {
        return Err(AnalyzerError::InvalidProbability(ber.clone()));
    }
    Ok((&Decimal::one() - ber).pow(packet_size_bits))
}

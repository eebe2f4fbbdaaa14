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
//! Module that performs the exact reliability analysis.
//!
//! For a route of `n` links that fail independently, each with probability `1 - p`, the analyzer
//! walks all `2^n` failure subsets. A subset with `k` failed links occurs with probability
//! `p^(n-k) * (1-p)^k`, and it contributes to the success probability if source and destination
//! remain connected without the failed links.
use std::time::Instant;

use num_traits::{One, Zero};
use thiserror::Error;

use crate::{
    config::AnalyzerConfig,
    enumerator::{enumerate_failure_subsets, failure_subset_count},
    link_model::link_success_probability,
    reachability::{Adjacency, FailureSet},
    topology::{Link, Route},
    Decimal, DecimalError, Node,
};

mod formula;
mod result;

pub use formula::{FormulaTerm, SuccessFormula};
pub use result::*;

/// Error thrown by the analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// The bit error rate is not in `[0, 1]`.
    #[error("The bit error rate {0} is not a probability in [0, 1].")]
    InvalidProbability(Decimal),
    /// The route is too long to enumerate all failure subsets.
    #[error("The route has {links} links, but at most {max} links can be enumerated.")]
    TooManyLinks { links: usize, max: usize },
    /// The packet loss rate is zero, so there is no time between losses.
    #[error("The packet loss rate is zero, the mean time between losses is undefined.")]
    UndefinedMetric,
    /// Decimal error
    #[error("Decimal error: {0}")]
    Decimal(#[from] DecimalError),
}

/// Exact reliability analysis of one route between a source and a destination.
#[derive(Clone, Debug)]
pub struct Analyzer<N> {
    /// All links that may be used to reach the destination
    route: Route<N>,
    source: N,
    destination: N,
    /// Adjacency of the healthy route, shared by all failure subsets
    graph: Adjacency<N>,
    pub config: AnalyzerConfig,
}

impl<N: Node> Analyzer<N> {
    /// Create a new analyzer. Fails if the route has more links than `config.max_links`.
    pub fn new(
        route: Route<N>,
        source: N,
        destination: N,
        config: AnalyzerConfig,
    ) -> Result<Self, AnalyzerError> {
        if let Some(max) = config.max_links {
            if route.len() > max {
                log::error!(
                    "[analyzer] Refusing to enumerate {:?} failure subsets of {} links",
                    failure_subset_count(route.len()),
                    route.len()
                );
                return Err(AnalyzerError::TooManyLinks {
                    links: route.len(),
                    max,
                });
            }
        }

        let graph = Adjacency::new(&route);
        log::debug!(
            "[analyzer] {} links between {} nodes",
            route.len(),
            graph.num_nodes()
        );
        if source != destination {
            for endpoint in [&source, &destination] {
                if !graph.contains(endpoint) {
                    log::warn!(
                        "[analyzer] {endpoint:?} is not part of the route, the destination is unreachable."
                    );
                }
            }
        }

        Ok(Self {
            route,
            source,
            destination,
            graph,
            config,
        })
    }

    pub fn route(&self) -> &[Link<N>] {
        &self.route
    }

    pub fn source(&self) -> &N {
        &self.source
    }

    pub fn destination(&self) -> &N {
        &self.destination
    }

    /// Compute the success probability, loss rate, and mean time between losses.
    pub fn analyze(
        &self,
        ber: &Decimal,
        packet_size_bits: u32,
    ) -> Result<ReliabilityResult, AnalyzerError> {
        self.run(ber, packet_size_bits, false)
    }

    /// Same as [`Analyzer::analyze`], but also builds the success formula.
    pub fn analyze_with_formula(
        &self,
        ber: &Decimal,
        packet_size_bits: u32,
    ) -> Result<ReliabilityResult, AnalyzerError> {
        self.run(ber, packet_size_bits, true)
    }

    fn run(
        &self,
        ber: &Decimal,
        packet_size_bits: u32,
        emit_formula: bool,
    ) -> Result<ReliabilityResult, AnalyzerError> {
        let start = Instant::now();
        let p = link_success_probability(ber, packet_size_bits)?;
        let n = self.route.len();

        log::debug!(
            "[analyzer] {:?} -> {:?}: {} links, ber = {}, {} bits",
            self.source,
            self.destination,
            n,
            ber.to_scientific(self.config.display_digits),
            packet_size_bits
        );

        let coefficients = subset_probabilities(&p, n);

        // number of connected subsets, indexed by the number of failed links
        let mut connected = vec![0u64; n + 1];
        let mut terms = Vec::new();
        let mut n_subsets = 0u64;
        for failed in enumerate_failure_subsets(&self.route) {
            n_subsets += 1;
            let k = failed.len();
            let failed = FailureSet::new(failed);
            if self
                .graph
                .is_connected(&self.source, &self.destination, &failed)
            {
                log::trace!("[analyzer] connected with {k} failed links: {failed:?}");
                connected[k] += 1;
                if emit_formula {
                    terms.push(FormulaTerm {
                        successes: n - k,
                        failures: k,
                    });
                }
            }
        }

        // subsets of equal size have equal probability, so the exact sum can be grouped by size
        let total_success_probability: Decimal = connected
            .iter()
            .zip(&coefficients)
            .filter(|(count, _)| **count > 0)
            .map(|(count, c)| &Decimal::from(*count) * c)
            .sum();
        let packet_loss_rate = &Decimal::one() - &total_success_probability;
        let average_time_between_losses_hours = self.time_between_losses(&packet_loss_rate)?;

        let result = ReliabilityResult {
            total_success_probability,
            packet_loss_rate,
            average_time_between_losses_hours,
            success_formula: emit_formula.then(|| {
                SuccessFormula::new(terms, coefficients, self.config.display_digits)
            }),
            link_success_probability: p,
            n_links: n,
            n_subsets,
            n_connected_subsets: connected.iter().sum(),
            display_digits: self.config.display_digits,
            t_wall: start.elapsed(),
        };
        log::debug!("[analyzer] {result}");

        Ok(result)
    }

    /// `1 / (loss_rate * packets_per_hour)`, or `None` if the loss rate is zero.
    fn time_between_losses(&self, loss_rate: &Decimal) -> Result<Option<Decimal>, AnalyzerError> {
        if loss_rate.is_zero() {
            log::warn!("[analyzer] No packet is ever lost, the time between losses is undefined.");
            return Ok(None);
        }
        let losses_per_hour = loss_rate * &self.config.packets_per_hour();
        Ok(Some(
            Decimal::one().checked_div(&losses_per_hour, self.config.division_digits)?,
        ))
    }
}

/// Probability of one specific failure subset with `k` failed links out of `n`, for every `k`:
/// `p^(n-k) * (1-p)^k`.
fn subset_probabilities(p: &Decimal, n: usize) -> Vec<Decimal> {
    let q = &Decimal::one() - p;
    let powers = |x: &Decimal| {
        let mut acc = vec![Decimal::one()];
        for i in 0..n {
            let next = &acc[i] * x;
            acc.push(next);
        }
        acc
    };
    let p_powers = powers(p);
    let q_powers = powers(&q);
    (0..=n).map(|k| &p_powers[n - k] * &q_powers[k]).collect()
}

/// Compute the reliability of `route` between `source` and `destination` with the default
/// configuration.
pub fn compute_reliability<N: Node>(
    ber: &Decimal,
    packet_size_bits: u32,
    route: &[Link<N>],
    source: &N,
    destination: &N,
    emit_formula: bool,
) -> Result<ReliabilityResult, AnalyzerError> {
    let analyzer = Analyzer::new(
        route.to_vec(),
        source.clone(),
        destination.clone(),
        AnalyzerConfig::default(),
    )?;
    if emit_formula {
        analyzer.analyze_with_formula(ber, packet_size_bits)
    } else {
        analyzer.analyze(ber, packet_size_bits)
    }
}

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
//! Routes without any redundancy: a single failure disconnects the endpoints.

use num_traits::{One, Zero};

use crate::{
    analyzer::{compute_reliability, Analyzer, AnalyzerError},
    architectures::Architecture,
    config::AnalyzerConfig,
    topology::{route_from_pairs, Topology},
    Decimal,
};

use super::{check_exact, d};

fn s(x: &str) -> String {
    x.to_string()
}

#[test]
fn single_link() {
    let route = route_from_pairs(&[("A", "B")]);
    let result = compute_reliability(&d("0.5"), 1, &route, &s("A"), &s("B"), false).unwrap();
    check_exact(&d("0.5"), &result.total_success_probability, 28);
    check_exact(&d("0.5"), &result.packet_loss_rate, 28);
    assert_eq!(result.n_subsets, 2);
    assert_eq!(result.n_connected_subsets, 1);
    assert!(result.success_formula.is_none());

    // 1 / (0.5 * 360000)
    let expected = Decimal::one()
        .checked_div(&Decimal::from(180_000u32), 50)
        .unwrap();
    check_exact(&expected, result.mean_time_between_losses().unwrap(), 28);
    assert_eq!(result.mean_time_between_losses().unwrap().format_significant(5), "0.0000055556");
}

#[test]
fn sample_route() {
    // three links in series, 1e-10 bit error rate, 400 byte packets
    let arch = Architecture::SampleRoute;
    let ber = Decimal::pow10(-10);
    let result = compute_reliability(
        &ber,
        3200,
        &arch.route(),
        &s(arch.source()),
        &s(arch.destination()),
        true,
    )
    .unwrap();

    let p = (&Decimal::one() - &ber).pow(3200);
    check_exact(&p, &result.link_success_probability, 28);
    check_exact(&p.pow(3), &result.total_success_probability, 28);
    check_exact(
        &(&Decimal::one() - &p.pow(3)),
        &result.packet_loss_rate,
        28,
    );
    assert_eq!(result.n_subsets, 8);
    assert_eq!(result.n_connected_subsets, 1);

    // roughly 9.6e-7 losses per packet, so a loss every ~2.9 hours
    let hours = result.mean_time_between_losses().unwrap();
    assert!(hours > &d("2.8") && hours < &d("3.0"), "{hours}");
    assert_eq!(result.success_formula.unwrap().len(), 1);
}

#[test]
fn complement_is_exact() {
    let route = Topology::Path(6).build_route();
    for ber in ["1e-12", "1e-10", "0.001", "0.3"] {
        let result = compute_reliability(&d(ber), 3200, &route, &s("r0"), &s("r5"), false).unwrap();
        assert_eq!(
            &result.total_success_probability + &result.packet_loss_rate,
            Decimal::one(),
            "{ber}"
        );
        // a path only survives without failures
        check_exact(
            &result.link_success_probability.pow(5),
            &result.total_success_probability,
            28,
        );
    }
}

#[test]
fn perfect_links() {
    let route = Topology::Path(4).build_route();
    let result =
        compute_reliability(&Decimal::zero(), 3200, &route, &s("r0"), &s("r3"), true).unwrap();
    check_exact(&Decimal::one(), &result.total_success_probability, 28);
    assert!(result.packet_loss_rate.is_zero());
    assert!(result.average_time_between_losses_hours.is_none());
    assert!(matches!(
        result.mean_time_between_losses(),
        Err(AnalyzerError::UndefinedMetric)
    ));
    assert_eq!(result.success_formula.unwrap().evaluate(), Decimal::one());
}

#[test]
fn always_failing_links() {
    let route = route_from_pairs(&[("A", "B"), ("B", "C")]);
    let result =
        compute_reliability(&Decimal::one(), 1, &route, &s("A"), &s("C"), false).unwrap();
    assert!(result.link_success_probability.is_zero());
    assert!(result.total_success_probability.is_zero());
    check_exact(&Decimal::one(), &result.packet_loss_rate, 28);
    // one loss per packet
    check_exact(
        &Decimal::one()
            .checked_div(&Decimal::from(360_000u32), 50)
            .unwrap(),
        result.mean_time_between_losses().unwrap(),
        28,
    );
}

#[test]
fn invalid_bit_error_rate() {
    let route = route_from_pairs(&[("A", "B")]);
    for ber in ["1.5", "-0.1", "1.0000000001"] {
        let result = compute_reliability(&d(ber), 1, &route, &s("A"), &s("B"), false);
        assert!(
            matches!(result, Err(AnalyzerError::InvalidProbability(x)) if x == d(ber)),
            "{ber}"
        );
    }
}

#[test]
fn too_many_links() {
    let route = Topology::Path(26).build_route();
    let result = Analyzer::new(route.clone(), s("r0"), s("r25"), AnalyzerConfig::default());
    assert!(matches!(
        result,
        Err(AnalyzerError::TooManyLinks { links: 25, max: 24 })
    ));

    let config = AnalyzerConfig {
        max_links: Some(30),
        ..Default::default()
    };
    assert!(Analyzer::new(route, s("r0"), s("r25"), config).is_ok());
}

#[test]
fn unknown_endpoint() {
    let route = route_from_pairs(&[("A", "B"), ("B", "C")]);
    let result = compute_reliability(&d("0.01"), 8, &route, &s("A"), &s("Z"), true).unwrap();
    assert!(result.is_unreachable());
    assert!(result.total_success_probability.is_zero());
    check_exact(&Decimal::one(), &result.packet_loss_rate, 28);
    assert_eq!(result.n_connected_subsets, 0);
    assert_eq!(result.success_formula.unwrap().render(28), "0");
}

#[test]
fn empty_route() {
    let route = route_from_pairs(&[]);
    let result = compute_reliability(&d("0.01"), 8, &route, &s("A"), &s("A"), false).unwrap();
    check_exact(&Decimal::one(), &result.total_success_probability, 28);
    assert_eq!(result.n_subsets, 1);

    let result = compute_reliability(&d("0.01"), 8, &route, &s("A"), &s("B"), false).unwrap();
    assert!(result.total_success_probability.is_zero());
}

#[test]
fn duplicate_links() {
    // failing either copy blocks the pair, so both copies must survive
    let route = route_from_pairs(&[("A", "B"), ("A", "B")]);
    let result = compute_reliability(&d("0.5"), 1, &route, &s("A"), &s("B"), true).unwrap();
    check_exact(&d("0.25"), &result.total_success_probability, 28);
    assert_eq!(result.n_subsets, 4);
    assert_eq!(result.n_connected_subsets, 1);
    assert_eq!(
        result.success_formula.unwrap().render(28),
        "(0.25) * p^2 * (1-p)^0"
    );

    // a copy in the other direction is still the same node pair
    let route = route_from_pairs(&[("A", "B"), ("B", "A"), ("B", "C")]);
    let result = compute_reliability(&d("0.5"), 1, &route, &s("A"), &s("C"), false).unwrap();
    check_exact(&d("0.125"), &result.total_success_probability, 28);
    assert_eq!(result.n_subsets, 8);
}

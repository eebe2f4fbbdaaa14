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
//! Enumeration of all link failure hypotheses of a route.
use itertools::Itertools;

use crate::topology::Link;

/// Every subset of the route's links, each one read as "exactly these links failed".
///
/// Subsets are yielded by increasing size, starting with the empty subset (no failures) and
/// ending with the full route (every link failed). Subsets of the same size follow the
/// combination order of the input. There are `2^route.len()` of them, so callers must keep the
/// route short. Call the function again to restart the enumeration.
pub fn enumerate_failure_subsets<'a, N: 'a>(
    route: &'a [Link<N>],
) -> impl Iterator<Item = Vec<&'a Link<N>>> + 'a {
    route.iter().powerset()
}

/// Number of failure subsets of a route with `n_links` links, or `None` if it does not fit `u64`.
pub fn failure_subset_count(n_links: usize) -> Option<u64> {
    u32::try_from(n_links)
        .ok()
        .and_then(|n| 1u64.checked_shl(n))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::topology::route_from_pairs;

    #[test]
    fn complete() {
        let route = route_from_pairs(&[("a", "b"), ("b", "c"), ("c", "d"), ("a", "d")]);
        let subsets = enumerate_failure_subsets(&route).collect_vec();
        assert_eq!(subsets.len() as u64, failure_subset_count(route.len()).unwrap());
        assert_eq!(subsets.iter().filter(|s| s.is_empty()).count(), 1);
        assert_eq!(subsets.iter().filter(|s| s.len() == route.len()).count(), 1);
        assert_eq!(subsets.iter().unique().count(), subsets.len());
    }

    #[test]
    fn ordered_by_size() {
        let route = route_from_pairs(&[("a", "b"), ("b", "c"), ("c", "d")]);
        let subsets = enumerate_failure_subsets(&route).collect_vec();
        assert!(subsets.first().unwrap().is_empty());
        assert_eq!(subsets.last().unwrap().len(), 3);
        assert!(subsets.windows(2).all(|w| w[0].len() <= w[1].len()));
        // combination order within one size
        let pairs = subsets
            .iter()
            .filter(|s| s.len() == 2)
            .map(|s| (s[0].0.as_str(), s[1].0.as_str()))
            .collect_vec();
        assert_eq!(pairs, vec![("a", "b"), ("a", "c"), ("b", "c")]);
    }

    #[test]
    fn restartable() {
        let route = route_from_pairs(&[("a", "b"), ("b", "c")]);
        let first = enumerate_failure_subsets(&route).collect_vec();
        let second = enumerate_failure_subsets(&route).collect_vec();
        assert_eq!(first, second);
        assert_eq!(route.len(), 2);
    }

    #[test]
    fn repeated_links_are_separate() {
        let route = route_from_pairs(&[("a", "b"), ("a", "b"), ("b", "c")]);
        let subsets = enumerate_failure_subsets(&route).collect_vec();
        assert_eq!(subsets.len(), 8);
        // the two copies fail independently, so each one appears on its own
        let singles = subsets.iter().filter(|s| s.len() == 1).collect_vec();
        assert_eq!(singles.len(), 3);
        assert!(std::ptr::eq(singles[0][0], &route[0]));
        assert!(std::ptr::eq(singles[1][0], &route[1]));
        assert_eq!(singles[0], singles[1]);
    }

    #[test]
    fn empty_route() {
        let route: Vec<Link<String>> = Vec::new();
        let subsets = enumerate_failure_subsets(&route).collect_vec();
        assert_eq!(subsets, vec![Vec::<&Link<String>>::new()]);
    }

    #[test]
    fn count_overflow() {
        assert_eq!(failure_subset_count(0), Some(1));
        assert_eq!(failure_subset_count(10), Some(1024));
        assert_eq!(failure_subset_count(63), Some(1 << 63));
        assert_eq!(failure_subset_count(64), None);
    }
}

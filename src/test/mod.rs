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
//! Scenario tests of the complete analysis.
//!
//! Use the following commands to see the compared values:
//!
//! ```shell
//! cargo test --release -- --nocapture --test-threads 1 --quiet
//! ```

use crate::Decimal;

/// Compare two exact values, printing both rounded to `digits` significant digits. Panics if the
/// values are not exactly equal.
pub fn check_exact(exp: &Decimal, acq: &Decimal, digits: usize) {
    if exp == acq {
        eprintln!(
            "{}exact{}: {}",
            termion::color::Fg(termion::color::Green),
            termion::color::Fg(termion::color::Reset),
            acq.format_significant(digits),
        );
    } else {
        eprintln!(
            "{}differ{}: expected {}, got {} (difference {})",
            termion::color::Fg(termion::color::Red),
            termion::color::Fg(termion::color::Reset),
            exp.format_significant(digits),
            acq.format_significant(digits),
            (exp - acq).format_significant(digits),
        );
        panic!()
    }
}

/// Parse a decimal literal.
pub fn d(s: &str) -> Decimal {
    s.parse().unwrap()
}

mod linear;

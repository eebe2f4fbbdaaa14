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
//! Closed-form success probability, as a sum over all connected failure subsets.
use std::fmt;

use itertools::Itertools;

use crate::Decimal;

/// One connected failure subset: `successes` links work and `failures` links fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FormulaTerm {
    pub successes: usize,
    pub failures: usize,
}

/// Sum of `(c) * p^a * (1-p)^b` terms, one per failure subset that keeps the endpoints connected,
/// in enumeration order. The coefficient `c` is the probability of that exact failure pattern,
/// which only depends on the number of failed links.
#[derive(Clone, Debug)]
pub struct SuccessFormula {
    terms: Vec<FormulaTerm>,
    /// exact coefficient, indexed by the number of failed links
    coefficients: Vec<Decimal>,
    digits: usize,
}

impl SuccessFormula {
    pub(crate) fn new(terms: Vec<FormulaTerm>, coefficients: Vec<Decimal>, digits: usize) -> Self {
        debug_assert!(terms.iter().all(|t| t.failures < coefficients.len()));
        Self {
            terms,
            coefficients,
            digits,
        }
    }

    pub fn terms(&self) -> &[FormulaTerm] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Exact coefficient of the given term.
    pub fn coefficient(&self, term: &FormulaTerm) -> &Decimal {
        &self.coefficients[term.failures]
    }

    /// Exact sum of all coefficients, i.e., the success probability.
    pub fn evaluate(&self) -> Decimal {
        self.terms.iter().map(|t| self.coefficient(t)).sum()
    }

    /// Render the formula with coefficients rounded to `digits` significant digits, trailing
    /// zeros stripped. The rounded string need not sum to the exact success probability; use
    /// [`SuccessFormula::evaluate`] for that.
    pub fn render(&self, digits: usize) -> String {
        if self.terms.is_empty() {
            return "0".to_string();
        }
        // only as many distinct coefficients as there are failure counts
        let rendered = self
            .coefficients
            .iter()
            .map(|c| c.format_significant(digits))
            .collect_vec();
        self.terms
            .iter()
            .map(|t| {
                format!(
                    "({}) * p^{} * (1-p)^{}",
                    rendered[t.failures], t.successes, t.failures
                )
            })
            .join(" + ")
    }
}

impl fmt::Display for SuccessFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(self.digits))
    }
}

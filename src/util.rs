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
//! Utility module collection of functions

use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{Decimal, DecimalError};

/// Logging configuration, relative to the working directory.
pub const LOG_CONFIG: &str = "log4rs.yml";

/// Initialize logging from `log4rs.yml`, or from `RUST_LOG` if that file does not exist.
pub fn init_logging() {
    if Path::new(LOG_CONFIG).exists() {
        match log4rs::init_file(LOG_CONFIG, Default::default()) {
            Ok(()) => return,
            Err(e) => eprintln!("Cannot initialize logging from {LOG_CONFIG}: {e}"),
        }
    }
    let _ = pretty_env_logger::try_init();
}

lazy_static! {
    static ref POWER_OF_TEN: Regex = Regex::new(
        r"^\s*(?:(?P<coef>[0-9]*\.?[0-9]+)\s*\*\s*)?10\s*(?:\^|\*\*)\s*(?P<exp>[+-]?[0-9]+)\s*$"
    )
    .unwrap();
}

/// Parse a bit error rate, written either as a decimal literal (`0.0000000001`, `1e-10`) or as a
/// power of ten (`10^-10`, `10**-10`, `2.5*10^-9`). Both forms share the exponent limit of
/// [`netrel_utils::MAX_PARSE_EXPONENT`].
pub fn parse_bit_error_rate(s: &str) -> Result<Decimal, DecimalError> {
    match POWER_OF_TEN.captures(s) {
        Some(captures) => {
            let coef = captures.name("coef").map_or("1", |c| c.as_str());
            format!("{coef}e{}", &captures["exp"])
                .parse()
                .map_err(|_| DecimalError::Parse(s.to_string()))
        }
        None => s.parse(),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn bit_error_rate_literals() {
        let expected = Decimal::pow10(-10);
        for s in ["10^-10", "10**-10", " 10 ^ -10 ", "1e-10", "0.0000000001", "1*10^-10"] {
            assert_eq!(parse_bit_error_rate(s).unwrap(), expected, "{s}");
        }
        assert_eq!(
            parse_bit_error_rate("2.5*10^-9").unwrap(),
            "0.0000000025".parse().unwrap()
        );
        assert_eq!(parse_bit_error_rate("10^2").unwrap(), Decimal::from(100u32));
        assert!(parse_bit_error_rate("10^").is_err());
        assert!(parse_bit_error_rate("ten").is_err());
        assert!(parse_bit_error_rate("10^-99999999999").is_err());
    }

    #[test]
    fn bit_error_rate_exponent_limits() {
        assert_eq!(
            parse_bit_error_rate("10^-1000").unwrap(),
            Decimal::pow10(-1000)
        );
        for s in [
            "10^-1001",
            "10^-4000000000",
            "10^2000000000",
            "10**-9223372036854775808",
            "2.5*10^-1000",
            "1e-9223372036854775808",
            "1e-4000000000",
        ] {
            assert_eq!(
                parse_bit_error_rate(s),
                Err(DecimalError::Parse(s.to_string())),
                "{s}"
            );
        }
    }
}

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
//! Configuration of the analysis and of the driver.
use std::{fs, path::Path};

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

use crate::{architectures::Architecture, Decimal};

/// Packets are assumed to be sent every 10ms.
pub const DEFAULT_PACKETS_PER_SECOND: u64 = 100;
/// Routes longer than this are rejected, as they need at least 2^24 reachability checks.
pub const DEFAULT_MAX_LINKS: usize = 24;
/// Significant digits used when rendering results and formula coefficients.
pub const DEFAULT_DISPLAY_DIGITS: usize = 28;
/// Significant digits of the mean time between losses.
pub const DEFAULT_DIVISION_DIGITS: usize = 50;

const SECONDS_PER_HOUR: u64 = 3600;

/// Error thrown when a configuration file cannot be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, ConfigError> {
    let path = path.as_ref();
    log::debug!("Loading configuration from {path:?}");
    Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
}

/// Parameters of the reliability analysis that are not part of the network itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Transmission cadence used to translate the loss rate into a mean time between losses.
    pub packets_per_second: u64,
    /// Maximum number of links of a route. `None` disables the check.
    pub max_links: Option<usize>,
    /// Significant digits used in the rendered results and formula.
    pub display_digits: usize,
    /// Significant digits of the mean time between losses.
    pub division_digits: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            packets_per_second: DEFAULT_PACKETS_PER_SECOND,
            max_links: Some(DEFAULT_MAX_LINKS),
            display_digits: DEFAULT_DISPLAY_DIGITS,
            division_digits: DEFAULT_DIVISION_DIGITS,
        }
    }
}

impl AnalyzerConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        load_json(path)
    }

    /// Number of packets sent per hour.
    pub fn packets_per_hour(&self) -> Decimal {
        &Decimal::from(self.packets_per_second) * &Decimal::from(SECONDS_PER_HOUR)
    }
}

/// Description of a full run of the driver: which architectures to evaluate at which bit error
/// rates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    pub bit_error_rates: Vec<Decimal>,
    pub packet_size_bits: u32,
    pub architectures: Vec<Architecture>,
    /// Also compute the success formula for every result.
    pub formula: bool,
    pub analyzer: AnalyzerConfig,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            bit_error_rates: vec![Decimal::pow10(-10), Decimal::pow10(-12)],
            packet_size_bits: 3200,
            architectures: Architecture::study().to_vec(),
            formula: false,
            analyzer: AnalyzerConfig::default(),
        }
    }
}

impl DriverConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        load_json(path)
    }
}

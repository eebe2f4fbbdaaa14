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
use std::{
    fs,
    path::{Path, PathBuf},
    time::Instant,
};

use anyhow::Context;
use clap::Parser;
use itertools::{iproduct, Itertools};
use rayon::prelude::*;

use netrel::{
    analyzer::{Analyzer, ReliabilityResult},
    architectures::Architecture,
    config::{AnalyzerConfig, DriverConfig},
    records::ReliabilityRecord,
    topology::Topology,
    util::{self, parse_bit_error_rate},
    Decimal,
};
use netrel_utils::other::get_timestamp;

#[derive(Parser, Debug)]
#[command(about, long_about = None)]
struct Args {
    /// Bit error rate to evaluate, e.g. `1e-10` or `10^-10`. Can be given multiple times.
    #[arg(short, long = "ber", value_parser = parse_bit_error_rate)]
    bers: Vec<Decimal>,
    /// Packet size in bits.
    #[arg(short, long = "packet-size")]
    packet_size: Option<u32>,
    /// Architecture to evaluate. Can be given multiple times.
    #[arg(short, long = "architecture")]
    architectures: Vec<Architecture>,
    /// Also compute and print the success formula.
    #[arg(short, long)]
    formula: bool,
    /// Write all results to this CSV file. If the path is a directory, a timestamped file is
    /// created inside it.
    #[arg(long)]
    csv: Option<PathBuf>,
    /// Write all results to this JSON file.
    #[arg(long)]
    json: Option<PathBuf>,
    /// Analyzer configuration (JSON).
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Complete run description (JSON). Command line arguments take precedence.
    #[arg(long)]
    run: Option<PathBuf>,
    /// Number of significant digits in the printed results.
    #[arg(short, long)]
    digits: Option<usize>,
}

impl Args {
    /// Merge the command line arguments into the run description.
    fn driver_config(&self) -> anyhow::Result<DriverConfig> {
        let mut driver = match &self.run {
            Some(path) => DriverConfig::from_file(path)
                .with_context(|| format!("Cannot read run description {}", path.display()))?,
            None => DriverConfig::default(),
        };
        if let Some(path) = &self.config {
            driver.analyzer = AnalyzerConfig::from_file(path)
                .with_context(|| format!("Cannot read analyzer config {}", path.display()))?;
        }
        if !self.bers.is_empty() {
            driver.bit_error_rates = self.bers.clone();
        }
        if !self.architectures.is_empty() {
            driver.architectures = self.architectures.clone();
        }
        if let Some(packet_size) = self.packet_size {
            driver.packet_size_bits = packet_size;
        }
        if let Some(digits) = self.digits {
            driver.analyzer.display_digits = digits;
        }
        driver.formula |= self.formula;
        Ok(driver)
    }
}

fn main() -> anyhow::Result<()> {
    util::init_logging();
    let args = Args::parse();
    let driver = args.driver_config()?;
    let digits = driver.analyzer.display_digits;

    let start = Instant::now();
    let results: Vec<(Architecture, Decimal, ReliabilityResult)> =
        iproduct!(driver.architectures.iter(), driver.bit_error_rates.iter())
            .collect_vec()
            .into_par_iter()
            .map(|(arch, ber)| -> anyhow::Result<_> {
                let topo = Topology::Architecture(*arch);
                let (source, destination) = topo
                    .default_endpoints()
                    .with_context(|| format!("{} has no endpoints", topo.fmt()))?;
                let analyzer =
                    Analyzer::new(topo.build_route(), source, destination, driver.analyzer.clone())?;
                log::debug!(
                    "[{arch}] {} -> {} over {} links",
                    analyzer.source(),
                    analyzer.destination(),
                    analyzer.route().len()
                );
                let result = if driver.formula {
                    analyzer.analyze_with_formula(ber, driver.packet_size_bits)?
                } else {
                    analyzer.analyze(ber, driver.packet_size_bits)?
                };
                log::debug!("[{arch}] BER {ber}: {result}");
                Ok((*arch, ber.clone(), result))
            })
            .collect::<anyhow::Result<_>>()?;
    log::info!(
        "Evaluated {} scenarios in {:?}",
        results.len(),
        start.elapsed()
    );

    for (arch, ber, result) in results.iter() {
        println!("Results for {arch} - BER: {}:", ber.to_scientific(digits));
        println!(
            " Total Success Probability: {}",
            result.total_success_probability.format_significant(digits)
        );
        println!(
            " Packet Loss Rate: {}",
            result.packet_loss_rate.format_significant(digits)
        );
        match &result.average_time_between_losses_hours {
            Some(hours) => println!(
                " Average Time Between Losses (hours): {}",
                hours.format_significant(digits)
            ),
            None => println!(" Average Time Between Losses (hours): never"),
        }
        if let Some(formula) = &result.success_formula {
            println!(" Success Formula: {}", formula.render(digits));
        }
        println!();
    }

    let records = results
        .iter()
        .map(|(arch, ber, result)| {
            ReliabilityRecord::new(arch, ber, driver.packet_size_bits, result, digits)
        })
        .collect_vec();

    if let Some(path) = &args.csv {
        let path = csv_file_name(path);
        let mut csv = csv::WriterBuilder::new()
            .has_headers(true)
            .delimiter(b';')
            .from_path(&path)
            .with_context(|| format!("Cannot create {}", path.display()))?;
        for record in records.iter() {
            csv.serialize(record)?;
        }
        csv.flush()?;
        log::info!("Written {} records to {}", records.len(), path.display());
    }

    if let Some(path) = &args.json {
        fs::write(path, serde_json::to_string_pretty(&records)?)
            .with_context(|| format!("Cannot write {}", path.display()))?;
        log::info!("Written {} records to {}", records.len(), path.display());
    }

    Ok(())
}

fn csv_file_name(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.join(format!("reliability_{}.csv", get_timestamp()))
    } else {
        path.to_path_buf()
    }
}

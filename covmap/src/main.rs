mod options;

use anyhow::{bail, Error as AnyError};
use clap::Parser;
use coverage::{
    rsrp::{Propagation, Transmitter},
    CoverageStatistics, QualityTier, SampleGrid, Simulation, Summary, DEFAULT_RSRP_THRESHOLDS,
};
use log::{info, warn};
use options::{Cli, Command as CliCmd};
use serde::Serialize;
use std::io::Write;
use textplots::{Chart, Plot, Shape};

fn main() -> Result<(), AnyError> {
    let Cli {
        site,
        tx_power,
        gain,
        frequency,
        environment,
        x_min,
        x_max,
        y_min,
        y_max,
        step,
        thresholds,
        cmd,
    } = Cli::parse();

    env_logger::init();

    let transmitter = Transmitter::builder()
        .position(site.0)
        .tx_power(tx_power)
        .antenna_gain(gain)
        .frequency(frequency)
        .environment(environment)
        .build()?;

    if let CliCmd::Probe { distance } = cmd {
        print_probe(&transmitter, distance);
        return Ok(());
    }

    if frequency <= 0.0 {
        bail!("frequency must be positive, got {frequency} MHz");
    }
    if x_min > x_max || y_min > y_max {
        bail!("area minimum exceeds maximum: x [{x_min}, {x_max}], y [{y_min}, {y_max}]");
    }

    let grid = SampleGrid::new(x_min, x_max, y_min, y_max, step)?;
    if grid.is_degenerate() {
        warn!(
            "area collapsed to {} x {} samples, simulating a line or point",
            grid.shape().0,
            grid.shape().1
        );
    }

    let thresholds = if thresholds.is_empty() {
        DEFAULT_RSRP_THRESHOLDS.to_vec()
    } else {
        thresholds
    };

    let simulation = Simulation::run(&transmitter, grid, &thresholds);
    info!(
        "simulated {} samples, {} valid",
        simulation.statistics.total_points, simulation.statistics.valid_points
    );

    match cmd {
        CliCmd::Report => print_report(&simulation)?,
        CliCmd::Csv => print_csv(&simulation)?,
        CliCmd::Json => print_json(&simulation)?,
        CliCmd::Plot => plot_ascii(&simulation.statistics),
        CliCmd::Probe { .. } => unreachable!("handled above"),
    };
    Ok(())
}

fn print_probe(transmitter: &Transmitter, distance_m: f64) {
    let dbm = transmitter.received_power_dbm(distance_m);
    println!(
        "{distance_m} m: {dbm:.2} dBm ({})",
        QualityTier::classify(dbm)
    );
}

fn print_report(
    Simulation {
        transmitter,
        grid,
        statistics,
        ..
    }: &Simulation,
) -> Result<(), AnyError> {
    let mut stdout = std::io::stdout().lock();
    let (rows, cols) = grid.shape();
    writeln!(
        stdout,
        "site: ({}, {}) m, EIRP {:.1} dBm, {} MHz, {}",
        transmitter.position.x,
        transmitter.position.y,
        transmitter.eirp_dbm(),
        transmitter.frequency_mhz,
        transmitter.environment,
    )?;
    writeln!(
        stdout,
        "area: {cols} x {rows} samples, step {} m, ~{:.0} m²",
        grid.step(),
        grid.area_m2()
    )?;

    let Some(Summary {
        max_dbm,
        min_dbm,
        mean_dbm,
        median_dbm,
    }) = statistics.summary
    else {
        writeln!(stdout, "no valid data")?;
        return Ok(());
    };
    writeln!(stdout, "max:    {max_dbm:8.1} dBm")?;
    writeln!(stdout, "min:    {min_dbm:8.1} dBm")?;
    writeln!(stdout, "mean:   {mean_dbm:8.1} dBm")?;
    writeln!(stdout, "median: {median_dbm:8.1} dBm")?;

    writeln!(stdout)?;
    writeln!(stdout, "{:<10} {:>16} {:>8} {:>8}", "tier", "RSRP (dBm)", "share", "points")?;
    let mut upper = None;
    for share in &statistics.tiers {
        let lower = share.tier.lower_bound_dbm();
        let range = match (lower, upper) {
            (Some(lo), None) => format!(">= {lo}"),
            (Some(lo), Some(hi)) => format!("[{lo}, {hi})"),
            (None, Some(hi)) => format!("< {hi}"),
            (None, None) => String::from("any"),
        };
        writeln!(
            stdout,
            "{:<10} {range:>16} {:>7.1}% {:>8}",
            share.tier.label(),
            share.percentage,
            share.count
        )?;
        upper = lower;
    }

    writeln!(stdout)?;
    for crossing in &statistics.thresholds {
        writeln!(
            stdout,
            "P(RSRP <= {} dBm) = {:.0}%{}",
            crossing.threshold_dbm,
            crossing.probability * 100.0,
            if crossing.within_range {
                ""
            } else {
                " (outside observed range)"
            }
        )?;
    }
    Ok(())
}

/// # Example with gnuplot
///
/// ```sh
/// cargo run -- --step=5 csv | tail -n +2 | tr ',' ' ' > ~/.tmp/cov \
///     && gnuplot -p -e "plot '~/.tmp/cov' using 1:2:3 with image"
/// ```
fn print_csv(Simulation { grid, field, .. }: &Simulation) -> Result<(), AnyError> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "X,Y,RSRP")?;
    for (coord, dbm) in grid.coords().zip(field.values()) {
        writeln!(stdout, "{},{},{dbm}", coord.x, coord.y)?;
    }
    Ok(())
}

fn print_json(
    Simulation {
        transmitter,
        grid,
        statistics,
        ..
    }: &Simulation,
) -> Result<(), AnyError> {
    #[derive(Serialize)]
    struct JsonReport<'a> {
        transmitter: &'a Transmitter,
        rows: usize,
        cols: usize,
        step_m: f64,
        area_m2: f64,
        statistics: &'a CoverageStatistics,
    }

    let (rows, cols) = grid.shape();
    let report = JsonReport {
        transmitter,
        rows,
        cols,
        step_m: grid.step(),
        area_m2: grid.area_m2(),
        statistics,
    };
    let json = serde_json::to_string(&report)?;
    println!("{json}");
    Ok(())
}

#[allow(clippy::cast_possible_truncation)]
fn plot_ascii(statistics: &CoverageStatistics) {
    let (Some(first), Some(last)) = (statistics.cdf.first(), statistics.cdf.last()) else {
        warn!("no valid data to plot");
        return;
    };
    let plot_data: Vec<(f32, f32)> = statistics
        .cdf
        .iter()
        .map(|point| (point.value_dbm as f32, point.probability as f32))
        .collect();
    let (xmin, xmax) = {
        let (lo, hi) = (first.value_dbm as f32, last.value_dbm as f32);
        let pad = if hi > lo { (hi - lo) * 0.05 } else { 1.0 };
        (lo - pad, hi + pad)
    };
    Chart::new(180, 60, xmin, xmax)
        .lineplot(&Shape::Lines(&plot_data))
        .display();
    for crossing in statistics.thresholds.iter().filter(|c| c.within_range) {
        println!(
            "{} dBm: {:.0}%",
            crossing.threshold_dbm,
            crossing.probability * 100.0
        );
    }
}

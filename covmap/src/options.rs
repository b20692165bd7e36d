use anyhow::{anyhow, Error as AnyError};
use clap::{Parser, Subcommand};
use coverage::rsrp::{geo::Coord, Environment};
use std::str::FromStr;

/// Estimate received power (RSRP) around a single transmitter.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Transmitter location "x,y" in meters.
    #[arg(long, default_value = "0,0", allow_hyphen_values = true)]
    pub site: XY,

    /// Transmitter output power (dBm).
    #[arg(short = 'p', long, default_value_t = 40.0, allow_negative_numbers = true)]
    pub tx_power: f64,

    /// Transmit antenna gain (dBi).
    #[arg(short, long, default_value_t = 17.0, allow_negative_numbers = true)]
    pub gain: f64,

    /// Carrier frequency (MHz).
    #[arg(short, long, default_value_t = 2600.0, allow_negative_numbers = true)]
    pub frequency: f64,

    /// One of urban_dense, urban_macro, suburban, rural_macro.
    #[arg(short, long, default_value_t = Environment::UrbanDense)]
    pub environment: Environment,

    /// Western edge of the simulated area (meters).
    #[arg(long, default_value_t = -500.0, allow_negative_numbers = true)]
    pub x_min: f64,

    /// Eastern edge of the simulated area (meters).
    #[arg(long, default_value_t = 500.0, allow_negative_numbers = true)]
    pub x_max: f64,

    /// Southern edge of the simulated area (meters).
    #[arg(long, default_value_t = -500.0, allow_negative_numbers = true)]
    pub y_min: f64,

    /// Northern edge of the simulated area (meters).
    #[arg(long, default_value_t = 500.0, allow_negative_numbers = true)]
    pub y_max: f64,

    /// Distance between samples (meters).
    #[arg(short, long, default_value_t = 10.0, allow_negative_numbers = true)]
    pub step: f64,

    /// RSRP level (dBm) to report P(RSRP <= level) for. May be
    /// repeated; defaults to -115, -105, -95 and -80.
    #[arg(short, long = "threshold", allow_negative_numbers = true)]
    pub thresholds: Vec<f64>,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Clone, Debug, Copy)]
pub struct XY(pub Coord<f64>);

impl FromStr for XY {
    type Err = AnyError;
    fn from_str(s: &str) -> Result<Self, AnyError> {
        let (x_str, y_str) = s
            .split_once(',')
            .ok_or_else(|| anyhow!("not a valid x,y pair"))?;
        let x = f64::from_str(x_str.trim())?;
        let y = f64::from_str(y_str.trim())?;
        Ok(Self(Coord { x, y }))
    }
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Print a coverage summary.
    Report,

    /// Print x, y and RSRP of every sample to stdout.
    Csv,

    /// Print coverage statistics to stdout as JSON.
    Json,

    /// Plot the RSRP CDF to terminal.
    Plot,

    /// Print received power at a single distance from the site.
    Probe {
        /// Distance from the site (meters).
        #[arg(short, long, allow_negative_numbers = true)]
        distance: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command, XY};
    use clap::Parser;
    use coverage::rsrp::Environment;

    #[test]
    fn test_xy() {
        let XY(coord) = "-120.5, 40".parse().unwrap();
        assert_eq!((-120.5, 40.0), (coord.x, coord.y));
        assert!("12".parse::<XY>().is_err());
        assert!("a,b".parse::<XY>().is_err());
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["covmap", "report"]).unwrap();
        assert_eq!((0.0, 0.0), (cli.site.0.x, cli.site.0.y));
        assert_eq!(40.0, cli.tx_power);
        assert_eq!(17.0, cli.gain);
        assert_eq!(2600.0, cli.frequency);
        assert_eq!(Environment::UrbanDense, cli.environment);
        assert_eq!((-500.0, 500.0), (cli.x_min, cli.x_max));
        assert_eq!(10.0, cli.step);
        assert!(cli.thresholds.is_empty());
        assert!(matches!(cli.cmd, Command::Report));
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "covmap",
            "--site=-100,50",
            "--environment",
            "rural_macro",
            "--x-min",
            "-2000",
            "-t",
            "-100",
            "-t",
            "-90",
            "probe",
            "--distance",
            "750",
        ])
        .unwrap();
        assert_eq!((-100.0, 50.0), (cli.site.0.x, cli.site.0.y));
        assert_eq!(Environment::RuralMacro, cli.environment);
        assert_eq!(-2000.0, cli.x_min);
        assert_eq!(vec![-100.0, -90.0], cli.thresholds);
        assert!(matches!(cli.cmd, Command::Probe { distance } if distance == 750.0));
        assert!(Cli::try_parse_from(["covmap", "-e", "downtown", "report"]).is_err());
    }
}

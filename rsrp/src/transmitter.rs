use crate::{power_at, Environment, Propagation, RsrpError};
use geo::Coord;

/// A single transmitter site.
///
/// Immutable for the lifetime of a simulation run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transmitter {
    /// Site location on the simulation plane (meters).
    pub position: Coord<f64>,

    /// Transmitter output power (dBm).
    pub tx_power_dbm: f64,

    /// Transmit antenna gain (dBi).
    pub antenna_gain_dbi: f64,

    /// Carrier frequency (MHz).
    pub frequency_mhz: f64,

    pub environment: Environment,
}

impl Transmitter {
    pub fn builder() -> TransmitterBuilder {
        TransmitterBuilder {
            position: Coord { x: 0.0, y: 0.0 },
            tx_power_dbm: 40.0,
            antenna_gain_dbi: 17.0,
            frequency_mhz: 2600.0,
            environment: Environment::default(),
        }
    }

    /// Equivalent isotropically radiated power (dBm).
    pub fn eirp_dbm(&self) -> f64 {
        self.tx_power_dbm + self.antenna_gain_dbi
    }
}

impl Default for Transmitter {
    fn default() -> Self {
        let TransmitterBuilder {
            position,
            tx_power_dbm,
            antenna_gain_dbi,
            frequency_mhz,
            environment,
        } = Self::builder();
        Self {
            position,
            tx_power_dbm,
            antenna_gain_dbi,
            frequency_mhz,
            environment,
        }
    }
}

impl Propagation for Transmitter {
    fn received_power_dbm(&self, distance_m: f64) -> f64 {
        power_at(
            distance_m,
            self.tx_power_dbm,
            self.frequency_mhz,
            self.antenna_gain_dbi,
            self.environment,
        )
    }
}

pub struct TransmitterBuilder {
    /// Site location (meters, defaults to the origin).
    position: Coord<f64>,

    /// Output power (dBm, defaults to 40).
    tx_power_dbm: f64,

    /// Antenna gain (dBi, defaults to 17).
    antenna_gain_dbi: f64,

    /// Carrier frequency (MHz, defaults to 2600).
    frequency_mhz: f64,

    /// Defaults to [`Environment::UrbanDense`].
    environment: Environment,
}

impl TransmitterBuilder {
    /// Site location (meters, defaults to the origin).
    #[must_use]
    pub fn position(mut self, coord: Coord<f64>) -> Self {
        self.position = coord;
        self
    }

    /// Output power (dBm, defaults to 40).
    #[must_use]
    pub fn tx_power(mut self, dbm: f64) -> Self {
        self.tx_power_dbm = dbm;
        self
    }

    /// Antenna gain (dBi, defaults to 17).
    #[must_use]
    pub fn antenna_gain(mut self, dbi: f64) -> Self {
        self.antenna_gain_dbi = dbi;
        self
    }

    /// Carrier frequency (MHz, defaults to 2600).
    ///
    /// Non-positive values are accepted; every sample then evaluates
    /// to the invalid-frequency sentinel.
    #[must_use]
    pub fn frequency(mut self, mhz: f64) -> Self {
        self.frequency_mhz = mhz;
        self
    }

    #[must_use]
    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Returns the transmitter, rejecting NaN or infinite parameters.
    pub fn build(&self) -> Result<Transmitter, RsrpError> {
        let finite = |name: &'static str, val: f64| {
            if val.is_finite() {
                Ok(val)
            } else {
                Err(RsrpError::Builder(name))
            }
        };
        Ok(Transmitter {
            position: Coord {
                x: finite("position", self.position.x)?,
                y: finite("position", self.position.y)?,
            },
            tx_power_dbm: finite("tx_power", self.tx_power_dbm)?,
            antenna_gain_dbi: finite("antenna_gain", self.antenna_gain_dbi)?,
            frequency_mhz: finite("frequency", self.frequency_mhz)?,
            environment: self.environment,
        })
    }
}

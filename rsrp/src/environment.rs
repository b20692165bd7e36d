use crate::RsrpError;
use std::{fmt, str::FromStr};

/// Propagation environment category.
///
/// Each category adds clutter loss on top of free space. Denser
/// environments attenuate more and fall off faster with range.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Environment {
    #[default]
    UrbanDense,
    UrbanMacro,
    Suburban,
    RuralMacro,
}

impl Environment {
    /// All categories, densest first.
    pub const ALL: [Environment; 4] = [
        Environment::UrbanDense,
        Environment::UrbanMacro,
        Environment::Suburban,
        Environment::RuralMacro,
    ];

    /// Fixed clutter loss (dB).
    pub const fn base_clutter_db(self) -> f64 {
        match self {
            Self::UrbanDense => 20.0,
            Self::UrbanMacro => 15.0,
            Self::Suburban => 10.0,
            Self::RuralMacro => 3.0,
        }
    }

    /// Coefficient applied to `log10(distance_km)`.
    pub const fn exponent_coeff(self) -> f64 {
        match self {
            Self::UrbanDense => 18.0,
            Self::UrbanMacro => 12.0,
            Self::Suburban => 8.0,
            Self::RuralMacro => 5.0,
        }
    }

    /// Frequency dependent clutter slope, in dB per GHz per decade of
    /// distance. Zero for the open environments.
    pub const fn clutter_slope(self) -> f64 {
        match self {
            Self::UrbanDense => 0.1,
            Self::UrbanMacro => 0.05,
            Self::Suburban | Self::RuralMacro => 0.0,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::UrbanDense => "urban_dense",
            Self::UrbanMacro => "urban_macro",
            Self::Suburban => "suburban",
            Self::RuralMacro => "rural_macro",
        }
    }

    /// Returns the loss, in dB, this environment adds to free space
    /// at `distance_m` meters.
    ///
    /// Never negative: clutter can only make a link worse than free
    /// space.
    ///
    /// # Parameters
    ///
    /// - `distance_m`: distance from the transmitter (meters, > 0)
    /// - `frequency_mhz`: carrier frequency (MHz, > 0)
    pub fn additional_loss_db(self, distance_m: f64, frequency_mhz: f64) -> f64 {
        let frequency_ghz = frequency_mhz / 1000.0;
        let distance_km = {
            let km = distance_m / 1000.0;
            if km == 0.0 {
                1e-6
            } else {
                km
            }
        };
        let clutter = self.base_clutter_db()
            + self.clutter_slope() * frequency_ghz * (distance_m + 1.0).log10();
        let exponent_term = self.exponent_coeff() * distance_km.max(0.001).log10();
        (clutter + exponent_term).max(0.0)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Environment {
    type Err = RsrpError;

    fn from_str(s: &str) -> Result<Self, RsrpError> {
        Self::ALL
            .into_iter()
            .find(|env| env.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| RsrpError::UnknownEnvironment(s.to_owned()))
    }
}

use crate::{Environment, BEHIND_TRANSMITTER_LOSS_DB, INVALID_FREQUENCY_LOSS_DB};

/// Combines `20·log10(4π/c)` with the meter/MHz unit conversions.
const FSPL_CONST_DB: f64 = 27.55;

/// Something which can tell received power at a given range.
///
/// Implementors must be pure: the same distance always yields the
/// same power, so fields may be evaluated in any order or in
/// parallel.
pub trait Propagation: Sync {
    /// Returns received power (dBm) `distance_m` meters away.
    fn received_power_dbm(&self, distance_m: f64) -> f64;
}

/// Returns free-space path loss in dB.
///
/// Only meaningful for positive `distance_m` and `frequency_mhz`.
pub fn fspl_db(distance_m: f64, frequency_mhz: f64) -> f64 {
    20.0 * distance_m.log10() + 20.0 * frequency_mhz.log10() - FSPL_CONST_DB
}

/// Returns estimated received power (dBm) at `distance_m` meters from
/// a transmitter.
///
/// Never fails. Inputs without a physical meaning map to sentinel
/// values far below any realistic result:
///
/// - `distance_m <= 0`: `tx_power_dbm - 200`
/// - `frequency_mhz <= 0`: `tx_power_dbm - 300`
///
/// # Parameters
///
/// - `distance_m`: range from the transmitter (meters)
/// - `tx_power_dbm`: transmitter output power (dBm)
/// - `frequency_mhz`: carrier frequency (MHz)
/// - `antenna_gain_dbi`: transmit antenna gain (dBi)
/// - `environment`: see [`Environment`]
pub fn power_at(
    distance_m: f64,
    tx_power_dbm: f64,
    frequency_mhz: f64,
    antenna_gain_dbi: f64,
    environment: Environment,
) -> f64 {
    if distance_m <= 0.0 {
        return tx_power_dbm - BEHIND_TRANSMITTER_LOSS_DB;
    }
    if frequency_mhz <= 0.0 {
        return tx_power_dbm - INVALID_FREQUENCY_LOSS_DB;
    }
    let path_loss_db = fspl_db(distance_m, frequency_mhz)
        + environment.additional_loss_db(distance_m, frequency_mhz);
    let eirp_dbm = tx_power_dbm + antenna_gain_dbi;
    eirp_dbm - path_loss_db
}

//! # Received Power Estimation
//!
//! `rsrp` provides a small empirical propagation model: free-space
//! path loss plus an environment dependent clutter term, evaluated
//! for a single transmitter.

mod environment;
mod error;
pub mod model;
mod transmitter;

pub use {
    crate::{
        environment::Environment,
        error::RsrpError,
        model::{fspl_db, power_at, Propagation},
        transmitter::{Transmitter, TransmitterBuilder},
    },
    geo,
};

/// Loss applied to samples at (or behind) the transmitter, in dB.
pub const BEHIND_TRANSMITTER_LOSS_DB: f64 = 200.0;

/// Loss applied to every sample when the frequency is not positive,
/// in dB.
pub const INVALID_FREQUENCY_LOSS_DB: f64 = 300.0;

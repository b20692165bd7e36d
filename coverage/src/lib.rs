//! # Coverage
//!
//! Sample a rectangular area around a transmitter, evaluate received
//! power at every sample, and summarize the result.

mod error;
mod field;
mod grid;
mod math;
mod raster;
mod run;
pub mod stats;

pub use {
    crate::{
        error::CoverageError,
        field::{evaluate, evaluate_field, SignalField},
        grid::{build_grid, SampleGrid},
        raster::Raster,
        run::{LastRun, Simulation},
        stats::{
            summarize, summarize_with, CdfPoint, CoverageStatistics, QualityTier, Summary,
            ThresholdCrossing, TierShare, DEFAULT_RSRP_THRESHOLDS,
        },
    },
    rsrp,
};

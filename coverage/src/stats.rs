//! Coverage statistics.
//!
//! Everything here works on the finite samples of a field only.
//! Sentinel values produced by the propagation model are finite and
//! are counted (as [`QualityTier::Poor`]); NaN and infinities are
//! skipped.

#![allow(clippy::cast_precision_loss)]

use crate::SignalField;
use log::debug;
use std::fmt;

/// RSRP levels (dBm) annotated on a coverage CDF by default.
pub const DEFAULT_RSRP_THRESHOLDS: [f64; 4] = [-115.0, -105.0, -95.0, -80.0];

/// Signal quality bucket for an RSRP value.
///
/// Lower bounds are inclusive.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum QualityTier {
    /// ≥ -80 dBm
    Excellent,
    /// [-95, -80) dBm
    Good,
    /// [-105, -95) dBm
    Fair,
    /// [-115, -105) dBm
    Marginal,
    /// < -115 dBm
    Poor,
}

impl QualityTier {
    /// All tiers, best first.
    pub const ALL: [QualityTier; 5] = [
        QualityTier::Excellent,
        QualityTier::Good,
        QualityTier::Fair,
        QualityTier::Marginal,
        QualityTier::Poor,
    ];

    pub fn classify(dbm: f64) -> Self {
        Self::ALL
            .into_iter()
            .find(|tier| tier.lower_bound_dbm().map_or(true, |lower| dbm >= lower))
            .unwrap_or(Self::Poor)
    }

    /// Inclusive lower bound, `None` for the open-ended bottom tier.
    pub const fn lower_bound_dbm(self) -> Option<f64> {
        match self {
            Self::Excellent => Some(-80.0),
            Self::Good => Some(-95.0),
            Self::Fair => Some(-105.0),
            Self::Marginal => Some(-115.0),
            Self::Poor => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Marginal => "marginal",
            Self::Poor => "poor",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Extrema and central values of the finite samples.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub max_dbm: f64,
    pub min_dbm: f64,
    pub mean_dbm: f64,
    pub median_dbm: f64,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierShare {
    pub tier: QualityTier,
    pub count: usize,
    /// Share of finite samples, 0 to 100.
    pub percentage: f64,
}

/// One step of the empirical CDF.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CdfPoint {
    pub value_dbm: f64,
    pub probability: f64,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdCrossing {
    pub threshold_dbm: f64,
    /// Fraction of finite samples at or below `threshold_dbm`.
    pub probability: f64,
    /// `min < threshold < max`, i.e. the threshold actually splits the
    /// observed samples.
    pub within_range: bool,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageStatistics {
    /// Every sample in the field, finite or not.
    pub total_points: usize,

    pub valid_points: usize,

    /// `None` when the field holds no finite samples.
    pub summary: Option<Summary>,

    /// One entry per [`QualityTier`], best first.
    pub tiers: Vec<TierShare>,

    /// Finite samples in ascending order with their cumulative
    /// probability.
    pub cdf: Vec<CdfPoint>,

    pub thresholds: Vec<ThresholdCrossing>,
}

impl CoverageStatistics {
    pub fn has_data(&self) -> bool {
        self.summary.is_some()
    }

    pub fn tier(&self, tier: QualityTier) -> &TierShare {
        &self.tiers[tier.index()]
    }
}

/// Summarizes `field` against [`DEFAULT_RSRP_THRESHOLDS`].
pub fn summarize(field: &SignalField) -> CoverageStatistics {
    summarize_with(field.values(), &DEFAULT_RSRP_THRESHOLDS)
}

/// Summarizes raw `values` (dBm), reporting the share of samples at
/// or below each of `thresholds`.
pub fn summarize_with(values: &[f64], thresholds: &[f64]) -> CoverageStatistics {
    let now = std::time::Instant::now();

    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    sorted.sort_unstable_by(f64::total_cmp);
    let valid_points = sorted.len();

    let summary = summary(&sorted);

    let tiers = {
        let mut counts = [0_usize; QualityTier::ALL.len()];
        for &dbm in &sorted {
            counts[QualityTier::classify(dbm).index()] += 1;
        }
        let denom = valid_points.max(1) as f64;
        QualityTier::ALL
            .into_iter()
            .zip(counts)
            .map(|(tier, count)| TierShare {
                tier,
                count,
                        percentage: count as f64 / denom * 100.0,
            })
            .collect()
    };

    let cdf = {
        let denom = valid_points.saturating_sub(1).max(1) as f64;
        sorted
            .iter()
            .enumerate()
            .map(|(rank, &value_dbm)| CdfPoint {
                value_dbm,
                        probability: rank as f64 / denom,
            })
            .collect()
    };

    let thresholds = thresholds
        .iter()
        .map(|&threshold_dbm| {
            let at_or_below = sorted.partition_point(|&v| v <= threshold_dbm);
                let probability = if valid_points == 0 {
                0.0
            } else {
                at_or_below as f64 / valid_points as f64
            };
            let within_range = summary.map_or(false, |Summary { min_dbm, max_dbm, .. }| {
                min_dbm < threshold_dbm && threshold_dbm < max_dbm
            });
            ThresholdCrossing {
                threshold_dbm,
                probability,
                within_range,
            }
        })
        .collect();

    debug!(
        "stats; total: {}, valid: {valid_points}, exec: {:?}",
        values.len(),
        now.elapsed()
    );

    CoverageStatistics {
        total_points: values.len(),
        valid_points,
        summary,
        tiers,
        cdf,
        thresholds,
    }
}

/// `sorted` must be ascending and finite.
fn summary(sorted: &[f64]) -> Option<Summary> {
    let (&min_dbm, &max_dbm) = (sorted.first()?, sorted.last()?);
    let mean_dbm = sorted.iter().sum::<f64>() / sorted.len() as f64;
    let mid = sorted.len() / 2;
    let median_dbm = if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    };
    Some(Summary {
        max_dbm,
        min_dbm,
        mean_dbm,
        median_dbm,
    })
}

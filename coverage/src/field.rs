use crate::{Raster, SampleGrid};
use geo::{Coord, EuclideanDistance, Point};
use log::debug;
use rayon::prelude::*;
use rsrp::{Propagation, Transmitter};

/// Received power (dBm) at every sample of a [`SampleGrid`].
///
/// Same shape as the grid it was evaluated over: rows follow y,
/// columns follow x.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalField(Raster<f64>);

impl SignalField {
    pub fn raster(&self) -> &Raster<f64> {
        &self.0
    }

    pub fn shape(&self) -> (usize, usize) {
        self.0.shape()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.0.get(row, col).copied()
    }

    /// Flattened, row-major power values.
    pub fn values(&self) -> &[f64] {
        self.0.values()
    }

    /// Returns `(row, col, dbm)` of the strongest finite sample.
    pub fn argmax(&self) -> Option<(usize, usize, f64)> {
        self.0
            .indexed()
            .filter(|(_, dbm)| dbm.is_finite())
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|((row, col), dbm)| (row, col, *dbm))
    }
}

impl From<Raster<f64>> for SignalField {
    fn from(raster: Raster<f64>) -> Self {
        Self(raster)
    }
}

/// Evaluates `model` at every sample of `grid`, measuring range from
/// `site`.
///
/// Cells are independent of each other and are evaluated in
/// parallel.
pub fn evaluate_field<P: Propagation>(
    grid: &SampleGrid,
    site: Coord<f64>,
    model: &P,
) -> SignalField {
    let now = std::time::Instant::now();
    let (rows, cols) = grid.shape();
    let (xs, ys) = (grid.xs(), grid.ys());
    let site = Point::from(site);

    let values: Vec<f64> = (0..rows * cols)
        .into_par_iter()
        .map(|idx| {
            let sample = Point::new(xs[idx % cols], ys[idx / cols]);
            model.received_power_dbm(site.euclidean_distance(&sample))
        })
        .collect();

    debug!(
        "field; rows: {rows}, cols: {cols}, exec: {:?}",
        now.elapsed()
    );

    SignalField(Raster::from_vec(rows, cols, values))
}

/// Evaluates `transmitter` over `grid`.
pub fn evaluate(grid: &SampleGrid, transmitter: &Transmitter) -> SignalField {
    evaluate_field(grid, transmitter.position, transmitter)
}

#[cfg(test)]
mod tests {
    use super::{evaluate, evaluate_field, SignalField};
    use crate::{Raster, SampleGrid};
    use approx::assert_relative_eq;
    use geo::coord;
    use rsrp::{Propagation, Transmitter};

    /// Reports the distance itself, so tests can check geometry.
    struct Range;

    impl Propagation for Range {
        fn received_power_dbm(&self, distance_m: f64) -> f64 {
            distance_m
        }
    }

    #[test]
    fn test_distances_measured_from_site() {
        let grid = SampleGrid::new(0.0, 6.0, 0.0, 8.0, 2.0).unwrap();
        let field = evaluate_field(&grid, coord! { x: 0.0, y: 0.0 }, &Range);
        assert_eq!(grid.shape(), field.shape());
        assert_eq!(Some(0.0), field.get(0, 0));
        assert_eq!(Some(6.0), field.get(0, 3));
        assert_eq!(Some(8.0), field.get(4, 0));
        assert_relative_eq!(10.0, field.get(4, 3).unwrap());
    }

    #[test]
    fn test_single_cell() {
        let grid = SampleGrid::new(3.0, 3.0, 4.0, 4.0, 1.0).unwrap();
        let field = evaluate_field(&grid, coord! { x: 0.0, y: 0.0 }, &Range);
        assert_eq!((1, 1), field.shape());
        assert_relative_eq!(5.0, field.get(0, 0).unwrap());
    }

    #[test]
    fn test_site_on_a_sample_uses_sentinel() {
        let tx = Transmitter::builder()
            .position(coord! { x: 20.0, y: 10.0 })
            .build()
            .unwrap();
        let grid = SampleGrid::new(0.0, 40.0, 0.0, 20.0, 10.0).unwrap();
        let field = evaluate(&grid, &tx);
        assert_eq!(Some(tx.tx_power_dbm - 200.0), field.get(1, 2));
        assert!(field.values().iter().all(|dbm| dbm.is_finite()));
        assert_eq!(
            tx.received_power_dbm(10.0),
            field.get(1, 1).unwrap()
        );
    }

    #[test]
    fn test_argmax_skips_non_finite() {
        let field = SignalField::from(Raster::from_vec(
            2,
            2,
            vec![-90.0, f64::NAN, f64::INFINITY, -70.0],
        ));
        assert_eq!(Some((1, 1, -70.0)), field.argmax());
        let empty = SignalField::from(Raster::from_vec(1, 1, vec![f64::NAN]));
        assert_eq!(None, empty.argmax());
    }
}

use crate::{math::arange, CoverageError, Raster};
use geo::Coord;
use log::debug;

/// Rectangular lattice of sample locations (meters).
///
/// Axes are built like a half-open float range over
/// `[min, max + step)`, so the last sample may slightly overshoot
/// `max` when `step` doesn't divide the span evenly. An axis whose
/// `min >= max` collapses to the single value `min`.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleGrid {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
    step: f64,
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl SampleGrid {
    pub fn new(
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
        step: f64,
    ) -> Result<Self, CoverageError> {
        // Written so that NaN fails too.
        if !(step > 0.0 && step.is_finite()) {
            return Err(CoverageError::InvalidParameter {
                name: "step",
                value: step,
            });
        }
        for (name, value) in [
            ("x_min", x_min),
            ("x_max", x_max),
            ("y_min", y_min),
            ("y_max", y_max),
        ] {
            if !value.is_finite() {
                return Err(CoverageError::InvalidParameter { name, value });
            }
        }

        let now = std::time::Instant::now();
        let xs = axis(x_min, x_max, step);
        let ys = axis(y_min, y_max, step);
        debug!(
            "grid; cols: {}, rows: {}, exec: {:?}",
            xs.len(),
            ys.len(),
            now.elapsed()
        );

        Ok(Self {
            x_min,
            x_max,
            y_min,
            y_max,
            step,
            xs,
            ys,
        })
    }

    /// Column coordinates.
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// Row coordinates.
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Requested `(x_min, x_max, y_min, y_max)`.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        (self.x_min, self.x_max, self.y_min, self.y_max)
    }

    /// Returns `(rows, cols)`, where rows follow y and columns
    /// follow x.
    pub fn shape(&self) -> (usize, usize) {
        (self.ys.len(), self.xs.len())
    }

    pub fn len(&self) -> usize {
        self.xs.len() * self.ys.len()
    }

    /// Always false; both axes hold at least one sample.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// True if either axis collapsed to a single sample.
    pub fn is_degenerate(&self) -> bool {
        self.xs.len() == 1 || self.ys.len() == 1
    }

    /// Sample locations in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord<f64>> + '_ {
        self.ys
            .iter()
            .flat_map(move |&y| self.xs.iter().map(move |&x| Coord { x, y }))
    }

    /// Approximate area covered by the samples, in m².
    ///
    /// A grid which is a single row, column, or point is credited one
    /// `step²` cell.
    pub fn area_m2(&self) -> f64 {
        match (self.xs.as_slice(), self.ys.as_slice()) {
            ([x0, x1, ..], [y0, y1, ..]) => {
                #[allow(clippy::cast_precision_loss)]
                let width = (self.xs.len() - 1) as f64 * (x1 - x0);
                #[allow(clippy::cast_precision_loss)]
                let height = (self.ys.len() - 1) as f64 * (y1 - y0);
                width * height
            }
            _ => self.step * self.step,
        }
    }

    /// Expands the axes into a pair of `(x, y)` coordinate rasters.
    pub fn mesh(&self) -> (Raster<f64>, Raster<f64>) {
        let (rows, cols) = self.shape();
        let xx = Raster::from_fn(rows, cols, |_, col| self.xs[col]);
        let yy = Raster::from_fn(rows, cols, |row, _| self.ys[row]);
        (xx, yy)
    }
}

/// Builds a [`SampleGrid`] and returns its coordinate mesh.
pub fn build_grid(
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
    step: f64,
) -> Result<(Raster<f64>, Raster<f64>), CoverageError> {
    Ok(SampleGrid::new(x_min, x_max, y_min, y_max, step)?.mesh())
}

fn axis(min: f64, max: f64, step: f64) -> Vec<f64> {
    if min >= max {
        vec![min]
    } else {
        arange(min, max + step, step).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{build_grid, SampleGrid};
    use crate::CoverageError;
    use approx::assert_relative_eq;
    use geo::coord;

    #[test]
    fn test_square_grid() {
        let (xx, yy) = build_grid(0.0, 100.0, 0.0, 100.0, 10.0).unwrap();
        assert_eq!((11, 11), xx.shape());
        assert_eq!((11, 11), yy.shape());
        assert_eq!((0.0, 0.0), (xx[(0, 0)], yy[(0, 0)]));
        assert_eq!((100.0, 100.0), (xx[(10, 10)], yy[(10, 10)]));
        // x varies along a row, y down a column.
        assert_eq!(10.0, xx[(0, 1)]);
        assert_eq!(0.0, yy[(0, 1)]);
        assert_eq!(0.0, xx[(1, 0)]);
        assert_eq!(10.0, yy[(1, 0)]);
    }

    #[test]
    fn test_non_positive_step() {
        for step in [0.0, -1.0, f64::NAN] {
            let err = build_grid(0.0, 100.0, 0.0, 100.0, step).unwrap_err();
            assert!(matches!(
                err,
                CoverageError::InvalidParameter { name: "step", .. }
            ));
        }
    }

    #[test]
    fn test_non_finite_bounds() {
        assert_eq!(
            Err(CoverageError::InvalidParameter {
                name: "y_max",
                value: f64::INFINITY
            }),
            SampleGrid::new(0.0, 1.0, 0.0, f64::INFINITY, 1.0)
        );
    }

    #[test]
    fn test_collapsed_x() {
        let grid = SampleGrid::new(5.0, 5.0, 0.0, 10.0, 1.0).unwrap();
        assert_eq!(&[5.0], grid.xs());
        assert_eq!(11, grid.ys().len());
        assert!(grid.is_degenerate());
        let (xx, yy) = grid.mesh();
        assert_eq!((11, 1), xx.shape());
        assert_eq!((11, 1), yy.shape());
        assert!(xx.iter().all(|&x| x == 5.0));
        assert_eq!(10.0, yy[(10, 0)]);
    }

    #[test]
    fn test_inverted_bounds_collapse() {
        let grid = SampleGrid::new(10.0, 0.0, 3.0, -3.0, 1.0).unwrap();
        assert_eq!(&[10.0], grid.xs());
        assert_eq!(&[3.0], grid.ys());
        assert_eq!(1, grid.len());
    }

    #[test]
    fn test_uneven_step_overshoots() {
        let grid = SampleGrid::new(0.0, 1.0, 0.0, 1.0, 0.3).unwrap();
        assert_eq!(5, grid.xs().len());
        assert!(grid.xs()[4] > 1.0);
        assert_relative_eq!(1.2, grid.xs()[4], epsilon = 1e-12);
    }

    #[test]
    fn test_coords_row_major() {
        let grid = SampleGrid::new(0.0, 1.0, 0.0, 2.0, 1.0).unwrap();
        let coords: Vec<_> = grid.coords().collect();
        assert_eq!(
            vec![
                coord! { x: 0.0, y: 0.0 },
                coord! { x: 1.0, y: 0.0 },
                coord! { x: 0.0, y: 1.0 },
                coord! { x: 1.0, y: 1.0 },
                coord! { x: 0.0, y: 2.0 },
                coord! { x: 1.0, y: 2.0 },
            ],
            coords
        );
    }

    #[test]
    fn test_area() {
        let grid = SampleGrid::new(-500.0, 500.0, -500.0, 500.0, 10.0).unwrap();
        assert_eq!((101, 101), grid.shape());
        assert_relative_eq!(1_000_000.0, grid.area_m2());
        let line = SampleGrid::new(0.0, 100.0, 7.0, 7.0, 10.0).unwrap();
        assert_relative_eq!(100.0, line.area_m2());
    }
}

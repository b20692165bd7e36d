use crate::{evaluate, stats::summarize_with, CoverageStatistics, SampleGrid, SignalField};
use log::debug;
use rsrp::Transmitter;
use std::sync::{Arc, PoisonError, RwLock};

/// Everything produced by one simulation run.
#[derive(Debug, Clone)]
pub struct Simulation {
    pub transmitter: Transmitter,
    pub grid: SampleGrid,
    pub field: SignalField,
    pub statistics: CoverageStatistics,
}

impl Simulation {
    /// Evaluates `transmitter` over `grid` and summarizes the
    /// resulting field against `thresholds` (dBm).
    pub fn run(transmitter: &Transmitter, grid: SampleGrid, thresholds: &[f64]) -> Self {
        let now = std::time::Instant::now();
        let field = evaluate(&grid, transmitter);
        let statistics = summarize_with(field.values(), thresholds);
        debug!(
            "simulation; points: {}, valid: {}, exec: {:?}",
            statistics.total_points,
            statistics.valid_points,
            now.elapsed()
        );
        Self {
            transmitter: *transmitter,
            grid,
            field,
            statistics,
        }
    }
}

/// Holds the most recent [`Simulation`] for whoever needs it after
/// the fact (e.g. an exporter).
///
/// Replacing swaps in a new `Arc`; readers holding an earlier run
/// keep a complete, unchanged copy.
#[derive(Debug, Default)]
pub struct LastRun {
    slot: RwLock<Option<Arc<Simulation>>>,
}

impl LastRun {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `simulation`, returning the run it replaced.
    pub fn replace(&self, simulation: Simulation) -> Option<Arc<Simulation>> {
        let next = Arc::new(simulation);
        self.slot
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(next)
    }

    pub fn latest(&self) -> Option<Arc<Simulation>> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::{LastRun, Simulation};
    use crate::{SampleGrid, DEFAULT_RSRP_THRESHOLDS};
    use rsrp::{Environment, Transmitter};
    use std::sync::Arc;

    fn run(environment: Environment) -> Simulation {
        let tx = Transmitter::builder()
            .environment(environment)
            .build()
            .unwrap();
        let grid = SampleGrid::new(-100.0, 100.0, -100.0, 100.0, 20.0).unwrap();
        Simulation::run(&tx, grid, &DEFAULT_RSRP_THRESHOLDS)
    }

    #[test]
    fn test_run_shapes() {
        let sim = run(Environment::Suburban);
        assert_eq!(sim.grid.shape(), sim.field.shape());
        assert_eq!(sim.grid.len(), sim.statistics.total_points);
        assert_eq!(4, sim.statistics.thresholds.len());
    }

    #[test]
    fn test_last_run_replace() {
        let slot = LastRun::new();
        assert!(slot.latest().is_none());
        assert!(slot.replace(run(Environment::UrbanDense)).is_none());

        let held = slot.latest().unwrap();
        let previous = slot.replace(run(Environment::RuralMacro)).unwrap();
        assert!(Arc::ptr_eq(&held, &previous));
        assert_eq!(Environment::UrbanDense, held.transmitter.environment);
        assert_eq!(
            Environment::RuralMacro,
            slot.latest().unwrap().transmitter.environment
        );
    }

    #[test]
    fn test_last_run_concurrent_readers() {
        let slot = LastRun::new();
        slot.replace(run(Environment::UrbanDense));
        let held = slot.latest().unwrap();
        let before = held.field.clone();

        std::thread::scope(|s| {
            s.spawn(|| slot.replace(run(Environment::Suburban)));
            s.spawn(|| {
                let seen = slot.latest().unwrap();
                assert_eq!(seen.grid.shape(), seen.field.shape());
            });
        });

        assert_eq!(before, held.field);
        assert_eq!(
            Environment::Suburban,
            slot.latest().unwrap().transmitter.environment
        );
    }
}

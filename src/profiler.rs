use std::cell::RefCell;
use std::collections::HashMap;
use std::thread_local;
use std::time::{Duration, Instant};

/// Per-stage timings (load, classify, composite, ...) for one run.
#[derive(Debug, Default)]
pub struct Profiler {
    timers: HashMap<String, Instant>,
    measurements: HashMap<String, Vec<Duration>>,
}

impl Profiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_timer(&mut self, name: &str) {
        tracing::trace!(timer = name, "start_timer");
        self.timers.insert(name.to_string(), Instant::now());
    }

    pub fn end_timer(&mut self, name: &str) {
        if let Some(start) = self.timers.remove(name) {
            let duration = start.elapsed();
            tracing::debug!(timer = name, duration_ms = ?duration.as_millis(), "end_timer");
            self.measurements
                .entry(name.to_string())
                .or_default()
                .push(duration);
        }
    }

    /// Runs `f` between `start_timer(name)` and `end_timer(name)`.
    pub fn time<T>(&mut self, name: &str, f: impl FnOnce() -> T) -> T {
        self.start_timer(name);
        let out = f();
        self.end_timer(name);
        out
    }

    pub fn add_measurement(&mut self, name: &str, duration: Duration) {
        self.measurements
            .entry(name.to_string())
            .or_default()
            .push(duration);
    }

    pub fn get_stats(&self) -> HashMap<String, MeasurementStats> {
        self.measurements
            .iter()
            .filter_map(|(name, measurements)| {
                let min = *measurements.iter().min()?;
                let max = *measurements.iter().max()?;
                let total: Duration = measurements.iter().sum();
                Some((
                    name.clone(),
                    MeasurementStats {
                        count: measurements.len(),
                        total_time: total,
                        average_time: total / measurements.len() as u32,
                        min_time: min,
                        max_time: max,
                    },
                ))
            })
            .collect()
    }

    /// Writes one debug line per stage, sorted by name.
    pub fn log_summary(&self) {
        let stats = self.get_stats();
        let mut names: Vec<&String> = stats.keys().collect();
        names.sort();
        for name in names {
            let s = &stats[name];
            tracing::debug!(
                stage = name.as_str(),
                count = s.count,
                total_ms = ?s.total_time.as_millis(),
                avg_ms = ?s.average_time.as_millis(),
                min_ms = ?s.min_time.as_millis(),
                max_ms = ?s.max_time.as_millis(),
                "stage timing"
            );
        }
    }

    pub fn reset(&mut self) {
        self.timers.clear();
        self.measurements.clear();
    }
}

#[derive(Debug, Clone)]
pub struct MeasurementStats {
    pub count: usize,
    pub total_time: Duration,
    pub average_time: Duration,
    pub min_time: Duration,
    pub max_time: Duration,
}

thread_local! {
    static PROFILER: RefCell<Profiler> = RefCell::new(Profiler::new());
}

pub fn with_profiler<F, R>(f: F) -> R
where
    F: FnOnce(&mut Profiler) -> R,
{
    PROFILER.with(|p| f(&mut p.borrow_mut()))
}

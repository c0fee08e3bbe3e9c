//! Observability hook (§4.K / §6). Orthogonal to the search: the orchestrator
//! calls into an injected [`Observer`] at five stage boundaries and never
//! branches on what it returns.

use std::time::Instant;

use chrono::{DateTime, Utc};

/// Millisecond stopwatch, the same shape the rest of this crate's ancestry
/// used for its per-iteration instrumentation.
#[derive(Debug)]
pub struct Timer {
    start: Instant,
}

impl Default for Timer {
    fn default() -> Self {
        Timer { start: Instant::now() }
    }
}

impl Timer {
    pub fn dur_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

/// One callback per stage boundary of a planning call (§2 data flow).
pub trait Observer {
    fn on_predicted(&mut self, _count: usize, _dur_ms: f64) {}
    fn on_sampled(&mut self, _count: usize, _dur_ms: f64) {}
    fn on_searched(&mut self, _count: usize, _dur_ms: f64) {}
    fn on_validated(&mut self, _count: usize, _dur_ms: f64) {}
    fn on_collision_checked(&mut self, _count: usize, _dur_ms: f64) {}
}

/// Default no-op observer; telemetry has no effect on the returned
/// trajectory either way, but this keeps the hot path free of branching on
/// `Option<&mut dyn Observer>` at every call site.
#[derive(Debug, Default)]
pub struct NullObserver;

impl Observer for NullObserver {}

/// Observer that reports through the `log` facade, used by the CLI demo.
#[derive(Debug, Default)]
pub struct LoggingObserver;

impl Observer for LoggingObserver {
    fn on_predicted(&mut self, count: usize, dur_ms: f64) {
        log::debug!("predicted {} obstacle trajectories in {:.3} ms", count, dur_ms);
    }
    fn on_sampled(&mut self, count: usize, dur_ms: f64) {
        log::debug!("sampled {} grid cells in {:.3} ms", count, dur_ms);
    }
    fn on_searched(&mut self, count: usize, dur_ms: f64) {
        log::debug!("search visited {} cells in {:.3} ms", count, dur_ms);
    }
    fn on_validated(&mut self, count: usize, dur_ms: f64) {
        log::debug!("validated {} candidates in {:.3} ms", count, dur_ms);
    }
    fn on_collision_checked(&mut self, count: usize, dur_ms: f64) {
        log::debug!("ran {} collision checks in {:.3} ms", count, dur_ms);
    }
}

/// One stage boundary's count, elapsed duration and wall-clock timestamp.
#[derive(Debug, Clone, Copy)]
pub struct StageRecord {
    pub count: usize,
    pub dur_ms: f64,
    pub at: DateTime<Utc>,
}

/// A per-call telemetry record: one [`StageRecord`] per stage boundary (§3
/// "TelemetryRecord"), plus running totals. Only populated when a
/// [`RecordingObserver`] is supplied to a planning call; has no bearing on
/// the returned trajectory either way.
#[derive(Debug, Clone, Default)]
pub struct TelemetryRecord {
    pub predicted: Option<StageRecord>,
    pub sampled: Option<StageRecord>,
    pub searched: Option<StageRecord>,
    pub validated: Option<StageRecord>,
    pub collision_checked: Option<StageRecord>,
}

impl TelemetryRecord {
    pub fn total_count(&self) -> usize {
        [self.predicted, self.sampled, self.searched, self.validated, self.collision_checked]
            .iter()
            .filter_map(|r| r.map(|s| s.count))
            .sum()
    }

    pub fn total_dur_ms(&self) -> f64 {
        [self.predicted, self.sampled, self.searched, self.validated, self.collision_checked]
            .iter()
            .filter_map(|r| r.map(|s| s.dur_ms))
            .sum()
    }
}

/// Observer that accumulates a [`TelemetryRecord`] instead of (or alongside)
/// logging. Each stage boundary is timestamped with [`Utc::now`] so a caller
/// can correlate stages across a distributed trace.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    pub record: TelemetryRecord,
}

impl Observer for RecordingObserver {
    fn on_predicted(&mut self, count: usize, dur_ms: f64) {
        self.record.predicted = Some(StageRecord { count, dur_ms, at: Utc::now() });
    }
    fn on_sampled(&mut self, count: usize, dur_ms: f64) {
        self.record.sampled = Some(StageRecord { count, dur_ms, at: Utc::now() });
    }
    fn on_searched(&mut self, count: usize, dur_ms: f64) {
        self.record.searched = Some(StageRecord { count, dur_ms, at: Utc::now() });
    }
    fn on_validated(&mut self, count: usize, dur_ms: f64) {
        self.record.validated = Some(StageRecord { count, dur_ms, at: Utc::now() });
    }
    fn on_collision_checked(&mut self, count: usize, dur_ms: f64) {
        self.record.collision_checked = Some(StageRecord { count, dur_ms, at: Utc::now() });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_observer_accumulates_all_stages() {
        let mut obs = RecordingObserver::default();
        obs.on_predicted(2, 0.1);
        obs.on_sampled(27, 0.2);
        obs.on_searched(9, 0.3);
        obs.on_validated(4, 0.4);
        obs.on_collision_checked(12, 0.5);

        assert_eq!(obs.record.total_count(), 2 + 27 + 9 + 4 + 12);
        assert!((obs.record.total_dur_ms() - 1.5).abs() < 1e-9);
        assert!(obs.record.predicted.is_some());
        assert!(obs.record.collision_checked.is_some());
    }
}

//! Frame rate bookkeeping for the update handler.

use std::time::Duration;

/// Counts frames and reports the average rate once per interval.
#[derive(Debug, Clone)]
pub struct FrameStats {
    total_frames: u64,
    interval_frames: u32,
    interval_elapsed: Duration,
    report_interval: Duration,
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new(Duration::from_secs(2))
    }
}

impl FrameStats {
    pub fn new(report_interval: Duration) -> Self {
        Self {
            total_frames: 0,
            interval_frames: 0,
            interval_elapsed: Duration::ZERO,
            report_interval,
        }
    }

    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// Record one frame that took `elapsed`.
    ///
    /// Returns frames per second when a report interval has been completed.
    pub fn record(&mut self, elapsed: Duration) -> Option<f64> {
        self.total_frames += 1;
        self.interval_frames += 1;
        self.interval_elapsed += elapsed;

        if self.interval_elapsed < self.report_interval {
            return None;
        }

        let fps = self.interval_frames as f64 / self.interval_elapsed.as_secs_f64();
        self.interval_frames = 0;
        self.interval_elapsed = Duration::ZERO;
        Some(fps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reports_after_interval() {
        let mut stats = FrameStats::new(Duration::from_secs(1));
        let frame = Duration::from_millis(250);

        assert_eq!(stats.record(frame), None);
        assert_eq!(stats.record(frame), None);
        assert_eq!(stats.record(frame), None);
        let fps = stats.record(frame).unwrap();
        assert!((fps - 4.0).abs() < 1e-9);

        // Interval restarts after a report
        assert_eq!(stats.record(frame), None);
        assert_eq!(stats.total_frames(), 5);
    }
}

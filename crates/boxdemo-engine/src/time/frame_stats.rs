/// One averaged measurement produced by [`FrameStats`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameStatsReport {
    /// Frames presented per second over the last window.
    pub fps: f32,
    /// Average milliseconds spent per frame over the last window.
    pub ms_per_frame: f32,
}

/// Rolling frames-per-second counter.
///
/// Frames are counted until one second of frame time has accumulated, then a
/// report is produced and the counters restart.
#[derive(Debug, Clone, Default)]
pub struct FrameStats {
    frames: u32,
    elapsed: f32,
}

impl FrameStats {
    const WINDOW_SECS: f32 = 1.0;

    pub fn new() -> Self {
        Self::default()
    }

    /// Records one frame of duration `dt` (seconds).
    ///
    /// Returns a report when the averaging window closes.
    pub fn record(&mut self, dt: f32) -> Option<FrameStatsReport> {
        self.frames += 1;
        self.elapsed += dt.max(0.0);

        if self.elapsed < Self::WINDOW_SECS {
            return None;
        }

        let fps = self.frames as f32 / self.elapsed;
        let report = FrameStatsReport {
            fps,
            ms_per_frame: 1000.0 / fps,
        };

        self.frames = 0;
        self.elapsed = 0.0;

        Some(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_report_before_one_second() {
        let mut stats = FrameStats::new();
        for _ in 0..59 {
            assert!(stats.record(1.0 / 60.0).is_none());
        }
    }

    #[test]
    fn reports_sixty_fps() {
        let mut stats = FrameStats::new();
        let mut report = None;
        for _ in 0..61 {
            if let Some(r) = stats.record(1.0 / 60.0) {
                report = Some(r);
                break;
            }
        }
        let r = report.expect("window should close within 61 frames");
        assert!((r.fps - 60.0).abs() < 1.0, "fps = {}", r.fps);
        assert!((r.ms_per_frame - 16.67).abs() < 0.3);
    }

    #[test]
    fn counters_restart_after_report() {
        let mut stats = FrameStats::new();
        assert!(stats.record(1.5).is_some());
        assert!(stats.record(0.1).is_none());
    }
}

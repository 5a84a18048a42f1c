use common_types::ScreenPosition;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Roughly 12 reports per second.
pub const REPORT_INTERVAL: Duration = Duration::from_millis(80);

type ReportCallback = Box<dyn FnMut(Uuid, ScreenPosition) + Send>;

/// Throttled delivery of the active photo's screen position.
pub struct ScreenReporter {
    interval: Duration,
    last_report: Option<Instant>,
    callback: Option<ReportCallback>,
}

impl Default for ScreenReporter {
    fn default() -> Self {
        Self::new(REPORT_INTERVAL)
    }
}

impl std::fmt::Debug for ScreenReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScreenReporter")
            .field("interval", &self.interval)
            .field("last_report", &self.last_report)
            .field("has_callback", &self.callback.is_some())
            .finish()
    }
}

impl ScreenReporter {
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_report: None,
            callback: None,
        }
    }

    pub fn set_callback(&mut self, callback: impl FnMut(Uuid, ScreenPosition) + Send + 'static) {
        self.callback = Some(Box::new(callback));
    }

    /// Whether a sample taken at `now` would be delivered.
    #[must_use]
    pub fn is_due(&self, now: Instant) -> bool {
        self.last_report
            .is_none_or(|last| now.saturating_duration_since(last) > self.interval)
    }

    /// Delivers `position` unless the previous delivery was too recent.
    pub fn report(&mut self, now: Instant, photo_id: Uuid, position: ScreenPosition) -> bool {
        if !self.is_due(now) {
            return false;
        }
        let Some(callback) = self.callback.as_mut() else {
            return false;
        };
        callback(photo_id, position);
        self.last_report = Some(now);
        true
    }

    /// Forgets the last delivery so the next sample goes out immediately.
    pub fn reset(&mut self) {
        self.last_report = None;
    }
}

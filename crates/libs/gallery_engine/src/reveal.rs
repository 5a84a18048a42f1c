use std::time::{Duration, Instant};
use tracing::debug;

pub const REVEAL_DURATION: Duration = Duration::from_millis(2200);

#[must_use]
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Time-driven reveal of the gallery, restarted whenever the photo count changes.
#[derive(Debug, Clone)]
pub struct RevealAnimation {
    duration: Duration,
    count: usize,
    started_at: Option<Instant>,
}

impl Default for RevealAnimation {
    fn default() -> Self {
        Self::new(REVEAL_DURATION)
    }
}

impl RevealAnimation {
    #[must_use]
    pub const fn new(duration: Duration) -> Self {
        Self {
            duration,
            count: 0,
            started_at: None,
        }
    }

    /// Informs the animation of the current photo count.
    ///
    /// Zero photos resets to idle; any other change restarts from zero.
    pub fn sync_count(&mut self, count: usize, now: Instant) {
        if count == self.count {
            return;
        }
        debug!("Reveal restarting: {} -> {count} photos", self.count);
        self.count = count;
        self.started_at = (count > 0).then_some(now);
    }

    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Eased progress in `0..=1`; exactly 1 once the duration has elapsed.
    #[must_use]
    pub fn progress(&self, now: Instant) -> f32 {
        let Some(started_at) = self.started_at else {
            return 0.0;
        };
        let elapsed = now.saturating_duration_since(started_at);
        if elapsed >= self.duration || self.duration.is_zero() {
            return 1.0;
        }
        ease_out_cubic(elapsed.as_secs_f32() / self.duration.as_secs_f32())
    }

    #[must_use]
    pub fn is_finished(&self, now: Instant) -> bool {
        self.started_at
            .is_some_and(|started_at| now.saturating_duration_since(started_at) >= self.duration)
    }
}

use cgmath::{Matrix4, Point3, Rad, Vector3};
use std::time::{Duration, Instant};

pub const DRAG_COOLDOWN: Duration = Duration::from_millis(600);

/// Slow whole-gallery motion at one instant of ambient time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupTransform {
    pub yaw: f32,
    pub bob: f32,
    pub breathe: f32,
}

impl Default for GroupTransform {
    fn default() -> Self {
        Self::at(0.0)
    }
}

impl GroupTransform {
    /// Pose after `t` seconds of ambient time.
    #[must_use]
    pub fn at(t: f32) -> Self {
        Self {
            yaw: 0.12 * t,
            bob: 0.5 * (0.3 * t).sin(),
            breathe: 1.0 + 0.02 * (0.4 * t).sin(),
        }
    }

    /// No rotation, no offset, unit scale.
    #[must_use]
    pub const fn identity() -> Self {
        Self {
            yaw: 0.0,
            bob: 0.0,
            breathe: 1.0,
        }
    }

    #[must_use]
    pub fn matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(Vector3::new(0.0, self.bob, 0.0))
            * Matrix4::from_angle_y(Rad(self.yaw))
            * Matrix4::from_scale(self.breathe)
    }

    /// Gallery-local point to world space.
    #[must_use]
    pub fn apply(&self, local: Vector3<f32>) -> Point3<f32> {
        Point3::from_homogeneous(self.matrix() * local.extend(1.0))
    }
}

/// Ambient clock that freezes while the user drags and for a short cooldown after.
#[derive(Debug, Clone)]
pub struct AmbientMotion {
    elapsed: Duration,
    last_tick: Option<Instant>,
    dragging: bool,
    resume_at: Option<Instant>,
    cooldown: Duration,
}

impl Default for AmbientMotion {
    fn default() -> Self {
        Self::new(DRAG_COOLDOWN)
    }
}

impl AmbientMotion {
    #[must_use]
    pub const fn new(cooldown: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            last_tick: None,
            dragging: false,
            resume_at: None,
            cooldown,
        }
    }

    pub fn begin_drag(&mut self, now: Instant) {
        self.advance(now);
        self.dragging = true;
        self.resume_at = None;
    }

    pub fn end_drag(&mut self, now: Instant) {
        self.advance(now);
        self.dragging = false;
        self.resume_at = Some(now + self.cooldown);
    }

    #[must_use]
    pub fn is_suspended(&self, now: Instant) -> bool {
        self.dragging || self.resume_at.is_some_and(|resume_at| now < resume_at)
    }

    /// Advances ambient time to `now` and returns the current pose.
    pub fn tick(&mut self, now: Instant) -> GroupTransform {
        self.advance(now);
        self.pose()
    }

    #[must_use]
    pub fn pose(&self) -> GroupTransform {
        GroupTransform::at(self.elapsed.as_secs_f32())
    }

    fn advance(&mut self, now: Instant) {
        let Some(last_tick) = self.last_tick.replace(now) else {
            return;
        };
        if self.dragging {
            return;
        }
        // Only the part of the interval after the cooldown counts.
        let from = match self.resume_at {
            Some(resume_at) if resume_at > last_tick => resume_at,
            _ => last_tick,
        };
        self.elapsed += now.saturating_duration_since(from);
    }
}

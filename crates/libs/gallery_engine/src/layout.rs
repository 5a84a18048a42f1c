use cgmath::Vector3;

/// Base scale per photo, cycled by index.
pub const SCALE_TABLE: [f32; 12] = [
    1.9, 2.7, 2.3, 3.3, 2.9, 3.6, 2.2, 3.0, 2.5, 3.3, 2.0, 3.1,
];

/// Shape of the scatter and of the two-phase reveal.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutTuning {
    pub scales: Vec<f32>,
    /// Height every photo rises from during the reveal.
    pub origin_y: f32,
    /// Progress at which the vertical lift is complete.
    pub lift_end: f32,
    /// Progress at which the horizontal spread starts.
    pub spread_start: f32,
    /// Fraction of the base scale a photo starts the reveal at.
    pub min_scale: f32,
}

impl Default for LayoutTuning {
    fn default() -> Self {
        Self {
            scales: SCALE_TABLE.to_vec(),
            origin_y: -8.0,
            lift_end: 0.35,
            spread_start: 0.1,
            min_scale: 0.35,
        }
    }
}

impl LayoutTuning {
    #[must_use]
    pub fn base_scale(&self, index: usize) -> f32 {
        if self.scales.is_empty() {
            return 1.0;
        }
        self.scales[index % self.scales.len()]
    }

    /// Vertical phase, `0..=1`.
    #[must_use]
    pub fn lift_progress(&self, progress: f32) -> f32 {
        (progress / self.lift_end).clamp(0.0, 1.0)
    }

    /// Horizontal phase, `0..=1`. Zero until `spread_start`.
    #[must_use]
    pub fn spread_progress(&self, progress: f32) -> f32 {
        if progress <= self.spread_start {
            return 0.0;
        }
        ((progress - self.spread_start) / (1.0 - self.spread_start)).min(1.0)
    }
}

/// Where one photo sits at a given reveal progress, in gallery-local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhotoPlacement {
    pub position: Vector3<f32>,
    /// Rotation about the photo's own forward axis, radians.
    pub tilt: f32,
    pub scale: f32,
}

/// Fully revealed position of photo `index` out of `total`.
#[must_use]
pub fn final_position(index: usize, total: usize) -> Vector3<f32> {
    let i = index as f32;
    let seed = i * 1.618;
    let lift = 9.0 + total.saturating_sub(8) as f32 * 0.6;

    Vector3::new(
        seed.sin() * 6.0 + (seed * 2.3).cos() * 3.5,
        lift - i * 2.6 + (seed * 0.9).sin() * 0.8,
        (seed * 1.4).cos() * 4.2,
    )
}

/// A few degrees of tilt, stable per index.
#[must_use]
pub fn tilt(index: usize) -> f32 {
    let i = index as f32;
    (((i * 1.7) * 0.8).sin() - 0.5) * 4.0_f32.to_radians()
}

#[must_use]
pub fn layout(index: usize, total: usize, progress: f32) -> PhotoPlacement {
    layout_with(index, total, progress, &LayoutTuning::default())
}

/// Placement of photo `index` at reveal `progress` (`0..=1`).
///
/// The photo first rises from `origin_y` to its final height, then spreads
/// out horizontally, growing from `min_scale` to its base scale meanwhile.
#[must_use]
pub fn layout_with(
    index: usize,
    total: usize,
    progress: f32,
    tuning: &LayoutTuning,
) -> PhotoPlacement {
    let target = final_position(index, total);
    let lift_p = tuning.lift_progress(progress);
    let spread_p = tuning.spread_progress(progress);

    let y = tuning.origin_y + (target.y - tuning.origin_y) * lift_p;
    let grow = tuning.min_scale + (1.0 - tuning.min_scale) * lift_p.max(spread_p);

    PhotoPlacement {
        position: Vector3::new(target.x * spread_p, y, target.z * spread_p),
        tilt: tilt(index),
        scale: tuning.base_scale(index) * grow,
    }
}

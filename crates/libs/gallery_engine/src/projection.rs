use crate::ambient::GroupTransform;
use cgmath::{
    Deg, InnerSpace, Matrix3, Matrix4, Point3, Rad, SquareMatrix, Vector2, Vector3, Vector4,
    perspective,
};
use common_types::ScreenPosition;

pub const DEFAULT_ASPECT: f32 = 1.5;

/// Perspective camera looking at the gallery.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
    pub fov_y: Rad<f32>,
    pub near: f32,
    pub far: f32,
    /// Viewport size in pixels.
    pub viewport: Vector2<f32>,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Point3::new(0.0, 5.0, 30.0),
            target: Point3::new(0.0, 0.0, 0.0),
            fov_y: Deg(55.0).into(),
            near: 0.1,
            far: 100.0,
            viewport: Vector2::new(1280.0, 720.0),
        }
    }
}

impl Camera {
    #[must_use]
    pub fn with_viewport(mut self, width: f32, height: f32) -> Self {
        self.viewport = Vector2::new(width, height);
        self
    }

    #[must_use]
    pub fn view_projection(&self) -> Matrix4<f32> {
        let aspect = if self.viewport.y > 0.0 {
            self.viewport.x / self.viewport.y
        } else {
            1.0
        };
        perspective(self.fov_y, aspect, self.near, self.far)
            * Matrix4::look_at_rh(self.eye, self.target, Vector3::unit_y())
    }

    /// World point to viewport pixels, origin top-left.
    #[must_use]
    pub fn project(&self, view_projection: &Matrix4<f32>, point: Vector4<f32>) -> Vector2<f32> {
        let clip = *view_projection * point;
        let ndc = clip.truncate() / clip.w;
        Vector2::new(
            (ndc.x * 0.5 + 0.5) * self.viewport.x,
            (-ndc.y * 0.5 + 0.5) * self.viewport.y,
        )
    }
}

/// Width and height of a photo plane: constant area for a given scale.
#[must_use]
pub fn plane_size(scale: f32, aspect: f32) -> (f32, f32) {
    let area = 1.5 * scale * scale;
    let height = (area / aspect).sqrt();
    (height * aspect, height)
}

/// Rotation whose local +Z points from `position` towards `eye`.
fn billboard(position: Point3<f32>, eye: Point3<f32>) -> Matrix3<f32> {
    let to_eye = eye - position;
    if to_eye.magnitude2() < f32::EPSILON {
        return Matrix3::identity();
    }
    let forward = to_eye.normalize();
    let mut right = Vector3::unit_y().cross(forward);
    if right.magnitude2() < 1e-8 {
        // Looking straight up or down.
        right = Vector3::unit_x();
    }
    let right = right.normalize();
    let up = forward.cross(right);
    Matrix3::from_cols(right, up, forward)
}

/// World matrix of one photo.
///
/// The group pose moves the photo's position; its orientation always faces
/// the camera, then tilts about its own forward axis. `scale` is the final
/// uniform scale (group breathe times hover).
#[must_use]
pub fn photo_transform(
    camera: &Camera,
    group: &GroupTransform,
    local: Vector3<f32>,
    tilt: f32,
    scale: f32,
) -> Matrix4<f32> {
    let position = group.apply(local);
    Matrix4::from_translation(Vector3::new(position.x, position.y, position.z))
        * Matrix4::from(billboard(position, camera.eye))
        * Matrix4::from_angle_z(Rad(tilt))
        * Matrix4::from_scale(scale)
}

/// Screen rectangle of a `width` x `height` plane under `world`.
#[must_use]
pub fn project_photo(
    camera: &Camera,
    world: &Matrix4<f32>,
    width: f32,
    height: f32,
) -> ScreenPosition {
    let view_projection = camera.view_projection();
    let (hw, hh) = (width / 2.0, height / 2.0);
    let corners = [(-hw, -hh), (hw, -hh), (hw, hh), (-hw, hh)]
        .map(|(x, y)| camera.project(&view_projection, *world * Vector4::new(x, y, 0.0, 1.0)));
    let centre = camera.project(&view_projection, *world * Vector4::new(0.0, 0.0, 0.0, 1.0));

    let (mut min, mut max) = (corners[0], corners[0]);
    for corner in &corners[1..] {
        min = Vector2::new(min.x.min(corner.x), min.y.min(corner.y));
        max = Vector2::new(max.x.max(corner.x), max.y.max(corner.y));
    }
    let edge = corners[1] - corners[0];

    ScreenPosition {
        x: centre.x,
        y: centre.y,
        width: max.x - min.x,
        height: max.y - min.y,
        rotation: edge.y.atan2(edge.x),
    }
}

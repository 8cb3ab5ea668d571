/// Camera and projection utilities
use crate::math::{Mat4, Vec3};

/// Orthonormal camera basis produced by [`look_at_basis`].
///
/// `forward` points from the eye toward the target. The view matrix stores it
/// negated so that camera space looks down -Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LookAtBasis {
    pub right: Vec3,
    pub up: Vec3,
    pub forward: Vec3,
}

/// Build the camera basis for `eye`, `target`, `up`.
///
/// `target` must differ from `eye` and `up` must not be parallel to the view
/// direction; otherwise the normalization divides by zero and the basis is
/// NaN.
pub fn look_at_basis(eye: Vec3, target: Vec3, up: Vec3) -> LookAtBasis {
    let forward = target.sub(eye).normalize();
    let right = forward.cross(up).normalize();
    let true_up = right.cross(forward);

    LookAtBasis {
        right,
        up: true_up,
        forward,
    }
}

/// Right-handed look-at view matrix. Same preconditions as [`look_at_basis`].
pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    let LookAtBasis { right, up, forward } = look_at_basis(eye, target, up);
    let back = forward.neg();

    Mat4::from_rows([
        [right.x, right.y, right.z, -right.dot(eye)],
        [up.x, up.y, up.z, -up.dot(eye)],
        [back.x, back.y, back.z, -back.dot(eye)],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// OpenGL-style perspective projection.
///
/// View-space depths in `[-near, -far]` land in NDC z `[-1, 1]` after the
/// perspective divide. Row 3 is always `[0, 0, -1, 0]`, so clip `w` equals the
/// view-space distance in front of the camera.
pub fn perspective(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let tan_half = (fov_y_degrees.to_radians() / 2.0).tan();
    let depth = far - near;

    Mat4::from_rows([
        [1.0 / (aspect * tan_half), 0.0, 0.0, 0.0],
        [0.0, 1.0 / tan_half, 0.0, 0.0],
        [0.0, 0.0, -(far + near) / depth, -(2.0 * far * near) / depth],
        [0.0, 0.0, -1.0, 0.0],
    ])
}

/// Camera placement. Fixed in the visualizer but kept mutable for callers
/// that want to move it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl CameraState {
    pub fn new(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        Self { eye, target, up }
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Mat4 {
        look_at(self.eye, self.target, self.up)
    }

    pub fn basis(&self) -> LookAtBasis {
        look_at_basis(self.eye, self.target, self.up)
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 0.0),
            target: Vec3::new(0.0, 0.0, -1.0),
            up: Vec3::new(0.0, 1.0, 0.0),
        }
    }
}

/// Perspective lens parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lens {
    pub fov_y_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Lens {
    pub const DEFAULT_FOV_Y_DEGREES: f32 = 45.0;
    pub const DEFAULT_NEAR: f32 = 0.1;
    pub const DEFAULT_FAR: f32 = 100.0;

    /// Lens for a viewport of the given pixel size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            fov_y_degrees: Self::DEFAULT_FOV_Y_DEGREES,
            aspect: width as f32 / height as f32,
            near: Self::DEFAULT_NEAR,
            far: Self::DEFAULT_FAR,
        }
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Mat4 {
        perspective(self.fov_y_degrees, self.aspect, self.near, self.far)
    }

    /// Full horizontal field of view implied by the vertical one and the
    /// aspect ratio.
    pub fn horizontal_fov_radians(&self) -> f32 {
        let half_y = self.fov_y_degrees.to_radians() / 2.0;
        2.0 * (half_y.tan() * self.aspect).atan()
    }
}

impl Default for Lens {
    fn default() -> Self {
        Self::new(300, 190)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{matvec, Vec4};
    use nalgebra::{Matrix4, Point3, Vector3};

    const EPS: f32 = 1e-5;

    fn assert_orthonormal(basis: &LookAtBasis) {
        let LookAtBasis { right, up, forward } = *basis;
        assert!(right.dot(up).abs() < EPS);
        assert!(right.dot(forward).abs() < EPS);
        assert!(up.dot(forward).abs() < EPS);
        for axis in [right, up, forward] {
            assert!((axis.length() - 1.0).abs() < EPS, "{:?}", axis);
        }
    }

    #[test]
    fn test_default_camera_view_is_identity() {
        let view = CameraState::default().view_matrix();
        assert!(view.max_abs_diff(&Mat4::IDENTITY) < 1e-6);
    }

    #[test]
    fn test_look_at_basis_is_orthonormal() {
        let cases = [
            (Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0), Vec3::new(0.0, 1.0, 0.0)),
            (Vec3::new(3.0, 2.0, 5.0), Vec3::new(-1.0, 0.5, 0.0), Vec3::new(0.0, 1.0, 0.0)),
            (Vec3::new(-4.0, 7.0, 1.0), Vec3::new(2.0, -3.0, -6.0), Vec3::new(0.3, 1.0, 0.2)),
            (Vec3::new(1.0, 1.0, 1.0), Vec3::new(1.0, 1.0, 5.0), Vec3::new(1.0, 1.0, 0.0)),
        ];
        for (eye, target, up) in cases {
            assert_orthonormal(&look_at_basis(eye, target, up));
        }
    }

    #[test]
    fn test_look_at_maps_eye_to_origin_and_target_down_negative_z() {
        let eye = Vec3::new(3.0, 2.0, 5.0);
        let target = Vec3::new(-1.0, 0.5, 0.0);
        let view = look_at(eye, target, Vec3::new(0.0, 1.0, 0.0));

        let eye_view = matvec(&view, eye.extend(1.0));
        assert!(eye_view.xyz().length() < EPS);

        let distance = target.sub(eye).length();
        let target_view = matvec(&view, target.extend(1.0));
        assert!(target_view.x.abs() < EPS);
        assert!(target_view.y.abs() < EPS);
        assert!((target_view.z + distance).abs() < 1e-4);
    }

    #[test]
    fn test_look_at_matches_nalgebra() {
        let eye = Vec3::new(-2.0, 1.5, 4.0);
        let target = Vec3::new(0.5, -1.0, -3.0);
        let up = Vec3::new(0.0, 1.0, 0.0);

        let reference = Matrix4::look_at_rh(
            &Point3::new(eye.x, eye.y, eye.z),
            &Point3::new(target.x, target.y, target.z),
            &Vector3::from(up),
        );
        assert!(look_at(eye, target, up).max_abs_diff(&Mat4::from(reference)) < EPS);
    }

    #[test]
    fn test_perspective_matches_nalgebra() {
        let lens = Lens::new(300, 190);
        let reference = Matrix4::new_perspective(
            lens.aspect,
            lens.fov_y_degrees.to_radians(),
            lens.near,
            lens.far,
        );
        assert!(lens.projection_matrix().max_abs_diff(&Mat4::from(reference)) < EPS);
    }

    #[test]
    fn test_perspective_layout() {
        let p = perspective(90.0, 2.0, 1.0, 3.0);
        assert!((p.get(0, 0) - 0.5).abs() < 1e-6);
        assert!((p.get(1, 1) - 1.0).abs() < 1e-6);
        assert!((p.get(2, 2) + 2.0).abs() < 1e-6);
        assert!((p.get(2, 3) + 3.0).abs() < 1e-6);
        assert_eq!(p.row(3), Vec4::new(0.0, 0.0, -1.0, 0.0));
    }

    #[test]
    fn test_near_and_far_planes_map_to_ndc_bounds() {
        let lens = Lens::default();
        let projection = lens.projection_matrix();

        let near = matvec(&projection, Vec4::point(0.0, 0.0, -lens.near));
        assert!(near.w > 0.0);
        assert!((near.z / near.w + 1.0).abs() < 1e-4);

        let far = matvec(&projection, Vec4::point(0.0, 0.0, -lens.far));
        assert!((far.z / far.w - 1.0).abs() < 1e-4);

        let middle = matvec(&projection, Vec4::point(0.2, -0.1, -10.0));
        let ndc_z = middle.z / middle.w;
        assert!((-1.0..=1.0).contains(&ndc_z));
    }

    #[test]
    fn test_projection_is_deterministic() {
        let lens = Lens::default();
        assert_eq!(lens.projection_matrix(), lens.projection_matrix());
        let camera = CameraState::default();
        assert_eq!(camera.view_matrix(), camera.view_matrix());
    }

    #[test]
    fn test_horizontal_fov_is_wider_for_landscape() {
        let lens = Lens::new(300, 190);
        assert!(lens.horizontal_fov_radians() > lens.fov_y_degrees.to_radians());
        let square = Lens::new(100, 100);
        assert!((square.horizontal_fov_radians() - square.fov_y_degrees.to_radians()).abs() < 1e-6);
    }
}

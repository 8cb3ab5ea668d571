/// Model transformation matrices and the interactive cube state
use crate::math::{chain, matmul, Mat4};

/// Wrap an angle in degrees into `[0, 360)`.
pub fn wrap_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Allowed range for the cube's placement in the XZ plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TranslationBounds {
    pub x_min: f32,
    pub x_max: f32,
    pub z_min: f32,
    pub z_max: f32,
}

impl TranslationBounds {
    /// Keeps the whole cube in front of the camera.
    pub const STANDARD: TranslationBounds = TranslationBounds {
        x_min: -5.0,
        x_max: 4.5,
        z_min: -5.0,
        z_max: -1.0,
    };

    /// Lets the cube come up to and past the eye so near-plane behaviour
    /// can be observed.
    pub const CLOSE_UP: TranslationBounds = TranslationBounds {
        z_max: 0.5,
        ..TranslationBounds::STANDARD
    };
}

impl Default for TranslationBounds {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Cube placement and heading, the only state carried between frames
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionState {
    pub translation_x: f32,
    pub translation_z: f32,
    /// Heading about +Y, always within `[0, 360)`
    pub yaw_degrees: f32,
}

impl InteractionState {
    pub fn new(translation_x: f32, translation_z: f32, yaw_degrees: f32) -> Self {
        Self {
            translation_x,
            translation_z,
            yaw_degrees: wrap_degrees(yaw_degrees),
        }
    }

    /// Clamp translation into `bounds` and wrap the heading.
    ///
    /// Never panics. With inverted bounds the maximum wins; NaN bounds are
    /// ignored.
    pub fn clamp(&mut self, bounds: &TranslationBounds) {
        self.translation_x = self.translation_x.max(bounds.x_min).min(bounds.x_max);
        self.translation_z = self.translation_z.max(bounds.z_min).min(bounds.z_max);
        self.yaw_degrees = wrap_degrees(self.yaw_degrees);
    }

    pub fn model_matrix(&self) -> Mat4 {
        Transform::model_matrix(self)
    }
}

impl Default for InteractionState {
    fn default() -> Self {
        Self::new(0.0, -2.0, 0.0)
    }
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Identity with the last column set to `(x, 0, z)`
    pub fn translation_matrix(x: f32, z: f32) -> Mat4 {
        Mat4::from_rows([
            [1.0, 0.0, 0.0, x],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rotation about +Y by `yaw_degrees`.
    ///
    /// Maps `x' = x·cos − z·sin`, `z' = x·sin + z·cos`. Drawn top-down with
    /// +Z pointing down the screen, that is the same turn the proxy square
    /// gets, so both panes rotate the same way for the same yaw.
    pub fn rotation_y_matrix(yaw_degrees: f32) -> Mat4 {
        let (sin, cos) = yaw_degrees.to_radians().sin_cos();
        Mat4::from_rows([
            [cos, 0.0, -sin, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [sin, 0.0, cos, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rotate about the object origin, then place in the world.
    pub fn model_matrix(state: &InteractionState) -> Mat4 {
        matmul(
            &Self::translation_matrix(state.translation_x, state.translation_z),
            &Self::rotation_y_matrix(state.yaw_degrees),
        )
    }

    /// Create a model-view-projection matrix
    pub fn mvp_matrix(model: &Mat4, view: &Mat4, projection: &Mat4) -> Mat4 {
        chain(&[*projection, *view, *model])
    }
}

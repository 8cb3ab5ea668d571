/// Configuration errors
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("screen size must be non-zero, got {width}x{height}")]
    EmptyScreen { width: u32, height: u32 },

    #[error("pixel scale must be at least 1")]
    ZeroPixelScale,

    #[error("{axis} translation range is empty: min {min} > max {max}")]
    InvertedBounds { axis: char, min: f32, max: f32 },

    #[error("field of view must be within (0, 180) degrees, got {0}")]
    FieldOfView(f32),

    #[error("near plane must be positive, got {0}")]
    NearPlane(f32),

    #[error("far plane {far} must lie beyond near plane {near}")]
    FarPlane { near: f32, far: f32 },

    #[error("camera eye and target coincide")]
    EyeAtTarget,

    #[error("camera up vector is parallel to the view direction")]
    UpParallelToView,

    #[error("{name} must be finite and non-negative, got {value}")]
    Speed { name: &'static str, value: f32 },

    #[error("grid needs at least one cell per pane")]
    EmptyGrid,
}

/// MVPviz Core Library - transform pipeline math and the frame handler
///
/// This library provides the stateless model/view/projection math, the line
/// clipper, and a visualizer that draws both panes through an abstract
/// drawing surface.

pub mod clip;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod geometry;
pub mod input;
pub mod math;
pub mod pipeline;
pub mod projection;
pub mod scene;
pub mod surface;
pub mod transform;

// Re-export commonly used types
pub use clip::{clip_segment, ClipRect, Point2, Segment};
pub use config::{Preset, ScreenLayout, VisualizerConfig};
pub use error::ConfigError;
pub use geometry::CubeModel;
pub use input::{HeldKeys, InteractionConfig, Key};
pub use math::{matmul, matvec, Mat4, Vec3, Vec4};
pub use pipeline::{FrameMatrices, ProjectedCube, Viewport};
pub use projection::{CameraState, Lens};
pub use scene::Visualizer;
pub use surface::{Color, CommandRecorder, DrawCommand, DrawSurface, FrameHandler};
pub use transform::{InteractionState, Transform, TranslationBounds};

/// Visualizer configuration and presets
use log::debug;

use crate::clip::{ClipRect, Point2};
use crate::error::ConfigError;
use crate::geometry::TopDownLayout;
use crate::input::InteractionConfig;
use crate::math::Vec3;
use crate::pipeline::Viewport;
use crate::projection::{CameraState, Lens};
use crate::transform::TranslationBounds;

/// Logical canvas split into a left column of two stacked panes (top-down
/// view above, projected view below) and a right column of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub width: u32,
    pub height: u32,
    /// Physical pixels per logical pixel
    pub pixel_scale: u32,
}

impl ScreenLayout {
    pub fn pane_width(&self) -> u32 {
        self.width / 2
    }

    pub fn pane_height(&self) -> u32 {
        self.height / 2
    }

    /// Top pane as a clip rectangle, edges inclusive
    pub fn top_pane(&self) -> ClipRect {
        ClipRect::new(
            0.0,
            0.0,
            self.pane_width() as f32 - 1.0,
            self.pane_height() as f32 - 1.0,
        )
    }

    /// Bottom pane as a clip rectangle, edges inclusive
    pub fn bottom_pane(&self) -> ClipRect {
        ClipRect::new(
            0.0,
            self.pane_height() as f32,
            self.pane_width() as f32 - 1.0,
            self.pane_height() as f32 - 1.0,
        )
    }

    /// Where NDC lands: the bottom pane
    pub fn viewport(&self) -> Viewport {
        Viewport::new(
            0.0,
            self.pane_height() as f32,
            self.pane_width() as f32,
            self.pane_height() as f32,
        )
    }

    /// Left edge of the diagnostics column
    pub fn text_column(&self) -> f32 {
        self.pane_width() as f32
    }
}

impl Default for ScreenLayout {
    fn default() -> Self {
        Self {
            width: 600,
            height: 380,
            pixel_scale: 2,
        }
    }
}

/// Named sets of variant constants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    /// Cube stays at least one unit in front of the camera
    #[default]
    Standard,
    /// Cube may pass the camera (z up to 0.5)
    CloseUp,
}

impl Preset {
    pub fn bounds(self) -> TranslationBounds {
        match self {
            Preset::Standard => TranslationBounds::STANDARD,
            Preset::CloseUp => TranslationBounds::CLOSE_UP,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualizerConfig {
    pub screen: ScreenLayout,
    pub camera: CameraState,
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub interaction: InteractionConfig,
    /// Camera position in the top-down pane
    pub topdown_origin: Point2,
    /// Grid cells stacked over the pane height
    pub grid_cells: u32,
}

impl VisualizerConfig {
    pub fn from_preset(preset: Preset) -> Self {
        let mut config = Self::default();
        config.interaction.bounds = preset.bounds();
        debug!("config preset {:?}: bounds {:?}", preset, config.interaction.bounds);
        config
    }

    /// Lens whose aspect ratio matches the projected pane
    pub fn lens(&self) -> Lens {
        Lens {
            fov_y_degrees: self.fov_y_degrees,
            aspect: self.screen.viewport().aspect(),
            near: self.near,
            far: self.far,
        }
    }

    pub fn topdown_layout(&self) -> TopDownLayout {
        TopDownLayout {
            pane: self.screen.top_pane(),
            origin: self.topdown_origin,
            cell_size: (self.screen.pane_height() / self.grid_cells.max(1)) as f32,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let screen = &self.screen;
        if screen.pane_width() < 2 || screen.pane_height() < 2 {
            return Err(ConfigError::EmptyScreen {
                width: screen.width,
                height: screen.height,
            });
        }
        if screen.pixel_scale == 0 {
            return Err(ConfigError::ZeroPixelScale);
        }
        if self.grid_cells == 0 || self.grid_cells > screen.pane_height() {
            return Err(ConfigError::EmptyGrid);
        }

        let bounds = &self.interaction.bounds;
        if !(bounds.x_min <= bounds.x_max) {
            return Err(ConfigError::InvertedBounds {
                axis: 'x',
                min: bounds.x_min,
                max: bounds.x_max,
            });
        }
        if !(bounds.z_min <= bounds.z_max) {
            return Err(ConfigError::InvertedBounds {
                axis: 'z',
                min: bounds.z_min,
                max: bounds.z_max,
            });
        }

        for (name, value) in [
            ("move speed", self.interaction.move_speed),
            ("yaw factor", self.interaction.yaw_factor),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Speed { name, value });
            }
        }

        if !(self.fov_y_degrees > 0.0 && self.fov_y_degrees < 180.0) {
            return Err(ConfigError::FieldOfView(self.fov_y_degrees));
        }
        if !(self.near > 0.0) {
            return Err(ConfigError::NearPlane(self.near));
        }
        if !(self.far > self.near) {
            return Err(ConfigError::FarPlane {
                near: self.near,
                far: self.far,
            });
        }

        // look_at normalizes both of these
        let forward = self.camera.target.sub(self.camera.eye);
        if forward.length() == 0.0 {
            return Err(ConfigError::EyeAtTarget);
        }
        if forward.cross(self.camera.up).length() <= f32::EPSILON * forward.length() {
            return Err(ConfigError::UpParallelToView);
        }

        Ok(())
    }
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            screen: ScreenLayout::default(),
            camera: CameraState::new(
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(0.0, 0.0, -1.0),
                Vec3::new(0.0, 1.0, 0.0),
            ),
            fov_y_degrees: Lens::DEFAULT_FOV_Y_DEGREES,
            near: Lens::DEFAULT_NEAR,
            far: Lens::DEFAULT_FAR,
            interaction: InteractionConfig::default(),
            topdown_origin: Point2::new(156.0, 156.0),
            grid_cells: 14,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = VisualizerConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.screen.pane_width(), 300);
        assert_eq!(config.screen.pane_height(), 190);
        assert_eq!(config.topdown_layout().cell_size, 13.0);
        assert!((config.lens().aspect - 300.0 / 190.0).abs() < 1e-6);
    }

    #[test]
    fn test_presets() {
        assert_eq!(
            VisualizerConfig::from_preset(Preset::Standard).interaction.bounds.z_max,
            -1.0
        );
        let close = VisualizerConfig::from_preset(Preset::CloseUp);
        assert_eq!(close.interaction.bounds.z_max, 0.5);
        assert_eq!(close.validate(), Ok(()));
    }

    #[test]
    fn test_panes() {
        let screen = ScreenLayout::default();
        assert_eq!(screen.top_pane(), ClipRect::new(0.0, 0.0, 299.0, 189.0));
        assert_eq!(screen.bottom_pane(), ClipRect::new(0.0, 190.0, 299.0, 189.0));
        assert_eq!(screen.viewport(), Viewport::new(0.0, 190.0, 300.0, 190.0));
        assert_eq!(screen.text_column(), 300.0);
    }

    #[test]
    fn test_rejects_bad_camera() {
        let mut config = VisualizerConfig::default();
        config.camera.target = config.camera.eye;
        assert_eq!(config.validate(), Err(ConfigError::EyeAtTarget));

        let mut config = VisualizerConfig::default();
        config.camera.up = Vec3::new(0.0, 0.0, 2.0);
        assert_eq!(config.validate(), Err(ConfigError::UpParallelToView));
    }

    #[test]
    fn test_rejects_bad_lens() {
        let mut config = VisualizerConfig::default();
        config.near = 0.0;
        assert_eq!(config.validate(), Err(ConfigError::NearPlane(0.0)));

        let mut config = VisualizerConfig::default();
        config.far = 0.05;
        assert!(matches!(config.validate(), Err(ConfigError::FarPlane { .. })));

        let mut config = VisualizerConfig::default();
        config.fov_y_degrees = 180.0;
        assert_eq!(config.validate(), Err(ConfigError::FieldOfView(180.0)));

        config.fov_y_degrees = f32::NAN;
        assert!(matches!(config.validate(), Err(ConfigError::FieldOfView(_))));
    }

    #[test]
    fn test_rejects_bad_bounds_and_layout() {
        let mut config = VisualizerConfig::default();
        config.interaction.bounds.z_min = 1.0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvertedBounds {
                axis: 'z',
                min: 1.0,
                max: -1.0
            })
        );

        let mut config = VisualizerConfig::default();
        config.screen.width = 1;
        assert!(matches!(config.validate(), Err(ConfigError::EmptyScreen { .. })));

        let mut config = VisualizerConfig::default();
        config.screen.pixel_scale = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroPixelScale));

        let mut config = VisualizerConfig::default();
        config.grid_cells = 0;
        assert_eq!(config.validate(), Err(ConfigError::EmptyGrid));

        let mut config = VisualizerConfig::default();
        config.interaction.move_speed = -1.0;
        assert!(matches!(config.validate(), Err(ConfigError::Speed { .. })));
    }

    #[test]
    fn test_error_messages() {
        let message = ConfigError::FarPlane { near: 1.0, far: 0.5 }.to_string();
        assert_eq!(message, "far plane 0.5 must lie beyond near plane 1");
    }
}

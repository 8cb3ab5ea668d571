/// The visualizer: per-frame state update and the draw calls for both panes
use log::{debug, trace};

use crate::clip::{ClipRect, Point2};
use crate::config::VisualizerConfig;
use crate::diagnostics::{self, Panel};
use crate::error::ConfigError;
use crate::geometry::{CubeModel, ProxySquare, TopDownLayout};
use crate::input::HeldKeys;
use crate::pipeline::{project_cube, FrameMatrices, ProjectedCube, VertexTrace};
use crate::projection::{CameraState, Lens};
use crate::surface::{Color, DrawSurface, FrameHandler};
use crate::transform::InteractionState;

const PROXY_CENTER_RADIUS: f32 = 2.0;

/// Owns the cube state and draws one frame per [`FrameHandler`] call
#[derive(Debug, Clone)]
pub struct Visualizer {
    config: VisualizerConfig,
    camera: CameraState,
    state: InteractionState,
    frames: u64,
}

impl Visualizer {
    pub fn new(config: VisualizerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        debug!(
            "visualizer {}x{} (scale {}), bounds {:?}",
            config.screen.width,
            config.screen.height,
            config.screen.pixel_scale,
            config.interaction.bounds
        );
        let mut state = config.interaction.initial;
        state.clamp(&config.interaction.bounds);
        Ok(Self {
            camera: config.camera,
            state,
            config,
            frames: 0,
        })
    }

    pub fn config(&self) -> &VisualizerConfig {
        &self.config
    }

    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    /// The eye must stay off the target and `up` off the view direction.
    pub fn camera_mut(&mut self) -> &mut CameraState {
        &mut self.camera
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// Replace the cube state; it is clamped into the configured bounds.
    pub fn set_state(&mut self, mut state: InteractionState) {
        state.clamp(&self.config.interaction.bounds);
        self.state = state;
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn lens(&self) -> Lens {
        self.config.lens()
    }

    pub fn matrices(&self) -> FrameMatrices {
        FrameMatrices::build(&self.state, &self.camera, &self.lens())
    }

    pub fn projected_cube(&self) -> ProjectedCube {
        project_cube(&self.matrices(), &self.config.screen.viewport())
    }

    /// Diagnostics panels for the current state
    pub fn panels(&self) -> Vec<Panel> {
        let matrices = self.matrices();
        let trace = VertexTrace::of(&matrices, CubeModel::VERTICES[0]);
        let cube = project_cube(&matrices, &self.config.screen.viewport());
        diagnostics::panels(&matrices, &self.camera, &trace, &cube)
    }

    /// Diagnostics panels as plain text
    pub fn diagnostics(&self) -> String {
        self.panels()
            .iter()
            .map(|panel| format!("{}\n{}", panel.title, panel.body))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Draw the current state without advancing it
    pub fn render(&self, surface: &mut dyn DrawSurface) {
        surface.clear(Color::Black);

        let layout = self.config.topdown_layout();
        self.draw_top_down(surface, &layout);

        let matrices = self.matrices();
        let cube = project_cube(&matrices, &self.config.screen.viewport());
        self.draw_projected(surface, &cube);

        self.draw_borders(surface);

        let trace = VertexTrace::of(&matrices, CubeModel::VERTICES[0]);
        let column = self.config.screen.text_column();
        for (index, panel) in diagnostics::panels(&matrices, &self.camera, &trace, &cube)
            .iter()
            .enumerate()
        {
            let (title_at, body_at) = diagnostics::panel_origins(column, index);
            surface.draw_text(title_at, panel.title, panel.color);
            surface.draw_text(body_at, &panel.body, panel.color);
        }
    }

    fn draw_top_down(&self, surface: &mut dyn DrawSurface, layout: &TopDownLayout) {
        let pane = layout.pane;

        for line in layout.grid_rows().iter().chain(layout.grid_columns().iter()) {
            surface.draw_line(line.start, line.end, Color::VeryDarkGrey);
        }
        draw_cross(surface, &pane, layout.origin, Color::DarkYellow);

        let square = ProxySquare::place(&self.state, layout);
        surface.draw_circle(square.center.round(), PROXY_CENTER_RADIUS, Color::Yellow);
        for edge in square.edges() {
            surface.draw_clipped_line(edge.start.round(), edge.end.round(), &pane, Color::Red);
        }

        // camera glyph: body below the origin, lens on top
        let o = layout.origin;
        surface.draw_rect(Point2::new(o.x - 4.0, o.y + 5.0), Point2::new(8.0, 10.0), Color::Blue);
        surface.draw_rect(Point2::new(o.x - 2.0, o.y), Point2::new(4.0, 4.0), Color::Blue);

        for ray in layout.frustum_rays(&self.lens()) {
            surface.draw_clipped_line(ray.start.round(), ray.end.round(), &pane, Color::Blue);
        }
    }

    fn draw_projected(&self, surface: &mut dyn DrawSurface, cube: &ProjectedCube) {
        let pane = self.config.screen.bottom_pane();
        let center = Point2::new(
            (pane.x + (pane.width + 1.0) / 2.0).floor(),
            (pane.y + (pane.height + 1.0) / 2.0).floor(),
        );
        draw_cross(surface, &pane, center, Color::DarkYellow);

        for edge in cube.edges() {
            surface.draw_clipped_line(edge.start.round(), edge.end.round(), &pane, Color::White);
        }
    }

    fn draw_borders(&self, surface: &mut dyn DrawSurface) {
        for pane in [self.config.screen.top_pane(), self.config.screen.bottom_pane()] {
            surface.draw_rect(
                Point2::new(pane.x, pane.y),
                Point2::new(pane.width, pane.height),
                Color::White,
            );
        }
    }
}

/// Horizontal and vertical axis lines through `at`, spanning `pane`
fn draw_cross(surface: &mut dyn DrawSurface, pane: &ClipRect, at: Point2, color: Color) {
    surface.draw_line(
        Point2::new(pane.min_x(), at.y),
        Point2::new(pane.max_x(), at.y),
        color,
    );
    surface.draw_line(
        Point2::new(at.x, pane.min_y()),
        Point2::new(at.x, pane.max_y()),
        color,
    );
}

impl FrameHandler for Visualizer {
    fn on_frame_update(
        &mut self,
        elapsed: f32,
        keys: &HeldKeys,
        surface: &mut dyn DrawSurface,
    ) -> bool {
        self.state.advance(elapsed, keys, &self.config.interaction);
        self.frames += 1;
        trace!(
            "frame {} dt={:.4} keys={:#08b} state={:?}",
            self.frames,
            elapsed,
            keys.mask(),
            self.state
        );

        self.render(surface);
        true
    }
}

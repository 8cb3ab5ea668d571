/// Scene geometry: the reference cube and its top-down proxy
use crate::clip::{ClipRect, Point2, Segment};
use crate::math::Vec4;
use crate::projection::Lens;
use crate::transform::InteractionState;

/// Unit cube centred on the object origin
pub struct CubeModel;

impl CubeModel {
    pub const VERTICES: [Vec4; 8] = [
        Vec4::point(-0.5, -0.5, -0.5),
        Vec4::point(0.5, -0.5, -0.5),
        Vec4::point(0.5, 0.5, -0.5),
        Vec4::point(-0.5, 0.5, -0.5),
        Vec4::point(-0.5, -0.5, 0.5),
        Vec4::point(0.5, -0.5, 0.5),
        Vec4::point(0.5, 0.5, 0.5),
        Vec4::point(-0.5, 0.5, 0.5),
    ];

    /// Vertex index pairs: the -Z face, the +Z face, then the four edges
    /// joining them.
    pub const EDGES: [(usize, usize); 12] = [
        (0, 1),
        (1, 2),
        (2, 3),
        (3, 0),
        (4, 5),
        (5, 6),
        (6, 7),
        (7, 4),
        (0, 4),
        (1, 5),
        (2, 6),
        (3, 7),
    ];
}

/// Layout of the top-down pane. Screen x follows world X and screen y
/// follows world Z, so moving the cube away from the camera moves the proxy
/// up the pane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TopDownLayout {
    /// Pane bounds, also the clip rectangle for the frustum wedge
    pub pane: ClipRect,
    /// Camera position in pane pixels
    pub origin: Point2,
    /// Grid spacing in pixels; one world unit spans two cells
    pub cell_size: f32,
}

impl TopDownLayout {
    /// Half the proxy width, also the pixel offset per half world unit
    fn half_extent(&self) -> f32 {
        self.cell_size
    }

    /// Horizontal grid lines as segments spanning the pane
    pub fn grid_rows(&self) -> Vec<Segment> {
        let count = (self.pane.height / self.cell_size) as usize + 1;
        (0..count)
            .map(|row| {
                let y = self.pane.y + row as f32 * self.cell_size;
                Segment::new(
                    Point2::new(self.pane.x, y),
                    Point2::new(self.pane.x + self.pane.width, y),
                )
            })
            .collect()
    }

    /// Vertical grid lines as segments spanning the pane
    pub fn grid_columns(&self) -> Vec<Segment> {
        let count = (self.pane.width / self.cell_size) as usize + 1;
        (0..count)
            .map(|col| {
                let x = self.pane.x + col as f32 * self.cell_size;
                Segment::new(
                    Point2::new(x, self.pane.y),
                    Point2::new(x, self.pane.y + self.pane.height),
                )
            })
            .collect()
    }

    /// The two edges of the horizontal field of view, from the camera to the
    /// top of the pane. Callers clip them to [`TopDownLayout::pane`].
    pub fn frustum_rays(&self, lens: &Lens) -> [Segment; 2] {
        let spread = (lens.horizontal_fov_radians() / 2.0).tan() * self.pane.height;
        let top = self.origin.y - self.pane.height;
        [
            Segment::new(self.origin, Point2::new(self.origin.x - spread, top)),
            Segment::new(self.origin, Point2::new(self.origin.x + spread, top)),
        ]
    }
}

/// The cube seen from above: a square two cells wide
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProxySquare {
    pub center: Point2,
    /// Clockwise on screen starting top-left when yaw is zero
    pub corners: [Point2; 4],
}

impl ProxySquare {
    /// Place the square for the current cube translation and turn it by the
    /// cube's yaw about its centre.
    pub fn place(state: &InteractionState, layout: &TopDownLayout) -> Self {
        let half = layout.half_extent();
        let center = Point2::new(
            layout.origin.x + state.translation_x * half * 2.0,
            layout.origin.y + state.translation_z * half * 2.0,
        );

        let (sin, cos) = state.yaw_degrees.to_radians().sin_cos();
        let offsets = [(-half, -half), (half, -half), (half, half), (-half, half)];
        let corners = offsets.map(|(dx, dy)| {
            Point2::new(
                center.x + dx * cos - dy * sin,
                center.y + dx * sin + dy * cos,
            )
        });

        Self { center, corners }
    }

    pub fn edges(&self) -> [Segment; 4] {
        let c = self.corners;
        [
            Segment::new(c[0], c[1]),
            Segment::new(c[1], c[2]),
            Segment::new(c[2], c[3]),
            Segment::new(c[3], c[0]),
        ]
    }
}

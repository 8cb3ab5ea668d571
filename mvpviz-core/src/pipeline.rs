/// Model → view → projection → viewport pipeline for the cube
use crate::clip::{Point2, Segment};
use crate::geometry::CubeModel;
use crate::math::{matvec, Mat4, Vec4};
use crate::projection::{CameraState, Lens};
use crate::transform::{InteractionState, Transform};

/// Every matrix built for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameMatrices {
    pub translation: Mat4,
    pub rotation: Mat4,
    pub model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
    pub mvp: Mat4,
}

impl FrameMatrices {
    /// Build the whole chain from scratch. The same inputs always give the
    /// same matrices.
    pub fn build(state: &InteractionState, camera: &CameraState, lens: &Lens) -> Self {
        let translation = Transform::translation_matrix(state.translation_x, state.translation_z);
        let rotation = Transform::rotation_y_matrix(state.yaw_degrees);
        let model = Transform::model_matrix(state);
        let view = camera.view_matrix();
        let projection = lens.projection_matrix();
        let mvp = Transform::mvp_matrix(&model, &view, &projection);

        Self {
            translation,
            rotation,
            model,
            view,
            projection,
            mvp,
        }
    }
}

/// Divide x, y and z by w when w is positive.
///
/// Vertices at or behind the eye (`w <= 0`) are passed through untouched.
/// Their coordinates are meaningless on screen, so whatever draws them has
/// to clip.
pub fn perspective_divide(clip: Vec4) -> Vec4 {
    if clip.w > 0.0 {
        Vec4::new(clip.x / clip.w, clip.y / clip.w, clip.z / clip.w, clip.w)
    } else {
        clip
    }
}

/// Pixel region that NDC `[-1, 1]²` is stretched over
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Map NDC x/y to pixels. NDC +y is up, pixel +y is down, so y is
    /// flipped. z and w are carried through.
    pub fn map(&self, ndc: Vec4) -> Vec4 {
        Vec4::new(
            (ndc.x + 1.0) * (self.width - 1.0) * 0.5 + self.x,
            (1.0 - ndc.y) * (self.height - 1.0) * 0.5 + self.y,
            ndc.z,
            ndc.w,
        )
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }
}

/// The cube after projection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedCube {
    /// `mvp · vertex`, before the divide
    pub clip: [Vec4; 8],
    /// Viewport pixels in x/y, NDC depth in z (when w > 0), clip w in w
    pub screen: [Vec4; 8],
}

impl ProjectedCube {
    pub fn screen_point(&self, index: usize) -> Point2 {
        let v = self.screen[index];
        Point2::new(v.x, v.y)
    }

    /// The twelve cube edges in pixel space, unclipped
    pub fn edges(&self) -> impl Iterator<Item = Segment> + '_ {
        CubeModel::EDGES
            .iter()
            .map(move |&(a, b)| Segment::new(self.screen_point(a), self.screen_point(b)))
    }
}

/// Transform one vertex all the way to the viewport.
pub fn project_vertex(mvp: &Mat4, vertex: Vec4, viewport: &Viewport) -> (Vec4, Vec4) {
    let clip = matvec(mvp, vertex);
    (clip, viewport.map(perspective_divide(clip)))
}

/// Run every cube vertex through the frame's MVP and viewport.
pub fn project_cube(matrices: &FrameMatrices, viewport: &Viewport) -> ProjectedCube {
    let mut clip = [Vec4::default(); 8];
    let mut screen = [Vec4::default(); 8];
    for (i, vertex) in CubeModel::VERTICES.iter().enumerate() {
        (clip[i], screen[i]) = project_vertex(&matrices.mvp, *vertex, viewport);
    }
    ProjectedCube { clip, screen }
}

/// One vertex followed through each stage separately, for display
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexTrace {
    pub object: Vec4,
    pub world: Vec4,
    pub view: Vec4,
    pub projected: Vec4,
}

impl VertexTrace {
    pub fn of(matrices: &FrameMatrices, object: Vec4) -> Self {
        let world = matvec(&matrices.model, object);
        let view = matvec(&matrices.view, world);
        let projected = matvec(&matrices.projection, view);
        Self {
            object,
            world,
            view,
            projected,
        }
    }
}

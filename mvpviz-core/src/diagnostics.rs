/// Fixed-width text dumps of the frame's matrices and vertices
use std::fmt::Write;

use crate::clip::Point2;
use crate::math::{Mat4, Vec4};
use crate::pipeline::{FrameMatrices, ProjectedCube, VertexTrace};
use crate::projection::CameraState;
use crate::surface::Color;

/// Vertical distance between panel headings
const PANEL_SPACING: f32 = 60.0;
const FIRST_PANEL_Y: f32 = 10.0;
const BODY_OFFSET_Y: f32 = 15.0;
const TITLE_INDENT: f32 = 10.0;

/// Projected vertices listed in the last panel
const LISTED_VERTICES: usize = 4;

/// A titled block of text in the diagnostics column
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub title: &'static str,
    pub body: String,
    pub color: Color,
}

/// Matrix rows with one vertex as an extra column: `m | v |`
pub fn matrix_with_vertex(m: &Mat4, v: Vec4) -> String {
    let mut out = String::new();
    for (row, value) in m.rows.iter().zip(v.to_array()) {
        for cell in row {
            let _ = write!(out, "{:6.2}", cell);
        }
        let _ = writeln!(out, "    |{:5.2}|", value);
    }
    out
}

pub fn matrix(m: &Mat4) -> String {
    let mut out = String::new();
    for row in &m.rows {
        for cell in row {
            let _ = write!(out, "{:6.2}", cell);
        }
        out.push('\n');
    }
    out
}

pub fn look_at_inputs(camera: &CameraState) -> String {
    let mut out = String::new();
    for (label, v) in [
        ("Eye   ", camera.eye),
        ("Target", camera.target),
        ("Up    ", camera.up),
    ] {
        let _ = writeln!(out, "  {} {:6.2}{:6.2}{:6.2}", label, v.x, v.y, v.z);
    }
    out
}

/// Screen x/y, NDC depth and clip w of each vertex
pub fn screen_vertices(vertices: &[Vec4]) -> String {
    let mut out = String::new();
    for v in vertices {
        let _ = writeln!(out, "{:7.1}{:7.1}{:5.1}{:5.1}", v.x, v.y, v.z, v.w);
    }
    out
}

/// All panels for one frame, top to bottom. `trace` follows the cube's
/// first vertex.
pub fn panels(
    matrices: &FrameMatrices,
    camera: &CameraState,
    trace: &VertexTrace,
    cube: &ProjectedCube,
) -> Vec<Panel> {
    vec![
        Panel {
            title: "Model to world",
            body: matrix_with_vertex(&matrices.model, trace.world),
            color: Color::White,
        },
        Panel {
            title: "LookAt input data",
            body: look_at_inputs(camera),
            color: Color::Grey,
        },
        Panel {
            title: "World to view",
            body: matrix_with_vertex(&matrices.view, trace.view),
            color: Color::White,
        },
        Panel {
            title: "Projection",
            body: matrix_with_vertex(&matrices.projection, trace.projected),
            color: Color::White,
        },
        Panel {
            title: "MVP",
            body: matrix(&matrices.mvp),
            color: Color::White,
        },
        Panel {
            title: "Cube vertices",
            body: screen_vertices(&cube.screen[..LISTED_VERTICES]),
            color: Color::White,
        },
    ]
}

/// Title and body origins of the `index`th panel in a column starting at
/// `column_x`
pub fn panel_origins(column_x: f32, index: usize) -> (Point2, Point2) {
    let y = FIRST_PANEL_Y + index as f32 * PANEL_SPACING;
    (
        Point2::new(column_x + TITLE_INDENT, y),
        Point2::new(column_x, y + BODY_OFFSET_Y),
    )
}

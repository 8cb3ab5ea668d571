/// Cohen–Sutherland line clipping against an axis-aligned rectangle
use log::trace;

// region codes
const INSIDE: u8 = 0b0000;
const LEFT: u8 = 0b0001;
const RIGHT: u8 = 0b0010;
const BOTTOM: u8 = 0b0100;
const TOP: u8 = 0b1000;

/// One clip step per rectangle edge is always enough.
const MAX_CLIP_STEPS: usize = 4;

/// A point in pixel space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn round(self) -> Point2 {
        Point2::new(self.x.round(), self.y.round())
    }

    fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A line segment in pixel space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point2,
    pub end: Point2,
}

impl Segment {
    pub const fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }

    pub fn is_point(&self) -> bool {
        self.start == self.end
    }
}

/// Clip rectangle in pixel space. Both edges are inclusive, so the covered
/// range is `x..=x + width` by `y..=y + height`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ClipRect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn min_x(&self) -> f32 {
        self.x
    }

    pub fn max_x(&self) -> f32 {
        self.x + self.width
    }

    pub fn min_y(&self) -> f32 {
        self.y
    }

    pub fn max_y(&self) -> f32 {
        self.y + self.height
    }

    pub fn contains(&self, p: Point2) -> bool {
        region_code(p, self).is_inside()
    }
}

/// Which sides of a [`ClipRect`] a point lies beyond
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutCode(u8);

impl OutCode {
    pub fn is_inside(self) -> bool {
        self.0 == INSIDE
    }

    pub fn left(self) -> bool {
        self.0 & LEFT != 0
    }

    pub fn right(self) -> bool {
        self.0 & RIGHT != 0
    }

    /// Beyond the minimum y edge
    pub fn bottom(self) -> bool {
        self.0 & BOTTOM != 0
    }

    /// Beyond the maximum y edge
    pub fn top(self) -> bool {
        self.0 & TOP != 0
    }

    pub fn bits(self) -> u8 {
        self.0
    }
}

/// Classify `p` against `rect`. Points on an edge are inside.
pub fn region_code(p: Point2, rect: &ClipRect) -> OutCode {
    let mut code = INSIDE;
    if p.x < rect.min_x() {
        code |= LEFT;
    } else if p.x > rect.max_x() {
        code |= RIGHT;
    }
    if p.y < rect.min_y() {
        code |= BOTTOM;
    } else if p.y > rect.max_y() {
        code |= TOP;
    }
    OutCode(code)
}

/// Move the outside endpoint `from` onto the edge named in `code` along the
/// line toward `toward`. The coordinate of the crossed edge is set exactly.
fn intersect(from: Point2, toward: Point2, code: OutCode, rect: &ClipRect) -> Point2 {
    if code.top() || code.bottom() {
        let y = if code.top() { rect.max_y() } else { rect.min_y() };
        let x = crossing(y, (from.y, from.x), (toward.y, toward.x));
        Point2::new(x, y)
    } else {
        let x = if code.right() { rect.max_x() } else { rect.min_x() };
        let y = crossing(x, (from.x, from.y), (toward.x, toward.y));
        Point2::new(x, y)
    }
}

/// Where the line through `p` and `q` meets `edge` on their first
/// coordinate, as the second coordinate.
///
/// The edge lies between the two, so the ratio stays within `[0, 1]` and
/// nothing overflows. Measuring from the endpoint nearer the edge keeps the
/// result precise when the other one is very far away.
fn crossing(edge: f32, p: (f32, f32), q: (f32, f32)) -> f32 {
    let (base, other) = if (edge - p.0).abs() <= (edge - q.0).abs() {
        (p, q)
    } else {
        (q, p)
    };
    let t = (edge - base.0) / (other.0 - base.0);
    base.1 + t * (other.1 - base.1)
}

/// Clip the segment `a`–`b` to `rect`.
///
/// Returns the visible part, or `None` when nothing of the segment lies in
/// the rectangle. Segments already inside come back unchanged. A segment
/// whose endpoints coincide comes back as that point if it is inside.
/// Endpoints with infinite or NaN coordinates are rejected.
pub fn clip_segment(a: Point2, b: Point2, rect: &ClipRect) -> Option<Segment> {
    if !a.is_finite() || !b.is_finite() {
        trace!("rejecting non-finite segment {:?} -> {:?}", a, b);
        return None;
    }

    let (mut a, mut b) = (a, b);
    let mut code_a = region_code(a, rect);
    let mut code_b = region_code(b, rect);

    for _ in 0..MAX_CLIP_STEPS {
        if (code_a.0 | code_b.0) == INSIDE {
            return Some(Segment::new(a, b));
        }
        if (code_a.0 & code_b.0) != INSIDE {
            return None;
        }

        // at least one endpoint is outside, clip that one
        if !code_a.is_inside() {
            a = intersect(a, b, code_a, rect);
            code_a = region_code(a, rect);
        } else {
            b = intersect(b, a, code_b, rect);
            code_b = region_code(b, rect);
        }
    }

    // still outside after four steps only when rounding pushed an
    // intersection just past a corner
    if (code_a.0 | code_b.0) == INSIDE {
        Some(Segment::new(a, b))
    } else {
        None
    }
}

/// Drawing surface and frame callback contracts
use crate::clip::{clip_segment, ClipRect, Point2};
use crate::input::HeldKeys;

/// Palette used by the visualizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
    Grey,
    VeryDarkGrey,
    Red,
    Blue,
    Yellow,
    DarkYellow,
}

impl Color {
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Color::Black => (0, 0, 0),
            Color::White => (255, 255, 255),
            Color::Grey => (192, 192, 192),
            Color::VeryDarkGrey => (64, 64, 64),
            Color::Red => (255, 0, 0),
            Color::Blue => (0, 0, 255),
            Color::Yellow => (255, 255, 0),
            Color::DarkYellow => (128, 128, 0),
        }
    }
}

/// Primitive 2D drawing operations in logical pixels.
///
/// Implementations must tolerate coordinates far outside their area.
pub trait DrawSurface {
    fn clear(&mut self, color: Color);

    fn draw_line(&mut self, from: Point2, to: Point2, color: Color);

    /// Draw the part of the line inside `clip`; draws nothing when the line
    /// misses it.
    fn draw_clipped_line(&mut self, from: Point2, to: Point2, clip: &ClipRect, color: Color) {
        if let Some(segment) = clip_segment(from, to, clip) {
            self.draw_line(segment.start, segment.end, color);
        }
    }

    /// Outline of the rectangle spanning `origin` to `origin + size`
    fn draw_rect(&mut self, origin: Point2, size: Point2, color: Color);

    /// Outline of a circle
    fn draw_circle(&mut self, center: Point2, radius: f32, color: Color);

    /// Text with its top-left corner at `origin`. `\n` starts a new line.
    fn draw_text(&mut self, origin: Point2, text: &str, color: Color);
}

/// Per-frame callback driven by a front-end.
pub trait FrameHandler {
    /// Advance by `elapsed` seconds with `keys` held and draw the frame onto
    /// `surface`. Returning `false` asks the front-end to stop.
    fn on_frame_update(
        &mut self,
        elapsed: f32,
        keys: &HeldKeys,
        surface: &mut dyn DrawSurface,
    ) -> bool;
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Line {
        from: Point2,
        to: Point2,
        color: Color,
    },
    Rect {
        origin: Point2,
        size: Point2,
        color: Color,
    },
    Circle {
        center: Point2,
        radius: f32,
        color: Color,
    },
    Text {
        origin: Point2,
        text: String,
        color: Color,
    },
}

/// Surface that records draw calls instead of drawing them
#[derive(Debug, Default)]
pub struct CommandRecorder {
    commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Every line drawn in `color`
    pub fn lines(&self, color: Color) -> impl Iterator<Item = (Point2, Point2)> + '_ {
        self.commands.iter().filter_map(move |command| match command {
            DrawCommand::Line { from, to, color: c } if *c == color => Some((*from, *to)),
            _ => None,
        })
    }

    /// All text drawn, joined by newlines
    pub fn text(&self) -> String {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl DrawSurface for CommandRecorder {
    fn clear(&mut self, color: Color) {
        // everything before a clear is invisible
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(color));
    }

    fn draw_line(&mut self, from: Point2, to: Point2, color: Color) {
        self.commands.push(DrawCommand::Line { from, to, color });
    }

    fn draw_rect(&mut self, origin: Point2, size: Point2, color: Color) {
        self.commands.push(DrawCommand::Rect {
            origin,
            size,
            color,
        });
    }

    fn draw_circle(&mut self, center: Point2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn draw_text(&mut self, origin: Point2, text: &str, color: Color) {
        self.commands.push(DrawCommand::Text {
            origin,
            text: text.to_string(),
            color,
        });
    }
}

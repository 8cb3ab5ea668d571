/// MVPviz Web - the visualizer on an HTML canvas
///
/// Draws through the 2D canvas context; the page owns the animation loop and
/// keyboard listeners and calls `frame` once per tick.
use log::{debug, warn, LevelFilter};
use mvpviz_core::{
    Color, DrawSurface, FrameHandler, HeldKeys, Point2, Visualizer, VisualizerConfig,
};
use std::f64::consts::PI;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Line height of diagnostics text, logical pixels
const TEXT_LINE_HEIGHT: f64 = 10.0;

fn css(color: Color) -> String {
    let (r, g, b) = color.rgb();
    format!("rgb({}, {}, {})", r, g, b)
}

/// `DrawSurface` over a 2D context already scaled to logical pixels
struct CanvasSurface<'a> {
    context: &'a CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasSurface<'_> {
    fn report(result: Result<(), JsValue>) {
        if let Err(err) = result {
            warn!("canvas call failed: {:?}", err);
        }
    }
}

impl DrawSurface for CanvasSurface<'_> {
    fn clear(&mut self, color: Color) {
        self.context.set_fill_style_str(&css(color));
        self.context.fill_rect(0.0, 0.0, self.width, self.height);
    }

    fn draw_line(&mut self, from: Point2, to: Point2, color: Color) {
        let ctx = self.context;
        ctx.set_stroke_style_str(&css(color));
        ctx.begin_path();
        // centre of the pixel for crisp one-pixel lines
        ctx.move_to(from.x as f64 + 0.5, from.y as f64 + 0.5);
        ctx.line_to(to.x as f64 + 0.5, to.y as f64 + 0.5);
        ctx.stroke();
    }

    fn draw_rect(&mut self, origin: Point2, size: Point2, color: Color) {
        self.context.set_stroke_style_str(&css(color));
        self.context.stroke_rect(
            origin.x as f64 + 0.5,
            origin.y as f64 + 0.5,
            size.x as f64,
            size.y as f64,
        );
    }

    fn draw_circle(&mut self, center: Point2, radius: f32, color: Color) {
        let ctx = self.context;
        ctx.set_stroke_style_str(&css(color));
        ctx.begin_path();
        Self::report(ctx.arc(
            center.x as f64 + 0.5,
            center.y as f64 + 0.5,
            radius.max(0.0) as f64,
            0.0,
            2.0 * PI,
        ));
        ctx.stroke();
    }

    fn draw_text(&mut self, origin: Point2, text: &str, color: Color) {
        self.context.set_fill_style_str(&css(color));
        for (i, line) in text.lines().enumerate() {
            Self::report(self.context.fill_text(
                line,
                origin.x as f64,
                origin.y as f64 + i as f64 * TEXT_LINE_HEIGHT,
            ));
        }
    }
}

/// Runs when the module loads: panics and log records go to the browser
/// console.
#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();
    init_logger();
}

/// Route `log` records to the browser console. Returns `false` when a logger
/// was already installed.
fn init_logger() -> bool {
    match log::set_logger(&wasm_bindgen_console_logger::DEFAULT_LOGGER) {
        Ok(()) => {
            log::set_max_level(LevelFilter::Info);
            true
        }
        Err(_) => false,
    }
}

#[wasm_bindgen]
pub struct WebVisualizer {
    visualizer: Visualizer,
    context: CanvasRenderingContext2d,
}

#[wasm_bindgen]
impl WebVisualizer {
    /// Bind to the canvas with id `canvas_id` and size it for the layout.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<WebVisualizer, JsValue> {
        let config = VisualizerConfig::default();
        let visualizer =
            Visualizer::new(config).map_err(|err| JsValue::from_str(&err.to_string()))?;

        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| JsValue::from_str("no document available"))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element with id '{}'", canvas_id)))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| JsValue::from_str(&format!("'{}' is not a canvas", canvas_id)))?;

        let screen = config.screen;
        canvas.set_width(screen.width * screen.pixel_scale);
        canvas.set_height(screen.height * screen.pixel_scale);

        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let scale = screen.pixel_scale as f64;
        context.scale(scale, scale)?;
        context.set_line_width(1.0);
        context.set_font("9px monospace");
        context.set_text_baseline("top");

        debug!("bound canvas '{}' at {}x{}", canvas_id, screen.width, screen.height);
        Ok(WebVisualizer { visualizer, context })
    }

    /// Advance by `elapsed` seconds with the keys in `key_mask` held
    /// (W=1, A=2, S=4, D=8, Q=16, E=32) and draw the frame. Returns whether
    /// to keep animating.
    pub fn frame(&mut self, elapsed: f32, key_mask: u32) -> bool {
        let screen = self.visualizer.config().screen;
        let mut surface = CanvasSurface {
            context: &self.context,
            width: screen.width as f64,
            height: screen.height as f64,
        };
        self.visualizer
            .on_frame_update(elapsed, &HeldKeys::from_mask(key_mask), &mut surface)
    }

    /// Diagnostics panels as plain text
    pub fn diagnostics(&self) -> String {
        self.visualizer.diagnostics()
    }

    /// Frames run so far
    pub fn frames(&self) -> f64 {
        self.visualizer.frames() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_colors() {
        assert_eq!(css(Color::Black), "rgb(0, 0, 0)");
        assert_eq!(css(Color::Yellow), "rgb(255, 255, 0)");
    }

    #[test]
    fn test_logger_installed_once() {
        assert!(init_logger());
        assert_eq!(log::max_level(), LevelFilter::Info);
        assert!(!init_logger());
    }
}

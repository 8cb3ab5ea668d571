/// Terminal front-end for the transform pipeline visualizer
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use log::{debug, warn};
use mvpviz_core::{FrameHandler, Visualizer, VisualizerConfig};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod error;
pub mod keys;
pub mod renderer;

pub use error::TerminalError;
pub use keys::KeyTracker;
pub use renderer::TerminalCanvas;

/// Rows kept free below the canvas for the status line
const STATUS_ROWS: u16 = 1;

/// Main application struct for the terminal visualizer
pub struct TerminalApp {
    visualizer: Visualizer,
    canvas: TerminalCanvas,
    keys: KeyTracker,
    frame_time: Duration,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(config: VisualizerConfig, target_fps: u32) -> Result<Self, TerminalError> {
        let visualizer = Visualizer::new(config)?;
        let (columns, rows) = terminal::size()?;
        let screen = visualizer.config().screen;

        Ok(Self {
            canvas: TerminalCanvas::new(
                screen.width,
                screen.height,
                columns as usize,
                rows.saturating_sub(STATUS_ROWS) as usize,
            ),
            visualizer,
            keys: KeyTracker::new(false),
            frame_time: Duration::from_secs(1) / target_fps.max(1),
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn visualizer(&self) -> &Visualizer {
        &self.visualizer
    }

    pub fn run(&mut self) -> Result<(), TerminalError> {
        // checked before raw mode so the warning lands on a normal screen
        let enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if !enhanced {
            warn!("terminal does not report key releases; keys latch for a moment after each press");
        }
        self.keys = KeyTracker::new(enhanced);

        terminal::enable_raw_mode()?;
        let mut out = stdout();
        execute!(out, terminal::EnterAlternateScreen, cursor::Hide)?;
        if enhanced {
            execute!(
                out,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }

        let result = self.main_loop();

        // Cleanup
        let pop = if enhanced {
            execute!(out, PopKeyboardEnhancementFlags)
        } else {
            Ok(())
        };
        let steps = [
            pop,
            terminal::disable_raw_mode(),
            execute!(out, terminal::LeaveAlternateScreen, cursor::Show),
        ];

        first_error(result, steps).map_err(TerminalError::from)
    }

    fn main_loop(&mut self) -> io::Result<()> {
        debug!("frame loop started, {:?} per frame", self.frame_time);
        let mut previous = Instant::now();
        self.last_frame = previous;

        while self.running {
            let frame_start = Instant::now();

            // Handle input
            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?, frame_start)?;
            }
            if !self.running {
                break;
            }

            let elapsed = frame_start.duration_since(previous).as_secs_f32();
            previous = frame_start;
            let held = self.keys.held(frame_start);
            if !self
                .visualizer
                .on_frame_update(elapsed, &held, &mut self.canvas)
            {
                self.running = false;
            }

            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let spent = frame_start.elapsed();
            if spent < self.frame_time {
                std::thread::sleep(self.frame_time - spent);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        debug!("frame loop stopped after {} frames", self.visualizer.frames());
        Ok(())
    }

    fn handle_event(&mut self, event: Event, now: Instant) -> io::Result<()> {
        match event {
            Event::Key(key) if is_quit(&key) => {
                self.running = false;
            }
            Event::Key(key) => self.keys.handle(&key, now),
            Event::Resize(columns, rows) => {
                debug!("terminal resized to {}x{}", columns, rows);
                self.canvas
                    .resize(columns as usize, rows.saturating_sub(STATUS_ROWS) as usize);
                execute!(stdout(), terminal::Clear(ClearType::All))?;
            }
            Event::FocusLost => self.keys.reset(),
            _ => {}
        }
        Ok(())
    }

    fn render(&mut self) -> io::Result<()> {
        let mut stdout = stdout();
        self.canvas.draw(&mut stdout)?;

        // Status line
        let state = self.visualizer.state();
        queue!(
            stdout,
            cursor::MoveTo(0, self.canvas.rows() as u16),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "MVPviz | FPS: {:.1} | x {:5.2} z {:5.2} yaw {:6.1} | WASD=Move Q/E=Turn Esc=Quit",
                self.fps, state.translation_x, state.translation_z, state.yaw_degrees
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

/// `result`, or else the first failed cleanup step. Every step has already
/// run by the time this is called.
fn first_error<const N: usize>(
    result: io::Result<()>,
    cleanup: [io::Result<()>; N],
) -> io::Result<()> {
    result?;
    cleanup.into_iter().collect()
}

/// Esc, or Ctrl-C which raw mode delivers as a key press
fn is_quit(key: &KeyEvent) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    match key.code {
        KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers, kind: KeyEventKind) -> KeyEvent {
        KeyEvent::new_with_kind(code, modifiers, kind)
    }

    #[test]
    fn test_quit_keys() {
        assert!(is_quit(&key(KeyCode::Esc, KeyModifiers::NONE, KeyEventKind::Press)));
        assert!(is_quit(&key(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
            KeyEventKind::Press
        )));
        assert!(!is_quit(&key(KeyCode::Char('c'), KeyModifiers::NONE, KeyEventKind::Press)));
        assert!(!is_quit(&key(KeyCode::Char('q'), KeyModifiers::NONE, KeyEventKind::Press)));
        assert!(!is_quit(&key(KeyCode::Esc, KeyModifiers::NONE, KeyEventKind::Release)));
    }

    #[test]
    fn test_loop_error_wins_over_cleanup_errors() {
        let failed = |msg: &str| -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::Other, msg.to_string()))
        };

        let err = first_error(failed("loop"), [failed("pop"), Ok(()), failed("leave")]).unwrap_err();
        assert_eq!(err.to_string(), "loop");

        let err = first_error(Ok(()), [Ok(()), failed("raw mode"), failed("leave")]).unwrap_err();
        assert_eq!(err.to_string(), "raw mode");

        assert!(first_error(Ok(()), [Ok(()), Ok(()), Ok(())]).is_ok());
    }

    #[test]
    fn test_visualizer_draws_into_canvas() {
        let mut vis = Visualizer::new(VisualizerConfig::default()).unwrap();
        let mut canvas = TerminalCanvas::new(600, 380, 120, 38);
        assert!(vis.on_frame_update(0.0, &mvpviz_core::HeldKeys::none(), &mut canvas));

        // text column starts at logical x 300, i.e. cell 60
        assert!(canvas.row_text(1).contains("Model to world"));
        // pane border along the top row
        assert_eq!(canvas.cell(0, 0).map(|(_, color)| color), Some(mvpviz_core::Color::White));
    }
}

/// Held-key tracking on top of crossterm key events
use std::collections::HashMap;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use mvpviz_core::{HeldKeys, Key};

/// How long a key counts as held after a press or repeat when the terminal
/// never reports releases. Covers the gap before auto-repeat kicks in.
pub const DEFAULT_LATCH: Duration = Duration::from_millis(150);

/// Turns a stream of key events into the set of keys held right now.
///
/// With release events (keyboard enhancement enabled) a key is held from its
/// press until its release. Without them a key is held for `latch` after the
/// last press or repeat seen for it.
#[derive(Debug, Clone)]
pub struct KeyTracker {
    release_events: bool,
    latch: Duration,
    held: HeldKeys,
    last_seen: HashMap<Key, Instant>,
}

impl KeyTracker {
    pub fn new(release_events: bool) -> Self {
        Self::with_latch(release_events, DEFAULT_LATCH)
    }

    pub fn with_latch(release_events: bool, latch: Duration) -> Self {
        Self {
            release_events,
            latch,
            held: HeldKeys::none(),
            last_seen: HashMap::new(),
        }
    }

    pub fn release_events(&self) -> bool {
        self.release_events
    }

    /// Feed one key event observed at `now`. Keys other than WASDQE are
    /// ignored.
    pub fn handle(&mut self, event: &KeyEvent, now: Instant) {
        let key = match event.code {
            KeyCode::Char(c) => Key::from_char(c),
            _ => None,
        };
        let Some(key) = key else {
            return;
        };

        match event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.held.press(key);
                self.last_seen.insert(key, now);
            }
            KeyEventKind::Release => {
                self.held.release(key);
                self.last_seen.remove(&key);
            }
        }
    }

    /// Keys held at `now`
    pub fn held(&mut self, now: Instant) -> HeldKeys {
        if !self.release_events {
            let latch = self.latch;
            let held = &mut self.held;
            self.last_seen.retain(|key, seen| {
                let live = now.saturating_duration_since(*seen) < latch;
                if !live {
                    held.release(*key);
                }
                live
            });
        }
        self.held
    }

    /// Forget every key, e.g. after focus loss
    pub fn reset(&mut self) {
        self.held = HeldKeys::none();
        self.last_seen.clear();
    }
}

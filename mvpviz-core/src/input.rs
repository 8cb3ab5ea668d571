/// Held-key state and the per-frame interaction update
use crate::transform::{InteractionState, TranslationBounds};

/// Logical keys the visualizer reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Move the cube away from the camera (-Z)
    W,
    /// Move left (-X)
    A,
    /// Move toward the camera (+Z)
    S,
    /// Move right (+X)
    D,
    /// Turn the cube (negative yaw)
    Q,
    /// Turn the cube (positive yaw)
    E,
}

impl Key {
    pub const ALL: [Key; 6] = [Key::W, Key::A, Key::S, Key::D, Key::Q, Key::E];

    fn bit(self) -> u8 {
        match self {
            Key::W => 1 << 0,
            Key::A => 1 << 1,
            Key::S => 1 << 2,
            Key::D => 1 << 3,
            Key::Q => 1 << 4,
            Key::E => 1 << 5,
        }
    }

    pub fn from_char(c: char) -> Option<Key> {
        match c.to_ascii_lowercase() {
            'w' => Some(Key::W),
            'a' => Some(Key::A),
            's' => Some(Key::S),
            'd' => Some(Key::D),
            'q' => Some(Key::Q),
            'e' => Some(Key::E),
            _ => None,
        }
    }
}

/// Set of keys currently held down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeldKeys(u8);

impl HeldKeys {
    pub fn none() -> Self {
        Self(0)
    }

    /// Build from a bit mask: W=1, A=2, S=4, D=8, Q=16, E=32. Unknown bits are
    /// ignored.
    pub fn from_mask(mask: u32) -> Self {
        let known = Key::ALL.iter().fold(0u8, |acc, key| acc | key.bit());
        Self((mask & known as u32) as u8)
    }

    pub fn mask(&self) -> u32 {
        self.0 as u32
    }

    pub fn press(&mut self, key: Key) {
        self.0 |= key.bit();
    }

    pub fn release(&mut self, key: Key) {
        self.0 &= !key.bit();
    }

    pub fn with(mut self, key: Key) -> Self {
        self.press(key);
        self
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.0 & key.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// -1, 0 or +1 depending on which of the two keys is held
    fn axis(&self, negative: Key, positive: Key) -> f32 {
        let mut value = 0.0;
        if self.is_held(positive) {
            value += 1.0;
        }
        if self.is_held(negative) {
            value -= 1.0;
        }
        value
    }
}

impl FromIterator<Key> for HeldKeys {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        iter.into_iter().fold(HeldKeys::none(), HeldKeys::with)
    }
}

/// Speeds and limits for keyboard control
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionConfig {
    /// World units per second
    pub move_speed: f32,
    /// Degrees of yaw per world unit of movement step
    pub yaw_factor: f32,
    pub bounds: TranslationBounds,
    pub initial: InteractionState,
}

impl InteractionConfig {
    /// Yaw rate in degrees per second
    pub fn yaw_speed(&self) -> f32 {
        self.move_speed * self.yaw_factor
    }
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            move_speed: 2.0,
            yaw_factor: 30.0,
            bounds: TranslationBounds::STANDARD,
            initial: InteractionState::default(),
        }
    }
}

impl InteractionState {
    /// Integrate one frame of held keys over `elapsed` seconds, then clamp the
    /// translation and wrap the yaw.
    pub fn advance(&mut self, elapsed: f32, keys: &HeldKeys, config: &InteractionConfig) {
        let step = config.move_speed * elapsed.max(0.0);

        self.translation_x += keys.axis(Key::A, Key::D) * step;
        self.translation_z += keys.axis(Key::W, Key::S) * step;
        self.yaw_degrees += keys.axis(Key::Q, Key::E) * step * config.yaw_factor;

        self.clamp(&config.bounds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_keys() {
        let mut keys = HeldKeys::none();
        assert!(keys.is_empty());
        keys.press(Key::W);
        keys.press(Key::E);
        assert!(keys.is_held(Key::W));
        assert!(keys.is_held(Key::E));
        assert!(!keys.is_held(Key::S));
        keys.release(Key::W);
        assert!(!keys.is_held(Key::W));
        assert_eq!(keys.mask(), 32);
    }

    #[test]
    fn test_mask_round_trip_drops_unknown_bits() {
        let keys = HeldKeys::from_mask(0b1_0000_0101);
        assert!(keys.is_held(Key::W));
        assert!(keys.is_held(Key::S));
        assert_eq!(keys.mask(), 0b101);
    }

    #[test]
    fn test_from_char() {
        assert_eq!(Key::from_char('D'), Some(Key::D));
        assert_eq!(Key::from_char('q'), Some(Key::Q));
        assert_eq!(Key::from_char('x'), None);
    }

    #[test]
    fn test_advance_moves_by_speed_times_elapsed() {
        let config = InteractionConfig::default();
        let mut state = InteractionState::default();

        state.advance(0.25, &[Key::D, Key::W].into_iter().collect(), &config);
        assert!((state.translation_x - 0.5).abs() < 1e-6);
        assert!((state.translation_z - (-2.5)).abs() < 1e-6);

        state.advance(0.5, &HeldKeys::none().with(Key::E), &config);
        assert!((state.yaw_degrees - 30.0).abs() < 1e-4);
    }

    #[test]
    fn test_opposing_keys_cancel() {
        let config = InteractionConfig::default();
        let mut state = InteractionState::default();
        let keys: HeldKeys = Key::ALL.into_iter().collect();
        state.advance(1.0, &keys, &config);
        assert_eq!(state, InteractionState::default());
    }

    #[test]
    fn test_advance_clamps_translation() {
        let config = InteractionConfig::default();
        let mut state = InteractionState::default();
        state.advance(10.0, &HeldKeys::none().with(Key::S).with(Key::A), &config);
        assert_eq!(state.translation_z, -1.0);
        assert_eq!(state.translation_x, -5.0);

        state.advance(10.0, &HeldKeys::none().with(Key::W).with(Key::D), &config);
        assert_eq!(state.translation_z, -5.0);
        assert_eq!(state.translation_x, 4.5);
    }

    #[test]
    fn test_advance_wraps_yaw_both_ways() {
        let config = InteractionConfig::default();
        let mut state = InteractionState::default();

        // 60 degrees per second
        state.advance(1.0 / 6.0, &HeldKeys::none().with(Key::Q), &config);
        assert!((state.yaw_degrees - 350.0).abs() < 1e-3);

        state.advance(1.0 / 3.0, &HeldKeys::none().with(Key::E), &config);
        assert!((state.yaw_degrees - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_no_keys_no_change() {
        let config = InteractionConfig::default();
        let mut state = InteractionState::new(1.0, -3.0, 45.0);
        state.advance(0.016, &HeldKeys::none(), &config);
        assert_eq!(state, InteractionState::new(1.0, -3.0, 45.0));
    }
}

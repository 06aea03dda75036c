//! Held-key auto-repeat for terminal environments.
//!
//! A pressed movement key fires once immediately, then repeats after
//! `KEY_REPEAT_DELAY_MS` at `KEY_REPEAT_INTERVAL_MS` — the same
//! delay/interval pair for horizontal movement and down. Terminals that do
//! not emit key release events are handled by a timeout.

use arrayvec::ArrayVec;
use crossterm::event::KeyCode;

use blockfall_types::{GameAction, KEY_REPEAT_DELAY_MS, KEY_REPEAT_INTERVAL_MS};

use crate::map::action_for_key;

/// Direction for horizontal movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalDirection {
    Left,
    Right,
    None,
}

/// Tracks held movement keys and produces repeat actions per tick.
#[derive(Debug, Clone)]
pub struct InputHandler {
    horizontal: HorizontalDirection,
    down_held: bool,
    last_key_time: std::time::Instant,
    horizontal_delay_timer: u32,
    down_delay_timer: u32,
    horizontal_repeat_accumulator: u32,
    down_repeat_accumulator: u32,
    repeat_delay: u32,
    repeat_interval: u32,
    key_release_timeout_ms: u32,
}

// In terminals without key-release events, a short timeout prevents a single
// tap from turning into a sustained "held" state that keeps repeating.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

impl InputHandler {
    pub fn new() -> Self {
        Self::with_config(KEY_REPEAT_DELAY_MS, KEY_REPEAT_INTERVAL_MS)
    }

    pub fn with_config(repeat_delay: u32, repeat_interval: u32) -> Self {
        Self {
            horizontal: HorizontalDirection::None,
            down_held: false,
            last_key_time: std::time::Instant::now(),
            horizontal_delay_timer: 0,
            down_delay_timer: 0,
            horizontal_repeat_accumulator: 0,
            down_repeat_accumulator: 0,
            repeat_delay,
            repeat_interval,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    /// Register a key press. Returns the action to apply immediately, or
    /// `None` for non-movement keys and for re-pressed held keys.
    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<GameAction> {
        match action_for_key(code)? {
            GameAction::MoveLeft => {
                self.last_key_time = std::time::Instant::now();
                if self.horizontal == HorizontalDirection::Left {
                    None
                } else {
                    self.horizontal = HorizontalDirection::Left;
                    self.horizontal_delay_timer = 0;
                    self.horizontal_repeat_accumulator = 0;
                    Some(GameAction::MoveLeft)
                }
            }
            GameAction::MoveRight => {
                self.last_key_time = std::time::Instant::now();
                if self.horizontal == HorizontalDirection::Right {
                    None
                } else {
                    self.horizontal = HorizontalDirection::Right;
                    self.horizontal_delay_timer = 0;
                    self.horizontal_repeat_accumulator = 0;
                    Some(GameAction::MoveRight)
                }
            }
            GameAction::MoveDown => {
                self.last_key_time = std::time::Instant::now();
                if self.down_held {
                    None
                } else {
                    self.down_held = true;
                    self.down_delay_timer = 0;
                    self.down_repeat_accumulator = 0;
                    Some(GameAction::MoveDown)
                }
            }
        }
    }

    /// Register a key release (terminals that deliver them).
    pub fn handle_key_release(&mut self, code: KeyCode) {
        match action_for_key(code) {
            Some(GameAction::MoveLeft) => {
                if self.horizontal == HorizontalDirection::Left {
                    self.horizontal = HorizontalDirection::None;
                    self.horizontal_delay_timer = 0;
                    self.horizontal_repeat_accumulator = 0;
                }
            }
            Some(GameAction::MoveRight) => {
                if self.horizontal == HorizontalDirection::Right {
                    self.horizontal = HorizontalDirection::None;
                    self.horizontal_delay_timer = 0;
                    self.horizontal_repeat_accumulator = 0;
                }
            }
            Some(GameAction::MoveDown) => {
                self.down_held = false;
                self.down_delay_timer = 0;
                self.down_repeat_accumulator = 0;
            }
            None => {}
        }
    }

    /// Advance repeat timers by `elapsed_ms` and collect due repeat actions.
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<GameAction, 32> {
        let mut actions = ArrayVec::<GameAction, 32>::new();

        // Auto-release when the terminal never reported a release.
        let since_last_key = self.last_key_time.elapsed().as_millis() as u32;
        if since_last_key > self.key_release_timeout_ms {
            if self.horizontal != HorizontalDirection::None {
                self.horizontal = HorizontalDirection::None;
                self.horizontal_delay_timer = 0;
                self.horizontal_repeat_accumulator = 0;
            }
            if self.down_held {
                self.down_held = false;
                self.down_delay_timer = 0;
                self.down_repeat_accumulator = 0;
            }
        }

        match self.horizontal {
            HorizontalDirection::Left | HorizontalDirection::Right => {
                let prev = self.horizontal_delay_timer;
                self.horizontal_delay_timer += elapsed_ms;

                if self.horizontal_delay_timer >= self.repeat_delay {
                    let excess = if prev < self.repeat_delay {
                        self.horizontal_delay_timer - self.repeat_delay
                    } else {
                        elapsed_ms
                    };
                    self.horizontal_repeat_accumulator += excess;

                    while self.horizontal_repeat_accumulator >= self.repeat_interval {
                        let action = match self.horizontal {
                            HorizontalDirection::Left => GameAction::MoveLeft,
                            HorizontalDirection::Right => GameAction::MoveRight,
                            HorizontalDirection::None => unreachable!(),
                        };
                        let _ = actions.try_push(action);
                        self.horizontal_repeat_accumulator -= self.repeat_interval;
                    }
                }
            }
            HorizontalDirection::None => {
                self.horizontal_delay_timer = 0;
                self.horizontal_repeat_accumulator = 0;
            }
        }

        if self.down_held {
            let prev = self.down_delay_timer;
            self.down_delay_timer += elapsed_ms;

            if self.down_delay_timer >= self.repeat_delay {
                let excess = if prev < self.repeat_delay {
                    self.down_delay_timer - self.repeat_delay
                } else {
                    elapsed_ms
                };
                self.down_repeat_accumulator += excess;
                while self.down_repeat_accumulator >= self.repeat_interval {
                    let _ = actions.try_push(GameAction::MoveDown);
                    self.down_repeat_accumulator -= self.repeat_interval;
                }
            }
        } else {
            self.down_delay_timer = 0;
            self.down_repeat_accumulator = 0;
        }

        actions
    }

    pub fn reset(&mut self) {
        self.horizontal = HorizontalDirection::None;
        self.down_held = false;
        self.last_key_time = std::time::Instant::now();
        self.horizontal_delay_timer = 0;
        self.down_delay_timer = 0;
        self.horizontal_repeat_accumulator = 0;
        self.down_repeat_accumulator = 0;
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_fires_once_then_repeats_after_delay() {
        let mut ih = InputHandler::with_config(200, 50).with_key_release_timeout_ms(10_000);

        assert_eq!(
            ih.handle_key_press(KeyCode::Left),
            Some(GameAction::MoveLeft)
        );

        // Before the delay expires: no repeats.
        let actions = ih.update(199);
        assert!(actions.is_empty());

        // Exactly at the delay: still none (repeats accumulate past it).
        let actions = ih.update(1);
        assert!(actions.is_empty());

        // One repeat interval later: one repeat.
        let actions = ih.update(50);
        assert_eq!(actions.as_slice(), &[GameAction::MoveLeft]);

        // Two intervals in one tick: two repeats.
        let actions = ih.update(100);
        assert_eq!(
            actions.as_slice(),
            &[GameAction::MoveLeft, GameAction::MoveLeft]
        );
    }

    #[test]
    fn test_down_repeats_with_same_timing() {
        let mut ih = InputHandler::with_config(200, 50).with_key_release_timeout_ms(10_000);

        assert_eq!(
            ih.handle_key_press(KeyCode::Down),
            Some(GameAction::MoveDown)
        );
        assert!(ih.update(200).is_empty());
        assert_eq!(ih.update(50).as_slice(), &[GameAction::MoveDown]);
    }

    #[test]
    fn test_repress_of_held_key_is_swallowed() {
        let mut ih = InputHandler::new().with_key_release_timeout_ms(10_000);

        assert_eq!(
            ih.handle_key_press(KeyCode::Right),
            Some(GameAction::MoveRight)
        );
        assert_eq!(ih.handle_key_press(KeyCode::Right), None);
    }

    #[test]
    fn test_direction_change_fires_immediately() {
        let mut ih = InputHandler::new().with_key_release_timeout_ms(10_000);

        assert_eq!(
            ih.handle_key_press(KeyCode::Left),
            Some(GameAction::MoveLeft)
        );
        assert_eq!(
            ih.handle_key_press(KeyCode::Right),
            Some(GameAction::MoveRight)
        );
    }

    #[test]
    fn test_release_stops_repeats() {
        let mut ih = InputHandler::with_config(200, 50).with_key_release_timeout_ms(10_000);

        ih.handle_key_press(KeyCode::Left);
        ih.handle_key_release(KeyCode::Left);
        assert!(ih.update(1_000).is_empty());
    }

    #[test]
    fn test_auto_release_after_timeout_without_release_events() {
        let mut ih = InputHandler::with_config(200, 50);
        ih.key_release_timeout_ms = 50;

        assert_eq!(
            ih.handle_key_press(KeyCode::Left),
            Some(GameAction::MoveLeft)
        );
        assert_eq!(ih.horizontal, HorizontalDirection::Left);

        // Simulate no key-release events by moving the last key time back.
        ih.last_key_time = std::time::Instant::now() - std::time::Duration::from_millis(51);

        let actions = ih.update(0);
        assert!(actions.is_empty());
        assert_eq!(ih.horizontal, HorizontalDirection::None);
    }

    #[test]
    fn test_non_movement_key_does_not_hold_anything() {
        let mut ih = InputHandler::new();
        assert_eq!(ih.handle_key_press(KeyCode::Up), None);
        assert_eq!(ih.horizontal, HorizontalDirection::None);
        assert!(!ih.down_held);
    }

    #[test]
    fn test_reset_clears_held_state_and_stops_repeats() {
        let mut ih = InputHandler::with_config(200, 50).with_key_release_timeout_ms(10_000);

        ih.handle_key_press(KeyCode::Left);
        assert!(!ih.update(300).is_empty(), "expected repeats before reset");

        ih.reset();
        assert!(ih.update(300).is_empty(), "reset should stop repeats");
    }
}

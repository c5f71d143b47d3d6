//! Keyboard/touch input folded into logical actions
//!
//! Jump and slide follow the held state of their keys. Dash is a pulse:
//! pressing latches it until the next step consumes it, holding or key
//! repeat never fires it again.

use crate::sim::TickInput;

/// Logical action a key maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Jump,
    Slide,
    Dash,
}

/// Map a `KeyboardEvent.code` to an action
pub fn action_for_code(code: &str) -> Option<Action> {
    match code {
        "Space" | "ArrowUp" | "KeyW" => Some(Action::Jump),
        "ArrowDown" | "KeyS" => Some(Action::Slide),
        "ShiftLeft" | "ShiftRight" | "KeyD" | "ArrowRight" => Some(Action::Dash),
        _ => None,
    }
}

/// Held keys and pending dash pulse
#[derive(Debug, Clone, Default)]
pub struct InputState {
    jump_held: bool,
    slide_held: bool,
    dash_held: bool,
    dash_pending: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, action: Action) {
        match action {
            Action::Jump => self.jump_held = true,
            Action::Slide => self.slide_held = true,
            Action::Dash => {
                if !self.dash_held {
                    self.dash_pending = true;
                }
                self.dash_held = true;
            }
        }
    }

    pub fn release(&mut self, action: Action) {
        match action {
            Action::Jump => self.jump_held = false,
            Action::Slide => self.slide_held = false,
            Action::Dash => self.dash_held = false,
        }
    }

    /// Drop everything (focus loss, run start)
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Snapshot for the next step, consuming the dash pulse
    pub fn take_tick_input(&mut self) -> TickInput {
        let input = TickInput {
            jump: self.jump_held,
            slide: self.slide_held,
            dash: self.dash_pending,
        };
        self.dash_pending = false;
        input
    }
}

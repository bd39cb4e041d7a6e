// Scripted input timelines for headless runs

use super::action::{Action, InputEvent};
use super::player::PlayerInput;

/// Whether a scripted step presses or releases its action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Pressed,
    Released,
}

/// One button edge at a given fixed-update tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptStep {
    pub tick: u64,
    pub action: Action,
    pub state: ButtonState,
}

/// Replays button edges tick by tick through a `PlayerInput`
#[derive(Debug, Default)]
pub struct InputScript {
    steps: Vec<ScriptStep>,
    cursor: usize,
    input: PlayerInput,
}

impl InputScript {
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            cursor: 0,
            input: PlayerInput::new(),
        }
    }

    /// Press `action` at `tick`
    pub fn press(mut self, tick: u64, action: Action) -> Self {
        self.push(tick, action, ButtonState::Pressed);
        self
    }

    /// Release `action` at `tick`
    pub fn release(mut self, tick: u64, action: Action) -> Self {
        self.push(tick, action, ButtonState::Released);
        self
    }

    fn push(&mut self, tick: u64, action: Action, state: ButtonState) {
        self.steps.push(ScriptStep { tick, action, state });
        // Stable sort keeps same-tick steps in insertion order
        self.steps.sort_by_key(|step| step.tick);
    }

    /// Tick of the last scripted step
    pub fn last_tick(&self) -> u64 {
        self.steps.last().map_or(0, |step| step.tick)
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.steps.len()
    }

    /// Events produced by every step scheduled at or before `tick`
    pub fn events_for_tick(&mut self, tick: u64) -> Vec<InputEvent> {
        let mut events = Vec::new();
        while let Some(step) = self.steps.get(self.cursor).copied() {
            if step.tick > tick {
                break;
            }
            self.cursor += 1;
            let event = match step.state {
                ButtonState::Pressed => self.input.press(step.action),
                ButtonState::Released => self.input.release(step.action),
            };
            events.extend(event);
        }
        events
    }
}

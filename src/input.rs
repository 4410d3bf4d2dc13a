//! Per-tick keyboard snapshot.

use std::collections::VecDeque;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyState {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    /// Window closed or escape pressed.
    pub quit: bool,
}

impl KeyState {
    /// -1 for left, 1 for right, 0 for neither or both.
    pub fn direction(&self) -> i32 {
        i32::from(self.right) - i32::from(self.left)
    }
}

pub trait InputSource {
    /// Read the key state for this tick.
    fn poll(&mut self) -> KeyState;
}

/// Replays a fixed list of snapshots, then asks to quit.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    frames: VecDeque<KeyState>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = KeyState>) -> Self {
        ScriptedInput {
            frames: frames.into_iter().collect(),
        }
    }

    /// `count` ticks of the same key state.
    pub fn repeat(keys: KeyState, count: usize) -> Self {
        ScriptedInput::new(std::iter::repeat(keys).take(count))
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> KeyState {
        self.frames.pop_front().unwrap_or(KeyState {
            quit: true,
            ..KeyState::default()
        })
    }
}

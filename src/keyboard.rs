//! Terminal keyboard input, reduced to one `KeyState` per tick.
//!
//! Terminals report key presses, not key states.  We remember the tick on
//! which each key was last seen (press or repeat) and treat it as held while
//! that is recent.  Terminals with the keyboard-enhancement protocol also
//! send releases, which drop the key at once.

use std::collections::HashMap;
use std::sync::mpsc;
use std::thread;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use alien_raid::input::{InputSource, KeyState};

/// A key counts as held if its last press/repeat event arrived within this
/// many ticks.  The OS key-repeat rate is ≥ 15 Hz, so 8 ticks at 60 FPS
/// (≈133 ms) is always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

pub struct Keyboard {
    rx: mpsc::Receiver<Event>,
    key_tick: HashMap<KeyCode, u64>,
    tick: u64,
    quit: bool,
}

impl Keyboard {
    /// Start a thread that does nothing but block on terminal events and
    /// forward them, so polling never blocks the loop.
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::channel::<Event>();
        thread::spawn(move || {
            while let Ok(ev) = event::read() {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
        });
        Keyboard {
            rx,
            key_tick: HashMap::new(),
            tick: 0,
            quit: false,
        }
    }

    fn is_held(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|key| {
            self.key_tick
                .get(key)
                .is_some_and(|&last| self.tick.saturating_sub(last) <= HOLD_WINDOW)
        })
    }

    fn handle(&mut self, code: KeyCode, kind: KeyEventKind, modifiers: KeyModifiers) {
        match kind {
            KeyEventKind::Press => {
                match code {
                    KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => self.quit = true,
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        self.quit = true
                    }
                    _ => {}
                }
                self.key_tick.insert(code, self.tick);
            }
            KeyEventKind::Repeat => {
                self.key_tick.insert(code, self.tick);
            }
            KeyEventKind::Release => {
                self.key_tick.remove(&code);
            }
        }
    }
}

impl InputSource for Keyboard {
    fn poll(&mut self) -> KeyState {
        self.tick += 1;
        while let Ok(ev) = self.rx.try_recv() {
            if let Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) = ev
            {
                self.handle(code, kind, modifiers);
            }
        }
        KeyState {
            left: self.is_held(&[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')]),
            right: self.is_held(&[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')]),
            fire: self.is_held(&[KeyCode::Char(' ')]),
            quit: self.quit,
        }
    }
}

//! Host key mapping for the maze.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::games::maze::Direction;

/// Keys the host can forward, independent of any windowing backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(ascii_case_insensitive)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    W,
    A,
    S,
    D,
    P,
    R,
    Q,
    Escape,
    Space,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    TogglePause,
    Restart,
    Exit,
}

#[derive(Debug, Clone)]
pub struct Bindings {
    key_bindings: HashMap<Key, Command>,
}

impl Default for Bindings {
    fn default() -> Self {
        let mut key_bindings = HashMap::new();

        // Movement
        key_bindings.insert(Key::Up, Command::Move(Direction::Up));
        key_bindings.insert(Key::W, Command::Move(Direction::Up));
        key_bindings.insert(Key::Down, Command::Move(Direction::Down));
        key_bindings.insert(Key::S, Command::Move(Direction::Down));
        key_bindings.insert(Key::Left, Command::Move(Direction::Left));
        key_bindings.insert(Key::A, Command::Move(Direction::Left));
        key_bindings.insert(Key::Right, Command::Move(Direction::Right));
        key_bindings.insert(Key::D, Command::Move(Direction::Right));

        // Session actions
        key_bindings.insert(Key::P, Command::TogglePause);
        key_bindings.insert(Key::R, Command::Restart);
        key_bindings.insert(Key::Escape, Command::Exit);
        key_bindings.insert(Key::Q, Command::Exit);

        Self { key_bindings }
    }
}

impl Bindings {
    pub fn command(&self, key: Key) -> Option<Command> {
        self.key_bindings.get(&key).copied()
    }

    /// Rebinds `key`, returning whatever it was bound to before.
    pub fn bind(&mut self, key: Key, command: Command) -> Option<Command> {
        self.key_bindings.insert(key, command)
    }

    pub fn unbind(&mut self, key: Key) -> Option<Command> {
        self.key_bindings.remove(&key)
    }
}

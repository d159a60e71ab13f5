use log::debug;

use super::commands::{self, Selection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Displaying,
    Quit,
}

/// What the session has to do after one line of input.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ModelUpdate {
    pub dispatch: Option<usize>,
    pub invalid_input: bool,
    pub quit: bool,
}

/// Pure half of the interactive loop: tracks the state and turns input lines
/// into updates. It never touches the terminal.
#[derive(Debug, Clone)]
pub struct LauncherModel {
    state: State,
    item_count: usize,
}

impl LauncherModel {
    pub fn new(item_count: usize) -> Self {
        Self {
            state: State::Displaying,
            item_count,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn handle(&mut self, line: &str) -> ModelUpdate {
        if self.state == State::Quit {
            return ModelUpdate {
                quit: true,
                ..Default::default()
            };
        }

        match commands::decode(line, self.item_count) {
            Selection::Quit => {
                self.state = State::Quit;
                ModelUpdate {
                    quit: true,
                    ..Default::default()
                }
            }
            Selection::Item(index) => ModelUpdate {
                dispatch: Some(index),
                ..Default::default()
            },
            Selection::Invalid => {
                debug!("rejected input {line:?} for {} item(s)", self.item_count);
                ModelUpdate {
                    invalid_input: true,
                    ..Default::default()
                }
            }
        }
    }
}

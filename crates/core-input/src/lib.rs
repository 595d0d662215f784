//! Blocking key input for the viewer loop.
//!
//! A [`KeySource`] hands the loop one [`Input`] at a time and blocks until
//! one is available. Unmapped keys, releases and resizes are consumed inside
//! the source and never reach the loop.

mod key_token;
pub mod keymap;

pub use keymap::command_for;

use anyhow::{Context, Result};
use core_events::{Command, InputEvent};
use std::collections::VecDeque;

/// What the loop acts on next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    /// Ctrl-C.
    Interrupt,
    /// No further input will arrive.
    Closed,
}

pub trait KeySource {
    fn next_input(&mut self) -> Result<Input>;
}

/// Resolve a normalized event to loop input; `None` means "keep reading".
pub fn resolve(event: InputEvent) -> Option<Input> {
    match event {
        InputEvent::CtrlC => Some(Input::Interrupt),
        InputEvent::Key(key) => match command_for(&key) {
            Some(cmd) => Some(Input::Command(cmd)),
            None => {
                tracing::trace!(target: "input", key = %key, "key_unmapped");
                None
            }
        },
        InputEvent::Resize(columns, rows) => {
            tracing::debug!(target: "input", columns, rows, "resize_ignored");
            None
        }
    }
}

/// Reads the controlling terminal through crossterm.
#[derive(Debug, Default)]
pub struct CrosstermKeySource;

impl CrosstermKeySource {
    pub fn new() -> Self {
        Self
    }
}

impl KeySource for CrosstermKeySource {
    fn next_input(&mut self) -> Result<Input> {
        loop {
            let raw = crossterm::event::read().context("read terminal event")?;
            if let Some(input) = key_token::map_event(&raw).and_then(resolve) {
                return Ok(input);
            }
        }
    }
}

/// Replays a fixed list of events, then reports [`Input::Closed`].
#[derive(Debug, Default)]
pub struct ScriptedKeySource {
    events: VecDeque<InputEvent>,
}

impl ScriptedKeySource {
    pub fn new(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl KeySource for ScriptedKeySource {
    fn next_input(&mut self) -> Result<Input> {
        while let Some(event) = self.events.pop_front() {
            if let Some(input) = resolve(event) {
                return Ok(input);
            }
        }
        Ok(Input::Closed)
    }
}

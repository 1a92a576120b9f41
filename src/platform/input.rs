//! Input events and non-blocking sources

use std::collections::VecDeque;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use serde::{Deserialize, Serialize};

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Space
    Jump,
    /// Down arrow
    Duck,
    /// Up arrow
    Up,
}

/// A discrete input event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    Quit,
    KeyDown(Key),
    KeyUp(Key),
}

/// Produces the events pending for the current tick. Never blocks.
pub trait InputSource {
    /// Drain everything queued since the last poll
    fn poll(&mut self) -> Vec<InputEvent>;
}

/// Events pushed from elsewhere (a window thread, an autopilot) through a channel
pub struct QueueInput {
    rx: Receiver<InputEvent>,
    disconnected: bool,
}

impl QueueInput {
    /// Create a queue and the sender that feeds it
    pub fn channel() -> (Sender<InputEvent>, Self) {
        let (tx, rx) = mpsc::channel();
        (
            tx,
            Self {
                rx,
                disconnected: false,
            },
        )
    }
}

impl InputSource for QueueInput {
    fn poll(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();
        if self.disconnected {
            return events;
        }
        loop {
            match self.rx.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    // Nobody can send again; treat it like closing the window
                    log::info!("Input channel closed");
                    self.disconnected = true;
                    events.push(InputEvent::Quit);
                    break;
                }
            }
        }
        events
    }
}

/// Pre-recorded input, one batch per poll. Empty once the script runs out.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<Vec<InputEvent>>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the events for the next unconsumed poll
    pub fn push_frame(&mut self, events: Vec<InputEvent>) -> &mut Self {
        self.frames.push_back(events);
        self
    }

    /// Queue `count` polls with no events
    pub fn push_idle(&mut self, count: usize) -> &mut Self {
        self.frames.extend(std::iter::repeat_with(Vec::new).take(count));
        self
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Vec<InputEvent> {
        self.frames.pop_front().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_drains_all_pending() {
        let (tx, mut input) = QueueInput::channel();
        tx.send(InputEvent::KeyDown(Key::Jump)).unwrap();
        tx.send(InputEvent::KeyUp(Key::Jump)).unwrap();
        assert_eq!(
            input.poll(),
            vec![InputEvent::KeyDown(Key::Jump), InputEvent::KeyUp(Key::Jump)]
        );
        assert!(input.poll().is_empty());
    }

    #[test]
    fn test_queue_disconnect_quits_once() {
        let (tx, mut input) = QueueInput::channel();
        tx.send(InputEvent::KeyDown(Key::Duck)).unwrap();
        drop(tx);
        assert_eq!(
            input.poll(),
            vec![InputEvent::KeyDown(Key::Duck), InputEvent::Quit]
        );
        assert!(input.poll().is_empty());
    }

    #[test]
    fn test_scripted_frames_in_order() {
        let mut input = ScriptedInput::new();
        input
            .push_idle(1)
            .push_frame(vec![InputEvent::KeyDown(Key::Jump)]);
        assert_eq!(input.remaining(), 2);
        assert!(input.poll().is_empty());
        assert_eq!(input.poll(), vec![InputEvent::KeyDown(Key::Jump)]);
        assert!(input.poll().is_empty());
    }
}

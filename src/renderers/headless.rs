use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::core::{Console, Event};
use crate::error::Result;
use crate::renderers::Context;

#[derive(Default)]
struct HeadlessState {
    frames: Vec<Console>,
    events: VecDeque<Event>,
}

/// Off-screen context: keeps every presented frame and replays queued events.
/// Clones share state, so a test can keep one handle after boxing the other.
#[derive(Clone, Default)]
pub struct HeadlessContext {
    inner: Rc<RefCell<HeadlessState>>,
}

impl HeadlessContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_event(&self, event: Event) {
        self.inner.borrow_mut().events.push_back(event);
    }

    pub fn frame_count(&self) -> usize {
        self.inner.borrow().frames.len()
    }

    pub fn frame(&self, index: usize) -> Option<Console> {
        self.inner.borrow().frames.get(index).cloned()
    }

    pub fn last_frame(&self) -> Option<Console> {
        self.inner.borrow().frames.last().cloned()
    }
}

impl Context for HeadlessContext {
    fn present(&mut self, console: &Console) -> Result<()> {
        self.inner.borrow_mut().frames.push(console.clone());
        Ok(())
    }

    fn poll_events(&mut self) -> Vec<Event> {
        self.inner.borrow_mut().events.drain(..).collect()
    }
}

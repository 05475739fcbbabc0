// Application state for the TUI, including a bounded log of recent augmenting paths.

use std::collections::VecDeque;

use bflow_core::EngineState;

use crate::backend::FlowBackend;

pub struct App<B: FlowBackend> {
    pub backend: B,
    pub history: VecDeque<String>, // newest first
    pub history_len: usize,
    pub running: bool,
}

impl<B: FlowBackend> App<B> {
    pub fn new(backend: B, history_len: usize) -> Self {
        Self {
            backend,
            history: VecDeque::with_capacity(history_len.max(1)),
            history_len: history_len.max(1),
            running: false,
        }
    }

    pub fn toggle_running(&mut self) {
        self.running = !self.running;
    }

    pub fn finished(&self) -> bool {
        self.backend.state() == EngineState::Terminated
    }

    /// Perform one augmentation and record its route. Auto-run stops once the flow is maximal.
    pub fn step(&mut self) {
        match self.backend.step() {
            Some(path) => {
                let line = self.backend.describe(&path);
                if self.history.len() == self.history_len {
                    self.history.pop_back();
                }
                self.history.push_front(line);
            }
            None => self.running = false,
        }
    }
}

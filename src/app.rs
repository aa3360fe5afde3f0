use crate::clock::{Clock, SystemClock};
use crate::key::Key;
use crate::operation::{RandomSource, RngSource};
use crate::reducer::{reduce, Action, Env};
use crate::session::{SessionState, TargetSize};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::SystemTime;

/// Owns the current session and the capabilities the reducer needs.
/// Each dispatched action replaces `session` with the reducer's output.
pub struct App {
    pub session: SessionState,
    pub should_quit: bool,
    rng: Box<dyn RandomSource>,
    clock: Box<dyn Clock>,
}

impl App {
    pub fn new(size: TargetSize) -> Self {
        Self::with_capabilities(size, Box::new(RngSource::thread()), Box::new(SystemClock))
    }

    pub fn with_capabilities(
        size: TargetSize,
        mut rng: Box<dyn RandomSource>,
        clock: Box<dyn Clock>,
    ) -> Self {
        let session = SessionState::new(size, rng.as_mut(), clock.now());
        Self {
            session,
            should_quit: false,
            rng,
            clock,
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        let mut env = Env::new(self.rng.as_mut(), self.clock.as_ref());
        self.session = reduce(&self.session, &action, &mut env);
    }

    /// Ctrl+C quits; every other key is normalized and handed to the reducer.
    pub fn handle_key_event(&mut self, event: &KeyEvent) {
        if event.modifiers.contains(KeyModifiers::CONTROL) && event.code == KeyCode::Char('c') {
            tracing::info!("quit requested");
            self.should_quit = true;
            return;
        }
        if let Some(key) = Key::from_key_event(event) {
            tracing::trace!(%key, mode = %self.session.mode, "key");
            self.dispatch(Action::Input(key));
        }
    }

    pub fn now(&self) -> SystemTime {
        self.clock.now()
    }
}

use std::collections::VecDeque;

use rand::{Rng, distr::Alphanumeric};
use tokio::sync::Mutex;

const STATE_LENGTH: usize = 32;

/// Upper bound on outstanding login attempts. Past it the oldest state is
/// dropped, so abandoned logins cannot grow the set forever.
pub const MAX_PENDING_STATES: usize = 64;

/// Random value for the OAuth `state` parameter.
pub fn generate_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(STATE_LENGTH)
        .map(char::from)
        .collect()
}

/// `state` values handed out by `/login` and not yet seen on `/callback`,
/// oldest first.
#[derive(Debug, Default)]
pub struct PendingStates {
    states: Mutex<VecDeque<String>>,
}

impl PendingStates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates and remembers a new state value.
    pub async fn issue(&self) -> String {
        let state = generate_state();
        let mut states = self.states.lock().await;
        if states.len() >= MAX_PENDING_STATES {
            states.pop_front();
        }
        states.push_back(state.clone());
        state
    }

    /// Consumes `state`, returning whether it was outstanding.
    pub async fn take(&self, state: &str) -> bool {
        let mut states = self.states.lock().await;
        match states.iter().position(|s| s == state) {
            Some(index) => states.remove(index).is_some(),
            None => false,
        }
    }

    pub async fn len(&self) -> usize {
        self.states.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

use std::sync::Mutex;

use anyhow::{anyhow, Result};

use crate::{Navigator, RouteParams};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: String,
    pub params: RouteParams,
}

/// Navigator that queues transitions in order for a router to drain later.
#[derive(Default)]
pub struct RecordingNavigator {
    transitions: Mutex<Vec<Transition>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transitions(&self) -> Vec<Transition> {
        match self.transitions.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn take_transitions(&self) -> Vec<Transition> {
        match self.transitions.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl Navigator for RecordingNavigator {
    fn transition_to(&self, state: &str, params: RouteParams) -> Result<()> {
        let mut guard = self
            .transitions
            .lock()
            .map_err(|_| anyhow!("navigation queue is poisoned"))?;
        guard.push(Transition {
            state: state.to_string(),
            params,
        });
        Ok(())
    }
}

//! Scripted presenter — answers interactive screens from a fixed list.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use keepsake_core::action::ActionKey;
use keepsake_core::presenter::{PresenterError, ScreenPresenter};
use keepsake_core::screen::{InteractiveScreen, ScreenId, StatusScreen};

/// A presenter that records every screen it is asked to show and answers
/// interactive screens with the next scripted key.
///
/// Status screens resolve immediately. When the script runs out, the next
/// interactive screen fails with `PresenterError::Closed`, which lets tests
/// stop an otherwise endless flow.
#[derive(Debug, Default)]
pub struct ScriptedPresenter {
    script: Mutex<VecDeque<ActionKey>>,
    shown: Mutex<Vec<ScreenId>>,
    interactions: Mutex<Vec<InteractiveScreen>>,
}

impl ScriptedPresenter {
    /// Creates a presenter that answers with `keys`, in order.
    #[must_use]
    pub fn new(keys: impl IntoIterator<Item = ActionKey>) -> Self {
        Self {
            script: Mutex::new(keys.into_iter().collect()),
            ..Self::default()
        }
    }

    /// Ids of every screen shown so far, status and interactive alike.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn shown(&self) -> Vec<ScreenId> {
        self.shown.lock().unwrap().clone()
    }

    /// Every interactive screen shown so far, with its content.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn interactions(&self) -> Vec<InteractiveScreen> {
        self.interactions.lock().unwrap().clone()
    }
}

#[async_trait]
impl ScreenPresenter for ScriptedPresenter {
    async fn show_status(&self, screen: &StatusScreen) {
        self.shown.lock().unwrap().push(screen.id);
    }

    async fn interact(&self, screen: &InteractiveScreen) -> Result<ActionKey, PresenterError> {
        self.shown.lock().unwrap().push(screen.id);
        self.interactions.lock().unwrap().push(screen.clone());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .ok_or(PresenterError::Closed)
    }
}

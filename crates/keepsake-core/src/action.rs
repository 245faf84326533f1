//! Action keys produced by interactive screens.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A user's choice on an interactive screen.
///
/// `Back` is part of the vocabulary but none of the stock screens emit it.
/// Branch maps decide whether they need a route for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActionKey {
    /// Move forward a step in the flow.
    #[default]
    Forward,
    /// Go back one step in the flow.
    Back,
    /// Delete the stored progress.
    Delete,
}

impl ActionKey {
    /// Every key, in declaration order.
    pub const ALL: [ActionKey; 3] = [ActionKey::Forward, ActionKey::Back, ActionKey::Delete];

    /// Stable lowercase name, matching the serialized form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKey::Forward => "forward",
            ActionKey::Back => "back",
            ActionKey::Delete => "delete",
        }
    }
}

impl fmt::Display for ActionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

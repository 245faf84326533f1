//! Screen descriptions handed to a presenter.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::action::ActionKey;

/// Identifies a screen in the flow independently of its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenId {
    /// Shown while the progress record loads.
    Loading,
    /// Shown while the progress record is written.
    Saving,
    /// Shown while the progress record is removed.
    Deleting,
    /// One of the introductory screens, numbered from 1.
    Intro(u8),
    /// The main decision screen.
    Main,
    /// Shown after moving forward from the main screen.
    AfterMain,
    /// Shown when the progress store is unusable.
    Error,
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScreenId::Loading => f.write_str("loading"),
            ScreenId::Saving => f.write_str("saving"),
            ScreenId::Deleting => f.write_str("deleting"),
            ScreenId::Intro(n) => write!(f, "intro{n}"),
            ScreenId::Main => f.write_str("main"),
            ScreenId::AfterMain => f.write_str("after_main"),
            ScreenId::Error => f.write_str("error"),
        }
    }
}

/// Visual flavour of a status screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    /// Reading stored progress.
    Loading,
    /// Writing progress.
    Saving,
    /// Removing progress.
    Deleting,
}

/// A time-gated screen the user cannot skip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusScreen {
    /// Screen identity.
    pub id: ScreenId,
    /// Text displayed next to the animation.
    pub text: String,
    /// Visual flavour.
    pub kind: StatusKind,
}

/// Visual emphasis of a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonStyle {
    /// Default call to action.
    #[default]
    Primary,
    /// Secondary, low-emphasis action.
    Neutral,
    /// Destructive action.
    Danger,
    /// De-emphasised action.
    Subtle,
}

/// A button on an interactive screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    /// Button caption.
    pub label: String,
    /// Visual emphasis.
    #[serde(default)]
    pub style: ButtonStyle,
    /// Key reported when the button is activated.
    #[serde(default)]
    pub key: ActionKey,
}

impl Button {
    /// A primary button reporting `Forward`.
    #[must_use]
    pub fn forward(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            style: ButtonStyle::Primary,
            key: ActionKey::Forward,
        }
    }

    /// Replaces the key.
    #[must_use]
    pub fn with_key(mut self, key: ActionKey) -> Self {
        self.key = key;
        self
    }

    /// Replaces the style.
    #[must_use]
    pub fn with_style(mut self, style: ButtonStyle) -> Self {
        self.style = style;
        self
    }
}

/// A screen that resolves when the user activates one of its buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractiveScreen {
    /// Screen identity.
    pub id: ScreenId,
    /// Heading.
    pub title: String,
    /// Body paragraphs.
    pub body: Vec<String>,
    /// At least one button.
    pub buttons: Vec<Button>,
}

impl InteractiveScreen {
    /// Keys this screen can resolve with.
    pub fn keys(&self) -> impl Iterator<Item = ActionKey> + '_ {
        self.buttons.iter().map(|button| button.key)
    }
}

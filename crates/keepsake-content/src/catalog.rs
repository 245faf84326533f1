//! The screen catalog: every screen the flow can show.

use keepsake_core::action::ActionKey;
use keepsake_core::gateway::PersistenceFailure;
use keepsake_core::screen::{
    Button, ButtonStyle, InteractiveScreen, ScreenId, StatusKind, StatusScreen,
};
use serde::Deserialize;
use tracing::debug;

use crate::error::ContentError;

/// Number of introductory screens in the first-time flow.
pub const INTRO_SCREEN_COUNT: usize = 4;

/// Content of a status screen.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct StatusContent {
    text: String,
}

/// Content of an interactive screen.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScreenContent {
    title: String,
    #[serde(default)]
    body: Vec<String>,
    buttons: Vec<Button>,
}

/// Content of the error screen; the body is the failure message.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct ErrorContent {
    title: String,
    button: Button,
}

/// A catalog document. Missing sections fall back to the stock content;
/// `intro` stays `None` until a document supplies its own list.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct CatalogDocument {
    loading: StatusContent,
    saving: StatusContent,
    deleting: StatusContent,
    intro: Option<Vec<ScreenContent>>,
    main: ScreenContent,
    after_main: ScreenContent,
    error: ErrorContent,
}

impl Default for CatalogDocument {
    fn default() -> Self {
        Self {
            loading: status("loading"),
            saving: status("saving"),
            deleting: status("deleting"),
            intro: None,
            main: stock_main(),
            after_main: stock_after_main(),
            error: stock_error(),
        }
    }
}

fn status(text: &str) -> StatusContent {
    StatusContent {
        text: text.to_owned(),
    }
}

fn message(title: &str, body: &[&str], button: Button) -> ScreenContent {
    ScreenContent {
        title: title.to_owned(),
        body: body.iter().map(|line| (*line).to_owned()).collect(),
        buttons: vec![button],
    }
}

fn stock_intros() -> [ScreenContent; INTRO_SCREEN_COUNT] {
    [
        message(
            "Hello there",
            &["There is something I have wanted to tell you for a while."],
            Button::forward("Next"),
        ),
        message(
            "Why you?",
            &["Simple: nobody else looks quite like you to me."],
            Button::forward("Next"),
        ),
        message(
            "Every moment, everywhere",
            &["I keep thinking of you, whether I am out, studying or working."],
            Button::forward("Next"),
        ),
        message(
            "The honest truth",
            &[
                "This feeling only runs one way, and I can wait.",
                "Live well, and we will meet again in time.",
            ],
            Button::forward("The end ..."),
        ),
    ]
}

fn stock_main() -> ScreenContent {
    ScreenContent {
        title: "What I wanted to say".to_owned(),
        body: vec![
            "If caring about you is a mistake, I have already made it.".to_owned(),
            "Right or wrong no longer matters.".to_owned(),
        ],
        buttons: vec![
            Button::forward("Delete and start over")
                .with_key(ActionKey::Delete)
                .with_style(ButtonStyle::Danger),
            Button::forward("Next").with_style(ButtonStyle::Neutral),
        ],
    }
}

fn stock_after_main() -> ScreenContent {
    message(
        "A keepsake",
        &["(a photo goes here)"],
        Button::forward("Go back").with_style(ButtonStyle::Subtle),
    )
}

fn stock_error() -> ErrorContent {
    ErrorContent {
        title: "Error".to_owned(),
        button: Button::forward("Refresh").with_style(ButtonStyle::Subtle),
    }
}

/// Every screen of the flow, resolved and validated.
#[derive(Debug, Clone)]
pub struct ScreenCatalog {
    loading: StatusScreen,
    saving: StatusScreen,
    deleting: StatusScreen,
    intros: [InteractiveScreen; INTRO_SCREEN_COUNT],
    main: InteractiveScreen,
    after_main: InteractiveScreen,
    error_title: String,
    error_button: Button,
}

impl Default for ScreenCatalog {
    fn default() -> Self {
        let doc = CatalogDocument::default();
        Self::assemble(
            doc.loading,
            doc.saving,
            doc.deleting,
            stock_intros(),
            doc.main,
            doc.after_main,
            doc.error,
        )
    }
}

impl ScreenCatalog {
    /// Parses a YAML catalog. Sections left out keep the stock content.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::Parse` for malformed YAML or unknown fields,
    /// `ContentError::IntroCount` when the intro list does not hold exactly
    /// four screens and `ContentError::NoButtons` for an interactive screen
    /// without buttons.
    pub fn from_yaml_str(source: &str) -> Result<Self, ContentError> {
        let doc: CatalogDocument = serde_yaml::from_str(source)?;

        let intros: [ScreenContent; INTRO_SCREEN_COUNT] = match doc.intro {
            Some(list) => {
                let found = list.len();
                list.try_into()
                    .map_err(|_| ContentError::IntroCount { found })?
            }
            None => stock_intros(),
        };

        for (index, intro) in intros.iter().enumerate() {
            require_buttons(intro_id(index), intro)?;
        }
        require_buttons(ScreenId::Main, &doc.main)?;
        require_buttons(ScreenId::AfterMain, &doc.after_main)?;

        debug!("loaded screen catalog from YAML");
        Ok(Self::assemble(
            doc.loading,
            doc.saving,
            doc.deleting,
            intros,
            doc.main,
            doc.after_main,
            doc.error,
        ))
    }

    fn assemble(
        loading: StatusContent,
        saving: StatusContent,
        deleting: StatusContent,
        intros: [ScreenContent; INTRO_SCREEN_COUNT],
        main: ScreenContent,
        after_main: ScreenContent,
        error: ErrorContent,
    ) -> Self {
        let mut index = 0;
        let intros = intros.map(|content| {
            let id = intro_id(index);
            index += 1;
            interactive(id, content)
        });

        Self {
            loading: StatusScreen {
                id: ScreenId::Loading,
                text: loading.text,
                kind: StatusKind::Loading,
            },
            saving: StatusScreen {
                id: ScreenId::Saving,
                text: saving.text,
                kind: StatusKind::Saving,
            },
            deleting: StatusScreen {
                id: ScreenId::Deleting,
                text: deleting.text,
                kind: StatusKind::Deleting,
            },
            intros,
            main: interactive(ScreenId::Main, main),
            after_main: interactive(ScreenId::AfterMain, after_main),
            error_title: error.title,
            error_button: error.button,
        }
    }

    /// Status screen shown while loading.
    #[must_use]
    pub fn loading(&self) -> &StatusScreen {
        &self.loading
    }

    /// Status screen shown while saving.
    #[must_use]
    pub fn saving(&self) -> &StatusScreen {
        &self.saving
    }

    /// Status screen shown while deleting.
    #[must_use]
    pub fn deleting(&self) -> &StatusScreen {
        &self.deleting
    }

    /// The introductory screens, in order.
    #[must_use]
    pub fn intros(&self) -> &[InteractiveScreen; INTRO_SCREEN_COUNT] {
        &self.intros
    }

    /// The main decision screen.
    #[must_use]
    pub fn main(&self) -> &InteractiveScreen {
        &self.main
    }

    /// The screen shown after moving forward from the main screen.
    #[must_use]
    pub fn after_main(&self) -> &InteractiveScreen {
        &self.after_main
    }

    /// Any interactive screen by id, except the error screen which needs a
    /// failure to render.
    #[must_use]
    pub fn interactive(&self, id: ScreenId) -> Option<&InteractiveScreen> {
        match id {
            ScreenId::Intro(n) => self.intros.get(usize::from(n).checked_sub(1)?),
            ScreenId::Main => Some(&self.main),
            ScreenId::AfterMain => Some(&self.after_main),
            _ => None,
        }
    }

    /// The error screen carrying the failure's user-facing message.
    #[must_use]
    pub fn error_screen(&self, failure: &PersistenceFailure) -> InteractiveScreen {
        InteractiveScreen {
            id: ScreenId::Error,
            title: self.error_title.clone(),
            body: vec![failure.to_string()],
            buttons: vec![self.error_button.clone()],
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn intro_id(index: usize) -> ScreenId {
    ScreenId::Intro(index as u8 + 1)
}

fn interactive(id: ScreenId, content: ScreenContent) -> InteractiveScreen {
    InteractiveScreen {
        id,
        title: content.title,
        body: content.body,
        buttons: content.buttons,
    }
}

fn require_buttons(id: ScreenId, content: &ScreenContent) -> Result<(), ContentError> {
    if content.buttons.is_empty() {
        return Err(ContentError::NoButtons { screen: id });
    }
    Ok(())
}

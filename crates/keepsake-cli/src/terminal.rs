//! Terminal presenter: renders screens as text and reads choices line by line.

use std::fmt::Write as _;
use std::time::Duration;

use async_trait::async_trait;
use keepsake_core::action::ActionKey;
use keepsake_core::presenter::{PresenterError, ScreenPresenter};
use keepsake_core::screen::{Button, ButtonStyle, InteractiveScreen, StatusScreen};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;
use tracing::{debug, warn};

const CLEAR: &str = "\x1b[2J\x1b[H";

type Input = Box<dyn AsyncBufRead + Send + Unpin>;
type Output = Box<dyn AsyncWrite + Send + Unpin>;

/// Presents screens on a text terminal.
///
/// The input and output handles are fixed at construction. Every screen
/// replaces what the previous one printed when clearing is enabled.
pub struct TerminalPresenter {
    input: Mutex<Input>,
    output: Mutex<Output>,
    status_duration: Duration,
    transition_duration: Duration,
    clear_screen: bool,
}

impl std::fmt::Debug for TerminalPresenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalPresenter")
            .field("status_duration", &self.status_duration)
            .field("transition_duration", &self.transition_duration)
            .field("clear_screen", &self.clear_screen)
            .finish_non_exhaustive()
    }
}

/// Builds a [`TerminalPresenter`].
pub struct TerminalPresenterBuilder {
    input: Input,
    output: Output,
    status_duration: Duration,
    transition_duration: Duration,
    clear_screen: bool,
}

impl TerminalPresenterBuilder {
    /// How long a status screen stays up.
    #[must_use]
    pub fn status_duration(mut self, duration: Duration) -> Self {
        self.status_duration = duration;
        self
    }

    /// Pause between a choice and the next screen.
    #[must_use]
    pub fn transition_duration(mut self, duration: Duration) -> Self {
        self.transition_duration = duration;
        self
    }

    /// Whether to clear the terminal before each screen.
    #[must_use]
    pub fn clear_screen(mut self, clear: bool) -> Self {
        self.clear_screen = clear;
        self
    }

    /// Finishes the presenter.
    #[must_use]
    pub fn build(self) -> TerminalPresenter {
        TerminalPresenter {
            input: Mutex::new(self.input),
            output: Mutex::new(self.output),
            status_duration: self.status_duration,
            transition_duration: self.transition_duration,
            clear_screen: self.clear_screen,
        }
    }
}

impl TerminalPresenter {
    /// Starts building a presenter that reads from `input` and writes to
    /// `output`.
    pub fn builder<R, W>(input: R, output: W) -> TerminalPresenterBuilder
    where
        R: AsyncBufRead + Send + Unpin + 'static,
        W: AsyncWrite + Send + Unpin + 'static,
    {
        TerminalPresenterBuilder {
            input: Box::new(input),
            output: Box::new(output),
            status_duration: Duration::from_millis(1500),
            transition_duration: Duration::from_millis(500),
            clear_screen: true,
        }
    }

    async fn write(&self, text: &str) -> std::io::Result<()> {
        let mut output = self.output.lock().await;
        output.write_all(text.as_bytes()).await?;
        output.flush().await
    }

    fn frame(&self) -> String {
        if self.clear_screen {
            CLEAR.to_owned()
        } else {
            "\n".to_owned()
        }
    }

    fn render(&self, screen: &InteractiveScreen) -> String {
        let mut text = self.frame();
        let _ = writeln!(text, "== {} ==\n", screen.title);
        for line in &screen.body {
            let _ = writeln!(text, "{line}");
        }
        text.push('\n');
        for (index, button) in screen.buttons.iter().enumerate() {
            let _ = writeln!(text, "  {}{}. {}", marker(button.style), index + 1, button.label);
        }
        text
    }
}

#[async_trait]
impl ScreenPresenter for TerminalPresenter {
    async fn show_status(&self, screen: &StatusScreen) {
        let text = format!("{}... {}\n", self.frame(), screen.text);
        if let Err(err) = self.write(&text).await {
            warn!(screen = %screen.id, error = %err, "failed to draw status screen");
        }
        tokio::time::sleep(self.status_duration).await;
    }

    async fn interact(&self, screen: &InteractiveScreen) -> Result<ActionKey, PresenterError> {
        self.write(&self.render(screen)).await?;

        let mut input = self.input.lock().await;
        let mut raw = Vec::new();
        let key = loop {
            self.write("> ").await?;
            raw.clear();
            if input.read_until(b'\n', &mut raw).await? == 0 {
                return Err(PresenterError::Closed);
            }
            // Undecodable bytes never match a label, so they re-prompt.
            let line = String::from_utf8_lossy(&raw);
            if let Some(key) = parse_choice(&line, &screen.buttons) {
                break key;
            }
            debug!(screen = %screen.id, input = line.trim(), "unrecognised choice");
            self.write(&format!(
                "Please enter a number from 1 to {}.\n",
                screen.buttons.len()
            ))
            .await?;
        };
        drop(input);

        tokio::time::sleep(self.transition_duration).await;
        Ok(key)
    }
}

/// Maps a line of input to the key of the button it selects.
///
/// Accepts a 1-based button number or a label (case-insensitive). An empty
/// line selects the only button of a single-button screen.
#[must_use]
pub fn parse_choice(line: &str, buttons: &[Button]) -> Option<ActionKey> {
    let choice = line.trim();
    if choice.is_empty() {
        return match buttons {
            [only] => Some(only.key),
            _ => None,
        };
    }
    if let Ok(number) = choice.parse::<usize>() {
        return number
            .checked_sub(1)
            .and_then(|index| buttons.get(index))
            .map(|button| button.key);
    }
    buttons
        .iter()
        .find(|button| button.label.eq_ignore_ascii_case(choice))
        .map(|button| button.key)
}

fn marker(style: ButtonStyle) -> &'static str {
    match style {
        ButtonStyle::Primary => "*",
        ButtonStyle::Danger => "!",
        ButtonStyle::Neutral | ButtonStyle::Subtle => " ",
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::pin::Pin;
    use std::sync::Arc;
    use std::task::{Context, Poll};

    use keepsake_content::ScreenCatalog;

    use super::*;

    /// An output handle whose contents stay readable after boxing.
    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<std::sync::Mutex<Vec<u8>>>);

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl AsyncWrite for SharedBuffer {
        fn poll_write(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            buf: &[u8],
        ) -> Poll<io::Result<usize>> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Poll::Ready(Ok(buf.len()))
        }

        fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }

        fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }
    }

    fn presenter(input: &'static str) -> (TerminalPresenter, SharedBuffer) {
        let output = SharedBuffer::default();
        let presenter = TerminalPresenter::builder(input.as_bytes(), output.clone())
            .status_duration(Duration::from_millis(1500))
            .transition_duration(Duration::from_millis(500))
            .clear_screen(false)
            .build();
        (presenter, output)
    }

    fn main_screen() -> InteractiveScreen {
        ScreenCatalog::default().main().clone()
    }

    #[test]
    fn test_parse_choice_by_number_and_label() {
        let buttons = main_screen().buttons;

        assert_eq!(parse_choice("1\n", &buttons), Some(ActionKey::Delete));
        assert_eq!(parse_choice(" 2 ", &buttons), Some(ActionKey::Forward));
        assert_eq!(parse_choice("next", &buttons), Some(ActionKey::Forward));
        assert_eq!(parse_choice("DELETE AND START OVER", &buttons), Some(ActionKey::Delete));
    }

    #[test]
    fn test_parse_choice_rejects_out_of_range_and_unknown_input() {
        let buttons = main_screen().buttons;

        assert_eq!(parse_choice("0", &buttons), None);
        assert_eq!(parse_choice("3", &buttons), None);
        assert_eq!(parse_choice("maybe", &buttons), None);
        assert_eq!(parse_choice("", &buttons), None);
    }

    #[test]
    fn test_empty_line_selects_the_only_button() {
        let buttons = vec![Button::forward("Go back").with_key(ActionKey::Back)];

        assert_eq!(parse_choice("\n", &buttons), Some(ActionKey::Back));
    }

    #[tokio::test(start_paused = true)]
    async fn test_interact_renders_screen_and_returns_chosen_key() {
        // Arrange
        let (presenter, output) = presenter("2\n");
        let started = tokio::time::Instant::now();

        // Act
        let key = presenter.interact(&main_screen()).await.unwrap();

        // Assert
        assert_eq!(key, ActionKey::Forward);
        assert!(started.elapsed() >= Duration::from_millis(500));
        let text = output.contents();
        assert!(text.contains("== What I wanted to say =="));
        assert!(text.contains("!1. Delete and start over"));
        assert!(text.contains(" 2. Next"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_interact_reprompts_until_input_is_valid() {
        let (presenter, output) = presenter("7\nhello\nnext\n");

        let key = presenter.interact(&main_screen()).await.unwrap();

        assert_eq!(key, ActionKey::Forward);
        assert_eq!(output.contents().matches("Please enter a number from 1 to 2.").count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_interact_reprompts_after_undecodable_bytes() {
        // Arrange
        let output = SharedBuffer::default();
        let presenter = TerminalPresenter::builder(&b"\xff\xfe\n2\n"[..], output.clone())
            .clear_screen(false)
            .build();

        // Act
        let key = presenter.interact(&main_screen()).await.unwrap();

        // Assert
        assert_eq!(key, ActionKey::Forward);
        assert_eq!(output.contents().matches("Please enter a number from 1 to 2.").count(), 1);
    }

    #[tokio::test]
    async fn test_interact_reports_closed_at_end_of_input() {
        let (presenter, _output) = presenter("");

        let result = presenter.interact(&main_screen()).await;

        assert!(matches!(result, Err(PresenterError::Closed)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_status_screen_prints_text_and_waits() {
        // Arrange
        let (presenter, output) = presenter("");
        let screen = ScreenCatalog::default().saving().clone();
        let started = tokio::time::Instant::now();

        // Act
        presenter.show_status(&screen).await;

        // Assert
        assert!(started.elapsed() >= Duration::from_millis(1500));
        assert!(output.contents().contains("... saving"));
    }

    #[tokio::test]
    async fn test_clearing_emits_escape_sequence() {
        let output = SharedBuffer::default();
        let presenter = TerminalPresenter::builder(&b""[..], output.clone())
            .status_duration(Duration::ZERO)
            .build();

        presenter.show_status(ScreenCatalog::default().loading()).await;

        assert!(output.contents().starts_with(CLEAR));
    }
}

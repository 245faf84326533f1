//! Host configuration read from the environment.

use std::path::PathBuf;
use std::time::Duration;

use keepsake_content::ScreenCatalog;
use keepsake_flow::PersistencePolicy;
use keepsake_store::DEFAULT_STORAGE_DELAY;

use crate::error::AppError;

/// JSON file backing the progress key.
pub const STORE_PATH_VAR: &str = "KEEPSAKE_STORE_PATH";
/// Optional YAML screen catalog.
pub const CONTENT_VAR: &str = "KEEPSAKE_CONTENT";
/// Status screen duration in milliseconds.
pub const STATUS_MS_VAR: &str = "KEEPSAKE_STATUS_MS";
/// Delay before each persistence call in milliseconds.
pub const STORAGE_DELAY_MS_VAR: &str = "KEEPSAKE_STORAGE_DELAY_MS";
/// Pause after a choice in milliseconds.
pub const TRANSITION_MS_VAR: &str = "KEEPSAKE_TRANSITION_MS";
/// `best-effort` or `abort-on-failure`.
pub const POLICY_VAR: &str = "KEEPSAKE_POLICY";
/// Restart budget of the supervisor; unset means unlimited.
pub const MAX_RESTARTS_VAR: &str = "KEEPSAKE_MAX_RESTARTS";
/// Whether to clear the terminal between screens.
pub const CLEAR_SCREEN_VAR: &str = "KEEPSAKE_CLEAR_SCREEN";
/// Switches log output to JSON.
pub const LOG_JSON_VAR: &str = "KEEPSAKE_LOG_JSON";

const DEFAULT_STORE_PATH: &str = "keepsake-progress.json";
const DEFAULT_STATUS_DURATION: Duration = Duration::from_millis(1500);
const DEFAULT_TRANSITION_DURATION: Duration = Duration::from_millis(500);

/// Everything the binary needs to wire the flow together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    /// JSON file backing the progress key.
    pub store_path: PathBuf,
    /// Optional YAML catalog overriding the stock screens.
    pub content_path: Option<PathBuf>,
    /// How long a status screen stays up.
    pub status_duration: Duration,
    /// Delay before each persistence call.
    pub storage_delay: Duration,
    /// Pause after a button is chosen.
    pub transition_duration: Duration,
    /// Handling of save and delete failures.
    pub policy: PersistencePolicy,
    /// Restarts allowed before giving up. `None` means unlimited.
    pub max_restarts: Option<u32>,
    /// Clear the terminal between screens.
    pub clear_screen: bool,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            content_path: None,
            status_duration: DEFAULT_STATUS_DURATION,
            storage_delay: DEFAULT_STORAGE_DELAY,
            transition_duration: DEFAULT_TRANSITION_DURATION,
            policy: PersistencePolicy::default(),
            max_restarts: None,
            clear_screen: true,
        }
    }
}

impl HostConfig {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` when a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through `lookup`. Unset or blank variables
    /// keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` when a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let millis = |name: &str, default: Duration| -> Result<Duration, AppError> {
            get(name).map_or(Ok(default), |value| {
                value
                    .trim()
                    .parse::<u64>()
                    .map(Duration::from_millis)
                    .map_err(|e| AppError::Config(format!("{name} must be milliseconds: {e}")))
            })
        };

        let policy = match get(POLICY_VAR) {
            Some(value) => value
                .parse::<PersistencePolicy>()
                .map_err(|e| AppError::Config(format!("{POLICY_VAR}: {e}")))?,
            None => defaults.policy,
        };

        let max_restarts = get(MAX_RESTARTS_VAR)
            .map(|value| {
                value.trim().parse::<u32>().map_err(|e| {
                    AppError::Config(format!("{MAX_RESTARTS_VAR} must be a count: {e}"))
                })
            })
            .transpose()?;

        let clear_screen = match get(CLEAR_SCREEN_VAR) {
            Some(value) => parse_flag(&value).ok_or_else(|| {
                AppError::Config(format!("{CLEAR_SCREEN_VAR} must be true or false, got {value:?}"))
            })?,
            None => defaults.clear_screen,
        };

        Ok(Self {
            store_path: get(STORE_PATH_VAR).map_or(defaults.store_path, PathBuf::from),
            content_path: get(CONTENT_VAR).map(PathBuf::from),
            status_duration: millis(STATUS_MS_VAR, defaults.status_duration)?,
            storage_delay: millis(STORAGE_DELAY_MS_VAR, defaults.storage_delay)?,
            transition_duration: millis(TRANSITION_MS_VAR, defaults.transition_duration)?,
            policy,
            max_restarts,
            clear_screen,
        })
    }

    /// Loads the configured catalog, or the stock one when none is set.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Io` if the file cannot be read and
    /// `AppError::Content` if it is not a valid catalog.
    pub async fn load_catalog(&self) -> Result<ScreenCatalog, AppError> {
        let Some(path) = &self.content_path else {
            return Ok(ScreenCatalog::default());
        };
        let source = tokio::fs::read_to_string(path).await?;
        Ok(ScreenCatalog::from_yaml_str(&source)?)
    }
}

/// Parses a boolean environment flag.
#[must_use]
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use keepsake_core::screen::ScreenId;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<HostConfig, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        HostConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_empty_environment_yields_defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config, HostConfig::default());
        assert_eq!(config.store_path, PathBuf::from("keepsake-progress.json"));
        assert_eq!(config.status_duration, Duration::from_millis(1500));
        assert_eq!(config.storage_delay, Duration::from_millis(2000));
        assert_eq!(config.transition_duration, Duration::from_millis(500));
        assert_eq!(config.policy, PersistencePolicy::BestEffort);
        assert!(config.clear_screen);
    }

    #[test]
    fn test_every_variable_is_read() {
        // Arrange
        let vars = [
            (STORE_PATH_VAR, "/tmp/progress.json"),
            (CONTENT_VAR, "screens.yaml"),
            (STATUS_MS_VAR, "10"),
            (STORAGE_DELAY_MS_VAR, "20"),
            (TRANSITION_MS_VAR, "0"),
            (POLICY_VAR, "abort-on-failure"),
            (MAX_RESTARTS_VAR, "3"),
            (CLEAR_SCREEN_VAR, "off"),
        ];

        // Act
        let config = config_from(&vars).unwrap();

        // Assert
        assert_eq!(config.store_path, PathBuf::from("/tmp/progress.json"));
        assert_eq!(config.content_path, Some(PathBuf::from("screens.yaml")));
        assert_eq!(config.status_duration, Duration::from_millis(10));
        assert_eq!(config.storage_delay, Duration::from_millis(20));
        assert_eq!(config.transition_duration, Duration::ZERO);
        assert_eq!(config.policy, PersistencePolicy::AbortOnFailure);
        assert_eq!(config.max_restarts, Some(3));
        assert!(!config.clear_screen);
    }

    #[test]
    fn test_blank_values_keep_defaults() {
        let config = config_from(&[(STATUS_MS_VAR, "  "), (CONTENT_VAR, "")]).unwrap();

        assert_eq!(config.status_duration, Duration::from_millis(1500));
        assert_eq!(config.content_path, None);
    }

    #[test]
    fn test_invalid_values_are_config_errors() {
        let cases = [
            (STATUS_MS_VAR, "fast"),
            (STORAGE_DELAY_MS_VAR, "-1"),
            (POLICY_VAR, "sometimes"),
            (MAX_RESTARTS_VAR, "many"),
            (CLEAR_SCREEN_VAR, "maybe"),
        ];

        for (name, value) in cases {
            match config_from(&[(name, value)]) {
                Err(AppError::Config(message)) => assert!(message.contains(name), "{message}"),
                other => panic!("expected Config error for {name}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_parse_flag_accepts_common_spellings() {
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" no "), Some(false));
        assert_eq!(parse_flag("2"), None);
    }

    #[tokio::test]
    async fn test_load_catalog_without_path_uses_stock_content() {
        let catalog = HostConfig::default().load_catalog().await.unwrap();

        assert_eq!(catalog.main().id, ScreenId::Main);
    }

    #[tokio::test]
    async fn test_load_catalog_reads_yaml_overrides() {
        // Arrange
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "loading:\n  text: Fetching your progress").unwrap();
        let config = HostConfig {
            content_path: Some(file.path().to_path_buf()),
            ..HostConfig::default()
        };

        // Act
        let catalog = config.load_catalog().await.unwrap();

        // Assert
        assert_eq!(catalog.loading().text, "Fetching your progress");
    }

    #[tokio::test]
    async fn test_load_catalog_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = HostConfig {
            content_path: Some(dir.path().join("absent.yaml")),
            ..HostConfig::default()
        };

        let result = config.load_catalog().await;

        assert!(matches!(result, Err(AppError::Io(_))));
    }
}

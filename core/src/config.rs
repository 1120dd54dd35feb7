//! User configuration: `~/.billet/config.toml`, overridable via `BILLET_CONFIG`.

use serde::Deserialize;
use std::{env, path::PathBuf};

use billet_types::{Recipient, UiOptions};

// Default value function for serde (bool::default() is false, so only true needs a fn)
pub(crate) const fn default_true() -> bool {
    true
}

#[derive(Debug, Default, Deserialize)]
pub struct BilletConfig {
    pub app: Option<AppConfig>,
    pub music: Option<MusicConfig>,
}

#[derive(Debug)]
pub enum ConfigError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Read { path, source } => {
                write!(f, "failed to read config at {}: {source}", path.display())
            }
            ConfigError::Parse { path, source } => {
                write!(f, "failed to parse config at {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Name the card addresses. Blank values fall back to the default.
    pub recipient: Option<String>,
    /// Use ASCII-only glyphs for icons and decorations.
    #[serde(default)]
    pub ascii_only: bool,
    /// Enable a high-contrast color palette.
    #[serde(default)]
    pub high_contrast: bool,
    /// Disable the drift layer and confetti motion.
    #[serde(default)]
    pub reduced_motion: bool,
}

#[derive(Debug, Deserialize)]
pub struct MusicConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Player invocation as a full argv, e.g. `["mpv", "--no-video", "--volume=50", "song.mp3"]`.
    pub command: Option<Vec<String>>,
}

impl Default for MusicConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            command: None,
        }
    }
}

impl BilletConfig {
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let path = match config_path() {
            Some(path) => path,
            None => return Ok(None),
        };
        if !path.exists() {
            return Ok(None);
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read { path, source: err });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(Some(config)),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse { path, source: err })
            }
        }
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    /// Presentation options resolved from the `[app]` section.
    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        let app = self.app.as_ref();
        UiOptions {
            ascii_only: app.is_some_and(|a| a.ascii_only),
            high_contrast: app.is_some_and(|a| a.high_contrast),
            reduced_motion: app.is_some_and(|a| a.reduced_motion),
        }
    }

    /// The card's addressee; invalid (blank) values fall back to the default.
    #[must_use]
    pub fn recipient(&self) -> Recipient {
        self.app
            .as_ref()
            .and_then(|a| a.recipient.clone())
            .and_then(|name| Recipient::new(name).ok())
            .unwrap_or_default()
    }

    /// Player argv when music is enabled and configured.
    #[must_use]
    pub fn music_command(&self) -> Option<&[String]> {
        let music = self.music.as_ref()?;
        if !music.enabled {
            return None;
        }
        music.command.as_deref().filter(|argv| !argv.is_empty())
    }
}

/// Config file location: `BILLET_CONFIG` wins, then `~/.billet/config.toml`.
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    if let Ok(path) = env::var("BILLET_CONFIG") {
        let path = path.trim();
        if !path.is_empty() {
            return Some(PathBuf::from(path));
        }
    }
    dirs::home_dir().map(|home| home.join(".billet").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::BilletConfig;
    use billet_types::Recipient;

    #[test]
    fn empty_config_gives_defaults() {
        let config: BilletConfig = toml::from_str("").unwrap();
        let options = config.ui_options();
        assert!(!options.ascii_only);
        assert!(!options.high_contrast);
        assert!(!options.reduced_motion);
        assert_eq!(config.music_command(), None);
    }

    #[test]
    fn app_section_drives_ui_options() {
        let config: BilletConfig = toml::from_str(
            r#"
            [app]
            recipient = "Sam"
            ascii_only = true
            reduced_motion = true
            "#,
        )
        .unwrap();
        let options = config.ui_options();
        assert!(options.ascii_only);
        assert!(!options.high_contrast);
        assert!(options.reduced_motion);
        assert_eq!(config.recipient().as_str(), "Sam");
    }

    #[test]
    fn blank_recipient_falls_back_to_default() {
        let config: BilletConfig = toml::from_str("[app]\nrecipient = \"  \"\n").unwrap();
        assert_eq!(config.recipient(), Recipient::default());
    }

    #[test]
    fn music_command_respects_the_enabled_flag() {
        let config: BilletConfig = toml::from_str(
            r#"
            [music]
            enabled = false
            command = ["mpv", "song.mp3"]
            "#,
        )
        .unwrap();
        assert_eq!(config.music_command(), None);

        let config: BilletConfig = toml::from_str(
            r#"
            [music]
            command = ["mpv", "--no-video", "song.mp3"]
            "#,
        )
        .unwrap();
        assert_eq!(
            config.music_command(),
            Some(&["mpv".to_string(), "--no-video".into(), "song.mp3".into()][..])
        );
    }

    #[test]
    fn empty_music_command_is_treated_as_absent() {
        let config: BilletConfig = toml::from_str("[music]\ncommand = []\n").unwrap();
        assert_eq!(config.music_command(), None);
    }
}

//! Persisted UI preferences
//!
//! Theme, contrast, dictionary and word length live in a TOML file in the
//! platform config directory. Every field falls back to its default on its
//! own, and a missing or unreadable file is never an error for the user.

use crate::catalog::{self, WORD_LENGTHS};
use crate::core::DEFAULT_WORD_LEN;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Application directory name under the platform config directory
pub const APP_DIR: &str = "wordle_assist";

/// Dictionary used when none is stored
pub const DEFAULT_DICTIONARY: &str = "en";

/// Colour theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// Follow the OS setting, light when it cannot be determined
    #[must_use]
    pub fn detect() -> Self {
        match dark_light::detect() {
            Ok(dark_light::Mode::Dark) => Self::Dark,
            Ok(dark_light::Mode::Light | dark_light::Mode::Unspecified) | Err(_) => Self::Light,
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Stored preference values
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preferences {
    /// `None` until the user picks one; the OS setting applies meanwhile
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    pub high_contrast: bool,
    pub dictionary: String,
    pub word_length: usize,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: None,
            high_contrast: false,
            dictionary: DEFAULT_DICTIONARY.to_string(),
            word_length: DEFAULT_WORD_LEN,
        }
    }
}

/// Value of one stored key, or `None` if it is missing or has the wrong type
fn field<T: DeserializeOwned>(table: &toml::Table, key: &str) -> Option<T> {
    let value = table.get(key)?.clone();
    match value.try_into::<T>() {
        Ok(v) => Some(v),
        Err(err) => {
            warn!(key, error = %err, "invalid stored preference, using default");
            None
        }
    }
}

impl Preferences {
    /// Read each key on its own so one bad value keeps the others
    fn from_table(table: &toml::Table) -> Self {
        let defaults = Self::default();
        Self {
            theme: field(table, "theme").or(defaults.theme),
            high_contrast: field(table, "high_contrast").unwrap_or(defaults.high_contrast),
            dictionary: field(table, "dictionary").unwrap_or(defaults.dictionary),
            word_length: field(table, "word_length").unwrap_or(defaults.word_length),
        }
    }

    /// Replace values the app cannot use with their defaults
    fn sanitized(mut self) -> Self {
        if catalog::display_name(WORD_LENGTHS, self.word_length).is_none() {
            warn!(
                word_length = self.word_length,
                "stored word length not supported, using default"
            );
            self.word_length = DEFAULT_WORD_LEN;
        }
        if self.dictionary.trim().is_empty() {
            self.dictionary = DEFAULT_DICTIONARY.to_string();
        }
        self
    }
}

/// Location of the preferences file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceStore {
    path: Option<PathBuf>,
}

impl PreferenceStore {
    /// Platform config directory for this application
    ///
    /// - Linux: `~/.config/wordle_assist/`
    /// - macOS: `~/Library/Application Support/wordle_assist/`
    /// - Windows: `%APPDATA%\wordle_assist\`
    ///
    /// # Errors
    /// Returns an error if the platform has no config directory.
    pub fn config_dir() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(APP_DIR);
        Ok(dir)
    }

    /// Store at the platform default path, or memory-only if there is none
    #[must_use]
    pub fn platform() -> Self {
        match Self::config_dir() {
            Ok(dir) => Self::at(dir.join("preferences.toml")),
            Err(err) => {
                warn!(error = %err, "preferences will not be saved");
                Self::in_memory()
            }
        }
    }

    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    #[must_use]
    pub const fn in_memory() -> Self {
        Self { path: None }
    }


    /// Read stored preferences, falling back to defaults on any problem
    #[must_use]
    pub fn load(&self) -> Preferences {
        let Some(path) = &self.path else {
            return Preferences::default();
        };
        if !path.exists() {
            debug!(path = %path.display(), "no stored preferences");
            return Preferences::default();
        }

        let parsed = fs::read_to_string(path)
            .with_context(|| format!("Failed to read preferences: {}", path.display()))
            .and_then(|content| {
                content
                    .parse::<toml::Table>()
                    .with_context(|| format!("Failed to parse preferences: {}", path.display()))
            });

        match parsed {
            Ok(table) => Preferences::from_table(&table).sanitized(),
            Err(err) => {
                warn!(error = %format!("{err:#}"), "using default preferences");
                Preferences::default()
            }
        }
    }

    /// Write preferences with a temp file + rename
    ///
    /// # Errors
    /// Returns an error if the directory or file cannot be written.
    pub fn save(&self, prefs: &Preferences) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).with_context(|| {
                format!("Failed to create config directory: {}", dir.display())
            })?;
        }

        let content = toml::to_string_pretty(prefs).context("Failed to serialize preferences")?;
        let temp_path = path.with_extension("toml.tmp");
        fs::write(&temp_path, content)
            .with_context(|| format!("Failed to write {}", temp_path.display()))?;
        fs::rename(&temp_path, path)
            .with_context(|| format!("Failed to rename temp file to {}", path.display()))?;

        debug!(path = %path.display(), "preferences saved");
        Ok(())
    }
}

/// Process-wide preferences: current values plus the store they persist to
///
/// Every setter writes through immediately. Session overrides change what the
/// app sees but never reach the file.
#[derive(Debug, Clone)]
pub struct UiPreferences {
    stored: Preferences,
    session: Preferences,
    store: PreferenceStore,
    os_theme: Theme,
}

impl UiPreferences {
    /// Load from `store`; the OS theme is sampled once here
    #[must_use]
    pub fn load(store: PreferenceStore) -> Self {
        let stored = store.load();
        Self {
            session: stored.clone(),
            stored,
            store,
            os_theme: Theme::detect(),
        }
    }


    #[must_use]
    pub fn theme(&self) -> Theme {
        self.session.theme.unwrap_or(self.os_theme)
    }

    #[must_use]
    pub const fn high_contrast(&self) -> bool {
        self.session.high_contrast
    }

    #[must_use]
    pub fn dictionary(&self) -> &str {
        &self.session.dictionary
    }

    #[must_use]
    pub const fn word_length(&self) -> usize {
        self.session.word_length
    }

    /// Session-only overrides (CLI flags)
    pub fn override_session(&mut self, dictionary: Option<String>, word_length: Option<usize>) {
        if let Some(dict) = dictionary {
            self.session.dictionary = dict;
        }
        if let Some(len) = word_length {
            self.session.word_length = len;
        }
    }

    fn update(&mut self, apply: impl Fn(&mut Preferences)) -> Result<()> {
        apply(&mut self.session);
        apply(&mut self.stored);
        self.store.save(&self.stored)
    }

    /// # Errors
    /// Returns an error if the preferences file cannot be written.
    pub fn set_theme(&mut self, theme: Theme) -> Result<()> {
        self.update(|p| p.theme = Some(theme))
    }

    /// # Errors
    /// Returns an error if the preferences file cannot be written.
    pub fn set_high_contrast(&mut self, on: bool) -> Result<()> {
        self.update(|p| p.high_contrast = on)
    }

    /// # Errors
    /// Returns an error if the preferences file cannot be written.
    pub fn set_dictionary(&mut self, dictionary: &str) -> Result<()> {
        self.update(|p| p.dictionary = dictionary.to_string())
    }

    /// # Errors
    /// Returns an error if the preferences file cannot be written.
    pub fn set_word_length(&mut self, word_length: usize) -> Result<()> {
        self.update(|p| p.word_length = word_length)
    }
}

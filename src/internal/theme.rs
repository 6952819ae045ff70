//! Light/dark mode: resolution at startup, persistence and change broadcast.
//!
//! The active mode lives in a [`ThemeContext`] (a `watch` channel) so any
//! component can subscribe to changes. [`ThemeController`] owns the palette
//! derived from the mode and writes every real change to a [`ThemeStore`].

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use strum_macros::{Display, EnumString};
use tokio::sync::watch;

use crate::utils::theme_loader::{TuiTheme, load_theme};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Interpret a `COLORFGBG` value ("fg;bg"). Background 0-7 is dark, 8-15
    /// light; anything else says nothing.
    pub fn from_colorfgbg(value: &str) -> Option<Self> {
        let bg = value.split(';').next_back()?.parse::<u8>().ok()?;
        match bg {
            0..=7 => Some(Self::Dark),
            8..=15 => Some(Self::Light),
            _ => None,
        }
    }

    /// Terminal background preference, if the terminal advertises one.
    pub fn detect_os_preference() -> Option<Self> {
        std::env::var("COLORFGBG")
            .ok()
            .and_then(|v| Self::from_colorfgbg(&v))
    }
}

/// Persistence of the chosen mode.
pub trait ThemeStore: Send + Sync {
    fn load(&self) -> Option<ThemeMode>;
    fn save(&self, mode: ThemeMode) -> Result<()>;
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredTheme {
    theme: ThemeMode,
}

/// `{"theme": "dark"}` in `<config_dir>/genbi-tui/theme.json`.
#[derive(Debug, Clone)]
pub struct FileThemeStore {
    path: PathBuf,
}

impl FileThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn default_location() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("genbi-tui");
        Ok(Self::new(config_dir.join("theme.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ThemeStore for FileThemeStore {
    fn load(&self) -> Option<ThemeMode> {
        let content = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str::<StoredTheme>(&content) {
            Ok(stored) => Some(stored.theme),
            Err(e) => {
                tracing::warn!(path = ?self.path, "Ignoring unreadable theme file: {}", e);
                None
            }
        }
    }

    fn save(&self, mode: ThemeMode) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.exists()
        {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let content = serde_json::to_string_pretty(&StoredTheme { theme: mode })
            .context("Failed to serialize theme")?;
        fs::write(&self.path, content).context("Failed to write theme file")?;
        Ok(())
    }
}

/// In-memory store, used when no config directory exists and in tests.
#[derive(Debug, Default)]
pub struct MemoryThemeStore {
    value: Mutex<Option<ThemeMode>>,
    writes: Mutex<usize>,
}

impl MemoryThemeStore {
    pub fn with_value(mode: ThemeMode) -> Self {
        Self {
            value: Mutex::new(Some(mode)),
            writes: Mutex::new(0),
        }
    }

    /// Number of successful `save` calls.
    pub fn writes(&self) -> usize {
        self.writes.lock().map(|w| *w).unwrap_or(0)
    }
}

impl ThemeStore for MemoryThemeStore {
    fn load(&self) -> Option<ThemeMode> {
        self.value.lock().ok().and_then(|v| *v)
    }

    fn save(&self, mode: ThemeMode) -> Result<()> {
        let mut value = self
            .value
            .lock()
            .map_err(|_| anyhow::anyhow!("theme store lock poisoned"))?;
        *value = Some(mode);
        if let Ok(mut writes) = self.writes.lock() {
            *writes += 1;
        }
        Ok(())
    }
}

impl<S: ThemeStore + ?Sized> ThemeStore for Arc<S> {
    fn load(&self) -> Option<ThemeMode> {
        (**self).load()
    }

    fn save(&self, mode: ThemeMode) -> Result<()> {
        (**self).save(mode)
    }
}

/// Shared, observable current mode. `None` until a controller resolves it.
#[derive(Debug, Clone)]
pub struct ThemeContext {
    tx: Arc<watch::Sender<Option<ThemeMode>>>,
}

impl ThemeContext {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    pub fn with_mode(mode: ThemeMode) -> Self {
        let (tx, _rx) = watch::channel(Some(mode));
        Self { tx: Arc::new(tx) }
    }

    pub fn current(&self) -> Option<ThemeMode> {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<ThemeMode>> {
        self.tx.subscribe()
    }

    /// Publish `mode`; subscribers are only woken when it differs.
    fn publish(&self, mode: ThemeMode) -> bool {
        self.tx.send_if_modified(|current| match *current == Some(mode) {
            true => false,
            false => {
                *current = Some(mode);
                true
            }
        })
    }
}

impl Default for ThemeContext {
    fn default() -> Self {
        Self::new()
    }
}

pub struct ThemeController {
    mode: ThemeMode,
    palette: TuiTheme,
    context: ThemeContext,
    store: Box<dyn ThemeStore>,
    theme_file: Option<PathBuf>,
    enable_performance_metrics: bool,
}

impl ThemeController {
    /// Resolve the starting mode: context value, then stored value, then the
    /// OS preference, then light. Nothing is written to the store.
    pub fn init(
        context: ThemeContext,
        store: Box<dyn ThemeStore>,
        os_preference: Option<ThemeMode>,
    ) -> Self {
        let mode = context
            .current()
            .or_else(|| store.load())
            .or(os_preference)
            .unwrap_or_default();
        tracing::info!(%mode, "Resolved initial theme");
        context.publish(mode);

        Self {
            mode,
            palette: TuiTheme::builtin(mode),
            context,
            store,
            theme_file: None,
            enable_performance_metrics: false,
        }
    }

    /// Take palette colors from a JSON theme file instead of the built-ins.
    pub fn with_theme_file(mut self, path: Option<PathBuf>, enable_performance_metrics: bool) -> Self {
        self.theme_file = path;
        self.enable_performance_metrics = enable_performance_metrics;
        self.palette = self.build_palette(self.mode);
        self
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn is_dark(&self) -> bool {
        self.mode == ThemeMode::Dark
    }

    pub fn palette(&self) -> &TuiTheme {
        &self.palette
    }

    pub fn context(&self) -> &ThemeContext {
        &self.context
    }

    pub fn toggle(&mut self) -> ThemeMode {
        let next = self.mode.toggled();
        self.apply(next);
        next
    }

    /// Switch to `mode`. Re-applying the current mode does nothing: no store
    /// write, no palette rebuild, no notification. Returns whether it changed.
    pub fn apply(&mut self, mode: ThemeMode) -> bool {
        if mode == self.mode {
            return false;
        }
        self.mode = mode;
        self.palette = self.build_palette(mode);
        if let Err(e) = self.store.save(mode) {
            tracing::warn!("Failed to persist theme: {}", e);
        }
        self.context.publish(mode);
        tracing::info!(%mode, "Theme changed");
        true
    }

    fn build_palette(&self, mode: ThemeMode) -> TuiTheme {
        match &self.theme_file {
            Some(path) => match load_theme(path, mode, self.enable_performance_metrics) {
                Ok(theme) => theme,
                Err(e) => {
                    tracing::error!("Failed to load theme '{}': {}", path.display(), e);
                    TuiTheme::builtin(mode)
                }
            },
            None => TuiTheme::builtin(mode),
        }
    }
}

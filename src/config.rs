use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Environment variable that overrides `api_base_url` at runtime.
pub const API_BASE_URL_ENV: &str = "GENBI_API_BASE_URL";

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the content API. `GENBI_API_BASE_URL` wins over this value.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Optional JSON palette file with `light` and `dark` variants.
    /// Empty means the built-in palettes are used.
    #[serde(default)]
    pub theme_file: String,
    /// Quiet period before a search query is applied.
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
    /// How many rows from the end of a list count as "near the bottom".
    #[serde(default = "default_scroll_threshold")]
    pub scroll_threshold: usize,
    /// Drop articles whose id was already loaded by an earlier page.
    #[serde(default = "default_dedupe_pages")]
    pub dedupe_pages: bool,
    pub network: NetworkConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct NetworkConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: format!("genbi-tui/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Per-module overrides, e.g. `{"genbi_tui::api": "debug"}`.
    pub module_levels: HashMap<String, String>,
    pub log_directory: Option<String>,
    pub enable_performance_metrics: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            module_levels: HashMap::new(),
            log_directory: None,
            enable_performance_metrics: false,
        }
    }
}

impl LoggingConfig {
    /// Build an `EnvFilter` directive string from the level and module overrides.
    pub fn filter_directive(&self) -> String {
        let mut filter_str = self.level.clone();
        let mut modules: Vec<_> = self.module_levels.iter().collect();
        modules.sort();
        for (module, level) in modules {
            filter_str.push_str(&format!(",{}={}", module, level));
        }
        filter_str
    }
}

fn default_api_base_url() -> String {
    crate::api::DEFAULT_API_BASE_URL.to_string()
}

fn default_search_debounce_ms() -> u64 {
    300
}

fn default_scroll_threshold() -> usize {
    3
}

fn default_dedupe_pages() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            theme_file: String::new(),
            search_debounce_ms: default_search_debounce_ms(),
            scroll_threshold: default_scroll_threshold(),
            dedupe_pages: default_dedupe_pages(),
            network: NetworkConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Self {
        // Look for config.ron in current directory or next to executable
        let mut candidates = Vec::new();
        candidates.push(PathBuf::from("config.ron"));
        if let Ok(exe) = std::env::current_exe()
            && let Some(dir) = exe.parent()
        {
            candidates.push(dir.join("config.ron"));
        }

        let mut config = Self::default();
        for path in candidates {
            if path.exists()
                && let Ok(content) = fs::read_to_string(&path)
            {
                match ron::from_str::<AppConfig>(&content) {
                    Ok(loaded) => {
                        tracing::info!("Loaded config from {}", path.display());
                        config = loaded;
                        break;
                    }
                    Err(e) => {
                        tracing::error!("Failed to parse config at {}: {}", path.display(), e);
                    }
                }
            }
        }

        config.apply_env_override(std::env::var(API_BASE_URL_ENV).ok());
        config
    }

    /// Apply the runtime base URL override. Blank values are ignored.
    pub fn apply_env_override(&mut self, value: Option<String>) {
        if let Some(url) = value.map(|v| v.trim().to_string())
            && !url.is_empty()
        {
            tracing::info!(api_base_url = %url, "Using API base URL from {}", API_BASE_URL_ENV);
            self.api_base_url = url;
        }
    }
}

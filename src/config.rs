use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::{AppError, Context, Result};

pub const DAY_ENDPOINT: &str = "https://finance.naver.com/item/sise_day.nhn";
pub const MINUTE_ENDPOINT: &str = "https://finance.naver.com/item/sise_time.nhn";
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/92.0.4501.0 Safari/537.36";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_DAY_CONCURRENCY: usize = 20;
pub const DEFAULT_MINUTE_CONCURRENCY: usize = 50;
pub const DEFAULT_MAX_PAGES: u32 = 1000;

/// Upstream endpoints and request settings shared by both fetch modes.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default, rename_all = "camelCase")]
pub struct SourceConfig {
    pub day_url: String,
    pub minute_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub max_pages: u32,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            day_url: DAY_ENDPOINT.to_string(),
            minute_url: MINUTE_ENDPOINT.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

impl SourceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub source: SourceConfig,
    pub day_concurrency: usize,
    pub minute_concurrency: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Config {
    pub fn builtin() -> Self {
        Self {
            source: SourceConfig::default(),
            day_concurrency: DEFAULT_DAY_CONCURRENCY,
            minute_concurrency: DEFAULT_MINUTE_CONCURRENCY,
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        // Try the literal path first, then next to the binary, then the working directory.
        let search_paths = vec![
            path.to_path_buf(),
            std::env::current_exe()
                .ok()
                .and_then(|exe| exe.parent().map(|p| p.join(path)))
                .unwrap_or_else(|| path.to_path_buf()),
            std::env::current_dir()
                .map(|cwd| cwd.join(path))
                .unwrap_or_else(|_| path.to_path_buf()),
        ];

        let mut last_error = None;

        for search_path in search_paths {
            match std::fs::read_to_string(&search_path) {
                Ok(content) => {
                    let config: Config = serde_json::from_str(&content).with_context(|| {
                        format!("Failed to parse config JSON at {}", search_path.display())
                    })?;
                    return Ok(config);
                }
                Err(e) => {
                    last_error = Some(format!("Failed to read {}: {}", search_path.display(), e));
                }
            }
        }

        Err(AppError::message(format!(
            "Could not find config file. Last error: {}",
            last_error.unwrap_or_else(|| "No search paths".to_string())
        )))
    }

    /// Resolve the optional `--config` flag into a configuration.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::builtin()),
        }
    }
}

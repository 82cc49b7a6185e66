use crate::config::toml_config::TomlConfig;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_range, validate_url, Validate};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://developer-directory-backend.onrender.com";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Effective settings after merging flags, environment and the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectorySettings {
    pub base_url: String,
    pub timeout_seconds: u64,
}

impl DirectorySettings {
    /// 優先順序：命令列/環境變數 > 設定檔 > 預設值
    pub fn resolve(
        api_url: Option<String>,
        timeout_seconds: Option<u64>,
        file: Option<&TomlConfig>,
    ) -> Self {
        let file_api = file.map(|f| &f.api);
        let base_url = api_url
            .filter(|url| !url.trim().is_empty())
            .or_else(|| file_api.and_then(|api| api.base_url.clone()))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout_seconds = timeout_seconds
            .or_else(|| file_api.and_then(|api| api.timeout_seconds))
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS);

        Self {
            base_url,
            timeout_seconds,
        }
    }
}

impl Default for DirectorySettings {
    fn default() -> Self {
        Self::resolve(None, None, None)
    }
}

impl Validate for DirectorySettings {
    fn validate(&self) -> Result<()> {
        validate_url("api.base_url", &self.base_url)?;
        validate_range("api.timeout_seconds", self.timeout_seconds, 1, 300)?;
        Ok(())
    }
}

impl ConfigProvider for DirectorySettings {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request_timeout(&self) -> Option<Duration> {
        Some(Duration::from_secs(self.timeout_seconds))
    }
}

use crate::client::{ClientConfig, DEFAULT_BASE_URL};
use crate::core::table::{DEFAULT_TABLE_PAGE_SIZE, PAGE_SIZES};
use crate::domain::ports::DEFAULT_PAGE_SIZE;
use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_one_of, validate_positive_number, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

pub const BASE_URL_ENV: &str = "CATALOG_API_URL";
pub const TOKEN_ENV: &str = "CATALOG_API_TOKEN";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub token: Option<String>,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub skip_animations: bool,
    #[serde(default = "default_table_page_size")]
    pub page_size: u32,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_table_page_size() -> u32 {
    DEFAULT_TABLE_PAGE_SIZE
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            page_size: default_page_size(),
            timeout_seconds: None,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            skip_animations: false,
            page_size: default_table_page_size(),
        }
    }
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = substitute_env_vars(content);
        toml::from_str(&processed).map_err(|e| CatalogError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// `CATALOG_API_URL` and `CATALOG_API_TOKEN` win over file values.
    pub fn apply_env(mut self) -> Self {
        self.apply_overrides(
            std::env::var(BASE_URL_ENV).ok(),
            std::env::var(TOKEN_ENV).ok(),
        );
        self
    }

    pub fn apply_overrides(&mut self, base_url: Option<String>, token: Option<String>) {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            self.api.base_url = url;
        }
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            self.api.token = Some(token);
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.api.base_url.clone(),
            token: self.api.token.clone(),
            page_size: self.api.page_size,
            timeout: self.api.timeout_seconds.map(Duration::from_secs),
        }
    }
}

/// Replaces `${VAR}` with the variable's value; unknown variables stay as written.
fn substitute_env_vars(content: &str) -> String {
    static ENV_VAR: OnceLock<Regex> = OnceLock::new();
    let re = ENV_VAR.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"));

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    })
    .into_owned()
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api.base_url", &self.api.base_url)?;
        validate_positive_number("api.page_size", self.api.page_size as usize, 1)?;
        if let Some(token) = &self.api.token {
            validate_non_empty_string("api.token", token)?;
        }
        if let Some(timeout) = self.api.timeout_seconds {
            validate_positive_number("api.timeout_seconds", timeout as usize, 1)?;
        }
        validate_one_of("display.page_size", self.display.page_size, &PAGE_SIZES)?;
        Ok(())
    }
}

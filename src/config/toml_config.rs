use crate::adapters::rest_store::DEFAULT_TABLE;
use crate::core::ConfigProvider;
use crate::utils::error::{IntakeError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_STATE_DIR: &str = "./.contact-intake";
pub const DEFAULT_ADMIN_SECRET: &str = "admin123";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub store: StoreConfig,
    pub gate: Option<GateConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub endpoint: String,
    pub api_key: String,
    pub table: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateConfig {
    pub secret: Option<String>,
    pub state_dir: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(IntakeError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| IntakeError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SUPABASE_ANON_KEY})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| IntakeError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        crate::utils::validation::validate_url("store.endpoint", &self.store.endpoint)?;
        crate::utils::validation::validate_non_empty_string("store.table", self.table())?;

        // An unresolved ${VAR} means the environment was not set up.
        if self.store.api_key.trim().is_empty() || self.store.api_key.starts_with("${") {
            return Err(IntakeError::MissingConfigError {
                field: "store.api_key".to_string(),
            });
        }

        crate::utils::validation::validate_path("gate.state_dir", self.state_dir())?;
        crate::utils::validation::validate_non_empty_string("gate.secret", self.admin_secret())?;

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn store_endpoint(&self) -> &str {
        &self.store.endpoint
    }

    fn api_key(&self) -> &str {
        &self.store.api_key
    }

    fn table(&self) -> &str {
        self.store.table.as_deref().unwrap_or(DEFAULT_TABLE)
    }

    fn state_dir(&self) -> &str {
        self.gate
            .as_ref()
            .and_then(|g| g.state_dir.as_deref())
            .unwrap_or(DEFAULT_STATE_DIR)
    }

    fn admin_secret(&self) -> &str {
        self.gate
            .as_ref()
            .and_then(|g| g.secret.as_deref())
            .unwrap_or(DEFAULT_ADMIN_SECRET)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

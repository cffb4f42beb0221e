use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Env var that overrides the Airtable token from the config file
pub const AIRTABLE_TOKEN_ENV: &str = "STOREFRONT_AIRTABLE_TOKEN";

/// Main configuration structure
///
/// This gets loaded from config file, env vars, and CLI args.
/// Priority: CLI > Env > File > Defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub airtable: AirtableConfig,
    #[serde(default)]
    pub uploads: UploadConfig,
}

impl Config {
    /// Load config from default location, falling back to defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&contents)
        } else {
            // No config file? Use defaults
            Ok(Self::default())
        }
    }

    pub fn from_toml(contents: &str) -> crate::Result<Self> {
        toml::from_str(contents)
            .map_err(|e| crate::Error::ConfigError(format!("Failed to parse config: {}", e)))
    }

    /// `<config dir>/storefront/config.toml` - XDG on Linux, AppData on Windows
    pub fn config_path() -> crate::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| crate::Error::ConfigError("Could not find config directory".into()))?
            .join("storefront");

        Ok(config_dir.join("config.toml"))
    }

    /// Layer a token from the environment (or CLI) over the file value.
    /// Blank values are ignored.
    pub fn with_token_override(mut self, token: Option<String>) -> Self {
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            self.airtable.token = Some(token);
        }
        self
    }

    /// Same config with the token masked, for printing
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.airtable.token.is_some() {
            copy.airtable.token = Some("********".to_string());
        }
        copy
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// DummyJSON base URL
    #[serde(default = "default_catalog_url")]
    pub base_url: String,

    /// Request timeout in seconds, shared by every client
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_catalog_url() -> String {
    "https://dummyjson.com".to_string()
}

fn default_timeout() -> u64 {
    10
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_catalog_url(),
            timeout_secs: default_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirtableConfig {
    /// Personal access token
    /// Create one at https://airtable.com/create/tokens
    pub token: Option<String>,

    #[serde(default = "default_airtable_url")]
    pub api_url: String,

    #[serde(default = "default_base_id")]
    pub base_id: String,

    #[serde(default = "default_product_table")]
    pub product_table: String,

    #[serde(default = "default_favorite_table")]
    pub favorite_table: String,

    #[serde(default = "default_deleted_table")]
    pub deleted_table: String,

    /// The single row each ledger lives in
    #[serde(default = "default_favorite_record")]
    pub favorite_record_id: String,

    #[serde(default = "default_deleted_record")]
    pub deleted_record_id: String,
}

fn default_airtable_url() -> String {
    "https://api.airtable.com/v0".to_string()
}

fn default_base_id() -> String {
    "appqzUpSKoEruFhlG".to_string()
}

fn default_product_table() -> String {
    "product".to_string()
}

fn default_favorite_table() -> String {
    "favorite".to_string()
}

fn default_deleted_table() -> String {
    "deleted".to_string()
}

fn default_favorite_record() -> String {
    "recxpNLzCPK4hd8Ar".to_string()
}

fn default_deleted_record() -> String {
    "recufJd2sy1CGWTqx".to_string()
}

impl Default for AirtableConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_url: default_airtable_url(),
            base_id: default_base_id(),
            product_table: default_product_table(),
            favorite_table: default_favorite_table(),
            deleted_table: default_deleted_table(),
            favorite_record_id: default_favorite_record(),
            deleted_record_id: default_deleted_record(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    #[serde(default = "default_cloudinary_url")]
    pub api_url: String,

    #[serde(default = "default_cloud_name")]
    pub cloud_name: String,

    /// Unsigned upload preset configured on the Cloudinary side
    #[serde(default = "default_upload_preset")]
    pub upload_preset: String,

    /// Uploads get their own, longer timeout
    #[serde(default = "default_upload_timeout")]
    pub timeout_secs: u64,
}

fn default_cloudinary_url() -> String {
    "https://api.cloudinary.com/v1_1".to_string()
}

fn default_cloud_name() -> String {
    "dlpxnd6yc".to_string()
}

fn default_upload_preset() -> String {
    "default".to_string()
}

fn default_upload_timeout() -> u64 {
    30 // images can be up to 5 MB each
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            api_url: default_cloudinary_url(),
            cloud_name: default_cloud_name(),
            upload_preset: default_upload_preset(),
            timeout_secs: default_upload_timeout(),
        }
    }
}

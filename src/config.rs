use anyhow::Result;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Uploader configuration, loaded from CLI, environment, or a config file
///
/// Example configuration file content
/// # Presign API
/// api_base = "https://abc123.execute-api.us-east-1.amazonaws.com"
/// presign_path = "/presigned-url"
/// url_field = "uploadUrl"
///
/// # Transfer
/// timeout_secs = 300
/// content_type = "application/pdf"   # Optional: overrides the guessed type
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(version, about, long_about = None)]
#[serde(default)]
pub struct Config {
    /// File to upload
    #[serde(skip)]
    pub file: Option<PathBuf>,

    /// Base URL of the presign API, without trailing slash
    #[arg(short, long, env = "UPLOAD_API_BASE", default_value = "")]
    #[serde(default)]
    pub api_base: String,

    /// Path of the presign endpoint under the base URL
    #[arg(long, default_value = "/presigned-url")]
    #[serde(default = "default_presign_path")]
    pub presign_path: String,

    /// JSON field of the presign response that holds the upload URL
    #[arg(long, default_value = "uploadUrl")]
    #[serde(default = "default_url_field")]
    pub url_field: String,

    /// Content type to send instead of the one guessed from the file extension
    #[arg(short = 't', long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    /// Per-request timeout in seconds (0 = disabled)
    #[arg(long, default_value_t = 300)]
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Configuration file path
    #[arg(short, long)]
    #[serde(skip)]
    pub config: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: None,
            api_base: String::new(),
            presign_path: default_presign_path(),
            url_field: default_url_field(),
            content_type: None,
            timeout_secs: default_timeout_secs(),
            config: None,
        }
    }
}

impl Config {
    /// Load configuration from CLI args, optionally merging with a config file
    pub fn load() -> Result<Self> {
        let mut config = Config::parse();

        if let Some(config_path) = &config.config {
            let file_config = Self::from_file(Path::new(config_path))?;
            config = config.merge_with_file(file_config);
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Merge with file config, CLI args take precedence
    fn merge_with_file(mut self, file_config: Config) -> Self {
        if self.api_base.is_empty() {
            self.api_base = file_config.api_base;
        }
        if self.presign_path == default_presign_path() {
            self.presign_path = file_config.presign_path;
        }
        if self.url_field == default_url_field() {
            self.url_field = file_config.url_field;
        }
        if self.timeout_secs == default_timeout_secs() {
            self.timeout_secs = file_config.timeout_secs;
        }
        if self.content_type.is_none() {
            self.content_type = file_config.content_type;
        }

        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_base.is_empty() {
            return Err(anyhow::anyhow!(
                "API base URL is required (--api-base or UPLOAD_API_BASE)"
            ));
        }
        if !self.api_base.starts_with("http://") && !self.api_base.starts_with("https://") {
            return Err(anyhow::anyhow!(
                "API base URL must start with http:// or https://"
            ));
        }
        if !self.presign_path.starts_with('/') {
            return Err(anyhow::anyhow!("Presign path must start with '/'"));
        }
        if self.url_field.is_empty() {
            return Err(anyhow::anyhow!("URL field name cannot be empty"));
        }
        if let Some(content_type) = &self.content_type
            && content_type.is_empty()
        {
            return Err(anyhow::anyhow!("Content type override cannot be empty"));
        }

        Ok(())
    }

    /// Full URL of the presign endpoint, without query
    pub fn presign_endpoint(&self) -> String {
        format!("{}{}", self.api_base.trim_end_matches('/'), self.presign_path)
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

// Default value functions
fn default_presign_path() -> String {
    "/presigned-url".to_string()
}

fn default_url_field() -> String {
    "uploadUrl".to_string()
}

fn default_timeout_secs() -> u64 {
    300
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_from_cli() {
        let config = Config::try_parse_from([
            "CLI",
            "--api-base",
            "https://api.example.com/",
            "--timeout-secs",
            "10",
            "--content-type",
            "image/png",
            "photo.bin",
        ])
        .unwrap();

        assert_eq!(config.file, Some(PathBuf::from("photo.bin")));
        assert_eq!(config.content_type.as_deref(), Some("image/png"));
        assert_eq!(config.timeout(), Some(Duration::from_secs(10)));
        assert_eq!(
            config.presign_endpoint(),
            "https://api.example.com/presigned-url"
        );
        config.validate().unwrap();
    }

    #[test]
    fn test_config_from_toml() {
        let toml_content = r#"
            api_base = "http://localhost:9000"
            presign_path = "/v1/presign"
            url_field = "url"
            timeout_secs = 0
        "#;

        let config: Config = toml::from_str(toml_content).unwrap();

        assert_eq!(config.presign_endpoint(), "http://localhost:9000/v1/presign");
        assert_eq!(config.url_field, "url");
        assert_eq!(config.timeout(), None);
        assert!(config.file.is_none());
    }

    #[test]
    fn test_cli_takes_precedence_over_file() {
        let cli = Config::try_parse_from([
            "CLI",
            "--api-base",
            "https://cli.example.com",
            "--url-field",
            "putUrl",
        ])
        .unwrap();
        let file: Config = toml::from_str(
            r#"
            api_base = "https://file.example.com"
            url_field = "fileUrl"
            presign_path = "/from-file"
            content_type = "text/csv"
        "#,
        )
        .unwrap();

        let merged = cli.merge_with_file(file);

        assert_eq!(merged.api_base, "https://cli.example.com");
        assert_eq!(merged.url_field, "putUrl");
        assert_eq!(merged.presign_path, "/from-file");
        assert_eq!(merged.content_type.as_deref(), Some("text/csv"));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(Config::default().validate().is_err());

        let config = Config {
            api_base: "ftp://example.com".into(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            api_base: "https://example.com".into(),
            presign_path: "presigned-url".into(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            api_base: "https://example.com".into(),
            url_field: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            api_base: "https://example.com".into(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}

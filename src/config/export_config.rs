use crate::domain::model::ExportFormat;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{ExportError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Fields exported when the configuration does not list its own.
pub const DEFAULT_FIELDS: [&str; 9] = [
    "_id",
    "username",
    "name",
    "type",
    "active",
    "status",
    "lastLogin",
    "createdAt",
    "_updatedAt",
];

#[derive(Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    pub host: String,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default = "default_scheme", alias = "protocol")]
    pub scheme: String,
    pub username: String,
    pub password: String,
    pub exportfile: String,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_fields")]
    pub fields: Vec<String>,
    #[serde(default = "default_include_emails")]
    pub include_emails: bool,
    #[serde(default)]
    pub json: bool,
}

fn default_scheme() -> String {
    "https".to_string()
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_fields() -> Vec<String> {
    DEFAULT_FIELDS.iter().map(|f| f.to_string()).collect()
}

fn default_include_emails() -> bool {
    true
}

impl ExportConfig {
    /// Loads a `.json` or TOML file, substituting `${VAR}` from the environment first.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ExportError::ConfigError {
            message: format!("Cannot read {}: {}", path.display(), e),
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content)?;

        toml::from_str(&processed).map_err(|e| ExportError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content)?;

        serde_json::from_str(&processed).map_err(|e| ExportError::ConfigError {
            message: format!("JSON parsing error: {}", e),
        })
    }

    // unknown variables are left as written
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ExportError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(match self.scheme.as_str() {
            "http" => 80,
            _ => 443,
        })
    }

    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.scheme, self.host, self.port())
    }

    pub fn format(&self) -> ExportFormat {
        if self.json {
            ExportFormat::Json
        } else {
            ExportFormat::Csv
        }
    }
}

impl fmt::Debug for ExportConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportConfig")
            .field("host", &self.host)
            .field("port", &self.port())
            .field("scheme", &self.scheme)
            .field("username", &self.username)
            .field("password", &"***")
            .field("exportfile", &self.exportfile)
            .field("page_size", &self.page_size)
            .field("fields", &self.fields)
            .field("include_emails", &self.include_emails)
            .field("json", &self.json)
            .finish()
    }
}

impl ConfigProvider for ExportConfig {
    fn username(&self) -> &str {
        &self.username
    }

    fn password(&self) -> &str {
        &self.password
    }

    fn export_file(&self) -> &str {
        &self.exportfile
    }

    fn page_size(&self) -> usize {
        self.page_size
    }

    fn export_fields(&self) -> &[String] {
        &self.fields
    }

    fn include_emails(&self) -> bool {
        self.include_emails
    }
}

impl Validate for ExportConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("host", &self.host)?;
        validation::validate_url("host", &self.base_url())?;
        validation::validate_range("port", self.port(), 1, u16::MAX)?;

        validation::validate_non_empty_string("username", &self.username)?;
        validation::validate_non_empty_string("password", &self.password)?;
        validation::validate_path("exportfile", &self.exportfile)?;
        validation::validate_positive_number("page_size", self.page_size, 1)?;

        for field in &self.fields {
            validation::validate_non_empty_string("fields", field)?;
        }
        if self.fields.is_empty() && !self.include_emails {
            return Err(ExportError::ConfigError {
                message: "Nothing to export: 'fields' is empty and 'include_emails' is false"
                    .to_string(),
            });
        }

        Ok(())
    }
}

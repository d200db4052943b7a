//! Service configuration.
//!
//! [`ServiceConfig`] carries everything the handlers need besides the table
//! handle: the table name, the default page size, the CORS header values and
//! whether internal error text is echoed to callers. It is built once at
//! process start, typically with [`ServiceConfig::from_env`].

use std::fmt;

/// Environment variable holding the table name.
pub const TABLE_NAME_VAR: &str = "DYNAMODB_TABLE_NAME";
/// Environment variable overriding the default listing page size.
pub const DEFAULT_LIMIT_VAR: &str = "ITEMS_DEFAULT_LIMIT";
/// Environment variable toggling error text in 500 responses.
pub const EXPOSE_ERROR_DETAILS_VAR: &str = "ITEMS_EXPOSE_ERROR_DETAILS";
/// Environment variable overriding `Access-Control-Allow-Origin`.
pub const ALLOWED_ORIGIN_VAR: &str = "ITEMS_ALLOWED_ORIGIN";

pub const DEFAULT_TABLE_NAME: &str = "items";
pub const DEFAULT_PAGE_LIMIT: usize = 10;
pub const DEFAULT_ALLOWED_HEADERS: &str =
    "Content-Type,X-Amz-Date,Authorization,X-Api-Key,X-Amz-Security-Token";

/// Configuration for the item handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Name of the backing table.
    pub table_name: String,

    /// Page size used when a listing request carries no `limit`.
    pub default_limit: usize,

    /// Include the raw error text as `message` in 500 responses.
    ///
    /// Defaults to `true`. Turning it off stops internal details from reaching
    /// callers.
    pub expose_error_details: bool,

    /// Value of `Access-Control-Allow-Origin`.
    pub allowed_origin: String,

    /// Value of `Access-Control-Allow-Headers`.
    pub allowed_headers: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            table_name: DEFAULT_TABLE_NAME.to_string(),
            default_limit: DEFAULT_PAGE_LIMIT,
            expose_error_details: true,
            allowed_origin: "*".to_string(),
            allowed_headers: DEFAULT_ALLOWED_HEADERS.to_string(),
        }
    }
}

impl ServiceConfig {
    /// Create a configuration for a table with default settings.
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            ..Self::default()
        }
    }

    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load from an arbitrary variable lookup.
    ///
    /// The table name is required; every other variable is optional.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let table_name = lookup(TABLE_NAME_VAR)
            .filter(|name| !name.trim().is_empty())
            .ok_or(ConfigError::MissingVariable {
                name: TABLE_NAME_VAR,
            })?;
        let mut config = Self::new(table_name);

        if let Some(raw) = lookup(DEFAULT_LIMIT_VAR) {
            config.default_limit = match raw.trim().parse::<usize>() {
                Ok(limit) if limit > 0 => limit,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        name: DEFAULT_LIMIT_VAR,
                        value: raw,
                        expected: "a positive integer",
                    });
                }
            };
        }

        if let Some(raw) = lookup(EXPOSE_ERROR_DETAILS_VAR) {
            config.expose_error_details =
                parse_flag(&raw).ok_or(ConfigError::InvalidValue {
                    name: EXPOSE_ERROR_DETAILS_VAR,
                    value: raw.clone(),
                    expected: "true or false",
                })?;
        }

        if let Some(origin) = lookup(ALLOWED_ORIGIN_VAR) {
            config.allowed_origin = origin;
        }

        Ok(config)
    }

    pub fn with_default_limit(mut self, limit: usize) -> Self {
        self.default_limit = limit;
        self
    }

    pub fn with_error_details(mut self, expose: bool) -> Self {
        self.expose_error_details = expose;
        self
    }

    pub fn with_allowed_origin(mut self, origin: impl Into<String>) -> Self {
        self.allowed_origin = origin.into();
        self
    }

    pub fn with_allowed_headers(mut self, headers: impl Into<String>) -> Self {
        self.allowed_headers = headers.into();
        self
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration loading errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable {name}")]
    MissingVariable { name: &'static str },

    #[error("Invalid value '{value}' for {name}: expected {expected}")]
    InvalidValue {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl fmt::Display for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "table={} default_limit={} expose_error_details={}",
            self.table_name, self.default_limit, self.expose_error_details
        )
    }
}

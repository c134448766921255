/*
 * Copyright (c) Huawei Technologies Co., Ltd. 2025. All rights reserved.
 * Global Trust Authority is licensed under the Mulan PSL v2.
 * You can use this software according to the terms and conditions of the Mulan PSL v2.
 * You may obtain a copy of Mulan PSL v2 at:
 *     http://license.coscl.org.cn/MulanPSL2
 * THIS SOFTWARE IS PROVIDED ON AN "AS IS" BASIS, WITHOUT WARRANTIES OF ANY KIND, EITHER EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO NON-INFRINGEMENT, MERCHANTABILITY OR FIT FOR A PARTICULAR
 * PURPOSE.
 * See the Mulan PSL v2 for more details.
 */

//! Connection Configuration Module
//! Handles per-attempt connection settings and environment loading

use std::collections::BTreeMap;
use std::env;
use std::fmt;

use log::{error, info};
use serde::{Deserialize, Serialize};

use crate::backend::Backend;
use crate::BootstrapError;

/// Enable buffered result sets on MySQL connections
pub const MYSQL_USE_BUFFERED_QUERY: &str = "mysql.use_buffered_query";
/// Emulate prepared statements on the client side
pub const EMULATE_PREPARES: &str = "emulate_prepares";
/// Upper bound of the driver's connection pool
pub const MAX_CONNECTIONS: &str = "max_connections";
/// Lower bound of the driver's connection pool
pub const MIN_CONNECTIONS: &str = "min_connections";
/// Connect timeout in seconds
pub const CONNECT_TIMEOUT: &str = "connect_timeout";
/// Toggle the driver's own statement logging
pub const SQLX_LOGGING: &str = "sqlx_logging";

/// Port used when the caller does not pick one
pub const DEFAULT_PORT: u16 = 3306;

/// Value of a driver option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl OptionValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(b) => Some(*b),
            OptionValue::Int(i) => Some(*i != 0),
            OptionValue::Str(s) => match s.to_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Some(true),
                "false" | "0" | "no" | "off" => Some(false),
                _ => None,
            },
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            OptionValue::Int(i) => Some(*i),
            OptionValue::Str(s) => s.trim().parse().ok(),
            OptionValue::Bool(_) => None,
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Int(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Str(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Str(value)
    }
}

/// Options handed to the driver untouched, apart from backend tuning
pub type ConnectOptions = BTreeMap<String, OptionValue>;

/// Settings for a single connection attempt
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    #[serde(default)]
    pub backend: Backend,
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub database: String,
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub options: ConnectOptions,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl ConnectionConfig {
    /// Creates a MySQL configuration on port 3306 with no extra options.
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        database: impl Into<String>,
    ) -> Self {
        Self {
            backend: Backend::MySql,
            host: host.into(),
            port: DEFAULT_PORT,
            database: database.into(),
            username: username.into(),
            password: password.into(),
            options: ConnectOptions::new(),
        }
    }

    pub fn backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn option(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    pub fn options(mut self, options: ConnectOptions) -> Self {
        self.options.extend(options);
        self
    }

    /// Loads connection settings from environment variables.
    ///
    /// A `.env` file in the working directory is read first when present.
    ///
    /// Requires `DB_TYPE`, `DB_HOST`, `DB_NAME` and `DB_USER`. `DB_PASSWORD`
    /// defaults to empty and `DB_PORT` to the backend's usual port.
    /// `DATABASE_MAX_CONNECTIONS` and `DATABASE_TIMEOUT` become driver
    /// options when set and numeric.
    ///
    /// # Errors
    ///
    /// * `BootstrapError::Config` - A required variable is missing or `DB_PORT` is not a port number.
    /// * `BootstrapError::UnsupportedBackend` - `DB_TYPE` names an unknown backend.
    pub fn from_env() -> Result<Self, BootstrapError> {
        info!("get connection config from env");
        dotenv::dotenv().ok();

        let backend = required_var("DB_TYPE")?.parse::<Backend>().map_err(|e| {
            error!("db type is not supported: {}", e);
            e
        })?;
        let port = match env::var("DB_PORT") {
            Ok(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| BootstrapError::Config(format!("DB_PORT is not a valid port: {}", e)))?,
            Err(_) => backend.default_port(),
        };

        let mut config = Self::new(
            required_var("DB_HOST")?,
            required_var("DB_USER")?,
            env::var("DB_PASSWORD").unwrap_or_default(),
            required_var("DB_NAME")?,
        )
        .backend(backend)
        .port(port);

        if let Some(max) = env::var("DATABASE_MAX_CONNECTIONS").ok().and_then(|s| s.parse::<i64>().ok()) {
            config = config.option(MAX_CONNECTIONS, max);
        }
        if let Some(timeout) = env::var("DATABASE_TIMEOUT").ok().and_then(|s| s.parse::<i64>().ok()) {
            config = config.option(CONNECT_TIMEOUT, timeout);
        }

        info!("loaded connection config: backend={}, host={}, port={}", config.backend, config.host, config.port);
        Ok(config)
    }

    pub(crate) fn validate(&self) -> Result<(), BootstrapError> {
        if self.port == 0 {
            return Err(BootstrapError::InvalidPort(self.port));
        }
        Ok(())
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("backend", &self.backend)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &"***")
            .field("options", &self.options)
            .finish()
    }
}

fn required_var(key: &str) -> Result<String, BootstrapError> {
    env::var(key).map_err(|_| BootstrapError::Config(format!("{} must be set", key)))
}

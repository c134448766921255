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

//! sea-orm backed implementation of the database-access layer

use std::any::Any;
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error, info, warn};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use sea_orm::{ConnectOptions, DatabaseConnection, DbErr};

use crate::backend::Backend;
use crate::config::{
    ConnectOptions as DriverOptions, OptionValue, CONNECT_TIMEOUT, MAX_CONNECTIONS, MIN_CONNECTIONS, SQLX_LOGGING,
};
use crate::driver::{DatabaseDriver, DatabaseHandle, ErrorMode};
use crate::dsn::Dsn;
use crate::error::DriverError;
use crate::rdb_many_types::{mysql, postgresql};

/// Driver that opens MySQL and PostgreSQL sessions through sea-orm
#[derive(Debug, Default, Clone, Copy)]
pub struct SeaOrmDriver;

impl SeaOrmDriver {
    pub fn new() -> Self {
        SeaOrmDriver
    }

    pub fn supports(&self, backend: Backend) -> bool {
        matches!(backend, Backend::MySql | Backend::Postgres)
    }
}

#[async_trait]
impl DatabaseDriver for SeaOrmDriver {
    async fn open(
        &self,
        dsn: &Dsn,
        username: &str,
        password: &str,
        options: &DriverOptions,
    ) -> Result<Box<dyn DatabaseHandle>, DriverError> {
        let connection = match dsn.backend() {
            Backend::MySql => mysql::create_mysql_connection(dsn, username, password, options).await?,
            Backend::Postgres => postgresql::create_postgresql_connection(dsn, username, password, options).await?,
            other => {
                error!("No sea-orm driver available for backend: {}", other);
                return Err(DriverError::DriverNotFound(other.driver_name().to_string()));
            }
        };
        info!("{} connection established", dsn.backend());
        Ok(Box::new(SeaOrmHandle {
            backend: dsn.backend(),
            connection,
            error_mode: ErrorMode::default(),
        }))
    }
}

/// Session opened by `SeaOrmDriver`
///
/// sea-orm hands every failure back as a `DbErr`; `check` applies the
/// handle's error mode to those results.
pub struct SeaOrmHandle {
    backend: Backend,
    connection: DatabaseConnection,
    error_mode: ErrorMode,
}

impl SeaOrmHandle {
    pub fn connection(&self) -> &DatabaseConnection {
        &self.connection
    }

    /// Filters the outcome of an operation on `connection()` through the error mode.
    ///
    /// Only `ErrorMode::Raise` returns the failure; `Warning` logs it and
    /// `Silent` drops it, both yielding `Ok(None)`.
    pub fn check<T>(&self, result: Result<T, DbErr>) -> Result<Option<T>, DriverError> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(e) => match self.error_mode {
                ErrorMode::Raise => Err(DriverError::OperationFailed(e.to_string())),
                ErrorMode::Warning => {
                    warn!("{} operation failed: {}", self.backend, e);
                    Ok(None)
                }
                ErrorMode::Silent => Ok(None),
            },
        }
    }
}

impl fmt::Debug for SeaOrmHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeaOrmHandle")
            .field("backend", &self.backend)
            .field("error_mode", &self.error_mode)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl DatabaseHandle for SeaOrmHandle {
    fn backend(&self) -> Backend {
        self.backend
    }

    fn error_mode(&self) -> ErrorMode {
        self.error_mode
    }

    fn set_error_mode(&mut self, mode: ErrorMode) {
        self.error_mode = mode;
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    async fn close(self: Box<Self>) -> Result<(), DriverError> {
        self.connection.close().await?;
        Ok(())
    }
}

fn encode_component(raw: &str) -> String {
    utf8_percent_encode(raw, NON_ALPHANUMERIC).to_string()
}

/// IPv6 literals need brackets to be told apart from the port.
fn url_host(host: &str) -> String {
    if host.contains(':') && !host.starts_with('[') {
        format!("[{}]", host)
    } else {
        host.to_string()
    }
}

/// Builds the sea-orm URL for `dsn`. Credentials and the database name are percent-encoded.
pub(crate) fn connection_url(scheme: &str, dsn: &Dsn, username: &str, password: &str) -> String {
    format!(
        "{}://{}:{}@{}:{}/{}",
        scheme,
        encode_component(username),
        encode_component(password),
        url_host(dsn.host()),
        dsn.port(),
        encode_component(dsn.database())
    )
}

/// Copies the options sea-orm understands onto its connect options.
pub(crate) fn apply_options(opt: &mut ConnectOptions, options: &DriverOptions) -> Result<(), DriverError> {
    for (key, value) in options {
        match key.as_str() {
            MAX_CONNECTIONS => {
                opt.max_connections(positive_u32(key, value)?);
            }
            MIN_CONNECTIONS => {
                opt.min_connections(positive_u32(key, value)?);
            }
            CONNECT_TIMEOUT => {
                opt.connect_timeout(Duration::from_secs(u64::from(positive_u32(key, value)?)));
            }
            SQLX_LOGGING => {
                let enabled = value.as_bool().ok_or_else(|| DriverError::InvalidOption {
                    key: key.clone(),
                    reason: "expected a boolean".to_string(),
                })?;
                opt.sqlx_logging(enabled);
            }
            _ => debug!("option {} not applicable to sea-orm driver, ignored", key),
        }
    }
    Ok(())
}

fn positive_u32(key: &str, value: &OptionValue) -> Result<u32, DriverError> {
    value
        .as_i64()
        .and_then(|v| u32::try_from(v).ok())
        .filter(|v| *v > 0)
        .ok_or_else(|| DriverError::InvalidOption {
            key: key.to_string(),
            reason: "expected a positive integer".to_string(),
        })
}

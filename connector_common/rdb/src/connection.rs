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

//! Database Connection Bootstrap Module
//! Builds the DSN, opens the connection and reports failures to the SQL error log

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use log::{error, info, warn};

use crate::backend::Backend;
use crate::config::{ConnectOptions, ConnectionConfig, OptionValue, EMULATE_PREPARES, MYSQL_USE_BUFFERED_QUERY};
use crate::driver::{DatabaseDriver, DatabaseHandle, ErrorMode};
use crate::dsn::Dsn;
use crate::error::redact_password;
use crate::error_log::SqlErrorLog;
use crate::sea_orm_driver::SeaOrmDriver;
use crate::BootstrapError;

/// Opens one database connection and logs why it failed when it does
///
/// # Example
/// ```no_run
/// use rdb_connector::{Backend, ConnectionBootstrapper, ConnectionConfig};
///
/// async fn example() -> Result<(), rdb_connector::BootstrapError> {
///     let mut bootstrapper = ConnectionBootstrapper::new();
///     bootstrapper
///         .set_log_location("/var/log/app/sql")?
///         .set_log_errors(true);
///     let config = ConnectionConfig::new("127.0.0.1", "app", "secret", "shop")
///         .backend(Backend::Postgres)
///         .port(5432);
///     bootstrapper.connect(&config).await?;
///     assert!(bootstrapper.is_connected());
///     Ok(())
/// }
/// ```
pub struct ConnectionBootstrapper {
    driver: Arc<dyn DatabaseDriver>,
    log: SqlErrorLog,
    dsn: Option<Dsn>,
    handle: Option<Box<dyn DatabaseHandle>>,
}

impl Default for ConnectionBootstrapper {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectionBootstrapper {
    /// Creates a bootstrapper backed by the sea-orm driver.
    pub fn new() -> Self {
        Self::with_driver(SeaOrmDriver::new())
    }

    pub fn with_driver(driver: impl DatabaseDriver + 'static) -> Self {
        Self::with_shared_driver(Arc::new(driver))
    }

    pub fn with_shared_driver(driver: Arc<dyn DatabaseDriver>) -> Self {
        Self {
            driver,
            log: SqlErrorLog::default(),
            dsn: None,
            handle: None,
        }
    }

    /// Opens a connection described by `config`.
    ///
    /// MySQL connections always get buffered queries and emulated prepares
    /// switched on. After a successful open the handle is switched to
    /// `ErrorMode::Raise` and kept by the bootstrapper.
    ///
    /// # Errors
    ///
    /// * `BootstrapError::InvalidPort` - `config.port` is zero. Nothing is logged.
    /// * `BootstrapError::Connection` - The driver failed. The driver message, with
    ///   the password masked, is appended to the SQL error log when logging is enabled.
    pub async fn connect(&mut self, config: &ConnectionConfig) -> Result<&mut Self, BootstrapError> {
        config.validate()?;
        let dsn = Dsn::new(config.backend, config.host.clone(), config.port, config.database.clone());
        let mut options = config.options.clone();
        apply_backend_tuning(config.backend, &mut options);

        info!("connecting to {} as {}", dsn, config.username);
        self.dsn = Some(dsn.clone());
        match self.driver.open(&dsn, &config.username, &config.password, &options).await {
            Ok(mut handle) => {
                handle.set_error_mode(ErrorMode::Raise);
                self.handle = Some(handle);
                info!("connected to {}", dsn);
                Ok(self)
            }
            Err(e) => Err(self.error(redact_password(&e.to_string(), &config.password))),
        }
    }

    /// Points the SQL error log at `path` and creates the directory if needed.
    pub fn set_log_location(&mut self, path: impl Into<PathBuf>) -> Result<&mut Self, BootstrapError> {
        self.log.set_location(path);
        self.ensure_log_location_exists()?;
        Ok(self)
    }

    /// Turns writing to the SQL error log on or off. Errors are returned either way.
    pub fn set_log_errors(&mut self, enabled: bool) -> &mut Self {
        self.log.set_enabled(enabled);
        self
    }

    fn ensure_log_location_exists(&self) -> Result<(), BootstrapError> {
        self.log
            .ensure_location_exists()
            .map_err(|e| BootstrapError::LogLocation {
                path: self.log.location().display().to_string(),
                reason: e.to_string(),
            })
    }

    /// Records `message` in the SQL error log and turns it into the error handed back to the caller.
    ///
    /// A failing log write is reported through `log` and never replaces the original error.
    fn error(&self, message: String) -> BootstrapError {
        error!("database connection failed: {}", message);
        if self.log.enabled() {
            let written = self
                .ensure_log_location_exists()
                .and_then(|_| {
                    self.log.append(&message).map_err(|e| BootstrapError::LogLocation {
                        path: self.log.file_path().display().to_string(),
                        reason: e.to_string(),
                    })
                });
            if let Err(e) = written {
                warn!("could not write sql error log: {}", e);
            }
        }
        BootstrapError::Connection(message)
    }

    pub fn is_connected(&self) -> bool {
        self.handle.is_some()
    }

    pub fn handle(&self) -> Option<&dyn DatabaseHandle> {
        self.handle.as_deref()
    }

    pub fn handle_mut(&mut self) -> Option<&mut (dyn DatabaseHandle + 'static)> {
        self.handle.as_deref_mut()
    }

    /// Hands the open connection over to the caller, leaving the bootstrapper unconnected.
    pub fn take_handle(&mut self) -> Option<Box<dyn DatabaseHandle>> {
        self.handle.take()
    }

    /// DSN of the most recent connection attempt
    pub fn dsn(&self) -> Option<&Dsn> {
        self.dsn.as_ref()
    }

    pub fn log(&self) -> &SqlErrorLog {
        &self.log
    }
}

impl fmt::Debug for ConnectionBootstrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionBootstrapper")
            .field("log", &self.log)
            .field("dsn", &self.dsn)
            .field("handle", &self.handle)
            .finish_non_exhaustive()
    }
}

/// Driver options every connection to `backend` is opened with.
pub(crate) fn apply_backend_tuning(backend: Backend, options: &mut ConnectOptions) {
    if backend == Backend::MySql {
        options.insert(MYSQL_USE_BUFFERED_QUERY.to_string(), OptionValue::Bool(true));
        options.insert(EMULATE_PREPARES.to_string(), OptionValue::Bool(true));
    }
}

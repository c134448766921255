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

//! YAML connector settings
//!
//! ```yaml
//! database:
//!   backend: pgsql
//!   host: 127.0.0.1
//!   port: 5432
//!   database: reports
//!   username: reader
//!   password: secret
//!   options:
//!     max_connections: 10
//! sql_log:
//!   location: /var/log/app/sql
//!   enabled: true
//! ```

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

use crate::config::ConnectionConfig;
use crate::connection::ConnectionBootstrapper;
use crate::BootstrapError;

#[derive(Debug, Clone, Deserialize)]
pub struct SqlLogSettings {
    #[serde(default)]
    pub location: Option<PathBuf>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl Default for SqlLogSettings {
    fn default() -> Self {
        Self {
            location: None,
            enabled: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConnectorSettings {
    pub database: ConnectionConfig,
    #[serde(default)]
    pub sql_log: SqlLogSettings,
}

impl ConnectorSettings {
    pub fn from_yaml(path: impl AsRef<Path>) -> Result<Self, BootstrapError> {
        let path = path.as_ref();
        info!("load connector settings from {}", path.display());
        let content = std::fs::read_to_string(path)
            .map_err(|e| BootstrapError::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, BootstrapError> {
        serde_yaml::from_str(content).map_err(|e| BootstrapError::Config(format!("Failed to parse YAML: {}", e)))
    }

    /// Builds a bootstrapper with the configured log location and switch.
    pub fn bootstrapper(&self) -> Result<ConnectionBootstrapper, BootstrapError> {
        let mut bootstrapper = ConnectionBootstrapper::new();
        self.apply_log_settings(&mut bootstrapper)?;
        Ok(bootstrapper)
    }

    pub fn apply_log_settings(&self, bootstrapper: &mut ConnectionBootstrapper) -> Result<(), BootstrapError> {
        if let Some(location) = &self.sql_log.location {
            bootstrapper.set_log_location(location)?;
        }
        bootstrapper.set_log_errors(self.sql_log.enabled);
        Ok(())
    }
}

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

//! Database backend identifiers

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::BootstrapError;

/// Relational backends a DSN can be built for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Backend {
    #[default]
    MySql,
    Postgres,
    Sybase,
    MsSql,
    Cubrid,
}

impl Backend {
    pub const ALL: [Backend; 5] = [
        Backend::MySql,
        Backend::Postgres,
        Backend::Sybase,
        Backend::MsSql,
        Backend::Cubrid,
    ];

    /// Canonical identifier accepted by `from_str` and used in configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::MySql => "mysql",
            Backend::Postgres => "postgres",
            Backend::Sybase => "sybase",
            Backend::MsSql => "mssql",
            Backend::Cubrid => "cubrid",
        }
    }

    /// Driver prefix written at the head of the DSN
    pub fn driver_name(&self) -> &'static str {
        match self {
            Backend::MySql => "mysql",
            Backend::Postgres => "pgsql",
            Backend::Sybase => "dblib",
            Backend::MsSql => "sqlsrv",
            Backend::Cubrid => "cubrid",
        }
    }

    /// Port the server listens on out of the box
    pub fn default_port(&self) -> u16 {
        match self {
            Backend::MySql => 3306,
            Backend::Postgres => 5432,
            Backend::Sybase => 5000,
            Backend::MsSql => 1433,
            Backend::Cubrid => 33000,
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = BootstrapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mysql" => Ok(Backend::MySql),
            "pgsql" | "postgres" | "postgresql" => Ok(Backend::Postgres),
            "dblib" | "sybase" => Ok(Backend::Sybase),
            "mssql" | "sqlsrv" => Ok(Backend::MsSql),
            "cubrid" => Ok(Backend::Cubrid),
            _ => Err(BootstrapError::UnsupportedBackend(s.to_string())),
        }
    }
}

impl TryFrom<String> for Backend {
    type Error = BootstrapError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Backend> for String {
    fn from(backend: Backend) -> Self {
        backend.as_str().to_string()
    }
}

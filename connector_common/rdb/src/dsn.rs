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

//! DSN template table
//!
//! Every backend owns one fixed template with three positional slots filled
//! in the order host, port, database.

use std::fmt;

use crate::backend::Backend;

/// Data source name for one connection attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dsn {
    backend: Backend,
    host: String,
    port: u16,
    database: String,
}

impl Dsn {
    pub fn new(backend: Backend, host: impl Into<String>, port: u16, database: impl Into<String>) -> Self {
        Self {
            backend,
            host: host.into(),
            port,
            database: database.into(),
        }
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn database(&self) -> &str {
        &self.database
    }
}

impl fmt::Display for Dsn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (host, port, db) = (&self.host, self.port, &self.database);
        match self.backend {
            Backend::MySql => write!(f, "mysql:host={host};port={port};dbname={db}"),
            Backend::Postgres => write!(f, "pgsql:host={host};port={port};dbname={db}"),
            Backend::Sybase => write!(f, "dblib:host={host}:{port};dbname={db}"),
            Backend::MsSql => write!(f, "sqlsrv:Server={host},{port};Database={db}"),
            Backend::Cubrid => write!(f, "cubrid:host={host};port={port};dbname={db}"),
        }
    }
}

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

//! Generic database-access layer
//!
//! The bootstrapper only talks to drivers through these traits, so the
//! concrete client library stays replaceable.

use std::any::Any;
use std::fmt::Debug;

use async_trait::async_trait;

use crate::backend::Backend;
use crate::config::ConnectOptions;
use crate::dsn::Dsn;
use crate::error::DriverError;

/// How an open connection reports failures of later operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Failures are only visible through return codes
    #[default]
    Silent,
    /// Failures are logged as warnings
    Warning,
    /// Failures surface as errors to the caller
    Raise,
}

/// An open database session
#[async_trait]
pub trait DatabaseHandle: Debug + Send + Sync {
    fn backend(&self) -> Backend;

    fn error_mode(&self) -> ErrorMode;

    fn set_error_mode(&mut self, mode: ErrorMode);

    /// Allows callers to reach the concrete driver handle.
    fn as_any(&self) -> &dyn Any;

    async fn close(self: Box<Self>) -> Result<(), DriverError>;
}

/// Opens sessions from a DSN, credentials and driver options
#[async_trait]
pub trait DatabaseDriver: Send + Sync {
    async fn open(
        &self,
        dsn: &Dsn,
        username: &str,
        password: &str,
        options: &ConnectOptions,
    ) -> Result<Box<dyn DatabaseHandle>, DriverError>;
}

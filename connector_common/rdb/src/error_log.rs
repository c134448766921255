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

//! SQL error log
//!
//! Flat append-only file with one block per connection failure.

use std::env;
use std::fs::{self, DirBuilder, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use log::info;

/// Name of the log file inside the log directory
pub const LOG_FILE_NAME: &str = "sql.txt";
/// Name of the access-restriction file written on directory creation
pub const ACCESS_FILE_NAME: &str = ".htaccess";
const ACCESS_FILE_CONTENT: &str = "order deny,allow\ndeny from all";
const ENTRY_SEPARATOR: &str = "----------------------";
const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Where connection failures are written and whether they are written at all
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlErrorLog {
    location: PathBuf,
    enabled: bool,
}

impl Default for SqlErrorLog {
    fn default() -> Self {
        Self {
            location: default_location(),
            enabled: true,
        }
    }
}

/// `logs` next to the running executable, or `./logs` if that cannot be resolved.
fn default_location() -> PathBuf {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("logs")))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

impl SqlErrorLog {
    pub fn new(location: impl Into<PathBuf>, enabled: bool) -> Self {
        Self {
            location: location.into(),
            enabled,
        }
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn file_path(&self) -> PathBuf {
        self.location.join(LOG_FILE_NAME)
    }

    pub fn set_location(&mut self, location: impl Into<PathBuf>) {
        self.location = location.into();
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Creates the log directory and its access-restriction file.
    ///
    /// Does nothing when the directory already exists; the restriction file
    /// is only written together with a freshly created directory.
    pub fn ensure_location_exists(&self) -> io::Result<()> {
        if self.location.is_dir() {
            return Ok(());
        }
        let mut builder = DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(0o777);
        }
        builder.create(&self.location)?;
        fs::write(self.location.join(ACCESS_FILE_NAME), ACCESS_FILE_CONTENT)?;
        info!("created sql log directory {}", self.location.display());
        Ok(())
    }

    /// Appends one entry stamped with the current local time.
    pub fn append(&self, message: &str) -> io::Result<()> {
        self.append_at(message, Local::now())
    }

    pub(crate) fn append_at(&self, message: &str, now: DateTime<Local>) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.file_path())?;
        file.write_all(format_entry(message, now).as_bytes())
    }
}

/// Renders a single log block.
pub fn format_entry(message: &str, now: DateTime<Local>) -> String {
    format!(
        "[{}] Error: {}\n{}\n\n",
        now.format(TIMESTAMP_FORMAT),
        message,
        ENTRY_SEPARATOR
    )
}

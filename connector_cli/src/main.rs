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

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};
use rdb_connector::{Backend, BootstrapError, ConnectionBootstrapper, ConnectionConfig, ConnectorSettings};

/// Open a database connection and report whether it succeeded
#[derive(Parser, Debug)]
#[command(name = "rdb-connect", author, version, about, long_about = None)]
struct Cli {
    /// YAML settings file with `database` and `sql_log` sections
    #[arg(short, long, conflicts_with = "env")]
    config: Option<PathBuf>,

    /// Read DB_TYPE, DB_HOST, DB_PORT, DB_NAME, DB_USER and DB_PASSWORD from the environment
    #[arg(long)]
    env: bool,

    /// mysql, pgsql, dblib, sqlsrv or cubrid
    #[arg(short, long, default_value = "mysql")]
    backend: String,

    #[arg(long, default_value = "localhost")]
    host: String,

    #[arg(short, long, default_value_t = 3306)]
    port: u16,

    #[arg(short, long, default_value = "")]
    database: String,

    #[arg(short, long, default_value = "root")]
    user: String,

    #[arg(long, env = "DB_PASSWORD", default_value = "", hide_env_values = true)]
    password: String,

    /// Directory of the SQL error log
    #[arg(long)]
    log_location: Option<PathBuf>,

    /// Do not write failures to the SQL error log
    #[arg(long)]
    no_log_errors: bool,

    /// log4rs settings for application logging; console logging is used otherwise
    #[arg(long)]
    log_config: Option<PathBuf>,
}

impl Cli {
    fn connection_config(&self) -> Result<(ConnectionConfig, Option<ConnectorSettings>), BootstrapError> {
        if let Some(path) = &self.config {
            let settings = ConnectorSettings::from_yaml(path)?;
            return Ok((settings.database.clone(), Some(settings)));
        }
        if self.env {
            return Ok((ConnectionConfig::from_env()?, None));
        }
        let backend: Backend = self.backend.parse()?;
        let config = ConnectionConfig::new(&self.host, &self.user, &self.password, &self.database)
            .backend(backend)
            .port(self.port);
        Ok((config, None))
    }

    fn bootstrapper(&self, settings: Option<&ConnectorSettings>) -> Result<ConnectionBootstrapper, BootstrapError> {
        let mut bootstrapper = match settings {
            Some(settings) => settings.bootstrapper()?,
            None => ConnectionBootstrapper::new(),
        };
        if let Some(location) = &self.log_location {
            bootstrapper.set_log_location(location)?;
        }
        if self.no_log_errors {
            bootstrapper.set_log_errors(false);
        }
        Ok(bootstrapper)
    }
}

fn init_logging(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    match &cli.log_config {
        Some(path) => common_log::init_with_yaml(path),
        None => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).try_init()?;
            Ok(())
        }
    }
}

async fn run(cli: &Cli) -> Result<String, BootstrapError> {
    let (config, settings) = cli.connection_config()?;
    let mut bootstrapper = cli.bootstrapper(settings.as_ref())?;
    bootstrapper.connect(&config).await?;
    let dsn = bootstrapper.dsn().map(|dsn| dsn.to_string()).unwrap_or_default();
    if let Some(handle) = bootstrapper.take_handle() {
        if let Err(e) = handle.close().await {
            error!("failed to close connection: {}", e);
        }
    }
    Ok(dsn)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = init_logging(&cli) {
        eprintln!("failed to initialize logging: {}", e);
    }

    match run(&cli).await {
        Ok(dsn) => {
            info!("connection check passed for {}", dsn);
            println!("{} connected", dsn);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

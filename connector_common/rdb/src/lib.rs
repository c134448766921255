//! Database connection bootstrap module
//! Builds backend specific DSNs, opens connections through a pluggable driver
//! and keeps a flat log of connection failures

pub mod backend;
pub mod config;
pub mod connection;
pub mod driver;
pub mod dsn;
pub mod error;
pub mod error_log;
pub mod sea_orm_driver;
pub mod settings;
pub mod rdb_many_types {
    pub mod postgresql;
    pub mod mysql;
}

pub use backend::Backend;
pub use config::{ConnectOptions, ConnectionConfig, OptionValue};
pub use connection::ConnectionBootstrapper;
pub use driver::{DatabaseDriver, DatabaseHandle, ErrorMode};
pub use dsn::Dsn;
pub use error::{BootstrapError, DriverError};
pub use error_log::SqlErrorLog;
pub use sea_orm_driver::{SeaOrmDriver, SeaOrmHandle};
pub use settings::{ConnectorSettings, SqlLogSettings};

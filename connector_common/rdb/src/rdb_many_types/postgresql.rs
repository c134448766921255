//! PostgreSQL database connection module
//! Translate a PostgreSQL DSN into a sea-orm connection

use log::info;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::config::ConnectOptions as DriverOptions;
use crate::dsn::Dsn;
use crate::error::{redact_password, DriverError};
use crate::sea_orm_driver::{apply_options, connection_url};

pub(crate) fn postgresql_url(dsn: &Dsn, username: &str, password: &str) -> String {
    connection_url("postgres", dsn, username, password)
}

/// Create PostgreSQL database connection
pub(crate) async fn create_postgresql_connection(
    dsn: &Dsn,
    username: &str,
    password: &str,
    options: &DriverOptions,
) -> Result<DatabaseConnection, DriverError> {
    info!("Configuring PostgreSQL connection parameters: dsn={}", dsn);
    let mut opt = ConnectOptions::new(postgresql_url(dsn, username, password));
    opt.sqlx_logging(false);
    apply_options(&mut opt, options)?;
    info!("PostgreSQL connection parameters configured, establishing connection...");

    Database::connect(opt)
        .await
        .map_err(|e| DriverError::ConnectFailed(redact_password(&e.to_string(), password)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Backend;

    #[test]
    fn test_postgresql_url() {
        let dsn = Dsn::new(Backend::Postgres, "pg.internal", 5432, "reports");
        assert_eq!(postgresql_url(&dsn, "reader", ""), "postgres://reader:@pg.internal:5432/reports");
    }
}

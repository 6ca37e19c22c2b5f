use sea_orm::DatabaseConnection;

use crate::server::{
    config::Config,
    error::{platform::PlatformError, Error},
    platform::PlatformClient,
};

/// Build the learning platform client with the configured base URLs and user agent
pub fn build_platform_client(config: &Config) -> Result<PlatformClient, Error> {
    let http = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .build()
        .map_err(PlatformError::from)?;

    Ok(PlatformClient::new(
        http,
        &config.platform_api_url,
        &config.platform_site_url,
    ))
}

/// Connect to the database and run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, Error> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

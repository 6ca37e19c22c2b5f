use sea_orm::DatabaseConnection;

use crate::server::platform::PlatformClient;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub platform: PlatformClient,
}

/// Builds state around a database and a platform reachable at a single base URL, as the
/// test harness provides.
impl From<(DatabaseConnection, String)> for AppState {
    fn from((db, platform_url): (DatabaseConnection, String)) -> Self {
        Self {
            db,
            platform: PlatformClient::new(reqwest::Client::new(), &platform_url, &platform_url),
        }
    }
}

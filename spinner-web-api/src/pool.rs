use async_trait::async_trait;
use rocket::fairing::{self, AdHoc};
use rocket::serde::Deserialize;
use rocket::{Build, Rocket};
use sea_orm::{ConnectOptions, DbErr};
use sea_orm_rocket::{rocket::figment::Figment, Database};
use spinner_db_migration::{Migrator, MigratorTrait};
use std::time::Duration;
use tracing::{error, info};

#[derive(Database, Debug)]
#[database("sea_orm")]
pub struct Db(SeaOrmPool);

#[derive(Debug, Clone)]
pub struct SeaOrmPool {
    pub conn: sea_orm::DatabaseConnection,
}

#[async_trait]
impl sea_orm_rocket::Pool for SeaOrmPool {
    type Error = DbErr;

    type Connection = sea_orm::DatabaseConnection;

    /// `figment` is already focused on `databases.sea_orm`.
    async fn init(figment: &Figment) -> Result<Self, Self::Error> {
        let config = figment
            .extract::<DbConfig>()
            .map_err(|error| DbErr::Custom(format!("Invalid database config: {}", error)))?;
        let mut options: ConnectOptions = config.url.into();
        options
            .min_connections(config.min_connections.unwrap_or(2))
            .connect_timeout(Duration::from_secs(config.connect_timeout.unwrap_or(8)))
            .sqlx_logging(config.sqlx_logging.unwrap_or(false))
            .sqlx_logging_level(
                config
                    .sqlx_logging_level
                    .as_deref()
                    .and_then(|level| level.parse::<log::LevelFilter>().ok())
                    .unwrap_or(log::LevelFilter::Info),
            );
        if let Some(max_connections) = config.max_connections {
            options.max_connections(max_connections);
        }
        if let Some(idle_timeout) = config.idle_timeout {
            options.idle_timeout(Duration::from_secs(idle_timeout));
        }
        if let Some(max_lifetime) = config.max_lifetime {
            options.max_lifetime(Duration::from_secs(max_lifetime));
        }

        let conn = sea_orm::Database::connect(options).await?;

        Ok(SeaOrmPool { conn })
    }

    fn borrow(&self) -> &Self::Connection {
        &self.conn
    }
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
struct DbConfig {
    url: String,
    max_connections: Option<u32>,
    min_connections: Option<u32>,
    connect_timeout: Option<u64>,
    idle_timeout: Option<u64>,
    max_lifetime: Option<u64>,
    sqlx_logging: Option<bool>,
    sqlx_logging_level: Option<String>,
}

pub fn migrations() -> AdHoc {
    AdHoc::try_on_ignite("Database Migrations", run_migrations)
}

async fn run_migrations(rocket: Rocket<Build>) -> fairing::Result {
    let conn = match Db::fetch(&rocket) {
        Some(db) => &db.conn,
        None => {
            error!("Database pool is not initialized, attach Db before migrations");
            return Err(rocket);
        }
    };
    match Migrator::up(conn, None).await {
        Ok(()) => {
            info!("Database migrations applied");
            Ok(rocket)
        }
        Err(error) => {
            error!("Database migrations failed: {}", error);
            Err(rocket)
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(crate = "rocket::serde")]
pub struct SpinnerConfig {
    #[serde(default = "default_rust_log")]
    pub rust_log: String,
    #[serde(default = "default_web_api_log")]
    pub web_api_log: String,
    #[serde(default)]
    pub cors_allowed_domains: String,
    pub jwt_key: String,
    #[serde(default = "default_blocked_role_id")]
    pub blocked_role_id: i32,
    #[serde(default)]
    pub enable_maintenance: bool,
    #[serde(default)]
    pub enable_request_log: bool,
}

fn default_rust_log() -> String {
    "warn".to_owned()
}

fn default_web_api_log() -> String {
    "info".to_owned()
}

fn default_blocked_role_id() -> i32 {
    5
}

use figment::{
    providers::{Format, Toml},
    Figment,
};
use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    // Fall back to the web api's Rocket.toml so both binaries share one database url.
    if std::env::var("DATABASE_URL").is_err() {
        let figment = Figment::new().merge(Toml::file("Rocket.toml").nested());
        if let Ok(url) = figment.extract_inner::<String>("databases.sea_orm.url") {
            std::env::set_var("DATABASE_URL", url);
        }
    }
    cli::run_cli(spinner_db_migration::Migrator).await;
}

pub use sea_orm_migration::prelude::*;

mod m20230301_000001_create_table;
mod m20230301_000002_create_table;
mod m20230315_000001_create_index;

pub use m20230315_000001_create_index::WALLET_ADDRESS_INDEX;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20230301_000001_create_table::Migration),
            Box::new(m20230301_000002_create_table::Migration),
            Box::new(m20230315_000001_create_index::Migration),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm_migration::sea_orm::{ConnectOptions, Database, DatabaseConnection};

    async fn get_db() -> DatabaseConnection {
        let mut options = ConnectOptions::new("sqlite::memory:".to_owned());
        options.max_connections(1).min_connections(1).sqlx_logging(false);
        Database::connect(options).await.unwrap()
    }

    #[tokio::test]
    async fn up_creates_tables_and_wallet_index() {
        let db = get_db().await;
        Migrator::up(&db, None).await.unwrap();

        let manager = SchemaManager::new(&db);
        assert!(manager.has_table("spinners").await.unwrap());
        assert!(manager.has_table("users").await.unwrap());
        assert!(manager
            .has_index("spinners", WALLET_ADDRESS_INDEX)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn down_drops_everything() {
        let db = get_db().await;
        Migrator::up(&db, None).await.unwrap();
        Migrator::down(&db, None).await.unwrap();

        let manager = SchemaManager::new(&db);
        assert!(!manager.has_table("spinners").await.unwrap());
        assert!(!manager.has_table("users").await.unwrap());
    }
}

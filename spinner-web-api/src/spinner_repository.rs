use crate::sql_stmt::TOTAL_OFFERS;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::prelude::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder, Statement,
};
use spinner_db_entity::db::spinner::{
    ActiveModel as SpinnerActiveModel, Column as SpinnerColumn, Entity as Spinner,
    Model as SpinnerModel,
};

/// A validated submission, ready to be stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewSpinner {
    pub wallet_address: String,
    pub get_offer: Decimal,
}

/// Storage seam for spinner submissions.
///
/// `insert` must surface the store's unique violation on `wallet_address`
/// as a `DbErr`; callers rely on it when two submissions race.
#[async_trait]
pub trait SpinnerRepository: Send + Sync {
    async fn wallet_exists(&self, wallet_address: &str) -> Result<bool, DbErr>;

    async fn insert(&self, spinner: NewSpinner) -> Result<SpinnerModel, DbErr>;

    async fn total_offers(&self) -> Result<Decimal, DbErr>;

    /// Returns whether a row was removed.
    async fn delete(&self, id: i32) -> Result<bool, DbErr>;

    async fn all(&self) -> Result<Vec<SpinnerModel>, DbErr>;
}

pub struct SeaOrmSpinnerRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SeaOrmSpinnerRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl<'a> SpinnerRepository for SeaOrmSpinnerRepository<'a> {
    async fn wallet_exists(&self, wallet_address: &str) -> Result<bool, DbErr> {
        let spinner = Spinner::find()
            .filter(SpinnerColumn::WalletAddress.eq(wallet_address))
            .one(self.db)
            .await?;
        Ok(spinner.is_some())
    }

    async fn insert(&self, spinner: NewSpinner) -> Result<SpinnerModel, DbErr> {
        let now = Utc::now();
        let active_model = SpinnerActiveModel {
            id: ActiveValue::NotSet,
            wallet_address: ActiveValue::Set(spinner.wallet_address),
            get_offer: ActiveValue::Set(spinner.get_offer),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        };
        active_model.insert(self.db).await
    }

    async fn total_offers(&self) -> Result<Decimal, DbErr> {
        let total = self
            .db
            .query_one(Statement::from_string(
                self.db.get_database_backend(),
                TOTAL_OFFERS.to_owned(),
            ))
            .await?;
        match total {
            Some(total) => total.try_get::<Decimal>("", "total_offers"),
            None => Ok(Decimal::ZERO),
        }
    }

    async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = Spinner::delete_by_id(id).exec(self.db).await?;
        Ok(result.rows_affected > 0)
    }

    async fn all(&self) -> Result<Vec<SpinnerModel>, DbErr> {
        Spinner::find()
            .order_by_desc(SpinnerColumn::Id)
            .all(self.db)
            .await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::validation::MAX_OFFER;
    use sea_orm::{ConnectOptions, Database, SqlErr};
    use spinner_db_migration::{Migrator, MigratorTrait};

    pub(crate) async fn get_db() -> DatabaseConnection {
        let mut options = ConnectOptions::new("sqlite::memory:".to_owned());
        options
            .max_connections(1)
            .min_connections(1)
            .sqlx_logging(false);
        let db = Database::connect(options).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        db
    }

    fn new_spinner(wallet_address: &str, get_offer: i64) -> NewSpinner {
        NewSpinner {
            wallet_address: wallet_address.to_owned(),
            get_offer: Decimal::from(get_offer),
        }
    }

    #[tokio::test]
    async fn total_offers_is_zero_for_empty_table() {
        let db = get_db().await;
        let repository = SeaOrmSpinnerRepository::new(&db);
        assert_eq!(repository.total_offers().await.unwrap(), Decimal::ZERO);
    }

    #[tokio::test]
    async fn insert_sets_timestamps_and_counts_towards_total() {
        let db = get_db().await;
        let repository = SeaOrmSpinnerRepository::new(&db);

        let first = repository.insert(new_spinner("0xABC", 50)).await.unwrap();
        repository.insert(new_spinner("0xDEF", 25)).await.unwrap();

        assert_eq!(first.wallet_address, "0xABC");
        assert_eq!(first.created_at, first.updated_at);
        assert!(repository.wallet_exists("0xABC").await.unwrap());
        assert!(!repository.wallet_exists("0x123").await.unwrap());
        assert_eq!(repository.total_offers().await.unwrap(), Decimal::from(75));
    }

    #[tokio::test]
    async fn unique_index_rejects_second_wallet_insert() {
        let db = get_db().await;
        let repository = SeaOrmSpinnerRepository::new(&db);

        repository.insert(new_spinner("0xABC", 50)).await.unwrap();
        let error = repository
            .insert(new_spinner("0xABC", 99))
            .await
            .unwrap_err();

        assert!(matches!(
            error.sql_err(),
            Some(SqlErr::UniqueConstraintViolation(_))
        ));
        assert_eq!(repository.total_offers().await.unwrap(), Decimal::from(50));
    }

    #[tokio::test]
    async fn delete_reports_whether_a_row_went_away() {
        let db = get_db().await;
        let repository = SeaOrmSpinnerRepository::new(&db);

        let spinner = repository.insert(new_spinner("0xABC", 50)).await.unwrap();

        assert!(repository.delete(spinner.id).await.unwrap());
        assert!(!repository.delete(spinner.id).await.unwrap());
        assert!(repository.all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn fractional_and_largest_offers_sum_exactly() {
        let db = get_db().await;
        let repository = SeaOrmSpinnerRepository::new(&db);

        repository
            .insert(NewSpinner {
                wallet_address: "0xABC".to_owned(),
                get_offer: Decimal::new(125, 1),
            })
            .await
            .unwrap();
        repository.insert(new_spinner("0xDEF", MAX_OFFER)).await.unwrap();
        repository.insert(new_spinner("0x123", MAX_OFFER)).await.unwrap();

        assert_eq!(
            repository.total_offers().await.unwrap(),
            Decimal::new(20_000_000_125, 1)
        );
        let stored = repository.all().await.unwrap();
        assert_eq!(stored[2].get_offer, Decimal::new(125, 1));
    }

    #[tokio::test]
    async fn all_lists_newest_first() {
        let db = get_db().await;
        let repository = SeaOrmSpinnerRepository::new(&db);

        repository.insert(new_spinner("0xABC", 50)).await.unwrap();
        repository.insert(new_spinner("0xDEF", 25)).await.unwrap();

        let wallets: Vec<String> = repository
            .all()
            .await
            .unwrap()
            .into_iter()
            .map(|spinner| spinner.wallet_address)
            .collect();
        assert_eq!(wallets, vec!["0xDEF".to_owned(), "0xABC".to_owned()]);
    }
}

use sea_orm_migration::prelude::*;
use spinner_db_entity::db::*;

pub const WALLET_ADDRESS_INDEX: &str = "idx-spinners-wallet_address";

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20230315_000001_create_index"
    }
}

/// One submission per wallet address. Concurrent submissions race on this
/// index, not on the service's pre-check.
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name(WALLET_ADDRESS_INDEX)
                    .table(spinner::Entity)
                    .col(spinner::Column::WalletAddress)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(WALLET_ADDRESS_INDEX)
                    .table(spinner::Entity)
                    .to_owned(),
            )
            .await
    }
}

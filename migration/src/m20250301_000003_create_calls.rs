use sea_orm_migration::prelude::*;

use crate::m20250301_000001_create_tenant_schema::Organizations;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // contact_id and user_id are weak references resolved at read time
        manager
            .create_table(
                Table::create()
                    .table(Calls::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Calls::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Calls::OrgId).string().not_null())
                    .col(ColumnDef::new(Calls::ContactId).string().null())
                    .col(ColumnDef::new(Calls::UserId).string().not_null())
                    .col(ColumnDef::new(Calls::PhoneNumber).string().not_null())
                    .col(ColumnDef::new(Calls::Direction).string().not_null())
                    .col(ColumnDef::new(Calls::StartTime).big_integer().not_null())
                    .col(
                        ColumnDef::new(Calls::Duration)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Calls::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_calls_org_id")
                            .from(Calls::Table, Calls::OrgId)
                            .to(Organizations::Table, Organizations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Natural key used by call sync
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_calls_natural_key")
                    .table(Calls::Table)
                    .col(Calls::OrgId)
                    .col(Calls::PhoneNumber)
                    .col(Calls::StartTime)
                    .col(Calls::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_calls_org_start_time")
                    .table(Calls::Table)
                    .col(Calls::OrgId)
                    .col(Calls::StartTime)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Calls::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Calls {
    Table,
    Id,
    OrgId,
    ContactId,
    UserId,
    PhoneNumber,
    Direction,
    StartTime,
    Duration,
    CreatedAt,
}

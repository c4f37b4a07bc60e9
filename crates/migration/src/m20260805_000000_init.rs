//! Initial schema migration - creates all tables from scratch.
//!
//! It creates the complete schema for the storefront:
//!
//! - `users`: accounts with credentials and the spendable budget
//! - `items`: the catalog, each row optionally owned by one user
//!
//! Uniqueness (username, email, item name, barcode, description) is enforced
//! here with unique indexes; the engine pre-checks the same constraints inside
//! its transactions to report them as typed errors.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Username,
    EmailAddress,
    PasswordHash,
    Budget,
}

#[derive(Iden)]
enum Items {
    Table,
    Id,
    Name,
    Price,
    Barcode,
    Description,
    Owner,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Users::Username).string().not_null())
                    .col(ColumnDef::new(Users::EmailAddress).string().not_null())
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(
                        ColumnDef::new(Users::Budget)
                            .big_integer()
                            .not_null()
                            .default(1000),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-users-username")
                    .table(Users::Table)
                    .col(Users::Username)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-users-email_address")
                    .table(Users::Table)
                    .col(Users::EmailAddress)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Items::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Items::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Items::Name).string().not_null())
                    .col(ColumnDef::new(Items::Price).big_integer().not_null())
                    .col(ColumnDef::new(Items::Barcode).string().not_null())
                    .col(ColumnDef::new(Items::Description).string().not_null())
                    .col(ColumnDef::new(Items::Owner).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-items-owner")
                            .from(Items::Table, Items::Owner)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-items-name")
                    .table(Items::Table)
                    .col(Items::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-items-barcode")
                    .table(Items::Table)
                    .col(Items::Barcode)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-items-description")
                    .table(Items::Table)
                    .col(Items::Description)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-items-owner")
                    .table(Items::Table)
                    .col(Items::Owner)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Items::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

//! Patients migration.
//!
//! Creates the patients table. Attachments are not persisted here.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Patients::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Patients::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Patients::Name).string().not_null())
                    .col(ColumnDef::new(Patients::Age).small_integer().not_null())
                    .col(ColumnDef::new(Patients::PhoneNumber).string().not_null())
                    .col(ColumnDef::new(Patients::EmailAddress).string().not_null())
                    .col(ColumnDef::new(Patients::Address).string().not_null())
                    .col(
                        ColumnDef::new(Patients::MedicalHistory)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Patients::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Patients::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Listing order
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_patients_created_at")
                    .table(Patients::Table)
                    .col(Patients::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_patients_name")
                    .table(Patients::Table)
                    .col(Patients::Name)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Patients::Table).if_exists().to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Patients {
    Table,
    Id,
    Name,
    Age,
    PhoneNumber,
    EmailAddress,
    Address,
    MedicalHistory,
    CreatedAt,
    UpdatedAt,
}

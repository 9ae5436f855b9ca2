use sea_orm_migration::prelude::*;
use sea_orm_migration::prelude::extension::postgres::Type;

#[derive(DeriveIden)]
enum Partners {
    Table,
    Id,
    Name,
    Email,
    PasswordHash,
    AffiliateCode,
    Whatsapp,
    Address,
    BankName,
    AccountHolder,
    AccountNumber,
    Status,
    Role,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
    Name,
    Category,
    Price,
    Unit,
    Description,
    ImageUrl,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum SurveySchedules {
    Table,
    Id,
    PartnerId,
    CustomerName,
    CustomerPhone,
    Address,
    ScheduledDate,
    TimeSlot,
    Notes,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Invoices {
    Table,
    Id,
    InvoiceNumber,
    PartnerId,
    SurveyId,
    CustomerName,
    CustomerPhone,
    Items,
    Total,
    Status,
    PaidAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Transactions {
    Table,
    Id,
    PartnerId,
    TransactionType,
    Amount,
    Description,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("partner_status"))
                    .values(vec![Alias::new("active"), Alias::new("inactive")])
                    .to_owned(),
            )
            .await?;

        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("partner_role"))
                    .values(vec![Alias::new("partner"), Alias::new("admin")])
                    .to_owned(),
            )
            .await?;

        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("transaction_type"))
                    .values(vec![Alias::new("commission"), Alias::new("withdraw")])
                    .to_owned(),
            )
            .await?;

        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("transaction_status"))
                    .values(vec![
                        Alias::new("pending"),
                        Alias::new("success"),
                        Alias::new("rejected"),
                        Alias::new("failed"),
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("invoice_status"))
                    .values(vec![
                        Alias::new("unpaid"),
                        Alias::new("paid"),
                        Alias::new("cancelled"),
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("survey_status"))
                    .values(vec![
                        Alias::new("scheduled"),
                        Alias::new("completed"),
                        Alias::new("cancelled"),
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Partners::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Partners::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Partners::Name).string().not_null())
                    .col(
                        ColumnDef::new(Partners::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Partners::PasswordHash).string().not_null())
                    .col(
                        ColumnDef::new(Partners::AffiliateCode)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Partners::Whatsapp).string().null())
                    .col(ColumnDef::new(Partners::Address).string().null())
                    .col(ColumnDef::new(Partners::BankName).string().null())
                    .col(ColumnDef::new(Partners::AccountHolder).string().null())
                    .col(ColumnDef::new(Partners::AccountNumber).string().null())
                    .col(
                        ColumnDef::new(Partners::Status)
                            .custom(Alias::new("partner_status"))
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Partners::Role)
                            .custom(Alias::new("partner_role"))
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Partners::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Partners::UpdatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Products::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Products::Name).string().not_null())
                    .col(ColumnDef::new(Products::Category).string().null())
                    .col(ColumnDef::new(Products::Price).big_integer().not_null())
                    .col(ColumnDef::new(Products::Unit).string().null())
                    .col(ColumnDef::new(Products::Description).string().null())
                    .col(ColumnDef::new(Products::ImageUrl).string().null())
                    .col(
                        ColumnDef::new(Products::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Products::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Products::UpdatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SurveySchedules::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SurveySchedules::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SurveySchedules::PartnerId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SurveySchedules::CustomerName)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SurveySchedules::CustomerPhone).string().null())
                    .col(ColumnDef::new(SurveySchedules::Address).string().not_null())
                    .col(
                        ColumnDef::new(SurveySchedules::ScheduledDate)
                            .date()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SurveySchedules::TimeSlot).string().null())
                    .col(ColumnDef::new(SurveySchedules::Notes).string().null())
                    .col(
                        ColumnDef::new(SurveySchedules::Status)
                            .custom(Alias::new("survey_status"))
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SurveySchedules::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(SurveySchedules::UpdatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Invoices::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Invoices::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Invoices::InvoiceNumber)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Invoices::PartnerId).uuid().null())
                    .col(ColumnDef::new(Invoices::SurveyId).uuid().null())
                    .col(ColumnDef::new(Invoices::CustomerName).string().not_null())
                    .col(ColumnDef::new(Invoices::CustomerPhone).string().null())
                    .col(ColumnDef::new(Invoices::Items).json().not_null())
                    .col(ColumnDef::new(Invoices::Total).big_integer().not_null())
                    .col(
                        ColumnDef::new(Invoices::Status)
                            .custom(Alias::new("invoice_status"))
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Invoices::PaidAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Invoices::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Invoices::UpdatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Transactions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Transactions::PartnerId).uuid().not_null())
                    .col(
                        ColumnDef::new(Transactions::TransactionType)
                            .custom(Alias::new("transaction_type"))
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transactions::Amount)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Transactions::Description).string().null())
                    .col(
                        ColumnDef::new(Transactions::Status)
                            .custom(Alias::new("transaction_status"))
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transactions::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Transactions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Amounts are stored positive; direction lives in transaction_type.
        manager
            .get_connection()
            .execute_unprepared(
                "ALTER TABLE transactions ADD CONSTRAINT chk_transactions_amount_positive CHECK (amount > 0)",
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_transactions_partner_id")
                    .table(Transactions::Table)
                    .col(Transactions::PartnerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_transactions_status")
                    .table(Transactions::Table)
                    .col(Transactions::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_invoices_partner_id")
                    .table(Invoices::Table)
                    .col(Invoices::PartnerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_survey_schedules_partner_id")
                    .table(SurveySchedules::Table)
                    .col(SurveySchedules::PartnerId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Transactions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Invoices::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SurveySchedules::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Partners::Table).to_owned())
            .await?;

        for name in [
            "survey_status",
            "invoice_status",
            "transaction_status",
            "transaction_type",
            "partner_role",
            "partner_status",
        ] {
            manager
                .drop_type(Type::drop().name(Alias::new(name)).to_owned())
                .await?;
        }

        Ok(())
    }
}

use sea_orm_migration::prelude::*;
use sea_orm_migration::prelude::extension::postgres::Type;

#[derive(DeriveIden)]
enum PartnerRequests {
    Table,
    Id,
    PartnerId,
    RequestType,
    OldValue,
    NewValue,
    Status,
    ResolvedAt,
    CreatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("partner_request_type"))
                    .values(vec![Alias::new("phone"), Alias::new("bank")])
                    .to_owned(),
            )
            .await?;

        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("partner_request_status"))
                    .values(vec![
                        Alias::new("pending"),
                        Alias::new("approved"),
                        Alias::new("rejected"),
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PartnerRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PartnerRequests::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PartnerRequests::PartnerId).uuid().not_null())
                    .col(
                        ColumnDef::new(PartnerRequests::RequestType)
                            .custom(Alias::new("partner_request_type"))
                            .not_null(),
                    )
                    .col(ColumnDef::new(PartnerRequests::OldValue).json().not_null())
                    .col(ColumnDef::new(PartnerRequests::NewValue).json().not_null())
                    .col(
                        ColumnDef::new(PartnerRequests::Status)
                            .custom(Alias::new("partner_request_status"))
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PartnerRequests::ResolvedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PartnerRequests::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_partner_requests_partner_id")
                    .table(PartnerRequests::Table)
                    .col(PartnerRequests::PartnerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_partner_requests_status")
                    .table(PartnerRequests::Table)
                    .col(PartnerRequests::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PartnerRequests::Table).to_owned())
            .await?;

        manager
            .drop_type(
                Type::drop()
                    .name(Alias::new("partner_request_status"))
                    .to_owned(),
            )
            .await?;

        manager
            .drop_type(
                Type::drop()
                    .name(Alias::new("partner_request_type"))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

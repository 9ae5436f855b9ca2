use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "partner_request_type")]
#[serde(rename_all = "snake_case")]
pub enum PartnerRequestType {
    #[sea_orm(string_value = "phone")]
    Phone,
    #[sea_orm(string_value = "bank")]
    Bank,
}

impl std::fmt::Display for PartnerRequestType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PartnerRequestType::Phone => write!(f, "phone"),
            PartnerRequestType::Bank => write!(f, "bank"),
        }
    }
}

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "partner_request_status")]
#[serde(rename_all = "snake_case")]
pub enum PartnerRequestStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

impl std::fmt::Display for PartnerRequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PartnerRequestStatus::Pending => write!(f, "pending"),
            PartnerRequestStatus::Approved => write!(f, "approved"),
            PartnerRequestStatus::Rejected => write!(f, "rejected"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "partner_requests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub partner_id: Uuid,
    pub request_type: PartnerRequestType,
    /// Snapshot of the fields as they were when the request was created.
    pub old_value: Json,
    /// Proposed replacement, copied onto the partner row on approval.
    pub new_value: Json,
    pub status: PartnerRequestStatus,
    pub resolved_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

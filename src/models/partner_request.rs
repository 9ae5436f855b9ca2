use crate::entities::{
    partner_request_entity as partner_requests, PartnerRequestStatus, PartnerRequestType,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChangeRequestResponse {
    pub id: Uuid,
    pub partner_id: Uuid,
    pub request_type: PartnerRequestType,
    pub old_value: Value,
    pub new_value: Value,
    pub status: PartnerRequestStatus,
    pub resolved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<partner_requests::Model> for ChangeRequestResponse {
    fn from(m: partner_requests::Model) -> Self {
        Self {
            id: m.id,
            partner_id: m.partner_id,
            request_type: m.request_type,
            old_value: m.old_value,
            new_value: m.new_value,
            status: m.status,
            resolved_at: m.resolved_at,
            created_at: m.created_at.unwrap_or_else(Utc::now),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PhoneChangeRequest {
    pub whatsapp: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BankChangeRequest {
    pub bank_name: String,
    pub account_holder: String,
    pub account_number: String,
}

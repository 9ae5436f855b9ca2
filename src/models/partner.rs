use crate::entities::{partner_entity as partners, PartnerRole, PartnerStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PartnerResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub affiliate_code: String,
    pub whatsapp: Option<String>,
    pub address: Option<String>,
    pub bank_name: Option<String>,
    pub account_holder: Option<String>,
    pub account_number: Option<String>,
    pub status: PartnerStatus,
    pub role: PartnerRole,
    pub created_at: DateTime<Utc>,
}

impl From<partners::Model> for PartnerResponse {
    fn from(m: partners::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
            affiliate_code: m.affiliate_code,
            whatsapp: m.whatsapp,
            address: m.address,
            bank_name: m.bank_name,
            account_holder: m.account_holder,
            account_number: m.account_number,
            status: m.status,
            role: m.role,
            created_at: m.created_at.unwrap_or_else(Utc::now),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub whatsapp: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub partner: PartnerResponse,
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ResetPasswordRequest {
    pub new_password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PartnerListQuery {
    pub status: Option<PartnerStatus>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

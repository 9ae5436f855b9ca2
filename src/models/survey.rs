use crate::entities::{survey_schedule_entity as surveys, SurveyStatus};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SurveyResponse {
    pub id: Uuid,
    pub partner_id: Uuid,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub address: String,
    pub scheduled_date: NaiveDate,
    pub time_slot: Option<String>,
    pub notes: Option<String>,
    pub status: SurveyStatus,
    pub created_at: DateTime<Utc>,
}

impl From<surveys::Model> for SurveyResponse {
    fn from(m: surveys::Model) -> Self {
        Self {
            id: m.id,
            partner_id: m.partner_id,
            customer_name: m.customer_name,
            customer_phone: m.customer_phone,
            address: m.address,
            scheduled_date: m.scheduled_date,
            time_slot: m.time_slot,
            notes: m.notes,
            status: m.status,
            created_at: m.created_at.unwrap_or_else(Utc::now),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSurveyRequest {
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub address: String,
    /// ISO date (YYYY-MM-DD).
    pub scheduled_date: NaiveDate,
    pub time_slot: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateSurveyStatusRequest {
    pub status: SurveyStatus,
}

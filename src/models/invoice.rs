use crate::entities::{invoice_entity as invoices, InvoiceStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InvoiceItem {
    pub name: String,
    pub quantity: i64,
    /// Minor-unit price per unit.
    pub unit_price: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InvoiceResponse {
    pub id: Uuid,
    pub invoice_number: String,
    pub partner_id: Option<Uuid>,
    pub survey_id: Option<Uuid>,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub items: Value,
    pub total: i64,
    pub status: InvoiceStatus,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<invoices::Model> for InvoiceResponse {
    fn from(m: invoices::Model) -> Self {
        Self {
            id: m.id,
            invoice_number: m.invoice_number,
            partner_id: m.partner_id,
            survey_id: m.survey_id,
            customer_name: m.customer_name,
            customer_phone: m.customer_phone,
            items: m.items,
            total: m.total,
            status: m.status,
            paid_at: m.paid_at,
            created_at: m.created_at.unwrap_or_else(Utc::now),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateInvoiceRequest {
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub survey_id: Option<Uuid>,
    pub items: Vec<InvoiceItem>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct InvoiceListQuery {
    pub status: Option<InvoiceStatus>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

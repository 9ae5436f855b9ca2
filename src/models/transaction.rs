use crate::entities::{transaction_entity as transactions, TransactionStatus, TransactionType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TransactionResponse {
    pub id: Uuid,
    pub partner_id: Uuid,
    pub transaction_type: TransactionType,
    pub amount: i64,
    pub description: Option<String>,
    pub status: TransactionStatus,
    pub created_at: DateTime<Utc>,
}

impl From<transactions::Model> for TransactionResponse {
    fn from(m: transactions::Model) -> Self {
        Self {
            id: m.id,
            partner_id: m.partner_id,
            transaction_type: m.transaction_type,
            amount: m.amount,
            description: m.description,
            status: m.status,
            created_at: m.created_at.unwrap_or_else(Utc::now),
        }
    }
}

/// Balance derived from the full transaction history. `balance` is the exact
/// arithmetic value used by withdrawal checks; `available` is the same value
/// clamped at zero for display.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BalanceResponse {
    pub partner_id: Uuid,
    pub earned: i64,
    pub withdrawn_settled: i64,
    pub withdrawn_pending: i64,
    pub balance: i64,
    pub available: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum HistoryFilter {
    All,
    Commission,
    Withdraw,
}

impl Default for HistoryFilter {
    fn default() -> Self {
        HistoryFilter::All
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct HistoryQuery {
    pub filter: Option<HistoryFilter>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitWithdrawalRequest {
    /// Requested amount in minor units (rupiah).
    pub amount: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ManualCommissionRequest {
    pub partner_id: Uuid,
    pub amount: i64,
    pub description: Option<String>,
}

use crate::entities::{
    partner_entity as partners, transaction_entity as transactions, TransactionStatus,
    TransactionType,
};
use crate::error::{AppError, AppResult};
use crate::models::{
    BalanceResponse, HistoryFilter, HistoryQuery, PaginatedResponse, PaginationParams,
    TransactionResponse,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

/// Bucketed totals over a partner's full transaction history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LedgerSummary {
    pub earned: i64,
    pub withdrawn_settled: i64,
    pub withdrawn_pending: i64,
}

impl LedgerSummary {
    /// Exact arithmetic value. Pending withdrawals already count against the
    /// balance so a partner cannot queue up more than they have.
    pub fn balance(&self) -> i64 {
        self.earned - self.withdrawn_settled - self.withdrawn_pending
    }
}

/// Classify rows into the three buckets the balance is built from.
///
/// Rejected and failed rows count toward nothing: a declined withdrawal
/// releases its funds by simply not being summed.
pub fn summarize(rows: &[transactions::Model]) -> LedgerSummary {
    let mut summary = LedgerSummary::default();
    for row in rows {
        match (row.transaction_type, row.status) {
            (TransactionType::Commission, TransactionStatus::Success) => {
                summary.earned += row.amount;
            }
            (TransactionType::Withdraw, TransactionStatus::Success) => {
                summary.withdrawn_settled += row.amount;
            }
            (TransactionType::Withdraw, TransactionStatus::Pending) => {
                summary.withdrawn_pending += row.amount;
            }
            _ => {}
        }
    }
    summary
}

/// Insert a settled commission credit. Commissions are born `success`; there
/// is no pending commission state. Callers running inside a transaction pass
/// it as `conn` so the credit commits or rolls back with them.
pub(crate) async fn insert_commission<C: ConnectionTrait>(
    conn: &C,
    partner_id: Uuid,
    amount: i64,
    description: Option<String>,
) -> AppResult<transactions::Model> {
    let now = Utc::now();
    let row = transactions::ActiveModel {
        id: Set(Uuid::new_v4()),
        partner_id: Set(partner_id),
        transaction_type: Set(TransactionType::Commission),
        amount: Set(amount),
        description: Set(description),
        status: Set(TransactionStatus::Success),
        created_at: Set(Some(now)),
        updated_at: Set(Some(now)),
    }
    .insert(conn)
    .await?;
    Ok(row)
}

#[derive(Clone)]
pub struct LedgerService {
    pool: DatabaseConnection,
}

impl LedgerService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// Full-scan aggregation over the partner's transactions. No pagination
    /// limit: per-partner history stays small enough that recomputing the
    /// view on every read is the accepted cost of not storing a running
    /// total. An unknown partner id yields the empty summary, not an error.
    pub async fn summary(&self, partner_id: Uuid) -> AppResult<LedgerSummary> {
        let rows = transactions::Entity::find()
            .filter(transactions::Column::PartnerId.eq(partner_id))
            .all(&self.pool)
            .await?;
        Ok(summarize(&rows))
    }

    pub async fn compute_balance(&self, partner_id: Uuid) -> AppResult<BalanceResponse> {
        let summary = self.summary(partner_id).await?;
        let balance = summary.balance();
        Ok(BalanceResponse {
            partner_id,
            earned: summary.earned,
            withdrawn_settled: summary.withdrawn_settled,
            withdrawn_pending: summary.withdrawn_pending,
            balance,
            available: balance.max(0),
        })
    }

    /// Display-ordered history, newest first. Id is the tie-break under equal
    /// timestamps so the order is stable across reads.
    pub async fn list_history(
        &self,
        partner_id: Uuid,
        query: &HistoryQuery,
    ) -> AppResult<PaginatedResponse<TransactionResponse>> {
        let params = PaginationParams {
            page: query.page,
            page_size: query.page_size,
        };

        let mut find =
            transactions::Entity::find().filter(transactions::Column::PartnerId.eq(partner_id));
        match query.filter.unwrap_or_default() {
            HistoryFilter::All => {}
            HistoryFilter::Commission => {
                find = find
                    .filter(transactions::Column::TransactionType.eq(TransactionType::Commission));
            }
            HistoryFilter::Withdraw => {
                find = find
                    .filter(transactions::Column::TransactionType.eq(TransactionType::Withdraw));
            }
        }

        let total = find.clone().count(&self.pool).await? as i64;

        let rows = find
            .order_by(transactions::Column::CreatedAt, Order::Desc)
            .order_by(transactions::Column::Id, Order::Desc)
            .limit(params.get_limit() as u64)
            .offset(params.get_offset() as u64)
            .all(&self.pool)
            .await?;

        let items: Vec<TransactionResponse> = rows.into_iter().map(Into::into).collect();
        Ok(PaginatedResponse::new(items, &params, total))
    }

    /// Manual bonus issued by an admin. The partner must exist; automatic
    /// credits on paid invoices go through the invoice service instead.
    pub async fn grant_commission(
        &self,
        partner_id: Uuid,
        amount: i64,
        description: Option<String>,
    ) -> AppResult<TransactionResponse> {
        if amount <= 0 {
            return Err(AppError::ValidationError(
                "Commission amount must be positive".to_string(),
            ));
        }

        let partner = partners::Entity::find_by_id(partner_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Partner not found".to_string()))?;

        let row = insert_commission(
            &self.pool,
            partner.id,
            amount,
            description.or_else(|| Some("Manual bonus".to_string())),
        )
        .await?;
        Ok(row.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(
        transaction_type: TransactionType,
        status: TransactionStatus,
        amount: i64,
    ) -> transactions::Model {
        transactions::Model {
            id: Uuid::new_v4(),
            partner_id: Uuid::new_v4(),
            transaction_type,
            amount,
            description: None,
            status,
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
        }
    }

    #[test]
    fn test_empty_history_is_zero_balance() {
        let summary = summarize(&[]);
        assert_eq!(summary, LedgerSummary::default());
        assert_eq!(summary.balance(), 0);
    }

    #[test]
    fn test_rejected_and_failed_rows_do_not_reduce_balance() {
        let rows = vec![
            row(TransactionType::Withdraw, TransactionStatus::Rejected, 500_000),
            row(TransactionType::Withdraw, TransactionStatus::Failed, 250_000),
        ];
        assert_eq!(summarize(&rows).balance(), summarize(&[]).balance());
    }

    #[test]
    fn test_pending_withdrawals_count_against_balance() {
        let rows = vec![
            row(TransactionType::Commission, TransactionStatus::Success, 1_000_000),
            row(TransactionType::Withdraw, TransactionStatus::Pending, 400_000),
        ];
        let summary = summarize(&rows);
        assert_eq!(summary.earned, 1_000_000);
        assert_eq!(summary.withdrawn_pending, 400_000);
        assert_eq!(summary.balance(), 600_000);
    }

    #[test]
    fn test_closed_form_over_mixed_history() {
        let rows = vec![
            row(TransactionType::Commission, TransactionStatus::Success, 1_000_000),
            row(TransactionType::Commission, TransactionStatus::Success, 350_000),
            row(TransactionType::Withdraw, TransactionStatus::Success, 200_000),
            row(TransactionType::Withdraw, TransactionStatus::Pending, 100_000),
            row(TransactionType::Withdraw, TransactionStatus::Rejected, 999_999),
        ];
        let summary = summarize(&rows);
        assert_eq!(summary.earned, 1_350_000);
        assert_eq!(summary.withdrawn_settled, 200_000);
        assert_eq!(summary.withdrawn_pending, 100_000);
        assert_eq!(summary.balance(), 1_050_000);
    }

    #[test]
    fn test_raw_balance_can_go_negative_but_is_exact() {
        // Pathological data repaired by hand upstream; the raw value must
        // stay exact for audit, only display clamps.
        let rows = vec![
            row(TransactionType::Commission, TransactionStatus::Success, 100_000),
            row(TransactionType::Withdraw, TransactionStatus::Success, 150_000),
        ];
        let summary = summarize(&rows);
        assert_eq!(summary.balance(), -50_000);
        assert_eq!(summary.balance().max(0), 0);
    }
}

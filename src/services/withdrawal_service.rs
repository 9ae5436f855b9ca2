use crate::entities::{transaction_entity as transactions, TransactionStatus, TransactionType};
use crate::error::{AppError, AppResult};
use crate::models::{PaginatedResponse, PaginationParams, TransactionResponse};
use crate::services::{LedgerService, SettingsService};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};
use tokio::sync::Mutex as AsyncMutex;
use uuid::Uuid;

/// Per-partner async locks serializing the balance read-check-insert in
/// `submit`. The balance is a view over the transaction log with no stored
/// total, so without this two in-flight submissions could both pass the same
/// stale check and jointly overdraw.
#[derive(Clone, Default)]
pub struct PartnerLocks {
    inner: Arc<StdMutex<HashMap<Uuid, Arc<AsyncMutex<()>>>>>,
}

impl PartnerLocks {
    pub fn for_partner(&self, partner_id: Uuid) -> Arc<AsyncMutex<()>> {
        let mut map = self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        map.entry(partner_id)
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone()
    }
}

/// Preconditions for a new withdrawal. The minimum is checked first so the
/// caller always learns the most actionable reason; the balance comparison is
/// on the raw value and admits `amount == balance` exactly.
fn check_submit(amount: i64, minimum: i64, balance: i64) -> AppResult<()> {
    if amount < minimum {
        return Err(AppError::BelowMinimum {
            requested: amount,
            minimum,
        });
    }
    if amount > balance {
        return Err(AppError::InsufficientBalance {
            requested: amount,
            available: balance,
        });
    }
    Ok(())
}

/// Reconcile a status transition whose compare-and-swap matched no row.
/// Re-applying the transition the row already took is a no-op success;
/// crossing to the other terminal state is refused, the first resolution
/// stands.
fn reconcile_transition(current: TransactionStatus, target: TransactionStatus) -> AppResult<()> {
    if current == target {
        return Ok(());
    }
    Err(AppError::InvalidTransition(format!(
        "Withdrawal already {current}, cannot mark it {target}"
    )))
}

#[derive(Clone)]
pub struct WithdrawalService {
    pool: DatabaseConnection,
    ledger: LedgerService,
    settings: SettingsService,
    locks: PartnerLocks,
}

impl WithdrawalService {
    pub fn new(pool: DatabaseConnection, ledger: LedgerService, settings: SettingsService) -> Self {
        Self {
            pool,
            ledger,
            settings,
            locks: PartnerLocks::default(),
        }
    }

    /// Create a pending withdrawal. The only entry point that writes a
    /// withdraw row; once submitted only an admin resolves it, the partner
    /// has no cancel path.
    pub async fn submit(&self, partner_id: Uuid, amount: i64) -> AppResult<TransactionResponse> {
        let lock = self.locks.for_partner(partner_id);
        let _guard = lock.lock().await;

        let minimum = self.settings.min_withdrawal().await?;
        let balance = self.ledger.summary(partner_id).await?.balance();
        check_submit(amount, minimum, balance)?;

        let now = Utc::now();
        let row = transactions::ActiveModel {
            id: Set(Uuid::new_v4()),
            partner_id: Set(partner_id),
            transaction_type: Set(TransactionType::Withdraw),
            amount: Set(amount),
            description: Set(Some("Withdrawal request".to_string())),
            status: Set(TransactionStatus::Pending),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
        }
        .insert(&self.pool)
        .await?;

        log::info!(
            "Withdrawal {} submitted: partner={} amount={}",
            row.id,
            partner_id,
            amount
        );
        Ok(row.into())
    }

    pub async fn approve(&self, transaction_id: Uuid) -> AppResult<TransactionResponse> {
        self.resolve(transaction_id, TransactionStatus::Success)
            .await
    }

    /// Rejecting releases the funds automatically: the aggregator excludes
    /// rejected rows, no compensating credit is written.
    pub async fn reject(&self, transaction_id: Uuid) -> AppResult<TransactionResponse> {
        self.resolve(transaction_id, TransactionStatus::Rejected)
            .await
    }

    async fn resolve(
        &self,
        transaction_id: Uuid,
        target: TransactionStatus,
    ) -> AppResult<TransactionResponse> {
        let row = transactions::Entity::find_by_id(transaction_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Withdrawal not found".to_string()))?;

        if row.transaction_type != TransactionType::Withdraw {
            return Err(AppError::InvalidTransition(
                "Transaction is not a withdrawal".to_string(),
            ));
        }

        // Optimistic CAS on the pending status; when several admins race,
        // exactly one update matches.
        let result = transactions::Entity::update_many()
            .set(transactions::ActiveModel {
                status: Set(target),
                updated_at: Set(Some(Utc::now())),
                ..Default::default()
            })
            .filter(transactions::Column::Id.eq(transaction_id))
            .filter(transactions::Column::Status.eq(TransactionStatus::Pending))
            .exec(&self.pool)
            .await?;

        if result.rows_affected == 0 {
            let current = transactions::Entity::find_by_id(transaction_id)
                .one(&self.pool)
                .await?
                .ok_or_else(|| AppError::NotFound("Withdrawal not found".to_string()))?;
            reconcile_transition(current.status, target)?;
            return Ok(current.into());
        }

        let updated = transactions::Entity::find_by_id(transaction_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Withdrawal not found".to_string()))?;

        log::info!(
            "Withdrawal {} resolved: partner={} amount={} status={}",
            updated.id,
            updated.partner_id,
            updated.amount,
            updated.status
        );
        Ok(updated.into())
    }

    /// Review queue for admins, oldest first.
    pub async fn list_pending(
        &self,
        params: &PaginationParams,
    ) -> AppResult<PaginatedResponse<TransactionResponse>> {
        let find = transactions::Entity::find()
            .filter(transactions::Column::TransactionType.eq(TransactionType::Withdraw))
            .filter(transactions::Column::Status.eq(TransactionStatus::Pending));

        let total = find.clone().count(&self.pool).await? as i64;

        let rows = find
            .order_by(transactions::Column::CreatedAt, Order::Asc)
            .order_by(transactions::Column::Id, Order::Asc)
            .limit(params.get_limit() as u64)
            .offset(params.get_offset() as u64)
            .all(&self.pool)
            .await?;

        let items: Vec<TransactionResponse> = rows.into_iter().map(Into::into).collect();
        Ok(PaginatedResponse::new(items, params, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ledger_service::summarize;
    use std::time::Duration;

    const MIN: i64 = 50_000;

    #[test]
    fn test_submit_preconditions() {
        // Minimum wins even when the balance would cover the amount.
        assert!(matches!(
            check_submit(MIN - 1, MIN, 10_000_000),
            Err(AppError::BelowMinimum { .. })
        ));
        // Boundary: the full balance is withdrawable.
        assert!(check_submit(1_000_000, MIN, 1_000_000).is_ok());
        assert!(matches!(
            check_submit(1_000_001, MIN, 1_000_000),
            Err(AppError::InsufficientBalance { .. })
        ));
    }

    /// One commission of 1,000,000: withdraw it all (balance 0 with the
    /// pending debit counted), reject the withdrawal (balance restored),
    /// then one rupiah more than the balance is refused.
    #[test]
    fn test_full_withdrawal_lifecycle_against_the_ledger() {
        let partner_id = Uuid::new_v4();
        let commission = transactions::Model {
            id: Uuid::new_v4(),
            partner_id,
            transaction_type: TransactionType::Commission,
            amount: 1_000_000,
            description: None,
            status: TransactionStatus::Success,
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
        };

        let balance = summarize(&[commission.clone()]).balance();
        assert_eq!(balance, 1_000_000);
        assert!(check_submit(1_000_000, MIN, balance).is_ok());

        let mut withdrawal = transactions::Model {
            id: Uuid::new_v4(),
            partner_id,
            transaction_type: TransactionType::Withdraw,
            amount: 1_000_000,
            description: None,
            status: TransactionStatus::Pending,
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
        };
        let rows = vec![commission.clone(), withdrawal.clone()];
        assert_eq!(summarize(&rows).balance(), 0);

        withdrawal.status = TransactionStatus::Rejected;
        let rows = vec![commission, withdrawal];
        let balance = summarize(&rows).balance();
        assert_eq!(balance, 1_000_000);

        assert!(matches!(
            check_submit(1_000_001, MIN, balance),
            Err(AppError::InsufficientBalance { .. })
        ));
    }

    #[test]
    fn test_reapplying_same_terminal_state_is_noop() {
        assert!(
            reconcile_transition(TransactionStatus::Success, TransactionStatus::Success).is_ok()
        );
        assert!(
            reconcile_transition(TransactionStatus::Rejected, TransactionStatus::Rejected).is_ok()
        );
    }

    #[test]
    fn test_crossing_terminal_states_is_refused() {
        let err = reconcile_transition(TransactionStatus::Rejected, TransactionStatus::Success)
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidTransition(_)));

        let err = reconcile_transition(TransactionStatus::Success, TransactionStatus::Rejected)
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidTransition(_)));
    }

    #[test]
    fn test_partner_locks_are_shared_per_partner() {
        let locks = PartnerLocks::default();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        assert!(Arc::ptr_eq(&locks.for_partner(a), &locks.for_partner(a)));
        assert!(!Arc::ptr_eq(&locks.for_partner(a), &locks.for_partner(b)));
    }

    /// Two concurrent submissions for the full balance must not both pass the
    /// check. Models the read-check-insert sequence `submit` runs under the
    /// per-partner lock; without the lock both tasks read the same stale
    /// balance and the shared total goes negative.
    #[tokio::test]
    async fn test_concurrent_submissions_cannot_overdraw() {
        let locks = PartnerLocks::default();
        let partner_id = Uuid::new_v4();
        let balance = Arc::new(StdMutex::new(1_000_000i64));

        let mut handles = Vec::new();
        for _ in 0..2 {
            let locks = locks.clone();
            let balance = balance.clone();
            handles.push(tokio::spawn(async move {
                let lock = locks.for_partner(partner_id);
                let _guard = lock.lock().await;

                let current = *balance.lock().unwrap();
                // Yield between check and act to widen the race window.
                tokio::time::sleep(Duration::from_millis(10)).await;
                if 1_000_000 <= current {
                    *balance.lock().unwrap() -= 1_000_000;
                    true
                } else {
                    false
                }
            }));
        }

        let mut accepted = 0;
        for handle in handles {
            if handle.await.unwrap() {
                accepted += 1;
            }
        }

        assert_eq!(accepted, 1);
        assert_eq!(*balance.lock().unwrap(), 0);
    }
}

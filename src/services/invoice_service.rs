use crate::entities::{
    invoice_entity as invoices, survey_schedule_entity as surveys, InvoiceStatus, SurveyStatus,
};
use crate::error::{AppError, AppResult};
use crate::models::{
    CreateInvoiceRequest, InvoiceItem, InvoiceListQuery, InvoiceResponse, PaginatedResponse,
    PaginationParams,
};
use crate::services::ledger_service::insert_commission;
use crate::services::SettingsService;
use crate::utils::generate_unique_invoice_number;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde_json::json;
use uuid::Uuid;

/// Sum of quantity × unit_price over all lines, with overflow checked so a
/// hostile payload cannot wrap into a small total.
fn compute_total(items: &[InvoiceItem]) -> AppResult<i64> {
    if items.is_empty() {
        return Err(AppError::ValidationError(
            "Invoice needs at least one line item".to_string(),
        ));
    }

    let mut total: i64 = 0;
    for item in items {
        if item.name.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Line item name is required".to_string(),
            ));
        }
        if item.quantity <= 0 {
            return Err(AppError::ValidationError(
                "Line item quantity must be positive".to_string(),
            ));
        }
        if item.unit_price < 0 {
            return Err(AppError::ValidationError(
                "Line item price cannot be negative".to_string(),
            ));
        }
        let line = item
            .quantity
            .checked_mul(item.unit_price)
            .ok_or_else(|| AppError::ValidationError("Invoice total overflow".to_string()))?;
        total = total
            .checked_add(line)
            .ok_or_else(|| AppError::ValidationError("Invoice total overflow".to_string()))?;
    }
    Ok(total)
}

/// Commission in minor units for a paid invoice total, rounded down.
fn commission_for(total: i64, rate_bps: i64) -> i64 {
    ((total as i128 * rate_bps as i128) / 10_000) as i64
}

#[derive(Clone)]
pub struct InvoiceService {
    pool: DatabaseConnection,
    settings: SettingsService,
}

impl InvoiceService {
    pub fn new(pool: DatabaseConnection, settings: SettingsService) -> Self {
        Self { pool, settings }
    }

    pub async fn create(
        &self,
        partner_id: Uuid,
        request: CreateInvoiceRequest,
    ) -> AppResult<InvoiceResponse> {
        if request.customer_name.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Customer name is required".to_string(),
            ));
        }

        let total = compute_total(&request.items)?;

        // An invoice can only reference the partner's own completed survey.
        if let Some(survey_id) = request.survey_id {
            let survey = surveys::Entity::find_by_id(survey_id)
                .one(&self.pool)
                .await?
                .ok_or_else(|| AppError::NotFound("Survey not found".to_string()))?;
            if survey.partner_id != partner_id {
                return Err(AppError::PermissionDenied);
            }
            if survey.status != SurveyStatus::Completed {
                return Err(AppError::ValidationError(
                    "Survey must be completed before invoicing".to_string(),
                ));
            }
        }

        let invoice_number = generate_unique_invoice_number(&self.pool).await?;
        let now = Utc::now();

        let row = invoices::ActiveModel {
            id: Set(Uuid::new_v4()),
            invoice_number: Set(invoice_number),
            partner_id: Set(Some(partner_id)),
            survey_id: Set(request.survey_id),
            customer_name: Set(request.customer_name.trim().to_string()),
            customer_phone: Set(request.customer_phone),
            items: Set(json!(request.items)),
            total: Set(total),
            status: Set(InvoiceStatus::Unpaid),
            paid_at: Set(None),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
        }
        .insert(&self.pool)
        .await?;

        log::info!(
            "Invoice {} created: partner={} total={}",
            row.invoice_number,
            partner_id,
            total
        );
        Ok(row.into())
    }

    pub async fn get_for_partner(
        &self,
        partner_id: Uuid,
        invoice_id: Uuid,
    ) -> AppResult<InvoiceResponse> {
        let invoice = invoices::Entity::find_by_id(invoice_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Invoice not found".to_string()))?;

        // Not-found rather than forbidden, so invoice ids cannot be probed.
        if invoice.partner_id != Some(partner_id) {
            return Err(AppError::NotFound("Invoice not found".to_string()));
        }
        Ok(invoice.into())
    }

    pub async fn list_for_partner(
        &self,
        partner_id: Uuid,
        query: &InvoiceListQuery,
    ) -> AppResult<PaginatedResponse<InvoiceResponse>> {
        self.list(Some(partner_id), query).await
    }

    pub async fn list_all(
        &self,
        query: &InvoiceListQuery,
    ) -> AppResult<PaginatedResponse<InvoiceResponse>> {
        self.list(None, query).await
    }

    async fn list(
        &self,
        partner_id: Option<Uuid>,
        query: &InvoiceListQuery,
    ) -> AppResult<PaginatedResponse<InvoiceResponse>> {
        let params = PaginationParams {
            page: query.page,
            page_size: query.page_size,
        };

        let mut find = invoices::Entity::find();
        if let Some(partner_id) = partner_id {
            find = find.filter(invoices::Column::PartnerId.eq(partner_id));
        }
        if let Some(status) = query.status {
            find = find.filter(invoices::Column::Status.eq(status));
        }

        let total = find.clone().count(&self.pool).await? as i64;
        let rows = find
            .order_by(invoices::Column::CreatedAt, Order::Desc)
            .limit(params.get_limit() as u64)
            .offset(params.get_offset() as u64)
            .all(&self.pool)
            .await?;

        let items: Vec<InvoiceResponse> = rows.into_iter().map(Into::into).collect();
        Ok(PaginatedResponse::new(items, &params, total))
    }

    /// Settle an invoice and credit the owning partner's commission in the
    /// same transaction. The unpaid→paid flip is a CAS, so marking an
    /// invoice paid twice credits exactly one commission.
    pub async fn mark_paid(&self, invoice_id: Uuid) -> AppResult<InvoiceResponse> {
        let invoice = invoices::Entity::find_by_id(invoice_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Invoice not found".to_string()))?;

        let rate_bps = self.settings.commission_rate_bps().await?;

        let txn = self.pool.begin().await?;

        let result = invoices::Entity::update_many()
            .set(invoices::ActiveModel {
                status: Set(InvoiceStatus::Paid),
                paid_at: Set(Some(Utc::now())),
                updated_at: Set(Some(Utc::now())),
                ..Default::default()
            })
            .filter(invoices::Column::Id.eq(invoice_id))
            .filter(invoices::Column::Status.eq(InvoiceStatus::Unpaid))
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            txn.commit().await?;
            let current = invoices::Entity::find_by_id(invoice_id)
                .one(&self.pool)
                .await?
                .ok_or_else(|| AppError::NotFound("Invoice not found".to_string()))?;
            return match current.status {
                InvoiceStatus::Paid => Ok(current.into()),
                _ => Err(AppError::InvalidTransition(format!(
                    "Invoice is {}, cannot mark it paid",
                    current.status
                ))),
            };
        }

        if let Some(partner_id) = invoice.partner_id {
            let commission = commission_for(invoice.total, rate_bps);
            if commission > 0 {
                insert_commission(
                    &txn,
                    partner_id,
                    commission,
                    Some(format!("Commission for invoice {}", invoice.invoice_number)),
                )
                .await?;
                log::info!(
                    "Commission {} credited to partner {} for invoice {}",
                    commission,
                    partner_id,
                    invoice.invoice_number
                );
            }
        } else {
            log::warn!(
                "Invoice {} paid without a linked partner, no commission credited",
                invoice.invoice_number
            );
        }

        txn.commit().await?;

        let updated = invoices::Entity::find_by_id(invoice_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Invoice not found".to_string()))?;
        Ok(updated.into())
    }

    /// Void an unpaid invoice. Paid invoices are immutable.
    pub async fn cancel(&self, invoice_id: Uuid) -> AppResult<InvoiceResponse> {
        let result = invoices::Entity::update_many()
            .set(invoices::ActiveModel {
                status: Set(InvoiceStatus::Cancelled),
                updated_at: Set(Some(Utc::now())),
                ..Default::default()
            })
            .filter(invoices::Column::Id.eq(invoice_id))
            .filter(invoices::Column::Status.eq(InvoiceStatus::Unpaid))
            .exec(&self.pool)
            .await?;

        let current = invoices::Entity::find_by_id(invoice_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Invoice not found".to_string()))?;

        if result.rows_affected == 0 && current.status != InvoiceStatus::Cancelled {
            return Err(AppError::InvalidTransition(format!(
                "Invoice is {}, cannot cancel it",
                current.status
            )));
        }
        Ok(current.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, quantity: i64, unit_price: i64) -> InvoiceItem {
        InvoiceItem {
            name: name.to_string(),
            quantity,
            unit_price,
        }
    }

    #[test]
    fn test_compute_total_sums_lines() {
        let items = vec![
            item("Gorden blackout 3m", 2, 450_000),
            item("Vitrase putih", 1, 150_000),
        ];
        assert_eq!(compute_total(&items).unwrap(), 1_050_000);
    }

    #[test]
    fn test_compute_total_rejects_bad_lines() {
        assert!(compute_total(&[]).is_err());
        assert!(compute_total(&[item("", 1, 100)]).is_err());
        assert!(compute_total(&[item("Gorden", 0, 100)]).is_err());
        assert!(compute_total(&[item("Gorden", 1, -100)]).is_err());
    }

    #[test]
    fn test_compute_total_checks_overflow() {
        let items = vec![item("Gorden", i64::MAX, 2)];
        assert!(compute_total(&items).is_err());
    }

    #[test]
    fn test_commission_rounds_down() {
        assert_eq!(commission_for(1_000_000, 1_000), 100_000); // 10%
        assert_eq!(commission_for(123_456, 1_000), 12_345);
        assert_eq!(commission_for(999, 1), 0);
        assert_eq!(commission_for(0, 1_000), 0);
    }
}

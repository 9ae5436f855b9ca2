use crate::entities::{
    invoice_entity as invoices, partner_entity as partners,
    partner_request_entity as partner_requests, survey_schedule_entity as surveys,
    transaction_entity as transactions, PartnerStatus,
};
use crate::error::{AppError, AppResult};
use crate::models::{
    PaginatedResponse, PaginationParams, PartnerListQuery, PartnerResponse, UpdateProfileRequest,
};
use crate::utils::{hash_password, validate_password};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

#[derive(Clone)]
pub struct PartnerService {
    pool: DatabaseConnection,
}

impl PartnerService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn get_profile(&self, partner_id: Uuid) -> AppResult<PartnerResponse> {
        let partner = partners::Entity::find_by_id(partner_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Partner not found".to_string()))?;
        Ok(partner.into())
    }

    /// Self-service edit of non-sensitive fields. Phone and bank details go
    /// through the change-request flow instead.
    pub async fn update_profile(
        &self,
        partner_id: Uuid,
        request: UpdateProfileRequest,
    ) -> AppResult<PartnerResponse> {
        if request.name.is_none() && request.address.is_none() {
            return Err(AppError::ValidationError("No fields to update".to_string()));
        }

        if let Some(name) = &request.name
            && (name.trim().len() < 2 || name.trim().len() > 100)
        {
            return Err(AppError::ValidationError(
                "Name must be between 2 and 100 characters".to_string(),
            ));
        }

        let mut model = partners::Entity::find_by_id(partner_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Partner not found".to_string()))?
            .into_active_model();

        if let Some(name) = request.name {
            model.name = Set(name.trim().to_string());
        }
        if let Some(address) = request.address {
            model.address = Set(Some(address));
        }
        model.updated_at = Set(Some(Utc::now()));

        let updated = model.update(&self.pool).await?;
        Ok(updated.into())
    }

    pub async fn list_partners(
        &self,
        query: &PartnerListQuery,
    ) -> AppResult<PaginatedResponse<PartnerResponse>> {
        let params = PaginationParams {
            page: query.page,
            page_size: query.page_size,
        };

        let mut find = partners::Entity::find();
        if let Some(status) = query.status {
            find = find.filter(partners::Column::Status.eq(status));
        }

        let total = find.clone().count(&self.pool).await? as i64;

        let rows = find
            .order_by(partners::Column::CreatedAt, Order::Desc)
            .limit(params.get_limit() as u64)
            .offset(params.get_offset() as u64)
            .all(&self.pool)
            .await?;

        let items: Vec<PartnerResponse> = rows.into_iter().map(Into::into).collect();
        Ok(PaginatedResponse::new(items, &params, total))
    }

    /// Activate a registered partner. Approving an already-active partner is
    /// a no-op success.
    pub async fn approve_partner(&self, partner_id: Uuid) -> AppResult<PartnerResponse> {
        let result = partners::Entity::update_many()
            .set(partners::ActiveModel {
                status: Set(PartnerStatus::Active),
                updated_at: Set(Some(Utc::now())),
                ..Default::default()
            })
            .filter(partners::Column::Id.eq(partner_id))
            .filter(partners::Column::Status.eq(PartnerStatus::Inactive))
            .exec(&self.pool)
            .await?;

        let partner = partners::Entity::find_by_id(partner_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Partner not found".to_string()))?;

        if result.rows_affected == 1 {
            log::info!("Partner approved: id={} code={}", partner.id, partner.affiliate_code);
        }
        Ok(partner.into())
    }

    pub async fn reset_password(&self, partner_id: Uuid, new_password: &str) -> AppResult<()> {
        validate_password(new_password)?;

        let mut model = partners::Entity::find_by_id(partner_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Partner not found".to_string()))?
            .into_active_model();

        model.password_hash = Set(hash_password(new_password)?);
        model.updated_at = Set(Some(Utc::now()));
        model.update(&self.pool).await?;

        log::info!("Password reset for partner {partner_id}");
        Ok(())
    }

    /// Remove a partner and every row that references it. Financial history
    /// on paid invoices survives with the partner link cleared; the ledger
    /// rows themselves go, the account cannot be rebuilt from them.
    pub async fn delete_partner(&self, partner_id: Uuid) -> AppResult<()> {
        let partner = partners::Entity::find_by_id(partner_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Partner not found".to_string()))?;

        let txn = self.pool.begin().await?;

        let deleted_transactions = transactions::Entity::delete_many()
            .filter(transactions::Column::PartnerId.eq(partner_id))
            .exec(&txn)
            .await?
            .rows_affected;

        let deleted_requests = partner_requests::Entity::delete_many()
            .filter(partner_requests::Column::PartnerId.eq(partner_id))
            .exec(&txn)
            .await?
            .rows_affected;

        let deleted_surveys = surveys::Entity::delete_many()
            .filter(surveys::Column::PartnerId.eq(partner_id))
            .exec(&txn)
            .await?
            .rows_affected;

        let unlinked_invoices = invoices::Entity::update_many()
            .set(invoices::ActiveModel {
                partner_id: Set(None),
                updated_at: Set(Some(Utc::now())),
                ..Default::default()
            })
            .filter(invoices::Column::PartnerId.eq(partner_id))
            .exec(&txn)
            .await?
            .rows_affected;

        partners::Entity::delete_by_id(partner_id).exec(&txn).await?;

        txn.commit().await?;

        log::info!(
            "Partner {} ({}) deleted: {} transactions, {} requests, {} surveys removed, {} invoices unlinked",
            partner_id,
            partner.affiliate_code,
            deleted_transactions,
            deleted_requests,
            deleted_surveys,
            unlinked_invoices
        );
        Ok(())
    }
}

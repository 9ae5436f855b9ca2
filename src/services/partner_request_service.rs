use crate::entities::{
    partner_entity as partners, partner_request_entity as partner_requests, PartnerRequestStatus,
    PartnerRequestType,
};
use crate::error::{AppError, AppResult};
use crate::models::{
    BankChangeRequest, ChangeRequestResponse, PaginatedResponse, PaginationParams,
    PhoneChangeRequest,
};
use crate::utils::{format_id_phone, validate_id_phone};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde_json::json;
use uuid::Uuid;

fn reconcile_resolution(
    current: PartnerRequestStatus,
    target: PartnerRequestStatus,
) -> AppResult<()> {
    if current == target {
        return Ok(());
    }
    Err(AppError::InvalidTransition(format!(
        "Change request already {current}, cannot mark it {target}"
    )))
}

#[derive(Clone)]
pub struct PartnerRequestService {
    pool: DatabaseConnection,
}

impl PartnerRequestService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    async fn ensure_no_open_request(
        &self,
        partner_id: Uuid,
        request_type: PartnerRequestType,
    ) -> AppResult<()> {
        let open = partner_requests::Entity::find()
            .filter(partner_requests::Column::PartnerId.eq(partner_id))
            .filter(partner_requests::Column::RequestType.eq(request_type))
            .filter(partner_requests::Column::Status.eq(PartnerRequestStatus::Pending))
            .count(&self.pool)
            .await?;
        if open > 0 {
            return Err(AppError::ValidationError(format!(
                "A {request_type} change request is already awaiting review"
            )));
        }
        Ok(())
    }

    async fn load_partner(&self, partner_id: Uuid) -> AppResult<partners::Model> {
        partners::Entity::find_by_id(partner_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Partner not found".to_string()))
    }

    pub async fn create_phone_request(
        &self,
        partner_id: Uuid,
        request: PhoneChangeRequest,
    ) -> AppResult<ChangeRequestResponse> {
        let whatsapp = format_id_phone(&request.whatsapp);
        validate_id_phone(&whatsapp)?;

        let partner = self.load_partner(partner_id).await?;
        self.ensure_no_open_request(partner_id, PartnerRequestType::Phone)
            .await?;

        let row = partner_requests::ActiveModel {
            id: Set(Uuid::new_v4()),
            partner_id: Set(partner_id),
            request_type: Set(PartnerRequestType::Phone),
            old_value: Set(json!({ "whatsapp": partner.whatsapp })),
            new_value: Set(json!({ "whatsapp": whatsapp })),
            status: Set(PartnerRequestStatus::Pending),
            resolved_at: Set(None),
            created_at: Set(Some(Utc::now())),
        }
        .insert(&self.pool)
        .await?;

        Ok(row.into())
    }

    pub async fn create_bank_request(
        &self,
        partner_id: Uuid,
        request: BankChangeRequest,
    ) -> AppResult<ChangeRequestResponse> {
        if request.bank_name.trim().is_empty()
            || request.account_holder.trim().is_empty()
            || request.account_number.trim().is_empty()
        {
            return Err(AppError::ValidationError(
                "Bank name, account holder and account number are required".to_string(),
            ));
        }
        if !request.account_number.chars().all(|c| c.is_ascii_digit()) {
            return Err(AppError::ValidationError(
                "Account number must contain digits only".to_string(),
            ));
        }

        let partner = self.load_partner(partner_id).await?;
        self.ensure_no_open_request(partner_id, PartnerRequestType::Bank)
            .await?;

        let row = partner_requests::ActiveModel {
            id: Set(Uuid::new_v4()),
            partner_id: Set(partner_id),
            request_type: Set(PartnerRequestType::Bank),
            old_value: Set(json!({
                "bank_name": partner.bank_name,
                "account_holder": partner.account_holder,
                "account_number": partner.account_number,
            })),
            new_value: Set(json!({
                "bank_name": request.bank_name.trim(),
                "account_holder": request.account_holder.trim(),
                "account_number": request.account_number.trim(),
            })),
            status: Set(PartnerRequestStatus::Pending),
            resolved_at: Set(None),
            created_at: Set(Some(Utc::now())),
        }
        .insert(&self.pool)
        .await?;

        Ok(row.into())
    }

    pub async fn list_for_partner(
        &self,
        partner_id: Uuid,
        params: &PaginationParams,
    ) -> AppResult<PaginatedResponse<ChangeRequestResponse>> {
        let find = partner_requests::Entity::find()
            .filter(partner_requests::Column::PartnerId.eq(partner_id));

        let total = find.clone().count(&self.pool).await? as i64;
        let rows = find
            .order_by(partner_requests::Column::CreatedAt, Order::Desc)
            .limit(params.get_limit() as u64)
            .offset(params.get_offset() as u64)
            .all(&self.pool)
            .await?;

        let items: Vec<ChangeRequestResponse> = rows.into_iter().map(Into::into).collect();
        Ok(PaginatedResponse::new(items, params, total))
    }

    /// Review queue for admins, oldest first.
    pub async fn list_pending(
        &self,
        params: &PaginationParams,
    ) -> AppResult<PaginatedResponse<ChangeRequestResponse>> {
        let find = partner_requests::Entity::find()
            .filter(partner_requests::Column::Status.eq(PartnerRequestStatus::Pending));

        let total = find.clone().count(&self.pool).await? as i64;
        let rows = find
            .order_by(partner_requests::Column::CreatedAt, Order::Asc)
            .limit(params.get_limit() as u64)
            .offset(params.get_offset() as u64)
            .all(&self.pool)
            .await?;

        let items: Vec<ChangeRequestResponse> = rows.into_iter().map(Into::into).collect();
        Ok(PaginatedResponse::new(items, params, total))
    }

    /// Approve a pending request: mark it resolved and copy the proposed
    /// values onto the partner row, both inside one transaction so a request
    /// is never approved without its effect.
    pub async fn approve(&self, request_id: Uuid) -> AppResult<ChangeRequestResponse> {
        let request = partner_requests::Entity::find_by_id(request_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Change request not found".to_string()))?;

        let txn = self.pool.begin().await?;

        let result = partner_requests::Entity::update_many()
            .set(partner_requests::ActiveModel {
                status: Set(PartnerRequestStatus::Approved),
                resolved_at: Set(Some(Utc::now())),
                ..Default::default()
            })
            .filter(partner_requests::Column::Id.eq(request_id))
            .filter(partner_requests::Column::Status.eq(PartnerRequestStatus::Pending))
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            txn.commit().await?;
            let current = partner_requests::Entity::find_by_id(request_id)
                .one(&self.pool)
                .await?
                .ok_or_else(|| AppError::NotFound("Change request not found".to_string()))?;
            reconcile_resolution(current.status, PartnerRequestStatus::Approved)?;
            return Ok(current.into());
        }

        let mut partner = partners::Entity::find_by_id(request.partner_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("Partner not found".to_string()))?
            .into_active_model();

        match request.request_type {
            PartnerRequestType::Phone => {
                let whatsapp = request
                    .new_value
                    .get("whatsapp")
                    .and_then(|v| v.as_str())
                    .ok_or_else(|| {
                        AppError::InternalError("Malformed phone change payload".to_string())
                    })?;
                partner.whatsapp = Set(Some(whatsapp.to_string()));
            }
            PartnerRequestType::Bank => {
                let bank: BankChangeRequest = serde_json::from_value(request.new_value.clone())?;
                partner.bank_name = Set(Some(bank.bank_name));
                partner.account_holder = Set(Some(bank.account_holder));
                partner.account_number = Set(Some(bank.account_number));
            }
        }
        partner.updated_at = Set(Some(Utc::now()));
        partner.update(&txn).await?;

        txn.commit().await?;

        let resolved = partner_requests::Entity::find_by_id(request_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Change request not found".to_string()))?;

        log::info!(
            "Change request {} approved: partner={} type={}",
            request_id,
            request.partner_id,
            request.request_type
        );
        Ok(resolved.into())
    }

    pub async fn reject(&self, request_id: Uuid) -> AppResult<ChangeRequestResponse> {
        let result = partner_requests::Entity::update_many()
            .set(partner_requests::ActiveModel {
                status: Set(PartnerRequestStatus::Rejected),
                resolved_at: Set(Some(Utc::now())),
                ..Default::default()
            })
            .filter(partner_requests::Column::Id.eq(request_id))
            .filter(partner_requests::Column::Status.eq(PartnerRequestStatus::Pending))
            .exec(&self.pool)
            .await?;

        let current = partner_requests::Entity::find_by_id(request_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Change request not found".to_string()))?;

        if result.rows_affected == 0 {
            reconcile_resolution(current.status, PartnerRequestStatus::Rejected)?;
        }
        Ok(current.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_is_exactly_once() {
        assert!(reconcile_resolution(
            PartnerRequestStatus::Approved,
            PartnerRequestStatus::Approved
        )
        .is_ok());

        let err = reconcile_resolution(
            PartnerRequestStatus::Rejected,
            PartnerRequestStatus::Approved,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidTransition(_)));
    }
}

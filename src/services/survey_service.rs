use crate::entities::{survey_schedule_entity as surveys, SurveyStatus};
use crate::error::{AppError, AppResult};
use crate::models::{
    CreateSurveyRequest, PaginatedResponse, PaginationParams, SurveyResponse,
    UpdateSurveyStatusRequest,
};
use crate::utils::{format_id_phone, validate_id_phone};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

#[derive(Clone)]
pub struct SurveyService {
    pool: DatabaseConnection,
}

impl SurveyService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn schedule(
        &self,
        partner_id: Uuid,
        request: CreateSurveyRequest,
    ) -> AppResult<SurveyResponse> {
        if request.customer_name.trim().is_empty() || request.address.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Customer name and address are required".to_string(),
            ));
        }
        if request.scheduled_date < Utc::now().date_naive() {
            return Err(AppError::ValidationError(
                "Survey date cannot be in the past".to_string(),
            ));
        }

        let customer_phone = match &request.customer_phone {
            Some(raw) => {
                let formatted = format_id_phone(raw);
                validate_id_phone(&formatted)?;
                Some(formatted)
            }
            None => None,
        };

        let now = Utc::now();
        let row = surveys::ActiveModel {
            id: Set(Uuid::new_v4()),
            partner_id: Set(partner_id),
            customer_name: Set(request.customer_name.trim().to_string()),
            customer_phone: Set(customer_phone),
            address: Set(request.address.trim().to_string()),
            scheduled_date: Set(request.scheduled_date),
            time_slot: Set(request.time_slot),
            notes: Set(request.notes),
            status: Set(SurveyStatus::Scheduled),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
        }
        .insert(&self.pool)
        .await?;

        Ok(row.into())
    }

    pub async fn list_for_partner(
        &self,
        partner_id: Uuid,
        params: &PaginationParams,
    ) -> AppResult<PaginatedResponse<SurveyResponse>> {
        let find = surveys::Entity::find().filter(surveys::Column::PartnerId.eq(partner_id));

        let total = find.clone().count(&self.pool).await? as i64;
        let rows = find
            .order_by(surveys::Column::ScheduledDate, Order::Desc)
            .order_by(surveys::Column::CreatedAt, Order::Desc)
            .limit(params.get_limit() as u64)
            .offset(params.get_offset() as u64)
            .all(&self.pool)
            .await?;

        let items: Vec<SurveyResponse> = rows.into_iter().map(Into::into).collect();
        Ok(PaginatedResponse::new(items, params, total))
    }

    /// Move an owned survey out of `scheduled`. Completed and cancelled are
    /// terminal; re-applying the same state is a no-op.
    pub async fn update_status(
        &self,
        partner_id: Uuid,
        survey_id: Uuid,
        request: UpdateSurveyStatusRequest,
    ) -> AppResult<SurveyResponse> {
        if request.status == SurveyStatus::Scheduled {
            return Err(AppError::ValidationError(
                "A survey cannot go back to scheduled".to_string(),
            ));
        }

        let survey = surveys::Entity::find_by_id(survey_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Survey not found".to_string()))?;
        if survey.partner_id != partner_id {
            return Err(AppError::NotFound("Survey not found".to_string()));
        }

        let result = surveys::Entity::update_many()
            .set(surveys::ActiveModel {
                status: Set(request.status),
                updated_at: Set(Some(Utc::now())),
                ..Default::default()
            })
            .filter(surveys::Column::Id.eq(survey_id))
            .filter(surveys::Column::Status.eq(SurveyStatus::Scheduled))
            .exec(&self.pool)
            .await?;

        let current = surveys::Entity::find_by_id(survey_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Survey not found".to_string()))?;

        if result.rows_affected == 0 && current.status != request.status {
            return Err(AppError::InvalidTransition(format!(
                "Survey already {}, cannot mark it {}",
                current.status, request.status
            )));
        }
        Ok(current.into())
    }
}

use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;
use uuid::Uuid;

use crate::middlewares::auth_context;
use crate::models::*;
use crate::services::SurveyService;

#[utoipa::path(
    post,
    path = "/surveys",
    tag = "surveys",
    request_body = CreateSurveyRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Survey scheduled", body = SurveyResponse),
        (status = 400, description = "Invalid survey data")
    )
)]
pub async fn create_survey(
    survey_service: web::Data<SurveyService>,
    req: HttpRequest,
    request: web::Json<CreateSurveyRequest>,
) -> Result<HttpResponse> {
    let context = match auth_context(&req) {
        Ok(context) => context,
        Err(e) => return Ok(e.error_response()),
    };

    match survey_service
        .schedule(context.partner_id, request.into_inner())
        .await
    {
        Ok(survey) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": survey
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/surveys",
    tag = "surveys",
    params(
        ("page" = Option<i64>, Query, description = "Page number"),
        ("page_size" = Option<i64>, Query, description = "Items per page")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Partner's surveys, most recent date first"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_surveys(
    survey_service: web::Data<SurveyService>,
    req: HttpRequest,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    let context = match auth_context(&req) {
        Ok(context) => context,
        Err(e) => return Ok(e.error_response()),
    };

    match survey_service
        .list_for_partner(context.partner_id, &query.into_inner())
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/surveys/{id}/status",
    tag = "surveys",
    params(
        ("id" = Uuid, Path, description = "Survey id")
    ),
    request_body = UpdateSurveyStatusRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Survey status updated", body = SurveyResponse),
        (status = 404, description = "Survey not found"),
        (status = 409, description = "Survey already resolved")
    )
)]
pub async fn update_survey_status(
    survey_service: web::Data<SurveyService>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    request: web::Json<UpdateSurveyStatusRequest>,
) -> Result<HttpResponse> {
    let context = match auth_context(&req) {
        Ok(context) => context,
        Err(e) => return Ok(e.error_response()),
    };

    match survey_service
        .update_status(context.partner_id, path.into_inner(), request.into_inner())
        .await
    {
        Ok(survey) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": survey
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn survey_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/surveys")
            .route("", web::post().to(create_survey))
            .route("", web::get().to(list_surveys))
            .route("/{id}/status", web::put().to(update_survey_status)),
    );
}

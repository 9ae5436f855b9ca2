use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

use crate::middlewares::auth_context;
use crate::models::*;
use crate::services::{PartnerRequestService, PartnerService};

#[utoipa::path(
    get,
    path = "/partner/profile",
    tag = "partner",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Partner profile", body = PartnerResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Partner not found")
    )
)]
pub async fn get_profile(
    partner_service: web::Data<PartnerService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let context = match auth_context(&req) {
        Ok(context) => context,
        Err(e) => return Ok(e.error_response()),
    };

    match partner_service.get_profile(context.partner_id).await {
        Ok(partner) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": partner
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/partner/profile",
    tag = "partner",
    request_body = UpdateProfileRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Profile updated", body = PartnerResponse),
        (status = 400, description = "Invalid profile data")
    )
)]
pub async fn update_profile(
    partner_service: web::Data<PartnerService>,
    req: HttpRequest,
    request: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse> {
    let context = match auth_context(&req) {
        Ok(context) => context,
        Err(e) => return Ok(e.error_response()),
    };

    match partner_service
        .update_profile(context.partner_id, request.into_inner())
        .await
    {
        Ok(partner) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": partner
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/partner/requests/phone",
    tag = "partner",
    request_body = PhoneChangeRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Phone change submitted for review", body = ChangeRequestResponse),
        (status = 400, description = "Invalid phone number or duplicate open request")
    )
)]
pub async fn create_phone_request(
    request_service: web::Data<PartnerRequestService>,
    req: HttpRequest,
    request: web::Json<PhoneChangeRequest>,
) -> Result<HttpResponse> {
    let context = match auth_context(&req) {
        Ok(context) => context,
        Err(e) => return Ok(e.error_response()),
    };

    match request_service
        .create_phone_request(context.partner_id, request.into_inner())
        .await
    {
        Ok(change) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": change,
            "message": "Change submitted for admin review"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/partner/requests/bank",
    tag = "partner",
    request_body = BankChangeRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Bank details change submitted for review", body = ChangeRequestResponse),
        (status = 400, description = "Invalid bank details or duplicate open request")
    )
)]
pub async fn create_bank_request(
    request_service: web::Data<PartnerRequestService>,
    req: HttpRequest,
    request: web::Json<BankChangeRequest>,
) -> Result<HttpResponse> {
    let context = match auth_context(&req) {
        Ok(context) => context,
        Err(e) => return Ok(e.error_response()),
    };

    match request_service
        .create_bank_request(context.partner_id, request.into_inner())
        .await
    {
        Ok(change) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": change,
            "message": "Change submitted for admin review"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/partner/requests",
    tag = "partner",
    params(
        ("page" = Option<i64>, Query, description = "Page number"),
        ("page_size" = Option<i64>, Query, description = "Items per page")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Partner's own change requests"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_my_requests(
    request_service: web::Data<PartnerRequestService>,
    req: HttpRequest,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    let context = match auth_context(&req) {
        Ok(context) => context,
        Err(e) => return Ok(e.error_response()),
    };

    match request_service
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

pub fn partner_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/partner")
            .route("/profile", web::get().to(get_profile))
            .route("/profile", web::put().to(update_profile))
            .route("/requests", web::get().to(list_my_requests))
            .route("/requests/phone", web::post().to(create_phone_request))
            .route("/requests/bank", web::post().to(create_bank_request)),
    );
}

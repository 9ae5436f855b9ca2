use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;
use uuid::Uuid;

use crate::middlewares::require_admin;
use crate::models::*;
use crate::services::{
    InvoiceService, LedgerService, PartnerRequestService, PartnerService, ProductService,
    SettingsService, WithdrawalService,
};

// Partner administration

#[utoipa::path(
    get,
    path = "/admin/partners",
    tag = "admin",
    params(
        ("status" = Option<String>, Query, description = "active | inactive"),
        ("page" = Option<i64>, Query, description = "Page number"),
        ("page_size" = Option<i64>, Query, description = "Items per page")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All partners"),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn list_partners(
    partner_service: web::Data<PartnerService>,
    req: HttpRequest,
    query: web::Query<PartnerListQuery>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match partner_service.list_partners(&query.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/partners/{id}/approve",
    tag = "admin",
    params(("id" = Uuid, Path, description = "Partner id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Partner activated", body = PartnerResponse),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Partner not found")
    )
)]
pub async fn approve_partner(
    partner_service: web::Data<PartnerService>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match partner_service.approve_partner(path.into_inner()).await {
        Ok(partner) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": partner,
            "message": "Partner activated"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/partners/{id}/reset-password",
    tag = "admin",
    params(("id" = Uuid, Path, description = "Partner id")),
    request_body = ResetPasswordRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Password reset"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Partner not found")
    )
)]
pub async fn reset_password(
    partner_service: web::Data<PartnerService>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    request: web::Json<ResetPasswordRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match partner_service
        .reset_password(path.into_inner(), &request.new_password)
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Password reset"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/admin/partners/{id}",
    tag = "admin",
    params(("id" = Uuid, Path, description = "Partner id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Partner and dependent rows removed, invoices unlinked"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Partner not found")
    )
)]
pub async fn delete_partner(
    partner_service: web::Data<PartnerService>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match partner_service.delete_partner(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Partner deleted"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

// Withdrawal review

#[utoipa::path(
    get,
    path = "/admin/withdrawals",
    tag = "admin",
    params(
        ("page" = Option<i64>, Query, description = "Page number"),
        ("page_size" = Option<i64>, Query, description = "Items per page")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Pending withdrawals, oldest first"),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn list_pending_withdrawals(
    withdrawal_service: web::Data<WithdrawalService>,
    req: HttpRequest,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match withdrawal_service.list_pending(&query.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/withdrawals/{id}/approve",
    tag = "admin",
    params(("id" = Uuid, Path, description = "Withdrawal transaction id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Withdrawal approved (idempotent)", body = TransactionResponse),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Withdrawal not found"),
        (status = 409, description = "Withdrawal already rejected")
    )
)]
pub async fn approve_withdrawal(
    withdrawal_service: web::Data<WithdrawalService>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match withdrawal_service.approve(path.into_inner()).await {
        Ok(transaction) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": transaction,
            "message": "Withdrawal approved"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/withdrawals/{id}/reject",
    tag = "admin",
    params(("id" = Uuid, Path, description = "Withdrawal transaction id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Withdrawal rejected, funds return to the balance", body = TransactionResponse),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Withdrawal not found"),
        (status = 409, description = "Withdrawal already approved")
    )
)]
pub async fn reject_withdrawal(
    withdrawal_service: web::Data<WithdrawalService>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match withdrawal_service.reject(path.into_inner()).await {
        Ok(transaction) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": transaction,
            "message": "Withdrawal rejected"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

// Change-request review

#[utoipa::path(
    get,
    path = "/admin/partner-requests",
    tag = "admin",
    params(
        ("page" = Option<i64>, Query, description = "Page number"),
        ("page_size" = Option<i64>, Query, description = "Items per page")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Pending change requests, oldest first"),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn list_pending_requests(
    request_service: web::Data<PartnerRequestService>,
    req: HttpRequest,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match request_service.list_pending(&query.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/partner-requests/{id}/approve",
    tag = "admin",
    params(("id" = Uuid, Path, description = "Change request id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Request approved and applied to the partner", body = ChangeRequestResponse),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Request not found"),
        (status = 409, description = "Request already rejected")
    )
)]
pub async fn approve_partner_request(
    request_service: web::Data<PartnerRequestService>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match request_service.approve(path.into_inner()).await {
        Ok(change) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": change,
            "message": "Change request approved"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/partner-requests/{id}/reject",
    tag = "admin",
    params(("id" = Uuid, Path, description = "Change request id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Request rejected", body = ChangeRequestResponse),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Request not found"),
        (status = 409, description = "Request already approved")
    )
)]
pub async fn reject_partner_request(
    request_service: web::Data<PartnerRequestService>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match request_service.reject(path.into_inner()).await {
        Ok(change) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": change,
            "message": "Change request rejected"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

// Manual bonuses

#[utoipa::path(
    post,
    path = "/admin/commissions",
    tag = "admin",
    request_body = ManualCommissionRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Bonus credited", body = TransactionResponse),
        (status = 400, description = "Invalid amount"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Partner not found")
    )
)]
pub async fn grant_commission(
    ledger_service: web::Data<LedgerService>,
    req: HttpRequest,
    request: web::Json<ManualCommissionRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    let request = request.into_inner();
    match ledger_service
        .grant_commission(request.partner_id, request.amount, request.description)
        .await
    {
        Ok(transaction) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": transaction,
            "message": "Commission credited"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

// Invoice administration

#[utoipa::path(
    get,
    path = "/admin/invoices",
    tag = "admin",
    params(
        ("status" = Option<String>, Query, description = "unpaid | paid | cancelled"),
        ("page" = Option<i64>, Query, description = "Page number"),
        ("page_size" = Option<i64>, Query, description = "Items per page")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All invoices"),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn list_all_invoices(
    invoice_service: web::Data<InvoiceService>,
    req: HttpRequest,
    query: web::Query<InvoiceListQuery>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match invoice_service.list_all(&query.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/invoices/{id}/pay",
    tag = "admin",
    params(("id" = Uuid, Path, description = "Invoice id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Invoice settled, commission credited once", body = InvoiceResponse),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Invoice not found"),
        (status = 409, description = "Invoice cancelled")
    )
)]
pub async fn mark_invoice_paid(
    invoice_service: web::Data<InvoiceService>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match invoice_service.mark_paid(path.into_inner()).await {
        Ok(invoice) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": invoice,
            "message": "Invoice marked paid"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/invoices/{id}/cancel",
    tag = "admin",
    params(("id" = Uuid, Path, description = "Invoice id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Invoice cancelled", body = InvoiceResponse),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Invoice not found"),
        (status = 409, description = "Invoice already paid")
    )
)]
pub async fn cancel_invoice(
    invoice_service: web::Data<InvoiceService>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match invoice_service.cancel(path.into_inner()).await {
        Ok(invoice) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": invoice,
            "message": "Invoice cancelled"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

// Product administration

#[utoipa::path(
    get,
    path = "/admin/products",
    tag = "admin",
    params(
        ("page" = Option<i64>, Query, description = "Page number"),
        ("page_size" = Option<i64>, Query, description = "Items per page")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All products, active or not"),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn list_all_products(
    product_service: web::Data<ProductService>,
    req: HttpRequest,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match product_service.list_all(&query.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/products",
    tag = "admin",
    request_body = CreateProductRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Product created", body = ProductResponse),
        (status = 400, description = "Invalid product data"),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn create_product(
    product_service: web::Data<ProductService>,
    req: HttpRequest,
    request: web::Json<CreateProductRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match product_service.create(request.into_inner()).await {
        Ok(product) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": product
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/admin/products/{id}",
    tag = "admin",
    params(("id" = Uuid, Path, description = "Product id")),
    request_body = UpdateProductRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn update_product(
    product_service: web::Data<ProductService>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    request: web::Json<UpdateProductRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match product_service
        .update(path.into_inner(), request.into_inner())
        .await
    {
        Ok(product) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": product
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/admin/products/{id}",
    tag = "admin",
    params(("id" = Uuid, Path, description = "Product id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Product removed"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn delete_product(
    product_service: web::Data<ProductService>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match product_service.delete(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Product removed"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

// Runtime settings

#[utoipa::path(
    get,
    path = "/admin/settings",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Ledger and polling settings", body = LedgerSettingsResponse),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn get_settings(
    settings_service: web::Data<SettingsService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match settings_service.ledger_settings().await {
        Ok(settings) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": settings
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/admin/settings",
    tag = "admin",
    request_body = UpdateSettingsRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Settings updated", body = LedgerSettingsResponse),
        (status = 400, description = "Invalid settings"),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn update_settings(
    settings_service: web::Data<SettingsService>,
    req: HttpRequest,
    request: web::Json<UpdateSettingsRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match settings_service.update_settings(request.into_inner()).await {
        Ok(settings) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": settings
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn admin_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/partners", web::get().to(list_partners))
            .route("/partners/{id}/approve", web::post().to(approve_partner))
            .route(
                "/partners/{id}/reset-password",
                web::post().to(reset_password),
            )
            .route("/partners/{id}", web::delete().to(delete_partner))
            .route("/withdrawals", web::get().to(list_pending_withdrawals))
            .route(
                "/withdrawals/{id}/approve",
                web::post().to(approve_withdrawal),
            )
            .route("/withdrawals/{id}/reject", web::post().to(reject_withdrawal))
            .route("/partner-requests", web::get().to(list_pending_requests))
            .route(
                "/partner-requests/{id}/approve",
                web::post().to(approve_partner_request),
            )
            .route(
                "/partner-requests/{id}/reject",
                web::post().to(reject_partner_request),
            )
            .route("/commissions", web::post().to(grant_commission))
            .route("/invoices", web::get().to(list_all_invoices))
            .route("/invoices/{id}/pay", web::post().to(mark_invoice_paid))
            .route("/invoices/{id}/cancel", web::post().to(cancel_invoice))
            .route("/products", web::get().to(list_all_products))
            .route("/products", web::post().to(create_product))
            .route("/products/{id}", web::put().to(update_product))
            .route("/products/{id}", web::delete().to(delete_product))
            .route("/settings", web::get().to(get_settings))
            .route("/settings", web::put().to(update_settings)),
    );
}

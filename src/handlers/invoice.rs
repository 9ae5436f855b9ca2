use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;
use uuid::Uuid;

use crate::middlewares::auth_context;
use crate::models::*;
use crate::services::InvoiceService;

#[utoipa::path(
    post,
    path = "/invoices",
    tag = "invoices",
    request_body = CreateInvoiceRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Invoice created", body = InvoiceResponse),
        (status = 400, description = "Invalid invoice data")
    )
)]
pub async fn create_invoice(
    invoice_service: web::Data<InvoiceService>,
    req: HttpRequest,
    request: web::Json<CreateInvoiceRequest>,
) -> Result<HttpResponse> {
    let context = match auth_context(&req) {
        Ok(context) => context,
        Err(e) => return Ok(e.error_response()),
    };

    match invoice_service
        .create(context.partner_id, request.into_inner())
        .await
    {
        Ok(invoice) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": invoice
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/invoices",
    tag = "invoices",
    params(
        ("status" = Option<String>, Query, description = "unpaid | paid | cancelled"),
        ("page" = Option<i64>, Query, description = "Page number"),
        ("page_size" = Option<i64>, Query, description = "Items per page")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Partner's invoices, newest first"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_invoices(
    invoice_service: web::Data<InvoiceService>,
    req: HttpRequest,
    query: web::Query<InvoiceListQuery>,
) -> Result<HttpResponse> {
    let context = match auth_context(&req) {
        Ok(context) => context,
        Err(e) => return Ok(e.error_response()),
    };

    match invoice_service
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
    get,
    path = "/invoices/{id}",
    tag = "invoices",
    params(
        ("id" = Uuid, Path, description = "Invoice id")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Invoice detail", body = InvoiceResponse),
        (status = 404, description = "Invoice not found")
    )
)]
pub async fn get_invoice(
    invoice_service: web::Data<InvoiceService>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let context = match auth_context(&req) {
        Ok(context) => context,
        Err(e) => return Ok(e.error_response()),
    };

    match invoice_service
        .get_for_partner(context.partner_id, path.into_inner())
        .await
    {
        Ok(invoice) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": invoice
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn invoice_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/invoices")
            .route("", web::post().to(create_invoice))
            .route("", web::get().to(list_invoices))
            .route("/{id}", web::get().to(get_invoice)),
    );
}

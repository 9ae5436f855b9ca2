use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

use crate::middlewares::auth_context;
use crate::models::*;
use crate::services::{LedgerService, WithdrawalService};

#[utoipa::path(
    get,
    path = "/ledger/balance",
    tag = "ledger",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current balance derived from the transaction log", body = BalanceResponse),
        (status = 401, description = "Unauthorized"),
        (status = 503, description = "Record store unavailable")
    )
)]
pub async fn get_balance(
    ledger_service: web::Data<LedgerService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let context = match auth_context(&req) {
        Ok(context) => context,
        Err(e) => return Ok(e.error_response()),
    };

    match ledger_service.compute_balance(context.partner_id).await {
        Ok(balance) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": balance
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/ledger/history",
    tag = "ledger",
    params(
        ("filter" = Option<HistoryFilter>, Query, description = "all | commission | withdraw"),
        ("page" = Option<i64>, Query, description = "Page number"),
        ("page_size" = Option<i64>, Query, description = "Items per page")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Transaction history, newest first"),
        (status = 401, description = "Unauthorized"),
        (status = 503, description = "Record store unavailable")
    )
)]
pub async fn get_history(
    ledger_service: web::Data<LedgerService>,
    req: HttpRequest,
    query: web::Query<HistoryQuery>,
) -> Result<HttpResponse> {
    let context = match auth_context(&req) {
        Ok(context) => context,
        Err(e) => return Ok(e.error_response()),
    };

    match ledger_service
        .list_history(context.partner_id, &query.into_inner())
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
    post,
    path = "/ledger/withdrawals",
    tag = "ledger",
    request_body = SubmitWithdrawalRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Withdrawal submitted, pending admin review", body = TransactionResponse),
        (status = 400, description = "Below minimum or insufficient balance"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn submit_withdrawal(
    withdrawal_service: web::Data<WithdrawalService>,
    req: HttpRequest,
    request: web::Json<SubmitWithdrawalRequest>,
) -> Result<HttpResponse> {
    let context = match auth_context(&req) {
        Ok(context) => context,
        Err(e) => return Ok(e.error_response()),
    };

    match withdrawal_service
        .submit(context.partner_id, request.amount)
        .await
    {
        Ok(transaction) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": transaction,
            "message": "Withdrawal submitted for admin review"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn ledger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/ledger")
            .route("/balance", web::get().to(get_balance))
            .route("/history", web::get().to(get_history))
            .route("/withdrawals", web::post().to(submit_withdrawal)),
    );
}

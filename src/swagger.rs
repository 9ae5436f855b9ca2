use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::entities::{
    InvoiceStatus, PartnerRequestStatus, PartnerRequestType, PartnerRole, PartnerStatus,
    SurveyStatus, TransactionStatus, TransactionType,
};
use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.as_mut().unwrap();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::refresh,
        handlers::auth::logout,
        handlers::partner::get_profile,
        handlers::partner::update_profile,
        handlers::partner::create_phone_request,
        handlers::partner::create_bank_request,
        handlers::partner::list_my_requests,
        handlers::ledger::get_balance,
        handlers::ledger::get_history,
        handlers::ledger::submit_withdrawal,
        handlers::product::list_products,
        handlers::invoice::create_invoice,
        handlers::invoice::list_invoices,
        handlers::invoice::get_invoice,
        handlers::survey::create_survey,
        handlers::survey::list_surveys,
        handlers::survey::update_survey_status,
        handlers::settings::client_settings,
        handlers::admin::list_partners,
        handlers::admin::approve_partner,
        handlers::admin::reset_password,
        handlers::admin::delete_partner,
        handlers::admin::list_pending_withdrawals,
        handlers::admin::approve_withdrawal,
        handlers::admin::reject_withdrawal,
        handlers::admin::list_pending_requests,
        handlers::admin::approve_partner_request,
        handlers::admin::reject_partner_request,
        handlers::admin::grant_commission,
        handlers::admin::list_all_invoices,
        handlers::admin::mark_invoice_paid,
        handlers::admin::cancel_invoice,
        handlers::admin::list_all_products,
        handlers::admin::create_product,
        handlers::admin::update_product,
        handlers::admin::delete_product,
        handlers::admin::get_settings,
        handlers::admin::update_settings,
    ),
    components(
        schemas(
            ApiError,
            PartnerResponse,
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            UpdateProfileRequest,
            ResetPasswordRequest,
            PartnerStatus,
            PartnerRole,
            TransactionResponse,
            BalanceResponse,
            HistoryFilter,
            SubmitWithdrawalRequest,
            ManualCommissionRequest,
            TransactionType,
            TransactionStatus,
            ChangeRequestResponse,
            PhoneChangeRequest,
            BankChangeRequest,
            PartnerRequestType,
            PartnerRequestStatus,
            ProductResponse,
            CreateProductRequest,
            UpdateProductRequest,
            InvoiceItem,
            InvoiceResponse,
            CreateInvoiceRequest,
            InvoiceStatus,
            SurveyResponse,
            CreateSurveyRequest,
            UpdateSurveyStatusRequest,
            SurveyStatus,
            ClientSettingsResponse,
            LedgerSettingsResponse,
            UpdateSettingsRequest,
            PaginationParams,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Registration and token management"),
        (name = "partner", description = "Partner profile and change requests"),
        (name = "ledger", description = "Balance, history and withdrawals"),
        (name = "products", description = "Product catalog"),
        (name = "invoices", description = "Customer invoices"),
        (name = "surveys", description = "On-site survey scheduling"),
        (name = "settings", description = "Public client settings"),
        (name = "admin", description = "Back-office operations"),
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );
}

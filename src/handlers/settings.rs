use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

use crate::services::SettingsService;

#[utoipa::path(
    get,
    path = "/settings/client",
    tag = "settings",
    responses(
        (status = 200, description = "Public client settings (poll cadence, withdrawal minimum)"),
        (status = 503, description = "Record store unavailable")
    )
)]
pub async fn client_settings(settings_service: web::Data<SettingsService>) -> Result<HttpResponse> {
    match settings_service.client_settings().await {
        Ok(settings) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": settings
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn settings_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/settings").route("/client", web::get().to(client_settings)));
}

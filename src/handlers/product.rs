use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

use crate::services::ProductService;

#[utoipa::path(
    get,
    path = "/products",
    tag = "products",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Active product catalog"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_products(product_service: web::Data<ProductService>) -> Result<HttpResponse> {
    match product_service.list_active().await {
        Ok(products) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": products
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn product_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/products").route("", web::get().to(list_products)));
}

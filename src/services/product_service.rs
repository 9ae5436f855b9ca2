use crate::entities::product_entity as products;
use crate::error::{AppError, AppResult};
use crate::models::{
    CreateProductRequest, PaginatedResponse, PaginationParams, ProductResponse,
    UpdateProductRequest,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

#[derive(Clone)]
pub struct ProductService {
    pool: DatabaseConnection,
}

impl ProductService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// Catalog as partners see it: active products only.
    pub async fn list_active(&self) -> AppResult<Vec<ProductResponse>> {
        let rows = products::Entity::find()
            .filter(products::Column::IsActive.eq(true))
            .order_by(products::Column::Name, Order::Asc)
            .all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn list_all(
        &self,
        params: &PaginationParams,
    ) -> AppResult<PaginatedResponse<ProductResponse>> {
        let find = products::Entity::find();

        let total = find.clone().count(&self.pool).await? as i64;
        let rows = find
            .order_by(products::Column::CreatedAt, Order::Desc)
            .limit(params.get_limit() as u64)
            .offset(params.get_offset() as u64)
            .all(&self.pool)
            .await?;

        let items: Vec<ProductResponse> = rows.into_iter().map(Into::into).collect();
        Ok(PaginatedResponse::new(items, params, total))
    }

    pub async fn create(&self, request: CreateProductRequest) -> AppResult<ProductResponse> {
        if request.name.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Product name is required".to_string(),
            ));
        }
        if request.price < 0 {
            return Err(AppError::ValidationError(
                "Product price cannot be negative".to_string(),
            ));
        }

        let now = Utc::now();
        let row = products::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(request.name.trim().to_string()),
            category: Set(request.category),
            price: Set(request.price),
            unit: Set(request.unit),
            description: Set(request.description),
            image_url: Set(request.image_url),
            is_active: Set(true),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
        }
        .insert(&self.pool)
        .await?;

        Ok(row.into())
    }

    pub async fn update(
        &self,
        product_id: Uuid,
        request: UpdateProductRequest,
    ) -> AppResult<ProductResponse> {
        if let Some(price) = request.price
            && price < 0
        {
            return Err(AppError::ValidationError(
                "Product price cannot be negative".to_string(),
            ));
        }

        let mut model = products::Entity::find_by_id(product_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?
            .into_active_model();

        if let Some(name) = request.name {
            if name.trim().is_empty() {
                return Err(AppError::ValidationError(
                    "Product name is required".to_string(),
                ));
            }
            model.name = Set(name.trim().to_string());
        }
        if let Some(category) = request.category {
            model.category = Set(Some(category));
        }
        if let Some(price) = request.price {
            model.price = Set(price);
        }
        if let Some(unit) = request.unit {
            model.unit = Set(Some(unit));
        }
        if let Some(description) = request.description {
            model.description = Set(Some(description));
        }
        if let Some(image_url) = request.image_url {
            model.image_url = Set(Some(image_url));
        }
        if let Some(is_active) = request.is_active {
            model.is_active = Set(is_active);
        }
        model.updated_at = Set(Some(Utc::now()));

        let updated = model.update(&self.pool).await?;
        Ok(updated.into())
    }

    pub async fn delete(&self, product_id: Uuid) -> AppResult<()> {
        let product = products::Entity::find_by_id(product_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

        products::Entity::delete_by_id(product.id)
            .exec(&self.pool)
            .await?;
        Ok(())
    }
}

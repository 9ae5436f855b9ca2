use crate::entities::{partner_entity as partners, PartnerRole, PartnerStatus};
use crate::error::{AppError, AppResult};
use crate::models::{AuthResponse, LoginRequest, PartnerResponse, RegisterRequest};
use crate::utils::{
    format_id_phone, generate_unique_affiliate_code, hash_password, validate_id_phone,
    validate_password, verify_password, JwtService,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

#[derive(Clone)]
pub struct AuthService {
    pool: DatabaseConnection,
    jwt_service: JwtService,
}

impl AuthService {
    pub fn new(pool: DatabaseConnection, jwt_service: JwtService) -> Self {
        Self { pool, jwt_service }
    }

    /// Create an `inactive` partner account. Activation is an admin decision;
    /// until then login is refused.
    pub async fn register(&self, request: RegisterRequest) -> AppResult<PartnerResponse> {
        let name = request.name.trim();
        if name.len() < 2 || name.len() > 100 {
            return Err(AppError::ValidationError(
                "Name must be between 2 and 100 characters".to_string(),
            ));
        }

        let email = request.email.trim().to_lowercase();
        if !email.contains('@') || email.len() < 5 {
            return Err(AppError::ValidationError(
                "Invalid email address".to_string(),
            ));
        }

        validate_password(&request.password)?;

        let whatsapp = match &request.whatsapp {
            Some(raw) => {
                let formatted = format_id_phone(raw);
                validate_id_phone(&formatted)?;
                Some(formatted)
            }
            None => None,
        };

        let existing = partners::Entity::find()
            .filter(partners::Column::Email.eq(email.clone()))
            .one(&self.pool)
            .await?;
        if existing.is_some() {
            return Err(AppError::ValidationError(
                "Email already registered".to_string(),
            ));
        }

        let affiliate_code = generate_unique_affiliate_code(&self.pool).await?;
        let now = Utc::now();

        let partner = partners::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            email: Set(email),
            password_hash: Set(hash_password(&request.password)?),
            affiliate_code: Set(affiliate_code),
            whatsapp: Set(whatsapp),
            address: Set(request.address),
            bank_name: Set(None),
            account_holder: Set(None),
            account_number: Set(None),
            status: Set(PartnerStatus::Inactive),
            role: Set(PartnerRole::Partner),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
        }
        .insert(&self.pool)
        .await?;

        log::info!(
            "Partner registered: id={} code={}",
            partner.id,
            partner.affiliate_code
        );
        Ok(partner.into())
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<AuthResponse> {
        let email = request.email.trim().to_lowercase();

        let partner = partners::Entity::find()
            .filter(partners::Column::Email.eq(email))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::AuthError("Invalid email or password".to_string()))?;

        if !verify_password(&request.password, &partner.password_hash)? {
            return Err(AppError::AuthError("Invalid email or password".to_string()));
        }

        if partner.status != PartnerStatus::Active {
            return Err(AppError::AuthError(
                "Account is awaiting admin approval".to_string(),
            ));
        }

        self.token_pair(partner)
    }

    pub async fn refresh_token(&self, token: &str) -> AppResult<AuthResponse> {
        let claims = self.jwt_service.verify_refresh_token(token)?;
        let partner_id = claims.partner_id()?;

        let partner = partners::Entity::find_by_id(partner_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::AuthError("Account no longer exists".to_string()))?;

        if partner.status != PartnerStatus::Active {
            return Err(AppError::AuthError("Account is inactive".to_string()));
        }

        self.token_pair(partner)
    }

    fn token_pair(&self, partner: partners::Model) -> AppResult<AuthResponse> {
        let access_token = self.jwt_service.generate_access_token(
            partner.id,
            &partner.affiliate_code,
            partner.role,
        )?;
        let refresh_token = self.jwt_service.generate_refresh_token(
            partner.id,
            &partner.affiliate_code,
            partner.role,
        )?;

        Ok(AuthResponse {
            partner: partner.into(),
            access_token,
            refresh_token,
            expires_in: self.jwt_service.get_access_token_expires_in(),
        })
    }
}

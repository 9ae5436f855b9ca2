use crate::config::LedgerConfig;
use crate::entities::app_setting_entity as app_settings;
use crate::error::{AppError, AppResult};
use crate::models::{ClientSettingsResponse, LedgerSettingsResponse, UpdateSettingsRequest};
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, EntityTrait, Set};

pub const KEY_MIN_WITHDRAWAL: &str = "min_withdrawal";
pub const KEY_COMMISSION_RATE_BPS: &str = "commission_rate_bps";
pub const KEY_POLL_INTERVAL_SECS: &str = "poll_interval_secs";
pub const KEY_POLL_JITTER_SECS: &str = "poll_jitter_secs";

fn validate_update(request: &UpdateSettingsRequest) -> AppResult<()> {
    if let Some(min) = request.min_withdrawal
        && min <= 0
    {
        return Err(AppError::ValidationError(
            "min_withdrawal must be positive".to_string(),
        ));
    }
    if let Some(bps) = request.commission_rate_bps
        && !(0..=10_000).contains(&bps)
    {
        return Err(AppError::ValidationError(
            "commission_rate_bps must be between 0 and 10000".to_string(),
        ));
    }
    if let Some(interval) = request.poll_interval_secs
        && interval < 5
    {
        return Err(AppError::ValidationError(
            "poll_interval_secs must be at least 5".to_string(),
        ));
    }
    Ok(())
}

/// Runtime configuration stored as key/value rows, falling back to the
/// values from config.toml when a key is absent or unparsable.
#[derive(Clone)]
pub struct SettingsService {
    pool: DatabaseConnection,
    defaults: LedgerConfig,
}

impl SettingsService {
    pub fn new(pool: DatabaseConnection, defaults: LedgerConfig) -> Self {
        Self { pool, defaults }
    }

    async fn get_i64(&self, key: &str) -> AppResult<Option<i64>> {
        let row = app_settings::Entity::find_by_id(key.to_string())
            .one(&self.pool)
            .await?;
        Ok(row.and_then(|m| m.value.parse().ok()))
    }

    async fn get_u64(&self, key: &str) -> AppResult<Option<u64>> {
        let row = app_settings::Entity::find_by_id(key.to_string())
            .one(&self.pool)
            .await?;
        Ok(row.and_then(|m| m.value.parse().ok()))
    }

    async fn upsert(&self, key: &str, value: String) -> AppResult<()> {
        let model = app_settings::ActiveModel {
            key: Set(key.to_string()),
            value: Set(value),
            updated_at: Set(Some(Utc::now())),
        };
        app_settings::Entity::insert(model)
            .on_conflict(
                OnConflict::column(app_settings::Column::Key)
                    .update_columns([
                        app_settings::Column::Value,
                        app_settings::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn min_withdrawal(&self) -> AppResult<i64> {
        Ok(self
            .get_i64(KEY_MIN_WITHDRAWAL)
            .await?
            .unwrap_or(self.defaults.min_withdrawal))
    }

    pub async fn commission_rate_bps(&self) -> AppResult<i64> {
        Ok(self
            .get_i64(KEY_COMMISSION_RATE_BPS)
            .await?
            .unwrap_or(self.defaults.commission_rate_bps))
    }

    pub async fn client_settings(&self) -> AppResult<ClientSettingsResponse> {
        Ok(ClientSettingsResponse {
            poll_interval_secs: self
                .get_u64(KEY_POLL_INTERVAL_SECS)
                .await?
                .unwrap_or(self.defaults.poll_interval_secs),
            poll_jitter_secs: self
                .get_u64(KEY_POLL_JITTER_SECS)
                .await?
                .unwrap_or(self.defaults.poll_jitter_secs),
            min_withdrawal: self.min_withdrawal().await?,
        })
    }

    pub async fn ledger_settings(&self) -> AppResult<LedgerSettingsResponse> {
        let client = self.client_settings().await?;
        Ok(LedgerSettingsResponse {
            min_withdrawal: client.min_withdrawal,
            commission_rate_bps: self.commission_rate_bps().await?,
            poll_interval_secs: client.poll_interval_secs,
            poll_jitter_secs: client.poll_jitter_secs,
        })
    }

    pub async fn update_settings(
        &self,
        request: UpdateSettingsRequest,
    ) -> AppResult<LedgerSettingsResponse> {
        validate_update(&request)?;

        if let Some(min) = request.min_withdrawal {
            self.upsert(KEY_MIN_WITHDRAWAL, min.to_string()).await?;
        }
        if let Some(bps) = request.commission_rate_bps {
            self.upsert(KEY_COMMISSION_RATE_BPS, bps.to_string()).await?;
        }
        if let Some(interval) = request.poll_interval_secs {
            self.upsert(KEY_POLL_INTERVAL_SECS, interval.to_string())
                .await?;
        }
        if let Some(jitter) = request.poll_jitter_secs {
            self.upsert(KEY_POLL_JITTER_SECS, jitter.to_string()).await?;
        }

        self.ledger_settings().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_update() -> UpdateSettingsRequest {
        UpdateSettingsRequest {
            min_withdrawal: None,
            commission_rate_bps: None,
            poll_interval_secs: None,
            poll_jitter_secs: None,
        }
    }

    #[test]
    fn test_validate_update_accepts_sane_values() {
        let request = UpdateSettingsRequest {
            min_withdrawal: Some(50_000),
            commission_rate_bps: Some(1_000),
            poll_interval_secs: Some(45),
            poll_jitter_secs: Some(10),
        };
        assert!(validate_update(&request).is_ok());
        assert!(validate_update(&empty_update()).is_ok());
    }

    #[test]
    fn test_validate_update_rejects_bad_values() {
        let mut request = empty_update();
        request.min_withdrawal = Some(0);
        assert!(validate_update(&request).is_err());

        let mut request = empty_update();
        request.commission_rate_bps = Some(10_001);
        assert!(validate_update(&request).is_err());

        let mut request = empty_update();
        request.poll_interval_secs = Some(1);
        assert!(validate_update(&request).is_err());
    }
}

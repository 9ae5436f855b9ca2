use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Runtime knobs served to the SPA so the refresh cadence is configuration
/// rather than a constant baked into the client bundle.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ClientSettingsResponse {
    pub poll_interval_secs: u64,
    pub poll_jitter_secs: u64,
    pub min_withdrawal: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LedgerSettingsResponse {
    pub min_withdrawal: i64,
    pub commission_rate_bps: i64,
    pub poll_interval_secs: u64,
    pub poll_jitter_secs: u64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateSettingsRequest {
    pub min_withdrawal: Option<i64>,
    pub commission_rate_bps: Option<i64>,
    pub poll_interval_secs: Option<u64>,
    pub poll_jitter_secs: Option<u64>,
}

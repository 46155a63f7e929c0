use rust_decimal::Decimal;
use serde::Deserialize;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000/api";

/// Minimum interval between AI insight calls absent a forced refresh
pub const DEFAULT_INSIGHT_THROTTLE_MS: i64 = 60_000;

/// Storage key of the persisted insight throttle timestamp
pub const DEFAULT_THROTTLE_STORAGE_KEY: &str = "lastAIRequest";

/// Configuration for the dashboard controller
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub api_base_url: String,
    pub insight_throttle_ms: i64,
    pub throttle_storage_key: String,
    /// Largest amount accepted by the expense editor
    pub max_amount: Decimal,
    pub currency_symbol: String,
    /// Number of months offered by the month picker, newest first
    pub month_picker_len: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            insight_throttle_ms: DEFAULT_INSIGHT_THROTTLE_MS,
            throttle_storage_key: DEFAULT_THROTTLE_STORAGE_KEY.to_string(),
            max_amount: Decimal::new(9_999_999_999, 2),
            currency_symbol: "₹".to_string(),
            month_picker_len: 12,
        }
    }
}

impl DashboardConfig {
    pub fn with_base_url(mut self, api_base_url: impl Into<String>) -> Self {
        self.api_base_url = api_base_url.into().trim_end_matches('/').to_string();
        self
    }
}

//! Service health report.

use jiff::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use validator::Validate;

use crate::DataResponse;

/// Overall or per-dependency health.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, JsonSchema, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Result of probing a single dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Validate)]
pub struct HealthCheck {
    pub status: HealthStatus,
    /// Human-readable probe latency, e.g. `"3ms"`.
    pub response_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Probes of the backing services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Validate)]
pub struct HealthChecks {
    #[validate(nested)]
    pub database: HealthCheck,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub redis: Option<HealthCheck>,
}

/// Health report returned by the health endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Validate)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub timestamp: Timestamp,
    pub environment: String,
    #[validate(nested)]
    pub checks: HealthChecks,
}

impl HealthReport {
    /// Returns true if every probed dependency is healthy.
    pub fn all_healthy(&self) -> bool {
        let redis = self.checks.redis.as_ref();
        self.checks.database.status == HealthStatus::Healthy
            && redis.is_none_or(|check| check.status == HealthStatus::Healthy)
    }
}

/// Envelope returned by the health endpoint.
pub type HealthResponse = DataResponse<HealthReport>;

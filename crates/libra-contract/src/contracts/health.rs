//! Service health.

use libra_schema::health::HealthResponse;

use crate::{ContractRouter, RouteDescriptor};

/// Public health check.
pub fn contract() -> ContractRouter {
    ContractRouter::new().route(
        "getHealth",
        RouteDescriptor::get("/health")
            .with_summary("Get health")
            .with_description("Get health status")
            .response::<200, HealthResponse>()
            .with_fail_responses(),
    )
}

//! Offline sync event log.

use libra_schema::sync::{StoreSyncEvent, SyncEvent, SyncEventsQuery};
use libra_schema::{DataResponse, PaginatedResponse};

use crate::{ContractRouter, RouteDescriptor, SecurityOptions, security_metadata};

const EVENTS_PATH: &str = "/api/v1/sync/events";

pub fn contract() -> ContractRouter {
    let metadata = security_metadata(SecurityOptions::default());

    ContractRouter::new()
        .route(
            "storeEvent",
            RouteDescriptor::post(EVENTS_PATH)
                .with_summary("Store sync event")
                .with_description("Submit one offline sync event for current user.")
                .with_body::<StoreSyncEvent>()
                .response::<201, DataResponse<SyncEvent>>()
                .with_fail_responses()
                .with_metadata(metadata.clone()),
        )
        .route(
            "listEvents",
            RouteDescriptor::get(EVENTS_PATH)
                .with_summary("List sync events")
                .with_description("List sync events for current user since optional timestamp.")
                .with_query::<SyncEventsQuery>()
                .response::<200, PaginatedResponse<SyncEvent>>()
                .with_fail_responses()
                .with_metadata(metadata),
        )
}

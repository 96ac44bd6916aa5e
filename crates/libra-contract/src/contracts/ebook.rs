//! Ebook library and Google Books metadata.

use libra_schema::ebook::{
    AttachGoogleMetadata, Ebook, EbookGoogleMetadata, StoreEbook, UpdateEbook,
};
use libra_schema::{DataResponse, IdParams, Response};

use crate::{
    ContractRouter, ResourceContractSpec, RouteDescriptor, SecurityOptions,
    create_resource_contract, security_metadata,
};

const METADATA_PATH: &str = "/api/v1/ebooks/:id/metadata";

pub fn contract() -> ContractRouter {
    let spec = ResourceContractSpec::<Ebook, StoreEbook, UpdateEbook>::new(
        "/api/v1/ebooks",
        "Ebook",
        "Ebooks",
    );
    let metadata = security_metadata(SecurityOptions::default());

    create_resource_contract(&spec)
        .route(
            "attachMetadata",
            RouteDescriptor::post(METADATA_PATH)
                .with_summary("Attach Google metadata to ebook")
                .with_description("Upsert Google Books metadata for an ebook.")
                .with_path_params::<IdParams>()
                .with_body::<AttachGoogleMetadata>()
                .response::<200, DataResponse<EbookGoogleMetadata>>()
                .with_fail_responses()
                .with_metadata(metadata.clone()),
        )
        .route(
            "removeMetadata",
            RouteDescriptor::delete(METADATA_PATH)
                .with_summary("Detach Google metadata from ebook")
                .with_description(
                    "Soft-delete current Google Books metadata attachment for an ebook.",
                )
                .with_path_params::<IdParams>()
                .response::<200, Response>()
                .with_fail_responses()
                .with_metadata(metadata),
        )
}

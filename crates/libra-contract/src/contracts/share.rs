//! Community shares, borrows, reviews and reports.

use libra_schema::share::{
    Borrow, BorrowShare, CreateShareReport, Share, ShareReport, ShareReview, StoreShare,
    UpdateShare, UpsertShareReview,
};
use libra_schema::{DataResponse, Empty, IdParams};

use crate::{
    ContractRouter, ResourceContractSpec, RouteDescriptor, SecurityOptions,
    create_resource_contract, security_metadata,
};

pub fn contract() -> ContractRouter {
    let spec = ResourceContractSpec::<Share, StoreShare, UpdateShare>::new(
        "/api/v1/shares",
        "Share",
        "Shares",
    );
    let metadata = security_metadata(SecurityOptions::default());
    let protected = |route: RouteDescriptor| {
        route
            .with_path_params::<IdParams>()
            .with_fail_responses()
            .with_metadata(metadata.clone())
    };

    create_resource_contract(&spec)
        .route(
            "borrow",
            protected(
                RouteDescriptor::post("/api/v1/shares/:id/borrow")
                    .with_summary("Borrow share")
                    .with_description("Borrow a shared ebook if rules allow.")
                    .with_body::<BorrowShare>()
                    .response::<201, DataResponse<Borrow>>(),
            ),
        )
        .route(
            "returnBorrow",
            protected(
                RouteDescriptor::post("/api/v1/borrows/:id/return")
                    .with_summary("Return borrow")
                    .with_description("Return an active borrow by borrow id.")
                    .with_body::<Empty>()
                    .response::<200, DataResponse<Borrow>>(),
            ),
        )
        .route(
            "upsertReview",
            protected(
                RouteDescriptor::put("/api/v1/shares/:id/review")
                    .with_summary("Upsert share review")
                    .with_description("Create or update the current user review for a share.")
                    .with_body::<UpsertShareReview>()
                    .response::<200, DataResponse<ShareReview>>(),
            ),
        )
        .route(
            "createReport",
            protected(
                RouteDescriptor::post("/api/v1/shares/:id/report")
                    .with_summary("Create share report")
                    .with_description("Report problematic share content.")
                    .with_body::<CreateShareReport>()
                    .response::<201, DataResponse<ShareReport>>(),
            ),
        )
}

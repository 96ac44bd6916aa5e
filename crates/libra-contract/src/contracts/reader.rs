//! Reading progress, bookmarks, annotations and per-user reader settings.

use libra_schema::DataResponse;
use libra_schema::reader::{
    Annotation, Bookmark, ReadingProgress, StoreAnnotation, StoreBookmark, StoreReadingProgress,
    UpdateAnnotation, UpdateBookmark, UpdateReadingProgress, UpdateUserPreferences,
    UpdateUserReaderState, UserPreferences, UserReaderState,
};

use crate::{
    ContractRouter, ResourceContractSpec, RouteDescriptor, SecurityOptions,
    create_resource_contract, security_metadata,
};

const PREFERENCES_PATH: &str = "/api/v1/users/preferences";
const READER_STATE_PATH: &str = "/api/v1/users/reader-state";

pub fn contract() -> ContractRouter {
    let reading_progress = ResourceContractSpec::<
        ReadingProgress,
        StoreReadingProgress,
        UpdateReadingProgress,
    >::new(
        "/api/v1/reading-progress",
        "Reading Progress",
        "Reading Progress Entries",
    );
    let bookmarks = ResourceContractSpec::<Bookmark, StoreBookmark, UpdateBookmark>::new(
        "/api/v1/bookmarks",
        "Bookmark",
        "Bookmarks",
    );
    let annotations = ResourceContractSpec::<Annotation, StoreAnnotation, UpdateAnnotation>::new(
        "/api/v1/annotations",
        "Annotation",
        "Annotations",
    );

    let metadata = security_metadata(SecurityOptions::default());
    let protected =
        |route: RouteDescriptor| route.with_fail_responses().with_metadata(metadata.clone());

    ContractRouter::new()
        .nest("readingProgress", create_resource_contract(&reading_progress))
        .nest("bookmarks", create_resource_contract(&bookmarks))
        .nest("annotations", create_resource_contract(&annotations))
        .route(
            "getUserPreferences",
            protected(
                RouteDescriptor::get(PREFERENCES_PATH)
                    .with_summary("Get user preferences")
                    .with_description("Get reading preferences for current user.")
                    .response::<200, DataResponse<UserPreferences>>(),
            ),
        )
        .route(
            "patchUserPreferences",
            protected(
                RouteDescriptor::patch(PREFERENCES_PATH)
                    .with_summary("Patch user preferences")
                    .with_description("Partially update reading preferences for current user.")
                    .with_body::<UpdateUserPreferences>()
                    .response::<200, DataResponse<UserPreferences>>(),
            ),
        )
        .route(
            "getUserReaderState",
            protected(
                RouteDescriptor::get(READER_STATE_PATH)
                    .with_summary("Get user reader state")
                    .with_description("Get reader session state for current user.")
                    .response::<200, DataResponse<UserReaderState>>(),
            ),
        )
        .route(
            "patchUserReaderState",
            protected(
                RouteDescriptor::patch(READER_STATE_PATH)
                    .with_summary("Patch user reader state")
                    .with_description("Partially update current reader state for current user.")
                    .with_body::<UpdateUserReaderState>()
                    .response::<200, DataResponse<UserReaderState>>(),
            ),
        )
}

//! Resource contract generator.
//!
//! Expands a resource into the seven standard routes:
//!
//! | Route     | Method | Path                  | Success                       |
//! |-----------|--------|-----------------------|-------------------------------|
//! | `getMany` | GET    | `{path}`              | 200 `PaginatedResponse<E>`    |
//! | `getById` | GET    | `{path}/:id`          | 200 `DataResponse<E>`         |
//! | `store`   | POST   | `{path}`              | 201 `DataResponse<E>`         |
//! | `update`  | PATCH  | `{path}/:id`          | 200 `DataResponse<E>`         |
//! | `destroy` | DELETE | `{path}/:id`          | 200 `Response`                |
//! | `kill`    | DELETE | `{path}/:id/kill`     | 200 `Response`                |
//! | `restore` | PATCH  | `{path}/:id/restore`  | 200 `DataResponse<E>`         |
//!
//! Every route also declares the 401/403/404/500 failure envelopes and the
//! same security metadata.

use std::marker::PhantomData;

use libra_schema::{
    DataResponse, GetManyQuery, IdParams, PaginatedResponse, PreloadsQuery, Response,
};

use crate::route::RouteDescriptor;
use crate::router::ContractRouter;
use crate::schema::SchemaType;
use crate::security::{SecurityOptions, SecurityType, security_metadata};

/// Names of the generated routes.
pub mod route_names {
    pub const GET_MANY: &str = "getMany";
    pub const GET_BY_ID: &str = "getById";
    pub const STORE: &str = "store";
    pub const UPDATE: &str = "update";
    pub const DESTROY: &str = "destroy";
    pub const KILL: &str = "kill";
    pub const RESTORE: &str = "restore";

    /// All generated route names.
    pub const ALL: [&str; 7] = [GET_MANY, GET_BY_ID, STORE, UPDATE, DESTROY, KILL, RESTORE];
}

/// Input to [`create_resource_contract`].
///
/// `E` is the entity, `C` the create payload and `U` the update payload.
#[must_use]
#[derive(Debug, Clone)]
pub struct ResourceContractSpec<E, C, U> {
    path: String,
    resource: String,
    resource_plural: String,
    security: SecurityOptions,
    schemas: PhantomData<fn() -> (E, C, U)>,
}

impl<E, C, U> ResourceContractSpec<E, C, U> {
    /// Creates a protected resource accepting bearer or cookie credentials.
    pub fn new(
        path: impl Into<String>,
        resource: impl Into<String>,
        resource_plural: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            resource: resource.into(),
            resource_plural: resource_plural.into(),
            security: SecurityOptions::default(),
            schemas: PhantomData,
        }
    }

    /// Sets whether the routes require credentials.
    pub fn with_security(mut self, security: bool) -> Self {
        self.security.security = security;
        self
    }

    /// Sets the accepted credentials.
    pub fn with_security_type(mut self, security_type: SecurityType) -> Self {
        self.security.security_type = security_type;
        self
    }

    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[inline]
    pub fn resource(&self) -> &str {
        &self.resource
    }

    #[inline]
    pub fn resource_plural(&self) -> &str {
        &self.resource_plural
    }
}

/// Generates the seven standard routes of a resource.
pub fn create_resource_contract<E, C, U>(spec: &ResourceContractSpec<E, C, U>) -> ContractRouter
where
    E: SchemaType,
    C: SchemaType,
    U: SchemaType,
{
    let ResourceContractSpec {
        path,
        resource,
        resource_plural: plural,
        security,
        ..
    } = spec;

    let metadata = security_metadata(*security);
    let item_path = format!("{path}/:id");
    let finish = |route: RouteDescriptor| {
        route
            .with_fail_responses()
            .with_metadata(metadata.clone())
    };

    let get_many = RouteDescriptor::get(path.as_str())
        .with_summary(format!("Get Many {plural}"))
        .with_description(format!(
            "Retrieve a paginated list of {plural} that can be filtered, sorted, and preloaded."
        ))
        .with_query::<GetManyQuery>()
        .response::<200, PaginatedResponse<E>>();

    let get_by_id = RouteDescriptor::get(item_path.as_str())
        .with_summary(format!("Get {resource} by ID"))
        .with_description(format!(
            "Retrieve a single {resource} by its unique identifier (ID), with optional preloaded relationships."
        ))
        .with_path_params::<IdParams>()
        .with_query::<PreloadsQuery>()
        .response::<200, DataResponse<E>>();

    let store = RouteDescriptor::post(path.as_str())
        .with_summary(format!("Store {resource}"))
        .with_description(format!(
            "Create a new {resource} with the provided data, with validation and will return the created entity."
        ))
        .with_body::<C>()
        .response::<201, DataResponse<E>>();

    let update = RouteDescriptor::patch(item_path.as_str())
        .with_summary(format!("Update {resource}"))
        .with_description(format!(
            "Update an existing {resource} by its ID with the provided data, and return the updated entity."
        ))
        .with_path_params::<IdParams>()
        .with_body::<U>()
        .response::<200, DataResponse<E>>();

    let destroy = RouteDescriptor::delete(item_path.as_str())
        .with_summary(format!("Destroy {resource}"))
        .with_description(format!(
            "Soft delete the specified {resource} by its ID. This action is reversible."
        ))
        .with_path_params::<IdParams>()
        .response::<200, Response>();

    let kill = RouteDescriptor::delete(format!("{item_path}/kill"))
        .with_summary(format!("Kill {resource}"))
        .with_description(format!(
            "Permanently delete the specified {resource} by its ID. This action is irreversible."
        ))
        .with_path_params::<IdParams>()
        .response::<200, Response>();

    let restore = RouteDescriptor::patch(format!("{item_path}/restore"))
        .with_summary(format!("Restore {resource}"))
        .with_description(format!(
            "Restore a previously soft-deleted {resource} by its ID and then return the restored entity."
        ))
        .with_path_params::<IdParams>()
        .with_query::<PreloadsQuery>()
        .with_body::<Response>()
        .response::<200, DataResponse<E>>();

    ContractRouter::new()
        .route(route_names::GET_MANY, finish(get_many))
        .route(route_names::GET_BY_ID, finish(get_by_id))
        .route(route_names::STORE, finish(store))
        .route(route_names::UPDATE, finish(update))
        .route(route_names::DESTROY, finish(destroy))
        .route(route_names::KILL, finish(kill))
        .route(route_names::RESTORE, finish(restore))
}

#[cfg(test)]
mod tests {
    use libra_schema::{Empty, Model};
    use schemars::JsonSchema;
    use serde::{Deserialize, Serialize};
    use validator::Validate;

    use super::*;
    use crate::route::Method;
    use crate::security::{BEARER_AUTH, COOKIE_AUTH};

    #[derive(Debug, Serialize, Deserialize, JsonSchema, Validate)]
    struct Widget {
        #[validate(length(min = 1))]
        name: String,
        #[serde(flatten)]
        model: Model,
    }

    #[derive(Debug, Serialize, Deserialize, JsonSchema, Validate)]
    struct StoreWidget {
        name: String,
    }

    fn widgets() -> ResourceContractSpec<Widget, StoreWidget, Empty> {
        ResourceContractSpec::new("/api/v1/widgets", "Widget", "Widgets")
    }

    fn method_and_path(router: &ContractRouter, name: &str) -> (Method, String) {
        let route = router.route_at(name).unwrap();
        (route.method(), route.path().to_owned())
    }

    #[test]
    fn generates_exactly_seven_routes() {
        let router = create_resource_contract(&widgets());
        assert_eq!(router.len(), 7);

        let mut names: Vec<&str> = router.names().collect();
        names.sort_unstable();
        let mut expected = route_names::ALL.to_vec();
        expected.sort_unstable();
        assert_eq!(names, expected);
    }

    #[test]
    fn routes_match_the_table() {
        let router = create_resource_contract(&widgets());
        let base = "/api/v1/widgets";
        let item = "/api/v1/widgets/:id";

        let expected = [
            (route_names::GET_MANY, Method::Get, base.to_owned()),
            (route_names::GET_BY_ID, Method::Get, item.to_owned()),
            (route_names::STORE, Method::Post, base.to_owned()),
            (route_names::UPDATE, Method::Patch, item.to_owned()),
            (route_names::DESTROY, Method::Delete, item.to_owned()),
            (route_names::KILL, Method::Delete, format!("{item}/kill")),
            (route_names::RESTORE, Method::Patch, format!("{item}/restore")),
        ];
        for (name, method, path) in expected {
            assert_eq!(method_and_path(&router, name), (method, path), "{name}");
        }
    }

    #[test]
    fn store_and_kill_scenario() {
        let router = create_resource_contract(&widgets());

        let store = router.route_at(route_names::STORE).unwrap();
        assert_eq!(store.method(), Method::Post);
        assert_eq!(store.path(), "/api/v1/widgets");
        assert!(store.body().unwrap().is::<StoreWidget>());
        assert!(store.response_schema(201).unwrap().is::<DataResponse<Widget>>());
        assert!(store.response_schema(200).is_none());

        let kill = router.route_at(route_names::KILL).unwrap();
        assert_eq!(kill.method(), Method::Delete);
        assert_eq!(kill.path(), "/api/v1/widgets/:id/kill");
        assert!(kill.response_schema(200).unwrap().is::<Response>());
    }

    #[test]
    fn inputs_per_route() {
        let router = create_resource_contract(&widgets());

        let get_many = router.route_at(route_names::GET_MANY).unwrap();
        assert!(get_many.query().unwrap().is::<GetManyQuery>());
        assert!(get_many.path_params().is_none());
        assert!(get_many.response_schema(200).unwrap().is::<PaginatedResponse<Widget>>());

        let update = router.route_at(route_names::UPDATE).unwrap();
        assert!(update.body().unwrap().is::<Empty>());
        assert!(update.path_params().unwrap().is::<IdParams>());

        let restore = router.route_at(route_names::RESTORE).unwrap();
        assert!(restore.query().unwrap().is::<PreloadsQuery>());
        assert!(restore.body().unwrap().is::<Response>());
    }

    #[test]
    fn every_route_declares_fail_set_and_same_metadata() {
        let router = create_resource_contract(&widgets());
        let routes = router.routes();
        let metadata = routes[0].1.metadata().clone();

        for (name, route) in routes {
            for status in [401, 403, 404, 500] {
                assert!(route.response_schema(status).is_some(), "{name} {status}");
            }
            assert_eq!(route.metadata(), &metadata, "{name}");
        }

        let requirements = metadata.requirements().unwrap();
        assert_eq!(requirements.len(), 2);
        assert!(requirements[0].contains_key(BEARER_AUTH));
        assert!(requirements[1].contains_key(COOKIE_AUTH));
    }

    #[test]
    fn security_options_propagate() {
        let public = create_resource_contract(&widgets().with_security(false));
        assert!(public.routes().iter().all(|(_, route)| route.metadata().is_public()));

        let cookie = create_resource_contract(&widgets().with_security_type(SecurityType::Cookie));
        for (_, route) in cookie.routes() {
            let requirements = route.metadata().requirements().unwrap();
            assert_eq!(requirements.len(), 1);
            assert!(requirements[0].contains_key(COOKIE_AUTH));
        }
    }

    #[test]
    fn summaries_use_display_names() {
        let router = create_resource_contract(&widgets());
        let get_many = router.route_at(route_names::GET_MANY).unwrap();
        assert_eq!(get_many.summary(), Some("Get Many Widgets"));
        assert_eq!(
            get_many.description(),
            Some("Retrieve a paginated list of Widgets that can be filtered, sorted, and preloaded.")
        );
        assert_eq!(
            router.route_at(route_names::GET_BY_ID).unwrap().summary(),
            Some("Get Widget by ID")
        );
        assert_eq!(
            router.route_at(route_names::DESTROY).unwrap().description(),
            Some("Soft delete the specified Widget by its ID. This action is reversible.")
        );
    }

    #[test]
    fn store_body_validation() {
        let router = create_resource_contract(&widgets());
        let store = router.route_at(route_names::STORE).unwrap();
        assert!(store.validate_body(serde_json::json!({ "name": "gear" })).is_ok());
        assert!(store.validate_body(serde_json::json!({})).is_err());
    }
}

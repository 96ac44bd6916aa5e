//! The libra-link API contract.
//!
//! Each domain contributes one nested router; [`build_api_contract`]
//! assembles them and rejects route tables in which two operations share a
//! method and path.

use std::collections::BTreeMap;

use crate::{ContractRouter, Error, Result};

pub mod auth;
pub mod ebook;
pub mod health;
pub mod reader;
pub mod share;
pub mod sync;
pub mod user;

/// Tracing target for contract assembly.
pub const TRACING_TARGET: &str = "libra_contract::contracts";

/// Builds the complete API contract.
pub fn build_api_contract() -> Result<ContractRouter> {
    let router = ContractRouter::new()
        .try_nest("health", health::contract())?
        .try_nest("auth", auth::contract())?
        .try_nest("user", user::contract())?
        .try_nest("ebook", ebook::contract())?
        .try_nest("share", share::contract())?
        .try_nest("reader", reader::contract())?
        .try_nest("sync", sync::contract())?;

    ensure_unique_operations(&router)?;

    tracing::debug!(
        target: TRACING_TARGET,
        domains = router.len(),
        routes = router.routes().len(),
        "API contract assembled"
    );

    Ok(router)
}

/// Fails if two routes share a method and path.
pub fn ensure_unique_operations(router: &ContractRouter) -> Result<()> {
    let mut seen = BTreeMap::new();

    for (key, route) in router.routes() {
        let operation = (route.method(), route.openapi_path());
        if let Some(previous) = seen.insert(operation, key.clone()) {
            return Err(Error::contract(format!(
                "routes `{previous}` and `{key}` both declare {} {}",
                route.method(),
                route.path()
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use libra_schema::Response;

    use super::*;
    use crate::{ErrorKind, Method, RouteDescriptor, route_names};

    fn contract() -> ContractRouter {
        build_api_contract().unwrap()
    }

    #[test]
    fn nests_every_domain() {
        let contract = contract();
        let names: Vec<&str> = contract.names().collect();
        assert_eq!(
            names,
            vec!["auth", "ebook", "health", "reader", "share", "sync", "user"]
        );
    }

    #[test]
    fn resource_domains_expose_generated_routes() {
        let contract = contract();
        for prefix in [
            "user",
            "ebook",
            "share",
            "reader.readingProgress",
            "reader.bookmarks",
            "reader.annotations",
        ] {
            for name in route_names::ALL {
                let key = format!("{prefix}.{name}");
                assert!(contract.route_at(&key).is_some(), "missing {key}");
            }
        }
    }

    #[test]
    fn route_count() {
        // 6 resources x 7 generated routes, 12 auth, 1 health, 2 ebook,
        // 4 share, 4 reader settings and 2 sync routes.
        assert_eq!(contract().routes().len(), 42 + 12 + 1 + 2 + 4 + 4 + 2);
    }

    #[test]
    fn hand_written_routes() {
        let contract = contract();
        let check = |key: &str, method: Method, path: &str, status: u16| {
            let route = contract.route_at(key).unwrap();
            assert_eq!((route.method(), route.path()), (method, path), "{key}");
            assert!(route.response_schema(status).is_some(), "{key} {status}");
        };

        check("health.getHealth", Method::Get, "/health", 200);
        check("auth.register", Method::Post, "/api/v1/auth/register", 201);
        check("auth.googleLogin", Method::Get, "/api/v1/auth/google", 302);
        check("ebook.attachMetadata", Method::Post, "/api/v1/ebooks/:id/metadata", 200);
        check("ebook.removeMetadata", Method::Delete, "/api/v1/ebooks/:id/metadata", 200);
        check("share.borrow", Method::Post, "/api/v1/shares/:id/borrow", 201);
        check("share.returnBorrow", Method::Post, "/api/v1/borrows/:id/return", 200);
        check("share.upsertReview", Method::Put, "/api/v1/shares/:id/review", 200);
        check("share.createReport", Method::Post, "/api/v1/shares/:id/report", 201);
        check("reader.patchUserReaderState", Method::Patch, "/api/v1/users/reader-state", 200);
        check("sync.storeEvent", Method::Post, "/api/v1/sync/events", 201);
        check("sync.listEvents", Method::Get, "/api/v1/sync/events", 200);
    }

    #[test]
    fn redirects_have_no_fail_set() {
        let contract = contract();
        for key in ["auth.googleLogin", "auth.googleCallback"] {
            let statuses: Vec<u16> = contract
                .route_at(key)
                .unwrap()
                .responses()
                .keys()
                .copied()
                .collect();
            assert_eq!(statuses, vec![302], "{key}");
        }
    }

    #[test]
    fn security_declarations() {
        let contract = contract();
        assert!(contract.route_at("health.getHealth").unwrap().metadata().is_public());
        assert!(contract.route_at("auth.login").unwrap().metadata().is_public());
        assert!(!contract.route_at("user.getMany").unwrap().metadata().is_public());
        assert!(!contract.route_at("sync.listEvents").unwrap().metadata().is_public());
    }

    #[test]
    fn duplicate_operations_are_rejected() {
        let router = ContractRouter::new()
            .route("a", RouteDescriptor::get("/items/:id").response::<200, Response>())
            .route("b", RouteDescriptor::get("/items/:id").response::<200, Response>());

        let error = ensure_unique_operations(&router).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Contract);
        assert!(error.message().contains("GET /items/:id"));
    }
}

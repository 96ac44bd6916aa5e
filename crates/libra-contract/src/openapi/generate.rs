//! Contract to OpenAPI conversion.

use std::collections::{BTreeMap, BTreeSet};

use schemars::generate::SchemaSettings;
use schemars::transform::Transform;
use schemars::{Schema, SchemaGenerator};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use super::TRACING_TARGET;
use super::document::{
    Components, Info, OPENAPI_VERSION, OpenApiDocument, Operation, Parameter, ParameterLocation,
    RequestBody, ResponseObject, Server, security_schemes,
};
use crate::{ContractRouter, ContractSchema, Result, RouteDescriptor};

/// Document-level settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentOptions {
    pub title: String,
    pub description: Option<String>,
    pub version: String,
    pub servers: Vec<Server>,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        let title = "libra-link REST API - Documentation";
        Self {
            title: title.to_owned(),
            description: Some(title.to_owned()),
            version: "1.0.0".to_owned(),
            servers: vec![Server::new("http://localhost:8080").with_description("Local Server")],
        }
    }
}

impl DocumentOptions {
    /// Replaces the declared servers with a single local server at `url`.
    pub fn with_server_url(mut self, url: impl Into<String>) -> Self {
        self.servers = vec![Server::new(url).with_description("Local Server")];
        self
    }
}

/// Converts a contract tree into an OpenAPI 3.0 document.
///
/// Operation ids are the dotted router keys and each operation is tagged
/// with its top-level domain. Named schemas end up in `components.schemas`.
pub fn generate_document(
    router: &ContractRouter,
    options: &DocumentOptions,
) -> Result<OpenApiDocument> {
    let mut settings = SchemaSettings::openapi3();
    let mut generator = settings.clone().into_generator();
    let mut paths: BTreeMap<String, BTreeMap<String, Operation>> = BTreeMap::new();

    for (key, route) in router.routes() {
        let operation = build_operation(&key, route, &mut generator, &mut settings)?;
        paths
            .entry(route.openapi_path())
            .or_default()
            .insert(route.method().openapi_key().to_owned(), operation);
    }

    let mut schemas = BTreeMap::new();
    for (name, schema) in generator.definitions() {
        schemas.insert(name.clone(), normalize(schema.clone(), &mut settings)?);
    }

    let document = OpenApiDocument {
        openapi: OPENAPI_VERSION.to_owned(),
        info: Info {
            title: options.title.clone(),
            version: options.version.clone(),
            description: options.description.clone(),
        },
        servers: options.servers.clone(),
        paths,
        components: Components {
            schemas,
            security_schemes: security_schemes(),
        },
    };

    tracing::debug!(
        target: TRACING_TARGET,
        paths = document.paths.len(),
        schemas = document.components.schemas.len(),
        "OpenAPI document generated"
    );

    Ok(document)
}

fn build_operation(
    key: &str,
    route: &RouteDescriptor,
    generator: &mut SchemaGenerator,
    settings: &mut SchemaSettings,
) -> Result<Operation> {
    let mut parameters = Vec::new();

    let path_properties = match route.path_params() {
        Some(schema) => object_properties(schema, generator),
        None => BTreeMap::new(),
    };
    for name in route.path_param_names() {
        let schema = match path_properties.get(name) {
            Some((schema, _)) => normalize(schema.clone(), settings)?,
            None => json!({ "type": "string" }),
        };
        parameters.push(Parameter {
            name: name.to_owned(),
            location: ParameterLocation::Path,
            required: true,
            description: None,
            schema,
        });
    }

    if let Some(query) = route.query() {
        for (name, (schema, required)) in object_properties(query, generator) {
            parameters.push(Parameter {
                name,
                location: ParameterLocation::Query,
                required,
                description: None,
                schema: normalize(schema, settings)?,
            });
        }
    }

    let request_body = match route.body() {
        Some(body) => {
            let schema = normalize(body.subschema(generator).to_value(), settings)?;
            Some(RequestBody::json(schema))
        }
        None => None,
    };

    let mut responses = BTreeMap::new();
    for (status, schema) in route.responses() {
        let schema = normalize(schema.subschema(generator).to_value(), settings)?;
        responses.insert(status.to_string(), ResponseObject::json(status.to_string(), schema));
    }

    let tag = key.split('.').next().unwrap_or(key);

    Ok(Operation {
        operation_id: key.to_owned(),
        summary: route.summary().map(str::to_owned),
        description: route.description().map(str::to_owned),
        tags: vec![tag.to_owned()],
        parameters,
        request_body,
        responses,
        security: route.metadata().requirements().map(<[_]>::to_vec),
    })
}

/// Applies the OpenAPI 3.0 transforms, e.g. `type: [T, "null"]` to
/// `nullable: true`.
fn normalize(value: Value, settings: &mut SchemaSettings) -> Result<Value> {
    let mut schema = Schema::try_from(value)?;
    for transform in settings.transforms.iter_mut() {
        transform.transform(&mut schema);
    }
    Ok(schema.to_value())
}

/// Returns the properties of an object schema with their required flag.
///
/// Follows `$ref`s into the generator's definitions and merges `allOf`
/// members, which is how flattened structs may be represented.
fn object_properties(
    schema: &ContractSchema,
    generator: &mut SchemaGenerator,
) -> BTreeMap<String, (Value, bool)> {
    let root = schema.subschema(generator).to_value();
    let definitions = generator.definitions();
    let mut properties = BTreeMap::new();
    collect_properties(&root, definitions, &mut properties);
    properties
}

fn collect_properties(
    schema: &Value,
    definitions: &Map<String, Value>,
    out: &mut BTreeMap<String, (Value, bool)>,
) {
    let schema = resolve(schema, definitions);

    let required: BTreeSet<&str> = schema
        .get("required")
        .and_then(Value::as_array)
        .map(|names| names.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    if let Some(properties) = schema.get("properties").and_then(Value::as_object) {
        for (name, property) in properties {
            let is_required = required.contains(name.as_str());
            out.insert(name.clone(), (property.clone(), is_required));
        }
    }

    if let Some(members) = schema.get("allOf").and_then(Value::as_array) {
        for member in members {
            collect_properties(member, definitions, out);
        }
    }
}

fn resolve<'a>(schema: &'a Value, definitions: &'a Map<String, Value>) -> &'a Value {
    let target = schema
        .get("$ref")
        .and_then(Value::as_str)
        .and_then(|reference| reference.rsplit('/').next())
        .and_then(|name| definitions.get(name));

    match target {
        Some(target) => resolve(target, definitions),
        None => schema,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contracts::build_api_contract;
    use crate::security::{BEARER_AUTH, COOKIE_AUTH};

    fn document() -> OpenApiDocument {
        let contract = build_api_contract().unwrap();
        generate_document(&contract, &DocumentOptions::default()).unwrap()
    }

    #[test]
    fn document_header() {
        let document = document();
        assert_eq!(document.openapi, "3.0.2");
        assert_eq!(document.info.title, "libra-link REST API - Documentation");
        assert_eq!(
            document.info.description.as_deref(),
            Some("libra-link REST API - Documentation")
        );
        assert_eq!(document.info.version, "1.0.0");
        assert_eq!(document.servers.len(), 1);
        assert_eq!(document.servers[0].url, "http://localhost:8080");
        assert_eq!(document.servers[0].description.as_deref(), Some("Local Server"));
    }

    #[test]
    fn server_url_override() {
        let options = DocumentOptions::default().with_server_url("https://api.example.com");
        assert_eq!(options.servers[0].url, "https://api.example.com");
    }

    #[test]
    fn operation_ids_are_dotted_keys() {
        let document = document();

        let get_many = document.operation("/api/v1/bookmarks", "get").unwrap();
        assert_eq!(get_many.operation_id, "reader.bookmarks.getMany");
        assert_eq!(get_many.tags, vec!["reader"]);

        let kill = document.operation("/api/v1/ebooks/{id}/kill", "delete").unwrap();
        assert_eq!(kill.operation_id, "ebook.kill");
        assert_eq!(kill.summary.as_deref(), Some("Kill Ebook"));
    }

    #[test]
    fn operation_ids_are_unique() {
        let document = document();
        let ids: Vec<&str> = document
            .operations()
            .map(|operation| operation.operation_id.as_str())
            .collect();
        let unique: BTreeSet<&str> = ids.iter().copied().collect();
        assert_eq!(ids.len(), unique.len());
        assert_eq!(ids.len(), build_api_contract().unwrap().routes().len());
    }

    #[test]
    fn security_follows_metadata() {
        let document = document();

        let health = document.operation("/health", "get").unwrap();
        assert!(health.security.is_none());

        let store = document.operation("/api/v1/users", "post").unwrap();
        let security = store.security.as_ref().unwrap();
        assert_eq!(security.len(), 2);
        assert!(security[0].contains_key(BEARER_AUTH));
        assert!(security[1].contains_key(COOKIE_AUTH));

        assert!(document.components.security_schemes.contains_key(BEARER_AUTH));
        assert!(document.components.security_schemes.contains_key(COOKIE_AUTH));
    }

    #[test]
    fn parameters_are_expanded() {
        let document = document();

        let get_by_id = document.operation("/api/v1/shares/{id}", "get").unwrap();
        let names: Vec<(&str, ParameterLocation, bool)> = get_by_id
            .parameters
            .iter()
            .map(|parameter| (parameter.name.as_str(), parameter.location, parameter.required))
            .collect();
        assert_eq!(
            names,
            vec![
                ("id", ParameterLocation::Path, true),
                ("preloads", ParameterLocation::Query, false),
            ]
        );
        assert_eq!(get_by_id.parameters[0].schema["format"], "uuid");

        let list_events = document.operation("/api/v1/sync/events", "get").unwrap();
        let query: BTreeSet<&str> = list_events
            .parameters
            .iter()
            .map(|parameter| parameter.name.as_str())
            .collect();
        for name in ["limit", "offset", "preloads", "orderBy", "orderDirection", "since"] {
            assert!(query.contains(name), "missing query parameter {name}");
        }
    }

    #[test]
    fn bodies_and_responses_reference_components() {
        let document = document();
        let store = document.operation("/api/v1/ebooks", "post").unwrap();

        let body = store.request_body.as_ref().unwrap();
        assert!(body.required);

        let created = store.responses.get("201").unwrap();
        let reference = created.json_schema().unwrap()["$ref"].as_str().unwrap();
        assert!(reference.ends_with("/EbookResponse"));
        assert!(document.components.schemas.contains_key("EbookResponse"));

        let statuses: Vec<&str> = store.responses.keys().map(String::as_str).collect();
        assert_eq!(statuses, vec!["201", "401", "403", "404", "500"]);
    }

    #[test]
    fn google_callback_query() {
        let document = document();
        let callback = document.operation("/api/v1/auth/google/callback", "get").unwrap();
        let required: Vec<&str> = callback
            .parameters
            .iter()
            .filter(|parameter| parameter.required)
            .map(|parameter| parameter.name.as_str())
            .collect();
        assert_eq!(required, vec!["code", "state"]);
        assert_eq!(callback.responses.keys().collect::<Vec<_>>(), vec!["302"]);
    }
}

//! Contract tree.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use crate::route::RouteDescriptor;
use crate::{Error, Result};

/// Entry of a [`ContractRouter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractNode {
    Route(RouteDescriptor),
    Router(ContractRouter),
}

/// Named routes and nested routers.
///
/// Keys are route or domain names; nesting builds dotted key paths such as
/// `reader.bookmarks.getMany`.
#[must_use]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ContractRouter {
    entries: BTreeMap<String, ContractNode>,
}

impl ContractRouter {
    /// Creates an empty router.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a route. An existing entry with the same name is replaced.
    pub fn route(mut self, name: impl Into<String>, route: RouteDescriptor) -> Self {
        self.entries.insert(name.into(), ContractNode::Route(route));
        self
    }

    /// Adds a nested router under `name`.
    pub fn nest(mut self, name: impl Into<String>, router: ContractRouter) -> Self {
        self.entries.insert(name.into(), ContractNode::Router(router));
        self
    }

    /// Splices the entries of `other` into this router; `other` wins on
    /// name collisions.
    pub fn merge(mut self, other: ContractRouter) -> Self {
        self.entries.extend(other.entries);
        self
    }

    /// Adds a nested router, failing if `name` is already taken.
    pub fn try_nest(mut self, name: impl Into<String>, router: ContractRouter) -> Result<Self> {
        match self.entries.entry(name.into()) {
            Entry::Occupied(entry) => Err(Error::contract(format!(
                "contract entry `{}` is defined twice",
                entry.key()
            ))),
            Entry::Vacant(entry) => {
                entry.insert(ContractNode::Router(router));
                Ok(self)
            }
        }
    }

    /// Returns the direct entry named `name`.
    pub fn get(&self, name: &str) -> Option<&ContractNode> {
        self.entries.get(name)
    }

    /// Returns the route at a dotted key path.
    pub fn route_at(&self, key: &str) -> Option<&RouteDescriptor> {
        let (head, rest) = match key.split_once('.') {
            Some((head, rest)) => (head, Some(rest)),
            None => (key, None),
        };

        match (self.entries.get(head)?, rest) {
            (ContractNode::Route(route), None) => Some(route),
            (ContractNode::Router(router), Some(rest)) => router.route_at(rest),
            _ => None,
        }
    }

    /// Returns every route with its dotted key path, depth first in key order.
    pub fn routes(&self) -> Vec<(String, &RouteDescriptor)> {
        let mut routes = Vec::new();
        self.collect_routes("", &mut routes);
        routes
    }

    fn collect_routes<'a>(&'a self, prefix: &str, out: &mut Vec<(String, &'a RouteDescriptor)>) {
        for (name, node) in &self.entries {
            let key = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{prefix}.{name}")
            };

            match node {
                ContractNode::Route(route) => out.push((key, route)),
                ContractNode::Router(router) => router.collect_routes(&key, out),
            }
        }
    }

    /// Returns the names of the direct entries.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Returns the number of direct entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

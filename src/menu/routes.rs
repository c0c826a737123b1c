use serde::Serialize;

use super::{HOME_KEY, HOME_PATH, MenuTree};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub path: String,
    pub key: String,
    pub view: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteMatch<'a> {
    Found(&'a Route),
    NotFound,
}

/// Flat path-to-view table. Children are siblings of their group in URL space.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn synthesize(tree: &MenuTree) -> Self {
        let mut routes = Vec::with_capacity(tree.len());

        for entry in tree.entries() {
            if let Some(view) = &entry.view {
                routes.push(Route {
                    path: route_path_for(&entry.key),
                    key: entry.key.clone(),
                    view: view.clone(),
                });
            }

            for child in &entry.children {
                if let Some(view) = &child.view {
                    routes.push(Route {
                        path: route_path_for(&child.key),
                        key: child.key.clone(),
                        view: view.clone(),
                    });
                }
            }
        }

        Self { routes }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    // Later routes shadow earlier ones for the same path.
    pub fn lookup(&self, path: &str) -> RouteMatch<'_> {
        match self.routes.iter().rev().find(|route| route.path == path) {
            Some(route) => RouteMatch::Found(route),
            None => RouteMatch::NotFound,
        }
    }
}

pub fn route_path_for(key: &str) -> String {
    if key == HOME_KEY {
        HOME_PATH.to_owned()
    } else {
        format!("/{key}")
    }
}

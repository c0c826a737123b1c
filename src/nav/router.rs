use tracing::debug;

use crate::menu::HOME_PATH;
use crate::menu::routes::{RouteMatch, RouteTable};

/// Routing capability the shell drives. Paths are absolute; home is `/`.
pub trait Navigator {
    /// Replaces the mounted route table; the current location is kept.
    fn mount(&mut self, routes: RouteTable);

    fn navigate(&mut self, path: &str);

    fn current_path(&self) -> &str;
}

/// In-process router: mounts a route table and keeps a history stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryRouter {
    routes: RouteTable,
    history: Vec<String>,
}

impl MemoryRouter {
    pub fn new(routes: RouteTable) -> Self {
        Self::starting_at(routes, HOME_PATH)
    }

    pub fn starting_at(routes: RouteTable, path: &str) -> Self {
        Self {
            routes,
            history: vec![normalize_path(path)],
        }
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn current_route(&self) -> RouteMatch<'_> {
        self.routes.lookup(self.current_path())
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn back(&mut self) -> bool {
        if self.history.len() <= 1 {
            return false;
        }
        self.history.pop();
        true
    }
}

impl Navigator for MemoryRouter {
    fn mount(&mut self, routes: RouteTable) {
        debug!(route_count = routes.len(), "mounting route table");
        self.routes = routes;
    }

    fn navigate(&mut self, path: &str) {
        let path = normalize_path(path);
        if self.current_path() == path {
            return;
        }
        debug!(path = %path, "router navigating");
        self.history.push(path);
    }

    fn current_path(&self) -> &str {
        self.history.last().map(String::as_str).unwrap_or(HOME_PATH)
    }
}

fn normalize_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_owned()
    } else {
        format!("/{path}")
    }
}

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::menu::resolve::{ActiveSelection, Breadcrumb, breadcrumbs, resolve_active};
use crate::menu::routes::{Route, RouteMatch, RouteTable};
use crate::menu::{MenuConfig, MenuTree};

struct AppState {
    tree: MenuTree,
    routes: RouteTable,
    home_label: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ResolveQuery {
    path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolveBody {
    pub path: String,
    pub selection: ActiveSelection,
    pub breadcrumbs: Vec<Breadcrumb>,
    pub view: Option<String>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Serialize)]
struct HealthBody {
    status: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveRequestError {
    #[error("path `{path}` must start with `/`")]
    RelativePath { path: String },
}

pub fn resolve_path(
    tree: &MenuTree,
    routes: &RouteTable,
    home_label: &str,
    path: &str,
) -> Result<ResolveBody, ResolveRequestError> {
    if !path.starts_with('/') {
        return Err(ResolveRequestError::RelativePath {
            path: path.to_owned(),
        });
    }

    let view = match routes.lookup(path) {
        RouteMatch::Found(route) => Some(route.view.clone()),
        RouteMatch::NotFound => None,
    };

    Ok(ResolveBody {
        path: path.to_owned(),
        selection: resolve_active(path, tree),
        breadcrumbs: breadcrumbs(path, tree, home_label),
        view,
    })
}

fn build_router(config: MenuConfig, home_label: String) -> Router {
    let routes = RouteTable::synthesize(&config.tree);
    let state = Arc::new(AppState {
        tree: config.tree,
        routes,
        home_label: config.home_label.unwrap_or(home_label),
    });

    Router::new()
        .route("/health", get(handle_health))
        .route("/routes", get(handle_routes))
        .route("/resolve", get(handle_resolve))
        .with_state(state)
}

pub async fn run_http_server(config: MenuConfig, home_label: String, bind: &str) -> Result<()> {
    let entry_count = config.tree.len();
    let app = build_router(config, home_label);

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("failed to bind HTTP server to `{bind}`"))?;
    let local_addr = listener.local_addr().ok();

    info!(
        entries = entry_count,
        requested_bind = %bind,
        bound_addr = local_addr.map(|addr| addr.to_string()),
        "starting navigation inspection server"
    );

    axum::serve(listener, app)
        .await
        .context("HTTP server exited with an error")
}

async fn handle_health() -> Json<HealthBody> {
    Json(HealthBody { status: "ok" })
}

async fn handle_routes(State(state): State<Arc<AppState>>) -> Json<Vec<Route>> {
    Json(state.routes.routes().to_vec())
}

async fn handle_resolve(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ResolveQuery>,
) -> Response {
    match resolve_path(&state.tree, &state.routes, &state.home_label, &query.path) {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(error) => {
            warn!(path = %query.path, error = %error, "resolve request rejected");
            let body = ErrorBody {
                error: error.to_string(),
            };
            (StatusCode::BAD_REQUEST, Json(body)).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::menu::reports_tree;
    use crate::menu::routes::RouteTable;

    use super::{ResolveRequestError, resolve_path};

    #[test]
    fn resolve_path_reports_selection_trail_and_view() {
        let tree = reports_tree();
        let routes = RouteTable::synthesize(&tree);

        let body = resolve_path(&tree, &routes, "Home", "/sales").expect("path should resolve");
        assert_eq!(body.selection.ancestor_key.as_deref(), Some("reports"));
        assert_eq!(body.breadcrumbs.len(), 3);
        assert_eq!(body.view.as_deref(), Some("v1"));
    }

    #[test]
    fn resolve_path_treats_unknown_paths_as_unhighlighted() {
        let tree = reports_tree();
        let routes = RouteTable::synthesize(&tree);

        let body = resolve_path(&tree, &routes, "Home", "/404").expect("path should resolve");
        assert_eq!(body.selection.active_key, None);
        assert_eq!(body.view, None);
    }

    #[test]
    fn resolve_path_rejects_relative_paths() {
        let tree = reports_tree();
        let routes = RouteTable::synthesize(&tree);

        assert_eq!(
            resolve_path(&tree, &routes, "Home", "sales"),
            Err(ResolveRequestError::RelativePath {
                path: "sales".to_owned()
            })
        );
    }
}

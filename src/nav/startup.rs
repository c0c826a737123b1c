use std::path::PathBuf;

use anyhow::{Context, Result};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};
use tokio::time::{Duration, Instant};
use tracing::{info, warn};

use crate::menu::{MenuConfig, default_console_menu, parse_menu_config};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuSource {
    BuiltIn,
    File(PathBuf),
}

impl MenuSource {
    pub fn from_path(path: Option<PathBuf>) -> Self {
        path.map_or(Self::BuiltIn, Self::File)
    }

    pub fn describe(&self) -> String {
        match self {
            Self::BuiltIn => "built-in console menu".to_owned(),
            Self::File(path) => path.display().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Pending,
    Ready,
    Failed(String),
}

impl LoadState {
    pub fn label(&self) -> &str {
        match self {
            Self::Pending => "loading",
            Self::Ready => "ready",
            Self::Failed(_) => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuLoadUpdate {
    Loaded {
        config: MenuConfig,
        elapsed: Duration,
    },
    Failed {
        error: String,
    },
}

pub async fn load_menu_config(source: &MenuSource) -> Result<MenuConfig> {
    match source {
        MenuSource::BuiltIn => Ok(MenuConfig::from_tree(default_console_menu())),
        MenuSource::File(path) => {
            let raw = tokio::fs::read_to_string(path).await.with_context(|| {
                format!("failed to read menu configuration `{}`", path.display())
            })?;
            parse_menu_config(&raw)
                .with_context(|| format!("failed to load menu configuration `{}`", path.display()))
        }
    }
}

/// Loads the menu configuration off the UI thread and reports exactly once.
pub fn spawn_menu_loader(handle: &Handle, source: MenuSource) -> UnboundedReceiver<MenuLoadUpdate> {
    let (update_tx, update_rx) = unbounded_channel();

    let _task = handle.spawn(async move {
        let started = Instant::now();
        let update = match load_menu_config(&source).await {
            Ok(config) => {
                let elapsed = started.elapsed();
                info!(
                    source = %source.describe(),
                    entries = config.tree.len(),
                    elapsed_ms = elapsed.as_millis() as u64,
                    "menu configuration loaded"
                );
                MenuLoadUpdate::Loaded { config, elapsed }
            }
            Err(error) => {
                warn!(
                    source = %source.describe(),
                    error = %format!("{error:#}"),
                    "menu configuration failed to load"
                );
                MenuLoadUpdate::Failed {
                    error: format!("{error:#}"),
                }
            }
        };

        let _ = update_tx.send(update);
    });

    update_rx
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::time::Duration;

    use tokio::runtime::Handle;
    use tokio::time::timeout;

    use crate::menu::HOME_KEY;
    use crate::test_support::{remove_dir_if_exists, temp_path, write_menu_fixture};

    use super::{MenuLoadUpdate, MenuSource, load_menu_config, spawn_menu_loader};

    #[tokio::test]
    async fn built_in_source_loads_default_menu() {
        let config = load_menu_config(&MenuSource::BuiltIn)
            .await
            .expect("built-in menu should load");
        assert_eq!(config.tree.entries()[0].key, HOME_KEY);
        assert!(config.notifications.is_empty());
    }

    #[tokio::test]
    async fn loader_reports_file_config_once() {
        let dir = temp_path("startup-loader");
        let path = write_menu_fixture(&dir);

        let mut update_rx = spawn_menu_loader(&Handle::current(), MenuSource::File(path));
        let update = timeout(Duration::from_secs(2), update_rx.recv())
            .await
            .expect("load update should arrive")
            .expect("load update should be present");

        match update {
            MenuLoadUpdate::Loaded { config, .. } => {
                assert_eq!(config.tree.label_for("sales"), Some("Sales"));
            }
            MenuLoadUpdate::Failed { error } => panic!("load should succeed: {error}"),
        }
        assert!(update_rx.recv().await.is_none());

        remove_dir_if_exists(&dir);
    }

    #[tokio::test]
    async fn loader_reports_missing_file_as_failure() {
        let dir = temp_path("startup-missing");
        fs::create_dir_all(&dir).expect("dir should be created");

        let mut update_rx =
            spawn_menu_loader(&Handle::current(), MenuSource::File(dir.join("absent.yaml")));
        let update = timeout(Duration::from_secs(2), update_rx.recv())
            .await
            .expect("load update should arrive")
            .expect("load update should be present");

        match update {
            MenuLoadUpdate::Failed { error } => assert!(error.contains("absent.yaml")),
            MenuLoadUpdate::Loaded { .. } => panic!("missing file should fail"),
        }

        remove_dir_if_exists(&dir);
    }
}
